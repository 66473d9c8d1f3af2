//! Benefit estimates for a single plan and scenario
//!
//! - [`BenefitCalculator`]: comparison estimate (monthly, yearly, replacement)
//! - [`DetailedBenefitCalculator`]: adds contributions, bridge benefit and
//!   early retirement penalty
//!
//! Both are pure functions of the plan, the validated scenario and the
//! assumptions they borrow.

mod result;
mod calculator;
mod detailed;

pub use result::CalculationResult;
pub use calculator::{BenefitCalculator, calculate_benefit};
pub use detailed::{DetailedBenefitCalculator, calculate_detailed_benefit};
