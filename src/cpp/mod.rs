//! Earnings-history CPP model
//!
//! Average capped earnings over the contributory period (lowest years
//! dropped), 25% replacement, adjusted for retirement before or after 65.
//! Self-contained: the plan calculators use the flat CPP model instead.

mod calculator;
mod earnings;

pub use calculator::{CppCalculator, CppRequest, CppBenefitResult, age_on, calculate_cpp_benefit};
pub use earnings::average_capped_earnings;
