//! Pension Estimator - Retirement benefit estimates for Canadian pension plans
//!
//! This library provides:
//! - A catalog of defined-benefit, defined-contribution and public plans
//! - Simple and detailed per-plan benefit estimates for a user scenario
//! - Year-by-year projections of accumulated plan value up to retirement
//! - An earnings-history CPP model with the dropout provision
//! - Versioned calculation assumptions with CSV overrides

pub mod assumptions;
pub mod benefits;
pub mod cpp;
pub mod error;
pub mod plan;
pub mod projection;
pub mod runner;
pub mod scenario;

// Re-export commonly used types
pub use assumptions::Assumptions;
pub use benefits::{CalculationResult, calculate_benefit, calculate_detailed_benefit};
pub use cpp::{CppBenefitResult, CppRequest, calculate_cpp_benefit};
pub use error::{CppError, EstimateError, LoadError, ScenarioError};
pub use plan::{PensionPlan, PlanCatalog, PlanType};
pub use projection::{ProjectionConfig, ProjectionEngine, Timeline, TimelineDataPoint, calculate_projections};
pub use runner::EstimateRunner;
pub use scenario::{ScenarioInput, UserScenario};
