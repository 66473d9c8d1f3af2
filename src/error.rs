//! Error types for the estimator
//!
//! The pure calculators never fail. Errors only surface where inputs cross
//! into the crate: scenario construction, the earnings-history CPP model and
//! file loading.

use thiserror::Error;

/// Boundary validation failures for a user scenario or projection rates
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScenarioError {
    #[error("current salary must be a positive, finite amount (got {0})")]
    NonPositiveSalary(f64),

    #[error("retirement age {retirement_age} is before current age {current_age}")]
    RetirementBeforeCurrentAge { current_age: u32, retirement_age: u32 },

    #[error("{name} must be a finite percentage above -100 (got {value})")]
    InvalidRate { name: &'static str, value: f64 },

    #[error("{field} must be at most {max} years (got {value})")]
    YearsOutOfRange { field: &'static str, value: u32, max: u32 },
}

/// Invalid input to the earnings-history CPP calculator
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CppError {
    #[error("no yearly earnings supplied")]
    NoEarnings,

    #[error("{dropout_years} dropout years leave nothing to average from {available} years of earnings")]
    DropoutExceedsHistory { dropout_years: u32, available: usize },

    #[error("retirement date {retirement} precedes {other} ({label})")]
    DateOrder {
        retirement: chrono::NaiveDate,
        other: chrono::NaiveDate,
        label: &'static str,
    },

    #[error("wage ceiling must be positive (got {0})")]
    NonPositiveWageCeiling(f64),

    #[error("earnings for year {index} are not a finite amount (got {value})")]
    NonFiniteEarnings { index: usize, value: f64 },
}

/// Failures reading plan catalogs or assumption overrides
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("duplicate plan id: {0}")]
    DuplicatePlanId(String),

    #[error("unknown assumption key: {0}")]
    UnknownAssumption(String),

    #[error("invalid value {value:?} for assumption {key}")]
    InvalidAssumptionValue { key: String, value: String },
}

/// Umbrella error for the request-level runner
#[derive(Debug, Error)]
pub enum EstimateError {
    #[error("pension plan not found: {0}")]
    PlanNotFound(String),

    #[error(transparent)]
    Scenario(#[from] ScenarioError),

    #[error(transparent)]
    Cpp(#[from] CppError),

    #[error(transparent)]
    Load(#[from] LoadError),
}
