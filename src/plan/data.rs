//! Pension plan reference data

use serde::{Deserialize, Serialize};
use std::fmt;

/// Plan type as stored by the plan catalog
///
/// Unrecognised type text is kept verbatim in `Other` and routed to the
/// generic accrual fallback by the calculators.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PlanType {
    /// Salary and service formula, independent of market returns
    DefinedBenefit,
    /// Accumulated invested contributions
    DefinedContribution,
    /// CPP/QPP flat public programs
    Cpp,
    /// Anything else
    Other(String),
}

impl PlanType {
    /// Catalog text form
    pub fn as_str(&self) -> &str {
        match self {
            PlanType::DefinedBenefit => "DEFINED_BENEFIT",
            PlanType::DefinedContribution => "DEFINED_CONTRIBUTION",
            PlanType::Cpp => "CPP",
            PlanType::Other(raw) => raw,
        }
    }

    pub fn is_defined_benefit(&self) -> bool {
        matches!(self, PlanType::DefinedBenefit)
    }
}

impl From<&str> for PlanType {
    fn from(raw: &str) -> Self {
        match raw.trim() {
            "DEFINED_BENEFIT" => PlanType::DefinedBenefit,
            "DEFINED_CONTRIBUTION" => PlanType::DefinedContribution,
            "CPP" => PlanType::Cpp,
            other => PlanType::Other(other.to_string()),
        }
    }
}

impl From<String> for PlanType {
    fn from(raw: String) -> Self {
        PlanType::from(raw.as_str())
    }
}

impl From<PlanType> for String {
    fn from(plan_type: PlanType) -> Self {
        plan_type.as_str().to_string()
    }
}

impl fmt::Display for PlanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A single pension plan record
///
/// Computation parameters are optional at the data level. A defined-benefit
/// plan without `accrual_rate`, or a defined-contribution plan without
/// `employer_match`, estimates to a zero benefit rather than an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PensionPlan {
    /// Unique plan identifier
    pub id: String,

    /// Display name (not used in computation)
    pub name: String,

    /// Display description (not used in computation)
    #[serde(default)]
    pub description: String,

    #[serde(rename = "type")]
    pub plan_type: PlanType,

    /// Fraction of salary accrued per year of service (DB plans)
    #[serde(default)]
    pub accrual_rate: Option<f64>,

    /// Employer matching rate (DC plans)
    #[serde(default)]
    pub employer_match: Option<f64>,

    /// Normal retirement age under the plan
    pub retirement_age: u32,

    /// Earliest allowed retirement age
    #[serde(default)]
    pub early_retirement_age: Option<u32>,

    /// Whether a temporary supplement is paid until 65
    #[serde(default)]
    pub bridge_benefit: bool,

    /// Informational only
    #[serde(default)]
    pub cpp_integration: bool,

    /// Not consumed by the calculators
    #[serde(default)]
    pub vesting_period_years: Option<u32>,
}

impl PensionPlan {
    /// Create a plan with only the required fields set
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        plan_type: PlanType,
        retirement_age: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            plan_type,
            accrual_rate: None,
            employer_match: None,
            retirement_age,
            early_retirement_age: None,
            bridge_benefit: false,
            cpp_integration: false,
            vesting_period_years: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_accrual_rate(mut self, rate: f64) -> Self {
        self.accrual_rate = Some(rate);
        self
    }

    pub fn with_employer_match(mut self, rate: f64) -> Self {
        self.employer_match = Some(rate);
        self
    }

    pub fn with_early_retirement_age(mut self, age: u32) -> Self {
        self.early_retirement_age = Some(age);
        self
    }

    pub fn with_bridge_benefit(mut self, bridge_benefit: bool) -> Self {
        self.bridge_benefit = bridge_benefit;
        self
    }

    pub fn with_cpp_integration(mut self, cpp_integration: bool) -> Self {
        self.cpp_integration = cpp_integration;
        self
    }

    pub fn with_vesting_period(mut self, years: u32) -> Self {
        self.vesting_period_years = Some(years);
        self
    }
}
