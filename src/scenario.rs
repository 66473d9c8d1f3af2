//! User scenario input and its boundary validation
//!
//! A `UserScenario` can only be built through [`UserScenario::new`] (or
//! deserialised through the same checks), so every calculator receiving one
//! can rely on a positive salary, a retirement age not before the
//! current age, and ages and service no greater than [`MAX_YEARS`].

use crate::error::ScenarioError;
use serde::{Deserialize, Serialize};

/// Upper bound for ages and years of service
pub const MAX_YEARS: u32 = 120;

/// Raw scenario fields as supplied by a caller, before validation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioInput {
    pub current_age: u32,
    pub retirement_age: u32,
    pub current_salary: f64,
    pub years_of_service: u32,
}

/// Validated user scenario
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScenarioInput", into = "ScenarioInput")]
pub struct UserScenario {
    current_age: u32,
    retirement_age: u32,
    current_salary: f64,
    years_of_service: u32,
}

impl UserScenario {
    /// Validate and build a scenario
    pub fn new(
        current_age: u32,
        retirement_age: u32,
        current_salary: f64,
        years_of_service: u32,
    ) -> Result<Self, ScenarioError> {
        check_years("current age", current_age)?;
        check_years("retirement age", retirement_age)?;
        check_years("years of service", years_of_service)?;
        if !current_salary.is_finite() || current_salary <= 0.0 {
            return Err(ScenarioError::NonPositiveSalary(current_salary));
        }
        if retirement_age < current_age {
            return Err(ScenarioError::RetirementBeforeCurrentAge {
                current_age,
                retirement_age,
            });
        }

        Ok(Self {
            current_age,
            retirement_age,
            current_salary,
            years_of_service,
        })
    }

    /// Age today, in whole years
    pub fn current_age(&self) -> u32 {
        self.current_age
    }

    /// Age at which the user intends to retire
    pub fn retirement_age(&self) -> u32 {
        self.retirement_age
    }

    /// Annual salary, always > 0
    pub fn current_salary(&self) -> f64 {
        self.current_salary
    }

    /// Years already worked under the plan as of the current age
    pub fn years_of_service(&self) -> u32 {
        self.years_of_service
    }

    /// Years left to work before retirement
    pub fn years_until_retirement(&self) -> u32 {
        self.retirement_age - self.current_age
    }

    /// Yearly benefit as a percentage of current salary
    pub fn replacement_ratio(&self, yearly_benefit: f64) -> f64 {
        yearly_benefit / self.current_salary * 100.0
    }
}

fn check_years(field: &'static str, value: u32) -> Result<(), ScenarioError> {
    if value > MAX_YEARS {
        return Err(ScenarioError::YearsOutOfRange { field, value, max: MAX_YEARS });
    }
    Ok(())
}

impl TryFrom<ScenarioInput> for UserScenario {
    type Error = ScenarioError;

    fn try_from(input: ScenarioInput) -> Result<Self, Self::Error> {
        Self::new(
            input.current_age,
            input.retirement_age,
            input.current_salary,
            input.years_of_service,
        )
    }
}

impl From<UserScenario> for ScenarioInput {
    fn from(scenario: UserScenario) -> Self {
        Self {
            current_age: scenario.current_age,
            retirement_age: scenario.retirement_age,
            current_salary: scenario.current_salary,
            years_of_service: scenario.years_of_service,
        }
    }
}
