//! Rate assumptions used by the single-point and projection calculators

use serde::{Deserialize, Serialize};

/// Flat CPP/QPP model used by the comparison, detailed and projection paths
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatCppAssumptions {
    /// Maximum monthly retirement pension at 65 (2024: $1,306.57)
    pub max_monthly_benefit: f64,
    pub normal_retirement_age: u32,
    /// Flat factor applied to any retirement before the normal age
    pub early_factor: f64,
}

impl Default for FlatCppAssumptions {
    fn default() -> Self {
        Self {
            max_monthly_benefit: 1306.57,
            normal_retirement_age: 65,
            early_factor: 0.7,
        }
    }
}

impl FlatCppAssumptions {
    /// Binary adjustment: full benefit at or after the normal age
    pub fn adjustment_factor(&self, age: u32) -> f64 {
        if age >= self.normal_retirement_age {
            1.0
        } else {
            self.early_factor
        }
    }

    pub fn monthly_benefit(&self, age: u32) -> f64 {
        self.max_monthly_benefit * self.adjustment_factor(age)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinedBenefitAssumptions {
    /// Generic accrual applied to unrecognised plan types
    pub fallback_accrual_rate: f64,
    /// Service cap in projections only
    pub projection_service_cap_years: u32,
}

impl Default for DefinedBenefitAssumptions {
    fn default() -> Self {
        Self {
            fallback_accrual_rate: 0.02,
            projection_service_cap_years: 35,
        }
    }
}

/// Defined-contribution accumulation and drawdown
///
/// The simple and detailed paths assume different returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinedContributionAssumptions {
    /// Annual return assumed by the comparison calculator
    pub simple_assumed_return: f64,
    /// Annual return assumed by the detailed calculator
    pub detailed_assumed_return: f64,
    /// Share of the accumulated balance drawn each year
    pub withdrawal_rate: f64,
    /// Combined contribution as a multiple of the employer match
    /// (employee assumed to contribute the same amount)
    pub employee_match_multiplier: f64,
}

impl Default for DefinedContributionAssumptions {
    fn default() -> Self {
        Self {
            simple_assumed_return: 0.05,
            detailed_assumed_return: 0.06,
            withdrawal_rate: 0.04,
            employee_match_multiplier: 2.0,
        }
    }
}

impl DefinedContributionAssumptions {
    pub fn annual_contribution(&self, salary: f64, employer_match: f64) -> f64 {
        salary * employer_match * self.employee_match_multiplier
    }

    /// Yearly drawdown after compounding one year's contribution for `years`
    pub fn yearly_drawdown(&self, annual_contribution: f64, assumed_return: f64, years: u32) -> f64 {
        let accumulation = annual_contribution * (1.0 + assumed_return).powi(years as i32);
        accumulation * self.withdrawal_rate
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedAssumptions {
    /// Employee contribution rate assumed for DB plans
    pub db_contribution_rate: f64,
    /// Employee contribution rate assumed for every other plan type
    pub other_contribution_rate: f64,
    /// Bridge benefit as a share of the pre-penalty yearly benefit
    pub bridge_benefit_rate: f64,
    /// Bridge is paid only when retiring before this age
    pub bridge_end_age: u32,
    /// Penalty per year retired before the plan's normal age
    pub early_penalty_per_year: f64,
}

impl Default for DetailedAssumptions {
    fn default() -> Self {
        Self {
            db_contribution_rate: 0.10,
            other_contribution_rate: 0.05,
            bridge_benefit_rate: 0.20,
            bridge_end_age: 65,
            early_penalty_per_year: 0.05,
        }
    }
}
