//! Benefit estimate output

use serde::{Deserialize, Serialize};

/// Point-in-time benefit estimate for one plan
///
/// The optional fields are only filled by the branches that compute them;
/// the comparison calculator never sets contributions, bridge or penalty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub monthly_benefit: f64,
    pub yearly_benefit: f64,

    /// Yearly benefit as a percentage of current salary
    pub replacement_ratio: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_contributions: Option<f64>,

    /// Temporary supplement until 65 (DB plans, detailed path)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bridge_benefit: Option<f64>,

    /// Amount subtracted from the yearly benefit for early retirement
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub early_retirement_penalty: Option<f64>,

    /// Early/late retirement factor applied (CPP branches)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjustment_factor: Option<f64>,
}

impl CalculationResult {
    /// Derive monthly and replacement figures from a yearly benefit
    pub fn from_yearly(yearly_benefit: f64, current_salary: f64) -> Self {
        Self {
            monthly_benefit: yearly_benefit / 12.0,
            yearly_benefit,
            replacement_ratio: yearly_benefit / current_salary * 100.0,
            ..Default::default()
        }
    }
}
