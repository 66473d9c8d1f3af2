//! Earnings-history CPP parameters (2024)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CppAssumptions {
    /// Longest contributory period counted
    pub max_contributory_years: u32,
    /// Share of contributory years dropped (lowest earnings)
    pub dropout_fraction: f64,
    /// Pension as a share of average capped earnings
    pub replacement_rate: f64,
    /// Year's Maximum Pensionable Earnings, used as the earnings cap
    pub ympe: f64,
    pub normal_retirement_age: u32,
    pub early_reduction_per_month: f64,
    pub late_increase_per_month: f64,
}

impl Default for CppAssumptions {
    fn default() -> Self {
        Self {
            max_contributory_years: 39,
            dropout_fraction: 0.17,
            replacement_rate: 0.25,
            ympe: 68_500.0,
            normal_retirement_age: 65,
            early_reduction_per_month: 0.006,
            late_increase_per_month: 0.007,
        }
    }
}

impl CppAssumptions {
    /// Dropout years for a contributory period (rounded down)
    pub fn dropout_years(&self, contribution_years: u32) -> u32 {
        (contribution_years as f64 * self.dropout_fraction).floor() as u32
    }

    /// Early/late retirement factor for an age in whole years
    ///
    /// Months early or late are counted in whole years.
    pub fn adjustment_factor(&self, age_at_retirement: u32) -> f64 {
        let normal = self.normal_retirement_age;
        if age_at_retirement < normal {
            let months_early = (normal - age_at_retirement) * 12;
            1.0 - self.early_reduction_per_month * months_early as f64
        } else {
            let months_late = (age_at_retirement - normal) * 12;
            1.0 + self.late_increase_per_month * months_late as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_dropout_years() {
        let cpp = CppAssumptions::default();
        assert_eq!(cpp.dropout_years(39), 6);
        assert_eq!(cpp.dropout_years(10), 1);
        assert_eq!(cpp.dropout_years(5), 0);
    }

    #[test]
    fn test_adjustment_factor() {
        let cpp = CppAssumptions::default();
        assert_abs_diff_eq!(cpp.adjustment_factor(65), 1.0);
        assert_abs_diff_eq!(cpp.adjustment_factor(60), 0.64, epsilon = 1e-12);
        assert_abs_diff_eq!(cpp.adjustment_factor(70), 1.42, epsilon = 1e-12);
        assert_abs_diff_eq!(cpp.adjustment_factor(64), 0.928, epsilon = 1e-12);
    }
}
