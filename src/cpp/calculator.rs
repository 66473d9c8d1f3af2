//! CPP retirement pension from a contributory earnings history

use crate::assumptions::CppAssumptions;
use crate::error::CppError;
use super::earnings::average_capped_earnings;
use chrono::{Datelike, NaiveDate};
use log::debug;
use serde::{Deserialize, Serialize};

/// Inputs to the earnings-history CPP model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CppRequest {
    pub birth_date: NaiveDate,
    pub start_contributing_date: NaiveDate,
    pub retirement_date: NaiveDate,
    /// Pensionable earnings, one entry per year
    pub yearly_earnings: Vec<f64>,
    /// Earnings ceiling override; defaults to the YMPE assumption
    #[serde(default)]
    pub average_industrial_wage: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CppBenefitResult {
    pub monthly_benefit: f64,
    pub yearly_benefit: f64,
    pub adjustment_factor: f64,
    pub contribution_years: u32,
    pub dropout_years: u32,
    pub average_earnings: f64,
}

/// Earnings-history CPP calculator holding its parameter set
pub struct CppCalculator {
    assumptions: CppAssumptions,
}

impl CppCalculator {
    /// Create a calculator with the given CPP parameters
    pub fn new(assumptions: CppAssumptions) -> Self {
        Self { assumptions }
    }

    /// Monthly and yearly pension for one earnings history
    pub fn calculate(&self, request: &CppRequest) -> Result<CppBenefitResult, CppError> {
        if request.retirement_date < request.start_contributing_date {
            return Err(CppError::DateOrder {
                retirement: request.retirement_date,
                other: request.start_contributing_date,
                label: "start of contributions",
            });
        }
        if request.retirement_date < request.birth_date {
            return Err(CppError::DateOrder {
                retirement: request.retirement_date,
                other: request.birth_date,
                label: "birth date",
            });
        }

        let ceiling = request.average_industrial_wage.unwrap_or(self.assumptions.ympe);
        if ceiling.is_nan() || ceiling <= 0.0 {
            return Err(CppError::NonPositiveWageCeiling(ceiling));
        }

        let contribution_years = self.contribution_years(request);
        let dropout_years = self.assumptions.dropout_years(contribution_years);
        let average_earnings = average_capped_earnings(&request.yearly_earnings, dropout_years, ceiling)?;

        let age = age_on(request.birth_date, request.retirement_date);
        let adjustment_factor = self.assumptions.adjustment_factor(age);

        let yearly_benefit = average_earnings * self.assumptions.replacement_rate * adjustment_factor;

        debug!(
            "CPP: {} contributory years, {} dropped, average {:.2}, age {} factor {:.3}",
            contribution_years, dropout_years, average_earnings, age, adjustment_factor
        );

        Ok(CppBenefitResult {
            monthly_benefit: yearly_benefit / 12.0,
            yearly_benefit,
            adjustment_factor,
            contribution_years,
            dropout_years,
            average_earnings,
        })
    }

    /// Calendar years between start and retirement, capped at the maximum
    fn contribution_years(&self, request: &CppRequest) -> u32 {
        let years = request.retirement_date.year() - request.start_contributing_date.year();
        (years.max(0) as u32).min(self.assumptions.max_contributory_years)
    }
}

impl Default for CppCalculator {
    fn default() -> Self {
        Self::new(CppAssumptions::default())
    }
}

/// Age in whole years on `date`
pub fn age_on(birth_date: NaiveDate, date: NaiveDate) -> u32 {
    let mut age = date.year() - birth_date.year();
    if (date.month(), date.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    age.max(0) as u32
}

/// Calculate with the 2024 CPP parameters
pub fn calculate_cpp_benefit(
    birth_date: NaiveDate,
    start_contributing_date: NaiveDate,
    retirement_date: NaiveDate,
    yearly_earnings: Vec<f64>,
    average_industrial_wage: Option<f64>,
) -> Result<CppBenefitResult, CppError> {
    CppCalculator::default().calculate(&CppRequest {
        birth_date,
        start_contributing_date,
        retirement_date,
        yearly_earnings,
        average_industrial_wage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_age_on_accounts_for_birthday() {
        let birth = date(1960, 6, 15);
        assert_eq!(age_on(birth, date(2025, 6, 14)), 64);
        assert_eq!(age_on(birth, date(2025, 6, 15)), 65);
        assert_eq!(age_on(birth, date(2025, 7, 1)), 65);
        assert_eq!(age_on(birth, date(2025, 5, 31)), 64);
    }

    #[test]
    fn test_benefit_at_65() {
        let result = calculate_cpp_benefit(
            date(1959, 3, 1),
            date(2014, 1, 1),
            date(2024, 3, 1),
            vec![50_000.0, 60_000.0, 70_000.0, 10_000.0],
            None,
        )
        .unwrap();

        assert_eq!(result.contribution_years, 10);
        assert_eq!(result.dropout_years, 1);
        assert_relative_eq!(result.average_earnings, 178_500.0 / 3.0);
        assert_eq!(result.adjustment_factor, 1.0);
        assert_relative_eq!(result.yearly_benefit, 178_500.0 / 3.0 * 0.25);
        assert_relative_eq!(result.monthly_benefit, 178_500.0 / 3.0 * 0.25 / 12.0);
    }

    #[test]
    fn test_early_and_late_adjustment() {
        let earnings = vec![60_000.0; 40];

        let early = calculate_cpp_benefit(date(1964, 1, 1), date(1984, 1, 1), date(2024, 1, 1), earnings.clone(), None)
            .unwrap();
        assert_relative_eq!(early.adjustment_factor, 1.0 - 0.006 * 60.0, max_relative = 1e-12);
        assert_eq!(early.contribution_years, 39);
        assert_eq!(early.dropout_years, 6);

        let late = calculate_cpp_benefit(date(1954, 1, 1), date(1984, 1, 1), date(2024, 1, 1), earnings, None)
            .unwrap();
        assert_relative_eq!(late.adjustment_factor, 1.0 + 0.007 * 60.0, max_relative = 1e-12);
        assert_relative_eq!(late.yearly_benefit, 60_000.0 * 0.25 * 1.42, max_relative = 1e-12);
    }

    #[test]
    fn test_custom_wage_ceiling() {
        let result = calculate_cpp_benefit(
            date(1959, 1, 1),
            date(2020, 1, 1),
            date(2024, 1, 1),
            vec![80_000.0, 80_000.0],
            Some(71_300.0),
        )
        .unwrap();
        assert_eq!(result.dropout_years, 0);
        assert_relative_eq!(result.average_earnings, 71_300.0);
    }

    #[test]
    fn test_invalid_inputs() {
        let err = calculate_cpp_benefit(date(1959, 1, 1), date(2020, 1, 1), date(2024, 1, 1), vec![], None)
            .unwrap_err();
        assert_eq!(err, CppError::NoEarnings);

        let err = calculate_cpp_benefit(date(1959, 1, 1), date(2025, 1, 1), date(2024, 1, 1), vec![1.0], None)
            .unwrap_err();
        assert!(matches!(err, CppError::DateOrder { .. }));

        // 39 years → 6 dropout years, but only 5 years of earnings
        let err = calculate_cpp_benefit(date(1959, 1, 1), date(1985, 1, 1), date(2024, 1, 1), vec![1.0; 5], None)
            .unwrap_err();
        assert!(matches!(err, CppError::DropoutExceedsHistory { dropout_years: 6, available: 5 }));

        let err = calculate_cpp_benefit(date(1959, 1, 1), date(2020, 1, 1), date(2024, 1, 1), vec![1.0], Some(0.0))
            .unwrap_err();
        assert_eq!(err, CppError::NonPositiveWageCeiling(0.0));

        let err = calculate_cpp_benefit(date(1959, 1, 1), date(2020, 1, 1), date(2024, 1, 1), vec![1.0], Some(f64::NAN))
            .unwrap_err();
        assert!(matches!(err, CppError::NonPositiveWageCeiling(v) if v.is_nan()));

        let err = calculate_cpp_benefit(date(1959, 1, 1), date(2020, 1, 1), date(2024, 1, 1), vec![50_000.0, f64::NAN], None)
            .unwrap_err();
        assert!(matches!(err, CppError::NonFiniteEarnings { index: 1, .. }));
    }

    #[test]
    fn test_request_json_dates() {
        let request: CppRequest = serde_json::from_str(
            r#"{"birthDate":"1960-06-15","startContributingDate":"1985-09-01",
                "retirementDate":"2025-06-15","yearlyEarnings":[55000,62000]}"#,
        )
        .unwrap();
        assert_eq!(request.birth_date, date(1960, 6, 15));
        assert!(request.average_industrial_wage.is_none());
    }
}
