//! Year-by-year projection of accumulated plan values up to retirement

use crate::assumptions::Assumptions;
use crate::error::ScenarioError;
use crate::plan::{PensionPlan, PlanType};
use crate::scenario::UserScenario;
use super::timeline::TimelineDataPoint;
use log::debug;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

/// Market and salary assumptions for a projection run, in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionConfig {
    /// Annual investment return / discount rate, e.g. 6.0 for 6%
    annual_return: f64,
    /// Annual salary growth, e.g. 3.0 for 3%
    salary_growth: f64,
}

impl ProjectionConfig {
    /// Validate both rates: finite and above -100%
    pub fn new(annual_return: f64, salary_growth: f64) -> Result<Self, ScenarioError> {
        check_rate("annual return", annual_return)?;
        check_rate("salary growth", salary_growth)?;
        Ok(Self {
            annual_return,
            salary_growth,
        })
    }

    pub fn annual_return(&self) -> f64 {
        self.annual_return
    }

    pub fn salary_growth(&self) -> f64 {
        self.salary_growth
    }
}

fn check_rate(name: &'static str, value: f64) -> Result<(), ScenarioError> {
    if value.is_finite() && value > -100.0 {
        Ok(())
    } else {
        Err(ScenarioError::InvalidRate { name, value })
    }
}

/// Main projection engine
pub struct ProjectionEngine {
    assumptions: Assumptions,
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine
    pub fn new(assumptions: Assumptions, config: ProjectionConfig) -> Self {
        Self { assumptions, config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Project every plan from the current age to retirement, inclusive
    ///
    /// Each age is computed independently from the scenario, so repeated
    /// calls with the same inputs return the same series.
    pub fn project<P: Borrow<PensionPlan>>(&self, plans: &[P], scenario: &UserScenario) -> Vec<TimelineDataPoint> {
        debug!(
            "Projecting {} plans from age {} to {} (return {}%, salary growth {}%)",
            plans.len(),
            scenario.current_age(),
            scenario.retirement_age(),
            self.config.annual_return,
            self.config.salary_growth
        );

        (scenario.current_age()..=scenario.retirement_age())
            .map(|age| self.project_age(plans, scenario, age))
            .collect()
    }

    /// Values of every plan at a single simulated age
    pub fn project_age<P: Borrow<PensionPlan>>(
        &self,
        plans: &[P],
        scenario: &UserScenario,
        age: u32,
    ) -> TimelineDataPoint {
        let years_contributed = age.saturating_sub(scenario.current_age());
        let salary_at_age = scenario.current_salary()
            * (1.0 + self.config.salary_growth / 100.0).powi(years_contributed as i32);

        let mut point = TimelineDataPoint::new(age);
        for plan in plans {
            let plan = plan.borrow();
            let value = self.plan_value(plan, scenario, age, years_contributed, salary_at_age);
            point.insert(&plan.id, value.round());
        }
        point
    }

    fn plan_value(
        &self,
        plan: &PensionPlan,
        scenario: &UserScenario,
        age: u32,
        years_contributed: u32,
        salary_at_age: f64,
    ) -> f64 {
        let years_to_retirement = scenario.retirement_age().saturating_sub(age);

        match &plan.plan_type {
            PlanType::DefinedBenefit => plan.accrual_rate.map_or(0.0, |accrual| {
                let cap = self.assumptions.defined_benefit.projection_service_cap_years;
                let service = (years_contributed + scenario.years_of_service()).min(cap);
                let yearly = salary_at_age * accrual * service as f64;
                self.discount(yearly, years_to_retirement)
            }),
            PlanType::DefinedContribution => plan.employer_match.map_or(0.0, |employer_match| {
                let dc = &self.assumptions.defined_contribution;
                let contribution = dc.annual_contribution(salary_at_age, employer_match);
                accumulate_annuity_due(contribution, self.config.annual_return / 100.0, years_contributed)
            }),
            PlanType::Cpp => {
                // Factor follows the simulated age, not the retirement age
                let yearly = self.assumptions.cpp_flat.monthly_benefit(age) * 12.0;
                self.discount(yearly, years_to_retirement)
            }
            PlanType::Other(_) => {
                salary_at_age * self.assumptions.defined_benefit.fallback_accrual_rate * years_contributed as f64
            }
        }
    }

    /// Present value at the simulated age of a benefit starting at retirement
    fn discount(&self, yearly: f64, years_to_retirement: u32) -> f64 {
        if years_to_retirement > 0 {
            yearly / (1.0 + self.config.annual_return / 100.0).powi(years_to_retirement as i32)
        } else {
            yearly
        }
    }
}

/// Future value of `years` contributions made at the start of each year
///
/// A zero rate degenerates to the plain sum of contributions.
fn accumulate_annuity_due(contribution: f64, rate: f64, years: u32) -> f64 {
    if rate.abs() < 1e-10 {
        return contribution * years as f64;
    }
    contribution * (((1.0 + rate).powi(years as i32) - 1.0) / rate) * (1.0 + rate)
}

/// Project with the 2024 reference assumptions
///
/// `annual_return` and `salary_growth` are percentages.
pub fn calculate_projections<P: Borrow<PensionPlan>>(
    plans: &[P],
    scenario: &UserScenario,
    annual_return: f64,
    salary_growth: f64,
) -> Result<Vec<TimelineDataPoint>, ScenarioError> {
    let config = ProjectionConfig::new(annual_return, salary_growth)?;
    Ok(ProjectionEngine::new(Assumptions::default_2024(), config).project(plans, scenario))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn plans() -> Vec<PensionPlan> {
        vec![
            PensionPlan::new("otpp", "Ontario Teachers' Pension Plan", PlanType::DefinedBenefit, 65)
                .with_accrual_rate(0.02),
            PensionPlan::new("acme", "Acme DC", PlanType::DefinedContribution, 65).with_employer_match(0.05),
            PensionPlan::new("cpp", "Canada Pension Plan (CPP)", PlanType::Cpp, 65),
            PensionPlan::new("rrsp", "Group RRSP", PlanType::Other("GROUP_RRSP".to_string()), 65),
        ]
    }

    #[test]
    fn test_sequence_bounds() {
        let scenario = UserScenario::new(40, 65, 80_000.0, 5).unwrap();
        let points = calculate_projections(&plans(), &scenario, 6.0, 3.0).unwrap();

        assert_eq!(points.len(), 65 - 40 + 1);
        assert_eq!(points.first().unwrap().age, 40);
        assert_eq!(points.last().unwrap().age, 65);
        assert!(points.windows(2).all(|w| w[0].age + 1 == w[1].age));
        assert!(points.iter().all(|p| p.values.len() == 4));
    }

    #[test]
    fn test_projection_is_repeatable() {
        let scenario = UserScenario::new(30, 60, 65_000.0, 2).unwrap();
        let first = calculate_projections(&plans(), &scenario, 5.5, 2.5).unwrap();
        let second = calculate_projections(&plans(), &scenario, 5.5, 2.5).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_retiring_this_year_yields_single_point() {
        let scenario = UserScenario::new(65, 65, 80_000.0, 30).unwrap();
        let points = calculate_projections(&plans(), &scenario, 6.0, 3.0).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].age, 65);
        // At retirement, no discount: 80,000 * 2% * 30
        assert_eq!(points[0].value("otpp"), Some(48_000.0));
    }

    #[test]
    fn test_defined_benefit_discounting_and_cap() {
        let scenario = UserScenario::new(60, 65, 100_000.0, 32).unwrap();
        let points = calculate_projections(&plans(), &scenario, 5.0, 0.0).unwrap();

        // Age 61: service 33, discounted 4 years
        let expected_61 = (100_000.0 * 0.02 * 33.0 / 1.05_f64.powi(4)).round();
        assert_eq!(points[1].value("otpp"), Some(expected_61));

        // Age 64 and 65: service capped at 35
        let expected_64 = (100_000.0_f64 * 0.02 * 35.0 / 1.05).round();
        assert_eq!(points[4].value("otpp"), Some(expected_64));
        assert_eq!(points[5].value("otpp"), Some(70_000.0));
    }

    #[test]
    fn test_defined_contribution_annuity_due() {
        let scenario = UserScenario::new(40, 45, 100_000.0, 0).unwrap();
        let points = calculate_projections(&plans(), &scenario, 6.0, 0.0).unwrap();

        assert_eq!(points[0].value("acme"), Some(0.0));
        let r: f64 = 0.06;
        let expected = 10_000.0 * ((1.0 + r).powi(5) - 1.0) / r * (1.0 + r);
        assert_eq!(points[5].value("acme"), Some(expected.round()));
    }

    #[test]
    fn test_zero_return_accumulates_linearly() {
        let scenario = UserScenario::new(40, 45, 100_000.0, 0).unwrap();
        let points = calculate_projections(&plans(), &scenario, 0.0, 0.0).unwrap();

        assert_eq!(points[3].value("acme"), Some(30_000.0));
        assert_eq!(points[5].value("acme"), Some(50_000.0));
        assert!(points.iter().all(|p| p.values.values().all(|v| v.is_finite())));
    }

    #[test]
    fn test_cpp_factor_follows_simulated_age() {
        let scenario = UserScenario::new(63, 66, 70_000.0, 0).unwrap();
        let points = calculate_projections(&plans(), &scenario, 0.0, 0.0).unwrap();

        let reduced = (1306.57 * 12.0 * 0.7_f64).round();
        let full = (1306.57 * 12.0_f64).round();
        assert_eq!(points[0].value("cpp"), Some(reduced)); // 63
        assert_eq!(points[1].value("cpp"), Some(reduced)); // 64
        assert_eq!(points[2].value("cpp"), Some(full)); // 65
        assert_eq!(points[3].value("cpp"), Some(full)); // 66
    }

    #[test]
    fn test_fallback_uses_years_contributed_only() {
        let scenario = UserScenario::new(50, 52, 60_000.0, 20).unwrap();
        let points = calculate_projections(&plans(), &scenario, 6.0, 10.0).unwrap();

        assert_eq!(points[0].value("rrsp"), Some(0.0));
        let salary_52 = 60_000.0 * 1.1_f64.powi(2);
        assert_eq!(points[2].value("rrsp"), Some((salary_52 * 0.02 * 2.0).round()));
    }

    #[test]
    fn test_missing_parameters_project_to_zero() {
        let plans = vec![
            PensionPlan::new("db", "DB", PlanType::DefinedBenefit, 65),
            PensionPlan::new("dc", "DC", PlanType::DefinedContribution, 65),
        ];
        let scenario = UserScenario::new(40, 65, 80_000.0, 5).unwrap();
        let points = calculate_projections(&plans, &scenario, 6.0, 3.0).unwrap();
        assert!(points.iter().all(|p| p.values.values().all(|v| *v == 0.0)));
    }

    #[test]
    fn test_plans_sharing_a_name_stay_separate() {
        let plans = vec![
            PensionPlan::new("a", "Same Name", PlanType::DefinedBenefit, 65).with_accrual_rate(0.02),
            PensionPlan::new("b", "Same Name", PlanType::DefinedBenefit, 65).with_accrual_rate(0.01),
        ];
        let scenario = UserScenario::new(64, 65, 50_000.0, 10).unwrap();
        let points = calculate_projections(&plans, &scenario, 0.0, 0.0).unwrap();

        let last = points.last().unwrap();
        assert_relative_eq!(last.value("a").unwrap(), 11_000.0);
        assert_relative_eq!(last.value("b").unwrap(), 5_500.0);
    }

    #[test]
    fn test_invalid_rates_rejected() {
        assert!(ProjectionConfig::new(-100.0, 0.0).is_err());
        assert!(ProjectionConfig::new(6.0, f64::NAN).is_err());
        assert!(ProjectionConfig::new(-2.0, -1.0).is_ok());
    }

    #[test]
    fn test_largest_accepted_scenario_projects() {
        use crate::scenario::MAX_YEARS;

        let scenario = UserScenario::new(0, MAX_YEARS, 80_000.0, MAX_YEARS).unwrap();
        let points = calculate_projections(&plans(), &scenario, 6.0, 3.0).unwrap();

        assert_eq!(points.len(), 121);
        assert!(points.iter().all(|p| p.values.values().all(|v| v.is_finite())));
    }
}
