//! Detailed single-plan estimate: contributions, bridge benefit and early
//! retirement penalty
//!
//! Ordering within a DB estimate is fixed:
//! 1. bridge benefit from the pre-penalty yearly benefit
//! 2. early retirement penalty subtracted from the yearly benefit
//! 3. monthly benefit and replacement ratio from the post-penalty value

use crate::assumptions::Assumptions;
use crate::plan::{PensionPlan, PlanType};
use crate::scenario::UserScenario;
use super::calculator::flat_cpp;
use super::result::CalculationResult;
use log::debug;

/// Detailed single-plan calculator
///
/// Uses the detailed DC return assumption and adds contributions, bridge and
/// penalty to DB estimates.
pub struct DetailedBenefitCalculator<'a> {
    assumptions: &'a Assumptions,
}

impl<'a> DetailedBenefitCalculator<'a> {
    /// Create a new detailed benefit calculator
    pub fn new(assumptions: &'a Assumptions) -> Self {
        Self { assumptions }
    }

    /// Detailed estimate of one plan for one scenario
    pub fn calculate(&self, plan: &PensionPlan, scenario: &UserScenario) -> CalculationResult {
        let salary = scenario.current_salary();

        let result = match &plan.plan_type {
            PlanType::DefinedBenefit => self.defined_benefit(plan, scenario),
            PlanType::DefinedContribution => {
                let dc = &self.assumptions.defined_contribution;
                let yearly = plan.employer_match.map_or(0.0, |employer_match| {
                    dc.yearly_drawdown(
                        dc.annual_contribution(salary, employer_match),
                        dc.detailed_assumed_return,
                        scenario.years_until_retirement(),
                    )
                });
                CalculationResult {
                    total_contributions: Some(self.total_contributions(plan, scenario)),
                    ..CalculationResult::from_yearly(yearly, salary)
                }
            }
            // Contributions, bridge and penalty stay absent for public plans
            PlanType::Cpp => flat_cpp(self.assumptions, scenario),
            // No detailed formula for unrecognised types
            PlanType::Other(_) => CalculationResult {
                total_contributions: Some(self.total_contributions(plan, scenario)),
                ..CalculationResult::from_yearly(0.0, salary)
            },
        };

        debug!(
            "Detailed estimate for plan {}: yearly {:.2}, bridge {:?}, penalty {:?}",
            plan.id, result.yearly_benefit, result.bridge_benefit, result.early_retirement_penalty
        );
        result
    }

    fn defined_benefit(&self, plan: &PensionPlan, scenario: &UserScenario) -> CalculationResult {
        let detailed = &self.assumptions.detailed;
        let salary = scenario.current_salary();
        let total_contributions = Some(self.total_contributions(plan, scenario));

        let Some(accrual) = plan.accrual_rate else {
            return CalculationResult {
                total_contributions,
                ..CalculationResult::from_yearly(0.0, salary)
            };
        };

        let mut yearly = salary * accrual * scenario.years_of_service() as f64;

        let bridge_benefit = (plan.bridge_benefit && scenario.retirement_age() < detailed.bridge_end_age)
            .then(|| yearly * detailed.bridge_benefit_rate);

        let early_retirement_penalty = match plan.early_retirement_age {
            Some(_) if scenario.retirement_age() < plan.retirement_age => {
                let early_years = plan.retirement_age - scenario.retirement_age();
                let penalty = yearly * (detailed.early_penalty_per_year * early_years as f64);
                yearly -= penalty;
                Some(penalty)
            }
            _ => None,
        };

        CalculationResult {
            total_contributions,
            bridge_benefit,
            early_retirement_penalty,
            ..CalculationResult::from_yearly(yearly, salary)
        }
    }

    /// Employee contributions over past and future service
    fn total_contributions(&self, plan: &PensionPlan, scenario: &UserScenario) -> f64 {
        let detailed = &self.assumptions.detailed;
        let rate = if plan.plan_type.is_defined_benefit() {
            detailed.db_contribution_rate
        } else {
            detailed.other_contribution_rate
        };
        let years = scenario.years_of_service() + scenario.years_until_retirement();
        scenario.current_salary() * rate * years as f64
    }
}

/// Detailed estimate with the 2024 reference assumptions
pub fn calculate_detailed_benefit(plan: &PensionPlan, scenario: &UserScenario) -> CalculationResult {
    DetailedBenefitCalculator::new(&Assumptions::default_2024()).calculate(plan, scenario)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn db_plan() -> PensionPlan {
        PensionPlan::new("omers", "OMERS", PlanType::DefinedBenefit, 65)
            .with_accrual_rate(0.02)
            .with_early_retirement_age(55)
            .with_bridge_benefit(true)
    }

    #[test]
    fn test_bridge_from_pre_penalty_then_penalty_applied() {
        let scenario = UserScenario::new(40, 60, 90_000.0, 15).unwrap();
        let result = calculate_detailed_benefit(&db_plan(), &scenario);

        let pre_penalty = 90_000.0 * 0.02 * 15.0;
        assert_relative_eq!(result.bridge_benefit.unwrap(), pre_penalty * 0.2);
        assert_relative_eq!(result.early_retirement_penalty.unwrap(), pre_penalty * 0.25);
        assert_relative_eq!(result.yearly_benefit, pre_penalty * 0.75);

        // Derived from the reduced value
        assert_relative_eq!(result.monthly_benefit, pre_penalty * 0.75 / 12.0);
        assert_relative_eq!(result.replacement_ratio, pre_penalty * 0.75 / 90_000.0 * 100.0);
    }

    #[test]
    fn test_total_contributions_db() {
        let scenario = UserScenario::new(40, 60, 90_000.0, 15).unwrap();
        let result = calculate_detailed_benefit(&db_plan(), &scenario);

        // 10% over 15 past + 20 future years
        assert_relative_eq!(result.total_contributions.unwrap(), 90_000.0 * 0.10 * 35.0);
    }

    #[test]
    fn test_no_bridge_or_penalty_at_normal_age() {
        let scenario = UserScenario::new(40, 65, 90_000.0, 15).unwrap();
        let result = calculate_detailed_benefit(&db_plan(), &scenario);

        assert!(result.bridge_benefit.is_none());
        assert!(result.early_retirement_penalty.is_none());
        assert_relative_eq!(result.yearly_benefit, 27_000.0);
    }

    #[test]
    fn test_penalty_requires_early_retirement_age() {
        let plan = PensionPlan::new("db", "No early age", PlanType::DefinedBenefit, 65)
            .with_accrual_rate(0.02)
            .with_bridge_benefit(true);
        let scenario = UserScenario::new(40, 60, 90_000.0, 15).unwrap();
        let result = calculate_detailed_benefit(&plan, &scenario);

        assert!(result.early_retirement_penalty.is_none());
        assert_relative_eq!(result.yearly_benefit, 27_000.0);
        assert_relative_eq!(result.bridge_benefit.unwrap(), 5_400.0);
    }

    #[test]
    fn test_bridge_requires_plan_flag() {
        let plan = db_plan().with_bridge_benefit(false);
        let scenario = UserScenario::new(40, 60, 90_000.0, 15).unwrap();
        let result = calculate_detailed_benefit(&plan, &scenario);

        assert!(result.bridge_benefit.is_none());
        assert!(result.early_retirement_penalty.is_some());
    }

    #[test]
    fn test_db_without_accrual() {
        let plan = PensionPlan::new("db", "DB", PlanType::DefinedBenefit, 65)
            .with_early_retirement_age(55)
            .with_bridge_benefit(true);
        let scenario = UserScenario::new(40, 60, 90_000.0, 15).unwrap();
        let result = calculate_detailed_benefit(&plan, &scenario);

        assert_eq!(result.yearly_benefit, 0.0);
        assert!(result.bridge_benefit.is_none());
        assert!(result.early_retirement_penalty.is_none());
        assert!(result.total_contributions.is_some());
    }

    #[test]
    fn test_defined_contribution_uses_detailed_return() {
        let plan = PensionPlan::new("dc", "DC", PlanType::DefinedContribution, 65).with_employer_match(0.05);
        let scenario = UserScenario::new(45, 65, 100_000.0, 5).unwrap();
        let result = calculate_detailed_benefit(&plan, &scenario);

        let expected = 10_000.0 * 1.06_f64.powi(20) * 0.04;
        assert_relative_eq!(result.yearly_benefit, expected, max_relative = 1e-12);
        assert_relative_eq!(result.total_contributions.unwrap(), 100_000.0 * 0.05 * 25.0);
        assert!(result.bridge_benefit.is_none());

        // Higher than the comparison estimate
        let simple = crate::benefits::calculate_benefit(&plan, &scenario);
        assert!(result.yearly_benefit > simple.yearly_benefit);
    }

    #[test]
    fn test_cpp_leaves_optional_fields_absent() {
        let plan = PensionPlan::new("cpp", "CPP", PlanType::Cpp, 65).with_early_retirement_age(60);
        let scenario = UserScenario::new(40, 60, 70_000.0, 10).unwrap();
        let result = calculate_detailed_benefit(&plan, &scenario);

        assert_relative_eq!(result.monthly_benefit, 914.599, max_relative = 1e-12);
        assert!(result.total_contributions.is_none());
        assert!(result.bridge_benefit.is_none());
        assert!(result.early_retirement_penalty.is_none());
    }

    #[test]
    fn test_unrecognised_type_has_no_detailed_benefit() {
        let plan = PensionPlan::new("x", "Hybrid", PlanType::Other("HYBRID".to_string()), 65);
        let scenario = UserScenario::new(50, 65, 60_000.0, 10).unwrap();
        let result = calculate_detailed_benefit(&plan, &scenario);

        assert_eq!(result.yearly_benefit, 0.0);
        assert_relative_eq!(result.total_contributions.unwrap(), 60_000.0 * 0.05 * 25.0);
    }

    #[test]
    fn test_largest_accepted_scenario_stays_finite() {
        use crate::scenario::MAX_YEARS;

        let plan = PensionPlan::new("db", "DB", PlanType::DefinedBenefit, 65).with_accrual_rate(0.02);
        let scenario = UserScenario::new(0, MAX_YEARS, 80_000.0, MAX_YEARS).unwrap();
        let result = calculate_detailed_benefit(&plan, &scenario);

        assert_relative_eq!(
            result.total_contributions.unwrap(),
            80_000.0 * 0.10 * 240.0,
            max_relative = 1e-12
        );
        assert!(result.yearly_benefit.is_finite());
    }
}
