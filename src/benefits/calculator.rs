//! Single-point benefit estimate used for side-by-side plan comparison

use crate::assumptions::Assumptions;
use crate::plan::{PensionPlan, PlanType};
use crate::scenario::UserScenario;
use super::result::CalculationResult;
use log::debug;

/// Comparison benefit calculator
///
/// Uses the simple DC return assumption and the flat CPP model. No service
/// cap is applied to DB service here.
pub struct BenefitCalculator<'a> {
    assumptions: &'a Assumptions,
}

impl<'a> BenefitCalculator<'a> {
    /// Create a new benefit calculator
    pub fn new(assumptions: &'a Assumptions) -> Self {
        Self { assumptions }
    }

    /// Estimate the benefit of one plan for one scenario
    pub fn calculate(&self, plan: &PensionPlan, scenario: &UserScenario) -> CalculationResult {
        let salary = scenario.current_salary();

        let result = match &plan.plan_type {
            PlanType::DefinedBenefit => {
                let yearly = plan
                    .accrual_rate
                    .map_or(0.0, |accrual| salary * accrual * scenario.years_of_service() as f64);
                CalculationResult::from_yearly(yearly, salary)
            }
            PlanType::DefinedContribution => {
                let dc = &self.assumptions.defined_contribution;
                let yearly = plan.employer_match.map_or(0.0, |employer_match| {
                    dc.yearly_drawdown(
                        dc.annual_contribution(salary, employer_match),
                        dc.simple_assumed_return,
                        scenario.years_until_retirement(),
                    )
                });
                CalculationResult::from_yearly(yearly, salary)
            }
            PlanType::Cpp => flat_cpp(self.assumptions, scenario),
            PlanType::Other(_) => {
                let accrual = self.assumptions.defined_benefit.fallback_accrual_rate;
                let yearly = salary * accrual * scenario.years_of_service() as f64;
                CalculationResult::from_yearly(yearly, salary)
            }
        };

        debug!(
            "Plan {} ({}): yearly benefit {:.2}, replacement {:.2}%",
            plan.id, plan.plan_type, result.yearly_benefit, result.replacement_ratio
        );
        result
    }
}

/// Flat CPP estimate keyed on the scenario's retirement age
pub(crate) fn flat_cpp(assumptions: &Assumptions, scenario: &UserScenario) -> CalculationResult {
    let cpp = &assumptions.cpp_flat;
    let factor = cpp.adjustment_factor(scenario.retirement_age());
    let yearly = cpp.max_monthly_benefit * factor * 12.0;

    CalculationResult {
        adjustment_factor: Some(factor),
        ..CalculationResult::from_yearly(yearly, scenario.current_salary())
    }
}

/// Estimate with the 2024 reference assumptions
pub fn calculate_benefit(plan: &PensionPlan, scenario: &UserScenario) -> CalculationResult {
    BenefitCalculator::new(&Assumptions::default_2024()).calculate(plan, scenario)
}
