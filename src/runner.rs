//! Estimate runner for plan comparisons and projections
//!
//! Pre-loads assumptions once, then answers compare / detailed / project /
//! CPP requests against a plan catalog without re-reading CSV files.

use crate::assumptions::Assumptions;
use crate::benefits::{BenefitCalculator, CalculationResult, DetailedBenefitCalculator};
use crate::cpp::{CppBenefitResult, CppCalculator, CppRequest};
use crate::error::{CppError, EstimateError, LoadError};
use crate::plan::PlanCatalog;
use crate::projection::{ProjectionConfig, ProjectionEngine, Timeline};
use crate::scenario::UserScenario;
use log::{debug, warn};
use rayon::prelude::*;
use std::collections::BTreeMap;

/// Pre-loaded runner for benefit estimates
///
/// # Example
/// ```ignore
/// let runner = EstimateRunner::from_csv_path(Path::new("data/assumptions"))?;
/// let catalog = PlanCatalog::canadian_defaults();
/// let scenario = UserScenario::new(35, 65, 85_000.0, 10)?;
///
/// let results = runner.compare(&catalog, &["otpp", "cpp"], &scenario);
/// ```
#[derive(Debug, Clone)]
pub struct EstimateRunner {
    assumptions: Assumptions,
}

impl EstimateRunner {
    /// Create runner with the 2024 reference assumptions
    pub fn new() -> Self {
        Self {
            assumptions: Assumptions::default_2024(),
        }
    }

    /// Create runner by loading assumption overrides from a directory
    pub fn from_csv_path(path: &std::path::Path) -> Result<Self, LoadError> {
        Ok(Self {
            assumptions: Assumptions::from_csv_path(path)?,
        })
    }

    /// Create runner with pre-built assumptions
    pub fn with_assumptions(assumptions: Assumptions) -> Self {
        Self { assumptions }
    }

    /// Simple estimate for each requested plan, keyed by plan id
    ///
    /// Unknown ids are skipped. Plans are evaluated in parallel.
    pub fn compare<S: AsRef<str>>(
        &self,
        catalog: &PlanCatalog,
        plan_ids: &[S],
        scenario: &UserScenario,
    ) -> BTreeMap<String, CalculationResult> {
        let plans = catalog.find_many(plan_ids);
        let calculator = BenefitCalculator::new(&self.assumptions);

        let results: BTreeMap<String, CalculationResult> = plans
            .par_iter()
            .map(|plan| (plan.id.clone(), calculator.calculate(plan, scenario)))
            .collect();

        debug!("Compared {} of {} requested plans", results.len(), plan_ids.len());
        results
    }

    /// Detailed estimate for a single plan
    pub fn detailed(
        &self,
        catalog: &PlanCatalog,
        plan_id: &str,
        scenario: &UserScenario,
    ) -> Result<CalculationResult, EstimateError> {
        let plan = catalog.get(plan_id).ok_or_else(|| {
            warn!("Detailed estimate requested for unknown plan {}", plan_id);
            EstimateError::PlanNotFound(plan_id.to_string())
        })?;
        Ok(DetailedBenefitCalculator::new(&self.assumptions).calculate(plan, scenario))
    }

    /// Year-by-year projection for the requested plans
    pub fn project<S: AsRef<str>>(
        &self,
        catalog: &PlanCatalog,
        plan_ids: &[S],
        scenario: &UserScenario,
        config: ProjectionConfig,
    ) -> Timeline {
        let plans = catalog.find_many(plan_ids);
        let engine = ProjectionEngine::new(self.assumptions.clone(), config);
        Timeline::new(engine.project(&plans, scenario))
    }

    /// Earnings-history CPP estimate using the loaded CPP parameters
    pub fn cpp(&self, request: &CppRequest) -> Result<CppBenefitResult, CppError> {
        CppCalculator::new(self.assumptions.cpp.clone()).calculate(request)
    }

    /// Get reference to the loaded assumptions
    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    /// Get mutable reference to the assumptions for customization
    pub fn assumptions_mut(&mut self) -> &mut Assumptions {
        &mut self.assumptions
    }
}

impl Default for EstimateRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// Timeline rows with plan ids resolved to display names
///
/// Ids missing from the catalog keep the id as their label.
pub fn labelled_rows<'a>(timeline: &'a Timeline, catalog: &'a PlanCatalog) -> Vec<(u32, Vec<(&'a str, f64)>)> {
    timeline
        .points
        .iter()
        .map(|point| {
            let values = point
                .values
                .iter()
                .map(|(id, value)| {
                    let label = catalog.get(id).map(|p| p.name.as_str()).unwrap_or(id.as_str());
                    (label, *value)
                })
                .collect();
            (point.age, values)
        })
        .collect()
}
