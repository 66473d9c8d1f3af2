//! Read-only plan catalog keyed by plan id

use super::loader::{load_plans, load_plans_from_reader};
use super::{PensionPlan, PlanType};
use crate::error::LoadError;
use log::{info, warn};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Plans available for estimation, in catalog order
#[derive(Debug, Clone, Default)]
pub struct PlanCatalog {
    plans: Vec<PensionPlan>,
    index: HashMap<String, usize>,
}

impl PlanCatalog {
    /// Build a catalog, rejecting duplicate ids
    pub fn new(plans: Vec<PensionPlan>) -> Result<Self, LoadError> {
        let mut index = HashMap::with_capacity(plans.len());
        for (i, plan) in plans.iter().enumerate() {
            if index.insert(plan.id.clone(), i).is_some() {
                return Err(LoadError::DuplicatePlanId(plan.id.clone()));
            }
        }
        Ok(Self { plans, index })
    }

    /// Load a catalog from a CSV file
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let catalog = Self::new(load_plans(path)?)?;
        info!("Loaded {} plans from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Load a catalog from any CSV reader
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self, LoadError> {
        Self::new(load_plans_from_reader(reader)?)
    }

    /// Look up a single plan
    pub fn get(&self, id: &str) -> Option<&PensionPlan> {
        self.index.get(id).map(|&i| &self.plans[i])
    }

    /// Resolve a list of ids, best effort
    ///
    /// Unknown ids are skipped (with a warning) and repeated ids are returned
    /// once. Found plans keep the order in which they were requested.
    pub fn find_many<S: AsRef<str>>(&self, ids: &[S]) -> Vec<&PensionPlan> {
        let mut seen = HashSet::new();
        let mut found = Vec::with_capacity(ids.len());

        for id in ids {
            let id = id.as_ref();
            if !seen.insert(id) {
                continue;
            }
            match self.get(id) {
                Some(plan) => found.push(plan),
                None => warn!("Plan id {} not found in catalog, skipping", id),
            }
        }

        found
    }

    pub fn iter(&self) -> impl Iterator<Item = &PensionPlan> {
        self.plans.iter()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.plans.iter().map(|p| p.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    /// Major Canadian pension plans with 2024 reference parameters
    pub fn canadian_defaults() -> Self {
        let db = |id: &str, name: &str, description: &str, accrual: f64, normal: u32, early: u32| {
            PensionPlan::new(id, name, PlanType::DefinedBenefit, normal)
                .with_description(description)
                .with_accrual_rate(accrual)
                .with_early_retirement_age(early)
                .with_bridge_benefit(true)
                .with_cpp_integration(true)
                .with_vesting_period(2)
        };
        let public = |id: &str, name: &str, description: &str| {
            PensionPlan::new(id, name, PlanType::Cpp, 65)
                .with_description(description)
                .with_early_retirement_age(60)
        };

        let plans = vec![
            public(
                "cpp",
                "Canada Pension Plan (CPP)",
                "The federal pension program covering all workers in Canada except Quebec",
            ),
            db(
                "otpp",
                "Ontario Teachers' Pension Plan",
                "One of Canada's largest pension plans, serving Ontario's teachers",
                0.02, 65, 55,
            ),
            db(
                "hoopp",
                "Healthcare of Ontario Pension Plan (HOOPP)",
                "Serving healthcare workers in Ontario",
                0.0175, 65, 55,
            ),
            db(
                "omers",
                "Ontario Municipal Employees Retirement System (OMERS)",
                "Serving municipal employees in Ontario",
                0.02, 65, 55,
            ),
            db(
                "pspp",
                "Public Service Pension Plan (PSPP)",
                "Serving federal public service employees",
                0.02, 65, 55,
            ),
            db(
                "bc-mpp",
                "BC Municipal Pension Plan",
                "Serving municipal employees in British Columbia",
                0.02, 65, 55,
            ),
            public(
                "qpp",
                "Quebec Pension Plan (QPP)",
                "The provincial pension program for workers in Quebec",
            ),
            db(
                "atrf",
                "Alberta Teachers' Retirement Fund",
                "Serving teachers in Alberta",
                0.02, 65, 55,
            ),
            db(
                "optrust",
                "OPSEU Pension Trust (OPTrust)",
                "Serving Ontario public service employees and OPSEU members",
                0.02, 65, 55,
            ),
            db(
                "hepp-mb",
                "Healthcare Employees' Pension Plan - Manitoba",
                "Serving healthcare workers in Manitoba",
                0.02, 65, 55,
            ),
            db(
                "nshepp",
                "Nova Scotia Health Employees' Pension Plan",
                "Serving healthcare workers in Nova Scotia",
                0.02, 65, 55,
            ),
            db(
                "cfpp",
                "Canadian Forces Pension Plan",
                "Serving members of the Canadian Armed Forces",
                0.02, 60, 50,
            ),
            db(
                "rcmp-pp",
                "Royal Canadian Mounted Police Pension Plan",
                "Serving members of the RCMP",
                0.02, 60, 50,
            ),
        ];

        let index = plans
            .iter()
            .enumerate()
            .map(|(i, plan)| (plan.id.clone(), i))
            .collect();
        Self { plans, index }
    }
}
