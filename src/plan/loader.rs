//! Load pension plans from a catalog CSV

use super::{PensionPlan, PlanType};
use crate::error::LoadError;
use csv::Reader;
use std::path::Path;

/// Raw CSV row matching the plan catalog columns
///
/// Empty cells map to absent optional values.
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    id: String,
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(rename = "type")]
    plan_type: String,
    accrual_rate: Option<f64>,
    employer_match: Option<f64>,
    retirement_age: u32,
    early_retirement_age: Option<u32>,
    bridge_benefit: Option<bool>,
    cpp_integration: Option<bool>,
    vesting_period_years: Option<u32>,
}

impl CsvRow {
    fn into_plan(self) -> PensionPlan {
        PensionPlan {
            id: self.id,
            name: self.name,
            description: self.description.unwrap_or_default(),
            plan_type: PlanType::from(self.plan_type),
            accrual_rate: self.accrual_rate,
            employer_match: self.employer_match,
            retirement_age: self.retirement_age,
            early_retirement_age: self.early_retirement_age,
            bridge_benefit: self.bridge_benefit.unwrap_or(false),
            cpp_integration: self.cpp_integration.unwrap_or(false),
            vesting_period_years: self.vesting_period_years,
        }
    }
}

/// Load all plans from a CSV file
pub fn load_plans<P: AsRef<Path>>(path: P) -> Result<Vec<PensionPlan>, LoadError> {
    let reader = Reader::from_path(path)?;
    read_plans(reader)
}

/// Load plans from any reader (e.g., string buffer, request body)
pub fn load_plans_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<PensionPlan>, LoadError> {
    read_plans(Reader::from_reader(reader))
}

fn read_plans<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<PensionPlan>, LoadError> {
    let mut plans = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        plans.push(row.into_plan());
    }

    Ok(plans)
}
