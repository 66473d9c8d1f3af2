//! Run every plan in a catalog for one scenario
//!
//! Writes the simple/detailed comparison and the year-by-year projection to CSV

use anyhow::{Context, Result};
use clap::Parser;
use pension_estimator::{EstimateRunner, PlanCatalog, ProjectionConfig, UserScenario};
use rayon::prelude::*;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(name = "run_catalog", about = "Compare and project every plan in a catalog")]
struct CliArgs {
    #[arg(long, default_value_t = 35)]
    current_age: u32,
    #[arg(long, default_value_t = 65)]
    retirement_age: u32,
    #[arg(long, default_value_t = 85_000.0)]
    salary: f64,
    #[arg(long, default_value_t = 10)]
    years_of_service: u32,
    #[arg(long, default_value_t = 6.0, allow_negative_numbers = true)]
    annual_return: f64,
    #[arg(long, default_value_t = 2.0, allow_negative_numbers = true)]
    salary_growth: f64,
    /// Plan catalog CSV; defaults to the built-in Canadian plans
    #[arg(long = "plans", value_name = "csv")]
    plans_path: Option<PathBuf>,
    /// Directory holding assumptions.csv overrides
    #[arg(long = "assumptions", value_name = "dir")]
    assumptions_path: Option<PathBuf>,
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
}

/// One plan's simple and detailed estimates side by side
#[derive(Debug, Serialize)]
struct ComparisonRow<'a> {
    plan_id: &'a str,
    plan_name: &'a str,
    plan_type: &'a str,
    monthly_benefit: f64,
    yearly_benefit: f64,
    replacement_ratio: f64,
    detailed_yearly_benefit: f64,
    total_contributions: Option<f64>,
    bridge_benefit: Option<f64>,
    early_retirement_penalty: Option<f64>,
    adjustment_factor: Option<f64>,
}

#[derive(Debug, Serialize)]
struct ProjectionRow<'a> {
    age: u32,
    plan_id: &'a str,
    value: f64,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = CliArgs::parse();

    let start = Instant::now();
    let catalog = match &args.plans_path {
        Some(path) => PlanCatalog::from_csv_path(path)
            .with_context(|| format!("loading plans from {}", path.display()))?,
        None => PlanCatalog::canadian_defaults(),
    };
    let runner = match &args.assumptions_path {
        Some(path) => EstimateRunner::from_csv_path(path)?,
        None => EstimateRunner::new(),
    };
    println!("Loaded {} plans in {:?}", catalog.len(), start.elapsed());

    let scenario = UserScenario::new(args.current_age, args.retirement_age, args.salary, args.years_of_service)?;
    let config = ProjectionConfig::new(args.annual_return, args.salary_growth)?;
    let ids = catalog.ids();

    let calc_start = Instant::now();
    let simple = runner.compare(&catalog, &ids, &scenario);

    // Detailed estimates in parallel; ids come from the catalog so lookups succeed
    let detailed = ids
        .par_iter()
        .map(|id| runner.detailed(&catalog, id, &scenario).map(|r| (*id, r)))
        .collect::<Result<Vec<_>, _>>()?;

    let timeline = runner.project(&catalog, &ids, &scenario, config);
    println!("Calculations complete in {:?}", calc_start.elapsed());

    let comparison_path = args.output_dir.join("comparison_output.csv");
    let mut writer = csv::Writer::from_path(&comparison_path)
        .with_context(|| format!("creating {}", comparison_path.display()))?;
    for (id, detail) in &detailed {
        let (Some(plan), Some(result)) = (catalog.get(id), simple.get(*id)) else {
            continue;
        };
        writer.serialize(ComparisonRow {
            plan_id: &plan.id,
            plan_name: &plan.name,
            plan_type: plan.plan_type.as_str(),
            monthly_benefit: result.monthly_benefit,
            yearly_benefit: result.yearly_benefit,
            replacement_ratio: result.replacement_ratio,
            detailed_yearly_benefit: detail.yearly_benefit,
            total_contributions: detail.total_contributions,
            bridge_benefit: detail.bridge_benefit,
            early_retirement_penalty: detail.early_retirement_penalty,
            adjustment_factor: result.adjustment_factor,
        })?;
    }
    writer.flush()?;
    println!("Comparison written to: {}", comparison_path.display());

    let projection_path = args.output_dir.join("projection_output.csv");
    let mut writer = csv::Writer::from_path(&projection_path)
        .with_context(|| format!("creating {}", projection_path.display()))?;
    for point in &timeline.points {
        for (plan_id, value) in &point.values {
            writer.serialize(ProjectionRow {
                age: point.age,
                plan_id,
                value: *value,
            })?;
        }
    }
    writer.flush()?;
    println!("Projection written to: {} ({} ages)", projection_path.display(), timeline.len());

    println!("\nAt retirement (age {}):", scenario.retirement_age());
    for plan in catalog.iter() {
        if let Some(value) = timeline.final_value(&plan.id) {
            println!("  {:<45} {:>14.0}", plan.name, value);
        }
    }

    Ok(())
}
