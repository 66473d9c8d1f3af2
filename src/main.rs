//! Pension Estimator CLI
//!
//! Command-line interface for comparing plans, detailed estimates,
//! projections and the earnings-history CPP model

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use pension_estimator::{
    CalculationResult, EstimateRunner, PlanCatalog, ProjectionConfig, UserScenario,
    cpp::CppRequest,
    runner::labelled_rows,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "pension_estimator",
    about = "Estimate retirement benefits across Canadian pension plans",
    version
)]
struct Cli {
    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    json: bool,
    /// Plan catalog CSV; defaults to the built-in Canadian plans
    #[arg(long = "plans", value_name = "csv", global = true)]
    plans_path: Option<PathBuf>,
    /// Directory holding assumptions.csv overrides
    #[arg(long = "assumptions", value_name = "dir", global = true)]
    assumptions_path: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct ScenarioArgs {
    #[arg(long)]
    current_age: u32,
    #[arg(long)]
    retirement_age: u32,
    #[arg(long)]
    salary: f64,
    #[arg(long, default_value_t = 0)]
    years_of_service: u32,
}

impl ScenarioArgs {
    fn scenario(&self) -> Result<UserScenario> {
        UserScenario::new(self.current_age, self.retirement_age, self.salary, self.years_of_service)
            .context("invalid scenario")
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the plans in the catalog
    Plans,
    /// Simple estimate for several plans side by side
    Compare {
        #[command(flatten)]
        scenario: ScenarioArgs,
        /// Plan ids, comma separated; all plans when omitted
        #[arg(long = "plan", value_delimiter = ',')]
        plan_ids: Vec<String>,
    },
    /// Detailed estimate for one plan
    Detailed {
        #[command(flatten)]
        scenario: ScenarioArgs,
        #[arg(long = "plan")]
        plan_id: String,
    },
    /// Year-by-year accumulated value up to retirement
    Project {
        #[command(flatten)]
        scenario: ScenarioArgs,
        #[arg(long = "plan", value_delimiter = ',')]
        plan_ids: Vec<String>,
        /// Annual return, percent
        #[arg(long, default_value_t = 6.0, allow_negative_numbers = true)]
        annual_return: f64,
        /// Salary growth, percent
        #[arg(long, default_value_t = 2.0, allow_negative_numbers = true)]
        salary_growth: f64,
    },
    /// CPP pension from an earnings history
    Cpp {
        #[arg(long)]
        birth_date: NaiveDate,
        #[arg(long)]
        start_date: NaiveDate,
        #[arg(long)]
        retirement_date: NaiveDate,
        /// Yearly earnings, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        earnings: Vec<f64>,
        /// Earnings ceiling override
        #[arg(long)]
        ympe: Option<f64>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let catalog = match &cli.plans_path {
        Some(path) => PlanCatalog::from_csv_path(path)
            .with_context(|| format!("loading plans from {}", path.display()))?,
        None => PlanCatalog::canadian_defaults(),
    };
    let runner = match &cli.assumptions_path {
        Some(path) => EstimateRunner::from_csv_path(path)
            .with_context(|| format!("loading assumptions from {}", path.display()))?,
        None => EstimateRunner::new(),
    };

    match &cli.command {
        Command::Plans => {
            if cli.json {
                let plans: Vec<_> = catalog.iter().collect();
                return print_json(&plans);
            }
            println!("{:<10} {:<45} {:<22} {:>8} {:>6}", "Id", "Name", "Type", "Accrual", "Ret");
            println!("{}", "-".repeat(95));
            for plan in catalog.iter() {
                let accrual = plan.accrual_rate.map(|a| format!("{:.2}%", a * 100.0)).unwrap_or_default();
                println!(
                    "{:<10} {:<45} {:<22} {:>8} {:>6}",
                    plan.id, plan.name, plan.plan_type, accrual, plan.retirement_age
                );
            }
        }
        Command::Compare { scenario, plan_ids } => {
            let scenario = scenario.scenario()?;
            let ids = selected_ids(&catalog, plan_ids);
            let results = runner.compare(&catalog, &ids, &scenario);
            if cli.json {
                return print_json(&results);
            }
            print_comparison(&catalog, &results);
        }
        Command::Detailed { scenario, plan_id } => {
            let scenario = scenario.scenario()?;
            let result = runner.detailed(&catalog, plan_id, &scenario)?;
            if cli.json {
                return print_json(&result);
            }
            print_detailed(plan_id, &result);
        }
        Command::Project { scenario, plan_ids, annual_return, salary_growth } => {
            let scenario = scenario.scenario()?;
            let config = ProjectionConfig::new(*annual_return, *salary_growth)?;
            let ids = selected_ids(&catalog, plan_ids);
            let timeline = runner.project(&catalog, &ids, &scenario, config);
            if cli.json {
                return print_json(&timeline.points);
            }
            for (age, values) in labelled_rows(&timeline, &catalog) {
                let cells: Vec<String> = values.iter().map(|(name, v)| format!("{}={:.0}", name, v)).collect();
                println!("{:>3}  {}", age, cells.join("  "));
            }
        }
        Command::Cpp { birth_date, start_date, retirement_date, earnings, ympe } => {
            let request = CppRequest {
                birth_date: *birth_date,
                start_contributing_date: *start_date,
                retirement_date: *retirement_date,
                yearly_earnings: earnings.clone(),
                average_industrial_wage: *ympe,
            };
            let result = runner.cpp(&request)?;
            if cli.json {
                return print_json(&result);
            }
            println!("CPP Retirement Pension");
            println!("  Contributory years: {}", result.contribution_years);
            println!("  Dropout years:      {}", result.dropout_years);
            println!("  Average earnings:   ${:.2}", result.average_earnings);
            println!("  Adjustment factor:  {:.3}", result.adjustment_factor);
            println!("  Monthly benefit:    ${:.2}", result.monthly_benefit);
            println!("  Yearly benefit:     ${:.2}", result.yearly_benefit);
        }
    }

    Ok(())
}

fn selected_ids(catalog: &PlanCatalog, requested: &[String]) -> Vec<String> {
    if requested.is_empty() {
        catalog.ids().into_iter().map(String::from).collect()
    } else {
        requested.to_vec()
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_comparison(catalog: &PlanCatalog, results: &BTreeMap<String, CalculationResult>) {
    println!("{:<45} {:>12} {:>12} {:>8}", "Plan", "Monthly", "Yearly", "Repl %");
    println!("{}", "-".repeat(80));
    for plan in catalog.iter() {
        if let Some(result) = results.get(&plan.id) {
            println!(
                "{:<45} {:>12.2} {:>12.2} {:>8.1}",
                plan.name, result.monthly_benefit, result.yearly_benefit, result.replacement_ratio
            );
        }
    }
}

fn print_detailed(plan_id: &str, result: &CalculationResult) {
    println!("Detailed estimate: {}", plan_id);
    println!("  Monthly benefit:   ${:.2}", result.monthly_benefit);
    println!("  Yearly benefit:    ${:.2}", result.yearly_benefit);
    println!("  Replacement ratio: {:.1}%", result.replacement_ratio);
    if let Some(total) = result.total_contributions {
        println!("  Total contributions: ${:.2}", total);
    }
    if let Some(bridge) = result.bridge_benefit {
        println!("  Bridge benefit:    ${:.2}/yr", bridge);
    }
    if let Some(penalty) = result.early_retirement_penalty {
        println!("  Early penalty:     ${:.2}/yr", penalty);
    }
    if let Some(factor) = result.adjustment_factor {
        println!("  CPP adjustment:    {:.3}", factor);
    }
}
