//! Pension plan data structures and catalog loading

mod data;
mod catalog;
pub mod loader;

pub use data::{PensionPlan, PlanType};
pub use catalog::PlanCatalog;
pub use loader::{load_plans, load_plans_from_reader};
