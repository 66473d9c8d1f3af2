//! Calculation assumptions: reference constants, assumed returns and
//! CPP parameters, versioned as one structure

mod plan_rates;
mod cpp;
pub mod loader;

pub use plan_rates::{
    DefinedBenefitAssumptions, DefinedContributionAssumptions, DetailedAssumptions,
    FlatCppAssumptions,
};
pub use cpp::CppAssumptions;

use crate::error::LoadError;
use loader::{parse_f64, parse_u32};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Container for all calculation assumptions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assumptions {
    /// Reference year of the parameter set
    pub version: String,
    pub cpp_flat: FlatCppAssumptions,
    pub defined_benefit: DefinedBenefitAssumptions,
    pub defined_contribution: DefinedContributionAssumptions,
    pub detailed: DetailedAssumptions,
    pub cpp: CppAssumptions,
}

impl Assumptions {
    /// 2024 reference values
    pub fn default_2024() -> Self {
        Self {
            version: "2024".to_string(),
            cpp_flat: FlatCppAssumptions::default(),
            defined_benefit: DefinedBenefitAssumptions::default(),
            defined_contribution: DefinedContributionAssumptions::default(),
            detailed: DetailedAssumptions::default(),
            cpp: CppAssumptions::default(),
        }
    }

    /// Load overrides from the default location (data/assumptions/)
    pub fn from_csv() -> Result<Self, LoadError> {
        Self::from_csv_path(Path::new(loader::DEFAULT_ASSUMPTIONS_PATH))
    }

    /// 2024 defaults with overrides from `path/assumptions.csv` applied
    pub fn from_csv_path(path: &Path) -> Result<Self, LoadError> {
        let overrides = loader::load_overrides(path)?;
        let mut assumptions = Self::default_2024();
        for (key, value) in &overrides {
            assumptions.set(key, value)?;
        }
        info!(
            "Loaded {} assumption overrides from {} (version {})",
            overrides.len(),
            path.display(),
            assumptions.version
        );
        Ok(assumptions)
    }

    /// Override a single assumption by dotted key
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), LoadError> {
        debug!("Assumption override {} = {}", key, value);
        match key {
            "version" => self.version = value.to_string(),

            "cpp_flat.max_monthly_benefit" => self.cpp_flat.max_monthly_benefit = parse_f64(key, value)?,
            "cpp_flat.normal_retirement_age" => self.cpp_flat.normal_retirement_age = parse_u32(key, value)?,
            "cpp_flat.early_factor" => self.cpp_flat.early_factor = parse_f64(key, value)?,

            "defined_benefit.fallback_accrual_rate" => {
                self.defined_benefit.fallback_accrual_rate = parse_f64(key, value)?
            }
            "defined_benefit.projection_service_cap_years" => {
                self.defined_benefit.projection_service_cap_years = parse_u32(key, value)?
            }

            "defined_contribution.simple_assumed_return" => {
                self.defined_contribution.simple_assumed_return = parse_f64(key, value)?
            }
            "defined_contribution.detailed_assumed_return" => {
                self.defined_contribution.detailed_assumed_return = parse_f64(key, value)?
            }
            "defined_contribution.withdrawal_rate" => {
                self.defined_contribution.withdrawal_rate = parse_f64(key, value)?
            }
            "defined_contribution.employee_match_multiplier" => {
                self.defined_contribution.employee_match_multiplier = parse_f64(key, value)?
            }

            "detailed.db_contribution_rate" => self.detailed.db_contribution_rate = parse_f64(key, value)?,
            "detailed.other_contribution_rate" => self.detailed.other_contribution_rate = parse_f64(key, value)?,
            "detailed.bridge_benefit_rate" => self.detailed.bridge_benefit_rate = parse_f64(key, value)?,
            "detailed.bridge_end_age" => self.detailed.bridge_end_age = parse_u32(key, value)?,
            "detailed.early_penalty_per_year" => self.detailed.early_penalty_per_year = parse_f64(key, value)?,

            "cpp.max_contributory_years" => self.cpp.max_contributory_years = parse_u32(key, value)?,
            "cpp.dropout_fraction" => self.cpp.dropout_fraction = parse_f64(key, value)?,
            "cpp.replacement_rate" => self.cpp.replacement_rate = parse_f64(key, value)?,
            "cpp.ympe" => self.cpp.ympe = parse_f64(key, value)?,
            "cpp.normal_retirement_age" => self.cpp.normal_retirement_age = parse_u32(key, value)?,
            "cpp.early_reduction_per_month" => self.cpp.early_reduction_per_month = parse_f64(key, value)?,
            "cpp.late_increase_per_month" => self.cpp.late_increase_per_month = parse_f64(key, value)?,

            other => return Err(LoadError::UnknownAssumption(other.to_string())),
        }
        Ok(())
    }
}

impl Default for Assumptions {
    fn default() -> Self {
        Self::default_2024()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_2024_values() {
        let a = Assumptions::default_2024();
        assert_eq!(a.version, "2024");
        assert_eq!(a.cpp_flat.max_monthly_benefit, 1306.57);
        assert_eq!(a.defined_contribution.simple_assumed_return, 0.05);
        assert_eq!(a.defined_contribution.detailed_assumed_return, 0.06);
        assert_eq!(a.defined_benefit.projection_service_cap_years, 35);
        assert_eq!(a.cpp.ympe, 68_500.0);
    }

    #[test]
    fn test_set_overrides() {
        let mut a = Assumptions::default_2024();
        a.set("version", "2025").unwrap();
        a.set("cpp_flat.max_monthly_benefit", "1364.60").unwrap();
        a.set("defined_benefit.projection_service_cap_years", "40").unwrap();

        assert_eq!(a.version, "2025");
        assert_eq!(a.cpp_flat.max_monthly_benefit, 1364.60);
        assert_eq!(a.defined_benefit.projection_service_cap_years, 40);
        // Untouched values keep their defaults
        assert_eq!(a.defined_contribution.detailed_assumed_return, 0.06);
    }

    #[test]
    fn test_set_rejects_unknown_and_invalid() {
        let mut a = Assumptions::default_2024();
        assert!(matches!(
            a.set("cpp.max_monthly", "1"),
            Err(LoadError::UnknownAssumption(_))
        ));
        assert!(matches!(
            a.set("cpp.ympe", "lots"),
            Err(LoadError::InvalidAssumptionValue { .. })
        ));
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let err = Assumptions::from_csv_path(Path::new("/nonexistent/assumptions")).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }

    #[test]
    fn test_bundled_overrides_restate_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(loader::DEFAULT_ASSUMPTIONS_PATH);
        let loaded = Assumptions::from_csv_path(&path).unwrap();
        assert_eq!(loaded, Assumptions::default_2024());
    }
}
