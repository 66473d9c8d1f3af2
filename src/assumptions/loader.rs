//! CSV-based assumption overrides
//!
//! Reads `assumptions.csv` (columns `key,value`) from an assumptions
//! directory. Keys are dotted paths such as
//! `defined_contribution.detailed_assumed_return`.

use crate::error::LoadError;
use std::fs::File;
use std::path::Path;

/// Default path to assumptions directory
pub const DEFAULT_ASSUMPTIONS_PATH: &str = "data/assumptions";

/// File name of the override table inside the assumptions directory
pub const OVERRIDES_FILE: &str = "assumptions.csv";

/// Load override pairs from `path/assumptions.csv`
pub fn load_overrides(path: &Path) -> Result<Vec<(String, String)>, LoadError> {
    let file = File::open(path.join(OVERRIDES_FILE))?;
    load_overrides_from_reader(file)
}

/// Load override pairs from any reader
pub fn load_overrides_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<(String, String)>, LoadError> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut overrides = Vec::new();

    for result in reader.records() {
        let record = result?;
        let key = record.get(0).unwrap_or_default().trim();
        let value = record.get(1).unwrap_or_default().trim();
        if key.is_empty() {
            continue;
        }
        overrides.push((key.to_string(), value.to_string()));
    }

    Ok(overrides)
}

pub(crate) fn parse_f64(key: &str, value: &str) -> Result<f64, LoadError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| invalid(key, value))
}

pub(crate) fn parse_u32(key: &str, value: &str) -> Result<u32, LoadError> {
    value.parse::<u32>().map_err(|_| invalid(key, value))
}

fn invalid(key: &str, value: &str) -> LoadError {
    LoadError::InvalidAssumptionValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}
