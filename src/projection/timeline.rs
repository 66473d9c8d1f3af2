//! Projection output structures

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Accumulated value of each plan at one simulated age
///
/// Values are keyed by plan id, rounded to whole currency units. Display
/// names are resolved by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineDataPoint {
    pub age: u32,
    pub values: BTreeMap<String, f64>,
}

impl TimelineDataPoint {
    /// Empty point for one age
    pub fn new(age: u32) -> Self {
        Self {
            age,
            values: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, plan_id: &str, value: f64) {
        self.values.insert(plan_id.to_string(), value);
    }

    /// Value for a plan, if it was part of the projection
    pub fn value(&self, plan_id: &str) -> Option<f64> {
        self.values.get(plan_id).copied()
    }
}

/// Complete projection for a set of plans, ascending by age
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Timeline {
    pub points: Vec<TimelineDataPoint>,
}

impl Timeline {
    pub fn new(points: Vec<TimelineDataPoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Series of (age, value) for one plan
    pub fn series(&self, plan_id: &str) -> Vec<(u32, f64)> {
        self.points
            .iter()
            .filter_map(|p| p.value(plan_id).map(|v| (p.age, v)))
            .collect()
    }

    /// Value at the last projected age (retirement)
    pub fn final_value(&self, plan_id: &str) -> Option<f64> {
        self.points.last().and_then(|p| p.value(plan_id))
    }

    /// Ids of all plans present in the projection
    pub fn plan_ids(&self) -> Vec<&str> {
        self.points
            .first()
            .map(|p| p.values.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}
