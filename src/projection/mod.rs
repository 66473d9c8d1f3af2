//! Projection engine for year-by-year accumulated plan values

mod engine;
mod timeline;

pub use engine::{ProjectionEngine, ProjectionConfig, calculate_projections};
pub use timeline::{Timeline, TimelineDataPoint};
