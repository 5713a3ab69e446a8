//! Per-object-kind GPU pipelines.

mod common;

pub mod nebula;
pub mod points;

pub use nebula::NebulaRenderer;
pub use points::PointsRenderer;
