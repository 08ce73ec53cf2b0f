//! Spatial queries for the arena simulation.
//!
//! Ray casting against static obstacles, line-of-sight checks,
//! and clearance probing for steering.

pub use arena_core as core;

pub mod los;
pub mod query;
pub mod ray;

// Re-export key types for convenience.
pub use los::has_line_of_sight;
pub use query::{probe_clearance, SolidObstacles, SpatialQuery};
pub use ray::RayHit;
