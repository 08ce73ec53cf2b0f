//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions over `&mut World` (or `&World` for
//! read-only passes). They do not own state: entity state lives in
//! components, session state in the engine.

pub mod cleanup;
pub mod combat;
pub mod enemy_ai;
pub mod pickups;
pub mod player;
pub mod snapshot;
pub mod spawner;
pub mod telemetry;

/// Keeps characters this far inside the world bounds.
pub const BOUNDS_INSET: f32 = 0.5;
