//! Simulation engine for the arena.
//!
//! Owns the hecs ECS world, runs the phase machine and systems once per
//! tick, and produces GameStateSnapshots for the presentation layer.

pub mod arena_gen;
pub mod engine;
pub mod phase;
pub mod session;
pub mod systems;
pub mod world_setup;

pub use arena_core as core;
pub use arena_gen::{ArenaProvider, ProceduralArenaProvider, StaticArenaProvider};
pub use engine::{SimConfig, SimulationEngine};

#[cfg(test)]
mod tests;
