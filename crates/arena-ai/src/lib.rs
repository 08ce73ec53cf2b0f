//! Enemy AI for the arena simulation.
//!
//! Implements the per-enemy behavior state machine, role profiles,
//! obstacle-aware steering, and aim noise.

pub mod aim;
pub mod fsm;
pub mod profiles;
pub mod steering;

pub use arena_core as core;
