//! Arena application layer.
//!
//! This crate runs the simulation on its own thread and exposes a small
//! control surface for the host: start/stop, commands, intents, and
//! snapshot polling.

pub mod control;
pub mod game_loop;
pub mod state;

pub use arena_core as core;
