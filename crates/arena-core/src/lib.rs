//! Core types and definitions for the arena simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, events, state snapshots, arena metadata,
//! configuration, errors, and constants. It has no runtime dependencies
//! beyond serialization and math.

pub mod arena;
pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;
pub mod weapons;

pub use glam::Vec3;

#[cfg(test)]
mod tests;
