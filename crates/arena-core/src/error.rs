//! Error types for configuration, arena metadata and loadout operations.
//!
//! None of these are fatal to the tick loop: the engine turns weapon errors
//! into notice events and logs metadata problems.

use crate::enums::WeaponKind;

/// Failure loading or validating a `SimConfig`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Rejected weapon operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WeaponError {
    #[error("unknown weapon `{0}`")]
    Unknown(String),

    #[error("{0} is locked")]
    Locked(WeaponKind),
}

/// Failure loading or validating arena metadata.
#[derive(Debug, thiserror::Error)]
pub enum ArenaError {
    #[error("failed to parse arena: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("arena has no enemy spawn nodes")]
    NoSpawnNodes,

    #[error("patrol route {0} has no waypoints")]
    EmptyPatrolRoute(usize),

    #[error("gate obstacle {0} does not exist")]
    MissingGate(u32),

    #[error("player spawn lies outside world bounds")]
    SpawnOutOfBounds,
}
