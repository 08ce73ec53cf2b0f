//! Role-specific behavioral profiles.
//!
//! Consolidates per-role parameters for the enemy FSM.

use arena_core::enums::{AiState, EnemyRole};

/// Behavioral profile for an enemy role.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoleProfile {
    /// State a freshly spawned enemy starts in.
    pub initial_state: AiState,
    /// Whether the role walks patrol routes and falls back to them after
    /// losing the player. Non-patrolling roles are forced into CHASE.
    pub patrols: bool,
}

/// Get the behavioral profile for a given role.
pub fn role_profile(role: EnemyRole) -> RoleProfile {
    match role {
        EnemyRole::Pursuer => RoleProfile {
            initial_state: AiState::Chase,
            patrols: false,
        },
        EnemyRole::ZoneGuard => RoleProfile {
            initial_state: AiState::Patrol,
            patrols: true,
        },
    }
}
