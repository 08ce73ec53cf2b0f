//! Events emitted by the simulation for the presentation layer.
//!
//! Collected during a tick and handed out with that tick's snapshot, so the
//! HUD, minimap, banners and effect system never run inside the update.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    // --- Phase / banners ---
    PhaseChanged {
        phase: GamePhase,
        combat_live: bool,
    },
    /// Prep countdown display value (whole seconds).
    Countdown { value: u32 },
    RoundBanner { text: String, duration_secs: f64 },
    /// Whole seconds left in the intermission.
    IntermissionRemaining { secs: u32 },
    CrosshairVisible { visible: bool },
    ObjectiveChanged { text: String },
    /// Transient notice (pickups, locked weapons).
    Notice { text: String },
    GateChanged { open: bool },
    ArenaLoaded { floor: u32 },

    // --- Entity lifecycle ---
    EnemySpawned {
        id: u32,
        role: EnemyRole,
        position: Vec3,
    },
    EnemyKilled { id: u32, position: Vec3 },
    EnemyStateChanged {
        id: u32,
        from: AiState,
        to: AiState,
    },
    PickupSpawned {
        id: u32,
        kind: PickupKind,
        position: Vec3,
    },
    PickupCollected { id: u32, kind: PickupKind },
    PlayerHit { damage: i32, health: i32 },
    WeaponSwitched { weapon: WeaponKind },
    /// A switch to a locked or unknown weapon was attempted.
    WeaponLocked { weapon: String },
    WeaponUnlocked { weapon: WeaponKind },
    Reloaded { weapon: WeaponKind, ammo: u32 },
    /// The rendering collaborator may free the projectile's visual.
    ProjectileReleased { visual: u64, reason: ProjectileEnd },

    // --- Visual-effect triggers ---
    ShotFired {
        faction: Faction,
        origin: Vec3,
        direction: Vec3,
    },
    WallImpact { point: Vec3 },
    Jumped,
    Landed { impact_speed: f32 },

    // --- Game over ---
    GameOver,
    ScreenBlank,
    SessionReset,
}
