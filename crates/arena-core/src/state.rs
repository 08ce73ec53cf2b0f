//! Game state snapshot: the complete visible state handed to the
//! presentation layer after each tick.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::types::SimTime;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: PhaseView,
    pub hud: HudView,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub pickups: Vec<PickupView>,
    pub gate_open: bool,
    pub events: Vec<SimEvent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhaseView {
    pub phase: GamePhase,
    /// Seconds remaining in a timed phase (0 for untimed).
    pub timer_secs: f64,
    /// Prep countdown display value.
    pub countdown: u32,
    pub combat_live: bool,
}

/// Values shown on the heads-up display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HudView {
    pub health: i32,
    pub max_health: i32,
    pub ammo: u32,
    pub max_ammo: u32,
    pub weapon: WeaponKind,
    pub round: u32,
    pub floor: u32,
    /// Stealth light exposure, 0–100.
    pub light: f32,
    /// Stealth sound exposure, 0–100.
    pub sound: f32,
    pub objective: String,
    pub enemies_remaining: u32,
    pub kills: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Vec3,
    pub aim: Vec3,
    pub crouched: bool,
    pub grounded: bool,
}

/// Enemy as shown on the minimap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: u32,
    pub role: EnemyRole,
    pub state: AiState,
    pub position: Vec3,
    pub yaw: f32,
    pub health: i32,
    pub max_health: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub visual: u64,
    pub faction: Faction,
    pub position: Vec3,
    pub direction: Vec3,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickupView {
    pub id: u32,
    pub kind: PickupKind,
    pub position: Vec3,
}
