//! Enumeration types used throughout the simulation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::WeaponError;

/// Enemy behavioral role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyRole {
    /// Hunts the player from spawn; never patrols.
    Pursuer,
    /// Walks a patrol route and returns to it after losing the player.
    #[default]
    ZoneGuard,
}

/// Enemy AI state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AiState {
    #[default]
    Patrol,
    Chase,
    Engage,
    Reposition,
}

/// Who fired a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Player,
    Enemy,
}

/// Player weapon type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    /// Starting weapon, always unlocked.
    #[default]
    Rifle,
    Shotgun,
    Sniper,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 3] = [WeaponKind::Rifle, WeaponKind::Shotgun, WeaponKind::Sniper];

    /// Stable slot index used by per-weapon arrays.
    pub fn index(self) -> usize {
        match self {
            WeaponKind::Rifle => 0,
            WeaponKind::Shotgun => 1,
            WeaponKind::Sniper => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            WeaponKind::Rifle => "rifle",
            WeaponKind::Shotgun => "shotgun",
            WeaponKind::Sniper => "sniper",
        }
    }
}

impl fmt::Display for WeaponKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WeaponKind {
    type Err = WeaponError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rifle" => Ok(WeaponKind::Rifle),
            "shotgun" => Ok(WeaponKind::Shotgun),
            "sniper" => Ok(WeaponKind::Sniper),
            _ => Err(WeaponError::Unknown(s.to_string())),
        }
    }
}

/// Collectible item kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickupKind {
    Health,
    UnlockShotgun,
    UnlockSniper,
}

impl PickupKind {
    /// Weapon permanently enabled by collecting this pickup, if any.
    pub fn unlocks(self) -> Option<WeaponKind> {
        match self {
            PickupKind::Health => None,
            PickupKind::UnlockShotgun => Some(WeaponKind::Shotgun),
            PickupKind::UnlockSniper => Some(WeaponKind::Sniper),
        }
    }
}

/// Match-level phase. Exactly one is active at any time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Pre-game / post-reset resting state.
    #[default]
    Idle,
    PrepCountdown,
    /// Split into an activation window and the live sub-state by `combat_live`.
    Combat,
    Intermission,
    RoundEnd,
    ArenaGateOpen,
    ArenaSwap,
    GameOver,
}

impl GamePhase {
    /// Whether the player controller consumes movement and weapon intents.
    pub fn accepts_player_input(self) -> bool {
        !matches!(self, GamePhase::Idle | GamePhase::GameOver)
    }
}

/// Stage of the game-over sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverStage {
    /// Simulation frozen, game-over feedback on screen.
    #[default]
    Feedback,
    /// Blanking transition before the session reset.
    Blanking,
}

/// Why a projectile was removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileEnd {
    /// Travelled its full range.
    Expired,
    HitEnemy,
    HitPlayer,
    HitWall,
    /// Cleared by a phase transition.
    Cleared,
}
