//! Player intents sent from the input collaborator to the simulation.
//!
//! Discrete commands are queued and processed at the next tick boundary.
//! Continuous intents (movement flags, aim, trigger) are latched and read
//! every tick until replaced.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Discrete player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Leave IDLE and begin round 1 on floor 1.
    StartGame,
    /// Refill the active weapon.
    Reload,
    /// Select a weapon by name. Unknown or locked names are rejected.
    SwitchWeapon { weapon: String },
    ToggleCrouch,
    Jump,
}

/// Held input state for the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputIntent {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    /// Trigger held.
    pub fire: bool,
    /// Look direction; normalized by the engine.
    pub aim: Vec3,
}

impl Default for InputIntent {
    fn default() -> Self {
        Self {
            forward: false,
            back: false,
            left: false,
            right: false,
            fire: false,
            aim: Vec3::Z,
        }
    }
}

impl InputIntent {
    /// Movement on the ground plane relative to `forward` (unit, horizontal).
    /// Zero when no flags are set or opposing flags cancel out.
    pub fn wish_direction(&self, forward: Vec3) -> Vec3 {
        let left = Vec3::new(forward.z, 0.0, -forward.x);
        let mut wish = Vec3::ZERO;
        if self.forward {
            wish += forward;
        }
        if self.back {
            wish -= forward;
        }
        if self.right {
            wish -= left;
        }
        if self.left {
            wish += left;
        }
        wish.normalize_or_zero()
    }
}
