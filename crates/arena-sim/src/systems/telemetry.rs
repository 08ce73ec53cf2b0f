//! Stealth telemetry: how visible and how audible the player is, each on
//! a 0–100 scale. Informational only; nothing in the simulation reads it.

use arena_core::arena::ArenaMap;
use arena_core::components::Player;
use arena_core::constants::*;
use arena_core::types::horizontal_distance;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Telemetry {
    pub light: f32,
    pub sound: f32,
}

pub fn estimate(player: &Player, arena: &ArenaMap, now_ms: f64) -> Telemetry {
    Telemetry {
        light: light_level(player, arena),
        sound: sound_level(player, now_ms),
    }
}

/// Ambient base, plus every light zone the player stands in (dark zones
/// are negative), plus probes with linear falloff to their radius.
pub fn light_level(player: &Player, arena: &ArenaMap) -> f32 {
    let zones: f32 = arena
        .light_zones
        .iter()
        .filter(|z| z.bounds.contains_horizontal(player.position))
        .map(|z| z.intensity)
        .sum();

    let probes: f32 = arena
        .probes
        .iter()
        .filter(|p| p.radius > 0.0)
        .map(|p| {
            let d = horizontal_distance(p.position, player.position);
            p.intensity * (1.0 - d / p.radius).max(0.0)
        })
        .sum();

    let mut light = LIGHT_AMBIENT + zones + probes;
    if player.crouched {
        light *= LIGHT_CROUCH_FACTOR;
    }
    light.clamp(0.0, 100.0)
}

/// Footsteps scale with speed, plus flat terms for being airborne and for
/// a recent shot.
pub fn sound_level(player: &Player, now_ms: f64) -> f32 {
    let ratio = (player.horizontal_speed / PLAYER_MOVE_SPEED).clamp(0.0, 1.0);
    let mut sound = ratio * SOUND_MOVE_MAX;
    if player.crouched {
        sound *= SOUND_CROUCH_FACTOR;
    }
    if !player.grounded {
        sound += SOUND_AIRBORNE;
    }
    if let Some(last) = player.last_fire_ms {
        if now_ms - last <= SOUND_GUNSHOT_WINDOW_MS {
            sound += SOUND_GUNSHOT;
        }
    }
    sound.clamp(0.0, 100.0)
}
