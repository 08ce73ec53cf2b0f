//! Simulation configuration.
//!
//! Every field has a default taken from `constants`, so a JSON config only
//! needs to name the values it overrides.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;

/// Enemy decision thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiTuning {
    pub detection_range: f32,
    pub los_tolerance: f32,
    pub los_revert_ms: f64,
    pub los_reposition_ms: f64,
    pub reposition_ring_min: f32,
    pub reposition_ring_max: f32,
    pub arrive_radius: f32,
    pub engage_range_factor: f32,
    pub min_engage_distance: f32,
    pub max_engage_factor: f32,
    pub fire_range_buffer: f32,
    pub steer_clearance: f32,
    pub steer_diagonal_deg: f32,
    pub patrol_speed_factor: f32,
    pub reposition_speed_factor: f32,
    pub retreat_speed_factor: f32,
    pub aim_noise_xz: f32,
    pub aim_noise_y: f32,
}

impl Default for AiTuning {
    fn default() -> Self {
        Self {
            detection_range: AI_DETECTION_RANGE,
            los_tolerance: AI_LOS_TOLERANCE,
            los_revert_ms: AI_LOS_REVERT_MS,
            los_reposition_ms: AI_LOS_REPOSITION_MS,
            reposition_ring_min: AI_REPOSITION_RING_MIN,
            reposition_ring_max: AI_REPOSITION_RING_MAX,
            arrive_radius: AI_ARRIVE_RADIUS,
            engage_range_factor: AI_ENGAGE_RANGE_FACTOR,
            min_engage_distance: AI_MIN_ENGAGE_DISTANCE,
            max_engage_factor: AI_MAX_ENGAGE_FACTOR,
            fire_range_buffer: AI_FIRE_RANGE_BUFFER,
            steer_clearance: AI_STEER_CLEARANCE,
            steer_diagonal_deg: AI_STEER_DIAGONAL_DEG,
            patrol_speed_factor: AI_PATROL_SPEED_FACTOR,
            reposition_speed_factor: AI_REPOSITION_SPEED_FACTOR,
            retreat_speed_factor: AI_RETREAT_SPEED_FACTOR,
            aim_noise_xz: AI_AIM_NOISE_XZ,
            aim_noise_y: AI_AIM_NOISE_Y,
        }
    }
}

/// Floor-1 enemy stats before per-floor scaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub base_health: i32,
    pub base_speed: f32,
    pub base_damage: i32,
    pub fire_interval_ms: f64,
    pub weapon_range: f32,
    pub projectile_speed: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            base_health: ENEMY_BASE_HEALTH,
            base_speed: ENEMY_BASE_SPEED,
            base_damage: ENEMY_BASE_DAMAGE,
            fire_interval_ms: ENEMY_FIRE_INTERVAL_MS,
            weapon_range: ENEMY_WEAPON_RANGE,
            projectile_speed: ENEMY_PROJECTILE_SPEED,
        }
    }
}

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed + same inputs = same simulation.
    pub seed: u64,
    /// Multiplier on every tick delta (1.0 = normal).
    pub time_scale: f64,
    /// Longest delta a single tick will simulate.
    pub max_tick_delta_secs: f64,
    pub rounds_per_arena: u32,
    pub ai: AiTuning,
    pub enemy: EnemyTuning,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            max_tick_delta_secs: MAX_TICK_DELTA_SECS,
            rounds_per_arena: ROUNDS_PER_ARENA,
            ai: AiTuning::default(),
            enemy: EnemyTuning::default(),
        }
    }
}

impl SimConfig {
    /// Parse a config from JSON and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.time_scale >= 0.0 && self.time_scale <= 4.0) {
            return Err(invalid("time_scale", "must be within 0.0..=4.0"));
        }
        if self.max_tick_delta_secs <= 0.0 {
            return Err(invalid("max_tick_delta_secs", "must be positive"));
        }
        if self.rounds_per_arena == 0 {
            return Err(invalid("rounds_per_arena", "must be at least 1"));
        }
        if self.ai.reposition_ring_min > self.ai.reposition_ring_max {
            return Err(invalid(
                "ai.reposition_ring_min",
                "must not exceed ai.reposition_ring_max",
            ));
        }
        if self.enemy.base_health <= 0 {
            return Err(invalid("enemy.base_health", "must be positive"));
        }
        if self.enemy.weapon_range <= 0.0 || self.enemy.projectile_speed <= 0.0 {
            return Err(invalid(
                "enemy.weapon_range",
                "weapon range and projectile speed must be positive",
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}
