//! ECS components for hecs entities, plus the player record.
//!
//! Components are plain data with a fixed field set from creation.
//! Game logic lives in systems, not components.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::*;
use crate::weapons::Loadout;

/// Position and facing of a character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Feet position.
    pub position: Vec3,
    /// Facing (radians, 0 = +Z).
    pub yaw: f32,
}

/// Enemy identity and combat stats (already scaled for the floor).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub role: EnemyRole,
    pub health: i32,
    pub max_health: i32,
    /// Movement speed at 100% (units/sec).
    pub speed: f32,
    /// Damage per projectile.
    pub damage: i32,
    pub fire_interval_ms: f64,
    pub weapon_range: f32,
}

impl Enemy {
    /// Apply damage, never dropping health below zero. Returns true when
    /// this hit killed the enemy.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.health = (self.health - amount.max(0)).max(0);
        self.health == 0
    }

    pub fn hit_center(&self, transform: &Transform) -> Vec3 {
        transform.position + Vec3::Y * ENEMY_HIT_CENTER_OFFSET
    }
}

/// Per-enemy AI memory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AiMemory {
    pub state: AiState,
    /// Time of the last shot (ms), `None` before the first.
    pub last_fire_ms: Option<f64>,
    /// Assigned patrol route, if any.
    pub patrol_route: Option<usize>,
    /// Next waypoint within the route.
    pub patrol_node: usize,
    /// Last time the player was in line of sight (ms).
    pub last_seen_ms: f64,
    pub reposition_target: Option<Vec3>,
    /// Steering found no clear heading on the previous tick.
    pub blocked: bool,
}

/// A projectile in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub origin: Vec3,
    pub position: Vec3,
    /// Unit vector.
    pub direction: Vec3,
    /// Units per tick.
    pub speed: f32,
    pub traveled: f32,
    pub max_range: f32,
    pub damage: i32,
    pub faction: Faction,
    /// Opaque handle owned by the rendering collaborator.
    pub visual: u64,
}

/// Marks a projectile fired by the player.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerShot;

/// Marks a projectile fired by an enemy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnemyShot;

/// A collectible item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub kind: PickupKind,
    pub position: Vec3,
}

/// The player character. Not an ECS entity: there is exactly one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Feet position.
    pub position: Vec3,
    /// Normalized look direction.
    pub aim: Vec3,
    pub vertical_velocity: f32,
    pub grounded: bool,
    pub crouched: bool,
    pub health: i32,
    pub max_health: i32,
    pub last_fire_ms: Option<f64>,
    /// Horizontal speed achieved last tick (units/sec).
    pub horizontal_speed: f32,
    pub loadout: Loadout,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            aim: Vec3::Z,
            vertical_velocity: 0.0,
            grounded: true,
            crouched: false,
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            last_fire_ms: None,
            horizontal_speed: 0.0,
            loadout: Loadout::default(),
        }
    }
}

impl Player {
    pub fn spawned_at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn eye(&self) -> Vec3 {
        let height = if self.crouched {
            PLAYER_CROUCH_EYE_HEIGHT
        } else {
            PLAYER_EYE_HEIGHT
        };
        self.position + Vec3::Y * height
    }

    pub fn body_center(&self) -> Vec3 {
        self.position + Vec3::Y * PLAYER_BODY_CENTER
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Apply damage, clamped at zero. Returns the resulting health.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        self.health = (self.health - amount.max(0)).max(0);
        self.health
    }

    /// Restore health capped at the maximum. Returns the amount restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.health;
        self.health = (self.health + amount.max(0)).min(self.max_health);
        self.health - before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enemy(health: i32) -> Enemy {
        Enemy {
            id: 1,
            role: EnemyRole::ZoneGuard,
            health,
            max_health: health,
            speed: ENEMY_BASE_SPEED,
            damage: ENEMY_BASE_DAMAGE,
            fire_interval_ms: ENEMY_FIRE_INTERVAL_MS,
            weapon_range: ENEMY_WEAPON_RANGE,
        }
    }

    #[test]
    fn test_enemy_health_never_negative() {
        let mut e = enemy(30);
        assert!(!e.take_damage(20));
        assert_eq!(e.health, 10);
        assert!(e.take_damage(95));
        assert_eq!(e.health, 0);
    }

    #[test]
    fn test_player_heal_capped() {
        let mut p = Player::default();
        p.take_damage(20);
        assert_eq!(p.heal(HEALTH_PICKUP_AMOUNT), 20);
        assert_eq!(p.health, PLAYER_MAX_HEALTH);
    }

    #[test]
    fn test_crouch_lowers_eye() {
        let mut p = Player::default();
        let standing = p.eye().y;
        p.crouched = true;
        assert!(p.eye().y < standing);
    }
}
