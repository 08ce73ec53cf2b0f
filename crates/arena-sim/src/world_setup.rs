//! Entity spawn factories for the simulation world.
//!
//! Creates enemy, projectile and pickup entities with their full component
//! bundles. Every entity is fully declared at creation; nothing bolts
//! components on later.

use glam::Vec3;
use hecs::{Entity, World};

use arena_ai::profiles::role_profile;
use arena_core::components::*;
use arena_core::config::EnemyTuning;
use arena_core::enums::*;

use crate::session::FloorScaling;

/// Everything needed to place one enemy.
#[derive(Debug, Clone, Copy)]
pub struct EnemySpawn {
    pub id: u32,
    pub role: EnemyRole,
    pub position: Vec3,
    pub patrol_route: Option<usize>,
    pub now_ms: f64,
}

/// Spawn one enemy with stats scaled for the current floor.
pub fn spawn_enemy(
    world: &mut World,
    spawn: EnemySpawn,
    tuning: &EnemyTuning,
    scaling: &FloorScaling,
) -> Entity {
    let health = scaling.scaled_health(tuning.base_health);
    let enemy = Enemy {
        id: spawn.id,
        role: spawn.role,
        health,
        max_health: health,
        speed: scaling.scaled_speed(tuning.base_speed),
        damage: scaling.scaled_damage(tuning.base_damage),
        fire_interval_ms: tuning.fire_interval_ms,
        weapon_range: tuning.weapon_range,
    };
    let memory = AiMemory {
        state: role_profile(spawn.role).initial_state,
        patrol_route: spawn.patrol_route,
        last_seen_ms: spawn.now_ms,
        ..AiMemory::default()
    };

    world.spawn((
        enemy,
        memory,
        Transform {
            position: spawn.position,
            yaw: 0.0,
        },
    ))
}

/// Spawn a projectile tagged with its owner's marker component.
pub fn spawn_projectile(world: &mut World, projectile: Projectile) -> Entity {
    match projectile.faction {
        Faction::Player => world.spawn((projectile, PlayerShot)),
        Faction::Enemy => world.spawn((projectile, EnemyShot)),
    }
}

pub fn spawn_pickup(world: &mut World, pickup: Pickup) -> Entity {
    world.spawn((pickup,))
}

/// Build a projectile at `origin` flying along `direction`.
pub fn make_projectile(
    faction: Faction,
    origin: Vec3,
    direction: Vec3,
    speed: f32,
    max_range: f32,
    damage: i32,
    visual: u64,
) -> Projectile {
    Projectile {
        origin,
        position: origin,
        direction: direction.normalize_or_zero(),
        speed,
        traveled: 0.0,
        max_range,
        damage,
        faction,
        visual,
    }
}
