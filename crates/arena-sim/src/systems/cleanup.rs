//! Cleanup: removes stray projectiles each tick, and clears transient
//! entities when the phase machine asks for it.

use hecs::{Entity, World};

use arena_core::arena::ArenaMap;
use arena_core::components::{Enemy, Pickup, Projectile};
use arena_core::enums::{Faction, ProjectileEnd};
use arena_core::events::SimEvent;

use crate::systems::combat::release;

/// Projectiles may leave the arena box by this much before being dropped.
const OUT_OF_BOUNDS_MARGIN: f32 = 5.0;

/// Remove projectiles that have left the arena.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(
    world: &mut World,
    arena: &ArenaMap,
    events: &mut Vec<SimEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();

    let min = arena.bounds.min - glam::Vec3::splat(OUT_OF_BOUNDS_MARGIN);
    let max = arena.bounds.max + glam::Vec3::splat(OUT_OF_BOUNDS_MARGIN);
    for (entity, projectile) in world.query_mut::<&Projectile>() {
        let p = projectile.position;
        if p.cmplt(min).any() || p.cmpgt(max).any() {
            release(projectile, ProjectileEnd::Expired, events);
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Clear projectiles, optionally only one side's. Every cleared projectile
/// releases its visual handle.
pub fn clear_projectiles(
    world: &mut World,
    faction: Option<Faction>,
    events: &mut Vec<SimEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();

    for (entity, projectile) in world.query_mut::<&Projectile>() {
        if faction.map_or(true, |f| f == projectile.faction) {
            release(projectile, ProjectileEnd::Cleared, events);
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

pub fn clear_pickups(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();
    despawn_buffer.extend(world.query_mut::<&Pickup>().into_iter().map(|(e, _)| e));
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

pub fn clear_enemies(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();
    despawn_buffer.extend(world.query_mut::<&Enemy>().into_iter().map(|(e, _)| e));
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
