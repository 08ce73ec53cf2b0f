//! Combat resolution: advances projectiles and resolves hits.
//!
//! Player shots and enemy shots are processed as two independent passes.
//! Each projectile moves `direction × speed` per tick, then is tested for a
//! body hit, then for a wall between its old and new position, then for
//! range. Any of the three releases it.

use glam::Vec3;
use hecs::{Entity, World};

use arena_core::arena::ArenaMap;
use arena_core::components::{Enemy, EnemyShot, Player, PlayerShot, Projectile, Transform};
use arena_core::constants::{ENEMY_HIT_RADIUS, PLAYER_HIT_RADIUS};
use arena_core::enums::ProjectileEnd;
use arena_core::events::SimEvent;
use arena_spatial::{SolidObstacles, SpatialQuery};

use crate::session::Session;

/// A living enemy as seen by this tick's player shots.
struct Target {
    entity: Entity,
    id: u32,
    center: Vec3,
    health: i32,
    damage_taken: i32,
}

/// Run the combat system.
pub fn run(
    world: &mut World,
    arena: &ArenaMap,
    player: &mut Player,
    session: &mut Session,
    events: &mut Vec<SimEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();
    let query = SolidObstacles::new(&arena.obstacles);

    // Insertion (id) order: the first enemy in radius takes the hit.
    let mut targets: Vec<Target> = world
        .query::<(&Enemy, &Transform)>()
        .iter()
        .map(|(entity, (enemy, transform))| Target {
            entity,
            id: enemy.id,
            center: enemy.hit_center(transform),
            health: enemy.health,
            damage_taken: 0,
        })
        .collect();
    targets.sort_unstable_by_key(|t| t.id);

    for (entity, (projectile, _)) in world.query_mut::<(&mut Projectile, &PlayerShot)>() {
        let previous = advance(projectile);

        let hit = targets.iter_mut().find(|t| {
            t.health > 0 && t.center.distance(projectile.position) <= ENEMY_HIT_RADIUS
        });
        let end = match hit {
            Some(target) => {
                let damage = projectile.damage.max(0);
                target.health = (target.health - damage).max(0);
                target.damage_taken += damage;
                Some(ProjectileEnd::HitEnemy)
            }
            None => wall_or_range(&query, previous, projectile, events),
        };

        if let Some(reason) = end {
            release(projectile, reason, events);
            despawn_buffer.push(entity);
        }
    }

    // Enemy shots are aimed at the torso, so the hit sphere sits on
    // `body_center()` rather than the feet `position`.
    for (entity, (projectile, _)) in world.query_mut::<(&mut Projectile, &EnemyShot)>() {
        let previous = advance(projectile);

        let end = if !player.is_dead()
            && projectile.position.distance(player.body_center()) <= PLAYER_HIT_RADIUS
        {
            let health = player.take_damage(projectile.damage);
            events.push(SimEvent::PlayerHit {
                damage: projectile.damage,
                health,
            });
            Some(ProjectileEnd::HitPlayer)
        } else {
            wall_or_range(&query, previous, projectile, events)
        };

        if let Some(reason) = end {
            release(projectile, reason, events);
            despawn_buffer.push(entity);
        }
    }

    // Apply damage; kills leave the world this same tick.
    for target in targets.iter().filter(|t| t.damage_taken > 0) {
        let Ok(mut enemy) = world.get::<&mut Enemy>(target.entity) else {
            continue;
        };
        if enemy.take_damage(target.damage_taken) {
            let position = world
                .get::<&Transform>(target.entity)
                .map(|t| t.position)
                .unwrap_or(target.center);
            log::debug!("enemy {} killed", target.id);
            events.push(SimEvent::EnemyKilled {
                id: target.id,
                position,
            });
            session.kills += 1;
            despawn_buffer.push(target.entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Move one tick along the flight path. Returns the pre-move position.
fn advance(projectile: &mut Projectile) -> Vec3 {
    let previous = projectile.position;
    projectile.position += projectile.direction * projectile.speed;
    projectile.traveled += projectile.speed;
    previous
}

/// Wall impact within this tick's travel, otherwise range expiry.
fn wall_or_range(
    query: &SolidObstacles<'_>,
    previous: Vec3,
    projectile: &Projectile,
    events: &mut Vec<SimEvent>,
) -> Option<ProjectileEnd> {
    if let Some(hit) = query.cast_ray(previous, projectile.direction) {
        if hit.distance <= projectile.speed {
            events.push(SimEvent::WallImpact { point: hit.point });
            return Some(ProjectileEnd::HitWall);
        }
    }
    (projectile.traveled >= projectile.max_range).then_some(ProjectileEnd::Expired)
}

pub(crate) fn release(projectile: &Projectile, reason: ProjectileEnd, events: &mut Vec<SimEvent>) {
    events.push(SimEvent::ProjectileReleased {
        visual: projectile.visual,
        reason,
    });
}
