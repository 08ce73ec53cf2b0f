//! Round spawner: places the round's enemies around the arena's spawn nodes.

use glam::Vec3;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use arena_core::arena::ArenaMap;
use arena_core::config::EnemyTuning;
use arena_core::constants::*;
use arena_core::enums::EnemyRole;
use arena_core::events::SimEvent;
use arena_core::types::Aabb;
use arena_spatial::SolidObstacles;

use crate::session::Session;
use crate::systems::BOUNDS_INSET;
use crate::world_setup::{spawn_enemy, EnemySpawn};

/// Mutable bookkeeping the spawner advances.
pub struct SpawnContext<'a> {
    pub rng: &'a mut ChaCha8Rng,
    pub next_enemy_id: &'a mut u32,
    pub events: &'a mut Vec<SimEvent>,
}

/// Every `PURSUER_EVERY`-th enemy hunts; the rest guard zones.
pub fn role_for(index: u32) -> EnemyRole {
    if (index + 1) % PURSUER_EVERY == 0 {
        EnemyRole::Pursuer
    } else {
        EnemyRole::ZoneGuard
    }
}

/// Spawn the enemies for the session's current round. Spawn nodes are used
/// round-robin; zone guards are dealt patrol routes round-robin. Returns
/// the number spawned (zero when the arena has no spawn nodes).
pub fn spawn_round(
    world: &mut World,
    arena: &ArenaMap,
    session: &Session,
    tuning: &EnemyTuning,
    now_ms: f64,
    ctx: SpawnContext<'_>,
) -> u32 {
    if arena.spawn_nodes.is_empty() {
        log::warn!("floor {} has no spawn nodes; round starts empty", arena.floor);
        return 0;
    }

    let count = session.enemy_count();
    let scaling = session.scaling();
    let mut guards = 0usize;

    for index in 0..count {
        let role = role_for(index);
        let patrol_route = match role {
            EnemyRole::ZoneGuard if !arena.patrol_routes.is_empty() => {
                let route = guards % arena.patrol_routes.len();
                guards += 1;
                Some(route)
            }
            _ => None,
        };

        let node = arena.spawn_nodes[index as usize % arena.spawn_nodes.len()];
        let position = jittered_position(ctx.rng, arena, node);

        let id = *ctx.next_enemy_id;
        *ctx.next_enemy_id += 1;
        spawn_enemy(
            world,
            EnemySpawn {
                id,
                role,
                position,
                patrol_route,
                now_ms,
            },
            tuning,
            &scaling,
        );
        ctx.events.push(SimEvent::EnemySpawned { id, role, position });
    }

    log::debug!(
        "spawned {count} enemies for floor {} round {}",
        session.floor,
        session.global_round
    );
    count
}

/// Scatter around a spawn node, rejecting points outside the arena, inside
/// the safe room, or inside solid geometry. Falls back to the node itself
/// after `MAX_PLACEMENT_ATTEMPTS`.
pub fn jittered_position(rng: &mut ChaCha8Rng, arena: &ArenaMap, node: Vec3) -> Vec3 {
    let solids = SolidObstacles::new(&arena.obstacles);
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let candidate = node
            + Vec3::new(
                rng.gen_range(-SPAWN_JITTER..=SPAWN_JITTER),
                0.0,
                rng.gen_range(-SPAWN_JITTER..=SPAWN_JITTER),
            );
        let inside = arena.clamp_to_bounds(candidate, BOUNDS_INSET) == candidate;
        let body = Aabb::new(
            candidate - Vec3::new(PLAYER_RADIUS, 0.0, PLAYER_RADIUS),
            candidate + Vec3::new(PLAYER_RADIUS, PLAYER_HEIGHT, PLAYER_RADIUS),
        );
        if inside
            && !arena.safe_room.bounds.contains_horizontal(candidate)
            && !solids.overlaps(&body)
        {
            return candidate;
        }
    }
    node
}
