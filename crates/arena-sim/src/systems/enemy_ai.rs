//! Enemy AI system: runs the behavior FSM for every enemy, then applies
//! the result to its components.
//!
//! Calls `arena_ai::fsm::evaluate` for the decision, steers the chosen
//! movement around obstacles and queues projectiles for enemies that fire.

use glam::Vec3;
use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use arena_ai::aim::{perturb_aim, ring_point};
use arena_ai::fsm::{can_fire, evaluate, AiContext, MoveIntent};
use arena_ai::steering::{steer, Steer};
use arena_core::arena::ArenaMap;
use arena_core::components::{AiMemory, Enemy, Player, Projectile, Transform};
use arena_core::config::AiTuning;
use arena_core::constants::{ENEMY_EYE_HEIGHT, STEERING_PROBE_HEIGHT};
use arena_core::enums::Faction;
use arena_core::events::SimEvent;
use arena_core::types::{distance, flatten, horizontal_distance, yaw_towards};
use arena_spatial::{has_line_of_sight, SolidObstacles};

use crate::systems::BOUNDS_INSET;
use crate::world_setup::{make_projectile, spawn_projectile};

/// Read-only inputs shared by every enemy this tick.
pub struct AiFrame<'a> {
    pub arena: &'a ArenaMap,
    pub player: &'a Player,
    pub tuning: &'a AiTuning,
    pub projectile_speed: f32,
    pub now_ms: f64,
    pub delta: f32,
    pub combat_live: bool,
}

/// Run the enemy AI: evaluate, move, face, and fire.
pub fn run(
    world: &mut World,
    frame: &AiFrame<'_>,
    rng: &mut ChaCha8Rng,
    next_visual: &mut u64,
    events: &mut Vec<SimEvent>,
) {
    // Stable id order so RNG draws do not depend on archetype layout.
    let mut order: Vec<(u32, Entity)> = world
        .query::<&Enemy>()
        .iter()
        .map(|(entity, enemy)| (enemy.id, entity))
        .collect();
    order.sort_unstable_by_key(|(id, _)| *id);

    let query = SolidObstacles::new(&frame.arena.obstacles);
    let tuning = frame.tuning;
    let player = frame.player;
    let mut shots: Vec<Projectile> = Vec::new();

    for (_, entity) in order {
        let Ok((transform, enemy, memory)) =
            world.query_one_mut::<(&mut Transform, &Enemy, &mut AiMemory)>(entity)
        else {
            continue;
        };

        let position = transform.position;
        let eye = position + Vec3::Y * ENEMY_EYE_HEIGHT;
        let has_los = has_line_of_sight(&query, eye, player.eye(), tuning.los_tolerance);
        if has_los {
            memory.last_seen_ms = frame.now_ms;
        }

        let ctx = AiContext {
            role: enemy.role,
            state: memory.state,
            distance_to_player: distance(position, player.position),
            has_los,
            now_ms: frame.now_ms,
            last_seen_ms: memory.last_seen_ms,
            weapon_range: enemy.weapon_range,
            blocked: memory.blocked,
            reposition_target_distance: memory
                .reposition_target
                .map(|target| horizontal_distance(position, target)),
            combat_live: frame.combat_live,
        };
        let decision = evaluate(&ctx, tuning);

        if decision.state_changed {
            log::debug!(
                "enemy {} {:?} -> {:?}",
                enemy.id,
                memory.state,
                decision.new_state
            );
            events.push(SimEvent::EnemyStateChanged {
                id: enemy.id,
                from: memory.state,
                to: decision.new_state,
            });
            memory.state = decision.new_state;
        }

        if decision.pick_reposition_target {
            let point = ring_point(
                rng,
                player.position,
                tuning.reposition_ring_min,
                tuning.reposition_ring_max,
            );
            memory.reposition_target = Some(frame.arena.clamp_to_bounds(point, BOUNDS_INSET));
        } else if decision.movement != MoveIntent::Reposition {
            memory.reposition_target = None;
        }

        // Movement
        memory.blocked = false;
        if let Some((desired, remaining)) =
            desired_heading(decision.movement, position, player, memory, frame)
        {
            let probe = position + Vec3::Y * STEERING_PROBE_HEIGHT;
            match steer(&query, probe, desired, tuning) {
                Steer::Heading(heading) => {
                    let step = enemy.speed * decision.movement.speed_factor(tuning) * frame.delta;
                    let next = position + heading * step.min(remaining);
                    transform.position = frame.arena.clamp_to_bounds(next, BOUNDS_INSET);
                }
                Steer::Blocked => memory.blocked = true,
            }
        }

        // Facing is cosmetic and ignores sight.
        transform.yaw = yaw_towards(transform.position, player.position);

        // Fire
        if decision.fire
            && frame.combat_live
            && can_fire(memory.last_fire_ms, frame.now_ms, enemy.fire_interval_ms)
        {
            let muzzle = transform.position + Vec3::Y * ENEMY_EYE_HEIGHT;
            if let Some(aim) = (player.body_center() - muzzle).try_normalize() {
                let direction = perturb_aim(rng, aim, tuning.aim_noise_xz, tuning.aim_noise_y);
                let visual = *next_visual;
                *next_visual += 1;
                shots.push(make_projectile(
                    Faction::Enemy,
                    muzzle,
                    direction,
                    frame.projectile_speed,
                    enemy.weapon_range + tuning.fire_range_buffer,
                    enemy.damage,
                    visual,
                ));
                memory.last_fire_ms = Some(frame.now_ms);
                events.push(SimEvent::ShotFired {
                    faction: Faction::Enemy,
                    origin: muzzle,
                    direction,
                });
            }
        }
    }

    for shot in shots {
        spawn_projectile(world, shot);
    }
}

/// Horizontal heading for a movement intent plus the distance left to its
/// target. `None` means stand still this tick without counting as blocked.
fn desired_heading(
    movement: MoveIntent,
    position: Vec3,
    player: &Player,
    memory: &mut AiMemory,
    frame: &AiFrame<'_>,
) -> Option<(Vec3, f32)> {
    let toward = |target: Vec3| -> Option<(Vec3, f32)> {
        let dir = flatten(target - position)?;
        Some((dir, horizontal_distance(position, target)))
    };

    match movement {
        MoveIntent::Hold => None,
        MoveIntent::Approach => toward(player.position),
        MoveIntent::Retreat => {
            let dir = flatten(position - player.position)?;
            Some((dir, f32::INFINITY))
        }
        MoveIntent::Reposition => toward(memory.reposition_target?),
        MoveIntent::FollowRoute => {
            let waypoint = patrol_waypoint(memory, frame.arena, position, frame.tuning)?;
            toward(waypoint)
        }
    }
}

/// Current patrol waypoint, advancing the route cursor on arrival. An
/// unassigned or empty route yields no movement.
fn patrol_waypoint(
    memory: &mut AiMemory,
    arena: &ArenaMap,
    position: Vec3,
    tuning: &AiTuning,
) -> Option<Vec3> {
    let route = arena
        .patrol_routes
        .get(memory.patrol_route?)
        .filter(|route| !route.is_empty())?;

    let mut node = memory.patrol_node % route.len();
    if horizontal_distance(position, route[node]) <= tuning.arrive_radius {
        node = (node + 1) % route.len();
    }
    memory.patrol_node = node;
    Some(route[node])
}
