//! Player controller: movement, jumping, and weapon fire.

use glam::Vec3;
use hecs::World;
use rand_chacha::ChaCha8Rng;

use arena_ai::aim::apply_spread;
use arena_ai::fsm::can_fire;
use arena_core::arena::ArenaMap;
use arena_core::commands::InputIntent;
use arena_core::components::Player;
use arena_core::constants::*;
use arena_core::enums::Faction;
use arena_core::events::SimEvent;
use arena_core::types::{flatten, Aabb};
use arena_spatial::SolidObstacles;

use crate::world_setup::{make_projectile, spawn_projectile};

/// Lift applied to the collision box so standing on a surface is not
/// treated as overlapping it.
const SKIN: f32 = 0.05;

/// Highest surface the player may step onto without jumping.
const STEP_HEIGHT: f32 = 0.3;

/// Integrate movement and gravity for one tick.
pub fn run(
    player: &mut Player,
    intent: &InputIntent,
    arena: &ArenaMap,
    delta: f32,
    events: &mut Vec<SimEvent>,
) {
    if let Some(aim) = intent.aim.try_normalize() {
        player.aim = aim;
    }

    let solids = SolidObstacles::new(&arena.obstacles);
    let start = player.position;

    // Horizontal, one axis at a time so walls can be slid along.
    let forward = flatten(player.aim).unwrap_or(Vec3::Z);
    let speed = if player.crouched {
        PLAYER_MOVE_SPEED * PLAYER_CROUCH_SPEED_FACTOR
    } else {
        PLAYER_MOVE_SPEED
    };
    let step = intent.wish_direction(forward) * speed * delta;
    for axis in [Vec3::X, Vec3::Z] {
        let candidate = player.position + axis * step.dot(axis);
        if !solids.overlaps(&body_bounds(candidate)) {
            player.position = candidate;
        }
    }
    player.position = arena.clamp_to_bounds(player.position, PLAYER_RADIUS);
    player.horizontal_speed = if delta > 0.0 {
        Vec3::new(player.position.x - start.x, 0.0, player.position.z - start.z).length() / delta
    } else {
        0.0
    };

    // Vertical
    let ground = ground_height(arena, player.position);
    if player.grounded && player.position.y > ground + SKIN {
        player.grounded = false; // walked off a ledge
    }
    if !player.grounded {
        player.vertical_velocity -= GRAVITY * delta;
        player.position.y += player.vertical_velocity * delta;
        if player.position.y <= ground {
            let impact_speed = -player.vertical_velocity;
            player.position.y = ground;
            player.vertical_velocity = 0.0;
            player.grounded = true;
            events.push(SimEvent::Landed { impact_speed });
        }
    }
}

/// Start a jump. Ignored while airborne.
pub fn jump(player: &mut Player, events: &mut Vec<SimEvent>) -> bool {
    if !player.grounded {
        return false;
    }
    player.grounded = false;
    player.vertical_velocity = PLAYER_JUMP_VELOCITY;
    events.push(SimEvent::Jumped);
    true
}

/// Fire the active weapon if the trigger is held, the cooldown has elapsed
/// and a round is left. Rejections are silent. Returns whether it fired.
pub fn fire(
    world: &mut World,
    player: &mut Player,
    intent: &InputIntent,
    now_ms: f64,
    rng: &mut ChaCha8Rng,
    next_visual: &mut u64,
    events: &mut Vec<SimEvent>,
) -> bool {
    if !intent.fire || player.is_dead() {
        return false;
    }
    let profile = player.loadout.active_profile();
    if !can_fire(player.last_fire_ms, now_ms, profile.fire_interval_ms) {
        return false;
    }
    // One round per trigger pull, whatever the pellet count.
    if !player.loadout.consume_round() {
        return false;
    }

    let aim = player.aim;
    let origin = player.eye() + aim * MUZZLE_OFFSET;
    for _ in 0..profile.pellets.max(1) {
        let direction = apply_spread(rng, aim, profile.spread);
        let visual = *next_visual;
        *next_visual += 1;
        spawn_projectile(
            world,
            make_projectile(
                Faction::Player,
                origin,
                direction,
                profile.projectile_speed,
                profile.range,
                profile.damage,
                visual,
            ),
        );
    }
    player.last_fire_ms = Some(now_ms);
    events.push(SimEvent::ShotFired {
        faction: Faction::Player,
        origin,
        direction: aim,
    });
    true
}

/// Collision box for a player standing at `feet`.
fn body_bounds(feet: Vec3) -> Aabb {
    Aabb::new(
        Vec3::new(feet.x - PLAYER_RADIUS, feet.y + SKIN, feet.z - PLAYER_RADIUS),
        Vec3::new(feet.x + PLAYER_RADIUS, feet.y + PLAYER_HEIGHT, feet.z + PLAYER_RADIUS),
    )
}

/// Top of the highest solid surface under the player's footprint that is
/// not above their feet (plus a small step).
fn ground_height(arena: &ArenaMap, feet: Vec3) -> f32 {
    let footprint = body_bounds(feet);
    arena
        .solid_obstacles()
        .filter(|o| {
            o.bounds.min.x <= footprint.max.x
                && o.bounds.max.x >= footprint.min.x
                && o.bounds.min.z <= footprint.max.z
                && o.bounds.max.z >= footprint.min.z
                && o.bounds.max.y <= feet.y + STEP_HEIGHT
        })
        .map(|o| o.bounds.max.y)
        .fold(arena.bounds.min.y, f32::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::arena::SafeRoom;
    use arena_core::types::Obstacle;

    fn arena_with(obstacles: Vec<Obstacle>) -> ArenaMap {
        ArenaMap {
            floor: 1,
            bounds: Aabb::new(Vec3::new(-20.0, 0.0, -20.0), Vec3::new(20.0, 6.0, 20.0)),
            obstacles,
            spawn_nodes: vec![Vec3::new(0.0, 0.0, 15.0)],
            patrol_routes: Vec::new(),
            pickup_nodes: Vec::new(),
            light_zones: Vec::new(),
            probes: Vec::new(),
            safe_room: SafeRoom {
                bounds: Aabb::new(Vec3::new(-3.0, 0.0, -20.0), Vec3::new(3.0, 3.0, -16.0)),
                gate: 99,
            },
            player_spawn: Vec3::ZERO,
        }
    }

    fn forward() -> InputIntent {
        InputIntent {
            forward: true,
            ..InputIntent::default()
        }
    }

    #[test]
    fn test_walk_speed() {
        let arena = arena_with(Vec::new());
        let mut player = Player::default();
        let mut events = Vec::new();
        run(&mut player, &forward(), &arena, 0.5, &mut events);
        assert!((player.position.z - 3.0).abs() < 1e-4);
        assert!((player.horizontal_speed - PLAYER_MOVE_SPEED).abs() < 1e-3);
    }

    #[test]
    fn test_crouch_halves_speed() {
        let arena = arena_with(Vec::new());
        let mut player = Player {
            crouched: true,
            ..Player::default()
        };
        let mut events = Vec::new();
        run(&mut player, &forward(), &arena, 0.5, &mut events);
        assert!((player.position.z - 1.5).abs() < 1e-4);
    }

    #[test]
    fn test_wall_blocks_movement() {
        let wall = Obstacle::new(0, Aabb::new(Vec3::new(-5.0, 0.0, 1.0), Vec3::new(5.0, 3.0, 1.5)));
        let arena = arena_with(vec![wall]);
        let mut player = Player::default();
        let mut events = Vec::new();
        for _ in 0..60 {
            run(&mut player, &forward(), &arena, 1.0 / 60.0, &mut events);
        }
        assert!(player.position.z + PLAYER_RADIUS < 1.0);
    }

    #[test]
    fn test_jump_and_land() {
        let arena = arena_with(Vec::new());
        let mut player = Player::default();
        let mut events = Vec::new();
        assert!(jump(&mut player, &mut events));
        assert!(!jump(&mut player, &mut events), "no double jump");
        for _ in 0..120 {
            run(&mut player, &InputIntent::default(), &arena, 1.0 / 60.0, &mut events);
        }
        assert!(player.grounded);
        assert_eq!(player.position.y, 0.0);
        assert!(events.iter().any(|e| matches!(e, SimEvent::Jumped)));
        assert!(events.iter().any(|e| matches!(e, SimEvent::Landed { .. })));
    }

    #[test]
    fn test_clamped_to_bounds() {
        let arena = arena_with(Vec::new());
        let mut player = Player::spawned_at(Vec3::new(0.0, 0.0, 19.9));
        let mut events = Vec::new();
        run(&mut player, &forward(), &arena, 0.1, &mut events);
        assert!(player.position.z <= 20.0 - PLAYER_RADIUS + 1e-5);
    }
}
