//! Snapshot system: queries the ECS world and builds a complete
//! GameStateSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use arena_core::arena::ArenaMap;
use arena_core::components::*;
use arena_core::events::SimEvent;
use arena_core::state::*;
use arena_core::types::SimTime;

use crate::phase::PhaseState;
use crate::session::Session;
use crate::systems::telemetry::Telemetry;

/// Everything outside the world that the snapshot reports.
pub struct SnapshotInputs<'a> {
    pub time: &'a SimTime,
    pub phase: &'a PhaseState,
    pub session: &'a Session,
    pub player: &'a Player,
    pub arena: &'a ArenaMap,
    pub telemetry: Telemetry,
    pub objective: &'a str,
}

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    inputs: &SnapshotInputs<'_>,
    events: Vec<SimEvent>,
) -> GameStateSnapshot {
    let enemies = build_enemies(world);
    let player = inputs.player;
    let loadout = &player.loadout;

    GameStateSnapshot {
        time: *inputs.time,
        phase: PhaseView {
            phase: inputs.phase.phase,
            timer_secs: inputs.phase.timer,
            countdown: inputs.phase.countdown,
            combat_live: inputs.phase.combat_live,
        },
        hud: HudView {
            health: player.health,
            max_health: player.max_health,
            ammo: loadout.active_ammo(),
            max_ammo: loadout.active_profile().magazine,
            weapon: loadout.active,
            round: inputs.session.global_round,
            floor: inputs.session.floor,
            light: inputs.telemetry.light,
            sound: inputs.telemetry.sound,
            objective: inputs.objective.to_string(),
            enemies_remaining: enemies.len() as u32,
            kills: inputs.session.kills,
        },
        player: PlayerView {
            position: player.position,
            aim: player.aim,
            crouched: player.crouched,
            grounded: player.grounded,
        },
        enemies,
        projectiles: build_projectiles(world),
        pickups: build_pickups(world),
        gate_open: inputs.arena.gate_open(),
        events,
    }
}

fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut query = world.query::<(&Enemy, &AiMemory, &Transform)>();
    let mut enemies: Vec<EnemyView> = query
        .iter()
        .map(|(_entity, (enemy, memory, transform))| EnemyView {
            id: enemy.id,
            role: enemy.role,
            state: memory.state,
            position: transform.position,
            yaw: transform.yaw,
            health: enemy.health,
            max_health: enemy.max_health,
        })
        .collect();
    enemies.sort_unstable_by_key(|e| e.id);
    enemies
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut query = world.query::<&Projectile>();
    let mut projectiles: Vec<ProjectileView> = query
        .iter()
        .map(|(_entity, p)| ProjectileView {
            visual: p.visual,
            faction: p.faction,
            position: p.position,
            direction: p.direction,
        })
        .collect();
    projectiles.sort_unstable_by_key(|p| p.visual);
    projectiles
}

fn build_pickups(world: &World) -> Vec<PickupView> {
    let mut query = world.query::<&Pickup>();
    let mut pickups: Vec<PickupView> = query
        .iter()
        .map(|(_entity, p)| PickupView {
            id: p.id,
            kind: p.kind,
            position: p.position,
        })
        .collect();
    pickups.sort_unstable_by_key(|p| p.id);
    pickups
}
