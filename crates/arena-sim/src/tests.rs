//! Tests for the simulation engine: phase sequencing, combat resolution,
//! weapons, progression and determinism.

use glam::Vec3;

use arena_core::arena::{ArenaMap, SafeRoom};
use arena_core::commands::{InputIntent, PlayerCommand};
use arena_core::constants::DT;
use arena_core::enums::*;
use arena_core::events::SimEvent;
use arena_core::state::GameStateSnapshot;
use arena_core::types::{Aabb, Obstacle};

use crate::arena_gen::StaticArenaProvider;
use crate::engine::{SimConfig, SimulationEngine};
use crate::session::enemy_count_for;

/// Wide open floor: the safe room sits just south of the origin and every
/// spawn node is far to the north.
fn open_arena() -> ArenaMap {
    ArenaMap {
        floor: 1,
        bounds: Aabb::new(Vec3::new(-150.0, 0.0, -150.0), Vec3::new(150.0, 8.0, 150.0)),
        obstacles: vec![Obstacle::new(
            0,
            Aabb::new(Vec3::new(-3.0, 0.0, -4.2), Vec3::new(3.0, 3.0, -3.8)),
        )],
        spawn_nodes: vec![Vec3::new(0.0, 0.0, 60.0), Vec3::new(10.0, 0.0, 60.0)],
        patrol_routes: vec![vec![Vec3::new(-10.0, 0.0, 60.0), Vec3::new(10.0, 0.0, 60.0)]],
        pickup_nodes: vec![
            Vec3::new(5.0, 0.0, 0.0),
            Vec3::new(-5.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 5.0),
        ],
        light_zones: Vec::new(),
        probes: Vec::new(),
        safe_room: SafeRoom {
            bounds: Aabb::new(Vec3::new(-3.0, 0.0, -10.0), Vec3::new(3.0, 3.0, -4.0)),
            gate: 0,
        },
        player_spawn: Vec3::new(0.0, 0.0, -7.0),
    }
}

fn open_engine(config: SimConfig) -> SimulationEngine {
    SimulationEngine::with_provider(config, Box::new(StaticArenaProvider::new(open_arena())))
}

/// Tick until `done` holds, collecting every event on the way.
fn run_until(
    engine: &mut SimulationEngine,
    max_ticks: usize,
    mut done: impl FnMut(&GameStateSnapshot) -> bool,
) -> (usize, Vec<SimEvent>) {
    let mut events = Vec::new();
    for n in 1..=max_ticks {
        let snapshot = engine.tick(DT);
        events.extend(snapshot.events.iter().cloned());
        if done(&snapshot) {
            return (n, events);
        }
    }
    panic!("condition not reached within {max_ticks} ticks");
}

fn run_to_live_combat(engine: &mut SimulationEngine) {
    engine.start_game();
    run_until(engine, 600, |s| s.phase.combat_live);
}

// ---- Phase sequencing ----

#[test]
fn test_idle_until_started() {
    let mut engine = open_engine(SimConfig::default());
    for _ in 0..30 {
        let snapshot = engine.tick(DT);
        assert_eq!(snapshot.phase.phase, GamePhase::Idle);
    }
    assert_eq!(engine.time().tick, 0, "time frozen while idle");
    assert_eq!(engine.enemy_count(), 0);
}

#[test]
fn test_start_game_enters_prep_countdown() {
    let mut engine = open_engine(SimConfig::default());
    engine.start_game();
    assert_eq!(engine.phase(), GamePhase::PrepCountdown);
    assert_eq!(engine.phase_state().timer, 3.0);
    assert_eq!(engine.phase_state().countdown, 3);
    assert!(!engine.arena().gate_open());
    assert_eq!(engine.enemy_count(), enemy_count_for(1, 1) as usize);

    // A second start is ignored.
    engine.start_game();
    assert_eq!(engine.phase_state().timer, 3.0);
}

#[test]
fn test_prep_then_activation_then_live() {
    let mut engine = open_engine(SimConfig::default());
    engine.queue_command(PlayerCommand::StartGame);

    let (prep_ticks, events) = run_until(&mut engine, 400, |s| s.phase.phase == GamePhase::Combat);
    assert!((179..=181).contains(&prep_ticks), "prep took {prep_ticks} ticks");
    assert!(!engine.phase_state().combat_live);
    assert!(engine.arena().gate_open());
    assert!(events.contains(&SimEvent::Countdown { value: 3 }));
    assert!(events.contains(&SimEvent::Countdown { value: 1 }));
    assert!(events.contains(&SimEvent::GateChanged { open: true }));

    let (live_ticks, _) = run_until(&mut engine, 200, |s| s.phase.combat_live);
    assert!((59..=61).contains(&live_ticks), "activation took {live_ticks} ticks");
}

#[test]
fn test_commands_ignored_while_idle() {
    let mut engine = open_engine(SimConfig::default());
    engine.queue_command(PlayerCommand::ToggleCrouch);
    engine.queue_command(PlayerCommand::Jump);
    let snapshot = engine.tick(DT);
    assert!(!engine.player().crouched);
    assert!(snapshot.events.is_empty());
}

// ---- Combat ----

#[test]
fn test_projectile_removed_at_max_range() {
    let mut engine = open_engine(SimConfig::default());
    engine.start_game();
    let visual = engine.spawn_test_projectile(
        Faction::Player,
        Vec3::new(-50.0, 1.0, 20.0),
        Vec3::X,
        1.0,
        100.0,
        10,
    );

    for _ in 0..99 {
        let snapshot = engine.tick(DT);
        assert!(snapshot.projectiles.iter().any(|p| p.visual == visual));
    }
    let snapshot = engine.tick(DT);
    assert!(snapshot.projectiles.is_empty());
    assert!(snapshot.events.contains(&SimEvent::ProjectileReleased {
        visual,
        reason: ProjectileEnd::Expired,
    }));
}

#[test]
fn test_lethal_hit_removes_enemy_same_tick() {
    let mut engine = open_engine(SimConfig::default());
    engine.start_game();
    engine.kill_all_enemies();
    let id = engine.spawn_test_enemy(EnemyRole::ZoneGuard, Vec3::new(20.0, 0.0, 20.0));
    engine.spawn_test_projectile(
        Faction::Player,
        Vec3::new(20.0, 1.0, 18.0),
        Vec3::Z,
        1.0,
        50.0,
        100,
    );

    let snapshot = engine.tick(DT);
    assert!(snapshot.enemies.is_empty());
    assert!(snapshot
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::EnemyKilled { id: killed, .. } if *killed == id)));
    assert_eq!(engine.session().kills, 1);
    assert_eq!(snapshot.hud.kills, 1);
}

#[test]
fn test_enemy_shot_damages_player() {
    let mut engine = open_engine(SimConfig::default());
    engine.start_game();
    let center = engine.player().body_center();
    engine.spawn_test_projectile(
        Faction::Enemy,
        center + Vec3::new(2.0, 0.0, 0.0),
        Vec3::NEG_X,
        1.0,
        50.0,
        15,
    );

    let snapshot = engine.tick(DT);
    assert_eq!(snapshot.hud.health, 85);
    assert!(snapshot.events.contains(&SimEvent::PlayerHit {
        damage: 15,
        health: 85,
    }));
}

// ---- Weapons ----

#[test]
fn test_locked_weapon_rejected() {
    let mut engine = open_engine(SimConfig::default());
    engine.start_game();
    engine.queue_command(PlayerCommand::SwitchWeapon {
        weapon: "sniper".to_string(),
    });
    let snapshot = engine.tick(DT);

    assert_eq!(snapshot.hud.weapon, WeaponKind::Rifle);
    assert!(snapshot.events.contains(&SimEvent::WeaponLocked {
        weapon: "sniper".to_string(),
    }));
}

#[test]
fn test_reload_when_full_is_noop() {
    let mut engine = open_engine(SimConfig::default());
    engine.start_game();
    let full = engine.player().loadout.active_ammo();

    engine.queue_command(PlayerCommand::Reload);
    let snapshot = engine.tick(DT);
    assert_eq!(snapshot.hud.ammo, full);
    assert!(!snapshot
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::Reloaded { .. })));

    engine.player_mut().loadout.consume_round();
    engine.queue_command(PlayerCommand::Reload);
    engine.queue_command(PlayerCommand::Reload);
    let snapshot = engine.tick(DT);
    assert_eq!(snapshot.hud.ammo, full);
    let reloads = snapshot
        .events
        .iter()
        .filter(|e| matches!(e, SimEvent::Reloaded { .. }))
        .count();
    assert_eq!(reloads, 1);
}

#[test]
fn test_trigger_fires_player_projectile() {
    let mut engine = open_engine(SimConfig::default());
    run_to_live_combat(&mut engine);
    let full = engine.player().loadout.active_ammo();
    engine.set_intent(InputIntent {
        fire: true,
        aim: Vec3::X,
        ..Default::default()
    });

    let snapshot = engine.tick(DT);
    assert_eq!(snapshot.hud.ammo, full - 1);
    let player_shots = snapshot
        .projectiles
        .iter()
        .filter(|p| p.faction == Faction::Player)
        .count();
    assert_eq!(player_shots, 1);
}

#[test]
fn test_trigger_ignored_before_combat_live() {
    let mut engine = open_engine(SimConfig::default());
    engine.start_game();
    let full = engine.player().loadout.active_ammo();
    engine.set_intent(InputIntent {
        fire: true,
        aim: Vec3::X,
        ..Default::default()
    });

    // Through prep and into activation, trigger held the whole time.
    let (_, events) = run_until(&mut engine, 400, |s| s.phase.phase == GamePhase::Combat);
    let snapshot = engine.tick(DT);
    assert!(!snapshot.phase.combat_live);
    assert_eq!(snapshot.hud.ammo, full);
    assert!(snapshot.projectiles.is_empty());
    assert!(!events.iter().any(|e| matches!(
        e,
        SimEvent::ShotFired {
            faction: Faction::Player,
            ..
        }
    )));
}

// ---- Progression ----

#[test]
fn test_cleared_round_offers_pickups_then_next_round() {
    let mut engine = open_engine(SimConfig::default());
    run_to_live_combat(&mut engine);
    engine.kill_all_enemies();

    let snapshot = engine.tick(DT);
    assert_eq!(snapshot.phase.phase, GamePhase::Intermission);
    assert_eq!(snapshot.pickups.len(), 1);
    assert_eq!(snapshot.pickups[0].kind, PickupKind::Health);
    assert!(snapshot
        .events
        .contains(&SimEvent::IntermissionRemaining { secs: 8 }));

    run_until(&mut engine, 600, |s| s.phase.phase == GamePhase::PrepCountdown);
    assert_eq!(engine.session().global_round, 2);
    assert_eq!(engine.session().round_in_arena, 2);
    assert_eq!(engine.enemy_count(), enemy_count_for(2, 1) as usize);
    assert!(!engine.arena().gate_open());
}

#[test]
fn test_last_round_swaps_arena() {
    let mut engine = open_engine(SimConfig {
        rounds_per_arena: 1,
        ..Default::default()
    });
    run_to_live_combat(&mut engine);
    engine.kill_all_enemies();

    let (_, events) = run_until(&mut engine, 600, |s| s.phase.phase == GamePhase::PrepCountdown);
    let phases: Vec<GamePhase> = events
        .iter()
        .filter_map(|e| match e {
            SimEvent::PhaseChanged { phase, .. } => Some(*phase),
            _ => None,
        })
        .collect();
    assert_eq!(
        phases,
        vec![
            GamePhase::RoundEnd,
            GamePhase::ArenaGateOpen,
            GamePhase::ArenaSwap,
            GamePhase::PrepCountdown,
        ]
    );
    assert!(events.contains(&SimEvent::ArenaLoaded { floor: 2 }));

    let session = engine.session();
    assert_eq!(session.floor, 2);
    assert_eq!(session.round_in_arena, 1);
    assert_eq!(session.global_round, 2);
    assert_eq!(engine.arena().floor, 2);
    assert_eq!(engine.player().position, open_arena().player_spawn);
    assert_eq!(engine.enemy_count(), enemy_count_for(2, 2) as usize);
}

#[test]
fn test_death_leads_to_reset() {
    let mut engine = open_engine(SimConfig::default());
    run_to_live_combat(&mut engine);
    engine.player_mut().health = 0;

    let snapshot = engine.tick(DT);
    assert_eq!(snapshot.phase.phase, GamePhase::GameOver);
    assert!(snapshot.events.contains(&SimEvent::GameOver));

    let (ticks, events) = run_until(&mut engine, 600, |s| s.phase.phase == GamePhase::Idle);
    assert!((195..=200).contains(&ticks), "game over lasted {ticks} ticks");
    assert!(events.contains(&SimEvent::ScreenBlank));
    assert!(events.contains(&SimEvent::SessionReset));
    assert_eq!(engine.time().tick, 0);

    assert_eq!(engine.enemy_count(), 0);
    assert_eq!(engine.session().kills, 0);
    assert_eq!(engine.session().global_round, 1);
    assert_eq!(engine.player().health, engine.player().max_health);
    assert!(!engine.player().loadout.is_unlocked(WeaponKind::Shotgun));
}

#[test]
fn test_input_frozen_during_game_over() {
    let mut engine = open_engine(SimConfig::default());
    run_to_live_combat(&mut engine);
    engine.player_mut().health = 0;
    engine.tick(DT);

    engine.set_intent(InputIntent {
        forward: true,
        fire: true,
        ..Default::default()
    });
    let before = engine.player().position;
    let snapshot = engine.tick(DT);
    assert_eq!(engine.player().position, before);
    assert!(snapshot.projectiles.is_empty());
}

// ---- AI ----

#[test]
fn test_pursuers_never_patrol_in_live_combat() {
    let mut engine = SimulationEngine::new(SimConfig {
        seed: 7,
        ..Default::default()
    });
    run_to_live_combat(&mut engine);

    let mut pursuers_seen = false;
    for _ in 0..900 {
        let snapshot = engine.tick(DT);
        if !snapshot.phase.combat_live {
            break;
        }
        for enemy in snapshot.enemies.iter().filter(|e| e.role == EnemyRole::Pursuer) {
            pursuers_seen = true;
            assert_ne!(enemy.state, AiState::Patrol, "pursuer {} patrolled", enemy.id);
        }
    }
    assert!(pursuers_seen);
}

#[test]
fn test_pursuers_chase_on_first_live_tick_behind_wall() {
    let mut arena = open_arena();
    // Blocks sight between the spawn nodes and the safe room for the whole prep.
    arena.obstacles.push(Obstacle::new(
        1,
        Aabb::new(Vec3::new(-100.0, 0.0, 29.5), Vec3::new(100.0, 8.0, 30.5)),
    ));
    let mut engine = SimulationEngine::with_provider(
        SimConfig::default(),
        Box::new(StaticArenaProvider::new(arena)),
    );
    engine.start_game();

    let mut first_live = None;
    run_until(&mut engine, 600, |s| {
        if s.phase.combat_live {
            first_live = Some(s.clone());
        }
        s.phase.combat_live
    });
    let first_live = first_live.unwrap();
    let next = engine.tick(DT);

    for snapshot in [&first_live, &next] {
        let pursuers: Vec<_> = snapshot
            .enemies
            .iter()
            .filter(|e| e.role == EnemyRole::Pursuer)
            .collect();
        assert!(!pursuers.is_empty());
        for enemy in pursuers {
            assert_eq!(enemy.state, AiState::Chase, "pursuer {} left chase", enemy.id);
        }
    }
}

#[test]
fn test_enemies_hold_during_prep() {
    let mut engine = open_engine(SimConfig::default());
    let start = engine.tick(DT);
    assert!(start.enemies.is_empty());

    engine.start_game();
    let first = engine.tick(DT);
    for _ in 0..60 {
        engine.tick(DT);
    }
    let later = engine.tick(DT);
    for (a, b) in first.enemies.iter().zip(later.enemies.iter()) {
        assert_eq!(a.position, b.position, "enemy {} moved during prep", a.id);
    }
    assert!(later.projectiles.is_empty());
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });
    let intent = InputIntent {
        forward: true,
        fire: true,
        aim: Vec3::new(0.2, 0.0, 1.0),
        ..Default::default()
    };

    engine_a.queue_command(PlayerCommand::StartGame);
    engine_b.queue_command(PlayerCommand::StartGame);
    engine_a.set_intent(intent);
    engine_b.set_intent(intent);

    for _ in 0..600 {
        let snap_a = engine_a.tick(DT);
        let snap_b = engine_b.tick(DT);

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 111,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 222,
        ..Default::default()
    });

    engine_a.queue_command(PlayerCommand::StartGame);
    engine_b.queue_command(PlayerCommand::StartGame);

    // Different seeds produce different arenas and spawn jitter.
    let json_a = serde_json::to_string(&engine_a.tick(DT)).unwrap();
    let json_b = serde_json::to_string(&engine_b.tick(DT)).unwrap();
    assert_ne!(json_a, json_b);
}

#[test]
fn test_time_scale_and_delta_cap() {
    let mut engine = open_engine(SimConfig::default());
    engine.start_game();

    engine.tick(5.0);
    let capped = engine.time().elapsed_secs;
    assert!((capped - SimConfig::default().max_tick_delta_secs).abs() < 1e-9);

    engine.set_time_scale(0.0);
    assert_eq!(engine.time_scale(), 0.0);
    engine.tick(DT);
    assert_eq!(engine.time().elapsed_secs, capped);

    engine.tick(f64::NAN);
    assert_eq!(engine.time().elapsed_secs, capped);
}
