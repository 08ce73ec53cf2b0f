//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world and the session, processes
//! player commands, advances the phase machine, runs all systems, and
//! produces `GameStateSnapshot`s. Completely headless, enabling
//! deterministic testing.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use arena_core::arena::ArenaMap;
use arena_core::commands::{InputIntent, PlayerCommand};
use arena_core::components::{AiMemory, Enemy, Player};
use arena_core::constants::ROUND_BANNER_SECS;
use arena_core::enums::{Faction, GamePhase};
use arena_core::events::SimEvent;
use arena_core::state::GameStateSnapshot;
use arena_core::types::SimTime;

pub use arena_core::config::SimConfig;

use crate::arena_gen::{ArenaProvider, ProceduralArenaProvider};
use crate::phase::{self, PhaseInput, PhaseState, PhaseStep, PhaseTransition};
use crate::session::Session;
use crate::systems;
use crate::systems::enemy_ai::AiFrame;
use crate::systems::snapshot::SnapshotInputs;
use crate::systems::spawner::SpawnContext;
use crate::systems::telemetry::Telemetry;

const OBJECTIVE_IDLE: &str = "Press start";
const OBJECTIVE_PREP: &str = "Get ready";
const OBJECTIVE_BREACH: &str = "Leave the safe room";
const OBJECTIVE_COMBAT: &str = "Eliminate all hostiles";
const OBJECTIVE_INTERMISSION: &str = "Resupply before the next wave";
const OBJECTIVE_ROUND_END: &str = "Arena cleared";
const OBJECTIVE_GATE: &str = "Head through the gate";

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    config: SimConfig,
    time_scale: f64,
    rng: ChaCha8Rng,
    phase: PhaseState,
    session: Session,
    player: Player,
    intent: InputIntent,
    arena: ArenaMap,
    provider: Box<dyn ArenaProvider>,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<SimEvent>,
    next_enemy_id: u32,
    next_pickup_id: u32,
    next_visual: u64,
    objective: String,
    telemetry: Telemetry,
}

impl SimulationEngine {
    /// Create an engine that generates its arenas procedurally.
    pub fn new(config: SimConfig) -> Self {
        Self::with_provider(config, Box::new(ProceduralArenaProvider))
    }

    /// Create an engine with a custom arena source.
    pub fn with_provider(config: SimConfig, mut provider: Box<dyn ArenaProvider>) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let arena = load_arena(provider.as_mut(), 1, &mut rng);
        let player = Player::spawned_at(arena.player_spawn);

        Self {
            world: World::new(),
            time: SimTime::default(),
            time_scale: config.time_scale,
            config,
            rng,
            phase: PhaseState::default(),
            session: Session::default(),
            player,
            intent: InputIntent::default(),
            arena,
            provider,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            next_enemy_id: 0,
            next_pickup_id: 0,
            next_visual: 0,
            objective: OBJECTIVE_IDLE.to_string(),
            telemetry: Telemetry::default(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Latch the held input state read every tick until replaced.
    pub fn set_intent(&mut self, intent: InputIntent) {
        self.intent = intent;
    }

    /// Leave IDLE immediately. No-op in any other phase.
    pub fn start_game(&mut self) {
        if let Some(step) = phase::start_game(&self.phase) {
            self.apply_phase_step(step);
        }
    }

    /// Advance the simulation by `delta_secs` (scaled and capped) and return
    /// the resulting snapshot.
    pub fn tick(&mut self, delta_secs: f64) -> GameStateSnapshot {
        let delta = if delta_secs.is_finite() {
            (delta_secs * self.time_scale).clamp(0.0, self.config.max_tick_delta_secs)
        } else {
            0.0
        };

        self.process_commands();

        // Phase first: a phase entered this tick already gates the systems.
        if self.phase.phase != GamePhase::Idle {
            self.advance_phase(delta);
        }
        if self.phase.phase.accepts_player_input() {
            self.run_systems(delta);
        }
        if self.phase.phase != GamePhase::Idle {
            self.time.advance(delta);
        }

        self.telemetry =
            systems::telemetry::estimate(&self.player, &self.arena, self.time.now_ms());
        log::trace!(
            "tick {} {:?} enemies={} events={}",
            self.time.tick,
            self.phase.phase,
            self.enemy_count(),
            self.events.len()
        );

        let events = std::mem::take(&mut self.events);
        let inputs = SnapshotInputs {
            time: &self.time,
            phase: &self.phase,
            session: &self.session,
            player: &self.player,
            arena: &self.arena,
            telemetry: self.telemetry,
            objective: &self.objective,
        };
        systems::snapshot::build_snapshot(&self.world, &inputs, events)
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase.phase
    }

    pub fn phase_state(&self) -> PhaseState {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn set_time_scale(&mut self, scale: f64) {
        self.time_scale = scale.clamp(0.0, 4.0);
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn arena(&self) -> &ArenaMap {
        &self.arena
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Living enemies.
    pub fn enemy_count(&self) -> usize {
        self.world.query::<&Enemy>().iter().count()
    }

    #[cfg(test)]
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// Remove every enemy, as if the round had been won.
    #[cfg(test)]
    pub fn kill_all_enemies(&mut self) {
        systems::cleanup::clear_enemies(&mut self.world, &mut self.despawn_buffer);
    }

    /// Spawn an enemy at an exact position (for tests needing fixed geometry).
    #[cfg(test)]
    pub fn spawn_test_enemy(
        &mut self,
        role: arena_core::enums::EnemyRole,
        position: glam::Vec3,
    ) -> u32 {
        let id = self.next_enemy_id;
        self.next_enemy_id += 1;
        crate::world_setup::spawn_enemy(
            &mut self.world,
            crate::world_setup::EnemySpawn {
                id,
                role,
                position,
                patrol_route: None,
                now_ms: self.time.now_ms(),
            },
            &self.config.enemy,
            &self.session.scaling(),
        );
        id
    }

    /// Spawn a projectile with explicit ballistics. Returns its visual handle.
    #[cfg(test)]
    pub fn spawn_test_projectile(
        &mut self,
        faction: Faction,
        origin: glam::Vec3,
        direction: glam::Vec3,
        speed: f32,
        max_range: f32,
        damage: i32,
    ) -> u64 {
        let visual = self.next_visual;
        self.next_visual += 1;
        crate::world_setup::spawn_projectile(
            &mut self.world,
            crate::world_setup::make_projectile(
                faction, origin, direction, speed, max_range, damage, visual,
            ),
        );
        visual
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartGame => self.start_game(),
            _ if !self.phase.phase.accepts_player_input() => {
                log::trace!("input ignored in {:?}", self.phase.phase);
            }
            PlayerCommand::Reload => {
                if self.player.loadout.reload() {
                    self.events.push(SimEvent::Reloaded {
                        weapon: self.player.loadout.active,
                        ammo: self.player.loadout.active_ammo(),
                    });
                }
            }
            PlayerCommand::SwitchWeapon { weapon } => {
                match self.player.loadout.switch_to(&weapon) {
                    Ok(true) => self.events.push(SimEvent::WeaponSwitched {
                        weapon: self.player.loadout.active,
                    }),
                    Ok(false) => {}
                    Err(err) => {
                        log::debug!("weapon switch rejected: {err}");
                        self.events.push(SimEvent::WeaponLocked { weapon });
                        self.events.push(SimEvent::Notice {
                            text: err.to_string(),
                        });
                    }
                }
            }
            PlayerCommand::ToggleCrouch => {
                self.player.crouched = !self.player.crouched;
            }
            PlayerCommand::Jump => {
                systems::player::jump(&mut self.player, &mut self.events);
            }
        }
    }

    fn advance_phase(&mut self, delta: f64) {
        let input = PhaseInput {
            delta,
            enemies_remaining: self.enemy_count(),
            player_dead: self.player.is_dead(),
            arena_complete: self.session.arena_complete(self.config.rounds_per_arena),
        };
        let step = phase::advance(&self.phase, &input);
        self.apply_phase_step(step);
    }

    fn apply_phase_step(&mut self, step: PhaseStep) {
        let previous = self.phase;
        self.phase = step.state;

        if previous.phase != self.phase.phase || previous.combat_live != self.phase.combat_live {
            log::info!(
                "phase {:?} -> {:?} (combat live: {})",
                previous.phase,
                self.phase.phase,
                self.phase.combat_live
            );
            self.events.push(SimEvent::PhaseChanged {
                phase: self.phase.phase,
                combat_live: self.phase.combat_live,
            });
        }

        if let Some(transition) = step.transition {
            self.apply_transition(transition);
        }
        if step.countdown_changed {
            self.push_countdown();
        }
    }

    /// Apply the side effects of a phase transition.
    fn apply_transition(&mut self, transition: PhaseTransition) {
        match transition {
            PhaseTransition::GameStarted => {
                self.reset_session();
                self.load_floor();
                self.begin_round();
                self.events.push(SimEvent::CrosshairVisible { visible: true });
            }
            PhaseTransition::CombatEntered => {
                self.set_gate(true);
                self.set_objective(OBJECTIVE_BREACH);
            }
            PhaseTransition::CombatLive => {
                // Sight timers restart: enemies were frozen through prep.
                let now_ms = self.time.now_ms();
                for (_, memory) in self.world.query_mut::<&mut AiMemory>() {
                    memory.last_seen_ms = now_ms;
                }
                systems::cleanup::clear_pickups(&mut self.world, &mut self.despawn_buffer);
                self.set_objective(OBJECTIVE_COMBAT);
            }
            PhaseTransition::IntermissionStarted => {
                self.clear_projectiles(Some(Faction::Enemy));
                systems::pickups::spawn_intermission(
                    &mut self.world,
                    &self.arena,
                    &self.session,
                    &self.player,
                    &mut self.next_pickup_id,
                    &mut self.events,
                );
                self.set_objective(OBJECTIVE_INTERMISSION);
                self.push_countdown();
            }
            PhaseTransition::RoundEndStarted => {
                systems::cleanup::clear_pickups(&mut self.world, &mut self.despawn_buffer);
                self.clear_projectiles(Some(Faction::Enemy));
                self.set_objective(OBJECTIVE_ROUND_END);
            }
            PhaseTransition::NextRound => {
                self.session.advance_round();
                self.begin_round();
            }
            PhaseTransition::GateOpened => {
                self.set_gate(true);
                self.set_objective(OBJECTIVE_GATE);
            }
            PhaseTransition::ArenaSwapStarted => {
                self.events.push(SimEvent::Notice {
                    text: format!("Descending to floor {}", self.session.floor + 1),
                });
            }
            PhaseTransition::ArenaSwapped => {
                self.clear_projectiles(None);
                systems::cleanup::clear_pickups(&mut self.world, &mut self.despawn_buffer);
                systems::cleanup::clear_enemies(&mut self.world, &mut self.despawn_buffer);
                self.session.advance_floor();
                self.load_floor();
                self.begin_round();
            }
            PhaseTransition::GameOverStarted => {
                log::info!(
                    "game over on floor {} round {} with {} kills",
                    self.session.floor,
                    self.session.global_round,
                    self.session.kills
                );
                self.clear_projectiles(None);
                systems::cleanup::clear_pickups(&mut self.world, &mut self.despawn_buffer);
                self.events.push(SimEvent::GameOver);
                self.events.push(SimEvent::CrosshairVisible { visible: false });
            }
            PhaseTransition::ScreenBlank => {
                self.events.push(SimEvent::ScreenBlank);
            }
            PhaseTransition::SessionReset => {
                self.reset_session();
                self.set_objective(OBJECTIVE_IDLE);
                self.events.push(SimEvent::SessionReset);
            }
        }
    }

    /// Wipe the world and every per-session counter. Weapons re-lock.
    fn reset_session(&mut self) {
        self.clear_projectiles(None);
        self.world.clear();
        self.session = Session::default();
        self.player = Player::spawned_at(self.arena.player_spawn);
        self.intent = InputIntent::default();
        self.time = SimTime::default();
        self.next_enemy_id = 0;
        self.next_pickup_id = 0;
    }

    /// Load the arena for the session's floor and put the player at its spawn.
    fn load_floor(&mut self) {
        self.arena = load_arena(self.provider.as_mut(), self.session.floor, &mut self.rng);
        self.player.position = self.arena.player_spawn;
        self.player.vertical_velocity = 0.0;
        self.player.grounded = true;
        log::info!(
            "floor {} loaded: {} obstacles, {} spawn nodes",
            self.arena.floor,
            self.arena.obstacles.len(),
            self.arena.spawn_nodes.len()
        );
        self.events.push(SimEvent::ArenaLoaded {
            floor: self.arena.floor,
        });
    }

    /// Seal the safe room and spawn the round's enemies ahead of the countdown.
    fn begin_round(&mut self) {
        self.set_gate(false);
        systems::spawner::spawn_round(
            &mut self.world,
            &self.arena,
            &self.session,
            &self.config.enemy,
            self.time.now_ms(),
            SpawnContext {
                rng: &mut self.rng,
                next_enemy_id: &mut self.next_enemy_id,
                events: &mut self.events,
            },
        );
        self.events.push(SimEvent::RoundBanner {
            text: format!(
                "Floor {} - Round {}",
                self.session.floor, self.session.global_round
            ),
            duration_secs: ROUND_BANNER_SECS,
        });
        self.set_objective(OBJECTIVE_PREP);
        self.push_countdown();
    }

    fn clear_projectiles(&mut self, faction: Option<Faction>) {
        systems::cleanup::clear_projectiles(
            &mut self.world,
            faction,
            &mut self.events,
            &mut self.despawn_buffer,
        );
    }

    fn set_gate(&mut self, open: bool) {
        if self.arena.set_gate_open(open) {
            self.events.push(SimEvent::GateChanged { open });
        }
    }

    fn set_objective(&mut self, text: &str) {
        if self.objective != text {
            self.objective = text.to_string();
            self.events.push(SimEvent::ObjectiveChanged {
                text: self.objective.clone(),
            });
        }
    }

    fn push_countdown(&mut self) {
        let value = self.phase.countdown;
        match self.phase.phase {
            GamePhase::PrepCountdown => self.events.push(SimEvent::Countdown { value }),
            GamePhase::Intermission => {
                self.events.push(SimEvent::IntermissionRemaining { secs: value })
            }
            _ => {}
        }
    }

    /// Run all per-tick systems in order.
    fn run_systems(&mut self, delta: f64) {
        let dt = delta as f32;
        let now_ms = self.time.now_ms();

        // 1. Player movement
        systems::player::run(
            &mut self.player,
            &self.intent,
            &self.arena,
            dt,
            &mut self.events,
        );
        // 2. Player fire (live combat only)
        if self.phase.is_live_combat() {
            systems::player::fire(
                &mut self.world,
                &mut self.player,
                &self.intent,
                now_ms,
                &mut self.rng,
                &mut self.next_visual,
                &mut self.events,
            );
        }
        // 3. Enemy AI (movement, facing, fire)
        let frame = AiFrame {
            arena: &self.arena,
            player: &self.player,
            tuning: &self.config.ai,
            projectile_speed: self.config.enemy.projectile_speed,
            now_ms,
            delta: dt,
            combat_live: self.phase.is_live_combat(),
        };
        systems::enemy_ai::run(
            &mut self.world,
            &frame,
            &mut self.rng,
            &mut self.next_visual,
            &mut self.events,
        );
        // 4. Combat resolution
        systems::combat::run(
            &mut self.world,
            &self.arena,
            &mut self.player,
            &mut self.session,
            &mut self.events,
            &mut self.despawn_buffer,
        );
        // 5. Pickup collection
        systems::pickups::collect(
            &mut self.world,
            &mut self.player,
            &mut self.events,
            &mut self.despawn_buffer,
        );
        // 6. Cleanup (stray projectiles)
        systems::cleanup::run(
            &mut self.world,
            &self.arena,
            &mut self.events,
            &mut self.despawn_buffer,
        );
    }
}

/// Ask the provider for a floor. Malformed metadata is logged and used
/// anyway; affected operations degrade to no-ops.
fn load_arena(provider: &mut dyn ArenaProvider, floor: u32, rng: &mut ChaCha8Rng) -> ArenaMap {
    let arena = provider.load(floor, rng);
    if let Err(err) = arena.validate() {
        log::warn!("floor {floor} arena metadata is malformed: {err}");
    }
    arena
}
