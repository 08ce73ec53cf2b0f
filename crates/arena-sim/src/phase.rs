//! Round/phase state machine.
//!
//! `advance` is a pure transition function over `PhaseState`. It never
//! touches the world: anything a transition implies (spawning, clearing,
//! toggling the gate, loading the next arena) is described by the returned
//! `PhaseTransition` and applied by the engine.

use arena_core::constants::*;
use arena_core::enums::{GameOverStage, GamePhase};

/// Current phase with its countdown timer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseState {
    pub phase: GamePhase,
    /// Seconds remaining in a timed phase. Zero while combat is live.
    pub timer: f64,
    /// Whole seconds shown to the player (prep countdown, intermission).
    pub countdown: u32,
    /// COMBAT entered and the activation delay has elapsed.
    pub combat_live: bool,
    pub game_over_stage: GameOverStage,
}

impl Default for PhaseState {
    fn default() -> Self {
        Self::enter(GamePhase::Idle, 0.0)
    }
}

impl PhaseState {
    fn enter(phase: GamePhase, timer: f64) -> Self {
        Self {
            phase,
            timer,
            countdown: display_secs(timer),
            combat_live: false,
            game_over_stage: GameOverStage::default(),
        }
    }

    /// AI and enemy fire respond to the player only in this sub-state.
    pub fn is_live_combat(&self) -> bool {
        self.phase == GamePhase::Combat && self.combat_live
    }
}

/// What the phase machine needs to know about the world this tick.
#[derive(Debug, Clone, Copy)]
pub struct PhaseInput {
    pub delta: f64,
    pub enemies_remaining: usize,
    pub player_dead: bool,
    /// The current round is the last one in this arena.
    pub arena_complete: bool,
}

/// Side effects the engine must apply after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseTransition {
    /// IDLE → PREP_COUNTDOWN: fresh session, floor 1 loaded, enemies spawned.
    GameStarted,
    /// PREP_COUNTDOWN → COMBAT (inactive): gate opens.
    CombatEntered,
    /// Activation delay elapsed: pickups cleared, objective updated.
    CombatLive,
    /// Round cleared with rounds left in this arena.
    IntermissionStarted,
    /// Last round of this arena cleared.
    RoundEndStarted,
    /// INTERMISSION → PREP_COUNTDOWN: counters advance, enemies respawn.
    NextRound,
    /// ROUND_END → ARENA_GATE_OPEN.
    GateOpened,
    /// ARENA_GATE_OPEN → ARENA_SWAP.
    ArenaSwapStarted,
    /// ARENA_SWAP → PREP_COUNTDOWN: floor advances, next arena loads.
    ArenaSwapped,
    /// Player died in live combat: simulation freezes, transients cleared.
    GameOverStarted,
    /// Game-over feedback done, blanking transition begins.
    ScreenBlank,
    /// Blanking done: full session reset, back to IDLE.
    SessionReset,
}

/// Result of one phase evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseStep {
    pub state: PhaseState,
    pub transition: Option<PhaseTransition>,
    /// The whole-second display value changed.
    pub countdown_changed: bool,
}

impl PhaseStep {
    fn stay(state: PhaseState, countdown_changed: bool) -> Self {
        Self {
            state,
            transition: None,
            countdown_changed,
        }
    }

    fn to(state: PhaseState, transition: PhaseTransition) -> Self {
        Self {
            state,
            transition: Some(transition),
            countdown_changed: false,
        }
    }
}

/// Leave IDLE. Returns `None` from any other phase.
pub fn start_game(state: &PhaseState) -> Option<PhaseStep> {
    if state.phase != GamePhase::Idle {
        return None;
    }
    Some(PhaseStep::to(
        PhaseState::enter(GamePhase::PrepCountdown, PREP_COUNTDOWN_SECS),
        PhaseTransition::GameStarted,
    ))
}

/// Advance the phase machine by `input.delta` seconds. At most one
/// transition happens per call; a new phase's timer starts fresh.
pub fn advance(state: &PhaseState, input: &PhaseInput) -> PhaseStep {
    if state.is_live_combat() && input.player_dead {
        return PhaseStep::to(
            PhaseState::enter(GamePhase::GameOver, GAME_OVER_FEEDBACK_SECS),
            PhaseTransition::GameOverStarted,
        );
    }

    match state.phase {
        GamePhase::Idle => PhaseStep::stay(*state, false),
        GamePhase::PrepCountdown => countdown(state, input.delta, |_| {
            PhaseStep::to(
                PhaseState::enter(GamePhase::Combat, COMBAT_ACTIVATION_SECS),
                PhaseTransition::CombatEntered,
            )
        }),
        GamePhase::Combat if !state.combat_live => {
            let timer = state.timer - input.delta;
            if timer <= 0.0 {
                let live = PhaseState {
                    timer: 0.0,
                    countdown: 0,
                    combat_live: true,
                    ..*state
                };
                PhaseStep::to(live, PhaseTransition::CombatLive)
            } else {
                PhaseStep::stay(PhaseState { timer, ..*state }, false)
            }
        }
        GamePhase::Combat => {
            if input.enemies_remaining > 0 {
                return PhaseStep::stay(*state, false);
            }
            if input.arena_complete {
                PhaseStep::to(
                    PhaseState::enter(GamePhase::RoundEnd, ROUND_END_SECS),
                    PhaseTransition::RoundEndStarted,
                )
            } else {
                PhaseStep::to(
                    PhaseState::enter(GamePhase::Intermission, INTERMISSION_SECS),
                    PhaseTransition::IntermissionStarted,
                )
            }
        }
        GamePhase::Intermission => countdown(state, input.delta, |_| {
            PhaseStep::to(
                PhaseState::enter(GamePhase::PrepCountdown, PREP_COUNTDOWN_SECS),
                PhaseTransition::NextRound,
            )
        }),
        GamePhase::RoundEnd => countdown(state, input.delta, |_| {
            PhaseStep::to(
                PhaseState::enter(GamePhase::ArenaGateOpen, ARENA_GATE_OPEN_SECS),
                PhaseTransition::GateOpened,
            )
        }),
        GamePhase::ArenaGateOpen => countdown(state, input.delta, |_| {
            PhaseStep::to(
                PhaseState::enter(GamePhase::ArenaSwap, ARENA_SWAP_SECS),
                PhaseTransition::ArenaSwapStarted,
            )
        }),
        GamePhase::ArenaSwap => countdown(state, input.delta, |_| {
            PhaseStep::to(
                PhaseState::enter(GamePhase::PrepCountdown, PREP_COUNTDOWN_SECS),
                PhaseTransition::ArenaSwapped,
            )
        }),
        GamePhase::GameOver => countdown(state, input.delta, |s| match s.game_over_stage {
            GameOverStage::Feedback => PhaseStep::to(
                PhaseState {
                    game_over_stage: GameOverStage::Blanking,
                    ..PhaseState::enter(GamePhase::GameOver, GAME_OVER_BLANK_SECS)
                },
                PhaseTransition::ScreenBlank,
            ),
            GameOverStage::Blanking => PhaseStep::to(
                PhaseState::enter(GamePhase::Idle, 0.0),
                PhaseTransition::SessionReset,
            ),
        }),
    }
}

/// Decrement a timed phase and hand off to `on_expiry` at zero.
fn countdown<F>(state: &PhaseState, delta: f64, on_expiry: F) -> PhaseStep
where
    F: FnOnce(&PhaseState) -> PhaseStep,
{
    let timer = state.timer - delta;
    if timer <= 0.0 {
        return on_expiry(state);
    }
    let shown = display_secs(timer);
    let next = PhaseState {
        timer,
        countdown: shown,
        ..*state
    };
    PhaseStep::stay(next, shown != state.countdown)
}

/// Whole seconds remaining, rounded up.
fn display_secs(timer: f64) -> u32 {
    timer.max(0.0).ceil() as u32
}
