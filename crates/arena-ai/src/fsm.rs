//! Enemy behavior finite state machine.
//!
//! Pure functions that compute state transitions, a movement intent and a
//! fire decision for one enemy from its current state and situation.
//! Operates on plain data with no ECS dependency.

use arena_core::config::AiTuning;
use arena_core::enums::{AiState, EnemyRole};

use crate::profiles::{role_profile, RoleProfile};

/// How an enemy wants to move this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveIntent {
    /// Stay put.
    Hold,
    /// Walk toward the current patrol waypoint.
    FollowRoute,
    /// Move toward the player.
    Approach,
    /// Move directly away from the player.
    Retreat,
    /// Move toward the reposition target.
    Reposition,
}

impl MoveIntent {
    /// Fraction of base speed used for this intent.
    pub fn speed_factor(self, tuning: &AiTuning) -> f32 {
        match self {
            MoveIntent::Hold => 0.0,
            MoveIntent::FollowRoute => tuning.patrol_speed_factor,
            MoveIntent::Approach => 1.0,
            MoveIntent::Retreat => tuning.retreat_speed_factor,
            MoveIntent::Reposition => tuning.reposition_speed_factor,
        }
    }
}

/// Input to the enemy FSM for a single entity.
#[derive(Debug, Clone, Copy)]
pub struct AiContext {
    pub role: EnemyRole,
    pub state: AiState,
    pub distance_to_player: f32,
    /// Line of sight from eye height to the player's eye this tick.
    pub has_los: bool,
    pub now_ms: f64,
    pub last_seen_ms: f64,
    pub weapon_range: f32,
    /// Steering found no clear heading on the previous tick.
    pub blocked: bool,
    /// Distance to the current reposition target, if one is set.
    pub reposition_target_distance: Option<f32>,
    /// Whether the combat phase is live.
    pub combat_live: bool,
}

impl AiContext {
    fn ms_since_seen(&self) -> f64 {
        self.now_ms - self.last_seen_ms
    }

    fn in_engage_range(&self, tuning: &AiTuning) -> bool {
        self.distance_to_player <= self.weapon_range * tuning.engage_range_factor
    }
}

/// Output from the enemy FSM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiDecision {
    pub new_state: AiState,
    pub state_changed: bool,
    pub movement: MoveIntent,
    /// Fire if the per-enemy cooldown allows it.
    pub fire: bool,
    /// A fresh reposition target must be drawn.
    pub pick_reposition_target: bool,
}

struct Step {
    state: AiState,
    movement: MoveIntent,
    fire: bool,
    pick_target: bool,
}

impl Step {
    fn moving(state: AiState, movement: MoveIntent) -> Self {
        Self {
            state,
            movement,
            fire: false,
            pick_target: false,
        }
    }

    fn reposition() -> Self {
        Self {
            state: AiState::Reposition,
            movement: MoveIntent::Reposition,
            fire: false,
            pick_target: true,
        }
    }
}

/// Evaluate the FSM for one enemy. At most one transition happens per call.
pub fn evaluate(ctx: &AiContext, tuning: &AiTuning) -> AiDecision {
    let profile = role_profile(ctx.role);

    let step = if !ctx.combat_live {
        evaluate_dormant(ctx, &profile)
    } else {
        // Non-patrolling roles never sit in PATROL while combat is live.
        let state = if ctx.state == AiState::Patrol && !profile.patrols {
            AiState::Chase
        } else {
            ctx.state
        };
        match state {
            AiState::Patrol => evaluate_patrol(ctx, tuning),
            AiState::Chase => evaluate_chase(ctx, tuning),
            AiState::Engage => evaluate_engage(ctx, tuning),
            AiState::Reposition => evaluate_reposition(ctx, tuning, &profile),
        }
    };

    AiDecision {
        new_state: step.state,
        state_changed: step.state != ctx.state,
        movement: step.movement,
        fire: step.fire,
        pick_reposition_target: step.pick_target,
    }
}

/// Outside live combat: patrollers reset to PATROL, everyone else freezes.
fn evaluate_dormant(ctx: &AiContext, profile: &RoleProfile) -> Step {
    let state = if profile.patrols {
        AiState::Patrol
    } else {
        ctx.state
    };
    Step::moving(state, MoveIntent::Hold)
}

fn evaluate_patrol(ctx: &AiContext, tuning: &AiTuning) -> Step {
    if ctx.has_los && ctx.distance_to_player < tuning.detection_range {
        return Step::moving(AiState::Chase, MoveIntent::Approach);
    }
    Step::moving(AiState::Patrol, MoveIntent::FollowRoute)
}

fn evaluate_chase(ctx: &AiContext, tuning: &AiTuning) -> Step {
    if ctx.has_los && ctx.in_engage_range(tuning) {
        return engage_behavior(ctx, tuning);
    }

    let lost = !ctx.has_los && ctx.ms_since_seen() > tuning.los_reposition_ms;
    if lost || ctx.blocked {
        return Step::reposition();
    }

    Step::moving(AiState::Chase, MoveIntent::Approach)
}

fn evaluate_engage(ctx: &AiContext, tuning: &AiTuning) -> Step {
    if !ctx.has_los {
        let since = ctx.ms_since_seen();
        // The longer timeout wins when both have elapsed.
        if since > tuning.los_reposition_ms {
            return Step::reposition();
        }
        if since > tuning.los_revert_ms {
            return Step::moving(AiState::Chase, MoveIntent::Approach);
        }
    }
    engage_behavior(ctx, tuning)
}

fn evaluate_reposition(ctx: &AiContext, tuning: &AiTuning, profile: &RoleProfile) -> Step {
    // Sight and range regained mid-transit overrides the arrival check.
    if ctx.has_los && ctx.in_engage_range(tuning) {
        return engage_behavior(ctx, tuning);
    }

    let arrived = ctx
        .reposition_target_distance
        .map(|d| d <= tuning.arrive_radius)
        .unwrap_or(true);
    if arrived {
        return if profile.patrols {
            Step::moving(AiState::Patrol, MoveIntent::FollowRoute)
        } else {
            Step::moving(AiState::Chase, MoveIntent::Approach)
        };
    }

    // Stuck short of the target: pick a fresh one.
    if ctx.blocked {
        return Step::reposition();
    }

    Step::moving(AiState::Reposition, MoveIntent::Reposition)
}

/// ENGAGE spacing and fire decision.
fn engage_behavior(ctx: &AiContext, tuning: &AiTuning) -> Step {
    let distance = ctx.distance_to_player;
    let movement = if distance < tuning.min_engage_distance {
        MoveIntent::Retreat
    } else if distance > ctx.weapon_range * tuning.max_engage_factor {
        MoveIntent::Approach
    } else {
        MoveIntent::Hold
    };
    let fire = ctx.has_los && distance < ctx.weapon_range + tuning.fire_range_buffer;

    Step {
        state: AiState::Engage,
        movement,
        fire,
        pick_target: false,
    }
}

/// Whether an enemy's cooldown has elapsed.
pub fn can_fire(last_fire_ms: Option<f64>, now_ms: f64, interval_ms: f64) -> bool {
    match last_fire_ms {
        Some(last) => now_ms - last >= interval_ms,
        None => true,
    }
}
