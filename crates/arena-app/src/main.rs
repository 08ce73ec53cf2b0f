//! Headless driver: runs the game loop with a simple auto-aim bot standing
//! in for the input collaborator, then prints the final HUD as JSON.
//!
//! Usage: `arena-headless [--config <path.json>] [--seconds <n>]`

use std::process::ExitCode;
use std::time::{Duration, Instant};

use glam::Vec3;

use arena_app::control;
use arena_app::state::AppState;
use arena_core::commands::{InputIntent, PlayerCommand};
use arena_core::constants::{ENEMY_HIT_CENTER_OFFSET, PLAYER_EYE_HEIGHT};
use arena_core::events::SimEvent;
use arena_core::state::GameStateSnapshot;
use arena_sim::engine::SimConfig;

const DEFAULT_SECONDS: u64 = 30;
const POLL_INTERVAL: Duration = Duration::from_millis(50);

struct Args {
    config: Option<String>,
    seconds: u64,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        config: None,
        seconds: DEFAULT_SECONDS,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                args.config = Some(iter.next().ok_or("--config needs a path")?);
            }
            "--seconds" => {
                let value = iter.next().ok_or("--seconds needs a value")?;
                args.seconds = value
                    .parse()
                    .map_err(|_| format!("invalid --seconds value `{value}`"))?;
            }
            other => return Err(format!("unknown argument `{other}`")),
        }
    }
    Ok(args)
}

fn load_config(path: Option<&str>) -> Result<SimConfig, String> {
    let Some(path) = path else {
        return Ok(SimConfig::default());
    };
    let json = std::fs::read_to_string(path).map_err(|e| format!("{path}: {e}"))?;
    SimConfig::from_json_str(&json).map_err(|e| format!("{path}: {e}"))
}

/// Aim at the nearest enemy and hold the trigger once combat is live.
fn bot_intent(snapshot: &GameStateSnapshot) -> InputIntent {
    let eye = snapshot.player.position + Vec3::Y * PLAYER_EYE_HEIGHT;
    let target = snapshot
        .enemies
        .iter()
        .map(|e| e.position + Vec3::Y * ENEMY_HIT_CENTER_OFFSET)
        .min_by(|a, b| a.distance(eye).total_cmp(&b.distance(eye)));

    match target {
        Some(target) => InputIntent {
            fire: snapshot.phase.combat_live,
            aim: (target - eye).normalize_or(Vec3::Z),
            ..Default::default()
        },
        None => InputIntent::default(),
    }
}

fn log_events(snapshot: &GameStateSnapshot) {
    for event in &snapshot.events {
        match event {
            SimEvent::PhaseChanged { phase, combat_live } => {
                log::info!("phase {phase:?} (combat live: {combat_live})");
            }
            SimEvent::RoundBanner { text, .. } => log::info!("{text}"),
            SimEvent::Notice { text } => log::info!("notice: {text}"),
            SimEvent::GameOver => log::info!("game over"),
            other => log::trace!("{other:?}"),
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };
    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            log::error!("failed to load config: {err}");
            return ExitCode::FAILURE;
        }
    };
    log::info!("seed {} for {}s", config.seed, args.seconds);

    let state = AppState::new();
    let sink = Box::new(log_events);
    if let Err(err) = control::start_simulation(&state, config, sink) {
        log::error!("{err}");
        return ExitCode::FAILURE;
    }
    if let Err(err) = control::send_command(&state, PlayerCommand::StartGame) {
        log::error!("{err}");
        return ExitCode::FAILURE;
    }

    let deadline = Instant::now() + Duration::from_secs(args.seconds);
    let mut last = None;
    while Instant::now() < deadline {
        std::thread::sleep(POLL_INTERVAL);
        match control::get_snapshot(&state) {
            Ok(Some(snapshot)) => {
                if let Err(err) = control::send_intent(&state, bot_intent(&snapshot)) {
                    log::warn!("{err}");
                    break;
                }
                last = Some(snapshot);
            }
            Ok(None) => {}
            Err(err) => {
                log::warn!("{err}");
                break;
            }
        }
    }

    if let Err(err) = control::stop_simulation(&state) {
        log::warn!("{err}");
    }

    if let Some(snapshot) = last {
        match serde_json::to_string_pretty(&snapshot.hud) {
            Ok(json) => println!("{json}"),
            Err(err) => log::error!("failed to serialize HUD: {err}"),
        }
    }
    ExitCode::SUCCESS
}
