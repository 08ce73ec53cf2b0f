//! Control surface used by the host (input collaborator, HUD, headless driver).
//!
//! These functions bridge host requests to the game loop thread via channels.

use arena_core::commands::{InputIntent, PlayerCommand};
use arena_core::state::GameStateSnapshot;
use arena_sim::engine::SimConfig;

use crate::game_loop::{self, SnapshotSink};
use crate::state::{AppState, GameLoopCommand};

#[derive(Debug, thiserror::Error)]
pub enum ControlError {
    #[error("simulation already running")]
    AlreadyRunning,

    #[error("simulation not started")]
    NotStarted,

    #[error("game loop is gone")]
    Disconnected,

    #[error("shared state lock poisoned")]
    Poisoned,
}

/// Start the simulation. Spawns the game loop thread if not already running.
pub fn start_simulation(
    state: &AppState,
    config: SimConfig,
    sink: SnapshotSink,
) -> Result<(), ControlError> {
    let mut running = state.running.lock().map_err(|_| ControlError::Poisoned)?;

    if *running {
        return Err(ControlError::AlreadyRunning);
    }

    let (cmd_tx, handle) = game_loop::spawn_game_loop(config, state.latest_snapshot.clone(), sink);

    *state.command_tx.lock().map_err(|_| ControlError::Poisoned)? = Some(cmd_tx);
    *state.loop_thread.lock().map_err(|_| ControlError::Poisoned)? = Some(handle);
    *running = true;

    Ok(())
}

fn send(state: &AppState, command: GameLoopCommand) -> Result<(), ControlError> {
    let tx_lock = state.command_tx.lock().map_err(|_| ControlError::Poisoned)?;

    match tx_lock.as_ref() {
        Some(tx) => tx.send(command).map_err(|_| ControlError::Disconnected),
        None => Err(ControlError::NotStarted),
    }
}

/// Send a discrete player command to the simulation.
pub fn send_command(state: &AppState, command: PlayerCommand) -> Result<(), ControlError> {
    send(state, GameLoopCommand::PlayerCommand(command))
}

/// Replace the held movement/aim/trigger state.
pub fn send_intent(state: &AppState, intent: InputIntent) -> Result<(), ControlError> {
    send(state, GameLoopCommand::Intent(intent))
}

/// Get the latest snapshot synchronously (for polling / initial state).
pub fn get_snapshot(state: &AppState) -> Result<Option<GameStateSnapshot>, ControlError> {
    let lock = state
        .latest_snapshot
        .lock()
        .map_err(|_| ControlError::Poisoned)?;
    Ok(lock.clone())
}

/// Stop the game loop and wait for its thread to exit.
pub fn stop_simulation(state: &AppState) -> Result<(), ControlError> {
    let mut running = state.running.lock().map_err(|_| ControlError::Poisoned)?;
    if !*running {
        return Err(ControlError::NotStarted);
    }

    // A loop that already exited has dropped its receiver; nothing to tell it.
    let _ = send(state, GameLoopCommand::Shutdown);
    state
        .command_tx
        .lock()
        .map_err(|_| ControlError::Poisoned)?
        .take();

    let handle = state
        .loop_thread
        .lock()
        .map_err(|_| ControlError::Poisoned)?
        .take();
    if let Some(handle) = handle {
        if handle.join().is_err() {
            log::error!("game loop thread panicked");
        }
    }

    *running = false;
    Ok(())
}
