//! Application state shared between the control layer and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use arena_core::commands::{InputIntent, PlayerCommand};
use arena_core::state::GameStateSnapshot;

/// Messages accepted by the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// Queued on the engine for the next tick boundary.
    PlayerCommand(PlayerCommand),
    /// Replace the held input state.
    Intent(InputIntent),
    /// Stop ticking and let the thread exit.
    Shutdown,
}

/// Host-side handles to a running simulation. Every field sits behind a
/// `Mutex` so the struct can be shared across host threads; the snapshot
/// slot is additionally `Arc`'d into the loop thread.
pub struct AppState {
    /// Set by `start_simulation`, cleared by `stop_simulation`.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Overwritten by the loop after every tick.
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    /// Game loop thread, joined on stop.
    pub loop_thread: Mutex<Option<JoinHandle<()>>>,
    pub running: Mutex<bool>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            loop_thread: Mutex::new(None),
            running: Mutex::new(false),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
