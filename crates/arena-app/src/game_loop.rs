//! Game loop thread: runs the simulation engine at `TICK_RATE` and publishes snapshots.
//!
//! The engine is created inside this thread so it never crosses a lock.
//! Commands arrive via `mpsc` channel. Snapshots are handed to a sink and
//! stored in shared state for synchronous polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use arena_core::constants::TICK_RATE;
use arena_core::state::GameStateSnapshot;
use arena_sim::engine::{SimConfig, SimulationEngine};

use crate::state::GameLoopCommand;

/// Nominal duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Receives every snapshot the loop produces (renderer, HUD, recorder).
pub type SnapshotSink = Box<dyn FnMut(&GameStateSnapshot) + Send>;

/// Start the loop on a named thread. The engine is built on that thread
/// from `config`.
pub fn spawn_game_loop(
    config: SimConfig,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    sink: SnapshotSink,
) -> (mpsc::Sender<GameLoopCommand>, JoinHandle<()>) {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("arena-game-loop".into())
        .spawn(move || {
            let engine = SimulationEngine::new(config);
            run_game_loop(engine, cmd_rx, &latest_snapshot, sink);
        })
        .expect("Failed to spawn game loop thread");

    (cmd_tx, handle)
}

/// Forward every pending command to the engine. Returns false once the
/// loop should stop (Shutdown or channel disconnect).
fn drain_commands(engine: &mut SimulationEngine, cmd_rx: &mpsc::Receiver<GameLoopCommand>) -> bool {
    loop {
        match cmd_rx.try_recv() {
            Ok(GameLoopCommand::PlayerCommand(cmd)) => engine.queue_command(cmd),
            Ok(GameLoopCommand::Intent(intent)) => engine.set_intent(intent),
            Ok(GameLoopCommand::Shutdown) => return false,
            Err(mpsc::TryRecvError::Empty) => return true,
            Err(mpsc::TryRecvError::Disconnected) => return false,
        }
    }
}

/// Tick at a fixed cadence until told to stop or the sender side is dropped.
fn run_game_loop(
    mut engine: SimulationEngine,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
    mut sink: SnapshotSink,
) {
    log::info!("game loop started at {TICK_RATE} Hz");
    let mut next_tick_time = Instant::now();
    let mut last_tick = Instant::now();

    loop {
        if !drain_commands(&mut engine, &cmd_rx) {
            break;
        }

        // Real elapsed time; the engine scales and caps it.
        let now = Instant::now();
        let delta = now.duration_since(last_tick).as_secs_f64();
        last_tick = now;
        let snapshot = engine.tick(delta);

        sink(&snapshot);

        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind; reset to avoid catch-up spiral
            next_tick_time = now;
        }
    }

    log::info!("game loop stopped at tick {}", engine.time().tick);
}
