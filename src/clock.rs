/// The game clock: a background thread that raises a tick signal at a fixed
/// interval for as long as the player has lives left.
///
/// `Signal` is a pure rendezvous — raising it is never blocking and nothing
/// is queued or counted. A waiter parks until the *next* raise after it
/// arrived, which is exactly the pacing contract the round loop needs.
///
/// Shutdown is cooperative: the clock thread re-checks the shared lives
/// counter before every sleep and exits once it hits zero, so stopping costs
/// at most one extra tick interval. The consumer must never wait on the
/// signal after lives reach zero; the round loop guarantees this by checking
/// liveness before each wait (lives only drop on the round loop's own
/// thread).

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use parking_lot::{Condvar, Mutex};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClockError {
    /// Starting an already-running clock is a programmer error.
    #[error("game clock already running")]
    AlreadyRunning,
}

/// Single-producer/single-consumer tick rendezvous.
#[derive(Debug)]
pub struct Signal {
    generation: Mutex<u64>,
    raised: Condvar,
}

impl Signal {
    pub fn new() -> Signal {
        Signal {
            generation: Mutex::new(0),
            raised: Condvar::new(),
        }
    }

    /// Wake the waiter, if any. Never blocks; a raise with nobody waiting
    /// is simply lost (a tick is a moment, not a message).
    pub fn raise(&self) {
        let mut generation = self.generation.lock();
        *generation = generation.wrapping_add(1);
        self.raised.notify_all();
    }

    /// Block until the next raise after this call.
    pub fn wait(&self) {
        let mut generation = self.generation.lock();
        let seen = *generation;
        while *generation == seen {
            self.raised.wait(&mut generation);
        }
    }
}

impl Default for Signal {
    fn default() -> Self {
        Signal::new()
    }
}

/// Owns the background tick thread across one game.
pub struct GameClock {
    signal: Arc<Signal>,
    worker: Option<thread::JoinHandle<()>>,
}

impl GameClock {
    pub fn new() -> GameClock {
        GameClock {
            signal: Arc::new(Signal::new()),
            worker: None,
        }
    }

    /// Spawn the tick thread: sleep `tick_ms`, raise, repeat while `lives`
    /// stays positive.
    pub fn start(&mut self, tick_ms: u64, lives: Arc<AtomicI32>) -> Result<Arc<Signal>, ClockError> {
        if self.worker.is_some() {
            return Err(ClockError::AlreadyRunning);
        }
        let signal = Arc::clone(&self.signal);
        let handle = thread::spawn(move || {
            while lives.load(Ordering::Acquire) > 0 {
                thread::sleep(Duration::from_millis(tick_ms));
                signal.raise();
            }
            log::debug!("game clock stopped");
        });
        self.worker = Some(handle);
        Ok(Arc::clone(&self.signal))
    }

    /// Block until the tick thread has observed the lives counter at zero
    /// and exited. After joining, the clock may be started again.
    pub fn join(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Default for GameClock {
    fn default() -> Self {
        GameClock::new()
    }
}
