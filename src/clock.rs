//! Background clock that ticks a shared engine.
//!
//! The clock thread sends `Command::Tick` through the engine's mutex once per
//! `GameConfig::tick_interval`. Ticks go through the same `dispatch` as every
//! other command, so they serialize with player moves. Paused or finished
//! games reject the tick and the clock simply carries on.
//!
//! Stopping is prompt: `stop` (or dropping the clock) wakes the thread
//! through a channel instead of waiting out the current interval.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};

use crate::core::rng::TileSource;
use crate::engine::Engine;
use crate::store::KeyValueStore;

/// Handle to a running clock thread.
pub struct Clock {
    stopped: Arc<AtomicBool>,
    wake: Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl Clock {
    /// Start ticking `engine` at its configured interval.
    pub fn start<T, S>(engine: Arc<Mutex<Engine<T, S>>>) -> io::Result<Self>
    where
        T: TileSource + Send + 'static,
        S: KeyValueStore + Send + 'static,
    {
        let interval = engine
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .config()
            .tick_interval;
        let stopped = Arc::new(AtomicBool::new(false));
        let (wake, wakeup) = mpsc::channel::<()>();

        let flag = Arc::clone(&stopped);
        let handle = thread::Builder::new()
            .name("just-divide-clock".into())
            .spawn(move || loop {
                match wakeup.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {}
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
                if flag.load(Ordering::Acquire) {
                    break;
                }
                let mut guard = match engine.lock() {
                    Ok(guard) => guard,
                    Err(_) => {
                        log::warn!("engine mutex poisoned, clock stopping");
                        break;
                    }
                };
                // Rejected while paused or over; that is the intended no-op.
                let _ = guard.tick();
            })?;

        log::debug!("clock started, interval {:?}", interval);
        Ok(Self {
            stopped,
            wake,
            handle: Some(handle),
        })
    }

    /// Check if the clock thread is still running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.stopped.load(Ordering::Acquire)
            && self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop the clock and wait for its thread to exit. Idempotent.
    pub fn stop(&mut self) {
        self.stopped.store(true, Ordering::Release);
        // The receiver may already be gone if the thread exited on its own.
        let _ = self.wake.send(());
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!("clock thread panicked");
            }
            log::debug!("clock stopped");
        }
    }
}

impl Drop for Clock {
    fn drop(&mut self) {
        self.stop();
    }
}
