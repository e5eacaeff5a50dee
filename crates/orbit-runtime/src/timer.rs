#![forbid(unsafe_code)]

//! Periodic background ticker with prompt, lock-based shutdown.
//!
//! The ticker thread sleeps on a condition variable rather than
//! `thread::sleep`, so [`Ticker::stop`] wakes it immediately instead of
//! waiting out the rest of the period.

use std::io;
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

type Flag = Arc<(Mutex<bool>, Condvar)>;

/// Receiving side of a stop request.
#[derive(Clone)]
pub struct StopSignal {
    inner: Flag,
}

impl StopSignal {
    /// Create a signal and the trigger that sets it.
    pub fn new() -> (Self, StopTrigger) {
        let inner: Flag = Arc::new((Mutex::new(false), Condvar::new()));
        let trigger = StopTrigger {
            inner: Arc::clone(&inner),
        };
        (Self { inner }, trigger)
    }

    pub fn is_stopped(&self) -> bool {
        let (lock, _) = &*self.inner;
        *lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Block until stopped or `duration` elapses.
    ///
    /// Returns `true` if stopped. Spurious wakeups do not end the wait early.
    pub fn wait_timeout(&self, duration: Duration) -> bool {
        let (lock, cvar) = &*self.inner;
        let mut stopped = lock.lock().unwrap_or_else(PoisonError::into_inner);
        let start = Instant::now();
        loop {
            if *stopped {
                return true;
            }
            let Some(remaining) = duration.checked_sub(start.elapsed()) else {
                return false;
            };
            if remaining.is_zero() {
                return false;
            }
            let (guard, _) = cvar
                .wait_timeout(stopped, remaining)
                .unwrap_or_else(PoisonError::into_inner);
            stopped = guard;
        }
    }
}

impl Default for StopSignal {
    fn default() -> Self {
        Self::new().0
    }
}

/// Sending side of a stop request.
pub struct StopTrigger {
    inner: Flag,
}

impl StopTrigger {
    pub fn stop(&self) {
        let (lock, cvar) = &*self.inner;
        let mut stopped = lock.lock().unwrap_or_else(PoisonError::into_inner);
        *stopped = true;
        cvar.notify_all();
    }
}

/// A thread calling a closure once per period until stopped.
pub struct Ticker {
    trigger: StopTrigger,
    thread: Option<thread::JoinHandle<()>>,
}

impl Ticker {
    /// Spawn the ticker. The first call happens one `period` after start.
    ///
    /// # Errors
    ///
    /// Returns an error if the thread cannot be spawned.
    pub fn start<F>(name: &str, period: Duration, mut on_tick: F) -> io::Result<Self>
    where
        F: FnMut() + Send + 'static,
    {
        let (signal, trigger) = StopSignal::new();
        let thread = thread::Builder::new()
            .name(name.to_owned())
            .spawn(move || {
                while !signal.wait_timeout(period) {
                    on_tick();
                }
                orbit_core::trace!("ticker stopped");
            })?;
        Ok(Self {
            trigger,
            thread: Some(thread),
        })
    }

    /// Stop the thread and wait for it to exit.
    pub fn stop(mut self) {
        self.trigger.stop();
        if let Some(handle) = self.thread.take() {
            if handle.join().is_err() {
                orbit_core::warn!("ticker thread panicked");
            }
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        // Dropping without `stop` does not join.
        self.trigger.stop();
    }
}
