//! Process-wide network subsystem reference count.
//!
//! Every live [`Connection`](crate::Connection) holds one [`SubsystemGuard`].
//! The first acquisition initializes the subsystem and dropping the last
//! guard tears it down. The count sits behind a single lock so that
//! concurrent connects and disconnects cannot interleave an init with a
//! teardown.
//!
//! The standard library's socket layer initializes itself on every
//! supported target, so init and teardown here are bookkeeping: they are
//! counted and logged, and the live count is observable through
//! [`Subsystem::active`].

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::error::{Result, TransportError};

static GLOBAL: Subsystem = Subsystem::new();

#[derive(Debug, Default)]
struct State {
    active: usize,
    initializations: u64,
}

/// A reference-counted network subsystem.
#[derive(Debug)]
pub struct Subsystem {
    state: Mutex<State>,
}

impl Subsystem {
    const fn new() -> Self {
        Self {
            state: Mutex::new(State {
                active: 0,
                initializations: 0,
            }),
        }
    }

    /// The process-wide subsystem used by [`connect`](crate::connect).
    pub fn global() -> &'static Subsystem {
        &GLOBAL
    }

    /// Take one reference, initializing the subsystem if it was idle.
    pub fn acquire(&'static self) -> Result<SubsystemGuard> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| TransportError::SubsystemUnavailable("subsystem lock poisoned".into()))?;

        let next = state.active.checked_add(1).ok_or_else(|| {
            TransportError::SubsystemUnavailable("subsystem reference count overflow".into())
        })?;
        if state.active == 0 {
            state.initializations += 1;
            debug!(
                generation = state.initializations,
                "initializing network subsystem"
            );
        }
        state.active = next;

        Ok(SubsystemGuard { owner: self })
    }

    /// Number of live guards.
    pub fn active(&self) -> usize {
        self.lock_recovering().active
    }

    /// How many times the subsystem went from idle to initialized.
    pub fn initializations(&self) -> u64 {
        self.lock_recovering().initializations
    }

    fn release(&self) {
        let mut state = self.lock_recovering();
        state.active = state.active.saturating_sub(1);
        if state.active == 0 {
            debug!("tearing down network subsystem");
        }
    }

    // Release must run even while a panic is unwinding, so poisoning is ignored.
    fn lock_recovering(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// One reference on a [`Subsystem`]. Released on drop.
#[derive(Debug)]
pub struct SubsystemGuard {
    owner: &'static Subsystem,
}

impl Drop for SubsystemGuard {
    fn drop(&mut self) {
        self.owner.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refcount_tracks_guards() {
        static SUBSYSTEM: Subsystem = Subsystem::new();

        assert_eq!(SUBSYSTEM.active(), 0);
        let first = SUBSYSTEM.acquire().unwrap();
        let second = SUBSYSTEM.acquire().unwrap();
        assert_eq!(SUBSYSTEM.active(), 2);
        assert_eq!(SUBSYSTEM.initializations(), 1);

        drop(first);
        assert_eq!(SUBSYSTEM.active(), 1);
        drop(second);
        assert_eq!(SUBSYSTEM.active(), 0);
    }

    #[test]
    fn reinitializes_after_teardown() {
        static SUBSYSTEM: Subsystem = Subsystem::new();

        drop(SUBSYSTEM.acquire().unwrap());
        drop(SUBSYSTEM.acquire().unwrap());
        assert_eq!(SUBSYSTEM.initializations(), 2);
        assert_eq!(SUBSYSTEM.active(), 0);
    }

    #[test]
    fn concurrent_acquire_release_balances() {
        static SUBSYSTEM: Subsystem = Subsystem::new();

        let workers: Vec<_> = (0..8)
            .map(|_| {
                std::thread::spawn(|| {
                    for _ in 0..100 {
                        let guard = SUBSYSTEM.acquire().unwrap();
                        assert!(SUBSYSTEM.active() >= 1);
                        drop(guard);
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        assert_eq!(SUBSYSTEM.active(), 0);
    }
}
