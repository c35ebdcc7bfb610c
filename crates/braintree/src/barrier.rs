//! Fixed-arity fan-in latch.
//!
//! A [`ReadinessBarrier`] waits for `N` independent completions and then runs
//! a single continuation. Arrival order does not matter; the continuation runs
//! on the arrival that brings the count to zero and never again.

use std::sync::{Mutex, PoisonError};

struct State<F> {
    remaining: usize,
    continuation: Option<F>,
}

pub struct ReadinessBarrier<F: FnOnce()> {
    state: Mutex<State<F>>,
}

impl<F: FnOnce()> ReadinessBarrier<F> {
    /// Create a barrier that fires `continuation` after `arity` arrivals.
    ///
    /// An arity of zero fires immediately.
    pub fn new(arity: usize, continuation: F) -> Self {
        if arity == 0 {
            continuation();
            return Self {
                state: Mutex::new(State {
                    remaining: 0,
                    continuation: None,
                }),
            };
        }
        Self {
            state: Mutex::new(State {
                remaining: arity,
                continuation: Some(continuation),
            }),
        }
    }

    /// Record one completion.
    ///
    /// Returns `true` only for the arrival that fired the continuation.
    /// Arrivals after the barrier has fired are ignored.
    pub fn arrive(&self) -> bool {
        let continuation = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if state.remaining == 0 {
                return false;
            }
            state.remaining -= 1;
            if state.remaining > 0 {
                return false;
            }
            state.continuation.take()
        };
        // Run outside the lock so the continuation may touch the barrier.
        match continuation {
            Some(f) => {
                f();
                true
            }
            None => false,
        }
    }

    /// Arrivals still outstanding.
    pub fn remaining(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remaining
    }

    pub fn has_fired(&self) -> bool {
        self.remaining() == 0
    }
}
