//! Single current-state field for the initialization chain.

use paybridge_types::InitState;
use tokio::sync::watch;

/// Holds the handler's [`InitState`] and rejects illegal transitions.
///
/// Once `Ready` or `Failed` is reached the state never changes again.
#[derive(Debug)]
pub struct Lifecycle {
    tx: watch::Sender<InitState>,
}

impl Lifecycle {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(InitState::Unloaded);
        Self { tx }
    }

    #[must_use]
    pub fn current(&self) -> InitState {
        *self.tx.borrow()
    }

    /// Move to `next` if that is a legal transition from the current state.
    ///
    /// Returns whether the state changed.
    pub fn advance(&self, next: InitState) -> bool {
        let changed = self.tx.send_if_modified(|state| {
            if state.can_transition_to(next) {
                *state = next;
                true
            } else {
                false
            }
        });
        if changed {
            tracing::debug!(state = %next, "lifecycle advanced");
        } else {
            tracing::warn!(from = %self.current(), to = %next, "illegal lifecycle transition ignored");
        }
        changed
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<InitState> {
        self.tx.subscribe()
    }

    /// Wait until the state is terminal and return it.
    pub async fn settled(&self) -> InitState {
        let mut rx = self.subscribe();
        match rx.wait_for(|s| s.is_terminal()).await {
            Ok(state) => *state,
            Err(_) => self.current(),
        }
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}
