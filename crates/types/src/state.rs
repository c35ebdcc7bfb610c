//! Initialization lifecycle of the Braintree client chain.

use serde::Serialize;
use std::fmt;

/// Where a handler is in its load → create → create → create chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InitState {
    Unloaded,
    /// Scripts requested; waiting for the readiness barrier.
    Loading,
    ClientCreated,
    CollectorCreated,
    Ready,
    Failed,
}

impl InitState {
    /// `Ready` and `Failed` never change once reached.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Ready | Self::Failed)
    }

    /// Whether moving from `self` to `next` is a legal transition.
    ///
    /// The forward chain advances one step at a time, and `Failed` is reachable
    /// from every non-terminal state.
    #[must_use]
    pub fn can_transition_to(self, next: InitState) -> bool {
        if self.is_terminal() {
            return false;
        }
        matches!(
            (self, next),
            (_, Self::Failed)
                | (Self::Unloaded, Self::Loading)
                | (Self::Loading, Self::ClientCreated)
                | (Self::ClientCreated, Self::CollectorCreated)
                | (Self::CollectorCreated, Self::Ready)
        )
    }
}

impl fmt::Display for InitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Unloaded => "unloaded",
            Self::Loading => "loading",
            Self::ClientCreated => "client_created",
            Self::CollectorCreated => "collector_created",
            Self::Ready => "ready",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [InitState; 6] = [
        InitState::Unloaded,
        InitState::Loading,
        InitState::ClientCreated,
        InitState::CollectorCreated,
        InitState::Ready,
        InitState::Failed,
    ];

    #[test]
    fn test_forward_chain() {
        assert!(InitState::Unloaded.can_transition_to(InitState::Loading));
        assert!(InitState::Loading.can_transition_to(InitState::ClientCreated));
        assert!(InitState::ClientCreated.can_transition_to(InitState::CollectorCreated));
        assert!(InitState::CollectorCreated.can_transition_to(InitState::Ready));
    }

    #[test]
    fn test_no_skipping_steps() {
        assert!(!InitState::Unloaded.can_transition_to(InitState::Ready));
        assert!(!InitState::Loading.can_transition_to(InitState::Ready));
        assert!(!InitState::Loading.can_transition_to(InitState::CollectorCreated));
        assert!(!InitState::ClientCreated.can_transition_to(InitState::Ready));
    }

    #[test]
    fn test_failed_reachable_from_non_terminal() {
        for s in ALL.into_iter().filter(|s| !s.is_terminal()) {
            assert!(s.can_transition_to(InitState::Failed), "{s} -> failed");
        }
    }

    #[test]
    fn test_terminal_states_are_final() {
        for next in ALL {
            assert!(!InitState::Ready.can_transition_to(next));
            assert!(!InitState::Failed.can_transition_to(next));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(InitState::CollectorCreated.to_string(), "collector_created");
        assert_eq!(InitState::Ready.to_string(), "ready");
    }
}
