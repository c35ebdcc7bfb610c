//! Outward event surface of a PayPal flow.

use crate::{BackendToken, PayPalError};

/// One outward-visible outcome.
///
/// Every `start()` produces exactly one of these. Initialization failures are
/// reported as [`PayPalEvent::Error`].
#[derive(Debug, Clone)]
pub enum PayPalEvent {
    /// The backend issued a token.
    Token(BackendToken),
    /// The user dismissed the PayPal popup. Never classified as an error.
    Cancel,
    Error(PayPalError),
}

impl PayPalEvent {
    /// The event name callers subscribe to (`token`, `cancel`, `error`).
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Token(_) => "token",
            Self::Cancel => "cancel",
            Self::Error(_) => "error",
        }
    }
}

impl From<PayPalError> for PayPalEvent {
    fn from(e: PayPalError) -> Self {
        Self::Error(e)
    }
}
