//! Single publication point for [`PayPalEvent`]s.

use paybridge_types::PayPalEvent;
use tokio::sync::mpsc;

/// Receiving half handed to the caller at construction.
pub type EventStream = mpsc::UnboundedReceiver<PayPalEvent>;

/// Publishes events to the caller's [`EventStream`].
///
/// Emitting after the stream has been dropped is a no-op.
#[derive(Debug, Clone)]
pub struct Emitter {
    tx: mpsc::UnboundedSender<PayPalEvent>,
}

impl Emitter {
    /// Create an emitter together with the stream it feeds.
    #[must_use]
    pub fn channel() -> (Self, EventStream) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn emit(&self, event: PayPalEvent) {
        tracing::debug!(event = event.name(), "emitting event");
        if self.tx.send(event).is_err() {
            tracing::debug!("event stream dropped, event discarded");
        }
    }
}
