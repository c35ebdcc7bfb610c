//! Braintree-backed PayPal tokenization.
//!
//! [`BraintreePayPal`] loads the Braintree web SDK scripts, walks the client
//! handshake (core client, device data collector, PayPal client) and, once
//! ready, exchanges PayPal payloads for backend-issued tokens. Every outcome is
//! reported on the [`EventStream`] returned at construction.

pub mod barrier;
pub mod emitter;
pub mod handler;
pub mod lifecycle;
pub mod loader;
pub mod transport;

#[cfg(test)]
mod testing;

pub use barrier::ReadinessBarrier;
pub use emitter::{Emitter, EventStream};
pub use handler::{BraintreePayPal, Collaborators};
pub use lifecycle::Lifecycle;
pub use loader::ScriptLoading;
pub use transport::{HttpTransport, TOKEN_ROUTE, exchange_token};
