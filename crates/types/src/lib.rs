//! Core types and traits for the paybridge workspace.
//!
//! This crate defines the shared vocabulary of the Braintree PayPal
//! integration: the error record surfaced to callers, the event surface, the
//! tokens exchanged along the way, the caller-supplied options, and the async
//! traits each external collaborator implements.

pub mod error;
pub mod event;
pub mod options;
pub mod state;
pub mod token;
pub mod traits;

pub use error::{
    BackendError, ErrorContext, ErrorReport, FactoryError, LoadFailure, PayPalError, SdkError,
};
pub use event::PayPalEvent;
pub use options::{BraintreeOptions, PayPalOptions};
pub use state::InitState;
pub use token::{BackendToken, DataCollectorOptions, Flow, TokenizeOptions, TokenizePayload};
pub use traits::{
    BackendTransport, BraintreeSdk, Client, DataCollector, FallbackFactory, PayPalClient,
    PayPalFlow, ScriptLoader, SdkProvider,
};

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, PayPalError>;
