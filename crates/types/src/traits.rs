//! Async traits for the collaborators a Braintree PayPal flow depends on.
//!
//! The handler only ever talks to these seams, so the script loader, the
//! Braintree SDK and the backend can each be swapped for a stub in tests.

use crate::{
    BackendError, DataCollectorOptions, LoadFailure, PayPalOptions, SdkError, TokenizeOptions,
    TokenizePayload,
};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Fetches and executes a remote script.
///
/// The returned future settles exactly once. Callers must verify the expected
/// post-conditions themselves; a successful load does not guarantee the
/// script installed anything.
#[async_trait]
pub trait ScriptLoader: Send + Sync {
    async fn load(&self, url: &str) -> Result<(), LoadFailure>;
}

/// Source of the Braintree SDK namespace populated by the loaded scripts.
pub trait SdkProvider: Send + Sync {
    /// The SDK, or `None` if the scripts did not install it.
    fn sdk(&self) -> Option<Arc<dyn BraintreeSdk>>;
}

/// Opaque Braintree core client.
pub trait Client: Send + Sync {}

/// Opaque Braintree device data collector.
pub trait DataCollector: Send + Sync {}

/// The Braintree factory functions, one per sub-client.
#[async_trait]
pub trait BraintreeSdk: Send + Sync {
    /// `braintree.client.create`
    async fn create_client(&self, authorization: &str) -> Result<Arc<dyn Client>, SdkError>;

    /// `braintree.dataCollector.create`
    async fn create_data_collector(
        &self,
        client: Arc<dyn Client>,
        options: DataCollectorOptions,
    ) -> Result<Arc<dyn DataCollector>, SdkError>;

    /// `braintree.paypal.create`
    async fn create_paypal(&self, client: Arc<dyn Client>)
    -> Result<Arc<dyn PayPalClient>, SdkError>;
}

/// The Braintree PayPal client.
#[async_trait]
pub trait PayPalClient: Send + Sync {
    /// Open the PayPal popup and tokenize the resulting account.
    async fn tokenize(&self, options: TokenizeOptions) -> Result<TokenizePayload, SdkError>;
}

/// Request transport to the backend API.
#[async_trait]
pub trait BackendTransport: Send + Sync {
    /// Send `body` to `route` and return the decoded JSON response.
    async fn request(
        &self,
        method: http::Method,
        route: &str,
        body: Value,
    ) -> Result<Value, BackendError>;
}

/// A user-triggered PayPal flow.
#[async_trait]
pub trait PayPalFlow: Send + Sync {
    /// Start the flow. Must run on the call chain of a user interaction.
    async fn start(&self);
}

/// Builds the degraded, non-Braintree PayPal flow.
pub trait FallbackFactory: Send + Sync {
    fn create(&self, options: PayPalOptions) -> Box<dyn PayPalFlow>;
}
