//! Values exchanged during tokenization.

use serde::{Deserialize, Serialize};

/// Braintree checkout flow requested from the PayPal client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flow {
    /// Billing-agreement flow: the resulting nonce can be stored for reuse.
    Vault,
}

/// Options passed to [`PayPalClient::tokenize`](crate::PayPalClient::tokenize).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizeOptions {
    pub flow: Flow,
}

impl TokenizeOptions {
    #[must_use]
    pub fn vault() -> Self {
        Self { flow: Flow::Vault }
    }
}

/// Options passed when creating the device data collector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataCollectorOptions {
    /// Collect PayPal-specific device data.
    pub paypal: bool,
}

/// The short-lived payload Braintree returns from a PayPal tokenization.
///
/// Only valid as input to the backend exchange; never surfaced to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenizePayload {
    pub nonce: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub details: serde_json::Value,
}

/// The durable token the backend issues in exchange for a [`TokenizePayload`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendToken {
    pub id: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}
