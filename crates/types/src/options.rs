//! Caller-supplied options for a PayPal flow.

use crate::BackendTransport;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{fmt, sync::Arc};

/// Braintree-specific options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BraintreeOptions {
    /// Braintree client token or tokenization key.
    #[serde(default)]
    pub client_authorization: Option<String>,
}

impl BraintreeOptions {
    pub fn new(client_authorization: impl Into<String>) -> Self {
        Self {
            client_authorization: Some(client_authorization.into()),
        }
    }
}

/// Options a PayPal flow is constructed from.
///
/// Kept verbatim by the Braintree handler so a degraded flow can be built
/// from the same input later on.
#[derive(Clone)]
pub struct PayPalOptions {
    /// Backend request transport used for the token exchange.
    pub transport: Arc<dyn BackendTransport>,
    pub braintree: Option<BraintreeOptions>,
    /// Everything else the caller passed; opaque to this crate.
    pub extra: Map<String, Value>,
}

impl PayPalOptions {
    pub fn new(transport: Arc<dyn BackendTransport>) -> Self {
        Self {
            transport,
            braintree: None,
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn with_braintree(mut self, braintree: BraintreeOptions) -> Self {
        self.braintree = Some(braintree);
        self
    }

    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// The Braintree client authorization, if present and non-empty.
    #[must_use]
    pub fn client_authorization(&self) -> Option<&str> {
        self.braintree
            .as_ref()
            .and_then(|b| b.client_authorization.as_deref())
            .filter(|a| !a.is_empty())
    }

    /// A copy with the Braintree sub-structure removed and everything else untouched.
    #[must_use]
    pub fn without_braintree(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            braintree: None,
            extra: self.extra.clone(),
        }
    }
}

impl fmt::Debug for PayPalOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PayPalOptions")
            .field("braintree", &self.braintree)
            .field("extra", &self.extra)
            .finish_non_exhaustive()
    }
}
