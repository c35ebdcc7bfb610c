//! Error records surfaced by the Braintree PayPal integration.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error code Braintree reports when the user dismisses the PayPal popup.
pub const POPUP_CLOSED_CODE: &str = "PAYPAL_POPUP_CLOSED";

/// Enumerates every failure the integration reports to its caller.
///
/// Each variant carries the context relevant to its kind; [`PayPalError::code`]
/// yields the stable identifier callers match on.
#[derive(Debug, Clone, Error)]
pub enum PayPalError {
    /// A required option was not supplied at construction.
    #[error("missing required option: {opt}")]
    ConfigMissing { opt: String },

    /// The Braintree libraries finished loading but did not install the SDK.
    #[error("Braintree client libraries failed to load")]
    LoadError,

    /// Creating one of the Braintree sub-clients failed.
    #[error("Braintree API error: {0}")]
    ApiError(#[source] SdkError),

    /// Braintree rejected the PayPal tokenization.
    #[error("Braintree tokenization failed: {0}")]
    TokenizeBraintree(#[source] SdkError),

    /// The backend rejected the token exchange.
    #[error("token exchange failed: {0}")]
    TokenizeRecurly(#[source] BackendError),

    /// `start()` was called before initialization completed.
    #[error("Braintree PayPal is not ready")]
    NotReady,

    /// The handler was constructed outside a Tokio runtime.
    #[error("no Tokio runtime available to load Braintree")]
    RuntimeUnavailable,
}

impl PayPalError {
    /// The stable error kind identifier.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigMissing { .. } => "paypal-config-missing",
            Self::LoadError => "paypal-braintree-load-error",
            Self::ApiError(_) => "paypal-braintree-api-error",
            Self::TokenizeBraintree(_) => "paypal-braintree-tokenize-braintree-error",
            Self::TokenizeRecurly(_) => "paypal-braintree-tokenize-recurly-error",
            Self::NotReady => "paypal-braintree-not-ready",
            Self::RuntimeUnavailable => "paypal-braintree-runtime-unavailable",
        }
    }

    /// Build an error record from its kind identifier and context.
    ///
    /// Kinds without a payload ignore the context.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::UnknownKind`] for an unrecognised `code` and
    /// [`FactoryError::MissingContext`] when the kind needs a payload the
    /// context does not carry.
    pub fn from_kind(code: &str, context: ErrorContext) -> Result<Self, FactoryError> {
        let missing = |expected| FactoryError::MissingContext {
            code: code.to_string(),
            expected,
        };
        match (code, context) {
            ("paypal-config-missing", ErrorContext::Option(opt)) => Ok(Self::ConfigMissing { opt }),
            ("paypal-config-missing", _) => Err(missing("option path")),
            ("paypal-braintree-load-error", _) => Ok(Self::LoadError),
            ("paypal-braintree-api-error", ErrorContext::Sdk(e)) => Ok(Self::ApiError(e)),
            ("paypal-braintree-tokenize-braintree-error", ErrorContext::Sdk(e)) => {
                Ok(Self::TokenizeBraintree(e))
            }
            ("paypal-braintree-api-error" | "paypal-braintree-tokenize-braintree-error", _) => {
                Err(missing("Braintree error"))
            }
            ("paypal-braintree-tokenize-recurly-error", ErrorContext::Backend(e)) => {
                Ok(Self::TokenizeRecurly(e))
            }
            ("paypal-braintree-tokenize-recurly-error", _) => Err(missing("backend error")),
            ("paypal-braintree-not-ready", _) => Ok(Self::NotReady),
            ("paypal-braintree-runtime-unavailable", _) => Ok(Self::RuntimeUnavailable),
            (other, _) => Err(FactoryError::UnknownKind(other.to_string())),
        }
    }

    /// The underlying Braintree error, if this record carries one.
    #[must_use]
    pub fn sdk_error(&self) -> Option<&SdkError> {
        match self {
            Self::ApiError(e) | Self::TokenizeBraintree(e) => Some(e),
            _ => None,
        }
    }
}

/// Context attached to an error kind when building it by name.
#[derive(Debug, Clone, Default)]
pub enum ErrorContext {
    #[default]
    None,
    /// Path of the offending option.
    Option(String),
    Sdk(SdkError),
    Backend(BackendError),
}

impl From<SdkError> for ErrorContext {
    fn from(e: SdkError) -> Self {
        Self::Sdk(e)
    }
}

impl From<BackendError> for ErrorContext {
    fn from(e: BackendError) -> Self {
        Self::Backend(e)
    }
}

/// Failure to build a [`PayPalError`] from a kind identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FactoryError {
    #[error("unknown error kind: {0}")]
    UnknownKind(String),

    #[error("error kind {code} requires a {expected}")]
    MissingContext { code: String, expected: &'static str },
}

/// An error handed to the error channel: either a finished record or a kind
/// identifier plus context still to be built.
#[derive(Debug, Clone)]
pub enum ErrorReport {
    Record(PayPalError),
    Kind { code: String, context: ErrorContext },
}

impl ErrorReport {
    /// Resolve the report into an error record.
    ///
    /// # Errors
    ///
    /// Propagates [`PayPalError::from_kind`] failures for unbuildable kinds.
    pub fn into_error(self) -> Result<PayPalError, FactoryError> {
        match self {
            Self::Record(err) => Ok(err),
            Self::Kind { code, context } => PayPalError::from_kind(&code, context),
        }
    }
}

impl From<PayPalError> for ErrorReport {
    fn from(err: PayPalError) -> Self {
        Self::Record(err)
    }
}

impl From<&str> for ErrorReport {
    fn from(code: &str) -> Self {
        Self::Kind {
            code: code.to_string(),
            context: ErrorContext::None,
        }
    }
}

impl<C: Into<ErrorContext>> From<(&str, C)> for ErrorReport {
    fn from((code, context): (&str, C)) -> Self {
        Self::Kind {
            code: code.to_string(),
            context: context.into(),
        }
    }
}

/// An error raised by the third-party Braintree layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SdkError {
    /// Braintree error code, e.g. `PAYPAL_POPUP_CLOSED`.
    #[serde(default)]
    pub code: Option<String>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl fmt::Display for SdkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "[{code}] {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for SdkError {}

impl SdkError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            details: None,
        }
    }

    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Return `true` if the user closed the PayPal popup.
    #[must_use]
    pub fn is_popup_closed(&self) -> bool {
        self.code.as_deref() == Some(POPUP_CLOSED_CODE)
    }
}

/// Failure reported by the backend transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// Transport-level failure (connect, TLS, timeout).
    #[error("http error: {0}")]
    Http(String),

    /// The backend answered with an error object.
    #[error("api error: code={code}, message={message}")]
    Api { code: String, message: String },

    /// The backend answered with something that is not a token.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

#[cfg(feature = "rquest")]
impl From<rquest::Error> for BackendError {
    fn from(e: rquest::Error) -> Self {
        Self::Http(e.to_string())
    }
}

/// A script that could not be fetched or executed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadFailure {
    #[error("failed to load {url}: {reason}")]
    Failed { url: String, reason: String },

    #[error("timed out loading {url}")]
    TimedOut { url: String },
}
