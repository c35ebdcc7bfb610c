//! Braintree-specific PayPal handler.
//!
//! Construction validates the options and kicks off script loading in the
//! background. Once the scripts settle, the Braintree client chain is built
//! (core client → device data collector → PayPal client) and the handler
//! becomes ready. [`BraintreePayPal::start`] then runs the PayPal popup and
//! exchanges the resulting payload for a backend token.
//!
//! Every failure after construction is reported through one path: an
//! [`PayPalEvent::Error`] on the handler's [`EventStream`].

use crate::{Emitter, EventStream, Lifecycle, ScriptLoading, exchange_token};
use async_trait::async_trait;
use paybridge_config::{Config, ScriptSet};
use paybridge_types::{
    BackendTransport, DataCollectorOptions, ErrorReport, FactoryError, FallbackFactory, InitState,
    PayPalClient, PayPalError, PayPalEvent, PayPalFlow, PayPalOptions, Result, ScriptLoader,
    SdkProvider, TokenizeOptions,
};
use std::{
    sync::{
        Arc, OnceLock,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};
use tokio::{runtime::Handle, sync::watch};

/// Option path reported when the client authorization is missing.
const AUTHORIZATION_OPT: &str = "braintree.clientAuthorization";

/// External collaborators a [`BraintreePayPal`] is wired to.
#[derive(Clone)]
pub struct Collaborators {
    pub loader: Arc<dyn ScriptLoader>,
    pub sdk: Arc<dyn SdkProvider>,
    pub fallback: Arc<dyn FallbackFactory>,
    pub scripts: ScriptSet,
    /// Per-script load timeout; `None` waits indefinitely.
    pub load_timeout: Option<Duration>,
}

impl Collaborators {
    pub fn new(
        loader: Arc<dyn ScriptLoader>,
        sdk: Arc<dyn SdkProvider>,
        fallback: Arc<dyn FallbackFactory>,
    ) -> Self {
        Self {
            loader,
            sdk,
            fallback,
            scripts: ScriptSet::default(),
            load_timeout: None,
        }
    }

    /// Take script locations and the load timeout from `config`.
    #[must_use]
    pub fn with_config(mut self, config: &Config) -> Self {
        self.scripts = config.script_set();
        self.load_timeout = config.load_timeout();
        self
    }

    #[must_use]
    pub fn with_load_timeout(mut self, timeout: Duration) -> Self {
        self.load_timeout = Some(timeout);
        self
    }
}

/// PayPal flow backed by the Braintree web SDK.
pub struct BraintreePayPal {
    inner: Arc<Inner>,
}

struct Inner {
    authorization: String,
    options: PayPalOptions,
    transport: Arc<dyn BackendTransport>,
    sdk: Arc<dyn SdkProvider>,
    fallback: Arc<dyn FallbackFactory>,
    loading: ScriptLoading,
    lifecycle: Lifecycle,
    chain_started: AtomicBool,
    paypal: OnceLock<Arc<dyn PayPalClient>>,
    emitter: Emitter,
}

impl BraintreePayPal {
    /// Validate `options` and start loading the Braintree libraries.
    ///
    /// Returns the handler together with the stream every later outcome is
    /// reported on.
    ///
    /// # Errors
    ///
    /// Returns [`PayPalError::ConfigMissing`] if no non-empty
    /// `braintree.clientAuthorization` was supplied, and
    /// [`PayPalError::RuntimeUnavailable`] when called outside a Tokio
    /// runtime. Nothing is loaded in either case.
    pub fn new(options: PayPalOptions, collaborators: Collaborators) -> Result<(Self, EventStream)> {
        let authorization = options
            .client_authorization()
            .ok_or_else(|| PayPalError::ConfigMissing {
                opt: AUTHORIZATION_OPT.to_string(),
            })?
            .to_string();
        let runtime = Handle::try_current().map_err(|_| PayPalError::RuntimeUnavailable)?;

        let (emitter, events) = Emitter::channel();
        let inner = Arc::new(Inner {
            authorization,
            transport: Arc::clone(&options.transport),
            options,
            sdk: collaborators.sdk,
            fallback: collaborators.fallback,
            loading: ScriptLoading::new(
                collaborators.loader,
                collaborators.scripts,
                collaborators.load_timeout,
            ),
            lifecycle: Lifecycle::new(),
            chain_started: AtomicBool::new(false),
            paypal: OnceLock::new(),
            emitter,
        });

        inner.lifecycle.advance(InitState::Loading);
        runtime.spawn(Arc::clone(&inner).load());

        Ok((Self { inner }, events))
    }

    #[must_use]
    pub fn state(&self) -> InitState {
        self.inner.lifecycle.current()
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.inner.client().is_some()
    }

    /// Wait until initialization has either succeeded or failed.
    pub async fn settled(&self) -> InitState {
        self.inner.lifecycle.settled().await
    }

    #[must_use]
    pub fn subscribe_state(&self) -> watch::Receiver<InitState> {
        self.inner.lifecycle.subscribe()
    }

    /// Starts the PayPal flow.
    ///
    /// Must be on the call chain of a user interaction (click, touch). Emits
    /// exactly one of `token`, `cancel` or `error`.
    pub async fn start(&self) {
        let Some(paypal) = self.inner.client() else {
            self.inner.error(PayPalError::NotReady);
            return;
        };

        let payload = match paypal.tokenize(TokenizeOptions::vault()).await {
            Ok(payload) => payload,
            Err(error) if error.is_popup_closed() => {
                tracing::debug!("PayPal popup closed by user");
                self.inner.emitter.emit(PayPalEvent::Cancel);
                return;
            }
            Err(error) => {
                self.inner.error(PayPalError::TokenizeBraintree(error));
                return;
            }
        };

        tracing::debug!(kind = %payload.kind, "token payload received");

        match exchange_token(self.inner.transport.as_ref(), &payload).await {
            Ok(token) => self.inner.emitter.emit(PayPalEvent::Token(token)),
            Err(error) => {
                self.inner.error(PayPalError::TokenizeRecurly(error));
            }
        }
    }

    /// Falls back to the non-Braintree PayPal integration.
    ///
    /// The new flow is built from the original options minus the
    /// `braintree` section. Listeners on this handler's stream are not
    /// carried over.
    pub fn fail(&self, reason: &str) -> Box<dyn PayPalFlow> {
        tracing::warn!(reason, "falling back to non-Braintree PayPal");
        self.inner
            .fallback
            .create(self.inner.options.without_braintree())
    }

    /// Emit an `error` event and hand the record back to the caller.
    ///
    /// Takes either a finished [`PayPalError`] or a kind identifier with its
    /// context, e.g. `("paypal-braintree-api-error", sdk_error)`.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError`] and emits nothing if the kind cannot be built.
    pub fn error(
        &self,
        report: impl Into<ErrorReport>,
    ) -> std::result::Result<PayPalError, FactoryError> {
        let err = report
            .into()
            .into_error()
            .inspect_err(|e| tracing::warn!(error = %e, "cannot build error record"))?;
        Ok(self.inner.error(err))
    }
}

#[async_trait]
impl PayPalFlow for BraintreePayPal {
    async fn start(&self) {
        BraintreePayPal::start(self).await;
    }
}

impl Inner {
    async fn load(self: Arc<Self>) {
        let inner = Arc::clone(&self);
        self.loading
            .run(move || {
                tokio::spawn(async move { inner.initialize().await });
            })
            .await;
    }

    /// Build the client chain. Runs at most once per handler.
    async fn initialize(&self) {
        if self.chain_started.swap(true, Ordering::SeqCst) {
            tracing::debug!(state = %self.lifecycle.current(), "initialization already ran");
            return;
        }

        match self.create_chain().await {
            Ok(paypal) => {
                tracing::debug!("PayPal client created");
                if self.paypal.set(paypal).is_ok() {
                    self.lifecycle.advance(InitState::Ready);
                }
            }
            Err(err) => {
                self.lifecycle.advance(InitState::Failed);
                self.error(err);
            }
        }
    }

    async fn create_chain(&self) -> Result<Arc<dyn PayPalClient>> {
        let sdk = self.sdk.sdk().ok_or(PayPalError::LoadError)?;
        tracing::debug!("initializing Braintree client");

        let client = sdk
            .create_client(&self.authorization)
            .await
            .map_err(PayPalError::ApiError)?;
        self.lifecycle.advance(InitState::ClientCreated);
        tracing::debug!("Braintree client created");

        sdk.create_data_collector(Arc::clone(&client), DataCollectorOptions { paypal: true })
            .await
            .map_err(PayPalError::ApiError)?;
        self.lifecycle.advance(InitState::CollectorCreated);
        tracing::debug!("device data collector created");

        sdk.create_paypal(client)
            .await
            .map_err(PayPalError::ApiError)
    }

    /// The PayPal client, once the handler is ready.
    fn client(&self) -> Option<Arc<dyn PayPalClient>> {
        if self.lifecycle.current() == InitState::Ready {
            self.paypal.get().cloned()
        } else {
            None
        }
    }

    fn error(&self, err: PayPalError) -> PayPalError {
        tracing::warn!(code = err.code(), error = %err, "paypal error");
        self.emitter.emit(PayPalEvent::Error(err.clone()));
        err
    }
}
