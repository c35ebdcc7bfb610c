//! Stub collaborators shared by the unit tests in this crate.

use crate::EventStream;
use async_trait::async_trait;
use paybridge_types::{
    BackendError, BackendTransport, BraintreeSdk, Client, DataCollector, DataCollectorOptions,
    FallbackFactory, LoadFailure, PayPalClient, PayPalEvent, PayPalFlow, PayPalOptions,
    ScriptLoader, SdkError, SdkProvider, TokenizeOptions, TokenizePayload,
};
use serde_json::{Value, json};
use std::{
    collections::{HashMap, HashSet},
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

/// Drain every event currently queued on the stream.
pub fn drain(events: &mut EventStream) -> Vec<PayPalEvent> {
    std::iter::from_fn(|| events.try_recv().ok()).collect()
}

pub fn payload() -> TokenizePayload {
    TokenizePayload {
        nonce: "fake-paypal-billing-agreement-nonce".into(),
        kind: "PayPalAccount".into(),
        details: json!({ "email": "buyer@example.com" }),
    }
}

// ── Script loader ─────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingLoader {
    log: Mutex<Vec<String>>,
    delays: HashMap<String, Duration>,
    failing: HashSet<String>,
    hanging: HashSet<String>,
}

impl RecordingLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delay(mut self, url: &str, delay: Duration) -> Self {
        self.delays.insert(url.to_string(), delay);
        self
    }

    pub fn fail(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }

    /// The load for `url` never settles.
    pub fn hang(mut self, url: &str) -> Self {
        self.hanging.insert(url.to_string());
        self
    }

    /// `start:<url>` / `end:<url>` entries in the order they happened.
    pub fn log(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    pub fn position(&self, entry: &str) -> Option<usize> {
        self.log().iter().position(|e| e == entry)
    }
}

#[async_trait]
impl ScriptLoader for RecordingLoader {
    async fn load(&self, url: &str) -> Result<(), LoadFailure> {
        self.log.lock().unwrap().push(format!("start:{url}"));
        if self.hanging.contains(url) {
            std::future::pending::<()>().await;
        }
        if let Some(delay) = self.delays.get(url) {
            tokio::time::sleep(*delay).await;
        }
        self.log.lock().unwrap().push(format!("end:{url}"));
        if self.failing.contains(url) {
            return Err(LoadFailure::Failed {
                url: url.to_string(),
                reason: "404".into(),
            });
        }
        Ok(())
    }
}

// ── Braintree SDK ─────────────────────────────────────────────────────────────

struct StubClient;
impl Client for StubClient {}

struct StubCollector;
impl DataCollector for StubCollector {}

pub struct StubPayPal {
    outcome: Result<TokenizePayload, SdkError>,
    calls: AtomicUsize,
    options: Mutex<Vec<TokenizeOptions>>,
}

impl StubPayPal {
    pub fn returning(outcome: Result<TokenizePayload, SdkError>) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            calls: AtomicUsize::new(0),
            options: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn options(&self) -> Vec<TokenizeOptions> {
        self.options.lock().unwrap().clone()
    }
}

#[async_trait]
impl PayPalClient for StubPayPal {
    async fn tokenize(&self, options: TokenizeOptions) -> Result<TokenizePayload, SdkError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.options.lock().unwrap().push(options);
        self.outcome.clone()
    }
}

/// SDK whose factory calls succeed unless told to fail.
pub struct ScriptedSdk {
    paypal: Arc<StubPayPal>,
    fail_client: Option<SdkError>,
    fail_collector: Option<SdkError>,
    fail_paypal: Option<SdkError>,
    calls: Mutex<Vec<&'static str>>,
    authorization: Mutex<Option<String>>,
    collector_options: Mutex<Option<DataCollectorOptions>>,
}

impl ScriptedSdk {
    pub fn new(paypal: Arc<StubPayPal>) -> Self {
        Self {
            paypal,
            fail_client: None,
            fail_collector: None,
            fail_paypal: None,
            calls: Mutex::new(Vec::new()),
            authorization: Mutex::new(None),
            collector_options: Mutex::new(None),
        }
    }

    pub fn fail_client(mut self, err: SdkError) -> Self {
        self.fail_client = Some(err);
        self
    }

    pub fn fail_collector(mut self, err: SdkError) -> Self {
        self.fail_collector = Some(err);
        self
    }

    pub fn fail_paypal(mut self, err: SdkError) -> Self {
        self.fail_paypal = Some(err);
        self
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn authorization(&self) -> Option<String> {
        self.authorization.lock().unwrap().clone()
    }

    pub fn collector_options(&self) -> Option<DataCollectorOptions> {
        *self.collector_options.lock().unwrap()
    }
}

#[async_trait]
impl BraintreeSdk for ScriptedSdk {
    async fn create_client(&self, authorization: &str) -> Result<Arc<dyn Client>, SdkError> {
        self.calls.lock().unwrap().push("client");
        *self.authorization.lock().unwrap() = Some(authorization.to_string());
        match &self.fail_client {
            Some(e) => Err(e.clone()),
            None => Ok(Arc::new(StubClient)),
        }
    }

    async fn create_data_collector(
        &self,
        _client: Arc<dyn Client>,
        options: DataCollectorOptions,
    ) -> Result<Arc<dyn DataCollector>, SdkError> {
        self.calls.lock().unwrap().push("collector");
        *self.collector_options.lock().unwrap() = Some(options);
        match &self.fail_collector {
            Some(e) => Err(e.clone()),
            None => Ok(Arc::new(StubCollector)),
        }
    }

    async fn create_paypal(
        &self,
        _client: Arc<dyn Client>,
    ) -> Result<Arc<dyn PayPalClient>, SdkError> {
        self.calls.lock().unwrap().push("paypal");
        match &self.fail_paypal {
            Some(e) => Err(e.clone()),
            None => Ok(Arc::clone(&self.paypal) as Arc<dyn PayPalClient>),
        }
    }
}

/// Provides a fixed SDK (or none, as if the scripts never installed it).
pub struct StaticSdk(pub Option<Arc<ScriptedSdk>>);

impl SdkProvider for StaticSdk {
    fn sdk(&self) -> Option<Arc<dyn BraintreeSdk>> {
        self.0
            .as_ref()
            .map(|sdk| Arc::clone(sdk) as Arc<dyn BraintreeSdk>)
    }
}

// ── Backend ───────────────────────────────────────────────────────────────────

pub struct StubTransport {
    response: Result<Value, BackendError>,
    requests: Mutex<Vec<(http::Method, String, Value)>>,
}

impl StubTransport {
    pub fn returning(response: Result<Value, BackendError>) -> Arc<Self> {
        Arc::new(Self {
            response,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn token(id: &str) -> Arc<Self> {
        Self::returning(Ok(json!({ "id": id, "type": "paypal" })))
    }

    pub fn requests(&self) -> Vec<(http::Method, String, Value)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl BackendTransport for StubTransport {
    async fn request(
        &self,
        method: http::Method,
        route: &str,
        body: Value,
    ) -> Result<Value, BackendError> {
        self.requests
            .lock()
            .unwrap()
            .push((method, route.to_string(), body));
        self.response.clone()
    }
}

// ── Fallback ──────────────────────────────────────────────────────────────────

struct NoopFlow;

#[async_trait]
impl PayPalFlow for NoopFlow {
    async fn start(&self) {}
}

#[derive(Default)]
pub struct RecordingFallback {
    received: Mutex<Vec<PayPalOptions>>,
}

impl RecordingFallback {
    pub fn received(&self) -> Vec<PayPalOptions> {
        self.received.lock().unwrap().clone()
    }
}

impl FallbackFactory for RecordingFallback {
    fn create(&self, options: PayPalOptions) -> Box<dyn PayPalFlow> {
        self.received.lock().unwrap().push(options);
        Box::new(NoopFlow)
    }
}
