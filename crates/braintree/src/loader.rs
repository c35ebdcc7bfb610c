//! Loads the Braintree web SDK scripts.
//!
//! The core client script must finish before the PayPal and data collector
//! scripts are requested. Those two load concurrently and meet at a
//! [`ReadinessBarrier`], which hands control to the caller's continuation once
//! both have settled.
//!
//! A failed load is logged and still counts as settled: whether the SDK is
//! actually usable is decided later by the [`SdkProvider`](paybridge_types::SdkProvider).

use crate::ReadinessBarrier;
use paybridge_config::ScriptSet;
use paybridge_types::{LoadFailure, ScriptLoader};
use std::{sync::Arc, time::Duration};

pub struct ScriptLoading {
    loader: Arc<dyn ScriptLoader>,
    scripts: ScriptSet,
    timeout: Option<Duration>,
}

impl ScriptLoading {
    /// `timeout` bounds each individual script; `None` waits indefinitely.
    pub fn new(loader: Arc<dyn ScriptLoader>, scripts: ScriptSet, timeout: Option<Duration>) -> Self {
        Self {
            loader,
            scripts,
            timeout,
        }
    }

    /// Load all three scripts and call `on_ready` once the last one settles.
    ///
    /// If a load never settles (and no timeout is configured) this never
    /// returns and `on_ready` never runs.
    pub async fn run<F: FnOnce() + Send>(&self, on_ready: F) {
        tracing::debug!("loading Braintree libraries");
        self.load(&self.scripts.client).await;

        let barrier = ReadinessBarrier::new(2, on_ready);
        tokio::join!(
            self.load_and_arrive(&self.scripts.paypal, &barrier),
            self.load_and_arrive(&self.scripts.data_collector, &barrier),
        );
    }

    async fn load_and_arrive<F: FnOnce()>(&self, url: &str, barrier: &ReadinessBarrier<F>) {
        self.load(url).await;
        if barrier.arrive() {
            tracing::debug!("Braintree libraries settled");
        }
    }

    async fn load(&self, url: &str) {
        let result = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.loader.load(url))
                .await
                .unwrap_or_else(|_| {
                    Err(LoadFailure::TimedOut {
                        url: url.to_string(),
                    })
                }),
            None => self.loader.load(url).await,
        };
        match result {
            Ok(()) => tracing::debug!(url, "script loaded"),
            Err(e) => tracing::warn!(url, error = %e, "script load failed"),
        }
    }
}
