//! Shared provider client: one fetch, classify, store
//!
//! `ProviderClient` is the request/response helper every adapter holds by
//! composition. Construction is pure; all network I/O happens in the explicit
//! `refresh` operations.

use crate::config::ProviderConfig;
use crate::logging::{ErrorSink, TracingSink};
use crate::request::{RequestSpec, build_options, join_url};
use crate::transport::{HttpTransport, RawResponse, ReqwestTransport};
use crate::error::ProviderError;
use std::sync::{Arc, Mutex};

/// Status codes accepted as a usable upstream response
const ACCEPTED_STATUS: [u16; 3] = [200, 301, 302];

/// Shared request/response pipeline for CI providers
///
/// Holds the configuration, the transport, the error sink, and the raw
/// response of the most recent successful fetch. The stored response is
/// guarded by the instance's own mutex so re-fetching on a shared instance
/// is safe.
pub struct ProviderClient {
    config: ProviderConfig,
    transport: Arc<dyn HttpTransport>,
    sink: Arc<dyn ErrorSink>,
    response: Mutex<Option<RawResponse>>,
}

impl std::fmt::Debug for ProviderClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderClient")
            .field("config", &self.config)
            .field("response", &self.response)
            .finish_non_exhaustive()
    }
}

impl ProviderClient {
    /// Create a client with the production transport and default sink
    ///
    /// Performs no I/O; callers invoke [`refresh`](Self::refresh) when they
    /// want data.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Config` if `url` is missing or empty. No
    /// network activity happens before this check.
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        Self::with_transport(config, Arc::new(ReqwestTransport::new()), Arc::new(TracingSink))
    }

    /// Create a client with an injected transport and sink
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Config` if `url` is missing or empty.
    pub fn with_transport(
        config: ProviderConfig,
        transport: Arc<dyn HttpTransport>,
        sink: Arc<dyn ErrorSink>,
    ) -> Result<Self, ProviderError> {
        config.validate()?;
        Ok(Self {
            config,
            transport,
            sink,
            response: Mutex::new(None),
        })
    }

    /// The configuration this client was built with
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Configured builds path, or the root path when unset
    pub fn builds_path(&self) -> String {
        self.config
            .builds_path
            .clone()
            .unwrap_or_else(|| "/".to_string())
    }

    /// Fetch the builds resource once with no overrides
    ///
    /// Returns `None` when the upstream is unavailable; that outcome has
    /// already been logged and means "provider currently has no data".
    pub fn refresh(&self) -> Option<RawResponse> {
        self.refresh_with(&RequestSpec::default())
    }

    /// Fetch once with a per-call override
    ///
    /// Composes the URL, builds the options, resolves the method (override or
    /// GET) and dispatches exactly one request. No retries, no caching. The
    /// stored response is replaced on success and cleared on failure, so a
    /// degraded fetch never leaves stale data behind.
    pub fn refresh_with(&self, spec: &RequestSpec) -> Option<RawResponse> {
        let path = spec.path.clone().unwrap_or_else(|| self.builds_path());
        let url = join_url(&self.config.url, &path);
        let options = build_options(&self.config, spec);
        let method = spec.method.unwrap_or_default();

        let outcome = match self.transport.send(method, &url, &options) {
            Ok(response) if ACCEPTED_STATUS.contains(&response.status) => Some(response),
            Ok(response) => {
                self.sink.error(&format!(
                    "CI request to {url} returned status {}",
                    response.status
                ));
                None
            }
            Err(err) => {
                self.sink.error(&format!("CI request to {url} failed: {err}"));
                None
            }
        };

        *self.response.lock().unwrap() = outcome.clone();
        outcome
    }

    /// Clone of the stored response from the most recent successful fetch
    pub fn response(&self) -> Option<RawResponse> {
        self.response.lock().unwrap().clone()
    }
}
