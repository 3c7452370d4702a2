//! # Request Client
//!
//! Sends a single request to the Infobus API, applying authentication and
//! the configured timeout, then unwraps the response envelope.
//!
//! Each call is independent: there is no retry, no request coalescing, and no
//! cancellation other than the timeout.

use std::sync::Arc;

use anyhow::Context;
use bytes::Bytes;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::{ApiConfig, Envelope, Error, Provider, Result};

/// Observable state of the request client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestState {
    /// True while a call is in flight.
    pub is_loading: bool,

    /// Message of the most recent failure, cleared when a new call starts.
    pub last_error: Option<String>,
}

/// Per-call request options.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
}

impl RequestOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Infobus request client.
#[derive(Debug)]
pub struct Client<P> {
    config: Arc<ApiConfig>,
    provider: Arc<P>,
    state: watch::Sender<RequestState>,
}

impl<P: Provider> Client<P> {
    #[must_use]
    pub fn new(config: ApiConfig, provider: P) -> Self {
        Self::with_shared(Arc::new(config), Arc::new(provider))
    }

    /// Create a client over a provider shared with other clients.
    #[must_use]
    pub fn with_shared(config: Arc<ApiConfig>, provider: Arc<P>) -> Self {
        let (state, _) = watch::channel(RequestState::default());
        Self { config, provider, state }
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Snapshot of the current request state.
    #[must_use]
    pub fn state(&self) -> RequestState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.state.borrow().last_error.clone()
    }

    /// Watch request state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<RequestState> {
        self.state.subscribe()
    }

    /// Send a request to `endpoint` and decode the unwrapped payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Timeout`] when the call exceeds the configured
    /// timeout, [`Error::Http`] for non-success status codes, [`Error::Decode`]
    /// when the body is not valid JSON for `T`, [`Error::Api`] when the
    /// envelope reports `success: false`, and [`Error::Unknown`] for transport
    /// failures. The error message is also stored as the client's last error.
    pub async fn request<T>(&self, endpoint: &str, options: RequestOptions) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.state.send_modify(|state| {
            state.is_loading = true;
            state.last_error = None;
        });
        let _loading = Loading(&self.state);

        let result = self.send(endpoint, options).await;
        if let Err(err) = &result {
            warn!(endpoint = %endpoint, code = err.code(), error = %err, "Infobus request failed");
            self.state.send_modify(|state| state.last_error = Some(err.to_string()));
        }

        result
    }

    async fn send<T>(&self, endpoint: &str, options: RequestOptions) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = self.config.url(endpoint);
        let request = self.build_request(&url, options)?;
        debug!(method = %request.method(), url = %url, "sending Infobus request");

        let timeout = self.config.timeout;
        let Ok(response) = tokio::time::timeout(timeout, self.provider.fetch(request)).await
        else {
            return Err(Error::Timeout(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX)));
        };
        let response = response.with_context(|| format!("fetching {url}"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::from(status));
        }

        let body: Value = serde_json::from_slice(response.body())?;
        Envelope::from(body).into_result()
    }

    fn build_request(&self, url: &str, options: RequestOptions) -> Result<http::Request<Bytes>> {
        let mut request = http::Request::builder()
            .method(options.method)
            .uri(url)
            .body(options.body.unwrap_or_default())
            .context("building request")?;

        let headers = request.headers_mut();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.extend(options.headers);

        // the configured key always wins over a caller-supplied header
        if let Some(api_key) = &self.config.api_key {
            let bearer = HeaderValue::from_str(&format!("Bearer {api_key}"))
                .context("invalid API key header")?;
            headers.insert(AUTHORIZATION, bearer);
        }

        Ok(request)
    }
}

// Clears the loading flag on every exit path, including a dropped future.
struct Loading<'a>(&'a watch::Sender<RequestState>);

impl Drop for Loading<'_> {
    fn drop(&mut self) {
        self.0.send_modify(|state| state.is_loading = false);
    }
}
