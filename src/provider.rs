//! Host provider backed by `reqwest`.

use anyhow::{Context, Result};
use bytes::Bytes;
use http::{Request, Response};
use infobus_api::{Clock, HttpRequest};

/// Sends requests over the network and reads the system clock.
#[derive(Debug, Clone, Default)]
pub struct Provider {
    client: reqwest::Client,
}

impl Provider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured `reqwest` client (proxies, TLS roots, user agent).
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl HttpRequest for Provider {
    async fn fetch(&self, request: Request<Bytes>) -> Result<Response<Bytes>> {
        let request = reqwest::Request::try_from(request).context("converting request")?;
        tracing::trace!(url = %request.url(), "sending request");

        let response = self.client.execute(request).await.context("sending request")?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.context("reading response body")?;

        let mut builder = Response::builder().status(status);
        if let Some(map) = builder.headers_mut() {
            *map = headers;
        }
        builder.body(body).context("building response")
    }
}

impl Clock for Provider {}
