//! # Provider
//!
//! Provider defines external data interfaces for the crate.

use anyhow::Result;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use http::{Request, Response};

/// Provider entry point implemented by the host application.
pub trait Provider: HttpRequest + Clock {}

impl<T> Provider for T where T: HttpRequest + Clock {}

/// The `HttpRequest` trait defines the behavior for fetching data from a source.
pub trait HttpRequest: Send + Sync {
    /// Make outbound HTTP request.
    ///
    /// Implementations return the response as received, whatever its status.
    /// Status handling and decoding belong to the caller.
    fn fetch(
        &self, request: Request<Bytes>,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send;
}

/// Source of the current time, used to stamp and age fetched data.
pub trait Clock: Send + Sync {
    /// Current time in UTC.
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
