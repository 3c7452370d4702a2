//! Infobus client errors

use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type used across the crate.
pub type Result<T> = anyhow::Result<T, Error>;

/// Error returned by the request client and the accessors built on it.
///
/// The `Display` output is the human-readable message mirrored into
/// [`RequestState::last_error`](crate::RequestState).
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Error {
    /// The call did not complete within the configured timeout.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// The server answered with a non-success status code.
    #[error("HTTP error, status: {status}")]
    Http {
        /// Numeric HTTP status code.
        status: u16,
    },

    /// The response envelope reported `success: false`.
    #[error("{0}")]
    Api(String),

    /// The response body could not be decoded.
    #[error("invalid response body: {0}")]
    Decode(String),

    /// Any other failure, typically from the transport.
    #[error("{0}")]
    Unknown(String),
}

impl Error {
    /// Returns the stable error code associated with the variant.
    #[must_use]
    pub const fn code(&self) -> &str {
        match self {
            Self::Timeout(_) => "timeout",
            Self::Http { .. } => "http_error",
            Self::Api(_) => "api_error",
            Self::Decode(_) => "decode_error",
            Self::Unknown(_) => "unknown_error",
        }
    }

    /// Returns the HTTP status for [`Error::Http`] errors.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http { status } => StatusCode::from_u16(*status).ok(),
            _ => None,
        }
    }

    /// Returns the error description.
    #[must_use]
    pub fn description(&self) -> String {
        self.to_string()
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        // if type is Error, return it unchanged so the message stays stable
        if let Some(inner) = err.downcast_ref::<Self>() {
            tracing::debug!("Error: {err}, caused by: {inner}");
            return inner.clone();
        }

        let chain = err.chain().map(ToString::to_string).collect::<Vec<_>>().join(" -> ");
        Self::Unknown(chain)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<StatusCode> for Error {
    fn from(status: StatusCode) -> Self {
        Self::Http { status: status.as_u16() }
    }
}
