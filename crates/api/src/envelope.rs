use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{Error, Result};

/// Message used when a failed envelope carries neither `error` nor `message`.
pub const DEFAULT_FAILURE: &str = "API request failed";

/// A decoded response body.
///
/// The API either wraps payloads as `{success, data, error?, message?}` or
/// returns them bare. The `success` discriminant picks the variant: only an
/// explicit `success: false` is a failure.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// `success: false`, with the server's reason.
    Failure(String),

    /// The payload: the `data` field when present, otherwise the whole body.
    Success(Value),
}

impl Envelope {
    /// Deserialize the payload, or surface the failure as [`Error::Api`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] for failed envelopes and [`Error::Decode`] when
    /// the payload does not match `T`.
    pub fn into_result<T: DeserializeOwned>(self) -> Result<T> {
        match self {
            Self::Failure(message) => Err(Error::Api(message)),
            Self::Success(payload) => serde_json::from_value(payload).map_err(Error::from),
        }
    }
}

impl From<Value> for Envelope {
    fn from(mut body: Value) -> Self {
        if body.get("success") == Some(&Value::Bool(false)) {
            let message = ["error", "message"]
                .iter()
                .find_map(|key| body.get(key).and_then(Value::as_str).filter(|s| !s.is_empty()))
                .unwrap_or(DEFAULT_FAILURE);
            return Self::Failure(message.to_string());
        }

        match body.get_mut("data").map(Value::take) {
            Some(data) if !data.is_null() => Self::Success(data),
            _ => Self::Success(body),
        }
    }
}
