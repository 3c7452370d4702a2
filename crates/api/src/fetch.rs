use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use tokio::sync::watch;

/// A successfully fetched payload and the time it was fetched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchResult<T> {
    pub response: T,
    pub fetched_at: DateTime<Utc>,
}

impl<T> FetchResult<T> {
    #[must_use]
    pub const fn new(response: T, fetched_at: DateTime<Utc>) -> Self {
        Self { response, fetched_at }
    }

    /// True when the result is older than `max_age` at `now`.
    #[must_use]
    pub fn is_stale(&self, now: DateTime<Utc>, max_age: TimeDelta) -> bool {
        now - self.fetched_at > max_age
    }
}

/// Holds at most one [`FetchResult`], replaced whole on each successful fetch.
///
/// Readers see either the previous result or the new one, never a mix, and
/// can subscribe to be notified of replacements.
#[derive(Debug)]
pub struct FetchSlot<T> {
    sender: watch::Sender<Option<Arc<FetchResult<T>>>>,
}

impl<T> Default for FetchSlot<T> {
    fn default() -> Self {
        let (sender, _) = watch::channel(None);
        Self { sender }
    }
}

impl<T> FetchSlot<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the held result.
    pub fn replace(&self, result: FetchResult<T>) -> Arc<FetchResult<T>> {
        let result = Arc::new(result);
        self.sender.send_replace(Some(Arc::clone(&result)));
        result
    }

    /// The held result, if any fetch has succeeded.
    #[must_use]
    pub fn get(&self) -> Option<Arc<FetchResult<T>>> {
        self.sender.borrow().clone()
    }

    #[must_use]
    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.sender.borrow().as_ref().map(|result| result.fetched_at)
    }

    /// True when nothing has been fetched or the held result is older than
    /// `max_age` at `now`.
    #[must_use]
    pub fn is_stale(&self, now: DateTime<Utc>, max_age: TimeDelta) -> bool {
        self.sender.borrow().as_ref().is_none_or(|result| result.is_stale(now, max_age))
    }

    /// Watch for replaced results.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<FetchResult<T>>>> {
        self.sender.subscribe()
    }
}
