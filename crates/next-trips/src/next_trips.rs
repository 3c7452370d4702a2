//! # Next Trips accessor
//!
//! Builds `next-trips` queries, runs them through the request client, and
//! holds the latest successful response.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use infobus_api::{
    ApiConfig, Client, FetchResult, FetchSlot, Provider, Query, RequestOptions, RequestState,
    Result,
};
use tokio::sync::watch;
use tracing::{debug, error};

use crate::types::{NextTrip, NextTripsResponse, StopInfo};

/// Endpoint path, relative to the configured base URL.
pub const ENDPOINT: &str = "/next-trips";

/// Age after which trips are considered stale when no threshold is given.
pub const STALE_AFTER_MINUTES: i64 = 5;

/// Options for a next-trips query. Unset options are left out of the query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripOptions {
    /// Maximum number of trips to return.
    pub limit: Option<u32>,

    /// Only trips on this route.
    pub route_id: Option<String>,

    /// Only trips in this direction (GTFS `direction_id`).
    pub direction_id: Option<u8>,

    /// Ask the server to merge real-time estimates.
    pub include_realtime: Option<bool>,
}

impl TripOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn route_id(mut self, route_id: impl Into<String>) -> Self {
        self.route_id = Some(route_id.into());
        self
    }

    #[must_use]
    pub const fn direction_id(mut self, direction_id: u8) -> Self {
        self.direction_id = Some(direction_id);
        self
    }

    #[must_use]
    pub const fn include_realtime(mut self, include_realtime: bool) -> Self {
        self.include_realtime = Some(include_realtime);
        self
    }

    /// Query string parameters for `stop_id` with these options.
    #[must_use]
    pub fn query(&self, stop_id: &str) -> Query {
        Query::new()
            .param("stop_id", stop_id)
            .optional("limit", self.limit)
            .optional("route_id", self.route_id.as_deref())
            .optional("direction_id", self.direction_id)
            .optional("realtime", self.include_realtime)
    }
}

/// Next arrivals at a stop.
#[derive(Debug)]
pub struct NextTrips<P> {
    client: Client<P>,
    data: FetchSlot<NextTripsResponse>,
}

impl<P: Provider> NextTrips<P> {
    #[must_use]
    pub fn new(config: ApiConfig, provider: P) -> Self {
        Self::with_client(Client::new(config, provider))
    }

    #[must_use]
    pub fn with_client(client: Client<P>) -> Self {
        Self { client, data: FetchSlot::new() }
    }

    /// Fetch the next trips for `stop_id`, replacing any held result.
    ///
    /// # Errors
    ///
    /// Returns the request client's error unchanged. Previously fetched trips
    /// are kept when the call fails.
    pub async fn fetch_next_trips(
        &self, stop_id: &str, options: &TripOptions,
    ) -> Result<Vec<NextTrip>> {
        let endpoint = options.query(stop_id).endpoint(ENDPOINT);

        let request = self.client.request::<NextTripsResponse>(&endpoint, RequestOptions::new());
        let response = match request.await {
            Ok(response) => response,
            Err(err) => {
                error!(stop_id, error = %err, "Error fetching next trips");
                return Err(err);
            }
        };

        let fetched_at = self.client.provider().now();
        let result = self.data.replace(FetchResult::new(response, fetched_at));
        debug!(stop_id, trips = result.response.trips.len(), "fetched next trips");

        Ok(result.response.trips.clone())
    }

    /// Fetch again with the given options.
    ///
    /// # Errors
    ///
    /// See [`NextTrips::fetch_next_trips`].
    pub async fn refresh(&self, stop_id: &str, options: &TripOptions) -> Result<Vec<NextTrip>> {
        self.fetch_next_trips(stop_id, options).await
    }

    #[must_use]
    pub const fn client(&self) -> &Client<P> {
        &self.client
    }

    #[must_use]
    pub fn state(&self) -> RequestState {
        self.client.state()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.client.is_loading()
    }

    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.client.last_error()
    }

    /// The latest successful fetch.
    #[must_use]
    pub fn data(&self) -> Option<Arc<FetchResult<NextTripsResponse>>> {
        self.data.get()
    }

    /// Watch for newly fetched results.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<FetchResult<NextTripsResponse>>>> {
        self.data.subscribe()
    }

    #[must_use]
    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.data.fetched_at()
    }

    /// Trips from the latest fetch, in server order.
    #[must_use]
    pub fn trips(&self) -> Vec<NextTrip> {
        self.data.get().map(|result| result.response.trips.clone()).unwrap_or_default()
    }

    #[must_use]
    pub fn stop_info(&self) -> Option<StopInfo> {
        self.data.get().map(|result| result.response.stop_info.clone())
    }

    /// Server timestamp of the latest fetch.
    #[must_use]
    pub fn last_updated(&self) -> Option<String> {
        self.data.get().map(|result| result.response.last_updated.clone())
    }

    /// Trips on `route_id`, keeping their relative order.
    #[must_use]
    pub fn trips_by_route(&self, route_id: &str) -> Vec<NextTrip> {
        self.data
            .get()
            .map(|result| {
                let trips = result.response.trips.iter();
                trips.filter(|trip| trip.route_id == route_id).cloned().collect()
            })
            .unwrap_or_default()
    }

    /// The first `count` trips, or all of them when fewer are held.
    #[must_use]
    pub fn next_trips(&self, count: usize) -> Vec<NextTrip> {
        self.data
            .get()
            .map(|result| result.response.trips.iter().take(count).cloned().collect())
            .unwrap_or_default()
    }

    /// True when nothing has been fetched or the latest fetch is older than
    /// `max_age` (default [`STALE_AFTER_MINUTES`]).
    #[must_use]
    pub fn is_stale(&self, max_age: Option<TimeDelta>) -> bool {
        let max_age = max_age.unwrap_or_else(|| TimeDelta::minutes(STALE_AFTER_MINUTES));
        self.data.is_stale(self.client.provider().now(), max_age)
    }
}
