//! # Route Shapes accessor
//!
//! Builds `geo-shapes` queries, runs them through the request client, and
//! holds the latest successful response.

use std::fmt::{self, Display};
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use infobus_api::{
    ApiConfig, Client, FetchResult, FetchSlot, Provider, Query, RequestOptions, RequestState,
    Result,
};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, error};

use crate::geometry::{self, Bounds};
use crate::types::{FeatureCollection, Position, RouteInfo, RouteShape, RouteShapesResponse};

/// Endpoint path, relative to the configured base URL.
pub const ENDPOINT: &str = "/geo-shapes";

/// Age after which shapes are considered stale when no threshold is given.
pub const STALE_AFTER_MINUTES: i64 = 30;

/// Encoding the server should use for shape geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeFormat {
    GeoJson,
    Polyline,
}

impl Display for ShapeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GeoJson => f.write_str("geojson"),
            Self::Polyline => f.write_str("polyline"),
        }
    }
}

/// Options for a geo-shapes query. Unset options are left out of the query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShapeOptions {
    pub direction_id: Option<u8>,

    /// Include the route's stops alongside its shapes.
    pub include_stops: Option<bool>,

    /// Ask the server for simplified geometry.
    pub simplify: Option<bool>,
    pub format: Option<ShapeFormat>,
}

impl ShapeOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn direction_id(mut self, direction_id: u8) -> Self {
        self.direction_id = Some(direction_id);
        self
    }

    #[must_use]
    pub const fn include_stops(mut self, include_stops: bool) -> Self {
        self.include_stops = Some(include_stops);
        self
    }

    #[must_use]
    pub const fn simplify(mut self, simplify: bool) -> Self {
        self.simplify = Some(simplify);
        self
    }

    #[must_use]
    pub const fn format(mut self, format: ShapeFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Query string parameters for `route_id` with these options.
    #[must_use]
    pub fn query(&self, route_id: &str) -> Query {
        Query::new()
            .param("route_id", route_id)
            .optional("direction_id", self.direction_id)
            .optional("include_stops", self.include_stops)
            .optional("simplify", self.simplify)
            .optional("format", self.format)
    }
}

/// Geometry of a route.
#[derive(Debug)]
pub struct RouteShapes<P> {
    client: Client<P>,
    data: FetchSlot<RouteShapesResponse>,
}

impl<P: Provider> RouteShapes<P> {
    #[must_use]
    pub fn new(config: ApiConfig, provider: P) -> Self {
        Self::with_client(Client::new(config, provider))
    }

    #[must_use]
    pub fn with_client(client: Client<P>) -> Self {
        Self { client, data: FetchSlot::new() }
    }

    /// Fetch the shapes of `route_id`, replacing any held result.
    ///
    /// # Errors
    ///
    /// Returns the request client's error unchanged. Previously fetched
    /// shapes are kept when the call fails.
    pub async fn fetch_route_shapes(
        &self, route_id: &str, options: &ShapeOptions,
    ) -> Result<FeatureCollection> {
        let endpoint = options.query(route_id).endpoint(ENDPOINT);

        let request = self.client.request::<RouteShapesResponse>(&endpoint, RequestOptions::new());
        let response = match request.await {
            Ok(response) => response,
            Err(err) => {
                error!(route_id, error = %err, "Error fetching route shapes");
                return Err(err);
            }
        };

        let fetched_at = self.client.provider().now();
        let result = self.data.replace(FetchResult::new(response, fetched_at));
        debug!(route_id, features = result.response.shapes.features.len(), "fetched route shapes");

        Ok(result.response.shapes.clone())
    }

    /// Fetch again with the given options.
    ///
    /// # Errors
    ///
    /// See [`RouteShapes::fetch_route_shapes`].
    pub async fn refresh(
        &self, route_id: &str, options: &ShapeOptions,
    ) -> Result<FeatureCollection> {
        self.fetch_route_shapes(route_id, options).await
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
    pub fn data(&self) -> Option<Arc<FetchResult<RouteShapesResponse>>> {
        self.data.get()
    }

    /// Watch for newly fetched results.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<FetchResult<RouteShapesResponse>>>> {
        self.data.subscribe()
    }

    #[must_use]
    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.data.fetched_at()
    }

    #[must_use]
    pub fn shapes(&self) -> Option<FeatureCollection> {
        self.data.get().map(|result| result.response.shapes.clone())
    }

    #[must_use]
    pub fn route_info(&self) -> Option<RouteInfo> {
        self.data.get().map(|result| result.response.route_info.clone())
    }

    /// Features from the latest fetch; empty when nothing is held.
    #[must_use]
    pub fn features(&self) -> Vec<RouteShape> {
        self.data.get().map(|result| result.response.shapes.features.clone()).unwrap_or_default()
    }

    /// Features tagged with `direction_id`.
    #[must_use]
    pub fn shapes_by_direction(&self, direction_id: u8) -> Vec<RouteShape> {
        let mut features = self.features();
        features.retain(|shape| shape.direction_id() == Some(direction_id));
        features
    }

    /// Coordinates of every line feature, in order. Other geometry types are
    /// skipped.
    #[must_use]
    pub fn all_coordinates(&self) -> Vec<Position> {
        self.data
            .get()
            .map(|result| geometry::line_coordinates(&result.response.shapes.features))
            .unwrap_or_default()
    }

    /// Bounding box of [`RouteShapes::all_coordinates`], `None` when empty.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_positions(&self.all_coordinates())
    }

    /// True when nothing has been fetched or the latest fetch is older than
    /// `max_age` (default [`STALE_AFTER_MINUTES`]).
    #[must_use]
    pub fn is_stale(&self, max_age: Option<TimeDelta>) -> bool {
        let max_age = max_age.unwrap_or_else(|| TimeDelta::minutes(STALE_AFTER_MINUTES));
        self.data.is_stale(self.client.provider().now(), max_age)
    }
}
