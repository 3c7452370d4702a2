//! # Route Shapes
//!
//! Fetches route geometries from the Infobus `geo-shapes` endpoint and derives
//! the coordinate list and bounding box a map view needs.

mod geometry;
mod route_shapes;
mod types;

pub use infobus_api::{
    ApiConfig, Client, Clock, Error, FetchResult, HttpRequest, Provider, RequestState, Result,
};

pub use self::geometry::*;
pub use self::route_shapes::*;
pub use self::types::*;
