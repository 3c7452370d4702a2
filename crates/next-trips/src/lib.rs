//! # Next Trips
//!
//! Fetches the next arrivals at a stop from the Infobus `next-trips`
//! endpoint and keeps the latest result for reading and observation.

mod next_trips;
mod types;

pub use infobus_api::{
    ApiConfig, Client, Clock, Error, FetchResult, HttpRequest, Provider, RequestState, Result,
};

pub use self::next_trips::*;
pub use self::types::*;
