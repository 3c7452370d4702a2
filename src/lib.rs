//! # Infobus
//!
//! Host wiring for the Infobus accessors: a `reqwest`-backed provider,
//! environment configuration, and a text departure board.

mod board;
pub mod config;
mod provider;

pub use infobus_api as api;
pub use next_trips;
pub use route_shapes;

pub use self::board::*;
pub use self::provider::*;
