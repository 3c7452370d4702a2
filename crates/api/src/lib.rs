//! # Infobus API
//!
//! Request client, configuration, fetched-result storage, and provider
//! interfaces shared by the Infobus accessors.

mod client;
mod config;
mod envelope;
mod error;
mod fetch;
mod provider;
mod query;

pub use crate::client::*;
pub use crate::config::*;
pub use crate::envelope::*;
pub use crate::error::*;
pub use crate::fetch::*;
pub use crate::provider::*;
pub use crate::query::*;
