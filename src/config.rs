use std::time::Duration;

use anyhow::{Context, Result};
use infobus_api::{ApiConfig, DEFAULT_TIMEOUT};

/// Build the API configuration from `INFOBUS_*` environment variables.
///
/// # Errors
///
/// Returns an error when `INFOBUS_TIMEOUT_MS` is set but is not a whole
/// number of milliseconds.
pub fn api_config() -> Result<ApiConfig> {
    let mut config = ApiConfig::new(get_base_url()).with_timeout(get_timeout()?);
    if let Some(api_key) = get_api_key() {
        config = config.with_api_key(api_key);
    }
    Ok(config)
}

pub fn get_base_url() -> String {
    std::env::var("INFOBUS_BASE_URL").unwrap_or_else(|_| {
        let default = "https://api.infobus.example.com".to_string();
        tracing::trace!("INFOBUS_BASE_URL not set, using default: {default}");
        default
    })
}

pub fn get_api_key() -> Option<String> {
    let value = std::env::var("INFOBUS_API_KEY").ok()?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    tracing::trace!("INFOBUS_API_KEY loaded from environment");
    Some(trimmed.to_string())
}

/// # Errors
///
/// Returns an error when `INFOBUS_TIMEOUT_MS` cannot be parsed.
pub fn get_timeout() -> Result<Duration> {
    parse_timeout(std::env::var("INFOBUS_TIMEOUT_MS").ok().as_deref())
}

pub fn get_stop_id() -> String {
    std::env::var("INFOBUS_STOP_ID").unwrap_or_else(|_| {
        let default = "1001".to_string();
        tracing::trace!("INFOBUS_STOP_ID not set, using default: {default}");
        default
    })
}

pub fn get_route_id() -> String {
    std::env::var("INFOBUS_ROUTE_ID").unwrap_or_else(|_| {
        let default = "R1".to_string();
        tracing::trace!("INFOBUS_ROUTE_ID not set, using default: {default}");
        default
    })
}

fn parse_timeout(value: Option<&str>) -> Result<Duration> {
    let Some(value) = value.map(str::trim).filter(|value| !value.is_empty()) else {
        tracing::trace!("INFOBUS_TIMEOUT_MS not set, using default: {DEFAULT_TIMEOUT:?}");
        return Ok(DEFAULT_TIMEOUT);
    };
    let millis: u64 =
        value.parse().with_context(|| format!("invalid INFOBUS_TIMEOUT_MS: {value}"))?;
    Ok(Duration::from_millis(millis))
}
