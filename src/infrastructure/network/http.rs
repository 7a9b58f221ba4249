// HTTP client utilities
use crate::domain::error::GatewayError;
use reqwest::Client;
use std::time::Duration;

/// Create the shared outbound client.
///
/// `timeout_secs` bounds each upstream call end to end.
pub fn create_client(timeout_secs: u64) -> Result<Client, GatewayError> {
    Client::builder()
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(30))
        .timeout(Duration::from_secs(timeout_secs.max(1)))
        .user_agent(concat!("translate-gateway/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| GatewayError::Init(format!("Failed to build HTTP client: {}", e)))
}
