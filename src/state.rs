use crate::application::registry::ProviderRegistry;
use crate::domain::error::GatewayError;
use crate::infrastructure::config::Config;
use crate::infrastructure::network::http::create_client;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ProviderRegistry>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, GatewayError> {
        let config = Arc::new(config);
        let http_client = create_client(config.request_timeout_secs)?;
        let registry = ProviderRegistry::from_config(http_client, config.clone())?;

        Ok(Self {
            registry: Arc::new(registry),
            config,
        })
    }

    /// Build state around an already-assembled registry.
    pub fn with_registry(registry: ProviderRegistry, config: Config) -> Self {
        Self {
            registry: Arc::new(registry),
            config: Arc::new(config),
        }
    }
}
