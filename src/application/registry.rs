use crate::domain::error::GatewayError;
use crate::domain::model::ProviderId;
use crate::domain::traits::Translator;
use crate::infrastructure::config::Config;
use crate::infrastructure::network::{ClaudeTranslator, XaiTranslator};
use reqwest::Client;
use std::sync::Arc;

/// Immutable provider lookup table, built once at startup.
///
/// Entries keep their registration order, which is also the order used when
/// listing valid identifiers back to the caller.
pub struct ProviderRegistry {
    entries: Vec<Arc<dyn Translator>>,
    default: ProviderId,
}

impl ProviderRegistry {
    pub fn new(entries: Vec<Arc<dyn Translator>>, default: ProviderId) -> Result<Self, GatewayError> {
        if !entries.iter().any(|t| t.id() == default) {
            return Err(GatewayError::Init(format!(
                "Default provider \"{}\" is not registered",
                default
            )));
        }
        Ok(Self { entries, default })
    }

    /// Register every known backend, sharing one HTTP client and config.
    pub fn from_config(client: Client, config: Arc<Config>) -> Result<Self, GatewayError> {
        let entries: Vec<Arc<dyn Translator>> = vec![
            Arc::new(ClaudeTranslator::new(client.clone(), config.clone())),
            Arc::new(XaiTranslator::new(client, config.clone())),
        ];
        Self::new(entries, config.default_provider)
    }

    /// Look up a provider by identifier, ignoring case.
    pub fn resolve(&self, identifier: &str) -> Option<Arc<dyn Translator>> {
        let key = identifier.trim().to_lowercase();
        self.entries
            .iter()
            .find(|t| t.id().as_str() == key)
            .cloned()
    }

    pub fn default_provider(&self) -> Arc<dyn Translator> {
        // new() 已保证默认 provider 存在
        self.resolve(self.default.as_str())
            .unwrap_or_else(|| self.entries[0].clone())
    }

    pub fn default_id(&self) -> ProviderId {
        self.default
    }

    /// Registered identifiers in registration order.
    pub fn identifiers(&self) -> Vec<&'static str> {
        self.entries.iter().map(|t| t.id().as_str()).collect()
    }
}
