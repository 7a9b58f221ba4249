use crate::domain::error::GatewayError;
use crate::domain::model::{ProviderId, TranslateInput};
use async_trait::async_trait;

/// Trait for translation backends
///
/// Each implementation owns one remote text-generation service. The registry
/// holds them behind `Arc<dyn Translator>` so the orchestrator never needs to
/// know which concrete backend it is talking to.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Which backend this is
    fn id(&self) -> ProviderId;

    /// Translate a prompt, returning the trimmed, non-empty translation
    async fn translate(&self, input: &TranslateInput) -> Result<String, GatewayError>;
}
