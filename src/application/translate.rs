use crate::application::registry::ProviderRegistry;
use crate::domain::error::GatewayError;
use crate::domain::model::{TranslateInput, TranslationRequest, TranslationResult};
use tracing::Instrument;
use uuid::Uuid;

pub const MISSING_PROMPT_MESSAGE: &str = "Missing prompt text to translate.";

/// Validate, resolve the provider, dispatch, and log failures.
///
/// Validation failures never reach a provider client.
pub async fn translate(
    registry: &ProviderRegistry,
    request: TranslationRequest,
) -> Result<TranslationResult, GatewayError> {
    let prompt = request.cleaned_prompt();
    if prompt.is_empty() {
        tracing::debug!("rejecting request without prompt text");
        return Err(GatewayError::validation(MISSING_PROMPT_MESSAGE));
    }

    let provider_key = request.provider_key().to_lowercase();
    let translator = if provider_key.is_empty() {
        registry.default_provider()
    } else {
        match registry.resolve(&provider_key) {
            Some(translator) => translator,
            None => {
                tracing::debug!(provider = %provider_key, "rejecting unsupported provider");
                return Err(GatewayError::validation(format!(
                    "Unsupported provider \"{}\". Use one of: {}.",
                    provider_key,
                    registry.identifiers().join(", ")
                )));
            }
        }
    };

    let provider = translator.id();
    let input = TranslateInput {
        prompt,
        metadata: request.metadata_map(),
    };

    let span = tracing::info_span!("translate", request_id = %Uuid::new_v4(), provider = %provider);
    async move {
        match translator.translate(&input).await {
            Ok(translation) => {
                tracing::info!(chars = translation.chars().count(), "translation succeeded");
                Ok(TranslationResult {
                    translation,
                    prompt: input.prompt,
                })
            }
            Err(err) => {
                log_failure(&err);
                Err(err)
            }
        }
    }
    .instrument(span)
    .await
}

fn log_failure(err: &GatewayError) {
    let details = err
        .details()
        .map(|d| d.to_string())
        .unwrap_or_default();
    match err {
        GatewayError::Provider { kind, .. } => tracing::error!(
            status = err.status_code(),
            kind = kind.as_str(),
            details = %details,
            "provider call failed: {}",
            err
        ),
        GatewayError::Validation { .. } => tracing::debug!("{}", err),
        _ => tracing::error!(
            status = err.status_code(),
            details = %details,
            "translation failed: {}",
            err
        ),
    }
}
