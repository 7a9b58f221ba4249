//! Plumbing shared by every provider client: send, read, parse, classify.

use crate::domain::error::{GatewayError, ProviderFailure, BAD_GATEWAY};
use crate::domain::model::ProviderId;
use reqwest::{RequestBuilder, StatusCode};
use serde_json::{json, Value};

/// A fully-read upstream reply.
#[derive(Debug)]
pub struct UpstreamReply {
    pub status: StatusCode,
    pub payload: Value,
}

/// Parse a body as JSON, or wrap the raw text so it can still travel as diagnostics.
pub fn parse_payload(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| json!({ "raw": text }))
}

/// Send `request` and read the whole body.
///
/// Only failures that prevent getting a reply at all end up here as errors;
/// non-2xx replies are returned for the caller to classify.
pub async fn send(provider: ProviderId, request: RequestBuilder) -> Result<UpstreamReply, GatewayError> {
    let response = request
        .send()
        .await
        .map_err(|e| transport_error(provider, &e))?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| transport_error(provider, &e))?;

    Ok(UpstreamReply {
        status,
        payload: parse_payload(&text),
    })
}

/// Turn a reply into translation text using the backend's extractor.
pub fn finish<F>(provider: ProviderId, reply: UpstreamReply, extract: F) -> Result<String, GatewayError>
where
    F: Fn(&Value) -> String,
{
    if !reply.status.is_success() {
        return Err(GatewayError::provider(
            reply.status.as_u16(),
            ProviderFailure::UpstreamStatus,
            format!(
                "{} API request failed with status {}.",
                provider.display_name(),
                reply.status.as_u16()
            ),
            Some(reply.payload),
        ));
    }

    let translation = extract(&reply.payload);
    if translation.is_empty() {
        return Err(GatewayError::provider(
            BAD_GATEWAY,
            ProviderFailure::EmptyTranslation,
            format!("{} returned no translation text.", provider.display_name()),
            Some(reply.payload),
        ));
    }

    Ok(translation)
}

/// Fail fast when a backend's credential is missing or blank.
pub fn require_api_key<'a>(
    provider: ProviderId,
    api_key: Option<&'a str>,
    setting: &str,
) -> Result<&'a str, GatewayError> {
    match api_key.map(str::trim).filter(|k| !k.is_empty()) {
        Some(key) => Ok(key),
        None => Err(GatewayError::configuration(
            format!("{} provider is not configured.", provider.display_name()),
            Some(json!({ "provider": provider.as_str(), "missing": setting })),
        )),
    }
}

/// Join a configured base URL with a fixed API path.
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

fn transport_error(provider: ProviderId, err: &reqwest::Error) -> GatewayError {
    let message = if err.is_timeout() {
        format!("{} API request timed out.", provider.display_name())
    } else {
        format!("{} API request failed.", provider.display_name())
    };
    GatewayError::provider(
        BAD_GATEWAY,
        ProviderFailure::Transport,
        message,
        Some(json!({ "error": err.to_string() })),
    )
}
