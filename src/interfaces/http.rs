//! HTTP surface: routers, handlers and error rendering.

use crate::application::{translate, webhook};
use crate::domain::error::GatewayError;
use crate::domain::model::{ErrorBody, TranslationRequest, WebhookRequest};
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tower_http::trace::TraceLayer;

pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON payload.";
pub const INVALID_FORM_MESSAGE: &str = "Invalid form payload.";

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::BAD_GATEWAY);
        let body = ErrorBody {
            error: self.public_message().to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// The translation gateway: `POST /`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", post(translate_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The hello/world webhook: `POST /`.
pub fn webhook_router() -> Router {
    Router::new()
        .route("/", post(webhook_handler))
        .layer(TraceLayer::new_for_http())
}

async fn translate_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request: TranslationRequest = match decode_body(&headers, &body) {
        Ok(request) => request,
        Err(err) => return err.into_response(),
    };

    match translate::translate(&state.registry, request).await {
        Ok(result) => Json(result).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn webhook_handler(headers: HeaderMap, body: Bytes) -> Response {
    let request: WebhookRequest = match decode_body(&headers, &body) {
        Ok(request) => request,
        Err(err) => return err.into_response(),
    };

    match webhook::reply(&request) {
        Ok(reply) => Json(reply).into_response(),
        Err(err) => err.into_response(),
    }
}

/// Decode a request body as a form or a JSON object.
///
/// An absent body decodes to the default (every field missing). Form bodies are
/// recognised by `Content-Type`; everything else must be a JSON object and is
/// rejected before any business logic runs.
fn decode_body<T>(headers: &HeaderMap, body: &[u8]) -> Result<T, GatewayError>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    if is_form(headers) {
        return serde_urlencoded::from_bytes(body).map_err(|e| {
            tracing::debug!(error = %e, "malformed form body");
            GatewayError::validation(INVALID_FORM_MESSAGE)
        });
    }

    // 结构体可以从 JSON 数组反序列化，所以先确认是对象
    let value = match serde_json::from_slice::<Value>(body) {
        Ok(value @ Value::Object(_)) => value,
        Ok(_) => {
            tracing::debug!("request body is not a JSON object");
            return Err(GatewayError::validation(INVALID_JSON_MESSAGE));
        }
        Err(e) => {
            tracing::debug!(error = %e, "malformed request body");
            return Err(GatewayError::validation(INVALID_JSON_MESSAGE));
        }
    };

    serde_json::from_value(value).map_err(|e| {
        tracing::debug!(error = %e, "request body has an unexpected structure");
        GatewayError::validation(INVALID_JSON_MESSAGE)
    })
}

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|ct| ct.split(';').next())
        .is_some_and(|mime| {
            mime.trim()
                .eq_ignore_ascii_case("application/x-www-form-urlencoded")
        })
}
