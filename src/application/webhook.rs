use crate::domain::error::GatewayError;
use crate::domain::model::{WebhookReply, WebhookRequest};
use serde_json::Value;

pub const WEBHOOK_HINT: &str = r#"Send { "text": "hello" }"#;

/// Answer "hello" with "world"; anything else gets the usage hint.
pub fn reply(request: &WebhookRequest) -> Result<WebhookReply, GatewayError> {
    let text = match &request.text {
        Value::String(s) => s.trim().to_lowercase(),
        _ => String::new(),
    };

    if text == "hello" {
        Ok(WebhookReply {
            text: "world".to_string(),
        })
    } else {
        Err(GatewayError::validation(WEBHOOK_HINT))
    }
}
