use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Backends known to the gateway, in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Claude,
    Xai,
}

impl ProviderId {
    pub const ALL: [ProviderId; 2] = [ProviderId::Claude, ProviderId::Xai];

    /// Identifier used on the wire and in the registry.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Claude => "claude",
            ProviderId::Xai => "xai",
        }
    }

    /// Human-facing backend name used in error messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderId::Claude => "Claude",
            ProviderId::Xai => "xAI",
        }
    }

    /// Case-insensitive parse of a trimmed identifier.
    pub fn parse(value: &str) -> Option<ProviderId> {
        let key = value.trim().to_lowercase();
        ProviderId::ALL.into_iter().find(|id| id.as_str() == key)
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// 入站请求体，字段保持松散类型，由编排层负责强制转换
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TranslationRequest {
    #[serde(default)]
    pub provider: Value,
    #[serde(default)]
    pub prompt: Value,
    #[serde(default)]
    pub metadata: Value,
}

impl TranslationRequest {
    /// Prompt as a trimmed string; non-string values count as empty.
    pub fn cleaned_prompt(&self) -> String {
        match &self.prompt {
            Value::String(s) => s.trim().to_string(),
            _ => String::new(),
        }
    }

    /// Provider coerced to a trimmed string.
    pub fn provider_key(&self) -> String {
        let raw = match &self.provider {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            other => other.to_string(),
        };
        raw.trim().to_string()
    }

    /// Metadata as a mapping; anything that is not an object is treated as empty.
    pub fn metadata_map(&self) -> Map<String, Value> {
        match &self.metadata {
            Value::Object(map) => map.clone(),
            _ => Map::new(),
        }
    }
}

/// What a provider client receives for one translation.
#[derive(Debug, Clone)]
pub struct TranslateInput {
    pub prompt: String,
    pub metadata: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub translation: String,
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

// 简单 webhook 变体的请求/响应
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookRequest {
    #[serde(default)]
    pub text: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookReply {
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn provider_parse_is_case_insensitive() {
        assert_eq!(ProviderId::parse("Claude"), Some(ProviderId::Claude));
        assert_eq!(ProviderId::parse("  XAI "), Some(ProviderId::Xai));
        assert_eq!(ProviderId::parse("openai"), None);
    }

    #[test]
    fn non_string_prompt_is_empty() {
        let req: TranslationRequest = serde_json::from_value(json!({ "prompt": 42 })).unwrap();
        assert_eq!(req.cleaned_prompt(), "");

        let req: TranslationRequest =
            serde_json::from_value(json!({ "prompt": "  Bonjour \n" })).unwrap();
        assert_eq!(req.cleaned_prompt(), "Bonjour");
    }

    #[test]
    fn provider_key_coerces_scalars() {
        let req: TranslationRequest =
            serde_json::from_value(json!({ "prompt": "x", "provider": 7 })).unwrap();
        assert_eq!(req.provider_key(), "7");

        let req: TranslationRequest = serde_json::from_value(json!({ "prompt": "x" })).unwrap();
        assert_eq!(req.provider_key(), "");
    }

    #[test]
    fn non_object_metadata_is_empty() {
        let req: TranslationRequest =
            serde_json::from_value(json!({ "prompt": "x", "metadata": "fr" })).unwrap();
        assert!(req.metadata_map().is_empty());
    }
}
