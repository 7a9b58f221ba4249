use crate::domain::error::GatewayError;
use crate::domain::extract::claude_text;
use crate::domain::model::{ProviderId, TranslateInput};
use crate::domain::prompt::system_prompt;
use crate::domain::traits::Translator;
use crate::infrastructure::config::Config;
use crate::infrastructure::network::client::{endpoint, finish, require_api_key, send};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;

const MESSAGES_PATH: &str = "/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

// Anthropic Messages API 请求体：system 单独成字段
#[derive(Serialize, Debug)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f64,
    system: &'a str,
    messages: Vec<UserMessage<'a>>,
}

#[derive(Serialize, Debug)]
struct UserMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Anthropic (Claude) translator
pub struct ClaudeTranslator {
    client: Client,
    config: Arc<Config>,
}

impl ClaudeTranslator {
    pub fn new(client: Client, config: Arc<Config>) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl Translator for ClaudeTranslator {
    fn id(&self) -> ProviderId {
        ProviderId::Claude
    }

    async fn translate(&self, input: &TranslateInput) -> Result<String, GatewayError> {
        let settings = &self.config.claude;
        let api_key = require_api_key(
            ProviderId::Claude,
            settings.api_key.as_deref(),
            "ANTHROPIC_API_KEY",
        )?;

        let system = system_prompt(&input.metadata);
        let body = MessagesRequest {
            model: &settings.model,
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
            system: &system,
            messages: vec![UserMessage {
                role: "user",
                content: &input.prompt,
            }],
        };

        tracing::debug!(model = %settings.model, "sending Anthropic messages request");
        let request = self
            .client
            .post(endpoint(&settings.base_url, MESSAGES_PATH))
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body);

        let reply = send(ProviderId::Claude, request).await?;
        finish(ProviderId::Claude, reply, claude_text)
    }
}
