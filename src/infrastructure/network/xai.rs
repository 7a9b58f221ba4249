use crate::domain::error::GatewayError;
use crate::domain::extract::xai_text;
use crate::domain::model::{ProviderId, TranslateInput};
use crate::domain::prompt::system_prompt;
use crate::domain::traits::Translator;
use crate::infrastructure::config::Config;
use crate::infrastructure::network::client::{endpoint, finish, require_api_key, send};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;

const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

// OpenAI 兼容的 chat completions 请求体
#[derive(Serialize, Debug)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    stream: bool,
}

#[derive(Serialize, Debug)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// xAI (Grok) translator
pub struct XaiTranslator {
    client: Client,
    config: Arc<Config>,
}

impl XaiTranslator {
    pub fn new(client: Client, config: Arc<Config>) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl Translator for XaiTranslator {
    fn id(&self) -> ProviderId {
        ProviderId::Xai
    }

    async fn translate(&self, input: &TranslateInput) -> Result<String, GatewayError> {
        let settings = &self.config.xai;
        let api_key = require_api_key(ProviderId::Xai, settings.api_key.as_deref(), "XAI_API_KEY")?;

        let system = system_prompt(&input.metadata);
        let body = ChatCompletionRequest {
            model: &settings.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &system,
                },
                ChatMessage {
                    role: "user",
                    content: &input.prompt,
                },
            ],
            temperature: settings.temperature,
            stream: false,
        };

        tracing::debug!(model = %settings.model, "sending xAI chat completion");
        let request = self
            .client
            .post(endpoint(&settings.base_url, CHAT_COMPLETIONS_PATH))
            .bearer_auth(api_key)
            .json(&body);

        let reply = send(ProviderId::Xai, request).await?;
        finish(ProviderId::Xai, reply, xai_text)
    }
}
