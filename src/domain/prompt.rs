use serde_json::{Map, Value};

const TRANSLATOR_INSTRUCTION: &str = "You are a professional translator. \
Translate the user's text into natural, fluent English unless the context asks for another target language. \
Preserve meaning, tone, and formatting. \
Reply with the translation only, without explanations, quotes, or notes.";

/// Build the system instruction sent with every translation.
///
/// Non-empty metadata is appended as JSON so the model can use it as context.
pub fn system_prompt(metadata: &Map<String, Value>) -> String {
    if metadata.is_empty() {
        return TRANSLATOR_INSTRUCTION.to_string();
    }

    // Map<String, Value> 序列化不会失败
    let context = serde_json::to_string(metadata).unwrap_or_default();
    format!("{TRANSLATOR_INSTRUCTION}\n\nAdditional context (JSON): {context}")
}
