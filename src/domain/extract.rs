//! Pull translation text out of backend replies.
//!
//! Every function here is total: unexpected shapes produce an empty string,
//! never an error.

use serde_json::{Map, Value};

/// The shapes a backend's content field is known to take.
#[derive(Debug, Clone, Copy)]
pub enum ReplyContent<'a> {
    /// `"content": "text"`
    Text(&'a str),
    /// `"content": ["text", {"type": "text", "text": "..."}, ...]`
    Parts(&'a [Value]),
    /// `"content": {"text": "..."}` or `{"content": "..."}`
    Object(&'a Map<String, Value>),
    /// Missing, null, numbers, booleans.
    Unknown,
}

impl<'a> ReplyContent<'a> {
    pub fn classify(value: Option<&'a Value>) -> Self {
        match value {
            Some(Value::String(s)) => ReplyContent::Text(s),
            Some(Value::Array(parts)) => ReplyContent::Parts(parts),
            Some(Value::Object(map)) => ReplyContent::Object(map),
            _ => ReplyContent::Unknown,
        }
    }

    /// Concatenate every text-bearing piece with single spaces, then trim.
    pub fn text(&self) -> String {
        match self {
            ReplyContent::Text(s) => s.trim().to_string(),
            ReplyContent::Parts(parts) => parts
                .iter()
                .filter_map(part_text)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
                .trim()
                .to_string(),
            ReplyContent::Object(map) => object_text(map)
                .map(|s| s.trim().to_string())
                .unwrap_or_default(),
            ReplyContent::Unknown => String::new(),
        }
    }
}

fn part_text(part: &Value) -> Option<&str> {
    match part {
        Value::String(s) => Some(s.as_str()),
        Value::Object(map) => object_text(map),
        _ => None,
    }
}

// 优先 text，其次 content；非字符串字段视为无文本
fn object_text(map: &Map<String, Value>) -> Option<&str> {
    map.get("text")
        .and_then(Value::as_str)
        .or_else(|| map.get("content").and_then(Value::as_str))
}

/// xAI chat completions: `choices[0].message.content`.
pub fn xai_text(payload: &Value) -> String {
    let content = payload
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"));
    ReplyContent::classify(content).text()
}

/// Anthropic messages: top-level `content` block list.
pub fn claude_text(payload: &Value) -> String {
    ReplyContent::classify(payload.get("content")).text()
}
