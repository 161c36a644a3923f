use serde::Deserialize;

use super::chat_completion::{FinishReason, MessageRole};

/// A delta message as returned by OpenAI when `stream = true`.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionMessageDelta {
    pub role: Option<MessageRole>,
    pub content: Option<String>,
}

/// A single streaming choice payload.
#[allow(dead_code)]
#[derive(Debug, Deserialize)]
pub struct ChatCompletionChunkChoice {
    #[serde(default)]
    pub index: i64,
    pub delta: ChatCompletionMessageDelta,
    #[serde(default)]
    pub finish_reason: Option<FinishReason>,
}

/// The outermost object sent by OpenAI for each SSE chunk.
///
/// Only `choices` is required; trimmed-down upstream payloads must still
/// decode, so every envelope field is optional.
#[allow(dead_code)]
#[derive(Debug, Deserialize)]
pub struct ChatCompletionChunkResponse {
    pub id: Option<String>,
    pub object: Option<String>,
    pub created: Option<i64>,
    pub model: Option<String>,
    pub choices: Vec<ChatCompletionChunkChoice>,
}
