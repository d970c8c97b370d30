//! Mistral chat completions API types.
//!
//! Mistral-specific request/response structures for HTTP communication with
//! the `/v1/chat/completions` endpoint. The provider-agnostic generation
//! types live in errandry-types.

use serde::{Deserialize, Serialize};

/// Request body for the Mistral chat completions API.
#[derive(Debug, Clone, Serialize)]
pub struct MistralRequest {
    pub model: String,
    pub messages: Vec<MistralMessage>,
    pub temperature: f64,
    pub max_tokens: u32,
}

/// A single message in a Mistral conversation.
#[derive(Debug, Clone, Serialize)]
pub struct MistralMessage {
    pub role: String,
    pub content: String,
}

/// Response body from the Mistral chat completions API.
#[derive(Debug, Clone, Deserialize)]
pub struct MistralResponse {
    pub choices: Vec<MistralChoice>,
}

/// One completion choice. The API returns exactly one unless `n` is set.
#[derive(Debug, Clone, Deserialize)]
pub struct MistralChoice {
    pub message: MistralResponseMessage,
}

/// The assistant message inside a choice.
#[derive(Debug, Clone, Deserialize)]
pub struct MistralResponseMessage {
    pub content: String,
}

/// Error body returned by the Mistral API on failure.
#[derive(Debug, Clone, Deserialize)]
pub struct MistralErrorBody {
    pub message: Option<String>,
}
