//! Intent classification for one turn.
//!
//! `classify_intent` reads the latest user-authored entry, asks the
//! generation capability for one of the three route labels, and coerces
//! anything out of set to the safe default. The decision is returned as a
//! typed value; the router decides whether to record it in the transcript.

use errandry_types::conversation::{ChatEntry, ChatRole};
use errandry_types::llm::{GenerationError, GenerationRequest, PromptMessage, PromptRole};
use errandry_types::route::RouteDecision;

use crate::port::TextGenerator;

/// System prompt for the classification call.
pub const CLASSIFY_SYSTEM_PROMPT: &str = r#"Classify the user's intent. Respond ONLY with one of:
- SEND_EMAIL
- SEARCH_REQUIRED
- NO_SEARCH"#;

/// Output budget for the classification call. The labels are a few tokens
/// each; anything longer is out of set anyway.
const CLASSIFY_MAX_TOKENS: u32 = 16;

/// Content of the latest user-authored entry, scanning backward.
///
/// Returns the empty string when no user entry exists; this is a defined
/// fallback, not an error. Never returns system or assistant content.
pub fn latest_user_text(messages: &[ChatEntry]) -> &str {
    messages
        .iter()
        .rev()
        .find(|entry| entry.role == ChatRole::Human)
        .map(|entry| entry.content.as_str())
        .unwrap_or("")
}

/// Classify the latest user turn into a [`RouteDecision`].
///
/// The raw model output is trimmed and matched case-insensitively against
/// the label set. Any out-of-set output coerces to [`RouteDecision::NoSearch`]
/// deterministically, never to the email branch.
#[tracing::instrument(
    name = "classify_intent",
    skip(generator, messages),
    fields(provider = generator.name())
)]
pub async fn classify_intent<G: TextGenerator>(
    generator: &G,
    messages: &[ChatEntry],
) -> Result<RouteDecision, GenerationError> {
    let last_user = latest_user_text(messages);

    let request = GenerationRequest {
        messages: vec![PromptMessage {
            role: PromptRole::User,
            content: last_user.to_string(),
        }],
        system: Some(CLASSIFY_SYSTEM_PROMPT.to_string()),
        temperature: 0.0,
        max_tokens: CLASSIFY_MAX_TOKENS,
    };

    let raw = generator.complete(&request).await?;
    let decision = raw
        .trim()
        .parse::<RouteDecision>()
        .unwrap_or(RouteDecision::NoSearch);

    tracing::debug!(raw = raw.trim(), decision = %decision, "intent classified");
    Ok(decision)
}
