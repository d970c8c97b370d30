//! Answer node: rebuild a role-tagged prompt from the transcript and ask for
//! exactly one assistant reply.
//!
//! Prompt reconstruction is selective. User entries become user turns, search
//! payloads become system turns with the marker swapped for a preamble, and
//! everything else (decision labels, tool outcomes, prior assistant replies)
//! stays out of the prompt.

use errandry_types::conversation::{ChatEntry, ChatRole};
use errandry_types::llm::{GenerationError, GenerationRequest, PromptMessage, PromptRole};

use crate::agent::search::SEARCH_RESULT_MARKER;
use crate::port::TextGenerator;

/// Fixed conservative instruction prepended to every answer prompt.
pub const ANSWER_SYSTEM_PROMPT: &str =
    "You are a precise AI assistant. Do NOT hallucinate. If unsure, respond: 'I am not sure.'";

/// Preamble replacing the marker on search payloads promoted into the prompt.
pub const SEARCH_INFO_PREAMBLE: &str = "Here is verified search info:\n";

/// Output budget for the answer call.
const ANSWER_MAX_TOKENS: u32 = 2048;

/// Build the prompt sequence for the answer call.
pub fn build_answer_prompt(messages: &[ChatEntry]) -> Vec<PromptMessage> {
    let mut prompt = Vec::new();
    for entry in messages {
        match entry.role {
            ChatRole::Human => prompt.push(PromptMessage {
                role: PromptRole::User,
                content: entry.content.clone(),
            }),
            ChatRole::System => {
                if let Some(payload) = entry.content.strip_prefix(SEARCH_RESULT_MARKER) {
                    prompt.push(PromptMessage {
                        role: PromptRole::System,
                        content: format!("{SEARCH_INFO_PREAMBLE}{}", payload.trim()),
                    });
                }
            }
            ChatRole::Ai => {}
        }
    }
    prompt
}

/// Generate the turn's single assistant reply.
///
/// Deterministic sampling (temperature 0.0) with a bounded output budget.
/// The response text is appended raw, untrimmed.
#[tracing::instrument(
    name = "compose_answer",
    skip(generator, messages),
    fields(provider = generator.name())
)]
pub async fn compose_answer<G: TextGenerator>(
    generator: &G,
    messages: &[ChatEntry],
) -> Result<ChatEntry, GenerationError> {
    let request = GenerationRequest {
        messages: build_answer_prompt(messages),
        system: Some(ANSWER_SYSTEM_PROMPT.to_string()),
        temperature: 0.0,
        max_tokens: ANSWER_MAX_TOKENS,
    };

    let text = generator.complete(&request).await?;
    Ok(ChatEntry::ai(text))
}
