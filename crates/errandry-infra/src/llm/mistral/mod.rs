//! MistralProvider -- concrete [`TextGenerator`] implementation for Mistral.
//!
//! Sends single-shot requests to the Mistral chat completions API
//! (`/v1/chat/completions`) with bearer authentication. No streaming and no
//! internal retry; one request per `complete` call.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

mod types;

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use errandry_core::port::TextGenerator;
use errandry_types::llm::{GenerationError, GenerationRequest};

use types::{MistralMessage, MistralRequest, MistralResponse};

/// Mistral generation provider.
///
/// The top-level `system` text of a [`GenerationRequest`] is folded into the
/// wire prompt as a leading system-role message, since the Mistral API takes
/// system text as a message rather than a separate field.
pub struct MistralProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
}

impl MistralProvider {
    /// Create a new Mistral provider for the given model.
    pub fn new(api_key: SecretString, model: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key,
            base_url: "https://api.mistral.ai".to_string(),
            model,
        }
    }

    /// The model identifier sent with every request.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Override the API origin (self-hosted compatible endpoints, tests).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Convert a generic [`GenerationRequest`] into a [`MistralRequest`].
    fn to_mistral_request(&self, request: &GenerationRequest) -> MistralRequest {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        if let Some(system) = &request.system {
            messages.push(MistralMessage {
                role: "system".to_string(),
                content: system.clone(),
            });
        }
        messages.extend(request.messages.iter().map(|m| MistralMessage {
            role: m.role.to_string(),
            content: m.content.clone(),
        }));

        MistralRequest {
            model: self.model.clone(),
            messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }
}

// MistralProvider intentionally does NOT derive Debug so the API key cannot
// leak through formatting, on top of the SecretString wrapping.

impl TextGenerator for MistralProvider {
    fn name(&self) -> &str {
        "mistral"
    }

    async fn complete(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let body = self.to_mistral_request(request);
        let url = self.url("/v1/chat/completions");

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 => GenerationError::AuthenticationFailed,
                422 => GenerationError::InvalidRequest(error_body),
                429 => GenerationError::RateLimited {
                    retry_after_ms: None,
                },
                503 => GenerationError::Overloaded(error_body),
                _ => GenerationError::Provider {
                    message: format!("HTTP {status}: {error_body}"),
                },
            });
        }

        let mistral_resp: MistralResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Deserialization(format!("failed to parse response: {e}")))?;

        let choice = mistral_resp
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GenerationError::Deserialization("response had no choices".to_string()))?;

        Ok(choice.message.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use errandry_types::llm::{PromptMessage, PromptRole};

    fn make_provider() -> MistralProvider {
        MistralProvider::new(
            SecretString::from("test-key-not-real"),
            "mistral-large-latest".to_string(),
        )
    }

    #[test]
    fn test_provider_name() {
        assert_eq!(make_provider().name(), "mistral");
    }

    #[test]
    fn test_base_url_override() {
        let provider = make_provider().with_base_url("http://localhost:8080".to_string());
        assert_eq!(
            provider.url("/v1/chat/completions"),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[test]
    fn test_system_text_becomes_leading_message() {
        let provider = make_provider();
        let request = GenerationRequest {
            messages: vec![PromptMessage {
                role: PromptRole::User,
                content: "Hello".to_string(),
            }],
            system: Some("Be helpful.".to_string()),
            temperature: 0.0,
            max_tokens: 2048,
        };

        let wire = provider.to_mistral_request(&request);
        assert_eq!(wire.model, "mistral-large-latest");
        assert_eq!(wire.messages.len(), 2);
        assert_eq!(wire.messages[0].role, "system");
        assert_eq!(wire.messages[0].content, "Be helpful.");
        assert_eq!(wire.messages[1].role, "user");
    }

    #[test]
    fn test_no_system_message_when_absent() {
        let provider = make_provider();
        let request = GenerationRequest {
            messages: vec![PromptMessage {
                role: PromptRole::User,
                content: "Hello".to_string(),
            }],
            system: None,
            temperature: 0.0,
            max_tokens: 16,
        };

        let wire = provider.to_mistral_request(&request);
        assert_eq!(wire.messages.len(), 1);
        assert_eq!(wire.messages[0].role, "user");
        assert_eq!(wire.max_tokens, 16);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_provider_error() {
        // Port 9 (discard) refuses connections on the loopback.
        let provider = make_provider().with_base_url("http://127.0.0.1:9".to_string());
        let request = GenerationRequest {
            messages: vec![PromptMessage {
                role: PromptRole::User,
                content: "hi".to_string(),
            }],
            system: None,
            temperature: 0.0,
            max_tokens: 16,
        };

        let err = provider.complete(&request).await.unwrap_err();
        assert!(matches!(err, GenerationError::Provider { .. }));
    }
}
