//! TextGenerator trait definition.

use errandry_types::llm::{GenerationError, GenerationRequest};

/// Capability port for single-shot text generation.
///
/// Implementations live in errandry-infra (e.g., `MistralProvider`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition). One call per
/// request, no streaming, no internal retry; a provider fault is returned as
/// a [`GenerationError`] and is fatal for the turn that issued it.
pub trait TextGenerator: Send + Sync {
    /// Provider name for logging (e.g., "mistral").
    fn name(&self) -> &str;

    /// Run one completion and return the raw response text.
    fn complete(
        &self,
        request: &GenerationRequest,
    ) -> impl std::future::Future<Output = Result<String, GenerationError>> + Send;
}
