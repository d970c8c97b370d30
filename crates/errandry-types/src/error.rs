use thiserror::Error;

use crate::conversation::ConversationId;
use crate::llm::GenerationError;
use crate::search::SearchError;

/// Errors from transcript store operations (used by trait definitions in
/// errandry-core).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("conversation not found: {0}")]
    NotFound(ConversationId),
}

/// Fatal-for-the-turn failures surfaced by `submit_turn`.
///
/// Delivery and extraction failures never appear here: they are rendered as
/// transcript content by the router. When a turn fails with this error the
/// stored transcript keeps its exact pre-turn state.
#[derive(Debug, Error)]
pub enum TurnError {
    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("search failed: {0}")]
    Search(#[from] SearchError),

    #[error("store failed: {0}")]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let id = ConversationId::new();
        let err = StoreError::NotFound(id);
        assert_eq!(err.to_string(), format!("conversation not found: {id}"));
    }

    #[test]
    fn test_turn_error_wraps_generation_faults() {
        let err: TurnError = GenerationError::AuthenticationFailed.into();
        assert_eq!(err.to_string(), "generation failed: authentication failed");
        assert!(matches!(err, TurnError::Generation(_)));
    }

    #[test]
    fn test_turn_error_wraps_search_faults() {
        let err: TurnError = SearchError::RateLimited.into();
        assert_eq!(err.to_string(), "search failed: rate limited");
    }
}
