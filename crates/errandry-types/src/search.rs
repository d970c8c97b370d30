//! Web search types for Errandry.

use serde::{Deserialize, Serialize};

/// One search result snippet.
///
/// Ephemeral: hits are folded into a single marker-prefixed transcript entry
/// by the search node and then discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub content: String,
}

/// Errors from the search capability.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("rate limited")]
    RateLimited,

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("invalid query: {0}")]
    InvalidQuery(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_hit_roundtrip() {
        let hit = SearchHit {
            title: "Rust".to_string(),
            url: "https://www.rust-lang.org".to_string(),
            content: "A language empowering everyone.".to_string(),
        };
        let json = serde_json::to_string(&hit).unwrap();
        let parsed: SearchHit = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, hit);
    }

    #[test]
    fn test_search_error_messages() {
        let err = SearchError::Provider {
            message: "upstream 500".to_string(),
        };
        assert_eq!(err.to_string(), "provider error: upstream 500");
    }
}
