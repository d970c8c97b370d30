//! ConversationStore trait definition.
//!
//! Transcript persistence follows a load-entire / mutate-in-memory /
//! write-entire discipline: there is no partial or append-only persistence,
//! and implementations must serialize writes so concurrent turns on distinct
//! conversations cannot corrupt records.

use errandry_types::conversation::{Conversation, ConversationId, ConversationSummary};
use errandry_types::error::StoreError;

/// Repository trait for transcript persistence.
///
/// Implementations live in errandry-infra (e.g., `JsonFileStore`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait ConversationStore: Send + Sync {
    /// Load the full transcript for an id, or `None` if no record exists.
    fn load(
        &self,
        id: &ConversationId,
    ) -> impl std::future::Future<Output = Result<Option<Conversation>, StoreError>> + Send;

    /// Write the full transcript, replacing any existing record.
    fn save(
        &self,
        conversation: &Conversation,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// List all stored conversations, ordered by id ascending (UUID v7 ids
    /// make this creation order).
    fn list(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<ConversationSummary>, StoreError>> + Send;
}
