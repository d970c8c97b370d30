//! Conversation persistence trait and the service that owns transcripts.

pub mod repository;
pub mod service;

pub use repository::ConversationStore;
pub use service::ConversationService;
