//! Conversation and transcript types for Errandry.
//!
//! A [`Conversation`] is an ordered, append-only sequence of [`ChatEntry`]
//! values identified by a [`ConversationId`]. The serialized form of an entry
//! (`{"type": "human"|"ai"|"system", "content": ...}`) is exactly the shape
//! persisted by the transcript store, so store round-trips preserve role tags
//! and content byte for byte.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Unique identifier for a conversation, wrapping a UUID v7 (time-sortable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationId(pub Uuid);

impl ConversationId {
    /// Create a new ConversationId using UUID v7 (time-sortable).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create a ConversationId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// First six hex characters of the id, used for derived display titles.
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..6].to_string()
    }
}

impl Default for ConversationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ConversationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Role tag of a transcript entry.
///
/// The wire names (`human`, `ai`, `system`) are part of the persisted
/// transcript format and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    Human,
    Ai,
    System,
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatRole::Human => write!(f, "human"),
            ChatRole::Ai => write!(f, "ai"),
            ChatRole::System => write!(f, "system"),
        }
    }
}

impl FromStr for ChatRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(ChatRole::Human),
            "ai" => Ok(ChatRole::Ai),
            "system" => Ok(ChatRole::System),
            other => Err(format!("invalid chat role: '{other}'")),
        }
    }
}

/// A single entry in a conversation transcript.
///
/// The role tag is immutable once created; transcripts only ever grow by
/// appending new entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEntry {
    #[serde(rename = "type")]
    pub role: ChatRole,
    pub content: String,
}

impl ChatEntry {
    /// Create a user-authored entry.
    pub fn human(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Human,
            content: content.into(),
        }
    }

    /// Create an assistant-authored entry.
    pub fn ai(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Ai,
            content: content.into(),
        }
    }

    /// Create a system entry (decision labels, search payloads, tool outcomes).
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }
}

/// The full ordered message history for one conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    pub id: ConversationId,
    /// Display title. Defaults to a placeholder derived from the id.
    pub title: String,
    pub messages: Vec<ChatEntry>,
}

impl Conversation {
    /// Create an empty conversation with the derived placeholder title.
    pub fn new(id: ConversationId) -> Self {
        let title = Self::default_title(&id);
        Self {
            id,
            title,
            messages: Vec::new(),
        }
    }

    /// Placeholder title derived from the id, e.g. `Chat 0192f3`.
    pub fn default_title(id: &ConversationId) -> String {
        format!("Chat {}", id.short())
    }

    /// Append an entry. The only mutation besides [`Conversation::clear`].
    pub fn push(&mut self, entry: ChatEntry) {
        self.messages.push(entry);
    }

    /// Truncate the message list to empty. The title is retained.
    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

/// Listing row for a stored conversation.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationSummary {
    pub id: ConversationId,
    pub title: String,
    pub message_count: usize,
    /// Last persisted-at time, when the store can report one.
    pub updated_at: Option<DateTime<Utc>>,
}

/// The messages appended by one completed turn, in visitation order.
///
/// Returned by the conversation service so callers can display exactly what
/// the turn produced without re-loading the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReceipt {
    pub conversation_id: ConversationId,
    pub appended: Vec<ChatEntry>,
}
