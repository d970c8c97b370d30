//! JSON-file implementation of [`ConversationStore`].
//!
//! One `{conversation_id}.json` record per conversation under the store
//! root, in the shape `{"title": ..., "messages": [{"type", "content"}]}`.
//! Writes replace the whole record (load-entire, mutate, write-entire) and
//! are serialized through an internal mutex so concurrent turns on distinct
//! conversations cannot interleave partial writes.

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use errandry_core::conversation::ConversationStore;
use errandry_types::conversation::{ChatEntry, Conversation, ConversationId, ConversationSummary};
use errandry_types::error::StoreError;

/// The persisted record shape. `title` tolerates absence on load for
/// compatibility with bare message arrays written by hand; the display title
/// then falls back to the derived placeholder.
#[derive(Debug, Serialize, Deserialize)]
struct StoredConversation {
    #[serde(default)]
    title: Option<String>,
    messages: Vec<ChatEntry>,
}

/// File-backed transcript store.
pub struct JsonFileStore {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Create a store rooted at the given directory. The directory is
    /// created lazily on first write.
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            write_lock: Mutex::new(()),
        }
    }

    fn record_path(&self, id: &ConversationId) -> PathBuf {
        self.root.join(format!("{id}.json"))
    }

    async fn load_record(&self, id: &ConversationId) -> Result<Option<Conversation>, StoreError> {
        let path = self.record_path(id);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(StoreError::Io(err)),
        };

        let stored: StoredConversation = serde_json::from_str(&content)?;
        Ok(Some(Conversation {
            id: *id,
            title: stored
                .title
                .unwrap_or_else(|| Conversation::default_title(id)),
            messages: stored.messages,
        }))
    }
}

impl ConversationStore for JsonFileStore {
    async fn load(&self, id: &ConversationId) -> Result<Option<Conversation>, StoreError> {
        self.load_record(id).await
    }

    async fn save(&self, conversation: &Conversation) -> Result<(), StoreError> {
        let stored = StoredConversation {
            title: Some(conversation.title.clone()),
            messages: conversation.messages.clone(),
        };
        let content = serde_json::to_string_pretty(&stored)?;
        let path = self.record_path(&conversation.id);

        let _guard = self.write_lock.lock().await;
        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(&path, content).await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<ConversationSummary>, StoreError> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(StoreError::Io(err)),
        };

        let mut summaries = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let Ok(id) = ConversationId::from_str(stem) else {
                tracing::warn!(file = %path.display(), "skipping non-conversation file");
                continue;
            };

            if let Some(conversation) = self.load_record(&id).await? {
                let updated_at = entry
                    .metadata()
                    .await
                    .ok()
                    .and_then(|m| m.modified().ok())
                    .map(chrono::DateTime::from);
                summaries.push(ConversationSummary {
                    id,
                    title: conversation.title,
                    message_count: conversation.messages.len(),
                    updated_at,
                });
            }
        }

        // UUID v7 ids sort by creation time.
        summaries.sort_by_key(|s| s.id.0);
        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_conversation() -> Conversation {
        let mut conversation = Conversation::new(ConversationId::new());
        conversation.push(ChatEntry::human("What's 2+2?"));
        conversation.push(ChatEntry::system("NO_SEARCH"));
        conversation.push(ChatEntry::ai("4"));
        conversation
    }

    #[tokio::test]
    async fn test_save_load_roundtrip() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().to_path_buf());

        let conversation = sample_conversation();
        store.save(&conversation).await.unwrap();

        let loaded = store.load(&conversation.id).await.unwrap().unwrap();
        assert_eq!(loaded, conversation);
    }

    #[tokio::test]
    async fn test_roundtrip_preserves_empty_and_multiline_content() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().to_path_buf());

        let mut conversation = Conversation::new(ConversationId::new());
        conversation.push(ChatEntry::human(""));
        conversation.push(ChatEntry::ai("line one\nline two\n"));
        conversation.push(ChatEntry::system("SEARCH_RESULT: a\nb"));
        store.save(&conversation).await.unwrap();

        let loaded = store.load(&conversation.id).await.unwrap().unwrap();
        assert_eq!(loaded.messages, conversation.messages);
    }

    #[tokio::test]
    async fn test_load_missing_returns_none() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().to_path_buf());
        let loaded = store.load(&ConversationId::new()).await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_record_uses_wire_shape() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().to_path_buf());

        let conversation = sample_conversation();
        store.save(&conversation).await.unwrap();

        let raw = tokio::fs::read_to_string(store.record_path(&conversation.id))
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["title"], conversation.title);
        assert_eq!(value["messages"][0]["type"], "human");
        assert_eq!(value["messages"][1]["type"], "system");
        assert_eq!(value["messages"][2]["type"], "ai");
    }

    #[tokio::test]
    async fn test_load_without_title_derives_placeholder() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().to_path_buf());

        let id = ConversationId::new();
        tokio::fs::create_dir_all(dir.path()).await.unwrap();
        tokio::fs::write(
            store.record_path(&id),
            r#"{"messages": [{"type": "human", "content": "hi"}]}"#,
        )
        .await
        .unwrap();

        let loaded = store.load(&id).await.unwrap().unwrap();
        assert_eq!(loaded.title, Conversation::default_title(&id));
        assert_eq!(loaded.messages, vec![ChatEntry::human("hi")]);
    }

    #[tokio::test]
    async fn test_save_replaces_existing_record() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().to_path_buf());

        let mut conversation = sample_conversation();
        store.save(&conversation).await.unwrap();

        conversation.clear();
        store.save(&conversation).await.unwrap();

        let loaded = store.load(&conversation.id).await.unwrap().unwrap();
        assert!(loaded.messages.is_empty());
    }

    #[tokio::test]
    async fn test_list_orders_by_id_and_skips_foreign_files() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().to_path_buf());

        let first = sample_conversation();
        let second = sample_conversation();
        store.save(&first).await.unwrap();
        store.save(&second).await.unwrap();
        tokio::fs::write(dir.path().join("notes.json"), "{}")
            .await
            .unwrap();
        tokio::fs::write(dir.path().join("README.md"), "hi")
            .await
            .unwrap();

        let summaries = store.list().await.unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].id, first.id);
        assert_eq!(summaries[1].id, second.id);
        assert_eq!(summaries[0].message_count, 3);
        assert!(summaries[0].updated_at.is_some());
    }

    #[tokio::test]
    async fn test_list_on_missing_root_is_empty() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("never-created"));
        let summaries = store.list().await.unwrap();
        assert!(summaries.is_empty());
    }
}
