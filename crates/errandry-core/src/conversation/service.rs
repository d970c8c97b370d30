//! Conversation service orchestrating turn submission and persistence.
//!
//! `ConversationService` owns the transcripts: it loads (or creates) the
//! addressed conversation, appends the user entry, runs the turn router, and
//! persists the result in one write. Persistence is all-or-nothing per turn:
//! a fatal router error leaves the stored transcript in its exact pre-turn
//! state.

use errandry_types::conversation::{
    ChatEntry, Conversation, ConversationId, ConversationSummary, TurnReceipt,
};
use errandry_types::error::{StoreError, TurnError};
use tracing::info;

use crate::agent::TurnRouter;
use crate::conversation::repository::ConversationStore;
use crate::port::{Mailer, TextGenerator, WebSearcher};

/// Orchestrates transcript lifecycle and turn execution.
///
/// Generic over [`ConversationStore`] and the three capability ports so that
/// errandry-core never depends on errandry-infra.
pub struct ConversationService<R, G, S, M>
where
    R: ConversationStore,
    G: TextGenerator,
    S: WebSearcher,
    M: Mailer,
{
    store: R,
    router: TurnRouter<G, S, M>,
}

impl<R, G, S, M> ConversationService<R, G, S, M>
where
    R: ConversationStore,
    G: TextGenerator,
    S: WebSearcher,
    M: Mailer,
{
    pub fn new(store: R, router: TurnRouter<G, S, M>) -> Self {
        Self { store, router }
    }

    /// Access the transcript store.
    pub fn store(&self) -> &R {
        &self.store
    }

    // --- Turn submission ---

    /// Submit one user turn and run it to completion.
    ///
    /// The addressed conversation is created empty on first reference. The
    /// returned receipt carries every entry the turn appended, the user entry
    /// first, in visitation order. Nothing is persisted when the router
    /// returns a fatal error.
    #[tracing::instrument(
        name = "submit_turn",
        skip(self, user_text),
        fields(conversation_id = %id)
    )]
    pub async fn submit_turn(
        &self,
        id: &ConversationId,
        user_text: &str,
    ) -> Result<TurnReceipt, TurnError> {
        let mut conversation = self
            .store
            .load(id)
            .await?
            .unwrap_or_else(|| Conversation::new(*id));

        conversation.push(ChatEntry::human(user_text));
        let delta = self.router.run_turn(&conversation.messages).await?;
        conversation.messages.extend(delta.iter().cloned());

        self.store.save(&conversation).await.map_err(TurnError::Store)?;
        info!(appended = delta.len() + 1, "turn committed");

        let mut appended = vec![ChatEntry::human(user_text)];
        appended.extend(delta);
        Ok(TurnReceipt {
            conversation_id: *id,
            appended,
        })
    }

    // --- Conversation lifecycle ---

    /// Create and persist a new empty conversation.
    pub async fn create(&self) -> Result<Conversation, StoreError> {
        let conversation = Conversation::new(ConversationId::new());
        self.store.save(&conversation).await?;
        info!(conversation_id = %conversation.id, "conversation created");
        Ok(conversation)
    }

    /// Load the full transcript for an id.
    pub async fn load(&self, id: &ConversationId) -> Result<Option<Conversation>, StoreError> {
        self.store.load(id).await
    }

    /// List all stored conversations.
    pub async fn list(&self) -> Result<Vec<ConversationSummary>, StoreError> {
        self.store.list().await
    }

    /// Update the display title of a stored conversation.
    pub async fn rename(&self, id: &ConversationId, title: &str) -> Result<(), StoreError> {
        let mut conversation = self.store.load(id).await?.ok_or(StoreError::NotFound(*id))?;
        conversation.title = title.to_string();
        self.store.save(&conversation).await?;
        info!(conversation_id = %id, "conversation renamed");
        Ok(())
    }

    /// Truncate a conversation's message list to empty. The title is kept.
    pub async fn clear(&self, id: &ConversationId) -> Result<(), StoreError> {
        let mut conversation = self.store.load(id).await?.ok_or(StoreError::NotFound(*id))?;
        conversation.clear();
        self.store.save(&conversation).await?;
        info!(conversation_id = %id, "conversation cleared");
        Ok(())
    }

    /// Export a transcript as pretty-printed JSON in the persisted record
    /// shape (`{"title", "messages"}`).
    pub async fn export_json(&self, id: &ConversationId) -> Result<String, StoreError> {
        let conversation = self.store.load(id).await?.ok_or(StoreError::NotFound(*id))?;
        let record = serde_json::json!({
            "title": conversation.title,
            "messages": conversation.messages,
        });
        Ok(serde_json::to_string_pretty(&record)?)
    }
}
