//! Application state wiring the service to concrete adapters.
//!
//! `AppState` pins the generic `ConversationService` to the infra
//! implementations: the JSON file store plus the Mistral, Tavily, and
//! SendGrid adapters. Credentials come from the environment; endpoints and
//! knobs from `config.toml`.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;

use errandry_core::agent::TurnRouter;
use errandry_core::conversation::ConversationService;
use errandry_infra::config::load_settings;
use errandry_infra::llm::MistralProvider;
use errandry_infra::mail::SendGridMailer;
use errandry_infra::search::TavilyClient;
use errandry_infra::secret::env_secret;
use errandry_infra::store::{resolve_data_dir, JsonFileStore};

/// The service generics pinned to the infra implementations.
pub type ConcreteConversationService =
    ConversationService<JsonFileStore, MistralProvider, TavilyClient, SendGridMailer>;

/// Shared application state for all CLI commands.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ConcreteConversationService>,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Initialize the application state: resolve the data directory, load
    /// settings, and wire the adapters into the service.
    ///
    /// Generation and search credentials are required; email credentials are
    /// optional and their absence degrades the email branch to a
    /// not-configured outcome message.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let settings = load_settings(&data_dir).await;

        let mistral_key = env_secret("MISTRAL_API_KEY")
            .context("MISTRAL_API_KEY is not set (export it to enable generation)")?;
        let tavily_key = env_secret("TAVILY_API_KEY")
            .context("TAVILY_API_KEY is not set (export it to enable web search)")?;
        let sendgrid_key = env_secret("SENDGRID_API_KEY");
        if sendgrid_key.is_none() {
            tracing::debug!("SENDGRID_API_KEY not set; email turns will report not-configured");
        }

        // The environment wins over config.toml for the sender address.
        let from_email = std::env::var("ERRANDRY_FROM_EMAIL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .or_else(|| settings.mail.from_email.clone());

        let generator = MistralProvider::new(mistral_key, settings.llm.model.clone())
            .with_base_url(settings.llm.base_url.clone());
        let searcher = TavilyClient::new(tavily_key).with_base_url(settings.search.base_url.clone());
        let mailer = SendGridMailer::new(sendgrid_key, from_email)
            .with_base_url(settings.mail.base_url.clone());

        let router = TurnRouter::new(generator, searcher, mailer, settings.search.max_results);
        let store = JsonFileStore::new(data_dir.join("conversations"));
        let service = ConversationService::new(store, router);

        Ok(Self {
            service: Arc::new(service),
            data_dir,
        })
    }
}
