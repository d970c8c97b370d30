//! WebSearcher trait definition.

use errandry_types::search::{SearchError, SearchHit};

/// Capability port for web search.
///
/// Implementations live in errandry-infra (e.g., `TavilyClient`). An empty
/// hit list is a valid non-error result; a provider fault is returned as a
/// [`SearchError`] and is fatal for the turn that issued it.
pub trait WebSearcher: Send + Sync {
    /// Provider name for logging (e.g., "tavily").
    fn name(&self) -> &str;

    /// Run one search, returning at most `max_results` hits in provider
    /// order. No re-ranking happens downstream.
    fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> impl std::future::Future<Output = Result<Vec<SearchHit>, SearchError>> + Send;
}
