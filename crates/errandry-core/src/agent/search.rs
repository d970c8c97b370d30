//! Search node: one web search folded into a marker-prefixed system entry.
//!
//! The snippets are newline-joined in provider order. Zero hits produce a
//! "no results" payload that flows through to the answer node like any other
//! search result.

use errandry_types::conversation::ChatEntry;
use errandry_types::search::SearchError;

use crate::agent::classifier::latest_user_text;
use crate::port::WebSearcher;

/// Marker identifying search payloads in the transcript. The answer node
/// finds these entries by prefix match; no other entry may start with it.
pub const SEARCH_RESULT_MARKER: &str = "SEARCH_RESULT:";

/// Payload text when the provider returns zero hits.
pub const NO_RESULTS_TEXT: &str = "No results found.";

/// Run one search for the latest user message and fold the hits into a
/// single system entry.
#[tracing::instrument(
    name = "run_search",
    skip(searcher, messages),
    fields(provider = searcher.name(), max_results)
)]
pub async fn run_search<S: WebSearcher>(
    searcher: &S,
    messages: &[ChatEntry],
    max_results: usize,
) -> Result<ChatEntry, SearchError> {
    let query = latest_user_text(messages);
    let hits = searcher.search(query, max_results).await?;

    let summary = if hits.is_empty() {
        NO_RESULTS_TEXT.to_string()
    } else {
        hits.iter()
            .map(|hit| hit.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    };

    tracing::debug!(hit_count = hits.len(), "search complete");
    Ok(ChatEntry::system(format!("{SEARCH_RESULT_MARKER} {summary}")))
}
