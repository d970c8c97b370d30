//! Route decisions produced by the intent classifier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The branch selected for one turn.
///
/// The string forms (`NO_SEARCH`, `SEARCH_REQUIRED`, `SEND_EMAIL`) are the
/// exact labels the classifier instructs the model to emit. The router
/// dispatches on this enum, never on label text in the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RouteDecision {
    /// Answer directly from the transcript. The safe default when the
    /// classifier emits anything outside the label set.
    NoSearch,
    /// Run a web search, then answer with the results in context.
    SearchRequired,
    /// Extract email parameters and dispatch; terminal for the turn.
    SendEmail,
}

impl fmt::Display for RouteDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteDecision::NoSearch => write!(f, "NO_SEARCH"),
            RouteDecision::SearchRequired => write!(f, "SEARCH_REQUIRED"),
            RouteDecision::SendEmail => write!(f, "SEND_EMAIL"),
        }
    }
}

impl FromStr for RouteDecision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "NO_SEARCH" => Ok(RouteDecision::NoSearch),
            "SEARCH_REQUIRED" => Ok(RouteDecision::SearchRequired),
            "SEND_EMAIL" => Ok(RouteDecision::SendEmail),
            other => Err(format!("invalid route decision: '{other}'")),
        }
    }
}
