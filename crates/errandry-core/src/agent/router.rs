//! The per-turn state machine.
//!
//! `TurnRouter` sequences one turn over a transcript that already ends with
//! the user's entry: Decide runs exactly once, then exactly one branch
//! (ExtractEmail terminal, or Search then Answer, or Answer alone). The
//! returned delta is every entry appended by the visited phases, in
//! visitation order. Dispatch is keyed on the typed [`RouteDecision`], never
//! on transcript text; given identical capability responses the delta is
//! identical.

use errandry_types::conversation::ChatEntry;
use errandry_types::email::EmailExtractError;
use errandry_types::error::TurnError;
use errandry_types::route::RouteDecision;

use crate::agent::answer::compose_answer;
use crate::agent::classifier::{classify_intent, latest_user_text};
use crate::agent::extractor::EmailExtractor;
use crate::agent::search::run_search;
use crate::port::{Mailer, TextGenerator, WebSearcher};

/// Prefix for extraction and validation failures surfaced in the transcript.
pub const SEND_EMAIL_ERROR_PREFIX: &str = "SEND_EMAIL_ERROR: ";

/// Phases of the per-turn state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TurnPhase {
    Decide,
    ExtractEmail,
    Search,
    Answer,
    Done,
}

/// Sequences one turn across the three capability ports.
pub struct TurnRouter<G, S, M> {
    generator: G,
    searcher: S,
    mailer: M,
    search_max_results: usize,
}

impl<G: TextGenerator, S: WebSearcher, M: Mailer> TurnRouter<G, S, M> {
    pub fn new(generator: G, searcher: S, mailer: M, search_max_results: usize) -> Self {
        Self {
            generator,
            searcher,
            mailer,
            search_max_results,
        }
    }

    /// Run the state machine and return the turn's message delta.
    ///
    /// `messages` must already end with the turn's user entry. The input is
    /// not mutated; branch nodes see the working transcript including the
    /// entries appended earlier in the same turn. Generation and search
    /// faults abort the turn; delivery and extraction failures become the
    /// turn's outcome text.
    #[tracing::instrument(
        name = "run_turn",
        skip(self, messages),
        fields(transcript_len = messages.len())
    )]
    pub async fn run_turn(&self, messages: &[ChatEntry]) -> Result<Vec<ChatEntry>, TurnError> {
        let mut working: Vec<ChatEntry> = messages.to_vec();
        let base_len = working.len();
        let mut phase = TurnPhase::Decide;

        loop {
            phase = match phase {
                TurnPhase::Decide => {
                    let decision = classify_intent(&self.generator, &working).await?;
                    // Audit record of the decision; dispatch stays on the enum.
                    working.push(ChatEntry::system(decision.to_string()));
                    match decision {
                        RouteDecision::SendEmail => TurnPhase::ExtractEmail,
                        RouteDecision::SearchRequired => TurnPhase::Search,
                        RouteDecision::NoSearch => TurnPhase::Answer,
                    }
                }
                TurnPhase::ExtractEmail => {
                    let outcome = self.dispatch_email(&working).await?;
                    working.push(ChatEntry::system(outcome));
                    TurnPhase::Done
                }
                TurnPhase::Search => {
                    let entry =
                        run_search(&self.searcher, &working, self.search_max_results).await?;
                    working.push(entry);
                    TurnPhase::Answer
                }
                TurnPhase::Answer => {
                    let entry = compose_answer(&self.generator, &working).await?;
                    working.push(entry);
                    TurnPhase::Done
                }
                TurnPhase::Done => break,
            };
        }

        let delta = working.split_off(base_len);
        tracing::debug!(appended = delta.len(), "turn complete");
        Ok(delta)
    }

    /// Email branch: extract, validate, send, and render the outcome text.
    ///
    /// Only a generation fault escapes as an error. Extraction and
    /// validation failures return the `SEND_EMAIL_ERROR: ` text; delivery
    /// errors return the `Error sending email: ` text. No send happens after
    /// a failed extraction or validation.
    async fn dispatch_email(&self, messages: &[ChatEntry]) -> Result<String, TurnError> {
        let user_text = latest_user_text(messages);

        let email = match EmailExtractor::extract(&self.generator, user_text).await {
            Ok(email) => email,
            Err(EmailExtractError::Generation(fault)) => {
                return Err(TurnError::Generation(fault));
            }
            Err(branch_failure) => {
                tracing::warn!(error = %branch_failure, "email extraction failed");
                return Ok(format!("{SEND_EMAIL_ERROR_PREFIX}{branch_failure}"));
            }
        };

        match self.mailer.send(&email).await {
            Ok(receipt) => {
                tracing::info!(status = receipt.status_code, to = %email.to, "email dispatched");
                Ok(format!(
                    "Email sent successfully (status {}).",
                    receipt.status_code
                ))
            }
            Err(delivery_err) => {
                tracing::warn!(error = %delivery_err, "email delivery failed");
                Ok(format!("Error sending email: {delivery_err}"))
            }
        }
    }
}
