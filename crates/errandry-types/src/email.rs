//! Email dispatch types for Errandry.
//!
//! An [`EmailRequest`] is ephemeral: built by the parameter extractor,
//! consumed immediately by the mail capability, never persisted as structured
//! data. Only its textual outcome enters the transcript.

use serde::{Deserialize, Serialize};

use crate::llm::GenerationError;

/// A validated outgoing email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailRequest {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Result of a successful delivery handoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReceipt {
    /// HTTP status returned by the mail provider (202 for SendGrid accept).
    pub status_code: u16,
}

/// Errors from the mail capability.
///
/// Never propagated past the email branch: the router renders these as the
/// turn's visible outcome text.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("email capability not configured: {0}")]
    NotConfigured(String),

    #[error("delivery rejected (status {status_code}): {detail}")]
    Rejected { status_code: u16, detail: String },

    #[error("transport error: {0}")]
    Transport(String),
}

/// Failures while recovering an [`EmailRequest`] from model output.
///
/// The display text of the non-generation variants is user-visible: the
/// router surfaces it verbatim behind the `SEND_EMAIL_ERROR: ` prefix.
/// `Generation` is different in kind: a provider fault during the extraction
/// call stays fatal for the turn and is unwrapped back out by the router.
#[derive(Debug, thiserror::Error)]
pub enum EmailExtractError {
    #[error("Could not extract JSON from the model output.")]
    MissingPayload,

    #[error("JSON parse error: {0}")]
    Parse(String),

    #[error("Missing or invalid 'to' email address.")]
    InvalidRecipient,

    #[error(transparent)]
    Generation(#[from] GenerationError),
}
