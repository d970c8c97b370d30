//! Environment credential lookup.
//!
//! API keys are supplied through environment variables only (`MISTRAL_API_KEY`,
//! `TAVILY_API_KEY`, `SENDGRID_API_KEY`). Values are wrapped in
//! [`SecretString`] immediately so they never appear in logs or Debug output.

use secrecy::SecretString;

/// Read a credential from the environment.
///
/// Unset, empty, or non-Unicode values all return `None`: an empty exported
/// variable is treated the same as a missing one.
pub fn env_secret(key: &str) -> Option<SecretString> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(SecretString::from(value)),
        _ => None,
    }
}
