//! Infrastructure adapters for Errandry.
//!
//! Concrete implementations of the capability ports defined in
//! `errandry-core`: the Mistral generation provider, the Tavily search
//! client, the SendGrid mailer, and the JSON-file transcript store. Also the
//! data-directory resolution, config loading, and environment credential
//! lookup used by the binary.

pub mod config;
pub mod llm;
pub mod mail;
pub mod search;
pub mod secret;
pub mod store;
