//! Capability port traits.
//!
//! The agent core calls three external capabilities -- text generation, web
//! search, and email dispatch -- through these traits. Concrete adapters live
//! in errandry-infra; tests substitute deterministic stubs.

pub mod generate;
pub mod mail;
pub mod search;

pub use generate::TextGenerator;
pub use mail::Mailer;
pub use search::WebSearcher;
