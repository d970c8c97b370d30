//! Generation provider adapters.

pub mod mistral;

pub use mistral::MistralProvider;
