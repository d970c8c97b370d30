//! Shared domain types for Errandry.
//!
//! This crate contains the core domain types used across the Errandry agent:
//! conversations and their entries, route decisions, capability request and
//! error types, and configuration.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod config;
pub mod conversation;
pub mod email;
pub mod error;
pub mod llm;
pub mod route;
pub mod search;
