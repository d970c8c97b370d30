//! Turn routing and business logic for Errandry.
//!
//! This crate defines the capability "ports" (generation, search, mail, and
//! transcript persistence traits) that the infrastructure layer implements,
//! plus the agent nodes and the per-turn state machine that sequences them.
//! It depends only on `errandry-types` -- never on `errandry-infra` or any
//! HTTP/IO crate.

pub mod agent;
pub mod conversation;
pub mod port;
