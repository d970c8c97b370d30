//! Agent nodes and the per-turn state machine.
//!
//! One turn flows Decide -> (ExtractEmail | Search -> Answer | Answer) ->
//! Done. Each node is a single capability call plus deterministic message
//! shaping; the router in [`router`] sequences them.

pub mod answer;
pub mod classifier;
pub mod extractor;
pub mod router;
pub mod search;

pub use router::TurnRouter;
