//! CLI command definitions for the `errandry` binary.
//!
//! Uses clap derive macros for argument parsing. Conversation ids are
//! accepted as full UUIDs, as printed by `errandry list`.

pub mod chat;
pub mod sessions;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// An intent-routed conversational agent: answers directly, searches the
/// web, or sends email, one turn at a time.
#[derive(Parser)]
#[command(name = "errandry", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new empty conversation.
    New,

    /// List stored conversations.
    #[command(alias = "ls")]
    List,

    /// Change the display title of a conversation.
    Rename {
        /// Conversation id.
        id: String,

        /// New title.
        title: String,
    },

    /// Erase a conversation's message history (the title is kept).
    Clear {
        /// Conversation id.
        id: String,
    },

    /// Print a conversation transcript as JSON.
    Export {
        /// Conversation id.
        id: String,
    },

    /// Start an interactive chat session.
    Chat {
        /// Conversation id to resume; omit to start a new conversation.
        id: Option<String>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
