//! Interactive chat loop.
//!
//! One iteration reads a line, either handles it as a slash command or
//! submits it as a turn, then renders the turn's visible outcome. Route
//! decision labels and raw search payloads stay out of the default display;
//! assistant answers, email outcomes, and branch error notices are shown.

pub mod commands;
pub mod input;

use anyhow::{Context, Result};
use console::style;

use errandry_core::agent::search::SEARCH_RESULT_MARKER;
use errandry_types::conversation::{ChatEntry, ChatRole, Conversation, ConversationId};
use errandry_types::route::RouteDecision;

use crate::state::AppState;

use commands::ChatCommand;
use input::{ChatInput, InputEvent};

/// Whether an entry is part of the user-facing chat display.
///
/// Human entries are excluded because the readline prompt already echoed
/// them; system entries are shown only when they carry a turn outcome
/// (email result or branch error), not routing internals.
fn is_visible(entry: &ChatEntry) -> bool {
    match entry.role {
        ChatRole::Ai => true,
        ChatRole::Human => false,
        ChatRole::System => {
            !entry.content.starts_with(SEARCH_RESULT_MARKER)
                && entry.content.parse::<RouteDecision>().is_err()
        }
    }
}

fn render_delta(appended: &[ChatEntry]) {
    for entry in appended.iter().filter(|e| is_visible(e)) {
        match entry.role {
            ChatRole::Ai => {
                println!("  {}", entry.content.trim());
            }
            _ => {
                println!("  {}", style(entry.content.trim()).yellow());
            }
        }
        println!();
    }
}

fn render_history(conversation: &Conversation) {
    for entry in &conversation.messages {
        match entry.role {
            ChatRole::Human => {
                println!("  {} {}", style("You >").green().bold(), entry.content);
            }
            ChatRole::Ai => {
                println!("  {}", entry.content.trim());
            }
            ChatRole::System if is_visible(entry) => {
                println!("  {}", style(entry.content.trim()).yellow());
            }
            ChatRole::System => {}
        }
    }
    println!();
}

fn print_banner(conversation: &Conversation) {
    println!();
    println!(
        "  {} {}",
        style(&conversation.title).cyan().bold(),
        style(format!("({})", conversation.id)).dim()
    );
    println!(
        "  {}",
        style("Type /help for commands, Ctrl+D to exit.").dim()
    );
    println!();
}

fn make_spinner() -> indicatif::ProgressBar {
    let spinner = indicatif::ProgressBar::new_spinner();
    spinner.set_style(
        indicatif::ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .expect("static spinner template"),
    );
    spinner.set_message("thinking...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

/// Run the interactive chat loop.
///
/// With an id, resumes that conversation; without one, starts fresh.
pub async fn run_chat(state: &AppState, id: Option<&str>) -> Result<()> {
    let conversation = match id {
        Some(raw) => {
            let id = raw
                .parse::<ConversationId>()
                .with_context(|| format!("'{raw}' is not a valid conversation id"))?;
            state
                .service
                .load(&id)
                .await?
                .with_context(|| format!("Conversation '{id}' not found"))?
        }
        None => state.service.create().await?,
    };

    let mut conversation_id = conversation.id;
    print_banner(&conversation);
    if !conversation.messages.is_empty() {
        render_history(&conversation);
    }

    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, _writer) = ChatInput::new(prompt)
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        match chat_input.read_line().await {
            InputEvent::Eof => {
                println!("\n  {}", style("Bye.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
                continue;
            }
            InputEvent::Message(text) => {
                if text.is_empty() {
                    continue;
                }

                if let Some(cmd) = commands::parse(&text) {
                    match cmd {
                        ChatCommand::Help => {
                            commands::print_help();
                        }
                        ChatCommand::Clear => {
                            chat_input.clear();
                        }
                        ChatCommand::Exit => {
                            println!("\n  {}", style("Bye.").dim());
                            break;
                        }
                        ChatCommand::New => {
                            let fresh = state.service.create().await?;
                            conversation_id = fresh.id;
                            print_banner(&fresh);
                        }
                        ChatCommand::History => {
                            match state.service.load(&conversation_id).await? {
                                Some(current) => render_history(&current),
                                None => println!("  {}", style("(empty)").dim()),
                            }
                        }
                        ChatCommand::Unknown(cmd) => {
                            println!(
                                "  {} Unknown command '{}'. Try /help.",
                                style("!").yellow().bold(),
                                cmd
                            );
                        }
                    }
                    continue;
                }

                let spinner = make_spinner();
                match state.service.submit_turn(&conversation_id, &text).await {
                    Ok(receipt) => {
                        spinner.finish_and_clear();
                        render_delta(&receipt.appended);
                    }
                    Err(err) => {
                        spinner.finish_and_clear();
                        // Fatal for the turn; nothing was persisted.
                        eprintln!(
                            "  {} Turn failed: {err}. The conversation was not modified.",
                            style("!").red().bold()
                        );
                        println!();
                    }
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_labels_are_hidden() {
        assert!(!is_visible(&ChatEntry::system("NO_SEARCH")));
        assert!(!is_visible(&ChatEntry::system("SEARCH_REQUIRED")));
        assert!(!is_visible(&ChatEntry::system("SEND_EMAIL")));
    }

    #[test]
    fn test_search_payloads_are_hidden() {
        assert!(!is_visible(&ChatEntry::system("SEARCH_RESULT: snippet one")));
    }

    #[test]
    fn test_outcome_entries_are_visible() {
        assert!(is_visible(&ChatEntry::system(
            "Email sent successfully (status 202)."
        )));
        assert!(is_visible(&ChatEntry::system(
            "SEND_EMAIL_ERROR: Missing or invalid 'to' email address."
        )));
        assert!(is_visible(&ChatEntry::ai("4")));
    }

    #[test]
    fn test_user_entries_are_not_re_echoed() {
        assert!(!is_visible(&ChatEntry::human("What's 2+2?")));
    }
}
