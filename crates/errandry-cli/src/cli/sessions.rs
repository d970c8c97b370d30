//! Conversation management commands: new, list, rename, clear, export.

use anyhow::{Context, Result};
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;

use errandry_types::conversation::ConversationId;

use crate::state::AppState;

fn parse_id(id: &str) -> Result<ConversationId> {
    id.parse::<ConversationId>()
        .with_context(|| format!("'{id}' is not a valid conversation id"))
}

/// Create a new empty conversation and print its id.
pub async fn new_conversation(state: &AppState, json: bool) -> Result<()> {
    let conversation = state.service.create().await?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "id": conversation.id.to_string(),
                "title": conversation.title,
            })
        );
    } else {
        println!();
        println!(
            "  {} Created '{}'",
            style("+").green().bold(),
            style(&conversation.title).cyan()
        );
        println!(
            "  Chat with it: {}",
            style(format!("errandry chat {}", conversation.id)).yellow()
        );
        println!();
    }

    Ok(())
}

/// List stored conversations with title, id, and message count.
pub async fn list_conversations(state: &AppState, json: bool) -> Result<()> {
    let summaries = state.service.list().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    if summaries.is_empty() {
        println!();
        println!(
            "  {} No conversations yet. Start one with: {}",
            style("i").blue().bold(),
            style("errandry chat").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Title").fg(Color::White),
        Cell::new("Id").fg(Color::White),
        Cell::new("Messages").fg(Color::White),
        Cell::new("Updated").fg(Color::White),
    ]);

    for summary in &summaries {
        let updated = summary
            .updated_at
            .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());

        table.add_row(vec![
            Cell::new(&summary.title).fg(Color::Cyan),
            Cell::new(summary.id.to_string()).fg(Color::DarkGrey),
            Cell::new(summary.message_count.to_string()).fg(Color::White),
            Cell::new(updated).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} conversation{}",
        style(summaries.len()).bold(),
        if summaries.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}

/// Rename a conversation.
pub async fn rename_conversation(
    state: &AppState,
    id: &str,
    title: &str,
    json: bool,
) -> Result<()> {
    let id = parse_id(id)?;
    state.service.rename(&id, title).await?;

    if json {
        println!(
            "{}",
            serde_json::json!({"renamed": true, "id": id.to_string(), "title": title})
        );
    } else {
        println!(
            "  {} Renamed to '{}'",
            style("~").cyan().bold(),
            style(title).cyan()
        );
    }

    Ok(())
}

/// Erase a conversation's message history.
pub async fn clear_conversation(state: &AppState, id: &str, json: bool) -> Result<()> {
    let id = parse_id(id)?;
    state.service.clear(&id).await?;

    if json {
        println!(
            "{}",
            serde_json::json!({"cleared": true, "id": id.to_string()})
        );
    } else {
        println!("  {} History cleared.", style("x").red().bold());
    }

    Ok(())
}

/// Print a conversation transcript as pretty JSON.
pub async fn export_conversation(state: &AppState, id: &str) -> Result<()> {
    let id = parse_id(id)?;
    let json = state.service.export_json(&id).await?;
    println!("{json}");
    Ok(())
}
