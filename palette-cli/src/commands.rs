//! CLI subcommand handlers.

use crate::Commands;
use palette_core::{CommandMode, Palette};
use serde_json::json;

/// Handle a CLI subcommand.
pub async fn handle_command(
    command: Commands,
    palette: &Palette,
    json: bool,
) -> anyhow::Result<()> {
    match command {
        Commands::Commands { all } => list_commands(palette, all, json),
        Commands::Scopes => list_scopes(palette, json),
        Commands::Run { name } => run_direct(palette, &name).await,
    }
}

fn list_commands(palette: &Palette, all: bool, json: bool) -> anyhow::Result<()> {
    let registry = palette.slash_commands();
    let handlers = if all {
        registry.all_commands()
    } else {
        registry.available_commands()
    };

    if json {
        let entries: Vec<_> = handlers
            .iter()
            .map(|h| {
                json!({
                    "name": h.name(),
                    "aliases": h.aliases(),
                    "description": h.description(),
                    "mode": mode_label(h.mode()),
                    "available": h.is_available(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for handler in &handlers {
        let aliases = if handler.aliases().is_empty() {
            String::new()
        } else {
            format!(
                " ({})",
                handler
                    .aliases()
                    .iter()
                    .map(|a| format!("/{}", a))
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        };
        let unavailable = if handler.is_available() {
            ""
        } else {
            "  [unavailable here]"
        };
        println!(
            "  /{:<12} {:<8} {}{}{}",
            handler.name(),
            mode_label(handler.mode()),
            handler.description(),
            aliases,
            unavailable
        );
    }
    Ok(())
}

fn list_scopes(palette: &Palette, json: bool) -> anyhow::Result<()> {
    let ctx = palette.page().scope_context();
    let scopes = palette.scopes().all();

    if json {
        let entries: Vec<_> = scopes
            .iter()
            .map(|s| {
                json!({
                    "id": s.id(),
                    "shortcut": s.shortcut(),
                    "aliases": s.aliases(),
                    "title": s.title(),
                    "description": s.description(),
                    "available": s.is_available(&ctx),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for scope in &scopes {
        let keys = std::iter::once(scope.shortcut())
            .chain(scope.aliases().iter().copied())
            .collect::<Vec<_>>()
            .join(", ");
        let unavailable = if scope.is_available(&ctx) {
            ""
        } else {
            "  [unavailable here]"
        };
        println!("  {:<18} {}{}", keys, scope.description(), unavailable);
    }
    Ok(())
}

async fn run_direct(palette: &Palette, name: &str) -> anyhow::Result<()> {
    let name = name.trim_start_matches('/');
    palette
        .execute_direct(name)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))
}

fn mode_label(mode: CommandMode) -> &'static str {
    match mode {
        CommandMode::Direct => "direct",
        CommandMode::Submenu => "submenu",
    }
}
