//! One-shot search and the interactive palette loop.

use palette_core::{Palette, SearchResult, SelectOutcome, Suggestion};
use std::io::{self, BufRead, Write};
use std::sync::Arc;

/// Search once and print the results.
pub async fn run_single_query(palette: &Palette, query: &str, json: bool) -> anyhow::Result<()> {
    search_and_print(palette, query, json).await?;
    Ok(())
}

/// Read queries from stdin until `:q` or end of input.
pub async fn run_interactive(palette: Arc<Palette>, json: bool) -> anyhow::Result<()> {
    println!("\x1b[1;32m  palette\x1b[0m  page: {}", palette.page().path());
    println!("  Type to search, :N to select a result, :page <path>, :help, :q to quit\n");

    let stdin = io::stdin();
    let mut last: Vec<SearchResult> = Vec::new();
    loop {
        print!("\x1b[1;34m> \x1b[0m");
        io::stdout().flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input).is_err() || input.is_empty() {
            break;
        }
        let input = input.trim_end_matches(['\r', '\n']);
        if input.trim().is_empty() {
            continue;
        }
        if handle_line(&palette, input, &mut last, json).await? == Flow::Quit {
            break;
        }
    }
    println!("Goodbye!");
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Act on one input line. `last` holds the listing `:N` selects from.
async fn handle_line(
    palette: &Palette,
    input: &str,
    last: &mut Vec<SearchResult>,
    json: bool,
) -> anyhow::Result<Flow> {
    match parse_line(input) {
        Line::Quit => return Ok(Flow::Quit),
        Line::Help => print_help(),
        Line::Page(path) => {
            palette.page().set_path(path);
            println!("  page: {}", palette.page().path());
        }
        Line::Select(index) => {
            let Some(result) = index.checked_sub(1).and_then(|i| last.get(i)).cloned() else {
                println!("  No result {} in the last listing", index);
                return Ok(Flow::Continue);
            };
            match palette.select(&result).await {
                Ok(SelectOutcome::ReplaceQuery(query)) => {
                    println!("  {}", query);
                    *last = search_and_print(palette, &query, json).await?;
                }
                Ok(_) => {}
                Err(e) => println!("  \x1b[1;31m{}\x1b[0m", e),
            }
        }
        Line::Invalid(message) => println!("  {}", message),
        Line::Query(query) => {
            *last = search_and_print(palette, query, json).await?;
        }
    }
    Ok(Flow::Continue)
}

/// Search and print. A `/` query the main search leaves empty falls back to
/// the command selector so direct commands stay selectable.
async fn search_and_print(
    palette: &Palette,
    query: &str,
    json: bool,
) -> anyhow::Result<Vec<SearchResult>> {
    let mut results = palette.search(query).await;
    if results.is_empty() {
        results = palette.command_selector(query).await;
    }
    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print_results(&results);
        if results.is_empty() {
            print_suggestions(&palette.suggestions(query));
        }
    }
    Ok(results)
}

#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Quit,
    Help,
    Page(&'a str),
    Select(usize),
    Invalid(String),
    Query(&'a str),
}

fn parse_line(input: &str) -> Line<'_> {
    let Some(command) = input.trim().strip_prefix(':') else {
        return Line::Query(input);
    };
    match command.split_once(char::is_whitespace) {
        Some(("page", path)) if !path.trim().is_empty() => Line::Page(path.trim()),
        _ => match command {
            "q" | "quit" | "exit" => Line::Quit,
            "help" | "h" | "?" => Line::Help,
            "page" => Line::Invalid("Usage: :page <path>".to_string()),
            n => match n.parse::<usize>() {
                Ok(index) => Line::Select(index),
                Err(_) => Line::Invalid(format!("Unknown command ':{}'", n)),
            },
        },
    }
}

fn print_help() {
    println!("  <text>          search everything");
    println!("  @app <text>     search one scope (@app, @knowledge/@kb, @plugin, @node)");
    println!("  /<command>      slash commands, e.g. /theme dark, /language ja");
    println!("  :N              select result N");
    println!("  :page <path>    change the current page");
    println!("  :q              quit");
}

fn print_results(results: &[SearchResult]) {
    if results.is_empty() {
        println!("  No results");
        return;
    }
    for (i, result) in results.iter().enumerate() {
        println!("{}", format_result(i + 1, result));
    }
}

fn print_suggestions(suggestions: &[Suggestion]) {
    for suggestion in suggestions {
        println!(
            "  \x1b[2m{:<12}\x1b[0m {}",
            suggestion.key, suggestion.description
        );
    }
}

fn format_result(index: usize, result: &SearchResult) -> String {
    let mut line = format!("  {:>2}. [{}] {}", index, result.kind(), result.title);
    if let Some(description) = result.description.as_deref().filter(|d| !d.is_empty()) {
        line.push_str(&format!("  \x1b[2m{}\x1b[0m", description));
    }
    if let Some(path) = &result.path {
        line.push_str(&format!("  ({})", path));
    }
    line
}
