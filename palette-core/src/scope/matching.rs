//! Resolve the scope a query is addressed to.

use super::Scope;
use crate::slash::{CommandMode, SlashCommandRegistry};
use regex::Regex;
use std::sync::Arc;
use tracing::warn;

/// Whether `scope` is the slash-command scope.
pub fn is_slash_scope(scope: &dyn Scope) -> bool {
    scope.id() == "slash" || scope.shortcut() == "/"
}

/// The first scope in `scopes` whose shortcut or alias starts `query` and is
/// followed by whitespace or the end of input.
///
/// The slash scope matches only when `query` names a registered submenu
/// command (`/theme` or `/theme dark`). Direct commands such as `/docs` never
/// select it; they run from the command selector instead.
pub fn match_action(
    query: &str,
    scopes: &[Arc<dyn Scope>],
    slash: &SlashCommandRegistry,
) -> Option<Arc<dyn Scope>> {
    scopes
        .iter()
        .find(|scope| {
            if is_slash_scope(scope.as_ref()) {
                names_submenu_command(query, slash)
            } else {
                prefix_pattern(scope.as_ref()).is_some_and(|re| re.is_match(query))
            }
        })
        .cloned()
}

fn names_submenu_command(query: &str, slash: &SlashCommandRegistry) -> bool {
    slash
        .all_commands()
        .iter()
        .filter(|handler| handler.mode() != CommandMode::Direct)
        .any(|handler| {
            let typed = format!("/{}", handler.name());
            query == typed || query.starts_with(&format!("{} ", typed))
        })
}

fn prefix_pattern(scope: &dyn Scope) -> Option<Regex> {
    let keys: Vec<String> = std::iter::once(scope.shortcut())
        .chain(scope.aliases().iter().copied())
        .map(regex::escape)
        .collect();
    let pattern = format!(r"^({})(?:\s|$)", keys.join("|"));
    match Regex::new(&pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            warn!(scope = %scope.id(), error = %e, "Invalid scope prefix pattern");
            None
        }
    }
}

/// The part of `query` a matched scope searches for: the query without its
/// leading shortcut or alias, trimmed. The slash scope drops the leading `/`.
pub fn search_term(scope: &dyn Scope, query: &str) -> String {
    let trimmed = query.trim_start();
    if is_slash_scope(scope) {
        return trimmed.strip_prefix('/').unwrap_or(trimmed).trim().to_string();
    }

    // Longest key first so `@knowledge` is not cut as `@k` + `nowledge`.
    let mut keys: Vec<&str> = std::iter::once(scope.shortcut())
        .chain(scope.aliases().iter().copied())
        .collect();
    keys.sort_by_key(|k| std::cmp::Reverse(k.len()));

    for key in keys {
        if let Some(rest) = trimmed.strip_prefix(key)
            && (rest.is_empty() || rest.starts_with(char::is_whitespace))
        {
            return rest.trim().to_string();
        }
    }
    trimmed.trim().to_string()
}
