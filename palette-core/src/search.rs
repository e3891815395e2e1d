//! Search orchestration: route a query to its scope or fan out to all of them.

use crate::error::SearchError;
use crate::scope::{Scope, is_slash_scope, search_term};
use crate::slash::SlashCommandRegistry;
use crate::types::SearchResult;
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Results for `query`.
///
/// - With a `matched` scope, that scope alone is searched for the query's term.
/// - An unmatched query beginning with `@` or `/` yields nothing: the user is
///   still typing a prefix.
/// - Anything else is sent to every non-slash scope concurrently. A scope
///   that fails or exceeds `timeout` contributes no results; the rest are
///   concatenated in scope order.
pub async fn search_anything(
    locale: &str,
    query: &str,
    matched: Option<&Arc<dyn Scope>>,
    scopes: &[Arc<dyn Scope>],
    timeout: Duration,
) -> Vec<SearchResult> {
    if let Some(scope) = matched {
        let term = search_term(scope.as_ref(), query);
        debug!(scope = %scope.id(), term = %term, "Searching matched scope");
        return match search_one(scope.as_ref(), query, &term, locale, timeout).await {
            Ok(results) => results,
            Err(e) => {
                warn!(scope = %scope.id(), error = %e, "Scope search failed");
                Vec::new()
            }
        };
    }

    let trimmed = query.trim_start();
    if trimmed.starts_with('@') || trimmed.starts_with('/') {
        return Vec::new();
    }

    let targets: Vec<&Arc<dyn Scope>> = scopes
        .iter()
        .filter(|s| !is_slash_scope(s.as_ref()))
        .collect();
    debug!(scopes = targets.len(), query = %query, "Searching all scopes");

    let outcomes = join_all(
        targets
            .iter()
            .map(|scope| search_one(scope.as_ref(), query, query, locale, timeout)),
    )
    .await;

    let mut results = Vec::new();
    for (scope, outcome) in targets.iter().zip(outcomes) {
        match outcome {
            Ok(found) => results.extend(found),
            Err(e) => warn!(scope = %scope.id(), error = %e, "Scope search failed"),
        }
    }
    results
}

async fn search_one(
    scope: &dyn Scope,
    query: &str,
    term: &str,
    locale: &str,
    timeout: Duration,
) -> Result<Vec<SearchResult>, SearchError> {
    match tokio::time::timeout(timeout, scope.search(query, term, locale)).await {
        Ok(outcome) => outcome,
        Err(_) => Err(SearchError::Timeout {
            scope: scope.id().to_string(),
            timeout_secs: timeout.as_secs(),
        }),
    }
}

/// An entry of the command selector shown while a prefix is typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    /// What selecting the entry inserts, e.g. `@app` or `/theme`.
    pub key: String,
    pub title: String,
    pub description: String,
}

/// Scope shortcuts (and aliases) containing `filter`. The slash scope is left out.
pub fn scope_suggestions(filter: &str, scopes: &[Arc<dyn Scope>]) -> Vec<Suggestion> {
    let filter = filter.trim().to_lowercase();
    let mut suggestions = Vec::new();
    for scope in scopes.iter().filter(|s| !is_slash_scope(s.as_ref())) {
        let keys = std::iter::once(scope.shortcut()).chain(scope.aliases().iter().copied());
        for key in keys {
            if key.to_lowercase().contains(&filter) {
                suggestions.push(Suggestion {
                    key: key.to_string(),
                    title: scope.title().to_string(),
                    description: scope.description().to_string(),
                });
            }
        }
    }
    suggestions
}

/// Available slash commands whose name or an alias contains `filter`.
/// One entry per command, keyed by its canonical name.
pub fn slash_suggestions(filter: &str, registry: &SlashCommandRegistry) -> Vec<Suggestion> {
    let filter = filter.trim().trim_start_matches('/').to_lowercase();
    registry
        .available_commands()
        .iter()
        .filter(|handler| {
            handler.name().to_lowercase().contains(&filter)
                || handler
                    .aliases()
                    .iter()
                    .any(|a| a.to_lowercase().contains(&filter))
        })
        .map(|handler| Suggestion {
            key: format!("/{}", handler.name()),
            title: handler.name().to_string(),
            description: handler.description().to_string(),
        })
        .collect()
}
