//! Slash command registry: registration, lookup, and resolution of typed input.
//!
//! Resolution of `/<token> <args>` tries, in order:
//! 1. an exact name or alias match,
//! 2. a prefix match, aliases before names,
//! 3. a substring ("fuzzy") listing of names and aliases.
//!
//! The first stage that finds something wins; later stages never run.

use super::{CommandDeps, SlashHandler};
use crate::error::CommandError;
use crate::types::SearchResult;
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::{debug, warn};

/// A `(name, aliases)` view of a registered command, in registration order.
#[derive(Debug, Clone, Copy)]
pub struct CommandEntry<'a> {
    pub name: &'a str,
    pub aliases: &'a [&'a str],
}

/// What a fuzzy match hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuzzyHit<'a> {
    Name { index: usize },
    Alias { index: usize, alias: &'a str },
}

/// Index of the command whose alias, or failing that whose name, starts with `token`.
///
/// Case-insensitive. Any alias match beats every name match.
pub fn find_partial_match(entries: &[CommandEntry<'_>], token: &str) -> Option<usize> {
    let prefix = token.to_lowercase();
    entries
        .iter()
        .position(|entry| {
            entry
                .aliases
                .iter()
                .any(|alias| alias.to_lowercase().starts_with(&prefix))
        })
        .or_else(|| {
            entries
                .iter()
                .position(|entry| entry.name.to_lowercase().starts_with(&prefix))
        })
}

/// Every name and alias containing `token` (case-insensitive), in registration order.
pub fn fuzzy_matches<'a>(entries: &[CommandEntry<'a>], token: &str) -> Vec<FuzzyHit<'a>> {
    let needle = token.to_lowercase();
    let mut hits = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        if entry.name.to_lowercase().contains(&needle) {
            hits.push(FuzzyHit::Name { index });
        }
        for &alias in entry.aliases {
            if alias.to_lowercase().contains(&needle) {
                hits.push(FuzzyHit::Alias { index, alias });
            }
        }
    }
    hits
}

#[derive(Default)]
struct RegistryState {
    /// Canonical names and aliases, all pointing at their handler.
    lookup: HashMap<String, SlashHandler>,
    /// Canonical names in registration order.
    order: Vec<String>,
    deps: HashMap<String, CommandDeps>,
}

impl RegistryState {
    fn remove_handler(&mut self, handler: &SlashHandler) -> Option<CommandDeps> {
        let name = handler.name().to_string();
        self.lookup.retain(|_, h| !h.same_as(handler));
        self.order.retain(|n| n != &name);
        self.deps.remove(&name)
    }

    fn handlers(&self) -> Vec<SlashHandler> {
        self.order
            .iter()
            .filter_map(|name| self.lookup.get(name))
            .cloned()
            .collect()
    }
}

/// Name -> handler table for `/`-prefixed input.
#[derive(Default)]
pub struct SlashCommandRegistry {
    state: RwLock<RegistryState>,
}

impl SlashCommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under its name and aliases.
    ///
    /// With `deps`, they are kept for `unregister` and the command's own
    /// `register` hook is called. A command already registered under the same
    /// name is replaced. Aliases never shadow another command's name.
    pub fn register(&self, handler: SlashHandler, deps: Option<CommandDeps>) {
        let name = handler.name().to_string();
        {
            let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());

            if let Some(previous) = state.lookup.get(&name).cloned()
                && previous.name() == name
            {
                state.remove_handler(&previous);
            }

            for alias in handler.aliases() {
                let taken_by_name = state
                    .lookup
                    .get(*alias)
                    .is_some_and(|existing| existing.name() == *alias);
                if taken_by_name {
                    warn!(command = %name, alias = %alias, "Alias shadows a command name, skipping");
                    continue;
                }
                state.lookup.insert(alias.to_string(), handler.clone());
            }
            state.lookup.insert(name.clone(), handler.clone());
            state.order.push(name.clone());

            if let Some(deps) = &deps {
                state.deps.insert(name.clone(), deps.clone());
            }
        }

        if let Some(deps) = &deps {
            handler.command().register(deps);
        }
        debug!(command = %name, mode = ?handler.mode(), "Registered slash command");
    }

    /// Remove the command known as `name` (canonical name or alias).
    ///
    /// Calls the command's `unregister` hook once with the deps it was
    /// registered with. Returns `false` when nothing is registered under `name`.
    pub fn unregister(&self, name: &str) -> bool {
        let (handler, deps) = {
            let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
            let Some(handler) = state.lookup.get(name).cloned() else {
                return false;
            };
            let deps = state.remove_handler(&handler);
            (handler, deps)
        };

        handler.command().unregister(deps.as_ref());
        debug!(command = %handler.name(), "Unregistered slash command");
        true
    }

    /// Exact lookup by canonical name or alias.
    pub fn find_command(&self, name: &str) -> Option<SlashHandler> {
        self.state
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .lookup
            .get(name)
            .cloned()
    }

    /// Every registered command once, in registration order.
    pub fn all_commands(&self) -> Vec<SlashHandler> {
        self.state
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .handlers()
    }

    /// Like [`all_commands`](Self::all_commands), without unavailable commands.
    pub fn available_commands(&self) -> Vec<SlashHandler> {
        self.all_commands()
            .into_iter()
            .filter(|h| h.is_available())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.state
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .order
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolve typed input such as `/theme dark` into results.
    ///
    /// Never fails: a command whose search errors contributes no results.
    pub async fn search(&self, query: &str, locale: &str) -> Vec<SearchResult> {
        let trimmed = query.trim();
        let rest = trimmed.strip_prefix('/').unwrap_or(trimmed).trim();
        if rest.is_empty() {
            return self.root_commands();
        }

        let (token, args) = match rest.split_once(char::is_whitespace) {
            Some((token, args)) => (token, args.trim()),
            None => (rest, ""),
        };

        if let Some(handler) = self.find_command(token) {
            if !handler.is_available() {
                return Vec::new();
            }
            return Self::delegate(&handler, args, locale).await;
        }

        let available = self.available_commands();
        let entries: Vec<CommandEntry<'_>> = available
            .iter()
            .map(|h| CommandEntry {
                name: h.name(),
                aliases: h.aliases(),
            })
            .collect();

        if let Some(index) = find_partial_match(&entries, token) {
            debug!(token = %token, command = %entries[index].name, "Partial slash command match");
            return Self::delegate(&available[index], args, locale).await;
        }

        fuzzy_matches(&entries, token)
            .into_iter()
            .map(|hit| match hit {
                FuzzyHit::Name { index } => {
                    let handler = &available[index];
                    SearchResult::command(
                        format!("fuzzy-{}", handler.name()),
                        format!("/{}", handler.name()),
                        handler.description(),
                        format!("root.{}", handler.name()),
                        Some(serde_json::json!({ "name": handler.name() })),
                    )
                }
                FuzzyHit::Alias { index, alias } => {
                    let handler = &available[index];
                    SearchResult::command(
                        format!("fuzzy-{}", alias),
                        format!("/{}", alias),
                        format!(
                            "{} (alias for /{})",
                            handler.description(),
                            handler.name()
                        ),
                        format!("root.{}", handler.name()),
                        Some(serde_json::json!({ "name": handler.name() })),
                    )
                }
            })
            .collect()
    }

    /// Run the action of a direct command (the command-selector path).
    pub async fn execute_direct(&self, name: &str) -> Result<(), CommandError> {
        let handler = self
            .find_command(name)
            .ok_or_else(|| CommandError::NotFound {
                name: name.to_string(),
            })?;
        if !handler.is_available() {
            return Err(CommandError::Unavailable {
                name: handler.name().to_string(),
            });
        }
        match handler.action() {
            Some(action) => action.execute().await,
            None => Err(CommandError::NotDirect {
                name: handler.name().to_string(),
            }),
        }
    }

    fn root_commands(&self) -> Vec<SearchResult> {
        self.available_commands()
            .iter()
            .map(|handler| {
                SearchResult::command(
                    format!("root-{}", handler.name()),
                    format!("/{}", handler.name()),
                    handler.description(),
                    format!("root.{}", handler.name()),
                    Some(serde_json::json!({ "name": handler.name() })),
                )
            })
            .collect()
    }

    async fn delegate(handler: &SlashHandler, args: &str, locale: &str) -> Vec<SearchResult> {
        match handler.command().search(args, locale).await {
            Ok(results) => results,
            Err(e) => {
                warn!(command = %handler.name(), error = %e, "Command search failed");
                Vec::new()
            }
        }
    }
}
