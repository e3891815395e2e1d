//! Property-based tests for command and scope resolution using proptest.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use proptest::prelude::*;

use palette_core::scope::{AppScope, KnowledgeScope, Scope};
use palette_core::slash::{CommandEntry, find_partial_match, fuzzy_matches};
use palette_core::{
    SearchError, SearchResult, SlashCommand, SlashCommandRegistry, SlashHandler, StaticCatalog,
    match_action, search_term,
};

const VOCABULARY: &[&str] = &[
    "theme", "language", "lang", "docs", "documentation", "community", "discord", "forum",
    "feedback", "account", "profile", "zen", "vibe",
];

struct NamedCommand {
    name: &'static str,
    aliases: Vec<&'static str>,
}

#[async_trait]
impl SlashCommand for NamedCommand {
    fn name(&self) -> &str {
        self.name
    }

    fn aliases(&self) -> &[&str] {
        &self.aliases
    }

    fn description(&self) -> &str {
        "generated"
    }

    async fn search(&self, _: &str, _: &str) -> Result<Vec<SearchResult>, SearchError> {
        Ok(Vec::new())
    }
}

fn word() -> impl Strategy<Value = &'static str> {
    prop::sample::select(VOCABULARY)
}

fn command() -> impl Strategy<Value = (&'static str, Vec<&'static str>)> {
    (word(), prop::collection::vec(word(), 0..3))
}

fn registry_from(commands: &[(&'static str, Vec<&'static str>)]) -> SlashCommandRegistry {
    let registry = SlashCommandRegistry::new();
    for (name, aliases) in commands {
        let name: &'static str = name;
        let aliases: Vec<&'static str> = aliases.iter().copied().filter(|a| *a != name).collect();
        registry.register(
            SlashHandler::submenu(Arc::new(NamedCommand { name, aliases })),
            None,
        );
    }
    registry
}

// --- Slash registry properties ---

proptest! {
    #[test]
    fn registered_names_are_unique(commands in prop::collection::vec(command(), 0..12)) {
        let registry = registry_from(&commands);
        let all = registry.all_commands();
        let names: HashSet<&str> = all.iter().map(|h| h.name()).collect();
        prop_assert_eq!(names.len(), all.len());
        prop_assert_eq!(registry.len(), all.len());
    }

    #[test]
    fn names_resolve_to_themselves(commands in prop::collection::vec(command(), 0..12)) {
        let registry = registry_from(&commands);
        for handler in registry.all_commands() {
            let found = registry.find_command(handler.name());
            prop_assert!(found.is_some());
            prop_assert!(found.unwrap().same_as(&handler));
        }
    }

    #[test]
    fn unregistering_everything_empties_registry(
        commands in prop::collection::vec(command(), 0..12),
    ) {
        let registry = registry_from(&commands);
        for handler in registry.all_commands() {
            prop_assert!(registry.unregister(handler.name()));
        }
        prop_assert!(registry.is_empty());
        for word in VOCABULARY {
            prop_assert!(registry.find_command(word).is_none());
        }
    }

    #[test]
    fn partial_match_starts_with_token(
        commands in prop::collection::vec(command(), 1..8),
        token in "[a-z]{1,3}",
    ) {
        let entries: Vec<CommandEntry<'_>> = commands
            .iter()
            .map(|(name, aliases)| CommandEntry { name, aliases })
            .collect();
        let any_alias = entries
            .iter()
            .any(|e| e.aliases.iter().any(|a| a.starts_with(token.as_str())));

        match find_partial_match(&entries, &token) {
            Some(index) => {
                let entry = entries[index];
                let alias_hit = entry.aliases.iter().any(|a| a.starts_with(token.as_str()));
                prop_assert!(alias_hit || entry.name.starts_with(token.as_str()));
                // Alias matches win over name matches.
                prop_assert_eq!(alias_hit, any_alias);
            }
            None => {
                prop_assert!(!any_alias);
                prop_assert!(!entries.iter().any(|e| e.name.starts_with(token.as_str())));
            }
        }
    }

    #[test]
    fn fuzzy_hits_all_contain_token(
        commands in prop::collection::vec(command(), 0..8),
        token in "[a-z]{1,2}",
    ) {
        let entries: Vec<CommandEntry<'_>> = commands
            .iter()
            .map(|(name, aliases)| CommandEntry { name, aliases })
            .collect();
        let expected: usize = entries
            .iter()
            .map(|e| {
                usize::from(e.name.contains(token.as_str()))
                    + e.aliases.iter().filter(|a| a.contains(token.as_str())).count()
            })
            .sum();
        prop_assert_eq!(fuzzy_matches(&entries, &token).len(), expected);
    }
}

// --- Scope matching properties ---

fn scopes() -> Vec<Arc<dyn Scope>> {
    let catalog = Arc::new(StaticCatalog::default());
    vec![
        Arc::new(AppScope::new(catalog.clone(), 10)),
        Arc::new(KnowledgeScope::new(catalog, 10)),
    ]
}

proptest! {
    #[test]
    fn shortcut_then_term_selects_scope(term in "[a-zA-Z0-9 ]{0,20}") {
        let slash = SlashCommandRegistry::new();
        let scopes = scopes();
        let query = format!("@kb {}", term);
        let matched = match_action(&query, &scopes, &slash);
        prop_assert_eq!(matched.as_ref().map(|s| s.id()), Some("knowledge"));
        prop_assert_eq!(search_term(scopes[1].as_ref(), &query), term.trim());
    }

    #[test]
    fn glued_suffix_never_matches(suffix in "[a-z0-9]{1,8}") {
        let slash = SlashCommandRegistry::new();
        let query = format!("@app{}", suffix);
        prop_assert!(match_action(&query, &scopes(), &slash).is_none());
    }
}
