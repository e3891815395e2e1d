//! Search scopes: `@app`, `@knowledge`, `@plugin`, `@node`, and `/`.
//!
//! A scope is selected by typing its shortcut (or an alias) at the start of
//! the query. Free text without a prefix searches every scope at once.

mod catalog;
mod matching;
mod node;
mod slash;

pub use catalog::{AppScope, KnowledgeScope, PluginScope};
pub use matching::{is_slash_scope, match_action, search_term};
pub use node::{WorkflowNodeScope, score_node};
pub use slash::SlashScope;

use crate::context::ScopeContext;
use crate::error::SearchError;
use crate::slash::SlashCommandRegistry;
use crate::types::SearchResult;
use async_trait::async_trait;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// A searchable source selected by a query prefix.
#[async_trait]
pub trait Scope: Send + Sync {
    /// Stable identifier, e.g. `app` or `slash`.
    fn id(&self) -> &str;

    /// Prefix that selects the scope, e.g. `@app`.
    fn shortcut(&self) -> &str;

    fn aliases(&self) -> &[&str] {
        &[]
    }

    fn title(&self) -> &str;

    fn description(&self) -> &str;

    fn is_available(&self, _ctx: &ScopeContext) -> bool {
        true
    }

    /// Search for `term`. `query` is the raw input the term was taken from.
    async fn search(
        &self,
        query: &str,
        term: &str,
        locale: &str,
    ) -> Result<Vec<SearchResult>, SearchError>;
}

/// Ordered set of scopes, unique by id.
#[derive(Default)]
pub struct ScopeRegistry {
    scopes: RwLock<Vec<Arc<dyn Scope>>>,
}

impl ScopeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a scope. A scope with the same id is replaced in place.
    pub fn register(&self, scope: Arc<dyn Scope>) {
        let mut scopes = self.scopes.write().unwrap_or_else(|e| e.into_inner());
        match scopes.iter().position(|s| s.id() == scope.id()) {
            Some(index) => {
                debug!(scope = %scope.id(), "Replacing scope");
                scopes[index] = scope;
            }
            None => {
                debug!(scope = %scope.id(), shortcut = %scope.shortcut(), "Registering scope");
                scopes.push(scope);
            }
        }
    }

    pub fn unregister(&self, id: &str) -> bool {
        let mut scopes = self.scopes.write().unwrap_or_else(|e| e.into_inner());
        let before = scopes.len();
        scopes.retain(|s| s.id() != id);
        scopes.len() != before
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn Scope>> {
        self.scopes
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .find(|s| s.id() == id)
            .cloned()
    }

    pub fn all(&self) -> Vec<Arc<dyn Scope>> {
        self.scopes.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Scopes usable on the page described by `ctx`, in registration order.
    pub fn available(&self, ctx: &ScopeContext) -> Vec<Arc<dyn Scope>> {
        self.scopes
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|s| s.is_available(ctx))
            .cloned()
            .collect()
    }

    /// The available scope selected by `query`, if any.
    pub fn match_scope(
        &self,
        query: &str,
        ctx: &ScopeContext,
        slash: &SlashCommandRegistry,
    ) -> Option<Arc<dyn Scope>> {
        match_action(query, &self.available(ctx), slash)
    }

    pub fn len(&self) -> usize {
        self.scopes.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Scope with fixed results, or a fixed failure.
    pub(crate) struct FixedScope {
        pub id: &'static str,
        pub shortcut: &'static str,
        pub aliases: Vec<&'static str>,
        pub results: Vec<SearchResult>,
        pub fail: bool,
        pub workflow_only: bool,
        pub delay: Option<std::time::Duration>,
    }

    impl FixedScope {
        pub(crate) fn new(id: &'static str, shortcut: &'static str) -> Self {
            Self {
                id,
                shortcut,
                aliases: Vec::new(),
                results: Vec::new(),
                fail: false,
                workflow_only: false,
                delay: None,
            }
        }

        pub(crate) fn with_result(mut self, id: &str) -> Self {
            self.results
                .push(SearchResult::command(id, id, "", "test.noop", None));
            self
        }
    }

    #[async_trait]
    impl Scope for FixedScope {
        fn id(&self) -> &str {
            self.id
        }

        fn shortcut(&self) -> &str {
            self.shortcut
        }

        fn aliases(&self) -> &[&str] {
            &self.aliases
        }

        fn title(&self) -> &str {
            self.id
        }

        fn description(&self) -> &str {
            "fixed results"
        }

        fn is_available(&self, ctx: &ScopeContext) -> bool {
            !self.workflow_only || ctx.is_workflow_page
        }

        async fn search(
            &self,
            _query: &str,
            _term: &str,
            _locale: &str,
        ) -> Result<Vec<SearchResult>, SearchError> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail {
                return Err(SearchError::Failed {
                    scope: self.id.to_string(),
                    message: "backend unavailable".to_string(),
                });
            }
            Ok(self.results.clone())
        }
    }
}
