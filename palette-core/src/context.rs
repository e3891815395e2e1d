//! Where the host currently is, for commands and scopes whose availability
//! depends on the page (zen mode, workflow generation, node search).

use regex::Regex;
use std::sync::{LazyLock, RwLock};

static WORKFLOW_PAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/app/[^/]+/workflow$").expect("valid workflow route pattern"));

static RAG_PIPELINE_PAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/datasets/[^/]+/pipeline$").expect("valid pipeline route pattern")
});

/// Availability flags handed to [`crate::scope::Scope::is_available`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScopeContext {
    pub is_workflow_page: bool,
    pub is_rag_pipeline_page: bool,
}

/// The host's current route, shared between the palette and its commands.
#[derive(Debug, Default)]
pub struct PageContext {
    path: RwLock<String>,
}

impl PageContext {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: RwLock::new(path.into()),
        }
    }

    pub fn set_path(&self, path: impl Into<String>) {
        *self.path.write().unwrap_or_else(|e| e.into_inner()) = path.into();
    }

    pub fn path(&self) -> String {
        self.path.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn is_workflow_page(&self) -> bool {
        WORKFLOW_PAGE.is_match(&self.path())
    }

    pub fn is_rag_pipeline_page(&self) -> bool {
        RAG_PIPELINE_PAGE.is_match(&self.path())
    }

    pub fn scope_context(&self) -> ScopeContext {
        ScopeContext {
            is_workflow_page: self.is_workflow_page(),
            is_rag_pipeline_page: self.is_rag_pipeline_page(),
        }
    }
}
