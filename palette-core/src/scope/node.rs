//! `@node`: nodes of the workflow open in the editor.

use super::Scope;
use crate::context::ScopeContext;
use crate::error::SearchError;
use crate::types::{ResultPayload, SearchResult, WorkflowNodeInfo};
use async_trait::async_trait;
use std::sync::RwLock;

/// Rank of `node` for the lowercased `term`; 0 means no match.
pub fn score_node(node: &WorkflowNodeInfo, term: &str) -> u32 {
    let title = node.title.to_lowercase();
    if title == term {
        100
    } else if title.starts_with(term) {
        50
    } else if title.contains(term) {
        25
    } else if node.node_type.to_lowercase().contains(term) {
        10
    } else if node.description.to_lowercase().contains(term) {
        5
    } else {
        0
    }
}

/// Searches the nodes the editor last pushed with [`WorkflowNodeScope::set_nodes`].
#[derive(Default)]
pub struct WorkflowNodeScope {
    nodes: RwLock<Vec<WorkflowNodeInfo>>,
}

impl WorkflowNodeScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_nodes(&self, nodes: Vec<WorkflowNodeInfo>) {
        *self.nodes.write().unwrap_or_else(|e| e.into_inner()) = nodes;
    }

    pub fn clear_nodes(&self) {
        self.nodes.write().unwrap_or_else(|e| e.into_inner()).clear();
    }

    pub fn node_count(&self) -> usize {
        self.nodes.read().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[async_trait]
impl Scope for WorkflowNodeScope {
    fn id(&self) -> &str {
        "node"
    }

    fn shortcut(&self) -> &str {
        "@node"
    }

    fn title(&self) -> &str {
        "Search Nodes"
    }

    fn description(&self) -> &str {
        "Find and jump to nodes in the current workflow"
    }

    fn is_available(&self, ctx: &ScopeContext) -> bool {
        ctx.is_workflow_page || ctx.is_rag_pipeline_page
    }

    async fn search(
        &self,
        _query: &str,
        term: &str,
        _locale: &str,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let term = term.trim().to_lowercase();
        let nodes = self.nodes.read().unwrap_or_else(|e| e.into_inner()).clone();

        let mut scored: Vec<(u32, WorkflowNodeInfo)> = if term.is_empty() {
            nodes.into_iter().map(|n| (0, n)).collect()
        } else {
            nodes
                .into_iter()
                .map(|n| (score_node(&n, &term), n))
                .filter(|(score, _)| *score > 0)
                .collect()
        };
        // sort_by is stable: equal scores keep canvas order.
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        Ok(scored
            .into_iter()
            .map(|(_, node)| SearchResult {
                id: node.node_id.clone(),
                title: node.title.clone(),
                description: Some(if node.description.is_empty() {
                    node.node_type.clone()
                } else {
                    node.description.clone()
                }),
                path: None,
                icon: None,
                payload: ResultPayload::WorkflowNode(node),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn node(id: &str, title: &str, node_type: &str, description: &str) -> WorkflowNodeInfo {
        WorkflowNodeInfo {
            node_id: id.into(),
            title: title.into(),
            node_type: node_type.into(),
            description: description.into(),
        }
    }

    fn scope() -> WorkflowNodeScope {
        let scope = WorkflowNodeScope::new();
        scope.set_nodes(vec![
            node("1", "Start", "start", ""),
            node("2", "Summarize LLM", "llm", "Summarize the ticket"),
            node("3", "LLM", "llm", ""),
            node("4", "Classify", "question-classifier", "Uses an LLM"),
            node("5", "LLM Router", "if-else", ""),
            node("6", "Answer", "answer", ""),
        ]);
        scope
    }

    #[test]
    fn test_score_tiers() {
        let n = node("x", "Code Runner", "code", "Runs python");
        assert_eq!(score_node(&n, "code runner"), 100);
        assert_eq!(score_node(&n, "code"), 50);
        assert_eq!(score_node(&n, "runner"), 25);
        assert_eq!(score_node(&node("y", "Step", "code", ""), "cod"), 10);
        assert_eq!(score_node(&n, "python"), 5);
        assert_eq!(score_node(&n, "http"), 0);
    }

    #[tokio::test]
    async fn test_results_sorted_by_score() {
        let results = scope().search("@node llm", "LLM", "en-US").await.unwrap();
        let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "5", "2", "4"]);
    }

    #[tokio::test]
    async fn test_empty_term_lists_all_in_order() {
        let results = scope().search("@node", "", "en-US").await.unwrap();
        assert_eq!(results.len(), 6);
        assert_eq!(results[0].id, "1");
        assert_eq!(results[0].description.as_deref(), Some("start"));
    }

    #[tokio::test]
    async fn test_clear_nodes() {
        let scope = scope();
        scope.clear_nodes();
        assert_eq!(scope.node_count(), 0);
        assert!(scope.search("", "", "en-US").await.unwrap().is_empty());
    }

    #[test]
    fn test_available_on_workflow_and_pipeline() {
        let scope = WorkflowNodeScope::new();
        assert!(!scope.is_available(&ScopeContext::default()));
        assert!(scope.is_available(&ScopeContext {
            is_workflow_page: true,
            is_rag_pipeline_page: false,
        }));
        assert!(scope.is_available(&ScopeContext {
            is_workflow_page: false,
            is_rag_pipeline_page: true,
        }));
    }
}
