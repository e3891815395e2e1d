//! Scopes backed by a [`Catalog`]: applications, knowledge bases, plugins.

use super::Scope;
use crate::catalog::Catalog;
use crate::error::SearchError;
use crate::types::{ResultPayload, SearchResult};
use async_trait::async_trait;
use std::sync::Arc;

/// `@app`: applications in the workspace.
pub struct AppScope {
    catalog: Arc<dyn Catalog>,
    limit: usize,
}

impl AppScope {
    pub fn new(catalog: Arc<dyn Catalog>, limit: usize) -> Self {
        Self { catalog, limit }
    }
}

#[async_trait]
impl Scope for AppScope {
    fn id(&self) -> &str {
        "app"
    }

    fn shortcut(&self) -> &str {
        "@app"
    }

    fn title(&self) -> &str {
        "Search Applications"
    }

    fn description(&self) -> &str {
        "Search and open applications"
    }

    async fn search(
        &self,
        _query: &str,
        term: &str,
        _locale: &str,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let apps = self.catalog.search_apps(term, self.limit).await?;
        Ok(apps
            .into_iter()
            .map(|app| SearchResult {
                id: app.id.clone(),
                title: app.name.clone(),
                description: (!app.description.is_empty()).then(|| app.description.clone()),
                path: Some(app.path()),
                icon: app.icon.clone(),
                payload: ResultPayload::App(app),
            })
            .collect())
    }
}

/// `@knowledge` (alias `@kb`): knowledge bases.
pub struct KnowledgeScope {
    catalog: Arc<dyn Catalog>,
    limit: usize,
}

impl KnowledgeScope {
    pub fn new(catalog: Arc<dyn Catalog>, limit: usize) -> Self {
        Self { catalog, limit }
    }
}

#[async_trait]
impl Scope for KnowledgeScope {
    fn id(&self) -> &str {
        "knowledge"
    }

    fn shortcut(&self) -> &str {
        "@knowledge"
    }

    fn aliases(&self) -> &[&str] {
        &["@kb"]
    }

    fn title(&self) -> &str {
        "Search Knowledge Bases"
    }

    fn description(&self) -> &str {
        "Search and open knowledge bases"
    }

    async fn search(
        &self,
        _query: &str,
        term: &str,
        _locale: &str,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let datasets = self.catalog.search_datasets(term, self.limit).await?;
        Ok(datasets
            .into_iter()
            .map(|ds| {
                let description = if ds.description.is_empty() {
                    format!("{} documents", ds.document_count)
                } else {
                    ds.description.clone()
                };
                SearchResult {
                    id: ds.id.clone(),
                    title: ds.name.clone(),
                    description: Some(description),
                    path: Some(ds.path()),
                    icon: None,
                    payload: ResultPayload::Knowledge(ds),
                }
            })
            .collect())
    }
}

/// `@plugin`: marketplace plugins.
pub struct PluginScope {
    catalog: Arc<dyn Catalog>,
    limit: usize,
}

impl PluginScope {
    pub fn new(catalog: Arc<dyn Catalog>, limit: usize) -> Self {
        Self { catalog, limit }
    }
}

#[async_trait]
impl Scope for PluginScope {
    fn id(&self) -> &str {
        "plugin"
    }

    fn shortcut(&self) -> &str {
        "@plugin"
    }

    fn title(&self) -> &str {
        "Search Plugins"
    }

    fn description(&self) -> &str {
        "Search marketplace plugins"
    }

    async fn search(
        &self,
        _query: &str,
        term: &str,
        locale: &str,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let plugins = self.catalog.search_plugins(term, locale, self.limit).await?;
        Ok(plugins
            .into_iter()
            .map(|plugin| SearchResult {
                id: plugin.plugin_id.clone(),
                title: plugin.localized_label(locale).to_string(),
                description: plugin.localized_brief(locale).map(str::to_string),
                path: Some(format!("/plugins?plugin_id={}", plugin.plugin_id)),
                icon: plugin.icon.clone(),
                payload: ResultPayload::Plugin(plugin),
            })
            .collect())
    }
}
