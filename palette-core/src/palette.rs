//! The palette facade: one object wiring the bus, both registries, and the host.

use crate::bus::CommandBus;
use crate::catalog::{Catalog, StaticCatalog, catalog_from_config};
use crate::config::PaletteConfig;
use crate::context::PageContext;
use crate::error::{CommandError, HostError};
use crate::host::{Host, RecordingHost};
use crate::scope::{
    AppScope, KnowledgeScope, PluginScope, Scope, ScopeRegistry, SlashScope, WorkflowNodeScope,
    match_action,
};
use crate::search::{Suggestion, scope_suggestions, search_anything, slash_suggestions};
use crate::slash::{CommandDeps, CommandMode, SlashCommandRegistry, register_builtin_commands};
use crate::types::{ResultPayload, SearchResult, ThemeMode};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tracing::{debug, info};

/// What selecting a result did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    /// A command ran.
    Executed,
    /// The host was sent to this path.
    Navigated(String),
    /// The result opens a command's submenu; the input should become this text.
    ReplaceQuery(String),
}

/// Forwards to the embedder's host and remembers locale changes, so later
/// searches use the language picked with `/language`.
struct TrackingHost {
    inner: Arc<dyn Host>,
    locale: Arc<RwLock<String>>,
}

#[async_trait]
impl Host for TrackingHost {
    fn set_theme(&self, theme: ThemeMode) {
        self.inner.set_theme(theme);
    }

    async fn set_locale(&self, locale: &str) -> Result<(), HostError> {
        self.inner.set_locale(locale).await?;
        *self.locale.write().unwrap_or_else(|e| e.into_inner()) = locale.to_string();
        Ok(())
    }

    fn navigate(&self, path: &str) {
        self.inner.navigate(path);
    }

    fn open_url(&self, url: &str) -> Result<(), HostError> {
        self.inner.open_url(url)
    }

    fn select_workflow_node(&self, node_id: &str) {
        self.inner.select_workflow_node(node_id);
    }

    fn toggle_zen_mode(&self) {
        self.inner.toggle_zen_mode();
    }

    async fn generate_workflow(&self, prompt: &str) -> Result<(), HostError> {
        self.inner.generate_workflow(prompt).await
    }
}

/// A command palette bound to one host.
pub struct Palette {
    config: PaletteConfig,
    bus: Arc<CommandBus>,
    slash: Arc<SlashCommandRegistry>,
    scopes: Arc<ScopeRegistry>,
    nodes: Arc<WorkflowNodeScope>,
    host: Arc<dyn Host>,
    page: Arc<PageContext>,
    locale: Arc<RwLock<String>>,
}

impl Palette {
    /// A palette with the built-in commands and scopes.
    pub fn new(
        config: PaletteConfig,
        host: Arc<dyn Host>,
        catalog: Arc<dyn Catalog>,
        page: Arc<PageContext>,
    ) -> Self {
        PaletteBuilder::new(config)
            .host(host)
            .catalog(catalog)
            .page(page)
            .build()
    }

    /// Validate `config` and build the catalog it describes.
    pub fn from_config(
        config: PaletteConfig,
        host: Arc<dyn Host>,
        page: Arc<PageContext>,
    ) -> crate::error::Result<Self> {
        config.validate()?;
        let catalog = catalog_from_config(&config.catalog)?;
        Ok(Self::new(config, host, catalog, page))
    }

    pub fn builder(config: PaletteConfig) -> PaletteBuilder {
        PaletteBuilder::new(config)
    }

    /// Results for `query` on the current page.
    pub async fn search(&self, query: &str) -> Vec<SearchResult> {
        let ctx = self.page.scope_context();
        let available = self.scopes.available(&ctx);
        let matched = match_action(query, &available, &self.slash);
        let timeout = Duration::from_secs(self.config.search.scope_timeout_secs);
        search_anything(&self.locale(), query, matched.as_ref(), &available, timeout).await
    }

    /// Act on a result picked from the list.
    pub async fn select(&self, result: &SearchResult) -> Result<SelectOutcome, CommandError> {
        debug!(id = %result.id, kind = %result.kind(), "Selecting result");
        match &result.payload {
            ResultPayload::Command(invocation) => {
                if let Some(name) = invocation.command.strip_prefix("root.") {
                    let name = invocation
                        .args
                        .as_ref()
                        .and_then(|a| a.get("name"))
                        .and_then(|v| v.as_str())
                        .unwrap_or(name);
                    return self.open_command(name).await;
                }
                self.bus
                    .execute_command(&invocation.command, invocation.args.clone())
                    .await?;
                Ok(SelectOutcome::Executed)
            }
            ResultPayload::App(app) => {
                Ok(self.navigate(result.path.clone().unwrap_or_else(|| app.path())))
            }
            ResultPayload::Knowledge(ds) => {
                Ok(self.navigate(result.path.clone().unwrap_or_else(|| ds.path())))
            }
            ResultPayload::Plugin(plugin) => Ok(self.navigate(
                result
                    .path
                    .clone()
                    .unwrap_or_else(|| format!("/plugins?plugin_id={}", plugin.plugin_id)),
            )),
            ResultPayload::WorkflowNode(node) => {
                self.host.select_workflow_node(&node.node_id);
                Ok(SelectOutcome::Executed)
            }
        }
    }

    /// A command picked from the root listing: direct commands run, others
    /// open their submenu.
    async fn open_command(&self, name: &str) -> Result<SelectOutcome, CommandError> {
        let handler = self
            .slash
            .find_command(name)
            .ok_or_else(|| CommandError::NotFound {
                name: name.to_string(),
            })?;
        match handler.mode() {
            CommandMode::Direct => {
                self.slash.execute_direct(handler.name()).await?;
                Ok(SelectOutcome::Executed)
            }
            CommandMode::Submenu => Ok(SelectOutcome::ReplaceQuery(format!(
                "/{} ",
                handler.name()
            ))),
        }
    }

    fn navigate(&self, path: String) -> SelectOutcome {
        self.host.navigate(&path);
        SelectOutcome::Navigated(path)
    }

    /// Run a direct command by name or alias.
    pub async fn execute_direct(&self, name: &str) -> Result<(), CommandError> {
        self.slash.execute_direct(name).await
    }

    /// Selectable command-selector entries for a `/` query: the root listing
    /// for `/`, direct commands, aliases, and partial or fuzzy matches, all of
    /// which [`Palette::search`] leaves out. Empty unless `query` starts with `/`.
    pub async fn command_selector(&self, query: &str) -> Vec<SearchResult> {
        let trimmed = query.trim();
        if !trimmed.starts_with('/') {
            return Vec::new();
        }
        self.slash.search(trimmed, &self.locale()).await
    }

    /// Command-selector entries for a query that is still a bare prefix
    /// (`@k`, `/the`). Empty for anything else.
    pub fn suggestions(&self, query: &str) -> Vec<Suggestion> {
        let trimmed = query.trim_start();
        if trimmed.contains(char::is_whitespace) {
            return Vec::new();
        }
        if let Some(filter) = trimmed.strip_prefix('/') {
            return slash_suggestions(filter, &self.slash);
        }
        if trimmed.starts_with('@') {
            let available = self.scopes.available(&self.page.scope_context());
            return scope_suggestions(trimmed, &available);
        }
        Vec::new()
    }

    pub fn locale(&self) -> String {
        self.locale.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn set_locale(&self, locale: impl Into<String>) {
        *self.locale.write().unwrap_or_else(|e| e.into_inner()) = locale.into();
    }

    pub fn config(&self) -> &PaletteConfig {
        &self.config
    }

    pub fn bus(&self) -> &Arc<CommandBus> {
        &self.bus
    }

    pub fn slash_commands(&self) -> &Arc<SlashCommandRegistry> {
        &self.slash
    }

    pub fn scopes(&self) -> &Arc<ScopeRegistry> {
        &self.scopes
    }

    /// The `@node` scope, fed by the workflow editor.
    pub fn workflow_nodes(&self) -> &Arc<WorkflowNodeScope> {
        &self.nodes
    }

    pub fn page(&self) -> &Arc<PageContext> {
        &self.page
    }
}

/// Builder for [`Palette`].
pub struct PaletteBuilder {
    config: PaletteConfig,
    host: Option<Arc<dyn Host>>,
    catalog: Option<Arc<dyn Catalog>>,
    page: Option<Arc<PageContext>>,
    builtin_commands: bool,
    extra_scopes: Vec<Arc<dyn Scope>>,
}

impl PaletteBuilder {
    pub fn new(config: PaletteConfig) -> Self {
        Self {
            config,
            host: None,
            catalog: None,
            page: None,
            builtin_commands: true,
            extra_scopes: Vec::new(),
        }
    }

    pub fn host(mut self, host: Arc<dyn Host>) -> Self {
        self.host = Some(host);
        self
    }

    pub fn catalog(mut self, catalog: Arc<dyn Catalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn page(mut self, page: Arc<PageContext>) -> Self {
        self.page = Some(page);
        self
    }

    /// Leave the slash registry empty.
    pub fn without_builtins(mut self) -> Self {
        self.builtin_commands = false;
        self
    }

    /// Register an extra scope after the built-in ones. A scope reusing a
    /// built-in id replaces it.
    pub fn scope(mut self, scope: Arc<dyn Scope>) -> Self {
        self.extra_scopes.push(scope);
        self
    }

    pub fn build(self) -> Palette {
        let locale = Arc::new(RwLock::new(self.config.ui.locale.clone()));
        let inner = self
            .host
            .unwrap_or_else(|| Arc::new(RecordingHost::new()) as Arc<dyn Host>);
        let host: Arc<dyn Host> = Arc::new(TrackingHost {
            inner,
            locale: locale.clone(),
        });
        let catalog = self
            .catalog
            .unwrap_or_else(|| Arc::new(StaticCatalog::default()) as Arc<dyn Catalog>);
        let page = self.page.unwrap_or_default();

        let bus = Arc::new(CommandBus::new());
        let slash = Arc::new(SlashCommandRegistry::new());
        if self.builtin_commands {
            let deps = CommandDeps::new(bus.clone(), host.clone());
            register_builtin_commands(
                &slash,
                &deps,
                &self.config.links,
                &self.config.ui.locale,
                page.clone(),
            );
        }

        let limit = self.config.search.page_size;
        let nodes = Arc::new(WorkflowNodeScope::new());
        let scopes = Arc::new(ScopeRegistry::new());
        scopes.register(Arc::new(AppScope::new(catalog.clone(), limit)));
        scopes.register(Arc::new(KnowledgeScope::new(catalog.clone(), limit)));
        scopes.register(Arc::new(PluginScope::new(catalog, limit)));
        scopes.register(nodes.clone());
        scopes.register(Arc::new(SlashScope::new(slash.clone())));
        for scope in self.extra_scopes {
            scopes.register(scope);
        }

        info!(
            commands = slash.len(),
            scopes = scopes.len(),
            locale = %self.config.ui.locale,
            "Palette ready"
        );

        Palette {
            config: self.config,
            bus,
            slash,
            scopes,
            nodes,
            host,
            page,
            locale,
        }
    }
}
