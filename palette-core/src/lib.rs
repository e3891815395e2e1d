//! # Palette Core
//!
//! Core library for the Palette "goto anything" command palette.
//! Provides the command bus, slash-command registry and built-in commands,
//! `@` scopes with their matching rules, search orchestration, result
//! dispatch, a debounced search session, configuration, and error types.

pub mod bus;
pub mod catalog;
pub mod config;
pub mod context;
pub mod error;
pub mod host;
pub mod palette;
pub mod scope;
pub mod search;
pub mod session;
pub mod slash;
pub mod types;

// Re-export commonly used types at the crate root.
pub use bus::{CommandBus, CommandFn, command_fn};
pub use catalog::{Catalog, CatalogFixture, HttpCatalog, StaticCatalog, catalog_from_config};
pub use config::{PaletteConfig, load_config};
pub use context::{PageContext, ScopeContext};
pub use error::{
    CatalogError, CommandError, ConfigError, HostError, PaletteError, Result, SearchError,
};
pub use host::{Host, HostAction, RecordingHost};
pub use palette::{Palette, PaletteBuilder, SelectOutcome};
pub use scope::{Scope, ScopeRegistry, WorkflowNodeScope, match_action, search_term};
pub use search::{Suggestion, scope_suggestions, search_anything, slash_suggestions};
pub use session::SearchSession;
pub use slash::{
    CommandDeps, CommandMode, DirectAction, SlashCommand, SlashCommandRegistry, SlashHandler,
};
pub use types::{
    AppInfo, CommandInvocation, DatasetInfo, PluginInfo, ResultKind, ResultPayload, SearchResult,
    ThemeMode, WorkflowNodeInfo,
};
