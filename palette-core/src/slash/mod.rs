//! Slash commands: `/theme dark`, `/docs`, `/lang ja`.
//!
//! A command either runs immediately when picked ([`SlashHandler::Direct`]) or
//! opens a submenu of results produced by its `search` ([`SlashHandler::Submenu`]).
//! The [`SlashCommandRegistry`] resolves typed input to a command.

pub mod builtin;
pub mod registry;

pub use builtin::register_builtin_commands;
pub use registry::{CommandEntry, SlashCommandRegistry, find_partial_match, fuzzy_matches};

use crate::bus::CommandBus;
use crate::error::{CommandError, SearchError};
use crate::host::Host;
use crate::types::SearchResult;
use async_trait::async_trait;
use std::sync::Arc;

/// Collaborators handed to a command when it is registered.
#[derive(Clone)]
pub struct CommandDeps {
    pub bus: Arc<CommandBus>,
    pub host: Arc<dyn Host>,
}

impl CommandDeps {
    pub fn new(bus: Arc<CommandBus>, host: Arc<dyn Host>) -> Self {
        Self { bus, host }
    }
}

/// Behaviour shared by every slash command.
#[async_trait]
pub trait SlashCommand: Send + Sync {
    /// Canonical name without the leading slash.
    fn name(&self) -> &str;

    /// Secondary names resolving to this command.
    fn aliases(&self) -> &[&str] {
        &[]
    }

    fn description(&self) -> &str;

    /// Whether the command can be used on the current page.
    fn is_available(&self) -> bool {
        true
    }

    /// Produce the results shown for `/<name> <args>`.
    async fn search(&self, args: &str, locale: &str) -> Result<Vec<SearchResult>, SearchError>;

    /// Install bus commands this command's results dispatch to.
    fn register(&self, _deps: &CommandDeps) {}

    /// Remove what `register` installed. `deps` is what was passed to `register`, if anything.
    fn unregister(&self, _deps: Option<&CommandDeps>) {}
}

/// The action of a command that runs immediately when selected.
#[async_trait]
pub trait DirectAction: Send + Sync {
    async fn execute(&self) -> Result<(), CommandError>;
}

/// How a command behaves when picked from the command selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandMode {
    Direct,
    Submenu,
}

/// A registered slash command.
#[derive(Clone)]
pub enum SlashHandler {
    /// Runs `action` when picked; never opens a submenu.
    Direct {
        command: Arc<dyn SlashCommand>,
        action: Arc<dyn DirectAction>,
    },
    /// Opens a submenu populated by `search`.
    Submenu(Arc<dyn SlashCommand>),
}

impl SlashHandler {
    /// Wrap a command that is also its own direct action.
    pub fn direct<C>(command: Arc<C>) -> Self
    where
        C: SlashCommand + DirectAction + 'static,
    {
        SlashHandler::Direct {
            command: command.clone(),
            action: command,
        }
    }

    pub fn submenu<C>(command: Arc<C>) -> Self
    where
        C: SlashCommand + 'static,
    {
        SlashHandler::Submenu(command)
    }

    pub fn command(&self) -> &Arc<dyn SlashCommand> {
        match self {
            SlashHandler::Direct { command, .. } => command,
            SlashHandler::Submenu(command) => command,
        }
    }

    pub fn action(&self) -> Option<&Arc<dyn DirectAction>> {
        match self {
            SlashHandler::Direct { action, .. } => Some(action),
            SlashHandler::Submenu(_) => None,
        }
    }

    pub fn mode(&self) -> CommandMode {
        match self {
            SlashHandler::Direct { .. } => CommandMode::Direct,
            SlashHandler::Submenu(_) => CommandMode::Submenu,
        }
    }

    pub fn name(&self) -> &str {
        self.command().name()
    }

    pub fn aliases(&self) -> &[&str] {
        self.command().aliases()
    }

    pub fn description(&self) -> &str {
        self.command().description()
    }

    pub fn is_available(&self) -> bool {
        self.command().is_available()
    }

    /// True when both handles wrap the same command object.
    pub fn same_as(&self, other: &SlashHandler) -> bool {
        Arc::ptr_eq(self.command(), other.command())
    }
}

impl std::fmt::Debug for SlashHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlashHandler")
            .field("name", &self.name())
            .field("aliases", &self.aliases())
            .field("mode", &self.mode())
            .finish()
    }
}
