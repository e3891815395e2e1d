//! Built-in slash commands.

mod language;
mod links;
mod theme;
mod workflow;

pub use language::{LANGUAGES, LanguageCommand, is_supported_locale};
pub use links::{LinkCommand, docs_url};
pub use theme::ThemeCommand;
pub use workflow::{VibeCommand, ZenCommand};

use super::{CommandDeps, SlashCommandRegistry, SlashHandler};
use crate::config::LinksConfig;
use crate::context::PageContext;
use crate::error::CommandError;
use std::sync::{Arc, RwLock};

/// Register every built-in command with `deps`.
pub fn register_builtin_commands(
    registry: &SlashCommandRegistry,
    deps: &CommandDeps,
    links: &LinksConfig,
    default_locale: &str,
    page: Arc<PageContext>,
) {
    let handlers = [
        SlashHandler::submenu(Arc::new(ThemeCommand::new())),
        SlashHandler::submenu(Arc::new(LanguageCommand::new())),
        SlashHandler::direct(Arc::new(LinkCommand::docs(links, default_locale))),
        SlashHandler::direct(Arc::new(LinkCommand::community(links))),
        SlashHandler::direct(Arc::new(LinkCommand::forum(links))),
        SlashHandler::direct(Arc::new(LinkCommand::account(links))),
        SlashHandler::direct(Arc::new(ZenCommand::new(page.clone()))),
        SlashHandler::submenu(Arc::new(VibeCommand::new(page))),
    ];
    for handler in handlers {
        registry.register(handler, Some(deps.clone()));
    }
}

/// Deps captured by a direct command at registration, used by its action.
#[derive(Default)]
pub(crate) struct DepsSlot(RwLock<Option<CommandDeps>>);

impl DepsSlot {
    pub(crate) fn set(&self, deps: &CommandDeps) {
        *self.0.write().unwrap_or_else(|e| e.into_inner()) = Some(deps.clone());
    }

    pub(crate) fn clear(&self) {
        *self.0.write().unwrap_or_else(|e| e.into_inner()) = None;
    }

    pub(crate) fn get(&self, command: &str) -> Result<CommandDeps, CommandError> {
        self.0
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
            .ok_or_else(|| CommandError::ExecutionFailed {
                name: command.to_string(),
                message: "command was registered without dependencies".to_string(),
            })
    }
}

/// String argument `key` of a bus invocation.
pub(crate) fn string_arg(
    command: &str,
    args: &Option<serde_json::Value>,
    key: &str,
) -> Result<String, CommandError> {
    args.as_ref()
        .and_then(|a| a.get(key))
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| CommandError::InvalidArguments {
            name: command.to_string(),
            reason: format!("missing '{}' argument", key),
        })
}
