//! Command bus: a name -> handler table for actions triggered by selected results.
//!
//! Slash commands register named handlers here (e.g. `theme.set`) when they are
//! registered themselves; a command result carries the handler name plus JSON
//! arguments, and selecting it calls [`CommandBus::execute_command`].

use crate::error::CommandError;
use futures::future::BoxFuture;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Future returned by a bus command.
pub type CommandFuture = BoxFuture<'static, Result<(), CommandError>>;

/// A bus command handler. Receives the optional arguments of the invocation.
pub type CommandFn = Arc<dyn Fn(Option<serde_json::Value>) -> CommandFuture + Send + Sync>;

/// Wrap an async closure into a [`CommandFn`].
pub fn command_fn<F, Fut>(f: F) -> CommandFn
where
    F: Fn(Option<serde_json::Value>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), CommandError>> + Send + 'static,
{
    Arc::new(move |args| Box::pin(f(args)))
}

/// Process-wide table of named command handlers.
#[derive(Default)]
pub struct CommandBus {
    handlers: RwLock<HashMap<String, CommandFn>>,
}

impl CommandBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert handlers, overwriting any existing entry with the same name.
    pub fn register_commands<I, S>(&self, commands: I)
    where
        I: IntoIterator<Item = (S, CommandFn)>,
        S: Into<String>,
    {
        let mut handlers = self.handlers.write().unwrap_or_else(|e| e.into_inner());
        for (name, handler) in commands {
            let name = name.into();
            debug!(command = %name, "Registering bus command");
            handlers.insert(name, handler);
        }
    }

    /// Remove handlers by name. Unknown names are ignored.
    pub fn unregister_commands<I, S>(&self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut handlers = self.handlers.write().unwrap_or_else(|e| e.into_inner());
        for name in names {
            if handlers.remove(name.as_ref()).is_some() {
                debug!(command = %name.as_ref(), "Unregistered bus command");
            }
        }
    }

    /// Run the handler registered under `name`.
    ///
    /// An unregistered name resolves to `Ok(())` without side effects.
    pub async fn execute_command(
        &self,
        name: &str,
        args: Option<serde_json::Value>,
    ) -> Result<(), CommandError> {
        let handler = {
            let handlers = self.handlers.read().unwrap_or_else(|e| e.into_inner());
            handlers.get(name).cloned()
        };
        match handler {
            Some(handler) => handler(args).await,
            None => Ok(()),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(name)
    }

    /// Registered command names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .handlers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.handlers.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
