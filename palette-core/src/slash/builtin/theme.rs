//! `/theme`: pick light, dark, or system color scheme.

use super::string_arg;
use crate::bus::command_fn;
use crate::error::{CommandError, SearchError};
use crate::slash::{CommandDeps, SlashCommand};
use crate::types::{SearchResult, ThemeMode};
use async_trait::async_trait;

const SET_THEME: &str = "theme.set";

#[derive(Debug, Default)]
pub struct ThemeCommand;

impl ThemeCommand {
    pub fn new() -> Self {
        Self
    }

    fn title(mode: ThemeMode) -> &'static str {
        match mode {
            ThemeMode::Light => "Light",
            ThemeMode::Dark => "Dark",
            ThemeMode::System => "System",
        }
    }

    fn mode_description(mode: ThemeMode) -> &'static str {
        match mode {
            ThemeMode::Light => "Use the light color scheme",
            ThemeMode::Dark => "Use the dark color scheme",
            ThemeMode::System => "Follow the operating system setting",
        }
    }
}

#[async_trait]
impl SlashCommand for ThemeCommand {
    fn name(&self) -> &str {
        "theme"
    }

    fn description(&self) -> &str {
        "Switch between light and dark themes"
    }

    async fn search(&self, args: &str, _locale: &str) -> Result<Vec<SearchResult>, SearchError> {
        let filter = args.trim().to_lowercase();
        Ok(ThemeMode::all()
            .iter()
            .filter(|mode| {
                filter.is_empty()
                    || mode.as_str().contains(&filter)
                    || Self::title(**mode).to_lowercase().contains(&filter)
            })
            .map(|mode| {
                SearchResult::command(
                    format!("theme-{}", mode),
                    Self::title(*mode),
                    Self::mode_description(*mode),
                    SET_THEME,
                    Some(serde_json::json!({ "value": mode.as_str() })),
                )
            })
            .collect())
    }

    fn register(&self, deps: &CommandDeps) {
        let host = deps.host.clone();
        deps.bus.register_commands([(
            SET_THEME,
            command_fn(move |args| {
                let host = host.clone();
                async move {
                    let value = string_arg(SET_THEME, &args, "value")?;
                    let mode = value.parse::<ThemeMode>().map_err(|reason| {
                        CommandError::InvalidArguments {
                            name: SET_THEME.to_string(),
                            reason,
                        }
                    })?;
                    host.set_theme(mode);
                    Ok(())
                }
            }),
        )]);
    }

    fn unregister(&self, deps: Option<&CommandDeps>) {
        if let Some(deps) = deps {
            deps.bus.unregister_commands([SET_THEME]);
        }
    }
}
