//! Navigation commands: `/docs`, `/community`, `/forum`, `/account`.
//!
//! Each is a direct command. Its action and its single search result both go
//! through the same bus command.

use super::DepsSlot;
use crate::bus::command_fn;
use crate::config::LinksConfig;
use crate::error::{CommandError, SearchError};
use crate::slash::{CommandDeps, DirectAction, SlashCommand};
use crate::types::SearchResult;
use async_trait::async_trait;

/// Documentation URL for `locale`.
pub fn docs_url(base_url: &str, locale: &str) -> String {
    let lang = locale.to_lowercase();
    let section = if lang.starts_with("zh") {
        "zh-hans"
    } else if lang.starts_with("ja") {
        "ja-jp"
    } else {
        "en"
    };
    format!("{}/{}", base_url.trim_end_matches('/'), section)
}

#[derive(Debug, Clone)]
enum Target {
    /// Locale-dependent documentation site.
    Docs {
        base_url: String,
        default_locale: String,
    },
    External(String),
    /// In-app route.
    Internal(String),
}

/// A direct command that opens a link or navigates to a page.
pub struct LinkCommand {
    name: &'static str,
    aliases: &'static [&'static str],
    title: &'static str,
    description: &'static str,
    bus_command: &'static str,
    target: Target,
    deps: DepsSlot,
}

impl LinkCommand {
    fn new(
        name: &'static str,
        aliases: &'static [&'static str],
        title: &'static str,
        description: &'static str,
        bus_command: &'static str,
        target: Target,
    ) -> Self {
        Self {
            name,
            aliases,
            title,
            description,
            bus_command,
            target,
            deps: DepsSlot::default(),
        }
    }

    pub fn docs(links: &LinksConfig, default_locale: &str) -> Self {
        Self::new(
            "docs",
            &["documentation"],
            "Documentation",
            "Open the help documentation",
            "navigation.doc",
            Target::Docs {
                base_url: links.docs_base_url.clone(),
                default_locale: default_locale.to_string(),
            },
        )
    }

    pub fn community(links: &LinksConfig) -> Self {
        Self::new(
            "community",
            &["discord"],
            "Community",
            "Join the community on Discord",
            "navigation.community",
            Target::External(links.community_url.clone()),
        )
    }

    pub fn forum(links: &LinksConfig) -> Self {
        Self::new(
            "forum",
            &["feedback"],
            "Forum",
            "Ask questions and share feedback on the forum",
            "navigation.forum",
            Target::External(links.forum_url.clone()),
        )
    }

    pub fn account(links: &LinksConfig) -> Self {
        Self::new(
            "account",
            &["profile"],
            "Account",
            "Open account settings",
            "navigation.account",
            Target::Internal(links.account_path.clone()),
        )
    }

    fn args_for(&self, locale: &str) -> serde_json::Value {
        match &self.target {
            Target::Docs { base_url, .. } => serde_json::json!({ "url": docs_url(base_url, locale) }),
            Target::External(url) => serde_json::json!({ "url": url }),
            Target::Internal(path) => serde_json::json!({ "path": path }),
        }
    }
}

#[async_trait]
impl SlashCommand for LinkCommand {
    fn name(&self) -> &str {
        self.name
    }

    fn aliases(&self) -> &[&str] {
        self.aliases
    }

    fn description(&self) -> &str {
        self.description
    }

    async fn search(&self, _args: &str, locale: &str) -> Result<Vec<SearchResult>, SearchError> {
        Ok(vec![SearchResult::command(
            self.name,
            self.title,
            self.description,
            self.bus_command,
            Some(self.args_for(locale)),
        )])
    }

    fn register(&self, deps: &CommandDeps) {
        self.deps.set(deps);
        let host = deps.host.clone();
        let target = self.target.clone();
        deps.bus.register_commands([(
            self.bus_command,
            command_fn(move |args| {
                let host = host.clone();
                let target = target.clone();
                async move {
                    let arg = |key: &str| {
                        args.as_ref()
                            .and_then(|a| a.get(key))
                            .and_then(|v| v.as_str())
                            .map(str::to_string)
                    };
                    match target {
                        Target::Docs {
                            base_url,
                            default_locale,
                        } => {
                            let url = arg("url").unwrap_or_else(|| docs_url(&base_url, &default_locale));
                            host.open_url(&url)?;
                        }
                        Target::External(url) => host.open_url(&arg("url").unwrap_or(url))?,
                        Target::Internal(path) => host.navigate(&arg("path").unwrap_or(path)),
                    }
                    Ok(())
                }
            }),
        )]);
    }

    fn unregister(&self, deps: Option<&CommandDeps>) {
        if let Some(deps) = deps {
            deps.bus.unregister_commands([self.bus_command]);
        }
        self.deps.clear();
    }
}

#[async_trait]
impl DirectAction for LinkCommand {
    async fn execute(&self) -> Result<(), CommandError> {
        let deps = self.deps.get(self.name)?;
        deps.bus.execute_command(self.bus_command, None).await
    }
}
