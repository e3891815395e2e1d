//! Configuration system for Palette.
//!
//! Uses `figment` for layered configuration: defaults -> config file -> environment -> overrides.
//! Configuration is loaded from `~/.config/palette/config.toml` and/or `.palette/config.toml`
//! in the workspace directory.

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::types::ThemeMode;

/// Top-level configuration for the palette.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaletteConfig {
    pub search: SearchConfig,
    pub ui: UiConfig,
    pub links: LinksConfig,
    pub catalog: CatalogConfig,
}

/// Search behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before a search is dispatched.
    pub debounce_ms: u64,
    /// Per-scope time limit during global fan-out.
    pub scope_timeout_secs: u64,
    /// Number of catalog entries requested per scope.
    pub page_size: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            scope_timeout_secs: 10,
            page_size: 10,
        }
    }
}

/// User-facing defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Locale passed to searches (`en-US`, `zh-Hans`, `ja-JP`, ...).
    pub locale: String,
    pub theme: ThemeMode,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            locale: "en-US".to_string(),
            theme: ThemeMode::System,
        }
    }
}

/// Destinations used by the navigation commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinksConfig {
    pub docs_base_url: String,
    pub community_url: String,
    pub forum_url: String,
    pub account_path: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            docs_base_url: "https://docs.dify.ai".to_string(),
            community_url: "https://discord.gg/5AEfbxcd9k".to_string(),
            forum_url: "https://forum.dify.ai".to_string(),
            account_path: "/account".to_string(),
        }
    }
}

/// Where apps, datasets, and plugins are searched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Console API base, e.g. `https://cloud.dify.ai/console/api`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,
    pub marketplace_url: String,
    /// Environment variable holding the console API bearer token.
    pub api_token_env: String,
    /// JSON fixture used instead of the HTTP API when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixture: Option<PathBuf>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_base_url: None,
            marketplace_url: "https://marketplace.dify.ai/api/v1".to_string(),
            api_token_env: "PALETTE_API_TOKEN".to_string(),
            fixture: None,
        }
    }
}

impl PaletteConfig {
    /// Reject values that would make the palette unusable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.debounce_ms > 10_000 {
            return Err(ConfigError::Invalid {
                message: format!(
                    "search.debounce_ms must be at most 10000, got {}",
                    self.search.debounce_ms
                ),
            });
        }
        if self.search.scope_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                message: "search.scope_timeout_secs must be positive".to_string(),
            });
        }
        if self.search.page_size == 0 {
            return Err(ConfigError::Invalid {
                message: "search.page_size must be positive".to_string(),
            });
        }
        if self.ui.locale.trim().is_empty() {
            return Err(ConfigError::Invalid {
                message: "ui.locale must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Load configuration from layered sources.
///
/// Priority (highest to lowest):
/// 1. Explicit overrides (passed as argument)
/// 2. Environment variables (prefixed with `PALETTE_`)
/// 3. Workspace-local config (`.palette/config.toml`)
/// 4. User config (`~/.config/palette/config.toml`)
/// 5. Built-in defaults
pub fn load_config(
    workspace: Option<&Path>,
    overrides: Option<&PaletteConfig>,
) -> Result<PaletteConfig, Box<figment::Error>> {
    let mut figment = Figment::from(Serialized::defaults(PaletteConfig::default()));

    // User-level config
    if let Some(config_dir) = directories::ProjectDirs::from("dev", "palette", "palette") {
        let user_config = config_dir.config_dir().join("config.toml");
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }
    }

    // Workspace-level config
    if let Some(ws) = workspace {
        let ws_config = ws.join(".palette").join("config.toml");
        if ws_config.exists() {
            figment = figment.merge(Toml::file(&ws_config));
        }
    }

    // Environment variables (PALETTE_UI__LOCALE, PALETTE_SEARCH__DEBOUNCE_MS, etc.)
    figment = figment.merge(Env::prefixed("PALETTE_").split("__"));

    if let Some(overrides) = overrides {
        figment = figment.merge(Serialized::defaults(overrides));
    }

    figment.extract().map_err(Box::new)
}

/// Check whether any Palette configuration file exists (user-level or workspace-level).
pub fn config_exists(workspace: Option<&Path>) -> bool {
    if let Some(config_dir) = directories::ProjectDirs::from("dev", "palette", "palette")
        && config_dir.config_dir().join("config.toml").exists()
    {
        return true;
    }

    if let Some(ws) = workspace
        && ws.join(".palette").join("config.toml").exists()
    {
        return true;
    }

    false
}
