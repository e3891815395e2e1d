//! Core type definitions for the palette.
//!
//! Defines search results and their typed payloads, the catalog records they
//! are built from, and small shared enums such as the theme mode.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The kind of a search result, used for grouping in result lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResultKind {
    App,
    Plugin,
    Knowledge,
    WorkflowNode,
    Command,
}

impl ResultKind {
    pub fn label(&self) -> &'static str {
        match self {
            ResultKind::App => "app",
            ResultKind::Plugin => "plugin",
            ResultKind::Knowledge => "knowledge",
            ResultKind::WorkflowNode => "workflow-node",
            ResultKind::Command => "command",
        }
    }
}

impl std::fmt::Display for ResultKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// An application as returned by the console API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// App mode, e.g. `chat`, `completion`, `workflow`, `advanced-chat`, `agent-chat`.
    pub mode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl AppInfo {
    /// Route that opens this app in the editor appropriate for its mode.
    pub fn path(&self) -> String {
        match self.mode.as_str() {
            "workflow" | "advanced-chat" => format!("/app/{}/workflow", self.id),
            _ => format!("/app/{}/configuration", self.id),
        }
    }
}

/// A knowledge base (dataset).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// `vendor` for hosted datasets, `external` for external knowledge APIs.
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default)]
    pub document_count: u64,
}

fn default_provider() -> String {
    "vendor".to_string()
}

impl DatasetInfo {
    pub fn is_external(&self) -> bool {
        self.provider == "external"
    }

    /// External datasets have no document list, so they open on retrieval testing.
    pub fn path(&self) -> String {
        if self.is_external() {
            format!("/datasets/{}/hitTesting", self.id)
        } else {
            format!("/datasets/{}/documents", self.id)
        }
    }
}

/// A marketplace plugin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginInfo {
    pub name: String,
    #[serde(default)]
    pub org: String,
    pub plugin_id: String,
    /// Localized labels keyed by marketplace locale (`en_US`, `zh_Hans`, ...).
    #[serde(default)]
    pub label: BTreeMap<String, String>,
    /// Localized one-line descriptions, keyed like `label`.
    #[serde(default)]
    pub brief: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl PluginInfo {
    /// Label for `locale`, falling back to English and then to the plugin name.
    pub fn localized_label(&self, locale: &str) -> &str {
        localized(&self.label, locale).unwrap_or(&self.name)
    }

    /// Brief for `locale`, falling back to English.
    pub fn localized_brief(&self, locale: &str) -> Option<&str> {
        localized(&self.brief, locale)
    }
}

/// Look up a marketplace-keyed translation. `zh-Hans` maps to `zh_Hans`.
fn localized<'a>(map: &'a BTreeMap<String, String>, locale: &str) -> Option<&'a str> {
    let key = locale.replace('-', "_");
    map.get(&key)
        .or_else(|| map.get("en_US"))
        .map(String::as_str)
}

/// A node on the workflow canvas currently open in the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowNodeInfo {
    pub node_id: String,
    pub title: String,
    /// Block type, e.g. `llm`, `code`, `knowledge-retrieval`.
    pub node_type: String,
    #[serde(default)]
    pub description: String,
}

/// A named command on the command bus plus optional JSON arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandInvocation {
    pub command: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<serde_json::Value>,
}

/// Typed payload of a search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum ResultPayload {
    App(AppInfo),
    Plugin(PluginInfo),
    Knowledge(DatasetInfo),
    WorkflowNode(WorkflowNodeInfo),
    Command(CommandInvocation),
}

/// A single entry in the palette's result list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(flatten)]
    pub payload: ResultPayload,
}

impl SearchResult {
    /// Build a command result that dispatches `command` with `args` on selection.
    pub fn command(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        command: impl Into<String>,
        args: Option<serde_json::Value>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: Some(description.into()),
            path: None,
            icon: None,
            payload: ResultPayload::Command(CommandInvocation {
                command: command.into(),
                args,
            }),
        }
    }

    pub fn kind(&self) -> ResultKind {
        match &self.payload {
            ResultPayload::App(_) => ResultKind::App,
            ResultPayload::Plugin(_) => ResultKind::Plugin,
            ResultPayload::Knowledge(_) => ResultKind::Knowledge,
            ResultPayload::WorkflowNode(_) => ResultKind::WorkflowNode,
            ResultPayload::Command(_) => ResultKind::Command,
        }
    }

    /// The command invocation, if this is a command result.
    pub fn invocation(&self) -> Option<&CommandInvocation> {
        match &self.payload {
            ResultPayload::Command(invocation) => Some(invocation),
            _ => None,
        }
    }
}

/// Color scheme requested through `/theme`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    pub fn all() -> &'static [ThemeMode] {
        &[ThemeMode::Light, ThemeMode::Dark, ThemeMode::System]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::System => "system",
        }
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            "system" => Ok(ThemeMode::System),
            other => Err(format!("unknown theme '{}'", other)),
        }
    }
}
