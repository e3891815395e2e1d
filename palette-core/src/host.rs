//! The embedding application, as seen by commands and result dispatch.
//!
//! Everything the palette needs to change outside itself (theme, locale,
//! routing, the workflow canvas) goes through [`Host`].

use crate::error::HostError;
use crate::types::ThemeMode;
use async_trait::async_trait;
use std::sync::Mutex;

/// Callbacks into the application that embeds the palette.
#[async_trait]
pub trait Host: Send + Sync {
    fn set_theme(&self, theme: ThemeMode);

    async fn set_locale(&self, locale: &str) -> Result<(), HostError>;

    /// Route to an in-app path such as `/app/<id>/workflow`.
    fn navigate(&self, path: &str);

    /// Open an external URL.
    fn open_url(&self, url: &str) -> Result<(), HostError>;

    /// Focus a node on the open workflow canvas.
    fn select_workflow_node(&self, node_id: &str);

    fn toggle_zen_mode(&self);

    /// Ask the workflow editor to generate a workflow from a natural-language prompt.
    async fn generate_workflow(&self, prompt: &str) -> Result<(), HostError>;
}

/// A call made on a [`RecordingHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostAction {
    SetTheme(ThemeMode),
    SetLocale(String),
    Navigate(String),
    OpenUrl(String),
    SelectWorkflowNode(String),
    ToggleZenMode,
    GenerateWorkflow(String),
}

/// A host that records every call, for tests and headless embedding.
#[derive(Debug, Default)]
pub struct RecordingHost {
    actions: Mutex<Vec<HostAction>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn actions(&self) -> Vec<HostAction> {
        self.actions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn last(&self) -> Option<HostAction> {
        self.actions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .cloned()
    }

    pub fn clear(&self) {
        self.actions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }

    fn record(&self, action: HostAction) {
        self.actions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(action);
    }
}

#[async_trait]
impl Host for RecordingHost {
    fn set_theme(&self, theme: ThemeMode) {
        self.record(HostAction::SetTheme(theme));
    }

    async fn set_locale(&self, locale: &str) -> Result<(), HostError> {
        self.record(HostAction::SetLocale(locale.to_string()));
        Ok(())
    }

    fn navigate(&self, path: &str) {
        self.record(HostAction::Navigate(path.to_string()));
    }

    fn open_url(&self, url: &str) -> Result<(), HostError> {
        self.record(HostAction::OpenUrl(url.to_string()));
        Ok(())
    }

    fn select_workflow_node(&self, node_id: &str) {
        self.record(HostAction::SelectWorkflowNode(node_id.to_string()));
    }

    fn toggle_zen_mode(&self) {
        self.record(HostAction::ToggleZenMode);
    }

    async fn generate_workflow(&self, prompt: &str) -> Result<(), HostError> {
        self.record(HostAction::GenerateWorkflow(prompt.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_recording_host_keeps_order() {
        let host = RecordingHost::new();
        host.set_theme(ThemeMode::Dark);
        host.set_locale("ja-JP").await.unwrap();
        host.navigate("/account");
        host.toggle_zen_mode();

        assert_eq!(
            host.actions(),
            vec![
                HostAction::SetTheme(ThemeMode::Dark),
                HostAction::SetLocale("ja-JP".into()),
                HostAction::Navigate("/account".into()),
                HostAction::ToggleZenMode,
            ]
        );
        assert_eq!(host.last(), Some(HostAction::ToggleZenMode));

        host.clear();
        assert!(host.actions().is_empty());
    }
}
