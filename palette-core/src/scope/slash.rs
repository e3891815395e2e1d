use super::Scope;
use crate::error::SearchError;
use crate::slash::SlashCommandRegistry;
use crate::types::SearchResult;
use async_trait::async_trait;
use std::sync::Arc;

/// `/`: slash commands, resolved by the [`SlashCommandRegistry`].
pub struct SlashScope {
    registry: Arc<SlashCommandRegistry>,
}

impl SlashScope {
    pub fn new(registry: Arc<SlashCommandRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl Scope for SlashScope {
    fn id(&self) -> &str {
        "slash"
    }

    fn shortcut(&self) -> &str {
        "/"
    }

    fn title(&self) -> &str {
        "Commands"
    }

    fn description(&self) -> &str {
        "Run commands such as /theme or /language"
    }

    async fn search(
        &self,
        query: &str,
        _term: &str,
        locale: &str,
    ) -> Result<Vec<SearchResult>, SearchError> {
        Ok(self.registry.search(query, locale).await)
    }
}
