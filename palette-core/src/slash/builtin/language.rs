//! `/language` (alias `/lang`): switch the interface language.

use super::string_arg;
use crate::bus::command_fn;
use crate::error::{HostError, SearchError};
use crate::slash::{CommandDeps, SlashCommand};
use crate::types::SearchResult;
use async_trait::async_trait;

const SET_LOCALE: &str = "i18n.set";

/// Supported interface locales and their native names.
pub const LANGUAGES: &[(&str, &str)] = &[
    ("en-US", "English (United States)"),
    ("zh-Hans", "简体中文"),
    ("zh-Hant", "繁體中文"),
    ("pt-BR", "Português (Brasil)"),
    ("es-ES", "Español (España)"),
    ("fr-FR", "Français (France)"),
    ("de-DE", "Deutsch (Deutschland)"),
    ("ja-JP", "日本語 (日本)"),
    ("ko-KR", "한국어 (대한민국)"),
    ("ru-RU", "Русский (Россия)"),
    ("it-IT", "Italiano (Italia)"),
    ("uk-UA", "Українська (Україна)"),
    ("vi-VN", "Tiếng Việt (Việt Nam)"),
    ("ro-RO", "Română (România)"),
    ("pl-PL", "Polski (Polska)"),
    ("hi-IN", "Hindi (India)"),
    ("tr-TR", "Türkçe"),
    ("fa-IR", "Farsi (Iran)"),
    ("sl-SI", "Slovensko (Slovenija)"),
    ("th-TH", "ไทย (ประเทศไทย)"),
    ("id-ID", "Bahasa Indonesia"),
    ("ar-TN", "العربية (تونس)"),
];

pub fn is_supported_locale(locale: &str) -> bool {
    LANGUAGES.iter().any(|(code, _)| *code == locale)
}

#[derive(Debug, Default)]
pub struct LanguageCommand;

impl LanguageCommand {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SlashCommand for LanguageCommand {
    fn name(&self) -> &str {
        "language"
    }

    fn aliases(&self) -> &[&str] {
        &["lang"]
    }

    fn description(&self) -> &str {
        "Switch the interface language"
    }

    async fn search(&self, args: &str, _locale: &str) -> Result<Vec<SearchResult>, SearchError> {
        let filter = args.trim().to_lowercase();
        Ok(LANGUAGES
            .iter()
            .filter(|(code, name)| {
                filter.is_empty()
                    || code.to_lowercase().contains(&filter)
                    || name.to_lowercase().contains(&filter)
            })
            .map(|(code, name)| {
                SearchResult::command(
                    format!("lang-{}", code),
                    *name,
                    format!("Switch to {}", code),
                    SET_LOCALE,
                    Some(serde_json::json!({ "locale": code })),
                )
            })
            .collect())
    }

    fn register(&self, deps: &CommandDeps) {
        let host = deps.host.clone();
        deps.bus.register_commands([(
            SET_LOCALE,
            command_fn(move |args| {
                let host = host.clone();
                async move {
                    let locale = string_arg(SET_LOCALE, &args, "locale")?;
                    if !is_supported_locale(&locale) {
                        return Err(HostError::UnsupportedLocale { locale }.into());
                    }
                    host.set_locale(&locale).await?;
                    Ok(())
                }
            }),
        )]);
    }

    fn unregister(&self, deps: Option<&CommandDeps>) {
        if let Some(deps) = deps {
            deps.bus.unregister_commands([SET_LOCALE]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::CommandBus;
    use crate::error::CommandError;
    use crate::host::{HostAction, RecordingHost};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_lists_every_language() {
        let results = LanguageCommand::new().search("", "en-US").await.unwrap();
        assert_eq!(results.len(), LANGUAGES.len());
        assert_eq!(results[0].id, "lang-en-US");
    }

    #[tokio::test]
    async fn test_filters_by_code_and_name() {
        let cmd = LanguageCommand::new();
        let by_code = cmd.search("ja", "en-US").await.unwrap();
        assert_eq!(by_code.len(), 1);
        assert_eq!(by_code[0].id, "lang-ja-JP");

        let by_name = cmd.search("deutsch", "en-US").await.unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id, "lang-de-DE");
    }

    #[tokio::test]
    async fn test_set_locale_validates() {
        let bus = Arc::new(CommandBus::new());
        let host = Arc::new(RecordingHost::new());
        LanguageCommand::new().register(&CommandDeps::new(bus.clone(), host.clone()));

        bus.execute_command(SET_LOCALE, Some(serde_json::json!({"locale": "zh-Hans"})))
            .await
            .unwrap();
        assert_eq!(host.last(), Some(HostAction::SetLocale("zh-Hans".into())));

        let err = bus
            .execute_command(SET_LOCALE, Some(serde_json::json!({"locale": "xx-XX"})))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CommandError::Host(HostError::UnsupportedLocale { .. })
        ));
    }
}
