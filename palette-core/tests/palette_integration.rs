//! End-to-end tests of the palette: typed query -> results -> selection -> host.

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;

use palette_core::{
    HostAction, PageContext, Palette, PaletteConfig, RecordingHost, ResultKind, SearchSession,
    SelectOutcome, StaticCatalog, ThemeMode, WorkflowNodeInfo,
};

const FIXTURE: &str = r#"{
  "apps": [
    {"id": "app-1", "name": "Support Bot", "mode": "chat", "description": "Answers tickets"},
    {"id": "app-2", "name": "Support Triage", "mode": "workflow"}
  ],
  "datasets": [
    {"id": "ds-1", "name": "Support Handbook", "document_count": 42},
    {"id": "ds-2", "name": "Partner API", "provider": "external"}
  ],
  "plugins": [
    {
      "name": "zendesk",
      "org": "community",
      "plugin_id": "community/zendesk",
      "label": {"en_US": "Zendesk Support", "zh_Hans": "Zendesk 支持"},
      "brief": {"en_US": "Read and update tickets"}
    }
  ]
}"#;

struct Fixture {
    palette: Palette,
    host: Arc<RecordingHost>,
    _dir: tempfile::TempDir,
}

fn fixture(path: &str) -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("catalog.json");
    std::fs::write(&file, FIXTURE).unwrap();

    let host = Arc::new(RecordingHost::new());
    let palette = Palette::new(
        PaletteConfig::default(),
        host.clone(),
        Arc::new(StaticCatalog::from_file(&file).unwrap()),
        Arc::new(PageContext::new(path)),
    );
    Fixture {
        palette,
        host,
        _dir: dir,
    }
}

#[tokio::test]
async fn test_free_text_searches_every_scope_in_order() {
    let f = fixture("/apps");
    let results = f.palette.search("support").await;
    let kinds: Vec<ResultKind> = results.iter().map(|r| r.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            ResultKind::App,
            ResultKind::App,
            ResultKind::Knowledge,
            ResultKind::Plugin
        ]
    );
    assert_eq!(results[3].title, "Zendesk Support");
    assert_eq!(
        results[3].description.as_deref(),
        Some("Read and update tickets")
    );
}

#[tokio::test]
async fn test_scoped_search_uses_term_only() {
    let f = fixture("/apps");
    let results = f.palette.search("@kb partner").await;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].path.as_deref(), Some("/datasets/ds-2/hitTesting"));

    let outcome = f.palette.select(&results[0]).await.unwrap();
    assert_eq!(
        outcome,
        SelectOutcome::Navigated("/datasets/ds-2/hitTesting".into())
    );
}

#[tokio::test]
async fn test_incomplete_prefixes_return_nothing() {
    let f = fixture("/apps");
    assert!(f.palette.search("@ap").await.is_empty());
    assert!(f.palette.search("/the").await.is_empty());
    // Direct commands are not searchable through the slash scope.
    assert!(f.palette.search("/docs").await.is_empty());
}

#[tokio::test]
async fn test_theme_command_end_to_end() {
    let f = fixture("/apps");
    let results = f.palette.search("/theme dark").await;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "theme-dark");

    f.palette.select(&results[0]).await.unwrap();
    assert_eq!(f.host.actions(), vec![HostAction::SetTheme(ThemeMode::Dark)]);
}

#[tokio::test]
async fn test_plugin_locale_follows_language_switch() {
    let f = fixture("/apps");
    let results = f.palette.search("/language zh-Hans").await;
    f.palette.select(&results[0]).await.unwrap();
    assert_eq!(f.palette.locale(), "zh-Hans");

    let plugins = f.palette.search("@plugin zendesk").await;
    assert_eq!(plugins[0].title, "Zendesk 支持");
    assert_eq!(
        f.palette.select(&plugins[0]).await.unwrap(),
        SelectOutcome::Navigated("/plugins?plugin_id=community/zendesk".into())
    );
}

#[tokio::test]
async fn test_direct_commands_run_from_selector() {
    let f = fixture("/apps");
    f.palette.execute_direct("docs").await.unwrap();
    f.palette.execute_direct("feedback").await.unwrap();
    assert_eq!(
        f.host.actions(),
        vec![
            HostAction::OpenUrl("https://docs.dify.ai/en".into()),
            HostAction::OpenUrl("https://forum.dify.ai".into()),
        ]
    );

    assert!(f.palette.execute_direct("theme").await.is_err());
    assert!(f.palette.execute_direct("zen").await.is_err());
    assert!(f.palette.execute_direct("nope").await.is_err());
}

#[tokio::test]
async fn test_registry_resolution_stages() {
    let f = fixture("/apps");
    let registry = f.palette.slash_commands();

    // Partial: alias prefix beats name prefix.
    let partial = registry.search("/la", "en-US").await;
    assert_eq!(partial[0].id, "lang-en-US");

    // Fuzzy: substring of names and aliases.
    let fuzzy = registry.search("/ord", "en-US").await;
    let ids: Vec<&str> = fuzzy.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["fuzzy-discord"]);
    assert_eq!(
        fuzzy[0].description.as_deref(),
        Some("Join the community on Discord (alias for /community)")
    );
}

#[tokio::test]
async fn test_workflow_page_commands_and_nodes() {
    let f = fixture("/app/app-2/workflow");
    f.palette.workflow_nodes().set_nodes(vec![
        WorkflowNodeInfo {
            node_id: "start".into(),
            title: "Start".into(),
            node_type: "start".into(),
            description: String::new(),
        },
        WorkflowNodeInfo {
            node_id: "llm-1".into(),
            title: "Draft Reply".into(),
            node_type: "llm".into(),
            description: String::new(),
        },
    ]);

    let nodes = f.palette.search("@node llm").await;
    assert_eq!(nodes.len(), 1);
    f.palette.select(&nodes[0]).await.unwrap();

    let root = f.palette.slash_commands().search("/", "en-US").await;
    let zen = root.iter().find(|r| r.id == "root-zen").unwrap();
    assert_eq!(f.palette.select(zen).await.unwrap(), SelectOutcome::Executed);

    let vibe = f.palette.search("/vibe route refunds to billing").await;
    f.palette.select(&vibe[0]).await.unwrap();

    assert_eq!(
        f.host.actions(),
        vec![
            HostAction::SelectWorkflowNode("llm-1".into()),
            HostAction::ToggleZenMode,
            HostAction::GenerateWorkflow("route refunds to billing".into()),
        ]
    );
}

#[tokio::test]
async fn test_leaving_workflow_page_hides_workflow_features() {
    let f = fixture("/app/app-2/workflow");
    assert!(!f.palette.search("/vibe x").await.is_empty());

    f.palette.page().set_path("/apps");
    // `/vibe` still names a submenu command, but it is unavailable here.
    assert!(f.palette.search("/vibe x").await.is_empty());
    assert!(f.palette.search("@node start").await.is_empty());
}

#[tokio::test]
async fn test_unregistering_all_commands_clears_bus() {
    let f = fixture("/apps");
    let registry = f.palette.slash_commands();
    for handler in registry.all_commands() {
        assert!(registry.unregister(handler.name()));
    }
    assert!(registry.is_empty());
    assert!(f.palette.bus().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_session_discards_superseded_queries() {
    let f = fixture("/apps");
    let session = SearchSession::with_debounce(Arc::new(f.palette), Duration::from_millis(300));

    let first = session.search("sup");
    let second = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        session.search("handbook").await
    };
    let (first, second) = tokio::join!(first, second);
    assert!(first.is_none());
    let second = second.unwrap();
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].id, "ds-1");
}
