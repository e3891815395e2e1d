//! Workflow editor commands, available only while a workflow is open.

use super::{DepsSlot, string_arg};
use crate::bus::command_fn;
use crate::context::PageContext;
use crate::error::{CommandError, SearchError};
use crate::slash::{CommandDeps, DirectAction, SlashCommand};
use crate::types::SearchResult;
use async_trait::async_trait;
use std::sync::Arc;

const TOGGLE_ZEN: &str = "workflow.zen";
const GENERATE: &str = "workflow.vibe";

/// `/zen`: hide the editor chrome around the canvas.
pub struct ZenCommand {
    page: Arc<PageContext>,
    deps: DepsSlot,
}

impl ZenCommand {
    pub fn new(page: Arc<PageContext>) -> Self {
        Self {
            page,
            deps: DepsSlot::default(),
        }
    }
}

#[async_trait]
impl SlashCommand for ZenCommand {
    fn name(&self) -> &str {
        "zen"
    }

    fn description(&self) -> &str {
        "Toggle zen mode for distraction-free editing"
    }

    fn is_available(&self) -> bool {
        self.page.is_workflow_page()
    }

    async fn search(&self, _args: &str, _locale: &str) -> Result<Vec<SearchResult>, SearchError> {
        Ok(vec![SearchResult::command(
            "zen",
            "Zen Mode",
            self.description(),
            TOGGLE_ZEN,
            None,
        )])
    }

    fn register(&self, deps: &CommandDeps) {
        self.deps.set(deps);
        let host = deps.host.clone();
        deps.bus.register_commands([(
            TOGGLE_ZEN,
            command_fn(move |_| {
                let host = host.clone();
                async move {
                    host.toggle_zen_mode();
                    Ok(())
                }
            }),
        )]);
    }

    fn unregister(&self, deps: Option<&CommandDeps>) {
        if let Some(deps) = deps {
            deps.bus.unregister_commands([TOGGLE_ZEN]);
        }
        self.deps.clear();
    }
}

#[async_trait]
impl DirectAction for ZenCommand {
    async fn execute(&self) -> Result<(), CommandError> {
        let deps = self.deps.get(self.name())?;
        deps.bus.execute_command(TOGGLE_ZEN, None).await
    }
}

/// `/vibe <prompt>`: generate a workflow from a description.
pub struct VibeCommand {
    page: Arc<PageContext>,
}

impl VibeCommand {
    pub fn new(page: Arc<PageContext>) -> Self {
        Self { page }
    }
}

#[async_trait]
impl SlashCommand for VibeCommand {
    fn name(&self) -> &str {
        "vibe"
    }

    fn description(&self) -> &str {
        "Generate a workflow from a natural-language description"
    }

    fn is_available(&self) -> bool {
        self.page.is_workflow_page()
    }

    async fn search(&self, args: &str, _locale: &str) -> Result<Vec<SearchResult>, SearchError> {
        let prompt = args.trim();
        // Picking the hint reopens `/vibe ` so the prompt can be typed.
        if prompt.is_empty() {
            return Ok(vec![SearchResult::command(
                "vibe-hint",
                "Describe the workflow to generate",
                "Type /vibe followed by what the workflow should do",
                "root.vibe",
                Some(serde_json::json!({ "name": self.name() })),
            )]);
        }
        Ok(vec![SearchResult::command(
            "vibe-generate",
            format!("Generate: {}", prompt),
            self.description(),
            GENERATE,
            Some(serde_json::json!({ "prompt": prompt })),
        )])
    }

    fn register(&self, deps: &CommandDeps) {
        let host = deps.host.clone();
        deps.bus.register_commands([(
            GENERATE,
            command_fn(move |args| {
                let host = host.clone();
                async move {
                    let prompt = string_arg(GENERATE, &args, "prompt")?;
                    if prompt.trim().is_empty() {
                        return Err(CommandError::InvalidArguments {
                            name: GENERATE.to_string(),
                            reason: "prompt is empty".to_string(),
                        });
                    }
                    host.generate_workflow(prompt.trim()).await?;
                    Ok(())
                }
            }),
        )]);
    }

    fn unregister(&self, deps: Option<&CommandDeps>) {
        if let Some(deps) = deps {
            deps.bus.unregister_commands([GENERATE]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::CommandBus;
    use crate::host::{HostAction, RecordingHost};

    fn deps(host: Arc<RecordingHost>) -> (CommandDeps, Arc<CommandBus>) {
        let bus = Arc::new(CommandBus::new());
        (CommandDeps::new(bus.clone(), host), bus)
    }

    #[tokio::test]
    async fn test_zen_toggles_through_bus() {
        let host = Arc::new(RecordingHost::new());
        let (deps, _bus) = deps(host.clone());
        let zen = ZenCommand::new(Arc::new(PageContext::new("/app/1/workflow")));
        zen.register(&deps);

        assert!(zen.is_available());
        zen.execute().await.unwrap();
        assert_eq!(host.actions(), vec![HostAction::ToggleZenMode]);
    }

    #[tokio::test]
    async fn test_vibe_hint_without_prompt() {
        let vibe = VibeCommand::new(Arc::new(PageContext::new("/app/1/workflow")));
        let results = vibe.search("  ", "en-US").await.unwrap();
        assert_eq!(results[0].id, "vibe-hint");
        let invocation = results[0].invocation().unwrap();
        assert_eq!(invocation.command, "root.vibe");
        assert_eq!(invocation.args, Some(serde_json::json!({ "name": "vibe" })));
    }

    #[tokio::test]
    async fn test_vibe_generates_from_prompt() {
        let host = Arc::new(RecordingHost::new());
        let (deps, bus) = deps(host.clone());
        let vibe = VibeCommand::new(Arc::new(PageContext::new("/app/1/workflow")));
        vibe.register(&deps);

        let results = vibe.search("summarize support tickets", "en-US").await.unwrap();
        let invocation = results[0].invocation().unwrap().clone();
        assert_eq!(results[0].title, "Generate: summarize support tickets");

        bus.execute_command(&invocation.command, invocation.args)
            .await
            .unwrap();
        assert_eq!(
            host.last(),
            Some(HostAction::GenerateWorkflow("summarize support tickets".into()))
        );

        let err = bus.execute_command(GENERATE, None).await.unwrap_err();
        assert!(matches!(err, CommandError::InvalidArguments { .. }));
    }

    #[test]
    fn test_unavailable_outside_workflow() {
        let page = Arc::new(PageContext::new("/datasets"));
        assert!(!ZenCommand::new(page.clone()).is_available());
        assert!(!VibeCommand::new(page).is_available());
    }
}
