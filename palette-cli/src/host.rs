//! Console host: reports what the palette asks the application to do.

use async_trait::async_trait;
use palette_core::{Host, HostError, PageContext, ThemeMode};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::info;

/// A [`Host`] for the terminal. Every action is printed; navigation moves the
/// shared [`PageContext`] so page-dependent commands follow along.
pub struct ConsoleHost {
    page: Arc<PageContext>,
    open_links: bool,
    echo: bool,
    zen: AtomicBool,
    log: Mutex<Vec<String>>,
}

impl ConsoleHost {
    pub fn new(page: Arc<PageContext>, open_links: bool) -> Self {
        Self {
            page,
            open_links,
            echo: true,
            zen: AtomicBool::new(false),
            log: Mutex::new(Vec::new()),
        }
    }

    /// A host that records without printing.
    #[cfg(test)]
    pub fn silent(page: Arc<PageContext>) -> Self {
        Self {
            echo: false,
            ..Self::new(page, false)
        }
    }

    /// Messages reported so far.
    pub fn messages(&self) -> Vec<String> {
        self.log.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn report(&self, message: String) {
        if self.echo {
            println!("  \x1b[1;36m→\x1b[0m {}", message);
        }
        self.log
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(message);
    }
}

#[async_trait]
impl Host for ConsoleHost {
    fn set_theme(&self, theme: ThemeMode) {
        self.report(format!("theme set to {}", theme));
    }

    async fn set_locale(&self, locale: &str) -> Result<(), HostError> {
        self.report(format!("language set to {}", locale));
        Ok(())
    }

    fn navigate(&self, path: &str) {
        let route = path.split('?').next().unwrap_or(path);
        self.page.set_path(route);
        self.report(format!("navigate to {}", path));
    }

    fn open_url(&self, url: &str) -> Result<(), HostError> {
        self.report(format!("open {}", url));
        if self.open_links {
            info!(url = %url, "Opening link in browser");
            open::that(url).map_err(|e| HostError::OpenFailed {
                target: url.to_string(),
                message: e.to_string(),
            })?;
        }
        Ok(())
    }

    fn select_workflow_node(&self, node_id: &str) {
        self.report(format!("focus node {}", node_id));
    }

    fn toggle_zen_mode(&self) {
        let on = !self.zen.fetch_xor(true, Ordering::SeqCst);
        self.report(format!("zen mode {}", if on { "on" } else { "off" }));
    }

    async fn generate_workflow(&self, prompt: &str) -> Result<(), HostError> {
        self.report(format!("generate workflow: {}", prompt));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_navigate_moves_page() {
        let page = Arc::new(PageContext::new("/apps"));
        let host = ConsoleHost::silent(page.clone());
        host.navigate("/app/a1/workflow");
        assert!(page.is_workflow_page());

        host.navigate("/plugins?plugin_id=org/name");
        assert_eq!(page.path(), "/plugins");
    }

    #[test]
    fn test_zen_toggles() {
        let host = ConsoleHost::silent(Arc::new(PageContext::default()));
        host.toggle_zen_mode();
        host.toggle_zen_mode();
        assert_eq!(host.messages(), vec!["zen mode on", "zen mode off"]);
    }

    #[test]
    fn test_links_not_opened_by_default() {
        let host = ConsoleHost::silent(Arc::new(PageContext::default()));
        host.open_url("https://docs.dify.ai/en").unwrap();
        assert_eq!(host.messages(), vec!["open https://docs.dify.ai/en"]);
    }
}
