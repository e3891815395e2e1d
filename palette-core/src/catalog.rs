//! Catalog backends: where apps, knowledge bases, and plugins come from.
//!
//! [`HttpCatalog`] talks to the console API and the plugin marketplace.
//! [`StaticCatalog`] serves an in-memory list, optionally loaded from a JSON
//! fixture, and backs tests and offline use.

use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::types::{AppInfo, DatasetInfo, PluginInfo};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

/// Source of the records searched by the app, knowledge, and plugin scopes.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn search_apps(&self, term: &str, limit: usize) -> Result<Vec<AppInfo>, CatalogError>;

    async fn search_datasets(
        &self,
        term: &str,
        limit: usize,
    ) -> Result<Vec<DatasetInfo>, CatalogError>;

    async fn search_plugins(
        &self,
        term: &str,
        locale: &str,
        limit: usize,
    ) -> Result<Vec<PluginInfo>, CatalogError>;
}

/// Build the catalog described by `config`: the fixture when one is set,
/// otherwise the HTTP backends.
pub fn catalog_from_config(config: &CatalogConfig) -> Result<Arc<dyn Catalog>, CatalogError> {
    match &config.fixture {
        Some(path) => Ok(Arc::new(StaticCatalog::from_file(path)?)),
        None => Ok(Arc::new(HttpCatalog::new(config)?)),
    }
}

/// Catalog backed by the console REST API and the plugin marketplace.
pub struct HttpCatalog {
    client: Client,
    api_base_url: Option<Url>,
    marketplace_url: Url,
    api_token: Option<String>,
}

impl HttpCatalog {
    /// Create a catalog from configuration. The console token is read from the
    /// environment variable named by `api_token_env`.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let api_token = std::env::var(&config.api_token_env).ok();
        if config.api_base_url.is_some() && api_token.is_none() {
            debug!(env = %config.api_token_env, "No console API token set; requests are unauthenticated");
        }
        Self::with_token(config, api_token)
    }

    pub fn with_token(
        config: &CatalogConfig,
        api_token: Option<String>,
    ) -> Result<Self, CatalogError> {
        let api_base_url = config
            .api_base_url
            .as_deref()
            .map(parse_base_url)
            .transpose()?;
        let marketplace_url = parse_base_url(&config.marketplace_url)?;
        Ok(Self {
            client: Client::new(),
            api_base_url,
            marketplace_url,
            api_token,
        })
    }

    fn console_url(&self) -> Result<&Url, CatalogError> {
        self.api_base_url
            .as_ref()
            .ok_or_else(|| CatalogError::NotConfigured {
                message: "catalog.api_base_url is not set".to_string(),
            })
    }

    async fn get_console(&self, url: Url) -> Result<Value, CatalogError> {
        debug!(url = %url, "Sending console catalog request");
        let mut request = self.client.get(url.clone());
        if let Some(token) = &self.api_token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }
        let response = request.send().await.map_err(|e| CatalogError::Request {
            message: format!("Request failed: {}", e),
        })?;
        Self::read_json(response, &url).await
    }

    async fn read_json(response: reqwest::Response, url: &Url) -> Result<Value, CatalogError> {
        let status = response.status();
        let body = response.text().await.map_err(|e| CatalogError::Request {
            message: format!("Failed to read response body: {}", e),
        })?;
        if !status.is_success() {
            return Err(map_http_error(status, &body, url));
        }
        serde_json::from_str(&body).map_err(|e| CatalogError::ResponseParse {
            message: format!("Invalid JSON: {}", e),
        })
    }
}

#[async_trait]
impl Catalog for HttpCatalog {
    async fn search_apps(&self, term: &str, limit: usize) -> Result<Vec<AppInfo>, CatalogError> {
        let url = apps_url(self.console_url()?, term, limit)?;
        let body = self.get_console(url).await?;
        parse_envelope(body, "/data")
    }

    async fn search_datasets(
        &self,
        term: &str,
        limit: usize,
    ) -> Result<Vec<DatasetInfo>, CatalogError> {
        let url = datasets_url(self.console_url()?, term, limit)?;
        let body = self.get_console(url).await?;
        parse_envelope(body, "/data")
    }

    async fn search_plugins(
        &self,
        term: &str,
        _locale: &str,
        limit: usize,
    ) -> Result<Vec<PluginInfo>, CatalogError> {
        let url = join(&self.marketplace_url, "plugins/search/advanced")?;
        debug!(url = %url, term = %term, "Sending marketplace search request");
        let response = self
            .client
            .post(url.clone())
            .header("Content-Type", "application/json")
            .json(&plugin_search_body(term, limit))
            .send()
            .await
            .map_err(|e| CatalogError::Request {
                message: format!("Request failed: {}", e),
            })?;
        let body = Self::read_json(response, &url).await?;
        parse_envelope(body, "/data/plugins")
    }
}

fn parse_base_url(raw: &str) -> Result<Url, CatalogError> {
    // A trailing slash keeps the last path segment when joining.
    let normalized = format!("{}/", raw.trim_end_matches('/'));
    Url::parse(&normalized).map_err(|e| CatalogError::NotConfigured {
        message: format!("invalid catalog URL '{}': {}", raw, e),
    })
}

fn join(base: &Url, path: &str) -> Result<Url, CatalogError> {
    base.join(path).map_err(|e| CatalogError::NotConfigured {
        message: format!("invalid catalog path '{}': {}", path, e),
    })
}

/// `GET {api}/apps?page=1&limit=N&name=term`
pub(crate) fn apps_url(base: &Url, term: &str, limit: usize) -> Result<Url, CatalogError> {
    let mut url = join(base, "apps")?;
    url.query_pairs_mut()
        .append_pair("page", "1")
        .append_pair("limit", &limit.to_string())
        .append_pair("name", term);
    Ok(url)
}

/// `GET {api}/datasets?page=1&limit=N&keyword=term`
pub(crate) fn datasets_url(base: &Url, term: &str, limit: usize) -> Result<Url, CatalogError> {
    let mut url = join(base, "datasets")?;
    url.query_pairs_mut()
        .append_pair("page", "1")
        .append_pair("limit", &limit.to_string())
        .append_pair("keyword", term);
    Ok(url)
}

pub(crate) fn plugin_search_body(term: &str, limit: usize) -> Value {
    json!({
        "page": 1,
        "page_size": limit,
        "query": term,
        "type": "plugin",
    })
}

/// Extract the list at `pointer` from a response body.
pub(crate) fn parse_envelope<T>(body: Value, pointer: &str) -> Result<Vec<T>, CatalogError>
where
    T: for<'de> Deserialize<'de>,
{
    let list = match body.pointer(pointer) {
        Some(list) => list.clone(),
        None => {
            return Err(CatalogError::ResponseParse {
                message: format!("missing '{}' in response", pointer),
            });
        }
    };
    serde_json::from_value(list).map_err(|e| CatalogError::ResponseParse {
        message: format!("unexpected '{}' shape: {}", pointer, e),
    })
}

fn map_http_error(status: reqwest::StatusCode, body: &str, url: &Url) -> CatalogError {
    match status.as_u16() {
        401 | 403 => {
            debug!(body = %body, status = status.as_u16(), "Catalog authentication failed");
            CatalogError::AuthFailed {
                base_url: url.origin().ascii_serialization(),
            }
        }
        code => CatalogError::Status {
            status: code,
            body: body.chars().take(200).collect(),
        },
    }
}

/// Fixture file layout for [`StaticCatalog`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFixture {
    #[serde(default)]
    pub apps: Vec<AppInfo>,
    #[serde(default)]
    pub datasets: Vec<DatasetInfo>,
    #[serde(default)]
    pub plugins: Vec<PluginInfo>,
}

/// In-memory catalog. Matches case-insensitive substrings of names and
/// plugin labels; an empty term matches everything.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    data: CatalogFixture,
}

impl StaticCatalog {
    pub fn new(apps: Vec<AppInfo>, datasets: Vec<DatasetInfo>, plugins: Vec<PluginInfo>) -> Self {
        Self {
            data: CatalogFixture {
                apps,
                datasets,
                plugins,
            },
        }
    }

    pub fn from_fixture(data: CatalogFixture) -> Self {
        Self { data }
    }

    /// Load a JSON fixture of the form `{"apps": [], "datasets": [], "plugins": []}`.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|e| CatalogError::Fixture {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let data: CatalogFixture =
            serde_json::from_str(&raw).map_err(|e| CatalogError::Fixture {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        info!(
            path = %path.display(),
            apps = data.apps.len(),
            datasets = data.datasets.len(),
            plugins = data.plugins.len(),
            "Loaded catalog fixture"
        );
        Ok(Self { data })
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(needle)
}

#[async_trait]
impl Catalog for StaticCatalog {
    async fn search_apps(&self, term: &str, limit: usize) -> Result<Vec<AppInfo>, CatalogError> {
        let term = term.trim().to_lowercase();
        Ok(self
            .data
            .apps
            .iter()
            .filter(|app| contains_ci(&app.name, &term))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn search_datasets(
        &self,
        term: &str,
        limit: usize,
    ) -> Result<Vec<DatasetInfo>, CatalogError> {
        let term = term.trim().to_lowercase();
        Ok(self
            .data
            .datasets
            .iter()
            .filter(|ds| contains_ci(&ds.name, &term))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn search_plugins(
        &self,
        term: &str,
        _locale: &str,
        limit: usize,
    ) -> Result<Vec<PluginInfo>, CatalogError> {
        let term = term.trim().to_lowercase();
        Ok(self
            .data
            .plugins
            .iter()
            .filter(|p| {
                contains_ci(&p.name, &term) || p.label.values().any(|l| contains_ci(l, &term))
            })
            .take(limit)
            .cloned()
            .collect())
    }
}
