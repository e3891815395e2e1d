//! Error types for the Palette core.
//!
//! Uses `thiserror` for public API error types with structured variants
//! covering command execution, search, catalog access, host callbacks, and
//! configuration.

use std::path::PathBuf;

/// Top-level error type for the Palette core library.
#[derive(Debug, thiserror::Error)]
pub enum PaletteError {
    #[error("Command error: {0}")]
    Command(#[from] CommandError),

    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Host error: {0}")]
    Host(#[from] HostError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors from command registration and execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Command not found: {name}")]
    NotFound { name: String },

    #[error("Command '/{name}' opens a submenu and cannot be executed directly")]
    NotDirect { name: String },

    #[error("Command '/{name}' is not available here")]
    Unavailable { name: String },

    #[error("Invalid arguments for command '{name}': {reason}")]
    InvalidArguments { name: String, reason: String },

    #[error("Command '{name}' failed: {message}")]
    ExecutionFailed { name: String, message: String },

    #[error("Host error: {0}")]
    Host(#[from] HostError),
}

/// Errors raised by a scope or slash command while producing results.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Search in '{scope}' failed: {message}")]
    Failed { scope: String, message: String },

    #[error("Search in '{scope}' timed out after {timeout_secs}s")]
    Timeout { scope: String, timeout_secs: u64 },

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Errors from the app/dataset/plugin catalog backends.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Catalog request failed: {message}")]
    Request { message: String },

    #[error("Catalog returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Catalog response parse error: {message}")]
    ResponseParse { message: String },

    #[error("Authentication failed for catalog at {base_url}")]
    AuthFailed { base_url: String },

    #[error("Catalog not configured: {message}")]
    NotConfigured { message: String },

    #[error("Failed to load catalog fixture {path}: {message}")]
    Fixture { path: PathBuf, message: String },
}

/// Errors reported by the embedding host.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("Unsupported locale: {locale}")]
    UnsupportedLocale { locale: String },

    #[error("Failed to open {target}: {message}")]
    OpenFailed { target: String, message: String },

    #[error("Host action '{action}' failed: {message}")]
    ActionFailed { action: String, message: String },
}

/// Errors from the configuration system.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Configuration parse error: {message}")]
    ParseError { message: String },
}

/// A type alias for results using the top-level `PaletteError`.
pub type Result<T> = std::result::Result<T, PaletteError>;
