//! Error types for the speech statistics service.
//!
//! - [`RowError`] - a single CSV row could not be turned into a record
//! - [`FetchError`] - a whole source could not be read
//! - [`ConfigError`] - invalid server configuration
//! - [`ServerError`] - start-up failures of the HTTP server
//!
//! None of these ever reach an HTTP client: row and source failures are
//! downgraded to diagnostics by the evaluation pipeline.

use thiserror::Error;

// =============================================================================
// Row Errors
// =============================================================================

/// Reasons a CSV row is skipped.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RowError {
    /// Fewer than the four expected columns.
    #[error("Row has {found} columns, expected at least 4")]
    MissingColumns { found: usize },

    /// Third column is not a `YYYY-MM-DD` date.
    #[error("Date '{0}' could not be parsed")]
    InvalidDate(String),

    /// Fourth column is not an integer.
    #[error("Words '{0}' could not be parsed")]
    InvalidWords(String),

    /// The CSV reader could not split the row into fields.
    #[error("Row could not be read: {0}")]
    Unreadable(String),
}

// =============================================================================
// Source Errors
// =============================================================================

/// Errors while loading one CSV source.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The source string is not an absolute URL.
    #[error("URL '{url}' is malformed: {source}")]
    MalformedUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The URL scheme cannot be fetched.
    #[error("URL scheme '{0}' is not supported")]
    UnsupportedScheme(String),

    /// `file://` URL that does not map to a local path.
    #[error("URL '{0}' does not point to a local file")]
    InvalidFilePath(String),

    /// Transport level failure.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("Server answered with status {0}")]
    Status(reqwest::StatusCode),

    /// Local file could not be read.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors while building the server configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable holds an unusable value.
    #[error("Invalid value '{value}' for {key}")]
    InvalidValue { key: &'static str, value: String },

    /// The HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Binding or serving failed.
    #[error("Server IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Host and port do not form a socket address.
    #[error("Invalid listen address '{0}'")]
    InvalidAddress(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for row parsing.
pub type RowResult<T> = Result<T, RowError>;

/// Result type for source loading.
pub type FetchResult<T> = Result<T, FetchError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
