//! Error types for the arlo-downloader application.

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use thiserror::Error;

use crate::library::DateWindow;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    // API errors
    #[error("API error: {0}")]
    Api(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Failed to fetch library for {window}: {source}")]
    Fetch {
        window: DateWindow,
        #[source]
        source: Box<Error>,
    },

    // File system errors
    #[error("Invalid filename (path traversal attempt): {0}")]
    InvalidFilename(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    // URL parsing errors
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap an upstream failure with the window whose query produced it.
    pub fn fetch(window: DateWindow, source: Error) -> Self {
        Error::Fetch {
            window,
            source: Box::new(source),
        }
    }

    /// Process exit code the CLI reports for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_)
            | Error::ConfigValidation { .. }
            | Error::MissingConfig(_)
            | Error::TomlParse(_) => exit_codes::CONFIG_ERROR,
            Error::Authentication(_) | Error::Api(_) | Error::Fetch { .. } => {
                exit_codes::API_ERROR
            }
            _ => exit_codes::UNEXPECTED_ERROR,
        }
    }
}

/// Failure of a single recording download.
///
/// These never unwind past the worker that hit them; they end up in the
/// item's [`Outcome`](crate::download::Outcome).
#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server responded with HTTP {0}")]
    Status(StatusCode),

    #[error("file system error: {0}")]
    Io(#[from] std::io::Error),

    #[error("signed URL expired at {0}")]
    UrlExpired(DateTime<Utc>),

    #[error("invalid filename: {0}")]
    InvalidFilename(String),
}

/// Exit codes reported by the CLI.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const API_ERROR: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
    pub const UNEXPECTED_ERROR: i32 = 5;
}
