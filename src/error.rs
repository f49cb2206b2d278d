// src/error.rs

//! Unified error handling for the scraper.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Result type alias for scraper operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// The renderer could not produce or update a page
    #[error("Render error for {url}: {message}")]
    Render { url: String, message: String },

    /// A bounded wait expired before the element appeared
    #[error("Timed out after {}s waiting for '{selector}' on {url}", .waited.as_secs())]
    Timeout {
        url: String,
        selector: String,
        waited: Duration,
    },
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a render error with the page it happened on.
    pub fn render(url: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Render {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Create a timeout error.
    pub fn timeout(url: impl Into<String>, selector: impl Into<String>, waited: Duration) -> Self {
        Self::Timeout {
            url: url.into(),
            selector: selector.into(),
            waited,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// Why a single mission was left out of the output.
///
/// Produced by the detail extractor; never aborts a run.
#[derive(Error, Debug)]
pub enum SkipReason {
    /// The detail page could not be rendered or parsed
    #[error("render failed: {0}")]
    Render(AppError),

    /// No table showed up within the wait budget
    #[error("no table appeared: {0}")]
    TableTimeout(AppError),

    /// Tables were present but no two-cell row carried a usable label and value
    #[error("no attributes found")]
    NoAttributes,
}

impl From<AppError> for SkipReason {
    fn from(error: AppError) -> Self {
        if error.is_timeout() {
            Self::TableTimeout(error)
        } else {
            Self::Render(error)
        }
    }
}
