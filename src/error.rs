//! Error handling for httpclient

use thiserror::Error;

/// Main error type for httpclient operations
#[derive(Error, Debug)]
pub enum HttpClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network timeout")]
    Timeout,

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("File not found: {0}")]
    FileNotFound(String),
}

impl HttpClientError {
    /// Classify a transport error, folding timeouts into [`HttpClientError::Timeout`].
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            HttpClientError::Timeout
        } else {
            HttpClientError::Http(err)
        }
    }
}

/// Result type alias for httpclient operations
pub type Result<T> = std::result::Result<T, HttpClientError>;
