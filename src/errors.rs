//! Error types for apiwrap

use thiserror::Error;

use crate::response::Response;

/// Main error type for apiwrap
#[derive(Error, Debug)]
pub enum ApiwrapError {
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Response status matched an entry in the exception table. Carries the
    /// full wrapped response; the body is not consumed or transformed.
    #[error("HTTP {status} mapped to '{kind}'")]
    HttpException {
        status: u16,
        kind: String,
        response: Box<Response>,
    },

    /// Network-level failure (connection reset, timeout, DNS). The wrapped
    /// response holds whatever partial response the transport could recover,
    /// which may be nothing at all.
    #[error("Connection failure or no response: {message}")]
    Transport {
        message: String,
        response: Box<Response>,
    },
}

impl ApiwrapError {
    /// Best-available response attached to this failure, if any.
    pub fn response(&self) -> Option<&Response> {
        match self {
            ApiwrapError::HttpException { response, .. } => Some(response),
            ApiwrapError::Transport { response, .. } if response.has_response() => Some(response),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiwrapError>;
