//! Error types for content host access and document retrieval.

use thiserror::Error;

/// A failed read against the content host.
#[derive(Debug, Error)]
pub enum HostError {
    /// The host answered with a non-success HTTP status.
    #[error("content host error for '{path}': {status} {status_text}")]
    Status {
        path: String,
        status: u16,
        status_text: String,
    },

    #[error("content host request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unreadable content host response: {0}")]
    Body(#[from] serde_json::Error),
}

impl HostError {
    pub fn status(path: &str, status: u16, status_text: impl Into<String>) -> Self {
        HostError::Status {
            path: path.to_string(),
            status,
            status_text: status_text.into(),
        }
    }

    /// HTTP status code, when the host produced one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            HostError::Status { status, .. } => Some(*status),
            HostError::Transport(e) => e.status().map(|s| s.as_u16()),
            HostError::Body(_) => None,
        }
    }
}

/// File content that is not valid base64.
#[derive(Debug, Error)]
#[error("invalid base64 content: {0}")]
pub struct DecodeError(#[from] pub base64::DecodeError);

/// A failed single-document fetch.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error(transparent)]
    Host(#[from] HostError),

    #[error("{0} is not a file")]
    NotAFile(String),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl DocumentError {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            DocumentError::Host(e) => e.status_code(),
            _ => None,
        }
    }
}
