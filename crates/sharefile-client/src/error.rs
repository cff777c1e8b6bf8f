//! Client error types

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, ClientError>;

/// Client errors
#[derive(Error, Debug)]
pub enum ClientError {
    /// Authentication request failed or returned unusable data
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// An authorized call was attempted without a valid session
    #[error("Not authenticated: call authenticate() before using the API")]
    NotAuthenticated,

    /// Network-level failure
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server answered with a status the operation does not accept
    #[error("HTTP error ({status}): {body}")]
    Http { status: u16, body: String },

    /// Response body did not decode into the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The upload negotiation did not grant a chunk URI
    #[error("Upload negotiation failed: {0}")]
    UploadNegotiation(String),

    /// Local file could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Chunk upload failed in transport or was rejected
    #[error("Upload failed{}: {message}", status_suffix(.status))]
    Upload { status: Option<u16>, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Upload { status, .. } => *status,
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this error means no session was available
    pub fn is_not_authenticated(&self) -> bool {
        matches!(self, Self::NotAuthenticated)
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub(crate) fn malformed(context: &str, err: serde_json::Error) -> Self {
        Self::MalformedResponse(format!("{context}: {err}"))
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" ({s})")).unwrap_or_default()
}
