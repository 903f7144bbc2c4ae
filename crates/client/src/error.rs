//! Client error types.

use leavecal_core::ports::{CommitError, FieldErrors, TransportError};
use thiserror::Error;

/// Result type alias for client module.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    ServerError { status: u16, message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Validation failed: {}", join_messages(.0))]
    Validation(FieldErrors),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn join_messages(errors: &FieldErrors) -> String {
    errors.messages().collect::<Vec<_>>().join("; ")
}

impl From<ClientError> for TransportError {
    fn from(err: ClientError) -> Self {
        TransportError::new(err.to_string())
    }
}

impl From<ClientError> for CommitError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Validation(errors) => CommitError::Validation(errors),
            ClientError::NotFound { .. } => CommitError::Validation(
                FieldErrors::new().with("id", "Leave request not found."),
            ),
            other => CommitError::Transport(other.into()),
        }
    }
}
