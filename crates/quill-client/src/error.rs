//! Client error types.

use quill_shared::FieldError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a failure envelope.
    #[error("{message}")]
    Api {
        status: u16,
        message: String,
        errors: Vec<FieldError>,
    },

    /// 401 from the server. The session has already been cleared.
    #[error("{0}")]
    Unauthorized(String),

    /// Rejected locally before any request was sent.
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("Session storage error: {0}")]
    Session(String),

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Per-field detail, if the failure carried any.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            ClientError::Api { errors, .. } | ClientError::Validation(errors) => errors,
            _ => &[],
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized(_))
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Session(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}
