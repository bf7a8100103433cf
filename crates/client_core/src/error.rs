use reqwest::StatusCode;
use shared::error::FieldErrors;
use thiserror::Error;

/// Failure of a single remote request. No retries are attempted; every
/// variant surfaces to the caller immediately.
#[derive(Debug, Clone, Error)]
pub enum RemoteError {
    /// The request never produced a usable response.
    #[error("transport failure: {0}")]
    Transport(String),
    /// The server rejected the request with field-keyed messages.
    #[error("server rejected request")]
    Rejected(FieldErrors),
    /// Non-success status without a decodable field-error body.
    #[error("unexpected status {0}")]
    Status(StatusCode),
}

impl RemoteError {
    /// Display message reduced from the structured field errors, when the
    /// server reported any.
    pub fn field_message(&self) -> Option<&str> {
        match self {
            RemoteError::Rejected(fields) => fields.first_message(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        RemoteError::Transport(err.to_string())
    }
}
