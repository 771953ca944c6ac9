use reqwest::StatusCode;
use thiserror::Error as ThisError;

/// Record store errors
#[derive(Debug, ThisError)]
pub enum StoreError {
    #[error("Not found")]
    NotFound,
    /// The store answered with a non-success status. The message is
    /// the response body if there was one.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
    #[error("Invalid record store url: {0}")]
    InvalidUrl(String),
    #[error("Record store unreachable: {0}")]
    Transport(#[from] reqwest::Error),
}

impl StoreError {
    pub fn rejected(status: StatusCode, body: &str) -> Self {
        if status == StatusCode::NOT_FOUND && body.trim().is_empty() {
            return StoreError::NotFound;
        }
        let message = match body.trim() {
            "" => status
                .canonical_reason()
                .unwrap_or("Unexpected response")
                .to_string(),
            body => body.to_string(),
        };
        StoreError::Rejected { status, message }
    }
}

/// Session file errors
#[derive(Debug, ThisError)]
pub enum SessionError {
    #[error("Could not access session file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed session file: {0}")]
    Malformed(#[from] serde_json::Error),
}
