// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PruneError>;

#[derive(Error, Debug)]
pub enum PruneError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{path} is not a file, but a {kind}")]
    NotAFile { path: String, kind: String },

    #[error("GitHub request failed with status {status}: {message}")]
    Transport { status: u16, message: String },

    #[error("Write rejected for {path}: revision is stale")]
    Conflict { path: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Base64 decode error: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl PruneError {
    pub fn missing_owner() -> Self {
        PruneError::InvalidInput("repository must have an 'owner' associated".to_string())
    }
}
