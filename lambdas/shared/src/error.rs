//! Error types for the schedule proxy Lambda functions.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Message returned to callers whenever the upstream cannot be reached.
pub const FETCH_FAILED_MESSAGE: &str = "Error fetching data";

/// Errors that can occur while proxying a schedule request.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Network-level failure talking to the upstream API
    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// AWS SDK error
    #[error("AWS error: {0}")]
    Aws(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Validation(_) => 400,
            _ => 500,
        }
    }

    /// Message safe to hand back to the caller.
    ///
    /// Validation messages are returned as-is; everything else is collapsed so
    /// that upstream URLs, secret ARNs and SDK internals stay server-side.
    pub fn public_message(&self) -> String {
        match self {
            Error::Validation(msg) => msg.clone(),
            Error::Transport(_) => FETCH_FAILED_MESSAGE.to_string(),
            _ => "Internal server error".to_string(),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        // reqwest embeds the request URL in its Display output, which carries the api key.
        Error::Transport(e.without_url())
    }
}
