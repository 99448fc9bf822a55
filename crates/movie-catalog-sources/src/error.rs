use thiserror::Error;

/// Failure talking to a remote movie database
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// The provider answered but reported a failure (e.g. "Movie not found!")
    #[error("{0}")]
    Provider(String),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("could not decode response: {0}")]
    Decode(String),

    #[error("no API key configured")]
    MissingApiKey,
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}
