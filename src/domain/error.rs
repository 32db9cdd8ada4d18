use thiserror::Error;

/// Failures reported by external collaborators.
///
/// Executors convert these into error messages; they never leave a store.
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Upstream returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Missing API key (set api.api_key or WEATHER_API_KEY)")]
    MissingApiKey,
}

impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RepositoryError::Parse(err.to_string())
        } else {
            RepositoryError::Network(err.to_string())
        }
    }
}

impl From<std::io::Error> for RepositoryError {
    fn from(err: std::io::Error) -> Self {
        RepositoryError::Storage(err.to_string())
    }
}
