use thiserror::Error;

/// Failure of a single Send action. The `Display` text is what the
/// response panel shows.
#[derive(Debug, Error)]
pub enum SendError {
    #[error("Invalid JSON body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    #[error("Request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Failed to read response body: {0}")]
    ReadBody(#[source] reqwest::Error),
}

/// Why a Send was not started
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendBlocked {
    #[error("Missing parameters: {}", .0.join(", "))]
    MissingParams(Vec<String>),

    #[error("Base URL is empty")]
    EmptyBaseUrl,

    #[error("A request is already in flight")]
    InFlight,
}
