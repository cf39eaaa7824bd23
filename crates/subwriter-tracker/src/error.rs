//! Error types for tracker access.

use thiserror::Error;

/// Errors talking to the production-tracking database.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TrackerError {
    /// Connection settings are missing or malformed.
    #[error("invalid tracker settings: {0}")]
    Settings(String),

    /// The server could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// The server rejected the script credentials.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The server answered with an error status.
    #[error("tracker API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error detail from the response body.
        message: String,
    },

    /// The response body did not have the expected shape.
    #[error("unexpected tracker response: {0}")]
    Decode(String),
}

impl TrackerError {
    /// True for failures that mean the tracker is unreachable or refuses
    /// this script; a run cannot continue after one of these.
    #[must_use]
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Auth(_) | Self::Settings(_))
    }

    /// Returns a short message suitable for a status line.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Settings(_) => "Tracker connection settings are incomplete.",
            Self::Network(_) => "Could not connect to the tracker. Check the site URL and network.",
            Self::Auth(_) => "The tracker rejected the script name or API key.",
            Self::Api { .. } | Self::Decode(_) => "The tracker returned an unexpected response.",
        }
    }
}

impl From<reqwest::Error> for TrackerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<url::ParseError> for TrackerError {
    fn from(err: url::ParseError) -> Self {
        Self::Settings(format!("invalid site URL: {err}"))
    }
}

/// Result type alias for tracker operations.
pub type Result<T> = std::result::Result<T, TrackerError>;
