//! Error types for tagbump-gitlab.

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during GitLab API operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Authentication failed (bad or expired token).
    #[error("GitLab authentication failed - check the API token")]
    AuthenticationFailed,

    /// The configured base URL cannot address the API.
    #[error("invalid GitLab URL: {0}")]
    InvalidUrl(String),

    /// API error with status code.
    #[error("GitLab API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    /// Network error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A file's raw content is not valid UTF-8.
    #[error("content of {path} is not valid UTF-8")]
    InvalidEncoding { path: String },

    /// JSON parsing error.
    #[error("failed to parse GitLab response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Error {
    /// HTTP status code carried by this error, if the server answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::AuthenticationFailed => Some(401),
            Self::ApiError { status, .. } => Some(*status),
            Self::InvalidUrl(_)
            | Self::InvalidEncoding { .. }
            | Self::Network(_)
            | Self::Parse(_) => None,
        }
    }
}
