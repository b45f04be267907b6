//! Error types for SCUTTLE API operations.

use thiserror::Error;

/// Errors that can occur during SCUTTLE API operations.
#[derive(Debug, Error)]
pub enum ScuttleError {
    /// Configuration is missing or incomplete.
    #[error("SCUTTLE configuration required: {0}")]
    ConfigMissing(String),

    /// No implementation exists for the requested API version.
    #[error("API version {0} does not exist")]
    UnsupportedVersion(u32),

    /// The resource name is not part of the endpoint catalog.
    #[error("Unknown resource '{0}'")]
    UnknownResource(String),

    /// A positional resource argument is missing or has the wrong type.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Limit, offset or direction of a page request is out of range.
    #[error("Invalid pagination parameter: {0}")]
    InvalidPaginationParameter(String),

    /// The non-verbose form of a verbose-only accessor was called.
    #[error("'{method}' has no non-paginated version; use the verbose form")]
    NoNonPaginatedVersion { method: &'static str },

    /// A walk was requested over something that is not a paginated accessor.
    #[error("'{0}' is not a paginated accessor")]
    InvalidIteratedAccessor(String),

    /// The response did not have the shape the call requires.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// API request failed.
    #[error("SCUTTLE API error: {message}")]
    ApiError {
        message: String,
        status_code: Option<u16>,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// Rate limited.
    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },
}

impl ScuttleError {
    /// Returns true if the error came from the transport rather than from a
    /// local precondition.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::ApiError { .. } | Self::HttpError(_) | Self::RateLimited { .. }
        )
    }
}

/// Result type alias for SCUTTLE operations.
pub type Result<T> = core::result::Result<T, ScuttleError>;
