//! Error types for the guild access service.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

use std::time::Duration;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Errors from the Discord API client.
#[derive(thiserror::Error, Debug)]
pub enum ProviderError {
    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Credential rejected (401/403 response)
    #[error("Credential rejected ({status})")]
    Unauthorized {
        /// HTTP status code
        status: u16,
    },

    /// Rate limited by Discord (429 response)
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Suggested wait time
        retry_after: Duration,
    },

    /// Request timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Server error (5xx response)
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Unexpected HTTP status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },
}

impl ProviderError {
    /// Create an unauthorized error.
    #[must_use]
    pub const fn unauthorized(status: u16) -> Self {
        Self::Unauthorized { status }
    }

    /// Create a rate limited error. Discord reports `Retry-After` in (fractional) seconds.
    ///
    /// Negative or NaN values become zero; values too large for a [`Duration`] saturate.
    #[must_use]
    pub fn rate_limited(seconds: f64) -> Self {
        let retry_after = if seconds.is_nan() || seconds <= 0.0 {
            Duration::ZERO
        } else {
            Duration::try_from_secs_f64(seconds).unwrap_or(Duration::MAX)
        };
        Self::RateLimited { retry_after }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }

    /// Returns true if Discord rejected the credential itself, as opposed to
    /// failing for availability reasons.
    #[must_use]
    pub const fn is_credential_rejection(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

/// Errors from the membership store.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// Backing storage could not be reached or read.
    #[error("Membership store unavailable: {0}")]
    Unavailable(String),

    /// Seed file could not be read.
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    /// Seed file is not valid JSON for the expected shape.
    #[error("Invalid seed data: {0}")]
    Seed(#[from] serde_json::Error),

    /// A referenced guild or role does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl StoreError {
    /// Create an unavailable error.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }
}

/// Failures that are not an authorization decision.
///
/// A forbidden caller is a successful resolution (see
/// [`AuthorizeResult`](crate::resolver::AuthorizeResult)); these are the cases
/// where the service itself could not produce an answer.
#[derive(thiserror::Error, Debug)]
pub enum ResolveError {
    /// Discord returned a user id that is not a numeric snowflake.
    #[error("Malformed user id from identity provider: {id:?}")]
    MalformedUserId {
        /// The id as received
        id: String,
    },

    /// Membership store failure
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl ResolveError {
    /// Create a malformed user id error.
    #[must_use]
    pub fn malformed_user_id(id: impl Into<String>) -> Self {
        Self::MalformedUserId { id: id.into() }
    }
}

impl IntoResponse for ResolveError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Site user resolution failed");
        let status = match self {
            Self::MalformedUserId { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Store(StoreError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (
            status,
            Json(serde_json::json!({
                "error": "internal_error",
                "error_description": "The request could not be completed"
            })),
        )
            .into_response()
    }
}

/// Result type alias for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
