//! Remote Source Error Types
//!
//! Structured error handling for course-service operations.
//! Maps HTTP status codes to specific variants so the sync boundary can tell
//! a per-course authorization denial apart from everything else.

/// Errors raised by a [`RemoteSource`](super::RemoteSource) implementation.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("Not authorized to access this resource")]
    Unauthorized,

    #[error("Rate limited, try again after backoff")]
    RateLimited,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error ({0}): {1}")]
    Server(u16, String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RemoteError {
    /// Create a RemoteError from an HTTP status code and response body
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            401 | 403 => RemoteError::Unauthorized,
            404 => RemoteError::NotFound(body.to_string()),
            429 => RemoteError::RateLimited,
            500..=599 => RemoteError::Server(status, body.to_string()),
            _ => RemoteError::Network(format!("HTTP {}: {}", status, body)),
        }
    }

    /// Whether this is the per-course authorization denial the sync boundary
    /// recovers from
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, RemoteError::Unauthorized)
    }
}
