//! Error types for star count lookups

use thiserror::Error;

/// Star lookup errors
///
/// [`StarCountCache::get_star_count`](crate::StarCountCache::get_star_count)
/// swallows these; they only surface from construction and `clear_cache`.
#[derive(Debug, Error)]
pub enum StarsError {
    /// Transport-level error (connection, TLS, timeout)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("GitHub API returned {status} for {url}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Requested URL
        url: String,
    },

    /// Response body was not JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Backing store failure
    #[error("Cache store error: {0}")]
    Store(#[from] anyhow::Error),
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, StarsError>;
