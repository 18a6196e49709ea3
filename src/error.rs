//! Error types for the news search pipeline.
//!
//! The pipeline itself never surfaces [`SearchError::Transport`] or
//! [`SearchError::Extraction`] to the user; they are logged and mapped to an
//! empty result set. The remaining variants are raised by the guards that run
//! before a search is attempted.

/// Errors that can occur while preparing or running a news search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The outbound request could not be completed or returned a failure status.
    #[error("transport error: {0}")]
    Transport(String),

    /// The fetched document could not be read or parsed.
    #[error("extraction error: {0}")]
    Extraction(String),

    /// The caller supplied a blank query or a non-positive hour count.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid pipeline configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SearchError>;
