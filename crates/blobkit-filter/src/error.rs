//! Error types for blobkit-filter

use thiserror::Error;

/// Errors that can occur during filtering operations
#[derive(Debug, Error)]
pub enum FilterError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] blobkit_core::Error),

    /// Invalid kernel
    #[error("invalid kernel: {0}")]
    InvalidKernel(String),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Malformed gradient pipeline string
    #[error("invalid sequence: {0}")]
    InvalidSequence(String),
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
