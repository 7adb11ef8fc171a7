//! Error types for blobkit-color

use thiserror::Error;

/// Errors that can occur during color analysis
#[derive(Debug, Error)]
pub enum ColorError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] blobkit_core::Error),

    /// Region labeling error
    #[error("region error: {0}")]
    Region(#[from] blobkit_region::RegionError),

    /// Normalization of a histogram with no counts
    #[error("cannot normalize an empty histogram")]
    EmptyHistogram,

    /// Histogram data rejected on construction
    #[error("invalid histogram: {0}")]
    InvalidHistogram(String),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for color operations
pub type ColorResult<T> = Result<T, ColorError>;
