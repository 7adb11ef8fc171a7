//! Error types for end-to-end analysis

use thiserror::Error;

/// Errors raised by [`crate::BlobAnalyzer`]
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Core library error, including decode and encode failures
    #[error("core error: {0}")]
    Core(#[from] blobkit_core::Error),

    /// Preprocessing failed
    #[error("filter error: {0}")]
    Filter(#[from] blobkit_filter::FilterError),

    /// Labeling failed
    #[error("region error: {0}")]
    Region(#[from] blobkit_region::RegionError),
}

/// Result type for end-to-end analysis
pub type AnalysisResult<T> = Result<T, AnalysisError>;
