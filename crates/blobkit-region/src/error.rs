//! Error types for blobkit-region

use thiserror::Error;

/// Errors that can occur during region processing operations
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] blobkit_core::Error),

    /// Morphology error
    #[error("morphology error: {0}")]
    Morph(#[from] blobkit_morph::MorphError),

    /// No pixel of the requested region exists
    #[error("empty region: no pixels of the requested color")]
    EmptyRegion,

    /// Boundary walk ran past its step limit
    #[error("unclosed boundary: walk stopped at its limit of {steps} pixels")]
    UnclosedBoundary { steps: usize },

    /// More regions than distinct label colors
    #[error("label space exhausted: {regions} regions, at most {capacity} colors")]
    LabelSpaceExhausted { regions: usize, capacity: usize },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
