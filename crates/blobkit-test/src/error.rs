//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur while building test fixtures
#[derive(Debug, Error)]
pub enum TestError {
    /// Building a buffer failed
    #[error("image construction failed: {0}")]
    Core(#[from] blobkit_core::Error),

    /// An ASCII pattern could not be turned into an image
    #[error("bad pattern at row {row}: {message}")]
    BadPattern { row: usize, message: String },
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
