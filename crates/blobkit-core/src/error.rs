//! Error types for blobkit-core
//!
//! Provides a unified error type for buffer construction and geometry
//! checks. Neighbor lookups that fall outside the buffer are not errors;
//! they return `None` from the access functions instead.

use thiserror::Error;

/// blobkit-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Row pitch too small for the width, or not a whole number of pixels
    #[error("invalid stride {stride} for width {width}: must be >= 4 * width and a multiple of 4")]
    InvalidStride { stride: usize, width: usize },

    /// Byte buffer length does not match `height * stride`
    #[error("buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Rectangle not fully inside the image
    #[error("rectangle ({x}, {y}, {w}, {h}) exceeds image bounds {width}x{height}")]
    RectOutOfBounds {
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        width: u32,
        height: u32,
    },

    /// Incompatible image sizes
    #[error("incompatible image sizes: {0}x{1} vs {2}x{3}")]
    IncompatibleSizes(u32, u32, u32, u32),

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decode error
    #[error("decode error: {0}")]
    DecodeError(String),

    /// Image encode error
    #[error("encode error: {0}")]
    EncodeError(String),
}

/// Result type alias for blobkit-core operations
pub type Result<T> = std::result::Result<T, Error>;
