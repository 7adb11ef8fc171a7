//! blobkit-morph - Morphology on black-on-white masks
//!
//! Any non-white pixel is foreground. Every operation reads the unmodified
//! source and writes a fresh black/white image of the same geometry, using
//! the 4-neighbourhood (self plus north, south, east and west). The
//! one-pixel image border is always written white.

pub mod binary;
mod error;

pub use binary::{close, dilate, erode, erode_repeated, extract_boundary, open};
pub use error::{MorphError, MorphResult};
