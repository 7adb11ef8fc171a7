//! Collaborator interfaces
//!
//! blobkit performs no file I/O and ships no codecs or feature detectors.
//! Pipelines that need them take implementations of these traits.

use std::path::Path;

use blobkit_core::{Pix, Result};

/// Reads an image file into a pixel buffer.
pub trait ImageDecoder {
    /// Decode the file at `path`.
    ///
    /// Implementations report failures as [`blobkit_core::Error::Io`] or
    /// [`blobkit_core::Error::DecodeError`].
    fn decode(&self, path: &Path) -> Result<Pix>;
}

/// Writes a pixel buffer to an image file.
pub trait ImageEncoder {
    /// Encode `pix` into the file at `path`.
    fn encode(&self, pix: &Pix, path: &Path) -> Result<()>;
}

/// A feature point with its descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct Keypoint {
    /// Column, in pixels
    pub x: f32,
    /// Row, in pixels
    pub y: f32,
    /// Detector-specific descriptor
    pub descriptor: Vec<f32>,
}

impl Keypoint {
    /// Create a keypoint.
    pub fn new(x: f32, y: f32, descriptor: Vec<f32>) -> Self {
        Self { x, y, descriptor }
    }
}

/// Finds keypoints in a gray image.
pub trait KeypointDetector {
    /// Detect keypoints in `gray`, whose three channels are equal.
    fn detect(&self, gray: &Pix) -> Vec<Keypoint>;
}

/// Counts correspondences between two keypoint sets.
pub trait KeypointMatcher {
    /// Number of `observed` keypoints matching one in `model`.
    fn match_count(&self, model: &[Keypoint], observed: &[Keypoint]) -> usize;
}
