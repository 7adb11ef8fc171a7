//! blobkit - Blob analysis on packed BGRA buffers
//!
//! blobkit finds foreground objects on a white background, labels them as
//! colored regions, measures their shape and compares their colors against
//! template histograms.
//!
//! - Buffers, colors and rectangles (re-exported from `blobkit-core`)
//! - Morphology ([`morph`]), labeling and measurement ([`region`])
//! - Blur and gradients ([`filter`]), histograms and scans ([`color`])
//! - An end-to-end [`BlobAnalyzer`] and the collaborator traits in [`io`]
//!
//! # Example
//!
//! ```
//! use blobkit::{BlobAnalyzer, Color, Pix};
//!
//! let mut pm = Pix::new_filled(12, 12, Color::WHITE).unwrap().to_mut();
//! for y in 3..7 {
//!     for x in 3..7 {
//!         pm.set_rgb(x, y, Color::BLACK).unwrap();
//!     }
//! }
//! let results = BlobAnalyzer::default().analyze(&pm.into()).unwrap();
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].1.as_ref().unwrap().area, 16);
//! ```

mod error;
pub mod io;
pub mod pipeline;

// Re-export core types (primary data structures used everywhere)
pub use blobkit_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use blobkit_color as color;
pub use blobkit_filter as filter;
pub use blobkit_morph as morph;
pub use blobkit_region as region;

pub use error::{AnalysisError, AnalysisResult};
pub use io::{ImageDecoder, ImageEncoder, Keypoint, KeypointDetector, KeypointMatcher};
pub use pipeline::{
    AnalyzerOptions, BlobAnalyzer, CentralBlob, Segmentation, keypoint_match_count,
};
