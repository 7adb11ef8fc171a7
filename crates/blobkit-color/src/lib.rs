//! blobkit-color - Color histograms for blob classification
//!
//! - **Histograms** ([`histogram`]): 64-bin quantized color histograms over
//!   a whole image, a rectangle or the inside of a blob mask, with a
//!   chi-square style distance
//! - **Scans** ([`scan`]): tile masks, best-region distance and sliding
//!   window search against a template histogram
//!
//! Templates are plain [`ColorBins`] values owned by the caller.

mod error;
pub mod histogram;
pub mod scan;

pub use error::{ColorError, ColorResult};
pub use histogram::{
    BIN_COUNT, ColorBins, bin_index, color_bins, color_bins_in_rect, color_bins_within_blob,
    distance,
};
pub use scan::{
    TileScanOptions, WindowSearchOptions, merge_significant, min_region_distance,
    sliding_window_search, tile_distance_mask,
};
