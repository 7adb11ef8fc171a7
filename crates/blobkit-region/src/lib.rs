//! blobkit-region - Region processing for blobkit
//!
//! This crate turns a foreground mask into measured blobs:
//!
//! - **Labeling** - partition non-white pixels into regions, one color each
//! - **Merge forest** - the label-equivalence structure behind labeling
//! - **Boundary tracing** - ordered perimeter loops of a region's boundary
//! - **Measurement** - moments, inertias, circularity and perimeter length
//! - **Selection** - pick regions by position, size or mass distribution
//!
//! # Examples
//!
//! ```
//! use blobkit_core::{Color, Pix};
//! use blobkit_region::{BlobMetrics, LabelOptions, label_regions};
//!
//! let mut pm = Pix::new_filled(10, 10, Color::WHITE).unwrap().to_mut();
//! for y in 4..7 {
//!     for x in 4..7 {
//!         pm.set_rgb(x, y, Color::BLACK).unwrap();
//!     }
//! }
//! let colors = label_regions(&mut pm, &LabelOptions::default()).unwrap();
//! assert_eq!(colors.len(), 1);
//!
//! let pix: Pix = pm.into();
//! let metrics = BlobMetrics::compute(&pix, colors[0]).unwrap();
//! assert_eq!(metrics.area, 9);
//! assert_eq!(metrics.centroid, (5.0, 5.0));
//! ```

pub mod ccbord;
pub mod conncomp;
mod error;
pub mod label;
pub mod measure;
pub mod select;

pub use ccbord::{PerimeterPath, trace_boundary};
pub use conncomp::MergeForest;
pub use error::{RegionError, RegionResult};
pub use label::{
    LabelColoring, LabelOptions, count_regions, label_capacity, label_copy, label_regions,
    sequential_color,
};
pub use measure::BlobMetrics;
pub use select::{
    dominant_center_row_color, largest_region, orient_by_mass, region_areas, select_by_min_area,
};
