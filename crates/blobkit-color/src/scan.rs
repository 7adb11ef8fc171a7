//! Windowed histogram scans
//!
//! These scans compare parts of an image against a caller-supplied
//! template histogram:
//!
//! - [`tile_distance_mask`] paints every tile black or white depending on
//!   how close its histogram is to the template
//! - [`min_region_distance`] groups matching tiles into regions and reports
//!   the best region distance
//! - [`sliding_window_search`] returns the windows of many sizes whose
//!   histogram matches the template
//!
//! The tile and window loops run on the rayon thread pool.

use parking_lot::Mutex;
use rayon::prelude::*;

use crate::histogram::{ColorBins, color_bins_in_rect, color_bins_within_blob, distance};
use crate::{ColorError, ColorResult};
use blobkit_core::color::BYTES_PER_PIXEL;
use blobkit_core::{Box, Color, Pix};
use blobkit_region::{LabelOptions, label_copy};

/// Options for [`tile_distance_mask`] and [`min_region_distance`]
#[derive(Debug, Clone)]
pub struct TileScanOptions {
    /// Side length of a square tile (default 8)
    pub tile_size: u32,
    /// Tiles at or above this distance are background (default 125)
    pub tile_threshold: f64,
    /// Largest distance accepted for the combined blob (default 105)
    pub all_blob_threshold: f64,
}

impl Default for TileScanOptions {
    fn default() -> Self {
        Self {
            tile_size: 8,
            tile_threshold: 125.0,
            all_blob_threshold: 105.0,
        }
    }
}

impl TileScanOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tile size
    pub fn with_tile_size(mut self, size: u32) -> Self {
        self.tile_size = size;
        self
    }

    /// Set the per-tile distance threshold
    pub fn with_tile_threshold(mut self, threshold: f64) -> Self {
        self.tile_threshold = threshold;
        self
    }

    /// Set the combined-blob distance threshold
    pub fn with_all_blob_threshold(mut self, threshold: f64) -> Self {
        self.all_blob_threshold = threshold;
        self
    }

    fn validate(&self) -> ColorResult<()> {
        if self.tile_size == 0 {
            return Err(ColorError::InvalidParameters(
                "tile_size must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Options for [`sliding_window_search`]
#[derive(Debug, Clone)]
pub struct WindowSearchOptions {
    /// Windows at or below this distance match (default 36)
    pub threshold: f64,
    /// Window sides must stay above this size (default 15)
    pub min_size: u32,
    /// Amount each window side shrinks per round (default 15)
    pub size_step: u32,
    /// Window positions are spaced `dimension / positions_per_axis` apart,
    /// at least 1 (default 45)
    pub positions_per_axis: u32,
}

impl Default for WindowSearchOptions {
    fn default() -> Self {
        Self {
            threshold: 36.0,
            min_size: 15,
            size_step: 15,
            positions_per_axis: 45,
        }
    }
}

impl WindowSearchOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the match threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the exclusive lower bound on window sides
    pub fn with_min_size(mut self, size: u32) -> Self {
        self.min_size = size;
        self
    }

    /// Set the shrink step between window sizes
    pub fn with_size_step(mut self, step: u32) -> Self {
        self.size_step = step;
        self
    }

    /// Set the number of positions per axis
    pub fn with_positions_per_axis(mut self, n: u32) -> Self {
        self.positions_per_axis = n;
        self
    }

    fn validate(&self) -> ColorResult<()> {
        if self.size_step == 0 || self.positions_per_axis == 0 {
            return Err(ColorError::InvalidParameters(
                "size_step and positions_per_axis must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Paint each tile black if its histogram is close to `template`.
///
/// The image is cut into `tile_size` squares (smaller at the right and
/// bottom edges). A tile whose normalized histogram lies at distance
/// `>= tile_threshold` from `template` becomes white, any other tile black.
/// Alpha and row padding are copied from `pix`.
pub fn tile_distance_mask(
    pix: &Pix,
    template: &ColorBins,
    options: &TileScanOptions,
) -> ColorResult<Pix> {
    options.validate()?;
    let (w, h) = (pix.width(), pix.height());
    let tile = options.tile_size;
    let stride = pix.stride();
    let mut out = pix.to_mut();

    out.data_mut()
        .par_chunks_mut(stride * tile as usize)
        .enumerate()
        .try_for_each(|(band, rows)| -> ColorResult<()> {
            let y0 = band as u32 * tile;
            let th = tile.min(h - y0);
            for x0 in (0..w).step_by(tile as usize) {
                let tw = tile.min(w - x0);
                let rect = Box::new_unchecked(x0 as i32, y0 as i32, tw as i32, th as i32);
                let bins = color_bins_in_rect(pix, &rect, true)?;
                let color = if distance(&bins, template) >= options.tile_threshold {
                    Color::WHITE
                } else {
                    Color::BLACK
                };
                for r in 0..th as usize {
                    let start = r * stride + x0 as usize * BYTES_PER_PIXEL;
                    let end = start + tw as usize * BYTES_PER_PIXEL;
                    for px in rows[start..end].chunks_exact_mut(BYTES_PER_PIXEL) {
                        color.write_bgr(px);
                    }
                }
            }
            Ok(())
        })?;

    Ok(out.into())
}

fn within_blob_distance(
    pix: &Pix,
    mask: &Pix,
    rect: &Box,
    template: &ColorBins,
) -> ColorResult<f64> {
    let bins = color_bins_within_blob(&pix.crop(rect)?, &mask.crop(rect)?, true)?;
    Ok(distance(&bins, template))
}

/// Smallest distance between `template` and a candidate region of `pix`.
///
/// Candidate areas come from [`tile_distance_mask`]. The histogram of all
/// candidate pixels counts if it is within `all_blob_threshold`; then each
/// connected candidate region is scored on its bounding box, counting only
/// candidate pixels. Returns `f64::INFINITY` when no tile matches.
pub fn min_region_distance(
    pix: &Pix,
    template: &ColorBins,
    options: &TileScanOptions,
) -> ColorResult<f64> {
    let mask = tile_distance_mask(pix, template, options)?;
    let Some(all_blobs) = mask.bounding_box_of_color(Color::BLACK) else {
        log::debug!("no tile close to the template");
        return Ok(f64::INFINITY);
    };

    let mut best = f64::INFINITY;
    let combined = within_blob_distance(pix, &mask, &all_blobs, template)?;
    if combined <= options.all_blob_threshold {
        best = combined;
    }

    let (labeled, colors) = label_copy(&mask, &LabelOptions::default())?;
    for color in &colors {
        let Some(rect) = labeled.bounding_box_of_color(*color) else {
            continue;
        };
        let d = within_blob_distance(pix, &mask, &rect, template)?;
        if d <= best {
            best = d;
        }
    }
    log::debug!(
        "{} candidate regions, combined distance {combined:.2}, best {best:.2}",
        colors.len()
    );
    Ok(best)
}

fn merge_pass(boxes: &[Box]) -> Vec<Box> {
    let mut out: Vec<Box> = Vec::with_capacity(boxes.len());
    for b in boxes {
        let merged = boxes.iter().fold(*b, |acc, other| {
            if acc.significantly_intersects(other) {
                acc.union(other)
            } else {
                acc
            }
        });
        if !out.contains(&merged) {
            out.push(merged);
        }
    }
    out
}

/// Merge boxes that significantly intersect until the count stops changing.
///
/// Each box absorbs, in order, every box it significantly intersects; the
/// distinct results form the next round. The final list is sorted.
pub fn merge_significant(boxes: &[Box]) -> Vec<Box> {
    let mut current = merge_pass(boxes);
    loop {
        let next = merge_pass(&current);
        let settled = next.len() == current.len();
        current = next;
        if settled {
            break;
        }
    }
    current.sort();
    current
}

/// Find windows whose histogram matches `template`.
///
/// Window widths and heights start one pixel short of the image and shrink
/// by `size_step` while they stay above `min_size`, largest first. A
/// matching window is kept unless an earlier kept window contains it. The
/// kept windows are then merged with [`merge_significant`].
pub fn sliding_window_search(
    pix: &Pix,
    template: &ColorBins,
    options: &WindowSearchOptions,
) -> ColorResult<Vec<Box>> {
    options.validate()?;
    let (w, h) = (pix.width(), pix.height());
    let x_step = (w / options.positions_per_axis).max(1) as usize;
    let y_step = (h / options.positions_per_axis).max(1) as usize;
    let sizes = |dim: u32| {
        let mut v = Vec::new();
        let mut s = dim.saturating_sub(1);
        while s > options.min_size {
            v.push(s);
            s = s.saturating_sub(options.size_step);
        }
        v
    };

    let accepted: Mutex<Vec<Box>> = Mutex::new(Vec::new());
    let mut evaluated = 0usize;
    for &ww in &sizes(w) {
        for &wh in &sizes(h) {
            let positions: Vec<(u32, u32)> = (0..w - ww)
                .step_by(x_step)
                .flat_map(|x| (0..h - wh).step_by(y_step).map(move |y| (x, y)))
                .collect();
            evaluated += positions.len();
            positions
                .par_iter()
                .try_for_each(|&(x, y)| -> ColorResult<()> {
                    let rect = Box::new_unchecked(x as i32, y as i32, ww as i32, wh as i32);
                    let bins = color_bins_in_rect(pix, &rect, true)?;
                    if distance(&bins, template) <= options.threshold {
                        let mut kept = accepted.lock();
                        if !kept.iter().any(|k| k.contains_box(&rect)) {
                            kept.push(rect);
                        }
                    }
                    Ok(())
                })?;
        }
    }

    let mut found = accepted.into_inner();
    found.sort();
    let merged = merge_significant(&found);
    log::debug!(
        "window search: {evaluated} windows, {} matches, {} after merging",
        found.len(),
        merged.len()
    );
    Ok(merged)
}
