//! 64-bin quantized color histograms
//!
//! Each pixel falls into the bin formed by the two most significant bits of
//! its red, green and blue channels, packed as `RRGGBB`. Histograms hold
//! either raw counts or percentages rounded to two decimals.

use std::ops::Index;

use crate::{ColorError, ColorResult};
use blobkit_core::color::{BLUE, BYTES_PER_PIXEL};
use blobkit_core::{Box, Color, Error, Pix};

/// Number of histogram bins
pub const BIN_COUNT: usize = 64;

/// Histogram bin of a color.
#[inline]
pub fn bin_index(color: Color) -> usize {
    (((color.r >> 6) << 4) | ((color.g >> 6) << 2) | (color.b >> 6)) as usize
}

/// A 64-bin color histogram.
///
/// Bins are always finite and non-negative, so any two differing bins have
/// a positive sum and [`distance`] never divides by zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorBins([f64; BIN_COUNT]);

impl Default for ColorBins {
    fn default() -> Self {
        Self([0.0; BIN_COUNT])
    }
}

impl ColorBins {
    /// An all-zero histogram.
    pub fn zeros() -> Self {
        Self::default()
    }

    /// Build a histogram from 64 values, e.g. a stored template.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidHistogram`] if the slice does not hold
    /// exactly 64 values or any value is negative or not finite.
    pub fn from_slice(values: &[f64]) -> ColorResult<Self> {
        let bins: [f64; BIN_COUNT] = values.try_into().map_err(|_| {
            ColorError::InvalidHistogram(format!(
                "expected {BIN_COUNT} bins, got {}",
                values.len()
            ))
        })?;
        if let Some((i, v)) = bins
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(ColorError::InvalidHistogram(format!(
                "bin {i} holds {v}"
            )));
        }
        Ok(Self(bins))
    }

    /// The bin values.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Sum of all bins.
    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    fn add(&mut self, color: Color) {
        self.0[bin_index(color)] += 1.0;
    }

    /// Convert counts into percentages rounded to two decimals.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::EmptyHistogram`] if every bin is zero.
    pub fn normalized(&self) -> ColorResult<Self> {
        let total = self.total();
        if total == 0.0 {
            return Err(ColorError::EmptyHistogram);
        }
        Ok(Self(self.0.map(|c| round2(c / total * 100.0))))
    }
}

impl Index<usize> for ColorBins {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.0[i]
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round_ties_even() / 100.0
}

fn finish(bins: ColorBins, normalize: bool) -> ColorResult<ColorBins> {
    if normalize { bins.normalized() } else { Ok(bins) }
}

/// Histogram of every pixel in `pix`.
///
/// # Errors
///
/// Returns [`ColorError::EmptyHistogram`] when normalizing a histogram
/// with no pixels.
pub fn color_bins(pix: &Pix, normalize: bool) -> ColorResult<ColorBins> {
    let mut bins = ColorBins::zeros();
    for y in 0..pix.height() {
        for px in pix.row(y).chunks_exact(BYTES_PER_PIXEL) {
            bins.add(Color::from_bgr(px));
        }
    }
    finish(bins, normalize)
}

/// Histogram of the pixels of `pix` covered by `rect`.
///
/// # Errors
///
/// Returns a core `RectOutOfBounds` error if `rect` is not fully inside
/// the image, and [`ColorError::EmptyHistogram`] when normalizing an empty
/// rectangle.
pub fn color_bins_in_rect(pix: &Pix, rect: &Box, normalize: bool) -> ColorResult<ColorBins> {
    let inside = rect.x >= 0
        && rect.y >= 0
        && rect.w >= 0
        && rect.h >= 0
        && rect.right() as i64 <= pix.width() as i64
        && rect.bottom() as i64 <= pix.height() as i64;
    if !inside {
        return Err(Error::RectOutOfBounds {
            x: rect.x,
            y: rect.y,
            w: rect.w,
            h: rect.h,
            width: pix.width(),
            height: pix.height(),
        }
        .into());
    }
    let (x0, x1) = (rect.x as usize * BYTES_PER_PIXEL, rect.right() as usize * BYTES_PER_PIXEL);
    let mut bins = ColorBins::zeros();
    for y in rect.y..rect.bottom() {
        for px in pix.row(y as u32)[x0..x1].chunks_exact(BYTES_PER_PIXEL) {
            bins.add(Color::from_bgr(px));
        }
    }
    finish(bins, normalize)
}

/// Histogram of the pixels of `pix` that lie inside the blob.
///
/// `mask` is a thresholded image of the same size. A pixel is inside when
/// the mask's blue byte at the same position is 0, so black mask pixels
/// are counted and white ones skipped.
///
/// # Errors
///
/// Returns a core `IncompatibleSizes` error if the sizes differ and
/// [`ColorError::EmptyHistogram`] when normalizing an empty selection.
pub fn color_bins_within_blob(pix: &Pix, mask: &Pix, normalize: bool) -> ColorResult<ColorBins> {
    if !pix.sizes_equal(mask) {
        return Err(Error::IncompatibleSizes(
            pix.width(),
            pix.height(),
            mask.width(),
            mask.height(),
        )
        .into());
    }
    let mut bins = ColorBins::zeros();
    for y in 0..pix.height() {
        let pixels = pix.row(y).chunks_exact(BYTES_PER_PIXEL);
        let inside = mask.row(y).chunks_exact(BYTES_PER_PIXEL);
        for (px, m) in pixels.zip(inside) {
            if m[BLUE] == 0 {
                bins.add(Color::from_bgr(px));
            }
        }
    }
    finish(bins, normalize)
}

/// Chi-square style distance `sum((a - b)^2 / (a + b))`.
///
/// Bins holding equal values contribute nothing.
pub fn distance(a: &ColorBins, b: &ColorBins) -> f64 {
    a.0.iter()
        .zip(b.0.iter())
        .filter(|(x, y)| x != y)
        .map(|(x, y)| (x - y).powi(2) / (x + y))
        .sum()
}
