//! Blob measurements
//!
//! Shape statistics of the pixels of one color: area, centroid, central
//! second-order moments, principal inertias, circularity and the length of
//! the traced boundary.

use crate::ccbord::trace_boundary;
use crate::error::{RegionError, RegionResult};
use blobkit_core::color::BYTES_PER_PIXEL;
use blobkit_core::{Color, Pix};
use blobkit_morph::extract_boundary;
use std::fmt;

/// Shape statistics of a single-color region
///
/// Coordinates are `x = column`, `y = row`. Moments are central and
/// divided by the area.
#[derive(Debug, Clone, PartialEq)]
pub struct BlobMetrics {
    /// Region color
    pub color: Color,
    /// Pixel count
    pub area: usize,
    /// Mean (column, row)
    pub centroid: (f64, f64),
    /// Mean squared row offset from the centroid
    pub second_row_moment: f64,
    /// Mean product of row and column offsets
    pub second_mixed_moment: f64,
    /// Mean squared column offset from the centroid
    pub second_column_moment: f64,
    /// Principal axis angle in radians, in (-π/2, π/2].
    ///
    /// 0 for an upright blob wider than tall, π/2 for one taller than wide.
    pub orientation: f64,
    /// Larger principal inertia
    pub max_inertia: f64,
    /// Smaller principal inertia
    pub min_inertia: f64,
    /// Mean radial distance over its standard deviation.
    ///
    /// `f64::INFINITY` when every pixel is at the same distance from the
    /// centroid (e.g. a single pixel).
    pub circularity: f64,
    /// Length of the traced boundary loop
    pub perimeter: f64,
}

/// Inertia about the axis at angle `theta` for the given moments.
fn inertia(theta: f64, row: f64, mixed: f64, col: f64) -> f64 {
    let (s, c) = theta.sin_cos();
    s * s * col - 2.0 * s * c * mixed + c * c * row
}

/// Black-on-white mask of the pixels of `color`.
fn color_mask(pix: &Pix, color: Color) -> Pix {
    let mut pm = pix.to_mut();
    for y in 0..pm.height() {
        for px in pm.row_mut(y).chunks_exact_mut(BYTES_PER_PIXEL) {
            let c = if Color::from_bgr(px) == color {
                Color::BLACK
            } else {
                Color::WHITE
            };
            c.write_bgr(px);
        }
    }
    pm.into()
}

impl BlobMetrics {
    /// Measure the region of `color` in `pix`.
    ///
    /// The region is every pixel of exactly `color`; it is expected to be
    /// one 8-connected blob, as produced by
    /// [`label_regions`](crate::label_regions).
    ///
    /// # Errors
    ///
    /// - [`RegionError::EmptyRegion`] if no pixel has `color`.
    /// - [`RegionError::UnclosedBoundary`] if the boundary walk exceeds its
    ///   step limit. No partial metrics are returned.
    pub fn compute(pix: &Pix, color: Color) -> RegionResult<Self> {
        let mut points = Vec::new();
        for y in 0..pix.height() {
            for (x, px) in pix.row(y).chunks_exact(BYTES_PER_PIXEL).enumerate() {
                if Color::from_bgr(px) == color {
                    points.push((x as f64, y as f64));
                }
            }
        }
        if points.is_empty() {
            return Err(RegionError::EmptyRegion);
        }

        let area = points.len();
        let n = area as f64;
        let (sx, sy) = points
            .iter()
            .fold((0.0, 0.0), |(sx, sy), &(x, y)| (sx + x, sy + y));
        let (cx, cy) = (sx / n, sy / n);

        let (mut row, mut mixed, mut col) = (0.0, 0.0, 0.0);
        for &(x, y) in &points {
            let (dx, dy) = (x - cx, y - cy);
            row += dy * dy;
            mixed += dy * dx;
            col += dx * dx;
        }
        row /= n;
        mixed /= n;
        col /= n;

        let theta = 0.5 * (2.0 * mixed).atan2(col - row);
        let i1 = inertia(theta, row, mixed, col);
        let i2 = inertia(theta + std::f64::consts::FRAC_PI_2, row, mixed, col);

        let radii: Vec<f64> = points
            .iter()
            .map(|&(x, y)| (x - cx).hypot(y - cy))
            .collect();
        let mean = radii.iter().sum::<f64>() / n;
        let variance = radii.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
        let stddev = variance.sqrt();
        let circularity = if stddev > 0.0 {
            mean / stddev
        } else {
            f64::INFINITY
        };

        let boundary = extract_boundary(&color_mask(pix, color))?;
        let path = trace_boundary(&boundary)?;
        let perimeter = path.length(boundary.stride());

        log::debug!(
            "blob {}: area {}, perimeter {:.1} over {} boundary pixels",
            color,
            area,
            perimeter,
            path.len()
        );

        Ok(Self {
            color,
            area,
            centroid: (cx, cy),
            second_row_moment: row,
            second_mixed_moment: mixed,
            second_column_moment: col,
            orientation: theta,
            max_inertia: i1.max(i2),
            min_inertia: i1.min(i2),
            circularity,
            perimeter,
        })
    }
}

/// Round to one decimal, ties to even.
fn round1(v: f64) -> f64 {
    (v * 10.0).round_ties_even() / 10.0
}

impl fmt::Display for BlobMetrics {
    /// Multi-line report, one value per line rounded to one decimal.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Blob Color: {}", self.color)?;
        writeln!(f, "Area: {} px", self.area)?;
        writeln!(
            f,
            "Centroid: ({}, {})",
            round1(self.centroid.0),
            round1(self.centroid.1)
        )?;
        writeln!(f, "Second-Order Row Moment: {}", round1(self.second_row_moment))?;
        writeln!(f, "Second-Order Mixed Moment: {}", round1(self.second_mixed_moment))?;
        writeln!(f, "Second-order Column Moment: {}", round1(self.second_column_moment))?;
        writeln!(f, "Orientation: {} rad", round1(self.orientation))?;
        writeln!(f, "Max Inertia: {}", round1(self.max_inertia))?;
        writeln!(f, "Min Inertia: {}", round1(self.min_inertia))?;
        writeln!(f, "Circularity: {}", round1(self.circularity))?;
        writeln!(f, "Perimeter/Circumference: {} px", round1(self.perimeter))?;
        writeln!(f)
    }
}
