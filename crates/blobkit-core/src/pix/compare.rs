//! Image comparison
//!
//! Pixel-wise difference maps between two images of the same size.

use super::Pix;
use crate::color::{BYTES_PER_PIXEL, Color};
use crate::error::{Error, Result};

fn check_sizes(a: &Pix, b: &Pix) -> Result<()> {
    if a.sizes_equal(b) {
        Ok(())
    } else {
        Err(Error::IncompatibleSizes(
            a.width(),
            a.height(),
            b.width(),
            b.height(),
        ))
    }
}

/// Difference map of two images.
///
/// Pixels whose colors match are white in the result; pixels that differ
/// are black. Geometry and alpha come from `a`.
///
/// # Errors
///
/// Returns [`Error::IncompatibleSizes`] if the images differ in size.
pub fn exclusive_or(a: &Pix, b: &Pix) -> Result<Pix> {
    check_sizes(a, b)?;
    let mut out = a.to_mut();
    for y in 0..a.height() {
        let other = b.row(y);
        for (px, qx) in out
            .row_mut(y)
            .chunks_exact_mut(BYTES_PER_PIXEL)
            .zip(other.chunks_exact(BYTES_PER_PIXEL))
        {
            let same = Color::from_bgr(px) == Color::from_bgr(qx);
            let c = if same { Color::WHITE } else { Color::BLACK };
            c.write_bgr(px);
        }
    }
    Ok(out.into())
}

/// Number of pixels whose colors differ between two images.
///
/// # Errors
///
/// Returns [`Error::IncompatibleSizes`] if the images differ in size.
pub fn count_differing_pixels(a: &Pix, b: &Pix) -> Result<usize> {
    check_sizes(a, b)?;
    let mut count = 0;
    for y in 0..a.height() {
        count += a
            .row(y)
            .chunks_exact(BYTES_PER_PIXEL)
            .zip(b.row(y).chunks_exact(BYTES_PER_PIXEL))
            .filter(|(p, q)| Color::from_bgr(p) != Color::from_bgr(q))
            .count();
    }
    Ok(count)
}
