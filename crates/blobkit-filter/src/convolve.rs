//! Separable integer blur
//!
//! The blur runs one horizontal pass and then one vertical pass over each
//! color channel. Taps that fall outside the image are dropped and the
//! remaining weights renormalize the sum, so edges are not darkened.

use crate::FilterResult;
use crate::kernel::BlurKernel;
use blobkit_core::PixMut;
use blobkit_core::color::{BLUE, BYTES_PER_PIXEL, GREEN, RED};

/// Blur `pix` in place with the integer kernel of the given radius.
///
/// Each output channel is `sum(weight * value) / sum(weight)` over the
/// in-bounds taps, truncated. Alpha and row padding are left untouched.
/// Radius 0 leaves the image unchanged.
///
/// # Errors
///
/// Returns [`crate::FilterError::InvalidKernel`] if the radius is too large.
pub fn gaussian_blur(pix: &mut PixMut, radius: u32) -> FilterResult<()> {
    let kernel = BlurKernel::new(radius)?;
    let (w, h) = (pix.width() as usize, pix.height() as usize);
    if w == 0 || h == 0 || radius == 0 {
        return Ok(());
    }

    for channel in [BLUE, GREEN, RED] {
        let plane = extract_plane(pix, channel);
        let horizontal = blur_rows(&plane, w, h, &kernel);
        let vertical = blur_columns(&horizontal, w, h, &kernel);
        store_plane(pix, channel, &vertical);
    }
    log::debug!("blurred {w}x{h} image with radius {radius}");
    Ok(())
}

fn extract_plane(pix: &PixMut, channel: usize) -> Vec<u8> {
    let mut plane = Vec::with_capacity(pix.width() as usize * pix.height() as usize);
    for y in 0..pix.height() {
        plane.extend(pix.row(y).chunks_exact(BYTES_PER_PIXEL).map(|px| px[channel]));
    }
    plane
}

fn store_plane(pix: &mut PixMut, channel: usize, plane: &[u8]) {
    let w = pix.width() as usize;
    for y in 0..pix.height() {
        let src = &plane[y as usize * w..(y as usize + 1) * w];
        for (px, &v) in pix.row_mut(y).chunks_exact_mut(BYTES_PER_PIXEL).zip(src) {
            px[channel] = v;
        }
    }
}

fn blur_rows(plane: &[u8], w: usize, h: usize, kernel: &BlurKernel) -> Vec<u8> {
    let r = kernel.radius() as isize;
    let mut out = vec![0u8; plane.len()];
    for y in 0..h {
        let row = &plane[y * w..(y + 1) * w];
        for x in 0..w {
            let (mut acc, mut norm) = (0u64, 0u64);
            for tap in 0..kernel.len() {
                let sx = x as isize + tap as isize - r;
                if sx < 0 || sx >= w as isize {
                    continue;
                }
                acc += kernel.product(tap, row[sx as usize]) as u64;
                norm += kernel.weight(tap) as u64;
            }
            out[y * w + x] = (acc / norm) as u8;
        }
    }
    out
}

fn blur_columns(plane: &[u8], w: usize, h: usize, kernel: &BlurKernel) -> Vec<u8> {
    let r = kernel.radius() as isize;
    let mut out = vec![0u8; plane.len()];
    for y in 0..h {
        for x in 0..w {
            let (mut acc, mut norm) = (0u64, 0u64);
            for tap in 0..kernel.len() {
                let sy = y as isize + tap as isize - r;
                if sy < 0 || sy >= h as isize {
                    continue;
                }
                acc += kernel.product(tap, plane[sy as usize * w + x]) as u64;
                norm += kernel.weight(tap) as u64;
            }
            out[y * w + x] = (acc / norm) as u8;
        }
    }
    out
}
