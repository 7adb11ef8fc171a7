//! Binary morphological operations
//!
//! Erosion, dilation and their compositions over the 4-neighbourhood.

use crate::{MorphError, MorphResult};
use blobkit_core::{Color, Pix, exclusive_or};

#[derive(Clone, Copy)]
enum Rule {
    /// Black iff the pixel and all four neighbours are foreground
    All,
    /// Black iff the pixel or any of its four neighbours is foreground
    Any,
}

fn apply(pix: &Pix, rule: Rule) -> Pix {
    let (w, h) = (pix.width(), pix.height());
    let stride = pix.stride() as isize;
    let mut out = pix.to_mut();
    for y in 0..h {
        for x in 0..w {
            let Some(addr) = pix.address(x, y) else {
                continue;
            };
            let on_border = x == 0 || y == 0 || x == w - 1 || y == h - 1;
            let black = !on_border && {
                let fg = |delta: isize| {
                    pix.offset_address(addr, delta)
                        .and_then(|a| pix.pixel_at(a))
                        .is_some_and(|c| !c.is_white())
                };
                let taps = [0, -stride, stride, -4, 4].map(fg);
                match rule {
                    Rule::All => taps.iter().all(|&t| t),
                    Rule::Any => taps.iter().any(|&t| t),
                }
            };
            out.set_pixel_at(addr, if black { Color::BLACK } else { Color::WHITE });
        }
    }
    out.into()
}

/// Erode the foreground by one pixel.
///
/// An interior pixel becomes black iff it and its N, S, E, W neighbours
/// are all non-white; everything else, including the border, becomes white.
pub fn erode(pix: &Pix) -> Pix {
    apply(pix, Rule::All)
}

/// Dilate the foreground by one pixel.
///
/// An interior pixel becomes black iff it or any of its N, S, E, W
/// neighbours is non-white. Border pixels are always white.
pub fn dilate(pix: &Pix) -> Pix {
    apply(pix, Rule::Any)
}

/// Erosion followed by dilation.
pub fn open(pix: &Pix) -> Pix {
    dilate(&erode(pix))
}

/// Dilation followed by erosion.
pub fn close(pix: &Pix) -> Pix {
    erode(&dilate(pix))
}

/// Apply [`erode`] `iterations` times.
///
/// # Errors
///
/// Returns [`MorphError::InvalidParameters`] if `iterations` is 0.
pub fn erode_repeated(pix: &Pix, iterations: u32) -> MorphResult<Pix> {
    if iterations == 0 {
        return Err(MorphError::InvalidParameters(
            "erosion needs at least one iteration".to_string(),
        ));
    }
    let mut out = erode(pix);
    for _ in 1..iterations {
        out = erode(&out);
    }
    Ok(out)
}

/// Inner boundary of the foreground.
///
/// Computed as `exclusive_or(pix, erode(pix))`: pixels that erosion
/// changed are black, all others white. On a black-on-white mask this
/// leaves exactly the foreground pixels with a background 4-neighbour (or
/// on the image border).
pub fn extract_boundary(pix: &Pix) -> MorphResult<Pix> {
    let eroded = erode(pix);
    Ok(exclusive_or(pix, &eroded)?)
}
