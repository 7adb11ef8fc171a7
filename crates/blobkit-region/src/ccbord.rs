//! Boundary tracing
//!
//! Follows a one-pixel-wide black boundary curve on a white mask and
//! records it as an ordered loop of pixel addresses.
//!
//! The tracer handles exactly one connected curve. On a mask with several
//! curves it follows whichever one holds the first black pixel in raster
//! order and ignores the rest.

use crate::error::{RegionError, RegionResult};
use blobkit_core::{Color, Pix};

/// Neighbour order tried at every step: top-right, right, bottom-right,
/// bottom, bottom-left, left, top-left, top
const STEP_ORDER: [(i32, i32); 8] = [
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
];

/// Axis-aligned step length
const AXIS_STEP: f64 = 1.0;
/// Diagonal step length
const DIAGONAL_STEP: f64 = 1.4;

/// Ordered loop of boundary pixel addresses
///
/// Consecutive entries are 8-neighbours. The last entry is usually an
/// 8-neighbour of the first, but a walk that runs into a dead end stops
/// wherever it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerimeterPath {
    addresses: Vec<usize>,
}

impl PerimeterPath {
    /// Pixel addresses in walk order
    pub fn addresses(&self) -> &[usize] {
        &self.addresses
    }

    /// Number of pixels on the path
    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    /// True for a path without pixels (never produced by the tracer)
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    /// Length of the closed loop.
    ///
    /// Each step to the next entry, including the step from the last entry
    /// back to the first, adds 1 when the pixels share an edge and 1.4 when
    /// they touch diagonally. A closing step between pixels that do not
    /// touch adds nothing.
    pub fn length(&self, stride: usize) -> f64 {
        let n = self.addresses.len();
        (0..n)
            .map(|i| {
                let a = self.addresses[i] as isize;
                let b = self.addresses[(i + 1) % n] as isize;
                step_length(a - b, stride as isize)
            })
            .sum()
    }

    /// (column, row) of each entry for a buffer with the given stride
    pub fn points(&self, stride: usize) -> Vec<(u32, u32)> {
        self.addresses
            .iter()
            .map(|&a| (((a % stride) / 4) as u32, (a / stride) as u32))
            .collect()
    }
}

fn step_length(delta: isize, stride: isize) -> f64 {
    if delta == 4 || delta == -4 || delta == stride || delta == -stride {
        AXIS_STEP
    } else if [stride + 4, stride - 4, -stride + 4, -stride - 4].contains(&delta) {
        DIAGONAL_STEP
    } else {
        0.0
    }
}

/// Trace the black boundary curve of a mask.
///
/// Starts at the first black pixel in raster order. At every step the
/// current pixel is appended to the path and erased in a scratch copy,
/// then the walk moves to the first black neighbour in [`STEP_ORDER`]. The
/// walk stops when no black neighbour is left, whether it is back beside
/// the start or stuck at the tip of a spur.
///
/// # Errors
///
/// - [`RegionError::EmptyRegion`] if the mask has no black pixel.
/// - [`RegionError::UnclosedBoundary`] if the walk runs for more than
///   `width * height` steps.
pub fn trace_boundary(mask: &Pix) -> RegionResult<PerimeterPath> {
    let start = mask
        .pixel_addresses()
        .find(|&a| mask.pixel_at(a) == Some(Color::BLACK))
        .ok_or(RegionError::EmptyRegion)?;

    let (w, h) = (mask.width() as i64, mask.height() as i64);
    let cap = (w * h) as usize;
    let mut scratch = mask.to_mut();
    let mut addresses = Vec::new();
    let mut current = start;

    loop {
        if addresses.len() >= cap {
            return Err(RegionError::UnclosedBoundary {
                steps: addresses.len(),
            });
        }
        addresses.push(current);
        scratch.set_pixel_at(current, Color::WHITE);

        let Some((x, y)) = scratch.coords(current) else {
            break;
        };
        let next = STEP_ORDER.iter().find_map(|&(dx, dy)| {
            let (nx, ny) = (x as i64 + dx as i64, y as i64 + dy as i64);
            if nx < 0 || ny < 0 || nx >= w || ny >= h {
                return None;
            }
            scratch
                .address(nx as u32, ny as u32)
                .filter(|&a| scratch.pixel_at(a) == Some(Color::BLACK))
        });
        match next {
            Some(a) => current = a,
            None => break,
        }
    }

    log::debug!(
        "boundary trace: {} pixels from {:?} to {:?}",
        addresses.len(),
        mask.coords(start),
        mask.coords(current)
    );
    Ok(PerimeterPath { addresses })
}
