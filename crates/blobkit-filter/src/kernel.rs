//! Integer blur kernel
//!
//! A 1D kernel of length `2r + 1` whose weight at offset `d` from the center
//! is `(r + 1 - |d|)^2`, together with a lookup table holding
//! `weight * value` for every tap and every byte value.

use crate::{FilterError, FilterResult};

/// Largest radius accepted by [`BlurKernel::new`]
pub const MAX_BLUR_RADIUS: u32 = 255;

/// Separable integer blur kernel with a precomputed multiplication table.
#[derive(Debug, Clone)]
pub struct BlurKernel {
    radius: u32,
    weights: Vec<u32>,
    table: Vec<[u32; 256]>,
}

impl BlurKernel {
    /// Build the kernel for `radius`.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernel`] if `radius` exceeds
    /// [`MAX_BLUR_RADIUS`].
    pub fn new(radius: u32) -> FilterResult<Self> {
        if radius > MAX_BLUR_RADIUS {
            return Err(FilterError::InvalidKernel(format!(
                "radius {radius} exceeds maximum {MAX_BLUR_RADIUS}"
            )));
        }
        let r = radius as i64;
        let weights: Vec<u32> = (-r..=r)
            .map(|d| {
                let w = (r + 1 - d.abs()) as u32;
                w * w
            })
            .collect();
        let table = weights
            .iter()
            .map(|&w| std::array::from_fn(|v| w * v as u32))
            .collect();
        Ok(Self {
            radius,
            weights,
            table,
        })
    }

    /// Kernel radius.
    #[inline]
    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Number of taps, `2 * radius + 1`.
    #[inline]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Always false; a kernel has at least the center tap.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Tap weights, leftmost first.
    pub fn weights(&self) -> &[u32] {
        &self.weights
    }

    /// Weight of tap `tap` (0-based from the left).
    #[inline]
    pub fn weight(&self, tap: usize) -> u32 {
        self.weights[tap]
    }

    /// `weight(tap) * value`, read from the table.
    #[inline]
    pub fn product(&self, tap: usize, value: u8) -> u32 {
        self.table[tap][value as usize]
    }
}
