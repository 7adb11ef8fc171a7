//! Region labeling
//!
//! Partitions the foreground of an image into regions and paints each
//! region a distinct color.
//!
//! Foreground is every non-white pixel, so a labeled image labels to the
//! same partition again. The scan is a single raster pass that looks at the
//! causal neighbours left, top-left, top and top-right. Neighbours are found
//! by coordinates, so regions never join across the left and right edges
//! and the result does not depend on the row stride.

use crate::conncomp::MergeForest;
use crate::error::{RegionError, RegionResult};
use blobkit_core::{Color, Pix, PixMut};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

/// Causal neighbours in priority order: left, top-left, top, top-right
const CAUSAL_NEIGHBORS: [(i32, i32); 4] = [(-1, 0), (-1, -1), (0, -1), (1, -1)];

/// Number of values each channel of a label color can take (1..=254)
const CHANNEL_LEVELS: usize = 254;

/// How label colors are chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelColoring {
    /// Region `n` (in discovery order) gets a fixed color derived from `n`
    #[default]
    Sequential,
    /// Uniform colors from a seeded generator, re-drawn on collision
    Random {
        /// Generator seed
        seed: u64,
    },
}

/// Options for region labeling
#[derive(Debug, Clone, Default)]
pub struct LabelOptions {
    /// Color assignment policy
    pub coloring: LabelColoring,
}

impl LabelOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the color assignment policy
    pub fn with_coloring(mut self, coloring: LabelColoring) -> Self {
        self.coloring = coloring;
        self
    }

    /// Use seeded random colors
    pub fn with_seed(self, seed: u64) -> Self {
        self.with_coloring(LabelColoring::Random { seed })
    }
}

/// Largest number of regions that can get distinct colors.
///
/// Each channel ranges over `1..=254`, which keeps pure white and pure
/// black out of the label palette.
pub const fn label_capacity() -> usize {
    CHANNEL_LEVELS * CHANNEL_LEVELS * CHANNEL_LEVELS
}

/// Color of the `n`-th region under [`LabelColoring::Sequential`].
///
/// Returns `None` when `n` is at or beyond [`label_capacity`].
pub fn sequential_color(n: usize) -> Option<Color> {
    if n >= label_capacity() {
        return None;
    }
    let level = |k: usize| (1 + k % CHANNEL_LEVELS) as u8;
    Some(Color::new(
        level(n),
        level(n / CHANNEL_LEVELS),
        level(n / (CHANNEL_LEVELS * CHANNEL_LEVELS)),
    ))
}

fn palette(count: usize, coloring: LabelColoring) -> RegionResult<Vec<Color>> {
    if count > label_capacity() {
        return Err(RegionError::LabelSpaceExhausted {
            regions: count,
            capacity: label_capacity(),
        });
    }
    match coloring {
        LabelColoring::Sequential => Ok((0..count).filter_map(sequential_color).collect()),
        LabelColoring::Random { seed } => {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut used = HashSet::with_capacity(count);
            let mut colors = Vec::with_capacity(count);
            while colors.len() < count {
                let c = Color::new(
                    rng.random_range(1..=254),
                    rng.random_range(1..=254),
                    rng.random_range(1..=254),
                );
                if used.insert(c) {
                    colors.push(c);
                }
            }
            Ok(colors)
        }
    }
}

/// Label the foreground regions of `pm` in place.
///
/// Every foreground pixel is rewritten with the color of its region; white
/// pixels, padding and alpha are left untouched.
///
/// Where neighbours carry different labels, the first labeled neighbour in
/// the order left, top-left, top, top-right is kept and the others are
/// merged into it. After the pass all merges are resolved so that each
/// region's label is its earliest-discovered member.
///
/// # Returns
///
/// The region colors, ordered by each region's first pixel in raster
/// order. An image without foreground yields an empty list.
///
/// # Errors
///
/// Returns [`RegionError::LabelSpaceExhausted`] if there are more regions
/// than distinct label colors. The image is left unmodified in that case.
pub fn label_regions(pm: &mut PixMut, options: &LabelOptions) -> RegionResult<Vec<Color>> {
    let mut plane: Vec<Option<u32>> = vec![None; pm.data().len() / 4];
    let mut forest = MergeForest::new();
    let mut merges = 0usize;

    for y in 0..pm.height() {
        for x in 0..pm.width() {
            let Some(addr) = pm.address(x, y) else {
                continue;
            };
            if pm.pixel_at(addr).is_none_or(Color::is_white) {
                continue;
            }

            let neighbors = CAUSAL_NEIGHBORS.map(|(dx, dy)| {
                let nx = x.checked_add_signed(dx)?;
                let ny = y.checked_add_signed(dy)?;
                pm.address(nx, ny).and_then(|a| plane[a / 4])
            });

            let label = match neighbors.iter().flatten().next() {
                None => forest.make_set(),
                Some(&chosen) => {
                    for &other in neighbors.iter().flatten() {
                        if other != chosen && forest.union(chosen, other) {
                            merges += 1;
                        }
                    }
                    chosen
                }
            };
            plane[addr / 4] = Some(label);
        }
    }

    forest.resolve();
    let roots = forest.roots();
    log::debug!(
        "labeling: {} provisional labels, {} merges, {} regions",
        forest.len(),
        merges,
        roots.len()
    );

    let colors = palette(roots.len(), options.coloring)?;
    // dense index of each root
    let mut root_color = vec![Color::WHITE; forest.len()];
    for (root, &color) in roots.iter().zip(&colors) {
        root_color[*root as usize] = color;
    }

    for (slot, label) in plane.iter().enumerate() {
        if let Some(label) = label {
            let color = root_color[forest.parent(*label) as usize];
            pm.set_pixel_at(slot * 4, color);
        }
    }

    Ok(colors)
}

/// Label a copy of `pix` and return it with the region colors.
pub fn label_copy(pix: &Pix, options: &LabelOptions) -> RegionResult<(Pix, Vec<Color>)> {
    let mut pm = pix.to_mut();
    let colors = label_regions(&mut pm, options)?;
    Ok((pm.into(), colors))
}

/// Count the foreground regions of `pix` without keeping the labeling.
pub fn count_regions(pix: &Pix) -> RegionResult<usize> {
    label_copy(pix, &LabelOptions::default()).map(|(_, colors)| colors.len())
}
