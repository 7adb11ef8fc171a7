//! Region selection
//!
//! Helpers that pick regions of a labeled image by position or size, and
//! normalize a mask's orientation by where its mass lies.

use blobkit_core::color::BYTES_PER_PIXEL;
use blobkit_core::{Color, Pix};
use std::collections::HashMap;

/// Most frequent region color along the middle row.
///
/// Looks at row `height / 2` and counts every color that is neither white
/// nor black. Ties go to the color seen first from the left. Returns `None`
/// if the row holds only white and black.
pub fn dominant_center_row_color(pix: &Pix) -> Option<Color> {
    let row = pix.row(pix.height() / 2);
    let mut counts: Vec<(Color, usize)> = Vec::new();
    for px in row.chunks_exact(BYTES_PER_PIXEL) {
        let c = Color::from_bgr(px);
        if c.is_white() || c.is_black() {
            continue;
        }
        match counts.iter_mut().find(|(seen, _)| *seen == c) {
            Some((_, n)) => *n += 1,
            None => counts.push((c, 1)),
        }
    }
    // max_by_key keeps the last maximum, so scan in reverse for the first
    counts
        .into_iter()
        .rev()
        .max_by_key(|&(_, n)| n)
        .map(|(c, _)| c)
}

/// Rotate `pix` by 180 degrees if `color` is top-heavy.
///
/// Pixels of `color` in rows above `height / 2` count as top, the rest as
/// bottom. The image is rotated only when the top count is strictly larger.
///
/// # Returns
///
/// The (possibly rotated) image and whether it was rotated.
pub fn orient_by_mass(pix: &Pix, color: Color) -> (Pix, bool) {
    let half = pix.height() as f64 / 2.0;
    let (mut top, mut bottom) = (0usize, 0usize);
    for y in 0..pix.height() {
        let n = pix
            .row(y)
            .chunks_exact(BYTES_PER_PIXEL)
            .filter(|px| Color::from_bgr(px) == color)
            .count();
        if (y as f64) < half {
            top += n;
        } else {
            bottom += n;
        }
    }
    if top > bottom {
        log::debug!("orient: {} top vs {} bottom pixels, rotating", top, bottom);
        (pix.rotate_180(), true)
    } else {
        (pix.clone(), false)
    }
}

/// Pixel count of each color in `colors`.
pub fn region_areas(pix: &Pix, colors: &[Color]) -> HashMap<Color, usize> {
    let mut areas: HashMap<Color, usize> = colors.iter().map(|&c| (c, 0)).collect();
    for y in 0..pix.height() {
        for px in pix.row(y).chunks_exact(BYTES_PER_PIXEL) {
            if let Some(n) = areas.get_mut(&Color::from_bgr(px)) {
                *n += 1;
            }
        }
    }
    areas
}

/// Keep the colors whose regions have at least `min_area` pixels.
///
/// The input order is preserved.
pub fn select_by_min_area(pix: &Pix, colors: &[Color], min_area: usize) -> Vec<Color> {
    let areas = region_areas(pix, colors);
    colors
        .iter()
        .copied()
        .filter(|c| areas.get(c).is_some_and(|&n| n >= min_area))
        .collect()
}

/// Color of the region with the most pixels.
///
/// Ties go to the earlier color in `colors`.
pub fn largest_region(pix: &Pix, colors: &[Color]) -> Option<Color> {
    let areas = region_areas(pix, colors);
    colors
        .iter()
        .rev()
        .max_by_key(|c| areas.get(*c).copied().unwrap_or(0))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use blobkit_test::synth::pix_from_rows;

    const A: Color = Color::new(10, 0, 0);
    const B: Color = Color::new(0, 10, 0);

    fn palette() -> [(char, Color); 2] {
        [('a', A), ('b', B)]
    }

    #[test]
    fn test_dominant_center_row_color() {
        let pix = pix_from_rows(&["aaaaa", "#abb.", "....."], &palette()).unwrap();
        assert_eq!(dominant_center_row_color(&pix), Some(B));
        let tie = pix_from_rows(&[".....", "#ab.#", "....."], &palette()).unwrap();
        assert_eq!(dominant_center_row_color(&tie), Some(A));
        let none = pix_from_rows(&["aa", "#.", "bb"], &palette()).unwrap();
        assert_eq!(dominant_center_row_color(&none), None);
    }

    #[test]
    fn test_orient_by_mass() {
        let top_heavy = pix_from_rows(&["aaa", "a..", "...", "..."], &palette()).unwrap();
        let (rotated, flipped) = orient_by_mass(&top_heavy, A);
        assert!(flipped);
        assert_eq!(rotated.get_rgb(2, 3), Some(A));
        assert_eq!(rotated.get_rgb(0, 0), Some(Color::WHITE));

        let balanced = pix_from_rows(&["a..", "...", "...", "a.."], &palette()).unwrap();
        let (same, flipped) = orient_by_mass(&balanced, A);
        assert!(!flipped);
        assert_eq!(same.data(), balanced.data());
    }

    #[test]
    fn test_area_selection() {
        let pix = pix_from_rows(&["aab", "aa.", "..b"], &palette()).unwrap();
        assert_eq!(select_by_min_area(&pix, &[A, B], 3), vec![A]);
        assert_eq!(select_by_min_area(&pix, &[B, A], 1), vec![B, A]);
        assert_eq!(largest_region(&pix, &[B, A]), Some(A));
        assert_eq!(largest_region(&pix, &[]), None);
    }
}
