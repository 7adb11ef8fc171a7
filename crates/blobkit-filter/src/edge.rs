//! Gradient estimation on gray images
//!
//! Both estimators encode their result in the pixel itself: the blue byte
//! holds the gradient magnitude, the green byte the orientation (degrees
//! plus 180, scaled to 0..=255) and the red byte is set to 255. Neighbors
//! outside the image read as level 0, so the image frame always carries a
//! response against a bright background.

use blobkit_core::color::{BLUE, BYTES_PER_PIXEL};
use blobkit_core::{Color, PixMut};

/// Components closer to zero than this are pushed out to +/- this value
const DEAD_ZONE: f64 = 1e-4;

/// Divisor applied to the accumulated vector sum
const VECTOR_SUM_NORM: f64 = 24.0;

/// Vector sums below this are treated as no response
const VECTOR_SUM_FLOOR: f64 = 0.1;

const NEIGHBORS_8: [(i64, i64); 8] = [
    (-1, -1),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 1),
    (-1, 0),
    (1, 0),
];

fn neighbor(src: &PixMut, x: i64, y: i64) -> Option<Color> {
    if x < 0 || y < 0 {
        return None;
    }
    src.get_rgb(x as u32, y as u32)
}

fn level(src: &PixMut, x: i64, y: i64) -> f64 {
    neighbor(src, x, y).map_or(0.0, |c| f64::from(c.b))
}

fn push_out_of_dead_zone(v: f64) -> f64 {
    if (0.0..DEAD_ZONE).contains(&v) {
        DEAD_ZONE
    } else if v < 0.0 && v > -DEAD_ZONE {
        -DEAD_ZONE
    } else {
        v
    }
}

/// Map an orientation in radians to its byte encoding.
pub fn orientation_byte(radians: f64) -> u8 {
    let degrees = (radians.to_degrees() + 180.0).round_ties_even();
    ((255.0 / 360.0) * degrees).round_ties_even() as u8
}

/// Degrees encoded by an orientation byte.
#[inline]
pub fn orientation_degrees(byte: u8) -> f64 {
    f64::from(byte) * (360.0 / 255.0)
}

fn gradient_color(magnitude: u8, orientation: u8) -> Color {
    Color::new(255, orientation, magnitude)
}

/// Estimate the gradient of a gray image from 3x3 central differences.
///
/// The gray level is read from the blue byte of a snapshot taken before
/// any pixel is written. For each pixel three vertical differences
/// (left, middle and right columns, top minus bottom) and three horizontal
/// differences (top, middle and bottom rows, right minus left) are halved
/// and averaged. Pixels whose rounded magnitude is 0 become black.
pub fn finite_difference_gradient(pix: &mut PixMut) {
    let src = pix.clone();
    let (w, h) = (i64::from(pix.width()), i64::from(pix.height()));
    let mut edges = 0usize;
    for y in 0..h {
        for x in 0..w {
            let at = |dx: i64, dy: i64| level(&src, x + dx, y + dy);
            let dy_l = (at(-1, -1) - at(-1, 1)) / 2.0;
            let dy_m = (at(0, -1) - at(0, 1)) / 2.0;
            let dy_r = (at(1, -1) - at(1, 1)) / 2.0;
            let dx_t = (at(1, -1) - at(-1, -1)) / 2.0;
            let dx_m = (at(1, 0) - at(-1, 0)) / 2.0;
            let dx_b = (at(1, 1) - at(-1, 1)) / 2.0;

            let fy = push_out_of_dead_zone((dy_l + dy_m + dy_r) / 3.0);
            let fx = push_out_of_dead_zone((dx_t + dx_m + dx_b) / 3.0);

            let magnitude = fx.hypot(fy).round_ties_even().min(255.0) as u8;
            let color = if magnitude > 0 {
                edges += 1;
                gradient_color(magnitude, orientation_byte(fy.atan2(fx)))
            } else {
                Color::BLACK
            };
            if let Some(addr) = pix.address(x as u32, y as u32) {
                pix.set_pixel_at(addr, color);
            }
        }
    }
    log::debug!("finite difference gradient: {edges} responding pixels");
}

/// Refine a gradient image by summing aligned neighbor vectors.
///
/// Each pixel's magnitude `I1` and orientation `A1` are combined with its
/// eight neighbors as `I1 + sum(I1 * I2 * cos(A2 - A1))`. Sums below 0.1
/// become 0, the rest are divided by 24, then clamped to 0..=255. The
/// orientation byte is kept and red is set to 255.
pub fn vector_sum_gradient(pix: &mut PixMut) {
    let src = pix.clone();
    let (w, h) = (i64::from(pix.width()), i64::from(pix.height()));
    for y in 0..h {
        for x in 0..w {
            let Some(center) = neighbor(&src, x, y) else {
                continue;
            };
            let i1 = f64::from(center.b);
            let a1 = orientation_degrees(center.g);
            let total = NEIGHBORS_8
                .iter()
                .filter_map(|&(dx, dy)| neighbor(&src, x + dx, y + dy))
                .fold(i1, |acc, n| {
                    let a2 = orientation_degrees(n.g);
                    acc + i1 * f64::from(n.b) * (a2 - a1).to_radians().cos()
                });
            let scaled = if total < VECTOR_SUM_FLOOR {
                0.0
            } else {
                total / VECTOR_SUM_NORM
            };
            let magnitude = scaled.clamp(0.0, 255.0).round_ties_even() as u8;
            if let Some(addr) = pix.address(x as u32, y as u32) {
                pix.set_pixel_at(addr, gradient_color(magnitude, center.g));
            }
        }
    }
}

/// Copy the magnitude byte into all three color channels.
pub fn grey_collapse(pix: &mut PixMut) {
    for y in 0..pix.height() {
        for px in pix.row_mut(y).chunks_exact_mut(BYTES_PER_PIXEL) {
            Color::gray(px[BLUE]).write_bgr(px);
        }
    }
}
