//! Point operations on 32 bpp images
//!
//! Gray averaging, binarization, border painting and color isolation. All
//! of these write the three color channels and leave alpha alone.

use super::{Pix, PixMut};
use crate::color::{BLUE, BYTES_PER_PIXEL, Color};

impl PixMut {
    /// Replace each pixel with the integer mean `(B + G + R) / 3` in all
    /// three channels.
    pub fn grayscale(&mut self) {
        for y in 0..self.height() {
            for px in self.row_mut(y).chunks_exact_mut(BYTES_PER_PIXEL) {
                let sum = px[0] as u32 + px[1] as u32 + px[2] as u32;
                Color::gray((sum / 3) as u8).write_bgr(px);
            }
        }
    }

    /// Binarize on the blue channel.
    ///
    /// Pixels whose blue byte is `>= threshold` become background (white),
    /// the rest become object (black). With `invert` the two values swap.
    pub fn threshold(&mut self, threshold: u8, invert: bool) {
        let (object, background) = if invert {
            (Color::WHITE, Color::BLACK)
        } else {
            (Color::BLACK, Color::WHITE)
        };
        for y in 0..self.height() {
            for px in self.row_mut(y).chunks_exact_mut(BYTES_PER_PIXEL) {
                let c = if px[BLUE] >= threshold { background } else { object };
                c.write_bgr(px);
            }
        }
    }

    /// Paint a frame around the image in white or black.
    ///
    /// Rows `0..=thickness` and `height - thickness..height` are painted,
    /// and likewise for columns, so the top and left bands are one pixel
    /// wider than the bottom and right bands.
    pub fn crop_border(&mut self, thickness: u32, white: bool) {
        let color = if white { Color::WHITE } else { Color::BLACK };
        let (w, h) = (self.width(), self.height());
        for y in 0..h {
            let row_in_band = y <= thickness || y >= h.saturating_sub(thickness);
            for (x, px) in self.row_mut(y).chunks_exact_mut(BYTES_PER_PIXEL).enumerate() {
                let x = x as u32;
                if row_in_band || x <= thickness || x >= w.saturating_sub(thickness) {
                    color.write_bgr(px);
                }
            }
        }
    }

    /// Blacken every pixel that is neither `color` nor white.
    pub fn isolate_color_keep_white(&mut self, color: Color) {
        for y in 0..self.height() {
            for px in self.row_mut(y).chunks_exact_mut(BYTES_PER_PIXEL) {
                let c = Color::from_bgr(px);
                if c != color && !c.is_white() {
                    Color::BLACK.write_bgr(px);
                }
            }
        }
    }
}

impl Pix {
    /// Copy of the image with every pixel other than `color` turned white.
    pub fn isolate_color(&self, color: Color) -> Pix {
        let mut pm = self.to_mut();
        for y in 0..pm.height() {
            for px in pm.row_mut(y).chunks_exact_mut(BYTES_PER_PIXEL) {
                if Color::from_bgr(px) != color {
                    Color::WHITE.write_bgr(px);
                }
            }
        }
        pm.into()
    }
}
