//! Rectangle operations for images
//!
//! Cropping a sub-region into a new buffer, blanking a rectangle in place,
//! and locating the extent of a single color.

use super::{Pix, PixMut};
use crate::Box;
use crate::color::{BYTES_PER_PIXEL, Color};
use crate::error::{Error, Result};

/// Check that `rect` is non-empty and lies fully inside a `width` x `height` image.
fn check_rect(rect: &Box, width: u32, height: u32) -> Result<()> {
    let inside = rect.x >= 0
        && rect.y >= 0
        && rect.w > 0
        && rect.h > 0
        && rect.right() as i64 <= width as i64
        && rect.bottom() as i64 <= height as i64;
    if inside {
        Ok(())
    } else {
        Err(Error::RectOutOfBounds {
            x: rect.x,
            y: rect.y,
            w: rect.w,
            h: rect.h,
            width,
            height,
        })
    }
}

impl Pix {
    /// Extract a rectangular sub-region into a new buffer.
    ///
    /// The output has a tight stride of `4 * rect.w`; source padding is
    /// dropped. Alpha bytes are copied with the colors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RectOutOfBounds`] if the rectangle is empty or not
    /// fully inside the image.
    pub fn crop(&self, rect: &Box) -> Result<Pix> {
        check_rect(rect, self.width(), self.height())?;
        let row_bytes = rect.w as usize * BYTES_PER_PIXEL;
        let mut data = Vec::with_capacity(row_bytes * rect.h as usize);
        for y in rect.y..rect.bottom() {
            let start = y as usize * self.stride() + rect.x as usize * BYTES_PER_PIXEL;
            data.extend_from_slice(&self.data()[start..start + row_bytes]);
        }
        Pix::from_raw_with_format(rect.w as u32, rect.h as u32, row_bytes, self.format(), data)
    }

    /// Inclusive bounding box of every pixel with exactly `color`.
    ///
    /// Returns `None` when the color does not occur.
    pub fn bounding_box_of_color(&self, color: Color) -> Option<Box> {
        let mut extent: Option<(u32, u32, u32, u32)> = None;
        for y in 0..self.height() {
            for (x, px) in self.row(y).chunks_exact(BYTES_PER_PIXEL).enumerate() {
                if Color::from_bgr(px) != color {
                    continue;
                }
                let x = x as u32;
                extent = Some(match extent {
                    None => (x, y, x, y),
                    Some((x0, y0, x1, y1)) => (x0.min(x), y0, x1.max(x), y1.max(y)),
                });
            }
        }
        extent.map(|(x0, y0, x1, y1)| {
            Box::from_inclusive_corners(x0 as i32, y0 as i32, x1 as i32, y1 as i32)
        })
    }
}

impl PixMut {
    /// Zero every byte (alpha included) of the pixels inside `rect`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RectOutOfBounds`] if the rectangle is empty or not
    /// fully inside the image.
    pub fn blank_rect(&mut self, rect: &Box) -> Result<()> {
        check_rect(rect, self.width(), self.height())?;
        let row_bytes = rect.w as usize * BYTES_PER_PIXEL;
        let stride = self.stride();
        for y in rect.y..rect.bottom() {
            let start = y as usize * stride + rect.x as usize * BYTES_PER_PIXEL;
            self.data_mut()[start..start + row_bytes].fill(0);
        }
        Ok(())
    }
}
