//! Drawing on images

use super::PixMut;
use crate::Box;
use crate::color::Color;

impl PixMut {
    /// Draw a one-pixel red outline along the edges of `rect`.
    ///
    /// Parts of the outline outside the image are skipped.
    pub fn draw_rectangle(&mut self, rect: &Box) {
        self.draw_rectangle_color(rect, Color::RED);
    }

    /// Draw a one-pixel outline of `color` along the edges of `rect`.
    pub fn draw_rectangle_color(&mut self, rect: &Box, color: Color) {
        if rect.is_empty() {
            return;
        }
        let (left, top) = (rect.x, rect.y);
        let (right, bottom) = (rect.right() - 1, rect.bottom() - 1);
        for x in left..=right {
            self.plot(x, top, color);
            self.plot(x, bottom, color);
        }
        for y in top..=bottom {
            self.plot(left, y, color);
            self.plot(right, y, color);
        }
    }

    fn plot(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 {
            return;
        }
        if let Some(addr) = self.address(x as u32, y as u32) {
            self.set_pixel_at(addr, color);
        }
    }
}
