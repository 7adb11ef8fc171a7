//! Pixel access functions
//!
//! Pixels can be reached by (column, row) coordinates or by raw byte
//! address. Address arithmetic is deliberately plain: stepping one pixel
//! left from column 0 lands on the last pixel of the previous row, and
//! stepping into row padding or outside the buffer yields `None`.

use super::{Pix, PixData, PixMut};
use crate::color::{BYTES_PER_PIXEL, Color};
use crate::error::{Error, Result};

impl PixData {
    #[inline]
    fn row_bytes(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    fn address(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.stride + x as usize * BYTES_PER_PIXEL)
    }

    fn is_pixel_address(&self, addr: usize) -> bool {
        addr % BYTES_PER_PIXEL == 0 && addr < self.data.len() && addr % self.stride < self.row_bytes()
    }

    fn coords(&self, addr: usize) -> Option<(u32, u32)> {
        if !self.is_pixel_address(addr) {
            return None;
        }
        let y = addr / self.stride;
        let x = (addr % self.stride) / BYTES_PER_PIXEL;
        Some((x as u32, y as u32))
    }

    fn offset_address(&self, addr: usize, delta: isize) -> Option<usize> {
        addr.checked_add_signed(delta)
            .filter(|&a| a < self.data.len())
    }

    fn pixel_at(&self, addr: usize) -> Option<Color> {
        if !self.is_pixel_address(addr) {
            return None;
        }
        Some(Color::from_bgr(&self.data[addr..addr + BYTES_PER_PIXEL]))
    }
}

impl Pix {
    /// Byte address of the pixel at (x, y), or `None` outside the image.
    #[inline]
    pub fn address(&self, x: u32, y: u32) -> Option<usize> {
        self.inner.address(x, y)
    }

    /// Column and row of a pixel address.
    ///
    /// Returns `None` for addresses that are not on a pixel boundary, lie
    /// in row padding, or are past the end of the buffer.
    pub fn coords(&self, addr: usize) -> Option<(u32, u32)> {
        self.inner.coords(addr)
    }

    /// Check whether `addr` is the first byte of a pixel.
    pub fn is_pixel_address(&self, addr: usize) -> bool {
        self.inner.is_pixel_address(addr)
    }

    /// Apply a signed byte offset to an address.
    ///
    /// Returns `None` if the result is negative or past the end of the
    /// buffer. The result may still be in row padding; [`Pix::pixel_at`]
    /// rejects those.
    pub fn offset_address(&self, addr: usize, delta: isize) -> Option<usize> {
        self.inner.offset_address(addr, delta)
    }

    /// Color of the pixel starting at `addr`.
    pub fn pixel_at(&self, addr: usize) -> Option<Color> {
        self.inner.pixel_at(addr)
    }

    /// Color of the pixel at (x, y).
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<Color> {
        self.inner.address(x, y).and_then(|a| self.inner.pixel_at(a))
    }

    /// Alpha byte of the pixel at (x, y).
    pub fn get_alpha(&self, x: u32, y: u32) -> Option<u8> {
        self.inner
            .address(x, y)
            .map(|a| self.inner.data[a + crate::color::ALPHA])
    }

    /// Iterate over the addresses of every pixel in raster order.
    pub fn pixel_addresses(&self) -> impl Iterator<Item = usize> + '_ {
        let stride = self.inner.stride;
        let row_bytes = self.inner.row_bytes();
        (0..self.inner.height as usize).flat_map(move |y| {
            (0..row_bytes)
                .step_by(BYTES_PER_PIXEL)
                .map(move |x| y * stride + x)
        })
    }
}

impl PixMut {
    /// Byte address of the pixel at (x, y), or `None` outside the image.
    #[inline]
    pub fn address(&self, x: u32, y: u32) -> Option<usize> {
        self.inner.address(x, y)
    }

    /// Column and row of a pixel address.
    pub fn coords(&self, addr: usize) -> Option<(u32, u32)> {
        self.inner.coords(addr)
    }

    /// Check whether `addr` is the first byte of a pixel.
    pub fn is_pixel_address(&self, addr: usize) -> bool {
        self.inner.is_pixel_address(addr)
    }

    /// Apply a signed byte offset to an address.
    pub fn offset_address(&self, addr: usize, delta: isize) -> Option<usize> {
        self.inner.offset_address(addr, delta)
    }

    /// Color of the pixel starting at `addr`.
    pub fn pixel_at(&self, addr: usize) -> Option<Color> {
        self.inner.pixel_at(addr)
    }

    /// Color of the pixel at (x, y).
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<Color> {
        self.inner.address(x, y).and_then(|a| self.inner.pixel_at(a))
    }

    /// Alpha byte of the pixel at (x, y).
    pub fn get_alpha(&self, x: u32, y: u32) -> Option<u8> {
        self.inner
            .address(x, y)
            .map(|a| self.inner.data[a + crate::color::ALPHA])
    }

    /// Overwrite the color of the pixel at `addr`, preserving alpha.
    ///
    /// Returns `false` and writes nothing if `addr` is not a pixel address.
    pub fn set_pixel_at(&mut self, addr: usize, color: Color) -> bool {
        if !self.inner.is_pixel_address(addr) {
            return false;
        }
        color.write_bgr(&mut self.inner.data[addr..addr + BYTES_PER_PIXEL]);
        true
    }

    /// Overwrite the color of the pixel at (x, y), preserving alpha.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RectOutOfBounds`] if (x, y) is outside the image.
    pub fn set_rgb(&mut self, x: u32, y: u32, color: Color) -> Result<()> {
        let addr = self.inner.address(x, y).ok_or(Error::RectOutOfBounds {
            x: x as i32,
            y: y as i32,
            w: 1,
            h: 1,
            width: self.inner.width,
            height: self.inner.height,
        })?;
        self.set_pixel_at(addr, color);
        Ok(())
    }
}
