//! PIX - The packed BGRA pixel buffer
//!
//! The `Pix` structure is the image type every blobkit algorithm works on.
//!
//! # Pixel layout
//!
//! - Image data is a flat byte array of `height * stride` bytes
//! - Each pixel takes four bytes in (B, G, R, A) order
//! - Every row starts at a multiple of `stride`; bytes past `4 * width`
//!   in a row are padding and never hold a pixel
//!
//! # Ownership model
//!
//! `Pix` uses `Arc` for efficient cloning (shared ownership).
//! To modify pixel data, convert to `PixMut` via [`Pix::try_into_mut`]
//! or [`Pix::to_mut`], then convert back with `Into<Pix>`.

mod access;
mod clip;
pub mod compare;
mod convert;
mod graphics;
mod ops;

use crate::color::{BYTES_PER_PIXEL, Color};
use crate::error::{Error, Result};
use std::sync::Arc;

/// Interpretation of the fourth byte of each pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PixelFormat {
    /// 32 bpp, alpha byte is padding
    #[default]
    Bgr32,
    /// 32 bpp with a meaningful alpha byte
    Bgra32,
}

impl PixelFormat {
    /// Bits per pixel (always 32)
    pub fn bits_per_pixel(self) -> u32 {
        32
    }

    /// Whether the alpha byte carries data
    pub fn has_alpha(self) -> bool {
        matches!(self, PixelFormat::Bgra32)
    }
}

/// Internal buffer storage
#[derive(Debug, Clone)]
struct PixData {
    width: u32,
    height: u32,
    stride: usize,
    format: PixelFormat,
    data: Vec<u8>,
}

impl PixData {
    fn validate(width: u32, height: u32, stride: usize, len: usize) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let row_bytes = width as usize * BYTES_PER_PIXEL;
        if stride < row_bytes || stride % BYTES_PER_PIXEL != 0 {
            return Err(Error::InvalidStride {
                stride,
                width: width as usize,
            });
        }
        let expected = stride * height as usize;
        if len != expected {
            return Err(Error::BufferSizeMismatch {
                expected,
                actual: len,
            });
        }
        Ok(())
    }
}

/// Immutable, cheaply cloneable pixel buffer
///
/// # Examples
///
/// ```
/// use blobkit_core::{Color, Pix};
///
/// let pix = Pix::new_filled(4, 3, Color::WHITE).unwrap();
/// assert_eq!(pix.stride(), 16);
/// assert_eq!(pix.get_rgb(3, 2), Some(Color::WHITE));
/// ```
#[derive(Debug, Clone)]
pub struct Pix {
    inner: Arc<PixData>,
}

impl Pix {
    /// Create a new zero-filled buffer with a tight stride of `4 * width`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let stride = width as usize * BYTES_PER_PIXEL;
        let data = vec![0u8; stride * height as usize];
        Self::from_raw(width, height, stride, data)
    }

    /// Create a buffer with every pixel set to `color` and alpha 255.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new_filled(width: u32, height: u32, color: Color) -> Result<Self> {
        let mut pm = Self::new(width, height)?.to_mut();
        pm.fill(color);
        Ok(pm.into())
    }

    /// Wrap caller-supplied bytes.
    ///
    /// # Arguments
    ///
    /// * `width` - Width in pixels (must be > 0)
    /// * `height` - Height in pixels (must be > 0)
    /// * `stride` - Row pitch in bytes; at least `4 * width` and a multiple of 4
    /// * `data` - Exactly `height * stride` bytes
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`], [`Error::InvalidStride`] or
    /// [`Error::BufferSizeMismatch`] when the geometry is inconsistent.
    pub fn from_raw(width: u32, height: u32, stride: usize, data: Vec<u8>) -> Result<Self> {
        Self::from_raw_with_format(width, height, stride, PixelFormat::Bgr32, data)
    }

    /// Wrap caller-supplied bytes with an explicit pixel format.
    pub fn from_raw_with_format(
        width: u32,
        height: u32,
        stride: usize,
        format: PixelFormat,
        data: Vec<u8>,
    ) -> Result<Self> {
        PixData::validate(width, height, stride, data.len())?;
        Ok(Pix {
            inner: Arc::new(PixData {
                width,
                height,
                stride,
                format,
                data,
            }),
        })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the row pitch in bytes.
    #[inline]
    pub fn stride(&self) -> usize {
        self.inner.stride
    }

    /// Get the pixel format.
    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.inner.format
    }

    /// Get the raw bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get the pixel bytes of row `y` (padding excluded).
    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.inner.stride;
        &self.inner.data[start..start + self.inner.width as usize * BYTES_PER_PIXEL]
    }

    /// Number of `Pix` handles sharing this buffer.
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Check whether two images have the same width and height.
    pub fn sizes_equal(&self, other: &Pix) -> bool {
        self.width() == other.width() && self.height() == other.height()
    }

    /// Create a deep copy that shares nothing with `self`.
    pub fn deep_clone(&self) -> Self {
        Pix {
            inner: Arc::new(self.inner.as_ref().clone()),
        }
    }

    /// Try to get mutable access to the image data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<PixMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(PixMut { inner: data }),
            Err(arc) => Err(Pix { inner: arc }),
        }
    }

    /// Create a mutable copy of this PIX.
    pub fn to_mut(&self) -> PixMut {
        PixMut {
            inner: self.inner.as_ref().clone(),
        }
    }
}

/// Mutable pixel buffer
///
/// Allows modification of image data. Convert back to an immutable
/// [`Pix`] using `Into<Pix>`.
#[derive(Debug, Clone)]
pub struct PixMut {
    inner: PixData,
}

impl PixMut {
    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the row pitch in bytes.
    #[inline]
    pub fn stride(&self) -> usize {
        self.inner.stride
    }

    /// Get the pixel format.
    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.inner.format
    }

    /// Get the raw bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get mutable access to the raw bytes.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.inner.data
    }

    /// Get the pixel bytes of row `y` (padding excluded).
    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.inner.stride;
        &self.inner.data[start..start + self.inner.width as usize * BYTES_PER_PIXEL]
    }

    /// Get the pixel bytes of row `y` (padding excluded), mutably.
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let start = y as usize * self.inner.stride;
        let end = start + self.inner.width as usize * BYTES_PER_PIXEL;
        &mut self.inner.data[start..end]
    }

    /// Set every pixel to `color` with alpha 255. Padding is untouched.
    pub fn fill(&mut self, color: Color) {
        for y in 0..self.height() {
            for px in self.row_mut(y).chunks_exact_mut(BYTES_PER_PIXEL) {
                color.write_bgr(px);
                px[crate::color::ALPHA] = 255;
            }
        }
    }

    /// Set every pixel's color, preserving alpha.
    pub fn set_all_colors(&mut self, color: Color) {
        for y in 0..self.height() {
            for px in self.row_mut(y).chunks_exact_mut(BYTES_PER_PIXEL) {
                color.write_bgr(px);
            }
        }
    }
}

impl From<PixMut> for Pix {
    fn from(pix_mut: PixMut) -> Self {
        Pix {
            inner: Arc::new(pix_mut.inner),
        }
    }
}
