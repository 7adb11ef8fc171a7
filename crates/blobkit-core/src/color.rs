//! Colors and channel layout for 32-bit BGRA pixels.
//!
//! # Pixel format
//!
//! Pixels are stored as four bytes in the order B, G, R, A. Only the three
//! color channels take part in comparisons; alpha is carried through
//! untouched.

/// Blue channel byte offset within a pixel
pub const BLUE: usize = 0;
/// Green channel byte offset
pub const GREEN: usize = 1;
/// Red channel byte offset
pub const RED: usize = 2;
/// Alpha channel byte offset
pub const ALPHA: usize = 3;

/// Bytes per pixel
pub const BYTES_PER_PIXEL: usize = 4;

/// An RGB color.
///
/// Pure white is background everywhere; pure black marks foreground pixels
/// that have not been assigned a region color yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Background sentinel
    pub const WHITE: Color = Color::new(255, 255, 255);
    /// Unlabeled-foreground sentinel
    pub const BLACK: Color = Color::new(0, 0, 0);
    /// Outline color used by [`crate::PixMut::draw_rectangle`]
    pub const RED: Color = Color::new(255, 0, 0);

    /// Create a color from its red, green and blue components.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a gray color with all channels equal.
    #[inline]
    pub const fn gray(v: u8) -> Self {
        Self { r: v, g: v, b: v }
    }

    /// Read a color from the first three bytes of a BGRA pixel.
    #[inline]
    pub fn from_bgr(bytes: &[u8]) -> Self {
        Self {
            r: bytes[RED],
            g: bytes[GREEN],
            b: bytes[BLUE],
        }
    }

    /// Write this color into the first three bytes of a BGRA pixel.
    #[inline]
    pub fn write_bgr(self, bytes: &mut [u8]) {
        bytes[BLUE] = self.b;
        bytes[GREEN] = self.g;
        bytes[RED] = self.r;
    }

    /// True for the background sentinel.
    #[inline]
    pub fn is_white(self) -> bool {
        self == Self::WHITE
    }

    /// True for the unlabeled-foreground sentinel.
    #[inline]
    pub fn is_black(self) -> bool {
        self == Self::BLACK
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}
