//! Box - Rectangle regions
//!
//! Integer rectangles used for crops, color bounding boxes and
//! window-scan results.

use crate::error::{Error, Result};

/// A rectangle region
///
/// A small `Copy` type; `w` and `h` are in pixels, and `right()`/`bottom()`
/// are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Box {
    /// Left x coordinate
    pub x: i32,
    /// Top y coordinate
    pub y: i32,
    /// Width
    pub w: i32,
    /// Height
    pub h: i32,
}

impl Box {
    /// Create a new box
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is negative.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Result<Self> {
        if w < 0 || h < 0 {
            return Err(Error::InvalidParameter(format!(
                "box dimensions must be non-negative: w={}, h={}",
                w, h
            )));
        }
        Ok(Self { x, y, w, h })
    }

    /// Create a box without validation
    pub const fn new_unchecked(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Create the smallest box holding two inclusive corner pixels
    pub fn from_inclusive_corners(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        let (x, w) = if x1 <= x2 {
            (x1, x2 - x1 + 1)
        } else {
            (x2, x1 - x2 + 1)
        };
        let (y, h) = if y1 <= y2 {
            (y1, y2 - y1 + 1)
        } else {
            (y2, y1 - y2 + 1)
        };
        Self { x, y, w, h }
    }

    /// Get the right x coordinate (exclusive)
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Get the bottom y coordinate (exclusive)
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Get the area
    #[inline]
    pub fn area(&self) -> i64 {
        self.w as i64 * self.h as i64
    }

    /// Check if the box is empty (zero area)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Check if a point is inside the box
    #[inline]
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Check if this box contains another box
    pub fn contains_box(&self, other: &Box) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Check if this box overlaps with another
    pub fn overlaps(&self, other: &Box) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Get the intersection of two boxes, if they overlap
    pub fn intersect(&self, other: &Box) -> Option<Box> {
        if !self.overlaps(other) {
            return None;
        }
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Some(Box::new_unchecked(x, y, right - x, bottom - y))
    }

    /// Get the smallest box containing both boxes
    pub fn union(&self, other: &Box) -> Box {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Box::new_unchecked(x, y, right - x, bottom - y)
    }

    /// Check whether two boxes describe substantially the same region.
    ///
    /// True when one contains the other, or when their overlap covers more
    /// than half of either box.
    pub fn significantly_intersects(&self, other: &Box) -> bool {
        if self.contains_box(other) || other.contains_box(self) {
            return true;
        }
        match self.intersect(other) {
            Some(overlap) => {
                let shared = overlap.area() as f64;
                shared > 0.5 * self.area() as f64 || shared > 0.5 * other.area() as f64
            }
            None => false,
        }
    }
}
