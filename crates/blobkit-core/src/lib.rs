//! blobkit Core - Basic data structures for blob analysis
//!
//! This crate provides the fundamental data structures used throughout
//! blobkit:
//!
//! - [`Pix`] / [`PixMut`] - Packed BGRA pixel buffer (immutable / mutable)
//! - [`Color`] - RGB color with the white/black sentinels
//! - [`Box`] - Integer rectangle used for crops and bounding boxes
//!
//! # Addressing
//!
//! A pixel lives at byte address `row * stride + 4 * column`. Address-based
//! lookups never fail loudly: an address outside the buffer, inside row
//! padding, or not on a pixel boundary simply yields `None`.

pub mod box_;
pub mod color;
pub mod error;
pub mod pix;

pub use box_::Box;
pub use color::Color;
pub use error::{Error, Result};
pub use pix::compare::{count_differing_pixels, exclusive_or};
pub use pix::{Pix, PixMut, PixelFormat};
