//! Geometric operations

use super::{Pix, PixData};
use crate::color::BYTES_PER_PIXEL;
use std::sync::Arc;

impl Pix {
    /// Rotate the image by 180 degrees.
    ///
    /// Whole pixels (alpha included) move; the output has a tight stride.
    pub fn rotate_180(&self) -> Pix {
        let (w, h) = (self.width(), self.height());
        let row_bytes = w as usize * BYTES_PER_PIXEL;
        let mut data = Vec::with_capacity(row_bytes * h as usize);
        for y in (0..h).rev() {
            for px in self.row(y).chunks_exact(BYTES_PER_PIXEL).rev() {
                data.extend_from_slice(px);
            }
        }
        Pix {
            inner: Arc::new(PixData {
                width: w,
                height: h,
                stride: row_bytes,
                format: self.format(),
                data,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Color, Pix};

    #[test]
    fn test_rotate_180() {
        let mut pm = Pix::new_filled(3, 2, Color::WHITE).unwrap().to_mut();
        pm.set_rgb(0, 0, Color::new(1, 2, 3)).unwrap();
        let pix: Pix = pm.into();
        let rot = pix.rotate_180();
        assert_eq!(rot.get_rgb(2, 1), Some(Color::new(1, 2, 3)));
        assert_eq!(rot.get_rgb(0, 0), Some(Color::WHITE));
        assert_eq!(rot.rotate_180().data(), pix.data());
    }
}
