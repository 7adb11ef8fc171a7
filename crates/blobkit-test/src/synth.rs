//! Synthetic image builders
//!
//! Small images described in code or as ASCII art, so regression tests
//! need no image files.

use crate::error::{TestError, TestResult};
use blobkit_core::{Box, Color, Pix, PixMut};

/// All-white image of the given size.
pub fn white_image(width: u32, height: u32) -> TestResult<Pix> {
    Ok(Pix::new_filled(width, height, Color::WHITE)?)
}

/// Paint a filled rectangle, clipped to the image.
pub fn fill_rect(pm: &mut PixMut, rect: Box, color: Color) {
    for y in rect.y.max(0)..rect.bottom().min(pm.height() as i32) {
        for x in rect.x.max(0)..rect.right().min(pm.width() as i32) {
            if let Some(addr) = pm.address(x as u32, y as u32) {
                pm.set_pixel_at(addr, color);
            }
        }
    }
}

/// White image with the given rectangles painted on it, in order.
pub fn rects_on_white(width: u32, height: u32, rects: &[(Box, Color)]) -> TestResult<Pix> {
    let mut pm = white_image(width, height)?.to_mut();
    for &(rect, color) in rects {
        fill_rect(&mut pm, rect, color);
    }
    Ok(pm.into())
}

/// Build an image from ASCII rows.
///
/// `.` is white and `#` is black; any other character is looked up in
/// `palette`. All rows must have the same length.
pub fn pix_from_rows(rows: &[&str], palette: &[(char, Color)]) -> TestResult<Pix> {
    let height = rows.len();
    let width = rows.first().map_or(0, |r| r.chars().count());
    let mut pm = Pix::new(width as u32, height as u32)?.to_mut();
    for (y, row) in rows.iter().enumerate() {
        if row.chars().count() != width {
            return Err(TestError::BadPattern {
                row: y,
                message: format!("expected {} columns, got {}", width, row.chars().count()),
            });
        }
        for (x, ch) in row.chars().enumerate() {
            let color = match ch {
                '.' => Color::WHITE,
                '#' => Color::BLACK,
                other => palette
                    .iter()
                    .find(|(c, _)| *c == other)
                    .map(|&(_, color)| color)
                    .ok_or_else(|| TestError::BadPattern {
                        row: y,
                        message: format!("unknown symbol '{}'", other),
                    })?,
            };
            pm.set_rgb(x as u32, y as u32, color)?;
        }
    }
    Ok(pm.into())
}

/// Black-on-white mask from ASCII rows (`#` foreground, `.` background).
pub fn mask_from_rows(rows: &[&str]) -> TestResult<Pix> {
    pix_from_rows(rows, &[])
}

/// Copy of `pix` whose rows carry `extra_pixels` of padding.
///
/// Padding bytes are filled with `pad_byte` so tests can catch code that
/// reads them as pixels.
pub fn with_padding(pix: &Pix, extra_pixels: usize, pad_byte: u8) -> TestResult<Pix> {
    let row_bytes = pix.width() as usize * 4;
    let stride = row_bytes + extra_pixels * 4;
    let mut data = Vec::with_capacity(stride * pix.height() as usize);
    for y in 0..pix.height() {
        data.extend_from_slice(pix.row(y));
        data.resize(data.len() + extra_pixels * 4, pad_byte);
    }
    Ok(Pix::from_raw_with_format(
        pix.width(),
        pix.height(),
        stride,
        pix.format(),
        data,
    )?)
}

/// Replace every pixel with a 2x2 block of the same color.
pub fn replicate_2x2(pix: &Pix) -> TestResult<Pix> {
    let mut pm = Pix::new(pix.width() * 2, pix.height() * 2)?.to_mut();
    for y in 0..pix.height() {
        for x in 0..pix.width() {
            if let Some(c) = pix.get_rgb(x, y) {
                for (dx, dy) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
                    pm.set_rgb(2 * x + dx, 2 * y + dy, c)?;
                }
            }
        }
    }
    Ok(pm.into())
}

/// Count the pixels with exactly `color`.
pub fn count_color(pix: &Pix, color: Color) -> usize {
    (0..pix.height())
        .flat_map(|y| (0..pix.width()).map(move |x| (x, y)))
        .filter(|&(x, y)| pix.get_rgb(x, y) == Some(color))
        .count()
}
