//! Scanline rasterizer: streams stored rows bottom-up into a draw target,
//! thresholding each pixel to black or white.

use crate::bitmap::BitmapHeader;
use crate::error::{RenderResult, display_error};
use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::{DrawTarget, Pixel, Point},
};
use epd_1in54_d67::common::WIDTH;
use std::fmt::Debug;
use std::io::Read;

/// Gray levels above this are white, the rest black.
pub const THRESHOLD: u8 = 127;

/// Largest scanline any accepted bitmap can have (24 bpp at panel width).
const MAX_ROW_LEN: usize = WIDTH as usize * 3;

/// Gray level of one stored pixel.
///
/// Three-byte pixels are the plain integer mean of their channels, in
/// whatever order they are stored. Single-byte pixels are their own level.
#[must_use]
pub fn pixel_intensity(pixel: &[u8]) -> u8 {
    match *pixel {
        [c0, c1, c2] => {
            let sum = u16::from(c0) + u16::from(c1) + u16::from(c2);
            u8::try_from(sum / 3).unwrap_or(u8::MAX)
        }
        [gray, ..] => gray,
        [] => 0,
    }
}

#[must_use]
pub fn luma_to_color(intensity: u8) -> BinaryColor {
    if intensity > THRESHOLD {
        BinaryColor::On
    } else {
        BinaryColor::Off
    }
}

/// Stream the pixel data of a validated bitmap into `target`.
///
/// `reader` must already be positioned at the header's data offset. Rows
/// are stored bottom-up, so the first row read is drawn at
/// `y = height - 1`. Only one scanline is buffered at a time; a short read
/// aborts mid-image and leaves whatever was drawn so far in the target.
pub fn rasterize<R, D>(reader: &mut R, header: &BitmapHeader, target: &mut D) -> RenderResult<()>
where
    R: Read,
    D: DrawTarget<Color = BinaryColor>,
    D::Error: Debug,
{
    let bytes_per_pixel = header.depth().bytes_per_pixel();
    let mut row_buffer = [0u8; MAX_ROW_LEN];
    let row = &mut row_buffer[..header.row_len()];

    for y in (0..header.height().cast_signed()).rev() {
        reader.read_exact(row)?;

        let pixels = row
            .chunks_exact(bytes_per_pixel)
            .zip(0..)
            .map(|(pixel, x)| Pixel(Point::new(x, y), luma_to_color(pixel_intensity(pixel))));

        target.draw_iter(pixels).map_err(display_error)?;
    }

    Ok(())
}
