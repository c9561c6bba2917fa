use crate::common::{BUFFER_SIZE, HEIGHT, Rotation, WIDTH};
use crate::display_driver::Epd1in54d67;
use crate::error::EpdResult;
use embedded_graphics::{
    geometry::Dimensions,
    pixelcolor::BinaryColor,
    prelude::{DrawTarget, OriginDimensions, Pixel, PointsIter, Size},
    primitives::Rectangle,
};

pub trait AsFillByte {
    fn as_byte(&self) -> u8;
}

impl AsFillByte for BinaryColor {
    fn as_byte(&self) -> u8 {
        if self.is_on() { 0xFF } else { 0x00 }
    }
}

const ROW_PITCH_BYTES: u32 = WIDTH.div_ceil(8);

/// Map a logical coordinate to its framebuffer byte index and bit.
///
/// `BinaryColor::On` is a set bit, which the panel shows as white.
/// Returns `None` for coordinates outside the rotated panel.
pub(crate) fn buffer_position(rotation: Rotation, x: i32, y: i32) -> Option<(usize, u8)> {
    let (w, h) = (WIDTH.cast_signed(), HEIGHT.cast_signed());
    let (width, height) = match rotation {
        Rotation::Deg0 | Rotation::Deg180 => (w, h),
        Rotation::Deg90 | Rotation::Deg270 => (h, w),
    };
    if !(0..width).contains(&x) || !(0..height).contains(&y) {
        return None;
    }

    let (px, py) = match rotation {
        Rotation::Deg0 => (x, y),
        Rotation::Deg90 => (w - 1 - y, x),
        Rotation::Deg180 => (w - 1 - x, h - 1 - y),
        Rotation::Deg270 => (y, h - 1 - x),
    };

    let index = (py.cast_unsigned() * ROW_PITCH_BYTES + px.cast_unsigned() / 8) as usize;
    let bit = 7 - (px.cast_unsigned() % 8) as u8;
    Some((index, bit))
}

pub struct Display {
    driver: Epd1in54d67,
    buffer: Box<[u8]>,
    rotation: Rotation,
}

impl Display {
    #[must_use]
    pub fn new(driver: Epd1in54d67, rotation: Rotation) -> Self {
        let buffer: Box<[u8]> = vec![BinaryColor::On.as_byte(); BUFFER_SIZE].into_boxed_slice();
        Self {
            rotation,
            driver,
            buffer,
        }
    }

    /// Push the framebuffer to the panel with a full refresh.
    pub fn update_full(&mut self) -> EpdResult<()> {
        self.driver.display_full(&self.buffer)
    }

    pub(crate) fn sleep(&mut self) -> EpdResult<()> {
        self.driver.sleep()
    }
}

impl DrawTarget for Display {
    type Color = BinaryColor;
    type Error = crate::error::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            let Some((index, bit)) = buffer_position(self.rotation, coord.x, coord.y) else {
                continue;
            };

            if color.is_on() {
                self.buffer[index] |= 1 << bit;
            } else {
                self.buffer[index] &= !(1 << bit);
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let clipped_area = area.intersection(&self.bounding_box());

        if clipped_area.is_zero_sized() {
            return Ok(());
        }

        self.draw_iter(clipped_area.points().map(|p| Pixel(p, color)))
    }

    fn clear(&mut self, color: BinaryColor) -> Result<(), Self::Error> {
        self.buffer.fill(color.as_byte());
        Ok(())
    }
}

impl OriginDimensions for Display {
    fn size(&self) -> Size {
        match self.rotation {
            Rotation::Deg0 | Rotation::Deg180 => Size::new(WIDTH, HEIGHT),
            Rotation::Deg90 | Rotation::Deg270 => Size::new(HEIGHT, WIDTH),
        }
    }
}
