//! Test doubles shared by the integration tests
#![allow(dead_code)]

use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::{DrawTarget, OriginDimensions, Pixel, Point, Size},
};
use std::cell::Cell;
use std::collections::HashMap;
use std::convert::Infallible;
use std::io::{self, Cursor, ErrorKind, Read, Seek, SeekFrom};
use std::rc::Rc;
use watchy_render::{PANEL_HEIGHT, PANEL_WIDTH, Panel, Storage};

// ============================================================================
// Panel
// ============================================================================

/// Panel that records every call instead of driving hardware.
#[derive(Default)]
pub struct RecordingPanel {
    pub pixels: Vec<(Point, BinaryColor)>,
    pub errors: Vec<String>,
    pub refreshes: usize,
    pub clears: usize,
}

impl RecordingPanel {
    pub fn color_at(&self, x: i32, y: i32) -> Option<BinaryColor> {
        self.pixels
            .iter()
            .rev()
            .find(|(p, _)| *p == Point::new(x, y))
            .map(|(_, c)| *c)
    }

    pub fn count(&self, color: BinaryColor) -> usize {
        self.pixels.iter().filter(|(_, c)| *c == color).count()
    }
}

impl DrawTarget for RecordingPanel {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.pixels
            .extend(pixels.into_iter().map(|Pixel(p, c)| (p, c)));
        Ok(())
    }

    fn clear(&mut self, _color: BinaryColor) -> Result<(), Self::Error> {
        self.clears += 1;
        Ok(())
    }
}

impl OriginDimensions for RecordingPanel {
    fn size(&self) -> Size {
        Size::new(PANEL_WIDTH, PANEL_HEIGHT)
    }
}

impl Panel for RecordingPanel {
    fn refresh(&mut self) -> Result<(), Self::Error> {
        self.refreshes += 1;
        Ok(())
    }

    fn show_error(&mut self, message: &str) -> Result<(), Self::Error> {
        self.errors.push(message.to_string());
        Ok(())
    }
}

/// Panel whose bus gives out: drawing fails once `fail_after` pixels have
/// landed, and refresh fails when `fail_refresh` is set.
#[derive(Default)]
pub struct FailingPanel {
    pub drawn: usize,
    pub fail_after: Option<usize>,
    pub fail_refresh: bool,
    pub errors: Vec<String>,
    pub refreshes: usize,
}

impl FailingPanel {
    pub fn failing_draw_after(pixels: usize) -> Self {
        Self {
            fail_after: Some(pixels),
            ..Self::default()
        }
    }

    pub fn failing_refresh() -> Self {
        Self {
            fail_refresh: true,
            ..Self::default()
        }
    }
}

impl DrawTarget for FailingPanel {
    type Color = BinaryColor;
    type Error = &'static str;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for _ in pixels {
            if self.fail_after.is_some_and(|limit| self.drawn >= limit) {
                return Err("bus");
            }
            self.drawn += 1;
        }
        Ok(())
    }
}

impl OriginDimensions for FailingPanel {
    fn size(&self) -> Size {
        Size::new(PANEL_WIDTH, PANEL_HEIGHT)
    }
}

impl Panel for FailingPanel {
    fn refresh(&mut self) -> Result<(), Self::Error> {
        self.refreshes += 1;
        if self.fail_refresh {
            return Err("busy");
        }
        Ok(())
    }

    fn show_error(&mut self, message: &str) -> Result<(), Self::Error> {
        self.errors.push(message.to_string());
        Ok(())
    }
}

// ============================================================================
// Storage
// ============================================================================

/// In-memory file that counts how often it is closed.
pub struct TrackedFile {
    cursor: Cursor<Vec<u8>>,
    closes: Rc<Cell<usize>>,
}

impl Read for TrackedFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.cursor.read(buf)
    }
}

impl Seek for TrackedFile {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.cursor.seek(pos)
    }
}

impl Drop for TrackedFile {
    fn drop(&mut self) {
        self.closes.set(self.closes.get() + 1);
    }
}

pub struct MemoryStorage {
    files: HashMap<String, Vec<u8>>,
    pub mountable: bool,
    pub opens: Rc<Cell<usize>>,
    pub closes: Rc<Cell<usize>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            files: HashMap::new(),
            mountable: true,
            opens: Rc::new(Cell::new(0)),
            closes: Rc::new(Cell::new(0)),
        }
    }

    pub fn with_file(path: &str, data: Vec<u8>) -> Self {
        let mut storage = Self::new();
        storage.files.insert(path.to_string(), data);
        storage
    }
}

impl Storage for MemoryStorage {
    type File = TrackedFile;

    fn mount(&mut self) -> io::Result<()> {
        if self.mountable {
            Ok(())
        } else {
            Err(io::Error::other("no filesystem"))
        }
    }

    fn open(&mut self, path: &str) -> io::Result<Self::File> {
        let data = self
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::from(ErrorKind::NotFound))?;
        self.opens.set(self.opens.get() + 1);
        Ok(TrackedFile {
            cursor: Cursor::new(data),
            closes: Rc::clone(&self.closes),
        })
    }
}

// ============================================================================
// Bitmap builders
// ============================================================================

pub const PANEL: usize = PANEL_WIDTH as usize;

/// BMP header followed by `pixel_data`, which starts at `data_offset`.
pub fn bmp_with_offset(
    width: u32,
    height: u32,
    bits_per_pixel: u16,
    data_offset: u32,
    pixel_data: &[u8],
) -> Vec<u8> {
    let mut data = vec![0u8; 54];
    data[..2].copy_from_slice(b"BM");
    let file_size = data_offset as usize + pixel_data.len();
    data[2..6].copy_from_slice(&u32::try_from(file_size).unwrap().to_le_bytes());
    data[10..14].copy_from_slice(&data_offset.to_le_bytes());
    data[14..18].copy_from_slice(&40u32.to_le_bytes());
    data[18..22].copy_from_slice(&width.to_le_bytes());
    data[22..26].copy_from_slice(&height.to_le_bytes());
    data[26..28].copy_from_slice(&1u16.to_le_bytes());
    data[28..30].copy_from_slice(&bits_per_pixel.to_le_bytes());
    data.resize(data_offset as usize, 0xEE);
    data.extend_from_slice(pixel_data);
    data
}

pub fn bmp(width: u32, height: u32, bits_per_pixel: u16, pixel_data: &[u8]) -> Vec<u8> {
    bmp_with_offset(width, height, bits_per_pixel, 54, pixel_data)
}

/// Panel-sized 8-bit image; `level(x, stored_row)` gives each byte.
pub fn gray_image(level: impl Fn(usize, usize) -> u8) -> Vec<u8> {
    let pixels: Vec<u8> = (0..PANEL)
        .flat_map(|row| (0..PANEL).map(move |x| (x, row)))
        .map(|(x, row)| level(x, row))
        .collect();
    bmp(PANEL_WIDTH, PANEL_HEIGHT, 8, &pixels)
}

/// Panel-sized 24-bit image; `channels(x, stored_row)` gives each triplet.
pub fn color_image(channels: impl Fn(usize, usize) -> [u8; 3]) -> Vec<u8> {
    let pixels: Vec<u8> = (0..PANEL)
        .flat_map(|row| (0..PANEL).map(move |x| (x, row)))
        .flat_map(|(x, row)| channels(x, row))
        .collect();
    bmp(PANEL_WIDTH, PANEL_HEIGHT, 24, &pixels)
}
