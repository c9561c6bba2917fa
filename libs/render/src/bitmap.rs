//! BMP header parsing
//!
//! Only the fields the panel cares about are decoded from the combined
//! file + info header:
//!
//! | Offset | Size | Field |
//! |---|---|---|
//! | 0  | 2 | signature, `BM` |
//! | 10 | 4 | pixel data offset |
//! | 18 | 4 | width |
//! | 22 | 4 | height |
//! | 28 | 2 | bits per pixel |
//!
//! All multi-byte fields are little-endian.

use crate::error::{Error, RenderResult};
use epd_1in54_d67::common::{HEIGHT, WIDTH};
use log::debug;
use std::io::Read;

/// Size of the BMP file header plus the `BITMAPINFOHEADER`.
pub const HEADER_LEN: usize = 54;

const SIGNATURE: [u8; 2] = *b"BM";
const DATA_OFFSET_AT: usize = 10;
const WIDTH_AT: usize = 18;
const HEIGHT_AT: usize = 22;
const BITS_PER_PIXEL_AT: usize = 28;

/// Pixel encodings the panel can be fed from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BitDepth {
    /// One byte per pixel, used directly as gray level. No palette lookup.
    Gray8,
    /// Three bytes per pixel, averaged without weighting.
    Bgr24,
}

impl BitDepth {
    #[must_use]
    pub fn from_bits(bits: u16) -> Option<Self> {
        match bits {
            8 => Some(BitDepth::Gray8),
            24 => Some(BitDepth::Bgr24),
            _ => None,
        }
    }

    #[must_use]
    pub fn bits(self) -> u16 {
        match self {
            BitDepth::Gray8 => 8,
            BitDepth::Bgr24 => 24,
        }
    }

    #[must_use]
    pub fn bytes_per_pixel(self) -> usize {
        usize::from(self.bits() / 8)
    }
}

/// Validated header of a watchface bitmap.
///
/// Width and height always equal the panel dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitmapHeader {
    signature: [u8; 2],
    data_offset: u32,
    width: u32,
    height: u32,
    depth: BitDepth,
}

impl BitmapHeader {
    /// Decode and validate a raw header.
    ///
    /// Checks run in order: signature, geometry, depth.
    pub fn from_bytes(raw: &[u8; HEADER_LEN]) -> RenderResult<Self> {
        let signature = [raw[0], raw[1]];
        if signature != SIGNATURE {
            return Err(Error::InvalidFormat(signature));
        }

        let data_offset = read_u32_le(raw, DATA_OFFSET_AT);
        let width = read_u32_le(raw, WIDTH_AT);
        let height = read_u32_le(raw, HEIGHT_AT);
        let bits_per_pixel = read_u16_le(raw, BITS_PER_PIXEL_AT);
        debug!(
            "BMP header: offset={data_offset} size={width}x{height} bpp={bits_per_pixel}"
        );

        if width != WIDTH || height != HEIGHT {
            return Err(Error::UnsupportedGeometry { width, height });
        }

        let depth =
            BitDepth::from_bits(bits_per_pixel).ok_or(Error::UnsupportedDepth(bits_per_pixel))?;

        Ok(Self {
            signature,
            data_offset,
            width,
            height,
            depth,
        })
    }

    #[must_use]
    pub fn signature(&self) -> [u8; 2] {
        self.signature
    }

    /// Byte offset of the first stored (bottom) scanline from file start.
    #[must_use]
    pub fn data_offset(&self) -> u32 {
        self.data_offset
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn depth(&self) -> BitDepth {
        self.depth
    }

    /// Bytes in one stored scanline. Rows carry no padding.
    #[must_use]
    pub fn row_len(&self) -> usize {
        self.width as usize * self.depth.bytes_per_pixel()
    }
}

/// Read and validate the header at the reader's current position.
///
/// Consumes exactly [`HEADER_LEN`] bytes. The caller seeks to
/// [`BitmapHeader::data_offset`] before rasterizing.
pub fn parse_header<R: Read>(reader: &mut R) -> RenderResult<BitmapHeader> {
    let mut raw = [0u8; HEADER_LEN];
    reader.read_exact(&mut raw)?;
    BitmapHeader::from_bytes(&raw)
}

fn read_u32_le(raw: &[u8; HEADER_LEN], at: usize) -> u32 {
    u32::from_le_bytes([raw[at], raw[at + 1], raw[at + 2], raw[at + 3]])
}

fn read_u16_le(raw: &[u8; HEADER_LEN], at: usize) -> u16 {
    u16::from_le_bytes([raw[at], raw[at + 1]])
}
