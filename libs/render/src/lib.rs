//! Watchface rendering for the Watchy e-paper panel
//!
//! A watchface is an uncompressed BMP whose geometry matches the panel
//! exactly. It is decoded straight from storage, one scanline at a time,
//! thresholded to black and white and drawn into the panel framebuffer.
//! Any failure replaces the watchface with an on-screen error message.

pub mod bitmap;
pub mod error;
pub mod panel;
pub mod raster;
pub mod storage;
pub mod watchface;

pub use bitmap::{BitDepth, BitmapHeader, HEADER_LEN, parse_header};
pub use error::{Error, RenderResult};
pub use panel::Panel;
pub use raster::rasterize;
pub use storage::{FsStorage, Storage};
pub use watchface::Watchface;

/// Panel dimensions every watchface must match.
pub use epd_1in54_d67::common::{HEIGHT as PANEL_HEIGHT, WIDTH as PANEL_WIDTH};
