//! The watchface facade: mount, open, decode and present one bitmap.

use crate::bitmap::parse_header;
use crate::error::{Error, RenderResult, display_error};
use crate::panel::Panel;
use crate::raster::rasterize;
use crate::storage::Storage;
use embedded_graphics::pixelcolor::BinaryColor;
use log::{error, info};
use std::fmt::Debug;
use std::io::{Seek, SeekFrom};
use std::time::Duration;

/// Draws watchface bitmaps from `storage` onto `panel`.
///
/// Failures never leave the panel silently stale: every error that ends a
/// render is logged and shown on screen before it is returned.
pub struct Watchface<S, P> {
    storage: S,
    panel: P,
}

impl<S, P> Watchface<S, P>
where
    S: Storage,
    P: Panel,
    P::Error: Debug,
{
    pub fn new(storage: S, panel: P) -> Self {
        Self { storage, panel }
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut P {
        &mut self.panel
    }

    pub fn into_parts(self) -> (S, P) {
        (self.storage, self.panel)
    }

    /// Blank the panel to white with a full refresh.
    ///
    /// `settle` is slept afterwards so the waveform finishes before the
    /// first watchface is drawn.
    pub fn init(&mut self, settle: Duration) -> RenderResult<()> {
        info!("Clearing screen...");
        self.panel.clear(BinaryColor::On).map_err(display_error)?;
        self.panel.refresh().map_err(display_error)?;
        std::thread::sleep(settle);
        info!("Screen cleared.");
        Ok(())
    }

    /// Decode `path` into the panel framebuffer without refreshing.
    ///
    /// On failure the error screen is shown (and refreshed) and the error
    /// is returned for the caller's records.
    pub fn render(&mut self, path: &str) -> RenderResult<()> {
        match self.draw_bitmap(path) {
            Ok(()) => Ok(()),
            Err(e) => {
                error!("Rendering {path} failed: {e}");
                self.show_error(e.display_message());
                Err(e)
            }
        }
    }

    /// Decode `path` and refresh the panel to show it.
    ///
    /// A failed refresh is reported on screen like any render failure.
    pub fn display(&mut self, path: &str) -> RenderResult<()> {
        self.render(path)?;
        if let Err(e) = self.panel.refresh() {
            let e = display_error(e);
            error!("Refresh after rendering {path} failed: {e}");
            self.show_error(e.display_message());
            return Err(e);
        }
        Ok(())
    }

    /// Show `message` as an error screen, bypassing any decoding.
    pub fn show_error(&mut self, message: &str) {
        if let Err(e) = self.panel.show_error(message) {
            error!("Failed to show error message {message:?}: {e:?}");
        }
    }

    fn draw_bitmap(&mut self, path: &str) -> RenderResult<()> {
        self.storage.mount().map_err(Error::StorageUnavailable)?;

        // Dropped on every return path below, which closes the file
        let mut file = self.storage.open(path).map_err(|source| Error::Open {
            path: path.to_string(),
            source,
        })?;

        let header = parse_header(&mut file)?;

        info!("Rendering watchface {path}");
        file.seek(SeekFrom::Start(u64::from(header.data_offset())))?;
        rasterize(&mut file, &header, &mut self.panel)
    }
}
