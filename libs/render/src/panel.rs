//! The surface a watchface is drawn on.

use embedded_graphics::{pixelcolor::BinaryColor, prelude::DrawTarget};
use epd_1in54_d67::display::Display;
use watchy_ui::{ErrorPage, Page};

/// A black/white surface that can be drawn on and pushed to the glass.
///
/// `BinaryColor::On` is white, `BinaryColor::Off` is black.
pub trait Panel: DrawTarget<Color = BinaryColor> + Sized {
    /// Run a full hardware refresh of everything drawn so far.
    fn refresh(&mut self) -> Result<(), Self::Error>;

    /// Replace the screen content with `message` and refresh.
    fn show_error(&mut self, message: &str) -> Result<(), Self::Error> {
        ErrorPage::new(message).show(self)?;
        self.refresh()
    }
}

impl Panel for Display {
    fn refresh(&mut self) -> Result<(), Self::Error> {
        self.update_full()
    }
}
