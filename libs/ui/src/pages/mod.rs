use embedded_graphics::{pixelcolor::BinaryColor, prelude::DrawTarget};

pub mod error;

pub use error::ErrorPage;

/// Trait for UI pages that can be drawn on a display
pub trait Page<D: DrawTarget<Color = BinaryColor>> {
    /// Draw the page content to the display
    fn draw(&mut self, display: &mut D) -> Result<(), D::Error>;

    /// Clear the display to white and draw the page (convenience method)
    fn show(&mut self, display: &mut D) -> Result<(), D::Error> {
        display.clear(BinaryColor::On)?;
        self.draw(display)
    }
}
