use super::Page;
use crate::fonts;
use embedded_graphics::{
    Drawable,
    pixelcolor::BinaryColor,
    prelude::{DrawTarget, Point, Size},
    primitives::Rectangle,
};
use embedded_text::{
    TextBox,
    alignment::{HorizontalAlignment, VerticalAlignment},
    style::TextBoxStyleBuilder,
};
use u8g2_fonts::U8g2TextStyle;

// Text origin matches the firmware's cursor at (10, 30): the first line's
// baseline sits at y = 30 with the font's ~12px ascent.
const LEFT_MARGIN: i32 = 10;
const TOP_MARGIN: i32 = 18;
const BOTTOM_MARGIN: i32 = 5;

/// `ErrorPage` shows a short failure message in black on a white screen.
///
/// Long messages wrap at word boundaries inside the panel margins.
pub struct ErrorPage {
    message: String,
}

impl ErrorPage {
    #[must_use]
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl<D: DrawTarget<Color = BinaryColor>> Page<D> for ErrorPage {
    fn draw(&mut self, display: &mut D) -> Result<(), D::Error> {
        let display_bounds = display.bounding_box();
        let display_width = display_bounds.size.width.cast_signed();
        let display_height = display_bounds.size.height.cast_signed();

        let message_bounds = Rectangle::new(
            Point::new(LEFT_MARGIN, TOP_MARGIN),
            Size::new(
                (display_width - 2 * LEFT_MARGIN).max(0).cast_unsigned(),
                (display_height - TOP_MARGIN - BOTTOM_MARGIN)
                    .max(0)
                    .cast_unsigned(),
            ),
        );

        let character_style = U8g2TextStyle::new(fonts::FONT_MONO_BOLD, BinaryColor::Off);
        let textbox_style = TextBoxStyleBuilder::new()
            .alignment(HorizontalAlignment::Left)
            .vertical_alignment(VerticalAlignment::Top)
            .build();

        TextBox::with_textbox_style(
            &self.message,
            message_bounds,
            character_style,
            textbox_style,
        )
        .draw(display)?;

        Ok(())
    }
}
