use embedded_graphics::{
    mono_font::{MonoTextStyleBuilder, ascii::FONT_10X20},
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Circle, PrimitiveStyle, Rectangle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};
use epd_1in54_d67::{Device, DeviceConfig};

fn main() -> epd_1in54_d67::EpdResult<()> {
    env_logger::init();
    log::info!("EPD_1in54_D67 test pattern");

    let mut device = Device::new(DeviceConfig::default())?;
    device.display.clear(BinaryColor::On)?;

    let stroke = PrimitiveStyle::with_stroke(BinaryColor::Off, 2);
    let bounding_box = device.display.bounding_box();
    log::debug!(
        "left: {}, size: {}",
        bounding_box.top_left,
        bounding_box.size
    );

    Rectangle::new(bounding_box.top_left, bounding_box.size)
        .into_styled(stroke)
        .draw(&mut device.display)?;
    Circle::with_center(bounding_box.center(), 120)
        .into_styled(stroke)
        .draw(&mut device.display)?;

    let character_style = MonoTextStyleBuilder::new()
        .font(&FONT_10X20)
        .text_color(BinaryColor::Off)
        .build();
    let text_style = TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Middle)
        .build();
    Text::with_text_style(
        "Watchy",
        bounding_box.center(),
        character_style,
        text_style,
    )
    .draw(&mut device.display)?;

    device.display.update_full()?;
    log::info!("Test pattern shown, putting panel to sleep");
    device.sleep()
}
