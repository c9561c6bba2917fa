// Font definitions for the Watchy display

// Bold monospace font for error messages (Courier Bold 10pt)
pub use u8g2_fonts::fonts::u8g2_font_courB10_tf as FONT_MONO_BOLD;
