//! The fixed color palette shared with the dashboard UI.
//!
//! Reports reuse the product theme so exported documents match the colors
//! shown on screen.  The values are plain RGB triples; conversion into the
//! PDF backend's color space happens in [`crate::render`].

/// An opaque RGB color with 8-bit channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Creates a color from its RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Lime green used for the brand line and section headers.
pub const PRIMARY: Color = Color::rgb(0x84, 0xcc, 0x16);
/// Green accent, also the Kapha tag color.
pub const SECONDARY: Color = Color::rgb(0x22, 0xc5, 0x5e);
/// Amber accent.
pub const ACCENT: Color = Color::rgb(0xf5, 0x9e, 0x0b);
/// Default label and body text color.
pub const TEXT: Color = Color::rgb(0x37, 0x41, 0x51);
/// Subdued color for subtitles and secondary text.
pub const MUTED: Color = Color::rgb(0x6b, 0x72, 0x80);
/// Hairline separator rules.
pub const RULE: Color = Color::rgb(0xe5, 0xe7, 0xeb);
/// Footer text.
pub const FOOTER: Color = Color::rgb(0x9c, 0xa3, 0xaf);
/// Plain black, used for values.
pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);

/// Vata dosha tag color.
pub const VATA: Color = Color::rgb(0x0e, 0xa5, 0xe9);
/// Pitta dosha tag color.
pub const PITTA: Color = Color::rgb(0xef, 0x44, 0x44);
/// Kapha dosha tag color.
pub const KAPHA: Color = SECONDARY;
