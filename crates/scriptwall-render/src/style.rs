use crate::{RenderError, RenderResult};
use serde::{Deserialize, Serialize};

/// RGBA8 color used for canvas fills and text brushes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse "#E8D9A8", "E8D9A8", or 8-digit "#RRGGBBAA".
    pub fn parse_hex(s: &str) -> RenderResult<Self> {
        let hex = s.trim().trim_start_matches('#');
        let err = || RenderError::canvas(format!("invalid hex color '{s}'"));

        let byte = |range: std::ops::Range<usize>| {
            hex.get(range)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(err)
        };

        match hex.len() {
            6 => Ok(Self {
                r: byte(0..2)?,
                g: byte(2..4)?,
                b: byte(4..6)?,
                a: 255,
            }),
            8 => Ok(Self {
                r: byte(0..2)?,
                g: byte(2..4)?,
                b: byte(4..6)?,
                a: byte(6..8)?,
            }),
            _ => Err(err()),
        }
    }
}

impl std::str::FromStr for Rgba8 {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

/// Canvas geometry and colors for rendered pages.
///
/// Defaults match a 1920x1080 display with a black background and
/// screenplay-yellow text.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PageStyle {
    pub width: u32,
    pub height: u32,
    /// Left margin of the text column, in pixels.
    pub margin_x: u32,
    /// Top/bottom margin, in pixels.
    pub margin_y: u32,
    pub font_size: f32,
    pub background: Rgba8,
    pub foreground: Rgba8,
}

impl Default for PageStyle {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            margin_x: 140,
            margin_y: 80,
            font_size: 28.0,
            background: Rgba8::rgb(0, 0, 0),
            foreground: Rgba8::rgb(0xE8, 0xD9, 0xA8),
        }
    }
}

impl PageStyle {
    /// Width of the text column in pixels.
    pub fn text_width(&self) -> f32 {
        self.width.saturating_sub(2 * self.margin_x) as f32
    }

    pub(crate) fn validate(&self) -> RenderResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::canvas("canvas dimensions must be non-zero"));
        }
        // The rasterizer addresses surfaces with 16-bit coordinates.
        if self.width > u16::MAX as u32 || self.height > u16::MAX as u32 {
            return Err(RenderError::canvas(format!(
                "canvas {}x{} exceeds the maximum renderable size",
                self.width, self.height
            )));
        }
        if self.text_width() <= 0.0 {
            return Err(RenderError::canvas(
                "margins leave no room for a text column",
            ));
        }
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(RenderError::canvas("font size must be finite and > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(Rgba8::parse_hex("#E8D9A8").unwrap(), Rgba8::rgb(0xE8, 0xD9, 0xA8));
        assert_eq!(Rgba8::parse_hex("000000").unwrap(), Rgba8::rgb(0, 0, 0));
        assert_eq!(
            Rgba8::parse_hex("#11223344").unwrap(),
            Rgba8 { r: 0x11, g: 0x22, b: 0x33, a: 0x44 }
        );
        assert!(Rgba8::parse_hex("#fff").is_err());
        assert!(Rgba8::parse_hex("nothex").is_err());
        assert!(Rgba8::parse_hex("").is_err());
    }

    #[test]
    fn test_default_style_is_valid() {
        let style = PageStyle::default();
        style.validate().unwrap();
        assert_eq!(style.text_width(), (1920 - 2 * 140) as f32);
    }

    #[test]
    fn test_validate_rejects_degenerate_canvas() {
        let mut style = PageStyle::default();
        style.width = 0;
        assert!(style.validate().is_err());

        let mut style = PageStyle::default();
        style.margin_x = 1000;
        assert!(style.validate().is_err());

        let mut style = PageStyle::default();
        style.width = 70_000;
        assert!(style.validate().is_err());

        let mut style = PageStyle::default();
        style.font_size = 0.0;
        assert!(style.validate().is_err());
    }
}
