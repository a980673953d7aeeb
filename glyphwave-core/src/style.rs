//! Colors, fonts and the theme.

use std::fmt;

/// Straight-alpha RGBA color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Opacity in `[0, 1]`.
    pub a: f64,
}

impl Rgba {
    /// Opaque color from its channels.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Creates a color from a `0xRRGGBB` value.
    #[must_use]
    pub const fn from_hex(rgb: u32) -> Self {
        Self::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    /// Returns the same color with the given opacity.
    #[must_use]
    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// Composites this color over an opaque `background`.
    #[must_use]
    pub fn over(self, background: Rgba) -> Rgba {
        let a = self.a.clamp(0.0, 1.0);
        let mix = |fg: u8, bg: u8| (f64::from(fg) * a + f64::from(bg) * (1.0 - a)).round() as u8;

        Rgba::rgb(mix(self.r, background.r), mix(self.g, background.g), mix(self.b, background.b))
    }
}

/// Formats as a CSS color: `#rrggbb` when opaque, `rgba(r, g, b, a)` otherwise.
impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a >= 1.0 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

/// Glyph font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    /// CSS weight 900.
    Heavy,
}

/// Font used for a single glyph draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphFont {
    /// Font size in logical pixels.
    pub size_px: f64,
    pub weight: FontWeight,
}

impl GlyphFont {
    /// Font for logo glyphs: heavy, a full cell tall.
    #[must_use]
    pub fn logo(cell_height: f64) -> Self {
        Self { size_px: cell_height, weight: FontWeight::Heavy }
    }

    /// Font for wave-field glyphs: regular, 60% of the cell height.
    #[must_use]
    pub fn field(cell_height: f64) -> Self {
        Self { size_px: cell_height * 0.6, weight: FontWeight::Regular }
    }
}

/// Colors used by the animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    /// Fill color of the whole surface, painted every frame.
    pub background: Rgba,
    /// Color of logo glyphs.
    pub logo: Rgba,
    /// Base color of wave-field glyphs; alpha follows the reveal progress.
    pub glyph: Rgba,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Rgba::from_hex(0x051533),
            logo: Rgba::from_hex(0xffffff),
            glyph: Rgba::rgb(119, 155, 206),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_formatting() {
        assert_eq!(Rgba::from_hex(0x051533).to_string(), "#051533");
        assert_eq!(
            Rgba::rgb(119, 155, 206).with_alpha(0.5).to_string(),
            "rgba(119, 155, 206, 0.5)"
        );
    }

    #[test]
    fn test_over() {
        let bg = Rgba::rgb(0, 0, 0);
        assert_eq!(Rgba::rgb(200, 100, 50).with_alpha(0.5).over(bg), Rgba::rgb(100, 50, 25));
        assert_eq!(Rgba::rgb(200, 100, 50).over(bg), Rgba::rgb(200, 100, 50));
        assert_eq!(Rgba::rgb(200, 100, 50).with_alpha(0.0).over(bg), bg);
    }

    #[test]
    fn test_fonts() {
        assert_eq!(GlyphFont::logo(20.0).size_px, 20.0);
        assert_eq!(GlyphFont::field(20.0).size_px, 12.0);
        assert_eq!(GlyphFont::field(20.0).weight, FontWeight::Regular);
    }
}
