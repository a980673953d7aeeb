//! Brightness-to-glyph ramps.

use crate::easing::lerp;

/// Full brightness ramp, darkest to lightest.
pub const FULL_RAMP: &str =
    r#" .'`^",:;Il!i><~+_-?][}{1)(|\/tfjrxnuvczXYUJCLQ0OZmwqpdbkhao*#MW&8%B@$"#;

/// Reduced 20-glyph ramp for constrained devices.
pub const REDUCED_RAMP: &str = r#" .'^",:;!i+?1txvXO#@"#;

/// Ordered glyph ramp mapping brightness to characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    glyphs: Vec<char>,
}

impl Palette {
    /// Creates a palette from a darkest-to-lightest ramp.
    ///
    /// An empty ramp falls back to a single blank glyph.
    pub fn new(ramp: &str) -> Self {
        let mut glyphs: Vec<char> = ramp.chars().collect();
        if glyphs.is_empty() {
            glyphs.push(' ');
        }

        Self { glyphs }
    }

    /// The 70-glyph ramp used on desktop.
    #[must_use]
    pub fn full() -> Self {
        Self::new(FULL_RAMP)
    }

    /// The 20-glyph ramp used on mobile.
    #[must_use]
    pub fn reduced() -> Self {
        Self::new(REDUCED_RAMP)
    }

    /// Number of glyphs in the ramp.
    #[must_use]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Palettes always hold at least one glyph.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Picks the glyph for a brightness in `[0, 1]`.
    #[must_use]
    pub fn glyph_for(&self, brightness: f64) -> char {
        let last = self.glyphs.len() - 1;
        let index = lerp(0.0, last as f64, brightness).floor();
        // NaN casts to 0; the clamp covers out-of-range brightness
        let index = (index.max(0.0) as usize).min(last);

        self.glyphs[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp_lengths() {
        assert_eq!(Palette::full().len(), 70);
        assert_eq!(Palette::reduced().len(), 20);
    }

    #[test]
    fn test_glyph_for_extremes() {
        let palette = Palette::full();
        assert_eq!(palette.glyph_for(0.0), ' ');
        assert_eq!(palette.glyph_for(1.0), '$');

        let reduced = Palette::reduced();
        assert_eq!(reduced.glyph_for(0.0), ' ');
        assert_eq!(reduced.glyph_for(1.0), '@');
    }

    #[test]
    fn test_glyph_for_floors_index() {
        // 19 slots: 0.5 lands on index 9.5 -> 9
        let reduced = Palette::reduced();
        assert_eq!(reduced.glyph_for(0.5), 'i');
    }

    #[test]
    fn test_glyph_for_out_of_range() {
        let palette = Palette::reduced();
        assert_eq!(palette.glyph_for(-0.5), ' ');
        assert_eq!(palette.glyph_for(3.0), '@');
        assert_eq!(palette.glyph_for(f64::NAN), ' ');
    }

    #[test]
    fn test_empty_ramp() {
        let palette = Palette::new("");
        assert_eq!(palette.len(), 1);
        assert_eq!(palette.glyph_for(0.7), ' ');
    }
}
