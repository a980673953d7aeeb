//! Logo glyph table and the random-to-target glyph morph.

use crate::{
    easing::{ease_in_out_quad, lerp, round_half_up},
    grid::GridMetrics,
};

/// Rows of the built-in logo, top to bottom.
pub const LOGO_ROWS: &[&str] = &[
    " _",
    "| |   _   _  ___ ___ __ _",
    "| |  | | | |/ __/ __/ _` |",
    "| |__| |_| | (_| (_| (_| |",
    r"|_____\__,_|\___|\___\__,_",
];

/// Lowest code point handed out by a [`GlyphSampler`] (`!`).
pub const PRINTABLE_FIRST: u32 = 33;
/// Highest code point handed out by a [`GlyphSampler`] (`~`).
pub const PRINTABLE_LAST: u32 = 126;

/// Source of random printable ASCII code points for the logo morph.
///
/// Sampled once per morphing cell per frame, so the dissolve flickers
/// toward its target instead of sliding from one fixed seed.
pub trait GlyphSampler {
    /// Returns a code point in `PRINTABLE_FIRST..=PRINTABLE_LAST`.
    fn printable_code(&mut self) -> u32;
}

impl GlyphSampler for fastrand::Rng {
    fn printable_code(&mut self) -> u32 {
        self.u32(PRINTABLE_FIRST..=PRINTABLE_LAST)
    }
}

/// Logo dimensions in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoBounds {
    /// Length of the longest row.
    pub width: i32,
    /// Number of rows.
    pub height: i32,
}

/// Top-left grid cell of the placed logo. May be negative when the grid is
/// smaller than the logo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LogoOrigin {
    /// Leftmost logo column.
    pub col: i32,
    /// Topmost logo row.
    pub row: i32,
}

/// A fixed glyph bitmap drawn on top of the wave field.
#[derive(Debug, Clone)]
pub struct Logo {
    rows: Vec<Vec<char>>,
    bounds: LogoBounds,
}

impl Logo {
    /// Creates a logo from its rows. Rows may differ in length; the width is
    /// that of the longest row.
    pub fn new<S: AsRef<str>>(rows: &[S]) -> Self {
        let rows: Vec<Vec<char>> = rows
            .iter()
            .map(|row| row.as_ref().chars().collect())
            .collect();

        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let bounds = LogoBounds { width: width as i32, height: rows.len() as i32 };

        Self { rows, bounds }
    }

    /// Logo width and height in cells.
    #[must_use]
    pub fn bounds(&self) -> LogoBounds {
        self.bounds
    }

    /// Centers the logo inside `grid`.
    #[must_use]
    pub fn centered_in(&self, grid: &GridMetrics) -> LogoOrigin {
        let col = round_half_up(f64::from(grid.cols - self.bounds.width) / 2.0);
        let row = round_half_up(f64::from(grid.rows - self.bounds.height) / 2.0);

        LogoOrigin { col: col as i32, row: row as i32 }
    }

    /// Returns true if the cell lies inside the logo rectangle placed at `origin`.
    #[must_use]
    pub fn is_in_bounds(&self, col: i32, row: i32, origin: LogoOrigin) -> bool {
        col >= origin.col
            && col < origin.col + self.bounds.width
            && row >= origin.row
            && row < origin.row + self.bounds.height
    }

    /// Looks up the glyph for a grid cell.
    ///
    /// Returns `None` outside the logo, or past the end of a short row.
    /// Blank target cells stay blank. Below full `progress`, the glyph is a
    /// code-point blend between a freshly sampled random glyph and the target.
    pub fn glyph_at(
        &self,
        col: i32,
        row: i32,
        origin: LogoOrigin,
        progress: f64,
        sampler: &mut dyn GlyphSampler,
    ) -> Option<char> {
        if !self.is_in_bounds(col, row, origin) {
            return None;
        }

        let target = *self
            .rows
            .get((row - origin.row) as usize)?
            .get((col - origin.col) as usize)?;

        if target == ' ' {
            return Some(' ');
        }

        if progress >= 1.0 {
            return Some(target);
        }

        let random = f64::from(sampler.printable_code());
        let code = round_half_up(lerp(random, f64::from(u32::from(target)), ease_in_out_quad(progress)));

        if code.is_finite() && code >= 0.0 {
            char::from_u32(code as u32).or(Some(target))
        } else {
            Some(target)
        }
    }
}

impl Default for Logo {
    fn default() -> Self {
        Self::new(LOGO_ROWS)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Sampler that always returns the same code point.
    pub(crate) struct FixedSampler(pub u32);

    impl GlyphSampler for FixedSampler {
        fn printable_code(&mut self) -> u32 {
            self.0
        }
    }

    const ORIGIN: LogoOrigin = LogoOrigin { col: 37, row: 18 };

    #[test]
    fn test_bounds_from_literal_rows() {
        let logo = Logo::default();
        let widths: Vec<usize> = LOGO_ROWS.iter().map(|r| r.chars().count()).collect();

        assert_eq!(widths, vec![2, 25, 26, 26, 26]);
        assert_eq!(logo.bounds(), LogoBounds { width: 26, height: 5 });
    }

    #[test]
    fn test_is_in_bounds() {
        let logo = Logo::default();

        assert!(logo.is_in_bounds(37, 18, ORIGIN));
        assert!(logo.is_in_bounds(37 + 25, 18 + 4, ORIGIN));
        assert!(!logo.is_in_bounds(36, 18, ORIGIN));
        assert!(!logo.is_in_bounds(37 + 26, 18, ORIGIN));
        assert!(!logo.is_in_bounds(37, 17, ORIGIN));
        assert!(!logo.is_in_bounds(37, 18 + 5, ORIGIN));
    }

    #[test]
    fn test_glyph_at_full_progress_matches_target() {
        let logo = Logo::default();
        let mut sampler = FixedSampler(b'#' as u32);

        for (row_idx, row) in LOGO_ROWS.iter().enumerate() {
            for (col_idx, target) in row.chars().enumerate() {
                let glyph = logo.glyph_at(
                    ORIGIN.col + col_idx as i32,
                    ORIGIN.row + row_idx as i32,
                    ORIGIN,
                    1.0,
                    &mut sampler,
                );
                assert_eq!(glyph, Some(target), "mismatch at ({col_idx}, {row_idx})");
            }
        }
    }

    #[test]
    fn test_glyph_at_blank_ignores_progress() {
        let logo = Logo::default();
        let mut sampler = FixedSampler(b'~' as u32);

        // first cell of the first row is a space
        for progress in [0.0, 0.3, 0.99, 1.0] {
            assert_eq!(logo.glyph_at(37, 18, ORIGIN, progress, &mut sampler), Some(' '));
        }
    }

    #[test]
    fn test_glyph_at_outside_is_none() {
        let logo = Logo::default();
        let mut sampler = FixedSampler(b'a' as u32);

        assert_eq!(logo.glyph_at(0, 0, ORIGIN, 1.0, &mut sampler), None);
        assert_eq!(logo.glyph_at(36, 19, ORIGIN, 1.0, &mut sampler), None);
        assert_eq!(logo.glyph_at(37 + 26, 19, ORIGIN, 1.0, &mut sampler), None);
        assert_eq!(logo.glyph_at(40, 23, ORIGIN, 1.0, &mut sampler), None);
    }

    #[test]
    fn test_glyph_at_short_row_is_none() {
        let logo = Logo::default();
        let mut sampler = FixedSampler(b'a' as u32);

        // row 0 is " _", the rest of the logo rectangle has no glyph there
        assert_eq!(logo.glyph_at(37 + 1, 18, ORIGIN, 1.0, &mut sampler), Some('_'));
        assert_eq!(logo.glyph_at(37 + 2, 18, ORIGIN, 1.0, &mut sampler), None);
        assert_eq!(logo.glyph_at(37 + 20, 18, ORIGIN, 0.5, &mut sampler), None);
    }

    #[test]
    fn test_glyph_at_morphs_between_sample_and_target() {
        let logo = Logo::new(&["Z"]);
        let origin = LogoOrigin::default();

        // progress 0: pure sample
        let mut sampler = FixedSampler(b'A' as u32);
        assert_eq!(logo.glyph_at(0, 0, origin, 0.0, &mut sampler), Some('A'));

        // progress 0.5 eases to 0.5: halfway between 'A' (65) and 'Z' (90) is 77.5
        assert_eq!(logo.glyph_at(0, 0, origin, 0.5, &mut sampler), Some('N'));

        // progress 0.25 eases to 0.125: 65 + 25 * 0.125 = 68.125
        assert_eq!(logo.glyph_at(0, 0, origin, 0.25, &mut sampler), Some('D'));
    }

    #[test]
    fn test_glyph_at_resamples_every_call() {
        struct Counter(u32);

        impl GlyphSampler for Counter {
            fn printable_code(&mut self) -> u32 {
                self.0 += 1;
                PRINTABLE_FIRST + self.0
            }
        }

        let logo = Logo::new(&["~"]);
        let mut sampler = Counter(0);
        let first = logo.glyph_at(0, 0, LogoOrigin::default(), 0.0, &mut sampler);
        let second = logo.glyph_at(0, 0, LogoOrigin::default(), 0.0, &mut sampler);

        assert_eq!(sampler.0, 2);
        assert_ne!(first, second);
    }

    #[test]
    fn test_fastrand_sampler_range() {
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..1000 {
            let code = rng.printable_code();
            assert!((PRINTABLE_FIRST..=PRINTABLE_LAST).contains(&code));
        }
    }

    #[test]
    fn test_invalid_code_point_falls_back_to_target() {
        // a sampler outside the contract can push the blend into the surrogate range
        let logo = Logo::new(&["a"]);
        let mut sampler = FixedSampler(0xD800);

        let glyph = logo.glyph_at(0, 0, LogoOrigin::default(), 0.0, &mut sampler);
        assert_eq!(glyph, Some('a'));
    }
}
