//! Spiral reveal mask and the wave brightness field.

use crate::{
    clock::RevealTiming,
    easing::{clamp, round_half_up},
};

/// How far past the corner radius the spiral front travels before saturating.
const SPIRAL_SPREAD: f64 = 1.5;

// wave weights
const RADIAL_WEIGHT: f64 = 0.4;
const HORIZONTAL_WEIGHT: f64 = 0.3;
const VERTICAL_WEIGHT: f64 = 0.3;

const NOISE_AMPLITUDE: f64 = 0.1;
const CENTER_BIAS: f64 = 0.5;
const BRIGHTNESS_SCALE: f64 = 0.8;

/// Time-and-distance reveal mask centered on the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpiralMask {
    center_x: f64,
    center_y: f64,
    max_distance: f64,
}

impl SpiralMask {
    /// Creates the mask for a surface of `width` x `height` logical pixels.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        let center_x = round_half_up(width / 2.0);
        let center_y = round_half_up(height / 2.0);
        let max_distance = center_x.hypot(center_y);

        Self { center_x, center_y, max_distance }
    }

    /// Returns true if the surface has no extent to measure distances against.
    ///
    /// Degenerate masks treat every point as the center, so the reveal is
    /// driven by time alone.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.max_distance.is_nan() || self.max_distance <= 0.0
    }

    /// Distance term of the reveal: 0 at the center, 1.5 at the corners.
    #[must_use]
    pub fn spiral_distance(&self, x: f64, y: f64) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }

        let distance = (x - self.center_x).hypot(y - self.center_y);
        distance / self.max_distance * SPIRAL_SPREAD
    }

    /// Reveal progress in `[0, 1]` for the pixel at `(x, y)`.
    ///
    /// Points at or below zero are not drawn; the value doubles as glyph opacity.
    #[must_use]
    pub fn progress(&self, x: f64, y: f64, elapsed_ms: f64, timing: &RevealTiming) -> f64 {
        clamp(timing.time_progress(elapsed_ms) - self.spiral_distance(x, y), 0.0, 1.0)
    }
}

/// Brightness in `[0, 1]` of a cell at normalized coordinates.
///
/// Three superposed waves (radial, horizontal, vertical) plus a small noise
/// term and a bias towards the center, scaled by the cell's reveal progress.
#[must_use]
pub fn brightness(nx: f64, ny: f64, elapsed: f64, reveal: f64) -> f64 {
    let distance = nx.hypot(ny);

    let radial = (distance * 4.0 + elapsed * 0.8).sin() * 0.5 + 0.5;
    let horizontal = (nx * 3.0 + elapsed * 0.6).sin() * 0.5 + 0.5;
    let vertical = (ny * 2.0 + elapsed * 0.4).cos() * 0.5 + 0.5;

    let wave = radial * RADIAL_WEIGHT + horizontal * HORIZONTAL_WEIGHT + vertical * VERTICAL_WEIGHT;
    let noise = (nx * ny * 10.0 + elapsed * 1.2).sin() * NOISE_AMPLITUDE;

    clamp(
        (wave + (1.0 - distance) * CENTER_BIAS + noise) * BRIGHTNESS_SCALE * reveal,
        0.0,
        1.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask() -> SpiralMask {
        SpiralMask::new(1200.0, 800.0)
    }

    #[test]
    fn test_nothing_revealed_at_start() {
        let timing = RevealTiming::default();
        let mask = mask();

        for (x, y) in [(0.0, 0.0), (600.0, 400.0), (588.0, 380.0), (1188.0, 780.0)] {
            assert_eq!(mask.progress(x, y, 0.0, &timing), 0.0, "revealed at ({x}, {y})");
        }
    }

    #[test]
    fn test_center_reveals_first() {
        let timing = RevealTiming::default();
        let mask = mask();

        // the exact center has no distance term, so any positive time shows it
        assert!(mask.progress(600.0, 400.0, 1.0, &timing) > 0.0);
        assert_eq!(mask.progress(0.0, 0.0, 1.0, &timing), 0.0);
    }

    #[test]
    fn test_saturates_within_reach() {
        let timing = RevealTiming::default();
        let mask = mask();

        // the spiral distance term stays <= 1 within two thirds of the corner radius
        for (x, y) in [(600.0, 400.0), (300.0, 200.0), (900.0, 600.0), (200.0, 400.0)] {
            assert!(mask.spiral_distance(x, y) <= 1.0);
            assert_eq!(mask.progress(x, y, 1e9, &timing), 1.0, "not saturated at ({x}, {y})");
        }
    }

    #[test]
    fn test_corners_settle_at_half_opacity() {
        let timing = RevealTiming::default();
        let mask = mask();

        assert!((mask.spiral_distance(0.0, 0.0) - 1.5).abs() < 1e-12);
        assert!((mask.progress(0.0, 0.0, 1e9, &timing) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_reveal_grows_over_time() {
        let timing = RevealTiming::default();
        let mask = mask();

        let mut previous = 0.0;
        for ms in (0..=6000).step_by(250) {
            let progress = mask.progress(300.0, 200.0, f64::from(ms), &timing);
            assert!(progress >= previous);
            previous = progress;
        }
    }

    #[test]
    fn test_degenerate_surface() {
        let timing = RevealTiming::default();
        let mask = SpiralMask::new(0.0, 0.0);

        assert!(mask.is_degenerate());
        assert_eq!(mask.spiral_distance(0.0, 0.0), 0.0);
        assert_eq!(mask.progress(0.0, 0.0, 0.0, &timing), 0.0);
        assert_eq!(mask.progress(0.0, 0.0, 1500.0, &timing), 0.5);
        assert!(!mask.progress(12.0, 20.0, 1500.0, &timing).is_nan());
    }

    #[test]
    fn test_brightness_range() {
        for elapsed in [0.0, 0.5, 3.7, 120.0] {
            for step in 0..=20 {
                let nx = f64::from(step) / 10.0 - 1.0;
                for ny in [-1.0, -0.3, 0.0, 0.6, 0.95] {
                    for reveal in [0.01, 0.5, 1.0] {
                        let b = brightness(nx, ny, elapsed, reveal);
                        assert!((0.0..=1.0).contains(&b), "b={b} at ({nx}, {ny}, {elapsed})");
                    }
                }
            }
        }
    }

    #[test]
    fn test_brightness_scales_with_reveal() {
        assert_eq!(brightness(0.2, -0.4, 1.0, 0.0), 0.0);

        let dim = brightness(0.2, -0.4, 1.0, 0.25);
        let bright = brightness(0.2, -0.4, 1.0, 0.5);
        assert!(bright > dim);
    }

    #[test]
    fn test_brightness_center_at_start() {
        // distance 0: radial 0.5, horizontal 0.5, vertical 1.0, no noise, full bias
        let expected = (0.4 * 0.5 + 0.3 * 0.5 + 0.3 * 1.0 + 0.5) * 0.8;
        assert!((brightness(0.0, 0.0, 0.0, 1.0) - expected).abs() < 1e-12);
    }
}
