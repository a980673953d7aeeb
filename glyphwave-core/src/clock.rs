//! Intro timing and the lazily anchored animation clock.

use crate::easing::clamp;

/// Durations driving the intro: logo morph, spiral reveal and fill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealTiming {
    /// Time for logo glyphs to settle on their targets, in ms.
    pub logo_transition_ms: f64,
    /// Time for the spiral front to sweep outward, in ms.
    pub reveal_ms: f64,
    /// Time, starting after the reveal, to fill the remaining space, in ms.
    pub fill_ms: f64,
}

impl Default for RevealTiming {
    fn default() -> Self {
        Self { logo_transition_ms: 2000.0, reveal_ms: 3000.0, fill_ms: 2000.0 }
    }
}

impl RevealTiming {
    /// Combined reveal and fill ramps at `elapsed_ms`; ranges over `[0, 2]`.
    #[must_use]
    pub fn time_progress(&self, elapsed_ms: f64) -> f64 {
        let reveal = ramp(elapsed_ms, self.reveal_ms).min(1.0);
        let fill = clamp(ramp(elapsed_ms - self.reveal_ms, self.fill_ms), 0.0, 1.0);

        reveal + fill
    }

    /// Logo morph progress in `[0, 1]` at `elapsed_ms` since the transition started.
    #[must_use]
    pub fn logo_progress(&self, elapsed_ms: f64) -> f64 {
        clamp(ramp(elapsed_ms, self.logo_transition_ms), 0.0, 1.0)
    }
}

/// `elapsed / duration`, with a zero duration treated as already complete.
fn ramp(elapsed_ms: f64, duration_ms: f64) -> f64 {
    if duration_ms > 0.0 {
        elapsed_ms / duration_ms
    } else if elapsed_ms >= 0.0 {
        1.0
    } else {
        0.0
    }
}

/// Per-frame timing values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameState {
    /// Milliseconds since the first painted frame.
    pub elapsed_ms: f64,
    /// Seconds since the first painted frame.
    pub elapsed: f64,
    /// Logo morph progress in `[0, 1]`.
    pub logo_progress: f64,
}

/// Lazily anchored animation clock.
///
/// Both anchors are unset until the first painted frame and are never reset;
/// a fresh clock comes with a fresh engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnimationClock {
    start: Option<f64>,
    logo_transition_start: Option<f64>,
}

impl AnimationClock {
    /// Creates an unanchored clock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true once the first frame has been observed.
    #[must_use]
    pub fn is_anchored(&self) -> bool {
        self.start.is_some()
    }

    /// Anchors the clock on first use and derives the frame state for `now_ms`.
    pub fn frame(&mut self, now_ms: f64, timing: &RevealTiming) -> FrameState {
        let start = *self.start.get_or_insert(now_ms);
        let logo_start = *self.logo_transition_start.get_or_insert(now_ms);

        let elapsed_ms = now_ms - start;
        FrameState {
            elapsed_ms,
            elapsed: elapsed_ms * 0.001,
            logo_progress: timing.logo_progress(now_ms - logo_start),
        }
    }
}
