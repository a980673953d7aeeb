//! Interpolation and easing curves.
//!
//! All functions are pure and total over real inputs. Monotonic behavior is
//! only guaranteed when `t` is pre-clamped to `[0, 1]`.

/// Linear interpolation between `a` and `b`.
#[must_use]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// Restricts `x` to `[lo, hi]`.
///
/// Unlike [`f64::clamp`], this never panics when `lo > hi`; the upper bound wins.
#[must_use]
pub fn clamp(x: f64, lo: f64, hi: f64) -> f64 {
    x.max(lo).min(hi)
}

/// Quadratic ease-in-out, symmetric around `t = 0.5`.
#[must_use]
pub fn ease_in_out_quad(t: f64) -> f64 {
    if t < 0.5 { 2.0 * t * t } else { -1.0 + (4.0 - 2.0 * t) * t }
}

/// Exponential ease-out. `t = 1` maps exactly to `1`.
#[must_use]
pub fn ease_out_expo(t: f64) -> f64 {
    if t == 1.0 { 1.0 } else { 1.0 - 2f64.powf(-10.0 * t) }
}

/// Rounds half-way cases towards positive infinity, like `Math.round`.
///
/// [`f64::round`] rounds `-0.5` to `-1`, which would shift a logo that is
/// wider than the grid one cell further left than intended.
#[must_use]
pub fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}
