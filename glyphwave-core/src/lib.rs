//! Platform-agnostic ASCII wave-field animation.
//!
//! Each frame paints a character grid whose brightness follows a set of
//! superposed waves, revealed by a spiral front sweeping out from the center,
//! with a logo that morphs from random glyphs into its final shape. The
//! platform supplies a [`Surface`], a [`DrawContext`] and a
//! [`FrameScheduler`]; the [`HostAdapter`] rebuilds the animation when the
//! viewport settles on a new size.

pub mod clock;
pub mod easing;
pub mod engine;
pub mod error;
pub mod field;
pub mod grid;
pub mod host;
pub mod logo;
pub mod palette;
pub mod profile;
pub mod style;

pub use clock::{AnimationClock, FrameState, RevealTiming};
pub use engine::{DrawContext, Engine, EngineBuilder, FrameOutcome, FramePainter, FrameScheduler, Surface};
pub use error::Error;
pub use grid::GridMetrics;
pub use host::{Animation, HostAdapter, Mount, RESIZE_QUIET_PERIOD_MS, ResizeOutcome, Viewport};
pub use logo::{GlyphSampler, LOGO_ROWS, Logo, LogoBounds, LogoOrigin};
pub use palette::Palette;
pub use profile::{DeviceClass, MOBILE_BREAKPOINT, RenderProfile};
pub use style::{FontWeight, GlyphFont, Rgba, Theme};
