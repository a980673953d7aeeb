//! Browser binding for glyphwave.
//!
//! Paints the wave-field animation onto a `<canvas>` with the 2D context,
//! drives it with `requestAnimationFrame` and rebuilds it after the window
//! settles on a new size. See [`Background`].

mod background;
mod canvas;
mod error;
mod frame;
mod resize;

pub(crate) mod js;

#[cfg(feature = "js-api")]
pub mod wasm;

pub use background::{Background, BackgroundBuilder};
pub use canvas::{CanvasContext, CanvasSurface};
pub use glyphwave_core::{DeviceClass, GridMetrics, RevealTiming, Rgba, Theme, Viewport};

pub use crate::error::Error;
