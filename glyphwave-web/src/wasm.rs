use wasm_bindgen::prelude::*;
use web_sys::console;

use crate::{Background, Rgba, Theme};

/// JavaScript wrapper for the animated background.
///
/// Thin `#[wasm_bindgen]` wrapper that delegates to [`Background`].
#[wasm_bindgen]
#[derive(Debug)]
pub struct GlyphwaveBackground {
    background: Background,
}

/// Character grid size of a mounted animation.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy)]
pub struct GridSize {
    pub cols: i32,
    pub rows: i32,
}

#[wasm_bindgen]
impl GlyphwaveBackground {
    /// Mounts the background on the canvas matching `canvas_selector`.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_selector: &str) -> Result<GlyphwaveBackground, JsValue> {
        let background = Background::builder(canvas_selector)
            .build()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(GlyphwaveBackground { background })
    }

    /// Mounts the background with a custom breakpoint and background color.
    ///
    /// `background_color` is a `0xRRGGBB` value.
    #[wasm_bindgen(js_name = "withOptions")]
    pub fn with_options(
        canvas_selector: &str,
        breakpoint: f64,
        background_color: u32,
    ) -> Result<GlyphwaveBackground, JsValue> {
        let theme = Theme { background: Rgba::from_hex(background_color), ..Theme::default() };
        let background = Background::builder(canvas_selector)
            .breakpoint(breakpoint)
            .theme(theme)
            .build()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(GlyphwaveBackground { background })
    }

    /// Stops the animation and detaches all listeners.
    pub fn unmount(&mut self) {
        self.background.unmount();
    }

    #[wasm_bindgen(js_name = "isRunning")]
    pub fn is_running(&self) -> bool {
        self.background.is_running()
    }

    /// Returns the grid size in cells, or `undefined` when nothing is mounted.
    #[wasm_bindgen(js_name = "gridSize")]
    pub fn grid_size(&self) -> Option<GridSize> {
        self.background
            .grid()
            .map(|grid| GridSize { cols: grid.cols, rows: grid.rows })
    }
}

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    console::log_1(&"glyphwave WASM module loaded".into());
}
