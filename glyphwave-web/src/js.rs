use glyphwave_core::Viewport;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlCanvasElement, Window};

use crate::error::Error;

pub(crate) fn window() -> Result<Window, Error> {
    web_sys::window().ok_or(Error::window_not_found())
}

pub(crate) fn document() -> Result<Document, Error> {
    window().and_then(|w| w.document().ok_or(Error::document_not_found()))
}

pub(crate) fn get_canvas_by_selector(selector: &str) -> Result<HtmlCanvasElement, Error> {
    let document = document()?;
    document
        .query_selector(selector)
        .map_err(|_| Error::canvas_not_found())?
        .ok_or(Error::canvas_not_found())?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| Error::canvas_not_found())
}

/// Current viewport metrics of `window`, classified against `breakpoint`.
pub(crate) fn viewport(window: &Window, breakpoint: f64) -> Viewport {
    let dimension = |value: Result<JsValue, JsValue>| {
        value
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    };

    Viewport::new(dimension(window.inner_width()), dimension(window.inner_height()), breakpoint)
}

/// High resolution timestamp in ms, on the same timeline as frame callbacks.
pub(crate) fn now_ms(window: &Window) -> f64 {
    window
        .performance()
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Seed for the glyph sampler of a freshly mounted engine.
pub(crate) fn random_seed() -> u64 {
    let high = (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
    let low = (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
    (high << 32) | low
}

pub(crate) fn js_error_string(err: &JsValue) -> String {
    err.as_string()
        .unwrap_or_else(|| format!("{err:?}"))
}
