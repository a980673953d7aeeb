//! Canvas 2D implementation of the engine's drawing seams.

use glyphwave_core::{DrawContext, FontWeight, GlyphFont, Rgba, Surface};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const FONT_FAMILY: &str = "monospace";

/// Each glyph's baseline sits on its cell's top edge; logo and field glyphs share it.
const TEXT_BASELINE: &str = "alphabetic";

/// A canvas element sized to its on-page layout box.
///
/// The backing store is resized to the element's bounding rectangle when the
/// surface is created, so one logical pixel maps to one canvas pixel.
#[derive(Debug, Clone)]
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    width: f64,
    height: f64,
}

impl CanvasSurface {
    /// Measures `canvas` and matches its backing store to the measured size.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        let rect = canvas.get_bounding_client_rect();
        let (width, height) = (rect.width().max(0.0).floor(), rect.height().max(0.0).floor());

        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        Self { canvas, width, height }
    }

    /// Returns the underlying canvas element.
    #[must_use]
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Surface for CanvasSurface {
    type Context = CanvasContext;

    fn logical_size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn context_2d(&self) -> Option<CanvasContext> {
        let ctx = self
            .canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;

        ctx.set_text_baseline(TEXT_BASELINE);

        Some(CanvasContext::new(ctx))
    }
}

/// Draws glyphs with `fillText`, skipping redundant font and fill updates.
#[derive(Debug)]
pub struct CanvasContext {
    ctx: CanvasRenderingContext2d,
    font: Option<GlyphFont>,
    fill: Option<Rgba>,
}

impl CanvasContext {
    fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx, font: None, fill: None }
    }

    fn set_font(&mut self, font: GlyphFont) {
        if self.font != Some(font) {
            self.ctx.set_font(&build_font_string(font));
            self.font = Some(font);
        }
    }

    fn set_fill(&mut self, color: Rgba) {
        if self.fill != Some(color) {
            self.ctx.set_fill_style_str(&color.to_string());
            self.fill = Some(color);
        }
    }
}

impl DrawContext for CanvasContext {
    fn fill_background(&mut self, width: f64, height: f64, color: Rgba) {
        self.set_fill(color);
        self.ctx.fill_rect(0.0, 0.0, width, height);
    }

    fn draw_glyph(&mut self, glyph: char, x: f64, y: f64, font: GlyphFont, color: Rgba) {
        self.set_font(font);
        self.set_fill(color);

        let mut buf = [0u8; 4];
        // a failed glyph only leaves its cell blank
        let _ = self.ctx.fill_text(glyph.encode_utf8(&mut buf), x, y);
    }
}

/// Builds a CSS font string for a glyph font.
fn build_font_string(font: GlyphFont) -> String {
    let size = font.size_px;
    match font.weight {
        FontWeight::Regular => format!("{size}px {FONT_FAMILY}"),
        FontWeight::Heavy => format!("900 {size}px {FONT_FAMILY}"),
    }
}
