//! Terminal stand-ins for the drawing surface and the frame scheduler.
//!
//! The animation runs on a virtual pixel surface sized so that every glyph
//! cell lands on exactly one terminal cell.

use glyphwave_core::{DrawContext, Error, FontWeight, FrameScheduler, GlyphFont, Rgba, Surface};

/// One terminal cell of a painted frame; colors are already opaque.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BufferCell {
    pub glyph: char,
    pub color: Rgba,
    pub bold: bool,
}

impl BufferCell {
    fn blank(background: Rgba) -> Self {
        Self { glyph: ' ', color: background, bold: false }
    }
}

/// Virtual surface of `cols` x `rows` cells of `cell_width` x `cell_height` pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerminalSurface {
    cols: u16,
    rows: u16,
    cell_width: f64,
    cell_height: f64,
}

impl TerminalSurface {
    pub fn new(cols: u16, rows: u16, (cell_width, cell_height): (f64, f64)) -> Self {
        Self { cols, rows, cell_width, cell_height }
    }
}

impl Surface for TerminalSurface {
    type Context = FrameBuffer;

    fn logical_size(&self) -> (f64, f64) {
        (
            f64::from(self.cols) * self.cell_width,
            f64::from(self.rows) * self.cell_height,
        )
    }

    fn context_2d(&self) -> Option<FrameBuffer> {
        Some(FrameBuffer::new(self.cols, self.rows, self.cell_width, self.cell_height))
    }
}

/// Cell buffer the engine paints into; read back by the UI after each frame.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    cols: usize,
    rows: usize,
    cell_width: f64,
    cell_height: f64,
    background: Rgba,
    cells: Vec<BufferCell>,
}

impl FrameBuffer {
    pub fn new(cols: u16, rows: u16, cell_width: f64, cell_height: f64) -> Self {
        let (cols, rows) = (usize::from(cols), usize::from(rows));
        let background = Rgba::rgb(0, 0, 0);

        Self {
            cols,
            rows,
            cell_width,
            cell_height,
            background,
            cells: vec![BufferCell::blank(background); cols * rows],
        }
    }

    /// Buffer size in cells, as `(cols, rows)`.
    pub fn size(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    /// Background of the most recent frame.
    pub fn background(&self) -> Rgba {
        self.background
    }

    pub fn cell(&self, col: usize, row: usize) -> Option<&BufferCell> {
        if col < self.cols && row < self.rows {
            self.cells.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Maps a glyph's pixel origin onto a cell index.
    fn cell_index(&self, x: f64, y: f64) -> Option<usize> {
        let col = (x / self.cell_width).round();
        let row = (y / self.cell_height).round();

        let in_bounds = |v: f64, len: usize| v >= 0.0 && v < len as f64;
        (in_bounds(col, self.cols) && in_bounds(row, self.rows))
            .then(|| row as usize * self.cols + col as usize)
    }
}

impl DrawContext for FrameBuffer {
    fn fill_background(&mut self, _width: f64, _height: f64, color: Rgba) {
        self.background = color.over(Rgba::rgb(0, 0, 0));
        self.cells.fill(BufferCell::blank(self.background));
    }

    fn draw_glyph(&mut self, glyph: char, x: f64, y: f64, font: GlyphFont, color: Rgba) {
        let Some(idx) = self.cell_index(x, y) else { return };

        self.cells[idx] = BufferCell {
            glyph,
            color: color.over(self.background),
            bold: font.weight == FontWeight::Heavy,
        };
    }
}

/// Frame scheduler driven by the UI's tick events.
///
/// A request marks the engine as due for the next tick; the UI loop checks
/// [`TickScheduler::is_pending`] before ticking the engine.
#[derive(Debug, Default)]
pub struct TickScheduler {
    next_handle: u64,
    pending: Option<u64>,
}

impl TickScheduler {
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl FrameScheduler for TickScheduler {
    type Handle = u64;

    fn request_frame(&mut self) -> Result<u64, Error> {
        self.next_handle += 1;
        self.pending = Some(self.next_handle);
        Ok(self.next_handle)
    }

    fn cancel_frame(&mut self, handle: u64) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}
