//! Character grid geometry.

/// Character grid derived from a surface size and a cell size.
///
/// Only the cell counts are stored; cell contents are recomputed every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMetrics {
    /// Surface width in logical pixels.
    pub width: f64,
    /// Surface height in logical pixels.
    pub height: f64,
    /// Cell width in logical pixels.
    pub cell_width: f64,
    /// Cell height in logical pixels.
    pub cell_height: f64,
    /// Number of whole columns that fit the surface.
    pub cols: i32,
    /// Number of whole rows that fit the surface.
    pub rows: i32,
}

impl GridMetrics {
    /// Fits as many whole cells as possible into `width` x `height`.
    ///
    /// Negative or non-finite dimensions are treated as zero.
    #[must_use]
    pub fn new(width: f64, height: f64, cell_width: f64, cell_height: f64) -> Self {
        let width = sanitize(width);
        let height = sanitize(height);

        let cols = whole_cells(width, cell_width);
        let rows = whole_cells(height, cell_height);

        Self { width, height, cell_width, cell_height, cols, rows }
    }

    /// Returns the grid size in cells as `(cols, rows)`.
    #[must_use]
    pub fn size(&self) -> (i32, i32) {
        (self.cols, self.rows)
    }

    /// Returns true if the grid has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cols == 0 || self.rows == 0
    }

    /// Top-left pixel position of a cell.
    #[must_use]
    pub fn cell_origin(&self, col: i32, row: i32) -> (f64, f64) {
        (f64::from(col) * self.cell_width, f64::from(row) * self.cell_height)
    }

    /// Maps a cell to `[-1, 1]` on both axes.
    #[must_use]
    pub fn normalized(&self, col: i32, row: i32) -> (f64, f64) {
        let nx = f64::from(col) / f64::from(self.cols) * 2.0 - 1.0;
        let ny = f64::from(row) / f64::from(self.rows) * 2.0 - 1.0;
        (nx, ny)
    }
}

fn sanitize(dimension: f64) -> f64 {
    if dimension.is_finite() { dimension.max(0.0) } else { 0.0 }
}

fn whole_cells(extent: f64, cell: f64) -> i32 {
    if cell > 0.0 { (extent / cell).floor() as i32 } else { 0 }
}
