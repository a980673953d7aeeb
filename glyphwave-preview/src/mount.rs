use glyphwave_core::{Engine, EngineBuilder, Error, Mount, RenderProfile, Theme, Viewport};

use crate::surface::{FrameBuffer, TerminalSurface, TickScheduler};

/// Pixel size a terminal cell stands for when classifying the viewport.
pub const NOMINAL_CELL_SIZE: (f64, f64) = (12.0, 20.0);

pub type PreviewEngine = Engine<FrameBuffer, TickScheduler>;

/// Expresses a terminal area of `cols` x `rows` cells as a viewport.
pub fn viewport_for(cols: u16, rows: u16, breakpoint: f64) -> Viewport {
    let (cell_width, cell_height) = NOMINAL_CELL_SIZE;
    Viewport::new(f64::from(cols) * cell_width, f64::from(rows) * cell_height, breakpoint)
}

/// Builds terminal-backed engines for the host adapter.
#[derive(Debug)]
pub struct TerminalMount {
    theme: Theme,
    seed: Option<u64>,
    mounts: u64,
}

impl TerminalMount {
    pub fn new(theme: Theme, seed: Option<u64>) -> Self {
        Self { theme, seed, mounts: 0 }
    }

    /// Number of engines built so far.
    pub fn mounts(&self) -> u64 {
        self.mounts
    }
}

impl Mount for TerminalMount {
    type Instance = PreviewEngine;

    fn mount(&mut self, viewport: &Viewport) -> Result<PreviewEngine, Error> {
        let (cell_width, cell_height) = NOMINAL_CELL_SIZE;
        let cols = (viewport.width / cell_width).round() as u16;
        let rows = (viewport.height / cell_height).round() as u16;

        let profile = RenderProfile::for_device(viewport.device);
        let surface = TerminalSurface::new(cols, rows, profile.cell_size());

        // a fixed seed still varies per mount, but reproducibly
        let sampler = match self.seed {
            Some(seed) => fastrand::Rng::with_seed(seed.wrapping_add(self.mounts)),
            None => fastrand::Rng::new(),
        };
        self.mounts += 1;

        tracing::info!(cols, rows, device = ?viewport.device, "mounting animation");

        EngineBuilder::new()
            .profile(profile)
            .theme(self.theme)
            .sampler(sampler)
            .build(&surface, TickScheduler::default())
    }
}
