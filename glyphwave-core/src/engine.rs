//! The animation engine.
//!
//! An [`Engine`] binds a 2D drawing context and a [`FrameScheduler`]. Once
//! started, every scheduled frame paints the whole grid and requests the
//! next frame; only [`Engine::stop`] (or dropping the engine) ends the loop.
//!
//! # Example
//!
//! ```ignore
//! let mut engine = EngineBuilder::new()
//!     .profile(RenderProfile::for_device(device))
//!     .build(&surface, scheduler)?;
//!
//! engine.start()?;
//! // from the platform's frame callback:
//! engine.tick(timestamp_ms)?;
//! ```

use std::{fmt, mem};

use tracing::{debug, trace, warn};

use crate::{
    Error,
    clock::{AnimationClock, RevealTiming},
    field::{SpiralMask, brightness},
    grid::GridMetrics,
    logo::{GlyphSampler, Logo, LogoOrigin},
    profile::RenderProfile,
    style::{GlyphFont, Rgba, Theme},
};

/// A drawable area that can hand out a 2D drawing context.
pub trait Surface {
    /// Drawing context handed out by the surface.
    type Context: DrawContext;

    /// Size in logical (CSS) pixels, not device pixels.
    fn logical_size(&self) -> (f64, f64);

    /// Acquires the 2D drawing context, or `None` if the surface has none.
    fn context_2d(&self) -> Option<Self::Context>;
}

/// Immediate-mode drawing operations used by the painter.
pub trait DrawContext {
    /// Fills the rectangle `(0, 0, width, height)`.
    fn fill_background(&mut self, width: f64, height: f64, color: Rgba);

    /// Draws a single glyph with its top-left corner at `(x, y)`.
    fn draw_glyph(&mut self, glyph: char, x: f64, y: f64, font: GlyphFont, color: Rgba);
}

/// Display-synchronized frame callback source.
///
/// Implementations invoke [`Engine::tick`] once per requested frame.
pub trait FrameScheduler {
    /// Identifies a pending frame request.
    type Handle;

    /// Requests a single frame callback.
    fn request_frame(&mut self) -> Result<Self::Handle, Error>;

    /// Cancels a pending frame callback.
    fn cancel_frame(&mut self, handle: Self::Handle);
}

/// What a frame callback did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The engine was stopped; nothing was drawn or scheduled.
    Idle,
    /// Dropped by the frame-skip factor.
    Skipped,
    /// The grid was painted.
    Painted {
        /// Cells covered by the logo, blanks included.
        logo_cells: usize,
        /// Revealed wave-field cells.
        background_cells: usize,
    },
}

/// Paints complete frames: background fill, logo overlay and wave field.
pub struct FramePainter {
    grid: GridMetrics,
    mask: SpiralMask,
    logo: Logo,
    logo_origin: LogoOrigin,
    profile: RenderProfile,
    theme: Theme,
    timing: RevealTiming,
    clock: AnimationClock,
    frame_counter: u64,
    sampler: Box<dyn GlyphSampler>,
}

impl FramePainter {
    fn new(
        width: f64,
        height: f64,
        profile: RenderProfile,
        theme: Theme,
        timing: RevealTiming,
        logo: Logo,
        sampler: Box<dyn GlyphSampler>,
    ) -> Self {
        let (cell_width, cell_height) = profile.cell_size();
        let grid = GridMetrics::new(width, height, cell_width, cell_height);
        let mask = SpiralMask::new(grid.width, grid.height);
        let logo_origin = logo.centered_in(&grid);

        Self {
            grid,
            mask,
            logo,
            logo_origin,
            profile,
            theme,
            timing,
            clock: AnimationClock::new(),
            frame_counter: 0,
            sampler,
        }
    }

    /// Paints one frame for the timestamp `now_ms`.
    pub fn paint(&mut self, ctx: &mut impl DrawContext, now_ms: f64) -> FrameOutcome {
        let frame_skip = u64::from(self.profile.frame_skip());
        if frame_skip > 1 {
            self.frame_counter += 1;
            if self.frame_counter % frame_skip != 0 {
                return FrameOutcome::Skipped;
            }
        }

        let frame = self.clock.frame(now_ms, &self.timing);

        ctx.fill_background(self.grid.width, self.grid.height, self.theme.background);

        let (_, cell_height) = self.profile.cell_size();
        let logo_font = GlyphFont::logo(cell_height);
        let field_font = GlyphFont::field(cell_height);

        let mut logo_cells = 0;
        let mut background_cells = 0;

        for row in 0..self.grid.rows {
            for col in 0..self.grid.cols {
                let (x, y) = self.grid.cell_origin(col, row);

                let logo_glyph = self.logo.glyph_at(
                    col,
                    row,
                    self.logo_origin,
                    frame.logo_progress,
                    self.sampler.as_mut(),
                );
                if let Some(glyph) = logo_glyph {
                    ctx.draw_glyph(glyph, x, y, logo_font, self.theme.logo);
                    logo_cells += 1;
                    continue;
                }

                let reveal = self.mask.progress(x, y, frame.elapsed_ms, &self.timing);
                if reveal <= 0.0 {
                    continue;
                }

                let (nx, ny) = self.grid.normalized(col, row);
                let glyph = self
                    .profile
                    .palette()
                    .glyph_for(brightness(nx, ny, frame.elapsed, reveal));

                ctx.draw_glyph(glyph, x, y, field_font, self.theme.glyph.with_alpha(reveal));
                background_cells += 1;
            }
        }

        FrameOutcome::Painted { logo_cells, background_cells }
    }

    /// Character grid the painter covers.
    pub fn grid(&self) -> &GridMetrics {
        &self.grid
    }

    /// Top-left cell of the centered logo.
    pub fn logo_origin(&self) -> LogoOrigin {
        self.logo_origin
    }

    /// Profile the painter was built with.
    pub fn profile(&self) -> &RenderProfile {
        &self.profile
    }
}

impl fmt::Debug for FramePainter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FramePainter")
            .field("grid", &self.grid)
            .field("logo_origin", &self.logo_origin)
            .field("device", &self.profile.device())
            .field("clock", &self.clock)
            .field("frame_counter", &self.frame_counter)
            .finish_non_exhaustive()
    }
}

enum LoopState<H> {
    Idle,
    Running(H),
}

/// ASCII wave-field animation bound to a drawing context and a frame scheduler.
pub struct Engine<C: DrawContext, S: FrameScheduler> {
    context: C,
    scheduler: S,
    painter: FramePainter,
    state: LoopState<S::Handle>,
}

impl<C: DrawContext, S: FrameScheduler> Engine<C, S> {
    /// Binds an engine with the default theme, timing and logo to `surface`.
    ///
    /// # Errors
    /// Returns [`Error::Initialization`] if the surface has no 2D context.
    pub fn create<Src>(surface: &Src, scheduler: S, profile: RenderProfile) -> Result<Self, Error>
    where
        Src: Surface<Context = C>,
    {
        EngineBuilder::new()
            .profile(profile)
            .build(surface, scheduler)
    }

    /// Schedules the first frame. Ignored if the engine is already running.
    ///
    /// # Errors
    /// Returns [`Error::Scheduling`] if the frame request is refused.
    pub fn start(&mut self) -> Result<(), Error> {
        if self.is_running() {
            warn!("start() called on a running engine; ignoring");
            return Ok(());
        }

        let handle = self.scheduler.request_frame()?;
        self.state = LoopState::Running(handle);
        debug!(grid = ?self.painter.grid().size(), "animation started");
        Ok(())
    }

    /// Cancels the pending frame, if any. Safe to call in any state.
    pub fn stop(&mut self) {
        if let LoopState::Running(handle) = mem::replace(&mut self.state, LoopState::Idle) {
            self.scheduler.cancel_frame(handle);
            debug!("animation stopped");
        }
    }

    /// Frame callback: paints a frame and requests the next one.
    ///
    /// # Errors
    /// Returns [`Error::Scheduling`] if the next frame cannot be requested;
    /// the engine is then idle.
    pub fn tick(&mut self, now_ms: f64) -> Result<FrameOutcome, Error> {
        // the pending handle has fired, so there is nothing left to cancel
        if let LoopState::Idle = mem::replace(&mut self.state, LoopState::Idle) {
            trace!("frame callback on idle engine");
            return Ok(FrameOutcome::Idle);
        }

        let outcome = self.painter.paint(&mut self.context, now_ms);

        match self.scheduler.request_frame() {
            Ok(handle) => {
                self.state = LoopState::Running(handle);
                Ok(outcome)
            },
            Err(e) => {
                warn!(error = %e, "failed to schedule next frame; animation halted");
                Err(e)
            },
        }
    }

    /// Returns true while a frame is pending.
    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self.state, LoopState::Running(_))
    }

    /// Returns the character grid.
    pub fn grid(&self) -> &GridMetrics {
        self.painter.grid()
    }

    /// Returns the top-left cell of the centered logo.
    pub fn logo_origin(&self) -> LogoOrigin {
        self.painter.logo_origin()
    }

    /// Profile selected at construction.
    pub fn profile(&self) -> &RenderProfile {
        self.painter.profile()
    }

    /// Returns the drawing context the engine paints into.
    pub fn context(&self) -> &C {
        &self.context
    }

    /// Returns the frame scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}

impl<C: DrawContext, S: FrameScheduler> Drop for Engine<C, S> {
    fn drop(&mut self) {
        self.stop();
    }
}

impl<C: DrawContext, S: FrameScheduler> fmt::Debug for Engine<C, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("running", &self.is_running())
            .field("painter", &self.painter)
            .finish_non_exhaustive()
    }
}

/// Builder for configuring and creating an [`Engine`].
///
/// # Examples
///
/// ```ignore
/// let engine = EngineBuilder::new()
///     .profile(RenderProfile::mobile())
///     .theme(Theme { background: Rgba::from_hex(0x000000), ..Theme::default() })
///     .sampler(fastrand::Rng::with_seed(42))
///     .build(&surface, scheduler)?;
/// ```
pub struct EngineBuilder {
    profile: RenderProfile,
    theme: Theme,
    timing: RevealTiming,
    logo: Logo,
    sampler: Option<Box<dyn GlyphSampler>>,
}

impl EngineBuilder {
    /// Creates a builder with the desktop profile, default theme, timing and logo.
    #[must_use]
    pub fn new() -> Self {
        Self {
            profile: RenderProfile::default(),
            theme: Theme::default(),
            timing: RevealTiming::default(),
            logo: Logo::default(),
            sampler: None,
        }
    }

    /// Sets the device profile: cell size, glyph palette and frame skip.
    #[must_use]
    pub fn profile(mut self, profile: RenderProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Sets the background, logo and glyph colors.
    #[must_use]
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Sets the logo morph, reveal and fill durations.
    #[must_use]
    pub fn timing(mut self, timing: RevealTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Replaces the built-in logo.
    #[must_use]
    pub fn logo(mut self, logo: Logo) -> Self {
        self.logo = logo;
        self
    }

    /// Sets the random source for the logo morph. Defaults to an
    /// entropy-seeded [`fastrand::Rng`].
    #[must_use]
    pub fn sampler(mut self, sampler: impl GlyphSampler + 'static) -> Self {
        self.sampler = Some(Box::new(sampler));
        self
    }

    /// Binds the engine to `surface`. The engine starts out idle.
    ///
    /// # Errors
    /// Returns [`Error::Initialization`] if the surface has no 2D context.
    pub fn build<Src, S>(self, surface: &Src, scheduler: S) -> Result<Engine<Src::Context, S>, Error>
    where
        Src: Surface,
        S: FrameScheduler,
    {
        let context = surface
            .context_2d()
            .ok_or_else(Error::context_unavailable)?;

        let (width, height) = surface.logical_size();
        let sampler = self
            .sampler
            .unwrap_or_else(|| Box::new(fastrand::Rng::new()));

        let painter = FramePainter::new(
            width,
            height,
            self.profile,
            self.theme,
            self.timing,
            self.logo,
            sampler,
        );

        debug!(
            width,
            height,
            grid = ?painter.grid().size(),
            logo_origin = ?painter.logo_origin(),
            device = ?painter.profile().device(),
            "engine created"
        );

        Ok(Engine { context, scheduler, painter, state: LoopState::Idle })
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EngineBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineBuilder")
            .field("profile", &self.profile)
            .field("theme", &self.theme)
            .field("timing", &self.timing)
            .field("logo", &self.logo)
            .field("custom_sampler", &self.sampler.is_some())
            .finish()
    }
}
