use std::{cell::RefCell, rc::Rc};

use glyphwave_core::{
    Animation, Engine, EngineBuilder, GridMetrics, HostAdapter, MOBILE_BREAKPOINT, Mount,
    RESIZE_QUIET_PERIOD_MS, RenderProfile, ResizeOutcome, RevealTiming, Theme, Viewport,
};
use web_sys::{HtmlCanvasElement, Window, console};

use crate::{
    Error,
    canvas::{CanvasContext, CanvasSurface},
    frame::RafScheduler,
    js,
    resize::ResizeListener,
};

type CanvasEngine = Engine<CanvasContext, RafScheduler>;

/// Animated ASCII wave-field background bound to a canvas element.
///
/// `Background` mounts one animation sized to the canvas, then watches the
/// window for resizes. Once the viewport settles on a size or device class
/// that differs from the one in use, the running animation is stopped and a
/// fresh one is built in its place. Dropping the background (or calling
/// [`Background::unmount`]) stops the animation and detaches all listeners.
///
/// A failure to build the animation is logged to the console and leaves the
/// canvas untouched; it never propagates into the page.
///
/// # Examples
///
/// ```rust,no_run
/// use glyphwave_web::Background;
///
/// let background = Background::builder("#background").build().unwrap();
/// assert!(background.is_running());
/// ```
pub struct Background {
    host: Rc<RefCell<HostAdapter<CanvasMount>>>,
    resize: Option<ResizeListener>,
}

impl Background {
    /// Creates a new background builder for the specified canvas.
    ///
    /// # Parameters
    /// * `canvas` - CSS selector or `HtmlCanvasElement`
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use glyphwave_web::Background;
    /// use web_sys::HtmlCanvasElement;
    ///
    /// let background = Background::builder("#hero canvas").build().unwrap();
    ///
    /// let canvas: &HtmlCanvasElement = unimplemented!("document.query_selector(...)");
    /// let background = Background::builder(canvas).build().unwrap();
    /// ```
    #[allow(private_bounds)]
    pub fn builder(canvas: impl Into<CanvasSource>) -> BackgroundBuilder {
        BackgroundBuilder::new(canvas.into())
    }

    /// Returns true while an animation is mounted and its frame loop is active.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.host
            .borrow()
            .active()
            .is_some_and(CanvasAnimation::is_running)
    }

    /// Returns the character grid of the mounted animation.
    #[must_use]
    pub fn grid(&self) -> Option<GridMetrics> {
        self.host
            .borrow()
            .active()
            .map(CanvasAnimation::grid)
    }

    /// Returns the viewport the current animation was built for.
    #[must_use]
    pub fn viewport(&self) -> Option<Viewport> {
        self.host.borrow().applied_viewport()
    }

    /// Stops the animation and detaches the resize listener.
    ///
    /// Pending resize timers are cancelled; calling this more than once is a
    /// no-op.
    pub fn unmount(&mut self) {
        self.resize = None;
        self.host.borrow_mut().unmount();
    }
}

impl Drop for Background {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl std::fmt::Debug for Background {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let host = self.host.borrow();
        f.debug_struct("Background")
            .field("mounted", &host.is_mounted())
            .field("viewport", &host.applied_viewport())
            .field("resize", &self.resize)
            .finish()
    }
}

/// Canvas source for creating a background.
#[derive(Debug)]
enum CanvasSource {
    /// CSS selector string for canvas lookup (e.g., "#background", "canvas").
    Selector(String),
    /// Direct reference to an existing canvas element.
    Element(HtmlCanvasElement),
}

impl<'a> From<&'a str> for CanvasSource {
    fn from(selector: &'a str) -> Self {
        CanvasSource::Selector(selector.to_string())
    }
}

impl From<HtmlCanvasElement> for CanvasSource {
    fn from(element: HtmlCanvasElement) -> Self {
        CanvasSource::Element(element)
    }
}

impl<'a> From<&'a HtmlCanvasElement> for CanvasSource {
    fn from(value: &'a HtmlCanvasElement) -> Self {
        value.clone().into()
    }
}

/// Builder for configuring and creating a [`Background`].
///
/// # Examples
///
/// ```rust,no_run
/// use glyphwave_web::{Background, Rgba, Theme};
///
/// let theme = Theme { background: Rgba::from_hex(0x000000), ..Theme::default() };
/// let background = Background::builder("#background")
///     .theme(theme)
///     .breakpoint(640.0)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug)]
pub struct BackgroundBuilder {
    canvas: CanvasSource,
    breakpoint: f64,
    theme: Theme,
    timing: RevealTiming,
    quiet_period_ms: f64,
}

impl BackgroundBuilder {
    fn new(canvas: CanvasSource) -> Self {
        BackgroundBuilder {
            canvas,
            breakpoint: MOBILE_BREAKPOINT,
            theme: Theme::default(),
            timing: RevealTiming::default(),
            quiet_period_ms: RESIZE_QUIET_PERIOD_MS,
        }
    }

    /// Sets the viewport width, in logical pixels, at or below which the
    /// mobile profile is used.
    #[must_use]
    pub fn breakpoint(mut self, breakpoint: f64) -> Self {
        self.breakpoint = breakpoint;
        self
    }

    /// Sets the background, logo and glyph colors.
    #[must_use]
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Sets the intro timing.
    #[must_use]
    pub fn timing(mut self, timing: RevealTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Sets how long resize events must stop before the animation is rebuilt.
    #[must_use]
    pub fn quiet_period_ms(mut self, quiet_period_ms: f64) -> Self {
        self.quiet_period_ms = quiet_period_ms;
        self
    }

    /// Mounts the animation and starts tracking window resizes.
    ///
    /// # Errors
    /// Returns [`Error::Initialization`] if the window or canvas cannot be
    /// found, or [`Error::Callback`] if the resize listener cannot be
    /// attached. Failing to build the animation itself is logged, not
    /// returned.
    pub fn build(self) -> Result<Background, Error> {
        let canvas = match self.canvas {
            CanvasSource::Selector(selector) => js::get_canvas_by_selector(&selector)?,
            CanvasSource::Element(element) => element,
        };
        let window = js::window()?;
        let breakpoint = self.breakpoint;

        let mount = CanvasMount {
            canvas,
            window: window.clone(),
            theme: self.theme,
            timing: self.timing,
        };
        let host = HostAdapter::new(mount).with_quiet_period(self.quiet_period_ms);
        let host = Rc::new(RefCell::new(host));

        if let Err(e) = host.borrow_mut().mount(js::viewport(&window, breakpoint)) {
            console::error_1(&format!("glyphwave: {e}").into());
        }

        let on_resize = {
            let host = Rc::downgrade(&host);
            let window = window.clone();
            move || {
                if let Some(host) = host.upgrade() {
                    let viewport = js::viewport(&window, breakpoint);
                    host.borrow_mut()
                        .notify_resize(viewport, js::now_ms(&window));
                }
            }
        };

        let on_settle = {
            let host = Rc::downgrade(&host);
            let window = window.clone();
            move || {
                let host = host.upgrade()?;
                let mut host = host.borrow_mut();
                let now = js::now_ms(&window);
                match host.poll(now) {
                    Ok(outcome) => rearm_delay(outcome, host.deadline(), now),
                    Err(e) => {
                        console::error_1(&format!("glyphwave: {e}").into());
                        None
                    },
                }
            }
        };

        let resize = ResizeListener::new(&window, self.quiet_period_ms, on_resize, on_settle)?;

        Ok(Background { host, resize: Some(resize) })
    }
}

/// Delay until the resize timer must fire again, if the resize is still pending.
fn rearm_delay(outcome: ResizeOutcome, deadline: Option<f64>, now_ms: f64) -> Option<f64> {
    match outcome {
        ResizeOutcome::Pending => deadline.map(|deadline| (deadline - now_ms).max(0.0)),
        ResizeOutcome::Idle | ResizeOutcome::Suppressed | ResizeOutcome::Remounted => None,
    }
}

/// Builds canvas-backed engines for the host adapter.
struct CanvasMount {
    canvas: HtmlCanvasElement,
    window: Window,
    theme: Theme,
    timing: RevealTiming,
}

impl Mount for CanvasMount {
    type Instance = CanvasAnimation;

    fn mount(&mut self, viewport: &Viewport) -> Result<CanvasAnimation, glyphwave_core::Error> {
        let surface = CanvasSurface::new(self.canvas.clone());
        let scheduler = RafScheduler::new(self.window.clone());
        let slot = scheduler.callback_slot();

        let engine = EngineBuilder::new()
            .profile(RenderProfile::for_device(viewport.device))
            .theme(self.theme)
            .timing(self.timing)
            .sampler(fastrand::Rng::with_seed(js::random_seed()))
            .build(&surface, scheduler)?;
        let engine = Rc::new(RefCell::new(engine));

        // the frame callback only holds a weak handle; the host owns the engine
        let weak_engine = Rc::downgrade(&engine);
        RafScheduler::bind(&slot, move |timestamp| {
            let Some(engine) = weak_engine.upgrade() else { return };
            if let Err(e) = engine.borrow_mut().tick(timestamp) {
                console::error_1(&format!("glyphwave: animation halted: {e}").into());
            }
        });

        Ok(CanvasAnimation { engine })
    }
}

/// A mounted engine, shared with its frame callback.
struct CanvasAnimation {
    engine: Rc<RefCell<CanvasEngine>>,
}

impl CanvasAnimation {
    fn is_running(&self) -> bool {
        self.engine.borrow().is_running()
    }

    fn grid(&self) -> GridMetrics {
        *self.engine.borrow().grid()
    }
}

impl Animation for CanvasAnimation {
    fn start(&mut self) -> Result<(), glyphwave_core::Error> {
        self.engine.borrow_mut().start()
    }

    fn stop(&mut self) {
        self.engine.borrow_mut().stop();
    }
}
