//! Mount/unmount lifecycle and debounced viewport tracking.
//!
//! The [`HostAdapter`] owns at most one running animation. A resize never
//! mutates the running engine; once the viewport settles, the old engine is
//! stopped and a replacement is mounted for the new size.

use tracing::{debug, trace};

use crate::{
    Error,
    engine::{DrawContext, Engine, FrameScheduler},
    profile::DeviceClass,
};

/// Quiet period a resize must settle for before the animation is rebuilt.
pub const RESIZE_QUIET_PERIOD_MS: f64 = 250.0;

/// Viewport metrics that decide whether an animation must be rebuilt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in logical pixels.
    pub width: f64,
    /// Height in logical pixels.
    pub height: f64,
    /// Classification against the breakpoint.
    pub device: DeviceClass,
}

impl Viewport {
    /// Creates a viewport and classifies it against `breakpoint`.
    #[must_use]
    pub fn new(width: f64, height: f64, breakpoint: f64) -> Self {
        Self {
            width,
            height,
            device: DeviceClass::from_viewport_width(width, breakpoint),
        }
    }
}

/// Something that can be started and stopped by the host.
pub trait Animation {
    /// Begins the frame loop.
    fn start(&mut self) -> Result<(), Error>;

    /// Ends the frame loop. Must be safe to call repeatedly.
    fn stop(&mut self);
}

impl<C: DrawContext, S: FrameScheduler> Animation for Engine<C, S> {
    fn start(&mut self) -> Result<(), Error> {
        Engine::start(self)
    }

    fn stop(&mut self) {
        Engine::stop(self);
    }
}

/// Builds a fresh animation for a viewport.
pub trait Mount {
    /// Animation type produced per mount.
    type Instance: Animation;

    /// Creates an idle animation sized for `viewport`.
    fn mount(&mut self, viewport: &Viewport) -> Result<Self::Instance, Error>;
}

/// Result of polling the resize debouncer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeOutcome {
    /// No resize notification is pending.
    Idle,
    /// A notification is pending but the quiet period has not elapsed.
    Pending,
    /// The settled viewport matched the applied one; nothing was rebuilt.
    Suppressed,
    /// The animation was stopped and rebuilt for the new viewport.
    Remounted,
}

#[derive(Debug, Clone, Copy)]
struct PendingResize {
    viewport: Viewport,
    deadline_ms: f64,
}

/// Keeps exactly one animation running per surface across resizes.
pub struct HostAdapter<M: Mount> {
    mounter: M,
    active: Option<M::Instance>,
    applied: Option<Viewport>,
    pending: Option<PendingResize>,
    quiet_period_ms: f64,
}

impl<M: Mount> HostAdapter<M> {
    /// Creates an empty host with the default quiet period.
    #[must_use]
    pub fn new(mounter: M) -> Self {
        Self {
            mounter,
            active: None,
            applied: None,
            pending: None,
            quiet_period_ms: RESIZE_QUIET_PERIOD_MS,
        }
    }

    /// Overrides the resize quiet period.
    #[must_use]
    pub fn with_quiet_period(mut self, quiet_period_ms: f64) -> Self {
        self.quiet_period_ms = quiet_period_ms;
        self
    }

    /// Stops any running animation, then mounts and starts a new one.
    ///
    /// The viewport counts as applied even when mounting fails, so an
    /// unchanged viewport does not trigger another attempt.
    ///
    /// # Errors
    /// Propagates construction and scheduling failures; the host is then
    /// left without an active animation.
    pub fn mount(&mut self, viewport: Viewport) -> Result<(), Error> {
        self.release();
        self.applied = Some(viewport);

        let mut instance = self.mounter.mount(&viewport)?;
        instance.start()?;
        self.active = Some(instance);

        debug!(width = viewport.width, height = viewport.height, device = ?viewport.device, "mounted");
        Ok(())
    }

    /// Records a resize notification; each call restarts the quiet period.
    pub fn notify_resize(&mut self, viewport: Viewport, now_ms: f64) {
        trace!(width = viewport.width, height = viewport.height, "resize pending");
        self.pending = Some(PendingResize {
            viewport,
            deadline_ms: now_ms + self.quiet_period_ms,
        });
    }

    /// Timestamp at which the pending resize settles, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<f64> {
        self.pending.map(|p| p.deadline_ms)
    }

    /// Applies a settled resize, rebuilding the animation if the viewport
    /// actually changed.
    ///
    /// # Errors
    /// Propagates failures from [`HostAdapter::mount`].
    pub fn poll(&mut self, now_ms: f64) -> Result<ResizeOutcome, Error> {
        let Some(pending) = self.pending else {
            return Ok(ResizeOutcome::Idle);
        };

        if now_ms < pending.deadline_ms {
            return Ok(ResizeOutcome::Pending);
        }

        self.pending = None;
        if self.applied == Some(pending.viewport) {
            trace!("resize suppressed; viewport unchanged");
            return Ok(ResizeOutcome::Suppressed);
        }

        self.mount(pending.viewport)?;
        Ok(ResizeOutcome::Remounted)
    }

    /// Stops the animation and drops any pending resize.
    pub fn unmount(&mut self) {
        self.pending = None;
        if self.release() {
            debug!("unmounted");
        }
    }

    /// Returns true while an animation is mounted.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.active.is_some()
    }

    /// Returns the running animation, if any.
    pub fn active(&self) -> Option<&M::Instance> {
        self.active.as_ref()
    }

    /// Mutable access to the running animation.
    pub fn active_mut(&mut self) -> Option<&mut M::Instance> {
        self.active.as_mut()
    }

    /// The last viewport passed to [`HostAdapter::mount`].
    #[must_use]
    pub fn applied_viewport(&self) -> Option<Viewport> {
        self.applied
    }

    /// Returns the mounter.
    pub fn mounter(&self) -> &M {
        &self.mounter
    }

    fn release(&mut self) -> bool {
        match self.active.take() {
            Some(mut instance) => {
                instance.stop();
                true
            },
            None => false,
        }
    }
}

impl<M: Mount> Drop for HostAdapter<M> {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::{
        engine::{
            EngineBuilder,
            tests::{CountingScheduler, FakeSurface, RecordingContext, SchedulerLog},
        },
        profile::{MOBILE_BREAKPOINT, RenderProfile},
    };

    type Events = Rc<RefCell<Vec<String>>>;

    struct FakeAnimation {
        id: usize,
        events: Events,
    }

    impl Animation for FakeAnimation {
        fn start(&mut self) -> Result<(), Error> {
            self.events.borrow_mut().push(format!("start {}", self.id));
            Ok(())
        }

        fn stop(&mut self) {
            self.events.borrow_mut().push(format!("stop {}", self.id));
        }
    }

    #[derive(Default)]
    struct FakeMount {
        mounted: usize,
        fail: bool,
        events: Events,
    }

    impl Mount for FakeMount {
        type Instance = FakeAnimation;

        fn mount(&mut self, viewport: &Viewport) -> Result<FakeAnimation, Error> {
            if self.fail {
                return Err(Error::context_unavailable());
            }

            self.mounted += 1;
            self.events
                .borrow_mut()
                .push(format!("mount {} {}x{}", self.mounted, viewport.width, viewport.height));
            Ok(FakeAnimation { id: self.mounted, events: self.events.clone() })
        }
    }

    fn viewport(width: f64, height: f64) -> Viewport {
        Viewport::new(width, height, MOBILE_BREAKPOINT)
    }

    fn host() -> (HostAdapter<FakeMount>, Events) {
        let mount = FakeMount::default();
        let events = mount.events.clone();
        (HostAdapter::new(mount), events)
    }

    #[test]
    fn test_mount_starts_animation() {
        let (mut host, events) = host();
        host.mount(viewport(1200.0, 800.0)).unwrap();

        assert!(host.is_mounted());
        assert_eq!(*events.borrow(), vec!["mount 1 1200x800", "start 1"]);
    }

    #[test]
    fn test_duplicate_resize_is_suppressed() {
        let (mut host, _) = host();
        host.mount(viewport(1200.0, 800.0)).unwrap();

        host.notify_resize(viewport(1200.0, 800.0), 1000.0);
        assert_eq!(host.poll(1250.0).unwrap(), ResizeOutcome::Suppressed);
        assert_eq!(host.mounter().mounted, 1);
        assert_eq!(host.poll(1300.0).unwrap(), ResizeOutcome::Idle);
    }

    #[test]
    fn test_resize_is_debounced() {
        let (mut host, events) = host();
        host.mount(viewport(1200.0, 800.0)).unwrap();

        host.notify_resize(viewport(1000.0, 800.0), 0.0);
        host.notify_resize(viewport(900.0, 700.0), 100.0);
        assert_eq!(host.deadline(), Some(350.0));

        assert_eq!(host.poll(300.0).unwrap(), ResizeOutcome::Pending);
        assert_eq!(host.poll(350.0).unwrap(), ResizeOutcome::Remounted);
        assert_eq!(host.mounter().mounted, 2);
        assert_eq!(host.applied_viewport(), Some(viewport(900.0, 700.0)));

        // the previous instance is stopped before its replacement is built
        assert_eq!(
            *events.borrow(),
            vec!["mount 1 1200x800", "start 1", "stop 1", "mount 2 900x700", "start 2"]
        );
    }

    #[test]
    fn test_classification_change_remounts() {
        let (mut host, _) = host();
        let desktop = Viewport { width: 800.0, height: 600.0, device: DeviceClass::Desktop };
        let mobile = Viewport { device: DeviceClass::Mobile, ..desktop };

        host.mount(desktop).unwrap();
        host.notify_resize(mobile, 0.0);
        assert_eq!(host.poll(250.0).unwrap(), ResizeOutcome::Remounted);
    }

    #[test]
    fn test_custom_quiet_period() {
        let (host, _) = host();
        let mut host = host.with_quiet_period(50.0);
        host.mount(viewport(1200.0, 800.0)).unwrap();

        host.notify_resize(viewport(600.0, 800.0), 10.0);
        assert_eq!(host.poll(60.0).unwrap(), ResizeOutcome::Remounted);
    }

    #[test]
    fn test_unmount_stops() {
        let (mut host, events) = host();
        host.mount(viewport(1200.0, 800.0)).unwrap();
        host.notify_resize(viewport(600.0, 800.0), 0.0);

        host.unmount();
        host.unmount();

        assert!(!host.is_mounted());
        assert_eq!(host.deadline(), None);
        assert_eq!(*events.borrow(), vec!["mount 1 1200x800", "start 1", "stop 1"]);
    }

    #[test]
    fn test_drop_stops() {
        let (mut host, events) = host();
        host.mount(viewport(1200.0, 800.0)).unwrap();
        drop(host);

        assert_eq!(events.borrow().last().map(String::as_str), Some("stop 1"));
    }

    #[test]
    fn test_mount_failure_leaves_host_empty() {
        let (mut host, _) = host();
        host.mount(viewport(1200.0, 800.0)).unwrap();

        host.mounter.fail = true;
        host.notify_resize(viewport(600.0, 800.0), 0.0);
        assert!(matches!(host.poll(250.0), Err(Error::Initialization(_))));
        assert!(!host.is_mounted());

        // the same viewport is not retried
        host.notify_resize(viewport(600.0, 800.0), 300.0);
        assert_eq!(host.poll(550.0).unwrap(), ResizeOutcome::Suppressed);

        // a real change recovers
        host.mounter.fail = false;
        host.notify_resize(viewport(640.0, 800.0), 600.0);
        assert_eq!(host.poll(850.0).unwrap(), ResizeOutcome::Remounted);
        assert!(host.is_mounted());
    }

    struct EngineMount {
        schedulers: Vec<Rc<RefCell<SchedulerLog>>>,
    }

    impl Mount for EngineMount {
        type Instance = Engine<RecordingContext, CountingScheduler>;

        fn mount(&mut self, viewport: &Viewport) -> Result<Self::Instance, Error> {
            let scheduler = CountingScheduler::default();
            self.schedulers.push(scheduler.log.clone());

            EngineBuilder::new()
                .profile(RenderProfile::for_device(viewport.device))
                .build(&FakeSurface::new(viewport.width, viewport.height), scheduler)
        }
    }

    #[test]
    fn test_engines_never_overlap() {
        let mut host = HostAdapter::new(EngineMount { schedulers: Vec::new() });
        host.mount(viewport(1200.0, 800.0)).unwrap();
        assert_eq!(host.active().map(|e| e.grid().size()), Some((100, 40)));

        if let Some(engine) = host.active_mut() {
            engine.tick(0.0).unwrap();
        }

        host.notify_resize(viewport(390.0, 844.0), 0.0);
        host.poll(250.0).unwrap();

        let logs = &host.mounter().schedulers;
        assert_eq!(logs.len(), 2);
        // first engine: started, ticked once, then its pending frame was cancelled
        assert_eq!(logs[0].borrow().requested, 2);
        assert_eq!(logs[0].borrow().cancelled, vec![2]);

        let engine = host.active().unwrap();
        assert!(engine.is_running());
        assert!(engine.profile().is_mobile());
        assert_eq!(engine.grid().size(), (39, 52));
    }
}
