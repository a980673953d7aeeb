//! Window resize tracking with a trailing-edge debounce timer.
//!
//! Every `resize` event re-arms the timer; the settle callback only runs once
//! events stop arriving for the quiet period.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use wasm_bindgen::{JsCast, closure::Closure};
use web_sys::{Event, Window, console};

use crate::{Error, js::js_error_string};

/// Attaches a `resize` listener to the window for as long as it lives.
pub(crate) struct ResizeListener {
    window: Window,
    on_resize: Closure<dyn FnMut(Event)>,
    timer: Rc<DebounceTimer>,
}

impl ResizeListener {
    /// Creates a listener on `window`.
    ///
    /// # Arguments
    /// * `quiet_period_ms` - How long events must stop before `on_settle` runs
    /// * `on_resize` - Invoked synchronously for every resize event
    /// * `on_settle` - Invoked once the quiet period elapses; returning
    ///   `Some(delay_ms)` re-arms the timer for that delay
    ///
    /// # Errors
    /// Returns [`Error::Callback`] if the listener cannot be attached.
    pub(crate) fn new(
        window: &Window,
        quiet_period_ms: f64,
        mut on_resize: impl 'static + FnMut(),
        mut on_settle: impl 'static + FnMut() -> Option<f64>,
    ) -> Result<Self, Error> {
        let timer = Rc::new(DebounceTimer::new(window.clone()));

        let weak_timer = Rc::downgrade(&timer);
        timer.bind(move || {
            let Some(timer) = weak_timer.upgrade() else { return };
            timer.handle.set(None);

            if let Some(delay_ms) = on_settle() {
                timer.arm(delay_ms);
            }
        });

        let weak_timer = Rc::downgrade(&timer);
        let on_resize = Closure::wrap(Box::new(move |_event: Event| {
            on_resize();
            if let Some(timer) = weak_timer.upgrade() {
                timer.arm(quiet_period_ms);
            }
        }) as Box<dyn FnMut(_)>);

        window
            .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
            .map_err(|_| Error::listener_failed("resize"))?;

        Ok(Self { window: window.clone(), on_resize, timer })
    }

    fn cleanup(&self) {
        let _ = self
            .window
            .remove_event_listener_with_callback("resize", self.on_resize.as_ref().unchecked_ref());
        self.timer.cancel();
    }
}

impl Drop for ResizeListener {
    fn drop(&mut self) {
        self.cleanup();
    }
}

impl std::fmt::Debug for ResizeListener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResizeListener")
            .field("timer_armed", &self.timer.handle.get().is_some())
            .finish()
    }
}

/// A single `setTimeout` that is replaced, never stacked, when re-armed.
struct DebounceTimer {
    window: Window,
    handle: Cell<Option<i32>>,
    callback: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl DebounceTimer {
    fn new(window: Window) -> Self {
        Self { window, handle: Cell::new(None), callback: RefCell::new(None) }
    }

    fn bind(&self, f: impl 'static + FnMut()) {
        *self.callback.borrow_mut() = Some(Closure::wrap(Box::new(f) as Box<dyn FnMut()>));
    }

    /// Cancels any pending timeout and schedules a new one `delay_ms` from now.
    fn arm(&self, delay_ms: f64) {
        self.cancel();

        let callback = self.callback.borrow();
        let Some(callback) = callback.as_ref() else { return };

        let timeout = delay_ms.max(0.0).ceil() as i32;
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                timeout,
            ) {
            Ok(handle) => self.handle.set(Some(handle)),
            Err(e) => console::error_1(
                &format!("glyphwave: failed to schedule resize timer: {}", js_error_string(&e))
                    .into(),
            ),
        }
    }

    fn cancel(&self) {
        if let Some(handle) = self.handle.take() {
            self.window.clear_timeout_with_handle(handle);
        }
    }
}
