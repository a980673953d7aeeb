//! `requestAnimationFrame` scheduling.

use std::{cell::RefCell, rc::Rc};

use glyphwave_core::{Error, FrameScheduler};
use wasm_bindgen::{JsCast, closure::Closure};
use web_sys::Window;

use crate::js::js_error_string;

type FrameCallback = Closure<dyn FnMut(f64)>;

/// Shared slot holding the callback invoked on each animation frame.
///
/// The scheduler is moved into its engine before the callback (which needs a
/// handle back to that engine) can be created, so the two meet here.
pub(crate) type FrameCallbackSlot = Rc<RefCell<Option<FrameCallback>>>;

/// Requests frames from the browser on behalf of one engine.
pub(crate) struct RafScheduler {
    window: Window,
    callback: FrameCallbackSlot,
}

impl RafScheduler {
    pub(crate) fn new(window: Window) -> Self {
        Self { window, callback: Rc::new(RefCell::new(None)) }
    }

    /// Returns the slot the frame callback must be bound to.
    pub(crate) fn callback_slot(&self) -> FrameCallbackSlot {
        self.callback.clone()
    }

    /// Binds the per-frame callback; `f` receives the frame timestamp in ms.
    pub(crate) fn bind(slot: &FrameCallbackSlot, f: impl 'static + FnMut(f64)) {
        let callback = Closure::wrap(Box::new(f) as Box<dyn FnMut(f64)>);
        *slot.borrow_mut() = Some(callback);
    }
}

impl FrameScheduler for RafScheduler {
    type Handle = i32;

    fn request_frame(&mut self) -> Result<i32, Error> {
        let callback = self.callback.borrow();
        let callback = callback
            .as_ref()
            .ok_or_else(|| Error::frame_request_failed("no frame callback bound"))?;

        self.window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map_err(|e| Error::frame_request_failed(&js_error_string(&e)))
    }

    fn cancel_frame(&mut self, handle: i32) {
        let _ = self.window.cancel_animation_frame(handle);
    }
}

impl std::fmt::Debug for RafScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RafScheduler")
            .field("bound", &self.callback.borrow().is_some())
            .finish()
    }
}
