use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::error::{GalaxyError, GalaxyResult};

type FrameCallback = Closure<dyn FnMut(f64)>;

struct LoopInner {
    callback: RefCell<Option<FrameCallback>>,
    request_id: Cell<Option<i32>>,
    cancelled: Cell<bool>,
}

impl LoopInner {
    fn schedule(&self) {
        if self.cancelled.get() {
            return;
        }
        let Some(window) = web_sys::window() else {
            log::warn!("[AnimationLoop] No window, loop stopped");
            return;
        };
        let callback = self.callback.borrow();
        let Some(callback) = callback.as_ref() else {
            return;
        };
        match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            Ok(id) => self.request_id.set(Some(id)),
            Err(e) => log::warn!("[AnimationLoop] requestAnimationFrame failed: {:?}", e),
        }
    }
}

/// Repeating `requestAnimationFrame` task. The frame closure receives the
/// callback timestamp in milliseconds and is rescheduled after every call
/// until the loop is cancelled or dropped.
pub struct AnimationLoop {
    inner: Rc<LoopInner>,
}

impl AnimationLoop {
    pub fn start<F>(mut frame: F) -> GalaxyResult<Self>
    where
        F: FnMut(f64) + 'static,
    {
        if web_sys::window().is_none() {
            return Err(GalaxyError::Platform("no window for requestAnimationFrame".into()));
        }

        let inner = Rc::new(LoopInner {
            callback: RefCell::new(None),
            request_id: Cell::new(None),
            cancelled: Cell::new(false),
        });

        let weak: Weak<LoopInner> = Rc::downgrade(&inner);
        let callback = Closure::wrap(Box::new(move |timestamp: f64| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            inner.request_id.set(None);
            if inner.cancelled.get() {
                return;
            }
            frame(timestamp);
            inner.schedule();
        }) as Box<dyn FnMut(f64)>);

        *inner.callback.borrow_mut() = Some(callback);
        inner.schedule();

        Ok(Self { inner })
    }

    /// Stop the loop; the outstanding callback, if any, is withdrawn
    pub fn cancel(&self) {
        if self.inner.cancelled.replace(true) {
            return;
        }
        if let Some(id) = self.inner.request_id.take() {
            if let Some(window) = web_sys::window() {
                if let Err(e) = window.cancel_animation_frame(id) {
                    log::warn!("[AnimationLoop] cancelAnimationFrame failed: {:?}", e);
                }
            }
        }
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        self.cancel();
        self.inner.callback.borrow_mut().take();
    }
}
