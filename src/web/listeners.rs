use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::error::{GalaxyError, GalaxyResult};

/// A registered DOM event listener; dropping it removes the listener
pub struct EventListener {
    target: web_sys::EventTarget,
    event_type: &'static str,
    callback: Closure<dyn FnMut(web_sys::Event)>,
}

impl EventListener {
    pub fn new<F>(target: &web_sys::EventTarget, event_type: &'static str, handler: F) -> GalaxyResult<Self>
    where
        F: FnMut(web_sys::Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web_sys::Event)>);
        target
            .add_event_listener_with_callback(event_type, callback.as_ref().unchecked_ref())
            .map_err(|e| GalaxyError::Platform(format!("addEventListener({}) failed: {:?}", event_type, e)))?;

        log::debug!("[EventListener] Registered '{}'", event_type);
        Ok(Self {
            target: target.clone(),
            event_type,
            callback,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(self.event_type, self.callback.as_ref().unchecked_ref())
        {
            log::warn!("[EventListener] removeEventListener({}) failed: {:?}", self.event_type, e);
        }
    }
}
