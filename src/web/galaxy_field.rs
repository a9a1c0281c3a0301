use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, MouseEvent, Window};

use super::{AnimationLoop, EventListener};
use crate::config::GalaxyConfig;
use crate::error::{GalaxyError, GalaxyResult};
use crate::input::{clamp_surface_size, SurfaceSize};
use crate::lifecycle::GalaxyLifecycle;
use crate::renderer::{GpuContext, GpuContextConfig, PointCloudRenderer, PointMaterial};
use crate::time::wall_clock_ms;

struct FieldState {
    lifecycle: GalaxyLifecycle<PointCloudRenderer>,
    /// Bumped by every `init` and `destroy`; an async init that finishes
    /// under a stale epoch is discarded.
    epoch: u64,
    canvas: Option<HtmlCanvasElement>,
    styled_size: Option<SurfaceSize>,
    animation: Option<AnimationLoop>,
    listeners: Vec<EventListener>,
}

impl FieldState {
    fn teardown(&mut self) {
        self.animation = None;
        self.listeners.clear();
        self.styled_size = None;
        self.canvas = None;
        drop(self.lifecycle.destroy());
    }

    fn sync_canvas_style(&mut self) {
        let (Some(canvas), Some(size)) = (self.canvas.as_ref(), self.lifecycle.surface_size()) else {
            return;
        };
        if self.styled_size == Some(size) {
            return;
        }
        if let Err(e) = style_canvas(canvas, size) {
            log::warn!("[GalaxyField] Failed to style canvas: {}", e);
        }
        self.styled_size = Some(size);
    }
}

/// Animated galaxy background bound to a canvas element
#[wasm_bindgen]
pub struct GalaxyField {
    state: Rc<RefCell<FieldState>>,
}

#[wasm_bindgen]
impl GalaxyField {
    /// Create an inert field. `config_json` overrides any subset of the
    /// defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<GalaxyField, JsValue> {
        let config = match config_json {
            Some(raw) => GalaxyConfig::from_json_str(&raw).map_err(to_js_error)?,
            None => GalaxyConfig::default(),
        };
        Ok(Self {
            state: Rc::new(RefCell::new(FieldState {
                lifecycle: GalaxyLifecycle::new(config),
                epoch: 0,
                canvas: None,
                styled_size: None,
                animation: None,
                listeners: Vec::new(),
            })),
        })
    }

    /// Bind to `canvas` and start animating once the GPU is ready.
    /// Failures are logged and leave the field inert.
    pub fn init(&self, canvas: HtmlCanvasElement) {
        let epoch = {
            let mut state = self.state.borrow_mut();
            if state.lifecycle.is_active() {
                log::warn!("[GalaxyField] init called without destroy, replacing the running field");
                state.teardown();
            }
            state.epoch += 1;
            state.epoch
        };

        let state = Rc::clone(&self.state);
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = start(state, canvas, epoch).await {
                log::error!("[GalaxyField] Initialization failed: {}", e);
            }
        });
    }

    #[wasm_bindgen(js_name = setProgress)]
    pub fn set_progress(&self, value: f64) {
        self.state.borrow_mut().lifecycle.set_progress(value);
    }

    /// Stop the loop, remove listeners and release GPU resources
    pub fn destroy(&self) {
        let mut state = self.state.borrow_mut();
        state.epoch += 1;
        state.teardown();
    }

    #[wasm_bindgen(getter, js_name = isActive)]
    pub fn is_active(&self) -> bool {
        self.state.borrow().lifecycle.is_active()
    }

    #[wasm_bindgen(getter)]
    pub fn progress(&self) -> f64 {
        self.state.borrow().lifecycle.progress()
    }
}

impl Drop for GalaxyField {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.try_borrow_mut() {
            state.teardown();
        }
    }
}

async fn start(state: Rc<RefCell<FieldState>>, canvas: HtmlCanvasElement, epoch: u64) -> GalaxyResult<()> {
    let window = web_sys::window().ok_or_else(|| GalaxyError::Platform("no window".into()))?;
    let config = state.borrow().lifecycle.config().clone();

    let pixel_ratio = config.effective_pixel_ratio(window.device_pixel_ratio());
    let logical = clamp_surface_size(window_size(&window)?, config.max_width, config.max_height);

    let context = GpuContext::new(
        wgpu::SurfaceTarget::Canvas(canvas.clone()),
        logical.scaled(pixel_ratio),
        GpuContextConfig::default(),
    )
    .await?;
    let renderer = PointCloudRenderer::new(context, PointMaterial::from_config(&config), pixel_ratio);

    let mut guard = state.borrow_mut();
    if guard.epoch != epoch {
        log::debug!("[GalaxyField] Discarding init superseded while the GPU was starting");
        return Ok(());
    }

    guard.lifecycle.init(renderer, logical, now_ms(&window))?;
    guard.canvas = Some(canvas);
    guard.sync_canvas_style();

    let weak = Rc::downgrade(&state);
    let wired = resize_listener(&window, weak.clone()).and_then(|resize| {
        let mouse = mouse_listener(&window, weak.clone())?;
        let animation = AnimationLoop::start(frame_callback(weak))?;
        Ok((vec![resize, mouse], animation))
    });
    match wired {
        Ok((listeners, animation)) => {
            guard.listeners = listeners;
            guard.animation = Some(animation);
        }
        Err(e) => {
            guard.teardown();
            return Err(e);
        }
    }

    log::info!("[GalaxyField] Running at pixel ratio {:.2}", pixel_ratio);
    Ok(())
}

fn frame_callback(state: Weak<RefCell<FieldState>>) -> impl FnMut(f64) + 'static {
    move |timestamp: f64| {
        let Some(state) = state.upgrade() else {
            return;
        };
        let Ok(mut state) = state.try_borrow_mut() else {
            return;
        };
        if state.lifecycle.animation_frame(timestamp, wall_clock_ms()) {
            state.sync_canvas_style();
        }
    }
}

fn resize_listener(window: &Window, state: Weak<RefCell<FieldState>>) -> GalaxyResult<EventListener> {
    let target = window.clone();
    EventListener::new(window.as_ref(), "resize", move |_event| {
        let Some(state) = state.upgrade() else {
            return;
        };
        let size = match window_size(&target) {
            Ok(size) => size,
            Err(e) => {
                log::debug!("[GalaxyField] Ignoring resize: {}", e);
                return;
            }
        };
        if let Ok(mut state) = state.try_borrow_mut() {
            state.lifecycle.request_resize(size, now_ms(&target));
        }
    })
}

fn mouse_listener(window: &Window, state: Weak<RefCell<FieldState>>) -> GalaxyResult<EventListener> {
    let target = window.clone();
    EventListener::new(window.as_ref(), "mousemove", move |event| {
        let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        let Some(state) = state.upgrade() else {
            return;
        };
        let Ok(size) = window_size(&target) else {
            return;
        };
        if let Ok(mut state) = state.try_borrow_mut() {
            state.lifecycle.pointer_moved(
                now_ms(&target),
                mouse.client_x() as f64,
                mouse.client_y() as f64,
                size.width as f64,
                size.height as f64,
            );
        }
    })
}

fn window_size(window: &Window) -> GalaxyResult<SurfaceSize> {
    let dimension = |value: Result<JsValue, JsValue>, name: &str| {
        value
            .ok()
            .and_then(|v| v.as_f64())
            .map(|v| v.max(0.0) as u32)
            .ok_or_else(|| GalaxyError::Platform(format!("window.{} unavailable", name)))
    };
    Ok(SurfaceSize::new(
        dimension(window.inner_width(), "innerWidth")?,
        dimension(window.inner_height(), "innerHeight")?,
    ))
}

fn now_ms(window: &Window) -> f64 {
    match window.performance() {
        Some(performance) => performance.now(),
        None => wall_clock_ms(),
    }
}

fn style_canvas(canvas: &HtmlCanvasElement, size: SurfaceSize) -> GalaxyResult<()> {
    let style = canvas.style();
    style
        .set_property("width", &format!("{}px", size.width))
        .and_then(|_| style.set_property("height", &format!("{}px", size.height)))
        .map_err(|e| GalaxyError::Platform(format!("{:?}", e)))
}

fn to_js_error(error: GalaxyError) -> JsValue {
    JsValue::from_str(&error.to_string())
}
