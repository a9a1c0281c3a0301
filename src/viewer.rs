//! Native desktop host for the galaxy field, driven by winit redraw requests.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{ElementState, Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowBuilder;

use crate::config::GalaxyConfig;
use crate::constants::motion::{PROGRESS_MAX, PROGRESS_MIN};
use crate::input::SurfaceSize;
use crate::lifecycle::GalaxyLifecycle;
use crate::renderer::{GpuContext, GpuContextConfig, PointCloudRenderer, PointMaterial};
use crate::time::wall_clock_ms;

/// Progress step for the arrow keys
const PROGRESS_STEP: f64 = 10.0;

/// Progress Space switches to when the field is idle
const DEMO_PROGRESS: f64 = 50.0;

/// Keys the viewer reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerKey {
    Up,
    Down,
    Space,
    Escape,
}

impl ViewerKey {
    pub fn from_key_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::ArrowUp => Some(Self::Up),
            KeyCode::ArrowDown => Some(Self::Down),
            KeyCode::Space => Some(Self::Space),
            KeyCode::Escape => Some(Self::Escape),
            _ => None,
        }
    }
}

/// Progress after a key press, `None` for keys that don't touch it
pub fn next_progress(current: f64, key: ViewerKey) -> Option<f64> {
    match key {
        ViewerKey::Up => Some((current + PROGRESS_STEP).min(PROGRESS_MAX)),
        ViewerKey::Down => Some((current - PROGRESS_STEP).max(PROGRESS_MIN)),
        ViewerKey::Space => {
            if current > PROGRESS_MIN && current < PROGRESS_MAX {
                Some(PROGRESS_MIN)
            } else {
                Some(DEMO_PROGRESS)
            }
        }
        ViewerKey::Escape => None,
    }
}

fn logical_size(size: PhysicalSize<u32>, scale_factor: f64) -> SurfaceSize {
    let logical: LogicalSize<u32> = size.to_logical(scale_factor);
    SurfaceSize::new(logical.width, logical.height)
}

/// Open a window and animate the galaxy until it is closed
pub fn run(config: GalaxyConfig) -> Result<()> {
    if let Err(e) = env_logger::try_init() {
        log::debug!("[viewer] env_logger already initialized: {}", e);
    }

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Galaxy Field")
            .with_inner_size(LogicalSize::new(1280, 720))
            .with_max_inner_size(LogicalSize::new(config.max_width, config.max_height))
            .with_transparent(true)
            .build(&event_loop)?,
    );

    // The swapchain has to match the window, so the real scale factor is used here
    let scale_factor = window.scale_factor();
    let physical = window.inner_size();
    let context = pollster::block_on(GpuContext::new(
        window.clone(),
        SurfaceSize::new(physical.width, physical.height),
        GpuContextConfig::default(),
    ))?;
    let renderer = PointCloudRenderer::new(context, PointMaterial::from_config(&config), scale_factor);

    let clock = Instant::now();
    let now_ms = move || clock.elapsed().as_secs_f64() * 1000.0;

    let mut lifecycle = GalaxyLifecycle::new(config);
    lifecycle.init(renderer, logical_size(physical, scale_factor), now_ms())?;
    log::info!("[viewer] Up/Down change progress, Space toggles processing, Escape quits");

    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, window_id } if window_id == window.id() => match event {
            WindowEvent::CloseRequested => {
                lifecycle.destroy();
                elwt.exit();
            }
            WindowEvent::Resized(size) => {
                lifecycle.request_resize(logical_size(size, window.scale_factor()), now_ms());
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let Some(renderer) = lifecycle.renderer_mut() {
                    renderer.set_pixel_ratio(scale_factor);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let size = window.inner_size();
                lifecycle.pointer_moved(
                    now_ms(),
                    position.x,
                    position.y,
                    size.width as f64,
                    size.height as f64,
                );
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                match ViewerKey::from_key_code(code) {
                    Some(ViewerKey::Escape) => {
                        lifecycle.destroy();
                        elwt.exit();
                    }
                    Some(key) => {
                        if let Some(progress) = next_progress(lifecycle.progress(), key) {
                            lifecycle.set_progress(progress);
                            log::info!("[viewer] Progress {}", progress);
                        }
                    }
                    None => {}
                }
            }
            WindowEvent::RedrawRequested => {
                lifecycle.animation_frame(now_ms(), wall_clock_ms());
            }
            _ => {}
        },
        Event::AboutToWait => window.request_redraw(),
        _ => {}
    })?;

    Ok(())
}
