//! Platform-agnostic owner of one galaxy field.
//!
//! Hosts (the wasm `GalaxyField` and the native viewer) forward their events
//! here: `init`/`destroy`, progress updates, pointer moves, resize requests
//! and animation callbacks. Everything runs on one thread, so the state is
//! plain owned data with no locking.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::animation::{AnimationUpdater, MeshTransform, MotionState};
use crate::camera::GalaxyCamera;
use crate::config::GalaxyConfig;
use crate::constants::timing::STATS_LOG_INTERVAL;
use crate::error::{GalaxyError, GalaxyResult};
use crate::input::{clamp_surface_size, InputState, MouseAdapter, SurfaceSize};
use crate::particles::{generate_point_cloud, sprite_texture, PointCloud};
use crate::renderer::{FrameRenderer, FrameView};
use crate::time::{Debouncer, FrameLimiter};

/// Everything created by `init` and released by `destroy`
struct Session<R: FrameRenderer> {
    renderer: R,
    cloud: PointCloud,
    camera: GalaxyCamera,
    animation: AnimationUpdater,
    mouse: MouseAdapter,
    limiter: FrameLimiter,
    resize_debounce: Debouncer,
    pending_size: Option<SurfaceSize>,
    surface_size: SurfaceSize,
}

/// Lifecycle controller for one galaxy field
pub struct GalaxyLifecycle<R: FrameRenderer> {
    config: GalaxyConfig,
    input: InputState,
    session: Option<Session<R>>,
}

impl<R: FrameRenderer> GalaxyLifecycle<R> {
    pub fn new(config: GalaxyConfig) -> Self {
        Self {
            config,
            input: InputState::default(),
            session: None,
        }
    }

    /// Generate the cloud, hand it to `renderer`, establish the initial
    /// viewport and arm the frame gate at `now_ms`.
    ///
    /// Calling this while already active replaces the running session; the
    /// previous renderer is dropped without a `destroy`.
    pub fn init(&mut self, mut renderer: R, initial_size: SurfaceSize, now_ms: f64) -> GalaxyResult<()> {
        if let Err(e) = self.config.validate() {
            log::error!("[GalaxyLifecycle] Refusing to start: {}", e);
            return Err(e);
        }
        if self.session.is_some() {
            log::warn!("[GalaxyLifecycle] init called while active, replacing the previous session");
        }

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let cloud = generate_point_cloud(&self.config, &mut rng);
        let sprite = sprite_texture(self.config.sprite_size);

        if let Err(e) = renderer.upload(&cloud, &sprite) {
            log::error!("[GalaxyLifecycle] Failed to upload point cloud: {}", e);
            self.session = None;
            return Err(e);
        }

        self.input.mouse_x = 0.0;
        self.input.mouse_y = 0.0;

        let mut limiter = FrameLimiter::new(self.config.target_fps);
        limiter.reset(now_ms);

        let mut session = Session {
            renderer,
            cloud,
            camera: GalaxyCamera::from_config(&self.config),
            animation: AnimationUpdater::new(&self.config),
            mouse: MouseAdapter::new(self.config.mouse_throttle_ms),
            limiter,
            resize_debounce: Debouncer::new(self.config.resize_debounce_ms),
            pending_size: None,
            surface_size: initial_size,
        };
        apply_resize(&mut session, &self.config, initial_size);
        self.session = Some(session);

        log::info!(
            "[GalaxyLifecycle] Initialized {} particles at {}x{}",
            self.config.particle_count,
            initial_size.width,
            initial_size.height
        );
        Ok(())
    }

    /// Store the host's progress value. Anything outside (0, 100) reads as idle.
    pub fn set_progress(&mut self, progress: f64) {
        self.input.progress = progress;
    }

    pub fn progress(&self) -> f64 {
        self.input.progress
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Throttled pointer update; `x`/`y` and the window size are in pixels.
    /// Returns true when the event changed the input state.
    pub fn pointer_moved(&mut self, now_ms: f64, x: f64, y: f64, width: f64, height: f64) -> bool {
        match self.session.as_mut() {
            Some(session) => session
                .mouse
                .pointer_moved(&mut self.input, now_ms, x, y, width, height),
            None => false,
        }
    }

    /// Queue a resize; bursts collapse into one after the debounce delay
    pub fn request_resize(&mut self, size: SurfaceSize, now_ms: f64) {
        if let Some(session) = self.session.as_mut() {
            session.pending_size = Some(size);
            session.resize_debounce.trigger(now_ms);
        }
    }

    /// Apply a resize immediately, bypassing the debounce
    pub fn resize_now(&mut self, size: SurfaceSize) {
        if let Some(session) = self.session.as_mut() {
            session.resize_debounce.cancel();
            session.pending_size = None;
            apply_resize(session, &self.config, size);
        }
    }

    /// Fire the debounced resize if its quiet period has elapsed
    pub fn poll_timers(&mut self, now_ms: f64) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.resize_debounce.poll(now_ms) {
            if let Some(size) = session.pending_size.take() {
                apply_resize(session, &self.config, size);
            }
        }
    }

    /// One animation callback. Returns true when the gate opened and the
    /// frame's work ran.
    pub fn animation_frame(&mut self, now_ms: f64, wall_clock_ms: f64) -> bool {
        self.poll_timers(now_ms);

        let Some(session) = self.session.as_mut() else {
            log::debug!("[GalaxyLifecycle] Animation callback without an active session");
            return false;
        };
        if !session.limiter.should_render(now_ms) {
            return false;
        }

        session
            .animation
            .update(&self.input, &mut session.camera, wall_clock_ms);

        let view = FrameView {
            model: session.animation.transform().model_matrix(),
            view: session.camera.view_matrix(),
            projection: session.camera.projection_matrix(),
        };
        match session.renderer.draw(&view) {
            Ok(()) => {}
            Err(GalaxyError::SurfaceUnavailable) => {
                log::debug!("[GalaxyLifecycle] Surface unavailable, frame dropped");
            }
            Err(e) => log::warn!("[GalaxyLifecycle] Frame failed: {}", e),
        }

        let rendered = session.limiter.frames_rendered();
        if rendered % STATS_LOG_INTERVAL == 0 {
            log::debug!(
                "[GalaxyLifecycle] {} frames rendered, {} callbacks skipped",
                rendered,
                session.limiter.frames_skipped()
            );
        }
        true
    }

    /// Release the session. Safe to call repeatedly or before `init`.
    /// Returns the renderer so the host can decide when to drop it.
    pub fn destroy(&mut self) -> Option<R> {
        let session = self.session.take()?;
        log::info!(
            "[GalaxyLifecycle] Destroyed after {} frames",
            session.limiter.frames_rendered()
        );
        Some(session.renderer)
    }

    pub fn config(&self) -> &GalaxyConfig {
        &self.config
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn renderer(&self) -> Option<&R> {
        self.session.as_ref().map(|s| &s.renderer)
    }

    pub fn renderer_mut(&mut self) -> Option<&mut R> {
        self.session.as_mut().map(|s| &mut s.renderer)
    }

    pub fn point_cloud(&self) -> Option<&PointCloud> {
        self.session.as_ref().map(|s| &s.cloud)
    }

    pub fn camera(&self) -> Option<&GalaxyCamera> {
        self.session.as_ref().map(|s| &s.camera)
    }

    pub fn motion(&self) -> Option<&MotionState> {
        self.session.as_ref().map(|s| s.animation.motion())
    }

    pub fn transform(&self) -> Option<&MeshTransform> {
        self.session.as_ref().map(|s| s.animation.transform())
    }

    /// Current clamped surface size in logical pixels
    pub fn surface_size(&self) -> Option<SurfaceSize> {
        self.session.as_ref().map(|s| s.surface_size)
    }

    pub fn has_pending_resize(&self) -> bool {
        self.session
            .as_ref()
            .map_or(false, |s| s.resize_debounce.is_pending())
    }

    /// (rendered, skipped) animation callbacks since `init`
    pub fn frame_stats(&self) -> (u64, u64) {
        self.session.as_ref().map_or((0, 0), |s| {
            (s.limiter.frames_rendered(), s.limiter.frames_skipped())
        })
    }
}

fn apply_resize<R: FrameRenderer>(session: &mut Session<R>, config: &GalaxyConfig, requested: SurfaceSize) {
    let size = clamp_surface_size(requested, config.max_width, config.max_height);
    session.camera.set_viewport(size.width, size.height);
    session.renderer.resize(size);
    session.surface_size = size;
    log::debug!(
        "[GalaxyLifecycle] Resized to {}x{} (requested {}x{})",
        size.width,
        size.height,
        requested.width,
        requested.height
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particles::SpriteTexture;

    #[derive(Default)]
    struct CountingRenderer {
        uploads: usize,
        draws: usize,
        resizes: Vec<SurfaceSize>,
    }

    impl FrameRenderer for CountingRenderer {
        fn upload(&mut self, _cloud: &PointCloud, _sprite: &SpriteTexture) -> GalaxyResult<()> {
            self.uploads += 1;
            Ok(())
        }

        fn resize(&mut self, size: SurfaceSize) {
            self.resizes.push(size);
        }

        fn draw(&mut self, _view: &FrameView) -> GalaxyResult<()> {
            self.draws += 1;
            Ok(())
        }
    }

    struct FailingUpload;

    impl FrameRenderer for FailingUpload {
        fn upload(&mut self, _cloud: &PointCloud, _sprite: &SpriteTexture) -> GalaxyResult<()> {
            Err(GalaxyError::AdapterUnavailable)
        }

        fn resize(&mut self, _size: SurfaceSize) {}

        fn draw(&mut self, _view: &FrameView) -> GalaxyResult<()> {
            Ok(())
        }
    }

    fn seeded_config() -> GalaxyConfig {
        GalaxyConfig {
            particle_count: 300,
            seed: Some(7),
            ..GalaxyConfig::default()
        }
    }

    #[test]
    fn test_init_uploads_and_resizes_once() {
        let mut lifecycle = GalaxyLifecycle::new(seeded_config());
        lifecycle
            .init(CountingRenderer::default(), SurfaceSize::new(800, 600), 0.0)
            .unwrap();

        let renderer = lifecycle.renderer().unwrap();
        assert_eq!(renderer.uploads, 1);
        assert_eq!(renderer.draws, 0);
        assert_eq!(renderer.resizes, vec![SurfaceSize::new(800, 600)]);
        assert_eq!(lifecycle.point_cloud().unwrap().len(), 300);
        let camera = lifecycle.camera().unwrap();
        assert!((camera.aspect_ratio - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn test_failed_upload_leaves_component_inert() {
        let mut lifecycle = GalaxyLifecycle::new(seeded_config());
        let result = lifecycle.init(FailingUpload, SurfaceSize::new(800, 600), 0.0);
        assert!(matches!(result, Err(GalaxyError::AdapterUnavailable)));
        assert!(!lifecycle.is_active());
        assert!(!lifecycle.animation_frame(100.0, 0.0));
    }

    #[test]
    fn test_invalid_config_rejected_at_init() {
        let config = GalaxyConfig {
            target_fps: 0.0,
            ..seeded_config()
        };
        let mut lifecycle = GalaxyLifecycle::new(config);
        let result = lifecycle.init(CountingRenderer::default(), SurfaceSize::new(800, 600), 0.0);

        assert!(matches!(
            result,
            Err(GalaxyError::InvalidConfig { field: "target_fps", .. })
        ));
        assert!(!lifecycle.is_active());
        assert!(!lifecycle.animation_frame(16.0, 0.0));
    }

    #[test]
    fn test_destroy_before_init_is_noop() {
        let mut lifecycle: GalaxyLifecycle<CountingRenderer> = GalaxyLifecycle::new(seeded_config());
        assert!(lifecycle.destroy().is_none());
        assert!(lifecycle.destroy().is_none());
    }

    #[test]
    fn test_pointer_ignored_while_inactive() {
        let mut lifecycle: GalaxyLifecycle<CountingRenderer> = GalaxyLifecycle::new(seeded_config());
        assert!(!lifecycle.pointer_moved(0.0, 0.0, 0.0, 100.0, 100.0));
        assert_eq!(lifecycle.input().mouse_x, 0.0);
    }

    #[test]
    fn test_resize_now_cancels_pending() {
        let mut lifecycle = GalaxyLifecycle::new(seeded_config());
        lifecycle
            .init(CountingRenderer::default(), SurfaceSize::new(800, 600), 0.0)
            .unwrap();
        lifecycle.request_resize(SurfaceSize::new(1024, 768), 10.0);
        lifecycle.resize_now(SurfaceSize::new(640, 480));
        assert!(!lifecycle.has_pending_resize());

        lifecycle.poll_timers(1000.0);
        let resizes = &lifecycle.renderer().unwrap().resizes;
        assert_eq!(resizes.last(), Some(&SurfaceSize::new(640, 480)));
        assert_eq!(resizes.len(), 2);
    }
}
