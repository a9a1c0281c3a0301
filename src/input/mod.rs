//! Input state and the adapters that feed it.
//!
//! Pointer events are throttled and normalized here; resize requests are
//! clamped here and debounced by the lifecycle with a polled
//! [`Debouncer`](crate::time::Debouncer).

use crate::constants::motion::{PROGRESS_MAX, PROGRESS_MIN};
use crate::time::Throttle;

/// External inputs read by the animation updater
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputState {
    /// Normalized pointer X in [-1, 1], left to right
    pub mouse_x: f32,
    /// Normalized pointer Y in [-1, 1], bottom to top
    pub mouse_y: f32,
    /// Host-supplied progress, conventionally in [0, 100], never validated
    pub progress: f64,
}

impl InputState {
    /// True while a job is running, i.e. strictly between 0 and 100
    pub fn is_processing(&self) -> bool {
        self.progress > PROGRESS_MIN && self.progress < PROGRESS_MAX
    }
}

/// Map a pointer position in window pixels to [-1, 1] on both axes.
/// Screen Y grows downward, so it is inverted.
pub fn normalize_pointer(x: f64, y: f64, width: f64, height: f64) -> (f32, f32) {
    if width <= 0.0 || height <= 0.0 {
        return (0.0, 0.0);
    }
    let nx = (x / width) * 2.0 - 1.0;
    let ny = -(y / height) * 2.0 + 1.0;
    (nx as f32, ny as f32)
}

/// Throttled pointer adapter
#[derive(Debug, Clone)]
pub struct MouseAdapter {
    throttle: Throttle,
}

impl MouseAdapter {
    pub fn new(throttle_ms: f64) -> Self {
        Self {
            throttle: Throttle::new(throttle_ms),
        }
    }

    /// Apply a pointer move to `input` unless the throttle rejects it.
    /// Returns true when the event was accepted.
    pub fn pointer_moved(
        &mut self,
        input: &mut InputState,
        now_ms: f64,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> bool {
        if !self.throttle.try_accept(now_ms) {
            return false;
        }
        let (mouse_x, mouse_y) = normalize_pointer(x, y, width, height);
        input.mouse_x = mouse_x;
        input.mouse_y = mouse_y;
        true
    }
}

/// Output surface dimensions in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            return 1.0;
        }
        self.width as f32 / self.height as f32
    }

    /// Physical size after applying the device pixel ratio
    pub fn scaled(&self, pixel_ratio: f64) -> SurfaceSize {
        SurfaceSize {
            width: ((self.width as f64 * pixel_ratio).round() as u32).max(1),
            height: ((self.height as f64 * pixel_ratio).round() as u32).max(1),
        }
    }
}

/// Fit `requested` inside `max_width` x `max_height`, scaling both sides by
/// the same factor so the aspect ratio survives. Sizes already inside the
/// bounds are returned unchanged; zero dimensions are bumped to 1.
pub fn clamp_surface_size(requested: SurfaceSize, max_width: u32, max_height: u32) -> SurfaceSize {
    let width = requested.width.max(1);
    let height = requested.height.max(1);
    if width <= max_width && height <= max_height {
        return SurfaceSize { width, height };
    }

    let scale = (max_width as f64 / width as f64).min(max_height as f64 / height as f64);
    SurfaceSize {
        width: ((width as f64 * scale).floor() as u32).clamp(1, max_width),
        height: ((height as f64 * scale).floor() as u32).clamp(1, max_height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_corners() {
        assert_eq!(normalize_pointer(0.0, 0.0, 800.0, 600.0), (-1.0, 1.0));
        assert_eq!(normalize_pointer(800.0, 600.0, 800.0, 600.0), (1.0, -1.0));
        assert_eq!(normalize_pointer(400.0, 300.0, 800.0, 600.0), (0.0, 0.0));
    }

    #[test]
    fn test_normalize_degenerate_window() {
        assert_eq!(normalize_pointer(10.0, 10.0, 0.0, 600.0), (0.0, 0.0));
    }

    #[test]
    fn test_processing_bounds_exclusive() {
        let mut input = InputState::default();
        for (progress, expected) in [(0.0, false), (0.5, true), (50.0, true), (100.0, false), (-3.0, false), (250.0, false)] {
            input.progress = progress;
            assert_eq!(input.is_processing(), expected, "progress {}", progress);
        }
    }

    #[test]
    fn test_clamp_leaves_small_sizes() {
        let size = clamp_surface_size(SurfaceSize::new(1280, 720), 1920, 1080);
        assert_eq!(size, SurfaceSize::new(1280, 720));
    }

    #[test]
    fn test_clamp_4k_to_1080p() {
        let size = clamp_surface_size(SurfaceSize::new(3840, 2160), 1920, 1080);
        assert_eq!(size, SurfaceSize::new(1920, 1080));
    }

    #[test]
    fn test_clamp_ultrawide_keeps_aspect() {
        let requested = SurfaceSize::new(5120, 1440);
        let size = clamp_surface_size(requested, 1920, 1080);
        assert!(size.width <= 1920 && size.height <= 1080);
        assert!((size.aspect_ratio() - requested.aspect_ratio()).abs() < 0.01);
    }

    #[test]
    fn test_scaled_by_pixel_ratio() {
        assert_eq!(SurfaceSize::new(100, 50).scaled(1.5), SurfaceSize::new(150, 75));
    }

    #[test]
    fn test_mouse_adapter_throttles() {
        let mut adapter = MouseAdapter::new(16.0);
        let mut input = InputState::default();
        assert!(adapter.pointer_moved(&mut input, 0.0, 0.0, 0.0, 100.0, 100.0));
        assert!(!adapter.pointer_moved(&mut input, 5.0, 100.0, 100.0, 100.0, 100.0));
        assert_eq!((input.mouse_x, input.mouse_y), (-1.0, 1.0));
    }
}
