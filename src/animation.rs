//! Per-frame motion of the galaxy mesh and camera.
//!
//! Smoothing is applied per accepted frame, not per unit of time, so the
//! perceived speed follows the effective frame rate.

use glam::{EulerRot, Mat4};

use crate::camera::{bob_height, GalaxyCamera};
use crate::config::GalaxyConfig;
use crate::input::InputState;

/// Exponentially smoothed spin speed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionState {
    pub current_rotation_speed: f32,
    pub target_rotation_speed: f32,
}

impl MotionState {
    /// Resting state: spinning at the idle speed
    pub fn idle(config: &GalaxyConfig) -> Self {
        Self {
            current_rotation_speed: config.idle_speed,
            target_rotation_speed: config.idle_speed,
        }
    }
}

/// Euler angles of the point mesh, applied in X, Y, Z order
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MeshTransform {
    pub rotation_x: f32,
    pub rotation_y: f32,
    pub rotation_z: f32,
}

impl MeshTransform {
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_euler(EulerRot::XYZ, self.rotation_x, self.rotation_y, self.rotation_z)
    }
}

/// Spin speed the motion eases toward for a given input
pub fn target_speed(input: &InputState, idle_speed: f32, processing_speed: f32) -> f32 {
    if input.is_processing() {
        processing_speed
    } else {
        idle_speed
    }
}

/// One step of a first-order lag toward `target`
pub fn ease(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}

/// Owns motion state and advances it once per accepted frame
#[derive(Debug, Clone)]
pub struct AnimationUpdater {
    motion: MotionState,
    transform: MeshTransform,
    idle_speed: f32,
    processing_speed: f32,
    base_camera_y: f32,
    smoothing: f32,
    tilt_x_factor: f32,
    tilt_z_factor: f32,
    bob_amplitude: f32,
    bob_frequency: f64,
}

impl AnimationUpdater {
    pub fn new(config: &GalaxyConfig) -> Self {
        Self {
            motion: MotionState::idle(config),
            transform: MeshTransform::default(),
            idle_speed: config.idle_speed,
            processing_speed: config.processing_speed,
            base_camera_y: config.camera_position[1],
            smoothing: config.smoothing,
            tilt_x_factor: config.tilt_x_factor,
            tilt_z_factor: config.tilt_z_factor,
            bob_amplitude: config.bob_amplitude,
            bob_frequency: config.bob_frequency,
        }
    }

    /// Advance rotation, tilt and camera height by one frame
    pub fn update(&mut self, input: &InputState, camera: &mut GalaxyCamera, wall_clock_ms: f64) {
        self.motion.target_rotation_speed =
            target_speed(input, self.idle_speed, self.processing_speed);
        self.motion.current_rotation_speed = ease(
            self.motion.current_rotation_speed,
            self.motion.target_rotation_speed,
            self.smoothing,
        );

        self.transform.rotation_y += self.motion.current_rotation_speed;

        let target_tilt_x = input.mouse_y * self.tilt_x_factor;
        let target_tilt_z = input.mouse_x * self.tilt_z_factor;
        self.transform.rotation_x = ease(self.transform.rotation_x, target_tilt_x, self.smoothing);
        self.transform.rotation_z = ease(self.transform.rotation_z, target_tilt_z, self.smoothing);

        camera.set_height(bob_height(
            self.base_camera_y,
            self.bob_amplitude,
            self.bob_frequency,
            wall_clock_ms,
        ));
    }

    pub fn motion(&self) -> &MotionState {
        &self.motion
    }

    pub fn transform(&self) -> &MeshTransform {
        &self.transform
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input_with_progress(progress: f64) -> InputState {
        InputState {
            progress,
            ..InputState::default()
        }
    }

    #[test]
    fn test_target_speed_routing() {
        let config = GalaxyConfig::default();
        let speed = |progress| {
            target_speed(&input_with_progress(progress), config.idle_speed, config.processing_speed)
        };
        assert_eq!(speed(0.0), 0.001);
        assert_eq!(speed(100.0), 0.001);
        assert_eq!(speed(50.0), 0.05);
    }

    #[test]
    fn test_speed_eases_toward_processing() {
        let config = GalaxyConfig::default();
        let mut camera = GalaxyCamera::from_config(&config);
        let mut updater = AnimationUpdater::new(&config);
        let input = input_with_progress(50.0);

        updater.update(&input, &mut camera, 0.0);
        let expected = 0.001 + (0.05 - 0.001) * 0.05;
        assert!((updater.motion().current_rotation_speed - expected).abs() < 1e-7);
        assert!((updater.transform().rotation_y - expected).abs() < 1e-7);

        for _ in 0..500 {
            updater.update(&input, &mut camera, 0.0);
        }
        assert!((updater.motion().current_rotation_speed - 0.05).abs() < 1e-4);
    }

    #[test]
    fn test_rotation_is_monotonic() {
        let config = GalaxyConfig::default();
        let mut camera = GalaxyCamera::from_config(&config);
        let mut updater = AnimationUpdater::new(&config);
        let input = InputState::default();
        let mut last = updater.transform().rotation_y;
        for _ in 0..10 {
            updater.update(&input, &mut camera, 0.0);
            assert!(updater.transform().rotation_y > last);
            last = updater.transform().rotation_y;
        }
    }

    #[test]
    fn test_tilt_follows_pointer() {
        let config = GalaxyConfig::default();
        let mut camera = GalaxyCamera::from_config(&config);
        let mut updater = AnimationUpdater::new(&config);
        let input = InputState {
            mouse_x: 1.0,
            mouse_y: -1.0,
            progress: 0.0,
        };

        updater.update(&input, &mut camera, 0.0);
        assert!((updater.transform().rotation_x - (-0.2 * 0.05)).abs() < 1e-7);
        assert!((updater.transform().rotation_z - (0.1 * 0.05)).abs() < 1e-7);
    }

    #[test]
    fn test_camera_bobs_around_base_height() {
        let config = GalaxyConfig::default();
        let mut camera = GalaxyCamera::from_config(&config);
        let mut updater = AnimationUpdater::new(&config);
        let peak_ms = std::f64::consts::FRAC_PI_2 / config.bob_frequency;

        updater.update(&InputState::default(), &mut camera, peak_ms);
        assert!((camera.position.y - 110.0).abs() < 1e-3);
        assert_eq!(camera.target, glam::Vec3::ZERO);
    }
}
