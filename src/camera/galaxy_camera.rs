use glam::{Mat4, Vec3};

use crate::config::GalaxyConfig;

/// Perspective camera that always aims at a fixed target
#[derive(Debug, Clone, PartialEq)]
pub struct GalaxyCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fovy_radians: f32,
    pub aspect_ratio: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl GalaxyCamera {
    /// Camera at the configured position looking at the origin
    pub fn from_config(config: &GalaxyConfig) -> Self {
        Self {
            position: Vec3::from_array(config.camera_position),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fovy_radians: config.fov_degrees.to_radians(),
            aspect_ratio: 1.0,
            znear: config.znear,
            zfar: config.zfar,
        }
    }

    /// Update aspect ratio for a new surface size
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect_ratio = width as f32 / height as f32;
    }

    /// Move the eye vertically, the view keeps aiming at `target`
    pub fn set_height(&mut self, y: f32) {
        self.position.y = y;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Right-handed projection with a [0, 1] depth range, as wgpu expects
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect_ratio, self.znear, self.zfar)
    }
}

/// Vertical eye position for the slow camera bob
pub fn bob_height(base_y: f32, amplitude: f32, frequency: f64, wall_clock_ms: f64) -> f32 {
    base_y + ((wall_clock_ms * frequency).sin() as f32) * amplitude
}
