use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{camera_constants, galaxy, motion, sprite, surface, timing};
use crate::error::{invalid_config, GalaxyResult};

/// Tunable parameters of the galaxy effect.
///
/// Every field falls back to the value in `constants.rs`, so a config file
/// only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalaxyConfig {
    pub particle_count: usize,
    pub radius: f32,
    pub branches: u32,
    pub spin: f32,
    pub randomness: f32,
    pub randomness_power: i32,
    pub vertical_spread: f32,
    pub inner_color: [f32; 3],
    pub outer_color: [f32; 3],
    pub max_particle_size: f32,
    /// Seed for reproducible clouds, `None` draws from OS entropy
    pub seed: Option<u64>,

    pub sprite_size: u32,
    pub point_size: f32,
    pub opacity: f32,

    pub fov_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
    pub camera_position: [f32; 3],
    pub bob_amplitude: f32,
    pub bob_frequency: f64,

    pub idle_speed: f32,
    pub processing_speed: f32,
    pub smoothing: f32,
    pub tilt_x_factor: f32,
    pub tilt_z_factor: f32,

    pub target_fps: f64,
    pub resize_debounce_ms: f64,
    pub mouse_throttle_ms: f64,

    pub max_width: u32,
    pub max_height: u32,
    pub max_pixel_ratio: f64,
}

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self {
            particle_count: galaxy::PARTICLE_COUNT,
            radius: galaxy::RADIUS,
            branches: galaxy::BRANCHES,
            spin: galaxy::SPIN,
            randomness: galaxy::RANDOMNESS,
            randomness_power: galaxy::RANDOMNESS_POWER,
            vertical_spread: galaxy::VERTICAL_SPREAD,
            inner_color: galaxy::INNER_COLOR,
            outer_color: galaxy::OUTER_COLOR,
            max_particle_size: galaxy::MAX_PARTICLE_SIZE,
            seed: None,

            sprite_size: sprite::SPRITE_SIZE,
            point_size: sprite::POINT_SIZE,
            opacity: sprite::OPACITY,

            fov_degrees: camera_constants::FOV_DEGREES,
            znear: camera_constants::ZNEAR,
            zfar: camera_constants::ZFAR,
            camera_position: camera_constants::POSITION,
            bob_amplitude: camera_constants::BOB_AMPLITUDE,
            bob_frequency: camera_constants::BOB_FREQUENCY,

            idle_speed: motion::IDLE_SPEED,
            processing_speed: motion::PROCESSING_SPEED,
            smoothing: motion::SMOOTHING,
            tilt_x_factor: motion::TILT_X_FACTOR,
            tilt_z_factor: motion::TILT_Z_FACTOR,

            target_fps: timing::TARGET_FPS,
            resize_debounce_ms: timing::RESIZE_DEBOUNCE_MS,
            mouse_throttle_ms: timing::MOUSE_THROTTLE_MS,

            max_width: surface::MAX_WIDTH,
            max_height: surface::MAX_HEIGHT,
            max_pixel_ratio: surface::MAX_PIXEL_RATIO,
        }
    }
}

impl GalaxyConfig {
    /// Parse a TOML document and validate the result
    pub fn from_toml_str(raw: &str) -> GalaxyResult<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON document and validate the result
    pub fn from_json_str(raw: &str) -> GalaxyResult<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML config file from disk
    pub fn load(path: impl AsRef<Path>) -> GalaxyResult<Self> {
        let path = path.as_ref();
        log::info!("[config] Loading galaxy config from {}", path.display());
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Reject values that would make generation or pacing meaningless
    pub fn validate(&self) -> GalaxyResult<()> {
        if self.particle_count == 0 {
            return Err(invalid_config("particle_count", "must be greater than zero"));
        }
        if self.branches == 0 {
            return Err(invalid_config("branches", "must be greater than zero"));
        }
        if !(self.radius > 0.0) {
            return Err(invalid_config("radius", format!("must be positive, got {}", self.radius)));
        }
        if self.sprite_size == 0 {
            return Err(invalid_config("sprite_size", "must be greater than zero"));
        }
        if !(self.target_fps > 0.0) {
            return Err(invalid_config(
                "target_fps",
                format!("must be positive, got {}", self.target_fps),
            ));
        }
        if !(self.resize_debounce_ms > 0.0) {
            return Err(invalid_config(
                "resize_debounce_ms",
                format!("must be positive, got {}", self.resize_debounce_ms),
            ));
        }
        if !(self.mouse_throttle_ms > 0.0) {
            return Err(invalid_config(
                "mouse_throttle_ms",
                format!("must be positive, got {}", self.mouse_throttle_ms),
            ));
        }
        if self.max_width == 0 || self.max_height == 0 {
            return Err(invalid_config(
                "max_width/max_height",
                format!("must be non-zero, got {}x{}", self.max_width, self.max_height),
            ));
        }
        if !(self.max_pixel_ratio > 0.0) {
            return Err(invalid_config("max_pixel_ratio", "must be positive"));
        }
        if !(self.znear > 0.0 && self.zfar > self.znear) {
            return Err(invalid_config(
                "znear/zfar",
                format!("need 0 < znear < zfar, got {} / {}", self.znear, self.zfar),
            ));
        }
        Ok(())
    }

    /// Frame interval enforced by the frame limiter
    pub fn frame_interval_ms(&self) -> f64 {
        1000.0 / self.target_fps
    }

    /// Device pixel ratio after applying the cap
    pub fn effective_pixel_ratio(&self, device_pixel_ratio: f64) -> f64 {
        device_pixel_ratio.min(self.max_pixel_ratio).max(f64::MIN_POSITIVE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let config = GalaxyConfig::default();
        assert_eq!(config.particle_count, 4500);
        assert_eq!(config.branches, 3);
        assert_eq!(config.camera_position, [0.0, 100.0, 400.0]);
        assert!((config.frame_interval_ms() - 1000.0 / 60.0).abs() < 1e-9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = GalaxyConfig::from_toml_str("particle_count = 100\nseed = 7\n").unwrap();
        assert_eq!(config.particle_count, 100);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.radius, 200.0);
        assert_eq!(config.max_width, 1920);
    }

    #[test]
    fn test_serialized_config_parses_back() {
        let config = GalaxyConfig {
            seed: Some(11),
            particle_count: 900,
            ..GalaxyConfig::default()
        };
        let raw = toml::to_string(&config).unwrap();
        assert_eq!(GalaxyConfig::from_toml_str(&raw).unwrap(), config);
    }

    #[test]
    fn test_json_config() {
        let config = GalaxyConfig::from_json_str(r#"{"opacity": 0.5, "branches": 5}"#).unwrap();
        assert_eq!(config.branches, 5);
        assert_eq!(config.opacity, 0.5);
    }

    #[test]
    fn test_validation_rejects_zero_particles() {
        let err = GalaxyConfig::from_toml_str("particle_count = 0").unwrap_err();
        assert!(err.to_string().contains("particle_count"));
    }

    #[test]
    fn test_validation_rejects_bad_depth_range() {
        let config = GalaxyConfig {
            znear: 10.0,
            zfar: 1.0,
            ..GalaxyConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_pixel_ratio_cap() {
        let config = GalaxyConfig::default();
        assert_eq!(config.effective_pixel_ratio(3.0), 1.5);
        assert_eq!(config.effective_pixel_ratio(1.0), 1.0);
    }
}
