// Galaxy Field Constants - SINGLE SOURCE OF TRUTH
//
// Every tunable default of the effect lives here. `GalaxyConfig::default()`
// is built from these values and the WGSL uniforms are filled from the config,
// so nothing else in the crate should hard-code them.

/// Point cloud generation
pub mod galaxy {
    /// Number of particles in the cloud
    pub const PARTICLE_COUNT: usize = 4500;

    /// Outer radius of the disc in world units
    pub const RADIUS: f32 = 200.0;

    /// Number of spiral arms, particles are assigned round-robin
    pub const BRANCHES: u32 = 3;

    /// Extra angle per unit of radius that bends the arms into spirals
    pub const SPIN: f32 = 0.05;

    /// Maximum per-axis jitter distance
    pub const RANDOMNESS: f32 = 30.0;

    /// Exponent applied to the jitter sample, pulls most points onto the arm
    pub const RANDOMNESS_POWER: i32 = 3;

    /// Disc thickness as a fraction of the particle's radius
    pub const VERTICAL_SPREAD: f32 = 0.2;

    /// Warm gold at the core
    pub const INNER_COLOR: [f32; 3] = [1.0, 0.75, 0.0];

    /// White at the rim
    pub const OUTER_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

    /// Per-particle size multiplier is drawn from [0, MAX_PARTICLE_SIZE)
    pub const MAX_PARTICLE_SIZE: f32 = 2.0;
}

/// Point sprite material
pub mod sprite {
    /// Edge length of the radial-gradient sprite in texels
    pub const SPRITE_SIZE: u32 = 32;

    /// Gradient stops as (offset along radius, alpha); colour is white throughout
    pub const GRADIENT_STOPS: [(f32, f32); 4] = [(0.0, 1.0), (0.2, 0.8), (0.5, 0.2), (1.0, 0.0)];

    /// Base point size in pixels before attenuation
    pub const POINT_SIZE: f32 = 5.0;

    /// Overall material opacity
    pub const OPACITY: f32 = 0.9;
}

/// Camera placement and projection
pub mod camera_constants {
    pub const FOV_DEGREES: f32 = 60.0;
    pub const ZNEAR: f32 = 0.1;
    pub const ZFAR: f32 = 1000.0;

    /// Initial eye position, the camera always looks at the origin
    pub const POSITION: [f32; 3] = [0.0, 100.0, 400.0];

    /// Vertical bob around POSITION[1]
    pub const BOB_AMPLITUDE: f32 = 10.0;

    /// Radians per wall-clock millisecond
    pub const BOB_FREQUENCY: f64 = 0.0005;
}

/// Per-frame motion
pub mod motion {
    /// Spin per frame while idle
    pub const IDLE_SPEED: f32 = 0.001;

    /// Spin per frame while a job is in progress
    pub const PROCESSING_SPEED: f32 = 0.05;

    /// First-order lag factor per frame (not time-delta corrected)
    pub const SMOOTHING: f32 = 0.05;

    /// Tilt about X per unit of normalized mouse Y
    pub const TILT_X_FACTOR: f32 = 0.2;

    /// Tilt about Z per unit of normalized mouse X
    pub const TILT_Z_FACTOR: f32 = 0.1;

    /// Progress is "processing" strictly between these bounds
    pub const PROGRESS_MIN: f64 = 0.0;
    pub const PROGRESS_MAX: f64 = 100.0;
}

/// Frame pacing and input rate limits
pub mod timing {
    pub const TARGET_FPS: f64 = 60.0;
    pub const RESIZE_DEBOUNCE_MS: f64 = 150.0;
    pub const MOUSE_THROTTLE_MS: f64 = 16.0;

    /// Log frame statistics every N rendered frames
    pub const STATS_LOG_INTERVAL: u64 = 600;
}

/// Output surface limits
pub mod surface {
    pub const MAX_WIDTH: u32 = 1920;
    pub const MAX_HEIGHT: u32 = 1080;

    /// Device pixel ratio is capped to bound fragment cost
    pub const MAX_PIXEL_RATIO: f64 = 1.5;

    /// Requested MSAA sample count, falls back to 1 when unsupported
    pub const MSAA_SAMPLES: u32 = 4;
}
