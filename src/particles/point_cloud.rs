use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

use crate::config::GalaxyConfig;

/// One generated particle, before it is flattened into the cloud buffers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSample {
    /// Distance from the galaxy centre before jitter, in [0, radius]
    pub radius: f32,
    /// Angle of the arm this particle belongs to
    pub branch_angle: f32,
    pub position: Vec3,
    pub color: [f32; 3],
    /// Size multiplier applied to the material's base point size
    pub size: f32,
}

/// Per-instance vertex data uploaded to the GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointInstance {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub size: f32,
}

/// Point cloud stored as parallel fixed-length arrays.
///
/// The buffers are filled once by [`generate_point_cloud`] and are read-only
/// afterwards; the only thing that moves at runtime is the mesh transform.
#[derive(Debug, Clone)]
pub struct PointCloud {
    positions: Box<[f32]>,
    colors: Box<[f32]>,
    sizes: Box<[f32]>,
}

impl PointCloud {
    /// Number of particles
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Interleaved xyz positions, `3 * len()` floats
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Interleaved rgb colours, `3 * len()` floats
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    pub fn position(&self, index: usize) -> Vec3 {
        let i = index * 3;
        Vec3::new(self.positions[i], self.positions[i + 1], self.positions[i + 2])
    }

    pub fn color(&self, index: usize) -> [f32; 3] {
        let i = index * 3;
        [self.colors[i], self.colors[i + 1], self.colors[i + 2]]
    }

    /// Interleave the parallel arrays into GPU instance records
    pub fn instances(&self) -> Vec<PointInstance> {
        (0..self.len())
            .map(|i| PointInstance {
                position: self.position(i).to_array(),
                color: self.color(i),
                size: self.sizes[i],
            })
            .collect()
    }
}

/// Angle of the spiral arm that particle `index` is assigned to
pub fn branch_angle(index: usize, branches: u32) -> f32 {
    let branches = branches.max(1);
    (index % branches as usize) as f32 * (TAU / branches as f32)
}

/// Colour interpolation factor for a particle at `radius`
pub fn color_factor(radius: f32, max_radius: f32) -> f32 {
    (radius / max_radius).clamp(0.0, 1.0)
}

fn lerp_color(inner: [f32; 3], outer: [f32; 3], t: f32) -> [f32; 3] {
    [
        inner[0] + (outer[0] - inner[0]) * t,
        inner[1] + (outer[1] - inner[1]) * t,
        inner[2] + (outer[2] - inner[2]) * t,
    ]
}

/// Signed jitter, biased toward zero by `power`
fn jitter<R: Rng + ?Sized>(rng: &mut R, config: &GalaxyConfig) -> f32 {
    let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
    sign * rng.gen::<f32>().powi(config.randomness_power) * config.randomness
}

/// Generate the particle at `index`
pub fn sample_particle<R: Rng + ?Sized>(
    index: usize,
    config: &GalaxyConfig,
    rng: &mut R,
) -> ParticleSample {
    let radius = rng.gen::<f32>() * config.radius;
    let spin_angle = radius * config.spin;
    let branch_angle = branch_angle(index, config.branches);

    let jitter_x = jitter(rng, config);
    let jitter_y = jitter(rng, config);
    let jitter_z = jitter(rng, config);

    let angle = branch_angle + spin_angle;
    let x = angle.cos() * radius + jitter_x;
    let z = angle.sin() * radius + jitter_z;
    let y = (rng.gen::<f32>() - 0.5) * radius * config.vertical_spread + jitter_y;

    let color = lerp_color(
        config.inner_color,
        config.outer_color,
        color_factor(radius, config.radius),
    );
    let size = rng.gen::<f32>() * config.max_particle_size;

    ParticleSample {
        radius,
        branch_angle,
        position: Vec3::new(x, y, z),
        color,
        size,
    }
}

/// Generate the full cloud. Buffers are allocated once at their final length.
pub fn generate_point_cloud<R: Rng + ?Sized>(config: &GalaxyConfig, rng: &mut R) -> PointCloud {
    let count = config.particle_count;
    let mut positions = vec![0.0f32; count * 3];
    let mut colors = vec![0.0f32; count * 3];
    let mut sizes = vec![0.0f32; count];

    for i in 0..count {
        let particle = sample_particle(i, config, rng);
        let i3 = i * 3;
        positions[i3..i3 + 3].copy_from_slice(&particle.position.to_array());
        colors[i3..i3 + 3].copy_from_slice(&particle.color);
        sizes[i] = particle.size;
    }

    log::debug!("[particles] Generated point cloud with {} particles", count);

    PointCloud {
        positions: positions.into_boxed_slice(),
        colors: colors.into_boxed_slice(),
        sizes: sizes.into_boxed_slice(),
    }
}
