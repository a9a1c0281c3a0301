//! Procedural galaxy point cloud and its sprite texture

pub mod point_cloud;
pub mod sprite;

pub use point_cloud::{
    branch_angle, color_factor, generate_point_cloud, sample_particle, ParticleSample, PointCloud,
    PointInstance,
};
pub use sprite::{generate_sprite, sprite_or_blank, sprite_texture, SpriteTexture};
