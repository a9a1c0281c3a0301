//! Rendering seam and the wgpu point renderer.
//!
//! The lifecycle only talks to [`FrameRenderer`]; [`PointCloudRenderer`] is
//! the wgpu implementation used by both hosts.

mod gpu_context;
mod point_renderer;

use glam::Mat4;

use crate::error::GalaxyResult;
use crate::input::SurfaceSize;
use crate::particles::{PointCloud, SpriteTexture};

pub use gpu_context::{GpuContext, GpuContextConfig};
pub use point_renderer::{PointCloudRenderer, PointMaterial, PointUniforms};

/// Matrices for one draw of the scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameView {
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
}

/// Anything that can draw the galaxy: the GPU renderer or a test double
pub trait FrameRenderer {
    /// Upload the cloud and sprite; called once per `init`
    fn upload(&mut self, cloud: &PointCloud, sprite: &SpriteTexture) -> GalaxyResult<()>;

    /// Resize the output surface to `size` logical pixels
    fn resize(&mut self, size: SurfaceSize);

    /// Issue the frame's single draw call
    fn draw(&mut self, view: &FrameView) -> GalaxyResult<()>;
}
