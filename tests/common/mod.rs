// Shared test double: a renderer that records what the lifecycle asks of it

use galaxy_field::particles::SpriteTexture;
use galaxy_field::{FrameRenderer, FrameView, GalaxyConfig, GalaxyResult, PointCloud, SurfaceSize};

#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub uploaded_points: Option<usize>,
    pub sprite_size: Option<u32>,
    pub resizes: Vec<SurfaceSize>,
    pub draws: Vec<FrameView>,
}

impl FrameRenderer for RecordingRenderer {
    fn upload(&mut self, cloud: &PointCloud, sprite: &SpriteTexture) -> GalaxyResult<()> {
        self.uploaded_points = Some(cloud.len());
        self.sprite_size = Some(sprite.size());
        Ok(())
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.resizes.push(size);
    }

    fn draw(&mut self, view: &FrameView) -> GalaxyResult<()> {
        self.draws.push(*view);
        Ok(())
    }
}

#[allow(dead_code)]
pub fn test_config() -> GalaxyConfig {
    GalaxyConfig {
        particle_count: 500,
        seed: Some(1234),
        ..GalaxyConfig::default()
    }
}
