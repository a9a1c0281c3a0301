use lazy_static::lazy_static;

use crate::constants::sprite::{GRADIENT_STOPS, SPRITE_SIZE};
use crate::error::{GalaxyError, GalaxyResult};

/// Largest sprite edge we are willing to rasterize on the CPU
const MAX_SPRITE_SIZE: u32 = 1024;

lazy_static! {
    /// The default sprite has no dynamic inputs, so it is rasterized once.
    static ref DEFAULT_SPRITE: SpriteTexture = sprite_or_blank(SPRITE_SIZE);
}

/// RGBA8 texture (straight alpha) used as the point sprite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteTexture {
    size: u32,
    pixels: Vec<u8>,
}

impl SpriteTexture {
    /// Opaque white 1x1 texture, used when the gradient cannot be produced
    pub fn blank() -> Self {
        Self {
            size: 1,
            pixels: vec![255; 4],
        }
    }

    /// Edge length in texels
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Row-major RGBA8 data, `size * size * 4` bytes
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Alpha of the texel at (x, y)
    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        self.pixels[((y * self.size + x) * 4 + 3) as usize]
    }
}

/// Alpha of the radial gradient at `t` (0 = centre, 1 = edge)
pub fn gradient_alpha(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    for pair in GRADIENT_STOPS.windows(2) {
        let (start, start_alpha) = pair[0];
        let (end, end_alpha) = pair[1];
        if t <= end {
            let span = (end - start).max(f32::EPSILON);
            return start_alpha + (end_alpha - start_alpha) * ((t - start) / span);
        }
    }
    GRADIENT_STOPS[GRADIENT_STOPS.len() - 1].1
}

/// Rasterize a soft radial gradient: white throughout, opaque at the centre
/// and transparent at the rim.
pub fn generate_sprite(size: u32) -> GalaxyResult<SpriteTexture> {
    if size == 0 || size > MAX_SPRITE_SIZE {
        return Err(GalaxyError::SpriteUnavailable {
            reason: format!("size {} outside 1..={}", size, MAX_SPRITE_SIZE),
        });
    }

    let half = size as f32 / 2.0;
    let mut pixels = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let dx = x as f32 + 0.5 - half;
            let dy = y as f32 + 0.5 - half;
            let t = (dx * dx + dy * dy).sqrt() / half;
            let alpha = (gradient_alpha(t) * 255.0).round() as u8;
            pixels.extend_from_slice(&[255, 255, 255, alpha]);
        }
    }

    Ok(SpriteTexture { size, pixels })
}

/// Rasterize the sprite, substituting a blank texture on failure
pub fn sprite_or_blank(size: u32) -> SpriteTexture {
    match generate_sprite(size) {
        Ok(sprite) => sprite,
        Err(e) => {
            log::warn!("[particles] {}; using blank sprite", e);
            SpriteTexture::blank()
        }
    }
}

/// Sprite for `size`, served from the cache when it is the default size
pub fn sprite_texture(size: u32) -> SpriteTexture {
    if size == SPRITE_SIZE {
        DEFAULT_SPRITE.clone()
    } else {
        sprite_or_blank(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_stops() {
        assert_eq!(gradient_alpha(0.0), 1.0);
        assert!((gradient_alpha(0.2) - 0.8).abs() < 1e-6);
        assert!((gradient_alpha(0.5) - 0.2).abs() < 1e-6);
        assert_eq!(gradient_alpha(1.0), 0.0);
        assert_eq!(gradient_alpha(2.0), 0.0);
    }

    #[test]
    fn test_sprite_centre_opaque_edges_transparent() {
        let sprite = generate_sprite(32).unwrap();
        assert_eq!(sprite.size(), 32);
        assert_eq!(sprite.pixels().len(), 32 * 32 * 4);
        assert!(sprite.alpha_at(16, 16) > 240);
        assert_eq!(sprite.alpha_at(0, 0), 0);
        assert!(sprite.alpha_at(16, 16) > sprite.alpha_at(16, 24));
    }

    #[test]
    fn test_zero_size_falls_back_to_blank() {
        assert!(generate_sprite(0).is_err());
        assert_eq!(sprite_or_blank(0), SpriteTexture::blank());
    }

    #[test]
    fn test_default_sprite_is_cached_raster() {
        assert_eq!(sprite_texture(SPRITE_SIZE), generate_sprite(SPRITE_SIZE).unwrap());
    }
}
