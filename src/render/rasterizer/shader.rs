//! Pixel shaders for triangle rasterization.
//!
//! The rasterizer decides coverage and depth; a [`PixelShader`] turns the
//! interpolation weights of a covered pixel into a color. Shaders are passed
//! as generic parameters so the fill variant is fixed once per triangle.

use crate::math::Vec2;
use crate::texture::Texture;

/// Per-pixel color computation.
///
/// `lambda` holds perspective-correct barycentric weights `[λ0, λ1, λ2]`
/// summing to 1. Any per-vertex attribute interpolates as
/// `λ0 * a0 + λ1 * a1 + λ2 * a2`.
pub trait PixelShader {
    fn shade(&self, lambda: [f32; 3]) -> u32;
}

/// Constant color for the whole triangle.
pub struct FlatShader {
    color: u32,
}

impl FlatShader {
    pub fn new(color: u32) -> Self {
        Self { color }
    }
}

impl PixelShader for FlatShader {
    #[inline]
    fn shade(&self, _lambda: [f32; 3]) -> u32 {
        self.color
    }
}

/// Nearest-texel lookup at the interpolated UV.
pub struct TextureShader<'a> {
    texture: &'a Texture,
    uvs: [Vec2; 3],
}

impl<'a> TextureShader<'a> {
    pub fn new(texture: &'a Texture, uvs: [Vec2; 3]) -> Self {
        Self { texture, uvs }
    }

    #[inline]
    pub fn interpolate_uv(&self, lambda: [f32; 3]) -> Vec2 {
        self.uvs[0] * lambda[0] + self.uvs[1] * lambda[1] + self.uvs[2] * lambda[2]
    }
}

impl PixelShader for TextureShader<'_> {
    #[inline]
    fn shade(&self, lambda: [f32; 3]) -> u32 {
        let uv = self.interpolate_uv(lambda);
        self.texture.sample(uv.x, uv.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn flat_shader_ignores_weights() {
        let shader = FlatShader::new(0xFF123456);
        assert_eq!(shader.shade([1.0, 0.0, 0.0]), 0xFF123456);
        assert_eq!(shader.shade([0.2, 0.3, 0.5]), 0xFF123456);
    }

    #[test]
    fn texture_shader_blends_uvs() {
        let texture = Texture::from_argb(1, 1, vec![0xFFABCDEF]).unwrap();
        let shader = TextureShader::new(
            &texture,
            [
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(0.0, 1.0),
            ],
        );
        let uv = shader.interpolate_uv([0.5, 0.25, 0.25]);
        assert_relative_eq!(uv.x, 0.25);
        assert_relative_eq!(uv.y, 0.25);
        assert_eq!(shader.shade([0.5, 0.25, 0.25]), 0xFFABCDEF);
    }
}
