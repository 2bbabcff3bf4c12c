//! Triangle fill.
//!
//! [`EdgeFunctionRasterizer`] scans the triangle's bounding box with
//! edge functions evaluated at every pixel center. What ends up in a covered pixel is
//! described by a [`Fill`] and computed by a [`shader::PixelShader`].

mod edgefunction;
pub mod shader;

pub use edgefunction::{perspective_correct, EdgeFunctionRasterizer};

use super::framebuffer::FrameBuffer;
use crate::texture::Texture;
use crate::triangle::Triangle;

/// How a triangle's covered pixels are colored.
#[derive(Clone, Copy, Debug)]
pub enum Fill<'a> {
    /// One packed ARGB color for every pixel.
    Flat(u32),
    /// Texture sampled at perspective-correct UVs.
    Textured(&'a Texture),
}

/// Fills screen-space triangles into a frame buffer.
///
/// Points are expected in raster space: x/y in pixels, z the NDC depth and
/// w the clip-space w used for depth and perspective correction.
pub trait Rasterizer {
    fn fill_triangle(&self, triangle: &Triangle, buffer: &mut FrameBuffer, fill: Fill<'_>);
}
