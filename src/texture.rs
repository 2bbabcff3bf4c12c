use std::path::Path;

use crate::colors;
use crate::error::LoadError;

/// Represents a 2D texture for texture mapping.
#[derive(Clone, Debug)]
pub struct Texture {
    data: Vec<u32>, // The pixel data of the texture in ARGB format.
    width: u32,     // The width of the texture in pixels.
    height: u32,    // The height of the texture in pixels.
}

impl Texture {
    /// Load a texture from an image file (PNG, JPG, etc.)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let img = image::open(path)?.to_rgba8();
        let (width, height) = img.dimensions();
        log::debug!("loaded texture {} ({width}x{height})", path.display());
        Self::from_rgba8(width, height, img.as_raw())
    }

    /// Builds a texture from row-major RGBA8 bytes.
    pub fn from_rgba8(width: u32, height: u32, rgba: &[u8]) -> Result<Self, LoadError> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected || expected == 0 {
            return Err(LoadError::TextureSize {
                expected,
                actual: rgba.len(),
            });
        }

        let data = rgba
            .chunks_exact(4)
            .map(|p| colors::from_rgba8([p[0], p[1], p[2], p[3]]))
            .collect();

        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Builds a texture from already packed ARGB pixels.
    pub fn from_argb(width: u32, height: u32, data: Vec<u32>) -> Result<Self, LoadError> {
        let expected = width as usize * height as usize;
        if data.len() != expected || expected == 0 {
            return Err(LoadError::TextureSize {
                expected: expected * 4,
                actual: data.len() * 4,
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Sample the texture at UV coordinates using nearest-neighbor filtering.
    ///
    /// # UV Coordinate Convention
    /// - UV coordinates are in [0,1] range
    /// - (0,0) = bottom-left in OBJ convention, but textures are stored top-left origin
    /// - We flip V to correct for this: v_corrected = 1.0 - v
    ///
    /// # Wrapping
    /// Uses repeat/wrap mode via rem_euclid for UVs outside [0,1]
    #[inline]
    pub fn sample(&self, u: f32, v: f32) -> u32 {
        let u = u.rem_euclid(1.0);
        let v = (1.0 - v).rem_euclid(1.0);

        // Convert normalized [0,1) UV to pixel coordinates [0, width-1]
        let x = ((u * self.width as f32) as u32).min(self.width - 1);
        let y = ((v * self.height as f32) as u32).min(self.height - 1);

        self.data[(y * self.width + x) as usize]
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}
