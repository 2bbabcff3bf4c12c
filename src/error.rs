//! Errors raised while loading meshes and textures.

use std::fmt;

#[derive(Debug)]
pub enum LoadError {
    /// The OBJ file could not be read or parsed.
    Obj(tobj::LoadError),
    /// The image file could not be opened or decoded.
    Image(image::ImageError),
    /// The OBJ parsed but contained no triangles.
    EmptyMesh,
    /// A raw pixel buffer did not match `width * height * 4` bytes.
    TextureSize { expected: usize, actual: usize },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Obj(err) => write!(f, "failed to load OBJ: {err}"),
            LoadError::Image(err) => write!(f, "failed to load image: {err}"),
            LoadError::EmptyMesh => write!(f, "mesh contains no triangles"),
            LoadError::TextureSize { expected, actual } => write!(
                f,
                "texture buffer holds {actual} bytes, expected {expected}"
            ),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Obj(err) => Some(err),
            LoadError::Image(err) => Some(err),
            _ => None,
        }
    }
}

impl From<tobj::LoadError> for LoadError {
    fn from(err: tobj::LoadError) -> Self {
        LoadError::Obj(err)
    }
}

impl From<image::ImageError> for LoadError {
    fn from(err: image::ImageError) -> Self {
        LoadError::Image(err)
    }
}
