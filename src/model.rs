//! A renderable object: mesh, optional texture and world transform.

use std::path::Path;

use crate::error::LoadError;
use crate::mesh::Mesh;
use crate::texture::Texture;
use crate::transform::Transform;

#[derive(Clone, Debug, Default)]
pub struct Model {
    mesh: Mesh,
    texture: Option<Texture>,
    transform: Transform,
}

impl Model {
    pub fn new(mesh: Mesh) -> Self {
        Self {
            mesh,
            texture: None,
            transform: Transform::default(),
        }
    }

    /// Loads the mesh from an OBJ file, leaving the model untextured.
    pub fn from_obj<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        Ok(Self::new(Mesh::from_obj(path)?))
    }

    pub fn with_texture(mut self, texture: Texture) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn name(&self) -> &str {
        self.mesh.name()
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn set_mesh(&mut self, mesh: Mesh) {
        self.mesh = mesh;
    }

    pub fn texture(&self) -> Option<&Texture> {
        self.texture.as_ref()
    }

    pub fn set_texture(&mut self, texture: Texture) {
        self.texture = Some(texture);
    }

    pub fn clear_texture(&mut self) {
        self.texture = None;
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }
}
