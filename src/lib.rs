//! A CPU-only software 3D rendering pipeline.
//!
//! Meshes are transformed through world and camera space, culled, clipped
//! against the view frustum in homogeneous clip space and rasterized into a
//! packed ARGB color buffer with optional texture mapping and wireframe
//! overlay. Presentation is left to the caller; the `window` feature adds an
//! SDL2 viewer.
//!
//! # Conventions
//!
//! - Left-handed coordinates, +Z into the screen
//! - Clockwise winding for front faces
//! - Row vectors: `v * M`, transforms compose left to right
//!
//! # Quick Start
//!
//! ```no_run
//! use softrender::prelude::*;
//!
//! let mut engine = Engine::new(800, 600);
//! engine.set_render_mode(RenderMode::Filled);
//! engine.update(1.0 / 60.0);
//! engine.render();
//! let pixels: &[u32] = engine.color_buffer();
//! # let _ = pixels;
//! ```

pub mod camera;
pub mod clipper;
pub mod colors;
pub mod config;
pub mod engine;
pub mod error;
pub mod math;
pub mod mesh;
pub mod model;
pub mod projection;
pub mod render;
pub mod texture;
pub mod transform;
pub mod triangle;

#[cfg(feature = "window")]
pub mod window;

pub use camera::{Camera, Movement};
pub use config::Config;
pub use engine::{Engine, FrameStats, RenderMode};
pub use error::LoadError;
pub use mesh::Mesh;
pub use model::Model;
pub use projection::Projection;
pub use texture::Texture;
pub use transform::Transform;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::camera::{Camera, Movement};
    pub use crate::config::Config;
    pub use crate::engine::{Engine, FrameStats, RenderMode};
    pub use crate::error::LoadError;
    pub use crate::math::{Mat4, Vec2, Vec3, Vec4};
    pub use crate::mesh::Mesh;
    pub use crate::model::Model;
    pub use crate::projection::Projection;
    pub use crate::texture::Texture;
    pub use crate::transform::Transform;
    pub use crate::triangle::{Face, Triangle};
}

/// Types the benchmarks drive directly. Not part of the stable API.
pub mod bench {
    pub use crate::clipper::Polygon;
    pub use crate::render::{EdgeFunctionRasterizer, Fill, FrameBuffer, Rasterizer};
    pub use crate::texture::Texture;
    pub use crate::triangle::Triangle;
}
