//! Perspective projection parameters.
//!
//! [`Projection`] is the single source of truth for FOV, aspect ratio and the
//! near/far distances. The projection matrix and the camera-space frustum are
//! both derived from it.

use crate::clipper::Frustum;
use crate::math::{Mat4, Vec4};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians.
    fov_y: f32,
    /// Width divided by height.
    aspect_ratio: f32,
    z_near: f32,
    z_far: f32,
}

impl Projection {
    /// # Arguments
    /// * `fov_y` - Vertical field of view in radians
    /// * `aspect_ratio` - Width divided by height
    /// * `z_near` - Near plane distance, must be > 0
    /// * `z_far` - Far plane distance, must be > `z_near`
    ///
    /// Other values give an undefined matrix; nothing is checked here.
    pub fn new(fov_y: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Self {
            fov_y,
            aspect_ratio,
            z_near,
            z_far,
        }
    }

    pub fn from_degrees(fov_y_degrees: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Self::new(fov_y_degrees.to_radians(), aspect_ratio, z_near, z_far)
    }

    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    /// Horizontal field of view, `2 * atan(tan(fov_y / 2) * aspect)`.
    pub fn fov_x(&self) -> f32 {
        2.0 * ((self.fov_y / 2.0).tan() * self.aspect_ratio).atan()
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn z_near(&self) -> f32 {
        self.z_near
    }

    pub fn z_far(&self) -> f32 {
        self.z_far
    }

    /// Typically called on window resize.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective(self.fov_y, self.aspect_ratio, self.z_near, self.z_far)
    }

    /// Camera-space planes of the same view volume.
    pub fn frustum(&self) -> Frustum {
        Frustum::new(self.fov_y, self.fov_x(), self.z_near, self.z_far)
    }

    /// Clip space to raster space.
    ///
    /// Divides x, y and z by w (w itself is kept for depth and perspective
    /// correction), then maps NDC x from [-1, 1] to [0, width] and NDC y from
    /// [-1, 1] to [height, 0] so that +Y points down on screen.
    pub fn to_screen(clip: Vec4, width: u32, height: u32) -> Vec4 {
        let mut v = clip.perspective_divide();
        let half_width = width as f32 / 2.0;
        let half_height = height as f32 / 2.0;
        v.x = v.x * half_width + half_width;
        v.y = -v.y * half_height + half_height;
        v
    }
}
