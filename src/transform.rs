//! Model-to-world placement.
//!
//! [`Transform`] keeps position, Euler rotation and scale separately and
//! composes them into a single row-vector matrix on demand.

use crate::math::{Mat4, Vec3};

/// Position, rotation (Euler angles in radians) and scale of a model.
///
/// Mutating methods return `&mut Self` so calls can be chained:
///
/// ```ignore
/// model.transform_mut()
///     .set_position_xyz(0.0, 0.0, 5.0)
///     .rotate_y(0.01)
///     .set_scale_uniform(0.5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    position: Vec3,
    rotation: Vec3,
    scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) -> &mut Self {
        self.position = position;
        self
    }

    pub fn set_position_xyz(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.set_position(Vec3::new(x, y, z))
    }

    pub fn translate(&mut self, delta: Vec3) -> &mut Self {
        self.position = self.position + delta;
        self
    }

    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: Vec3) -> &mut Self {
        self.rotation = rotation;
        self
    }

    pub fn set_rotation_xyz(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.set_rotation(Vec3::new(x, y, z))
    }

    /// Adds a delta to every Euler angle.
    pub fn rotate(&mut self, delta: Vec3) -> &mut Self {
        self.rotation = self.rotation + delta;
        self
    }

    pub fn rotate_x(&mut self, angle: f32) -> &mut Self {
        self.rotation.x += angle;
        self
    }

    pub fn rotate_y(&mut self, angle: f32) -> &mut Self {
        self.rotation.y += angle;
        self
    }

    pub fn rotate_z(&mut self, angle: f32) -> &mut Self {
        self.rotation.z += angle;
        self
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: Vec3) -> &mut Self {
        self.scale = scale;
        self
    }

    pub fn set_scale_uniform(&mut self, s: f32) -> &mut Self {
        self.set_scale(Vec3::new(s, s, s))
    }

    /// World matrix `S * R * T`: scale first, then rotate, then translate.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::scaling(self.scale.x, self.scale.y, self.scale.z)
            * Mat4::rotation(self.rotation.x, self.rotation.y, self.rotation.z)
            * Mat4::translation(self.position.x, self.position.y, self.position.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec4;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn default_is_identity() {
        let t = Transform::default();
        assert_eq!(t.scale(), Vec3::ONE);
        assert_eq!(t.to_matrix(), Mat4::identity());
    }

    #[test]
    fn fluent_setters_chain() {
        let mut t = Transform::new();
        t.set_position_xyz(1.0, 2.0, 3.0)
            .rotate_y(0.5)
            .rotate_y(0.25)
            .set_scale_uniform(2.0);

        assert_eq!(t.position(), Vec3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(t.rotation().y, 0.75);
        assert_eq!(t.scale(), Vec3::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn matrix_scales_then_rotates_then_translates() {
        let mut t = Transform::new();
        t.set_scale_uniform(2.0)
            .set_rotation_xyz(0.0, FRAC_PI_2, 0.0)
            .set_position_xyz(0.0, 0.0, 5.0);

        // (0,0,1) -> scaled (0,0,2) -> rotated about Y onto +X -> moved to z=5.
        let p = Vec4::point(0.0, 0.0, 1.0) * t.to_matrix();
        assert_relative_eq!(p, Vec4::point(2.0, 0.0, 5.0), epsilon = 1e-5);
    }
}
