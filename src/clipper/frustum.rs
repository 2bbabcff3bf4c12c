//! View-space frustum planes.
//!
//! The planes are built once from the projection parameters and used to drop
//! faces that lie entirely outside the view volume before they are projected.

use crate::math::Vec3;

/// Index of each plane in [`Frustum::planes`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrustumPlane {
    Near = 0,
    Far = 1,
    Left = 2,
    Right = 3,
    Top = 4,
    Bottom = 5,
}

impl FrustumPlane {
    pub const ALL: [FrustumPlane; 6] = [
        FrustumPlane::Near,
        FrustumPlane::Far,
        FrustumPlane::Left,
        FrustumPlane::Right,
        FrustumPlane::Top,
        FrustumPlane::Bottom,
    ];
}

/// A plane defined by a point on it and a unit normal facing the inside.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub point: Vec3,
    pub normal: Vec3,
}

impl Plane {
    pub const fn new(point: Vec3, normal: Vec3) -> Self {
        Self { point, normal }
    }

    /// Positive on the inside, negative outside.
    #[inline]
    pub fn signed_distance(&self, position: Vec3) -> f32 {
        (position - self.point).dot(self.normal)
    }
}

/// The six planes bounding the camera-space view volume.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frustum {
    pub planes: [Plane; 6],
}

impl Frustum {
    /// Builds the planes for a camera at the origin looking down +Z.
    ///
    /// Side planes pass through the origin; their normals are tilted by half
    /// the field of view on each axis.
    ///
    /// ```text
    /// near   P = (0, 0, near)  N = (0, 0, 1)
    /// far    P = (0, 0, far)   N = (0, 0, -1)
    /// left   P = 0             N = ( cos(h/2), 0, sin(h/2))
    /// right  P = 0             N = (-cos(h/2), 0, sin(h/2))
    /// top    P = 0             N = (0, -cos(v/2), sin(v/2))
    /// bottom P = 0             N = (0,  cos(v/2), sin(v/2))
    /// ```
    pub fn new(fov_y: f32, fov_x: f32, z_near: f32, z_far: f32) -> Self {
        let (sin_half_v, cos_half_v) = (fov_y / 2.0).sin_cos();
        let (sin_half_h, cos_half_h) = (fov_x / 2.0).sin_cos();

        Self {
            planes: [
                Plane::new(Vec3::new(0.0, 0.0, z_near), Vec3::new(0.0, 0.0, 1.0)),
                Plane::new(Vec3::new(0.0, 0.0, z_far), Vec3::new(0.0, 0.0, -1.0)),
                Plane::new(Vec3::ZERO, Vec3::new(cos_half_h, 0.0, sin_half_h)),
                Plane::new(Vec3::ZERO, Vec3::new(-cos_half_h, 0.0, sin_half_h)),
                Plane::new(Vec3::ZERO, Vec3::new(0.0, -cos_half_v, sin_half_v)),
                Plane::new(Vec3::ZERO, Vec3::new(0.0, cos_half_v, sin_half_v)),
            ],
        }
    }

    pub fn plane(&self, which: FrustumPlane) -> &Plane {
        &self.planes[which as usize]
    }

    /// True when every point lies outside one and the same plane.
    ///
    /// Such a triangle cannot produce any pixel; triangles straddling a plane
    /// are left to the clip-space clipper.
    pub fn rejects(&self, points: &[Vec3; 3]) -> bool {
        self.planes.iter().any(|plane| {
            points
                .iter()
                .all(|&p| plane.signed_distance(p) < 0.0)
        })
    }
}
