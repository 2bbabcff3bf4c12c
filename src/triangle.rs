use crate::math::{Vec2, Vec3, Vec4};

/// One mesh triangle in model space: resolved positions plus the UV
/// coordinate of each corner. Corners are listed clockwise when seen from
/// the outside of the mesh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Face {
    pub points: [Vec3; 3],
    pub texcoords: [Vec2; 3],
}

impl Face {
    pub const fn new(points: [Vec3; 3], texcoords: [Vec2; 3]) -> Self {
        Self { points, texcoords }
    }
}

/// A triangle somewhere past model space. In clip space the points are
/// homogeneous (no divide yet); in screen space x/y are raster pixels, z the
/// NDC depth and w the clip-space w kept for perspective correction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub points: [Vec4; 3],
    pub texcoords: [Vec2; 3],
}

impl Triangle {
    pub const fn new(points: [Vec4; 3], texcoords: [Vec2; 3]) -> Self {
        Self { points, texcoords }
    }

    /// Twice the signed screen-space area, `(p1 - p0) × (p2 - p0)`.
    ///
    /// Positive for triangles that run clockwise on a Y-down raster.
    pub fn signed_area(&self) -> f32 {
        let [p0, p1, p2] = self.points;
        let e1 = Vec2::new(p1.x - p0.x, p1.y - p0.y);
        let e2 = Vec2::new(p2.x - p0.x, p2.y - p0.y);
        e1.cross(e2)
    }
}

/// Unnormalized face normal `(v1 - v0) × (v2 - v0)` of a camera-space triangle.
pub fn face_normal(points: &[Vec3; 3]) -> Vec3 {
    (points[1] - points[0]).cross(points[2] - points[0])
}

/// Returns true when the triangle faces away from a camera at the origin.
///
/// The test compares the face normal with the ray from the first vertex back
/// to the camera.
pub fn is_back_facing(points: &[Vec3; 3]) -> bool {
    let camera_ray = Vec3::ZERO - points[0];
    face_normal(points).dot(camera_ray) < 0.0
}
