//! 4x4 transformation matrix using the row-vector convention.
//!
//! # Convention
//! - Storage is row-major: `data[row][col]`
//! - Vectors are **row vectors** on the left: `v * M`
//! - Translation is stored in the **last row**
//! - Transforms chain **left-to-right**: `v * A * B` applies A first, then B
//!
//! The model-to-clip chain is therefore written in the order it happens:
//!
//! ```ignore
//! let model_to_clip = scale * rotation * translation * view * projection;
//! let clip = Vec4::from(vertex) * model_to_clip;
//! ```

use std::ops::Mul;

use approx::{AbsDiffEq, RelativeEq};

use super::vec3::Vec3;
use super::vec4::Vec4;

/// 4x4 matrix stored as `data[row][col]`, multiplied by row vectors on the left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    data: [[f32; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    pub const IDENTITY: Self = Self::new([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    pub const fn new(data: [[f32; 4]; 4]) -> Self {
        Mat4 { data }
    }

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// Creates a translation matrix. The offset lives in the last row.
    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [x, y, z, 1.0],
        ])
    }

    /// Creates a scale matrix.
    pub fn scaling(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [x, 0.0, 0.0, 0.0],
            [0.0, y, 0.0, 0.0],
            [0.0, 0.0, z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the X axis.
    pub fn rotation_x(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, s, 0.0],
            [0.0, -s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the Y axis.
    pub fn rotation_y(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [c, 0.0, -s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the Z axis.
    pub fn rotation_z(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [c, s, 0.0, 0.0],
            [-s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Combined Euler rotation, equal to
    /// `rotation_x(ax) * rotation_y(ay) * rotation_z(az)` (X applied first).
    pub fn rotation(ax: f32, ay: f32, az: f32) -> Self {
        let (sx, cx) = ax.sin_cos();
        let (sy, cy) = ay.sin_cos();
        let (sz, cz) = az.sin_cos();
        Mat4::new([
            [cy * cz, cy * sz, -sy, 0.0],
            [cz * sx * sy - cx * sz, cx * cz + sx * sy * sz, cy * sx, 0.0],
            [cx * cz * sy + sx * sz, cx * sy * sz - cz * sx, cx * cy, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates the renderer's perspective matrix.
    ///
    /// Maps camera space to a clip space where `w` is the camera-space depth
    /// and `z = far / (far - near) * (depth - near)`, so `0 <= z <= w` between
    /// the near and far planes.
    ///
    /// # Arguments
    /// * `fov_y` - Vertical field of view in radians
    /// * `aspect_ratio` - Width divided by height
    /// * `near`, `far` - Clip distances along +Z
    pub fn perspective(fov_y: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        let a = 1.0 / aspect_ratio;
        let f = 1.0 / (fov_y / 2.0).tan();
        let lambda = far / (far - near);
        Mat4::new([
            [a * f, 0.0, 0.0, 0.0],
            [0.0, f, 0.0, 0.0],
            [0.0, 0.0, lambda, 1.0],
            [0.0, 0.0, -lambda * near, 0.0],
        ])
    }

    /// Creates a view matrix for a camera at `eye` looking at `target`.
    ///
    /// Undefined when the view direction is parallel to `up`.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        Self::look_towards(eye, target - eye, up)
    }

    /// Creates a view matrix for a camera at `eye` looking along `direction`.
    ///
    /// The basis is `z = direction`, `x = up × z`, `y = z × x`. Undefined when
    /// `direction` is parallel to `up` (the cross product collapses to zero).
    pub fn look_towards(eye: Vec3, direction: Vec3, up: Vec3) -> Self {
        let z = direction.normalize();
        let x = up.cross(z).normalize();
        let y = z.cross(x);

        Self::new([
            [x.x, y.x, z.x, 0.0],
            [x.y, y.y, z.y, 0.0],
            [x.z, y.z, z.z, 0.0],
            [-x.dot(eye), -y.dot(eye), -z.dot(eye), 1.0],
        ])
    }

    pub fn transpose(&self) -> Self {
        let mut result = [[0.0f32; 4]; 4];
        for (row, values) in result.iter_mut().enumerate() {
            for (col, value) in values.iter_mut().enumerate() {
                *value = self.data[col][row];
            }
        }
        Mat4::new(result)
    }

    /// Computes the inverse, or the identity if the matrix is singular.
    ///
    /// Returning the identity keeps a degenerate transform defined; use
    /// [`Mat4::try_inverse`] to detect the singular case.
    pub fn inverse(&self) -> Self {
        self.try_inverse().unwrap_or(Self::IDENTITY)
    }

    /// Gauss-Jordan elimination with partial pivoting.
    ///
    /// Returns `None` when a pivot vanishes (singular matrix). A pivot counts
    /// as vanished when it is within a few ulps of zero relative to the
    /// largest entry of its source row, so uniformly tiny but regular
    /// matrices still invert.
    pub fn try_inverse(&self) -> Option<Self> {
        const PIVOT_TOLERANCE: f32 = 4.0 * f32::EPSILON;

        let mut t = self.data;
        let mut s = Self::IDENTITY.data;
        let mut row_scale = t.map(|row| row.iter().fold(0.0f32, |m, v| m.max(v.abs())));

        // Forward elimination.
        for i in 0..4 {
            let mut pivot = i;
            let mut pivot_size = t[i][i].abs();
            for (j, row) in t.iter().enumerate().skip(i + 1) {
                if row[i].abs() > pivot_size {
                    pivot = j;
                    pivot_size = row[i].abs();
                }
            }

            if pivot != i {
                t.swap(i, pivot);
                s.swap(i, pivot);
                row_scale.swap(i, pivot);
            }

            if pivot_size <= PIVOT_TOLERANCE * row_scale[i] {
                return None;
            }

            for j in (i + 1)..4 {
                let f = t[j][i] / t[i][i];
                for k in 0..4 {
                    t[j][k] -= f * t[i][k];
                    s[j][k] -= f * s[i][k];
                }
            }
        }

        // Backward substitution.
        for i in (0..4).rev() {
            let f = t[i][i];
            for k in 0..4 {
                t[i][k] /= f;
                s[i][k] /= f;
            }

            for j in 0..i {
                let f = t[j][i];
                for k in 0..4 {
                    t[j][k] -= f * t[i][k];
                    s[j][k] -= f * s[i][k];
                }
            }
        }

        Some(Mat4::new(s))
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row][col]
    }

    /// Set element at [row][col].
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.data[row][col] = value;
    }

    pub fn row(&self, row: usize) -> Vec4 {
        let r = self.data[row];
        Vec4::new(r[0], r[1], r[2], r[3])
    }

    pub fn col(&self, col: usize) -> Vec4 {
        Vec4::new(
            self.data[0][col],
            self.data[1][col],
            self.data[2][col],
            self.data[3][col],
        )
    }

    /// Transforms a point (w=1), dropping the resulting w.
    #[inline]
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        (Vec4::from(point) * *self).to_vec3()
    }

    /// Transforms a direction (w=0), ignoring translation.
    #[inline]
    pub fn transform_direction(&self, direction: Vec3) -> Vec3 {
        (Vec4::from_vec3(direction, 0.0) * *self).to_vec3()
    }
}

/// Matrix multiplication: Mat4 * Mat4.
///
/// With row vectors, `v * (A * B)` applies A first, then B.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f32; 4]; 4];

        for (row, values) in result.iter_mut().enumerate() {
            for (col, value) in values.iter_mut().enumerate() {
                *value = self.data[row][0] * rhs.data[0][col]
                    + self.data[row][1] * rhs.data[1][col]
                    + self.data[row][2] * rhs.data[2][col]
                    + self.data[row][3] * rhs.data[3][col];
            }
        }

        Mat4::new(result)
    }
}

/// Transform a row vector: Vec4 * Mat4.
impl Mul<Mat4> for Vec4 {
    type Output = Vec4;

    fn mul(self, m: Mat4) -> Self::Output {
        let d = &m.data;
        Vec4::new(
            self.x * d[0][0] + self.y * d[1][0] + self.z * d[2][0] + self.w * d[3][0],
            self.x * d[0][1] + self.y * d[1][1] + self.z * d[2][1] + self.w * d[3][1],
            self.x * d[0][2] + self.y * d[1][2] + self.z * d[2][2] + self.w * d[3][2],
            self.x * d[0][3] + self.y * d[1][3] + self.z * d[2][3] + self.w * d[3][3],
        )
    }
}

impl AbsDiffEq for Mat4 {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        (0..4).all(|i| self.row(i).abs_diff_eq(&other.row(i), epsilon))
    }
}

impl RelativeEq for Mat4 {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        (0..4).all(|i| {
            self.row(i)
                .relative_eq(&other.row(i), epsilon, max_relative)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_3};

    #[test]
    fn default_is_identity() {
        assert_eq!(Mat4::default(), Mat4::IDENTITY);
    }

    #[test]
    fn translation_moves_points_not_directions() {
        let m = Mat4::translation(1.0, 2.0, 3.0);
        assert_eq!(
            m.transform_point(Vec3::new(1.0, 1.0, 1.0)),
            Vec3::new(2.0, 3.0, 4.0)
        );
        assert_eq!(m.transform_direction(Vec3::ONE), Vec3::ONE);
    }

    #[test]
    fn transforms_compose_left_to_right() {
        // Scale first, then translate.
        let m = Mat4::scaling(2.0, 2.0, 2.0) * Mat4::translation(0.0, 0.0, 5.0);
        assert_eq!(
            m.transform_point(Vec3::new(1.0, 0.0, 1.0)),
            Vec3::new(2.0, 0.0, 7.0)
        );
    }

    #[test]
    fn rotation_y_turns_forward_to_right() {
        let forward = Mat4::rotation_y(FRAC_PI_2).transform_direction(Vec3::FORWARD);
        assert_abs_diff_eq!(forward, Vec3::RIGHT, epsilon = 1e-6);
    }

    #[test]
    fn combined_rotation_matches_axis_product() {
        let (ax, ay, az) = (0.3, 0.7, -1.1);
        let combined = Mat4::rotation(ax, ay, az);
        let product = Mat4::rotation_x(ax) * Mat4::rotation_y(ay) * Mat4::rotation_z(az);
        assert_relative_eq!(combined, product, epsilon = 1e-6);
    }

    #[test]
    fn perspective_puts_depth_in_w() {
        let m = Mat4::perspective(FRAC_PI_3, 16.0 / 9.0, 0.1, 100.0);

        let near = Vec4::point(0.0, 0.0, 0.1) * m;
        assert_relative_eq!(near.w, 0.1);
        assert_abs_diff_eq!(near.z, 0.0, epsilon = 1e-6);

        let far = Vec4::point(0.0, 0.0, 100.0) * m;
        assert_relative_eq!(far.w, 100.0);
        assert_relative_eq!(far.z, far.w, epsilon = 1e-3);
    }

    #[test]
    fn perspective_maps_frustum_edge_to_unit_ndc() {
        let aspect = 16.0 / 9.0;
        let m = Mat4::perspective(FRAC_PI_3, aspect, 0.1, 100.0);
        let half = (FRAC_PI_3 / 2.0).tan();
        // A point on the top edge and one on the right edge at depth 10.
        let top = (Vec4::point(0.0, 10.0 * half, 10.0) * m).perspective_divide();
        let right = (Vec4::point(10.0 * half * aspect, 0.0, 10.0) * m).perspective_divide();
        assert_relative_eq!(top.y, 1.0, epsilon = 1e-5);
        assert_relative_eq!(right.x, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn look_towards_places_target_on_forward_axis() {
        let eye = Vec3::new(0.0, 0.0, -5.0);
        let view = Mat4::look_towards(eye, Vec3::FORWARD, Vec3::UP);
        let p = view.transform_point(Vec3::new(1.0, 2.0, 0.0));
        assert_abs_diff_eq!(p, Vec3::new(1.0, 2.0, 5.0), epsilon = 1e-6);
    }

    #[test]
    fn look_at_matches_look_towards() {
        let eye = Vec3::new(1.0, 2.0, -3.0);
        let target = Vec3::new(0.5, 0.0, 4.0);
        assert_relative_eq!(
            Mat4::look_at(eye, target, Vec3::UP),
            Mat4::look_towards(eye, target - eye, Vec3::UP),
            epsilon = 1e-6
        );
    }

    #[test]
    fn inverse_round_trip_is_identity() {
        let m = Mat4::scaling(2.0, 0.5, 3.0)
            * Mat4::rotation(0.4, -1.2, 0.9)
            * Mat4::translation(3.0, -2.0, 7.0)
            * Mat4::look_towards(Vec3::new(1.0, 1.0, -4.0), Vec3::new(0.2, -0.1, 1.0), Vec3::UP);
        assert_abs_diff_eq!(m * m.inverse(), Mat4::IDENTITY, epsilon = 1e-4);
        assert_abs_diff_eq!(m.inverse() * m, Mat4::IDENTITY, epsilon = 1e-4);
    }

    #[test]
    fn inverse_handles_row_swaps() {
        // Zero on the leading diagonal forces pivoting.
        let m = Mat4::new([
            [0.0, 2.0, 0.0, 0.0],
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 4.0],
            [0.0, 0.0, 3.0, 1.0],
        ]);
        assert_abs_diff_eq!(m * m.inverse(), Mat4::IDENTITY, epsilon = 1e-6);
    }

    #[test]
    fn inverse_of_perspective_round_trips() {
        let m = Mat4::perspective(FRAC_PI_3, 16.0 / 9.0, 0.1, 100.0);
        assert_abs_diff_eq!(m * m.inverse(), Mat4::IDENTITY, epsilon = 1e-4);
    }

    #[test]
    fn singular_inverse_is_exact_identity() {
        let m = Mat4::new([
            [1.0, 2.0, 3.0, 4.0],
            [2.0, 4.0, 6.0, 8.0],
            [0.0, 1.0, 0.0, 1.0],
            [5.0, 0.0, 1.0, 0.0],
        ]);
        assert_eq!(m.try_inverse(), None);
        assert_eq!(m.inverse(), Mat4::IDENTITY);
        assert_eq!(Mat4::scaling(1.0, 0.0, 1.0).inverse(), Mat4::IDENTITY);

        // Rank 2 in the upper block; elimination leaves rounding noise, not 0.
        let noisy = Mat4::new([
            [0.1, 0.2, 0.3, 0.0],
            [0.4, 0.5, 0.6, 0.0],
            [0.7, 0.8, 0.9, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        assert_eq!(noisy.try_inverse(), None);
    }

    #[test]
    fn tiny_scale_is_still_invertible() {
        let m = Mat4::scaling(1e-8, 1e-8, 1e-8);
        let inverse = m.try_inverse().expect("uniform tiny scale is regular");
        assert_relative_eq!(inverse, Mat4::scaling(1e8, 1e8, 1e8), max_relative = 1e-5);
        assert_abs_diff_eq!(m * inverse, Mat4::IDENTITY, epsilon = 1e-5);
    }

    #[test]
    fn transpose_swaps_rows_and_columns() {
        let m = Mat4::translation(1.0, 2.0, 3.0);
        assert_eq!(m.transpose().col(3), m.row(3));
        assert_eq!(m.transpose().transpose(), m);
    }
}
