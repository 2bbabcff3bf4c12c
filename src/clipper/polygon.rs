//! Homogeneous clip-space polygon clipping.
//!
//! A projected triangle becomes a [`Polygon`], is clipped in place against
//! the six planes of the clip volume, and is fanned back into triangles.
//! Each plane is written as `side * coord <= w` for one axis:
//!
//! ```text
//! -w <= x <= w
//! -w <= y <= w
//! -w <= z <= w
//! ```
//!
//! Everything lives in fixed-size arrays on the stack, so clipping never
//! allocates.

use crate::math::{Axis, Vec2, Vec4};
use crate::triangle::Triangle;

/// Upper bound on polygon size. Clipping a triangle against six planes adds
/// at most one vertex per plane, so nine is the practical maximum.
pub const MAX_POLYGON_VERTICES: usize = 16;

/// A clip-space position with the attributes interpolated along with it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ClipVertex {
    /// Position before the perspective divide.
    pub position: Vec4,
    pub texcoord: Vec2,
}

impl ClipVertex {
    pub const fn new(position: Vec4, texcoord: Vec2) -> Self {
        Self { position, texcoord }
    }

    #[inline]
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            position: self.position.lerp(other.position, t),
            texcoord: self.texcoord.lerp(other.texcoord, t),
        }
    }

    /// Distance to the `side * axis = w` plane, scaled by w.
    /// Non-negative means inside.
    #[inline]
    fn distance(&self, axis: Axis, side: f32) -> f32 {
        self.position.w - side * self.position.axis(axis)
    }
}

/// Convex polygon with up to [`MAX_POLYGON_VERTICES`] vertices.
#[derive(Clone, Copy, Debug)]
pub struct Polygon {
    vertices: [ClipVertex; MAX_POLYGON_VERTICES],
    len: usize,
}

impl Default for Polygon {
    fn default() -> Self {
        Self::new()
    }
}

impl Polygon {
    pub const fn new() -> Self {
        Self {
            vertices: [ClipVertex::new(Vec4::ZERO, Vec2::ZERO); MAX_POLYGON_VERTICES],
            len: 0,
        }
    }

    pub fn from_triangle(triangle: &Triangle) -> Self {
        let mut polygon = Self::new();
        for (&position, &texcoord) in triangle.points.iter().zip(&triangle.texcoords) {
            polygon.push(ClipVertex::new(position, texcoord));
        }
        polygon
    }

    /// Appends a vertex.
    ///
    /// # Panics
    /// When the polygon already holds [`MAX_POLYGON_VERTICES`] vertices.
    pub fn push(&mut self, vertex: ClipVertex) {
        assert!(
            self.len < MAX_POLYGON_VERTICES,
            "polygon exceeds {MAX_POLYGON_VERTICES} vertices"
        );
        self.vertices[self.len] = vertex;
        self.len += 1;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn vertices(&self) -> &[ClipVertex] {
        &self.vertices[..self.len]
    }

    /// Clips against the plane `side * axis <= w`, in place.
    ///
    /// The walk starts at the closing edge (last vertex to first). For every
    /// edge that crosses the plane the intersection is emitted first, then the
    /// current vertex if it is inside. The intersection parameter is
    /// `t = d_prev / (d_prev - d_curr)` with `d = w - side * coord`.
    ///
    /// No guard exists for degenerate edges: non-finite coordinates make `t`
    /// NaN or infinite and the result carries it along.
    pub fn clip_axis_side(&mut self, axis: Axis, side: f32) {
        if self.len == 0 {
            return;
        }

        let mut clipped = Polygon::new();

        let mut prev = self.vertices[self.len - 1];
        let mut prev_dist = prev.distance(axis, side);

        for &curr in &self.vertices[..self.len] {
            let curr_dist = curr.distance(axis, side);
            let prev_inside = prev_dist >= 0.0;
            let curr_inside = curr_dist >= 0.0;

            if prev_inside != curr_inside {
                let t = prev_dist / (prev_dist - curr_dist);
                clipped.push(prev.lerp(&curr, t));
            }
            if curr_inside {
                clipped.push(curr);
            }

            prev = curr;
            prev_dist = curr_dist;
        }

        *self = clipped;
    }

    /// Clips against all six planes of the clip volume.
    pub fn clip_to_frustum(&mut self) {
        self.clip_axis_side(Axis::X, 1.0);
        self.clip_axis_side(Axis::X, -1.0);
        self.clip_axis_side(Axis::Y, 1.0);
        self.clip_axis_side(Axis::Y, -1.0);
        self.clip_axis_side(Axis::Z, 1.0);
        self.clip_axis_side(Axis::Z, -1.0);
    }

    /// Fans the polygon into `len - 2` triangles around vertex 0.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        let first = self.vertices[0];
        (1..self.len.saturating_sub(1)).map(move |i| {
            let (b, c) = (self.vertices[i], self.vertices[i + 1]);
            Triangle::new(
                [first.position, b.position, c.position],
                [first.texcoord, b.texcoord, c.texcoord],
            )
        })
    }
}
