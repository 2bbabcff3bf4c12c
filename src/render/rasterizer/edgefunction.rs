//! Edge function-based triangle rasterization.
//!
//! # Algorithm Overview
//!
//! 1. Bring the triangle to the canonical winding (positive signed area on a
//!    Y-down raster) by swapping v1 and v2 if needed.
//! 2. Scan the bounding box `floor(min)..ceil(max)`, clamped to the buffer.
//! 3. Sample each pixel at its center against three edge functions.
//!
//! # Edge Function
//!
//! For the edge from A to B, `E(P) = (B - A) × (P - A)`. For a canonical
//! triangle all three are non-negative inside.
//!
//! Each pixel evaluates all three edges directly, always from the same
//! endpoint of an edge whichever way the triangle traverses it. Two triangles
//! sharing an edge thus see exactly negated values at every pixel center.
//!
//! # Fill Rule
//!
//! A pixel center exactly on an edge belongs to the triangle only when the
//! edge is a top edge (`dy == 0 && dx > 0`) or a left edge (`dy < 0`). Other
//! edges get a small negative bias, so two triangles sharing an edge never
//! both write a pixel on it and never both skip it.
//!
//! # Perspective Correction
//!
//! Screen-space barycentrics are `λ_i = E_i / area`. Attributes are linear in
//! camera space, not screen space, so they are interpolated through `1/w`:
//!
//! ```text
//! 1/w = Σ λ_i / w_i
//! a   = Σ (λ_i / w_i) a_i / (1/w)
//! ```
//!
//! The interpolated `1/w` is also the depth value.

use super::shader::{FlatShader, PixelShader, TextureShader};
use super::{Fill, Rasterizer};
use crate::math::Vec2;
use crate::render::framebuffer::FrameBuffer;
use crate::triangle::Triangle;

/// Converts screen-space barycentrics into perspective-correct weights.
///
/// `inv_w` holds `1/w` for each vertex. Returns the corrected weights and the
/// interpolated `1/w` at the pixel.
#[inline]
pub fn perspective_correct(lambda: [f32; 3], inv_w: [f32; 3]) -> ([f32; 3], f32) {
    let l0 = lambda[0] * inv_w[0];
    let l1 = lambda[1] * inv_w[1];
    let l2 = lambda[2] * inv_w[2];
    let pixel_inv_w = l0 + l1 + l2;
    let k = 1.0 / pixel_inv_w;
    ([l0 * k, l1 * k, l2 * k], pixel_inv_w)
}

/// Bounding-box rasterizer with per-pixel edge functions.
#[derive(Clone, Copy, Debug)]
pub struct EdgeFunctionRasterizer {
    fill_bias: f32,
}

impl EdgeFunctionRasterizer {
    /// Bias applied to edges that are neither top nor left.
    pub const DEFAULT_FILL_BIAS: f32 = -0.0001;

    pub fn new() -> Self {
        Self::with_fill_bias(Self::DEFAULT_FILL_BIAS)
    }

    /// `bias` must be negative for the top-left rule to hold.
    pub fn with_fill_bias(bias: f32) -> Self {
        Self { fill_bias: bias }
    }

    pub fn fill_bias(&self) -> f32 {
        self.fill_bias
    }

    #[inline]
    fn is_top_left(start: Vec2, end: Vec2) -> bool {
        let edge = end - start;
        let is_top = edge.y == 0.0 && edge.x > 0.0;
        let is_left = edge.y < 0.0;
        is_top || is_left
    }

    #[inline]
    fn edge_bias(&self, start: Vec2, end: Vec2) -> f32 {
        if Self::is_top_left(start, end) {
            0.0
        } else {
            self.fill_bias
        }
    }

    /// Returns the triangle with positive signed area, or None when it has
    /// no area at all.
    fn canonical(triangle: &Triangle) -> Option<Triangle> {
        let area = triangle.signed_area();
        if area > 0.0 {
            Some(*triangle)
        } else if area < 0.0 {
            let [p0, p1, p2] = triangle.points;
            let [t0, t1, t2] = triangle.texcoords;
            Some(Triangle::new([p0, p2, p1], [t0, t2, t1]))
        } else {
            None
        }
    }

    /// `(end - start) × (p - start)`, evaluated from the lexicographically
    /// smaller endpoint so that `edge(a, b, p) == -edge(b, a, p)` exactly.
    #[inline]
    fn edge(start: Vec2, end: Vec2, p: Vec2) -> f32 {
        if (start.x, start.y) < (end.x, end.y) {
            (end - start).cross(p - start)
        } else {
            -(start - end).cross(p - end)
        }
    }

    /// Scans a canonical triangle, calling `shader` for every covered pixel.
    fn rasterize_with_shader<S: PixelShader>(
        &self,
        triangle: &Triangle,
        buffer: &mut FrameBuffer,
        shader: &S,
    ) {
        let [a, b, c] = triangle.points;
        let v0 = Vec2::new(a.x, a.y);
        let v1 = Vec2::new(b.x, b.y);
        let v2 = Vec2::new(c.x, c.y);

        let area = (v1 - v0).cross(v2 - v0);
        let inv_area = 1.0 / area;
        let inv_w = [1.0 / a.w, 1.0 / b.w, 1.0 / c.w];

        // Bounding box, upper bound exclusive.
        let x_min = (v0.x.min(v1.x).min(v2.x).floor() as i32).max(0);
        let y_min = (v0.y.min(v1.y).min(v2.y).floor() as i32).max(0);
        let x_max = (v0.x.max(v1.x).max(v2.x).ceil() as i32).min(buffer.width() as i32);
        let y_max = (v0.y.max(v1.y).max(v2.y).ceil() as i32).min(buffer.height() as i32);
        if x_min >= x_max || y_min >= y_max {
            return;
        }

        let bias = [
            self.edge_bias(v1, v2),
            self.edge_bias(v2, v0),
            self.edge_bias(v0, v1),
        ];

        for y in y_min..y_max {
            let py = y as f32 + 0.5;

            for x in x_min..x_max {
                let p = Vec2::new(x as f32 + 0.5, py);
                let e = [
                    Self::edge(v1, v2, p),
                    Self::edge(v2, v0, p),
                    Self::edge(v0, v1, p),
                ];

                if e[0] + bias[0] >= 0.0 && e[1] + bias[1] >= 0.0 && e[2] + bias[2] >= 0.0 {
                    let lambda = [e[0] * inv_area, e[1] * inv_area, e[2] * inv_area];
                    let (weights, depth) = perspective_correct(lambda, inv_w);
                    buffer.set_pixel_with_depth(x, y, depth, shader.shade(weights));
                }
            }
        }
    }
}

impl Default for EdgeFunctionRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for EdgeFunctionRasterizer {
    /// Picks the shader once for the whole triangle, then scans it.
    fn fill_triangle(&self, triangle: &Triangle, buffer: &mut FrameBuffer, fill: Fill<'_>) {
        let Some(triangle) = Self::canonical(triangle) else {
            return;
        };

        match fill {
            Fill::Flat(color) => {
                self.rasterize_with_shader(&triangle, buffer, &FlatShader::new(color));
            }
            Fill::Textured(texture) => {
                let shader = TextureShader::new(texture, triangle.texcoords);
                self.rasterize_with_shader(&triangle, buffer, &shader);
            }
        }
    }
}
