//! Owner of the color and depth buffers.
//!
//! [`Renderer`] holds the per-frame pixel memory and the primitives that do
//! not go through the triangle rasterizer: clearing, lines, wireframes, the
//! background grid and filled rectangles.

use super::framebuffer::FrameBuffer;
use crate::colors;
use crate::triangle::Triangle;

pub struct Renderer {
    color_buffer: Vec<u32>,
    depth_buffer: Vec<f32>,
    width: u32,
    height: u32,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width * height) as usize;
        Self {
            color_buffer: vec![colors::BACKGROUND; size],
            depth_buffer: vec![0.0; size], // 0.0 = infinitely far
            width,
            height,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        let size = (width * height) as usize;
        self.color_buffer = vec![colors::BACKGROUND; size];
        self.depth_buffer = vec![0.0; size];
        self.width = width;
        self.height = height;
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clear(&mut self, color: u32) {
        self.color_buffer.fill(color);
    }

    /// Resets every depth to 0.0, i.e. infinitely far since 1/w is stored.
    #[inline]
    pub fn clear_depth(&mut self) {
        self.depth_buffer.fill(0.0);
    }

    /// Writes one pixel without depth test. Out-of-range coordinates are
    /// dropped.
    #[inline]
    pub fn draw_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && y >= 0 && x < self.width as i32 && y < self.height as i32 {
            let index = y as usize * self.width as usize + x as usize;
            self.color_buffer[index] = color;
        } else {
            log::trace!("dropped out-of-bounds pixel ({x}, {y})");
        }
    }

    /// Dots every `step` pixels along both axes.
    pub fn draw_grid(&mut self, step: usize, color: u32) {
        let step = step.max(1);
        for y in (0..self.height as i32).step_by(step) {
            for x in (0..self.width as i32).step_by(step) {
                self.draw_pixel(x, y, color);
            }
        }
    }

    pub fn draw_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: u32) {
        for dy in 0..height {
            for dx in 0..width {
                self.draw_pixel(x + dx, y + dy, color);
            }
        }
    }

    /// Outlines a screen-space triangle. Vertex positions are truncated to
    /// whole pixels and no depth test is done.
    pub fn draw_triangle_wireframe(&mut self, triangle: &Triangle, color: u32) {
        let [p0, p1, p2] = triangle.points.map(|p| (p.x as i32, p.y as i32));
        self.draw_line(p0.0, p0.1, p1.0, p1.1, color);
        self.draw_line(p1.0, p1.1, p2.0, p2.1, color);
        self.draw_line(p2.0, p2.1, p0.0, p0.1, color);
    }

    /// Bresenham's line, all octants, both endpoints included.
    ///
    /// The error term holds `dx + dy` with `dy` kept negative, so a single
    /// doubled comparison against each axis decides whether to step in x, in
    /// y, or diagonally.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        let (mut x, mut y) = (x0, y0);
        loop {
            self.draw_pixel(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    pub fn color_buffer(&self) -> &[u32] {
        &self.color_buffer
    }

    pub fn depth_buffer(&self) -> &[f32] {
        &self.depth_buffer
    }

    /// The color buffer as raw bytes, ready for an ARGB8888 texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: u32 has no padding and a stricter alignment than u8; the
        // byte slice covers exactly the same allocation.
        unsafe {
            std::slice::from_raw_parts(
                self.color_buffer.as_ptr() as *const u8,
                self.color_buffer.len() * std::mem::size_of::<u32>(),
            )
        }
    }

    /// Mutable view for the rasterizer.
    pub fn as_framebuffer(&mut self) -> FrameBuffer<'_> {
        FrameBuffer::new(
            &mut self.color_buffer,
            &mut self.depth_buffer,
            self.width,
            self.height,
        )
    }
}
