//! Borrowed 2D view over the color and depth buffers.
//!
//! Rasterizers write through a [`FrameBuffer`] so they never need to know who
//! owns the memory. Every write is bounds-checked.

/// A view into color and depth buffers of the same dimensions.
///
/// # Depth Buffer
///
/// The depth buffer stores the interpolated 1/w of each pixel. It is cleared
/// to 0.0 (infinitely far), and a larger value is closer to the camera.
pub struct FrameBuffer<'a> {
    color_buffer: &'a mut [u32],
    depth_buffer: &'a mut [f32],
    width: u32,
    height: u32,
}

impl<'a> FrameBuffer<'a> {
    /// Wraps the two buffers.
    ///
    /// Both slices must hold `width * height` elements.
    pub fn new(
        color_buffer: &'a mut [u32],
        depth_buffer: &'a mut [f32],
        width: u32,
        height: u32,
    ) -> Self {
        debug_assert_eq!(color_buffer.len(), (width * height) as usize);
        debug_assert_eq!(depth_buffer.len(), (width * height) as usize);
        Self {
            color_buffer,
            depth_buffer,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && y >= 0 && x < self.width as i32 && y < self.height as i32 {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            log::trace!("dropped out-of-bounds pixel ({x}, {y})");
            None
        }
    }

    /// Writes `color` when `inv_w` is closer than the stored depth.
    #[inline]
    pub fn set_pixel_with_depth(&mut self, x: i32, y: i32, inv_w: f32, color: u32) {
        if let Some(idx) = self.index(x, y) {
            if inv_w > self.depth_buffer[idx] {
                self.depth_buffer[idx] = inv_w;
                self.color_buffer[idx] = color;
            }
        }
    }

    /// Writes `color` without touching the depth buffer.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if let Some(idx) = self.index(x, y) {
            self.color_buffer[idx] = color;
        }
    }

    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|idx| self.color_buffer[idx])
    }

    pub fn get_depth(&self, x: i32, y: i32) -> Option<f32> {
        self.index(x, y).map(|idx| self.depth_buffer[idx])
    }
}
