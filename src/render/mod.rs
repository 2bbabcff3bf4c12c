//! Pixel output: buffers, line drawing and triangle fill.

pub mod framebuffer;
pub mod rasterizer;
pub mod renderer;

pub use framebuffer::FrameBuffer;
pub use rasterizer::{EdgeFunctionRasterizer, Fill, Rasterizer};
pub use renderer::Renderer;
