//! SDL2 presentation for the interactive viewer.

use std::time::{Duration, Instant};

use sdl2::event::Event;
use sdl2::keyboard::Scancode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;

use crate::camera::Movement;
use crate::engine::RenderMode;

/// Discrete input the viewer reacts to once per key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    Quit,
    Resize(u32, u32),
    SetRenderMode(RenderMode),
    ToggleWireframe,
    ToggleBackfaceCulling,
    ToggleGrid,
}

/// Sleeps off the rest of each frame to hold a target frame time.
pub struct FrameLimiter {
    frame_time: Duration,
    previous: Instant,
}

impl FrameLimiter {
    pub fn new(frame_time: Duration) -> Self {
        Self {
            frame_time,
            previous: Instant::now(),
        }
    }

    /// Waits if the frame finished early and returns the seconds elapsed
    /// since the previous call. A late frame is not caught up.
    pub fn wait_and_get_delta(&mut self) -> f32 {
        let elapsed = self.previous.elapsed();
        if let Some(remaining) = self.frame_time.checked_sub(elapsed) {
            std::thread::sleep(remaining);
        }

        let now = Instant::now();
        let delta = now.duration_since(self.previous);
        self.previous = now;
        delta.as_secs_f32()
    }
}

pub struct Window {
    canvas: sdl2::render::Canvas<sdl2::video::Window>,
    // Dropped after `texture` by field order.
    texture: sdl2::render::Texture<'static>,
    texture_creator: Box<sdl2::render::TextureCreator<sdl2::video::WindowContext>>,
    event_pump: sdl2::EventPump,
    width: u32,
    height: u32,
}

impl Window {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| e.to_string())?;

        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump()?;
        let texture = Self::streaming_texture(&texture_creator, width, height)?;

        log::debug!("window {width}x{height} opened");

        Ok(Self {
            canvas,
            texture,
            texture_creator,
            event_pump,
            width,
            height,
        })
    }

    fn streaming_texture(
        creator: &sdl2::render::TextureCreator<sdl2::video::WindowContext>,
        width: u32,
        height: u32,
    ) -> Result<sdl2::render::Texture<'static>, String> {
        // SAFETY: the creator is boxed inside `Window` and outlives every
        // texture made from it, which is dropped first by field order.
        let creator: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(creator as *const _) };
        creator
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(|e| e.to_string())
    }

    /// Drains pending SDL events into viewer events.
    pub fn poll_events(&mut self) -> Vec<WindowEvent> {
        let mut events = Vec::new();
        for event in self.event_pump.poll_iter() {
            let mapped = match event {
                Event::Quit { .. } => Some(WindowEvent::Quit),
                Event::Window {
                    win_event: sdl2::event::WindowEvent::Resized(w, h),
                    ..
                } => Some(WindowEvent::Resize(w.max(1) as u32, h.max(1) as u32)),
                Event::KeyDown {
                    scancode: Some(key),
                    repeat: false,
                    ..
                } => match key {
                    Scancode::Escape => Some(WindowEvent::Quit),
                    Scancode::Num1 => Some(WindowEvent::SetRenderMode(RenderMode::None)),
                    Scancode::Num2 => Some(WindowEvent::SetRenderMode(RenderMode::Filled)),
                    Scancode::Num3 => Some(WindowEvent::SetRenderMode(RenderMode::Textured)),
                    Scancode::W => Some(WindowEvent::ToggleWireframe),
                    Scancode::C => Some(WindowEvent::ToggleBackfaceCulling),
                    Scancode::G => Some(WindowEvent::ToggleGrid),
                    _ => None,
                },
                _ => None,
            };
            events.extend(mapped);
        }
        events
    }

    /// Arrow keys move and turn, A/D strafe.
    pub fn movement(&self) -> Movement {
        let keys = self.event_pump.keyboard_state();
        Movement {
            forward: keys.is_scancode_pressed(Scancode::Up),
            backward: keys.is_scancode_pressed(Scancode::Down),
            strafe_left: keys.is_scancode_pressed(Scancode::A),
            strafe_right: keys.is_scancode_pressed(Scancode::D),
            turn_left: keys.is_scancode_pressed(Scancode::Left),
            turn_right: keys.is_scancode_pressed(Scancode::Right),
        }
    }

    /// Uploads an ARGB8888 frame and shows it.
    pub fn present(&mut self, buffer: &[u8]) -> Result<(), String> {
        self.texture
            .update(None, buffer, (self.width * 4) as usize)
            .map_err(|e| e.to_string())?;

        self.canvas.clear();
        self.canvas
            .copy(&self.texture, None, Some(Rect::new(0, 0, self.width, self.height)))?;
        self.canvas.present();
        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), String> {
        self.texture = Self::streaming_texture(&self.texture_creator, width, height)?;
        self.width = width;
        self.height = height;
        log::debug!("window resized to {width}x{height}");
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}
