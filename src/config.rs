//! Engine and application settings.

use std::path::PathBuf;
use std::time::Duration;

use crate::colors;
use crate::engine::RenderMode;
use crate::math::Vec3;
use crate::projection::Projection;
use crate::render::EdgeFunctionRasterizer;

/// Everything [`crate::Engine::with_config`] and the viewer binary need to
/// set up a scene.
#[derive(Clone, Debug)]
pub struct Config {
    /// Color buffer size in pixels.
    pub width: u32,
    pub height: u32,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub z_near: f32,
    pub z_far: f32,
    /// Frame pacing target of the viewer.
    pub target_fps: u32,
    /// Bias for edges that are not top-left, see [`EdgeFunctionRasterizer`].
    pub fill_bias: f32,

    pub render_mode: RenderMode,
    pub wireframe: bool,
    pub backface_culling: bool,
    pub draw_grid: bool,
    /// Distance between grid dots in pixels.
    pub grid_step: usize,

    pub clear_color: u32,
    pub grid_color: u32,
    pub fill_color: u32,
    pub wireframe_color: u32,

    /// Where the model sits in front of the camera.
    pub model_position: Vec3,
    /// Spin of the model around all three axes, radians per second.
    pub rotation_speed: f32,

    /// OBJ to load instead of the built-in cube.
    pub mesh_path: Option<PathBuf>,
    pub texture_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            fov_y: std::f32::consts::FRAC_PI_3,
            z_near: 0.1,
            z_far: 100.0,
            target_fps: 144,
            fill_bias: EdgeFunctionRasterizer::DEFAULT_FILL_BIAS,
            render_mode: RenderMode::Textured,
            wireframe: false,
            backface_culling: true,
            draw_grid: true,
            grid_step: 10,
            clear_color: colors::BACKGROUND,
            grid_color: colors::GRID,
            fill_color: colors::FILL,
            wireframe_color: colors::WIREFRAME,
            model_position: Vec3::new(0.0, 0.0, 5.0),
            rotation_speed: 1.0,
            mesh_path: None,
            texture_path: None,
        }
    }
}

impl Config {
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn projection(&self) -> Projection {
        Projection::new(self.fov_y, self.aspect_ratio(), self.z_near, self.z_far)
    }

    /// Minimum time per frame at `target_fps`.
    pub fn frame_time(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.target_fps.max(1) as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!((config.width, config.height), (1920, 1080));
        assert_relative_eq!(config.aspect_ratio(), 16.0 / 9.0);
        assert_eq!(config.render_mode, RenderMode::Textured);
        assert!(config.backface_culling);
        assert!(!config.wireframe);
        assert_eq!(config.frame_time().as_micros(), 6944);
    }

    #[test]
    fn projection_uses_config_values() {
        let config = Config {
            width: 800,
            height: 800,
            z_far: 50.0,
            ..Config::default()
        };
        let projection = config.projection();
        assert_relative_eq!(projection.aspect_ratio(), 1.0);
        assert_relative_eq!(projection.z_far(), 50.0);
        assert_relative_eq!(projection.fov_y(), std::f32::consts::FRAC_PI_3);
    }
}
