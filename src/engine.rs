//! Core rendering engine.
//!
//! [`Engine`] is the frame context: it owns the buffers, the model, the camera
//! and the projection, and runs the pipeline once per frame.
//!
//! ```text
//! update(dt)                              render()
//!   model -> camera space (S*R*T * V)       clear color + depth, grid
//!   backface cull                           fill every triangle (render mode)
//!   frustum rejection                       wireframe overlay
//!   projection (no divide)                  clear the render list
//!   clip against +-x, +-y, +-z <= w
//!   divide by w, viewport -> render list
//! ```

use crate::camera::Camera;
use crate::clipper::{Frustum, Polygon};
use crate::config::Config;
use crate::error::LoadError;
use crate::math::{Mat4, Vec3, Vec4};
use crate::mesh::Mesh;
use crate::model::Model;
use crate::projection::Projection;
use crate::render::{EdgeFunctionRasterizer, Fill, Rasterizer, Renderer};
use crate::texture::Texture;
use crate::triangle::{is_back_facing, Triangle};

/// How triangle interiors are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Interiors are not drawn; only the wireframe (if enabled) shows.
    None,
    /// Flat fill color.
    Filled,
    /// Model texture at perspective-correct UVs.
    #[default]
    Textured,
}

/// What happened to the faces during the last [`Engine::update`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Faces fed into the pipeline.
    pub faces: usize,
    pub culled_backface: usize,
    /// Faces entirely outside one frustum plane.
    pub culled_frustum: usize,
    /// Faces that the clipper reduced to nothing.
    pub clipped_away: usize,
    /// Screen-space triangles in the render list.
    pub triangles: usize,
}

pub struct Engine {
    renderer: Renderer,
    rasterizer: EdgeFunctionRasterizer,
    model: Model,
    camera: Camera,
    projection: Projection,
    projection_matrix: Mat4,
    frustum: Frustum,
    triangles_to_render: Vec<Triangle>,
    render_mode: RenderMode,
    stats: FrameStats,
    rotation_speed: f32,
    grid_step: usize,
    clear_color: u32,
    grid_color: u32,
    fill_color: u32,
    wireframe_color: u32,
    warned_missing_texture: bool,
    pub wireframe: bool,
    pub backface_culling: bool,
    pub draw_grid: bool,
}

impl Engine {
    /// Default settings with the given buffer size.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_config(&Config {
            width,
            height,
            ..Config::default()
        })
    }

    /// Builds the engine with the built-in cube placed at
    /// `config.model_position`. Asset paths in the config are not loaded here.
    pub fn with_config(config: &Config) -> Self {
        let projection = config.projection();

        let mut model = Model::new(Mesh::cube());
        model.transform_mut().set_position(config.model_position);

        log::debug!(
            "engine {}x{}, fov_y {:.3} rad, near {}, far {}",
            config.width,
            config.height,
            config.fov_y,
            config.z_near,
            config.z_far
        );

        Self {
            renderer: Renderer::new(config.width, config.height),
            rasterizer: EdgeFunctionRasterizer::with_fill_bias(config.fill_bias),
            model,
            camera: Camera::default(),
            projection_matrix: projection.matrix(),
            frustum: projection.frustum(),
            projection,
            triangles_to_render: Vec::new(),
            render_mode: config.render_mode,
            stats: FrameStats::default(),
            rotation_speed: config.rotation_speed,
            grid_step: config.grid_step,
            clear_color: config.clear_color,
            grid_color: config.grid_color,
            fill_color: config.fill_color,
            wireframe_color: config.wireframe_color,
            warned_missing_texture: false,
            wireframe: config.wireframe,
            backface_culling: config.backface_culling,
            draw_grid: config.draw_grid,
        }
    }

    pub fn width(&self) -> u32 {
        self.renderer.width()
    }

    pub fn height(&self) -> u32 {
        self.renderer.height()
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.render_mode = mode;
    }

    /// Spin applied by [`Engine::update`], radians per second on every axis.
    pub fn set_rotation_speed(&mut self, speed: f32) {
        self.rotation_speed = speed;
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut Model {
        &mut self.model
    }

    /// Replaces the mesh with the contents of an OBJ file. The transform and
    /// texture are kept.
    pub fn load_mesh<P: AsRef<std::path::Path>>(&mut self, path: P) -> Result<(), LoadError> {
        self.model.set_mesh(Mesh::from_obj(path)?);
        Ok(())
    }

    pub fn load_texture<P: AsRef<std::path::Path>>(&mut self, path: P) -> Result<(), LoadError> {
        self.set_texture(Texture::from_file(path)?);
        Ok(())
    }

    pub fn set_texture(&mut self, texture: Texture) {
        self.model.set_texture(texture);
        self.warned_missing_texture = false;
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Replaces the projection and rebuilds the matrix and frustum planes.
    pub fn set_projection(&mut self, projection: Projection) {
        self.projection = projection;
        self.projection_matrix = projection.matrix();
        self.frustum = projection.frustum();
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        log::debug!("resize to {width}x{height}");
        self.renderer.resize(width, height);
        let mut projection = self.projection;
        projection.set_aspect_ratio(width as f32 / height as f32);
        self.set_projection(projection);
    }

    /// Statistics of the last update.
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Screen-space triangles waiting for the next [`Engine::render`].
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles_to_render
    }

    /// Packed `0xAARRGGBB` pixels, row-major.
    pub fn color_buffer(&self) -> &[u32] {
        self.renderer.color_buffer()
    }

    /// The color buffer as bytes, for an ARGB8888 texture upload.
    pub fn frame_buffer(&self) -> &[u8] {
        self.renderer.as_bytes()
    }

    /// Advances the model spin by `dt` seconds and rebuilds the render list.
    pub fn update(&mut self, dt: f32) {
        let spin = self.rotation_speed * dt;
        if spin != 0.0 {
            self.model.transform_mut().rotate(Vec3::ONE * spin);
        }

        self.camera.update_direction();
        let model_view = self.model.transform().to_matrix() * self.camera.view_matrix();
        let (width, height) = (self.renderer.width(), self.renderer.height());

        self.triangles_to_render.clear();
        let mut stats = FrameStats::default();

        for face in self.model.mesh().faces() {
            stats.faces += 1;

            let camera_points = face.points.map(|p| (Vec4::from(p) * model_view).to_vec3());

            if self.backface_culling && is_back_facing(&camera_points) {
                stats.culled_backface += 1;
                continue;
            }
            if self.frustum.rejects(&camera_points) {
                stats.culled_frustum += 1;
                continue;
            }

            let projected = Triangle::new(
                camera_points.map(|p| Vec4::from(p) * self.projection_matrix),
                face.texcoords,
            );
            let mut polygon = Polygon::from_triangle(&projected);
            polygon.clip_to_frustum();
            if polygon.len() < 3 {
                stats.clipped_away += 1;
                continue;
            }

            for clipped in polygon.triangles() {
                let points = clipped
                    .points
                    .map(|p| Projection::to_screen(p, width, height));
                self.triangles_to_render
                    .push(Triangle::new(points, clipped.texcoords));
            }
        }

        stats.triangles = self.triangles_to_render.len();
        self.stats = stats;
        log::trace!("{stats:?}");
    }

    /// Draws the render list into the color buffer, then empties the list.
    pub fn render(&mut self) {
        self.renderer.clear(self.clear_color);
        self.renderer.clear_depth();

        if self.draw_grid {
            self.renderer.draw_grid(self.grid_step, self.grid_color);
        }

        let fill = match self.render_mode {
            RenderMode::None => None,
            RenderMode::Filled => Some(Fill::Flat(self.fill_color)),
            RenderMode::Textured => match self.model.texture() {
                Some(texture) => Some(Fill::Textured(texture)),
                None => {
                    if !self.warned_missing_texture {
                        log::warn!("textured mode without a texture, using flat fill");
                        self.warned_missing_texture = true;
                    }
                    Some(Fill::Flat(self.fill_color))
                }
            },
        };

        if let Some(fill) = fill {
            let mut fb = self.renderer.as_framebuffer();
            for triangle in &self.triangles_to_render {
                self.rasterizer.fill_triangle(triangle, &mut fb, fill);
            }
        }

        if self.wireframe {
            for triangle in &self.triangles_to_render {
                self.renderer
                    .draw_triangle_wireframe(triangle, self.wireframe_color);
            }
        }

        self.triangles_to_render.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors;
    use approx::assert_relative_eq;

    const WIDTH: u32 = 1920;
    const HEIGHT: u32 = 1080;

    /// Cube at z = 5 turned so that exactly three sides face the camera.
    fn cube_engine() -> Engine {
        let mut engine = Engine::new(WIDTH, HEIGHT);
        engine.draw_grid = false;
        engine.set_render_mode(RenderMode::Filled);
        engine
            .model_mut()
            .transform_mut()
            .set_rotation_xyz(0.5, 0.6, 0.3);
        engine
    }

    fn fill_runs(engine: &Engine, y: usize) -> usize {
        let row = &engine.color_buffer()[y * WIDTH as usize..(y + 1) * WIDTH as usize];
        row.windows(2)
            .filter(|pair| pair[0] != colors::FILL && pair[1] == colors::FILL)
            .count()
            + (row[0] == colors::FILL) as usize
    }

    #[test]
    fn rotated_cube_culls_back_half() {
        let mut engine = cube_engine();
        engine.update(0.0);

        let stats = engine.stats();
        assert_eq!(stats.faces, 12);
        assert_eq!(stats.culled_backface, 6);
        assert_eq!(stats.culled_frustum, 0);
        assert_eq!(stats.clipped_away, 0);
        assert_eq!(stats.triangles, 6);

        for triangle in engine.triangles() {
            for p in triangle.points {
                assert!(p.x >= 0.0 && p.x <= WIDTH as f32);
                assert!(p.y >= 0.0 && p.y <= HEIGHT as f32);
                assert!(p.w > 0.0);
            }
        }
    }

    #[test]
    fn rotated_cube_renders_one_solid_silhouette() {
        let mut engine = cube_engine();
        engine.update(0.0);
        engine.render();

        assert!(engine.triangles().is_empty());
        assert_eq!(engine.color_buffer()[540 * WIDTH as usize + 960], colors::FILL);
        assert_eq!(engine.color_buffer()[0], colors::BACKGROUND);

        // The silhouette of a cube is convex: every row holds at most one
        // run of filled pixels, so shared edges left no gaps.
        let mut filled_rows = 0;
        for y in 0..HEIGHT as usize {
            let runs = fill_runs(&engine, y);
            assert!(runs <= 1, "row {y} has {runs} runs");
            filled_rows += runs;
        }
        assert!(filled_rows > 400);
    }

    #[test]
    fn culling_off_keeps_every_face() {
        let mut engine = cube_engine();
        engine.backface_culling = false;
        engine.update(0.0);
        assert_eq!(engine.stats().culled_backface, 0);
        assert_eq!(engine.stats().triangles, 12);
    }

    #[test]
    fn cube_behind_camera_is_rejected() {
        let mut engine = cube_engine();
        engine.backface_culling = false;
        engine.camera_mut().rotate_yaw(std::f32::consts::PI);
        engine.update(0.0);

        assert_eq!(engine.stats().culled_frustum, 12);
        assert!(engine.triangles().is_empty());
    }

    #[test]
    fn camera_inside_cube_is_clipped_to_screen() {
        let mut engine = cube_engine();
        engine.backface_culling = false;
        engine
            .model_mut()
            .transform_mut()
            .set_position_xyz(0.0, 0.0, 0.5);
        engine.update(0.0);

        assert!(engine.stats().triangles > 0);
        let eps = 1e-2;
        for triangle in engine.triangles() {
            for p in triangle.points {
                assert!(p.w > 0.0);
                assert!(p.x >= -eps && p.x <= WIDTH as f32 + eps);
                assert!(p.y >= -eps && p.y <= HEIGHT as f32 + eps);
            }
        }
    }

    #[test]
    fn update_spins_the_model() {
        let mut engine = Engine::new(64, 64);
        engine.set_rotation_speed(2.0);
        engine.update(0.25);
        assert_relative_eq!(
            engine.model().transform().rotation(),
            Vec3::new(0.5, 0.5, 0.5)
        );
    }

    #[test]
    fn textured_mode_without_texture_falls_back_to_flat() {
        let mut engine = cube_engine();
        engine.set_render_mode(RenderMode::Textured);
        engine.update(0.0);
        engine.render();
        assert_eq!(engine.color_buffer()[540 * WIDTH as usize + 960], colors::FILL);
    }

    #[test]
    fn textured_mode_samples_the_model_texture() {
        let mut engine = cube_engine();
        engine.set_render_mode(RenderMode::Textured);
        engine.set_texture(Texture::from_argb(1, 1, vec![0xFF336699]).unwrap());
        engine.update(0.0);
        engine.render();
        assert_eq!(engine.color_buffer()[540 * WIDTH as usize + 960], 0xFF336699);
    }

    #[test]
    fn mode_none_with_wireframe_draws_only_edges() {
        let mut engine = cube_engine();
        engine.set_render_mode(RenderMode::None);
        engine.wireframe = true;
        engine.update(0.0);
        engine.render();

        let buffer = engine.color_buffer();
        assert!(buffer.iter().all(|&c| c != colors::FILL));
        assert!(buffer.iter().any(|&c| c == colors::WIREFRAME));
    }

    #[test]
    fn resize_updates_projection_and_buffers() {
        let mut engine = Engine::new(100, 100);
        engine.resize(200, 100);
        assert_eq!(engine.color_buffer().len(), 200 * 100);
        assert_relative_eq!(engine.projection().aspect_ratio(), 2.0);
        assert_eq!(engine.frame_buffer().len(), 200 * 100 * 4);
    }
}
