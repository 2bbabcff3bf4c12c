use std::path::PathBuf;

use softrender::window::{FrameLimiter, Window, WindowEvent};
use softrender::{Config, Engine};

fn main() -> Result<(), String> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let config = Config {
        mesh_path: args.next().map(PathBuf::from),
        texture_path: args.next().map(PathBuf::from),
        ..Config::default()
    };

    let mut window = Window::new("softrender", config.width, config.height)?;
    let mut engine = Engine::with_config(&config);

    if let Some(path) = &config.mesh_path {
        engine.load_mesh(path).map_err(|e| e.to_string())?;
    }
    if let Some(path) = &config.texture_path {
        engine.load_texture(path).map_err(|e| e.to_string())?;
    }

    let mut limiter = FrameLimiter::new(config.frame_time());

    'running: loop {
        for event in window.poll_events() {
            match event {
                WindowEvent::Quit => break 'running,
                WindowEvent::Resize(w, h) => {
                    window.resize(w, h)?;
                    engine.resize(w, h);
                }
                WindowEvent::SetRenderMode(mode) => engine.set_render_mode(mode),
                WindowEvent::ToggleWireframe => engine.wireframe = !engine.wireframe,
                WindowEvent::ToggleBackfaceCulling => {
                    engine.backface_culling = !engine.backface_culling
                }
                WindowEvent::ToggleGrid => engine.draw_grid = !engine.draw_grid,
            }
        }

        let dt = limiter.wait_and_get_delta();

        engine.camera_mut().apply_movement(window.movement(), dt);

        engine.update(dt);
        engine.render();
        window.present(engine.frame_buffer())?;
    }

    Ok(())
}
