use std::path::PathBuf;

use facet::config::{RenderConfig, WINDOW_HEIGHT, WINDOW_WIDTH};
use facet::prelude::*;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = RenderConfig::default().with_size(WINDOW_WIDTH, WINDOW_HEIGHT);
    let mut session = Session::new(&config).map_err(|e| e.to_string())?;

    // Optional OBJ file to show instead of the cube
    if let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) {
        match Mesh::from_obj(&path) {
            Ok(mesh) => {
                info!(path = %path.display(), faces = mesh.faces().len(), "loaded model");
                session.apply(Command::LoadMesh(mesh)).map_err(|e| e.to_string())?;
            }
            Err(err) => error!(%err, "keeping the default shape"),
        }
    }

    let mut window = Window::new("facet", config.width, config.height)?;
    let mut surface = Surface::new(config.width, config.height);
    let mut frame_limiter = window.frame_limiter();
    let mut snapshots = 0u32;

    'running: loop {
        for action in window.poll_events() {
            let command = match action {
                InputAction::Quit => break 'running,
                InputAction::Resize(w, h) => {
                    surface.resize(w, h);
                    continue;
                }
                InputAction::Snapshot => {
                    snapshots += 1;
                    let path = format!("facet-{snapshots:03}.png");
                    if let Err(err) = surface.save_png(&path) {
                        warn!(%err, path = %path, "snapshot failed");
                    }
                    continue;
                }
                InputAction::Command(command) => command,
                InputAction::NextShape => {
                    let next = session.shape().map_or(ShapeKind::Cube, ShapeKind::next);
                    Command::SelectShape(next)
                }
                InputAction::ToggleStrategy => Command::SetStrategy(session.strategy().toggled()),
                InputAction::ToggleRasterizer => Command::SetRasterizer(match session.rasterizer() {
                    RasterizerType::Scanline => RasterizerType::EdgeFunction,
                    RasterizerType::EdgeFunction => RasterizerType::Scanline,
                }),
                InputAction::AdjustFov(delta) => Command::SetFov(session.camera().fov + delta),
                InputAction::AdjustAmbient(delta) => {
                    Command::SetAmbient(session.light().ambient_intensity + delta)
                }
            };
            if let Err(err) = session.apply(command) {
                error!(%err, "command failed");
            }
        }

        let delta = frame_limiter.wait();
        session.tick();

        match session.render(&mut surface) {
            Ok(stats) => {
                let fps = if delta > 0 { 1000 / delta } else { 0 };
                let title = format!(
                    "facet | {} | {}/{} faces | {} | {} | culling {} | rot {} | dist {:.1} | fov {:.0} | ambient {:.2} | {} fps",
                    session.mesh().name(),
                    stats.visible_faces,
                    session.mesh().faces().len(),
                    session.strategy(),
                    session.rasterizer(),
                    if session.back_face_culling() { "on" } else { "off" },
                    session.rotation_mode(),
                    session.camera().distance,
                    session.camera().fov,
                    session.light().ambient_intensity,
                    fps,
                );
                window.set_title(&title)?;
            }
            Err(err) => warn!(%err, "frame skipped"),
        }

        window.present(&surface)?;
    }

    Ok(())
}
