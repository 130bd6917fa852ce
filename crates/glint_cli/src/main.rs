use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use glint_core::{SessionConfig, Texture};
use glint_renderer::{Camera, FrameBuffer, Scene, Skybox, TileRenderer};

mod demo;

/// Rows in the fallback sky gradient
const GRADIENT_ROWS: u32 = 256;

fn load_session() -> Result<SessionConfig> {
    match std::env::args_os().nth(1) {
        Some(path) => {
            let path = PathBuf::from(path);
            let session = SessionConfig::load(&path)
                .with_context(|| format!("Failed to load session config {}", path.display()))?;
            log::info!("Loaded session from {}", path.display());
            Ok(session)
        }
        None => {
            log::info!("No session config given, using defaults");
            Ok(SessionConfig::default())
        }
    }
}

fn load_skybox(path: Option<&Path>) -> Skybox {
    let Some(path) = path else {
        return Skybox::gradient(GRADIENT_ROWS);
    };
    match Texture::load(path) {
        Ok(texture) => {
            log::info!("Skybox: {} ({}x{})", path.display(), texture.width(), texture.height());
            Skybox::new(Arc::new(texture))
        }
        Err(e) => {
            log::warn!("Failed to load skybox {}: {}, using gradient", path.display(), e);
            Skybox::gradient(GRADIENT_ROWS)
        }
    }
}

fn load_floor_texture(path: Option<&Path>) -> Option<Arc<Texture>> {
    let path = path?;
    match Texture::load(path) {
        Ok(texture) => Some(Arc::new(texture)),
        Err(e) => {
            log::warn!("Failed to load floor texture {}: {}, using checkerboard", path.display(), e);
            None
        }
    }
}

fn save_frame(frame: &FrameBuffer, path: &Path) -> Result<()> {
    let image = image::RgbImage::from_raw(frame.width, frame.height, frame.to_rgb8())
        .context("Frame buffer does not match its resolution")?;
    image
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

fn render_frame(
    renderer: &TileRenderer,
    scene: &Scene,
    skybox: &Skybox,
    camera: &Camera,
    path: &Path,
) -> Result<()> {
    let (frame, report) = renderer.render(scene, skybox, camera)?;
    save_frame(&frame, path)?;
    log::info!(
        "Wrote {} ({} tiles, {:.2?}, {} debug rays)",
        path.display(),
        report.tiles_rendered,
        report.elapsed,
        report.traced_rays()
    );
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting Glint");

    let session = load_session()?;
    let render = &session.render;

    let floor = load_floor_texture(session.floor_texture.as_deref());
    let scene = demo::build_scene(floor).with_ambient(render.ambient_color());
    let skybox = load_skybox(session.skybox.as_deref());
    log::info!(
        "Scene: {} primitives, {} lights",
        scene.primitives().len(),
        scene.lights().len()
    );

    let renderer = TileRenderer::new(render.clone()).context("Failed to set up renderer")?;
    log::info!(
        "Rendering {}x{} with {} workers, {}x supersampling",
        render.width,
        render.height,
        renderer.workers(),
        render.supersampling
    );

    let mut camera = Camera::from_config(&session.camera, render.width, render.height);
    render_frame(&renderer, &scene, &skybox, &camera, &session.output_path(0))?;

    for (i, step) in session.moves.iter().enumerate() {
        camera.apply_move(step);
        render_frame(&renderer, &scene, &skybox, &camera, &session.output_path(i + 1))?;
    }

    Ok(())
}
