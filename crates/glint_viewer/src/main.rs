use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use glint_renderer::{RenderConfig, Renderer};

mod cli;
mod controls;
mod output;
mod scene;

use cli::Args;
use controls::CameraController;
use output::save_image_as_png;
use scene::{build_demo_scene, demo_camera};

/// Load a JSON render configuration.
fn load_config(path: &Path) -> Result<RenderConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    Ok(config)
}

/// Apply command line overrides on top of the loaded configuration.
fn resolve_config(args: &Args) -> Result<RenderConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => RenderConfig::default(),
    };

    if let Some(scale) = args.scale {
        config.scale = scale;
    }
    if let Some(depth) = args.depth {
        config.max_depth = depth;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.clone().into())
        .init();

    log::info!("Starting Glint");

    let config = resolve_config(&args)?;
    let mut renderer =
        Renderer::new(args.width, args.height, config).context("Failed to create renderer")?;
    build_demo_scene(&mut renderer).context("Failed to build scene")?;

    let mut camera = demo_camera();
    let controller = CameraController::new(args.speed);

    let start = Instant::now();
    for frame in 0..args.frames {
        // Key presses land between frames and invalidate the accumulation
        let mut moved = false;
        for press in args.keys.iter().filter(|k| k.frame == frame) {
            controller.apply(&mut camera, press.movement);
            moved = true;
        }
        if moved {
            log::info!("Frame {}: camera moved to {:.3}", frame, camera.position);
        }

        renderer.render_frame(&camera, moved);
    }
    let elapsed = start.elapsed();

    log::info!(
        "Rendered {} frames in {:.2}s ({:.1} ms/frame), {} accumulated since last move",
        renderer.frames_rendered(),
        elapsed.as_secs_f32(),
        elapsed.as_secs_f32() * 1000.0 / args.frames.max(1) as f32,
        renderer.iterations()
    );

    save_image_as_png(renderer.display(), &args.output)?;

    Ok(())
}
