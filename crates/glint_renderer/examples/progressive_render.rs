//! Progressive render example.
//!
//! Accumulates frames of a small sphere field, nudges the camera halfway
//! through, and saves the final image in PPM format.

use glint_renderer::{color_to_rgba, Camera, DisplayBuffer, RenderConfig, Renderer, DVec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::File;
use std::io::{BufWriter, Write};

fn main() {
    println!("Glint - Progressive Render Example");
    println!("==================================");

    let config = RenderConfig {
        max_depth: 2,
        ..Default::default()
    };
    let mut renderer = Renderer::new(400, 225, config).expect("Failed to create renderer");

    let start = std::time::Instant::now();
    build_scene(&mut renderer).expect("Failed to build scene");
    println!("Scene built in {:?}", start.elapsed());

    let mut camera = Camera::new(DVec3::new(-6.0, 1.0, 0.0), DVec3::new(1.0, -0.1, 0.0), DVec3::Y);

    let frames = 32;
    let start = std::time::Instant::now();
    for frame in 0..frames {
        let moved = frame == frames / 2;
        if moved {
            camera.translate(DVec3::new(0.5, 0.0, 0.0));
        }
        renderer.render_frame(&camera, moved);
    }
    println!(
        "Rendered {} frames in {:?}, {} accumulated after the move",
        frames,
        start.elapsed(),
        renderer.iterations()
    );

    let filename = "progressive.ppm";
    save_ppm(renderer.display(), filename).expect("Failed to save image");
    println!("Saved to {}", filename);
}

fn build_scene(renderer: &mut Renderer) -> glint_renderer::RenderResult<()> {
    // Ground
    renderer.add_sphere(0.0, -1000.0, 0.0, 1000.0)?;
    renderer.add_sphere(0.0, 1.0, 0.0, 1.0)?;

    let mut rng = StdRng::seed_from_u64(7);
    for a in -4..4 {
        for b in -4..4 {
            let x = a as f32 + 0.9 * rng.gen::<f32>();
            let z = b as f32 + 0.9 * rng.gen::<f32>();
            if x * x + z * z > 1.5 {
                renderer.add_sphere(x, 0.2, z, 0.2)?;
            }
        }
    }

    renderer.add_light(-3.0, 8.0, 4.0, 1.5)?;
    println!("Created {} spheres", renderer.scene().spheres().len());
    Ok(())
}

fn save_ppm(display: &DisplayBuffer, filename: &str) -> std::io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", display.width(), display.height())?;
    writeln!(writer, "255")?;

    // PPM rows run top to bottom
    for y in (0..display.height()).rev() {
        for x in 0..display.width() {
            let rgba = color_to_rgba(display.get(x, y));
            writeln!(writer, "{} {} {}", rgba[0], rgba[1], rgba[2])?;
        }
    }

    Ok(())
}
