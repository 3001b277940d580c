//! Built-in demo scene.

use glint_renderer::{Camera, DVec3, RenderResult, Renderer};

/// Place the demo spheres and lights.
///
/// A large ground sphere, three resting spheres and two lights.
pub fn build_demo_scene(renderer: &mut Renderer) -> RenderResult<()> {
    // Ground
    renderer.add_sphere(0.0, -1001.0, 0.0, 1000.0)?;

    renderer.add_sphere(0.0, 0.0, 0.0, 1.0)?;
    renderer.add_sphere(1.5, -0.5, 1.75, 0.5)?;
    renderer.add_sphere(2.5, -0.25, -2.0, 0.75)?;

    renderer.add_light(-2.0, 6.0, 3.0, 1.0)?;
    renderer.add_light(4.0, 5.0, -4.0, 0.5)?;

    log::info!(
        "Demo scene: {} spheres, {} lights",
        renderer.scene().spheres().len(),
        renderer.scene().lights().len()
    );
    Ok(())
}

/// Starting camera for the demo scene.
pub fn demo_camera() -> Camera {
    Camera::new(DVec3::new(-4.0, 0.5, 0.0), DVec3::X, DVec3::Y)
}
