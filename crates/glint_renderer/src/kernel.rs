//! Per-pixel shading kernel.
//!
//! Traces one sample per pixel per frame:
//! - Jittered primary ray from the camera
//! - Nearest sphere hit, shaded by binary shadow visibility
//! - Optional diffuse-ish bounces, each weighted half the previous one

use glint_math::{Ray, Vec3};
use rand::RngCore;
use rayon::prelude::*;

use crate::config::{RenderConfig, Shading};
use crate::intersect::{nearest_hit, HitRecord};
use crate::sampling::{pixel_rng, random_unit_vector};
use crate::shadow::visibility;
use crate::{Camera, Color, ImageBuffer, Scene};

/// Where a sample is in its bounce loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TraceState {
    /// A ray is about to be intersected with the scene
    Tracing { ray: Ray, depth: u32 },
    /// The last ray hit a surface that still has to be shaded
    Hit { hit: HitRecord, depth: u32 },
    /// The last ray left the scene
    Missed { depth: u32 },
    /// Nothing left to trace
    Terminal,
}

/// Normal visualisation color, `n/2 + 0.5`.
#[inline]
pub fn normal_color(normal: Vec3) -> Color {
    normal * 0.5 + Vec3::splat(0.5)
}

fn surface_color(hit: &HitRecord, config: &RenderConfig) -> Color {
    match config.shading {
        Shading::Tint => config.tint,
        Shading::Normals => normal_color(hit.normal),
    }
}

/// Scatter direction for a bounce off `hit`.
fn scatter_direction(hit: &HitRecord, rng: &mut dyn RngCore) -> Vec3 {
    let direction = hit.normal + random_unit_vector(rng);

    // Catch degenerate scatter direction
    if direction.length_squared() < 1e-8 {
        hit.normal
    } else {
        direction
    }
}

/// Advance the bounce state machine by one step, adding radiance to `color`.
pub fn step(
    state: TraceState,
    scene: &Scene,
    config: &RenderConfig,
    color: &mut Color,
    rng: &mut dyn RngCore,
) -> TraceState {
    match state {
        TraceState::Tracing { ray, depth } => match nearest_hit(&ray, scene.spheres()) {
            Some(hit) => TraceState::Hit { hit, depth },
            None => TraceState::Missed { depth },
        },
        TraceState::Hit { hit, depth } => {
            let origin = hit.point + hit.normal * config.surface_epsilon;
            let light = visibility(origin, scene.lights(), scene.spheres(), rng);
            let weight = 0.5_f32.powi(depth as i32);
            *color += weight * surface_color(&hit, config) * light;

            if depth + 1 >= config.max_depth {
                TraceState::Terminal
            } else {
                TraceState::Tracing {
                    ray: Ray::new(origin, scatter_direction(&hit, rng)),
                    depth: depth + 1,
                }
            }
        }
        TraceState::Missed { depth } => {
            // Only primary rays see the background; a bounce that escapes adds nothing
            if depth == 0 {
                *color = config.background;
            }
            TraceState::Terminal
        }
        TraceState::Terminal => TraceState::Terminal,
    }
}

/// Compute the radiance sample carried by a primary ray.
pub fn trace_sample(primary: Ray, scene: &Scene, config: &RenderConfig, rng: &mut dyn RngCore) -> Color {
    let mut color = Color::ZERO;
    let mut state = TraceState::Tracing {
        ray: primary,
        depth: 0,
    };

    while state != TraceState::Terminal {
        state = step(state, scene, config, &mut color, rng);
    }

    color
}

/// Everything a frame needs to trace pixels.
#[derive(Clone, Copy)]
pub struct FrameContext<'a> {
    pub camera: &'a Camera,
    pub scene: &'a Scene,
    pub config: &'a RenderConfig,
    /// Output image size the camera projects onto
    pub width: u32,
    pub height: u32,
    /// Monotonic frame number, used to decorrelate frames
    pub frame: u64,
}

/// Render one sample for output pixel (x, y).
pub fn render_pixel(ctx: &FrameContext, x: u32, y: u32) -> Color {
    let pixel = y as u64 * ctx.width as u64 + x as u64;
    let mut rng = pixel_rng(ctx.config.seed, ctx.frame, pixel);

    let ray = ctx.camera.get_ray(x, y, ctx.width, ctx.height, &mut rng);
    trace_sample(ray, ctx.scene, ctx.config, &mut rng)
}

/// Fill `samples` with one fresh sample per traced cell, in parallel over rows.
///
/// `samples` holds one cell per `scale x scale` block of the output; each cell
/// is traced through the output pixel at the block's corner.
pub fn render_samples(ctx: &FrameContext, samples: &mut ImageBuffer) {
    let scale = ctx.config.scale;
    let row_len = samples.width as usize;

    samples
        .pixels
        .par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(cy, row)| {
            let y = cy as u32 * scale;
            for (cx, sample) in row.iter_mut().enumerate() {
                *sample = render_pixel(ctx, cx as u32 * scale, y);
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_math::DVec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sphere_scene() -> Scene {
        let mut scene = Scene::new();
        scene.add_sphere(0.0, 0.0, 0.0, 1.0).unwrap();
        scene
    }

    #[test]
    fn test_miss_returns_background() {
        let config = RenderConfig::default();
        let mut rng = StdRng::seed_from_u64(42);
        let ray = Ray::new(Vec3::new(5.0, 0.0, 0.0), Vec3::X);

        let color = trace_sample(ray, &sphere_scene(), &config, &mut rng);
        assert_eq!(color, config.background);
    }

    #[test]
    fn test_lit_hit_returns_tint() {
        let mut scene = sphere_scene();
        scene.add_light(10.0, 0.0, 0.0, 0.5).unwrap();
        let config = RenderConfig::default();
        let mut rng = StdRng::seed_from_u64(42);

        let ray = Ray::new(Vec3::new(5.0, 0.0, 0.0), Vec3::NEG_X);
        let color = trace_sample(ray, &scene, &config, &mut rng);
        assert_eq!(color, config.tint);
    }

    #[test]
    fn test_shadowed_hit_is_black() {
        let mut scene = sphere_scene();
        // Light behind the sphere as seen from the hit point
        scene.add_light(-10.0, 0.0, 0.0, 0.5).unwrap();
        let config = RenderConfig::default();
        let mut rng = StdRng::seed_from_u64(42);

        let ray = Ray::new(Vec3::new(5.0, 0.0, 0.0), Vec3::NEG_X);
        assert_eq!(trace_sample(ray, &scene, &config, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_normal_shading() {
        let config = RenderConfig {
            shading: Shading::Normals,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(42);

        // No lights: visibility is 1 and the sample is the normal color
        let ray = Ray::new(Vec3::new(5.0, 0.0, 0.0), Vec3::NEG_X);
        let color = trace_sample(ray, &sphere_scene(), &config, &mut rng);
        assert!((color - Vec3::new(1.0, 0.5, 0.5)).length() < 1e-5);
    }

    #[test]
    fn test_state_machine_transitions() {
        let scene = sphere_scene();
        let config = RenderConfig::default();
        let mut rng = StdRng::seed_from_u64(42);
        let mut color = Color::ZERO;

        let ray = Ray::new(Vec3::new(5.0, 0.0, 0.0), Vec3::NEG_X);
        let state = step(TraceState::Tracing { ray, depth: 0 }, &scene, &config, &mut color, &mut rng);
        let TraceState::Hit { hit, depth } = state else {
            panic!("expected a hit, got {state:?}");
        };
        assert_eq!(depth, 0);
        assert!((hit.t - 4.0).abs() < 1e-5);

        // Single bounce configuration stops right after shading
        let state = step(state, &scene, &config, &mut color, &mut rng);
        assert_eq!(state, TraceState::Terminal);
        assert_eq!(color, config.tint);

        let missed = step(TraceState::Missed { depth: 1 }, &scene, &config, &mut color, &mut rng);
        assert_eq!(missed, TraceState::Terminal);
        // Escaping bounce leaves the color alone
        assert_eq!(color, config.tint);
    }

    #[test]
    fn test_bounce_weights_are_bounded() {
        let mut scene = sphere_scene();
        scene.add_sphere(2.5, 0.0, 0.0, 1.0).unwrap();
        let config = RenderConfig {
            max_depth: 3,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(42);

        // Hits the first sphere near its top; bounces may reach the second
        let ray = Ray::new(Vec3::new(0.5, 5.0, 0.0), Vec3::NEG_Y);
        for _ in 0..100 {
            let color = trace_sample(ray, &scene, &config, &mut rng);
            // At least the first hit, at most 1 + 1/2 + 1/4 of the tint
            assert!(color.cmpge(config.tint - Vec3::splat(1e-5)).all());
            assert!(color.cmple(config.tint * 1.75 + Vec3::splat(1e-5)).all());
        }
    }

    #[test]
    fn test_bounce_state_after_hit() {
        let scene = sphere_scene();
        let config = RenderConfig {
            max_depth: 2,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(42);
        let mut color = Color::ZERO;

        let ray = Ray::new(Vec3::new(5.0, 0.0, 0.0), Vec3::NEG_X);
        let hit_state = step(TraceState::Tracing { ray, depth: 0 }, &scene, &config, &mut color, &mut rng);
        let next = step(hit_state, &scene, &config, &mut color, &mut rng);

        let TraceState::Tracing { ray, depth } = next else {
            panic!("expected a bounce, got {next:?}");
        };
        assert_eq!(depth, 1);
        // Leaves from just outside the surface, heading away from it
        assert!(ray.origin.x > 1.0);
        assert!(ray.direction.dot(Vec3::X) >= 0.0);
    }

    #[test]
    fn test_center_pixel_scenario() {
        let scene = sphere_scene();
        let config = RenderConfig::default();
        let camera = Camera::new(DVec3::new(5.0, 0.0, 0.0), DVec3::NEG_X, DVec3::Y);
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..20 {
            let ray = camera.get_ray(400, 300, 800, 600, &mut rng);
            let hit = nearest_hit(&ray, scene.spheres()).unwrap();
            assert!((hit.t - 4.0).abs() < 1e-3);
            assert!((hit.normal - Vec3::X).length() < 1e-2);
        }
    }

    #[test]
    fn test_empty_scene_samples_background() {
        let scene = Scene::new();
        let config = RenderConfig::default();
        let camera = Camera::default();
        let ctx = FrameContext {
            camera: &camera,
            scene: &scene,
            config: &config,
            width: 16,
            height: 8,
            frame: 1,
        };

        let mut samples = ImageBuffer::new(16, 8);
        render_samples(&ctx, &mut samples);
        assert!(samples.pixels.iter().all(|p| *p == config.background));
    }

    #[test]
    fn test_render_pixel_is_deterministic() {
        let mut scene = sphere_scene();
        scene.add_light(3.0, 3.0, 0.0, 1.0).unwrap();
        let config = RenderConfig {
            max_depth: 2,
            ..Default::default()
        };
        let camera = Camera::new(DVec3::new(5.0, 0.0, 0.0), DVec3::NEG_X, DVec3::Y);
        let ctx = FrameContext {
            camera: &camera,
            scene: &scene,
            config: &config,
            width: 32,
            height: 32,
            frame: 7,
        };

        assert_eq!(render_pixel(&ctx, 16, 16), render_pixel(&ctx, 16, 16));
    }
}
