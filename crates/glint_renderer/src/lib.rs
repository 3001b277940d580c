//! Glint Renderer - progressive CPU path tracing
//!
//! Traces one jittered, single-bounce sample per pixel per frame against a
//! flat list of spheres and lights, and averages frames into a running mean
//! until the camera moves.
//!
//! ```ignore
//! use glint_renderer::{Camera, RenderConfig, Renderer};
//!
//! let mut renderer = Renderer::new(800, 600, RenderConfig::default())?;
//! renderer.add_sphere(0.0, 0.0, 0.0, 1.0)?;
//! renderer.add_light(0.0, 5.0, 0.0, 0.5)?;
//!
//! let camera = Camera::default();
//! let display = renderer.render_frame(&camera, false);
//! ```

mod accumulator;
mod buffer;
mod camera;
mod config;
mod error;
mod intersect;
mod kernel;
mod renderer;
mod sampling;
mod scene;
mod shadow;

pub use accumulator::{accumulate, Accumulator};
pub use buffer::{color_to_rgba, compute_extent, linear_to_gamma, DisplayBuffer, ImageBuffer};
pub use camera::Camera;
pub use config::{RenderConfig, Shading, DEFAULT_BACKGROUND, DEFAULT_SURFACE_EPSILON, DEFAULT_TINT};
pub use error::{PrimitiveKind, RenderError, RenderResult};
pub use intersect::{hit_sphere, nearest_hit, HitRecord};
pub use kernel::{normal_color, render_pixel, render_samples, step, trace_sample, FrameContext, TraceState};
pub use renderer::Renderer;
pub use sampling::{pixel_rng, random_unit_vector};
pub use scene::{Light, PrimitiveStore, Scene, Sphere, DEFAULT_LIGHT_CAPACITY, DEFAULT_SPHERE_CAPACITY};
pub use shadow::{shadow_ray, visibility};

/// Color type alias (linear RGB)
pub type Color = Vec3;

/// Re-export Vec3 and common math types from glint_math
pub use glint_math::{DVec3, Interval, Ray, Vec3};
