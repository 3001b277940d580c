//! Camera state and primary ray generation.

use glint_math::{DVec2, DVec3, Ray};
use rand::RngCore;

use crate::sampling::jitter;

/// Camera position and orientation, owned by the application.
///
/// The direction is kept at unit length and `up` never changes after
/// construction. Moving the camera invalidates accumulated frames, so the
/// caller passes `moved = true` to the next [`crate::Renderer::render_frame`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: DVec3,
    direction: DVec3,
    up: DVec3,
}

impl Camera {
    /// Create a camera. `direction` is normalized; `up` is used as given.
    pub fn new(position: DVec3, direction: DVec3, up: DVec3) -> Self {
        Self {
            position,
            direction: direction.try_normalize().unwrap_or(DVec3::X),
            up,
        }
    }

    pub fn direction(&self) -> DVec3 {
        self.direction
    }

    pub fn up(&self) -> DVec3 {
        self.up
    }

    /// Horizontal image axis, `cross(direction, up)`.
    pub fn right(&self) -> DVec3 {
        self.direction.cross(self.up)
    }

    /// Move the camera by `velocity`.
    pub fn translate(&mut self, velocity: DVec3) {
        self.position += velocity;
    }

    /// Generate a jittered primary ray for pixel (i, j).
    ///
    /// Consumes exactly two random values from `rng`.
    pub fn get_ray(&self, i: u32, j: u32, width: u32, height: u32, rng: &mut dyn RngCore) -> Ray {
        let offset = DVec2::new(jitter(rng), jitter(rng));
        self.ray_through(i, j, width, height, offset)
    }

    /// Primary ray for pixel (i, j) displaced by a fixed sub-pixel `offset`.
    ///
    /// Both image axes are normalized by the width so the horizontal field of
    /// view is fixed and the vertical one follows the aspect ratio. The
    /// resulting direction is not renormalized.
    pub fn ray_through(&self, i: u32, j: u32, width: u32, height: u32, offset: DVec2) -> Ray {
        let w = width as f64;
        let h = height as f64;
        let x_off = (i as f64 - w / 2.0 + offset.x) / w;
        let y_off = (j as f64 - h / 2.0 + offset.y) / w;

        let direction = self.direction + x_off * self.right() + y_off * self.up;
        Ray::new(self.position.as_vec3(), direction.as_vec3())
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(DVec3::ZERO, DVec3::X, DVec3::Y)
    }
}
