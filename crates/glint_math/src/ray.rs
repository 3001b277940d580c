use crate::Vec3;

/// A ray in 3D space with an origin and a direction.
///
/// The direction is deliberately not normalized: primary rays carry the
/// pixel offset in their length, and every intersection routine solves the
/// quadratic with `a = dot(direction, direction)` so the convention stays
/// consistent.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray.
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the direction vector of the ray.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Returns true if the direction has zero length and can never hit anything.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.direction.length_squared() == 0.0
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}
