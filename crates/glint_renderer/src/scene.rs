//! Scene store: spheres and lights in capacity-bounded collections.
//!
//! Primitives are appended during setup and only read while rendering.
//! Indices handed out by [`Scene::add_sphere`] stay valid for the lifetime of
//! the scene since there is no removal.

use glint_math::Vec3;

use crate::error::{PrimitiveKind, RenderError, RenderResult};

/// Default maximum number of spheres in a scene.
pub const DEFAULT_SPHERE_CAPACITY: usize = 256;

/// Default maximum number of lights in a scene.
pub const DEFAULT_LIGHT_CAPACITY: usize = 16;

/// An opaque sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    /// Create a new sphere, rejecting non-positive or non-finite geometry.
    pub fn new(center: Vec3, radius: f32) -> RenderResult<Self> {
        validate(PrimitiveKind::Sphere, center, radius)?;
        Ok(Self { center, radius })
    }
}

/// A spherical light.
///
/// The radius only jitters the shadow-ray target; it has no effect on
/// intensity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub center: Vec3,
    pub radius: f32,
}

impl Light {
    /// Create a new light, rejecting non-positive or non-finite geometry.
    pub fn new(center: Vec3, radius: f32) -> RenderResult<Self> {
        validate(PrimitiveKind::Light, center, radius)?;
        Ok(Self { center, radius })
    }
}

fn validate(kind: PrimitiveKind, center: Vec3, radius: f32) -> RenderResult<()> {
    if !center.is_finite() {
        return Err(RenderError::InvalidPrimitive {
            kind,
            reason: format!("center {center} is not finite"),
        });
    }
    if !radius.is_finite() || radius <= 0.0 {
        return Err(RenderError::InvalidPrimitive {
            kind,
            reason: format!("radius must be positive and finite, got {radius}"),
        });
    }
    Ok(())
}

/// An append-only collection with a fixed upper bound on its length.
#[derive(Debug, Clone)]
pub struct PrimitiveStore<T> {
    kind: PrimitiveKind,
    items: Vec<T>,
    capacity: usize,
}

impl<T> PrimitiveStore<T> {
    /// Create an empty store holding at most `capacity` items.
    pub fn new(kind: PrimitiveKind, capacity: usize) -> Self {
        Self {
            kind,
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Append an item and return its index.
    pub fn push(&mut self, item: T) -> RenderResult<usize> {
        if self.items.len() >= self.capacity {
            return Err(RenderError::CapacityExceeded {
                kind: self.kind,
                capacity: self.capacity,
            });
        }
        self.items.push(item);
        Ok(self.items.len() - 1)
    }

    /// Get the item at `index`.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// The spheres and lights of a scene.
#[derive(Debug, Clone)]
pub struct Scene {
    spheres: PrimitiveStore<Sphere>,
    lights: PrimitiveStore<Light>,
}

impl Scene {
    /// Create an empty scene with the default capacities.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_SPHERE_CAPACITY, DEFAULT_LIGHT_CAPACITY)
    }

    /// Create an empty scene with explicit capacities.
    pub fn with_capacity(spheres: usize, lights: usize) -> Self {
        Self {
            spheres: PrimitiveStore::new(PrimitiveKind::Sphere, spheres),
            lights: PrimitiveStore::new(PrimitiveKind::Light, lights),
        }
    }

    /// Add a sphere and return its index.
    pub fn add_sphere(&mut self, x: f32, y: f32, z: f32, radius: f32) -> RenderResult<usize> {
        let sphere = Sphere::new(Vec3::new(x, y, z), radius)?;
        let index = self.spheres.push(sphere)?;
        log::debug!("Added sphere {index} at ({x}, {y}, {z}) r={radius}");
        Ok(index)
    }

    /// Add a light and return its index.
    pub fn add_light(&mut self, x: f32, y: f32, z: f32, radius: f32) -> RenderResult<usize> {
        let light = Light::new(Vec3::new(x, y, z), radius)?;
        let index = self.lights.push(light)?;
        log::debug!("Added light {index} at ({x}, {y}, {z}) r={radius}");
        Ok(index)
    }

    pub fn spheres(&self) -> &[Sphere] {
        self.spheres.as_slice()
    }

    pub fn lights(&self) -> &[Light] {
        self.lights.as_slice()
    }

    /// Get the sphere with the given index.
    pub fn sphere(&self, index: usize) -> Option<&Sphere> {
        self.spheres.get(index)
    }

    pub fn sphere_capacity(&self) -> usize {
        self.spheres.capacity()
    }

    pub fn light_capacity(&self) -> usize {
        self.lights.capacity()
    }

    /// Returns true if the scene has neither spheres nor lights.
    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty() && self.lights.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_returns_stable_indices() {
        let mut scene = Scene::new();
        assert!(scene.is_empty());

        assert_eq!(scene.add_sphere(0.0, 0.0, 0.0, 1.0), Ok(0));
        assert_eq!(scene.add_sphere(2.0, 0.0, 0.0, 0.5), Ok(1));
        assert_eq!(scene.add_light(0.0, 5.0, 0.0, 0.1), Ok(0));

        assert_eq!(scene.spheres().len(), 2);
        assert_eq!(scene.lights().len(), 1);
        assert_eq!(scene.sphere(1).map(|s| s.radius), Some(0.5));
        assert!(scene.sphere(2).is_none());
    }

    #[test]
    fn test_capacity_exceeded() {
        let mut scene = Scene::with_capacity(1, 1);
        scene.add_sphere(0.0, 0.0, 0.0, 1.0).unwrap();
        scene.add_light(0.0, 3.0, 0.0, 1.0).unwrap();

        assert_eq!(
            scene.add_sphere(1.0, 0.0, 0.0, 1.0),
            Err(RenderError::CapacityExceeded {
                kind: PrimitiveKind::Sphere,
                capacity: 1
            })
        );
        assert_eq!(
            scene.add_light(1.0, 0.0, 0.0, 1.0),
            Err(RenderError::CapacityExceeded {
                kind: PrimitiveKind::Light,
                capacity: 1
            })
        );

        // Failed pushes leave the collections untouched
        assert_eq!(scene.spheres().len(), 1);
        assert_eq!(scene.lights().len(), 1);
    }

    #[test]
    fn test_zero_capacity() {
        let mut store: PrimitiveStore<Sphere> = PrimitiveStore::new(PrimitiveKind::Sphere, 0);
        let sphere = Sphere::new(Vec3::ZERO, 1.0).unwrap();
        assert!(store.push(sphere).is_err());
        assert!(store.is_empty());
        assert_eq!(store.capacity(), 0);
    }

    #[test]
    fn test_invalid_radius_rejected() {
        let mut scene = Scene::new();

        for radius in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let err = scene.add_sphere(0.0, 0.0, 0.0, radius).unwrap_err();
            assert!(matches!(
                err,
                RenderError::InvalidPrimitive {
                    kind: PrimitiveKind::Sphere,
                    ..
                }
            ));
        }

        let err = scene.add_light(0.0, 0.0, 0.0, -0.5).unwrap_err();
        assert!(matches!(
            err,
            RenderError::InvalidPrimitive {
                kind: PrimitiveKind::Light,
                ..
            }
        ));
        assert!(scene.is_empty());
    }

    #[test]
    fn test_non_finite_center_rejected() {
        assert!(Sphere::new(Vec3::new(f32::NAN, 0.0, 0.0), 1.0).is_err());
        assert!(Light::new(Vec3::new(0.0, f32::INFINITY, 0.0), 1.0).is_err());
    }
}
