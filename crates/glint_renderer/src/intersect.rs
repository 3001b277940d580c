//! Ray-sphere intersection.

use glint_math::{Interval, Ray, Vec3};

use crate::scene::Sphere;

/// Record of the nearest ray-sphere intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Index of the sphere in the scene
    pub sphere_index: usize,
    /// Point of intersection
    pub point: Vec3,
    /// Outward unit normal, always facing against the ray
    pub normal: Vec3,
}

/// Roots of `a t² + b t + c = 0` for a ray against a sphere, smaller first.
///
/// Returns `None` when the ray is degenerate (`a == 0`) or when the
/// discriminant is not strictly positive, so tangent rays never count.
#[inline]
pub(crate) fn sphere_roots(ray: &Ray, sphere: &Sphere) -> Option<(f32, f32)> {
    let a = ray.direction.length_squared();
    if a == 0.0 {
        return None;
    }

    let oc = ray.origin - sphere.center;
    let b = 2.0 * oc.dot(ray.direction);
    let c = oc.length_squared() - sphere.radius * sphere.radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant <= 0.0 {
        return None;
    }

    let sqrtd = discriminant.sqrt();
    Some(((-b - sqrtd) / (2.0 * a), (-b + sqrtd) / (2.0 * a)))
}

/// Test one sphere within `ray_t`, accepting only front-facing entry hits.
pub fn hit_sphere(ray: &Ray, sphere: &Sphere, ray_t: Interval) -> Option<(f32, Vec3, Vec3)> {
    let (near, far) = sphere_roots(ray, sphere)?;

    // Smaller positive root
    let t = if near > 0.0 { near } else { far };
    if !ray_t.surrounds(t) {
        return None;
    }

    let point = ray.at(t);
    let normal = (point - sphere.center).normalize();

    // Exit points (origin inside the sphere) face along the ray
    if ray.direction.dot(normal) >= 0.0 {
        return None;
    }

    Some((t, point, normal))
}

/// Find the nearest front-facing hit among `spheres`.
///
/// Ties keep the earliest sphere in iteration order.
pub fn nearest_hit(ray: &Ray, spheres: &[Sphere]) -> Option<HitRecord> {
    if ray.is_degenerate() {
        return None;
    }

    let mut closest: Option<HitRecord> = None;
    let mut ray_t = Interval::POSITIVE;

    for (sphere_index, sphere) in spheres.iter().enumerate() {
        if let Some((t, point, normal)) = hit_sphere(ray, sphere, ray_t) {
            ray_t = ray_t.with_max(t);
            closest = Some(HitRecord {
                t,
                sphere_index,
                point,
                normal,
            });
        }
    }

    closest
}
