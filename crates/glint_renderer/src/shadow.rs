//! Binary shadow visibility.
//!
//! A shadow ray is cast from the shaded point toward a jittered point on each
//! light. Averaged over frames the jitter gives soft-looking shadow edges even
//! though each individual test is all-or-nothing.
//!
//! A single occluding sphere on the way to *any* light zeroes visibility for
//! the whole point; lights are not accumulated independently. Occlusion counts
//! any sphere ahead of the point along the shadow ray, including spheres that
//! lie beyond the light.

use glint_math::{Ray, Vec3};
use rand::RngCore;

use crate::intersect::sphere_roots;
use crate::sampling::random_unit_vector;
use crate::scene::{Light, Sphere};

/// Returns true if any sphere has a positive root along `ray`.
fn occluded(ray: &Ray, spheres: &[Sphere]) -> bool {
    spheres.iter().any(|sphere| {
        sphere_roots(ray, sphere).is_some_and(|(near, far)| near > 0.0 || far > 0.0)
    })
}

/// Shadow ray from `point` toward a jittered sample on `light`.
pub fn shadow_ray(point: Vec3, light: &Light, rng: &mut dyn RngCore) -> Ray {
    let target = light.center + random_unit_vector(rng) * light.radius;
    Ray::new(point, target - point)
}

/// Visibility of the lights from `point`: `1.0` when every shadow ray is
/// clear, `0.0` as soon as one is blocked.
///
/// `point` must already be offset from the surface it lies on, otherwise the
/// surface shadows itself. A scene without lights is fully visible.
pub fn visibility(point: Vec3, lights: &[Light], spheres: &[Sphere], rng: &mut dyn RngCore) -> f32 {
    let mut light = 1.0;

    for source in lights {
        let ray = shadow_ray(point, source, rng);
        if occluded(&ray, spheres) {
            light = 0.0;
        }
    }

    light
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn light_above() -> Light {
        Light::new(Vec3::new(0.0, 10.0, 0.0), 0.5).unwrap()
    }

    #[test]
    fn test_blocked_light() {
        let mut rng = StdRng::seed_from_u64(42);
        let blocker = Sphere::new(Vec3::new(0.0, 5.0, 0.0), 2.0).unwrap();

        for _ in 0..50 {
            let v = visibility(Vec3::ZERO, &[light_above()], &[blocker], &mut rng);
            assert_eq!(v, 0.0);
        }
    }

    #[test]
    fn test_clear_light() {
        let mut rng = StdRng::seed_from_u64(42);
        let beside = Sphere::new(Vec3::new(10.0, 5.0, 0.0), 1.0).unwrap();

        for _ in 0..50 {
            assert_eq!(visibility(Vec3::ZERO, &[light_above()], &[], &mut rng), 1.0);
            assert_eq!(visibility(Vec3::ZERO, &[light_above()], &[beside], &mut rng), 1.0);
        }
    }

    #[test]
    fn test_no_lights_is_visible() {
        let mut rng = StdRng::seed_from_u64(42);
        let blocker = Sphere::new(Vec3::new(0.0, 5.0, 0.0), 2.0).unwrap();
        assert_eq!(visibility(Vec3::ZERO, &[], &[blocker], &mut rng), 1.0);
    }

    #[test]
    fn test_one_blocked_light_darkens_all() {
        let mut rng = StdRng::seed_from_u64(42);
        let blocker = Sphere::new(Vec3::new(0.0, 5.0, 0.0), 2.0).unwrap();
        let clear = Light::new(Vec3::new(0.0, -10.0, 0.0), 0.5).unwrap();

        let v = visibility(Vec3::ZERO, &[clear, light_above()], &[blocker], &mut rng);
        assert_eq!(v, 0.0);
    }

    #[test]
    fn test_offset_point_does_not_shadow_itself() {
        let mut rng = StdRng::seed_from_u64(42);
        let ground = Sphere::new(Vec3::ZERO, 1.0).unwrap();
        // Top of the sphere, nudged out along the normal
        let point = Vec3::new(0.0, 1.0 + 1e-3, 0.0);

        for _ in 0..50 {
            assert_eq!(visibility(point, &[light_above()], &[ground], &mut rng), 1.0);
        }
    }

    #[test]
    fn test_surface_facing_away_is_shadowed() {
        let mut rng = StdRng::seed_from_u64(42);
        let ground = Sphere::new(Vec3::ZERO, 1.0).unwrap();
        // Bottom of the sphere: the light is behind the surface
        let point = Vec3::new(0.0, -1.0 - 1e-3, 0.0);

        assert_eq!(visibility(point, &[light_above()], &[ground], &mut rng), 0.0);
    }

    #[test]
    fn test_shadow_ray_targets_light() {
        let mut rng = StdRng::seed_from_u64(42);
        let light = light_above();
        for _ in 0..50 {
            let ray = shadow_ray(Vec3::ZERO, &light, &mut rng);
            let target = ray.at(1.0);
            assert!((target - light.center).length() <= light.radius + 1e-4);
        }
    }
}
