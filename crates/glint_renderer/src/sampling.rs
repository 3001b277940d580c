//! Random sampling helpers.
//!
//! Each pixel of each frame gets its own generator, seeded from
//! `(seed, frame, pixel)`, so no generator state is shared between pixels
//! and neighbouring pixels do not draw correlated sequences.

use glint_math::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};

/// Uniform `f32` in `[0, 1)`.
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen()
}

/// Uniform `f64` in `[0, 1)`.
#[inline]
pub fn gen_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen()
}

/// Sub-pixel jitter in `[-0.5, 0.5)`.
#[inline]
pub fn jitter(rng: &mut dyn RngCore) -> f64 {
    gen_f64(rng) - 0.5
}

/// Generate a random unit vector on the unit sphere.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    // Rejection sampling keeps the distribution uniform over the sphere
    loop {
        let v = Vec3::new(
            gen_f32(rng) * 2.0 - 1.0,
            gen_f32(rng) * 2.0 - 1.0,
            gen_f32(rng) * 2.0 - 1.0,
        );
        let len_sq = v.length_squared();
        if len_sq > 1e-6 && len_sq <= 1.0 {
            return v / len_sq.sqrt();
        }
    }
}

/// SplitMix64 finalizer.
#[inline]
fn mix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Derive the generator seed for one pixel invocation.
pub fn pixel_seed(seed: u64, frame: u64, pixel: u64) -> u64 {
    mix64(mix64(mix64(seed) ^ frame) ^ pixel)
}

/// Build the generator for one pixel invocation.
pub fn pixel_rng(seed: u64, frame: u64, pixel: u64) -> SmallRng {
    SmallRng::seed_from_u64(pixel_seed(seed, frame, pixel))
}
