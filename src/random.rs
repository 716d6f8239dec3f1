use glam::DVec3;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro128PlusPlus;

// no global state: one generator per pixel, derived from a single base seed
pub type SampleRng = Xoshiro128PlusPlus;

// golden-ratio increment, spreads consecutive stream ids across the seed space
const STREAM_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// Base seed for a render: the configured one, or a fresh one from entropy.
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    match seed {
        Some(seed) => seed,
        None => SampleRng::from_entropy().gen(),
    }
}

/// Generator for one independent stream (one pixel).
///
/// The result depends only on `seed` and `stream`.
pub fn rng_for(seed: u64, stream: u64) -> SampleRng {
    return SampleRng::seed_from_u64(seed ^ stream.wrapping_add(1).wrapping_mul(STREAM_MIX));
}

/// Offset in `[-0.5, 0.5)` along both pixel axes.
pub fn sample_square(rng: &mut SampleRng) -> (f64, f64) {
    let px = -0.5 + rng.gen::<f64>();
    let py = -0.5 + rng.gen::<f64>();
    return (px, py);
}

pub fn random_unit_vector(rng: &mut SampleRng) -> DVec3 {
    loop {
        let p = DVec3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        let len_sq = p.length_squared();
        // reject points outside the ball and ones too small to normalize
        if 1e-160 < len_sq && len_sq <= 1.0 {
            return p / len_sq.sqrt();
        }
    }
}

pub fn random_on_hemisphere(normal: DVec3, rng: &mut SampleRng) -> DVec3 {
    let on_unit_sphere = random_unit_vector(rng);
    if on_unit_sphere.dot(normal) > 0. {
        return on_unit_sphere;
    }
    return -on_unit_sphere;
}
