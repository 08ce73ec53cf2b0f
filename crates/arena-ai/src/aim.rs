//! Randomized aim and reposition sampling.

use glam::Vec3;
use rand::Rng;

/// Perturb a unit aim direction with independent uniform noise on X/Z and
/// a smaller amount on Y, then renormalize.
pub fn perturb_aim<R: Rng>(
    rng: &mut R,
    direction: Vec3,
    noise_xz: f32,
    noise_y: f32,
) -> Vec3 {
    let jitter = Vec3::new(
        symmetric(rng, noise_xz),
        symmetric(rng, noise_y),
        symmetric(rng, noise_xz),
    );
    (direction + jitter).try_normalize().unwrap_or(direction)
}

/// Weapon spread: the same uniform jitter on every axis, then renormalize.
/// A simplification, not a model of real shot dispersion.
pub fn apply_spread<R: Rng>(rng: &mut R, direction: Vec3, spread: f32) -> Vec3 {
    perturb_aim(rng, direction, spread, spread)
}

/// Random point on a horizontal ring around `center`.
pub fn ring_point<R: Rng>(
    rng: &mut R,
    center: Vec3,
    radius_min: f32,
    radius_max: f32,
) -> Vec3 {
    let lo = radius_min.min(radius_max);
    let hi = radius_min.max(radius_max);
    let radius = rng.gen_range(lo..=hi);
    let angle = rng.gen_range(0.0..std::f32::consts::TAU);
    Vec3::new(
        center.x + radius * angle.cos(),
        center.y,
        center.z + radius * angle.sin(),
    )
}

fn symmetric<R: Rng>(rng: &mut R, amount: f32) -> f32 {
    let a = amount.abs();
    rng.gen_range(-a..=a)
}
