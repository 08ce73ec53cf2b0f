//! Ray / box intersection.

use arena_core::types::Aabb;
use glam::Vec3;

/// Nearest intersection along a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance from the ray origin (direction is unit length).
    pub distance: f32,
    pub point: Vec3,
    /// Id of the obstacle that was hit.
    pub obstacle: u32,
}

/// Slab test. Returns the entry distance along `direction`, or `None` if the
/// ray misses or the box lies behind the origin. A ray starting inside the
/// box reports distance 0.
pub fn ray_aabb(origin: Vec3, direction: Vec3, aabb: &Aabb) -> Option<f32> {
    let mut t_min = 0.0_f32;
    let mut t_max = f32::INFINITY;

    for axis in 0..3 {
        let o = origin[axis];
        let d = direction[axis];
        let lo = aabb.min[axis];
        let hi = aabb.max[axis];

        if d.abs() < 1e-8 {
            // Parallel to this slab: must already be inside it.
            if o < lo || o > hi {
                return None;
            }
            continue;
        }

        let inv = 1.0 / d;
        let mut t0 = (lo - o) * inv;
        let mut t1 = (hi - o) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_min = t_min.max(t0);
        t_max = t_max.min(t1);
        if t_min > t_max {
            return None;
        }
    }

    Some(t_min)
}
