//! The ray-cast contract the simulation needs from the world.

use arena_core::types::Obstacle;
use glam::Vec3;

use crate::ray::{ray_aabb, RayHit};

/// Ray casting against a static obstacle set.
///
/// Implementations must treat "no intersection" as the ordinary result and
/// only consider obstacles that block movement and sight.
pub trait SpatialQuery {
    /// Nearest solid intersection along a unit `direction`, if any.
    fn cast_ray(&self, origin: Vec3, direction: Vec3) -> Option<RayHit>;
}

/// Solid obstacles of an arena, filtered on `solid`.
#[derive(Debug, Clone, Copy)]
pub struct SolidObstacles<'a> {
    obstacles: &'a [Obstacle],
}

impl<'a> SolidObstacles<'a> {
    pub fn new(obstacles: &'a [Obstacle]) -> Self {
        Self { obstacles }
    }

    /// Whether a box overlaps any solid obstacle.
    pub fn overlaps(&self, bounds: &arena_core::types::Aabb) -> bool {
        self.obstacles
            .iter()
            .filter(|o| o.solid)
            .any(|o| o.bounds.intersects(bounds))
    }
}

impl SpatialQuery for SolidObstacles<'_> {
    fn cast_ray(&self, origin: Vec3, direction: Vec3) -> Option<RayHit> {
        let direction = direction.try_normalize()?;
        self.obstacles
            .iter()
            .filter(|o| o.solid)
            .filter_map(|o| {
                ray_aabb(origin, direction, &o.bounds).map(|distance| RayHit {
                    distance,
                    point: origin + direction * distance,
                    obstacle: o.id,
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

/// True when a cast from `origin` along `direction` is clear for more than
/// `clearance` units.
pub fn probe_clearance<Q: SpatialQuery + ?Sized>(
    query: &Q,
    origin: Vec3,
    direction: Vec3,
    clearance: f32,
) -> bool {
    match query.cast_ray(origin, direction) {
        Some(hit) => hit.distance > clearance,
        None => true,
    }
}
