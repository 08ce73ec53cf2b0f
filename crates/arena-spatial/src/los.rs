//! Line-of-sight between two points.
//!
//! A single ray is cast from `from` toward `to`; sight holds when the nearest
//! solid hit (if any) lies beyond the target distance minus a small slack.
//! The slack absorbs targets standing flush against a wall.

use glam::Vec3;

use crate::query::SpatialQuery;

/// Check line-of-sight from `from` to `to`.
pub fn has_line_of_sight<Q: SpatialQuery + ?Sized>(
    query: &Q,
    from: Vec3,
    to: Vec3,
    tolerance: f32,
) -> bool {
    let delta = to - from;
    let distance = delta.length();
    if distance <= tolerance {
        return true; // Too close for geometry to matter
    }

    match query.cast_ray(from, delta / distance) {
        Some(hit) => hit.distance > distance - tolerance,
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::SolidObstacles;
    use arena_core::types::{Aabb, Obstacle};

    const EYE: f32 = 1.6;
    const SLACK: f32 = 0.45;

    /// A 1.2-unit high crate between z = 4.5 and z = 5.5.
    fn low_cover() -> Vec<Obstacle> {
        vec![Obstacle::new(
            0,
            Aabb::new(Vec3::new(-3.0, 0.0, 4.5), Vec3::new(3.0, 1.2, 5.5)),
        )]
    }

    /// A full-height wall between z = 4.5 and z = 5.5.
    fn wall() -> Vec<Obstacle> {
        vec![Obstacle::new(
            0,
            Aabb::new(Vec3::new(-3.0, 0.0, 4.5), Vec3::new(3.0, 4.0, 5.5)),
        )]
    }

    #[test]
    fn test_los_open_floor() {
        let obstacles: Vec<Obstacle> = Vec::new();
        let q = SolidObstacles::new(&obstacles);
        let from = Vec3::new(0.0, EYE, 0.0);
        let to = Vec3::new(0.0, EYE, 30.0);
        assert!(
            has_line_of_sight(&q, from, to, SLACK),
            "LOS should be clear on an empty floor"
        );
    }

    #[test]
    fn test_los_blocked_by_wall() {
        let obstacles = wall();
        let q = SolidObstacles::new(&obstacles);
        let from = Vec3::new(0.0, EYE, 0.0);
        let to = Vec3::new(0.0, EYE, 10.0);
        assert!(
            !has_line_of_sight(&q, from, to, SLACK),
            "LOS should be blocked by the wall"
        );
    }

    #[test]
    fn test_los_over_low_cover() {
        let obstacles = low_cover();
        let q = SolidObstacles::new(&obstacles);
        let from = Vec3::new(0.0, EYE, 0.0);
        let to = Vec3::new(0.0, EYE, 10.0);
        assert!(
            has_line_of_sight(&q, from, to, SLACK),
            "eye-height LOS should pass over waist-high cover"
        );
    }

    #[test]
    fn test_los_target_flush_with_wall() {
        let obstacles = wall();
        let q = SolidObstacles::new(&obstacles);
        // Target stands 0.3 in front of the wall face; the hit lies just
        // beyond it, within the slack.
        let from = Vec3::new(0.0, EYE, 0.0);
        let to = Vec3::new(0.0, EYE, 4.2);
        assert!(has_line_of_sight(&q, from, to, SLACK));
        // Target embedded behind the wall face by more than the slack.
        let to = Vec3::new(0.0, EYE, 5.2);
        assert!(!has_line_of_sight(&q, from, to, SLACK));
    }

    #[test]
    fn test_los_close_range() {
        let obstacles = wall();
        let q = SolidObstacles::new(&obstacles);
        let from = Vec3::new(0.0, EYE, 4.7);
        let to = Vec3::new(0.0, EYE, 5.0);
        assert!(
            has_line_of_sight(&q, from, to, SLACK),
            "LOS should be clear at very close range"
        );
    }
}
