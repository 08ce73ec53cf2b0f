//! Obstacle-aware steering.
//!
//! The desired heading is tried first, then the two diagonals, then the
//! reverse. The first heading whose probe ray is clear beyond the clearance
//! distance is taken; if none is, the enemy is blocked for this tick.

use glam::{Quat, Vec3};

use arena_core::config::AiTuning;
use arena_core::types::flatten;
use arena_spatial::{probe_clearance, SpatialQuery};

/// Outcome of a steering query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Steer {
    /// Move along this unit, horizontal heading.
    Heading(Vec3),
    /// Every candidate is obstructed.
    Blocked,
}

/// The four candidate headings for a desired direction, in priority order.
/// Returns `None` if `desired` has no horizontal component.
pub fn candidate_headings(desired: Vec3, diagonal_deg: f32) -> Option<[Vec3; 4]> {
    let forward = flatten(desired)?;
    let angle = diagonal_deg.to_radians();
    Some([
        forward,
        Quat::from_rotation_y(angle) * forward,
        Quat::from_rotation_y(-angle) * forward,
        -forward,
    ])
}

/// Pick a heading toward `desired` from `probe_origin` (a point at body
/// height). A zero desired direction yields `Blocked` so callers hold still.
pub fn steer<Q: SpatialQuery + ?Sized>(
    query: &Q,
    probe_origin: Vec3,
    desired: Vec3,
    tuning: &AiTuning,
) -> Steer {
    let Some(candidates) = candidate_headings(desired, tuning.steer_diagonal_deg) else {
        return Steer::Blocked;
    };

    candidates
        .into_iter()
        .find(|heading| probe_clearance(query, probe_origin, *heading, tuning.steer_clearance))
        .map(Steer::Heading)
        .unwrap_or(Steer::Blocked)
}
