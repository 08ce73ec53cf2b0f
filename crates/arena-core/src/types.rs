//! Fundamental geometric and simulation types.
//!
//! World space is right-handed with +Y up. The ground plane is y = 0 and
//! all horizontal-plane measurements use the X/Z components only.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box (world units).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Box centred on `center` with the given half extents.
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Containment test on the X/Z plane only.
    pub fn contains_horizontal(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.cmple(other.max).all() && self.max.cmpge(other.min).all()
    }

    /// Clamp a point into the box on the horizontal plane, keeping `inset`
    /// units away from each wall. Y is left untouched.
    pub fn clamp_horizontal(&self, point: Vec3, inset: f32) -> Vec3 {
        let lo_x = (self.min.x + inset).min(self.center().x);
        let hi_x = (self.max.x - inset).max(self.center().x);
        let lo_z = (self.min.z + inset).min(self.center().z);
        let hi_z = (self.max.z - inset).max(self.center().z);
        Vec3::new(point.x.clamp(lo_x, hi_x), point.y, point.z.clamp(lo_z, hi_z))
    }
}

/// A static piece of arena geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub bounds: Aabb,
    /// Non-solid obstacles (zone markers, an open gate) are ignored by
    /// ray casts and collision.
    #[serde(default = "default_solid")]
    pub solid: bool,
}

fn default_solid() -> bool {
    true
}

impl Obstacle {
    pub fn new(id: u32, bounds: Aabb) -> Self {
        Self {
            id,
            bounds,
            solid: true,
        }
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each simulated tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `delta_secs`.
    pub fn advance(&mut self, delta_secs: f64) {
        self.tick += 1;
        self.elapsed_secs += delta_secs;
    }

    /// Elapsed time in milliseconds; AI and fire timers are kept in ms.
    pub fn now_ms(&self) -> f64 {
        self.elapsed_secs * 1000.0
    }
}

/// Euclidean distance between two points.
pub fn distance(a: Vec3, b: Vec3) -> f32 {
    a.distance(b)
}

/// Distance on the X/Z plane, ignoring height.
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    let dx = b.x - a.x;
    let dz = b.z - a.z;
    (dx * dx + dz * dz).sqrt()
}

/// Project a vector onto the ground plane and normalize it.
/// Returns `None` for (near) vertical or zero vectors.
pub fn flatten(v: Vec3) -> Option<Vec3> {
    Vec3::new(v.x, 0.0, v.z).try_normalize()
}

/// Yaw angle (radians, 0 = +Z, counter-clockwise seen from above) that faces
/// from `from` toward `to`.
pub fn yaw_towards(from: Vec3, to: Vec3) -> f32 {
    (to.x - from.x).atan2(to.z - from.z)
}

/// Unit forward vector on the ground plane for a yaw angle.
pub fn yaw_forward(yaw: f32) -> Vec3 {
    Vec3::new(yaw.sin(), 0.0, yaw.cos())
}
