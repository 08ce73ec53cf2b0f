//! Per-floor arena metadata.
//!
//! Immutable once generated for a floor, except for the safe-room gate's
//! solidity flag which only the phase orchestrator toggles.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::ArenaError;
use crate::types::{Aabb, Obstacle};

/// Light/dark region used by the telemetry estimator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightZone {
    pub bounds: Aabb,
    /// Added to the light reading while inside. Dark zones are negative.
    pub intensity: f32,
}

/// Point light sampled by the telemetry estimator with linear falloff.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TelemetryProbe {
    pub position: Vec3,
    pub radius: f32,
    pub intensity: f32,
}

/// Protected spawn room and the obstacle that closes it off.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SafeRoom {
    pub bounds: Aabb,
    /// Obstacle id of the gate.
    pub gate: u32,
}

/// Complete description of one floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaMap {
    pub floor: u32,
    pub bounds: Aabb,
    pub obstacles: Vec<Obstacle>,
    pub spawn_nodes: Vec<Vec3>,
    /// Ordered waypoint loops walked by zone guards.
    pub patrol_routes: Vec<Vec<Vec3>>,
    pub pickup_nodes: Vec<Vec3>,
    #[serde(default)]
    pub light_zones: Vec<LightZone>,
    #[serde(default)]
    pub probes: Vec<TelemetryProbe>,
    pub safe_room: SafeRoom,
    pub player_spawn: Vec3,
}

impl ArenaMap {
    /// Parse arena metadata from JSON and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ArenaError> {
        let map: ArenaMap = serde_json::from_str(json)?;
        map.validate()?;
        Ok(map)
    }

    /// Structural checks. Problems here are survivable at runtime (the
    /// affected behavior simply does nothing) so callers typically log them.
    pub fn validate(&self) -> Result<(), ArenaError> {
        if self.spawn_nodes.is_empty() {
            return Err(ArenaError::NoSpawnNodes);
        }
        if let Some(idx) = self.patrol_routes.iter().position(|r| r.is_empty()) {
            return Err(ArenaError::EmptyPatrolRoute(idx));
        }
        if self.gate().is_none() {
            return Err(ArenaError::MissingGate(self.safe_room.gate));
        }
        if !self.bounds.contains_horizontal(self.player_spawn) {
            return Err(ArenaError::SpawnOutOfBounds);
        }
        Ok(())
    }

    pub fn gate(&self) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| o.id == self.safe_room.gate)
    }

    /// Whether the safe-room gate currently admits the player.
    pub fn gate_open(&self) -> bool {
        self.gate().map(|g| !g.solid).unwrap_or(true)
    }

    /// Open or close the gate. Returns true if the state changed.
    pub fn set_gate_open(&mut self, open: bool) -> bool {
        let gate_id = self.safe_room.gate;
        match self.obstacles.iter_mut().find(|o| o.id == gate_id) {
            Some(gate) if gate.solid == open => {
                gate.solid = !open;
                true
            }
            _ => false,
        }
    }

    /// Obstacles that block rays and movement.
    pub fn solid_obstacles(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter().filter(|o| o.solid)
    }

    /// Clamp a point into the world bounds, `inset` units from the walls.
    pub fn clamp_to_bounds(&self, point: Vec3, inset: f32) -> Vec3 {
        self.bounds.clamp_horizontal(point, inset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_map() -> ArenaMap {
        ArenaMap {
            floor: 1,
            bounds: Aabb::new(Vec3::new(-20.0, 0.0, -20.0), Vec3::new(20.0, 6.0, 20.0)),
            obstacles: vec![
                Obstacle::new(0, Aabb::new(Vec3::new(-2.0, 0.0, 5.0), Vec3::new(2.0, 3.0, 6.0))),
                Obstacle::new(1, Aabb::new(Vec3::new(-1.0, 0.0, -16.0), Vec3::new(1.0, 3.0, -15.5))),
            ],
            spawn_nodes: vec![Vec3::new(0.0, 0.0, 10.0)],
            patrol_routes: vec![vec![Vec3::new(5.0, 0.0, 5.0), Vec3::new(-5.0, 0.0, 5.0)]],
            pickup_nodes: vec![Vec3::new(0.0, 0.0, 0.0)],
            light_zones: Vec::new(),
            probes: Vec::new(),
            safe_room: SafeRoom {
                bounds: Aabb::new(Vec3::new(-3.0, 0.0, -20.0), Vec3::new(3.0, 3.0, -16.0)),
                gate: 1,
            },
            player_spawn: Vec3::new(0.0, 0.0, -18.0),
        }
    }

    #[test]
    fn test_gate_toggle() {
        let mut map = sample_map();
        assert!(!map.gate_open());
        assert!(map.set_gate_open(true));
        assert!(map.gate_open());
        assert!(!map.set_gate_open(true), "already open");
        assert_eq!(map.solid_obstacles().count(), 1);
    }

    #[test]
    fn test_validate_rejects_empty_spawns() {
        let mut map = sample_map();
        map.spawn_nodes.clear();
        assert!(matches!(map.validate(), Err(ArenaError::NoSpawnNodes)));
    }

    #[test]
    fn test_validate_rejects_missing_gate() {
        let mut map = sample_map();
        map.safe_room.gate = 99;
        assert!(matches!(map.validate(), Err(ArenaError::MissingGate(99))));
    }

    #[test]
    fn test_json_round_trip_validates() {
        let map = sample_map();
        let json = serde_json::to_string(&map).unwrap();
        let back = ArenaMap::from_json_str(&json).unwrap();
        assert_eq!(back, map);
    }

    #[test]
    fn test_obstacle_solid_defaults_true() {
        let json = r#"{"id":7,"bounds":{"min":[0.0,0.0,0.0],"max":[1.0,1.0,1.0]}}"#;
        let obstacle: Obstacle = serde_json::from_str(json).unwrap();
        assert!(obstacle.solid);
    }
}
