//! Arena providers: where each floor's geometry and metadata comes from.
//!
//! The engine asks its provider for a fresh `ArenaMap` on game start and on
//! every arena swap. `ProceduralArenaProvider` builds floors from the
//! session RNG; `StaticArenaProvider` serves a fixed, hand-authored map.

use glam::Vec3;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use arena_core::arena::{ArenaMap, LightZone, SafeRoom, TelemetryProbe};
use arena_core::constants::MAX_PLACEMENT_ATTEMPTS;
use arena_core::error::ArenaError;
use arena_core::types::{Aabb, Obstacle};

/// Source of per-floor arena metadata.
pub trait ArenaProvider: Send {
    /// Build the arena for `floor` (1-based).
    fn load(&mut self, floor: u32, rng: &mut ChaCha8Rng) -> ArenaMap;
}

/// Serves the same map on every floor, only renumbering it.
#[derive(Debug, Clone)]
pub struct StaticArenaProvider {
    map: ArenaMap,
}

impl StaticArenaProvider {
    pub fn new(map: ArenaMap) -> Self {
        Self { map }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ArenaError> {
        Ok(Self::new(ArenaMap::from_json_str(json)?))
    }
}

impl ArenaProvider for StaticArenaProvider {
    fn load(&mut self, floor: u32, _rng: &mut ChaCha8Rng) -> ArenaMap {
        ArenaMap {
            floor,
            ..self.map.clone()
        }
    }
}

const BASE_HALF_EXTENT: f32 = 22.0;
const HALF_EXTENT_PER_FLOOR: f32 = 2.0;
const MAX_HALF_EXTENT: f32 = 36.0;
const WALL_HEIGHT: f32 = 6.0;
const SAFE_ROOM_HALF_WIDTH: f32 = 3.0;
const SAFE_ROOM_DEPTH: f32 = 5.0;
const SAFE_ROOM_WALL: f32 = 0.3;
const GATE_HEIGHT: f32 = 3.0;
const LOW_COVER_HEIGHT: f32 = 1.2;
const TALL_COVER_HEIGHT: f32 = 3.0;
const COVER_SPACING: f32 = 1.5;
const NODE_CLEARANCE: f32 = 1.0;
const SPAWN_NODE_COUNT: usize = 6;
const PATROL_ROUTE_COUNT: usize = 3;
const PICKUP_NODE_COUNT: usize = 4;
const LIGHT_ZONE_COUNT: usize = 3;
const PROBE_COUNT: usize = 2;

/// Generates floors with seeded rejection sampling. Every sampling loop is
/// bounded by `MAX_PLACEMENT_ATTEMPTS` and falls back to a fixed candidate
/// (or skips the feature) once exhausted.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProceduralArenaProvider;

impl ArenaProvider for ProceduralArenaProvider {
    fn load(&mut self, floor: u32, rng: &mut ChaCha8Rng) -> ArenaMap {
        generate_floor(floor, rng)
    }
}

/// Build one floor. Arenas widen with depth up to a cap.
pub fn generate_floor(floor: u32, rng: &mut ChaCha8Rng) -> ArenaMap {
    let half = (BASE_HALF_EXTENT + HALF_EXTENT_PER_FLOOR * floor.saturating_sub(1) as f32)
        .min(MAX_HALF_EXTENT);
    let bounds = Aabb::new(
        Vec3::new(-half, 0.0, -half),
        Vec3::new(half, WALL_HEIGHT, half),
    );

    let mut layout = Layout::default();

    // Safe room against the south wall, gate on its north face.
    let room_far = -half + SAFE_ROOM_DEPTH;
    let room = Aabb::new(
        Vec3::new(-SAFE_ROOM_HALF_WIDTH, 0.0, -half),
        Vec3::new(SAFE_ROOM_HALF_WIDTH, GATE_HEIGHT, room_far),
    );
    let gate = layout.push(Aabb::new(
        Vec3::new(-SAFE_ROOM_HALF_WIDTH, 0.0, room_far),
        Vec3::new(SAFE_ROOM_HALF_WIDTH, GATE_HEIGHT, room_far + SAFE_ROOM_WALL),
    ));
    for side in [-1.0_f32, 1.0] {
        let inner = side * SAFE_ROOM_HALF_WIDTH;
        let outer = side * (SAFE_ROOM_HALF_WIDTH + SAFE_ROOM_WALL);
        layout.push(Aabb::new(
            Vec3::new(inner.min(outer), 0.0, -half),
            Vec3::new(inner.max(outer), GATE_HEIGHT, room_far + SAFE_ROOM_WALL),
        ));
    }
    let keep_out = Aabb::new(
        room.min - Vec3::splat(COVER_SPACING),
        room.max + Vec3::new(COVER_SPACING, 0.0, COVER_SPACING * 2.0),
    );

    let cover_count = (8 + 2 * floor.saturating_sub(1) as usize).min(20);
    for _ in 0..cover_count {
        if let Some(bounds) = place_cover(rng, half, room_far, &layout, &keep_out) {
            layout.push(bounds);
        }
    }

    let combat_min_z = room_far + 3.0;
    let north = Aabb::new(
        Vec3::new(-half + 2.0, 0.0, 0.0),
        Vec3::new(half - 2.0, 0.0, half - 2.0),
    );
    let spawn_nodes = (0..SPAWN_NODE_COUNT)
        .map(|i| {
            let t = (i as f32 + 0.5) / SPAWN_NODE_COUNT as f32;
            let fallback_x = -half + 2.0 + (2.0 * half - 4.0) * t;
            sample_clear_point(rng, &north, &layout.obstacles)
                .unwrap_or(Vec3::new(fallback_x, 0.0, half - 2.0))
        })
        .collect();

    let field = Aabb::new(
        Vec3::new(-half + 2.0, 0.0, combat_min_z),
        Vec3::new(half - 2.0, 0.0, half - 2.0),
    );
    let patrol_routes = (0..PATROL_ROUTE_COUNT)
        .map(|_| patrol_loop(rng, &field, &layout.obstacles))
        .collect();

    let centre = Aabb::new(
        Vec3::new(-half * 0.5, 0.0, combat_min_z.max(-half * 0.5)),
        Vec3::new(half * 0.5, 0.0, half * 0.5),
    );
    let pickup_nodes = (0..PICKUP_NODE_COUNT)
        .map(|i| {
            let sx = if i % 2 == 0 { -2.0 } else { 2.0 };
            let sz = if i < 2 { -2.0 } else { 2.0 };
            sample_clear_point(rng, &centre, &layout.obstacles)
                .unwrap_or(Vec3::new(sx, 0.0, sz))
        })
        .collect();

    let mut light_zones = Vec::with_capacity(LIGHT_ZONE_COUNT);
    for i in 0..LIGHT_ZONE_COUNT {
        let w = rng.gen_range(4.0..8.0_f32);
        let d = rng.gen_range(4.0..8.0_f32);
        let cx = rng.gen_range(-half + w..half - w);
        let cz = rng.gen_range(combat_min_z..half - d);
        let zone_bounds = Aabb::new(
            Vec3::new(cx - w * 0.5, 0.0, cz - d * 0.5),
            Vec3::new(cx + w * 0.5, WALL_HEIGHT, cz + d * 0.5),
        );
        // Alternate shadowed and lit patches.
        let intensity = if i % 2 == 0 {
            -rng.gen_range(10.0..18.0_f32)
        } else {
            rng.gen_range(15.0..30.0_f32)
        };
        light_zones.push(LightZone {
            bounds: zone_bounds,
            intensity,
        });
        // Floor decal marking the zone; never blocks anything.
        layout.push_marker(Aabb::new(
            zone_bounds.min,
            Vec3::new(zone_bounds.max.x, 0.05, zone_bounds.max.z),
        ));
    }

    let mut probes = Vec::with_capacity(PROBE_COUNT);
    for _ in 0..PROBE_COUNT {
        if let Some(p) = sample_clear_point(rng, &field, &layout.obstacles) {
            probes.push(TelemetryProbe {
                position: p + Vec3::Y * 3.0,
                radius: rng.gen_range(6.0..10.0),
                intensity: rng.gen_range(20.0..35.0),
            });
        }
    }

    ArenaMap {
        floor,
        bounds,
        obstacles: layout.obstacles,
        spawn_nodes,
        patrol_routes,
        pickup_nodes,
        light_zones,
        probes,
        safe_room: SafeRoom { bounds: room, gate },
        player_spawn: Vec3::new(0.0, 0.0, -half + SAFE_ROOM_DEPTH * 0.5),
    }
}

#[derive(Default)]
struct Layout {
    obstacles: Vec<Obstacle>,
    next_id: u32,
}

impl Layout {
    fn push(&mut self, bounds: Aabb) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.obstacles.push(Obstacle::new(id, bounds));
        id
    }

    fn push_marker(&mut self, bounds: Aabb) {
        self.push(bounds);
        if let Some(marker) = self.obstacles.last_mut() {
            marker.solid = false;
        }
    }
}

fn place_cover(
    rng: &mut ChaCha8Rng,
    half: f32,
    room_far: f32,
    layout: &Layout,
    keep_out: &Aabb,
) -> Option<Aabb> {
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let hx = rng.gen_range(0.5..1.6_f32);
        let hz = rng.gen_range(0.5..1.6_f32);
        let height = if rng.gen_bool(0.4) {
            LOW_COVER_HEIGHT
        } else {
            TALL_COVER_HEIGHT
        };
        let cx = rng.gen_range(-half + 3.0..half - 3.0);
        let cz = rng.gen_range(room_far + 2.0..half - 3.0);
        let candidate = Aabb::new(
            Vec3::new(cx - hx, 0.0, cz - hz),
            Vec3::new(cx + hx, height, cz + hz),
        );
        let spaced = Aabb::new(
            candidate.min - Vec3::splat(COVER_SPACING),
            candidate.max + Vec3::splat(COVER_SPACING),
        );
        let clear = !spaced.intersects(keep_out)
            && !layout.obstacles.iter().any(|o| o.bounds.intersects(&spaced));
        if clear {
            return Some(candidate);
        }
    }
    None
}

/// A random point inside `area` (horizontally) that keeps `NODE_CLEARANCE`
/// from every solid obstacle, or `None` after `MAX_PLACEMENT_ATTEMPTS`.
fn sample_clear_point(
    rng: &mut ChaCha8Rng,
    area: &Aabb,
    obstacles: &[Obstacle],
) -> Option<Vec3> {
    if area.min.x >= area.max.x || area.min.z >= area.max.z {
        return None;
    }
    (0..MAX_PLACEMENT_ATTEMPTS).find_map(|_| {
        let p = Vec3::new(
            rng.gen_range(area.min.x..area.max.x),
            0.0,
            rng.gen_range(area.min.z..area.max.z),
        );
        is_clear(p, obstacles).then_some(p)
    })
}

fn is_clear(point: Vec3, obstacles: &[Obstacle]) -> bool {
    let probe = Aabb::new(
        point - Vec3::new(NODE_CLEARANCE, 0.0, NODE_CLEARANCE),
        point + Vec3::new(NODE_CLEARANCE, 1.8, NODE_CLEARANCE),
    );
    !obstacles
        .iter()
        .filter(|o| o.solid)
        .any(|o| o.bounds.intersects(&probe))
}

/// Four-corner loop around a sampled centre. Corners that land in cover
/// collapse onto the centre.
fn patrol_loop(rng: &mut ChaCha8Rng, field: &Aabb, obstacles: &[Obstacle]) -> Vec<Vec3> {
    let centre = sample_clear_point(rng, field, obstacles).unwrap_or(field.center());
    let r = rng.gen_range(3.0..6.0_f32);
    [(r, r), (r, -r), (-r, -r), (-r, r)]
        .into_iter()
        .map(|(dx, dz)| {
            let corner = field.clamp_horizontal(centre + Vec3::new(dx, 0.0, dz), 0.0);
            if is_clear(corner, obstacles) {
                corner
            } else {
                centre
            }
        })
        .collect()
}
