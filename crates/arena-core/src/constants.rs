//! Simulation constants and tuning parameters.
//!
//! Distances are world units, character speeds are units per second,
//! projectile speeds are units per tick, and AI timers are milliseconds.

/// Nominal frame rate the external loop drives the core at (Hz).
pub const TICK_RATE: u32 = 60;

/// Nominal seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Upper bound on a single tick's delta. Longer frames (tab switches,
/// debugger stops) are clamped instead of simulated in one jump.
pub const MAX_TICK_DELTA_SECS: f64 = 0.1;

// --- Player ---

pub const PLAYER_MAX_HEALTH: i32 = 100;

/// Camera height above the player's feet.
pub const PLAYER_EYE_HEIGHT: f32 = 1.6;

/// Camera height while crouched.
pub const PLAYER_CROUCH_EYE_HEIGHT: f32 = 1.05;

/// Height of the player's hit centre above the feet.
pub const PLAYER_BODY_CENTER: f32 = 1.0;

/// Horizontal collision half-width of the player.
pub const PLAYER_RADIUS: f32 = 0.4;

/// Player collision height.
pub const PLAYER_HEIGHT: f32 = 1.8;

pub const PLAYER_MOVE_SPEED: f32 = 6.0;

pub const PLAYER_CROUCH_SPEED_FACTOR: f32 = 0.5;

pub const PLAYER_JUMP_VELOCITY: f32 = 7.0;

pub const GRAVITY: f32 = 20.0;

/// Distance in front of the eye at which player projectiles are created.
pub const MUZZLE_OFFSET: f32 = 0.6;

// --- Enemies ---

pub const ENEMY_BASE_HEALTH: i32 = 100;

/// Base enemy movement speed.
pub const ENEMY_BASE_SPEED: f32 = 4.2;

/// Base damage per enemy projectile.
pub const ENEMY_BASE_DAMAGE: i32 = 8;

/// Minimum milliseconds between enemy shots.
pub const ENEMY_FIRE_INTERVAL_MS: f64 = 900.0;

/// Enemy weapon range.
pub const ENEMY_WEAPON_RANGE: f32 = 38.0;

/// Enemy projectile speed (units per tick).
pub const ENEMY_PROJECTILE_SPEED: f32 = 1.6;

pub const ENEMY_EYE_HEIGHT: f32 = 1.6;

/// Height of the enemy torso hit centre above its feet.
pub const ENEMY_HIT_CENTER_OFFSET: f32 = 1.0;

/// Radius within which a player projectile hits an enemy.
pub const ENEMY_HIT_RADIUS: f32 = 1.2;

/// Radius within which an enemy projectile hits the player.
pub const PLAYER_HIT_RADIUS: f32 = 1.0;

/// Height above the feet at which steering probes are cast.
pub const STEERING_PROBE_HEIGHT: f32 = 0.9;

// --- Enemy AI ---

pub const AI_DETECTION_RANGE: f32 = 22.0;

/// Slack subtracted from the target distance when judging line of sight.
pub const AI_LOS_TOLERANCE: f32 = 0.45;

/// LOS loss after which ENGAGE reverts to CHASE.
pub const AI_LOS_REVERT_MS: f64 = 1200.0;

/// LOS loss after which CHASE/ENGAGE switch to REPOSITION.
pub const AI_LOS_REPOSITION_MS: f64 = 1800.0;

pub const AI_REPOSITION_RING_MIN: f32 = 4.0;

pub const AI_REPOSITION_RING_MAX: f32 = 8.0;

/// Distance at which a reposition target counts as reached.
pub const AI_ARRIVE_RADIUS: f32 = 1.2;

/// Fraction of weapon range at which CHASE becomes ENGAGE.
pub const AI_ENGAGE_RANGE_FACTOR: f32 = 0.95;

/// Closer than this, an engaged enemy backs away.
pub const AI_MIN_ENGAGE_DISTANCE: f32 = 3.2;

/// Beyond this fraction of weapon range, an engaged enemy closes in.
pub const AI_MAX_ENGAGE_FACTOR: f32 = 1.1;

/// Extra distance beyond weapon range at which an engaged enemy still fires.
pub const AI_FIRE_RANGE_BUFFER: f32 = 2.0;

/// A steering candidate is taken when its cast is clear beyond this distance.
pub const AI_STEER_CLEARANCE: f32 = 1.6;

/// Angle of the diagonal steering candidates (degrees).
pub const AI_STEER_DIAGONAL_DEG: f32 = 36.0;

pub const AI_PATROL_SPEED_FACTOR: f32 = 0.65;

pub const AI_REPOSITION_SPEED_FACTOR: f32 = 0.9;

pub const AI_RETREAT_SPEED_FACTOR: f32 = 0.8;

/// Uniform aim noise on the X and Z components.
pub const AI_AIM_NOISE_XZ: f32 = 0.08;

/// Uniform aim noise on the Y component.
pub const AI_AIM_NOISE_Y: f32 = 0.03;

// --- Phase timing (seconds) ---

pub const PREP_COUNTDOWN_SECS: f64 = 3.0;

/// Delay between entering COMBAT and combat going live.
pub const COMBAT_ACTIVATION_SECS: f64 = 1.0;

pub const INTERMISSION_SECS: f64 = 8.0;

pub const ROUND_END_SECS: f64 = 1.2;

pub const ARENA_GATE_OPEN_SECS: f64 = 1.4;

pub const ARENA_SWAP_SECS: f64 = 1.0;

pub const GAME_OVER_FEEDBACK_SECS: f64 = 2.5;

pub const GAME_OVER_BLANK_SECS: f64 = 0.8;

/// How long round banners stay on screen.
pub const ROUND_BANNER_SECS: f64 = 2.0;

// --- Round composition ---

pub const ROUNDS_PER_ARENA: u32 = 3;

pub const BASE_ENEMY_COUNT: u32 = 5;

pub const ENEMIES_PER_GLOBAL_ROUND: f64 = 1.5;

pub const ENEMIES_PER_FLOOR: f64 = 0.8;

/// Every Nth spawned enemy (1-based) is a pursuer.
pub const PURSUER_EVERY: u32 = 3;

// --- Per-floor scaling ---

pub const FLOOR_HEALTH_SCALE: f64 = 0.15;

pub const FLOOR_DAMAGE_SCALE: f64 = 0.10;

pub const FLOOR_SPEED_SCALE: f64 = 0.05;

pub const MIN_SCALED_HEALTH: i32 = 25;

// --- Pickups ---

pub const HEALTH_PICKUP_AMOUNT: i32 = 35;

/// Horizontal distance within which a pickup is collected.
pub const PICKUP_RADIUS: f32 = 1.4;

/// First global round whose intermission may offer the shotgun.
pub const SHOTGUN_UNLOCK_ROUND: u32 = 2;

/// First global round whose intermission may offer the sniper.
pub const SNIPER_UNLOCK_ROUND: u32 = 4;

// --- Spawning ---

/// Bound on rejection-sampling attempts for any placement.
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 8;

/// Random offset applied around a spawn node.
pub const SPAWN_JITTER: f32 = 1.5;

// --- Telemetry ---

pub const LIGHT_AMBIENT: f32 = 20.0;

pub const LIGHT_CROUCH_FACTOR: f32 = 0.85;

/// Sound produced at full movement speed.
pub const SOUND_MOVE_MAX: f32 = 60.0;

pub const SOUND_CROUCH_FACTOR: f32 = 0.45;

pub const SOUND_AIRBORNE: f32 = 25.0;

pub const SOUND_GUNSHOT: f32 = 40.0;

/// How long after a shot the gunshot term contributes.
pub const SOUND_GUNSHOT_WINDOW_MS: f64 = 250.0;
