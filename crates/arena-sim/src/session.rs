//! Per-session progression: floor and round counters, kill tally, and the
//! per-floor difficulty curve.

use arena_core::constants::*;

/// Progression counters for one play session. Reset on game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub floor: u32,
    pub round_in_arena: u32,
    pub global_round: u32,
    pub kills: u32,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            floor: 1,
            round_in_arena: 1,
            global_round: 1,
            kills: 0,
        }
    }
}

impl Session {
    /// Enemies to spawn for the current round.
    pub fn enemy_count(&self) -> u32 {
        enemy_count_for(self.global_round, self.floor)
    }

    pub fn scaling(&self) -> FloorScaling {
        FloorScaling::for_floor(self.floor)
    }

    /// Whether the current round is the last one in this arena.
    pub fn arena_complete(&self, rounds_per_arena: u32) -> bool {
        self.round_in_arena >= rounds_per_arena
    }

    /// Next round in the same arena.
    pub fn advance_round(&mut self) {
        self.round_in_arena += 1;
        self.global_round += 1;
    }

    /// Round 1 of the next floor. The global round keeps counting.
    pub fn advance_floor(&mut self) {
        self.floor += 1;
        self.round_in_arena = 1;
        self.global_round += 1;
    }
}

/// `5 + floor(global_round × 1.5) + floor((floor − 1) × 0.8)`.
pub fn enemy_count_for(global_round: u32, floor: u32) -> u32 {
    let per_round = (global_round as f64 * ENEMIES_PER_GLOBAL_ROUND).floor() as u32;
    let per_floor = (floor.saturating_sub(1) as f64 * ENEMIES_PER_FLOOR).floor() as u32;
    BASE_ENEMY_COUNT + per_round + per_floor
}

/// Linear per-floor multipliers applied to enemy stats at spawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorScaling {
    pub health: f64,
    pub damage: f64,
    pub speed: f64,
}

impl FloorScaling {
    pub fn for_floor(floor: u32) -> Self {
        let steps = floor.saturating_sub(1) as f64;
        Self {
            health: 1.0 + FLOOR_HEALTH_SCALE * steps,
            damage: 1.0 + FLOOR_DAMAGE_SCALE * steps,
            speed: 1.0 + FLOOR_SPEED_SCALE * steps,
        }
    }

    /// Scaled and floored, never below `MIN_SCALED_HEALTH`.
    pub fn scaled_health(&self, base: i32) -> i32 {
        // Small epsilon so 100 × 1.45 lands on 145 rather than 144.999...
        let scaled = (base as f64 * self.health + 1e-9).floor() as i32;
        scaled.max(MIN_SCALED_HEALTH)
    }

    pub fn scaled_damage(&self, base: i32) -> i32 {
        (base as f64 * self.damage + 1e-9).floor().max(0.0) as i32
    }

    pub fn scaled_speed(&self, base: f32) -> f32 {
        (base as f64 * self.speed) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enemy_count_first_round() {
        assert_eq!(enemy_count_for(1, 1), 6);
    }

    #[test]
    fn test_floor_two_adds_nothing_below_whole_enemy() {
        assert_eq!(enemy_count_for(3, 1), enemy_count_for(3, 2));
        assert_eq!(enemy_count_for(3, 3), enemy_count_for(3, 1) + 1);
    }

    #[test]
    fn test_enemy_count_round_three_floor_two() {
        // 5 + floor(4.5) + floor(0.8)
        assert_eq!(enemy_count_for(3, 2), 9);
    }

    #[test]
    fn test_floor_four_multipliers() {
        let scaling = FloorScaling::for_floor(4);
        assert!((scaling.health - 1.45).abs() < 1e-9);
        assert!((scaling.damage - 1.3).abs() < 1e-9);
        assert!((scaling.speed - 1.15).abs() < 1e-9);

        assert_eq!(scaling.scaled_health(100), 145);
        assert_eq!(scaling.scaled_damage(10), 13);
        assert_eq!(scaling.scaled_damage(8), 10);
        assert!((scaling.scaled_speed(4.0) - 4.6).abs() < 1e-5);
    }

    #[test]
    fn test_health_minimum() {
        let scaling = FloorScaling::for_floor(1);
        assert_eq!(scaling.scaled_health(10), MIN_SCALED_HEALTH);
        assert_eq!(scaling.scaled_health(100), 100);
    }

    #[test]
    fn test_advance_floor_resets_round_in_arena() {
        let mut s = Session::default();
        s.advance_round();
        s.advance_round();
        assert!(s.arena_complete(3));
        s.advance_floor();
        assert_eq!(s.floor, 2);
        assert_eq!(s.round_in_arena, 1);
        assert_eq!(s.global_round, 4);
    }
}
