#[cfg(test)]
mod tests {
    use glam::Vec3;

    use crate::commands::{InputIntent, PlayerCommand};
    use crate::config::SimConfig;
    use crate::constants::*;
    use crate::enums::*;
    use crate::error::{ConfigError, WeaponError};
    use crate::events::SimEvent;
    use crate::types::{horizontal_distance, yaw_forward, yaw_towards, Aabb, SimTime};

    #[test]
    fn test_config_partial_override() {
        let config = SimConfig::from_json_str(r#"{"seed": 7, "ai": {"detection_range": 30.0}}"#)
            .unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.ai.detection_range, 30.0);
        // Untouched values keep their defaults.
        assert_eq!(config.ai.los_tolerance, AI_LOS_TOLERANCE);
        assert_eq!(config.rounds_per_arena, ROUNDS_PER_ARENA);
    }

    #[test]
    fn test_config_rejects_zero_rounds() {
        let err = SimConfig::from_json_str(r#"{"rounds_per_arena": 0}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "rounds_per_arena",
                ..
            }
        ));
    }

    #[test]
    fn test_config_rejects_malformed_json() {
        let err = SimConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_command_wire_format() {
        let json = serde_json::to_string(&PlayerCommand::SwitchWeapon {
            weapon: "shotgun".into(),
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"SwitchWeapon","weapon":"shotgun"}"#);

        let back: PlayerCommand = serde_json::from_str(r#"{"type":"StartGame"}"#).unwrap();
        assert_eq!(back, PlayerCommand::StartGame);
    }

    #[test]
    fn test_event_tagged_by_type() {
        let json = serde_json::to_value(SimEvent::PlayerHit {
            damage: 8,
            health: 92,
        })
        .unwrap();
        assert_eq!(json["type"], "PlayerHit");
        assert_eq!(json["health"], 92);
    }

    #[test]
    fn test_weapon_kind_parse() {
        assert_eq!("Shotgun".parse::<WeaponKind>(), Ok(WeaponKind::Shotgun));
        assert_eq!(" sniper ".parse::<WeaponKind>(), Ok(WeaponKind::Sniper));
        assert_eq!(
            "bfg".parse::<WeaponKind>(),
            Err(WeaponError::Unknown("bfg".into()))
        );
    }

    #[test]
    fn test_aabb_clamp_horizontal() {
        let b = Aabb::new(Vec3::new(-10.0, 0.0, -10.0), Vec3::new(10.0, 5.0, 10.0));
        let p = b.clamp_horizontal(Vec3::new(25.0, 3.0, -40.0), 1.0);
        assert_eq!(p, Vec3::new(9.0, 3.0, -9.0));
        assert!(b.contains(Vec3::new(0.0, 1.0, 0.0)));
        assert!(!b.contains(Vec3::new(0.0, 6.0, 0.0)));
        assert!(b.contains_horizontal(Vec3::new(0.0, 60.0, 0.0)));
    }

    #[test]
    fn test_horizontal_distance_ignores_height() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(3.0, 50.0, 4.0);
        assert!((horizontal_distance(a, b) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_yaw_round_trip() {
        let from = Vec3::ZERO;
        let to = Vec3::new(5.0, 0.0, 5.0);
        let fwd = yaw_forward(yaw_towards(from, to));
        let expected = (to - from).normalize();
        assert!(fwd.distance(expected) < 1e-5);
    }

    #[test]
    fn test_sim_time_advance() {
        let mut t = SimTime::default();
        for _ in 0..60 {
            t.advance(DT);
        }
        assert_eq!(t.tick, 60);
        assert!((t.elapsed_secs - 1.0).abs() < 1e-9);
        assert!((t.now_ms() - 1000.0).abs() < 1e-6);
    }

    #[test]
    fn test_wish_direction() {
        let intent = InputIntent {
            forward: true,
            right: true,
            ..Default::default()
        };
        let wish = intent.wish_direction(Vec3::Z);
        assert!((wish.length() - 1.0).abs() < 1e-6);
        assert!(wish.z > 0.0);
        // Looking down +Z with +Y up, right is -X.
        assert!(wish.x < 0.0);

        let cancel = InputIntent {
            forward: true,
            back: true,
            ..Default::default()
        };
        assert_eq!(cancel.wish_direction(Vec3::Z), Vec3::ZERO);
    }

    #[test]
    fn test_player_input_gating() {
        assert!(!GamePhase::Idle.accepts_player_input());
        assert!(!GamePhase::GameOver.accepts_player_input());
        assert!(GamePhase::Combat.accepts_player_input());
        assert!(GamePhase::Intermission.accepts_player_input());
    }
}
