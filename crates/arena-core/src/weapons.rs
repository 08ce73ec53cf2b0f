//! Weapon profiles and the player's loadout.

use serde::{Deserialize, Serialize};

use crate::enums::WeaponKind;
use crate::error::WeaponError;

/// Immutable weapon configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponProfile {
    /// Damage per projectile (per pellet for the shotgun).
    pub damage: i32,
    /// Minimum milliseconds between activations.
    pub fire_interval_ms: f64,
    pub range: f32,
    pub magazine: u32,
    /// Per-axis uniform jitter applied to the aim direction.
    pub spread: f32,
    /// Projectiles per activation.
    pub pellets: u32,
    /// Projectile speed in units per tick.
    pub projectile_speed: f32,
}

impl WeaponProfile {
    pub fn for_kind(kind: WeaponKind) -> Self {
        match kind {
            WeaponKind::Rifle => Self {
                damage: 25,
                fire_interval_ms: 140.0,
                range: 100.0,
                magazine: 30,
                spread: 0.012,
                pellets: 1,
                projectile_speed: 2.5,
            },
            WeaponKind::Shotgun => Self {
                damage: 14,
                fire_interval_ms: 750.0,
                range: 35.0,
                magazine: 6,
                spread: 0.09,
                pellets: 8,
                projectile_speed: 2.0,
            },
            WeaponKind::Sniper => Self {
                damage: 95,
                fire_interval_ms: 1200.0,
                range: 180.0,
                magazine: 5,
                spread: 0.002,
                pellets: 1,
                projectile_speed: 4.0,
            },
        }
    }
}

/// Player weapons: active selection, unlocks and per-weapon ammo.
///
/// Ammo survives weapon switches for the whole session and is reset only by
/// `Loadout::default()` on game over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loadout {
    pub active: WeaponKind,
    unlocked: [bool; 3],
    ammo: [u32; 3],
}

impl Default for Loadout {
    fn default() -> Self {
        let mut ammo = [0; 3];
        for kind in WeaponKind::ALL {
            ammo[kind.index()] = WeaponProfile::for_kind(kind).magazine;
        }
        Self {
            active: WeaponKind::Rifle,
            unlocked: [true, false, false],
            ammo,
        }
    }
}

impl Loadout {
    pub fn is_unlocked(&self, kind: WeaponKind) -> bool {
        self.unlocked[kind.index()]
    }

    /// Permanently enable a weapon. Returns false if it already was.
    pub fn unlock(&mut self, kind: WeaponKind) -> bool {
        let slot = &mut self.unlocked[kind.index()];
        let newly = !*slot;
        *slot = true;
        newly
    }

    pub fn ammo(&self, kind: WeaponKind) -> u32 {
        self.ammo[kind.index()]
    }

    pub fn active_ammo(&self) -> u32 {
        self.ammo(self.active)
    }

    pub fn active_profile(&self) -> WeaponProfile {
        WeaponProfile::for_kind(self.active)
    }

    /// Switch to a weapon by name. Unknown or locked weapons are rejected
    /// and leave the loadout untouched. Returns whether the active weapon changed.
    pub fn switch_to(&mut self, name: &str) -> Result<bool, WeaponError> {
        let kind: WeaponKind = name.parse()?;
        if !self.is_unlocked(kind) {
            return Err(WeaponError::Locked(kind));
        }
        let changed = self.active != kind;
        self.active = kind;
        Ok(changed)
    }

    /// Consume one round from the active weapon. Returns false when empty.
    pub fn consume_round(&mut self) -> bool {
        let ammo = &mut self.ammo[self.active.index()];
        if *ammo == 0 {
            return false;
        }
        *ammo -= 1;
        true
    }

    /// Refill the active weapon to capacity. Returns false (no-op) when full.
    pub fn reload(&mut self) -> bool {
        let magazine = self.active_profile().magazine;
        let ammo = &mut self.ammo[self.active.index()];
        if *ammo >= magazine {
            return false;
        }
        *ammo = magazine;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_loadout_only_rifle() {
        let loadout = Loadout::default();
        assert_eq!(loadout.active, WeaponKind::Rifle);
        assert!(loadout.is_unlocked(WeaponKind::Rifle));
        assert!(!loadout.is_unlocked(WeaponKind::Shotgun));
        assert!(!loadout.is_unlocked(WeaponKind::Sniper));
        assert_eq!(loadout.active_ammo(), 30);
    }

    #[test]
    fn test_switch_to_locked_sniper_rejected() {
        let mut loadout = Loadout::default();
        let err = loadout.switch_to("sniper").unwrap_err();
        assert_eq!(err, WeaponError::Locked(WeaponKind::Sniper));
        assert_eq!(loadout.active, WeaponKind::Rifle);
    }

    #[test]
    fn test_switch_to_unknown_rejected() {
        let mut loadout = Loadout::default();
        let err = loadout.switch_to("railgun").unwrap_err();
        assert_eq!(err, WeaponError::Unknown("railgun".into()));
        assert_eq!(loadout.active, WeaponKind::Rifle);
    }

    #[test]
    fn test_ammo_persists_across_switch() {
        let mut loadout = Loadout::default();
        loadout.unlock(WeaponKind::Shotgun);
        assert!(loadout.consume_round());
        assert!(loadout.consume_round());
        assert_eq!(loadout.switch_to("shotgun"), Ok(true));
        assert!(loadout.consume_round());
        assert_eq!(loadout.switch_to("rifle"), Ok(true));
        assert_eq!(loadout.active_ammo(), 28);
        assert_eq!(loadout.ammo(WeaponKind::Shotgun), 5);
    }

    #[test]
    fn test_reload_when_full_is_noop() {
        let mut loadout = Loadout::default();
        let before = loadout.active_ammo();
        assert!(!loadout.reload());
        assert_eq!(loadout.active_ammo(), before);
    }

    #[test]
    fn test_reload_refills_to_magazine() {
        let mut loadout = Loadout::default();
        for _ in 0..7 {
            loadout.consume_round();
        }
        assert!(loadout.reload());
        assert_eq!(loadout.active_ammo(), 30);
    }

    #[test]
    fn test_consume_never_negative() {
        let mut loadout = Loadout::default();
        for _ in 0..40 {
            loadout.consume_round();
        }
        assert_eq!(loadout.active_ammo(), 0);
        assert!(!loadout.consume_round());
    }
}
