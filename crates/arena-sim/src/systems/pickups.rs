//! Intermission pickups: placement and collection.

use hecs::{Entity, World};

use arena_core::arena::ArenaMap;
use arena_core::components::{Pickup, Player};
use arena_core::constants::*;
use arena_core::enums::{PickupKind, WeaponKind};
use arena_core::events::SimEvent;
use arena_core::types::horizontal_distance;

use crate::session::Session;
use crate::world_setup::spawn_pickup;

/// Pickups offered at the intermission after the current round.
/// Health is always on offer; unlocks appear once their round is reached
/// and only while the weapon is still locked.
pub fn offer_for(session: &Session, player: &Player) -> Vec<PickupKind> {
    let mut offer = vec![PickupKind::Health];
    if session.global_round >= SHOTGUN_UNLOCK_ROUND
        && !player.loadout.is_unlocked(WeaponKind::Shotgun)
    {
        offer.push(PickupKind::UnlockShotgun);
    }
    if session.global_round >= SNIPER_UNLOCK_ROUND
        && !player.loadout.is_unlocked(WeaponKind::Sniper)
    {
        offer.push(PickupKind::UnlockSniper);
    }
    offer
}

/// Place the intermission offer on distinct pickup nodes, in node order.
/// Kinds beyond the available nodes are dropped.
pub fn spawn_intermission(
    world: &mut World,
    arena: &ArenaMap,
    session: &Session,
    player: &Player,
    next_pickup_id: &mut u32,
    events: &mut Vec<SimEvent>,
) -> usize {
    let offer = offer_for(session, player);
    if arena.pickup_nodes.len() < offer.len() {
        log::warn!(
            "floor {} has {} pickup nodes for {} pickups",
            arena.floor,
            arena.pickup_nodes.len(),
            offer.len()
        );
    }

    let mut placed = 0;
    for (kind, &position) in offer.into_iter().zip(arena.pickup_nodes.iter()) {
        let id = *next_pickup_id;
        *next_pickup_id += 1;
        spawn_pickup(world, Pickup { id, kind, position });
        log::debug!("pickup {id} {kind:?} at {position}");
        events.push(SimEvent::PickupSpawned { id, kind, position });
        placed += 1;
    }
    placed
}

/// Collect every pickup within reach of the player this tick.
pub fn collect(
    world: &mut World,
    player: &mut Player,
    events: &mut Vec<SimEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();

    let mut reached: Vec<(Entity, Pickup)> = world
        .query::<&Pickup>()
        .iter()
        .filter(|(_, p)| horizontal_distance(p.position, player.position) <= PICKUP_RADIUS)
        .map(|(entity, p)| (entity, *p))
        .collect();
    reached.sort_unstable_by_key(|(_, p)| p.id);

    for (entity, pickup) in reached {
        match pickup.kind.unlocks() {
            Some(weapon) => {
                if player.loadout.unlock(weapon) {
                    events.push(SimEvent::WeaponUnlocked { weapon });
                    events.push(SimEvent::Notice {
                        text: format!("{weapon} unlocked"),
                    });
                }
            }
            None => {
                let restored = player.heal(HEALTH_PICKUP_AMOUNT);
                events.push(SimEvent::Notice {
                    text: format!("+{restored} health"),
                });
            }
        }
        events.push(SimEvent::PickupCollected {
            id: pickup.id,
            kind: pickup.kind,
        });
        despawn_buffer.push(entity);
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
