//! Player vs entity collision
//!
//! Everything is a circle; two circles touch when the distance between centres
//! is less than the sum of their radii.

use super::catalog::{HazardType, PickupType};
use super::player::Player;
use super::spawner::Entity;
use crate::circles_overlap;

#[inline]
fn touches<T: super::catalog::CatalogEntry>(player: &Player, entity: &Entity<T>) -> bool {
    circles_overlap(player.pos, player.radius, entity.pos, entity.radius())
}

/// Whether any hazard overlaps the player. Hazards are never consumed.
pub fn hazard_contact(player: &Player, hazards: &[Entity<HazardType>]) -> bool {
    hazards.iter().any(|h| touches(player, h))
}

/// Remove and return the first overlapping pickup (collection order), if any
pub fn collect_pickup(
    player: &Player,
    pickups: &mut Vec<Entity<PickupType>>,
) -> Option<PickupType> {
    let index = pickups.iter().position(|p| touches(player, p))?;
    Some(pickups.remove(index).def)
}
