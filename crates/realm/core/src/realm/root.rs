//! State root: a SHA-256 commitment to the simulation state.

use sha2::{Digest, Sha256};

use crate::exchange::Exchange;
use crate::state::{EntityStore, Tick};

/// Hashes the tick, every entity (players then NPCs, ascending id) with its
/// inventory, and every active listing. Two realms with equal roots agree on
/// all state the step function reads.
pub fn state_root(tick: Tick, entities: &EntityStore, exchange: &Exchange) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(tick.0.to_le_bytes());

    for entity in entities.iter() {
        hasher.update(entity.id.0.to_le_bytes());
        hasher.update(entity.team.unwrap_or(u32::MAX).to_le_bytes());
        hasher.update(entity.position.row.to_le_bytes());
        hasher.update(entity.position.col.to_le_bytes());
        for meter in [entity.health, entity.food, entity.water] {
            hasher.update(meter.current.to_le_bytes());
            hasher.update(meter.maximum.to_le_bytes());
        }
        for (_, skill) in entity.skills.iter() {
            hasher.update(skill.exp.to_le_bytes());
        }
        hasher.update(entity.gold.to_le_bytes());
        hasher.update([u8::from(entity.alive), u8::from(entity.immortal)]);

        hasher.update((entity.inventory.len() as u32).to_le_bytes());
        for item in entity.inventory.iter() {
            hasher.update(item.id.0.to_le_bytes());
            hasher.update([item.kind as u8, item.level, u8::from(item.equipped)]);
            hasher.update(item.quantity.to_le_bytes());
            hasher.update(item.listed_price.to_le_bytes());
        }
    }

    for listing in exchange.listings() {
        hasher.update(listing.item.0.to_le_bytes());
        hasher.update(listing.seller.0.to_le_bytes());
        hasher.update(listing.price.to_le_bytes());
        hasher.update(listing.tick.0.to_le_bytes());
    }

    hasher.finalize().into()
}
