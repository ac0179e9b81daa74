//! Aggregated market view published with each tick snapshot.

use std::collections::BTreeMap;

use super::Listing;
use crate::state::{EntityStore, ItemKind};

/// Price statistics for one `(kind, level)` bucket.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketEntry {
    pub kind: ItemKind,
    pub level: u8,
    pub min_price: u32,
    pub max_price: u32,
    pub mean_price: f32,
    /// Total quantity on offer across all listings in the bucket.
    pub supply: u32,
    pub listings: usize,
}

/// Per `(kind, level)` summary of the active listings, sorted by key.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketSummary {
    pub entries: Vec<MarketEntry>,
}

impl MarketSummary {
    pub(super) fn from_listings<'a>(
        listings: impl Iterator<Item = &'a Listing>,
        entities: &EntityStore,
    ) -> Self {
        #[derive(Default)]
        struct Acc {
            min: u32,
            max: u32,
            total: u64,
            supply: u32,
            count: usize,
        }

        let mut buckets: BTreeMap<(ItemKind, u8), Acc> = BTreeMap::new();
        for listing in listings {
            let quantity = entities
                .get(listing.seller)
                .and_then(|seller| seller.inventory.get(listing.item))
                .map_or(0, |item| item.quantity);

            let acc = buckets.entry((listing.kind, listing.level)).or_default();
            if acc.count == 0 {
                acc.min = listing.price;
                acc.max = listing.price;
            } else {
                acc.min = acc.min.min(listing.price);
                acc.max = acc.max.max(listing.price);
            }
            acc.total += u64::from(listing.price);
            acc.supply = acc.supply.saturating_add(quantity);
            acc.count += 1;
        }

        let entries = buckets
            .into_iter()
            .map(|((kind, level), acc)| MarketEntry {
                kind,
                level,
                min_price: acc.min,
                max_price: acc.max,
                mean_price: acc.total as f32 / acc.count as f32,
                supply: acc.supply,
                listings: acc.count,
            })
            .collect();

        Self { entries }
    }

    pub fn get(&self, kind: ItemKind, level: u8) -> Option<&MarketEntry> {
        self.entries
            .iter()
            .find(|entry| entry.kind == kind && entry.level == level)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::RealmConfig;
    use crate::exchange::Exchange;
    use crate::state::{EntityStore, ItemKind, Position, Tick};

    #[test]
    fn buckets_by_kind_and_level() {
        let config = RealmConfig::default();
        let mut entities = EntityStore::new();
        let seller = entities.spawn_player(Position::new(20, 20), 0, &config);
        let mut exchange = Exchange::new();

        for (kind, level, quantity, price) in [
            (ItemKind::Hat, 1, 1, 10),
            (ItemKind::Hat, 1, 1, 30),
            (ItemKind::Hat, 2, 1, 50),
            (ItemKind::Shard, 1, 20, 4),
        ] {
            let item = entities.create_item(kind, level, quantity);
            let id = item.id;
            entities.get_mut(seller).unwrap().inventory.receive(item).unwrap();
            exchange.sell(&mut entities, seller, id, price, Tick(0)).unwrap();
        }

        let summary = exchange.packet(&entities);
        assert_eq!(summary.entries.len(), 3);

        let hats = summary.get(ItemKind::Hat, 1).unwrap();
        assert_eq!((hats.min_price, hats.max_price), (10, 30));
        assert_eq!(hats.mean_price, 20.0);
        assert_eq!(hats.supply, 2);

        assert_eq!(summary.get(ItemKind::Shard, 1).map(|e| e.supply), Some(20));
        assert!(summary.get(ItemKind::Hat, 3).is_none());
    }
}
