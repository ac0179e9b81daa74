//! Sell listings with lazy FIFO expiry.

use std::collections::{BTreeMap, VecDeque};

use super::{ExchangeError, MarketSummary};
use crate::state::{EntityId, EntityStore, ItemId, ItemKind, Tick};

/// One active sale offer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Listing {
    pub item: ItemId,
    pub seller: EntityId,
    pub kind: ItemKind,
    pub level: u8,
    pub price: u32,
    /// Tick of the most recent `sell` for this item.
    pub tick: Tick,
}

/// Result of a purchase attempt.
///
/// Everything except `Purchased` is a silent no-op: no item, gold or listing
/// changed hands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BuyOutcome {
    Purchased { seller: EntityId, price: u32 },
    /// No active listing (never listed, sold, expired or withdrawn).
    NotListed,
    /// Stacks cannot be bought; only items with quantity exactly 1.
    QuantityStacked,
    NoSpace,
    InsufficientGold,
    OwnListing,
}

impl BuyOutcome {
    pub fn is_purchased(&self) -> bool {
        matches!(self, BuyOutcome::Purchased { .. })
    }
}

/// The order book.
///
/// Listings are indexed by item id; an item has at most one. The expiry
/// queue records `(item, tick)` for every `sell` call in call order and may
/// hold stale entries for items that were re-listed, sold or withdrawn.
/// Because sell ticks never decrease, the queue is sorted by tick and
/// [`Exchange::step`] can stop at the first unexpired head.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Exchange {
    listings: BTreeMap<ItemId, Listing>,
    queue: VecDeque<(ItemId, Tick)>,
}

impl Exchange {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.listings.clear();
        self.queue.clear();
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Entries in the expiry queue, stale ones included.
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    pub fn get(&self, item: ItemId) -> Option<&Listing> {
        self.listings.get(&item)
    }

    /// Active listings in item id order.
    pub fn listings(&self) -> impl Iterator<Item = &Listing> {
        self.listings.values()
    }

    /// Lists `item` from `seller`'s inventory at `price`.
    ///
    /// Re-listing an already listed item overwrites the listing and queues a
    /// fresh expiry entry; the old entry becomes stale. The item stays in the
    /// seller's inventory.
    pub fn sell(
        &mut self,
        entities: &mut EntityStore,
        seller: EntityId,
        item: ItemId,
        price: u32,
        tick: Tick,
    ) -> Result<(), ExchangeError> {
        if price == 0 {
            return Err(ExchangeError::ZeroPrice(item));
        }
        if let Some(&(_, newest)) = self.queue.back()
            && tick < newest
        {
            return Err(ExchangeError::NonMonotonicTick { tick, newest });
        }

        let owner = entities
            .get_mut(seller)
            .ok_or(ExchangeError::SellerNotFound(seller))?;
        let owned = owner
            .inventory
            .get_mut(item)
            .ok_or(ExchangeError::NotOwned { seller, item })?;
        if owned.quantity == 0 {
            return Err(ExchangeError::EmptyStack(item));
        }

        owned.listed_price = price;
        let listing = Listing {
            item,
            seller,
            kind: owned.kind,
            level: owned.level,
            price,
            tick,
        };
        self.listings.insert(item, listing);
        self.queue.push_back((item, tick));

        tracing::trace!(%seller, %item, price, tick = tick.0, "listed");
        Ok(())
    }

    /// Buys the listed `item` for `buyer`.
    ///
    /// Either the item moves seller to buyer and the price moves buyer to
    /// seller, or nothing changes. Precondition failures come back as
    /// [`BuyOutcome`]s; only a missing buyer or a listing that no longer
    /// matches the seller's inventory is an error.
    pub fn buy(
        &mut self,
        entities: &mut EntityStore,
        buyer: EntityId,
        item: ItemId,
    ) -> Result<BuyOutcome, ExchangeError> {
        let Some(listing) = self.listings.get(&item).copied() else {
            return Ok(BuyOutcome::NotListed);
        };
        if listing.seller == buyer {
            return Ok(BuyOutcome::OwnListing);
        }

        let purchaser = entities
            .get(buyer)
            .ok_or(ExchangeError::BuyerNotFound(buyer))?;
        let has_space = purchaser.inventory.has_space();
        let gold = purchaser.gold;

        let quantity = entities
            .get(listing.seller)
            .and_then(|seller| seller.inventory.get(item))
            .map(|owned| owned.quantity)
            .ok_or(ExchangeError::Inconsistent {
                item,
                reason: "listed item missing from seller inventory",
            })?;

        if quantity != 1 {
            return Ok(BuyOutcome::QuantityStacked);
        }
        if !has_space {
            return Ok(BuyOutcome::NoSpace);
        }
        if gold < listing.price {
            return Ok(BuyOutcome::InsufficientGold);
        }

        self.listings.remove(&item);
        let mut goods = entities
            .get_mut(listing.seller)
            .and_then(|seller| {
                let goods = seller.inventory.remove(item)?;
                seller.gold = seller.gold.saturating_add(listing.price);
                Some(goods)
            })
            .ok_or(ExchangeError::Inconsistent {
                item,
                reason: "listed item vanished during purchase",
            })?;
        goods.listed_price = 0;

        let purchaser = entities
            .get_mut(buyer)
            .ok_or(ExchangeError::BuyerNotFound(buyer))?;
        purchaser.gold -= listing.price;
        purchaser
            .inventory
            .receive(goods)
            .map_err(|_| ExchangeError::Inconsistent {
                item,
                reason: "buyer inventory filled during purchase",
            })?;

        tracing::trace!(%buyer, seller = %listing.seller, %item, price = listing.price, "purchased");
        Ok(BuyOutcome::Purchased {
            seller: listing.seller,
            price: listing.price,
        })
    }

    /// Evicts listings older than `duration` ticks at `current`.
    ///
    /// A listing expires once `current - listing_tick > duration`. Popped
    /// queue entries are re-checked against the live listing, which may have
    /// been refreshed by a later `sell` or already removed. Returns the
    /// expired item ids in queue order.
    pub fn step(&mut self, entities: &mut EntityStore, current: Tick, duration: u64) -> Vec<ItemId> {
        let mut expired = Vec::new();

        while let Some(&(item, queued_tick)) = self.queue.front() {
            if current.since(queued_tick) <= duration {
                break;
            }
            self.queue.pop_front();

            let live_expired = self
                .listings
                .get(&item)
                .is_some_and(|listing| current.since(listing.tick) > duration);
            if live_expired {
                self.unlist(entities, item);
                expired.push(item);
            }
        }

        if !expired.is_empty() {
            tracing::debug!(tick = current.0, count = expired.len(), "listings expired");
        }
        expired
    }

    /// Withdraws the listing for `item` and clears the item's price.
    pub fn unlist(&mut self, entities: &mut EntityStore, item: ItemId) -> Option<Listing> {
        let listing = self.listings.remove(&item)?;
        if let Some(owned) = entities
            .get_mut(listing.seller)
            .and_then(|seller| seller.inventory.get_mut(item))
        {
            owned.listed_price = 0;
        }
        Some(listing)
    }

    /// Withdraws every listing held by `seller`. Returns how many.
    pub fn unlist_seller(&mut self, entities: &mut EntityStore, seller: EntityId) -> usize {
        let items: Vec<ItemId> = self
            .listings
            .values()
            .filter(|listing| listing.seller == seller)
            .map(|listing| listing.item)
            .collect();
        for item in &items {
            self.unlist(entities, *item);
        }
        items.len()
    }

    /// Aggregated view of the book for observers.
    pub fn packet(&self, entities: &EntityStore) -> MarketSummary {
        MarketSummary::from_listings(self.listings(), entities)
    }

    /// Verifies `listed_price != 0` exactly when an active listing exists,
    /// and that every listing points at an item its seller still owns.
    pub fn check_invariants(&self, entities: &EntityStore) -> Result<(), ExchangeError> {
        for listing in self.listings.values() {
            let owned = entities
                .get(listing.seller)
                .and_then(|seller| seller.inventory.get(listing.item))
                .ok_or(ExchangeError::Inconsistent {
                    item: listing.item,
                    reason: "listing without owned item",
                })?;
            if owned.listed_price != listing.price || owned.listed_price == 0 {
                return Err(ExchangeError::Inconsistent {
                    item: listing.item,
                    reason: "listed price does not match listing",
                });
            }
        }

        for entity in entities.iter() {
            for item in entity.inventory.iter() {
                let listed = self
                    .listings
                    .get(&item.id)
                    .is_some_and(|listing| listing.seller == entity.id);
                if item.is_listed() != listed {
                    return Err(ExchangeError::Inconsistent {
                        item: item.id,
                        reason: "item price set without listing",
                    });
                }
            }
        }
        Ok(())
    }
}
