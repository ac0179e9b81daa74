use super::{
    ActionContext, ActionError, ActionKind, ActionOutcome, ActionTransition, SkipReason,
    require_owned,
};
use crate::config::Systems;
use crate::events::RealmEvent;
use crate::exchange::BuyOutcome;
use crate::state::{EntityId, ItemId};

/// Offer an owned, unequipped item on the exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SellAction {
    pub item: ItemId,
    pub price: u32,
}

impl ActionTransition for SellAction {
    fn kind(&self) -> ActionKind {
        ActionKind::Sell
    }

    fn pre_validate(&self, actor: EntityId, ctx: &ActionContext<'_>) -> Result<(), ActionError> {
        require_owned(ctx, actor, self.item)
    }

    fn apply(&self, actor: EntityId, ctx: &mut ActionContext<'_>) -> Result<ActionOutcome, ActionError> {
        if !ctx.config.enabled(Systems::EXCHANGE) {
            return Ok(ActionOutcome::Skipped(SkipReason::SystemDisabled));
        }
        let equipped = ctx
            .actor(actor)?
            .inventory
            .get(self.item)
            .is_some_and(|item| item.equipped);
        if equipped {
            return Ok(ActionOutcome::Skipped(SkipReason::ItemEquipped));
        }

        ctx.exchange
            .sell(ctx.entities, actor, self.item, self.price, ctx.tick)?;

        if let Some(listing) = ctx.exchange.get(self.item) {
            ctx.events.push(
                ctx.tick,
                RealmEvent::Listed {
                    seller: actor,
                    item: self.item,
                    kind: listing.kind,
                    level: listing.level,
                    price: self.price,
                },
            );
        }
        Ok(ActionOutcome::Applied)
    }
}

/// Buy a listed item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuyAction {
    pub item: ItemId,
}

impl ActionTransition for BuyAction {
    fn kind(&self) -> ActionKind {
        ActionKind::Buy
    }

    fn apply(&self, actor: EntityId, ctx: &mut ActionContext<'_>) -> Result<ActionOutcome, ActionError> {
        if !ctx.config.enabled(Systems::EXCHANGE) {
            return Ok(ActionOutcome::Skipped(SkipReason::SystemDisabled));
        }

        let kind = ctx.exchange.get(self.item).map(|listing| listing.kind);
        let outcome = ctx.exchange.buy(ctx.entities, actor, self.item)?;
        if let (BuyOutcome::Purchased { seller, price }, Some(kind)) = (outcome, kind) {
            ctx.events.push(
                ctx.tick,
                RealmEvent::Purchased {
                    buyer: actor,
                    seller,
                    item: self.item,
                    kind,
                    price,
                },
            );
        }
        Ok(ActionOutcome::Traded(outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::combat::LinearDamage;
    use crate::config::RealmConfig;
    use crate::env::OpenMap;
    use crate::events::EventLog;
    use crate::exchange::{Exchange, ExchangeError};
    use crate::state::{EntityStore, ItemKind, Position, Tick};

    fn run(
        config: &RealmConfig,
        entities: &mut EntityStore,
        exchange: &mut Exchange,
        events: &mut EventLog,
        actor: EntityId,
        action: impl Into<Action>,
    ) -> Result<ActionOutcome, ActionError> {
        let map = OpenMap::new(&config.map);
        let mut ctx = ActionContext {
            tick: Tick(1),
            config,
            formula: &LinearDamage,
            map: &map,
            entities,
            exchange,
            events,
        };
        action.into().execute(actor, &mut ctx)
    }

    #[test]
    fn sell_then_buy_emits_events() {
        let config = RealmConfig::default();
        let mut entities = EntityStore::new();
        let mut exchange = Exchange::new();
        let mut events = EventLog::new();
        let seller = entities.spawn_player(Position::new(20, 20), 0, &config);
        let buyer = entities.spawn_player(Position::new(30, 30), 1, &config);
        entities.get_mut(buyer).unwrap().gold = 10;
        let hat = entities.create_item(ItemKind::Hat, 2, 1);
        let hat_id = hat.id;
        entities.get_mut(seller).unwrap().inventory.receive(hat).unwrap();

        let sold = run(
            &config,
            &mut entities,
            &mut exchange,
            &mut events,
            seller,
            SellAction {
                item: hat_id,
                price: 7,
            },
        );
        assert_eq!(sold, Ok(ActionOutcome::Applied));

        let bought = run(
            &config,
            &mut entities,
            &mut exchange,
            &mut events,
            buyer,
            BuyAction { item: hat_id },
        );
        assert_eq!(
            bought,
            Ok(ActionOutcome::Traded(BuyOutcome::Purchased { seller, price: 7 }))
        );

        let categories: Vec<&str> = events.iter().map(|(_, e)| e.category()).collect();
        assert_eq!(categories, vec!["listed", "purchased"]);
    }

    #[test]
    fn equipped_items_are_not_sold_and_zero_price_is_rejected() {
        let config = RealmConfig::default();
        let mut entities = EntityStore::new();
        let mut exchange = Exchange::new();
        let mut events = EventLog::new();
        let seller = entities.spawn_player(Position::new(20, 20), 0, &config);
        let hat = entities.create_item(ItemKind::Hat, 1, 1);
        let top = entities.create_item(ItemKind::Top, 1, 1);
        let (hat_id, top_id) = (hat.id, top.id);
        let owner = entities.get_mut(seller).unwrap();
        owner.inventory.receive(hat).unwrap();
        owner.inventory.receive(top).unwrap();
        owner.inventory.toggle_equip(hat_id);

        let equipped = run(
            &config,
            &mut entities,
            &mut exchange,
            &mut events,
            seller,
            SellAction {
                item: hat_id,
                price: 3,
            },
        );
        assert_eq!(equipped, Ok(ActionOutcome::Skipped(SkipReason::ItemEquipped)));

        let free = run(
            &config,
            &mut entities,
            &mut exchange,
            &mut events,
            seller,
            SellAction {
                item: top_id,
                price: 0,
            },
        );
        assert_eq!(
            free,
            Err(ActionError::Exchange(ExchangeError::ZeroPrice(top_id)))
        );
        assert!(exchange.is_empty());
    }
}
