//! Item actions: use, give, destroy.

use super::{
    ActionContext, ActionError, ActionKind, ActionOutcome, ActionTransition, SkipReason,
    require_owned,
};
use crate::config::Systems;
use crate::state::{EntityId, ItemId, ItemKind};

/// Consume a consumable or toggle a piece of equipment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UseAction {
    pub item: ItemId,
}

impl ActionTransition for UseAction {
    fn kind(&self) -> ActionKind {
        ActionKind::Use
    }

    fn pre_validate(&self, actor: EntityId, ctx: &ActionContext<'_>) -> Result<(), ActionError> {
        require_owned(ctx, actor, self.item)
    }

    fn apply(&self, actor: EntityId, ctx: &mut ActionContext<'_>) -> Result<ActionOutcome, ActionError> {
        if !ctx.config.enabled(Systems::ITEM) {
            return Ok(ActionOutcome::Skipped(SkipReason::SystemDisabled));
        }

        let config = ctx.config;
        let resources = &config.resources;
        let equipment_enabled = config.enabled(Systems::EQUIPMENT);
        let entity = ctx.actor_mut(actor)?;
        let (kind, listed) = match entity.inventory.get(self.item) {
            Some(item) => (item.kind, item.is_listed()),
            None => {
                return Err(ActionError::ItemNotOwned {
                    actor,
                    item: self.item,
                });
            }
        };
        if listed {
            return Ok(ActionOutcome::Skipped(SkipReason::ItemListed));
        }

        if kind.is_consumable() {
            match kind {
                ItemKind::Ration => {
                    entity.food.increment(resources.ration_restore);
                    entity.water.increment(resources.ration_restore);
                }
                ItemKind::Poultice => entity.health.increment(resources.poultice_restore),
                _ => {}
            }
            let emptied = entity.inventory.get_mut(self.item).is_some_and(|item| {
                item.quantity = item.quantity.saturating_sub(1);
                item.quantity == 0
            });
            if emptied {
                entity.inventory.remove(self.item);
            }
            return Ok(ActionOutcome::Applied);
        }

        if kind.slot().is_none() {
            return Ok(ActionOutcome::Skipped(SkipReason::NotUsable));
        }
        if !equipment_enabled {
            return Ok(ActionOutcome::Skipped(SkipReason::SystemDisabled));
        }
        match entity.inventory.toggle_equip(self.item) {
            Some(_) => Ok(ActionOutcome::Applied),
            None => Ok(ActionOutcome::Skipped(SkipReason::NotUsable)),
        }
    }
}

/// Hand an item to an adjacent player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GiveAction {
    pub target: EntityId,
    pub item: ItemId,
}

impl ActionTransition for GiveAction {
    fn kind(&self) -> ActionKind {
        ActionKind::Give
    }

    fn pre_validate(&self, actor: EntityId, ctx: &ActionContext<'_>) -> Result<(), ActionError> {
        require_owned(ctx, actor, self.item)
    }

    fn apply(&self, actor: EntityId, ctx: &mut ActionContext<'_>) -> Result<ActionOutcome, ActionError> {
        if !ctx.config.enabled(Systems::ITEM) {
            return Ok(ActionOutcome::Skipped(SkipReason::SystemDisabled));
        }
        if self.target == actor {
            return Ok(ActionOutcome::Skipped(SkipReason::TargetIsSelf));
        }

        let from = ctx.actor(actor)?.position;
        let Some(target) = ctx.entities.get(self.target) else {
            return Ok(ActionOutcome::Skipped(SkipReason::TargetMissing));
        };
        if !target.is_alive() {
            return Ok(ActionOutcome::Skipped(SkipReason::TargetDead));
        }
        if target.is_npc() {
            return Ok(ActionOutcome::Skipped(SkipReason::TargetNotPlayer));
        }
        if from.distance(target.position) > 1 {
            return Ok(ActionOutcome::Skipped(SkipReason::OutOfReach));
        }
        if !target.inventory.has_space() {
            return Ok(ActionOutcome::Skipped(SkipReason::NoSpace));
        }

        ctx.exchange.unlist(ctx.entities, self.item);
        let mut item = ctx
            .actor_mut(actor)?
            .inventory
            .remove(self.item)
            .ok_or(ActionError::ItemNotOwned {
                actor,
                item: self.item,
            })?;
        item.listed_price = 0;

        let receiver = ctx
            .entities
            .get_mut(self.target)
            .ok_or(ActionError::ActorNotFound(self.target))?;
        if let Err(item) = receiver.inventory.receive(item) {
            ctx.actor_mut(actor)?
                .inventory
                .receive(item)
                .map_err(|item| ActionError::ItemLost { actor, item: item.id })?;
            return Ok(ActionOutcome::Skipped(SkipReason::NoSpace));
        }

        tracing::trace!(%actor, target = %self.target, item = %self.item, "gave");
        Ok(ActionOutcome::Applied)
    }
}

/// Permanently remove an item from the actor's inventory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DestroyAction {
    pub item: ItemId,
}

impl ActionTransition for DestroyAction {
    fn kind(&self) -> ActionKind {
        ActionKind::Destroy
    }

    fn pre_validate(&self, actor: EntityId, ctx: &ActionContext<'_>) -> Result<(), ActionError> {
        require_owned(ctx, actor, self.item)
    }

    fn apply(&self, actor: EntityId, ctx: &mut ActionContext<'_>) -> Result<ActionOutcome, ActionError> {
        if !ctx.config.enabled(Systems::ITEM) {
            return Ok(ActionOutcome::Skipped(SkipReason::SystemDisabled));
        }
        ctx.exchange.unlist(ctx.entities, self.item);
        ctx.actor_mut(actor)?.inventory.remove(self.item);
        Ok(ActionOutcome::Applied)
    }
}
