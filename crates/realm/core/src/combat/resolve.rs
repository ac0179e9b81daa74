//! Applies one attack to the entity store.

use super::damage::{calculate_damage, defense, offense, weakness_multiplier};
use crate::action::ActionContext;
use crate::config::Systems;
use crate::events::RealmEvent;
use crate::state::{CombatStyle, EntityId, EquipmentSlot};

/// What a resolved attack did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttackReport {
    pub damage: u32,
    pub killed: bool,
    /// Items moved from the defender into the attacker's inventory.
    pub looted: usize,
}

/// Resolves `attacker` hitting `target` with `style`.
///
/// Returns `None` without touching any state when either side is missing or
/// already dead. Otherwise, in order:
///
/// 1. one unit of equipped ammunition is consumed (equipment system)
/// 2. damage is computed from offense, defense and the weakness multiplier
/// 3. the attacker gains style experience and records inflicted damage
/// 4. the defender takes the damage; on death its inventory is looted
pub fn attack(
    ctx: &mut ActionContext<'_>,
    attacker: EntityId,
    target: EntityId,
    style: CombatStyle,
) -> Option<AttackReport> {
    ctx.entities.alive(attacker)?;
    ctx.entities.alive(target)?;

    if ctx.config.enabled(Systems::EQUIPMENT) {
        fire_ammunition(ctx, attacker);
    }

    let damage = {
        let source = ctx.entities.get(attacker)?;
        let defender = ctx.entities.get(target)?;
        let multiplier = weakness_multiplier(ctx.config, style, defender);
        let offense = offense(ctx.config, style, source);
        let defense = defense(ctx.config, defender);
        calculate_damage(ctx.formula, offense, defense, multiplier)
    };

    if let Some(source) = ctx.entities.get_mut(attacker) {
        source.history.damage_inflicted = source.history.damage_inflicted.saturating_add(damage);
        if ctx.config.enabled(Systems::PROGRESSION) {
            source
                .skills
                .add_exp(style.skill(), ctx.config.progression.combat_xp, &ctx.config.progression);
        }
    }

    ctx.events.push(
        ctx.tick,
        RealmEvent::Damage {
            attacker,
            target,
            style,
            amount: damage,
        },
    );

    let defender = ctx.entities.get_mut(target)?;
    defender.receive_damage(damage);
    if defender.is_alive() {
        return Some(AttackReport {
            damage,
            killed: false,
            looted: 0,
        });
    }

    let looted = if ctx.config.enabled(Systems::ITEM) {
        transfer_loot(ctx, target, attacker)
    } else {
        0
    };

    if target.is_player() {
        if let Some(source) = ctx.entities.get_mut(attacker) {
            source.history.player_kills += 1;
        }
    }

    tracing::debug!(%attacker, %target, style = style.as_str(), damage, looted, "kill");
    ctx.events.push(
        ctx.tick,
        RealmEvent::Kill {
            attacker,
            target,
            looted,
        },
    );

    Some(AttackReport {
        damage,
        killed: true,
        looted,
    })
}

/// Consumes one unit of the attacker's equipped ammunition, if any.
///
/// An emptied stack is unlisted and removed before damage is computed, so
/// the last round does not contribute offense.
fn fire_ammunition(ctx: &mut ActionContext<'_>, attacker: EntityId) {
    let Some(entity) = ctx.entities.get_mut(attacker) else {
        return;
    };
    let Some(ammunition) = entity
        .inventory
        .equipped_in(EquipmentSlot::Ammunition)
        .map(|item| item.id)
    else {
        return;
    };

    let emptied = match entity.inventory.get_mut(ammunition) {
        Some(item) => {
            item.quantity = item.quantity.saturating_sub(1);
            item.quantity == 0
        }
        None => false,
    };

    if emptied {
        ctx.exchange.unlist(ctx.entities, ammunition);
        if let Some(entity) = ctx.entities.get_mut(attacker) {
            entity.inventory.remove(ammunition);
        }
    }
}

/// Moves every non-empty item from `from` into `to` while `to` has space.
///
/// The dead entity's listings are withdrawn first. Items that do not fit are
/// destroyed together with their owner.
fn transfer_loot(ctx: &mut ActionContext<'_>, from: EntityId, to: EntityId) -> usize {
    ctx.exchange.unlist_seller(ctx.entities, from);

    let items = match ctx.entities.get_mut(from) {
        Some(entity) => entity.inventory.drain(),
        None => return 0,
    };
    let Some(receiver) = ctx.entities.get_mut(to) else {
        return 0;
    };

    let mut looted = 0;
    for mut item in items.into_iter().filter(|item| item.quantity > 0) {
        item.listed_price = 0;
        if receiver.inventory.receive(item).is_ok() {
            looted += 1;
        }
    }
    looted
}
