//! Post-action per-entity updates: death fog and resource dynamics.
//!
//! Runs strictly after every action of the tick. Only players are updated.

use crate::combat::fog_damage;
use crate::config::{RealmConfig, Systems};
use crate::state::{Entity, EntityStore, Tick};

pub(crate) fn post_action_update(config: &RealmConfig, tick: Tick, entities: &mut EntityStore) {
    for player in entities.players_mut() {
        apply_death_fog(config, tick, player);
        if !player.is_alive() {
            continue;
        }
        if config.enabled(Systems::RESOURCE) {
            update_resources(config, player);
        }
    }
}

fn apply_death_fog(config: &RealmConfig, tick: Tick, player: &mut Entity) {
    let Some(start) = config.player.death_fog_start else {
        return;
    };
    let damage = fog_damage(
        &config.map,
        player.position,
        tick.0,
        start,
        config.player.death_fog_speed,
        config.player.death_fog_final_size,
    );
    if damage > 0 {
        player.receive_damage(damage);
    }
}

/// Food and water deplete each tick. An empty pool costs health; both pools
/// above half restore it.
fn update_resources(config: &RealmConfig, player: &mut Entity) {
    let resources = &config.resources;
    player.food.decrement(resources.depletion_rate);
    player.water.decrement(resources.depletion_rate);

    let mut loss = 0;
    if player.food.is_empty() {
        loss += resources.starvation_rate;
    }
    if player.water.is_empty() {
        loss += resources.dehydration_rate;
    }

    if loss > 0 {
        if !player.immortal {
            player.health.decrement(loss);
            if player.health.is_empty() {
                player.alive = false;
            }
        }
    } else if player.food.above_half() && player.water.above_half() {
        player.health.increment(resources.health_regen);
    }
}
