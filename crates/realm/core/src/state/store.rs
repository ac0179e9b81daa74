//! Entity store: the single owner of every live agent.

use std::collections::BTreeMap;

use super::{Entity, EntityId, Item, ItemId, ItemKind, Position};
use crate::config::RealmConfig;

/// Owns all live players and NPCs, keyed by [`EntityId`].
///
/// Both populations live in ordered maps so every iteration (snapshot
/// building, post-action updates, cull) visits entities in the same order on
/// every run. The store also owns the item instance counter; it is reset
/// together with the world, never shared globally.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityStore {
    players: BTreeMap<EntityId, Entity>,
    npcs: BTreeMap<EntityId, Entity>,
    next_player_id: i32,
    next_npc_id: i32,
    next_item_id: u32,
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            players: BTreeMap::new(),
            npcs: BTreeMap::new(),
            next_player_id: 1,
            next_npc_id: -1,
            next_item_id: 1,
        }
    }

    /// Drops every entity and rewinds all identifier counters.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Spawns a player on `team` and returns its identifier.
    pub fn spawn_player(&mut self, position: Position, team: u32, config: &RealmConfig) -> EntityId {
        let id = EntityId(self.next_player_id);
        self.next_player_id += 1;

        let entity = Entity::new(id, position, config)
            .with_team(team)
            .with_gold(config.player.starting_gold)
            .with_immortal(config.player.immortal);
        self.players.insert(id, entity);
        id
    }

    /// Spawns an NPC and returns its (negative) identifier.
    pub fn spawn_npc(&mut self, position: Position, config: &RealmConfig) -> EntityId {
        let id = EntityId(self.next_npc_id);
        self.next_npc_id -= 1;
        self.npcs.insert(id, Entity::new(id, position, config));
        id
    }

    /// Inserts a fully built entity, keeping the id counters ahead of it.
    ///
    /// Returns the entity previously stored under the same id, if any.
    pub fn insert(&mut self, entity: Entity) -> Option<Entity> {
        let id = entity.id;
        if id.is_npc() {
            self.next_npc_id = self.next_npc_id.min(id.0 - 1);
            self.npcs.insert(id, entity)
        } else {
            self.next_player_id = self.next_player_id.max(id.0 + 1);
            self.players.insert(id, entity)
        }
    }

    /// Allocates a fresh item instance. The caller places it in an inventory.
    pub fn create_item(&mut self, kind: ItemKind, level: u8, quantity: u32) -> Item {
        let id = ItemId(self.next_item_id);
        self.next_item_id += 1;
        Item::new(id, kind, level, quantity)
    }

    /// Looks up an entity. Returns `None` once it has been culled.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        if id.is_npc() {
            self.npcs.get(&id)
        } else {
            self.players.get(&id)
        }
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        if id.is_npc() {
            self.npcs.get_mut(&id)
        } else {
            self.players.get_mut(&id)
        }
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// Returns the entity only if it is still alive.
    pub fn alive(&self, id: EntityId) -> Option<&Entity> {
        self.get(id).filter(|entity| entity.is_alive())
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        if id.is_npc() {
            self.npcs.remove(&id)
        } else {
            self.players.remove(&id)
        }
    }

    /// Iterates players (ascending id) then NPCs (ascending id).
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.players.values().chain(self.npcs.values())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.players.values_mut().chain(self.npcs.values_mut())
    }

    pub fn players(&self) -> impl Iterator<Item = &Entity> {
        self.players.values()
    }

    pub fn players_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.players.values_mut()
    }

    pub fn npcs(&self) -> impl Iterator<Item = &Entity> {
        self.npcs.values()
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn npc_count(&self) -> usize {
        self.npcs.len()
    }

    pub fn len(&self) -> usize {
        self.players.len() + self.npcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live entity standing on `position`, if any.
    pub fn occupant(&self, position: Position) -> Option<EntityId> {
        self.iter()
            .find(|entity| entity.is_alive() && entity.position == position)
            .map(|entity| entity.id)
    }

    /// True if any live entity other than `except` stands on `position`.
    pub fn occupied(&self, position: Position, except: EntityId) -> bool {
        self.iter()
            .any(|entity| entity.id != except && entity.is_alive() && entity.position == position)
    }

    /// Finds the owner of an item by scanning inventories.
    pub fn owner_of(&self, item: ItemId) -> Option<EntityId> {
        self.iter()
            .find(|entity| entity.inventory.contains(item))
            .map(|entity| entity.id)
    }

    /// Removes every entity that is dead or at zero health.
    ///
    /// Returns the removed entities in iteration order (players, then NPCs).
    pub fn cull(&mut self) -> Vec<Entity> {
        let dead: Vec<EntityId> = self
            .iter()
            .filter(|entity| !entity.is_alive())
            .map(|entity| entity.id)
            .collect();

        dead.into_iter().filter_map(|id| self.remove(id)).collect()
    }
}
