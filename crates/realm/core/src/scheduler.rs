//! Action scheduler: priority buckets with a seeded shuffle per bucket.

use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;
use rand::seq::SliceRandom;

use crate::action::{Action, ActionContext, ActionOutcome, Intents, SkipReason};
use crate::realm::StepError;
use crate::state::{EntityId, EntityStore, ItemId};

/// Counters for one tick's execution pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecutionSummary {
    /// Actions that changed state.
    pub executed: usize,
    /// Actions that ran but were no-ops (out of reach, blocked, ...).
    pub no_ops: usize,
    /// Actions dropped because their actor died earlier in the tick.
    pub dead_actors: usize,
}

/// Merges intents from every submitter into priority buckets.
///
/// Buckets hold `(actor, action)` pairs in submission order until
/// [`ActionScheduler::execute`] shuffles and drains them.
#[derive(Clone, Debug, Default)]
pub struct ActionScheduler {
    buckets: BTreeMap<u8, Vec<(EntityId, Action)>>,
}

impl ActionScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends every action of every entity in `intents` to its bucket.
    pub fn submit(&mut self, intents: &Intents) {
        for (&actor, set) in intents {
            for action in set.iter() {
                self.buckets
                    .entry(action.priority())
                    .or_default()
                    .push((actor, action.clone()));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pending buckets in execution order.
    pub fn buckets(&self) -> impl Iterator<Item = (u8, &[(EntityId, Action)])> {
        self.buckets
            .iter()
            .map(|(priority, bucket)| (*priority, bucket.as_slice()))
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
    }

    /// Executes every pending action and empties the scheduler.
    ///
    /// Buckets run in ascending priority. Each bucket is shuffled with `rng`
    /// right before it runs, then executed sequentially against the live
    /// state. Actions whose actor is no longer alive are skipped, as are
    /// item actions whose item the actor held at the start of the pass but
    /// lost to an earlier action. The first [`crate::ActionError`] aborts
    /// the pass.
    pub fn execute<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        ctx: &mut ActionContext<'_>,
    ) -> Result<ExecutionSummary, StepError> {
        let mut summary = ExecutionSummary::default();
        let held = self.held_items(ctx.entities);

        for (priority, mut bucket) in std::mem::take(&mut self.buckets) {
            bucket.shuffle(rng);
            tracing::trace!(priority, size = bucket.len(), "executing bucket");

            for (actor, action) in bucket {
                if ctx.entities.alive(actor).is_none() {
                    tracing::trace!(%actor, kind = action.kind().as_str(), "actor gone, skipping");
                    summary.dead_actors += 1;
                    continue;
                }

                let outcome = if lost_item(&held, ctx.entities, actor, &action) {
                    ActionOutcome::Skipped(SkipReason::ItemGone)
                } else {
                    action
                        .execute(actor, ctx)
                        .map_err(|error| StepError::Action {
                            actor,
                            kind: action.kind(),
                            error,
                        })?
                };

                match outcome {
                    ActionOutcome::Skipped(reason) => {
                        let reason: &'static str = reason.into();
                        tracing::trace!(%actor, kind = action.kind().as_str(), reason, "no-op");
                        summary.no_ops += 1;
                    }
                    _ => summary.executed += 1,
                }
            }
        }

        Ok(summary)
    }

    /// `(actor, item)` pairs named by pending item actions that the actor
    /// currently holds.
    fn held_items(&self, entities: &EntityStore) -> BTreeSet<(EntityId, ItemId)> {
        self.buckets
            .values()
            .flatten()
            .filter_map(|(actor, action)| Some((*actor, action.owned_item()?)))
            .filter(|&(actor, item)| {
                entities
                    .get(actor)
                    .is_some_and(|entity| entity.inventory.contains(item))
            })
            .collect()
    }
}

fn lost_item(
    held: &BTreeSet<(EntityId, ItemId)>,
    entities: &EntityStore,
    actor: EntityId,
    action: &Action,
) -> bool {
    action.owned_item().is_some_and(|item| {
        held.contains(&(actor, item))
            && !entities
                .get(actor)
                .is_some_and(|entity| entity.inventory.contains(item))
    })
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::action::{
        ActionSet, AttackAction, DestroyAction, GiveAction, MoveAction, SellAction, UseAction,
    };
    use crate::combat::LinearDamage;
    use crate::config::RealmConfig;
    use crate::env::OpenMap;
    use crate::events::EventLog;
    use crate::exchange::Exchange;
    use crate::state::{CombatStyle, Direction, EntityStore, ItemId, ItemKind, Position, Tick};

    struct Bench {
        config: RealmConfig,
        map: OpenMap,
        entities: EntityStore,
        exchange: Exchange,
        events: EventLog,
    }

    impl Bench {
        fn new() -> Self {
            let config = RealmConfig::default();
            Self {
                map: OpenMap::new(&config.map),
                config,
                entities: EntityStore::new(),
                exchange: Exchange::new(),
                events: EventLog::new(),
            }
        }

        fn player(&mut self, row: i32, col: i32, team: u32) -> EntityId {
            self.entities
                .spawn_player(Position::new(row, col), team, &self.config)
        }

        fn hand(&mut self, owner: EntityId, kind: ItemKind, quantity: u32) -> ItemId {
            let item = self.entities.create_item(kind, 1, quantity);
            let id = item.id;
            self.entities
                .get_mut(owner)
                .unwrap()
                .inventory
                .receive(item)
                .unwrap();
            id
        }

        fn run(&mut self, intents: &Intents, seed: u64) -> Result<ExecutionSummary, StepError> {
            let mut scheduler = ActionScheduler::new();
            scheduler.submit(intents);
            let mut ctx = ActionContext {
                tick: Tick(0),
                config: &self.config,
                formula: &LinearDamage,
                map: &self.map,
                entities: &mut self.entities,
                exchange: &mut self.exchange,
                events: &mut self.events,
            };
            scheduler.execute(&mut ChaCha8Rng::seed_from_u64(seed), &mut ctx)
        }

        fn holds(&self, owner: EntityId, item: ItemId) -> bool {
            self.entities
                .get(owner)
                .is_some_and(|entity| entity.inventory.contains(item))
        }
    }

    #[test]
    fn merges_submitters_into_priority_buckets() {
        let mut scheduler = ActionScheduler::new();
        let players: Intents = [(
            EntityId(1),
            ActionSet::new()
                .with(MoveAction {
                    direction: Direction::East,
                })
                .with(AttackAction {
                    target: EntityId(-1),
                    style: CombatStyle::Melee,
                }),
        )]
        .into();
        let npcs: Intents = [(
            EntityId(-1),
            ActionSet::new().with(AttackAction {
                target: EntityId(1),
                style: CombatStyle::Melee,
            }),
        )]
        .into();

        scheduler.submit(&players);
        scheduler.submit(&npcs);

        let shape: Vec<(u8, Vec<EntityId>)> = scheduler
            .buckets()
            .map(|(priority, bucket)| (priority, bucket.iter().map(|(id, _)| *id).collect()))
            .collect();
        assert_eq!(
            shape,
            vec![
                (1, vec![EntityId(1), EntityId(-1)]),
                (2, vec![EntityId(1)]),
            ]
        );
    }

    #[test]
    fn contract_violation_aborts_with_context() {
        let config = RealmConfig::default();
        let map = OpenMap::new(&config.map);
        let mut entities = EntityStore::new();
        let mut exchange = Exchange::new();
        let mut events = EventLog::new();
        let seller = entities.spawn_player(Position::new(20, 20), 0, &config);

        let mut scheduler = ActionScheduler::new();
        scheduler.submit(
            &[(
                seller,
                ActionSet::new().with(SellAction {
                    item: ItemId(42),
                    price: 3,
                }),
            )]
            .into(),
        );

        let mut ctx = ActionContext {
            tick: Tick(0),
            config: &config,
            formula: &LinearDamage,
            map: &map,
            entities: &mut entities,
            exchange: &mut exchange,
            events: &mut events,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let result = scheduler.execute(&mut rng, &mut ctx);

        assert!(matches!(
            result,
            Err(StepError::Action {
                actor,
                kind: crate::action::ActionKind::Sell,
                ..
            }) if actor == seller
        ));
        assert!(scheduler.is_empty());
    }

    #[test]
    fn selling_a_ration_eaten_this_tick_is_a_no_op() {
        let mut bench = Bench::new();
        let player = bench.player(20, 20, 0);
        let ration = bench.hand(player, ItemKind::Ration, 1);

        let intents: Intents = [(
            player,
            ActionSet::new()
                .with(UseAction { item: ration })
                .with(SellAction {
                    item: ration,
                    price: 5,
                }),
        )]
        .into();
        let summary = bench.run(&intents, 0).unwrap();

        assert_eq!((summary.executed, summary.no_ops), (1, 1));
        assert!(!bench.holds(player, ration));
        assert!(bench.exchange.is_empty());
    }

    #[test]
    fn using_ammunition_fired_this_tick_is_a_no_op() {
        let mut bench = Bench::new();
        let archer = bench.player(20, 20, 0);
        let target = bench.player(20, 21, 1);
        let scrap = bench.hand(archer, ItemKind::Scrap, 1);
        bench
            .entities
            .get_mut(archer)
            .unwrap()
            .inventory
            .toggle_equip(scrap);

        let intents: Intents = [(
            archer,
            ActionSet::new()
                .with(AttackAction {
                    target,
                    style: CombatStyle::Melee,
                })
                .with(UseAction { item: scrap }),
        )]
        .into();
        let summary = bench.run(&intents, 0).unwrap();

        assert_eq!((summary.executed, summary.no_ops), (1, 1));
        assert!(!bench.holds(archer, scrap));
    }

    #[test]
    fn give_and_destroy_of_one_item_apply_once() {
        for seed in 0..8 {
            let mut bench = Bench::new();
            let giver = bench.player(20, 20, 0);
            let friend = bench.player(20, 21, 0);
            let hat = bench.hand(giver, ItemKind::Hat, 1);

            let intents: Intents = [(
                giver,
                ActionSet::new()
                    .with(GiveAction { target: friend, item: hat })
                    .with(DestroyAction { item: hat }),
            )]
            .into();
            let summary = bench.run(&intents, seed).unwrap();

            assert_eq!((summary.executed, summary.no_ops), (1, 1), "seed {seed}");
            assert!(!bench.holds(giver, hat));
        }
    }

    #[test]
    fn items_never_held_still_violate_the_contract() {
        let mut bench = Bench::new();
        let thief = bench.player(20, 20, 0);
        let owner = bench.player(20, 21, 1);
        let hat = bench.hand(owner, ItemKind::Hat, 1);

        let intents: Intents = [(thief, ActionSet::new().with(DestroyAction { item: hat }))].into();
        let result = bench.run(&intents, 0);

        assert!(matches!(
            result,
            Err(StepError::Action {
                error: crate::action::ActionError::ItemNotOwned { .. },
                ..
            })
        ));
        assert!(bench.holds(owner, hat));
    }
}
