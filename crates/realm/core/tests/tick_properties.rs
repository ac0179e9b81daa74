use realm_core::{
    ActionSet, AttackAction, CombatStyle, Direction, EntityId, Intents, ItemKind, MoveAction,
    Position, Realm, RealmConfig, RealmEvent, SellAction, StepError, Tick, UseAction,
};

fn empty_world() -> RealmConfig {
    let mut config = RealmConfig::default();
    config.population.players = 0;
    config.population.npcs = 0;
    config
}

fn assert_listing_invariant(realm: &Realm) {
    for entity in realm.entities().iter() {
        for item in entity.inventory.iter() {
            assert_eq!(
                item.listed_price != 0,
                realm.exchange().get(item.id).is_some(),
                "item {:?} of {} out of sync with the exchange",
                item.id,
                entity.id
            );
        }
    }
    for listing in realm.exchange().listings() {
        let seller = realm.entity(listing.seller).expect("listing seller is live");
        assert!(seller.inventory.contains(listing.item));
    }
}

#[test]
fn second_attack_on_a_fresh_corpse_is_skipped() {
    let mut realm = Realm::builder(empty_world())
        .damage_formula(|_offense: f32, _defense: f32, _multiplier: f32| 1_000.0_f32)
        .seed(3)
        .build()
        .unwrap();

    let config = realm.config().clone();
    let store = realm.entities_mut();
    let a = store.spawn_player(Position::new(80, 79), 0, &config);
    let b = store.spawn_player(Position::new(80, 81), 1, &config);
    let target = store.spawn_player(Position::new(80, 80), 2, &config);

    let attack = AttackAction {
        target,
        style: CombatStyle::Melee,
    };
    let intents: Intents = [
        (a, ActionSet::new().with(attack)),
        (b, ActionSet::new().with(attack)),
    ]
    .into_iter()
    .collect();

    let report = realm.step(&intents).unwrap();

    assert_eq!(report.dead_ids(), vec![target]);
    assert_eq!(report.execution.executed, 1);
    assert_eq!(report.execution.no_ops, 1);
    assert!(realm.entity(target).is_none());
    assert!(realm.entity(a).is_some() && realm.entity(b).is_some());

    let kills: Vec<EntityId> = realm
        .events()
        .iter()
        .filter_map(|(_, event)| match event {
            RealmEvent::Kill { attacker, .. } => Some(*attacker),
            _ => None,
        })
        .collect();
    assert_eq!(kills.len(), 1);
    let killer = realm.entity(kills[0]).unwrap();
    assert_eq!(killer.history.player_kills, 1);
}

#[test]
fn last_hit_races_are_won_by_either_attacker() {
    let mut first_wins = 0;
    let rounds = 64;

    for seed in 0..rounds {
        let mut realm = Realm::builder(empty_world()).seed(seed).build().unwrap();
        let config = realm.config().clone();
        let store = realm.entities_mut();
        let a = store.spawn_player(Position::new(80, 79), 0, &config);
        let b = store.spawn_player(Position::new(80, 81), 1, &config);
        let target = store.spawn_player(Position::new(80, 80), 2, &config);
        store.get_mut(target).unwrap().health.current = 1;

        let attack = AttackAction {
            target,
            style: CombatStyle::Melee,
        };
        let intents: Intents = [
            (a, ActionSet::new().with(attack)),
            (b, ActionSet::new().with(attack)),
        ]
        .into_iter()
        .collect();

        let report = realm.step(&intents).unwrap();
        assert_eq!(report.dead_ids(), vec![target]);

        let killers: Vec<EntityId> = [a, b]
            .into_iter()
            .filter(|id| realm.entity(*id).unwrap().history.player_kills == 1)
            .collect();
        assert_eq!(killers.len(), 1, "seed {seed}");
        if killers[0] == a {
            first_wins += 1;
        }
    }

    assert!(
        first_wins > 0 && first_wins < rounds,
        "first attacker won {first_wins} of {rounds}"
    );
}

#[test]
fn items_used_up_earlier_in_the_tick_do_not_abort_it() {
    let mut realm = Realm::builder(empty_world()).seed(4).build().unwrap();
    let config = realm.config().clone();
    let store = realm.entities_mut();
    let player = store.spawn_player(Position::new(80, 80), 0, &config);
    let bystander = store.spawn_player(Position::new(60, 60), 1, &config);
    let ration = store.create_item(ItemKind::Ration, 1, 1);
    let ration_id = ration.id;
    store.get_mut(player).unwrap().inventory.receive(ration).unwrap();

    let intents: Intents = [
        (
            player,
            ActionSet::new()
                .with(UseAction { item: ration_id })
                .with(SellAction {
                    item: ration_id,
                    price: 5,
                }),
        ),
        (
            bystander,
            ActionSet::new().with(MoveAction {
                direction: Direction::North,
            }),
        ),
    ]
    .into_iter()
    .collect();

    let report = realm.step(&intents).unwrap();
    assert_eq!(report.execution.executed, 2);
    assert_eq!(report.execution.no_ops, 1);
    assert!(!realm.entity(player).unwrap().inventory.contains(ration_id));
    assert!(realm.exchange().is_empty());
    assert_eq!(realm.entity(bystander).unwrap().position, Position::new(59, 60));
    assert_eq!(realm.tick(), Tick(1));
}

#[test]
fn dead_list_matches_every_death_of_the_tick() {
    let mut realm = Realm::builder(empty_world())
        .damage_formula(|_offense: f32, _defense: f32, _multiplier: f32| 1_000.0_f32)
        .build()
        .unwrap();

    let config = realm.config().clone();
    let store = realm.entities_mut();
    let hunter = store.spawn_player(Position::new(60, 60), 0, &config);
    let prey = store.spawn_player(Position::new(60, 61), 1, &config);
    let starving = store.spawn_player(Position::new(90, 90), 1, &config);
    let npc = store.spawn_npc(Position::new(59, 60), &config);
    {
        let starving = store.get_mut(starving).unwrap();
        starving.food.current = 0;
        starving.water.current = 0;
        starving.health.current = 15;
    }

    let intents: Intents = [
        (
            hunter,
            ActionSet::new().with(AttackAction {
                target: prey,
                style: CombatStyle::Melee,
            }),
        ),
        (
            prey,
            ActionSet::new().with(AttackAction {
                target: npc,
                style: CombatStyle::Melee,
            }),
        ),
    ]
    .into_iter()
    .collect();

    let report = realm.step(&intents).unwrap();

    let mut dead = report.dead_ids();
    dead.sort();
    let mut expected = vec![starving, prey];
    if realm.entity(npc).is_none() {
        expected.push(npc);
    }
    expected.sort();
    assert_eq!(dead, expected);
    for id in dead {
        assert!(realm.entity(id).is_none());
    }
    assert!(realm.entity(hunter).is_some());
}

#[test]
fn dead_players_still_appear_in_the_published_game_state() {
    let mut realm = Realm::builder(empty_world()).build().unwrap();
    let config = realm.config().clone();
    let id = realm
        .entities_mut()
        .spawn_player(Position::new(80, 80), 0, &config);
    {
        let player = realm.entities_mut().get_mut(id).unwrap();
        player.food.current = 0;
        player.water.current = 0;
        player.health.current = 1;
    }

    let report = realm.step(&Intents::new()).unwrap();
    assert_eq!(report.dead_ids(), vec![id]);

    let state = realm.game_state();
    assert_eq!(state.tick, Tick(0));
    let attributes = state.get(id).unwrap();
    assert!(!attributes.alive);
    assert_eq!(attributes.health, 0);
    assert_eq!(realm.population(), 0);
}

#[test]
fn same_seed_and_intents_replay_identically() {
    let run = |seed: u64| {
        let mut config = RealmConfig::default();
        config.player.death_fog_start = Some(10);
        let mut realm = Realm::builder(config).seed(seed).build().unwrap();

        let mut roots = vec![realm.state_root()];
        let mut dead = Vec::new();
        for tick in 0..30 {
            let ids: Vec<EntityId> = realm.entities().players().map(|p| p.id).collect();
            let intents: Intents = ids
                .iter()
                .map(|&id| {
                    let direction = match (id.0 + tick) % 4 {
                        0 => Direction::North,
                        1 => Direction::East,
                        2 => Direction::South,
                        _ => Direction::West,
                    };
                    let target = ids[(id.0 as usize) % ids.len()];
                    let set = ActionSet::new()
                        .with(MoveAction { direction })
                        .with(AttackAction {
                            target,
                            style: CombatStyle::Mage,
                        });
                    (id, set)
                })
                .collect();
            let report = realm.step(&intents).unwrap();
            dead.push(report.dead_ids());
            roots.push(realm.state_root());
        }
        (roots, dead)
    };

    let (roots_a, dead_a) = run(42);
    let (roots_b, dead_b) = run(42);
    assert_eq!(roots_a, roots_b);
    assert_eq!(dead_a, dead_b);

    let (roots_c, _) = run(43);
    assert_ne!(roots_a[0], roots_c[0]);
}

#[test]
fn reset_restores_the_initial_world() {
    let mut realm = Realm::builder(RealmConfig::default())
        .seed(9)
        .build()
        .unwrap();
    let initial = realm.state_root();
    assert_eq!(realm.population(), 16);
    assert_eq!(realm.entities().npc_count(), 8);

    for _ in 0..5 {
        realm.step(&Intents::new()).unwrap();
    }
    assert_eq!(realm.tick(), Tick(5));
    assert_ne!(realm.state_root(), initial);

    realm.reset(9);
    assert_eq!(realm.tick(), Tick::ZERO);
    assert_eq!(realm.state_root(), initial);
    assert!(realm.events().is_empty());
}

#[test]
fn listings_expire_through_the_tick_loop() {
    let mut config = empty_world();
    config.exchange.listing_duration = 2;
    let mut realm = Realm::builder(config).build().unwrap();

    let config = realm.config().clone();
    let store = realm.entities_mut();
    let seller = store.spawn_player(Position::new(70, 70), 0, &config);
    let item = store.create_item(ItemKind::Sword, 2, 1);
    let item_id = item.id;
    store.get_mut(seller).unwrap().inventory.receive(item).unwrap();

    let sell: Intents = [(
        seller,
        ActionSet::new().with(SellAction {
            item: item_id,
            price: 100,
        }),
    )]
    .into_iter()
    .collect();
    realm.step(&sell).unwrap();
    assert_listing_invariant(&realm);
    assert_eq!(realm.exchange().get(item_id).unwrap().tick, Tick(0));

    for _ in 1..3 {
        let report = realm.step(&Intents::new()).unwrap();
        assert!(report.expired.is_empty());
        assert!(realm.exchange().get(item_id).is_some());
    }

    let report = realm.step(&Intents::new()).unwrap();
    assert_eq!(report.tick, Tick(3));
    assert_eq!(report.expired, vec![item_id]);
    assert_listing_invariant(&realm);

    let owned = realm.entity(seller).unwrap().inventory.get(item_id).unwrap();
    assert_eq!(owned.listed_price, 0);

    let market = realm.packet().market;
    assert!(market.is_empty());
}

#[test]
fn dying_sellers_take_their_listings_with_them() {
    let mut realm = Realm::builder(empty_world()).build().unwrap();

    let config = realm.config().clone();
    let store = realm.entities_mut();
    let seller = store.spawn_player(Position::new(70, 70), 0, &config);
    let item = store.create_item(ItemKind::Ration, 1, 1);
    let item_id = item.id;
    store.get_mut(seller).unwrap().inventory.receive(item).unwrap();
    {
        let seller = store.get_mut(seller).unwrap();
        seller.food.current = 0;
        seller.water.current = 0;
        seller.health.current = 5;
    }

    let sell: Intents = [(
        seller,
        ActionSet::new().with(SellAction {
            item: item_id,
            price: 10,
        }),
    )]
    .into_iter()
    .collect();
    let report = realm.step(&sell).unwrap();

    assert_eq!(report.dead_ids(), vec![seller]);
    assert!(realm.exchange().is_empty());
    assert_listing_invariant(&realm);
}

#[test]
fn intents_for_unknown_entities_are_rejected_up_front() {
    let mut realm = Realm::builder(empty_world()).build().unwrap();
    let ghost = EntityId(77);
    let intents: Intents = [(
        ghost,
        ActionSet::new().with(MoveAction {
            direction: Direction::North,
        }),
    )]
    .into_iter()
    .collect();

    let err = realm.step(&intents).unwrap_err();
    assert!(matches!(err, StepError::UnknownActor(id) if id == ghost));
    assert_eq!(realm.tick(), Tick::ZERO);
}

#[test]
fn packet_reports_every_entity() {
    let realm = Realm::builder(RealmConfig::default())
        .seed(1)
        .build()
        .unwrap();
    let packet = realm.packet();
    assert_eq!(packet.tick, Tick::ZERO);
    assert_eq!(packet.entities.len(), 24);
    for summary in &packet.entities {
        let entity = realm.entity(summary.id).unwrap();
        assert_eq!(summary.position, entity.position);
        assert_eq!(summary.health, entity.health.current);
    }
}
