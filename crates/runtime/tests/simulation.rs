use std::fs::File;

use realm_core::{
    ActionSet, Direction, EntityId, Intents, MoveAction, Realm, RealmConfig, TickSnapshot,
};
use realm_runtime::{IdleBrain, MeanderBrain, Runtime};

fn small_world() -> RealmConfig {
    let mut config = RealmConfig::default();
    config.population.players = 8;
    config.population.teams = 2;
    config.population.npcs = 12;
    config
}

#[test]
fn seeded_runs_are_reproducible() {
    let run = |seed: u64| {
        Runtime::builder(small_world())
            .seed(seed)
            .npc_brain(MeanderBrain::default())
            .build()
            .unwrap()
            .run(60)
            .unwrap()
    };

    let first = run(5);
    assert_eq!(first, run(5));
    assert_eq!(first.seed, 5);
    assert_eq!(first.state_root.len(), 64);
}

#[test]
fn run_stops_once_every_player_is_dead() {
    let mut config = small_world();
    config.player.death_fog_start = Some(0);
    config.player.death_fog_speed = 1_000.0;
    config.player.death_fog_final_size = 0;

    let mut runtime = Runtime::builder(config)
        .npc_brain(IdleBrain)
        .build()
        .unwrap();
    let summary = runtime.run(100).unwrap();

    assert_eq!(summary.ticks, 1);
    assert_eq!(summary.survivors, 0);
    assert!(summary.deaths >= 8);
    assert_eq!(summary.events.get("died").copied(), Some(summary.deaths));
    assert_eq!(runtime.realm().population(), 0);
}

#[test]
fn recorder_writes_initial_state_and_every_tick() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshots.jsonl");

    let mut runtime = Runtime::builder(small_world())
        .seed(2)
        .recorder(File::create(&path).unwrap())
        .build()
        .unwrap();
    let summary = runtime.run(10).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let snapshots: Vec<TickSnapshot> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(snapshots.len() as u64, summary.ticks + 1);
    for (index, snapshot) in snapshots.iter().enumerate() {
        assert_eq!(snapshot.tick.0, index as u64);
    }
}

#[test]
fn scripted_players_drive_the_realm() {
    let northward = |realm: &Realm| -> Intents {
        realm
            .entities()
            .players()
            .map(|player| {
                let set = ActionSet::new().with(MoveAction {
                    direction: Direction::North,
                });
                (player.id, set)
            })
            .collect()
    };

    let mut config = small_world();
    config.population.npcs = 0;
    let mut runtime = Runtime::builder(config)
        .seed(8)
        .players(northward)
        .build()
        .unwrap();

    let rows_before: Vec<(EntityId, i32)> = runtime
        .realm()
        .entities()
        .players()
        .map(|player| (player.id, player.position.row))
        .collect();
    runtime.run(3).unwrap();

    for (id, row) in rows_before {
        let player = runtime.realm().entity(id).unwrap();
        assert!(player.position.row <= row);
    }
}
