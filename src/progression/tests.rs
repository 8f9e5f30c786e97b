//! Progression domain: tests for stage sequencing, respawns and currency.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::{
    ActiveRun, ProgressionPlugin, RunError, RunHost, RunManager, STAGES_PER_RUN, SpawnAnchor,
    StageStep, generate_stage_queue, install_run_manager,
};
use crate::combat::{DamageEvent, DamageSource, ProjectileTuning};
use crate::content::{AnimationLibrary, GameplayDefaults, RunDefs};
use crate::core::{ActiveScene, PlayerDiedEvent, RunCommand, RunConfig, SceneChangedEvent};
use crate::player::{Player, PlayerPlugin};

#[derive(Default)]
struct FakeRunHost {
    loaded: Vec<String>,
    anchors: HashMap<String, SpawnAnchor>,
    spawned: Vec<(String, SpawnAnchor, u32)>,
    destroyed: Vec<u32>,
    next_handle: u32,
}

impl FakeRunHost {
    fn with_spawn_point() -> Self {
        let mut host = Self::default();
        host.anchors.insert(
            "SpawnPoints".to_string(),
            SpawnAnchor {
                position: Vec3::new(1.0, 0.0, 2.0),
                rotation: Quat::IDENTITY,
            },
        );
        host
    }
}

impl RunHost for FakeRunHost {
    type Handle = u32;

    fn load_scene(&mut self, scene: &str) {
        self.loaded.push(scene.to_string());
    }

    fn find_anchor(&self, name: &str) -> Option<SpawnAnchor> {
        self.anchors.get(name).copied()
    }

    fn spawn_entity(&mut self, template: &str, anchor: SpawnAnchor) -> u32 {
        self.next_handle += 1;
        self.spawned
            .push((template.to_string(), anchor, self.next_handle));
        self.next_handle
    }

    fn destroy_entity(&mut self, handle: u32) {
        self.destroyed.push(handle);
    }
}

fn manager(seed: u64) -> RunManager<u32> {
    RunManager::new(RunDefs::default(), seed)
}

// -----------------------------------------------------------------------------
// Currency
// -----------------------------------------------------------------------------

#[test]
fn test_spend_gold_only_with_sufficient_balance() {
    let mut run = manager(1);
    run.add_gold(50);

    assert!(run.spend_gold(30));
    assert_eq!(run.gold(), 20);
    assert!(!run.spend_gold(30));
    assert_eq!(run.gold(), 20);
}

#[test]
fn test_gems_are_independent_of_gold() {
    let mut run = manager(1);
    run.add_gems(5);

    assert!(!run.spend_gold(1));
    assert!(run.spend_gems(5));
    assert_eq!(run.gems(), 0);
    assert!(!run.spend_gems(1));
}

#[test]
fn test_player_death_resets_gold_only() {
    let mut run = manager(1);
    let mut host = FakeRunHost::with_spawn_point();
    run.add_gold(120);
    run.add_gems(7);
    run.start_game(1, &mut host).unwrap();

    run.player_died(&mut host);

    assert_eq!(run.gold(), 0);
    assert_eq!(run.gems(), 7);
    assert!(!run.is_game_in_progress());
    assert_eq!(host.loaded.last().map(String::as_str), Some("Lobby"));
}

// -----------------------------------------------------------------------------
// Stage queue
// -----------------------------------------------------------------------------

#[test]
fn test_stage_queue_draws_distinct_entries_from_the_pool() {
    let pool: Vec<String> = (1..=6).map(|n| format!("S{n}")).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    let queue = generate_stage_queue(&pool, &mut rng);
    assert_eq!(queue.len(), STAGES_PER_RUN);
    let unique: HashSet<_> = queue.iter().collect();
    assert_eq!(unique.len(), STAGES_PER_RUN);
    assert!(queue.iter().all(|s| pool.contains(s)));
}

#[test]
fn test_stage_queue_varies_between_runs() {
    let pool: Vec<String> = (1..=6).map(|n| format!("S{n}")).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    let queues: HashSet<Vec<String>> = (0..20)
        .map(|_| generate_stage_queue(&pool, &mut rng))
        .collect();
    assert!(queues.len() > 1);
}

#[test]
fn test_short_pool_yields_short_queue() {
    let pool = vec!["A".to_string(), "B".to_string()];
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    assert_eq!(generate_stage_queue(&pool, &mut rng).len(), 2);
}

#[test]
fn test_stage_steps() {
    assert_eq!(StageStep::for_stage(1), StageStep::Queued(0));
    assert_eq!(StageStep::for_stage(4), StageStep::Queued(3));
    assert_eq!(StageStep::for_stage(5), StageStep::Shop);
    assert_eq!(StageStep::for_stage(6), StageStep::Boss);
    assert_eq!(StageStep::for_stage(7), StageStep::Lobby);
}

// -----------------------------------------------------------------------------
// Game flow
// -----------------------------------------------------------------------------

#[test]
fn test_full_run_sequence() {
    let mut run = manager(9);
    let mut host = FakeRunHost::with_spawn_point();

    run.start_game(2, &mut host).unwrap();
    assert!(run.is_game_in_progress());
    assert_eq!(run.current_map(), 2);
    assert_eq!(run.stage_queue().len(), 4);
    assert!(
        run.stage_queue()
            .iter()
            .all(|s| s.starts_with("Map2_Stage"))
    );

    for _ in 0..6 {
        run.load_next_stage(&mut host).unwrap();
    }

    let mut expected: Vec<String> = run.stage_queue().to_vec();
    expected.extend(["ShopMap2", "BossMap2", "Lobby"].map(String::from));
    assert_eq!(host.loaded, expected);
    assert!(!run.is_game_in_progress());
}

#[test]
fn test_unknown_map_leaves_state_unchanged() {
    let mut run = manager(1);
    let mut host = FakeRunHost::with_spawn_point();

    assert_eq!(run.start_game(3, &mut host), Err(RunError::UnknownMap(3)));
    assert!(!run.is_game_in_progress());
    assert!(host.loaded.is_empty());
    assert!(run.respawn_pending().is_none());
}

#[test]
fn test_missing_queue_entry_is_an_error() {
    let mut defs = RunDefs::default();
    defs.maps[0].stage_pool.truncate(2);
    let mut run: RunManager<u32> = RunManager::new(defs, 1);
    let mut host = FakeRunHost::with_spawn_point();

    run.start_game(1, &mut host).unwrap();
    run.load_next_stage(&mut host).unwrap();
    assert_eq!(
        run.load_next_stage(&mut host),
        Err(RunError::StageMissing { stage: 3 })
    );
    assert_eq!(run.current_stage(), 3);
    assert_eq!(host.loaded.len(), 2);
}

#[test]
fn test_respawn_follows_each_load_after_one_second() {
    let mut run = manager(1);
    let mut host = FakeRunHost::with_spawn_point();

    run.start_game(1, &mut host).unwrap();
    run.tick(0.5, &mut host);
    assert!(host.spawned.is_empty());

    run.tick(0.5, &mut host);
    assert_eq!(host.spawned.len(), 1);
    let (template, anchor, handle) = &host.spawned[0];
    assert_eq!(template, "Player");
    assert_eq!(anchor.position, Vec3::new(1.0, 0.0, 2.0));
    assert_eq!(run.current_player(), Some(*handle));
}

#[test]
fn test_respawn_replaces_previous_player() {
    let mut run = manager(1);
    let mut host = FakeRunHost::with_spawn_point();

    let first = run.respawn_player(&mut host).unwrap();
    let second = run.respawn_player(&mut host).unwrap();

    assert_ne!(first, second);
    assert_eq!(host.destroyed, vec![first]);
    assert_eq!(run.current_player(), Some(second));
}

#[test]
fn test_respawn_aborts_without_anchor_or_template() {
    let mut run = manager(1);
    let mut host = FakeRunHost::default();
    assert_eq!(
        run.respawn_player(&mut host),
        Err(RunError::MissingSpawnAnchor("SpawnPoints".to_string()))
    );

    let mut defs = RunDefs::default();
    defs.player_template = None;
    let mut run: RunManager<u32> = RunManager::new(defs, 1);
    let mut host = FakeRunHost::with_spawn_point();
    assert_eq!(
        run.respawn_player(&mut host),
        Err(RunError::MissingPlayerTemplate)
    );
    assert!(host.spawned.is_empty());
}

#[test]
fn test_failed_respawn_keeps_tracked_player() {
    let mut run = manager(1);
    let mut host = FakeRunHost::with_spawn_point();
    let first = run.respawn_player(&mut host).unwrap();

    host.anchors.clear();
    assert_eq!(
        run.respawn_player(&mut host),
        Err(RunError::MissingSpawnAnchor("SpawnPoints".to_string()))
    );
    assert!(host.destroyed.is_empty());
    assert_eq!(host.spawned.len(), 1);
    assert_eq!(run.current_player(), Some(first));
}

#[test]
fn test_restart_map_reshuffles_and_starts_over() {
    let mut run = manager(5);
    let mut host = FakeRunHost::with_spawn_point();

    run.start_game(1, &mut host).unwrap();
    run.load_next_stage(&mut host).unwrap();
    run.load_next_stage(&mut host).unwrap();

    run.restart_map(&mut host).unwrap();
    assert_eq!(run.current_map(), 1);
    assert_eq!(run.current_stage(), 2);
    assert_eq!(host.loaded.last(), run.stage_queue().first());
}

#[test]
fn test_restart_map_draws_a_fresh_queue() {
    let mut run = manager(11);
    let mut host = FakeRunHost::with_spawn_point();

    run.start_game(1, &mut host).unwrap();
    let original = run.stage_queue().to_vec();

    let mut reshuffled = false;
    for _ in 0..10 {
        run.restart_map(&mut host).unwrap();
        assert_eq!(run.stage_queue().len(), STAGES_PER_RUN);
        reshuffled |= run.stage_queue() != original.as_slice();
    }
    assert!(reshuffled);
}

// -----------------------------------------------------------------------------
// Installation
// -----------------------------------------------------------------------------

#[test]
fn test_second_install_is_rejected() {
    let mut world = World::new();

    let mut first = RunManager::new(RunDefs::default(), 1);
    first.add_gold(10);
    assert!(install_run_manager(&mut world, first));
    assert!(!install_run_manager(
        &mut world,
        RunManager::new(RunDefs::default(), 2)
    ));

    assert_eq!(world.resource::<ActiveRun>().gold(), 10);
}

// -----------------------------------------------------------------------------
// Death flow through the ECS
// -----------------------------------------------------------------------------

fn run_flow_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)))
        .insert_resource(GameplayDefaults::default())
        .insert_resource(AnimationLibrary::default())
        .insert_resource(RunConfig { seed: 3 })
        .init_resource::<ActiveScene>()
        .init_resource::<ProjectileTuning>()
        .init_resource::<ButtonInput<KeyCode>>()
        .add_message::<DamageEvent>()
        .add_message::<PlayerDiedEvent>()
        .add_message::<SceneChangedEvent>()
        .add_message::<RunCommand>()
        .add_plugins((PlayerPlugin, ProgressionPlugin));
    app
}

fn advance(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

fn players(app: &mut App) -> Vec<Entity> {
    app.world_mut()
        .query_filtered::<Entity, With<Player>>()
        .iter(app.world())
        .collect()
}

fn scene(app: &App) -> Option<String> {
    app.world().resource::<ActiveScene>().name.clone()
}

fn active_run(app: &App) -> &ActiveRun {
    app.world().resource::<ActiveRun>()
}

#[test]
fn test_lethal_damage_returns_to_lobby_and_respawns() {
    let mut app = run_flow_app();
    advance(&mut app, 12);
    assert_eq!(scene(&app).as_deref(), Some("Lobby"));
    let lobby_player = players(&mut app);
    assert_eq!(lobby_player.len(), 1);
    let lobby_player = lobby_player[0];

    app.world_mut()
        .write_message(RunCommand::StartGame { map: 1 });
    advance(&mut app, 12);
    assert!(scene(&app).is_some_and(|s| s.starts_with("Map1_Stage")));
    let stage_player = active_run(&app)
        .current_player()
        .expect("player respawned in the stage");
    assert_ne!(stage_player, lobby_player);
    assert_eq!(players(&mut app), vec![stage_player]);

    {
        let mut run = app.world_mut().resource_mut::<ActiveRun>();
        run.add_gold(40);
        run.add_gems(2);
    }

    // A death report for a player the run no longer tracks is ignored
    app.world_mut().write_message(PlayerDiedEvent {
        player: lobby_player,
    });
    advance(&mut app, 2);
    assert_eq!(active_run(&app).gold(), 40);
    assert!(active_run(&app).is_game_in_progress());

    // Two lethal hits in one frame kill the player once
    for _ in 0..2 {
        app.world_mut().write_message(DamageEvent {
            target: stage_player,
            amount: 500.0,
            source: DamageSource::Debug,
        });
    }
    advance(&mut app, 2);
    assert_eq!(scene(&app).as_deref(), Some("Lobby"));
    assert!(!active_run(&app).is_game_in_progress());
    assert_eq!(active_run(&app).gold(), 0);
    assert_eq!(active_run(&app).gems(), 2);
    assert!(players(&mut app).is_empty());

    app.world_mut().resource_mut::<ActiveRun>().add_gold(5);
    advance(&mut app, 5);
    assert!(players(&mut app).is_empty());

    advance(&mut app, 6);
    let respawned = players(&mut app);
    assert_eq!(respawned.len(), 1);
    assert_ne!(respawned[0], stage_player);
    assert_eq!(active_run(&app).current_player(), Some(respawned[0]));
    assert_eq!(active_run(&app).gold(), 5);
}
