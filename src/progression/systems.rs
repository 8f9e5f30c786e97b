//! Progression domain: systems and the ECS-backed run host.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::combat::Obstacle;
use crate::content::GameplayDefaults;
use crate::core::{
    ActiveScene, PlayerDiedEvent, RunCommand, RunConfig, SceneChangedEvent, SceneScoped,
};
use crate::player::{PlayerTuning, spawn_player};
use crate::progression::host::{RunHost, SpawnAnchor, SpawnAnchors};
use crate::progression::manager::RunManager;
use crate::progression::{ActiveRun, install_run_manager};

/// Run host backed by the world: scenes are scene definitions from the
/// content file, entities are spawned through commands.
#[derive(SystemParam)]
pub(crate) struct RunHostParams<'w, 's> {
    commands: Commands<'w, 's>,
    anchors: ResMut<'w, SpawnAnchors>,
    active_scene: ResMut<'w, ActiveScene>,
    defaults: Res<'w, GameplayDefaults>,
    tuning: Res<'w, PlayerTuning>,
    scoped: Query<'w, 's, Entity, With<SceneScoped>>,
    scene_changed: MessageWriter<'w, SceneChangedEvent>,
}

impl RunHost for RunHostParams<'_, '_> {
    type Handle = Entity;

    fn load_scene(&mut self, scene: &str) {
        for entity in &self.scoped {
            self.commands.entity(entity).despawn();
        }

        match self.defaults.scene(scene) {
            Some(def) => {
                self.anchors.fill_from(def);
                for obstacle in &def.obstacles {
                    self.commands.spawn((
                        Obstacle {
                            radius: obstacle.radius,
                        },
                        SceneScoped,
                        Transform::from_translation(Vec3::from_array(obstacle.position)),
                    ));
                }
            }
            None => {
                warn!("Scene {} is not defined; it has no anchors", scene);
                self.anchors.clear();
            }
        }

        self.active_scene.name = Some(scene.to_string());
        self.scene_changed.write(SceneChangedEvent {
            scene: scene.to_string(),
        });
    }

    fn find_anchor(&self, name: &str) -> Option<SpawnAnchor> {
        self.anchors.get(name)
    }

    fn spawn_entity(&mut self, template: &str, anchor: SpawnAnchor) -> Entity {
        spawn_player(&mut self.commands, &self.tuning, template, anchor.transform())
    }

    fn destroy_entity(&mut self, handle: Entity) {
        // The scene change may already have removed it
        if let Ok(mut entity) = self.commands.get_entity(handle) {
            entity.despawn();
        }
    }
}

pub(crate) fn setup_run_manager(world: &mut World) {
    let defs = world.resource::<GameplayDefaults>().run.clone();
    let seed = world.resource::<RunConfig>().seed;
    info!("Run manager seeded with {}", seed);
    install_run_manager(world, RunManager::new(defs, seed));
}

pub(crate) fn enter_lobby(mut run: ResMut<ActiveRun>, mut host: RunHostParams) {
    run.load_lobby(&mut host);
}

pub(crate) fn tick_run(time: Res<Time>, mut run: ResMut<ActiveRun>, mut host: RunHostParams) {
    run.tick(time.delta_secs(), &mut host);
}

pub(crate) fn handle_player_death(
    mut events: MessageReader<PlayerDiedEvent>,
    mut run: ResMut<ActiveRun>,
    mut host: RunHostParams,
) {
    for event in events.read() {
        if run.current_player() != Some(event.player) {
            debug!("Ignoring death of untracked player {:?}", event.player);
            continue;
        }
        run.player_died(&mut host);
    }
}

pub(crate) fn handle_run_commands(
    mut commands: MessageReader<RunCommand>,
    mut run: ResMut<ActiveRun>,
    mut host: RunHostParams,
) {
    for command in commands.read() {
        debug!("Run command: {:?}", command);
        let result = match *command {
            RunCommand::StartGame { map } => run.start_game(map, &mut host),
            RunCommand::NextStage => run.load_next_stage(&mut host),
            RunCommand::RestartMap => run.restart_map(&mut host),
            RunCommand::ReturnToLobby => {
                run.load_lobby(&mut host);
                Ok(())
            }
        };
        if let Err(e) = result {
            warn!("Run command {:?} failed: {}", command, e);
        }
    }
}
