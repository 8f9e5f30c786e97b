//! Progression domain: the run manager, stage sequencing and respawns.

mod host;
mod manager;
mod stages;
mod systems;

#[cfg(test)]
mod tests;

pub use host::{RunHost, SpawnAnchor, SpawnAnchors};
pub use manager::{RunError, RunManager};
pub use stages::{BOSS_STAGE, SHOP_STAGE, STAGES_PER_RUN, StageStep, generate_stage_queue};

use bevy::prelude::*;

use crate::progression::systems::{
    enter_lobby, handle_player_death, handle_run_commands, setup_run_manager, tick_run,
};

/// The session's run manager. Installed once through [`install_run_manager`].
#[derive(Resource, Debug, Deref, DerefMut)]
pub struct ActiveRun(pub RunManager<Entity>);

/// Install `manager` as the session's run manager. The first install wins;
/// later attempts are rejected and the new instance is dropped.
pub fn install_run_manager(world: &mut World, manager: RunManager<Entity>) -> bool {
    if world.contains_resource::<ActiveRun>() {
        warn!("A run manager is already installed; discarding the new instance");
        return false;
    }
    world.insert_resource(ActiveRun(manager));
    info!("Run manager installed");
    true
}

pub struct ProgressionPlugin;

impl Plugin for ProgressionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SpawnAnchors>()
            .add_systems(Startup, (setup_run_manager, enter_lobby).chain())
            .add_systems(
                Update,
                (handle_run_commands, handle_player_death, tick_run).chain(),
            );
    }
}
