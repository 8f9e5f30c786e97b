//! Core domain: run configuration, scene bookkeeping and shared events.

mod events;
mod resources;
mod systems;

pub use events::{PlayerDiedEvent, RunCommand, SceneChangedEvent};
pub use resources::{ActiveScene, RunConfig};

use bevy::prelude::*;

use crate::core::systems::setup_camera;

/// Marks entities that belong to the loaded scene; they are despawned when
/// the next scene loads.
#[derive(Component, Debug, Default)]
pub struct SceneScoped;

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RunConfig>()
            .init_resource::<ActiveScene>()
            .add_message::<PlayerDiedEvent>()
            .add_message::<SceneChangedEvent>()
            .add_message::<RunCommand>()
            .add_systems(Startup, setup_camera);
    }
}
