//! Developer hotkeys for fast iteration, compiled in with `dev-tools`.
//!
//! All shortcuts are Ctrl + key:
//! - G / H: grant 100 gold / 10 gems
//! - 1 / 2: start map 1 / 2
//! - N: load the next stage
//! - R: restart the map
//! - L: return to the lobby
//! - K: kill the player
//! - E: spawn a training dummy with a gold bounty ahead of the player
//! - P: drop a reload pickup next to the player

mod systems;

use bevy::prelude::*;

use crate::debug::systems::{handle_debug_hotkeys, log_scene_changes, spawn_debug_props};

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (handle_debug_hotkeys, spawn_debug_props, log_scene_changes),
        );
    }
}
