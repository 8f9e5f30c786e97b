//! Player domain: the controllable character and its action state machine.

mod components;
mod controller;
mod host;
mod resources;
mod routines;
mod systems;


pub use components::{
    ActionState, AttackKind, CLIP_CAST, CLIP_DASH, CLIP_DIE, CLIP_HEAVY_ATTACK, CLIP_HURT,
    CLIP_IDLE, CLIP_LIGHT_ATTACK, CLIP_WALK, DirectionIndicator, Facing, Firepoint,
    IndicatorView, Player, PlayerAnimation, PlayerSprite, PlayerState,
};
pub use controller::{DamageOutcome, PlayerController, PlayerTimer};
pub use host::{Animator, Capability, PlayerHost};
pub use resources::{FrameInput, PlayerTuning};
pub use systems::spawn_player;

use bevy::prelude::*;

use crate::player::systems::{
    apply_damage_to_players, collect_reload_pickups, drive_players, integrate_player_motion,
    read_player_input, sync_player_presentation, sync_player_visibility,
};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerTuning>()
            .init_resource::<FrameInput>()
            .add_systems(
                Update,
                (
                    read_player_input,
                    drive_players,
                    integrate_player_motion,
                    collect_reload_pickups,
                    apply_damage_to_players,
                    sync_player_visibility,
                    sync_player_presentation,
                )
                    .chain(),
            );
    }
}
