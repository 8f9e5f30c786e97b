//! Combat domain: damageable targets, spell projectiles and damage events.

mod components;
mod events;
mod projectile;
mod resources;
mod systems;


pub use components::{Bounty, Damageable, Health, Obstacle, ReloadPickup, within_reach};
pub use events::{DamageEvent, DamageSource};
pub use projectile::{
    Contact, DEFAULT_AIM, Projectile, ProjectileEnd, ProjectileLaunch, ProjectileStep,
};
pub use resources::ProjectileTuning;

use bevy::prelude::*;

use crate::combat::systems::{
    advance_projectiles, apply_damage_to_targets, resolve_projectile_contacts,
};

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ProjectileTuning>()
            .add_message::<DamageEvent>()
            .add_systems(
                Update,
                (
                    advance_projectiles,
                    resolve_projectile_contacts,
                    apply_damage_to_targets,
                )
                    .chain(),
            );
    }
}
