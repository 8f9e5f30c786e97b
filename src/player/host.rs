//! Player domain: engine collaborators consumed by the controller.

use std::fmt;

use bevy::prelude::*;

use crate::combat::ProjectileLaunch;

/// Capability filter for overlap queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Damageable,
}

/// Plays clips and reports their length in seconds.
pub trait Animator {
    fn play(&mut self, clip: &str) -> f32;
}

/// Everything the controller needs from the world around the character.
pub trait PlayerHost: Animator {
    type Target: Copy + fmt::Debug;

    /// Character position at the start of the frame.
    fn position(&self) -> Vec3;

    fn is_grounded(&self) -> bool;

    /// Entities with `capability` within `radius` of `point`, in no particular order.
    fn find_overlapping(&self, point: Vec3, radius: f32, capability: Capability)
    -> Vec<Self::Target>;

    fn apply_damage(&mut self, target: Self::Target, amount: i32);

    /// Returns false when no projectile template is available.
    fn spawn_projectile(&mut self, launch: ProjectileLaunch) -> bool;
}
