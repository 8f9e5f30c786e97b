//! Core domain: shared resources for run configuration and the loaded scene.

use bevy::prelude::*;
use rand::Rng;

#[derive(Resource, Debug)]
pub struct RunConfig {
    /// Seed for the stage-queue RNG
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: rand::rng().random(),
        }
    }
}

/// Name of the scene currently loaded, if any.
#[derive(Resource, Debug, Default)]
pub struct ActiveScene {
    pub name: Option<String>,
}
