//! Combat domain: projectile tuning.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    /// Seconds before an unobstructed projectile is destroyed
    pub lifetime: f32,
    /// Contact radius against enemies and obstacles
    pub radius: f32,
    /// Name of the projectile prefab; shots are dropped when unset
    pub template: Option<String>,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            lifetime: 5.0,
            radius: 0.25,
            template: Some("SpellProjectile".to_string()),
        }
    }
}
