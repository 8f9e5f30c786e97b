//! Data definitions for the gameplay content file.
//!
//! These structs mirror assets/data/gameplay.ron. Every field has a built-in
//! default so a partial or missing file still yields a playable run.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combat::ProjectileTuning;
use crate::player::PlayerTuning;

// ============================================================================
// Gameplay defaults (gameplay.ron)
// ============================================================================

#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GameplayDefaults {
    pub schema_version: u32,
    pub player: PlayerTuning,
    pub projectile: ProjectileTuning,
    pub run: RunDefs,
    pub scenes: Vec<SceneDef>,
}

impl Default for GameplayDefaults {
    fn default() -> Self {
        let run = RunDefs::default();
        let scenes = default_scenes(&run);
        Self {
            schema_version: 1,
            player: PlayerTuning::default(),
            projectile: ProjectileTuning::default(),
            run,
            scenes,
        }
    }
}

impl GameplayDefaults {
    pub fn scene(&self, name: &str) -> Option<&SceneDef> {
        self.scenes.iter().find(|s| s.name == name)
    }
}

// ============================================================================
// Run layout
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RunDefs {
    pub maps: Vec<MapDef>,
    pub lobby_scene: String,
    /// Template the player is spawned from; respawns abort when unset
    pub player_template: Option<String>,
    /// Name of the anchor every scene places the player at
    pub spawn_anchor: String,
    /// Seconds between a scene load and the player respawn
    pub respawn_delay: f32,
}

impl Default for RunDefs {
    fn default() -> Self {
        Self {
            maps: vec![MapDef::numbered(1), MapDef::numbered(2)],
            lobby_scene: "Lobby".to_string(),
            player_template: Some("Player".to_string()),
            spawn_anchor: "SpawnPoints".to_string(),
            respawn_delay: 1.0,
        }
    }
}

impl RunDefs {
    pub fn map(&self, id: u32) -> Option<&MapDef> {
        self.maps.iter().find(|m| m.id == id)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MapDef {
    pub id: u32,
    /// Scenes the randomized stage queue is drawn from
    pub stage_pool: Vec<String>,
    pub shop_scene: String,
    pub boss_scene: String,
}

impl MapDef {
    fn numbered(id: u32) -> Self {
        Self {
            id,
            stage_pool: (1..=6).map(|n| format!("Map{id}_Stage{n}")).collect(),
            shop_scene: format!("ShopMap{id}"),
            boss_scene: format!("BossMap{id}"),
        }
    }

    /// Every scene this map can load.
    pub fn scenes(&self) -> impl Iterator<Item = &str> {
        self.stage_pool
            .iter()
            .map(String::as_str)
            .chain([self.shop_scene.as_str(), self.boss_scene.as_str()])
    }
}

// ============================================================================
// Scenes
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SceneDef {
    pub name: String,
    #[serde(default)]
    pub anchors: Vec<AnchorDef>,
    /// Walls and props that stop projectiles
    #[serde(default)]
    pub obstacles: Vec<ObstacleDef>,
}

/// A named location placed in a scene.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnchorDef {
    pub name: String,
    pub position: [f32; 3],
    #[serde(default)]
    pub yaw_degrees: f32,
}

impl AnchorDef {
    pub fn transform(&self) -> Transform {
        Transform::from_translation(Vec3::from_array(self.position))
            .with_rotation(Quat::from_rotation_y(self.yaw_degrees.to_radians()))
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObstacleDef {
    pub position: [f32; 3],
    pub radius: f32,
}

fn default_scenes(run: &RunDefs) -> Vec<SceneDef> {
    let mut names = vec![run.lobby_scene.clone()];
    for map in &run.maps {
        names.extend(map.scenes().map(str::to_string));
    }

    names
        .into_iter()
        .map(|name| SceneDef {
            name,
            anchors: vec![AnchorDef {
                name: run.spawn_anchor.clone(),
                position: [0.0, 0.0, 0.0],
                yaw_degrees: 0.0,
            }],
            obstacles: Vec::new(),
        })
        .collect()
}
