//! Progression domain: engine collaborators consumed by the run manager.

use std::collections::HashMap;
use std::fmt;

use bevy::prelude::*;

use crate::content::SceneDef;

/// Position and orientation of a named location in the loaded scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnAnchor {
    pub position: Vec3,
    pub rotation: Quat,
}

impl SpawnAnchor {
    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position).with_rotation(self.rotation)
    }
}

/// Scene loading and entity lifetime, as the run manager sees them.
pub trait RunHost {
    type Handle: Copy + PartialEq + fmt::Debug;

    /// Replace the loaded scene with `scene`.
    fn load_scene(&mut self, scene: &str);

    fn find_anchor(&self, name: &str) -> Option<SpawnAnchor>;

    fn spawn_entity(&mut self, template: &str, anchor: SpawnAnchor) -> Self::Handle;

    fn destroy_entity(&mut self, handle: Self::Handle);
}

/// Named anchors of the currently loaded scene, filled on each scene load.
#[derive(Resource, Debug, Default)]
pub struct SpawnAnchors {
    anchors: HashMap<String, SpawnAnchor>,
}

impl SpawnAnchors {
    pub fn fill_from(&mut self, scene: &SceneDef) {
        self.anchors.clear();
        for anchor in &scene.anchors {
            let transform = anchor.transform();
            self.anchors.insert(
                anchor.name.clone(),
                SpawnAnchor {
                    position: transform.translation,
                    rotation: transform.rotation,
                },
            );
        }
    }

    pub fn clear(&mut self) {
        self.anchors.clear();
    }

    pub fn get(&self, name: &str) -> Option<SpawnAnchor> {
        self.anchors.get(name).copied()
    }
}
