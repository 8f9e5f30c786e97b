//! Clip length table loaded from assets/data/animations.json.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::player::{
    CLIP_CAST, CLIP_DASH, CLIP_DIE, CLIP_HEAVY_ATTACK, CLIP_HURT, CLIP_IDLE, CLIP_LIGHT_ATTACK,
    CLIP_WALK,
};

use super::loader::ContentLoadError;

/// Length used for clips the table does not know about.
pub const FALLBACK_CLIP_SECONDS: f32 = 0.5;

/// Resource mapping clip names to their length in seconds.
#[derive(Resource, Debug, Clone)]
pub struct AnimationLibrary {
    pub version: u32,
    clips: HashMap<String, f32>,
}

#[derive(Deserialize)]
struct AnimationsJson {
    version: u32,
    clips: HashMap<String, f32>,
}

impl Default for AnimationLibrary {
    fn default() -> Self {
        let clips = [
            (CLIP_IDLE, 1.0),
            (CLIP_WALK, 0.8),
            (CLIP_LIGHT_ATTACK, 0.4),
            (CLIP_HEAVY_ATTACK, 0.8),
            (CLIP_DASH, 0.3),
            (CLIP_CAST, 0.5),
            (CLIP_HURT, 0.4),
            (CLIP_DIE, 1.2),
        ]
        .into_iter()
        .map(|(name, secs)| (name.to_string(), secs))
        .collect();

        Self { version: 1, clips }
    }
}

impl AnimationLibrary {
    /// Parse a clip table; entries override the built-in lengths.
    pub fn from_json(contents: &str) -> Result<Self, serde_json::Error> {
        let parsed: AnimationsJson = serde_json::from_str(contents)?;
        let mut library = Self::default();
        library.version = parsed.version;
        library.clips.extend(parsed.clips);
        Ok(library)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, ContentLoadError> {
        let file = path.display().to_string();
        let contents = fs::read_to_string(path).map_err(|e| ContentLoadError {
            file: file.clone(),
            message: format!("IO error: {}", e),
        })?;

        Self::from_json(&contents).map_err(|e| ContentLoadError {
            file,
            message: format!("Parse error: {}", e),
        })
    }

    pub fn duration(&self, clip: &str) -> f32 {
        match self.clips.get(clip) {
            Some(secs) => *secs,
            None => {
                debug!("No length for clip {}, using fallback", clip);
                FALLBACK_CLIP_SECONDS
            }
        }
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn clips(&self) -> impl Iterator<Item = (&str, f32)> {
        self.clips.iter().map(|(name, secs)| (name.as_str(), *secs))
    }
}
