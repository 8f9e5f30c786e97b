//! Content domain: gameplay data read from assets/data at startup.

mod animations;
mod data;
mod loader;
mod validation;


pub use animations::{AnimationLibrary, FALLBACK_CLIP_SECONDS};
pub use data::{AnchorDef, GameplayDefaults, MapDef, ObstacleDef, RunDefs, SceneDef};
pub use loader::{ContentLoadError, LoadedContent, load_all_content, parse_gameplay};
pub use validation::{MIN_STAGE_POOL, ValidationIssue, validate_content};

use bevy::prelude::*;
use std::path::Path;

pub const CONTENT_DIR: &str = "assets/data";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        let content = load_all_content(Path::new(CONTENT_DIR));
        for error in &content.errors {
            warn!("{}; using built-in defaults", error);
        }

        let issues = validate_content(&content.gameplay, &content.animations);
        for issue in &issues {
            warn!("Content validation: {}", issue);
        }

        info!(
            "Loaded content: {} maps, {} scenes, {} clips ({} issues)",
            content.gameplay.run.maps.len(),
            content.gameplay.scenes.len(),
            content.animations.len(),
            issues.len()
        );

        app.insert_resource(content.gameplay.player.clone())
            .insert_resource(content.gameplay.projectile.clone())
            .insert_resource(content.gameplay)
            .insert_resource(content.animations);
    }
}
