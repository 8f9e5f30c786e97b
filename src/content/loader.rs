//! Loader for the content files read at startup.

use bevy::prelude::*;
use ron::Options;
use std::fs;
use std::path::Path;

use super::animations::AnimationLibrary;
use super::data::GameplayDefaults;

pub const GAMEPLAY_FILE: &str = "gameplay.ron";
pub const ANIMATIONS_FILE: &str = "animations.json";

/// Error type for content loading failures.
#[derive(Debug)]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

impl std::error::Error for ContentLoadError {}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse gameplay defaults from RON text.
pub fn parse_gameplay(contents: &str, file: &str) -> Result<GameplayDefaults, ContentLoadError> {
    ron_options()
        .from_str(contents)
        .map_err(|e| ContentLoadError {
            file: file.to_string(),
            message: format!("Parse error: {}", e),
        })
}

/// Load a single RON struct.
fn load_gameplay_file(path: &Path) -> Result<GameplayDefaults, ContentLoadError> {
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| ContentLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    parse_gameplay(&contents, &file_name)
}

/// Content read from assets/data, with built-in defaults standing in for any
/// file that failed to load.
#[derive(Debug)]
pub struct LoadedContent {
    pub gameplay: GameplayDefaults,
    pub animations: AnimationLibrary,
    pub errors: Vec<ContentLoadError>,
}

/// Load all content from `base_path`.
pub fn load_all_content(base_path: &Path) -> LoadedContent {
    let mut errors = Vec::new();

    let gameplay = match load_gameplay_file(&base_path.join(GAMEPLAY_FILE)) {
        Ok(defaults) => defaults,
        Err(e) => {
            errors.push(e);
            GameplayDefaults::default()
        }
    };

    let animations = match AnimationLibrary::load_from_file(&base_path.join(ANIMATIONS_FILE)) {
        Ok(library) => library,
        Err(e) => {
            errors.push(e);
            AnimationLibrary::default()
        }
    };

    LoadedContent {
        gameplay,
        animations,
        errors,
    }
}
