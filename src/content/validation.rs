//! Validation for the loaded gameplay content.

use super::animations::AnimationLibrary;
use super::data::GameplayDefaults;

/// Entries a stage pool must hold to fill a run's queue.
pub const MIN_STAGE_POOL: usize = 4;

/// A validation issue with context about what failed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    pub source_type: &'static str,
    pub source_id: String,
    pub field: &'static str,
    pub problem: String,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} '{}' field '{}': {}",
            self.source_type, self.source_id, self.field, self.problem
        )
    }
}

/// Helper macro for recording an issue when a condition fails
macro_rules! check {
    ($issues:expr, $cond:expr, $source_type:expr, $source_id:expr, $field:expr, $($problem:tt)+) => {
        if !$cond {
            $issues.push(ValidationIssue {
                source_type: $source_type,
                source_id: $source_id.to_string(),
                field: $field,
                problem: format!($($problem)+),
            });
        }
    };
}

/// Validate gameplay content. Returns an empty list when everything is usable.
pub fn validate_content(
    defaults: &GameplayDefaults,
    animations: &AnimationLibrary,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let run = &defaults.run;

    // Maps
    for map in &run.maps {
        let id = map.id;
        check!(
            issues,
            map.stage_pool.len() >= MIN_STAGE_POOL,
            "Map",
            id,
            "stage_pool",
            "needs at least {} stages, has {}",
            MIN_STAGE_POOL,
            map.stage_pool.len()
        );
        for scene in map.scenes() {
            check!(issues, !scene.is_empty(), "Map", id, "scenes", "empty scene name");
        }
        let duplicates = run.maps.iter().filter(|m| m.id == id).count();
        check!(issues, duplicates == 1, "Map", id, "id", "defined {} times", duplicates);
    }

    // Run
    check!(
        issues,
        !run.lobby_scene.is_empty(),
        "Run",
        "run",
        "lobby_scene",
        "empty scene name"
    );
    check!(
        issues,
        run.player_template.as_deref().is_some_and(|t| !t.is_empty()),
        "Run",
        "run",
        "player_template",
        "no player template; respawns will abort"
    );
    check!(
        issues,
        run.respawn_delay >= 0.0,
        "Run",
        "run",
        "respawn_delay",
        "negative delay {}",
        run.respawn_delay
    );

    // Every scene the run can load must place the player
    let loadable = std::iter::once(run.lobby_scene.as_str())
        .chain(run.maps.iter().flat_map(|m| m.scenes()));
    for scene in loadable {
        let has_anchor = defaults
            .scene(scene)
            .is_some_and(|s| s.anchors.iter().any(|a| a.name == run.spawn_anchor));
        check!(
            issues,
            has_anchor,
            "Scene",
            scene,
            "anchors",
            "missing spawn anchor '{}'",
            run.spawn_anchor
        );
    }

    // Player tuning
    let player = &defaults.player;
    for (field, value) in [
        ("light_attack_cooldown", player.light_attack_cooldown),
        ("heavy_attack_cooldown", player.heavy_attack_cooldown),
        ("dash_cooldown", player.dash_cooldown),
        ("reload_time", player.reload_time),
        ("hurt_blink_interval", player.hurt_blink_interval),
    ] {
        check!(issues, value > 0.0, "Player", "player", field, "must be positive, got {}", value);
    }
    check!(
        issues,
        player.hurt_blink_duration <= player.invulnerability_duration,
        "Player",
        "player",
        "hurt_blink_duration",
        "blink outlasts the invulnerability window"
    );
    check!(
        issues,
        player.max_health > 0.0,
        "Player",
        "player",
        "max_health",
        "must be positive"
    );

    // Projectile
    check!(
        issues,
        defaults.projectile.lifetime > 0.0,
        "Projectile",
        "projectile",
        "lifetime",
        "must be positive"
    );

    // Animation clips
    for (clip, secs) in animations.clips() {
        check!(issues, secs >= 0.0, "Animation", clip, "length", "negative length {}", secs);
    }

    issues
}
