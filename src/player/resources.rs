//! Player domain: tuning and per-frame input resources.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub max_health: f32,
    pub walk_speed: f32,
    pub run_speed: f32,
    pub dash_force: f32,
    pub dash_duration: f32,
    pub dash_cooldown: f32,
    pub light_attack_damage: f32,
    pub heavy_attack_damage: f32,
    pub attack_range: f32,
    pub light_attack_cooldown: f32,
    pub heavy_attack_cooldown: f32,
    /// Fixed movement lock after any attack, independent of the clip length
    pub attack_move_lock_duration: f32,
    pub projectile_speed: f32,
    pub projectile_damage: f32,
    pub reload_time: f32,
    pub firepoint_rotation_speed: f32,
    /// Distance the firepoint keeps ahead of the character
    pub firepoint_distance: f32,
    pub ground_check_radius: f32,
    /// Input magnitude below which the stick counts as centred
    pub input_threshold: f32,
    pub hurt_blink_duration: f32,
    pub hurt_blink_interval: f32,
    /// Whole invulnerability window measured from the hit
    pub invulnerability_duration: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            walk_speed: 2.0,
            run_speed: 6.0,
            dash_force: 15.0,
            dash_duration: 0.3,
            dash_cooldown: 0.5,
            light_attack_damage: 10.0,
            heavy_attack_damage: 25.0,
            attack_range: 1.5,
            light_attack_cooldown: 0.3,
            heavy_attack_cooldown: 0.7,
            attack_move_lock_duration: 1.0,
            projectile_speed: 20.0,
            projectile_damage: 50.0,
            reload_time: 3.0,
            firepoint_rotation_speed: 10.0,
            firepoint_distance: 1.0,
            ground_check_radius: 0.2,
            input_threshold: 0.1,
            hurt_blink_duration: 0.5,
            hurt_blink_interval: 0.1,
            invulnerability_duration: 1.0,
        }
    }
}

impl PlayerTuning {
    /// Movement speed for a stick deflection in `0..=1`.
    pub fn speed_for(&self, magnitude: f32) -> f32 {
        let t = magnitude.clamp(0.0, 1.0);
        self.walk_speed + (self.run_speed - self.walk_speed) * t
    }

    /// Number of visibility toggles during the hurt blink.
    pub fn hurt_blink_count(&self) -> u32 {
        if self.hurt_blink_interval <= 0.0 {
            return 0;
        }
        (self.hurt_blink_duration / self.hurt_blink_interval).round() as u32
    }
}

/// Snapshot of the player's input for one frame.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// Directional input in `[-1, 1]^2`; +Y maps to world +Z
    pub axis: Vec2,
    pub dash_just_pressed: bool,
    pub light_attack_just_pressed: bool,
    pub heavy_attack_just_pressed: bool,
    pub shoot_just_pressed: bool,
}

impl FrameInput {
    pub fn with_axis(axis: Vec2) -> Self {
        Self {
            axis,
            ..Default::default()
        }
    }
}
