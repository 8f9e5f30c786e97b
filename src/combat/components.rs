//! Combat domain: components for damageable targets and contact volumes.

use bevy::prelude::*;

/// Health pool for anything that can be damaged.
#[derive(Debug, Clone, PartialEq)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let actual = amount.min(self.current).max(0.0);
        self.current -= actual;
        actual
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    pub fn percent(&self) -> f32 {
        self.current / self.max
    }
}

/// The "damageable" capability: attacks and projectiles look for this.
#[derive(Component, Debug, Clone)]
pub struct Damageable {
    pub health: Health,
    /// Contact radius used by overlap queries
    pub radius: f32,
}

impl Damageable {
    pub fn new(max_health: f32, radius: f32) -> Self {
        Self {
            health: Health::new(max_health),
            radius,
        }
    }
}

/// Gold paid out when the damageable carrying it is defeated.
#[derive(Component, Debug, Clone, Copy)]
pub struct Bounty {
    pub gold: u32,
}

/// Static geometry that stops projectiles.
#[derive(Component, Debug, Clone, Copy)]
pub struct Obstacle {
    pub radius: f32,
}

/// Pickup that instantly reloads the player's spell.
#[derive(Component, Debug, Clone, Copy)]
pub struct ReloadPickup {
    pub radius: f32,
}

/// True when a sphere of `radius` around `a` reaches point `b`.
pub fn within_reach(a: Vec3, b: Vec3, radius: f32) -> bool {
    a.distance_squared(b) <= radius * radius
}
