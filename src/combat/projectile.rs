//! Combat domain: spell projectile flight, contact resolution and expiry.

use bevy::prelude::*;

/// Canonical aim used when no usable shoot direction exists.
pub const DEFAULT_AIM: Vec3 = Vec3::Z;

/// Everything needed to put a projectile into the world. The shooter hands
/// this to its host and keeps no reference to the result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileLaunch {
    pub origin: Vec3,
    pub direction: Vec3,
    pub speed: f32,
    pub damage: i32,
}

/// What a projectile touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    Enemy,
    Wall,
    Other,
}

/// Why a projectile was destroyed. Reported exactly once per projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileEnd {
    Hit { damage: i32 },
    Blocked,
    Expired,
}

/// Result of advancing a projectile by one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectileStep {
    Moved(Vec3),
    Ended(ProjectileEnd),
    Gone,
}

#[derive(Component, Debug, Clone)]
pub struct Projectile {
    direction: Vec3,
    speed: f32,
    damage: i32,
    remaining: f32,
    ended: Option<ProjectileEnd>,
}

impl Projectile {
    pub fn launch(launch: &ProjectileLaunch, lifetime: f32) -> Self {
        let direction = launch.direction.try_normalize().unwrap_or(DEFAULT_AIM);
        debug!("Projectile launched with direction: {}", direction);
        Self {
            direction,
            speed: launch.speed,
            damage: launch.damage,
            remaining: lifetime,
            ended: None,
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.ended.is_some()
    }

    /// Sprite faces right when flying toward +X.
    pub fn faces_right(&self) -> bool {
        self.direction.x > 0.0
    }

    /// Burn `dt` of lifetime and report the displacement for this tick.
    pub fn advance(&mut self, dt: f32) -> ProjectileStep {
        if self.ended.is_some() {
            return ProjectileStep::Gone;
        }

        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.ended = Some(ProjectileEnd::Expired);
            return ProjectileStep::Ended(ProjectileEnd::Expired);
        }

        ProjectileStep::Moved(self.direction * self.speed * dt)
    }

    /// Resolve a contact. Enemies take the projectile's damage and walls
    /// block it; anything else is passed through.
    pub fn on_contact(&mut self, contact: Contact) -> Option<ProjectileEnd> {
        if self.ended.is_some() {
            return None;
        }

        let end = match contact {
            Contact::Enemy => ProjectileEnd::Hit {
                damage: self.damage,
            },
            Contact::Wall => ProjectileEnd::Blocked,
            Contact::Other => return None,
        };
        self.ended = Some(end);
        Some(end)
    }
}
