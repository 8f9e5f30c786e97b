//! Combat domain: projectile flight, contacts and damage application.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::components::{Bounty, Damageable, Obstacle, within_reach};
use crate::combat::events::{DamageEvent, DamageSource};
use crate::combat::projectile::{Contact, Projectile, ProjectileEnd, ProjectileStep};
use crate::combat::resources::ProjectileTuning;
use crate::rewards::{Currency, CurrencyGainedEvent, CurrencySource};

pub(crate) fn advance_projectiles(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Projectile, &mut Transform)>,
) {
    let dt = time.delta_secs();

    for (entity, mut projectile, mut transform) in &mut query {
        match projectile.advance(dt) {
            ProjectileStep::Moved(delta) => {
                transform.translation += delta;
                // Billboarded sprite: never inherit rotation, mirror on X instead
                transform.rotation = Quat::IDENTITY;
                let sign = if projectile.faces_right() { 1.0 } else { -1.0 };
                transform.scale.x = transform.scale.x.abs() * sign;
            }
            ProjectileStep::Ended(end) => {
                debug!("Projectile {:?} ended: {:?}", entity, end);
                commands.entity(entity).despawn();
            }
            ProjectileStep::Gone => {}
        }
    }
}

/// Enemies take priority over walls when a projectile touches both.
pub(crate) fn resolve_projectile_contacts(
    mut commands: Commands,
    tuning: Res<ProjectileTuning>,
    mut projectiles: Query<(Entity, &Transform, &mut Projectile)>,
    targets: Query<(Entity, &Transform, &Damageable), Without<Projectile>>,
    obstacles: Query<(&Transform, &Obstacle), Without<Projectile>>,
    mut damage_events: MessageWriter<DamageEvent>,
) {
    for (entity, transform, mut projectile) in &mut projectiles {
        if projectile.is_destroyed() {
            continue;
        }
        let position = transform.translation;

        let enemy_hit = targets.iter().find(|(_, target_transform, damageable)| {
            within_reach(
                position,
                target_transform.translation,
                tuning.radius + damageable.radius,
            )
        });

        let end = if let Some((target, _, _)) = enemy_hit {
            let end = projectile.on_contact(Contact::Enemy);
            if let Some(ProjectileEnd::Hit { damage }) = end {
                damage_events.write(DamageEvent {
                    target,
                    amount: damage as f32,
                    source: DamageSource::Projectile,
                });
                debug!("Projectile hit the enemy {:?}", target);
            }
            end
        } else if obstacles.iter().any(|(obstacle_transform, obstacle)| {
            within_reach(
                position,
                obstacle_transform.translation,
                tuning.radius + obstacle.radius,
            )
        }) {
            debug!("Projectile hit the wall.");
            projectile.on_contact(Contact::Wall)
        } else {
            None
        };

        if end.is_some() {
            commands.entity(entity).despawn();
        }
    }
}

pub(crate) fn apply_damage_to_targets(
    mut commands: Commands,
    mut damage_events: MessageReader<DamageEvent>,
    mut targets: Query<(&mut Damageable, Option<&Bounty>)>,
    mut currency: MessageWriter<CurrencyGainedEvent>,
) {
    for event in damage_events.read() {
        let Ok((mut damageable, bounty)) = targets.get_mut(event.target) else {
            continue;
        };
        if damageable.health.is_dead() {
            continue;
        }

        let dealt = damageable.health.take_damage(event.amount);
        debug!(
            "{:?} took {} damage from {:?} ({:.0}% left)",
            event.target,
            dealt,
            event.source,
            damageable.health.percent() * 100.0
        );

        if damageable.health.is_dead() {
            info!("{:?} defeated", event.target);
            if let Some(bounty) = bounty {
                currency.write(CurrencyGainedEvent {
                    currency: Currency::Gold,
                    amount: bounty.gold,
                    source: CurrencySource::EnemyDrop,
                });
            }
            commands.entity(event.target).despawn();
        }
    }
}
