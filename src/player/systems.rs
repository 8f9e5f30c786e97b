//! Player domain: systems binding the controller to the ECS world.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::{
    DamageEvent, DamageSource, Damageable, Projectile, ProjectileLaunch, ProjectileTuning,
    ReloadPickup, within_reach,
};
use crate::content::AnimationLibrary;
use crate::core::{PlayerDiedEvent, SceneScoped};
use crate::player::components::{IndicatorView, Player, PlayerAnimation, PlayerSprite};
use crate::player::controller::{DamageOutcome, PlayerController};
use crate::player::host::{Animator, Capability, PlayerHost};
use crate::player::resources::{FrameInput, PlayerTuning};

/// Height of the walkable floor in every scene.
const GROUND_LEVEL: f32 = 0.0;

/// Plays clips by recording them on the entity and reading lengths from the
/// clip library.
struct ClipAnimator<'a> {
    clips: &'a AnimationLibrary,
    animation: &'a mut PlayerAnimation,
}

impl Animator for ClipAnimator<'_> {
    fn play(&mut self, clip: &str) -> f32 {
        self.animation.current = Some(clip.to_string());
        self.clips.duration(clip)
    }
}

#[derive(Debug, Clone, Copy)]
struct TargetSnapshot {
    entity: Entity,
    position: Vec3,
    radius: f32,
}

/// Per-frame host: world reads come from snapshots taken before the update,
/// world writes are buffered and applied by the system afterwards.
struct FrameHost<'a> {
    position: Vec3,
    grounded: bool,
    animator: ClipAnimator<'a>,
    targets: &'a [TargetSnapshot],
    projectile_template: Option<&'a str>,
    hits: Vec<(Entity, i32)>,
    launches: Vec<ProjectileLaunch>,
}

impl Animator for FrameHost<'_> {
    fn play(&mut self, clip: &str) -> f32 {
        self.animator.play(clip)
    }
}

impl PlayerHost for FrameHost<'_> {
    type Target = Entity;

    fn position(&self) -> Vec3 {
        self.position
    }

    fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn find_overlapping(&self, point: Vec3, radius: f32, capability: Capability) -> Vec<Entity> {
        match capability {
            Capability::Damageable => self
                .targets
                .iter()
                .filter(|t| within_reach(point, t.position, radius + t.radius))
                .map(|t| t.entity)
                .collect(),
        }
    }

    fn apply_damage(&mut self, target: Entity, amount: i32) {
        self.hits.push((target, amount));
    }

    fn spawn_projectile(&mut self, launch: ProjectileLaunch) -> bool {
        if self.projectile_template.is_none() {
            return false;
        }
        self.launches.push(launch);
        true
    }
}

pub(crate) fn read_player_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    gamepads: Query<&Gamepad>,
    mut input: ResMut<FrameInput>,
) {
    let mut x = 0.0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        x += 1.0;
    }

    let mut y = 0.0;
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        y += 1.0;
    }

    let mut axis = Vec2::new(x, y);
    let mut dash = keyboard.just_pressed(KeyCode::Space);
    let mut light = keyboard.just_pressed(KeyCode::KeyJ);
    let mut heavy = keyboard.just_pressed(KeyCode::KeyK);
    let mut shoot = keyboard.just_pressed(KeyCode::KeyL);

    for gamepad in &gamepads {
        let stick = gamepad.left_stick();
        if stick.length() > axis.length() {
            axis = stick;
        }
        dash |= gamepad.just_pressed(GamepadButton::South);
        light |= gamepad.just_pressed(GamepadButton::West);
        heavy |= gamepad.just_pressed(GamepadButton::North);
        shoot |= gamepad.just_pressed(GamepadButton::East);
    }

    *input = FrameInput {
        dash_just_pressed: dash,
        light_attack_just_pressed: light,
        heavy_attack_just_pressed: heavy,
        shoot_just_pressed: shoot,
        ..FrameInput::with_axis(axis.clamp_length_max(1.0))
    };
}

pub(crate) fn drive_players(
    mut commands: Commands,
    time: Res<Time>,
    input: Res<FrameInput>,
    clips: Res<AnimationLibrary>,
    projectile_tuning: Res<ProjectileTuning>,
    mut players: Query<(&Transform, &mut PlayerController, &mut PlayerAnimation), With<Player>>,
    targets: Query<(Entity, &Transform, &Damageable), Without<Player>>,
    mut damage_events: MessageWriter<DamageEvent>,
) {
    let dt = time.delta_secs();
    let snapshot: Vec<TargetSnapshot> = targets
        .iter()
        .map(|(entity, transform, damageable)| TargetSnapshot {
            entity,
            position: transform.translation,
            radius: damageable.radius,
        })
        .collect();

    for (transform, mut controller, mut animation) in &mut players {
        let grounded = transform.translation.y
            <= GROUND_LEVEL + controller.tuning().ground_check_radius;

        let mut host = FrameHost {
            position: transform.translation,
            grounded,
            animator: ClipAnimator {
                clips: &clips,
                animation: &mut animation,
            },
            targets: &snapshot,
            projectile_template: projectile_tuning.template.as_deref(),
            hits: Vec::new(),
            launches: Vec::new(),
        };
        controller.update(&input, dt, &mut host);

        let FrameHost { hits, launches, .. } = host;
        let action = controller.action_state();
        if animation.action != Some(action) {
            debug!("Player action: {:?} -> {:?}", animation.action, action);
            animation.action = Some(action);
        }
        for (target, amount) in hits {
            damage_events.write(DamageEvent {
                target,
                amount: amount as f32,
                source: DamageSource::Melee,
            });
        }
        for launch in launches {
            let template = projectile_tuning.template.clone().unwrap_or_default();
            commands.spawn((
                Name::new(template),
                Projectile::launch(&launch, projectile_tuning.lifetime),
                SceneScoped,
                Transform::from_translation(launch.origin),
                Visibility::default(),
            ));
        }
    }
}

pub(crate) fn integrate_player_motion(
    time: Res<Time>,
    mut query: Query<(&PlayerController, &mut Transform), With<Player>>,
) {
    let dt = time.delta_secs();
    for (controller, mut transform) in &mut query {
        transform.translation += controller.state().velocity * dt;
    }
}

pub(crate) fn sync_player_visibility(
    mut query: Query<(&PlayerController, &mut Visibility), With<Player>>,
) {
    for (controller, mut visibility) in &mut query {
        let wanted = if controller.state().visible {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        if *visibility != wanted {
            *visibility = wanted;
        }
    }
}

/// Mirror the sprite to the facing and place the movement arrow.
pub(crate) fn sync_player_presentation(
    players: Query<&PlayerController, With<Player>>,
    mut sprites: Query<(&ChildOf, &mut Transform), (With<PlayerSprite>, Without<IndicatorView>)>,
    mut indicators: Query<
        (&ChildOf, &mut Transform, &mut Visibility),
        (With<IndicatorView>, Without<PlayerSprite>),
    >,
) {
    for (child_of, mut transform) in &mut sprites {
        let Ok(controller) = players.get(child_of.parent()) else {
            continue;
        };
        let sign = controller.state().facing.sign();
        if transform.scale.x.signum() != sign {
            transform.scale.x = transform.scale.x.abs() * sign;
        }
    }

    for (child_of, mut transform, mut visibility) in &mut indicators {
        let Ok(controller) = players.get(child_of.parent()) else {
            continue;
        };
        let indicator = controller.state().indicator;
        if indicator.visible {
            transform.translation = indicator.offset;
            transform.rotation = Quat::from_rotation_y(indicator.yaw_degrees.to_radians());
        }
        let wanted = if indicator.visible {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        if *visibility != wanted {
            *visibility = wanted;
        }
    }
}

pub(crate) fn apply_damage_to_players(
    clips: Res<AnimationLibrary>,
    mut damage_events: MessageReader<DamageEvent>,
    mut players: Query<(&mut PlayerController, &mut PlayerAnimation), With<Player>>,
    mut died_events: MessageWriter<PlayerDiedEvent>,
) {
    for event in damage_events.read() {
        let Ok((mut controller, mut animation)) = players.get_mut(event.target) else {
            continue;
        };

        let mut animator = ClipAnimator {
            clips: &clips,
            animation: &mut animation,
        };
        if controller.take_damage(event.amount, &mut animator) == DamageOutcome::Killed {
            died_events.write(PlayerDiedEvent {
                player: event.target,
            });
        }
    }
}

pub(crate) fn collect_reload_pickups(
    mut commands: Commands,
    mut players: Query<(&Transform, &mut PlayerController), With<Player>>,
    pickups: Query<(Entity, &Transform, &ReloadPickup), Without<Player>>,
) {
    for (transform, mut controller) in &mut players {
        for (entity, pickup_transform, pickup) in &pickups {
            if within_reach(
                transform.translation,
                pickup_transform.translation,
                pickup.radius,
            ) {
                controller.pickup_reload();
                commands.entity(entity).despawn();
            }
        }
    }
}

/// Spawn a freshly initialised player placed at `transform`.
pub fn spawn_player(
    commands: &mut Commands,
    tuning: &PlayerTuning,
    template: &str,
    transform: Transform,
) -> Entity {
    commands
        .spawn((
            Name::new(template.to_string()),
            Player,
            PlayerController::new(tuning.clone()),
            PlayerAnimation::default(),
            SceneScoped,
            transform,
            Visibility::default(),
            children![
                (
                    Name::new("Sprite"),
                    PlayerSprite,
                    Transform::default(),
                    Visibility::default(),
                ),
                (
                    Name::new("DirectionIndicator"),
                    IndicatorView,
                    Transform::default(),
                    Visibility::Hidden,
                ),
            ],
        ))
        .id()
}
