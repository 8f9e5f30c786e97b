//! Player domain: the action state machine.
//!
//! [`PlayerController::update`] is a function of the controller state, one
//! [`FrameInput`] snapshot and the elapsed time. Within a tick the order is
//! fixed: timers and routines advance, ground is sensed, movement and aim are
//! handled, then input-triggered actions are dispatched.

use bevy::prelude::*;

use crate::combat::ProjectileLaunch;
use crate::player::components::{
    ActionState, AttackKind, CLIP_CAST, CLIP_DASH, CLIP_DIE, CLIP_HURT, CLIP_IDLE, CLIP_WALK,
    DirectionIndicator, Facing, PlayerState,
};
use crate::player::host::{Animator, Capability, PlayerHost};
use crate::player::resources::{FrameInput, PlayerTuning};
use crate::player::routines::{DASH_ROUTINE, DashRoutine, HURT_ROUTINE, HurtRoutine};
use crate::timing::{Routines, Scheduler};

const INDICATOR_DROP: f32 = -0.7;
const INDICATOR_RADIUS: f32 = 0.5;

/// One-shot callbacks the controller schedules for itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerTimer {
    LightAttackReady,
    HeavyAttackReady,
    DashReady,
    ShotReloaded,
    MoveUnlocked,
    AnimationFinished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Already dead or invulnerable
    Ignored,
    Hurt,
    /// Health reached zero; the death signal for this character
    Killed,
}

/// State plus the scheduler its callbacks live in. Routines borrow this as
/// their context.
#[derive(Debug)]
pub struct PlayerCore {
    pub(super) tuning: PlayerTuning,
    pub(super) state: PlayerState,
    pub(super) timers: Scheduler<PlayerTimer>,
    last_clip: Option<&'static str>,
}

impl PlayerCore {
    fn new(tuning: PlayerTuning) -> Self {
        let state = PlayerState::new(tuning.max_health, tuning.firepoint_distance);
        Self {
            tuning,
            state,
            timers: Scheduler::new(),
            last_clip: None,
        }
    }

    /// Zero planar velocity, keeping whatever vertical speed the host reports.
    pub(super) fn halt(&mut self) {
        self.state.velocity.x = 0.0;
        self.state.velocity.z = 0.0;
    }

    fn play_clip<A: Animator>(&mut self, animator: &mut A, clip: &'static str, lock: bool) {
        let length = animator.play(clip);
        self.last_clip = Some(clip);
        if lock {
            self.state.is_playing_animation = true;
            self.timers.schedule(length, PlayerTimer::AnimationFinished);
        }
    }

    fn on_timer(&mut self, timer: PlayerTimer) {
        match timer {
            PlayerTimer::LightAttackReady => self.state.can_light_attack = true,
            PlayerTimer::HeavyAttackReady => self.state.can_heavy_attack = true,
            PlayerTimer::DashReady => self.state.can_dash = true,
            PlayerTimer::ShotReloaded => {
                self.state.can_shoot = true;
                debug!("Projectile reloaded!");
            }
            PlayerTimer::MoveUnlocked => self.state.can_move = true,
            PlayerTimer::AnimationFinished => {
                self.state.is_playing_animation = false;
                self.state.is_attack_animation = false;
                self.state.active_attack = None;
                self.state.casting = false;
            }
        }
    }

    fn handle_movement<A: Animator>(&mut self, input: &FrameInput, animator: &mut A) {
        if !self.state.can_move || self.state.is_attack_animation {
            return;
        }

        let axis = input.axis.clamp_length_max(1.0);
        self.state.move_input = axis;

        let magnitude = axis.length();
        let speed = self.tuning.speed_for(magnitude);
        self.state.velocity.x = axis.x * speed;
        self.state.velocity.z = axis.y * speed;

        self.update_indicator();

        if axis.x != 0.0 {
            self.state.facing = if axis.x < 0.0 {
                Facing::Left
            } else {
                Facing::Right
            };
        }

        let clip = if magnitude > self.tuning.input_threshold {
            CLIP_WALK
        } else {
            CLIP_IDLE
        };
        if self.last_clip != Some(clip) {
            self.play_clip(animator, clip, false);
        }
    }

    fn update_indicator(&mut self) {
        let axis = self.state.move_input;
        if axis.length() > self.tuning.input_threshold {
            self.state.indicator = DirectionIndicator {
                visible: true,
                yaw_degrees: axis.x.atan2(axis.y).to_degrees(),
                offset: Vec3::new(axis.x, INDICATOR_DROP, axis.y).normalize() * INDICATOR_RADIUS,
            };
        } else {
            self.state.indicator.visible = false;
        }
    }

    fn handle_firepoint(&mut self, input: &FrameInput, dt: f32) {
        let axis = input.axis;
        if axis.length() <= self.tuning.input_threshold {
            return;
        }

        let direction = Vec3::new(axis.x, 0.0, axis.y).normalize();
        let target = Quat::from_rotation_y(direction.x.atan2(direction.z));
        let t = (dt * self.tuning.firepoint_rotation_speed).clamp(0.0, 1.0);

        let firepoint = &mut self.state.firepoint;
        firepoint.rotation = firepoint.rotation.slerp(target, t);
        firepoint.offset = direction * self.tuning.firepoint_distance;
        self.state.last_shoot_direction = direction;
    }

    /// Spend the attack's ready flag and schedule its reset. Pressing an
    /// attack that is ready always spends it, even when the lock drops the
    /// swing.
    fn start_attack_cooldown(&mut self, kind: AttackKind) {
        let (cooldown, ready) = match kind {
            AttackKind::Light => {
                self.state.can_light_attack = false;
                (
                    self.tuning.light_attack_cooldown,
                    PlayerTimer::LightAttackReady,
                )
            }
            AttackKind::Heavy => {
                self.state.can_heavy_attack = false;
                (
                    self.tuning.heavy_attack_cooldown,
                    PlayerTimer::HeavyAttackReady,
                )
            }
        };
        self.timers.schedule(cooldown, ready);
    }

    fn attack<H: PlayerHost>(&mut self, kind: AttackKind, host: &mut H) -> bool {
        if self.state.is_playing_animation {
            debug!("{:?} attack dropped: animation lock held", kind);
            return false;
        }

        let damage = match kind {
            AttackKind::Light => self.tuning.light_attack_damage,
            AttackKind::Heavy => self.tuning.heavy_attack_damage,
        };

        self.state.is_attack_animation = true;
        self.state.active_attack = Some(kind);
        self.state.can_move = false;
        self.halt();
        self.play_clip(host, kind.clip(), true);
        self.timers.schedule(
            self.tuning.attack_move_lock_duration,
            PlayerTimer::MoveUnlocked,
        );

        let damage = damage as i32;
        let origin = host.position() + self.state.firepoint.offset;
        for target in host.find_overlapping(origin, self.tuning.attack_range, Capability::Damageable)
        {
            host.apply_damage(target, damage);
            debug!("Hit {:?}, damage: {}", target, damage);
        }
        true
    }

    fn shoot<H: PlayerHost>(&mut self, host: &mut H) -> bool {
        if !self.state.can_shoot || self.state.is_playing_animation {
            return false;
        }

        let launch = ProjectileLaunch {
            origin: host.position() + self.state.firepoint.offset,
            direction: self.state.shoot_direction(),
            speed: self.tuning.projectile_speed,
            damage: self.tuning.projectile_damage as i32,
        };
        if !host.spawn_projectile(launch) {
            warn!("No projectile template available; shot dropped");
            return false;
        }

        self.play_clip(host, CLIP_CAST, true);
        self.state.casting = true;
        self.state.can_shoot = false;
        self.timers
            .schedule(self.tuning.reload_time, PlayerTimer::ShotReloaded);
        true
    }

    fn die<A: Animator>(&mut self, animator: &mut A) {
        info!("Player has died.");
        self.play_clip(animator, CLIP_DIE, false);
        self.state.can_move = false;
        self.state.velocity = Vec3::ZERO;
    }
}

#[derive(Component, Debug)]
pub struct PlayerController {
    core: PlayerCore,
    routines: Routines<PlayerCore>,
}

impl PlayerController {
    pub fn new(tuning: PlayerTuning) -> Self {
        Self {
            core: PlayerCore::new(tuning),
            routines: Routines::new(),
        }
    }

    pub fn state(&self) -> &PlayerState {
        &self.core.state
    }

    pub fn tuning(&self) -> &PlayerTuning {
        &self.core.tuning
    }

    /// Seconds until `timer` fires, if it is pending.
    pub fn time_until(&self, timer: PlayerTimer) -> Option<f32> {
        self.core.timers.time_until(&timer)
    }

    pub fn action_state(&self) -> ActionState {
        let state = &self.core.state;
        if state.is_dead() {
            ActionState::Dead
        } else if self.routines.is_running(DASH_ROUTINE) {
            ActionState::Dash
        } else if self.routines.is_running(HURT_ROUTINE) && !state.can_move {
            ActionState::Hurt
        } else if state.is_attack_animation {
            match state.active_attack {
                Some(AttackKind::Heavy) => ActionState::HeavyAttack,
                _ => ActionState::LightAttack,
            }
        } else if state.casting && state.is_playing_animation {
            ActionState::Shoot
        } else if state.can_move && state.move_input.length() > self.core.tuning.input_threshold {
            ActionState::Move
        } else {
            ActionState::Idle
        }
    }

    /// Advance the state machine by one frame.
    pub fn update<H: PlayerHost>(&mut self, input: &FrameInput, dt: f32, host: &mut H) {
        for timer in self.core.timers.advance(dt) {
            self.core.on_timer(timer);
        }
        let now = self.core.timers.now();
        self.routines.poll(&mut self.core, now, dt);

        self.core.state.is_grounded = host.is_grounded();

        if self.core.state.is_dead() {
            return;
        }

        let state = &self.core.state;
        if !state.is_playing_animation || !state.is_attack_animation {
            self.core.handle_movement(input, host);
            self.core.handle_firepoint(input, dt);
        }

        self.handle_actions(input, dt, host);
    }

    fn handle_actions<H: PlayerHost>(&mut self, input: &FrameInput, dt: f32, host: &mut H) {
        let state = &self.core.state;
        if input.dash_just_pressed && state.can_dash && state.can_move && state.is_grounded {
            self.start_dash(dt, host);
        }

        if input.light_attack_just_pressed && self.core.state.can_light_attack {
            self.core.start_attack_cooldown(AttackKind::Light);
            self.core.attack(AttackKind::Light, host);
        }

        if input.heavy_attack_just_pressed && self.core.state.can_heavy_attack {
            self.core.start_attack_cooldown(AttackKind::Heavy);
            self.core.attack(AttackKind::Heavy, host);
        }

        if input.shoot_just_pressed {
            self.core.shoot(host);
        }
    }

    fn start_dash<A: Animator>(&mut self, dt: f32, animator: &mut A) {
        if self.core.state.is_playing_animation {
            debug!("Dash dropped: animation lock held");
            return;
        }

        self.core.play_clip(animator, CLIP_DASH, true);
        let axis = self.core.state.move_input;
        let direction = Vec3::new(axis.x, 0.0, axis.y).normalize_or_zero();
        self.core.state.can_move = false;

        let now = self.core.timers.now();
        self.routines
            .start(Box::new(DashRoutine::new(direction)), &mut self.core, now, dt);
    }

    /// Apply incoming damage. Returns [`DamageOutcome::Killed`] exactly once
    /// per character.
    pub fn take_damage<A: Animator>(&mut self, amount: f32, animator: &mut A) -> DamageOutcome {
        let state = &mut self.core.state;
        if state.current_health <= 0.0 || state.is_invulnerable {
            return DamageOutcome::Ignored;
        }

        state.current_health -= amount;
        info!(
            "Player took {} damage. Current health: {}",
            amount, state.current_health
        );

        if state.current_health > 0.0 {
            self.core.play_clip(animator, CLIP_HURT, true);
            let toggles = self.core.tuning.hurt_blink_count();
            let now = self.core.timers.now();
            self.routines
                .start(Box::new(HurtRoutine::new(toggles)), &mut self.core, now, 0.0);
            DamageOutcome::Hurt
        } else {
            self.core.die(animator);
            DamageOutcome::Killed
        }
    }

    /// A reload pickup re-arms the spell immediately.
    pub fn pickup_reload(&mut self) {
        self.core.state.can_shoot = true;
        debug!("Projectile reloaded by pickup");
    }
}
