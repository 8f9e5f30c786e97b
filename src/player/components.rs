//! Player domain: components and the state owned by the action state machine.

use bevy::prelude::*;

use crate::combat::DEFAULT_AIM;

pub const CLIP_IDLE: &str = "P_Idle";
pub const CLIP_WALK: &str = "P_Walk";
pub const CLIP_LIGHT_ATTACK: &str = "P_LAttack";
pub const CLIP_HEAVY_ATTACK: &str = "P_HAttack";
pub const CLIP_DASH: &str = "P_Dash";
pub const CLIP_CAST: &str = "P_CastSpell";
pub const CLIP_HURT: &str = "P_Hurt";
pub const CLIP_DIE: &str = "P_Die";

#[derive(Component, Debug)]
pub struct Player;

/// Name of the clip currently requested from the animator.
#[derive(Component, Debug, Default)]
pub struct PlayerAnimation {
    pub current: Option<String>,
    /// Action state reported after the last update
    pub action: Option<ActionState>,
}

/// Child entity carrying the character sprite. Mirrored on X to match
/// [`Facing`].
#[derive(Component, Debug, Default)]
pub struct PlayerSprite;

/// Child entity drawn as the movement arrow.
#[derive(Component, Debug, Default)]
pub struct IndicatorView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    /// X scale applied to sprites: positive when facing right.
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackKind {
    Light,
    Heavy,
}

impl AttackKind {
    pub fn clip(self) -> &'static str {
        match self {
            AttackKind::Light => CLIP_LIGHT_ATTACK,
            AttackKind::Heavy => CLIP_HEAVY_ATTACK,
        }
    }
}

/// Observable state of the action state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionState {
    Idle,
    Move,
    LightAttack,
    HeavyAttack,
    Dash,
    Shoot,
    Hurt,
    Dead,
}

/// Aim point that trails the latest directional input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Firepoint {
    /// Offset from the character position
    pub offset: Vec3,
    pub rotation: Quat,
}

/// Arrow shown under the character while the stick is deflected.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DirectionIndicator {
    pub visible: bool,
    pub yaw_degrees: f32,
    pub offset: Vec3,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub max_health: f32,
    pub current_health: f32,
    pub can_move: bool,
    pub can_dash: bool,
    pub can_light_attack: bool,
    pub can_heavy_attack: bool,
    pub can_shoot: bool,
    /// Animation lock: no attack, dash or shot may start while set
    pub is_playing_animation: bool,
    /// Set by attacks; suppresses movement until the clip ends
    pub is_attack_animation: bool,
    pub is_invulnerable: bool,
    pub is_grounded: bool,
    /// Sprite visibility, toggled by the hurt blink
    pub visible: bool,
    pub active_attack: Option<AttackKind>,
    pub casting: bool,
    pub move_input: Vec2,
    pub velocity: Vec3,
    pub facing: Facing,
    pub last_shoot_direction: Vec3,
    pub firepoint: Firepoint,
    pub indicator: DirectionIndicator,
}

impl PlayerState {
    pub fn new(max_health: f32, firepoint_distance: f32) -> Self {
        Self {
            max_health,
            current_health: max_health,
            can_move: true,
            can_dash: true,
            can_light_attack: true,
            can_heavy_attack: true,
            can_shoot: true,
            is_playing_animation: false,
            is_attack_animation: false,
            is_invulnerable: false,
            is_grounded: false,
            visible: true,
            active_attack: None,
            casting: false,
            move_input: Vec2::ZERO,
            velocity: Vec3::ZERO,
            facing: Facing::default(),
            last_shoot_direction: DEFAULT_AIM,
            firepoint: Firepoint {
                offset: DEFAULT_AIM * firepoint_distance,
                rotation: Quat::IDENTITY,
            },
            indicator: DirectionIndicator::default(),
        }
    }

    pub fn is_dead(&self) -> bool {
        self.current_health <= 0.0
    }

    /// Aim for the next shot; near-zero stored aims fall back to forward.
    pub fn shoot_direction(&self) -> Vec3 {
        if self.last_shoot_direction.length() > 0.1 {
            self.last_shoot_direction
        } else {
            DEFAULT_AIM
        }
    }
}
