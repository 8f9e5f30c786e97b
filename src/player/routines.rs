//! Player domain: timed sequences for dashing and hurt recovery.

use bevy::prelude::*;

use crate::player::controller::{PlayerCore, PlayerTimer};
use crate::timing::{Routine, Yield};

pub(super) const DASH_ROUTINE: &str = "dash";
pub(super) const HURT_ROUTINE: &str = "hurt";

/// Drives velocity every tick for the dash duration, then re-arms the dash
/// after its cooldown.
pub(super) struct DashRoutine {
    direction: Vec3,
    elapsed: f32,
}

impl DashRoutine {
    pub(super) fn new(direction: Vec3) -> Self {
        Self {
            direction,
            elapsed: 0.0,
        }
    }
}

impl Routine<PlayerCore> for DashRoutine {
    fn label(&self) -> &'static str {
        DASH_ROUTINE
    }

    fn resume(&mut self, core: &mut PlayerCore, dt: f32) -> Yield {
        if core.state.is_dead() {
            core.state.velocity = Vec3::ZERO;
            return Yield::Done;
        }

        if self.elapsed < core.tuning.dash_duration {
            core.state.velocity = self.direction * core.tuning.dash_force;
            self.elapsed += dt;
            return Yield::NextTick;
        }

        core.state.velocity = Vec3::ZERO;
        core.state.can_move = true;
        core.state.can_dash = false;
        core.timers
            .schedule(core.tuning.dash_cooldown, PlayerTimer::DashReady);
        debug!("Dash finished after {:.2}s", self.elapsed);
        Yield::Done
    }
}

/// Blinks the sprite while movement is locked, then keeps the player
/// invulnerable until the full window has passed.
pub(super) struct HurtRoutine {
    toggles_left: u32,
    started: bool,
    recovering: bool,
}

impl HurtRoutine {
    pub(super) fn new(toggles: u32) -> Self {
        Self {
            toggles_left: toggles,
            started: false,
            recovering: false,
        }
    }
}

impl Routine<PlayerCore> for HurtRoutine {
    fn label(&self) -> &'static str {
        HURT_ROUTINE
    }

    fn resume(&mut self, core: &mut PlayerCore, _dt: f32) -> Yield {
        if !self.started {
            self.started = true;
            core.state.is_invulnerable = true;
            core.state.can_move = false;
            core.halt();
        }

        if self.toggles_left > 0 {
            self.toggles_left -= 1;
            core.state.visible = !core.state.visible;
            return Yield::Seconds(core.tuning.hurt_blink_interval);
        }

        if !self.recovering {
            self.recovering = true;
            core.state.visible = true;
            core.state.can_move = true;
            let rest = core.tuning.invulnerability_duration - core.tuning.hurt_blink_duration;
            return Yield::Seconds(rest.max(0.0));
        }

        core.state.is_invulnerable = false;
        Yield::Done
    }
}
