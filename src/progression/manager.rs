//! Progression domain: the run manager.
//!
//! Owns the currencies and the stage sequence of a run. Scene loads and
//! player spawns go through a [`RunHost`]; the respawn that follows every
//! load is a delayed callback inside the manager, fired from [`RunManager::tick`].

use std::fmt;

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::content::RunDefs;
use crate::progression::host::RunHost;
use crate::progression::stages::{StageStep, generate_stage_queue};
use crate::rewards::{Currency, Wallet};
use crate::timing::Scheduler;

/// Configuration problems that abort a run operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    UnknownMap(u32),
    /// The stage queue has no entry for this stage
    StageMissing { stage: u32 },
    MissingPlayerTemplate,
    MissingSpawnAnchor(String),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::UnknownMap(map) => write!(f, "Map {} is not defined", map),
            RunError::StageMissing { stage } => {
                write!(f, "No stage queued for stage {}", stage)
            }
            RunError::MissingPlayerTemplate => write!(f, "Player template is not set"),
            RunError::MissingSpawnAnchor(name) => write!(f, "{} not found in the scene", name),
        }
    }
}

impl std::error::Error for RunError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunTimer {
    Respawn,
}

/// Run state for one session. `H` is the host's entity handle.
#[derive(Debug)]
pub struct RunManager<H> {
    defs: RunDefs,
    wallet: Wallet,
    current_map: u32,
    current_stage: u32,
    stage_queue: Vec<String>,
    game_in_progress: bool,
    current_player: Option<H>,
    timers: Scheduler<RunTimer>,
    rng: ChaCha8Rng,
}

impl<H: Copy + PartialEq + fmt::Debug> RunManager<H> {
    pub fn new(defs: RunDefs, seed: u64) -> Self {
        Self {
            defs,
            wallet: Wallet::default(),
            current_map: 1,
            current_stage: 1,
            stage_queue: Vec::new(),
            game_in_progress: false,
            current_player: None,
            timers: Scheduler::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn gold(&self) -> u32 {
        self.wallet.gold
    }

    pub fn gems(&self) -> u32 {
        self.wallet.gems
    }

    pub fn current_map(&self) -> u32 {
        self.current_map
    }

    /// The stage the next [`RunManager::load_next_stage`] call will load.
    pub fn current_stage(&self) -> u32 {
        self.current_stage
    }

    pub fn stage_queue(&self) -> &[String] {
        &self.stage_queue
    }

    pub fn is_game_in_progress(&self) -> bool {
        self.game_in_progress
    }

    pub fn current_player(&self) -> Option<H> {
        self.current_player
    }

    /// Seconds until the next scheduled respawn, if any.
    pub fn respawn_pending(&self) -> Option<f32> {
        self.timers.time_until(&RunTimer::Respawn)
    }

    // ------------------------------------------------------------------------
    // Currency
    // ------------------------------------------------------------------------

    pub fn add_currency(&mut self, currency: Currency, amount: u32) {
        self.wallet.add(currency, amount);
        info!(
            "Added {} {}. Current {}: {}",
            amount,
            currency,
            currency,
            self.wallet.balance(currency)
        );
    }

    /// Spend only with a sufficient balance. Returns whether the spend happened.
    pub fn spend_currency(&mut self, currency: Currency, amount: u32) -> bool {
        if self.wallet.spend(currency, amount) {
            info!(
                "Spent {} {}. Current {}: {}",
                amount,
                currency,
                currency,
                self.wallet.balance(currency)
            );
            true
        } else {
            warn!("Not enough {}!", currency);
            false
        }
    }

    pub fn add_gold(&mut self, amount: u32) {
        self.add_currency(Currency::Gold, amount);
    }

    pub fn add_gems(&mut self, amount: u32) {
        self.add_currency(Currency::Gems, amount);
    }

    pub fn spend_gold(&mut self, amount: u32) -> bool {
        self.spend_currency(Currency::Gold, amount)
    }

    pub fn spend_gems(&mut self, amount: u32) -> bool {
        self.spend_currency(Currency::Gems, amount)
    }

    // ------------------------------------------------------------------------
    // Game flow
    // ------------------------------------------------------------------------

    /// Begin a run on `map` with a freshly shuffled stage queue and load its
    /// first stage.
    pub fn start_game<R: RunHost<Handle = H>>(
        &mut self,
        map: u32,
        host: &mut R,
    ) -> Result<(), RunError> {
        let Some(map_def) = self.defs.map(map) else {
            error!("Cannot start map {}: not defined", map);
            return Err(RunError::UnknownMap(map));
        };

        self.stage_queue = generate_stage_queue(&map_def.stage_pool, &mut self.rng);
        self.current_map = map;
        self.current_stage = 1;
        self.game_in_progress = true;
        info!("Starting map {} with stages {:?}", map, self.stage_queue);

        self.load_next_stage(host)
    }

    /// Load the scene for the current stage and schedule the respawn. Past
    /// the boss stage the run ends in the lobby.
    pub fn load_next_stage<R: RunHost<Handle = H>>(&mut self, host: &mut R) -> Result<(), RunError> {
        let stage = self.current_stage;
        let scene = match StageStep::for_stage(stage) {
            StageStep::Lobby => {
                info!("All stages completed. Returning to Lobby.");
                self.load_lobby(host);
                return Ok(());
            }
            StageStep::Queued(index) => match self.stage_queue.get(index) {
                Some(scene) => scene.clone(),
                None => {
                    error!("Stage {} has no queued scene", stage);
                    return Err(RunError::StageMissing { stage });
                }
            },
            step @ (StageStep::Shop | StageStep::Boss) => {
                let Some(map_def) = self.defs.map(self.current_map) else {
                    error!("Map {} is not defined", self.current_map);
                    return Err(RunError::UnknownMap(self.current_map));
                };
                if step == StageStep::Shop {
                    map_def.shop_scene.clone()
                } else {
                    map_def.boss_scene.clone()
                }
            }
        };

        info!("Loading Stage {}: {}", stage, scene);
        host.load_scene(&scene);
        self.current_stage += 1;
        self.schedule_respawn();
        Ok(())
    }

    pub fn load_lobby<R: RunHost<Handle = H>>(&mut self, host: &mut R) {
        self.game_in_progress = false;
        host.load_scene(&self.defs.lobby_scene);
        info!("Loaded Lobby Scene.");
        self.schedule_respawn();
    }

    /// Death costs the run's gold; gems are kept.
    pub fn player_died<R: RunHost<Handle = H>>(&mut self, host: &mut R) {
        info!("Player died. Returning to Lobby.");
        self.wallet.reset_gold();
        info!("Gold reset to 0.");
        self.load_lobby(host);
    }

    /// Spawn a fresh player at the scene's spawn anchor, replacing the one
    /// spawned before.
    pub fn respawn_player<R: RunHost<Handle = H>>(&mut self, host: &mut R) -> Result<H, RunError> {
        let Some(template) = self.defs.player_template.as_deref() else {
            error!("Player template is not set!");
            return Err(RunError::MissingPlayerTemplate);
        };

        let anchor_name = &self.defs.spawn_anchor;
        let Some(anchor) = host.find_anchor(anchor_name) else {
            error!("{} not found in the scene!", anchor_name);
            return Err(RunError::MissingSpawnAnchor(anchor_name.clone()));
        };

        if let Some(previous) = self.current_player.take() {
            host.destroy_entity(previous);
        }

        let player = host.spawn_entity(template, anchor);
        self.current_player = Some(player);
        info!("Player respawned at {}.", anchor_name);
        Ok(player)
    }

    pub fn restart_map<R: RunHost<Handle = H>>(&mut self, host: &mut R) -> Result<(), RunError> {
        self.start_game(self.current_map, host)
    }

    /// Advance the manager's clock and run any respawn that came due.
    pub fn tick<R: RunHost<Handle = H>>(&mut self, dt: f32, host: &mut R) {
        for timer in self.timers.advance(dt) {
            match timer {
                RunTimer::Respawn => {
                    // Failures are logged where they happen
                    let _ = self.respawn_player(host);
                }
            }
        }
    }

    fn schedule_respawn(&mut self) {
        self.timers
            .schedule(self.defs.respawn_delay, RunTimer::Respawn);
    }
}
