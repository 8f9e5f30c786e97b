//! Progression domain: stage numbering and the randomized stage queue.

use rand::Rng;
use rand::seq::SliceRandom;

/// Randomized stages played before the shop.
pub const STAGES_PER_RUN: usize = 4;
pub const SHOP_STAGE: u32 = 5;
pub const BOSS_STAGE: u32 = 6;

/// What a stage number loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStep {
    /// Index into the run's stage queue
    Queued(usize),
    Shop,
    Boss,
    /// Past the boss: the run is over
    Lobby,
}

impl StageStep {
    pub fn for_stage(stage: u32) -> Self {
        match stage {
            1..=4 => StageStep::Queued((stage - 1) as usize),
            SHOP_STAGE => StageStep::Shop,
            BOSS_STAGE => StageStep::Boss,
            _ => StageStep::Lobby,
        }
    }
}

/// Uniformly shuffle `pool` and keep the first [`STAGES_PER_RUN`] entries.
/// Shorter pools yield a shorter queue.
pub fn generate_stage_queue<R: Rng + ?Sized>(pool: &[String], rng: &mut R) -> Vec<String> {
    let mut stages = pool.to_vec();
    stages.shuffle(rng);
    stages.truncate(STAGES_PER_RUN);
    stages
}
