//! Timing domain: delayed callbacks and timed sequences driven by frame deltas.

mod routine;
mod scheduler;

#[cfg(test)]
mod tests;

pub use routine::{Routine, Routines, Yield};
pub use scheduler::{Scheduler, TIME_EPSILON};
