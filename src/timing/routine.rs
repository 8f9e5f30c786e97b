//! Timing domain: multi-step timed sequences stepped by the frame tick.

use std::fmt;

use super::scheduler::TIME_EPSILON;

/// Where a routine suspends after a step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Yield {
    /// Resume on the next tick.
    NextTick,
    /// Resume once this many seconds have elapsed.
    Seconds(f32),
    /// The routine is finished and is dropped.
    Done,
}

/// A resumable sequence operating on a shared context `C`.
///
/// `resume` runs one step and reports where to suspend next. The runner
/// calls the first step immediately on [`Routines::start`].
pub trait Routine<C>: Send + Sync {
    /// Short name used for introspection and logging.
    fn label(&self) -> &'static str;

    fn resume(&mut self, ctx: &mut C, dt: f32) -> Yield;
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Wake {
    NextTick,
    At(f64),
}

struct Running<C> {
    routine: Box<dyn Routine<C>>,
    wake: Wake,
}

/// Runs any number of routines against one context. Routines cannot be
/// cancelled once started; they run until they yield [`Yield::Done`].
pub struct Routines<C> {
    running: Vec<Running<C>>,
}

impl<C> Default for Routines<C> {
    fn default() -> Self {
        Self {
            running: Vec::new(),
        }
    }
}

impl<C> fmt::Debug for Routines<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.running.iter().map(|r| r.routine.label()))
            .finish()
    }
}

impl<C> Routines<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `routine` at time `now`, running its first step right away.
    /// Returns false if it finished within that first step.
    pub fn start(
        &mut self,
        mut routine: Box<dyn Routine<C>>,
        ctx: &mut C,
        now: f64,
        dt: f32,
    ) -> bool {
        let wake = match routine.resume(ctx, dt) {
            Yield::Done => return false,
            Yield::NextTick => Wake::NextTick,
            Yield::Seconds(secs) => Wake::At(now + f64::from(secs.max(0.0))),
        };
        self.running.push(Running { routine, wake });
        true
    }

    /// Resume every routine whose wait has elapsed at time `now`.
    pub fn poll(&mut self, ctx: &mut C, now: f64, dt: f32) {
        let mut i = 0;
        while i < self.running.len() {
            let entry = &mut self.running[i];
            let ready = match entry.wake {
                Wake::NextTick => true,
                Wake::At(at) => now + TIME_EPSILON >= at,
            };
            if !ready {
                i += 1;
                continue;
            }

            // Timed waits chain from their due time, not the poll time
            let base = match entry.wake {
                Wake::At(at) => at,
                Wake::NextTick => now,
            };

            match entry.routine.resume(ctx, dt) {
                Yield::NextTick => {
                    entry.wake = Wake::NextTick;
                    i += 1;
                }
                Yield::Seconds(secs) => {
                    entry.wake = Wake::At(base + f64::from(secs.max(0.0)));
                    i += 1;
                }
                Yield::Done => {
                    self.running.remove(i);
                }
            }
        }
    }

    pub fn is_running(&self, label: &str) -> bool {
        self.running.iter().any(|r| r.routine.label() == label)
    }
}
