//! Timing domain: tests for the scheduler and routine runner.

use super::{Routine, Routines, Scheduler, Yield};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Key {
    A,
    B,
    C,
}

// -----------------------------------------------------------------------------
// Scheduler tests
// -----------------------------------------------------------------------------

#[test]
fn test_scheduler_fires_once_after_delay() {
    let mut scheduler = Scheduler::new();
    scheduler.schedule(0.3, Key::A);

    assert!(scheduler.advance(0.1).is_empty());
    assert!(scheduler.advance(0.1).is_empty());
    assert_eq!(scheduler.advance(0.1), vec![Key::A]);
    assert!(scheduler.advance(0.1).is_empty());
    assert!(scheduler.time_until(&Key::A).is_none());
}

#[test]
fn test_scheduler_accumulated_frames_reach_due_time() {
    let mut scheduler = Scheduler::new();
    scheduler.schedule(1.0, Key::A);

    for _ in 0..9 {
        assert!(scheduler.advance(0.1).is_empty());
    }
    assert_eq!(scheduler.advance(0.1), vec![Key::A]);
}

#[test]
fn test_scheduler_orders_by_due_time_then_insertion() {
    let mut scheduler = Scheduler::new();
    scheduler.schedule(0.5, Key::C);
    scheduler.schedule(0.2, Key::A);
    scheduler.schedule(0.2, Key::B);

    assert_eq!(scheduler.advance(1.0), vec![Key::A, Key::B, Key::C]);
}

#[test]
fn test_scheduler_time_until() {
    let mut scheduler = Scheduler::new();
    scheduler.schedule(3.0, Key::A);
    scheduler.advance(1.0);

    let remaining = scheduler.time_until(&Key::A).unwrap();
    assert!((remaining - 2.0).abs() < 1e-4);
    assert!(scheduler.time_until(&Key::B).is_none());

    // The earliest of two pending copies wins
    scheduler.schedule(0.5, Key::A);
    let remaining = scheduler.time_until(&Key::A).unwrap();
    assert!((remaining - 0.5).abs() < 1e-4);
}

#[test]
fn test_scheduler_negative_delay_fires_next_advance() {
    let mut scheduler = Scheduler::new();
    scheduler.schedule(-1.0, Key::B);
    assert_eq!(scheduler.advance(0.0), vec![Key::B]);
}

// -----------------------------------------------------------------------------
// Routine tests
// -----------------------------------------------------------------------------

#[derive(Default)]
struct Trace {
    steps: Vec<&'static str>,
}

/// Steps once per tick for three ticks.
struct PerTick {
    left: u32,
}

impl Routine<Trace> for PerTick {
    fn label(&self) -> &'static str {
        "per_tick"
    }

    fn resume(&mut self, ctx: &mut Trace, _dt: f32) -> Yield {
        if self.left == 0 {
            ctx.steps.push("tick_done");
            return Yield::Done;
        }
        self.left -= 1;
        ctx.steps.push("tick");
        Yield::NextTick
    }
}

/// Waits half a second between two steps.
struct Waiting {
    stage: u8,
}

impl Routine<Trace> for Waiting {
    fn label(&self) -> &'static str {
        "waiting"
    }

    fn resume(&mut self, ctx: &mut Trace, _dt: f32) -> Yield {
        self.stage += 1;
        match self.stage {
            1 => {
                ctx.steps.push("wait_start");
                Yield::Seconds(0.5)
            }
            _ => {
                ctx.steps.push("wait_end");
                Yield::Done
            }
        }
    }
}

#[test]
fn test_routine_first_step_runs_on_start() {
    let mut trace = Trace::default();
    let mut routines = Routines::new();

    let running = routines.start(Box::new(PerTick { left: 2 }), &mut trace, 0.0, 0.1);

    assert!(running);
    assert_eq!(trace.steps, vec!["tick"]);
    assert!(routines.is_running("per_tick"));
}

#[test]
fn test_routine_next_tick_steps_every_poll() {
    let mut trace = Trace::default();
    let mut routines = Routines::new();
    routines.start(Box::new(PerTick { left: 2 }), &mut trace, 0.0, 0.1);

    routines.poll(&mut trace, 0.1, 0.1);
    routines.poll(&mut trace, 0.2, 0.1);

    assert_eq!(trace.steps, vec!["tick", "tick", "tick_done"]);
    assert!(!routines.is_running("per_tick"));
}

#[test]
fn test_routine_waits_for_seconds() {
    let mut trace = Trace::default();
    let mut routines = Routines::new();
    routines.start(Box::new(Waiting { stage: 0 }), &mut trace, 1.0, 0.0);

    routines.poll(&mut trace, 1.2, 0.2);
    routines.poll(&mut trace, 1.4, 0.2);
    assert_eq!(trace.steps, vec!["wait_start"]);

    routines.poll(&mut trace, 1.5, 0.1);
    assert_eq!(trace.steps, vec!["wait_start", "wait_end"]);
    assert!(!routines.is_running("waiting"));
}

#[test]
fn test_routine_finishing_immediately_is_not_kept() {
    let mut trace = Trace::default();
    let mut routines = Routines::new();

    let running = routines.start(Box::new(PerTick { left: 0 }), &mut trace, 0.0, 0.1);

    assert!(!running);
    assert!(!routines.is_running("per_tick"));
}
