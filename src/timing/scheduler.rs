//! Timing domain: fire-once delayed callbacks keyed by owner-defined values.

/// Slack used when comparing accumulated frame time against due times.
/// Summing ten 0.1s frames must count as one full second.
pub const TIME_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone)]
struct Pending<K> {
    due: f64,
    seq: u64,
    key: K,
}

/// Delayed-callback queue owned by whoever schedules into it.
///
/// Callbacks are plain keys; the owner drains the keys that came due from
/// [`Scheduler::advance`] and dispatches them itself. Dropping the owner drops
/// every pending callback with it, so a callback can never outlive the object
/// that scheduled it.
#[derive(Debug, Clone)]
pub struct Scheduler<K> {
    now: f64,
    next_seq: u64,
    pending: Vec<Pending<K>>,
}

impl<K> Default for Scheduler<K> {
    fn default() -> Self {
        Self {
            now: 0.0,
            next_seq: 0,
            pending: Vec::new(),
        }
    }
}

impl<K> Scheduler<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds of simulated time this scheduler has been advanced by.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Fire `key` once, `delay` seconds from now. Negative delays fire on the
    /// next advance.
    pub fn schedule(&mut self, delay: f32, key: K) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Pending {
            due: self.now + f64::from(delay.max(0.0)),
            seq,
            key,
        });
    }

    /// Advance the clock by `dt` and return the keys that came due, earliest
    /// first. Keys due at the same instant keep their scheduling order.
    pub fn advance(&mut self, dt: f32) -> Vec<K> {
        self.now += f64::from(dt.max(0.0));

        let mut due = Vec::new();
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].due <= self.now + TIME_EPSILON {
                due.push(self.pending.swap_remove(i));
            } else {
                i += 1;
            }
        }

        due.sort_by(|a, b| a.due.total_cmp(&b.due).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|p| p.key).collect()
    }

}

impl<K: PartialEq> Scheduler<K> {
    /// Seconds until the earliest pending `key` fires.
    pub fn time_until(&self, key: &K) -> Option<f32> {
        self.pending
            .iter()
            .filter(|p| &p.key == key)
            .map(|p| (p.due - self.now).max(0.0))
            .min_by(|a, b| a.total_cmp(b))
            .map(|secs| secs as f32)
    }
}
