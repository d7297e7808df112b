//! Deferred actions
//!
//! Actions are scheduled for a point in time and handed back by
//! `take_due` once that time has passed. Each scheduled action gets a
//! handle so the caller can cancel it before it fires.

use std::time::{Duration, Instant};

/// Cancel handle for a scheduled action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

struct Scheduled<T> {
    id: u64,
    when: Instant,
    action: T,
}

pub struct Scheduler<T> {
    next_id: u64,
    pending: Vec<Scheduled<T>>,
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            pending: Vec::new(),
        }
    }

    /// Schedule `action` to become due at `when`
    pub fn schedule_at(&mut self, when: Instant, action: T) -> TaskHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.pending.push(Scheduled { id, when, action });
        TaskHandle(id)
    }

    /// Drop a scheduled action; false if it already ran or was cancelled
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|s| s.id != handle.0);
        self.pending.len() != before
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Remove and return every action due at `now`, earliest first
    pub fn take_due(&mut self, now: Instant) -> Vec<T> {
        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|s| s.when <= now);
        self.pending = waiting;

        // Equal times keep scheduling order
        due.sort_by_key(|s| (s.when, s.id));
        due.into_iter().map(|s| s.action).collect()
    }

    /// Time from `now` until the earliest action is due
    ///
    /// Used to bound the event loop's poll timeout.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.pending
            .iter()
            .map(|s| s.when)
            .min()
            .map(|next| next.saturating_duration_since(now))
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
