//! One-shot deferred actions.
//!
//! Widgets never own a clock. They ask the host to [`Timers::schedule`] a
//! callback and are told later, through
//! [`Widget::timer_fired`](crate::Widget::timer_fired), which [`TimerId`]
//! elapsed. [`Deferred`] wraps one named slot so that at most one timer per
//! purpose is ever pending.

use std::collections::BTreeMap;

/// Handle to a scheduled one-shot timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

impl TimerId {
    /// Create a new timer ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

/// Host-provided one-shot timer service (`setTimeout`/`clearTimeout`).
pub trait Timers {
    /// Schedule a timer that fires once after `delay_ms`.
    fn schedule(&mut self, delay_ms: u32) -> TimerId;

    /// Cancel a pending timer. Returns false if it already fired or was
    /// cancelled.
    fn cancel(&mut self, id: TimerId) -> bool;
}

/// A named, cancellable deferred action holding at most one pending timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deferred {
    name: &'static str,
    pending: Option<TimerId>,
}

impl Deferred {
    /// Create an idle slot.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            pending: None,
        }
    }

    /// Start the timer, cancelling any timer already pending in this slot.
    pub fn arm<T: Timers + ?Sized>(&mut self, timers: &mut T, delay_ms: u32) -> TimerId {
        self.cancel(timers);
        let id = timers.schedule(delay_ms);
        tracing::trace!(slot = self.name, timer = id.0, delay_ms, "deferred armed");
        self.pending = Some(id);
        id
    }

    /// Cancel the pending timer, if any. Safe to call any number of times.
    pub fn cancel<T: Timers + ?Sized>(&mut self, timers: &mut T) -> bool {
        match self.pending.take() {
            Some(id) => {
                timers.cancel(id);
                tracing::trace!(slot = self.name, timer = id.0, "deferred cancelled");
                true
            }
            None => false,
        }
    }

    /// Claim a fired timer. Returns true only if `id` is the timer this slot
    /// is waiting on; stale or foreign ids are rejected.
    pub fn claim(&mut self, id: TimerId) -> bool {
        if self.pending == Some(id) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Check if a timer is pending.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Virtual-clock timer service.
///
/// Nothing fires on its own: the owner advances the clock with
/// [`ManualTimers::pop_due`] and dispatches each returned id.
#[derive(Debug, Default)]
pub struct ManualTimers {
    now_ms: u64,
    next_id: u64,
    /// Pending timers and their deadlines.
    pending: BTreeMap<TimerId, u64>,
    cancelled: u64,
}

impl ManualTimers {
    /// Create a timer service at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    #[must_use]
    pub const fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of timers still pending.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Check if a specific timer is still pending.
    #[must_use]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.contains_key(&id)
    }

    /// Total timers cancelled before firing.
    #[must_use]
    pub const fn cancelled_count(&self) -> u64 {
        self.cancelled
    }

    /// Remove and return the earliest timer due at or before `limit_ms`,
    /// moving the clock forward to its deadline. Equal deadlines fire in
    /// scheduling order.
    pub fn pop_due(&mut self, limit_ms: u64) -> Option<TimerId> {
        let (id, due) = self
            .pending
            .iter()
            .map(|(id, due)| (*id, *due))
            .min_by_key(|(id, due)| (*due, *id))?;
        if due > limit_ms {
            return None;
        }
        self.pending.remove(&id);
        self.now_ms = self.now_ms.max(due);
        Some(id)
    }

    /// Move the clock forward without firing anything.
    pub fn set_now(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    /// Advance the clock by `delta_ms` and return every timer that came due,
    /// in firing order. Timers scheduled by the caller while handling these
    /// ids are not included; use [`ManualTimers::pop_due`] in a loop for that.
    pub fn advance(&mut self, delta_ms: u32) -> Vec<TimerId> {
        let limit = self.now_ms + u64::from(delta_ms);
        let mut fired = Vec::new();
        while let Some(id) = self.pop_due(limit) {
            fired.push(id);
        }
        self.set_now(limit);
        fired
    }
}

impl Timers for ManualTimers {
    fn schedule(&mut self, delay_ms: u32) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.insert(id, self.now_ms + u64::from(delay_ms));
        id
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        let removed = self.pending.remove(&id).is_some();
        if removed {
            self.cancelled += 1;
        }
        removed
    }
}
