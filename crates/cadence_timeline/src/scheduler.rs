//! Timer scheduling
//!
//! The timeline never sleeps. It registers deferred callbacks on a
//! [`Scheduler`] supplied by the host and returns straight away.

use std::cell::RefCell;

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    pub struct TimerId;
}

/// Deferred-callback primitive of the host event loop
///
/// Callbacks run one at a time on the thread that owns the scheduler.
pub trait Scheduler {
    /// Run `callback` once, `seconds` from now
    fn schedule_after(&self, seconds: f64, callback: Box<dyn FnOnce()>) -> TimerId;

    /// Revoke a timer that has not fired yet. Returns false if it already
    /// fired or was cancelled before.
    fn cancel(&self, id: TimerId) -> bool;
}

struct PendingTimer {
    due: f64,
    seq: u64,
    callback: Box<dyn FnOnce()>,
}

struct Clock {
    now: f64,
    next_seq: u64,
    timers: SlotMap<TimerId, PendingTimer>,
}

impl Clock {
    /// Earliest pending timer, registration order breaking ties
    fn next_due(&self, limit: f64) -> Option<TimerId> {
        self.timers
            .iter()
            .filter(|(_, t)| t.due <= limit)
            .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.seq.cmp(&b.seq)))
            .map(|(id, _)| id)
    }
}

/// A simulated clock
///
/// Time only moves when [`advance`](Self::advance) or
/// [`run_until_idle`](Self::run_until_idle) is called, which makes timeline
/// behaviour reproducible in tests and offline renders.
pub struct VirtualScheduler {
    clock: RefCell<Clock>,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self {
            clock: RefCell::new(Clock {
                now: 0.0,
                next_seq: 0,
                timers: SlotMap::with_key(),
            }),
        }
    }

    /// Current virtual time in seconds
    pub fn now(&self) -> f64 {
        self.clock.borrow().now
    }

    /// Number of timers that have not fired yet
    pub fn pending(&self) -> usize {
        self.clock.borrow().timers.len()
    }

    /// Move time forward by `seconds`, firing every timer that falls due
    ///
    /// Returns the number of callbacks that ran.
    pub fn advance(&self, seconds: f64) -> usize {
        let target = self.now() + seconds.max(0.0);
        let fired = self.fire_until(target);
        self.clock.borrow_mut().now = target;
        fired
    }

    /// Fire timers until none are left, including ones registered by callbacks
    pub fn run_until_idle(&self) -> usize {
        self.fire_until(f64::INFINITY)
    }

    fn fire_until(&self, limit: f64) -> usize {
        let mut fired = 0;
        loop {
            // The borrow must end before the callback runs: callbacks are
            // free to read the clock or register more timers.
            let timer = {
                let mut clock = self.clock.borrow_mut();
                let Some(id) = clock.next_due(limit) else {
                    break;
                };
                let timer = clock.timers.remove(id);
                if let Some(t) = &timer {
                    clock.now = clock.now.max(t.due);
                }
                timer
            };
            if let Some(timer) = timer {
                (timer.callback)();
                fired += 1;
            }
        }
        fired
    }
}

impl Default for VirtualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for VirtualScheduler {
    fn schedule_after(&self, seconds: f64, callback: Box<dyn FnOnce()>) -> TimerId {
        let mut clock = self.clock.borrow_mut();
        let due = clock.now + seconds.max(0.0);
        let seq = clock.next_seq;
        clock.next_seq += 1;
        clock.timers.insert(PendingTimer { due, seq, callback })
    }

    fn cancel(&self, id: TimerId) -> bool {
        self.clock.borrow_mut().timers.remove(id).is_some()
    }
}
