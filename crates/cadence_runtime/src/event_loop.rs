//! Real-time timers
//!
//! [`EventLoop`] implements [`Scheduler`] on a current-thread tokio runtime
//! with a [`LocalSet`], so callbacks stay on the thread that owns the loop
//! and run one after another.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use cadence_timeline::{Scheduler, TimerId};
use slotmap::SlotMap;
use tokio::runtime::{Builder, Runtime};
use tokio::task::{AbortHandle, JoinHandle, LocalSet};

/// Stand-in deadline for delays too large to represent (about 30 years)
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Deadline `seconds` from now, saturating at [`FAR_FUTURE`]
fn deadline_after(seconds: f64) -> tokio::time::Instant {
    let now = tokio::time::Instant::now();
    Duration::try_from_secs_f64(seconds.max(0.0))
        .ok()
        .and_then(|delay| now.checked_add(delay.min(FAR_FUTURE)))
        .unwrap_or(now + FAR_FUTURE)
}

/// Single-threaded wall-clock scheduler
pub struct EventLoop {
    // Declared before `runtime` so pending tasks drop while the runtime is alive
    local: LocalSet,
    runtime: Runtime,
    /// Timers that have neither fired nor been cancelled
    pending: Rc<RefCell<SlotMap<TimerId, AbortHandle>>>,
    /// Spawned timer tasks not yet awaited by `run`
    tasks: RefCell<Vec<JoinHandle<()>>>,
    started: Instant,
}

impl EventLoop {
    pub fn new() -> std::io::Result<Self> {
        let runtime = Builder::new_current_thread().enable_time().build()?;
        Ok(Self {
            local: LocalSet::new(),
            runtime,
            pending: Rc::new(RefCell::new(SlotMap::with_key())),
            tasks: RefCell::new(Vec::new()),
            started: Instant::now(),
        })
    }

    /// Drive the loop until every timer has fired or been cancelled
    ///
    /// Timers registered by callbacks while running are waited for too.
    pub fn run(&self) {
        self.local.block_on(&self.runtime, async {
            loop {
                let batch = std::mem::take(&mut *self.tasks.borrow_mut());
                if batch.is_empty() {
                    break;
                }
                for task in batch {
                    // Cancelled timers resolve with a JoinError, which is expected.
                    let _ = task.await;
                }
            }
        });
    }

    /// Timers still waiting to fire
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Wall-clock seconds since the loop was created
    pub fn elapsed(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }
}

impl Scheduler for EventLoop {
    fn schedule_after(&self, seconds: f64, callback: Box<dyn FnOnce()>) -> TimerId {
        let deadline = deadline_after(seconds);
        let pending = Rc::clone(&self.pending);
        let mut timers = self.pending.borrow_mut();

        let id = timers.insert_with_key(|id| {
            let task = self.local.spawn_local(async move {
                tokio::time::sleep_until(deadline).await;
                pending.borrow_mut().remove(id);
                callback();
            });
            let abort = task.abort_handle();
            self.tasks.borrow_mut().push(task);
            abort
        });

        tracing::debug!(?id, seconds, "timer registered");
        id
    }

    fn cancel(&self, id: TimerId) -> bool {
        match self.pending.borrow_mut().remove(id) {
            Some(abort) => {
                abort.abort();
                tracing::debug!(?id, "timer cancelled");
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_in_due_order() {
        let event_loop = EventLoop::new().unwrap();
        let log = Rc::new(RefCell::new(Vec::new()));

        for (name, seconds) in [("c", 0.06), ("a", 0.0), ("b", 0.03)] {
            let log = log.clone();
            event_loop.schedule_after(seconds, Box::new(move || log.borrow_mut().push(name)));
        }
        assert_eq!(event_loop.pending(), 3);

        event_loop.run();

        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
        assert_eq!(event_loop.pending(), 0);
        assert!(event_loop.elapsed() >= 0.06);
    }

    #[test]
    fn test_cancel_before_run() {
        let event_loop = EventLoop::new().unwrap();
        let log = Rc::new(RefCell::new(Vec::new()));

        let sink = log.clone();
        let id = event_loop.schedule_after(0.01, Box::new(move || sink.borrow_mut().push("cancelled")));
        let sink = log.clone();
        event_loop.schedule_after(0.02, Box::new(move || sink.borrow_mut().push("kept")));

        assert!(event_loop.cancel(id));
        assert!(!event_loop.cancel(id));
        event_loop.run();

        assert_eq!(*log.borrow(), vec!["kept"]);
    }

    #[test]
    fn test_callbacks_can_register_timers() {
        let event_loop = Rc::new(EventLoop::new().unwrap());
        let log = Rc::new(RefCell::new(Vec::new()));

        let inner_loop = event_loop.clone();
        let sink = log.clone();
        event_loop.schedule_after(
            0.01,
            Box::new(move || {
                sink.borrow_mut().push("outer");
                let sink = sink.clone();
                inner_loop.schedule_after(0.01, Box::new(move || sink.borrow_mut().push("inner")));
            }),
        );

        event_loop.run();
        assert_eq!(*log.borrow(), vec!["outer", "inner"]);
    }

    #[test]
    fn test_unrepresentable_delays_saturate() {
        let event_loop = EventLoop::new().unwrap();
        let log = Rc::new(RefCell::new(Vec::new()));

        let mut far = Vec::new();
        for seconds in [1e20, f64::MAX, f64::INFINITY] {
            let sink = log.clone();
            far.push(event_loop.schedule_after(seconds, Box::new(move || sink.borrow_mut().push("far"))));
        }
        let sink = log.clone();
        event_loop.schedule_after(0.01, Box::new(move || sink.borrow_mut().push("near")));
        assert_eq!(event_loop.pending(), 4);

        for id in far {
            assert!(event_loop.cancel(id));
        }
        event_loop.run();

        assert_eq!(*log.borrow(), vec!["near"]);
        assert_eq!(event_loop.pending(), 0);
    }

    #[test]
    fn test_deadline_saturates_at_far_future() {
        let now = tokio::time::Instant::now();
        let deadline = deadline_after(1e20);
        assert!(deadline >= now + FAR_FUTURE);
        assert!(deadline_after(0.5) < now + Duration::from_secs(1));
        assert!(deadline_after(-1.0) <= tokio::time::Instant::now());
    }

    #[test]
    fn test_run_with_nothing_scheduled_returns() {
        let event_loop = EventLoop::new().unwrap();
        event_loop.run();
        assert_eq!(event_loop.pending(), 0);
    }
}
