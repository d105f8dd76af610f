//! Cadence Timeline
//!
//! Declarative sequencing of timed animation steps.
//!
//! # Features
//!
//! - **Synchronous steps**: each step's delay + duration pushes back everything after it
//! - **Asynchronous steps**: fire at the current offset without delaying the rest
//! - **Default inheritance**: unset delay/duration/easing fall back to timeline defaults
//! - **Injected collaborators**: timers come from a [`Scheduler`], easing from an [`Animator`]
//!
//! # Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use cadence_timeline::{Immediate, Step, Timeline, VirtualScheduler};
//!
//! let log = Rc::new(RefCell::new(Vec::new()));
//! let clock = Rc::new(VirtualScheduler::new());
//!
//! let mut timeline: Timeline<()> = Timeline::new();
//! let (a, b, done) = (log.clone(), log.clone(), log.clone());
//! let (ca, cb, cd) = (clock.clone(), clock.clone(), clock.clone());
//! timeline
//!     .add(Step::new(move || a.borrow_mut().push(("A", ca.now()))).duration(1.0))?
//!     .add(Step::new(move || b.borrow_mut().push(("B", cb.now()))).duration(0.5))?
//!     .on_finish(move || done.borrow_mut().push(("done", cd.now())));
//!
//! timeline.run(&*clock, Rc::new(Immediate));
//! clock.run_until_idle();
//!
//! assert_eq!(*log.borrow(), vec![("A", 0.0), ("B", 1.0), ("done", 1.5)]);
//! # Ok::<(), cadence_timeline::TimelineError>(())
//! ```

pub mod animator;
pub mod defaults;
pub mod easing;
pub mod error;
pub mod scheduler;
pub mod step;
pub mod timeline;

pub use animator::{Animator, Immediate};
pub use defaults::Defaults;
pub use easing::{Easing, Transition};
pub use error::{Result, TimelineError};
pub use scheduler::{Scheduler, TimerId, VirtualScheduler};
pub use step::{Callback, Step, StepDescriptor};
pub use timeline::{RunHandle, Schedule, ScheduledStep, Timeline};
