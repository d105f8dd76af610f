//! Timeline orchestration for sequenced steps
//!
//! A [`Timeline`] is built by appending steps in order. Running it walks the
//! steps once, keeping a running offset:
//!
//! - every step fires at `offset + delay`
//! - a synchronous step then moves the offset by `delay + duration`
//! - an async step leaves the offset where it was
//!
//! The completion callback fires at the final offset. Async steps that end
//! later than that are not waited for.

use std::fmt;
use std::rc::Rc;

use crate::animator::Animator;
use crate::defaults::Defaults;
use crate::error::{check_seconds, Result};
use crate::scheduler::{Scheduler, TimerId};
use crate::step::{Callback, Step, StepDescriptor};

/// Diagnostic events: `info` on verbose timelines, `trace` otherwise
macro_rules! step_event {
    ($verbose:expr, $($arg:tt)+) => {
        if $verbose {
            tracing::info!($($arg)+);
        } else {
            tracing::trace!($($arg)+);
        }
    };
}

/// Planned dispatch time of one step
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduledStep {
    /// Position in the timeline
    pub index: usize,
    pub label: String,
    /// Seconds after `run()` at which the action fires
    pub at: f64,
    pub duration: f64,
    pub is_async: bool,
    pub has_action: bool,
}

/// Dispatch times for a whole timeline, as computed by [`Timeline::plan`]
#[derive(Clone, Debug, PartialEq)]
pub struct Schedule {
    steps: Vec<ScheduledStep>,
    finish_at: f64,
}

impl Schedule {
    pub fn steps(&self) -> &[ScheduledStep] {
        &self.steps
    }

    /// Seconds after `run()` at which the completion callback fires
    pub fn finish_at(&self) -> f64 {
        self.finish_at
    }

    /// Nominal end of the last visual effect, async steps included
    pub fn total_duration(&self) -> f64 {
        self.steps
            .iter()
            .map(|s| s.at + s.duration)
            .fold(self.finish_at, f64::max)
    }
}

/// Timers registered by one [`Timeline::run`]
#[derive(Clone, Debug, Default)]
pub struct RunHandle {
    timers: Vec<TimerId>,
}

impl RunHandle {
    pub fn timers(&self) -> &[TimerId] {
        &self.timers
    }

    /// Revoke every timer of this run that has not fired yet
    ///
    /// Returns how many were still pending.
    pub fn cancel<S: Scheduler + ?Sized>(&self, scheduler: &S) -> usize {
        let cancelled = self
            .timers
            .iter()
            .filter(|id| scheduler.cancel(**id))
            .count();
        tracing::debug!(cancelled, total = self.timers.len(), "timeline run cancelled");
        cancelled
    }
}

/// An ordered sequence of steps with shared defaults and a completion callback
///
/// `C` is the host's custom easing payload (see [`Easing::Custom`](crate::Easing::Custom)).
pub struct Timeline<C> {
    steps: Vec<StepDescriptor<C>>,
    defaults: Option<Defaults<C>>,
    on_finish: Option<Callback>,
    verbose: bool,
    next_label: u64,
}

impl<C: Clone + fmt::Debug + 'static> Timeline<C> {
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            defaults: None,
            on_finish: None,
            verbose: false,
            next_label: 0,
        }
    }

    /// Create a timeline whose steps inherit `defaults`
    pub fn with_defaults(defaults: Defaults<C>) -> Result<Self> {
        let mut timeline = Self::new();
        timeline.set_defaults(defaults)?;
        Ok(timeline)
    }

    /// Replace the defaults used by steps appended from now on
    ///
    /// Steps already in the timeline keep the values they resolved to.
    pub fn set_defaults(&mut self, defaults: Defaults<C>) -> Result<&mut Self> {
        self.defaults = Some(defaults.validated()?);
        Ok(self)
    }

    /// Append a synchronous step
    pub fn add(&mut self, step: Step<C>) -> Result<&mut Self> {
        self.push(step, false)
    }

    /// Append a step that fires at the current offset without delaying the rest
    pub fn add_async(&mut self, step: Step<C>) -> Result<&mut Self> {
        self.push(step, true)
    }

    /// Pad the most recent synchronous step's delay by `seconds`
    ///
    /// Without a synchronous step to pad this does nothing.
    pub fn wait(&mut self, seconds: f64) -> Result<&mut Self> {
        let seconds = check_seconds("wait", seconds)?;
        match self.steps.iter_mut().rev().find(|s| !s.is_async) {
            Some(step) => {
                step.delay += seconds;
                step_event!(self.verbose, label = %step.label, seconds, delay = step.delay, "wait padded step");
            }
            None => {
                step_event!(self.verbose, seconds, "wait ignored, no synchronous step yet");
            }
        }
        Ok(self)
    }

    /// Log enqueue, dispatch and completion at `info` level
    pub fn set_verbose(&mut self) -> &mut Self {
        self.verbose = true;
        self
    }

    /// Set the callback run once all synchronous steps have elapsed
    pub fn on_finish(&mut self, callback: impl Fn() + 'static) -> &mut Self {
        self.on_finish = Some(Rc::new(callback));
        self
    }

    pub fn steps(&self) -> &[StepDescriptor<C>] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn defaults(&self) -> Option<&Defaults<C>> {
        self.defaults.as_ref()
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Compute dispatch times without scheduling anything
    pub fn plan(&self) -> Schedule {
        let mut offset = 0.0;
        let mut steps = Vec::with_capacity(self.steps.len());

        for (index, step) in self.steps.iter().enumerate() {
            steps.push(ScheduledStep {
                index,
                label: step.label.clone(),
                at: offset + step.delay,
                duration: step.duration,
                is_async: step.is_async,
                has_action: step.action.is_some(),
            });
            offset += step.span();
        }

        Schedule {
            steps,
            finish_at: offset,
        }
    }

    /// Register every step and the completion callback on `scheduler`
    ///
    /// Returns immediately. The timeline is left untouched, so it can be run
    /// again to replay the same sequence.
    pub fn run<S, A>(&self, scheduler: &S, animator: Rc<A>) -> RunHandle
    where
        S: Scheduler + ?Sized,
        A: Animator<C> + ?Sized + 'static,
    {
        let schedule = self.plan();
        let mut timers = Vec::with_capacity(self.steps.len() + 1);

        for (step, slot) in self.steps.iter().zip(&schedule.steps) {
            step_event!(self.verbose, at = slot.at, "enqueue {}", step);

            let Some(action) = step.action.clone() else {
                continue;
            };
            let transition = step.easing.transition(step.duration);
            let animator = Rc::clone(&animator);
            let label = step.label.clone();
            let verbose = self.verbose;

            timers.push(scheduler.schedule_after(
                slot.at,
                Box::new(move || {
                    step_event!(verbose, label = %label, ?transition, "dispatch");
                    animator.animate(&transition, &*action);
                }),
            ));
        }

        if let Some(callback) = self.on_finish.clone() {
            let verbose = self.verbose;
            let finish_at = schedule.finish_at;
            timers.push(scheduler.schedule_after(
                finish_at,
                Box::new(move || {
                    step_event!(verbose, finish_at, "timeline finished");
                    callback();
                }),
            ));
        }

        RunHandle { timers }
    }

    fn push(&mut self, step: Step<C>, is_async: bool) -> Result<&mut Self> {
        let descriptor = self.resolve(step, is_async)?;
        self.steps.push(descriptor);
        Ok(self)
    }

    /// Fill unset fields: explicit value, then timeline defaults, then system defaults
    fn resolve(&mut self, step: Step<C>, is_async: bool) -> Result<StepDescriptor<C>> {
        let fallback = self.defaults.clone().unwrap_or_default();

        let delay = check_seconds("delay", step.delay.unwrap_or(fallback.delay))?;
        let duration = check_seconds("duration", step.duration.unwrap_or(fallback.duration))?;
        let easing = step.easing.unwrap_or(fallback.easing);

        let label = match step.label {
            Some(label) => label,
            None => {
                let label = self.next_label.to_string();
                self.next_label += 1;
                label
            }
        };

        Ok(StepDescriptor {
            label,
            delay,
            duration,
            easing,
            action: step.action,
            is_async,
        })
    }
}

impl<C: Clone + fmt::Debug + 'static> Default for Timeline<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: fmt::Debug> fmt::Debug for Timeline<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timeline")
            .field("steps", &self.steps)
            .field("defaults", &self.defaults)
            .field("has_on_finish", &self.on_finish.is_some())
            .field("verbose", &self.verbose)
            .finish()
    }
}
