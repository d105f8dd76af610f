//! Steps: what callers append, and what the timeline stores

use std::fmt;
use std::rc::Rc;

use crate::easing::Easing;

/// Zero-argument side effect shared between a timeline and its scheduled timers
pub type Callback = Rc<dyn Fn()>;

/// A step as requested by the caller
///
/// Every field is optional; whatever is left unset is filled in from the
/// timeline defaults when the step is appended.
pub struct Step<C> {
    pub(crate) label: Option<String>,
    pub(crate) delay: Option<f64>,
    pub(crate) duration: Option<f64>,
    pub(crate) easing: Option<Easing<C>>,
    pub(crate) action: Option<Callback>,
}

impl<C> Step<C> {
    /// A step that runs `action` when dispatched
    pub fn new(action: impl Fn() + 'static) -> Self {
        Self {
            action: Some(Rc::new(action)),
            ..Self::marker()
        }
    }

    /// A step without an action, useful to reserve time in the sequence
    pub fn marker() -> Self {
        Self {
            label: None,
            delay: None,
            duration: None,
            easing: None,
            action: None,
        }
    }

    /// Builder: set label
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Builder: set delay (seconds)
    pub fn delay(mut self, seconds: f64) -> Self {
        self.delay = Some(seconds);
        self
    }

    /// Builder: set duration (seconds)
    pub fn duration(mut self, seconds: f64) -> Self {
        self.duration = Some(seconds);
        self
    }

    /// Builder: set easing
    pub fn easing(mut self, easing: Easing<C>) -> Self {
        self.easing = Some(easing);
        self
    }
}

impl<C> Default for Step<C> {
    fn default() -> Self {
        Self::marker()
    }
}

/// A fully resolved step stored in a [`Timeline`](crate::Timeline)
#[derive(Clone)]
pub struct StepDescriptor<C> {
    pub(crate) label: String,
    pub(crate) delay: f64,
    pub(crate) duration: f64,
    pub(crate) easing: Easing<C>,
    pub(crate) action: Option<Callback>,
    pub(crate) is_async: bool,
}

impl<C> StepDescriptor<C> {
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Seconds to wait after the step is reached, before its action runs
    pub fn delay(&self) -> f64 {
        self.delay
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn easing(&self) -> &Easing<C> {
        &self.easing
    }

    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }

    /// Async steps do not push back the steps after them
    pub fn is_async(&self) -> bool {
        self.is_async
    }

    /// Time this step adds to the running offset
    pub(crate) fn span(&self) -> f64 {
        if self.is_async {
            0.0
        } else {
            self.delay + self.duration
        }
    }
}

impl<C: fmt::Debug> fmt::Debug for StepDescriptor<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepDescriptor")
            .field("label", &self.label)
            .field("delay", &self.delay)
            .field("duration", &self.duration)
            .field("easing", &self.easing)
            .field("has_action", &self.action.is_some())
            .field("is_async", &self.is_async)
            .finish()
    }
}

impl<C: fmt::Debug> fmt::Display for StepDescriptor<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[label: {}\tdelay: {}\tduration: {}\teasing: {}\tisAsync: {}]",
            self.label, self.delay, self.duration, self.easing, self.is_async
        )
    }
}
