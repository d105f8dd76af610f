//! The host side of easing
//!
//! When a step fires, the timeline asks an [`Animator`] to run the step's
//! action inside the step's [`Transition`], so the rendering layer can
//! interpolate whatever state the action changes.

use crate::easing::Transition;

/// Applies a transition around a state mutation
pub trait Animator<C> {
    fn animate(&self, transition: &Transition<C>, action: &dyn Fn());
}

/// Runs actions as plain state changes, without interpolation
#[derive(Clone, Copy, Debug, Default)]
pub struct Immediate;

impl<C> Animator<C> for Immediate {
    fn animate(&self, _transition: &Transition<C>, action: &dyn Fn()) {
        action();
    }
}

impl<C, F> Animator<C> for F
where
    F: Fn(&Transition<C>, &dyn Fn()),
{
    fn animate(&self, transition: &Transition<C>, action: &dyn Fn()) {
        self(transition, action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    #[test]
    fn test_immediate_runs_action() {
        let ran = Cell::new(false);
        Animator::<()>::animate(&Immediate, &Transition::Linear(1.0), &|| ran.set(true));
        assert!(ran.get());
    }

    #[test]
    fn test_closure_animator_sees_transition() {
        let seen = RefCell::new(Vec::new());
        let animator = |t: &Transition<()>, action: &dyn Fn()| {
            seen.borrow_mut().push(t.duration());
            action();
        };
        let ran = Cell::new(0);
        animator.animate(&Transition::EaseOut(0.25), &|| ran.set(ran.get() + 1));
        animator.animate(&Transition::Default, &|| ran.set(ran.get() + 1));
        assert_eq!(*seen.borrow(), vec![Some(0.25), None]);
        assert_eq!(ran.get(), 2);
    }
}
