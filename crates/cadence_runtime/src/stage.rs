//! Animated properties
//!
//! A [`Stage`] is the observable state timeline actions mutate. Setting a
//! property inside [`Stage::with_animation`] (or from a step dispatched with
//! the stage as its [`Animator`]) starts a tween from the property's current
//! value; setting it anywhere else jumps straight to the new value.

use std::cell::{Cell, RefCell};

use cadence_timeline::{Animator, Transition};
use slotmap::{new_key_type, SlotMap};

use crate::curve::Curve;

new_key_type! {
    pub struct PropertyId;
}

#[derive(Clone, Copy, Debug)]
struct Tween {
    from: f32,
    curve: Curve,
    start: f64,
    duration: f64,
}

#[derive(Clone, Debug)]
struct Property {
    name: String,
    target: f32,
    tween: Option<Tween>,
}

impl Property {
    fn value_at(&self, now: f64) -> f32 {
        let Some(tween) = &self.tween else {
            return self.target;
        };
        let local = now - tween.start;
        if local >= tween.duration {
            return self.target;
        }
        let progress = (local / tween.duration).max(0.0) as f32;
        let eased = tween.curve.apply(progress);
        tween.from + (self.target - tween.from) * eased
    }
}

/// A set of named `f32` properties with their own clock
pub struct Stage {
    properties: RefCell<SlotMap<PropertyId, Property>>,
    now: Cell<f64>,
    /// Transitions of the enclosing `with_animation` scopes, innermost last
    scopes: RefCell<Vec<(Curve, f64)>>,
}

/// Pops the innermost `with_animation` scope, even when its action unwinds
struct ScopeGuard<'a>(&'a RefCell<Vec<(Curve, f64)>>);

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        self.0.borrow_mut().pop();
    }
}

impl Stage {
    pub fn new() -> Self {
        Self {
            properties: RefCell::new(SlotMap::with_key()),
            now: Cell::new(0.0),
            scopes: RefCell::new(Vec::new()),
        }
    }

    /// Add a property resting at `value`
    pub fn insert(&self, name: impl Into<String>, value: f32) -> PropertyId {
        self.properties.borrow_mut().insert(Property {
            name: name.into(),
            target: value,
            tween: None,
        })
    }

    /// Change a property, animating if called inside a transition scope
    pub fn set(&self, id: PropertyId, value: f32) {
        let now = self.now.get();
        let scope = self.scopes.borrow().last().copied();
        let mut properties = self.properties.borrow_mut();
        let Some(property) = properties.get_mut(id) else {
            tracing::warn!(?id, "set on unknown stage property");
            return;
        };

        let from = property.value_at(now);
        property.target = value;
        property.tween = match scope {
            Some((curve, duration)) if duration > 0.0 => {
                tracing::debug!(
                    name = %property.name,
                    from,
                    to = value,
                    ?curve,
                    duration,
                    "tween started"
                );
                Some(Tween {
                    from,
                    curve,
                    start: now,
                    duration,
                })
            }
            _ => None,
        };
    }

    /// Current (interpolated) value
    pub fn value(&self, id: PropertyId) -> Option<f32> {
        let now = self.now.get();
        self.properties.borrow().get(id).map(|p| p.value_at(now))
    }

    /// Value the property is heading towards
    pub fn target(&self, id: PropertyId) -> Option<f32> {
        self.properties.borrow().get(id).map(|p| p.target)
    }

    pub fn name(&self, id: PropertyId) -> Option<String> {
        self.properties.borrow().get(id).map(|p| p.name.clone())
    }

    /// Run `action` so that every `set` inside it animates with `curve` over `duration` seconds
    pub fn with_animation<R>(&self, curve: Curve, duration: f64, action: impl FnOnce() -> R) -> R {
        self.scopes.borrow_mut().push((curve, duration));
        let _scope = ScopeGuard(&self.scopes);
        action()
    }

    /// Advance the stage clock
    pub fn tick(&self, dt: f64) {
        let now = self.now.get() + dt.max(0.0);
        self.now.set(now);

        for (_, property) in self.properties.borrow_mut().iter_mut() {
            if property
                .tween
                .is_some_and(|t| now - t.start >= t.duration)
            {
                property.tween = None;
            }
        }
    }

    /// Stage clock in seconds
    pub fn now(&self) -> f64 {
        self.now.get()
    }

    /// Check if any property is still tweening
    pub fn is_animating(&self) -> bool {
        self.properties.borrow().values().any(|p| p.tween.is_some())
    }

    /// `(name, current value)` for every property, in insertion order
    pub fn snapshot(&self) -> Vec<(String, f32)> {
        let now = self.now.get();
        self.properties
            .borrow()
            .values()
            .map(|p| (p.name.clone(), p.value_at(now)))
            .collect()
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new()
    }
}

impl Animator<Curve> for Stage {
    fn animate(&self, transition: &Transition<Curve>, action: &dyn Fn()) {
        let (curve, duration) = Curve::for_transition(transition);
        self.with_animation(curve, duration, action);
    }
}
