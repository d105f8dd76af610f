//! Easing descriptors and the transitions they resolve to

use std::fmt;

/// Easing descriptor carried by a step
///
/// `C` is the host's own curve type. The timeline never looks inside a
/// [`Easing::Custom`] payload, it only hands it back through [`Transition`].
#[derive(Clone, Debug, PartialEq)]
pub enum Easing<C> {
    /// Whatever the host considers its default animation
    Default,
    EaseIn,
    EaseOut,
    EaseInOut,
    Linear,
    /// Host-defined curve, passed through untouched
    Custom(C),
}

impl<C> Default for Easing<C> {
    fn default() -> Self {
        Easing::Default
    }
}

impl<C: Clone> Easing<C> {
    /// Resolve this descriptor against a step duration (seconds)
    ///
    /// [`Easing::Default`] deliberately drops the duration: the host picks
    /// the timing of its default animation.
    pub fn transition(&self, duration: f64) -> Transition<C> {
        match self {
            Easing::Default => Transition::Default,
            Easing::EaseIn => Transition::EaseIn(duration),
            Easing::EaseOut => Transition::EaseOut(duration),
            Easing::EaseInOut => Transition::EaseInOut(duration),
            Easing::Linear => Transition::Linear(duration),
            Easing::Custom(curve) => Transition::Custom {
                curve: curve.clone(),
                duration,
            },
        }
    }
}

impl<C: fmt::Debug> fmt::Display for Easing<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Easing::Default => f.write_str("default"),
            Easing::EaseIn => f.write_str("ease-in"),
            Easing::EaseOut => f.write_str("ease-out"),
            Easing::EaseInOut => f.write_str("ease-in-out"),
            Easing::Linear => f.write_str("linear"),
            Easing::Custom(curve) => write!(f, "custom({curve:?})"),
        }
    }
}

/// An easing descriptor bound to a duration, handed to the [`Animator`](crate::Animator)
#[derive(Clone, Debug, PartialEq)]
pub enum Transition<C> {
    Default,
    EaseIn(f64),
    EaseOut(f64),
    EaseInOut(f64),
    Linear(f64),
    Custom { curve: C, duration: f64 },
}

impl<C> Transition<C> {
    /// Duration in seconds, `None` for the host default
    pub fn duration(&self) -> Option<f64> {
        match self {
            Transition::Default => None,
            Transition::EaseIn(d)
            | Transition::EaseOut(d)
            | Transition::EaseInOut(d)
            | Transition::Linear(d) => Some(*d),
            Transition::Custom { duration, .. } => Some(*duration),
        }
    }
}
