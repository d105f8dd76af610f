//! Default step configuration

use crate::easing::Easing;
use crate::error::{check_seconds, Result};

/// Delay used when neither the step nor the timeline defaults set one
pub const DEFAULT_DELAY: f64 = 0.0;
/// Duration used when neither the step nor the timeline defaults set one
pub const DEFAULT_DURATION: f64 = 0.1;

/// Fallback delay/duration/easing for steps appended to a timeline
///
/// Starts from the system defaults; builder methods override single fields.
/// Installing a new value on a timeline replaces the previous one entirely.
#[derive(Clone, Debug, PartialEq)]
pub struct Defaults<C> {
    pub delay: f64,
    pub duration: f64,
    pub easing: Easing<C>,
}

impl<C> Defaults<C> {
    /// The system defaults: no delay, 0.1s, host default easing
    pub fn system() -> Self {
        Self {
            delay: DEFAULT_DELAY,
            duration: DEFAULT_DURATION,
            easing: Easing::Default,
        }
    }

    /// Builder: set delay
    pub fn with_delay(mut self, seconds: f64) -> Self {
        self.delay = seconds;
        self
    }

    /// Builder: set duration
    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration = seconds;
        self
    }

    /// Builder: set easing
    pub fn with_easing(mut self, easing: Easing<C>) -> Self {
        self.easing = easing;
        self
    }

    pub(crate) fn validated(self) -> Result<Self> {
        check_seconds("default delay", self.delay)?;
        check_seconds("default duration", self.duration)?;
        Ok(self)
    }
}

impl<C> Default for Defaults<C> {
    fn default() -> Self {
        Self::system()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TimelineError;

    #[test]
    fn test_system_defaults() {
        let defaults = Defaults::<()>::system();
        assert_eq!(defaults.delay, 0.0);
        assert_eq!(defaults.duration, 0.1);
        assert_eq!(defaults.easing, Easing::Default);
        assert_eq!(defaults, Defaults::default());
    }

    #[test]
    fn test_builder_keeps_unset_fields_at_system_values() {
        let defaults = Defaults::<()>::system().with_duration(0.4);
        assert_eq!(defaults.duration, 0.4);
        assert_eq!(defaults.delay, DEFAULT_DELAY);
        assert_eq!(defaults.easing, Easing::Default);
    }

    #[test]
    fn test_validation() {
        assert!(Defaults::<()>::system().with_delay(0.3).validated().is_ok());
        assert_eq!(
            Defaults::<()>::system().with_delay(-0.3).validated(),
            Err(TimelineError::Negative {
                field: "default delay",
                value: -0.3
            })
        );
    }
}
