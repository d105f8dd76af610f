//! Cadence Runtime
//!
//! A concrete host for [`cadence_timeline`]:
//!
//! - **Curves**: easing math behind each [`Transition`](cadence_timeline::Transition)
//! - **Stage**: animated properties that interpolate when changed inside a transition
//! - **Event loop**: single-threaded real-time timers on tokio
//! - **Config**: timeline defaults loaded from TOML

pub mod config;
pub mod curve;
pub mod error;
pub mod event_loop;
pub mod stage;

pub use config::{DefaultsConfig, EasingConfig, SequenceConfig};
pub use curve::Curve;
pub use error::{ConfigError, Result};
pub use event_loop::EventLoop;
pub use stage::{PropertyId, Stage};

/// Timeline whose custom easings are [`Curve`]s
pub type Timeline = cadence_timeline::Timeline<Curve>;
