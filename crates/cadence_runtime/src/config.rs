//! Sequence configuration file handling
//!
//! ```toml
//! verbose = true
//!
//! [defaults]
//! delay = 0.5
//! duration = 0.4
//! easing = "ease-in-out"          # or { cubic-bezier = [0.1, 0.7, 1.0, 0.1] }
//! ```

use std::fs;
use std::path::Path;

use cadence_timeline::defaults::{DEFAULT_DELAY, DEFAULT_DURATION};
use cadence_timeline::{Defaults, Easing};
use serde::{Deserialize, Serialize};

use crate::curve::Curve;
use crate::error::{ConfigError, Result};
use crate::Timeline;

/// Top-level sequence configuration
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SequenceConfig {
    /// Log step enqueue/dispatch/completion at info level
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Default step timing
#[derive(Debug, Deserialize, Serialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_delay")]
    pub delay: f64,
    #[serde(default = "default_duration")]
    pub duration: f64,
    #[serde(default)]
    pub easing: EasingConfig,
}

fn default_delay() -> f64 {
    DEFAULT_DELAY
}

fn default_duration() -> f64 {
    DEFAULT_DURATION
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            delay: default_delay(),
            duration: default_duration(),
            easing: EasingConfig::default(),
        }
    }
}

/// Easing as written in config files
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EasingConfig {
    #[default]
    Default,
    EaseIn,
    EaseOut,
    EaseInOut,
    Linear,
    CubicBezier([f32; 4]),
}

impl From<EasingConfig> for Easing<Curve> {
    fn from(config: EasingConfig) -> Self {
        match config {
            EasingConfig::Default => Easing::Default,
            EasingConfig::EaseIn => Easing::EaseIn,
            EasingConfig::EaseOut => Easing::EaseOut,
            EasingConfig::EaseInOut => Easing::EaseInOut,
            EasingConfig::Linear => Easing::Linear,
            EasingConfig::CubicBezier([x1, y1, x2, y2]) => {
                Easing::Custom(Curve::CubicBezier(x1, y1, x2, y2))
            }
        }
    }
}

impl SequenceConfig {
    /// Load from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), ?config, "loaded sequence config");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// The timeline defaults this config describes
    pub fn step_defaults(&self) -> Defaults<Curve> {
        Defaults::system()
            .with_delay(self.defaults.delay)
            .with_duration(self.defaults.duration)
            .with_easing(self.defaults.easing.into())
    }

    /// An empty timeline seeded with these defaults and verbosity
    pub fn timeline(&self) -> Result<Timeline> {
        let mut timeline = Timeline::with_defaults(self.step_defaults())?;
        if self.verbose {
            timeline.set_verbose();
        }
        Ok(timeline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_system_defaults() {
        let config = SequenceConfig::from_toml_str("").unwrap();
        assert!(!config.verbose);
        assert_eq!(config.step_defaults(), Defaults::system());
    }

    #[test]
    fn test_full_config() {
        let config = SequenceConfig::from_toml_str(
            r#"
            verbose = true

            [defaults]
            delay = 0.5
            duration = 0.4
            easing = "ease-in-out"
            "#,
        )
        .unwrap();

        assert!(config.verbose);
        let defaults = config.step_defaults();
        assert_eq!(defaults.delay, 0.5);
        assert_eq!(defaults.duration, 0.4);
        assert_eq!(defaults.easing, Easing::EaseInOut);

        let timeline = config.timeline().unwrap();
        assert!(timeline.is_verbose());
        assert_eq!(timeline.defaults(), Some(&defaults));
    }

    #[test]
    fn test_cubic_bezier_easing() {
        let config = SequenceConfig::from_toml_str(
            r#"
            [defaults]
            easing = { cubic-bezier = [0.1, 0.7, 1.0, 0.1] }
            "#,
        )
        .unwrap();

        assert_eq!(config.defaults.duration, DEFAULT_DURATION);
        assert_eq!(
            config.step_defaults().easing,
            Easing::Custom(Curve::CubicBezier(0.1, 0.7, 1.0, 0.1))
        );
    }

    #[test]
    fn test_unknown_easing_is_rejected() {
        let err = SequenceConfig::from_toml_str("[defaults]\neasing = \"bouncy\"").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_negative_defaults_are_invalid() {
        let config = SequenceConfig::from_toml_str("[defaults]\nduration = -1.0").unwrap();
        assert!(matches!(config.timeline(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let err = SequenceConfig::load("/nonexistent/cadence.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/cadence.toml"));
    }

    #[test]
    fn test_load_from_disk() {
        let path = std::env::temp_dir().join(format!("cadence-config-{}.toml", std::process::id()));
        fs::write(&path, "[defaults]\ndelay = 0.25\neasing = \"linear\"\n").unwrap();

        let config = SequenceConfig::load(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.defaults.delay, 0.25);
        assert_eq!(config.defaults.easing, EasingConfig::Linear);
    }

    #[test]
    fn test_bad_file_reports_path() {
        let path = std::env::temp_dir().join(format!("cadence-bad-{}.toml", std::process::id()));
        fs::write(&path, "defaults = 3").unwrap();

        let err = SequenceConfig::load(&path).unwrap_err();
        fs::remove_file(&path).unwrap();

        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
