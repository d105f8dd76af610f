//! Runtime error types

use std::path::PathBuf;

use cadence_timeline::TimelineError;
use thiserror::Error;

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for a sequence config
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Inline TOML could not be parsed
    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    /// Values parsed but are not usable as timeline defaults
    #[error("invalid timeline defaults: {0}")]
    Invalid(#[from] TimelineError),
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, ConfigError>;
