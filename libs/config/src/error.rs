//! Configuration errors
//!
//! Every variant is fatal at startup and surfaces before any connection is
//! attempted.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required field is absent
    #[error("Missing required configuration field '{field}'")]
    Missing { field: &'static str },

    /// A field is present but unusable
    #[error("Invalid configuration field '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },

    /// The cipher key failed validation
    #[error("Invalid cipher key: {0}")]
    Key(#[from] codec::ProtocolError),

    /// Configuration sources could not be read or merged
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config_crate::ConfigError),

    /// Scripted test case file could not be read or parsed
    #[error("Failed to load test cases from {path:?}: {source}")]
    Script {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ConfigError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }

    pub fn script(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Script {
            path: path.into(),
            source: source.into(),
        }
    }
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
