//! # SIA Transmitter Configuration
//!
//! Configuration loading, validation and defaults for the transmitter.
//!
//! ## Usage
//!
//! ```no_run
//! use std::path::Path;
//! use transmitter_config::{load_test_cases, TransmitterConfig};
//!
//! let config = TransmitterConfig::load(Path::new("config/encrypted_config.json"))?;
//! let cases = load_test_cases(Path::new("config/test_cases.json"))?;
//! # Ok::<(), transmitter_config::ConfigError>(())
//! ```

pub mod error;
pub mod service;
pub mod service_config;
pub mod test_cases;

// Re-export commonly used types
pub use error::{ConfigError, ConfigResult};
pub use service_config::TransmitterConfig;
pub use test_cases::{load_test_cases, parse_test_cases, TestCaseOverride};
