//! Scripted test case overrides
//!
//! A scripted run replays an ordered list of records like
//! `{"crc": true, "time": true}`. Each `true` flag forces the matching edge
//! case for that message; absent or `false` flags keep the default.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::{ConfigError, ConfigResult};

/// Per-message edge-case flags for a scripted run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TestCaseOverride {
    /// Send a corrupted checksum
    pub crc: bool,
    /// Send the invalid event code
    pub code: bool,
    /// Send the invalid account
    pub account: bool,
    /// Skew the timestamp into the past
    pub time: bool,
}

impl TestCaseOverride {
    pub fn crc() -> Self {
        Self {
            crc: true,
            ..Self::default()
        }
    }

    pub fn code() -> Self {
        Self {
            code: true,
            ..Self::default()
        }
    }

    pub fn account() -> Self {
        Self {
            account: true,
            ..Self::default()
        }
    }

    pub fn time() -> Self {
        Self {
            time: true,
            ..Self::default()
        }
    }
}

/// Parse a JSON array of overrides
pub fn parse_test_cases(json: &str) -> serde_json::Result<Vec<TestCaseOverride>> {
    serde_json::from_str(json)
}

/// Load an ordered override list from a JSON file
pub fn load_test_cases(path: &Path) -> ConfigResult<Vec<TestCaseOverride>> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::script(path, e))?;
    let cases = parse_test_cases(&text).map_err(|e| ConfigError::script(path, e))?;
    info!("Loaded {} scripted test cases from {:?}", cases.len(), path);
    Ok(cases)
}
