//! Transmitter defaults
//!
//! Default values and fixed test inputs shared by configuration loading and
//! the transmitter service.

use std::time::Duration;

/// Connection defaults
pub mod transport {
    /// Connect/read timeout (milliseconds)
    pub const CONNECT_TIMEOUT_MS: u64 = 5_000;

    /// Maximum response bytes read back per message
    pub const RESPONSE_LIMIT_BYTES: usize = 100;
}

/// Pacing defaults
pub mod pacing {
    /// Delay between messages (milliseconds)
    pub const INTER_MESSAGE_DELAY_MS: u64 = 3_000;
}

/// Fuzzing inputs
pub mod fuzz {
    use super::Duration;

    /// Probability of each independent substitution in randomized mode
    pub const SUBSTITUTION_PROBABILITY: f64 = 0.1;

    /// Timestamp offset forced by a scripted `time` flag
    pub const SCRIPTED_TIME_OFFSET: Duration = Duration::from_secs(100);

    /// Upper bound (inclusive) of the randomized timestamp offset, in seconds
    pub const MAX_RANDOM_OFFSET_SECS: u64 = 60;
}

/// Environment variable prefix for configuration overrides (`SIA_HOST`, ...)
pub const ENV_PREFIX: &str = "SIA";
