//! Event timestamp token
//!
//! Renders `now_utc - offset` as `_HH:MM:SS,MM-DD-YYYY`. The offset says how
//! far in the past the event claims to have happened.

use chrono::{DateTime, Utc};
use std::time::Duration;

const TIMESTAMP_FORMAT: &str = "_%H:%M:%S,%m-%d-%Y";

/// Format the timestamp token for an event `offset` before now
pub fn timestamp_token(offset: Duration) -> String {
    format_at(Utc::now(), offset)
}

/// Format the timestamp token for an event `offset` before `now`
///
/// Offsets too large for chrono's range clamp to the earliest representable
/// instant rather than panicking.
pub fn format_at(now: DateTime<Utc>, offset: Duration) -> String {
    let at = chrono::Duration::from_std(offset)
        .ok()
        .and_then(|delta| now.checked_sub_signed(delta))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    at.format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_zero_offset_uses_now() {
        let now = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_at(now, Duration::ZERO), "_00:00:00,01-01-2020");
    }

    #[test]
    fn test_offset_rolls_back_across_midnight() {
        let now = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 30).unwrap();
        assert_eq!(
            format_at(now, Duration::from_secs(100)),
            "_23:58:50,12-31-2019"
        );
    }

    #[test]
    fn test_token_shape_is_fixed_width() {
        let token = timestamp_token(Duration::from_secs(45));
        assert_eq!(token.len(), 20);
        assert!(token.starts_with('_'));
        assert_eq!(&token[3..4], ":");
        assert_eq!(&token[9..10], ",");
    }
}
