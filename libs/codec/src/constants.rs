//! # Protocol Constants - SIA DC-09 Event Vocabulary
//!
//! ## Purpose
//!
//! Central registry of the event codes, sentinels and numeric limits the
//! transmitter uses when building messages. The code list is the vocabulary
//! recognized by the receiver under test; anything outside it is expected to
//! be rejected.

use std::fmt;
use std::str::FromStr;

use crate::error::ProtocolError;

/// Event code substituted when testing the receiver's unknown-code path
pub const INVALID_EVENT_CODE: &str = "ZX";

/// Account substituted when testing the receiver's unknown-account path
pub const INVALID_ACCOUNT: &str = "FFFFFFFFF";

/// Longest account id the frame header can describe; SIA DC-09 accounts are
/// 3 to 16 characters.
pub const MAX_ACCOUNT_LEN: usize = 16;

/// Event code whose zone digit is `0`; every other code reports zone `1`
pub const RESTORE_CODE: &str = "RP";

/// AES block size; plaintext is left-padded to a multiple of this
pub const BLOCK_SIZE: usize = 16;

/// Length of an AES-128 key in bytes
pub const KEY_LENGTH: usize = 16;

/// Character used for left-padding plaintext before encryption
pub const PAD_CHAR: u8 = b'0';

/// Inclusive range of the per-message sequence number
pub const SEQUENCE_MIN: u16 = 1000;
pub const SEQUENCE_MAX: u16 = 9999;

/// Two-letter SIA event codes understood by the receiver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventCode {
    AT,
    AR,
    BA,
    BR,
    CA,
    CF,
    CG,
    CL,
    CP,
    CQ,
    GA,
    GH,
    FA,
    FH,
    KA,
    KH,
    NL,
    OA,
    OG,
    OP,
    OQ,
    OR,
    RP,
    TA,
    WA,
    WH,
    YG,
}

impl EventCode {
    /// Every code in transmission order
    pub const ALL: [EventCode; 27] = [
        EventCode::AT,
        EventCode::AR,
        EventCode::BA,
        EventCode::BR,
        EventCode::CA,
        EventCode::CF,
        EventCode::CG,
        EventCode::CL,
        EventCode::CP,
        EventCode::CQ,
        EventCode::GA,
        EventCode::GH,
        EventCode::FA,
        EventCode::FH,
        EventCode::KA,
        EventCode::KH,
        EventCode::NL,
        EventCode::OA,
        EventCode::OG,
        EventCode::OP,
        EventCode::OQ,
        EventCode::OR,
        EventCode::RP,
        EventCode::TA,
        EventCode::WA,
        EventCode::WH,
        EventCode::YG,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            EventCode::AT => "AT",
            EventCode::AR => "AR",
            EventCode::BA => "BA",
            EventCode::BR => "BR",
            EventCode::CA => "CA",
            EventCode::CF => "CF",
            EventCode::CG => "CG",
            EventCode::CL => "CL",
            EventCode::CP => "CP",
            EventCode::CQ => "CQ",
            EventCode::GA => "GA",
            EventCode::GH => "GH",
            EventCode::FA => "FA",
            EventCode::FH => "FH",
            EventCode::KA => "KA",
            EventCode::KH => "KH",
            EventCode::NL => "NL",
            EventCode::OA => "OA",
            EventCode::OG => "OG",
            EventCode::OP => "OP",
            EventCode::OQ => "OQ",
            EventCode::OR => "OR",
            EventCode::RP => "RP",
            EventCode::TA => "TA",
            EventCode::WA => "WA",
            EventCode::WH => "WH",
            EventCode::YG => "YG",
        }
    }

    /// Whether this code reports a restore/normal condition
    pub fn is_restore(self) -> bool {
        self == EventCode::RP
    }
}

impl fmt::Display for EventCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventCode {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventCode::ALL
            .iter()
            .copied()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| ProtocolError::malformed(format!("unknown event code {s:?}")))
    }
}

/// Zone digit for a code: `0` for the restore code, `1` for everything else
pub fn zone_for(code: &str) -> char {
    if code == RESTORE_CODE {
        '0'
    } else {
        '1'
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_round_trips_through_str() {
        for code in EventCode::ALL {
            assert_eq!(code.as_str().parse::<EventCode>().unwrap(), code);
            assert_eq!(code.as_str().len(), 2);
        }
    }

    #[test]
    fn test_sentinel_is_outside_vocabulary() {
        assert!(INVALID_EVENT_CODE.parse::<EventCode>().is_err());
    }

    #[test]
    fn test_only_restore_code_maps_to_zone_zero() {
        for code in EventCode::ALL {
            let expected = if code.is_restore() { '0' } else { '1' };
            assert_eq!(zone_for(code.as_str()), expected, "code {code}");
        }
        assert_eq!(zone_for(INVALID_EVENT_CODE), '1');
    }
}
