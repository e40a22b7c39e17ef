//! # SIA DC-09 Frame Builder
//!
//! ## Purpose
//!
//! Wraps content in the protocol envelope and frame:
//!
//! ```text
//! \n<CRC:4 hex><LEN:4 hex>"[*]SIA-DCS"<SEQ>L0#<ACCOUNT>[<CONTENT>\r
//!                         └──────────── envelope line ─────────────┘
//! ```
//!
//! The checksum and length both cover the envelope line only. Given the same
//! content, account, sequence number and checksum choice the output is
//! byte-for-byte identical; the only randomness (sequence number, corrupted
//! checksum) is drawn from a caller-supplied RNG.

use rand::Rng;
use std::fmt;
use tracing::trace;

use crate::cipher::CipherKey;
use crate::constants::{SEQUENCE_MAX, SEQUENCE_MIN};
use crate::content::{build_content, Content};
use crate::error::{ProtocolError, ProtocolResult};
use crate::validation::checksum::{verify_line_checksum, Checksum};

/// 4-digit per-message sequence number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SequenceNumber(u16);

impl SequenceNumber {
    pub fn new(value: u16) -> ProtocolResult<Self> {
        if (SEQUENCE_MIN..=SEQUENCE_MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ProtocolError::InvalidSequence { value })
        }
    }

    /// Fresh sequence number, uniform over 1000..=9999
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen_range(SEQUENCE_MIN..=SEQUENCE_MAX))
    }

    pub const fn value(self) -> u16 {
        self.0
    }
}

impl fmt::Display for SequenceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Character count of the envelope line, rendered as 4 uppercase hex digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LengthField(usize);

impl LengthField {
    pub fn of(line: &str) -> Self {
        Self(line.chars().count())
    }

    pub const fn from_value(value: usize) -> Self {
        Self(value)
    }

    pub const fn value(self) -> usize {
        self.0
    }
}

impl fmt::Display for LengthField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}", self.0)
    }
}

/// A complete frame: checksum, length and envelope line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    checksum: Checksum,
    length: LengthField,
    line: String,
}

impl Frame {
    pub(crate) fn from_parts(checksum: Checksum, length: LengthField, line: String) -> Self {
        Self {
            checksum,
            length,
            line,
        }
    }

    pub fn checksum(&self) -> Checksum {
        self.checksum
    }

    pub fn length(&self) -> LengthField {
        self.length
    }

    /// The envelope line the checksum and length cover
    pub fn line(&self) -> &str {
        &self.line
    }

    /// Whether the frame carries the checksum of its own envelope line
    pub fn has_valid_checksum(&self) -> bool {
        verify_line_checksum(&self.line, self.checksum.value())
    }

    /// Wire form: `\n<crc><len><line>\r`
    pub fn to_wire(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n{}{}{}\r", self.checksum, self.length, self.line)
    }
}

/// Build the envelope line around already-built content
pub fn envelope_line(content: &Content, account: &str, sequence: SequenceNumber) -> String {
    format!(
        "\"{}SIA-DCS\"{}L0#{}[{}",
        if content.is_encrypted() { "*" } else { "" },
        sequence,
        account,
        content.as_str()
    )
}

/// Frame content for `account`
///
/// `checksum_override` replaces the computed checksum; the length field is
/// always correct.
pub fn frame(
    content: &Content,
    account: &str,
    sequence: SequenceNumber,
    checksum_override: Option<Checksum>,
) -> Frame {
    let line = envelope_line(content, account, sequence);
    let computed = Checksum::compute(&line);
    let checksum = checksum_override.unwrap_or(computed);
    let length = LengthField::of(&line);

    trace!(
        sequence = sequence.value(),
        checksum = %checksum,
        computed = %computed,
        length = length.value(),
        "Framed envelope line"
    );

    Frame::from_parts(checksum, length, line)
}

/// Builder for one complete test message
///
/// Unset sequence numbers are drawn from the RNG passed to [`build`].
///
/// [`build`]: SiaMessageBuilder::build
#[derive(Debug, Clone)]
pub struct SiaMessageBuilder<'a> {
    account: &'a str,
    code: &'a str,
    timestamp: &'a str,
    key: Option<&'a CipherKey>,
    sequence: Option<SequenceNumber>,
    corrupt_checksum: bool,
}

impl<'a> SiaMessageBuilder<'a> {
    pub fn new(account: &'a str, code: &'a str, timestamp: &'a str) -> Self {
        Self {
            account,
            code,
            timestamp,
            key: None,
            sequence: None,
            corrupt_checksum: false,
        }
    }

    /// Encrypt the content with `key` when present
    pub fn key(mut self, key: Option<&'a CipherKey>) -> Self {
        self.key = key;
        self
    }

    /// Pin the sequence number instead of drawing one
    pub fn sequence(mut self, sequence: SequenceNumber) -> Self {
        self.sequence = Some(sequence);
        self
    }

    /// Replace the checksum with an independently drawn value
    pub fn corrupt_checksum(mut self, corrupt: bool) -> Self {
        self.corrupt_checksum = corrupt;
        self
    }

    pub fn build<R: Rng + ?Sized>(self, rng: &mut R) -> Frame {
        let sequence = self
            .sequence
            .unwrap_or_else(|| SequenceNumber::random(rng));
        let content = build_content(self.code, self.timestamp, self.key);
        let checksum_override = self.corrupt_checksum.then(|| Checksum::corrupted(rng));
        frame(&content, self.account, sequence, checksum_override)
    }
}

/// One-call construction of a test frame with a fresh sequence number
pub fn create_test_line<R: Rng + ?Sized>(
    key: Option<&CipherKey>,
    account: &str,
    code: &str,
    timestamp: &str,
    alter_crc: bool,
    rng: &mut R,
) -> Frame {
    SiaMessageBuilder::new(account, code, timestamp)
        .key(key)
        .corrupt_checksum(alter_crc)
        .build(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const TIMESTAMP: &str = "_00:00:00,01-01-2020";

    #[test]
    fn test_sequence_number_range() {
        assert!(SequenceNumber::new(999).is_err());
        assert!(SequenceNumber::new(1000).is_ok());
        assert!(SequenceNumber::new(9999).is_ok());
        assert_eq!(
            SequenceNumber::new(10000).unwrap_err(),
            ProtocolError::InvalidSequence { value: 10000 }
        );

        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1000 {
            let seq = SequenceNumber::random(&mut rng);
            assert_eq!(seq.to_string().len(), 4);
        }
    }

    #[test]
    fn test_plaintext_frame_layout() {
        let content = build_content("BA", TIMESTAMP, None);
        let seq = SequenceNumber::new(1234).unwrap();
        let frame = frame(&content, "1111", seq, None);

        assert_eq!(
            frame.line(),
            "\"SIA-DCS\"1234L0#1111[|Nri1/BA000]_00:00:00,01-01-2020"
        );
        assert_eq!(frame.length().value(), frame.line().len());

        let wire = frame.to_wire();
        assert!(wire.starts_with('\n'));
        assert!(wire.ends_with('\r'));
        assert_eq!(&wire[1..5], frame.checksum().to_string());
        assert_eq!(&wire[5..9], format!("{:04X}", frame.line().len()));
        assert_eq!(&wire[9..wire.len() - 1], frame.line());
    }

    #[test]
    fn test_encrypted_frame_has_marker() {
        let key = CipherKey::new("0123456789ABCDEF").unwrap();
        let content = build_content("RP", TIMESTAMP, Some(&key));
        let frame = frame(&content, "1111", SequenceNumber::new(5000).unwrap(), None);

        assert!(frame.line().starts_with("\"*SIA-DCS\"5000L0#1111["));
        assert!(frame.has_valid_checksum());
    }

    #[test]
    fn test_checksum_override_keeps_length() {
        let content = build_content("BA", TIMESTAMP, None);
        let seq = SequenceNumber::new(1234).unwrap();
        let honest = frame(&content, "1111", seq, None);
        let bogus = Checksum::from_value(honest.checksum().value().wrapping_add(1));
        let altered = frame(&content, "1111", seq, Some(bogus));

        assert_eq!(altered.checksum(), bogus);
        assert_eq!(altered.length(), honest.length());
        assert_eq!(altered.line(), honest.line());
        assert!(!altered.has_valid_checksum());
    }

    #[test]
    fn test_builder_pins_sequence() {
        let mut rng = StdRng::seed_from_u64(3);
        let seq = SequenceNumber::new(4321).unwrap();
        let a = SiaMessageBuilder::new("1111", "FA", TIMESTAMP)
            .sequence(seq)
            .build(&mut rng);
        let b = SiaMessageBuilder::new("1111", "FA", TIMESTAMP)
            .sequence(seq)
            .build(&mut rng);
        assert_eq!(a.to_wire(), b.to_wire());
    }
}
