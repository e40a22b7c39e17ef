//! CRC-16 Checksum
//!
//! SIA DC-09 frames carry a CRC-16/ARC (reflected polynomial 0xA001, initial
//! value 0) over the ASCII bytes of the envelope line, rendered as four
//! uppercase hex digits.

use crc::{Crc, CRC_16_ARC};
use rand::Rng;
use std::fmt;

static CRC16_ARC: Crc<u16> = Crc::<u16>::new(&CRC_16_ARC);

/// Calculate the CRC-16/ARC of a byte slice
pub fn calculate_crc16(data: &[u8]) -> u16 {
    CRC16_ARC.checksum(data)
}

/// Verify a declared checksum against the envelope line it covers
pub fn verify_line_checksum(line: &str, expected: u16) -> bool {
    calculate_crc16(line.as_bytes()) == expected
}

/// Four-hex-digit checksum field of a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Checksum(u16);

impl Checksum {
    /// Correct checksum over the exact envelope line
    pub fn compute(line: &str) -> Self {
        Self(calculate_crc16(line.as_bytes()))
    }

    /// Independently drawn checksum, made without looking at the line
    ///
    /// Collides with the real value about once in 65536 draws.
    pub fn corrupted<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen())
    }

    pub const fn from_value(value: u16) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}", self.0)
    }
}
