//! Protocol-level errors for SIA DC-09 message construction
//!
//! Deliberate protocol violations (corrupted checksum, unknown event code,
//! substituted account, skewed timestamp) are fuzz inputs and never show up
//! here. These variants cover caller mistakes and frames that fail their own
//! integrity checks.

use thiserror::Error;

/// Message construction and validation errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Cipher key is not exactly one AES-128 key long
    #[error("Invalid key length: expected {expected} bytes, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },

    /// Sequence number outside the 4-digit range the envelope allows
    #[error("Invalid sequence number {value}: must be within 1000..=9999")]
    InvalidSequence { value: u16 },

    /// Wire message does not have the `\n<crc><len><line>\r` shape
    #[error("Malformed frame: {reason}")]
    MalformedFrame { reason: String },

    /// Declared checksum does not match the envelope line
    #[error("Checksum mismatch: declared {expected:04X}, calculated {calculated:04X}")]
    ChecksumMismatch { expected: u16, calculated: u16 },

    /// Declared length does not match the envelope line
    #[error("Length mismatch: declared {declared}, envelope line has {actual} characters")]
    LengthMismatch { declared: usize, actual: usize },

    /// Ciphertext could not be decoded back into a padded plaintext
    #[error("Invalid ciphertext: {reason}")]
    InvalidCiphertext { reason: String },
}

impl ProtocolError {
    /// Create a malformed frame error
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedFrame {
            reason: reason.into(),
        }
    }

    /// Create an invalid ciphertext error
    pub fn ciphertext(reason: impl Into<String>) -> Self {
        Self::InvalidCiphertext {
            reason: reason.into(),
        }
    }
}

/// Result type for codec operations
pub type ProtocolResult<T> = std::result::Result<T, ProtocolError>;
