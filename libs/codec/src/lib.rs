//! # SIA DC-09 Codec
//!
//! ## Purpose
//!
//! Message construction rules for the alarm-panel transmitter:
//! - Event timestamp tokens
//! - Content templates and AES-128-CBC content encryption
//! - CRC-16 checksums, normal or deliberately corrupted
//! - Envelope lines and `\n<crc><len><line>\r` framing
//! - Self-check of produced frames
//!
//! ## Architecture Role
//!
//! ```text
//! timestamp ─┐
//! constants ─┼→ content → builder → Frame → network/
//! cipher ────┘               ↑
//!                     validation::checksum
//! ```
//!
//! ## What This Crate Does NOT Contain
//! - Network transport logic (belongs in network/)
//! - Test case selection or pacing (belongs in the transmitter service)
//! - Parsing of receiver responses

pub mod builder;
pub mod cipher;
pub mod constants;
pub mod content;
pub mod error;
pub mod timestamp;
pub mod validation;

pub use builder::{
    create_test_line, envelope_line, frame, Frame, LengthField, SequenceNumber, SiaMessageBuilder,
};
pub use cipher::{decrypt_content, encrypt_content, pad_plaintext, CipherKey};
pub use constants::{
    zone_for, EventCode, INVALID_ACCOUNT, INVALID_EVENT_CODE, MAX_ACCOUNT_LEN, RESTORE_CODE,
};
pub use content::{build_content, render_template, Content};
pub use error::{ProtocolError, ProtocolResult};
pub use timestamp::timestamp_token;
pub use validation::{calculate_crc16, validate_frame, Checksum};
