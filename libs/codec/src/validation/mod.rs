//! # Frame Validation
//!
//! Checksum computation plus a self-check that a produced frame agrees with
//! its own length and checksum fields.

pub mod checksum;
pub mod frame;

pub use checksum::{calculate_crc16, verify_line_checksum, Checksum};
pub use frame::validate_frame;
