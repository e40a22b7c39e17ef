//! Frame self-check
//!
//! Splits a wire message back into its parts and verifies the declared
//! length and checksum against the envelope line. Only for frames this crate
//! produces; receiver responses are never parsed.

use crate::builder::{Frame, LengthField};
use crate::error::{ProtocolError, ProtocolResult};
use crate::validation::checksum::{calculate_crc16, Checksum};

const HEADER_LEN: usize = 8;

fn parse_hex_field(field: Option<&str>, name: &str) -> ProtocolResult<u16> {
    let field = field.ok_or_else(|| ProtocolError::malformed(format!("missing {name} field")))?;
    u16::from_str_radix(field, 16)
        .map_err(|_| ProtocolError::malformed(format!("{name} field {field:?} is not hex")))
}

/// Parse a frame and verify its integrity fields
pub fn validate_frame(wire: &str) -> ProtocolResult<Frame> {
    let inner = wire
        .strip_prefix('\n')
        .and_then(|rest| rest.strip_suffix('\r'))
        .ok_or_else(|| ProtocolError::malformed("frame must be delimited by LF ... CR"))?;
    if inner.len() < HEADER_LEN {
        return Err(ProtocolError::malformed(format!(
            "frame body of {} bytes is shorter than the checksum and length header",
            inner.len()
        )));
    }

    let declared_crc = parse_hex_field(inner.get(..4), "checksum")?;
    let declared_len = parse_hex_field(inner.get(4..HEADER_LEN), "length")? as usize;
    let line = inner
        .get(HEADER_LEN..)
        .ok_or_else(|| ProtocolError::malformed("envelope line is not valid text"))?;

    let actual_len = line.chars().count();
    if declared_len != actual_len {
        return Err(ProtocolError::LengthMismatch {
            declared: declared_len,
            actual: actual_len,
        });
    }

    let calculated = calculate_crc16(line.as_bytes());
    if declared_crc != calculated {
        return Err(ProtocolError::ChecksumMismatch {
            expected: declared_crc,
            calculated,
        });
    }

    Ok(Frame::from_parts(
        Checksum::from_value(declared_crc),
        LengthField::from_value(declared_len),
        line.to_string(),
    ))
}
