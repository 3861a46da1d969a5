//! Frame codec
//!
//! Encoding and decoding functions for the wire frame.
//!
//! ## Wire Format
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │ Len (4)  │ Code (1) │     Payload (Len - 1)       │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! The length prefix is big-endian and counts the code byte, so the smallest
//! legal value is 1 (a code with no payload).

use std::io::{Read, Write};

use bytes::{BufMut, Bytes, BytesMut};
use prost::Message;

use super::pb::RpbErrorResp;
use super::MessageCode;
use crate::error::{Result, RiakError};

/// Size of the big-endian length prefix
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Length prefix + message code
pub const HEADER_SIZE: usize = LENGTH_PREFIX_SIZE + 1;

// =============================================================================
// Frame Encoding/Decoding
// =============================================================================

/// Encode a message code and payload into a frame
///
/// Panics if `code` is zero: a command that reaches the codec without a real
/// message code is a broken implementation, not a runtime condition. Also
/// panics if the payload does not fit a 32-bit length prefix.
pub fn encode_frame(code: u8, payload: &[u8]) -> Bytes {
    assert!(code != 0, "frame must carry a non-zero message code");

    let mut frame = BytesMut::with_capacity(HEADER_SIZE + payload.len());
    frame.put_u32(frame_length(payload.len()));
    frame.put_u8(code);
    frame.put_slice(payload);

    tracing::trace!(code, payload_len = payload.len(), "encoded frame");
    frame.freeze()
}

/// Length prefix for a payload: the payload plus the code byte
fn frame_length(payload_len: usize) -> u32 {
    let Ok(length) = u32::try_from(payload_len as u64 + 1) else {
        panic!("frame payload too large: {} bytes", payload_len);
    };
    length
}

/// Decode a frame, checking its code against `expected`
///
/// Returns the payload, which is empty when the frame carries only a code.
/// A server error frame is surfaced as [`RiakError::Server`].
pub fn decode_frame(frame: &[u8], expected: u8) -> Result<Bytes> {
    assert!(expected != 0, "expected message code must be non-zero");

    let (code, payload) = split_frame(frame)?;
    tracing::trace!(code, expected, payload_len = payload.len(), "decoded frame");

    if code == MessageCode::ErrorResp.as_u8() {
        return Err(decode_error_response(payload));
    }
    if code != expected {
        return Err(RiakError::OpcodeMismatch {
            expected,
            actual: code,
        });
    }

    Ok(Bytes::copy_from_slice(payload))
}

/// Split a complete frame into its code and payload
///
/// Validates the length prefix against the number of bytes present.
pub fn split_frame(frame: &[u8]) -> Result<(u8, &[u8])> {
    if frame.len() < LENGTH_PREFIX_SIZE {
        return Err(RiakError::Protocol(format!(
            "Incomplete header: expected {} bytes, got {}",
            LENGTH_PREFIX_SIZE,
            frame.len()
        )));
    }

    let length = u32::from_be_bytes([frame[0], frame[1], frame[2], frame[3]]) as usize;
    if length == 0 {
        return Err(RiakError::Protocol(
            "Zero-length frame has no message code".to_string(),
        ));
    }

    let body = &frame[LENGTH_PREFIX_SIZE..];
    if body.len() != length {
        return Err(RiakError::Protocol(format!(
            "Frame length mismatch: prefix says {} bytes, got {}",
            length,
            body.len()
        )));
    }

    Ok((body[0], &body[1..]))
}

fn decode_error_response(payload: &[u8]) -> RiakError {
    match RpbErrorResp::decode(payload) {
        Ok(resp) => RiakError::Server {
            code: resp.errcode,
            message: String::from_utf8_lossy(&resp.errmsg).into_owned(),
        },
        Err(e) => RiakError::Protocol(format!("Undecodable error response: {}", e)),
    }
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Read one complete frame from a stream
///
/// Blocks until the whole frame is received. The returned bytes include the
/// length prefix and can be passed straight to [`decode_frame`].
pub fn read_frame<R: Read>(reader: &mut R, max_frame_size: u32) -> Result<Vec<u8>> {
    let mut prefix = [0u8; LENGTH_PREFIX_SIZE];
    reader.read_exact(&mut prefix)?;

    let length = u32::from_be_bytes(prefix);
    if length == 0 {
        return Err(RiakError::Protocol(
            "Zero-length frame has no message code".to_string(),
        ));
    }
    if length > max_frame_size {
        return Err(RiakError::Protocol(format!(
            "Frame too large: {} bytes (max {})",
            length, max_frame_size
        )));
    }

    let mut frame = vec![0u8; LENGTH_PREFIX_SIZE + length as usize];
    frame[..LENGTH_PREFIX_SIZE].copy_from_slice(&prefix);
    reader.read_exact(&mut frame[LENGTH_PREFIX_SIZE..])?;

    Ok(frame)
}

/// Write a frame to a stream
pub fn write_frame<W: Write>(writer: &mut W, code: u8, payload: &[u8]) -> Result<()> {
    let frame = encode_frame(code, payload);
    writer.write_all(&frame)?;
    writer.flush()?;
    Ok(())
}
