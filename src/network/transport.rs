//! Transport seam
//!
//! The command core never opens sockets. A [`Transport`] moves one request
//! frame to an endpoint and returns the response frame; connection pooling,
//! TLS and timeouts belong to the implementation.

use std::io::{Read, Write};

use crate::config::DEFAULT_MAX_FRAME_SIZE;
use crate::error::Result;
use crate::protocol::{read_frame, split_frame};

/// Moves a request frame to the server and returns its response frame
pub trait Transport {
    /// Send `request` (a complete frame) and block for the response frame
    fn round_trip(&mut self, request: &[u8]) -> Result<Vec<u8>>;
}

/// Transport over any blocking byte stream
///
/// Writes the request frame as-is and reads back exactly one frame.
pub struct FramedStream<S> {
    stream: S,
    max_frame_size: u32,
}

impl<S: Read + Write> FramedStream<S> {
    pub fn new(stream: S) -> Self {
        Self::with_max_frame_size(stream, DEFAULT_MAX_FRAME_SIZE)
    }

    /// Reject response frames longer than `max_frame_size`
    pub fn with_max_frame_size(stream: S, max_frame_size: u32) -> Self {
        Self {
            stream,
            max_frame_size,
        }
    }

    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    pub fn into_inner(self) -> S {
        self.stream
    }
}

impl<S: Read + Write> Transport for FramedStream<S> {
    fn round_trip(&mut self, request: &[u8]) -> Result<Vec<u8>> {
        // Refuse to put a malformed frame on the wire
        let (code, _) = split_frame(request)?;
        tracing::trace!(code, len = request.len(), "sending frame");

        self.stream.write_all(request)?;
        self.stream.flush()?;

        let response = read_frame(&mut self.stream, self.max_frame_size)?;
        tracing::trace!(len = response.len(), "received frame");
        Ok(response)
    }
}
