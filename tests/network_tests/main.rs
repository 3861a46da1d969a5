mod dispatch_tests;
mod transport_tests;

use std::collections::VecDeque;
use std::io::{self, Cursor, Read, Write};

use riak_command::network::Transport;
use riak_command::{Result, RiakError};

/// Transport that replays scripted responses and records requests
#[derive(Default)]
pub struct ScriptedTransport {
    responses: VecDeque<Result<Vec<u8>>>,
    pub requests: Vec<Vec<u8>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, frame: Vec<u8>) -> Self {
        self.responses.push_back(Ok(frame));
        self
    }

    pub fn fail(mut self, kind: io::ErrorKind) -> Self {
        self.responses
            .push_back(Err(RiakError::Io(io::Error::new(kind, "scripted failure"))));
        self
    }
}

impl Transport for ScriptedTransport {
    fn round_trip(&mut self, request: &[u8]) -> Result<Vec<u8>> {
        self.requests.push(request.to_vec());
        self.responses
            .pop_front()
            .unwrap_or_else(|| Err(RiakError::Protocol("script exhausted".to_string())))
    }
}

/// In-memory stream: reads from a canned buffer, collects writes
pub struct MemoryStream {
    input: Cursor<Vec<u8>>,
    pub output: Vec<u8>,
}

impl MemoryStream {
    pub fn new(input: Vec<u8>) -> Self {
        Self {
            input: Cursor::new(input),
            output: Vec::new(),
        }
    }
}

impl Read for MemoryStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.input.read(buf)
    }
}

impl Write for MemoryStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.output.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
