//! Command Module
//!
//! The contract every operation implements, plus the concrete operations.
//!
//! ## Lifecycle
//! 1. A builder validates configuration and produces a command
//! 2. The command is enqueued and later dequeued by a dispatcher
//! 3. Per attempt: [`build_request_frame`] → transport → [`handle_response_frame`]
//! 4. On failure the dispatcher calls [`Command::on_failure`]
//!
//! Every command embeds a [`RetryState`]; the trait's provided methods
//! route outcome tracking through it.

use std::fmt;

use bytes::Bytes;

use crate::error::{Result, RiakError};
use crate::protocol::{decode_frame, encode_frame, MessageCode};

mod counter;
mod location;
mod map;
mod map_op;
mod retry;
mod search;
mod set;
mod yokozuna;

pub use counter::{
    FetchCounterCommand, FetchCounterCommandBuilder, FetchCounterResponse, UpdateCounterCommand,
    UpdateCounterCommandBuilder, UpdateCounterResponse,
};
pub use map::{
    FetchMapCommand, FetchMapCommandBuilder, FetchMapResponse, UpdateMapCommand,
    UpdateMapCommandBuilder, UpdateMapResponse,
};
pub use map_op::{parse, populate, Map, MapOperation};
pub use retry::RetryState;
pub use search::{SearchCommand, SearchCommandBuilder, SearchDoc, SearchResponse};
pub use set::{
    FetchSetCommand, FetchSetCommandBuilder, FetchSetResponse, UpdateSetCommand,
    UpdateSetCommandBuilder, UpdateSetResponse,
};
pub use yokozuna::{
    DeleteIndexCommand, DeleteIndexCommandBuilder, FetchIndexCommand, FetchIndexCommandBuilder,
    FetchSchemaCommand, FetchSchemaCommandBuilder, Schema, SearchIndex, StoreIndexCommand,
    StoreIndexCommandBuilder, StoreSchemaCommand, StoreSchemaCommandBuilder,
};

/// Owned handle to any command, as carried through the queue
pub type CommandHandle = Box<dyn Command>;

/// Capability set shared by every operation
pub trait Command: Send + fmt::Debug {
    /// Stable identifier for logging
    fn name(&self) -> &'static str;

    fn request_code(&self) -> MessageCode;

    fn response_code(&self) -> MessageCode;

    /// Serialize the request payload
    fn request_payload(&self) -> Result<Vec<u8>>;

    /// Interpret a (possibly empty) response payload and mark success
    fn interpret_response(&mut self, payload: &[u8]) -> Result<()>;

    fn retry_state(&self) -> &RetryState;

    fn retry_state_mut(&mut self) -> &mut RetryState;

    /// Record a failed attempt; see [`RetryState::record_failure`]
    fn on_failure(&mut self, err: RiakError) {
        tracing::debug!(command = self.name(), error = %err, "command attempt failed");
        self.retry_state_mut().record_failure(err);
    }

    fn successful(&self) -> bool {
        self.retry_state().successful()
    }

    /// Terminal error once the attempt budget is exhausted
    fn error(&self) -> Option<&RiakError> {
        self.retry_state().error()
    }
}

/// Build the framed request for one attempt
///
/// Panics if the command declares the zero code.
pub fn build_request_frame(cmd: &dyn Command) -> Result<Bytes> {
    let code = cmd.request_code().as_u8();
    assert!(
        code != 0,
        "must have non-zero request code: {}",
        cmd.name()
    );

    let payload = cmd.request_payload()?;
    Ok(encode_frame(code, &payload))
}

/// Validate a response frame and let the command interpret its payload
///
/// Panics if the command declares the zero code.
pub fn handle_response_frame(cmd: &mut dyn Command, frame: &[u8]) -> Result<()> {
    let code = cmd.response_code().as_u8();
    assert!(
        code != 0,
        "must have non-zero response code: {}",
        cmd.name()
    );

    let payload = decode_frame(frame, code)?;
    cmd.interpret_response(&payload)
}

/// Map a payload decode failure onto the command's type-mismatch error
fn unexpected(command: &'static str, err: prost::DecodeError) -> RiakError {
    RiakError::UnexpectedResponse {
        command,
        reason: err.to_string(),
    }
}
