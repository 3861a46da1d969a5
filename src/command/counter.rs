//! Counter commands
//!
//! - UpdateCounter: DtUpdateReq → DtUpdateResp
//! - FetchCounter: DtFetchReq → DtFetchResp

use std::time::Duration;

use prost::Message;

use super::location::{default_bucket_type, lossy, require, timeout_ms};
use super::{unexpected, Command, RetryState};
use crate::error::Result;
use crate::protocol::pb::{CounterOp, DtFetchReq, DtFetchResp, DtUpdateReq, DtUpdateResp};
use crate::protocol::MessageCode;

// =============================================================================
// UpdateCounter
// =============================================================================

/// Increments or decrements a counter data type
#[derive(Debug)]
pub struct UpdateCounterCommand {
    state: RetryState,
    request: DtUpdateReq,
    response: Option<UpdateCounterResponse>,
}

/// Result of an UpdateCounter command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCounterResponse {
    /// Set when the server generated the key
    pub generated_key: Option<String>,

    /// Counter value after the update (requires `return_body`)
    pub counter_value: i64,
}

impl UpdateCounterCommand {
    pub fn builder() -> UpdateCounterCommandBuilder {
        UpdateCounterCommandBuilder::default()
    }

    pub fn response(&self) -> Option<&UpdateCounterResponse> {
        self.response.as_ref()
    }
}

impl Command for UpdateCounterCommand {
    fn name(&self) -> &'static str {
        "UpdateCounter"
    }

    fn request_code(&self) -> MessageCode {
        MessageCode::DtUpdateReq
    }

    fn response_code(&self) -> MessageCode {
        MessageCode::DtUpdateResp
    }

    fn request_payload(&self) -> Result<Vec<u8>> {
        Ok(self.request.encode_to_vec())
    }

    fn interpret_response(&mut self, payload: &[u8]) -> Result<()> {
        let resp = DtUpdateResp::decode(payload).map_err(|e| unexpected(self.name(), e))?;
        self.response = Some(UpdateCounterResponse {
            generated_key: resp.key.as_deref().map(lossy),
            counter_value: resp.counter_value.unwrap_or_default(),
        });
        self.state.record_success();
        Ok(())
    }

    fn retry_state(&self) -> &RetryState {
        &self.state
    }

    fn retry_state_mut(&mut self) -> &mut RetryState {
        &mut self.state
    }
}

/// Builder for UpdateCounterCommand
#[derive(Debug, Default)]
pub struct UpdateCounterCommandBuilder {
    request: DtUpdateReq,
}

impl UpdateCounterCommandBuilder {
    /// Bucket type; `"default"` if omitted
    pub fn bucket_type(mut self, bucket_type: impl Into<Vec<u8>>) -> Self {
        self.request.r#type = bucket_type.into();
        self
    }

    pub fn bucket(mut self, bucket: impl Into<Vec<u8>>) -> Self {
        self.request.bucket = bucket.into();
        self
    }

    /// Key to update; omit to have the server generate one
    pub fn key(mut self, key: impl Into<Vec<u8>>) -> Self {
        self.request.key = Some(key.into());
        self
    }

    /// Amount to add (negative to decrement)
    pub fn increment(mut self, increment: i64) -> Self {
        self.request.op.counter_op = Some(CounterOp {
            increment: Some(increment),
        });
        self
    }

    pub fn w(mut self, w: u32) -> Self {
        self.request.w = Some(w);
        self
    }

    pub fn pw(mut self, pw: u32) -> Self {
        self.request.pw = Some(pw);
        self
    }

    pub fn dw(mut self, dw: u32) -> Self {
        self.request.dw = Some(dw);
        self
    }

    pub fn return_body(mut self, return_body: bool) -> Self {
        self.request.return_body = Some(return_body);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.request.timeout = Some(timeout_ms(timeout));
        self
    }

    pub fn build(mut self) -> Result<UpdateCounterCommand> {
        require("UpdateCounterCommandBuilder", "bucket", &self.request.bucket)?;
        default_bucket_type(&mut self.request.r#type);
        self.request.op.counter_op.get_or_insert_with(CounterOp::default);

        Ok(UpdateCounterCommand {
            state: RetryState::new(),
            request: self.request,
            response: None,
        })
    }
}

// =============================================================================
// FetchCounter
// =============================================================================

/// Fetches the value of a counter data type
#[derive(Debug)]
pub struct FetchCounterCommand {
    state: RetryState,
    request: DtFetchReq,
    response: Option<FetchCounterResponse>,
}

/// Result of a FetchCounter command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchCounterResponse {
    pub is_not_found: bool,
    pub counter_value: i64,
}

impl FetchCounterCommand {
    pub fn builder() -> FetchCounterCommandBuilder {
        FetchCounterCommandBuilder::default()
    }

    pub fn response(&self) -> Option<&FetchCounterResponse> {
        self.response.as_ref()
    }
}

impl Command for FetchCounterCommand {
    fn name(&self) -> &'static str {
        "FetchCounter"
    }

    fn request_code(&self) -> MessageCode {
        MessageCode::DtFetchReq
    }

    fn response_code(&self) -> MessageCode {
        MessageCode::DtFetchResp
    }

    fn request_payload(&self) -> Result<Vec<u8>> {
        Ok(self.request.encode_to_vec())
    }

    fn interpret_response(&mut self, payload: &[u8]) -> Result<()> {
        let resp = DtFetchResp::decode(payload).map_err(|e| unexpected(self.name(), e))?;
        self.response = Some(match resp.value {
            Some(value) => FetchCounterResponse {
                is_not_found: false,
                counter_value: value.counter_value.unwrap_or_default(),
            },
            None => FetchCounterResponse {
                is_not_found: true,
                counter_value: 0,
            },
        });
        self.state.record_success();
        Ok(())
    }

    fn retry_state(&self) -> &RetryState {
        &self.state
    }

    fn retry_state_mut(&mut self) -> &mut RetryState {
        &mut self.state
    }
}

/// Builder for FetchCounterCommand
#[derive(Debug, Default)]
pub struct FetchCounterCommandBuilder {
    request: DtFetchReq,
}

impl FetchCounterCommandBuilder {
    /// Bucket type; `"default"` if omitted
    pub fn bucket_type(mut self, bucket_type: impl Into<Vec<u8>>) -> Self {
        self.request.r#type = bucket_type.into();
        self
    }

    pub fn bucket(mut self, bucket: impl Into<Vec<u8>>) -> Self {
        self.request.bucket = bucket.into();
        self
    }

    pub fn key(mut self, key: impl Into<Vec<u8>>) -> Self {
        self.request.key = key.into();
        self
    }

    pub fn r(mut self, r: u32) -> Self {
        self.request.r = Some(r);
        self
    }

    pub fn pr(mut self, pr: u32) -> Self {
        self.request.pr = Some(pr);
        self
    }

    pub fn notfound_ok(mut self, notfound_ok: bool) -> Self {
        self.request.notfound_ok = Some(notfound_ok);
        self
    }

    pub fn basic_quorum(mut self, basic_quorum: bool) -> Self {
        self.request.basic_quorum = Some(basic_quorum);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.request.timeout = Some(timeout_ms(timeout));
        self
    }

    pub fn build(mut self) -> Result<FetchCounterCommand> {
        require("FetchCounterCommandBuilder", "bucket", &self.request.bucket)?;
        require("FetchCounterCommandBuilder", "key", &self.request.key)?;
        default_bucket_type(&mut self.request.r#type);

        Ok(FetchCounterCommand {
            state: RetryState::new(),
            request: self.request,
            response: None,
        })
    }
}
