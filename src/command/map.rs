//! Map commands
//!
//! - UpdateMap: DtUpdateReq → DtUpdateResp
//! - FetchMap: DtFetchReq → DtFetchResp

use std::time::Duration;

use prost::Message;

use super::location::{default_bucket_type, lossy, require, timeout_ms};
use super::map_op::{parse, populate, Map, MapOperation};
use super::{unexpected, Command, RetryState};
use crate::error::{Result, RiakError};
use crate::protocol::pb::{DtFetchReq, DtFetchResp, DtUpdateReq, DtUpdateResp};
use crate::protocol::MessageCode;

// =============================================================================
// UpdateMap
// =============================================================================

/// Applies a [`MapOperation`] to a map data type
///
/// The operation is flattened once, when the command is built; every attempt
/// sends the same request.
#[derive(Debug)]
pub struct UpdateMapCommand {
    state: RetryState,
    request: DtUpdateReq,
    response: Option<UpdateMapResponse>,
}

/// Result of an UpdateMap command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateMapResponse {
    pub generated_key: Option<String>,
    pub context: Vec<u8>,

    /// Map value after the update (empty unless `return_body` was set)
    pub map: Map,
}

impl UpdateMapCommand {
    pub fn builder() -> UpdateMapCommandBuilder {
        UpdateMapCommandBuilder::default()
    }

    pub fn response(&self) -> Option<&UpdateMapResponse> {
        self.response.as_ref()
    }
}

impl Command for UpdateMapCommand {
    fn name(&self) -> &'static str {
        "UpdateMap"
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
        self.response = Some(UpdateMapResponse {
            generated_key: resp.key.as_deref().map(lossy),
            context: resp.context.unwrap_or_default(),
            map: parse(resp.map_value),
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

/// Builder for UpdateMapCommand
#[derive(Debug, Default)]
pub struct UpdateMapCommandBuilder {
    request: DtUpdateReq,
    operation: Option<MapOperation>,
}

impl UpdateMapCommandBuilder {
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

    /// Causal context from a previous fetch; required for any removal
    pub fn context(mut self, context: impl Into<Vec<u8>>) -> Self {
        self.request.context = Some(context.into());
        self
    }

    pub fn map_operation(mut self, operation: MapOperation) -> Self {
        self.operation = Some(operation);
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

    pub fn build(mut self) -> Result<UpdateMapCommand> {
        require("UpdateMapCommandBuilder", "bucket", &self.request.bucket)?;
        default_bucket_type(&mut self.request.r#type);

        let operation = self.operation.ok_or_else(|| {
            RiakError::Config(
                "UpdateMapCommandBuilder requires a MapOperation, use map_operation()".to_string(),
            )
        })?;

        let has_context = self
            .request
            .context
            .as_ref()
            .is_some_and(|c| !c.is_empty());
        if operation.requires_context() && !has_context {
            return Err(RiakError::Config(
                "When doing any removes a context must be provided".to_string(),
            ));
        }

        self.request.op.map_op = Some(populate(operation));

        Ok(UpdateMapCommand {
            state: RetryState::new(),
            request: self.request,
            response: None,
        })
    }
}

// =============================================================================
// FetchMap
// =============================================================================

/// Fetches the value of a map data type
#[derive(Debug)]
pub struct FetchMapCommand {
    state: RetryState,
    request: DtFetchReq,
    response: Option<FetchMapResponse>,
}

/// Result of a FetchMap command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMapResponse {
    pub is_not_found: bool,
    pub context: Vec<u8>,

    /// `None` when not found
    pub map: Option<Map>,
}

impl FetchMapCommand {
    pub fn builder() -> FetchMapCommandBuilder {
        FetchMapCommandBuilder::default()
    }

    pub fn response(&self) -> Option<&FetchMapResponse> {
        self.response.as_ref()
    }
}

impl Command for FetchMapCommand {
    fn name(&self) -> &'static str {
        "FetchMap"
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

        // A value without map entries is an empty or missing map
        let map = resp
            .value
            .filter(|value| !value.map_value.is_empty())
            .map(|value| parse(value.map_value));

        self.response = Some(FetchMapResponse {
            is_not_found: map.is_none(),
            context: resp.context.unwrap_or_default(),
            map,
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

/// Builder for FetchMapCommand
#[derive(Debug, Default)]
pub struct FetchMapCommandBuilder {
    request: DtFetchReq,
}

impl FetchMapCommandBuilder {
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

    pub fn build(mut self) -> Result<FetchMapCommand> {
        require("FetchMapCommandBuilder", "bucket", &self.request.bucket)?;
        require("FetchMapCommandBuilder", "key", &self.request.key)?;
        default_bucket_type(&mut self.request.r#type);

        Ok(FetchMapCommand {
            state: RetryState::new(),
            request: self.request,
            response: None,
        })
    }
}
