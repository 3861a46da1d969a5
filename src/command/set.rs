//! Set commands
//!
//! - UpdateSet: DtUpdateReq → DtUpdateResp
//! - FetchSet: DtFetchReq → DtFetchResp

use std::time::Duration;

use prost::Message;

use super::location::{default_bucket_type, lossy, require, timeout_ms};
use super::{unexpected, Command, RetryState};
use crate::error::Result;
use crate::protocol::pb::{DtFetchReq, DtFetchResp, DtUpdateReq, DtUpdateResp, SetOp};
use crate::protocol::MessageCode;

// =============================================================================
// UpdateSet
// =============================================================================

/// Adds elements to and removes elements from a set data type
#[derive(Debug)]
pub struct UpdateSetCommand {
    state: RetryState,
    request: DtUpdateReq,
    response: Option<UpdateSetResponse>,
}

/// Result of an UpdateSet command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateSetResponse {
    pub generated_key: Option<String>,
    pub context: Vec<u8>,
    pub set_value: Vec<Vec<u8>>,
}

impl UpdateSetCommand {
    pub fn builder() -> UpdateSetCommandBuilder {
        UpdateSetCommandBuilder::default()
    }

    pub fn response(&self) -> Option<&UpdateSetResponse> {
        self.response.as_ref()
    }
}

impl Command for UpdateSetCommand {
    fn name(&self) -> &'static str {
        "UpdateSet"
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
        self.response = Some(UpdateSetResponse {
            generated_key: resp.key.as_deref().map(lossy),
            context: resp.context.unwrap_or_default(),
            set_value: resp.set_value,
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

/// Builder for UpdateSetCommand
#[derive(Debug, Default)]
pub struct UpdateSetCommandBuilder {
    request: DtUpdateReq,
    set_op: SetOp,
}

impl UpdateSetCommandBuilder {
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

    /// Causal context from a previous fetch
    pub fn context(mut self, context: impl Into<Vec<u8>>) -> Self {
        self.request.context = Some(context.into());
        self
    }

    pub fn additions<I, V>(mut self, adds: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Vec<u8>>,
    {
        self.set_op.adds.extend(adds.into_iter().map(Into::into));
        self
    }

    pub fn removals<I, V>(mut self, removes: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Vec<u8>>,
    {
        self.set_op.removes.extend(removes.into_iter().map(Into::into));
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

    pub fn build(mut self) -> Result<UpdateSetCommand> {
        require("UpdateSetCommandBuilder", "bucket", &self.request.bucket)?;
        default_bucket_type(&mut self.request.r#type);
        self.request.op.set_op = Some(self.set_op);

        Ok(UpdateSetCommand {
            state: RetryState::new(),
            request: self.request,
            response: None,
        })
    }
}

// =============================================================================
// FetchSet
// =============================================================================

/// Fetches the members of a set data type
#[derive(Debug)]
pub struct FetchSetCommand {
    state: RetryState,
    request: DtFetchReq,
    response: Option<FetchSetResponse>,
}

/// Result of a FetchSet command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSetResponse {
    pub is_not_found: bool,
    pub context: Vec<u8>,
    pub set_value: Vec<Vec<u8>>,
}

impl FetchSetCommand {
    pub fn builder() -> FetchSetCommandBuilder {
        FetchSetCommandBuilder::default()
    }

    pub fn response(&self) -> Option<&FetchSetResponse> {
        self.response.as_ref()
    }
}

impl Command for FetchSetCommand {
    fn name(&self) -> &'static str {
        "FetchSet"
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
        let context = resp.context.unwrap_or_default();
        self.response = Some(match resp.value {
            Some(value) => FetchSetResponse {
                is_not_found: false,
                context,
                set_value: value.set_value,
            },
            None => FetchSetResponse {
                is_not_found: true,
                context,
                set_value: Vec::new(),
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

/// Builder for FetchSetCommand
#[derive(Debug, Default)]
pub struct FetchSetCommandBuilder {
    request: DtFetchReq,
}

impl FetchSetCommandBuilder {
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

    pub fn build(mut self) -> Result<FetchSetCommand> {
        require("FetchSetCommandBuilder", "bucket", &self.request.bucket)?;
        require("FetchSetCommandBuilder", "key", &self.request.key)?;
        default_bucket_type(&mut self.request.r#type);

        Ok(FetchSetCommand {
            state: RetryState::new(),
            request: self.request,
            response: None,
        })
    }
}
