//! Search index and schema administration
//!
//! - StoreIndex: RpbYokozunaIndexPutReq → RpbPutResp
//! - FetchIndex: RpbYokozunaIndexGetReq → RpbYokozunaIndexGetResp
//! - DeleteIndex: RpbYokozunaIndexDeleteReq → RpbDelResp
//! - StoreSchema: RpbYokozunaSchemaPutReq → RpbPutResp
//! - FetchSchema: RpbYokozunaSchemaGetReq → RpbYokozunaSchemaGetResp
//!
//! Store and delete responses carry no payload; the code alone acknowledges.

use std::time::Duration;

use prost::Message;

use super::location::{lossy, require, timeout_ms};
use super::{unexpected, Command, RetryState};
use crate::error::Result;
use crate::protocol::pb::{
    RpbYokozunaIndex, RpbYokozunaIndexDeleteReq, RpbYokozunaIndexGetReq, RpbYokozunaIndexGetResp,
    RpbYokozunaIndexPutReq, RpbYokozunaSchema, RpbYokozunaSchemaGetReq, RpbYokozunaSchemaGetResp,
    RpbYokozunaSchemaPutReq,
};
use crate::protocol::MessageCode;

/// A search index definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchIndex {
    pub name: String,
    pub schema: String,
    pub n_val: u32,
}

/// A search schema definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub name: String,
    pub content: String,
}

// =============================================================================
// StoreIndex
// =============================================================================

#[derive(Debug)]
pub struct StoreIndexCommand {
    state: RetryState,
    request: RpbYokozunaIndexPutReq,
}

impl StoreIndexCommand {
    pub fn builder() -> StoreIndexCommandBuilder {
        StoreIndexCommandBuilder::default()
    }
}

impl Command for StoreIndexCommand {
    fn name(&self) -> &'static str {
        "StoreIndex"
    }

    fn request_code(&self) -> MessageCode {
        MessageCode::YokozunaIndexPutReq
    }

    fn response_code(&self) -> MessageCode {
        MessageCode::PutResp
    }

    fn request_payload(&self) -> Result<Vec<u8>> {
        Ok(self.request.encode_to_vec())
    }

    fn interpret_response(&mut self, _payload: &[u8]) -> Result<()> {
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

#[derive(Debug, Default)]
pub struct StoreIndexCommandBuilder {
    request: RpbYokozunaIndexPutReq,
}

impl StoreIndexCommandBuilder {
    pub fn index_name(mut self, name: impl Into<Vec<u8>>) -> Self {
        self.request.index.name = name.into();
        self
    }

    /// Schema to index with; the server default if omitted
    pub fn schema_name(mut self, name: impl Into<Vec<u8>>) -> Self {
        self.request.index.schema = Some(name.into());
        self
    }

    pub fn n_val(mut self, n_val: u32) -> Self {
        self.request.index.n_val = Some(n_val);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.request.timeout = Some(timeout_ms(timeout));
        self
    }

    pub fn build(self) -> Result<StoreIndexCommand> {
        require("StoreIndexCommandBuilder", "index name", &self.request.index.name)?;
        Ok(StoreIndexCommand {
            state: RetryState::new(),
            request: self.request,
        })
    }
}

// =============================================================================
// FetchIndex
// =============================================================================

#[derive(Debug)]
pub struct FetchIndexCommand {
    state: RetryState,
    request: RpbYokozunaIndexGetReq,
    response: Option<Vec<SearchIndex>>,
}

impl FetchIndexCommand {
    pub fn builder() -> FetchIndexCommandBuilder {
        FetchIndexCommandBuilder::default()
    }

    pub fn response(&self) -> Option<&[SearchIndex]> {
        self.response.as_deref()
    }
}

impl Command for FetchIndexCommand {
    fn name(&self) -> &'static str {
        "FetchIndex"
    }

    fn request_code(&self) -> MessageCode {
        MessageCode::YokozunaIndexGetReq
    }

    fn response_code(&self) -> MessageCode {
        MessageCode::YokozunaIndexGetResp
    }

    fn request_payload(&self) -> Result<Vec<u8>> {
        Ok(self.request.encode_to_vec())
    }

    fn interpret_response(&mut self, payload: &[u8]) -> Result<()> {
        let resp =
            RpbYokozunaIndexGetResp::decode(payload).map_err(|e| unexpected(self.name(), e))?;
        self.response = Some(resp.index.into_iter().map(search_index).collect());
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

fn search_index(index: RpbYokozunaIndex) -> SearchIndex {
    SearchIndex {
        name: lossy(&index.name),
        schema: index.schema.as_deref().map(lossy).unwrap_or_default(),
        n_val: index.n_val.unwrap_or_default(),
    }
}

#[derive(Debug, Default)]
pub struct FetchIndexCommandBuilder {
    request: RpbYokozunaIndexGetReq,
}

impl FetchIndexCommandBuilder {
    /// Index to fetch; all indexes are listed if omitted
    pub fn index_name(mut self, name: impl Into<Vec<u8>>) -> Self {
        self.request.name = Some(name.into());
        self
    }

    pub fn build(self) -> Result<FetchIndexCommand> {
        Ok(FetchIndexCommand {
            state: RetryState::new(),
            request: self.request,
            response: None,
        })
    }
}

// =============================================================================
// DeleteIndex
// =============================================================================

#[derive(Debug)]
pub struct DeleteIndexCommand {
    state: RetryState,
    request: RpbYokozunaIndexDeleteReq,
}

impl DeleteIndexCommand {
    pub fn builder() -> DeleteIndexCommandBuilder {
        DeleteIndexCommandBuilder::default()
    }
}

impl Command for DeleteIndexCommand {
    fn name(&self) -> &'static str {
        "DeleteIndex"
    }

    fn request_code(&self) -> MessageCode {
        MessageCode::YokozunaIndexDeleteReq
    }

    fn response_code(&self) -> MessageCode {
        MessageCode::DelResp
    }

    fn request_payload(&self) -> Result<Vec<u8>> {
        Ok(self.request.encode_to_vec())
    }

    fn interpret_response(&mut self, _payload: &[u8]) -> Result<()> {
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

#[derive(Debug, Default)]
pub struct DeleteIndexCommandBuilder {
    request: RpbYokozunaIndexDeleteReq,
}

impl DeleteIndexCommandBuilder {
    pub fn index_name(mut self, name: impl Into<Vec<u8>>) -> Self {
        self.request.name = name.into();
        self
    }

    pub fn build(self) -> Result<DeleteIndexCommand> {
        require("DeleteIndexCommandBuilder", "index name", &self.request.name)?;
        Ok(DeleteIndexCommand {
            state: RetryState::new(),
            request: self.request,
        })
    }
}

// =============================================================================
// StoreSchema
// =============================================================================

#[derive(Debug)]
pub struct StoreSchemaCommand {
    state: RetryState,
    request: RpbYokozunaSchemaPutReq,
}

impl StoreSchemaCommand {
    pub fn builder() -> StoreSchemaCommandBuilder {
        StoreSchemaCommandBuilder::default()
    }
}

impl Command for StoreSchemaCommand {
    fn name(&self) -> &'static str {
        "StoreSchema"
    }

    fn request_code(&self) -> MessageCode {
        MessageCode::YokozunaSchemaPutReq
    }

    fn response_code(&self) -> MessageCode {
        MessageCode::PutResp
    }

    fn request_payload(&self) -> Result<Vec<u8>> {
        Ok(self.request.encode_to_vec())
    }

    fn interpret_response(&mut self, _payload: &[u8]) -> Result<()> {
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

#[derive(Debug, Default)]
pub struct StoreSchemaCommandBuilder {
    request: RpbYokozunaSchemaPutReq,
}

impl StoreSchemaCommandBuilder {
    pub fn schema_name(mut self, name: impl Into<Vec<u8>>) -> Self {
        self.request.schema.name = name.into();
        self
    }

    /// Schema XML
    pub fn content(mut self, content: impl Into<Vec<u8>>) -> Self {
        self.request.schema.content = Some(content.into());
        self
    }

    pub fn build(self) -> Result<StoreSchemaCommand> {
        require("StoreSchemaCommandBuilder", "schema name", &self.request.schema.name)?;
        Ok(StoreSchemaCommand {
            state: RetryState::new(),
            request: self.request,
        })
    }
}

// =============================================================================
// FetchSchema
// =============================================================================

#[derive(Debug)]
pub struct FetchSchemaCommand {
    state: RetryState,
    request: RpbYokozunaSchemaGetReq,
    response: Option<Schema>,
}

impl FetchSchemaCommand {
    pub fn builder() -> FetchSchemaCommandBuilder {
        FetchSchemaCommandBuilder::default()
    }

    pub fn response(&self) -> Option<&Schema> {
        self.response.as_ref()
    }
}

impl Command for FetchSchemaCommand {
    fn name(&self) -> &'static str {
        "FetchSchema"
    }

    fn request_code(&self) -> MessageCode {
        MessageCode::YokozunaSchemaGetReq
    }

    fn response_code(&self) -> MessageCode {
        MessageCode::YokozunaSchemaGetResp
    }

    fn request_payload(&self) -> Result<Vec<u8>> {
        Ok(self.request.encode_to_vec())
    }

    fn interpret_response(&mut self, payload: &[u8]) -> Result<()> {
        let resp =
            RpbYokozunaSchemaGetResp::decode(payload).map_err(|e| unexpected(self.name(), e))?;
        let RpbYokozunaSchema { name, content } = resp.schema;
        // An empty payload decodes to a nameless schema: nothing was returned
        self.response = (!name.is_empty()).then(|| Schema {
            name: lossy(&name),
            content: content.as_deref().map(lossy).unwrap_or_default(),
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

#[derive(Debug, Default)]
pub struct FetchSchemaCommandBuilder {
    request: RpbYokozunaSchemaGetReq,
}

impl FetchSchemaCommandBuilder {
    pub fn schema_name(mut self, name: impl Into<Vec<u8>>) -> Self {
        self.request.name = name.into();
        self
    }

    pub fn build(self) -> Result<FetchSchemaCommand> {
        require("FetchSchemaCommandBuilder", "schema name", &self.request.name)?;
        Ok(FetchSchemaCommand {
            state: RetryState::new(),
            request: self.request,
            response: None,
        })
    }
}
