//! Search query
//!
//! - Search: RpbSearchQueryReq → RpbSearchQueryResp

use std::collections::HashMap;

use prost::Message;

use super::location::{lossy, require};
use super::{unexpected, Command, RetryState};
use crate::error::Result;
use crate::protocol::pb::{RpbSearchDoc, RpbSearchQueryReq, RpbSearchQueryResp};
use crate::protocol::MessageCode;

const BUCKET_TYPE_FIELD: &str = "_yz_rt";
const BUCKET_FIELD: &str = "_yz_rb";
const KEY_FIELD: &str = "_yz_rk";
const ID_FIELD: &str = "_yz_id";
const SCORE_FIELD: &str = "score";

/// One matching document
///
/// Well-known index fields are lifted out; every field, including those,
/// remains in `fields`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchDoc {
    pub bucket_type: String,
    pub bucket: String,
    pub key: String,
    pub id: String,
    pub score: String,
    pub fields: HashMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResponse {
    pub docs: Vec<SearchDoc>,
    pub max_score: f32,
    pub num_found: u32,
}

#[derive(Debug)]
pub struct SearchCommand {
    state: RetryState,
    request: RpbSearchQueryReq,
    response: Option<SearchResponse>,
}

impl SearchCommand {
    pub fn builder() -> SearchCommandBuilder {
        SearchCommandBuilder::default()
    }

    pub fn response(&self) -> Option<&SearchResponse> {
        self.response.as_ref()
    }
}

impl Command for SearchCommand {
    fn name(&self) -> &'static str {
        "Search"
    }

    fn request_code(&self) -> MessageCode {
        MessageCode::SearchQueryReq
    }

    fn response_code(&self) -> MessageCode {
        MessageCode::SearchQueryResp
    }

    fn request_payload(&self) -> Result<Vec<u8>> {
        Ok(self.request.encode_to_vec())
    }

    fn interpret_response(&mut self, payload: &[u8]) -> Result<()> {
        let resp = RpbSearchQueryResp::decode(payload).map_err(|e| unexpected(self.name(), e))?;
        self.response = Some(SearchResponse {
            docs: resp.docs.into_iter().map(search_doc).collect(),
            max_score: resp.max_score.unwrap_or_default(),
            num_found: resp.num_found.unwrap_or_default(),
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

fn search_doc(doc: RpbSearchDoc) -> SearchDoc {
    let mut out = SearchDoc::default();

    for pair in doc.fields {
        let key = lossy(&pair.key);
        let value = pair.value.as_deref().map(lossy).unwrap_or_default();

        match key.as_str() {
            BUCKET_TYPE_FIELD => out.bucket_type = value.clone(),
            BUCKET_FIELD => out.bucket = value.clone(),
            KEY_FIELD => out.key = value.clone(),
            ID_FIELD => out.id = value.clone(),
            SCORE_FIELD => out.score = value.clone(),
            _ => {}
        }
        out.fields.entry(key).or_default().push(value);
    }

    out
}

/// Builder for SearchCommand
#[derive(Debug, Default)]
pub struct SearchCommandBuilder {
    request: RpbSearchQueryReq,
}

impl SearchCommandBuilder {
    pub fn index_name(mut self, index: impl Into<Vec<u8>>) -> Self {
        self.request.index = index.into();
        self
    }

    pub fn query(mut self, query: impl Into<Vec<u8>>) -> Self {
        self.request.q = query.into();
        self
    }

    pub fn num_rows(mut self, rows: u32) -> Self {
        self.request.rows = Some(rows);
        self
    }

    pub fn start(mut self, start: u32) -> Self {
        self.request.start = Some(start);
        self
    }

    pub fn sort_field(mut self, sort: impl Into<Vec<u8>>) -> Self {
        self.request.sort = Some(sort.into());
        self
    }

    pub fn filter_query(mut self, filter: impl Into<Vec<u8>>) -> Self {
        self.request.filter = Some(filter.into());
        self
    }

    pub fn default_field(mut self, field: impl Into<Vec<u8>>) -> Self {
        self.request.df = Some(field.into());
        self
    }

    /// "and" / "or"
    pub fn default_operation(mut self, op: impl Into<Vec<u8>>) -> Self {
        self.request.op = Some(op.into());
        self
    }

    /// Replaces any previously given return fields
    pub fn return_fields<I, F>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<Vec<u8>>,
    {
        self.request.fl = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn presort(mut self, presort: impl Into<Vec<u8>>) -> Self {
        self.request.presort = Some(presort.into());
        self
    }

    pub fn build(self) -> Result<SearchCommand> {
        require("SearchCommandBuilder", "index name", &self.request.index)?;
        require("SearchCommandBuilder", "query", &self.request.q)?;
        Ok(SearchCommand {
            state: RetryState::new(),
            request: self.request,
            response: None,
        })
    }
}
