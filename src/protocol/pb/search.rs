//! Full-text search query messages.

use super::RpbPair;

#[derive(Clone, PartialEq, prost::Message)]
pub struct RpbSearchDoc {
    #[prost(message, repeated, tag = "1")]
    pub fields: Vec<RpbPair>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct RpbSearchQueryReq {
    #[prost(bytes = "vec", required, tag = "1")]
    pub q: Vec<u8>,

    #[prost(bytes = "vec", required, tag = "2")]
    pub index: Vec<u8>,

    #[prost(uint32, optional, tag = "3")]
    pub rows: Option<u32>,

    #[prost(uint32, optional, tag = "4")]
    pub start: Option<u32>,

    #[prost(bytes = "vec", optional, tag = "5")]
    pub sort: Option<Vec<u8>>,

    #[prost(bytes = "vec", optional, tag = "6")]
    pub filter: Option<Vec<u8>>,

    /// Default field
    #[prost(bytes = "vec", optional, tag = "7")]
    pub df: Option<Vec<u8>>,

    /// Default operation
    #[prost(bytes = "vec", optional, tag = "8")]
    pub op: Option<Vec<u8>>,

    /// Fields to return
    #[prost(bytes = "vec", repeated, tag = "9")]
    pub fl: Vec<Vec<u8>>,

    #[prost(bytes = "vec", optional, tag = "10")]
    pub presort: Option<Vec<u8>>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct RpbSearchQueryResp {
    #[prost(message, repeated, tag = "1")]
    pub docs: Vec<RpbSearchDoc>,

    #[prost(float, optional, tag = "2")]
    pub max_score: Option<f32>,

    #[prost(uint32, optional, tag = "3")]
    pub num_found: Option<u32>,
}
