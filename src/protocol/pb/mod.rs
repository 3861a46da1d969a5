//! Protocol-buffer payloads
//!
//! Message types mirroring the server's `.proto` definitions. Field tags and
//! labels are part of the wire contract and must not be changed.

mod dt;
mod search;
mod yokozuna;

pub use dt::{
    CounterOp, DataType, DtFetchReq, DtFetchResp, DtOp, DtUpdateReq, DtUpdateResp, DtValue,
    FlagOp, MapEntry, MapField, MapFieldType, MapOp, MapUpdate, SetOp,
};
pub use search::{RpbSearchDoc, RpbSearchQueryReq, RpbSearchQueryResp};
pub use yokozuna::{
    RpbYokozunaIndex, RpbYokozunaIndexDeleteReq, RpbYokozunaIndexGetReq, RpbYokozunaIndexGetResp,
    RpbYokozunaIndexPutReq, RpbYokozunaSchema, RpbYokozunaSchemaGetReq, RpbYokozunaSchemaGetResp,
    RpbYokozunaSchemaPutReq,
};

/// Error reported by the server in place of the expected response.
#[derive(Clone, PartialEq, prost::Message)]
pub struct RpbErrorResp {
    #[prost(bytes = "vec", required, tag = "1")]
    pub errmsg: Vec<u8>,

    #[prost(uint32, required, tag = "2")]
    pub errcode: u32,
}

/// Generic key/value pair.
#[derive(Clone, PartialEq, prost::Message)]
pub struct RpbPair {
    #[prost(bytes = "vec", required, tag = "1")]
    pub key: Vec<u8>,

    #[prost(bytes = "vec", optional, tag = "2")]
    pub value: Option<Vec<u8>>,
}
