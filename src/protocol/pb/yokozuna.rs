//! Search index and schema administration messages.

#[derive(Clone, PartialEq, prost::Message)]
pub struct RpbYokozunaIndex {
    #[prost(bytes = "vec", required, tag = "1")]
    pub name: Vec<u8>,

    #[prost(bytes = "vec", optional, tag = "2")]
    pub schema: Option<Vec<u8>>,

    #[prost(uint32, optional, tag = "3")]
    pub n_val: Option<u32>,
}

/// Without a name the server lists every index
#[derive(Clone, PartialEq, prost::Message)]
pub struct RpbYokozunaIndexGetReq {
    #[prost(bytes = "vec", optional, tag = "1")]
    pub name: Option<Vec<u8>>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct RpbYokozunaIndexGetResp {
    #[prost(message, repeated, tag = "1")]
    pub index: Vec<RpbYokozunaIndex>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct RpbYokozunaIndexPutReq {
    #[prost(message, required, tag = "1")]
    pub index: RpbYokozunaIndex,

    #[prost(uint32, optional, tag = "2")]
    pub timeout: Option<u32>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct RpbYokozunaIndexDeleteReq {
    #[prost(bytes = "vec", required, tag = "1")]
    pub name: Vec<u8>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct RpbYokozunaSchema {
    #[prost(bytes = "vec", required, tag = "1")]
    pub name: Vec<u8>,

    #[prost(bytes = "vec", optional, tag = "2")]
    pub content: Option<Vec<u8>>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct RpbYokozunaSchemaPutReq {
    #[prost(message, required, tag = "1")]
    pub schema: RpbYokozunaSchema,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct RpbYokozunaSchemaGetReq {
    #[prost(bytes = "vec", required, tag = "1")]
    pub name: Vec<u8>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct RpbYokozunaSchemaGetResp {
    #[prost(message, required, tag = "1")]
    pub schema: RpbYokozunaSchema,
}
