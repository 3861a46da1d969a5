//! Data-type (CRDT) messages: counters, sets and maps.

/// Kind tag of a map field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum MapFieldType {
    Counter = 1,
    Set = 2,
    Register = 3,
    Flag = 4,
    Map = 5,
}

/// Flag mutation carried by a map update.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum FlagOp {
    Enable = 1,
    Disable = 2,
}

/// Data type reported by a fetch response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum DataType {
    Counter = 1,
    Set = 2,
    Map = 3,
}

/// Name and kind of a map field.
#[derive(Clone, PartialEq, prost::Message)]
pub struct MapField {
    #[prost(bytes = "vec", required, tag = "1")]
    pub name: Vec<u8>,

    #[prost(enumeration = "MapFieldType", required, tag = "2")]
    pub r#type: i32,
}

/// One field of a fetched map value.
#[derive(Clone, PartialEq, prost::Message)]
pub struct MapEntry {
    #[prost(message, required, tag = "1")]
    pub field: MapField,

    #[prost(sint64, optional, tag = "2")]
    pub counter_value: Option<i64>,

    #[prost(bytes = "vec", repeated, tag = "3")]
    pub set_value: Vec<Vec<u8>>,

    #[prost(bytes = "vec", optional, tag = "4")]
    pub register_value: Option<Vec<u8>>,

    #[prost(bool, optional, tag = "5")]
    pub flag_value: Option<bool>,

    #[prost(message, repeated, tag = "6")]
    pub map_value: Vec<MapEntry>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct DtFetchReq {
    #[prost(bytes = "vec", required, tag = "1")]
    pub bucket: Vec<u8>,

    #[prost(bytes = "vec", required, tag = "2")]
    pub key: Vec<u8>,

    #[prost(bytes = "vec", required, tag = "3")]
    pub r#type: Vec<u8>,

    #[prost(uint32, optional, tag = "4")]
    pub r: Option<u32>,

    #[prost(uint32, optional, tag = "5")]
    pub pr: Option<u32>,

    #[prost(bool, optional, tag = "6")]
    pub basic_quorum: Option<bool>,

    #[prost(bool, optional, tag = "7")]
    pub notfound_ok: Option<bool>,

    /// Milliseconds
    #[prost(uint32, optional, tag = "8")]
    pub timeout: Option<u32>,

    #[prost(bool, optional, tag = "9")]
    pub sloppy_quorum: Option<bool>,

    #[prost(uint32, optional, tag = "10")]
    pub n_val: Option<u32>,

    #[prost(bool, optional, tag = "11")]
    pub include_context: Option<bool>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct DtValue {
    #[prost(sint64, optional, tag = "1")]
    pub counter_value: Option<i64>,

    #[prost(bytes = "vec", repeated, tag = "2")]
    pub set_value: Vec<Vec<u8>>,

    #[prost(message, repeated, tag = "3")]
    pub map_value: Vec<MapEntry>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct DtFetchResp {
    #[prost(bytes = "vec", optional, tag = "1")]
    pub context: Option<Vec<u8>>,

    #[prost(enumeration = "DataType", required, tag = "2")]
    pub r#type: i32,

    /// Absent when the object was not found
    #[prost(message, optional, tag = "3")]
    pub value: Option<DtValue>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct CounterOp {
    #[prost(sint64, optional, tag = "1")]
    pub increment: Option<i64>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct SetOp {
    #[prost(bytes = "vec", repeated, tag = "1")]
    pub adds: Vec<Vec<u8>>,

    #[prost(bytes = "vec", repeated, tag = "2")]
    pub removes: Vec<Vec<u8>>,
}

/// Mutation of a single map field.
#[derive(Clone, PartialEq, prost::Message)]
pub struct MapUpdate {
    #[prost(message, required, tag = "1")]
    pub field: MapField,

    #[prost(message, optional, tag = "2")]
    pub counter_op: Option<CounterOp>,

    #[prost(message, optional, tag = "3")]
    pub set_op: Option<SetOp>,

    #[prost(bytes = "vec", optional, tag = "4")]
    pub register_op: Option<Vec<u8>>,

    #[prost(enumeration = "FlagOp", optional, tag = "5")]
    pub flag_op: Option<i32>,

    #[prost(message, optional, tag = "6")]
    pub map_op: Option<MapOp>,
}

/// Wire form of a map operation: whole-field removals plus field updates.
#[derive(Clone, PartialEq, prost::Message)]
pub struct MapOp {
    #[prost(message, repeated, tag = "1")]
    pub removes: Vec<MapField>,

    #[prost(message, repeated, tag = "2")]
    pub updates: Vec<MapUpdate>,
}

/// Exactly one of the three operations is set.
#[derive(Clone, PartialEq, prost::Message)]
pub struct DtOp {
    #[prost(message, optional, tag = "1")]
    pub counter_op: Option<CounterOp>,

    #[prost(message, optional, tag = "2")]
    pub set_op: Option<SetOp>,

    #[prost(message, optional, tag = "3")]
    pub map_op: Option<MapOp>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct DtUpdateReq {
    #[prost(bytes = "vec", required, tag = "1")]
    pub bucket: Vec<u8>,

    /// Omitted to let the server generate a key
    #[prost(bytes = "vec", optional, tag = "2")]
    pub key: Option<Vec<u8>>,

    #[prost(bytes = "vec", required, tag = "3")]
    pub r#type: Vec<u8>,

    #[prost(bytes = "vec", optional, tag = "4")]
    pub context: Option<Vec<u8>>,

    #[prost(message, required, tag = "5")]
    pub op: DtOp,

    #[prost(uint32, optional, tag = "6")]
    pub w: Option<u32>,

    #[prost(uint32, optional, tag = "7")]
    pub dw: Option<u32>,

    #[prost(uint32, optional, tag = "8")]
    pub pw: Option<u32>,

    #[prost(bool, optional, tag = "9")]
    pub return_body: Option<bool>,

    /// Milliseconds
    #[prost(uint32, optional, tag = "10")]
    pub timeout: Option<u32>,

    #[prost(bool, optional, tag = "11")]
    pub sloppy_quorum: Option<bool>,

    #[prost(uint32, optional, tag = "12")]
    pub n_val: Option<u32>,

    #[prost(bool, optional, tag = "13")]
    pub include_context: Option<bool>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct DtUpdateResp {
    /// Present only when the server generated the key
    #[prost(bytes = "vec", optional, tag = "1")]
    pub key: Option<Vec<u8>>,

    #[prost(bytes = "vec", optional, tag = "2")]
    pub context: Option<Vec<u8>>,

    #[prost(sint64, optional, tag = "3")]
    pub counter_value: Option<i64>,

    #[prost(bytes = "vec", repeated, tag = "4")]
    pub set_value: Vec<Vec<u8>>,

    #[prost(message, repeated, tag = "5")]
    pub map_value: Vec<MapEntry>,
}
