//! Message codes
//!
//! One-byte codes identifying the schema of a frame's payload. The numeric
//! values are fixed by the server's published protocol table.

/// Message codes understood by the command core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MessageCode {
    ErrorResp = 0,
    PingReq = 1,
    PingResp = 2,
    PutResp = 12,
    DelResp = 14,
    SearchQueryReq = 27,
    SearchQueryResp = 28,
    YokozunaIndexGetReq = 54,
    YokozunaIndexGetResp = 55,
    YokozunaIndexPutReq = 56,
    YokozunaIndexDeleteReq = 57,
    YokozunaSchemaGetReq = 58,
    YokozunaSchemaGetResp = 59,
    YokozunaSchemaPutReq = 60,
    DtFetchReq = 80,
    DtFetchResp = 81,
    DtUpdateReq = 82,
    DtUpdateResp = 83,
}

impl MessageCode {
    /// Raw byte written to the wire
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Symbolic name, as listed in the server's protocol table
    pub fn name(self) -> &'static str {
        match self {
            MessageCode::ErrorResp => "RpbErrorResp",
            MessageCode::PingReq => "RpbPingReq",
            MessageCode::PingResp => "RpbPingResp",
            MessageCode::PutResp => "RpbPutResp",
            MessageCode::DelResp => "RpbDelResp",
            MessageCode::SearchQueryReq => "RpbSearchQueryReq",
            MessageCode::SearchQueryResp => "RpbSearchQueryResp",
            MessageCode::YokozunaIndexGetReq => "RpbYokozunaIndexGetReq",
            MessageCode::YokozunaIndexGetResp => "RpbYokozunaIndexGetResp",
            MessageCode::YokozunaIndexPutReq => "RpbYokozunaIndexPutReq",
            MessageCode::YokozunaIndexDeleteReq => "RpbYokozunaIndexDeleteReq",
            MessageCode::YokozunaSchemaGetReq => "RpbYokozunaSchemaGetReq",
            MessageCode::YokozunaSchemaGetResp => "RpbYokozunaSchemaGetResp",
            MessageCode::YokozunaSchemaPutReq => "RpbYokozunaSchemaPutReq",
            MessageCode::DtFetchReq => "DtFetchReq",
            MessageCode::DtFetchResp => "DtFetchResp",
            MessageCode::DtUpdateReq => "DtUpdateReq",
            MessageCode::DtUpdateResp => "DtUpdateResp",
        }
    }
}

impl TryFrom<u8> for MessageCode {
    type Error = u8;

    fn try_from(code: u8) -> std::result::Result<Self, u8> {
        let code = match code {
            0 => MessageCode::ErrorResp,
            1 => MessageCode::PingReq,
            2 => MessageCode::PingResp,
            12 => MessageCode::PutResp,
            14 => MessageCode::DelResp,
            27 => MessageCode::SearchQueryReq,
            28 => MessageCode::SearchQueryResp,
            54 => MessageCode::YokozunaIndexGetReq,
            55 => MessageCode::YokozunaIndexGetResp,
            56 => MessageCode::YokozunaIndexPutReq,
            57 => MessageCode::YokozunaIndexDeleteReq,
            58 => MessageCode::YokozunaSchemaGetReq,
            59 => MessageCode::YokozunaSchemaGetResp,
            60 => MessageCode::YokozunaSchemaPutReq,
            80 => MessageCode::DtFetchReq,
            81 => MessageCode::DtFetchResp,
            82 => MessageCode::DtUpdateReq,
            83 => MessageCode::DtUpdateResp,
            other => return Err(other),
        };
        Ok(code)
    }
}
