//! Protocol Module
//!
//! Defines the wire protocol spoken with the server.
//!
//! ## Frame Format
//!
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │ Len (4)  │ Code (1) │     Payload (Len - 1)       │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! ### Request / Response Codes
//! - 80 / 81: DtFetchReq / DtFetchResp (counter, set, map fetch)
//! - 82 / 83: DtUpdateReq / DtUpdateResp (counter, set, map update)
//! - 56 / 12: RpbYokozunaIndexPutReq / RpbPutResp
//! - 54 / 55: RpbYokozunaIndexGetReq / RpbYokozunaIndexGetResp
//! - 57 / 14: RpbYokozunaIndexDeleteReq / RpbDelResp
//! - 60 / 12: RpbYokozunaSchemaPutReq / RpbPutResp
//! - 58 / 59: RpbYokozunaSchemaGetReq / RpbYokozunaSchemaGetResp
//! - 27 / 28: RpbSearchQueryReq / RpbSearchQueryResp
//! - 0: RpbErrorResp, sent by the server in place of any response
//!
//! Payloads are protocol-buffer messages, see [`pb`].

mod code;
mod codec;
pub mod pb;

pub use code::MessageCode;
pub use codec::{
    decode_frame, encode_frame, read_frame, split_frame, write_frame, HEADER_SIZE,
    LENGTH_PREFIX_SIZE,
};
