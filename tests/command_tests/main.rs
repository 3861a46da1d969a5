mod map_op_tests;
mod search_tests;
mod yokozuna_tests;

use prost::Message;
use riak_command::command::build_request_frame;
use riak_command::protocol::{decode_frame, encode_frame};
use riak_command::Command;

/// Decode the request a command would send
pub fn sent_request<M: Message + Default>(cmd: &dyn Command) -> M {
    let frame = build_request_frame(cmd).unwrap();
    let payload = decode_frame(&frame, cmd.request_code().as_u8()).unwrap();
    M::decode(payload).unwrap()
}

/// Frame a response message under the command's response code
pub fn response_frame<M: Message>(cmd: &dyn Command, msg: &M) -> Vec<u8> {
    encode_frame(cmd.response_code().as_u8(), &msg.encode_to_vec()).to_vec()
}
