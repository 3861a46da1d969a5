//! Dispatcher Tests
//!
//! Single attempts against a scripted transport, and the retry budget
//! across attempts.

use std::io::ErrorKind;
use std::sync::Arc;

use prost::Message;
use riak_command::command::FetchCounterCommand;
use riak_command::network::{Attempt, Dispatcher, Endpoint};
use riak_command::protocol::pb::{DataType, DtFetchResp, DtValue};
use riak_command::protocol::{encode_frame, MessageCode};
use riak_command::{ClientConfig, Command, RiakError};

use super::ScriptedTransport;

fn fetch_counter() -> FetchCounterCommand {
    FetchCounterCommand::builder()
        .bucket("counters")
        .key("hits")
        .build()
        .unwrap()
}

fn counter_frame(value: i64) -> Vec<u8> {
    let resp = DtFetchResp {
        r#type: DataType::Counter as i32,
        value: Some(DtValue {
            counter_value: Some(value),
            ..Default::default()
        }),
        ..Default::default()
    };
    encode_frame(MessageCode::DtFetchResp.as_u8(), &resp.encode_to_vec()).to_vec()
}

fn dispatcher(max_tries: u8) -> Dispatcher {
    let config = ClientConfig::builder().max_tries(max_tries).build().unwrap();
    Dispatcher::new(&config)
}

#[test]
fn test_completed_first_try() {
    let dispatcher = dispatcher(3);
    let endpoint = Arc::new(Endpoint::new("node1:8087"));
    let mut transport = ScriptedTransport::new().respond(counter_frame(10));
    let mut cmd = fetch_counter();

    dispatcher.prepare(&mut cmd);
    let outcome = dispatcher.attempt(&mut cmd, &endpoint, &mut transport);

    assert_eq!(outcome, Attempt::Completed);
    assert!(cmd.successful());
    assert_eq!(cmd.response().unwrap().counter_value, 10);
    assert_eq!(cmd.retry_state().remaining_tries(), 2);
    assert_eq!(transport.requests.len(), 1);
    assert_eq!(transport.requests[0][4], MessageCode::DtFetchReq.as_u8());
}

#[test]
fn test_retry_then_complete() {
    let dispatcher = dispatcher(3);
    let first = Arc::new(Endpoint::new("node1:8087"));
    let second = Arc::new(Endpoint::new("node2:8087"));
    let mut transport = ScriptedTransport::new()
        .fail(ErrorKind::ConnectionReset)
        .respond(counter_frame(3));
    let mut cmd = fetch_counter();

    dispatcher.prepare(&mut cmd);
    assert_eq!(
        dispatcher.attempt(&mut cmd, &first, &mut transport),
        Attempt::Retry
    );
    assert!(cmd.error().is_none());
    assert_eq!(cmd.retry_state().last_endpoint().unwrap().addr(), "node1:8087");

    assert_eq!(
        dispatcher.attempt(&mut cmd, &second, &mut transport),
        Attempt::Completed
    );
    assert_eq!(cmd.retry_state().last_endpoint().unwrap().addr(), "node2:8087");
    assert_eq!(transport.requests[0], transport.requests[1]);
}

#[test]
fn test_exhausted_keeps_final_error() {
    let dispatcher = dispatcher(3);
    let endpoint = Arc::new(Endpoint::new("node1:8087"));
    let mut transport = ScriptedTransport::new()
        .fail(ErrorKind::ConnectionReset)
        .fail(ErrorKind::TimedOut)
        .fail(ErrorKind::BrokenPipe);
    let mut cmd = fetch_counter();

    dispatcher.prepare(&mut cmd);
    assert_eq!(dispatcher.attempt(&mut cmd, &endpoint, &mut transport), Attempt::Retry);
    assert_eq!(dispatcher.attempt(&mut cmd, &endpoint, &mut transport), Attempt::Retry);
    assert_eq!(
        dispatcher.attempt(&mut cmd, &endpoint, &mut transport),
        Attempt::Exhausted
    );

    assert!(!cmd.successful());
    match cmd.error() {
        Some(RiakError::Io(e)) => assert_eq!(e.kind(), ErrorKind::BrokenPipe),
        other => panic!("Expected final IO error, got {:?}", other),
    }
}

#[test]
fn test_server_error_consumes_attempt() {
    let dispatcher = dispatcher(1);
    let endpoint = Arc::new(Endpoint::new("node1:8087"));
    let mut transport = ScriptedTransport::new().respond(vec![0, 0, 0, 1, 0]);
    let mut cmd = fetch_counter();

    dispatcher.prepare(&mut cmd);
    let outcome = dispatcher.attempt(&mut cmd, &endpoint, &mut transport);

    assert_eq!(outcome, Attempt::Exhausted);
    assert!(matches!(cmd.error(), Some(RiakError::Server { .. })));
}

#[test]
fn test_mismatched_response_exhausts() {
    let dispatcher = dispatcher(1);
    let endpoint = Arc::new(Endpoint::new("node1:8087"));
    let mismatched = encode_frame(MessageCode::DtUpdateResp.as_u8(), &[]).to_vec();
    let mut transport = ScriptedTransport::new().respond(mismatched);
    let mut cmd = fetch_counter();

    dispatcher.prepare(&mut cmd);
    let outcome = dispatcher.attempt(&mut cmd, &endpoint, &mut transport);

    assert_eq!(outcome, Attempt::Exhausted);
    assert!(matches!(
        cmd.error(),
        Some(RiakError::OpcodeMismatch { expected: 81, actual: 83 })
    ));
}

#[test]
#[should_panic(expected = "no tries remaining")]
fn test_attempt_without_prepare_panics() {
    let dispatcher = dispatcher(3);
    let endpoint = Arc::new(Endpoint::new("node1:8087"));
    let mut transport = ScriptedTransport::new();
    let mut cmd = fetch_counter();

    dispatcher.attempt(&mut cmd, &endpoint, &mut transport);
}
