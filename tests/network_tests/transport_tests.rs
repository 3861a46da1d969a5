//! Framed Stream Tests

use riak_command::network::{FramedStream, Transport};
use riak_command::protocol::{decode_frame, encode_frame, write_frame};
use riak_command::RiakError;

use super::MemoryStream;

#[test]
fn test_round_trip() {
    let mut canned = Vec::new();
    write_frame(&mut canned, 12, &[]).unwrap();

    let mut transport = FramedStream::new(MemoryStream::new(canned));
    let request = encode_frame(56, b"index");
    let response = transport.round_trip(&request).unwrap();

    assert!(decode_frame(&response, 12).unwrap().is_empty());
    assert_eq!(transport.get_ref().output, request.to_vec());
}

#[test]
fn test_reads_exactly_one_frame() {
    let mut canned = Vec::new();
    write_frame(&mut canned, 81, b"first").unwrap();
    write_frame(&mut canned, 81, b"second").unwrap();

    let mut transport = FramedStream::new(MemoryStream::new(canned));
    let request = encode_frame(80, b"fetch");

    let one = transport.round_trip(&request).unwrap();
    let two = transport.round_trip(&request).unwrap();

    assert_eq!(decode_frame(&one, 81).unwrap().as_ref(), b"first");
    assert_eq!(decode_frame(&two, 81).unwrap().as_ref(), b"second");
}

#[test]
fn test_rejects_malformed_request() {
    let mut transport = FramedStream::new(MemoryStream::new(Vec::new()));

    let err = transport.round_trip(&[0, 0, 0, 9, 80]).unwrap_err();

    assert!(matches!(err, RiakError::Protocol(_)));
    assert!(transport.into_inner().output.is_empty());
}

#[test]
fn test_oversized_response() {
    let mut canned = Vec::new();
    write_frame(&mut canned, 81, &[0u8; 128]).unwrap();

    let mut transport = FramedStream::with_max_frame_size(MemoryStream::new(canned), 64);
    let err = transport.round_trip(&encode_frame(80, &[])).unwrap_err();

    assert!(matches!(err, RiakError::Protocol(_)));
}

#[test]
fn test_connection_closed() {
    let mut transport = FramedStream::new(MemoryStream::new(Vec::new()));
    let err = transport.round_trip(&encode_frame(80, &[])).unwrap_err();

    assert!(matches!(err, RiakError::Io(_)));
}
