//! Search Index and Schema Command Tests

use std::time::Duration;

use riak_command::command::{
    handle_response_frame, DeleteIndexCommand, FetchIndexCommand, FetchSchemaCommand,
    StoreIndexCommand, StoreSchemaCommand,
};
use riak_command::protocol::pb::{
    RpbYokozunaIndex, RpbYokozunaIndexDeleteReq, RpbYokozunaIndexGetReq, RpbYokozunaIndexGetResp,
    RpbYokozunaIndexPutReq, RpbYokozunaSchema, RpbYokozunaSchemaGetReq, RpbYokozunaSchemaGetResp,
    RpbYokozunaSchemaPutReq,
};
use riak_command::protocol::{encode_frame, MessageCode};
use riak_command::{Command, RiakError};

use super::{response_frame, sent_request};

// =============================================================================
// Index Tests
// =============================================================================

#[test]
fn test_store_index_request() {
    let cmd = StoreIndexCommand::builder()
        .index_name("famous")
        .schema_name("_yz_default")
        .n_val(3)
        .timeout(Duration::from_secs(2))
        .build()
        .unwrap();

    assert_eq!(cmd.response_code(), MessageCode::PutResp);

    let req: RpbYokozunaIndexPutReq = sent_request(&cmd);
    assert_eq!(req.index.name, b"famous");
    assert_eq!(req.index.schema.as_deref(), Some(&b"_yz_default"[..]));
    assert_eq!(req.index.n_val, Some(3));
    assert_eq!(req.timeout, Some(2000));
}

#[test]
fn test_store_index_requires_name() {
    let err = StoreIndexCommand::builder().n_val(3).build().unwrap_err();
    assert!(matches!(err, RiakError::Config(_)));
}

#[test]
fn test_store_index_acknowledged_by_code() {
    let mut cmd = StoreIndexCommand::builder()
        .index_name("famous")
        .build()
        .unwrap();

    let frame = encode_frame(MessageCode::PutResp.as_u8(), &[]);
    handle_response_frame(&mut cmd, &frame).unwrap();

    assert!(cmd.successful());
}

#[test]
fn test_fetch_index_all() {
    let mut cmd = FetchIndexCommand::builder().build().unwrap();

    let req: RpbYokozunaIndexGetReq = sent_request(&cmd);
    assert!(req.name.is_none());

    let resp = RpbYokozunaIndexGetResp {
        index: vec![
            RpbYokozunaIndex {
                name: b"one".to_vec(),
                schema: Some(b"s".to_vec()),
                n_val: Some(3),
            },
            RpbYokozunaIndex {
                name: b"two".to_vec(),
                ..Default::default()
            },
        ],
    };
    let frame = response_frame(&cmd, &resp);
    handle_response_frame(&mut cmd, &frame).unwrap();

    let indexes = cmd.response().unwrap();
    assert_eq!(indexes.len(), 2);
    assert_eq!(indexes[0].name, "one");
    assert_eq!(indexes[0].schema, "s");
    assert_eq!(indexes[0].n_val, 3);
    assert_eq!(indexes[1].schema, "");
}

#[test]
fn test_fetch_index_by_name() {
    let cmd = FetchIndexCommand::builder()
        .index_name("famous")
        .build()
        .unwrap();

    let req: RpbYokozunaIndexGetReq = sent_request(&cmd);
    assert_eq!(req.name.as_deref(), Some(&b"famous"[..]));
}

#[test]
fn test_delete_index() {
    let mut cmd = DeleteIndexCommand::builder()
        .index_name("famous")
        .build()
        .unwrap();

    let req: RpbYokozunaIndexDeleteReq = sent_request(&cmd);
    assert_eq!(req.name, b"famous");

    let frame = encode_frame(MessageCode::DelResp.as_u8(), &[]);
    handle_response_frame(&mut cmd, &frame).unwrap();
    assert!(cmd.successful());
}

#[test]
fn test_delete_index_wrong_ack() {
    let mut cmd = DeleteIndexCommand::builder()
        .index_name("famous")
        .build()
        .unwrap();

    let frame = encode_frame(MessageCode::PutResp.as_u8(), &[]);
    let err = handle_response_frame(&mut cmd, &frame).unwrap_err();

    assert!(matches!(err, RiakError::OpcodeMismatch { .. }));
    assert!(!cmd.successful());
}

// =============================================================================
// Schema Tests
// =============================================================================

#[test]
fn test_store_schema() {
    let mut cmd = StoreSchemaCommand::builder()
        .schema_name("people")
        .content("<schema/>")
        .build()
        .unwrap();

    let req: RpbYokozunaSchemaPutReq = sent_request(&cmd);
    assert_eq!(req.schema.name, b"people");
    assert_eq!(req.schema.content.as_deref(), Some(&b"<schema/>"[..]));

    let frame = encode_frame(MessageCode::PutResp.as_u8(), &[]);
    handle_response_frame(&mut cmd, &frame).unwrap();
    assert!(cmd.successful());
}

#[test]
fn test_store_schema_requires_name() {
    assert!(StoreSchemaCommand::builder()
        .content("<schema/>")
        .build()
        .is_err());
}

#[test]
fn test_fetch_schema() {
    let mut cmd = FetchSchemaCommand::builder()
        .schema_name("people")
        .build()
        .unwrap();

    let req: RpbYokozunaSchemaGetReq = sent_request(&cmd);
    assert_eq!(req.name, b"people");

    let resp = RpbYokozunaSchemaGetResp {
        schema: RpbYokozunaSchema {
            name: b"people".to_vec(),
            content: Some(b"<schema/>".to_vec()),
        },
    };
    let frame = response_frame(&cmd, &resp);
    handle_response_frame(&mut cmd, &frame).unwrap();

    let schema = cmd.response().unwrap();
    assert_eq!(schema.name, "people");
    assert_eq!(schema.content, "<schema/>");
}

#[test]
fn test_fetch_schema_empty_payload() {
    let mut cmd = FetchSchemaCommand::builder()
        .schema_name("people")
        .build()
        .unwrap();

    let frame = encode_frame(MessageCode::YokozunaSchemaGetResp.as_u8(), &[]);
    handle_response_frame(&mut cmd, &frame).unwrap();

    assert!(cmd.response().is_none());
    assert!(cmd.successful());
}

#[test]
fn test_fetch_schema_requires_name() {
    assert!(FetchSchemaCommand::builder().build().is_err());
}
