//! Search Command Tests

use riak_command::command::{handle_response_frame, SearchCommand};
use riak_command::protocol::pb::{RpbPair, RpbSearchDoc, RpbSearchQueryReq, RpbSearchQueryResp};
use riak_command::RiakError;

use super::{response_frame, sent_request};

fn pair(key: &str, value: &str) -> RpbPair {
    RpbPair {
        key: key.as_bytes().to_vec(),
        value: Some(value.as_bytes().to_vec()),
    }
}

#[test]
fn test_search_request() {
    let cmd = SearchCommand::builder()
        .index_name("famous")
        .query("name_s:Lion*")
        .num_rows(10)
        .start(20)
        .sort_field("age_i asc")
        .filter_query("age_i:[30 TO *]")
        .default_field("name_s")
        .default_operation("and")
        .return_fields(["name_s", "age_i"])
        .presort("score")
        .build()
        .unwrap();

    let req: RpbSearchQueryReq = sent_request(&cmd);
    assert_eq!(req.index, b"famous");
    assert_eq!(req.q, b"name_s:Lion*");
    assert_eq!(req.rows, Some(10));
    assert_eq!(req.start, Some(20));
    assert_eq!(req.sort.as_deref(), Some(&b"age_i asc"[..]));
    assert_eq!(req.filter.as_deref(), Some(&b"age_i:[30 TO *]"[..]));
    assert_eq!(req.df.as_deref(), Some(&b"name_s"[..]));
    assert_eq!(req.op.as_deref(), Some(&b"and"[..]));
    assert_eq!(req.fl, vec![b"name_s".to_vec(), b"age_i".to_vec()]);
    assert_eq!(req.presort.as_deref(), Some(&b"score"[..]));
}

#[test]
fn test_search_requires_index_and_query() {
    let err = SearchCommand::builder().query("*:*").build().unwrap_err();
    assert!(matches!(err, RiakError::Config(_)));

    let err = SearchCommand::builder()
        .index_name("famous")
        .build()
        .unwrap_err();
    assert!(matches!(err, RiakError::Config(_)));
}

#[test]
fn test_search_response() {
    let mut cmd = SearchCommand::builder()
        .index_name("famous")
        .query("*:*")
        .build()
        .unwrap();

    let resp = RpbSearchQueryResp {
        docs: vec![RpbSearchDoc {
            fields: vec![
                pair("_yz_rt", "maps"),
                pair("_yz_rb", "people"),
                pair("_yz_rk", "liono"),
                pair("_yz_id", "1*maps*people*liono*8"),
                pair("score", "1.0"),
                pair("tag_ss", "leader"),
                pair("tag_ss", "cat"),
            ],
        }],
        max_score: Some(1.0),
        num_found: Some(1),
    };
    let frame = response_frame(&cmd, &resp);
    handle_response_frame(&mut cmd, &frame).unwrap();

    let result = cmd.response().unwrap();
    assert_eq!(result.num_found, 1);
    assert_eq!(result.max_score, 1.0);

    let doc = &result.docs[0];
    assert_eq!(doc.bucket_type, "maps");
    assert_eq!(doc.bucket, "people");
    assert_eq!(doc.key, "liono");
    assert_eq!(doc.id, "1*maps*people*liono*8");
    assert_eq!(doc.score, "1.0");
    assert_eq!(
        doc.fields.get("tag_ss").unwrap(),
        &vec!["leader".to_string(), "cat".to_string()]
    );
    assert!(doc.fields.contains_key("_yz_rk"));
}

#[test]
fn test_search_no_results() {
    let mut cmd = SearchCommand::builder()
        .index_name("famous")
        .query("nothing:here")
        .build()
        .unwrap();

    let frame = response_frame(&cmd, &RpbSearchQueryResp::default());
    handle_response_frame(&mut cmd, &frame).unwrap();

    let result = cmd.response().unwrap();
    assert!(result.docs.is_empty());
    assert_eq!(result.num_found, 0);
}
