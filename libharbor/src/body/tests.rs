use super::*;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize, PartialEq)]
struct Label {
    id: i64,
    name: String,
}

struct Unserializable;

impl Serialize for Unserializable {
    fn serialize<S: serde::Serializer>(&self, _serializer: S) -> std::result::Result<S::Ok, S::Error> {
        Err(serde::ser::Error::custom("refusing to serialize"))
    }
}

#[test]
fn test_json_body_from_struct() {
    let body = RequestBody::json(&json!({"name": "qa-passed"})).unwrap();
    match body {
        RequestBody::Json(value) => assert_eq!(value["name"], "qa-passed"),
        other => panic!("unexpected body {:?}", other),
    }
}

#[test]
fn test_json_body_encoding_failure() {
    let err = RequestBody::json(&Unserializable).unwrap_err();
    assert!(matches!(err, HarborError::Encoding { .. }));
}

#[test]
fn test_empty_body_has_no_payload() {
    assert!(RequestBody::default().is_empty());
    assert!(RequestBody::Empty.into_body().unwrap().is_none());
}

#[test]
fn test_non_empty_bodies_produce_payload() {
    assert!(RequestBody::Raw(vec![1, 2, 3]).into_body().unwrap().is_some());
    assert!(RequestBody::Text("hi".into()).into_body().unwrap().is_some());
    assert!(RequestBody::Json(json!({"id": 1})).into_body().unwrap().is_some());
}

#[test]
fn test_stream_body_is_passed_through() {
    let chunks = futures_util::stream::iter(vec![
        Ok::<_, std::io::Error>("chunk-1 "),
        Ok("chunk-2"),
    ]);
    let body = RequestBody::Stream(reqwest::Body::wrap_stream(chunks))
        .into_body()
        .unwrap()
        .unwrap();
    // Streamed bodies are never buffered up front.
    assert!(body.as_bytes().is_none());
}

#[test]
fn test_raw_body_is_sent_verbatim() {
    let body = RequestBody::Raw(b"{not json".to_vec()).into_body().unwrap().unwrap();
    assert_eq!(body.as_bytes(), Some(&b"{not json"[..]));
}

#[test]
fn test_json_body_serialization() {
    let body = RequestBody::Json(json!({"id": 7})).into_body().unwrap().unwrap();
    assert_eq!(body.as_bytes(), Some(&br#"{"id":7}"#[..]));
}

#[test]
fn test_decode_target_fills_option() {
    let mut slot: Option<Label> = None;
    slot.decode(br#"{"id": 3, "name": "qa"}"#).unwrap();
    assert_eq!(
        slot,
        Some(Label {
            id: 3,
            name: "qa".into()
        })
    );
}

#[test]
fn test_decode_target_rejects_wrong_shape() {
    let mut slot: Option<Label> = None;
    let err = slot.decode(br#"{"id": "three"}"#).unwrap_err();
    assert!(matches!(err, HarborError::Decode { .. }));
    assert!(slot.is_none());
}

#[test]
fn test_debug_does_not_dump_raw_bytes() {
    assert_eq!(format!("{:?}", RequestBody::Raw(vec![0; 4])), "Raw(4 bytes)");
    let mut buffer = Vec::new();
    assert_eq!(format!("{:?}", ResponseSink::Buffer(&mut buffer)), "Buffer");
    assert_eq!(format!("{:?}", ResponseSink::default()), "Discard");
}
