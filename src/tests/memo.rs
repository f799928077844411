use serde_json::json;

use crate::domain::memo::{decode, Document};

#[test]
fn test_decode_plain_json() {
    let document = decode(r#"{"title":"Deed","pages":3}"#, Some("H1"));

    assert_eq!(document, Document::Structured(json!({ "title": "Deed", "pages": 3 })));
}

#[test]
fn test_decode_strips_control_characters() {
    let document = decode("\n\t{\"a\":\r\n 1}\t  ", Some("H1"));

    assert_eq!(document, Document::Structured(json!({ "a": 1 })));
}

#[test]
fn test_decode_strips_byte_order_mark() {
    let document = decode("\u{feff}{\"a\":1} ", Some("H1"));

    assert_eq!(document, Document::Structured(json!({ "a": 1 })));
}

#[test]
fn test_decode_double_encoded() {
    let document = decode(r#""{\"a\":1}""#, Some("H1"));

    assert_eq!(document, Document::Structured(json!({ "a": 1 })));
}

#[test]
fn test_decode_double_encoded_with_escaped_whitespace() {
    let document = decode(r#""\n{\"list\":\t[1,2]}\n""#, None);

    assert_eq!(document, Document::Structured(json!({ "list": [1, 2] })));
}

#[test]
fn test_decode_garbage_falls_back() {
    let document = decode("hello", Some("H1"));

    assert!(document.is_fallback());
    assert_eq!(
        serde_json::to_value(&document).unwrap(),
        json!({ "raw_memo": "hello", "hash": "H1" })
    );
}

#[test]
fn test_decode_quoted_plain_text_falls_back() {
    let document = decode(r#""just a note""#, Some("H2"));

    assert_eq!(
        document,
        Document::Fallback {
            raw_memo: r#""just a note""#.to_string(),
            hash: Some("H2".to_string()),
        }
    );
}

#[test]
fn test_fallback_keeps_original_memo_unstripped() {
    let memo = "not json\n";
    let document = decode(memo, Some("H3"));

    assert_eq!(
        document,
        Document::Fallback {
            raw_memo: memo.to_string(),
            hash: Some("H3".to_string()),
        }
    );
}

#[test]
fn test_fallback_without_hash_omits_it() {
    let document = decode("{broken", None);

    assert_eq!(
        serde_json::to_value(&document).unwrap(),
        json!({ "raw_memo": "{broken" })
    );
}

#[test]
fn test_structured_scalars_are_documents() {
    assert_eq!(decode("42", None), Document::Structured(json!(42)));
    assert_eq!(decode("[1, 2]", None), Document::Structured(json!([1, 2])));
}

#[test]
fn test_structured_document_serializes_as_value() {
    let document = decode(r#"{"a":{"b":true}}"#, Some("H4"));

    assert_eq!(
        serde_json::to_value(&document).unwrap(),
        json!({ "a": { "b": true } })
    );
}
