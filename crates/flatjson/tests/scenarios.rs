//! End-to-end scenarios, one `#[rstest]` case per row of the scenario
//! table: concrete inputs with concrete expected shapes.

#[path = "common.rs"]
mod common;

use common::{parse_err, parse_ok};
use flatjson::{NodeKind, arena, as_bool, as_f64, str_copy};
use rstest::rstest;

#[test]
fn scenario_1_null() {
    let nodes = parse_ok(b"null");
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].kind(), NodeKind::Null);
    assert_eq!(nodes[0].len(), 4);
}

#[test]
fn scenario_2_padded_false() {
    let nodes = parse_ok(b" false ");
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].kind(), NodeKind::False);
    assert!(!as_bool(&nodes[0]));
}

#[test]
fn scenario_3_negative_exponent_float() {
    let src = b"-0.5e-3";
    let nodes = parse_ok(src);
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].kind(), NodeKind::FloatNumber);
    assert_eq!(as_f64(&nodes[0], src), Some(-0.0005));
}

#[test]
fn scenario_4_string_str_copy() {
    let src = br#""hello world""#;
    let nodes = parse_ok(src);
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].kind(), NodeKind::String);
    assert_eq!(nodes[0].len(), 11);
    let mut out = [0u8; 32];
    let written = str_copy(&nodes[0], src, &mut out);
    assert_eq!(&out[..written], b"hello world");
}

#[test]
fn scenario_5_object_lookup() {
    let src = br#"{"a":1,"b":true,"c":null}"#;
    let nodes = parse_ok(src);
    assert_eq!(nodes.len(), 7);
    assert_eq!(nodes[0].kind(), NodeKind::Object);
    assert_eq!(nodes[0].children(), 6);
    let value = arena::object_lookup(&nodes, 0, b"b", src).expect("key b exists");
    assert_eq!(nodes[value].kind(), NodeKind::True);
}

#[test]
fn scenario_6_array_element() {
    let src = br#"[1, 2.5, true, false, null, "hi"]"#;
    let nodes = parse_ok(src);
    assert_eq!(nodes.len(), 7);
    let third = arena::array_element(&nodes, 0, 3).expect("index 3 exists");
    assert_eq!(nodes[third].kind(), NodeKind::False);
}

#[test]
fn scenario_7_unclosed_object_is_incomplete() {
    let error = parse_err(b"{");
    assert_eq!(error.kind, flatjson::ErrorKind::Incomplete);
}

#[test]
fn scenario_8_missing_value_is_unexpected() {
    let error = parse_err(br#"{"a":}"#);
    assert_eq!(error.kind, flatjson::ErrorKind::Unexpected);
    assert_eq!(error.pos, 5);
}

#[test]
fn scenario_9_bad_literal_is_unexpected() {
    let error = parse_err(b"trux");
    assert_eq!(error.kind, flatjson::ErrorKind::Unexpected);
    assert_eq!(error.pos, 3);
}

#[test]
fn scenario_10_trailing_dot_is_unexpected_at_finish() {
    let error = parse_err(b"1.");
    assert_eq!(error.kind, flatjson::ErrorKind::Unexpected);
}

#[rstest]
#[case::object(br#"{"x":[1,2,3],"y":{"z":null}}"#.as_slice())]
#[case::array_of_objects(br#"[{"a":1},{"b":2}]"#.as_slice())]
#[case::nested_array(br#"[[1,2],[3,[4,5]]]"#.as_slice())]
fn nested_documents_parse_without_error(#[case] src: &[u8]) {
    let nodes = parse_ok(src);
    assert!(!nodes.is_empty());
    assert!(nodes[0].kind().is_container());
}
