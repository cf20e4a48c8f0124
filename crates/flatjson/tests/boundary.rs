//! Boundary scenarios: single-byte feeds across tricky spans, maximum
//! nesting depth, and degenerate documents.

#[path = "common.rs"]
mod common;

use common::{parse_chunked, parse_err, parse_err_with_cap, parse_ok, parse_ok_with_cap};
use flatjson::ErrorKind;

#[test]
fn feed_size_one_across_unicode_escape() {
    let src: &[u8] = b"\"\\uABCD\"";
    let whole = parse_ok(src);
    let one_byte_at_a_time = parse_chunked(src, 1, common::DEFAULT_NODE_CAP, common::DEFAULT_STACK_CAP);
    assert_eq!(whole, one_byte_at_a_time);
}

#[test]
fn feed_size_one_across_float_exponent() {
    let src = b"-1.5e+10";
    let whole = parse_ok(src);
    let chunked = parse_chunked(src, 1, common::DEFAULT_NODE_CAP, common::DEFAULT_STACK_CAP);
    assert_eq!(whole, chunked);
}

#[test]
fn feed_size_one_across_literal() {
    let src = b"false";
    let whole = parse_ok(src);
    let chunked = parse_chunked(src, 1, common::DEFAULT_NODE_CAP, common::DEFAULT_STACK_CAP);
    assert_eq!(whole, chunked);
}

#[test]
fn feed_size_one_across_a_whole_document() {
    let src: &[u8] = b"{\"a\":[1,2.5,true,false,null,\"hi\\n\"],\"b\":{}}";
    let whole = parse_ok(src);
    let chunked = parse_chunked(src, 1, common::DEFAULT_NODE_CAP, common::DEFAULT_STACK_CAP);
    assert_eq!(whole, chunked);
}

#[test]
fn max_nesting_up_to_stack_cap_succeeds() {
    let stack_cap = 8;
    let depth = stack_cap;
    let mut src = Vec::new();
    src.extend(std::iter::repeat_n(b'[', depth));
    src.push(b'1');
    src.extend(std::iter::repeat_n(b']', depth));
    let nodes = parse_ok_with_cap(&src, common::DEFAULT_NODE_CAP, stack_cap);
    assert_eq!(nodes.len(), depth + 1);
}

#[test]
fn one_level_deeper_than_stack_cap_is_capacity_error() {
    let stack_cap = 8;
    let depth = stack_cap + 1;
    let mut src = Vec::new();
    src.extend(std::iter::repeat_n(b'[', depth));
    src.push(b'1');
    src.extend(std::iter::repeat_n(b']', depth));
    let error = parse_err_with_cap(&src, common::DEFAULT_NODE_CAP, stack_cap);
    assert_eq!(error.kind, ErrorKind::Capacity);
}

#[test]
fn empty_document_is_incomplete() {
    let error = parse_err(b"");
    assert_eq!(error.kind, ErrorKind::Incomplete);
}

#[test]
fn whitespace_only_document_is_incomplete() {
    let error = parse_err(b"   \n\t  ");
    assert_eq!(error.kind, ErrorKind::Incomplete);
}

#[test]
fn trailing_whitespace_after_value_is_accepted() {
    let nodes = parse_ok(b"42   \n ");
    assert_eq!(nodes.len(), 1);
}

#[test]
fn trailing_comma_in_array_is_rejected() {
    let error = parse_err(b"[1,]");
    assert_eq!(error.kind, ErrorKind::Unexpected);
}

#[test]
fn trailing_comma_in_object_is_rejected() {
    let error = parse_err(br#"{"a":1,}"#);
    assert_eq!(error.kind, ErrorKind::Unexpected);
}
