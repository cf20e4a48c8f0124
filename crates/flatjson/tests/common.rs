//! Shared helpers for the integration test suite.

use flatjson::{Node, ParserError};

/// Default arena/stack sizing, generous enough for every fixture in this
/// suite; individual tests override when they need to exercise capacity
/// limits.
pub const DEFAULT_NODE_CAP: usize = 256;
pub const DEFAULT_STACK_CAP: usize = 64;

/// Feed `input` to a fresh parser in one chunk, call `finish`, and return
/// the parsed nodes. Panics if either call fails.
pub fn parse_ok(input: &[u8]) -> Vec<Node> {
    parse_ok_with_cap(input, DEFAULT_NODE_CAP, DEFAULT_STACK_CAP)
}

pub fn parse_ok_with_cap(input: &[u8], node_cap: usize, stack_cap: usize) -> Vec<Node> {
    let mut arena = vec![Node::default(); node_cap];
    let mut stack = vec![0u32; stack_cap];
    let mut expecting_key = vec![false; stack_cap];
    let mut parser = flatjson::Parser::init(&mut arena, &mut stack, &mut expecting_key);
    assert!(parser.feed(input), "feed failed: {:?}", parser.error());
    assert!(parser.finish(), "finish failed: {:?}", parser.error());
    parser.nodes().to_vec()
}

/// Feed `input` split into chunks of exactly `chunk_size` bytes (the last
/// chunk may be shorter), then `finish`. Returns the parsed nodes.
pub fn parse_chunked(input: &[u8], chunk_size: usize, node_cap: usize, stack_cap: usize) -> Vec<Node> {
    let mut arena = vec![Node::default(); node_cap];
    let mut stack = vec![0u32; stack_cap];
    let mut expecting_key = vec![false; stack_cap];
    let mut parser = flatjson::Parser::init(&mut arena, &mut stack, &mut expecting_key);
    for chunk in input.chunks(chunk_size.max(1)) {
        assert!(parser.feed(chunk), "feed failed: {:?}", parser.error());
    }
    assert!(parser.finish(), "finish failed: {:?}", parser.error());
    parser.nodes().to_vec()
}

/// Feed `input` to a fresh parser and return the first error encountered,
/// either from `feed` or from `finish`. Panics if both succeed.
pub fn parse_err(input: &[u8]) -> ParserError {
    parse_err_with_cap(input, DEFAULT_NODE_CAP, DEFAULT_STACK_CAP)
}

pub fn parse_err_with_cap(input: &[u8], node_cap: usize, stack_cap: usize) -> ParserError {
    let mut arena = vec![Node::default(); node_cap];
    let mut stack = vec![0u32; stack_cap];
    let mut expecting_key = vec![false; stack_cap];
    let mut parser = flatjson::Parser::init(&mut arena, &mut stack, &mut expecting_key);
    if !parser.feed(input) {
        return parser.error().expect("a failed feed always latches an error");
    }
    if !parser.finish() {
        return parser.error().expect("a failed finish always latches an error");
    }
    panic!("expected a parse error but both feed and finish succeeded");
}
