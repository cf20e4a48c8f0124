//! Property test for invariant 6: feeding a valid document under any
//! chunk partitioning produces byte-identical arena contents to feeding it
//! in one chunk.

#[path = "common.rs"]
mod common;

use common::{DEFAULT_NODE_CAP, DEFAULT_STACK_CAP, parse_ok};
use flatjson::Node;
use quickcheck::{Arbitrary, Gen, TestResult};
use quickcheck_macros::quickcheck;

/// A fixed corpus of valid documents; quickcheck only varies the
/// partitioning, since generating arbitrary *valid* JSON is a generator
/// problem of its own (covered by the fuzz harness instead).
const CORPUS: &[&str] = &[
    "null",
    "true",
    "false",
    "0",
    "-12.75e+3",
    r#""a short string with \"escapes\" and é""#,
    r#"{"a":1,"b":[2,3,{"c":null}],"d":"e"}"#,
    r#"[[],[[]],[{},{"x":[]}]]"#,
    r#"{"nested":{"deeper":{"deepest":[1,2,3,4,5]}}}"#,
];

/// A sequence of positive chunk lengths used to split a document; quickcheck
/// shrinks towards `[1]` (feed-size-one, the hardest case).
#[derive(Debug, Clone)]
struct Partition(Vec<usize>);

impl Arbitrary for Partition {
    fn arbitrary(g: &mut Gen) -> Self {
        let lens = (0..20).map(|_| 1 + usize::arbitrary(g) % 7).collect();
        Partition(lens)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let lens = self.0.clone();
        Box::new((0..lens.len()).rev().map(move |i| {
            let mut shorter = lens.clone();
            shorter.remove(i);
            Partition(shorter)
        }))
    }
}

fn feed_by_partition(input: &[u8], partition: &Partition) -> Vec<Node> {
    let mut arena = vec![Node::default(); DEFAULT_NODE_CAP];
    let mut stack = vec![0u32; DEFAULT_STACK_CAP];
    let mut expecting_key = vec![false; DEFAULT_STACK_CAP];
    let mut parser = flatjson::Parser::init(&mut arena, &mut stack, &mut expecting_key);

    let mut offset = 0;
    let mut lens = partition.0.iter().copied().cycle();
    while offset < input.len() {
        let len = lens.next().unwrap_or(1).min(input.len() - offset);
        assert!(parser.feed(&input[offset..offset + len]), "feed failed: {:?}", parser.error());
        offset += len;
    }
    assert!(parser.finish(), "finish failed: {:?}", parser.error());
    parser.nodes().to_vec()
}

#[quickcheck]
fn chunk_partitioning_does_not_change_parsed_output(index: usize, partition: Partition) -> TestResult {
    if partition.0.is_empty() {
        return TestResult::discard();
    }
    let src = CORPUS[index % CORPUS.len()].as_bytes();
    let whole = parse_ok(src);
    let partitioned = feed_by_partition(src, &partition);
    TestResult::from_bool(whole == partitioned)
}
