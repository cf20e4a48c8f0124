#![allow(missing_docs)]
//! Benchmark – `flatjson::Parser`

use std::time::Duration;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use flatjson::{Node, Parser};

/// Produce a deterministic JSON document whose textual representation is
/// exactly `target_len` bytes, so every benchmark scenario runs over the
/// same amount of data:
///
/// `{"data":"aaaa…"}`
fn make_json_payload(target_len: usize) -> String {
    let overhead = "{\"data\":\"\"}".len();
    assert!(target_len >= overhead, "target_len must be >= {overhead}");

    let content_len = target_len - overhead;
    let mut s = String::with_capacity(target_len);
    s.push_str("{\"data\":\"");
    s.extend(std::iter::repeat_n('a', content_len));
    s.push_str("\"}");
    debug_assert_eq!(s.len(), target_len);
    s
}

/// Feed `payload` to a fresh [`Parser`] in `parts` chunks and return the
/// number of nodes produced, so Criterion has something to black-box (and
/// the compiler can't optimize the parse away).
fn run_streaming_parser(payload: &str, parts: usize, arena: &mut [Node], stack: &mut [u32], expecting_key: &mut [bool]) -> usize {
    assert!(parts > 0);
    let chunk_size = payload.len().div_ceil(parts);

    let mut parser = Parser::init(arena, stack, expecting_key);
    for chunk in payload.as_bytes().chunks(chunk_size) {
        assert!(parser.feed(chunk), "feed failed: {:?}", parser.error());
    }
    assert!(parser.finish(), "finish failed: {:?}", parser.error());
    parser.nodes().len()
}

fn bench_streaming_parser(c: &mut Criterion) {
    let payload = make_json_payload(10_000);

    let mut group = c.benchmark_group("streaming_parser_split");
    group.measurement_time(Duration::from_secs(10));
    group.warm_up_time(Duration::from_secs(5));

    for &parts in &[100usize, 1_000, 5_000] {
        group.bench_with_input(BenchmarkId::from_parameter(parts), &parts, |b, &p| {
            b.iter(|| {
                let mut arena = vec![Node::default(); 8];
                let mut stack = vec![0u32; 8];
                let mut expecting_key = vec![false; 8];
                let count = run_streaming_parser(
                    black_box(&payload),
                    p,
                    &mut arena,
                    &mut stack,
                    &mut expecting_key,
                );
                black_box(count);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_streaming_parser);
criterion_main!(benches);
