#![no_main]
//! Fuzzes `flatjson::Parser` with a bounded-depth generated JSON document,
//! optionally corrupted, fed in randomly-sized chunks.
//!
//! Grounded in `cejson-fuzz.c`'s `generate_random_json` (an explicit,
//! depth-capped generation stack rather than naive recursion) and its
//! `fuzz_one` chunked re-feeding (1..127-byte chunks), using an
//! `arbitrary`-driven `fuzz_target!`/`Arbitrary` style.

use arbitrary::{Arbitrary, Unstructured};
use flatjson::{ErrorKind, Node, Parser};
use libfuzzer_sys::fuzz_target;

const ARENA_CAP: usize = 4096;
const STACK_CAP: usize = 256;
const MAX_GEN_DEPTH: u32 = 6;

#[derive(Debug, Clone, Copy, Arbitrary)]
enum Corruption {
    None,
    RandomByte { pos_frac: u8, byte: u8 },
    StrayQuote { pos_frac: u8 },
    StrayBrace { pos_frac: u8 },
    SwapAdjacent { pos_frac: u8 },
}

fn apply_corruption(buf: &mut Vec<u8>, corruption: Corruption) {
    if buf.is_empty() {
        return;
    }
    let pick = |frac: u8, len: usize| (frac as usize * (len - 1)) / 255;
    match corruption {
        Corruption::None => {}
        Corruption::RandomByte { pos_frac, byte } => {
            let pos = pick(pos_frac, buf.len());
            buf[pos] = byte;
        }
        Corruption::StrayQuote { pos_frac } => {
            let pos = pick(pos_frac, buf.len());
            buf[pos] = b'"';
        }
        Corruption::StrayBrace { pos_frac } => {
            let pos = pick(pos_frac, buf.len());
            buf[pos] = b'{';
        }
        Corruption::SwapAdjacent { pos_frac } => {
            let pos = pick(pos_frac, buf.len());
            if pos + 1 < buf.len() {
                buf.swap(pos, pos + 1);
            }
        }
    }
}

/// A bounded-depth JSON AST, generated with an explicit depth counter
/// instead of letting `arbitrary`'s own recursion run unbounded (mirroring
/// `cejson-fuzz.c`'s `GEN_STACK_CAP`-bounded generator).
#[derive(Debug)]
enum GenValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Array(Vec<GenValue>),
    Object(Vec<(String, GenValue)>),
}

impl GenValue {
    fn generate(u: &mut Unstructured<'_>, depth: u32) -> arbitrary::Result<Self> {
        let max_choice = if depth >= MAX_GEN_DEPTH { 4 } else { 6 };
        Ok(match u.int_in_range(0..=max_choice)? {
            0 => GenValue::Null,
            1 => GenValue::Bool(u.arbitrary()?),
            2 => GenValue::Int(u.arbitrary()?),
            3 => GenValue::Float(u.arbitrary()?),
            4 => GenValue::Str(sanitized_string(u)?),
            5 => {
                let n = u.int_in_range(0..=4)?;
                let mut elems = Vec::with_capacity(n);
                for _ in 0..n {
                    elems.push(Self::generate(u, depth + 1)?);
                }
                GenValue::Array(elems)
            }
            _ => {
                let n = u.int_in_range(0..=4)?;
                let mut pairs = Vec::with_capacity(n);
                for _ in 0..n {
                    pairs.push((sanitized_string(u)?, Self::generate(u, depth + 1)?));
                }
                GenValue::Object(pairs)
            }
        })
    }

    fn write_json(&self, out: &mut String) {
        match self {
            GenValue::Null => out.push_str("null"),
            GenValue::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            GenValue::Int(i) => out.push_str(&i.to_string()),
            GenValue::Float(f) => {
                if f.is_finite() {
                    out.push_str(&f.to_string());
                } else {
                    out.push('0');
                }
            }
            GenValue::Str(s) => {
                out.push('"');
                out.push_str(s);
                out.push('"');
            }
            GenValue::Array(elems) => {
                out.push('[');
                for (i, e) in elems.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    e.write_json(out);
                }
                out.push(']');
            }
            GenValue::Object(pairs) => {
                out.push('{');
                for (i, (k, v)) in pairs.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    out.push('"');
                    out.push_str(k);
                    out.push_str("\":");
                    v.write_json(out);
                }
                out.push('}');
            }
        }
    }
}

/// A short string built only from bytes that need no escaping, so the
/// generator mostly produces syntactically valid JSON for the corruption
/// step to then break.
fn sanitized_string(u: &mut Unstructured<'_>) -> arbitrary::Result<String> {
    let len = u.int_in_range(0..=8)?;
    let mut s = String::with_capacity(len);
    for _ in 0..len {
        let byte = u.int_in_range(b'a'..=b'z')?;
        s.push(byte as char);
    }
    Ok(s)
}

fn xorshift_next(state: &mut u64) -> u64 {
    let mut x = *state;
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    *state = x;
    x
}

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let Ok(corruption) = Corruption::arbitrary(&mut u) else {
        return;
    };
    let Ok(value) = GenValue::generate(&mut u, 0) else {
        return;
    };

    let mut text = String::new();
    value.write_json(&mut text);
    let mut bytes = text.into_bytes();
    apply_corruption(&mut bytes, corruption);

    let mut arena = vec![Node::default(); ARENA_CAP];
    let mut stack = vec![0u32; STACK_CAP];
    let mut expecting_key = vec![false; STACK_CAP];
    let mut parser = Parser::init(&mut arena, &mut stack, &mut expecting_key);

    let mut rng = (bytes.len() as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15) | 1;
    let mut offset = 0usize;
    while offset < bytes.len() {
        let chunk = 1 + (xorshift_next(&mut rng) as usize % 127);
        let end = (offset + chunk).min(bytes.len());
        if !parser.feed(&bytes[offset..end]) {
            // Unexpected/Incomplete/Capacity are all legitimate rejections
            // of a (possibly corrupted) document; only a panic here is a
            // real bug.
            let kind = parser.error().map(|e| e.kind);
            assert!(matches!(
                kind,
                Some(ErrorKind::Unexpected | ErrorKind::Incomplete | ErrorKind::Capacity)
            ));
            parser.debug_check_invariants();
            return;
        }
        offset = end;
    }
    let _ = parser.finish();
    parser.debug_check_invariants();
    assert!(parser.nodes().len() <= ARENA_CAP);
});
