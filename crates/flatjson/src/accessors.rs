//! Coercions from a node's text slice to a Rust scalar.
//!
//! These never re-walk the arena; they only interpret a single node's
//! already-resolved [`Node::text_bytes`]. Grounded in `cejson.h`'s
//! `json_get_int`/`json_get_double`/`json_get_bool`/`json_get_string`,
//! adapted to return `Option`/a copied length instead of an out-parameter
//! plus boolean success flag.

use crate::node::{Node, NodeKind};

/// Parse `node`'s text as a base-10 `i64`. `None` if the node is not a
/// number, or if any byte of its text is left over after parsing (e.g. a
/// `FloatNumber` like `1.5`).
#[must_use]
pub fn as_i64(node: &Node, source: &[u8]) -> Option<i64> {
    if !matches!(node.kind(), NodeKind::IntNumber | NodeKind::FloatNumber) {
        return None;
    }
    core::str::from_utf8(node.text_bytes(source)).ok()?.parse().ok()
}

/// Parse `node`'s text as an `f64`. `None` if the node is not a number, or
/// if any byte is left over after parsing.
#[must_use]
pub fn as_f64(node: &Node, source: &[u8]) -> Option<f64> {
    if !matches!(node.kind(), NodeKind::IntNumber | NodeKind::FloatNumber) {
        return None;
    }
    core::str::from_utf8(node.text_bytes(source)).ok()?.parse().ok()
}

/// Whether `node` is the `true` literal. `false` for `False` and every
/// other kind — this is not a truthiness coercion.
#[must_use]
pub fn as_bool(node: &Node) -> bool {
    node.kind() == NodeKind::True
}

/// Copy up to `out.len() - 1` bytes of `node`'s text into `out` and
/// null-terminate, mirroring `cejson.h`'s `json_get_string` C-string
/// contract. No unescaping: bytes are copied verbatim, exactly as
/// `node.text_bytes` returns them. Returns the number of content bytes
/// written (excluding the terminator). Writes nothing and returns 0 if
/// `out` is empty.
pub fn str_copy(node: &Node, source: &[u8], out: &mut [u8]) -> usize {
    if out.is_empty() {
        return 0;
    }
    let text = node.text_bytes(source);
    let n = text.len().min(out.len() - 1);
    out[..n].copy_from_slice(&text[..n]);
    out[n] = 0;
    n
}
