//! Re-emits canonical JSON text from a node arena.
//!
//! [`serialize`] walks the arena starting at any node index — not just the
//! root — using only [`crate::arena::next_sibling`] to step from a key's
//! value to the next key, so a nested subtree is skipped in O(1) rather
//! than walked. Ported from `json_dump_node`/`json_dump_node_buf` in
//! `cejson.h`, with one correction: that reference's object loop counts
//! `node.children` as pair-count and iterates `i < children`, which would
//! under-iterate against this crate's `children == 2 * pair_count`
//! convention (see [`crate::node::Node`]) — here the loop bound is
//! `children / 2` pairs instead.

use core::fmt;

use crate::arena;
use crate::buffer::OutputBuffer;
use crate::node::{Node, NodeKind};

/// Two-space indentation, newlines between elements. Compact mode emits
/// nothing but the tokens themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// No extra whitespace at all.
    Compact,
    /// Two-space indentation with a newline after every element/pair.
    Pretty,
}

/// Emit the subtree rooted at `nodes[index]` as JSON text into `out`.
///
/// `source` resolves any parsed (borrowed) node's text; it is ignored for
/// builder (owned) nodes. Returns `false` if `out` runs out of room (a
/// fixed-capacity [`OutputBuffer`]) partway through — `out` is left with
/// whatever was written before the failure, which is not valid JSON.
pub fn serialize(
    nodes: &[Node],
    source: &[u8],
    index: usize,
    out: &mut OutputBuffer<'_>,
    style: Style,
) -> bool {
    write_node(nodes, source, index, out, style, 0)
}

fn write_node(
    nodes: &[Node],
    source: &[u8],
    index: usize,
    out: &mut OutputBuffer<'_>,
    style: Style,
    indent: usize,
) -> bool {
    let Some(node) = nodes.get(index) else {
        return out.append_bytes(b"null");
    };
    match node.kind() {
        NodeKind::Null => out.append_bytes(b"null"),
        NodeKind::True => out.append_bytes(b"true"),
        NodeKind::False => out.append_bytes(b"false"),
        NodeKind::IntNumber | NodeKind::FloatNumber => out.append_bytes(node.text_bytes(source)),
        NodeKind::String => write_escaped(out, node.text_bytes(source)),
        NodeKind::Array => write_array(nodes, source, index, out, style, indent),
        NodeKind::Object => write_object(nodes, source, index, out, style, indent),
    }
}

fn write_array(
    nodes: &[Node],
    source: &[u8],
    index: usize,
    out: &mut OutputBuffer<'_>,
    style: Style,
    indent: usize,
) -> bool {
    let count = nodes[index].children();
    if count == 0 {
        return out.append_bytes(b"[]");
    }
    if !out.append_u8(b'[') {
        return false;
    }
    if style == Style::Pretty && !out.append_u8(b'\n') {
        return false;
    }

    let Some(mut child) = arena::first_child(nodes, index) else {
        return false;
    };
    for i in 0..count {
        if style == Style::Pretty && !write_indent(out, indent + 2) {
            return false;
        }
        if !write_node(nodes, source, child, out, style, indent + 2) {
            return false;
        }
        if i + 1 < count {
            if !write_separator(out, style) {
                return false;
            }
            let Some(next) = arena::next_sibling(nodes, child) else {
                return false;
            };
            child = next;
        }
    }
    if style == Style::Pretty && (!out.append_u8(b'\n') || !write_indent(out, indent)) {
        return false;
    }
    out.append_u8(b']')
}

fn write_object(
    nodes: &[Node],
    source: &[u8],
    index: usize,
    out: &mut OutputBuffer<'_>,
    style: Style,
    indent: usize,
) -> bool {
    let pairs = nodes[index].children() / 2;
    if pairs == 0 {
        return out.append_bytes(b"{}");
    }
    if !out.append_u8(b'{') {
        return false;
    }
    if style == Style::Pretty && !out.append_u8(b'\n') {
        return false;
    }

    let Some(mut key_index) = arena::first_child(nodes, index) else {
        return false;
    };
    for i in 0..pairs {
        let Some(value_index) = arena::next_sibling(nodes, key_index) else {
            return false;
        };
        if style == Style::Pretty && !write_indent(out, indent + 2) {
            return false;
        }
        if !write_escaped(out, nodes[key_index].text_bytes(source)) {
            return false;
        }
        let colon_ok = if style == Style::Pretty {
            out.append_bytes(b": ")
        } else {
            out.append_u8(b':')
        };
        if !colon_ok {
            return false;
        }
        if !write_node(nodes, source, value_index, out, style, indent + 2) {
            return false;
        }
        if i + 1 < pairs {
            if !write_separator(out, style) {
                return false;
            }
            let Some(next_key) = arena::next_sibling(nodes, value_index) else {
                return false;
            };
            key_index = next_key;
        }
    }
    if style == Style::Pretty && (!out.append_u8(b'\n') || !write_indent(out, indent)) {
        return false;
    }
    out.append_u8(b'}')
}

fn write_separator(out: &mut OutputBuffer<'_>, style: Style) -> bool {
    if !out.append_u8(b',') {
        return false;
    }
    if style == Style::Pretty { out.append_u8(b'\n') } else { true }
}

fn write_indent(out: &mut OutputBuffer<'_>, width: usize) -> bool {
    for _ in 0..width {
        if !out.append_u8(b' ') {
            return false;
        }
    }
    true
}

fn write_escaped(out: &mut OutputBuffer<'_>, bytes: &[u8]) -> bool {
    if !out.append_u8(b'"') {
        return false;
    }
    for &byte in bytes {
        let ok = match byte {
            b'"' => out.append_bytes(b"\\\""),
            b'\\' => out.append_bytes(b"\\\\"),
            0x08 => out.append_bytes(b"\\b"),
            0x0c => out.append_bytes(b"\\f"),
            b'\n' => out.append_bytes(b"\\n"),
            b'\r' => out.append_bytes(b"\\r"),
            b'\t' => out.append_bytes(b"\\t"),
            b if b < 0x20 => out.append_fmt(format_args!("\\u{byte:04x}")),
            b => out.append_u8(b),
        };
        if !ok {
            return false;
        }
    }
    out.append_u8(b'"')
}

/// [`serialize`]'s sibling for a plain `core::fmt::Write` sink (e.g. a
/// caller's own string type), used by [`crate::diagnostic`] and anywhere
/// an [`OutputBuffer`] would be overkill. Unlike `serialize` this cannot
/// report a mid-write failure distinctly from any other formatting error.
pub fn serialize_to_fmt<W: fmt::Write>(
    nodes: &[Node],
    source: &[u8],
    index: usize,
    sink: &mut W,
    style: Style,
) -> fmt::Result {
    let mut buf = OutputBuffer::init_with_capacity(256);
    if serialize(nodes, source, index, &mut buf, style) {
        sink.write_str(core::str::from_utf8(buf.data()).unwrap_or(""))
    } else {
        Err(fmt::Error)
    }
}

#[cfg(feature = "std")]
/// Serialize straight to a `std::io::Write` sink (e.g. stdout), for the
/// CLI driver's `dump(sink, pretty)` surface.
pub fn dump<W: std::io::Write>(
    nodes: &[Node],
    source: &[u8],
    index: usize,
    sink: &mut W,
    style: Style,
) -> std::io::Result<()> {
    let mut buf = OutputBuffer::init_with_capacity(4096);
    if serialize(nodes, source, index, &mut buf, style) {
        sink.write_all(buf.data())
    } else {
        Err(std::io::Error::other(
            "serialization buffer exceeded its capacity",
        ))
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;
    use crate::parser::Parser;

    fn serialized(src: &[u8], style: Style) -> String {
        let mut arena = vec![Node::default(); 256];
        let mut stack = vec![0u32; 64];
        let mut expecting_key = vec![false; 64];
        let mut p = Parser::init(&mut arena, &mut stack, &mut expecting_key);
        assert!(p.feed(src));
        assert!(p.finish());
        let mut buf = OutputBuffer::init_with_capacity(256);
        assert!(serialize(p.nodes(), src, 0, &mut buf, style));
        String::from_utf8(buf.data().to_vec() as Vec<u8>).unwrap()
    }

    #[test]
    fn compact_round_trips_scalars() {
        assert_eq!(serialized(b"42", Style::Compact), "42");
        assert_eq!(serialized(b"true", Style::Compact), "true");
        assert_eq!(serialized(b"\"hi\"", Style::Compact), "\"hi\"");
    }

    #[test]
    fn compact_object_and_array() {
        let src = br#"{"a":1,"b":[true,null]}"#;
        assert_eq!(serialized(src, Style::Compact), r#"{"a":1,"b":[true,null]}"#);
    }

    #[test]
    fn escapes_control_bytes_and_named_escapes() {
        let src = b"\"a\\nb\\tc\"";
        assert_eq!(serialized(src, Style::Compact), "\"a\\nb\\tc\"");
    }

    #[test]
    fn pretty_indents_nested_structure() {
        let src = br#"{"a":[1,2]}"#;
        let out = serialized(src, Style::Pretty);
        assert_eq!(out, "{\n  \"a\": [\n    1,\n    2\n  ]\n}");
    }

    #[test]
    fn empty_containers_stay_on_one_line_in_pretty_mode() {
        assert_eq!(serialized(b"{}", Style::Pretty), "{}");
        assert_eq!(serialized(b"[]", Style::Pretty), "[]");
    }
}
