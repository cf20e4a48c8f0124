//! Human-readable error rendering: a line number, a short context snippet,
//! and a caret under the offending byte.
//!
//! Grounded in `cejson.h`'s `poop()` debug-print routine, with one
//! deliberate departure: `poop()` writes straight to `stderr`, which is a
//! CLI concern; [`format_error`] instead returns a `String` so library
//! callers (and this crate's own tests) can inspect or log it however they
//! like.

use alloc::string::String;
use core::fmt::Write as _;

use crate::error::ParserError;

/// How many bytes of context to show on each side of the error position,
/// before truncating with an ellipsis.
const CONTEXT_RADIUS: usize = 24;

/// Render `error` against the document it was produced from: a line
/// number, a one-line snippet of `source` centered on the byte at fault,
/// and a caret pointing at it.
///
/// `source` should be the same bytes (or a superset reassembled from the
/// same chunks) that were fed to the parser; if `error.pos` is out of
/// bounds for `source` the snippet is simply omitted.
#[must_use]
pub fn format_error(source: &[u8], error: &ParserError) -> String {
    let mut out = String::new();
    let _ = write!(out, "{} at byte {} (line {})", error.kind, error.pos, error.line);

    let Some(&byte_at_pos) = source.get(error.pos) else {
        return out;
    };
    let _ = byte_at_pos;

    let line_start = source[..error.pos]
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |i| i + 1);
    let line_end = source[error.pos..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(source.len(), |i| error.pos + i);

    let snippet_start = error.pos.saturating_sub(CONTEXT_RADIUS).max(line_start);
    let snippet_end = (error.pos + CONTEXT_RADIUS).min(line_end);

    let prefix_truncated = snippet_start > line_start;
    let suffix_truncated = snippet_end < line_end;

    let _ = write!(out, "\n  ");
    if prefix_truncated {
        let _ = write!(out, "...");
    }
    let _ = write!(out, "{}", lossy_ascii(&source[snippet_start..snippet_end]));
    if suffix_truncated {
        let _ = write!(out, "...");
    }

    let caret_column = 2 + usize::from(prefix_truncated) * 3 + (error.pos - snippet_start);
    let _ = write!(out, "\n");
    for _ in 0..caret_column {
        let _ = write!(out, " ");
    }
    let _ = write!(out, "^");

    out
}

/// Render non-printable/non-ASCII bytes as `.` so the snippet stays on one
/// line and caret alignment stays byte-for-byte accurate (multi-byte UTF-8
/// rendering would desync the caret column from `source`'s byte offsets).
fn lossy_ascii(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len());
    for &b in bytes {
        if b.is_ascii_graphic() || b == b' ' {
            s.push(b as char);
        } else {
            s.push('.');
        }
    }
    s
}
