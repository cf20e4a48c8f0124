//! Error reporting for the parser.
//!
//! The parser never returns a `Result` from its hot path (see
//! [`crate::parser::Parser::feed`]); instead it latches a [`ParserError`]
//! the first time something goes wrong and becomes a no-op afterward. This
//! module defines the three taxonomic error kinds and their user-facing
//! messages.

use thiserror::Error;

/// The three taxonomic kinds of parse failure.
///
/// Every failure the parser can report is one of these; none carry
/// context beyond what [`ParserError`] already tracks (byte position,
/// line number), because richer diagnostics (a context snippet, the state
/// name) are the responsibility of [`crate::diagnostic`], not the parse
/// path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// A byte was seen that is not valid in the parser's current state:
    /// a wrong punctuator, an invalid escape, a malformed number shape at
    /// close, a container close after a key with no value, a mismatched
    /// bracket, or a stray byte after a value.
    #[error("unexpected byte")]
    Unexpected,
    /// `finish` was called while the container stack was non-empty, while
    /// still inside a string or literal, or before any node had completed.
    #[error("unexpected end of input")]
    Incomplete,
    /// The node arena or the container stack is full.
    #[error("capacity exceeded")]
    Capacity,
}

/// A latched parse error: a [`ErrorKind`] plus the absolute byte offset
/// and 1-based line number at which it was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind} at byte {pos} (line {line})")]
pub struct ParserError {
    /// Which of the three taxonomic kinds this is.
    pub kind: ErrorKind,
    /// Absolute byte offset from the start of the document.
    pub pos: usize,
    /// 1-based line number, for diagnostics only.
    pub line: usize,
}

impl ParserError {
    pub(crate) const fn new(kind: ErrorKind, pos: usize, line: usize) -> Self {
        Self { kind, pos, line }
    }
}

/// Error returned by [`crate::builder::Builder`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BuilderError {
    /// The node arena is full.
    #[error("node arena is at capacity")]
    Capacity,
    /// `close_container` was called with no open container on the stack.
    #[error("no open container to close")]
    NoOpenContainer,
    /// An operation that requires an open array (`array_append`) or
    /// object (`object_set`) was given a node of the wrong kind.
    #[error("node is not a container of the expected kind")]
    WrongKind,
}

