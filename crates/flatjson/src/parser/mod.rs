//! The resumable, byte-at-a-time parsing state machine.
//!
//! [`Parser`] is fed arbitrarily-sized byte chunks via [`Parser::feed`] and
//! writes nodes into a caller-supplied arena, as described in
//! [`crate::node`] and navigated via [`crate::arena`]. It never allocates
//! on the hot path: the node arena, container stack, and expecting-key
//! flags are all caller-owned slices sized once at [`Parser::init`] and
//! never grown — exceeding either capacity is a reported [`ErrorKind::Capacity`]
//! error, not a reallocation. State that must survive a chunk boundary — a
//! half-read escape, an in-progress number, how much of `false` has
//! matched — lives in `Parser`'s own fields rather than on a call stack,
//! so `feed` can return after any byte and resume correctly on the next
//! call.
//!
//! Ported from the `PS_*`/`feed` state machine in `cejson.h`, with two
//! deliberate departures documented where they occur: whitespace is only
//! ever skipped in [`State::Normal`]/[`State::AfterValue`] (never between a
//! key and its colon), and a value immediately following an object key
//! contributes to its parent's `children` count the same as the key does
//! (`children == 2 * pair_count`), which required dropping a `children++`
//! condition the reference narrows to value strings only.

mod number;

use alloc::vec;
use alloc::vec::Vec;

use crate::error::{ErrorKind, ParserError};
use crate::literal::{ExpectedLiteral, Step};
use crate::node::{Node, NodeKind, Text};
use crate::{escape::UnicodeEscapeDigits, hash};
use number::{NumAction, NumberState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Normal,
    AfterValue,
    ExpectColon,
    InString,
    InNumber,
    InLiteral,
}

/// A resumable, zero-copy streaming JSON parser over a caller-owned arena.
///
/// Construct with [`Parser::init`], feed it input with [`Parser::feed`],
/// and call [`Parser::finish`] once the input is exhausted. After either
/// returns `false`, [`Parser::error`] reports why and every subsequent
/// call is a no-op.
pub struct Parser<'a> {
    nodes: &'a mut [Node],
    nodes_len: usize,
    stack: &'a mut [u32],
    stack_len: usize,
    expecting_key: &'a mut [bool],
    /// Tracks, per open-container depth, whether no element has been
    /// written yet — i.e. whether an immediate close is an empty
    /// container rather than a trailing comma. Not part of the
    /// caller-supplied arena/stack/expecting-key triple, since rejecting
    /// trailing commas needs no caller-visible capacity of its own; kept
    /// as a small internally-owned buffer sized once at `init`.
    at_container_start: Vec<bool>,

    consumed: usize,
    line: usize,
    state: State,
    error: Option<ParserError>,

    pending_offset: usize,
    pending_len: u32,
    pending_hash: u32,
    is_key_string: bool,
    pending_value: bool,
    in_escape: bool,
    in_uni_escape: bool,
    uni_escape: UnicodeEscapeDigits,
    expected_literal: ExpectedLiteral,
    number: NumberState,
}

impl<'a> Parser<'a> {
    /// Borrow a node arena, a container-nesting stack, and a same-length
    /// "expecting key" flag buffer. All three are hard-capacity: exceeding
    /// `arena.len()` or `stack.len()` latches [`ErrorKind::Capacity`]
    /// instead of growing.
    ///
    /// `stack` and `expecting_key` must have equal length: one flag per
    /// possible nesting depth.
    #[must_use]
    pub fn init(arena: &'a mut [Node], stack: &'a mut [u32], expecting_key: &'a mut [bool]) -> Self {
        debug_assert_eq!(stack.len(), expecting_key.len());
        let depth_capacity = stack.len();
        Self {
            nodes: arena,
            nodes_len: 0,
            stack,
            stack_len: 0,
            expecting_key,
            at_container_start: vec![false; depth_capacity],
            consumed: 0,
            line: 1,
            state: State::Normal,
            error: None,
            pending_offset: 0,
            pending_len: 0,
            pending_hash: 0,
            is_key_string: false,
            pending_value: false,
            in_escape: false,
            in_uni_escape: false,
            uni_escape: UnicodeEscapeDigits::new(),
            expected_literal: ExpectedLiteral::none(),
            number: NumberState::default(),
        }
    }

    /// The arena built so far. Stable and append-only: indices already
    /// handed out never move or change meaning, even mid-parse.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes[..self.nodes_len]
    }

    /// The latched error, if `feed` or `finish` has returned `false`.
    #[must_use]
    pub fn error(&self) -> Option<ParserError> {
        self.error
    }

    /// 1-based line number of the most recently consumed byte, counting
    /// only `\n` (diagnostic use only; a `\r\n` document is not
    /// double-counted, unlike the reference this is ported from).
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Total bytes accepted across every `feed` call so far.
    #[must_use]
    pub const fn bytes_consumed(&self) -> usize {
        self.consumed
    }

    /// Assert this parser's internal bookkeeping is still consistent:
    /// never more nodes/stack entries than capacity, and every stack entry
    /// indexes a node that actually exists. Exposed for the fuzz harness
    /// and internal tests.
    #[cfg(any(test, feature = "fuzzing"))]
    pub fn debug_check_invariants(&self) {
        assert!(self.nodes_len <= self.nodes.len());
        assert!(self.stack_len <= self.stack.len());
        for &idx in &self.stack[..self.stack_len] {
            assert!((idx as usize) < self.nodes_len);
        }
    }

    /// Feed the next chunk of input. Returns `false` the moment a byte is
    /// rejected (see [`Self::error`]) or if an error was already latched;
    /// otherwise consumes every byte in `bytes`.
    pub fn feed(&mut self, bytes: &[u8]) -> bool {
        if self.error.is_some() {
            return false;
        }
        let mut pos = 0usize;
        while pos < bytes.len() {
            if matches!(self.state, State::Normal | State::AfterValue) {
                while pos < bytes.len() && is_json_whitespace(bytes[pos]) {
                    if bytes[pos] == b'\n' {
                        self.line += 1;
                    }
                    pos += 1;
                }
                if pos >= bytes.len() {
                    break;
                }
            }

            let byte = bytes[pos];
            let abs_pos = self.consumed + pos;

            let ok = match self.state {
                State::ExpectColon => self.step_expect_colon(byte, abs_pos, &mut pos),
                State::InLiteral => self.step_literal(byte, abs_pos, &mut pos),
                State::InString => self.step_string(bytes, &mut pos),
                State::InNumber => self.step_number(byte, abs_pos, &mut pos),
                State::Normal | State::AfterValue => self.step_structural(byte, abs_pos, &mut pos),
            };
            if !ok {
                self.consumed += pos;
                return false;
            }
        }
        self.consumed += pos;
        true
    }

    /// Signal end of input. Returns `false` if an error was already
    /// latched, the container stack is non-empty, a string/literal is
    /// mid-flight, or zero nodes were ever completed.
    pub fn finish(&mut self) -> bool {
        if self.error.is_some() {
            return false;
        }
        if self.stack_len != 0 {
            return self.fail(ErrorKind::Incomplete, self.consumed);
        }
        match self.state {
            State::InNumber => {
                if !self.close_number(self.consumed) {
                    return false;
                }
            }
            State::InString | State::InLiteral | State::ExpectColon => {
                return self.fail(ErrorKind::Incomplete, self.consumed);
            }
            State::Normal | State::AfterValue => {}
        }
        if self.nodes_len == 0 {
            return self.fail(ErrorKind::Incomplete, self.consumed);
        }
        true
    }

    fn fail(&mut self, kind: ErrorKind, abs_pos: usize) -> bool {
        self.error = Some(ParserError::new(kind, abs_pos, self.line));
        false
    }

    /// Append a completed node, charging it against the arena capacity and
    /// (if it has a parent) bumping the parent's `children` and, for a
    /// scalar value that directly follows an object key, inheriting that
    /// key's hash into its own `skip` slot. Returns the new node's index.
    fn push_node(&mut self, node: Node, is_key: bool, abs_pos: usize) -> Option<usize> {
        if self.nodes_len >= self.nodes.len() {
            self.fail(ErrorKind::Capacity, abs_pos);
            return None;
        }
        let idx = self.nodes_len;
        self.nodes[idx] = node;
        self.nodes_len += 1;
        if self.stack_len > 0 {
            let parent_idx = self.stack[self.stack_len - 1] as usize;
            self.nodes[parent_idx].children += 1;
            if !is_key
                && idx > 0
                && self.nodes[parent_idx].kind() == NodeKind::Object
                && self.nodes[idx - 1].kind() == NodeKind::String
            {
                let inherited = self.nodes[idx - 1].skip;
                self.nodes[idx].skip = inherited;
            }
        }
        Some(idx)
    }

    fn step_expect_colon(&mut self, byte: u8, abs_pos: usize, pos: &mut usize) -> bool {
        if byte != b':' {
            return self.fail(ErrorKind::Unexpected, abs_pos);
        }
        if self.stack_len > 0 {
            self.expecting_key[self.stack_len - 1] = false;
        }
        self.state = State::Normal;
        *pos += 1;
        true
    }

    fn step_literal(&mut self, byte: u8, abs_pos: usize, pos: &mut usize) -> bool {
        match self.expected_literal.step(byte) {
            Step::Reject => self.fail(ErrorKind::Unexpected, abs_pos),
            Step::NeedMore => {
                *pos += 1;
                true
            }
            Step::Done(kind) => {
                *pos += 1;
                let offset = u32::try_from(self.pending_offset).unwrap_or(u32::MAX);
                let len = u32::try_from(abs_pos + 1 - self.pending_offset).unwrap_or(u32::MAX);
                let node = Node::new(kind, offset, len);
                if self.push_node(node, false, abs_pos).is_none() {
                    return false;
                }
                self.state = State::AfterValue;
                true
            }
        }
    }

    fn step_number(&mut self, byte: u8, abs_pos: usize, pos: &mut usize) -> bool {
        match self.number.step(byte) {
            NumAction::Consumed => {
                *pos += 1;
                true
            }
            NumAction::Ends => self.close_number(abs_pos),
        }
    }

    fn close_number(&mut self, abs_pos: usize) -> bool {
        if !self.number.is_valid() {
            return self.fail(ErrorKind::Unexpected, abs_pos);
        }
        let offset = u32::try_from(self.pending_offset).unwrap_or(u32::MAX);
        let node = Node::new(self.number.kind(), offset, self.number.len);
        if self.push_node(node, false, abs_pos).is_none() {
            return false;
        }
        self.state = State::AfterValue;
        true
    }

    fn step_string(&mut self, bytes: &[u8], pos: &mut usize) -> bool {
        let byte = bytes[*pos];
        let abs_pos = self.consumed + *pos;

        if self.in_uni_escape {
            if !byte.is_ascii_hexdigit() {
                return self.fail(ErrorKind::Unexpected, abs_pos);
            }
            if self.uni_escape.feed_hex_digit() {
                self.in_uni_escape = false;
            }
            self.pending_len += 1;
            *pos += 1;
            return true;
        }

        if self.in_escape {
            self.in_escape = false;
            match byte {
                b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't' => {}
                b'u' => {
                    self.in_uni_escape = true;
                    self.uni_escape.reset();
                }
                _ => return self.fail(ErrorKind::Unexpected, abs_pos),
            }
            self.pending_len += 1;
            *pos += 1;
            return true;
        }

        if byte == b'\\' {
            self.in_escape = true;
            self.pending_len += 1;
            *pos += 1;
            return true;
        }

        if byte == b'"' {
            let is_key = self.is_key_string;
            let offset = u32::try_from(self.pending_offset).unwrap_or(u32::MAX);
            let mut node = Node::new(NodeKind::String, offset, self.pending_len);
            if is_key {
                node.skip = self.pending_hash;
            }
            if self.push_node(node, is_key, abs_pos).is_none() {
                return false;
            }
            *pos += 1;
            if is_key {
                self.state = State::ExpectColon;
                self.pending_value = true;
            } else {
                self.state = State::AfterValue;
            }
            return true;
        }

        self.pending_len += 1;
        if self.is_key_string {
            self.pending_hash = hash::step(self.pending_hash, byte);
        }
        *pos += 1;
        true
    }

    fn step_structural(&mut self, byte: u8, abs_pos: usize, pos: &mut usize) -> bool {
        if self.stack_len > 0 {
            let top_idx = self.stack[self.stack_len - 1] as usize;
            let top_kind = self.nodes[top_idx].kind();
            let is_close_byte = (byte == b'}' && top_kind == NodeKind::Object)
                || (byte == b']' && top_kind == NodeKind::Array);
            if is_close_byte {
                let may_close = self.state == State::AfterValue
                    || self.at_container_start[self.stack_len - 1];
                if !may_close || self.pending_value {
                    return self.fail(ErrorKind::Unexpected, abs_pos);
                }
                self.close_container(top_idx, abs_pos);
                *pos += 1;
                return true;
            }
        }

        if self.state == State::AfterValue {
            if byte == b',' {
                self.state = State::Normal;
                *pos += 1;
                if self.stack_len > 0 {
                    let top_idx = self.stack[self.stack_len - 1] as usize;
                    if self.nodes[top_idx].kind() == NodeKind::Object {
                        self.expecting_key[self.stack_len - 1] = true;
                    }
                    self.at_container_start[self.stack_len - 1] = false;
                }
                return true;
            }
            return self.fail(ErrorKind::Unexpected, abs_pos);
        }

        // State::Normal: either a key (if the innermost container is an
        // object awaiting one) or a value is expected next.
        if self.stack_len > 0 {
            self.at_container_start[self.stack_len - 1] = false;
        }
        let expecting_key = self.stack_len > 0 && self.expecting_key[self.stack_len - 1];

        if expecting_key {
            if byte != b'"' {
                return self.fail(ErrorKind::Unexpected, abs_pos);
            }
            self.begin_string(abs_pos, true);
            *pos += 1;
            return true;
        }

        self.pending_value = false;

        match byte {
            b'"' => {
                self.begin_string(abs_pos, false);
                *pos += 1;
            }
            b'{' => {
                if !self.open_container(NodeKind::Object, abs_pos) {
                    return false;
                }
                *pos += 1;
            }
            b'[' => {
                if !self.open_container(NodeKind::Array, abs_pos) {
                    return false;
                }
                *pos += 1;
            }
            b'-' | b'0'..=b'9' => {
                self.number = NumberState::start(byte);
                self.pending_offset = abs_pos;
                self.state = State::InNumber;
                *pos += 1;
            }
            b't' | b'f' | b'n' => {
                let Some(lit) = ExpectedLiteral::start(byte) else {
                    unreachable!("t/f/n always start a literal")
                };
                self.expected_literal = lit;
                self.pending_offset = abs_pos;
                self.state = State::InLiteral;
                *pos += 1;
            }
            _ => return self.fail(ErrorKind::Unexpected, abs_pos),
        }
        true
    }

    fn begin_string(&mut self, abs_pos: usize, is_key: bool) {
        self.state = State::InString;
        self.is_key_string = is_key;
        self.pending_offset = abs_pos + 1;
        self.pending_len = 0;
        self.pending_hash = 0;
        self.in_escape = false;
        self.in_uni_escape = false;
        self.uni_escape.reset();
    }

    fn open_container(&mut self, kind: NodeKind, abs_pos: usize) -> bool {
        if self.stack_len >= self.stack.len() {
            return self.fail(ErrorKind::Capacity, abs_pos);
        }
        let offset = u32::try_from(abs_pos).unwrap_or(u32::MAX);
        let node = Node::new(kind, offset, 0);
        let Some(idx) = self.push_node(node, false, abs_pos) else {
            return false;
        };
        self.stack[self.stack_len] = idx as u32;
        self.expecting_key[self.stack_len] = kind == NodeKind::Object;
        self.at_container_start[self.stack_len] = true;
        self.stack_len += 1;
        self.state = State::Normal;
        true
    }

    fn close_container(&mut self, idx: usize, abs_pos: usize) {
        self.stack_len -= 1;
        let open_offset = match self.nodes[idx].text {
            Text::Borrowed { offset } => offset as usize,
            Text::Owned(_) => 0,
        };
        let span = abs_pos + 1 - open_offset;
        self.nodes[idx].len = u32::try_from(span).unwrap_or(u32::MAX);
        let skip = (self.nodes_len - idx - 1) as u32;
        self.nodes[idx].skip = skip;
        self.state = State::AfterValue;
    }
}

const fn is_json_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}
