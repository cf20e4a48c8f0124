//! The flat node record and its two text representations.
//!
//! A [`Node`] is the single record type stored in the arena (see
//! [`crate::arena`]). Parsed nodes borrow their text from a caller-supplied
//! source buffer via `(offset, len)`; builder nodes own their text as a
//! heap-allocated string. See [`Text`].

use alloc::string::String;

/// The kind of value a [`Node`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// `null`.
    Null,
    /// `true`.
    True,
    /// `false`.
    False,
    /// A number with no `.` and no exponent.
    IntNumber,
    /// A number with a `.` and/or an exponent.
    FloatNumber,
    /// A string (object key or value).
    String,
    /// `[ ... ]`.
    Array,
    /// `{ ... }`.
    Object,
}

impl NodeKind {
    /// Whether this kind is [`NodeKind::Array`] or [`NodeKind::Object`].
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::Array | Self::Object)
    }
}

/// Where a node's textual content lives.
///
/// Parsed nodes never allocate: their text is a slice of whatever buffer
/// the caller passed to `feed`/the post-parse accessors. Builder nodes
/// always allocate: `create_int`/`create_float`/`create_string` compute a
/// canonical textual form up front and own it for the node's lifetime.
///
/// Modeled as an enum with two variants rather than an optional pointer
/// plus offset/len: the two representations cannot be confused at the
/// type level, and a parsed node's borrow is bounded by the lifetime of
/// the `source` slice passed to whichever call resolves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Text {
    /// Borrowed from the caller's buffer at `[offset, offset + len)`.
    Borrowed {
        /// Byte offset into the source buffer. For strings this is the
        /// first content byte, inside the quotes. For containers this is
        /// the opening brace/bracket.
        offset: u32,
    },
    /// Owned by this node, created by the [`crate::builder::Builder`].
    Owned(String),
}

impl Default for Text {
    fn default() -> Self {
        Self::Borrowed { offset: 0 }
    }
}

/// A single record in the node arena.
///
/// `skip` is dual-purpose: sibling-skip distance for containers, key hash
/// for object-key strings (see field docs below).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Node {
    pub(crate) kind: NodeKindSlot,
    /// Byte length of the value's text. For strings this excludes the
    /// surrounding quotes. For containers this is the span from opening
    /// to closing bracket inclusive, set when the container closes.
    pub(crate) len: u32,
    /// Direct-child count. For an object this counts keys and values
    /// individually: `children == 2 * pair_count`.
    pub(crate) children: u32,
    /// Sibling-skip distance (containers) or object-key hash (string
    /// keys); see [`crate::hash`].
    pub(crate) skip: u32,
    pub(crate) text: Text,
}

/// `NodeKind` with a cheap `Default` so `Node` itself can derive one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeKindSlot(pub(crate) NodeKind);

impl Default for NodeKindSlot {
    fn default() -> Self {
        Self(NodeKind::Null)
    }
}

impl Node {
    pub(crate) fn new(kind: NodeKind, offset: u32, len: u32) -> Self {
        Self {
            kind: NodeKindSlot(kind),
            len,
            children: 0,
            skip: 0,
            text: Text::Borrowed { offset },
        }
    }

    pub(crate) fn new_owned(kind: NodeKind, text: String) -> Self {
        let len = u32::try_from(text.len()).unwrap_or(u32::MAX);
        Self {
            kind: NodeKindSlot(kind),
            len,
            children: 0,
            skip: 0,
            text: Text::Owned(text),
        }
    }

    /// The node's kind.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        self.kind.0
    }

    /// Byte length of the value's text (see field docs on `len` above).
    #[must_use]
    pub const fn len(&self) -> u32 {
        self.len
    }

    /// Whether this node's text span is empty. Containers report
    /// `children == 0` here instead, since an empty `{}`/`[]` still has a
    /// non-zero `len` (it spans the brackets).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        if self.kind().is_container() {
            self.children == 0
        } else {
            self.len == 0
        }
    }

    /// Direct-child count (see field docs on `children` above).
    #[must_use]
    pub const fn children(&self) -> u32 {
        self.children
    }

    /// The dual-purpose `skip`/hash field, for callers that need direct
    /// access (most should prefer [`crate::arena::next_sibling`]).
    #[must_use]
    pub const fn skip_or_hash(&self) -> u32 {
        self.skip
    }

    /// Byte offset into the source buffer, for a parsed (borrowed) node.
    /// Returns `None` for builder (owned) nodes, where the offset is not
    /// meaningful.
    #[must_use]
    pub const fn offset(&self) -> Option<u32> {
        match self.text {
            Text::Borrowed { offset } => Some(offset),
            Text::Owned(_) => None,
        }
    }

    /// This node's text, resolved against `source` if the node is a
    /// parsed (borrowed) node, or its own owned bytes otherwise.
    ///
    /// `source` is ignored for owned nodes. Passing the wrong buffer for
    /// a borrowed node is a logic error the caller is responsible for
    /// avoiding: a parsed node is invalidated if the input buffer it
    /// points into is freed or mutated, and this function cannot detect
    /// that.
    #[must_use]
    pub fn text_bytes<'a>(&'a self, source: &'a [u8]) -> &'a [u8] {
        match &self.text {
            Text::Borrowed { offset } => {
                let start = *offset as usize;
                let end = start + self.len as usize;
                source.get(start..end).unwrap_or(&[])
            }
            Text::Owned(s) => s.as_bytes(),
        }
    }
}
