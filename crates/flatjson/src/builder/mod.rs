//! Programmatic node construction: builds the same flat arena the parser
//! produces, without parsing any text.
//!
//! A [`Builder`] mirrors [`crate::parser::Parser`]'s append-only arena and
//! container-stack shape, but trades the parser's forced left-to-right
//! token order for explicit wiring: `create_*` appends a node (allocating
//! its own owned text for numbers/strings), and [`Builder::array_append`]/
//! [`Builder::object_set`] are separate calls that record it as a child of
//! whichever container is currently open. Every created child must land
//! contiguously in the arena, immediately after the container or the
//! previous child — the same flat-subtree assumption [`crate::arena`]'s
//! navigation functions rely on — so a container's elements must be
//! created and attached in order before its sibling is started.

use alloc::format;
use alloc::string::String;

use crate::error::BuilderError;
use crate::hash::hash_key;
use crate::node::{Node, NodeKind, Text};

/// Builds a node arena by hand instead of by parsing bytes.
///
/// Construct with [`Builder::init`], borrowing a node arena and a
/// container-nesting stack with the same hard-capacity contract as
/// [`crate::parser::Parser`]: exceeding either returns
/// [`BuilderError::Capacity`] rather than growing.
pub struct Builder<'a> {
    nodes: &'a mut [Node],
    nodes_len: usize,
    stack: &'a mut [u32],
    stack_len: usize,
}

impl<'a> Builder<'a> {
    /// Borrow a node arena and a container-nesting stack.
    #[must_use]
    pub fn init(arena: &'a mut [Node], stack: &'a mut [u32]) -> Self {
        Self {
            nodes: arena,
            nodes_len: 0,
            stack,
            stack_len: 0,
        }
    }

    /// The nodes built so far.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes[..self.nodes_len]
    }

    fn push(&mut self, node: Node) -> Result<usize, BuilderError> {
        if self.nodes_len >= self.nodes.len() {
            return Err(BuilderError::Capacity);
        }
        let idx = self.nodes_len;
        self.nodes[idx] = node;
        self.nodes_len += 1;
        Ok(idx)
    }

    /// Append a `null` node.
    pub fn create_null(&mut self) -> Result<usize, BuilderError> {
        self.push(Node::new(NodeKind::Null, 0, 0))
    }

    /// Append a `true`/`false` node.
    pub fn create_bool(&mut self, value: bool) -> Result<usize, BuilderError> {
        let kind = if value { NodeKind::True } else { NodeKind::False };
        self.push(Node::new(kind, 0, 0))
    }

    /// Append an integer node holding `value`'s canonical decimal text.
    pub fn create_int(&mut self, value: i64) -> Result<usize, BuilderError> {
        self.push(Node::new_owned(NodeKind::IntNumber, format!("{value}")))
    }

    /// Append a float node holding a decimal rendering of `value` precise
    /// enough to recover the exact `f64` on re-parse (`f64`'s `Display`
    /// already produces the shortest round-trippable form).
    pub fn create_float(&mut self, value: f64) -> Result<usize, BuilderError> {
        self.push(Node::new_owned(NodeKind::FloatNumber, format!("{value}")))
    }

    /// Append a string node holding `text` unescaped, verbatim (the
    /// serializer is responsible for escaping on output, exactly as for a
    /// parsed string).
    pub fn create_string(&mut self, text: &str) -> Result<usize, BuilderError> {
        self.push(Node::new_owned(NodeKind::String, String::from(text)))
    }

    /// Append an empty array and open it as the current container:
    /// subsequent elements must be created and attached with
    /// [`Self::array_append`] before a sibling of this array is started.
    pub fn create_array(&mut self) -> Result<usize, BuilderError> {
        self.open_container(NodeKind::Array)
    }

    /// Append an empty object and open it as the current container; see
    /// [`Self::create_array`].
    pub fn create_object(&mut self) -> Result<usize, BuilderError> {
        self.open_container(NodeKind::Object)
    }

    fn open_container(&mut self, kind: NodeKind) -> Result<usize, BuilderError> {
        if self.stack_len >= self.stack.len() {
            return Err(BuilderError::Capacity);
        }
        let idx = self.push(Node::new(kind, 0, 0))?;
        self.stack[self.stack_len] = idx as u32;
        self.stack_len += 1;
        Ok(idx)
    }

    /// Record `elem` as the next element of the array `arr`. `elem` must
    /// be the node immediately following `arr`'s current last child (or
    /// `arr` itself, if empty so far).
    pub fn array_append(&mut self, arr: usize, elem: usize) -> Result<(), BuilderError> {
        let expected_next = arr + 1 + self.subtree_len(arr);
        if self.nodes.get(arr).map(Node::kind) != Some(NodeKind::Array) {
            return Err(BuilderError::WrongKind);
        }
        if elem != expected_next {
            return Err(BuilderError::WrongKind);
        }
        self.nodes[arr].children += 1;
        Ok(())
    }

    /// Record `key`/`value` as the next pair of the object `obj`. `key`
    /// must be a string node immediately following `obj`'s current last
    /// pair; `value` must immediately follow `key`. Copies `key`'s hash
    /// into both nodes' `skip` slot, exactly as a parsed `"key":value`
    /// pair does.
    pub fn object_set(&mut self, obj: usize, key: usize, value: usize) -> Result<(), BuilderError> {
        if self.nodes.get(obj).map(Node::kind) != Some(NodeKind::Object) {
            return Err(BuilderError::WrongKind);
        }
        if self.nodes.get(key).map(Node::kind) != Some(NodeKind::String) {
            return Err(BuilderError::WrongKind);
        }
        let expected_key = obj + 1 + self.subtree_len(obj);
        if key != expected_key || value != key + 1 {
            return Err(BuilderError::WrongKind);
        }
        let hash = hash_key(self.nodes[key].text_bytes(&[]));
        self.nodes[key].skip = hash;
        self.nodes[value].skip = hash;
        self.nodes[obj].children += 2;
        Ok(())
    }

    /// How many arena slots `index`'s children currently occupy (0 before
    /// any `array_append`/`object_set` attaches one), used to find where
    /// the next child must land.
    fn subtree_len(&self, index: usize) -> usize {
        let node = &self.nodes[index];
        let mut count = 0usize;
        let mut child = index + 1;
        for _ in 0..node.children() {
            if child >= self.nodes_len {
                break;
            }
            let step = if self.nodes[child].kind().is_container() {
                1 + self.nodes[child].skip_or_hash() as usize
            } else {
                1
            };
            count += step;
            child += step;
        }
        count
    }

    /// Close the most recently opened container not yet closed, fixing up
    /// its `skip` distance from every node appended since it opened,
    /// mirroring how the parser computes `skip` when it consumes a
    /// matching `}`/`]`.
    pub fn close_container(&mut self) -> Result<(), BuilderError> {
        if self.stack_len == 0 {
            return Err(BuilderError::NoOpenContainer);
        }
        self.stack_len -= 1;
        let idx = self.stack[self.stack_len] as usize;
        let skip = (self.nodes_len - idx - 1) as u32;
        self.nodes[idx].skip = skip;
        Ok(())
    }

    /// Free the owned text of `index` and every node in its subtree
    /// (containers only; a scalar's "subtree" is itself). The arena slots
    /// themselves are never reclaimed — only the heap text they hold.
    pub fn free_subtree(&mut self, index: usize) {
        let Some(node) = self.nodes.get(index) else {
            return;
        };
        let end = if node.kind().is_container() {
            index + 1 + node.skip_or_hash() as usize
        } else {
            index + 1
        };
        for slot in &mut self.nodes[index..end.min(self.nodes_len)] {
            slot.text = Text::default();
        }
    }
}
