//! Pure navigation functions over a flat node slice.
//!
//! These never descend into nested subtrees to skip past them: container
//! nodes carry a `skip` distance (see [`crate::node::Node`]) computed when
//! the container closed, so [`next_sibling`] and everything built on it is
//! O(1) per hop regardless of how much is nested underneath.

use crate::hash::hash_key;
use crate::node::{Node, NodeKind};

/// The root node's index, if the arena holds any nodes at all.
#[must_use]
pub fn root(nodes: &[Node]) -> Option<usize> {
    if nodes.is_empty() { None } else { Some(0) }
}

/// The first direct child of the container at `index`, if it has one.
///
/// Returns `None` if `index` is out of bounds, not a container, or an
/// empty container.
#[must_use]
pub fn first_child(nodes: &[Node], index: usize) -> Option<usize> {
    let node = nodes.get(index)?;
    if !node.kind().is_container() || node.children() == 0 {
        return None;
    }
    let child = index + 1;
    (child < nodes.len()).then_some(child)
}

/// The node immediately after `index`'s subtree, if any.
///
/// For a container this advances by its `skip` distance; for a scalar it
/// advances by one slot.
#[must_use]
pub fn next_sibling(nodes: &[Node], index: usize) -> Option<usize> {
    let node = nodes.get(index)?;
    let advance = if node.kind().is_container() {
        1 + node.skip_or_hash() as usize
    } else {
        1
    };
    let next = index + advance;
    (next < nodes.len()).then_some(next)
}

/// The `i`-th (0-based) element of the array at `index`.
///
/// `None` if `index` is not an array, or `i >= children`.
#[must_use]
pub fn array_element(nodes: &[Node], index: usize, i: u32) -> Option<usize> {
    let node = nodes.get(index)?;
    if node.kind() != NodeKind::Array || i >= node.children() {
        return None;
    }
    let mut child = first_child(nodes, index)?;
    for _ in 0..i {
        child = next_sibling(nodes, child)?;
    }
    Some(child)
}

/// Look up `key` in the object at `index`, returning the associated
/// value's node index.
///
/// Walks `key, value, key, value, ...` comparing the candidate key's
/// hash, then length, then bytes; the first match wins (duplicate keys
/// are not deduplicated). `source` resolves parsed (borrowed) key text; it is
/// ignored for any key created by the [`crate::builder::Builder`].
#[must_use]
pub fn object_lookup(nodes: &[Node], index: usize, key: &[u8], source: &[u8]) -> Option<usize> {
    let node = nodes.get(index)?;
    if node.kind() != NodeKind::Object {
        return None;
    }
    let target_hash = hash_key(key);
    let mut key_idx = first_child(nodes, index)?;
    loop {
        let key_node = &nodes[key_idx];
        let value_idx = next_sibling(nodes, key_idx)?;
        if key_node.skip_or_hash() == target_hash
            && key_node.len() as usize == key.len()
            && key_node.text_bytes(source) == key
        {
            return Some(value_idx);
        }
        match next_sibling(nodes, value_idx) {
            Some(next_key) => key_idx = next_key,
            None => return None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Node, NodeKind};

    fn scalar(kind: NodeKind) -> Node {
        Node::new(kind, 0, 1)
    }

    #[test]
    fn empty_arena_has_no_root() {
        assert_eq!(root(&[]), None);
    }

    #[test]
    fn first_child_none_for_scalar() {
        let nodes = [scalar(NodeKind::Null)];
        assert_eq!(first_child(&nodes, 0), None);
    }

    #[test]
    fn array_element_walks_siblings() {
        // [1, 2, 3] flattened: Array(children=3, skip=3), then 3 scalars.
        let mut arr = Node::new(NodeKind::Array, 0, 9);
        arr.children = 3;
        arr.skip = 3;
        let nodes = [arr, scalar(NodeKind::IntNumber), scalar(NodeKind::IntNumber), scalar(
            NodeKind::IntNumber,
        )];
        assert_eq!(array_element(&nodes, 0, 0), Some(1));
        assert_eq!(array_element(&nodes, 0, 2), Some(3));
        assert_eq!(array_element(&nodes, 0, 3), None);
    }
}
