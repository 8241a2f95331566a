use smallvec::SmallVec;

use super::handle::Handle;
use crate::key::Key;

/// Inline capacity of a node's arrays.
///
/// With the default branching ratio (3) a node peaks at `2t` keys and `2t + 1`
/// children right before it splits, which fits inline. Larger ratios spill to
/// the heap.
pub(crate) const INLINE_CAPACITY: usize = 8;

type Keys = SmallVec<[Key; INLINE_CAPACITY]>;
type Handles = SmallVec<[Handle; INLINE_CAPACITY]>;

pub(crate) enum Node {
    Internal(InternalNode),
    Leaf(LeafNode),
}

// Internal nodes hold separators and child handles, with one more child than keys.
// The leading child is the one reached under the minimum possible key, so its
// separator is implicit. `keys[i]` is the smallest key routed to `children[i + 1]`.
pub(crate) struct InternalNode {
    parent: Option<Handle>,
    keys: Keys,
    children: Handles,
}

// Leaf nodes hold keys and handles into the element arena, plus the sibling chain.
pub(crate) struct LeafNode {
    parent: Option<Handle>,
    prev: Option<Handle>,
    next: Option<Handle>,
    keys: Keys,
    values: Handles,
}

/// Result of searching for a key in a leaf.
pub(crate) enum SearchResult {
    /// Key was found at the given index.
    Found(usize),
    /// Key was not found; index is where it would be inserted.
    NotFound(usize),
}

impl Node {
    /// Creates a new empty leaf node.
    pub(crate) fn new_leaf() -> Self {
        Node::Leaf(LeafNode::new(None))
    }

    /// Returns true if this is a leaf node.
    pub(crate) fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    /// Returns the leaf node, panicking if this is not a leaf.
    pub(crate) fn as_leaf(&self) -> &LeafNode {
        match self {
            Node::Leaf(leaf) => leaf,
            Node::Internal(_) => panic!("expected leaf node"),
        }
    }

    /// Returns the leaf node mutably, panicking if this is not a leaf.
    pub(crate) fn as_leaf_mut(&mut self) -> &mut LeafNode {
        match self {
            Node::Leaf(leaf) => leaf,
            Node::Internal(_) => panic!("expected leaf node"),
        }
    }

    /// Returns the internal node, panicking if this is not internal.
    pub(crate) fn as_internal(&self) -> &InternalNode {
        match self {
            Node::Internal(internal) => internal,
            Node::Leaf(_) => panic!("expected internal node"),
        }
    }

    /// Returns the internal node mutably, panicking if this is not internal.
    pub(crate) fn as_internal_mut(&mut self) -> &mut InternalNode {
        match self {
            Node::Internal(internal) => internal,
            Node::Leaf(_) => panic!("expected internal node"),
        }
    }

    /// Returns the number of keys in this node.
    #[cfg(test)]
    pub(crate) fn key_count(&self) -> usize {
        match self {
            Node::Internal(internal) => internal.key_count(),
            Node::Leaf(leaf) => leaf.key_count(),
        }
    }

    pub(crate) fn parent(&self) -> Option<Handle> {
        match self {
            Node::Internal(internal) => internal.parent,
            Node::Leaf(leaf) => leaf.parent,
        }
    }

    pub(crate) fn set_parent(&mut self, parent: Option<Handle>) {
        match self {
            Node::Internal(internal) => internal.parent = parent,
            Node::Leaf(leaf) => leaf.parent = parent,
        }
    }
}

impl InternalNode {
    /// Creates a root with exactly two children separated by `separator`.
    pub(crate) fn new_root(left: Handle, separator: Key, right: Handle) -> Self {
        let mut children = Handles::new();
        children.push(left);
        children.push(right);
        let mut keys = Keys::new();
        keys.push(separator);
        Self {
            parent: None,
            keys,
            children,
        }
    }

    pub(crate) fn key_count(&self) -> usize {
        self.keys.len()
    }

    pub(crate) fn child_count(&self) -> usize {
        self.children.len()
    }

    #[cfg(test)]
    pub(crate) fn key(&self, index: usize) -> Key {
        self.keys[index]
    }

    #[cfg(test)]
    pub(crate) fn keys(&self) -> &[Key] {
        &self.keys
    }

    #[inline]
    pub(crate) fn child(&self, index: usize) -> Handle {
        self.children[index]
    }

    #[cfg(test)]
    pub(crate) fn children(&self) -> &[Handle] {
        &self.children
    }

    /// Returns the index of the child responsible for `key`: the child after the
    /// last separator that does not exceed `key`, or the leading child if every
    /// separator is greater.
    #[inline]
    pub(crate) fn search_child(&self, key: Key) -> usize {
        self.keys.partition_point(|&separator| separator <= key)
    }

    /// Inserts `key` and the child it routes to, preserving separator order.
    ///
    /// # Panics
    /// If `key` is already a separator of this node.
    pub(crate) fn insert_child(&mut self, key: Key, child: Handle) {
        let index = self.keys.partition_point(|&separator| separator < key);
        assert!(
            self.keys.get(index) != Some(&key),
            "`InternalNode::insert_child()` - `key` is already present!"
        );
        self.keys.insert(index, key);
        self.children.insert(index + 1, child);
    }

    /// Splits a node holding exactly `2t` separators.
    ///
    /// This node keeps the first `t` separators and `t + 1` children. The returned
    /// sibling receives the last `t - 1` separators and `t` children. The separator
    /// at index `t` is returned for promotion and is stored in neither half.
    pub(crate) fn split(&mut self, t: usize) -> (Key, InternalNode) {
        assert_eq!(
            self.keys.len(),
            2 * t,
            "`InternalNode::split()` - node must hold exactly `2t` keys!"
        );

        let keys: Keys = self.keys.drain(t + 1..).collect();
        let children: Handles = self.children.drain(t + 1..).collect();
        let middle = self.keys.pop().expect("`InternalNode::split()` - missing middle key!");

        let right = InternalNode {
            parent: self.parent,
            keys,
            children,
        };
        (middle, right)
    }
}

impl LeafNode {
    pub(crate) fn new(parent: Option<Handle>) -> Self {
        Self {
            parent,
            prev: None,
            next: None,
            keys: Keys::new(),
            values: Handles::new(),
        }
    }

    pub(crate) fn key_count(&self) -> usize {
        self.keys.len()
    }

    #[cfg(test)]
    pub(crate) fn prev(&self) -> Option<Handle> {
        self.prev
    }

    pub(crate) fn set_prev(&mut self, prev: Option<Handle>) {
        self.prev = prev;
    }

    pub(crate) fn next(&self) -> Option<Handle> {
        self.next
    }

    pub(crate) fn set_next(&mut self, next: Option<Handle>) {
        self.next = next;
    }

    #[cfg(test)]
    pub(crate) fn keys(&self) -> &[Key] {
        &self.keys
    }

    #[inline]
    pub(crate) fn value(&self, index: usize) -> Handle {
        self.values[index]
    }

    #[inline]
    pub(crate) fn search(&self, key: Key) -> SearchResult {
        match self.keys.binary_search(&key) {
            Ok(index) => SearchResult::Found(index),
            Err(index) => SearchResult::NotFound(index),
        }
    }

    pub(crate) fn contains(&self, key: Key) -> bool {
        matches!(self.search(key), SearchResult::Found(_))
    }

    /// Inserts at a position obtained from [`search`](Self::search), shifting the tail right.
    pub(crate) fn insert_at(&mut self, index: usize, key: Key, value: Handle) {
        self.keys.insert(index, key);
        self.values.insert(index, value);
    }

    /// Inserts `key` preserving order. Returns false, leaving the leaf untouched,
    /// if `key` is already present.
    pub(crate) fn insert(&mut self, key: Key, value: Handle) -> bool {
        match self.search(key) {
            SearchResult::Found(_) => false,
            SearchResult::NotFound(index) => {
                self.insert_at(index, key, value);
                true
            }
        }
    }

    /// Splits a leaf holding exactly `2t` keys into two leaves of `t` keys each.
    ///
    /// The returned sibling takes entries `t + 1..2t` and then the middle entry at
    /// index `t`, whose key is also returned as the separator to promote. Sibling
    /// links are left to the caller, which knows the handles involved.
    pub(crate) fn split(&mut self, t: usize) -> (Key, LeafNode) {
        assert_eq!(
            self.keys.len(),
            2 * t,
            "`LeafNode::split()` - leaf must hold exactly `2t` keys!"
        );

        let mut right = LeafNode::new(self.parent);
        right.keys = self.keys.drain(t + 1..).collect();
        right.values = self.values.drain(t + 1..).collect();

        let middle = self.keys.pop().expect("`LeafNode::split()` - missing middle key!");
        let middle_value = self.values.pop().expect("`LeafNode::split()` - missing middle value!");
        let inserted = right.insert(middle, middle_value);
        debug_assert!(inserted, "middle key must be new to the right sibling");

        (middle, right)
    }
}
