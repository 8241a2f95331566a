use super::arena::Arena;
use super::handle::Handle;
use super::node::{InternalNode, Node, SearchResult};
use crate::branching_ratio::BranchingRatio;
use crate::key::Key;
use crate::tracing_helpers::{debug_log, trace_log};

/// The core B+ tree backing `BPlusTree`, keyed directly by [`Key`].
pub(crate) struct RawBPlusTree<T> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node>,
    /// Arena storing the elements; leaves hold handles into it.
    values: Arena<T>,
    /// Handle to the root node. An empty tree's root is an empty leaf.
    root: Handle,
    /// Fan-out parameter `t`; nodes split at `2t` keys.
    ratio: BranchingRatio,
    /// Number of elements stored.
    len: usize,
}

impl<T> RawBPlusTree<T> {
    /// Creates a tree whose root is a single empty leaf.
    pub(crate) fn new(ratio: BranchingRatio) -> Self {
        Self::with_capacity(ratio, 0)
    }

    /// Creates a tree with room for at least `capacity` elements before reallocating.
    pub(crate) fn with_capacity(ratio: BranchingRatio, capacity: usize) -> Self {
        let mut nodes = Arena::with_capacity(capacity.div_ceil(ratio.get()).max(1));
        let root = nodes.alloc(Node::new_leaf());
        Self {
            nodes,
            values: Arena::with_capacity(capacity),
            root,
            ratio,
            len: 0,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn capacity(&self) -> usize {
        self.values.capacity()
    }

    pub(crate) const fn branching_ratio(&self) -> BranchingRatio {
        self.ratio
    }

    /// Returns the number of nodes ever created (nodes are never destroyed).
    pub(crate) const fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of levels, counting the leaf level; a lone root leaf is height 1.
    pub(crate) fn height(&self) -> usize {
        let mut height = 1;
        let mut current = self.root;
        while let Node::Internal(internal) = self.nodes.get(current) {
            current = internal.child(0);
            height += 1;
        }
        height
    }

    /// Descends from the root to the single leaf that would hold `key`.
    ///
    /// At each internal node the walk follows the last separator not exceeding
    /// `key`, or the leading child when every separator is greater. Never fails;
    /// the leaf may or may not actually contain `key`.
    pub(crate) fn find_leaf(&self, key: Key) -> Handle {
        let mut current = self.root;
        loop {
            match self.nodes.get(current) {
                Node::Internal(internal) => current = internal.child(internal.search_child(key)),
                Node::Leaf(_) => return current,
            }
        }
    }

    pub(crate) fn contains_key(&self, key: Key) -> bool {
        self.nodes.get(self.find_leaf(key)).as_leaf().contains(key)
    }

    /// Returns the element stored under `key`.
    pub(crate) fn get(&self, key: Key) -> Option<&T> {
        let leaf = self.nodes.get(self.find_leaf(key)).as_leaf();
        match leaf.search(key) {
            SearchResult::Found(index) => Some(self.values.get(leaf.value(index))),
            SearchResult::NotFound(_) => None,
        }
    }

    /// Inserts `value` under `key` into the leaf responsible for it.
    ///
    /// Returns false, dropping `value` and leaving the tree untouched, if that
    /// leaf already holds `key`. A leaf that reaches `2t` keys is split.
    pub(crate) fn insert_key(&mut self, key: Key, value: T) -> bool {
        let leaf_handle = self.find_leaf(key);
        let index = match self.nodes.get(leaf_handle).as_leaf().search(key) {
            SearchResult::Found(_) => {
                trace_log!(key, leaf = ?leaf_handle, "insert_key: duplicate key rejected");
                return false;
            }
            SearchResult::NotFound(index) => index,
        };

        let value_handle = self.values.alloc(value);
        let leaf = self.nodes.get_mut(leaf_handle).as_leaf_mut();
        leaf.insert_at(index, key, value_handle);
        self.len += 1;

        if leaf.key_count() == self.ratio.max_keys() {
            self.split(leaf_handle);
        }
        true
    }

    /// Splits `node`, which must hold exactly `2t` keys, promoting a separator into
    /// its parent and continuing upward while parents overflow in turn. When the
    /// root splits, a new root with two children replaces it.
    fn split(&mut self, mut node: Handle) {
        let t = self.ratio.get();

        loop {
            let parent = self.nodes.get(node).parent();
            let (middle, sibling) = match self.nodes.get_mut(node) {
                Node::Leaf(leaf) => {
                    let (middle, right) = leaf.split(t);
                    (middle, Node::Leaf(right))
                }
                Node::Internal(internal) => {
                    let (middle, right) = internal.split(t);
                    (middle, Node::Internal(right))
                }
            };
            let sibling_is_leaf = sibling.is_leaf();
            let sibling = self.nodes.alloc(sibling);

            if sibling_is_leaf {
                trace_log!(left = ?node, right = ?sibling, middle, "split: leaf");
                self.link_leaf_sibling(node, sibling);
            } else {
                trace_log!(left = ?node, right = ?sibling, middle, "split: internal");
                self.adopt_children(sibling);
            }

            let Some(parent) = parent else {
                let new_root = self.nodes.alloc(Node::Internal(InternalNode::new_root(node, middle, sibling)));
                self.nodes.get_mut(node).set_parent(Some(new_root));
                self.nodes.get_mut(sibling).set_parent(Some(new_root));
                self.root = new_root;
                debug_log!(root = ?new_root, middle, height = self.height(), "split: new root");
                return;
            };

            // The sibling inherited `parent` from the node it was split from.
            let parent_node = self.nodes.get_mut(parent).as_internal_mut();
            parent_node.insert_child(middle, sibling);
            if parent_node.key_count() < self.ratio.max_keys() {
                return;
            }
            node = parent;
        }
    }

    /// Threads a freshly split-off leaf `right` into the chain directly after `left`.
    fn link_leaf_sibling(&mut self, left: Handle, right: Handle) {
        let old_next = self.nodes.get(left).as_leaf().next();

        let right_leaf = self.nodes.get_mut(right).as_leaf_mut();
        right_leaf.set_prev(Some(left));
        right_leaf.set_next(old_next);

        self.nodes.get_mut(left).as_leaf_mut().set_next(Some(right));
        if let Some(old_next) = old_next {
            self.nodes.get_mut(old_next).as_leaf_mut().set_prev(Some(right));
        }
    }

    /// Points every child of the internal node `handle` back at it.
    fn adopt_children(&mut self, handle: Handle) {
        for index in 0..self.nodes.get(handle).as_internal().child_count() {
            let child = self.nodes.get(handle).as_internal().child(index);
            self.nodes.get_mut(child).set_parent(Some(handle));
        }
    }
}
