use core::fmt;

use crate::branching_ratio::BranchingRatio;
use crate::error::{Operation, TreeError};
use crate::key::{Key, KeyExtractor, NaturalKey};
use crate::raw::RawBPlusTree;

/// An in-memory B+ tree indexing elements by an integer key derived from each element.
///
/// Every element is stored under the [`Key`] its [`KeyExtractor`] computes; the
/// default extractor, [`NaturalKey`], uses the element's [`IndexKey`](crate::IndexKey).
/// Elements live in the leaves, which are linked to their neighbours. Internal
/// nodes hold only separator keys.
///
/// The tree only grows. Inserting a key that is already present is a silent
/// no-op, and [`remove`](Self::remove), [`clear`](Self::clear) and
/// [`copy_to`](Self::copy_to) report [`TreeError::Unsupported`].
///
/// # Examples
///
/// ```
/// use bplus_index::BPlusTree;
///
/// let mut tree = BPlusTree::new();
/// for i in 0..6 {
///     tree.add(i);
/// }
///
/// assert!(tree.contains(&5));
/// assert!(!tree.contains(&6));
/// assert_eq!(tree.len(), 6);
/// assert_eq!(tree.height(), 2); // six keys split the root leaf at the default t = 3
/// ```
pub struct BPlusTree<T, K = NaturalKey> {
    raw: RawBPlusTree<T>,
    extractor: K,
}

impl<T> BPlusTree<T> {
    /// Makes a new, empty tree with the default branching ratio of 3.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn new() -> Self {
        Self::with_key_extractor(BranchingRatio::DEFAULT, NaturalKey)
    }

    /// Makes a new, empty tree whose nodes split at `2t` keys.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidBranchingRatio`] if `t` is zero (or too large for `2t` to fit a `usize`).
    ///
    /// `t = 1` is accepted but degenerates: an internal split leaves a right
    /// sibling with a single child, so descending insertion of `n` elements
    /// builds a tree of height `n` out of `n(n+1)/2` nodes. Use `t >= 2` for
    /// anything but small trees.
    ///
    /// # Examples
    ///
    /// ```
    /// use bplus_index::{BPlusTree, TreeError};
    ///
    /// let tree: BPlusTree<i32> = BPlusTree::with_branching_ratio(6)?;
    /// assert_eq!(tree.branching_ratio().get(), 6);
    ///
    /// assert!(matches!(
    ///     BPlusTree::<i32>::with_branching_ratio(0),
    ///     Err(TreeError::InvalidBranchingRatio(0))
    /// ));
    /// # Ok::<(), TreeError>(())
    /// ```
    pub fn with_branching_ratio(t: usize) -> Result<Self, TreeError> {
        Ok(Self::with_key_extractor(BranchingRatio::new(t)?, NaturalKey))
    }

    /// Makes a new, empty tree with room for at least `capacity` elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use bplus_index::{BPlusTree, BranchingRatio};
    ///
    /// let tree: BPlusTree<u64> = BPlusTree::with_capacity(BranchingRatio::DEFAULT, 128);
    /// assert!(tree.capacity() >= 128);
    /// ```
    #[must_use]
    pub fn with_capacity(ratio: BranchingRatio, capacity: usize) -> Self {
        Self {
            raw: RawBPlusTree::with_capacity(ratio, capacity),
            extractor: NaturalKey,
        }
    }
}

impl<T, K> BPlusTree<T, K> {
    /// Makes a new, empty tree that keys elements with `extractor`.
    #[must_use]
    pub fn with_key_extractor(ratio: BranchingRatio, extractor: K) -> Self {
        Self {
            raw: RawBPlusTree::new(ratio),
            extractor,
        }
    }

    /// Returns the number of elements in the tree.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the number of levels in the tree, leaves included. An empty tree has height 1.
    ///
    /// # Complexity
    ///
    /// O(depth)
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Returns the number of nodes, leaf and internal, the tree is made of.
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.raw.node_count()
    }

    /// Returns how many elements the tree can hold before reallocating element storage.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    #[must_use]
    pub const fn branching_ratio(&self) -> BranchingRatio {
        self.raw.branching_ratio()
    }

    /// Returns the extractor that computes each element's [`Key`].
    #[must_use]
    pub fn key_extractor(&self) -> &K {
        &self.extractor
    }

    /// Returns `true` if an element is stored under `key`.
    ///
    /// # Complexity
    ///
    /// O(depth)
    #[must_use]
    pub fn contains_key(&self, key: Key) -> bool {
        self.raw.contains_key(key)
    }

    /// Not supported: the tree has no deletion algorithm.
    ///
    /// # Errors
    ///
    /// Always [`TreeError::Unsupported`]; the tree is left unchanged.
    pub fn remove(&mut self, _item: &T) -> Result<bool, TreeError> {
        Err(TreeError::Unsupported(Operation::Remove))
    }

    /// Not supported: the tree has no deletion algorithm.
    ///
    /// # Errors
    ///
    /// Always [`TreeError::Unsupported`]; the tree is left unchanged.
    pub fn clear(&mut self) -> Result<(), TreeError> {
        Err(TreeError::Unsupported(Operation::Clear))
    }

    /// Not supported: the tree does not enumerate its elements.
    ///
    /// # Errors
    ///
    /// Always [`TreeError::Unsupported`]; `target` is left unchanged.
    pub fn copy_to(&self, _target: &mut [T], _start: usize) -> Result<(), TreeError> {
        Err(TreeError::Unsupported(Operation::CopyTo))
    }
}

impl<T, K: KeyExtractor<T>> BPlusTree<T, K> {
    /// Computes the key `item` is, or would be, stored under.
    #[must_use]
    pub fn key_of(&self, item: &T) -> Key {
        self.extractor.key_of(item)
    }

    /// Adds `item` to the tree. Does nothing if an element with the same key is already present.
    ///
    /// # Complexity
    ///
    /// O(depth), plus O(t) per node split along the way.
    pub fn add(&mut self, item: T) {
        self.insert(item);
    }

    /// Adds `item` to the tree, returning whether it was inserted.
    ///
    /// Returns `false`, and drops `item`, if an element with the same key is
    /// already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use bplus_index::BPlusTree;
    ///
    /// let mut tree = BPlusTree::new();
    /// assert!(tree.insert(2));
    /// assert!(!tree.insert(2));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, item: T) -> bool {
        let key = self.extractor.key_of(&item);
        self.raw.insert_key(key, item)
    }

    /// Returns `true` if an element with the same key as `item` is in the tree.
    ///
    /// # Complexity
    ///
    /// O(depth)
    #[must_use]
    pub fn contains(&self, item: &T) -> bool {
        self.raw.contains_key(self.extractor.key_of(item))
    }

    /// Returns the stored element with the same key as `item`, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use bplus_index::{BPlusTree, BranchingRatio, Key};
    ///
    /// let mut people = BPlusTree::with_key_extractor(BranchingRatio::DEFAULT, |p: &(u32, &str)| Key::from(p.0));
    /// people.add((7, "Ada"));
    /// assert_eq!(people.get(&(7, "")), Some(&(7, "Ada")));
    /// assert_eq!(people.get(&(8, "")), None);
    /// ```
    #[must_use]
    pub fn get(&self, item: &T) -> Option<&T> {
        self.raw.get(self.extractor.key_of(item))
    }
}

impl<T> Default for BPlusTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, K> fmt::Debug for BPlusTree<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BPlusTree")
            .field("len", &self.len())
            .field("height", &self.height())
            .field("branching_ratio", &self.branching_ratio().get())
            .finish_non_exhaustive()
    }
}

impl<T, K: KeyExtractor<T>> Extend<T> for BPlusTree<T, K> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

impl<T> FromIterator<T> for BPlusTree<T>
where
    NaturalKey: KeyExtractor<T>,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T, const N: usize> From<[T; N]> for BPlusTree<T>
where
    NaturalKey: KeyExtractor<T>,
{
    fn from(items: [T; N]) -> Self {
        Self::from_iter(items)
    }
}
