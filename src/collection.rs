use crate::bplus_tree::BPlusTree;
use crate::error::TreeError;
use crate::key::KeyExtractor;

/// A generic collection contract, for code that holds a collection without
/// knowing which operations its implementation supports.
///
/// Operations an implementation lacks return [`TreeError::Unsupported`] instead
/// of being absent, so callers can probe for them.
///
/// # Examples
///
/// ```
/// use bplus_index::{BPlusTree, Collection, TreeError};
///
/// fn drain_all<C: Collection<u32>>(collection: &mut C) -> Result<(), TreeError> {
///     collection.clear()
/// }
///
/// let mut tree = BPlusTree::new();
/// tree.add(1u32);
/// assert!(drain_all(&mut tree).is_err());
/// assert_eq!(Collection::len(&tree), 1);
/// ```
pub trait Collection<T> {
    fn add(&mut self, item: T);

    fn contains(&self, item: &T) -> bool;

    /// # Errors
    ///
    /// [`TreeError::Unsupported`] if the collection cannot remove elements.
    fn remove(&mut self, item: &T) -> Result<bool, TreeError>;

    /// # Errors
    ///
    /// [`TreeError::Unsupported`] if the collection cannot remove elements.
    fn clear(&mut self) -> Result<(), TreeError>;

    /// Copies every element into `target`, starting at index `start`.
    ///
    /// # Errors
    ///
    /// [`TreeError::Unsupported`] if the collection cannot enumerate its elements.
    fn copy_to(&self, target: &mut [T], start: usize) -> Result<(), TreeError>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_read_only(&self) -> bool {
        false
    }
}

impl<T, K: KeyExtractor<T>> Collection<T> for BPlusTree<T, K> {
    fn add(&mut self, item: T) {
        BPlusTree::add(self, item);
    }

    fn contains(&self, item: &T) -> bool {
        BPlusTree::contains(self, item)
    }

    fn remove(&mut self, item: &T) -> Result<bool, TreeError> {
        BPlusTree::remove(self, item)
    }

    fn clear(&mut self) -> Result<(), TreeError> {
        BPlusTree::clear(self)
    }

    fn copy_to(&self, target: &mut [T], start: usize) -> Result<(), TreeError> {
        BPlusTree::copy_to(self, target, start)
    }

    fn len(&self) -> usize {
        BPlusTree::len(self)
    }

    fn is_empty(&self) -> bool {
        BPlusTree::is_empty(self)
    }
}
