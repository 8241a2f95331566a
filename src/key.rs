//! Deriving the integer key an element is indexed under.
//!
//! The tree orders and deduplicates elements by a [`Key`] computed from each
//! element, never by the element itself. Two elements with the same key are
//! the same element as far as the tree is concerned.

use core::hash::{BuildHasher, Hash};

/// The integer every element is indexed under.
pub type Key = i64;

/// An element's natural integer key.
///
/// Implemented for the primitive integer types, `char` and `bool`. Types
/// narrower than [`Key`] map to themselves; `u64`, `usize` and `isize` are
/// reinterpreted as `i64`, so values above `i64::MAX` wrap to negative keys.
///
/// # Examples
///
/// ```
/// use bplus_index::IndexKey;
///
/// assert_eq!(42u8.index_key(), 42);
/// assert_eq!('A'.index_key(), 65);
/// assert_eq!(u64::MAX.index_key(), -1);
/// ```
pub trait IndexKey {
    fn index_key(&self) -> Key;
}

macro_rules! impl_index_key_lossless {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IndexKey for $ty {
                #[inline]
                fn index_key(&self) -> Key {
                    Key::from(*self)
                }
            }
        )*
    };
}

macro_rules! impl_index_key_wrapping {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IndexKey for $ty {
                #[inline]
                #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
                fn index_key(&self) -> Key {
                    *self as Key
                }
            }
        )*
    };
}

impl_index_key_lossless!(i8, i16, i32, i64, u8, u16, u32, bool);
impl_index_key_wrapping!(u64, usize, isize);

impl IndexKey for char {
    #[inline]
    fn index_key(&self) -> Key {
        Key::from(u32::from(*self))
    }
}

impl<T: IndexKey + ?Sized> IndexKey for &T {
    #[inline]
    fn index_key(&self) -> Key {
        (**self).index_key()
    }
}

/// The key function a [`BPlusTree`](crate::BPlusTree) applies to every element
/// it inserts or looks up.
///
/// Any closure `Fn(&T) -> Key` is a key extractor:
///
/// ```
/// use bplus_index::{BPlusTree, BranchingRatio, Key};
///
/// let mut by_len = BPlusTree::with_key_extractor(BranchingRatio::DEFAULT, |s: &&str| s.len() as Key);
/// by_len.add("tree");
/// assert!(by_len.contains(&"leaf")); // same length, same key
/// assert!(!by_len.contains(&"root!"));
/// ```
pub trait KeyExtractor<T: ?Sized> {
    fn key_of(&self, item: &T) -> Key;
}

impl<T: ?Sized, F> KeyExtractor<T> for F
where
    F: Fn(&T) -> Key,
{
    #[inline]
    fn key_of(&self, item: &T) -> Key {
        self(item)
    }
}

/// Keys elements by their [`IndexKey`]. The default extractor.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct NaturalKey;

impl<T: IndexKey + ?Sized> KeyExtractor<T> for NaturalKey {
    #[inline]
    fn key_of(&self, item: &T) -> Key {
        item.index_key()
    }
}

/// Keys elements by their hash under a [`BuildHasher`].
///
/// The 64-bit hash is reinterpreted as a [`Key`]. Distinct elements whose hashes
/// collide are treated as the same element.
///
/// # Examples
///
/// ```
/// use std::collections::hash_map::RandomState;
///
/// use bplus_index::{BPlusTree, BranchingRatio, HashKey};
///
/// let mut words = BPlusTree::with_key_extractor(BranchingRatio::DEFAULT, HashKey::new(RandomState::new()));
/// words.add("alpha");
/// words.add("beta");
/// assert!(words.contains(&"alpha"));
/// assert!(!words.contains(&"gamma"));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct HashKey<S> {
    hasher: S,
}

impl<S> HashKey<S> {
    /// Keys elements by their hash under `hasher`.
    pub const fn new(hasher: S) -> Self {
        Self { hasher }
    }

    /// Returns the [`BuildHasher`] keys are computed with.
    pub fn hasher(&self) -> &S {
        &self.hasher
    }
}

impl<T: Hash + ?Sized, S: BuildHasher> KeyExtractor<T> for HashKey<S> {
    #[inline]
    #[allow(clippy::cast_possible_wrap)]
    fn key_of(&self, item: &T) -> Key {
        self.hasher.hash_one(item) as Key
    }
}
