//! An in-memory B+ tree index for Rust.
//!
//! This crate provides [`BPlusTree`], an ordered index that stores elements
//! under an integer [`Key`] derived from each element, and answers membership
//! queries by descending from the root to the single leaf responsible for a key.
//!
//! # Example
//!
//! ```
//! use bplus_index::BPlusTree;
//!
//! // t = 3: nodes split as soon as they hold six keys.
//! let mut tree = BPlusTree::with_branching_ratio(3)?;
//! for i in 0..6 {
//!     tree.add(i);
//! }
//!
//! assert!((0..6).all(|i| tree.contains(&i)));
//! assert!(!tree.contains(&6));
//!
//! // Keys are unique: re-adding is a no-op.
//! tree.add(3);
//! assert_eq!(tree.len(), 6);
//! # Ok::<(), bplus_index::TreeError>(())
//! ```
//!
//! # Keys
//!
//! Elements are never compared with each other. The tree orders and
//! deduplicates them by the [`Key`] a [`KeyExtractor`] computes:
//!
//! - [`NaturalKey`] (the default) - integers, `char` and `bool` via [`IndexKey`]
//! - [`HashKey`] - the element's hash under any [`BuildHasher`](core::hash::BuildHasher)
//! - any closure `Fn(&T) -> Key`
//!
//! # Scope
//!
//! - **Grow-only** - elements can be added and looked up. Removal, clearing and
//!   copying out are reported as [`TreeError::Unsupported`], and the tree does not
//!   iterate over its elements.
//! - **Single-threaded** - share a tree across threads behind a single lock.
//! - **`no_std` compatible** - only requires `alloc`.
//!
//! # Implementation
//!
//! Nodes live in an arena and refer to their parent, children and leaf
//! siblings by index. A node that reaches `2t` keys is split in two and a
//! separator is promoted into its parent, splitting ancestors in turn and
//! growing a new root when the old one splits. Enable the `tracing` feature to
//! log splits.

#![no_std]
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

#[cfg(test)]
#[macro_use]
extern crate std;

mod tracing_helpers;

mod bplus_tree;
mod branching_ratio;
mod collection;
mod error;
mod key;
mod raw;

pub use bplus_tree::BPlusTree;
pub use branching_ratio::BranchingRatio;
pub use collection::Collection;
pub use error::{Operation, TreeError};
pub use key::{HashKey, IndexKey, Key, KeyExtractor, NaturalKey};
