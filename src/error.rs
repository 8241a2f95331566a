use core::fmt;

use thiserror::Error;

/// Errors reported by [`BPlusTree`](crate::BPlusTree) and [`BranchingRatio`](crate::BranchingRatio).
///
/// Inserting a key that is already present is not an error; it is reported as
/// `false` by [`BPlusTree::insert`](crate::BPlusTree::insert).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Error)]
pub enum TreeError {
    /// The branching ratio was zero, or so large that `2t` overflows `usize`.
    #[error("incorrect branching ratio {0}: expected 1 <= t <= usize::MAX / 2")]
    InvalidBranchingRatio(usize),

    /// The tree has no algorithm for this operation.
    ///
    /// The tree is grow-only: nodes are created by splits and never merged, so
    /// nothing that shrinks it is available.
    #[error("`{0}` is not supported by this tree")]
    Unsupported(Operation),
}

/// Collection operations a [`BPlusTree`](crate::BPlusTree) exposes but does not implement.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Operation {
    /// [`BPlusTree::remove`](crate::BPlusTree::remove).
    Remove,
    /// [`BPlusTree::clear`](crate::BPlusTree::clear).
    Clear,
    /// [`BPlusTree::copy_to`](crate::BPlusTree::copy_to).
    CopyTo,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Remove => "remove",
            Operation::Clear => "clear",
            Operation::CopyTo => "copy_to",
        })
    }
}
