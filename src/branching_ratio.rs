use core::fmt;
use core::num::NonZero;

use crate::error::TreeError;

/// The fan-out parameter `t` of a [`BPlusTree`](crate::BPlusTree).
///
/// A node overflows, and is split, as soon as it holds `2t` keys. Every split
/// leaves at least `t` keys in a leaf and at least `t - 1` keys in an internal
/// node.
///
/// With `t = 1` that lower bound is zero: internal splits leave a right sibling
/// holding one child and no separators. Descending insertion never refills
/// those siblings, so `n` such inserts build a tree of height `n` with
/// `n(n+1)/2` nodes. Any `t >= 2` keeps the height logarithmic.
///
/// # Examples
///
/// ```
/// use bplus_index::{BranchingRatio, TreeError};
///
/// let t = BranchingRatio::new(6)?;
/// assert_eq!(t.get(), 6);
/// assert_eq!(t.max_keys(), 12);
///
/// assert_eq!(BranchingRatio::new(0), Err(TreeError::InvalidBranchingRatio(0)));
/// assert_eq!(BranchingRatio::default(), BranchingRatio::DEFAULT);
/// # Ok::<(), TreeError>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct BranchingRatio(NonZero<usize>);

impl BranchingRatio {
    /// `t = 3`: nodes split at six keys.
    pub const DEFAULT: Self = match Self::new(3) {
        Ok(ratio) => ratio,
        Err(_) => unreachable!(),
    };

    /// The largest accepted ratio; `2t` must fit in a `usize`.
    pub const MAX: usize = usize::MAX / 2;

    /// Validates `t`.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidBranchingRatio`] if `t` is zero or greater than [`Self::MAX`].
    pub const fn new(t: usize) -> Result<Self, TreeError> {
        if t > Self::MAX {
            return Err(TreeError::InvalidBranchingRatio(t));
        }
        match NonZero::new(t) {
            Some(t) => Ok(Self(t)),
            None => Err(TreeError::InvalidBranchingRatio(t)),
        }
    }

    #[inline]
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }

    /// The key count at which a node splits: `2t`.
    #[inline]
    #[must_use]
    pub const fn max_keys(self) -> usize {
        self.0.get() * 2
    }
}

impl Default for BranchingRatio {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<usize> for BranchingRatio {
    type Error = TreeError;

    fn try_from(t: usize) -> Result<Self, Self::Error> {
        Self::new(t)
    }
}

impl From<BranchingRatio> for usize {
    fn from(ratio: BranchingRatio) -> Self {
        ratio.get()
    }
}

impl fmt::Display for BranchingRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
