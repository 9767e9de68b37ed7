//! # Compact Trie
//!
//! A compact (radix-compressed) trie storing a set of strings.
//!
//! Chains of single-child nodes are collapsed into single edges labelled
//! with substrings, which keeps memory low for datasets with heavily shared
//! prefixes. The compressed tree for a given set of strings is unique, so
//! two tries holding the same strings are structurally identical no matter
//! in which order the strings were added.
//!
//! ## Features
//!
//! - **Set API**: add, remove, membership, length and bulk extension
//! - **Ordered Iteration**: strings are yielded lazily in lexicographic order
//! - **Subtrees**: extract the strings under a prefix, even when the prefix
//!   ends partway through an edge
//! - **Prefix Views**: borrow the strings under a prefix without copying
//!
//! ## Example
//!
//! ```rust
//! use compact_trie::CompactTrie;
//!
//! let mut trie = CompactTrie::new();
//! trie.extend(vec!["car", "care", "cart", "cat"]);
//!
//! assert_eq!(trie.len(), 4);
//! assert!(trie.contains("care"));
//! assert!(!trie.contains("ca"));
//!
//! let sub = trie.subtree("car");
//! assert_eq!(sub.iter().collect::<Vec<_>>(), vec!["", "e", "t"]);
//! ```

#[macro_use]
mod util;

mod iter;
mod node;
mod prefix_view;
#[cfg(feature = "serde")]
mod serde_impl;
mod trie;

// Re-export public types
pub use crate::iter::Iter;
pub use crate::prefix_view::PrefixView;
pub use crate::trie::CompactTrie;

/// Invariant violations reported by [`CompactTrie::check_invariants`].
///
/// None of the regular trie operations can fail; these describe a tree that
/// is no longer in canonical compressed form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A non-root node is neither terminal nor a branch point
    UncompressedNode {
        /// Path from the root to the offending node
        path: String,
    },
    /// An edge has an empty label
    EmptyLabel {
        /// Path from the root to the node owning the edge
        path: String,
    },
    /// An edge is indexed under a char its label does not start with
    MisfiledEdge {
        /// Path from the root to the node owning the edge
        path: String,
        /// The index the edge is stored under
        key: char,
        /// The first char of the edge label
        first: char,
    },
    /// The cached length disagrees with the number of stored strings
    SizeMismatch {
        /// The cached length
        cached: usize,
        /// The number of terminal nodes actually reachable
        counted: usize,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::UncompressedNode { path } => {
                write!(f, "node at {:?} is non-terminal with fewer than two children", path)
            }
            Error::EmptyLabel { path } => write!(f, "empty edge label below {:?}", path),
            Error::MisfiledEdge { path, key, first } => write!(
                f,
                "edge below {:?} is indexed by {:?} but starts with {:?}",
                path, key, first
            ),
            Error::SizeMismatch { cached, counted } => write!(
                f,
                "cached length {} does not match {} stored strings",
                cached, counted
            ),
        }
    }
}

impl std::error::Error for Error {}
