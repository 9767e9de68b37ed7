//! Prefix view into a compact trie.
//!
//! This module provides the `PrefixView` type, which gives read-only access
//! to the strings of a trie that share a prefix, without copying them.

use std::fmt;

use crate::iter::Iter;
use crate::node::{Edge, TrieNode};
use crate::CompactTrie;

/// A lightweight view of the strings in a trie that start with a prefix.
///
/// The prefix does not have to end on a node: when it stops partway through
/// an edge, the view behaves as if that edge had been split at the end of
/// the prefix, while the trie itself is left untouched.
///
/// # Examples
///
/// ```
/// use compact_trie::CompactTrie;
///
/// let trie1: CompactTrie = vec!["hello", "help"].into_iter().collect();
/// let trie2: CompactTrie = vec!["hello", "help", "world"].into_iter().collect();
///
/// let view1 = trie1.view_subtree("hel");
/// let view2 = trie2.view_subtree("hel");
///
/// // Views holding the same suffixes are equal
/// assert_eq!(view1, view2);
///
/// assert!(view1.contains("hello"));
/// assert!(!view1.contains("world"));
/// ```
#[derive(Clone)]
pub struct PrefixView<'a> {
    /// The prefix defining this view
    prefix: String,

    /// Where the prefix ends, if any stored string starts with it
    anchor: Option<Anchor<'a>>,

    /// Number of strings in the view
    len: usize,
}

/// The point in the tree a prefix leads to.
#[derive(Debug, Clone, Copy)]
struct Anchor<'a> {
    /// Unconsumed tail of the edge the prefix ends in, empty on a node.
    /// Always the longest common prefix of the suffixes in the view.
    pending: &'a str,

    /// The node reached once `pending` is consumed as well
    node: &'a TrieNode,
}

impl<'a> PrefixView<'a> {
    /// Creates a new view of `trie` for the given prefix.
    pub fn new(trie: &'a CompactTrie, prefix: &str) -> Self {
        let anchor = trie
            .root
            .descend(prefix)
            .map(|(pending, node)| Anchor { pending, node }.canonical());
        let len = anchor.map_or(0, |anchor| anchor.node.subtree_size());

        PrefixView {
            prefix: prefix.to_owned(),
            anchor,
            len,
        }
    }

    /// Returns the prefix for this view.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns whether the prefix leads anywhere in the trie.
    ///
    /// The empty prefix always exists, even in an empty trie.
    pub fn exists(&self) -> bool {
        self.anchor.is_some()
    }

    /// Returns the number of strings in this view.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns whether this view holds no strings.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks if the view contains a key.
    ///
    /// `key` is a full string, prefix included; only strings that start with
    /// the prefix and are stored in the trie are contained.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        Q: AsRef<str> + ?Sized,
    {
        let anchor = match self.anchor {
            Some(anchor) => anchor,
            None => return false,
        };

        key.as_ref()
            .strip_prefix(self.prefix.as_str())
            .and_then(|rest| rest.strip_prefix(anchor.pending))
            .and_then(|rest| anchor.node.find(rest))
            .map_or(false, |node| node.terminal)
    }

    /// Returns an iterator over the full strings in the view, in
    /// lexicographic order.
    pub fn iter(&self) -> Iter<'a> {
        match self.anchor {
            Some(anchor) => {
                let mut path = String::with_capacity(self.prefix.len() + anchor.pending.len());
                path.push_str(&self.prefix);
                path.push_str(anchor.pending);
                Iter::new(path, anchor.node, self.len)
            }
            None => Iter::empty(),
        }
    }

    /// Copies the view into a new trie, stripping the prefix from every
    /// string.
    pub fn to_trie(&self) -> CompactTrie {
        match self.anchor {
            None => CompactTrie::new(),
            Some(Anchor { pending: "", node }) => CompactTrie::from_root(node.clone(), self.len),
            Some(Anchor { pending, node }) => CompactTrie::from_edge(Edge {
                label: pending.to_owned(),
                target: node.clone(),
            }),
        }
    }
}

impl<'a> Anchor<'a> {
    /// Steps through a non-terminal node with a single edge.
    ///
    /// Only the root may have that shape, so one step is enough to make
    /// `pending` the common prefix of every suffix below the anchor.
    fn canonical(self) -> Self {
        if !self.pending.is_empty() || self.node.terminal || self.node.children.len() != 1 {
            return self;
        }

        match self.node.children.values().next() {
            Some(edge) => Anchor {
                pending: &edge.label,
                node: &edge.target,
            },
            None => self,
        }
    }
}

impl fmt::Debug for PrefixView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrefixView")
            .field("prefix", &self.prefix)
            .field("len", &self.len())
            .finish()
    }
}

// Views are equal when they hold the same suffixes after their prefixes
impl PartialEq for PrefixView<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self.anchor, other.anchor) {
            (Some(left), Some(right)) => {
                left.pending == right.pending
                    && (std::ptr::eq(left.node, right.node) || left.node.same_shape(right.node))
            }
            _ => self.is_empty() && other.is_empty(),
        }
    }
}

impl Eq for PrefixView<'_> {}

impl<'a> IntoIterator for &PrefixView<'a> {
    type Item = String;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
