//! Lazy depth-first iteration over the strings stored in a trie.

use std::iter::FusedIterator;

use crate::node::TrieNode;

/// An iterator over the strings stored below a node.
///
/// The traversal keeps an explicit stack of pending nodes, each paired with
/// the string spelled by the path leading to it. Siblings are visited in
/// order of their first char and a node is yielded before its descendants,
/// so strings come out in lexicographic order.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    /// Nodes still to visit, along with the path spelled so far
    stack: Vec<(String, &'a TrieNode)>,

    /// Number of strings not yet yielded
    remaining: usize,
}

impl<'a> Iter<'a> {
    /// Starts a traversal at `node`, whose path spells `path`.
    ///
    /// `len` must be the number of terminal nodes below `node`.
    pub(crate) fn new(path: String, node: &'a TrieNode, len: usize) -> Self {
        Iter {
            stack: vec![(path, node)],
            remaining: len,
        }
    }

    /// An iterator that yields nothing.
    pub(crate) fn empty() -> Self {
        Iter {
            stack: Vec::new(),
            remaining: 0,
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((path, node)) = self.stack.pop() {
            // Push in reverse so the smallest child is popped first
            for edge in node.children.values().rev() {
                let mut child_path = String::with_capacity(path.len() + edge.label.len());
                child_path.push_str(&path);
                child_path.push_str(&edge.label);
                self.stack.push((child_path, &edge.target));
            }

            if node.terminal {
                self.remaining = self.remaining.saturating_sub(1);
                return Some(path);
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}
