//! Internal node implementation for the compact trie.
//!
//! This module contains the `TrieNode` and `Edge` structures that form the
//! backbone of the trie. Every node exclusively owns its outgoing edges, and
//! every edge owns the node it leads to, so the whole tree is dropped with
//! its root.

use std::collections::BTreeMap;
use std::mem;

use crate::util::prefix_match;
use crate::Error;

/// Internal node type for the compact trie.
///
/// A node carries no label of its own: the string it stands for is the
/// concatenation of the edge labels on the path from the root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct TrieNode {
    /// Whether the path leading to this node is a stored string
    pub terminal: bool,

    /// Outgoing edges indexed by the first char of their label
    pub children: BTreeMap<char, Edge>,
}

/// A labelled connection from a node to one of its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Edge {
    /// The substring consumed when following this edge, never empty
    pub label: String,

    /// The node reached after consuming `label`
    pub target: TrieNode,
}

impl Edge {
    /// Creates an edge leading to a fresh terminal node.
    pub fn leaf(label: &str) -> Self {
        Edge {
            label: label.to_owned(),
            target: TrieNode {
                terminal: true,
                children: BTreeMap::new(),
            },
        }
    }

    /// Splits this edge after `at` bytes of its label.
    ///
    /// An intermediate node is inserted at the split point; the remainder of
    /// the label and the original target hang below it as a single edge.
    /// `at` must be a char boundary strictly inside the label.
    fn split_at(&mut self, at: usize) {
        let tail = self.label.split_off(at);
        let original = mem::take(&mut self.target);

        trace_event!(head = %self.label, tail = %tail, "splitting edge");

        if let Some(first) = tail.chars().next() {
            self.target.children.insert(
                first,
                Edge {
                    label: tail,
                    target: original,
                },
            );
        }
    }

    /// Merges the target's single outgoing edge into this one.
    ///
    /// The target must be non-terminal with exactly one child; afterwards
    /// this edge points straight at the grandchild.
    fn absorb_child(&mut self) {
        if let Some((_, child)) = self.target.children.pop_first() {
            trace_event!(head = %self.label, tail = %child.label, "merging edges");

            self.label.push_str(&child.label);
            self.target = child.target;
        }
    }
}

impl TrieNode {
    /// Inserts `key` below this node, returning whether it was absent.
    pub fn insert(&mut self, key: &str) -> bool {
        let first = match key.chars().next() {
            Some(first) => first,
            None => return !mem::replace(&mut self.terminal, true),
        };

        let edge = match self.children.get_mut(&first) {
            Some(edge) => edge,
            None => {
                trace_event!(label = %key, "attaching leaf");
                self.children.insert(first, Edge::leaf(key));
                return true;
            }
        };

        // The first chars agree, so at least one char is shared
        let common_len = prefix_match(key, &edge.label);
        if common_len < edge.label.len() {
            edge.split_at(common_len);
        }

        edge.target.insert(&key[common_len..])
    }

    /// Removes `key` below this node, returning whether it was present.
    ///
    /// On the way back up, a child left without strings is pruned and a
    /// child left non-terminal with a single edge is merged into the edge
    /// leading to it. This node itself is repaired by its caller, so the
    /// root is never pruned or merged.
    pub fn remove(&mut self, key: &str) -> bool {
        let first = match key.chars().next() {
            Some(first) => first,
            None => return mem::replace(&mut self.terminal, false),
        };

        let edge = match self.children.get_mut(&first) {
            Some(edge) => edge,
            None => return false,
        };

        let rest = match key.strip_prefix(edge.label.as_str()) {
            Some(rest) => rest,
            None => return false,
        };

        if !edge.target.remove(rest) {
            return false;
        }

        if !edge.target.terminal {
            match edge.target.children.len() {
                0 => {
                    trace_event!(label = %edge.label, "pruning edge");
                    self.children.remove(&first);
                }
                1 => edge.absorb_child(),
                _ => {}
            }
        }

        true
    }

    /// Follows `key` exactly, returning the node it ends on.
    pub fn find(&self, key: &str) -> Option<&TrieNode> {
        let mut current = self;
        let mut remaining = key;

        while let Some(first) = remaining.chars().next() {
            let edge = current.children.get(&first)?;
            remaining = remaining.strip_prefix(edge.label.as_str())?;
            current = &edge.target;
        }

        Some(current)
    }

    /// Follows `prefix` allowing it to stop partway through an edge.
    ///
    /// Returns the unconsumed tail of the last edge (empty when the prefix
    /// ends on a node) together with the node that edge leads to. The pair
    /// describes a virtual split of the edge without touching the tree.
    pub fn descend<'a>(&'a self, prefix: &str) -> Option<(&'a str, &'a TrieNode)> {
        let mut current = self;
        let mut remaining = prefix;

        while let Some(first) = remaining.chars().next() {
            let edge = current.children.get(&first)?;

            if let Some(rest) = remaining.strip_prefix(edge.label.as_str()) {
                remaining = rest;
                current = &edge.target;
            } else {
                let pending = edge.label.strip_prefix(remaining)?;
                return Some((pending, &edge.target));
            }
        }

        Some(("", current))
    }

    /// Returns the number of terminal nodes in this subtree
    pub fn subtree_size(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];

        while let Some(node) = stack.pop() {
            if node.terminal {
                count += 1;
            }
            stack.extend(node.children.values().map(|edge| &edge.target));
        }

        count
    }

    /// Returns the longest path to a terminal node, counted in chars.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack = vec![(self, 0)];

        while let Some((node, depth)) = stack.pop() {
            if node.terminal {
                height = height.max(depth);
            }
            for edge in node.children.values() {
                stack.push((&edge.target, depth + edge.label.chars().count()));
            }
        }

        height
    }

    /// Returns the longest path to a leaf, counted in edges.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 0)];

        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            for edge in node.children.values() {
                stack.push((&edge.target, depth + 1));
            }
        }

        deepest
    }

    /// Compares two subtrees edge by edge, stopping at the first difference.
    pub fn same_shape(&self, other: &TrieNode) -> bool {
        let mut stack = vec![(self, other)];

        while let Some((left, right)) = stack.pop() {
            if left.terminal != right.terminal || left.children.len() != right.children.len() {
                return false;
            }

            for ((lk, le), (rk, re)) in left.children.iter().zip(right.children.iter()) {
                if lk != rk || le.label != re.label {
                    return false;
                }
                stack.push((&le.target, &re.target));
            }
        }

        true
    }

    /// Audits the compression invariants below this node.
    ///
    /// `self` is treated as a root: it may be non-terminal with fewer than
    /// two children. Returns the number of terminal nodes on success.
    pub fn validate(&self) -> Result<usize, Error> {
        let mut counted = 0;
        let mut stack = vec![(String::new(), self)];

        while let Some((path, node)) = stack.pop() {
            if node.terminal {
                counted += 1;
            } else if !path.is_empty() && node.children.len() < 2 {
                return Err(Error::UncompressedNode { path });
            }

            for (&key, edge) in &node.children {
                let first = match edge.label.chars().next() {
                    Some(first) => first,
                    None => return Err(Error::EmptyLabel { path }),
                };
                if first != key {
                    return Err(Error::MisfiledEdge {
                        path,
                        key,
                        first,
                    });
                }

                let mut child_path = path.clone();
                child_path.push_str(&edge.label);
                stack.push((child_path, &edge.target));
            }
        }

        Ok(counted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(keys: &[&str]) -> TrieNode {
        let mut root = TrieNode::default();
        for key in keys {
            root.insert(key);
        }
        root
    }

    fn labels(node: &TrieNode) -> Vec<&str> {
        node.children.values().map(|edge| edge.label.as_str()).collect()
    }

    #[test]
    fn test_new_node() {
        let node = TrieNode::default();

        assert!(!node.terminal);
        assert!(node.children.is_empty());
        assert_eq!(node.subtree_size(), 0);
        assert_eq!(node.height(), 0);
        assert_eq!(node.depth(), 0);
    }

    #[test]
    fn test_leaf_edge() {
        let edge = Edge::leaf("abc");

        assert_eq!(edge.label, "abc");
        assert!(edge.target.terminal);
        assert!(edge.target.children.is_empty());
    }

    #[test]
    fn test_insert_splits_edge() {
        let root = build(&["alphabet", "alpine"]);

        assert_eq!(labels(&root), vec!["alp"]);

        let middle = &root.children[&'a'].target;
        assert!(!middle.terminal);
        assert_eq!(labels(middle), vec!["habet", "ine"]);
    }

    #[test]
    fn test_insert_prefix_of_existing_key() {
        let root = build(&["alphabet", "alpha"]);

        assert_eq!(labels(&root), vec!["alpha"]);

        let alpha = &root.children[&'a'].target;
        assert!(alpha.terminal);
        assert_eq!(labels(alpha), vec!["bet"]);
    }

    #[test]
    fn test_insert_reports_duplicates() {
        let mut root = TrieNode::default();

        assert!(root.insert("foo"));
        assert!(!root.insert("foo"));
        assert!(root.insert(""));
        assert!(!root.insert(""));
        assert_eq!(root.subtree_size(), 2);
    }

    #[test]
    fn test_split_at() {
        let mut edge = Edge::leaf("abcdef");
        edge.split_at(2);

        assert_eq!(edge.label, "ab");
        assert!(!edge.target.terminal);
        assert_eq!(labels(&edge.target), vec!["cdef"]);
        assert!(edge.target.children[&'c'].target.terminal);
    }

    #[test]
    fn test_absorb_child() {
        let mut edge = Edge::leaf("ab");
        edge.target.terminal = false;
        edge.target.children.insert('c', Edge::leaf("cd"));
        edge.absorb_child();

        assert_eq!(edge.label, "abcd");
        assert!(edge.target.terminal);
        assert!(edge.target.children.is_empty());
    }

    #[test]
    fn test_remove_merges_single_child() {
        let mut root = build(&["car", "care", "cart", "cat"]);

        assert!(root.remove("car"));
        assert_eq!(labels(&root), vec!["ca"]);

        let ca = &root.children[&'c'].target;
        assert_eq!(labels(ca), vec!["r", "t"]);
        assert_eq!(labels(&ca.children[&'r'].target), vec!["e", "t"]);
        assert!(root.validate().is_ok());

        assert!(root.remove("cat"));
        assert_eq!(labels(&root), vec!["car"]);
        assert!(root.validate().is_ok());
    }

    #[test]
    fn test_remove_prunes_leaf_chain() {
        let mut root = build(&["abc", "abd"]);

        assert!(root.remove("abd"));
        assert_eq!(labels(&root), vec!["abc"]);

        assert!(root.remove("abc"));
        assert!(root.children.is_empty());
        assert_eq!(root, TrieNode::default());
    }

    #[test]
    fn test_remove_requires_exact_path() {
        let mut root = build(&["abc"]);

        assert!(!root.remove("ab"));
        assert!(!root.remove("abcd"));
        assert!(!root.remove(""));
        assert!(!root.remove("x"));
        assert_eq!(root, build(&["abc"]));
    }

    #[test]
    fn test_find() {
        let root = build(&["car", "cat"]);

        assert!(root.find("car").map_or(false, |node| node.terminal));
        assert!(root.find("ca").map_or(false, |node| !node.terminal));
        assert!(root.find("c").is_none());
        assert!(root.find("cart").is_none());
        assert!(std::ptr::eq(root.find("").unwrap(), &root));
    }

    #[test]
    fn test_descend_virtual_split() {
        let root = build(&["fooa", "foob"]);

        let (pending, node) = root.descend("fo").unwrap();
        assert_eq!(pending, "o");
        assert_eq!(labels(node), vec!["a", "b"]);

        let (pending, node) = root.descend("foo").unwrap();
        assert_eq!(pending, "");
        assert_eq!(labels(node), vec!["a", "b"]);

        assert!(root.descend("fx").is_none());
        assert!(root.descend("fooc").is_none());
    }

    #[test]
    fn test_height_and_depth() {
        let root = build(&["foo", "fbar", "qux"]);

        assert_eq!(root.height(), 4);
        assert_eq!(root.depth(), 2);
    }

    #[test]
    fn test_same_shape() {
        let left = build(&["a", "ab", "abc", "x"]);
        let right = build(&["x", "abc", "ab", "a"]);
        let other = build(&["a", "ab", "abd", "x"]);

        assert!(left.same_shape(&right));
        assert!(!left.same_shape(&other));
        assert!(!left.same_shape(&TrieNode::default()));
    }

    #[test]
    fn test_validate_reports_uncompressed_node() {
        let mut root = build(&["abc"]);
        root.children
            .get_mut(&'a')
            .unwrap()
            .split_at(1);

        assert_eq!(
            root.validate(),
            Err(Error::UncompressedNode {
                path: "a".to_string()
            })
        );
    }

    #[test]
    fn test_validate_reports_misfiled_edge() {
        let mut root = TrieNode::default();
        root.children.insert('x', Edge::leaf("abc"));

        assert_eq!(
            root.validate(),
            Err(Error::MisfiledEdge {
                path: String::new(),
                key: 'x',
                first: 'a',
            })
        );
    }
}
