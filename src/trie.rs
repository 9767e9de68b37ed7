//! The main trie implementation.
//!
//! This module contains the `CompactTrie` type, which provides the primary
//! API for working with the compressed trie.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::AddAssign;

use once_cell::sync::OnceCell;

use crate::iter::Iter;
use crate::node::{Edge, TrieNode};
use crate::prefix_view::PrefixView;
use crate::Error;

/// A set of strings stored as a compact (radix-compressed) trie.
///
/// Every non-root node is either the end of a stored string or a branch
/// point with at least two outgoing edges; chains of single-child nodes are
/// collapsed into one edge labelled with their concatenated characters.
/// Because that shape is unique for a given set of strings, equality is
/// structural and independent of insertion order.
pub struct CompactTrie {
    /// The root node of the trie
    pub(crate) root: TrieNode,

    /// The number of strings stored in the trie
    size: usize,

    /// Longest stored string in chars, computed on demand
    height: OnceCell<usize>,
}

impl CompactTrie {
    /// Creates a new, empty trie.
    ///
    /// # Examples
    ///
    /// ```
    /// use compact_trie::CompactTrie;
    ///
    /// let trie = CompactTrie::new();
    /// assert!(trie.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::from_root(TrieNode::default(), 0)
    }

    pub(crate) fn from_root(root: TrieNode, size: usize) -> Self {
        CompactTrie {
            root,
            size,
            height: OnceCell::new(),
        }
    }

    /// Returns the number of strings stored in the trie.
    ///
    /// # Examples
    ///
    /// ```
    /// use compact_trie::CompactTrie;
    ///
    /// let mut trie = CompactTrie::new();
    /// assert_eq!(trie.len(), 0);
    ///
    /// trie.add("hello");
    /// assert_eq!(trie.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the trie stores no strings, not even the empty one.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns `true` if the trie contains `key`.
    ///
    /// A prefix of a stored string is not itself a member unless it was
    /// added.
    ///
    /// # Examples
    ///
    /// ```
    /// use compact_trie::CompactTrie;
    ///
    /// let mut trie = CompactTrie::new();
    /// trie.add("hello");
    ///
    /// assert!(trie.contains("hello"));
    /// assert!(!trie.contains("hell"));
    /// ```
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        Q: AsRef<str> + ?Sized,
    {
        self.root
            .find(key.as_ref())
            .map_or(false, |node| node.terminal)
    }

    /// Adds `key` to the trie.
    ///
    /// Returns `true` if the string was not already present. Adding a string
    /// that is already stored leaves the trie untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use compact_trie::CompactTrie;
    ///
    /// let mut trie = CompactTrie::new();
    ///
    /// assert!(trie.add("alphabet"));
    /// assert!(trie.add("alpha"));
    /// assert!(!trie.add("alpha"));
    /// assert_eq!(trie.len(), 2);
    /// ```
    pub fn add<Q>(&mut self, key: &Q) -> bool
    where
        Q: AsRef<str> + ?Sized,
    {
        let added = self.root.insert(key.as_ref());

        if added {
            self.size += 1;
            self.height.take();
        }

        added
    }

    /// Removes `key` from the trie.
    ///
    /// Returns `true` if the string was present. Nodes left redundant by the
    /// removal are pruned or merged so the trie stays compressed.
    ///
    /// # Examples
    ///
    /// ```
    /// use compact_trie::CompactTrie;
    ///
    /// let mut trie: CompactTrie = vec!["abc", "abcde"].into_iter().collect();
    ///
    /// assert!(trie.remove("abc"));
    /// assert!(!trie.remove("abc"));
    /// assert!(trie.contains("abcde"));
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        Q: AsRef<str> + ?Sized,
    {
        let removed = self.root.remove(key.as_ref());

        if removed {
            self.size -= 1;
            self.height.take();
        }

        removed
    }

    /// Adds every string in `items`.
    ///
    /// Returns `true` if all of them were newly added, `false` if at least
    /// one was already present. Every item is added either way.
    pub fn add_all<I>(&mut self, items: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        items
            .into_iter()
            .fold(true, |all, item| self.add(item.as_ref()) && all)
    }

    /// Removes every string in `items`.
    ///
    /// Returns `true` if all of them were present, `false` if at least one
    /// was missing. Every present item is removed either way.
    pub fn remove_all<I>(&mut self, items: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        items
            .into_iter()
            .fold(true, |all, item| self.remove(item.as_ref()) && all)
    }

    /// Removes all strings from the trie.
    pub fn clear(&mut self) {
        self.root = TrieNode::default();
        self.size = 0;
        self.height.take();
    }

    /// Returns the length in chars of the longest stored string.
    ///
    /// An empty trie, or one holding only the empty string, has height 0.
    /// The value is cached until the next modification.
    ///
    /// # Examples
    ///
    /// ```
    /// use compact_trie::CompactTrie;
    ///
    /// let trie: CompactTrie = vec!["foo", "fbar", "qux"].into_iter().collect();
    /// assert_eq!(trie.height(), 4);
    /// ```
    pub fn height(&self) -> usize {
        *self.height.get_or_init(|| self.root.height())
    }

    /// Returns the number of edges on the longest root-to-leaf path.
    ///
    /// # Examples
    ///
    /// ```
    /// use compact_trie::CompactTrie;
    ///
    /// let trie: CompactTrie = vec!["foo", "bar", "qux"].into_iter().collect();
    /// assert_eq!(trie.depth(), 1);
    ///
    /// let trie: CompactTrie = vec!["foo", "fbar", "qux"].into_iter().collect();
    /// assert_eq!(trie.depth(), 2);
    /// ```
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Returns a lazy iterator over the stored strings in lexicographic
    /// order.
    ///
    /// The iterator borrows the trie; call `iter` again to restart.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(String::new(), &self.root, self.size)
    }

    /// Collects the stored strings into an ordered set.
    ///
    /// # Examples
    ///
    /// ```
    /// use compact_trie::CompactTrie;
    ///
    /// let mut trie = CompactTrie::new();
    /// trie.add("");
    ///
    /// assert_eq!(trie.values().into_iter().collect::<Vec<_>>(), vec![""]);
    /// ```
    pub fn values(&self) -> std::collections::BTreeSet<String> {
        self.iter().collect()
    }

    /// Creates a view of the strings that start with `prefix`.
    ///
    /// The view borrows the trie and copies nothing. It supports lookups,
    /// iteration and comparison with other views.
    ///
    /// # Examples
    ///
    /// ```
    /// use compact_trie::CompactTrie;
    ///
    /// let trie: CompactTrie = vec!["hello", "help", "world"].into_iter().collect();
    ///
    /// let view = trie.view_subtree("hel");
    /// assert_eq!(view.len(), 2);
    /// assert!(view.contains("hello"));
    /// assert!(!view.contains("world"));
    /// ```
    pub fn view_subtree<'a>(&'a self, prefix: &str) -> PrefixView<'a> {
        PrefixView::new(self, prefix)
    }

    /// Returns a new trie holding the strings that start with `prefix`,
    /// with `prefix` stripped from each of them.
    ///
    /// The prefix may end partway through an edge. A prefix that no stored
    /// string starts with yields an empty trie. The result shares nothing
    /// with `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// use compact_trie::CompactTrie;
    ///
    /// let trie: CompactTrie = vec!["fooa", "foob", "fooc"].into_iter().collect();
    ///
    /// let sub = trie.subtree("fo");
    /// assert_eq!(sub.iter().collect::<Vec<_>>(), vec!["oa", "ob", "oc"]);
    /// ```
    pub fn subtree(&self, prefix: &str) -> CompactTrie {
        self.view_subtree(prefix).to_trie()
    }

    /// Checks that the trie is in canonical compressed form.
    ///
    /// Every non-root node must be terminal or have at least two children,
    /// every edge label must be non-empty and filed under its first char,
    /// and the cached length must match the stored strings.
    pub fn check_invariants(&self) -> Result<(), Error> {
        let counted = self.root.validate()?;

        if counted != self.size {
            return Err(Error::SizeMismatch {
                cached: self.size,
                counted,
            });
        }

        Ok(())
    }
}

impl CompactTrie {
    /// Builds a trie rooted at a non-terminal node with a single edge.
    pub(crate) fn from_edge(edge: Edge) -> Self {
        let size = edge.target.subtree_size();
        let mut root = TrieNode::default();

        if let Some(first) = edge.label.chars().next() {
            root.children.insert(first, edge);
        }

        Self::from_root(root, size)
    }
}

// Default implementation
impl Default for CompactTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for CompactTrie {
    fn clone(&self) -> Self {
        CompactTrie {
            root: self.root.clone(),
            size: self.size,
            height: self.height.clone(),
        }
    }
}

impl fmt::Debug for CompactTrie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

// Structural comparison; the canonical shape makes this set equality
impl PartialEq for CompactTrie {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.root.same_shape(&other.root)
    }
}

impl Eq for CompactTrie {}

impl Hash for CompactTrie {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.size.hash(state);
        for value in self.iter() {
            value.hash(state);
        }
    }
}

impl<S: AsRef<str>> Extend<S> for CompactTrie {
    fn extend<I: IntoIterator<Item = S>>(&mut self, items: I) {
        for item in items {
            self.add(item.as_ref());
        }
    }
}

impl<S: AsRef<str>> std::iter::FromIterator<S> for CompactTrie {
    fn from_iter<I: IntoIterator<Item = S>>(items: I) -> Self {
        let mut trie = CompactTrie::new();
        trie.extend(items);
        trie
    }
}

impl<I> AddAssign<I> for CompactTrie
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn add_assign(&mut self, items: I) {
        self.extend(items);
    }
}

impl<'a> IntoIterator for &'a CompactTrie {
    type Item = String;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for CompactTrie {
    type Item = String;
    type IntoIter = std::collections::btree_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.values().into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn trie(keys: &[&str]) -> CompactTrie {
        keys.iter().collect()
    }

    fn hash_of(trie: &CompactTrie) -> u64 {
        let mut hasher = DefaultHasher::new();
        trie.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_new_trie() {
        let trie = CompactTrie::new();

        assert!(trie.is_empty());
        assert_eq!(trie.len(), 0);
        assert_eq!(trie.height(), 0);
        assert_eq!(trie.depth(), 0);
        assert_eq!(trie.iter().count(), 0);
        assert!(trie.check_invariants().is_ok());
    }

    #[test]
    fn test_car_scenario() {
        let mut trie = trie(&["car", "care", "cart", "cat"]);

        assert_eq!(trie.len(), 4);
        assert_eq!(
            trie.iter().collect::<Vec<_>>(),
            vec!["car", "care", "cart", "cat"]
        );
        assert!(!trie.contains("ca"));

        assert!(trie.remove("car"));
        assert_eq!(trie.len(), 3);
        assert!(!trie.contains("car"));
        assert!(trie.contains("care"));
        assert!(trie.contains("cart"));
        assert!(trie.check_invariants().is_ok());
        assert_eq!(trie, self::trie(&["care", "cart", "cat"]));
    }

    #[test]
    fn test_empty_string() {
        let mut trie = CompactTrie::new();

        assert!(!trie.contains(""));
        assert!(trie.add(""));
        assert!(!trie.add(""));
        assert_eq!(trie.len(), 1);
        assert!(trie.contains(""));
        assert_eq!(trie.iter().collect::<Vec<_>>(), vec![""]);

        assert!(trie.remove(""));
        assert!(trie.is_empty());
        assert_eq!(trie, CompactTrie::new());
    }

    #[test]
    fn test_add_accepts_string_types() {
        let mut trie = CompactTrie::new();
        let owned = "owned".to_string();

        assert!(trie.add("borrowed"));
        assert!(trie.add(&owned));
        assert!(trie.contains(&owned));
        assert!(trie.remove(owned.as_str()));
    }

    #[test]
    fn test_height_cache_invalidation() {
        let mut trie = trie(&["ab"]);
        assert_eq!(trie.height(), 2);

        trie.add("abcdef");
        assert_eq!(trie.height(), 6);

        trie.remove("abcdef");
        assert_eq!(trie.height(), 2);

        trie.clear();
        assert_eq!(trie.height(), 0);
    }

    #[test]
    fn test_height_counts_chars() {
        let trie = trie(&["h\u{e9}llo", "\u{1f600}"]);
        assert_eq!(trie.height(), 5);
    }

    #[test]
    fn test_add_all_and_remove_all() {
        let mut trie = CompactTrie::new();

        assert!(trie.add_all(Vec::<&str>::new()));
        assert!(trie.add_all(vec!["foobar", "fooqux", "foo"]));
        assert!(!trie.add_all(vec!["foo", "bar"]));
        assert_eq!(trie.len(), 4);
        assert!(trie.contains("bar"));

        assert!(trie.remove_all(vec!["foo", "bar"]));
        assert!(!trie.remove_all(vec!["foobar", "missing"]));
        assert_eq!(trie.iter().collect::<Vec<_>>(), vec!["fooqux"]);
        assert!(trie.check_invariants().is_ok());
    }

    #[test]
    fn test_add_assign() {
        let mut trie = CompactTrie::new();
        trie += vec!["foo", "bar"];
        trie += &["baz".to_string()];

        assert!(trie.contains("foo"));
        assert!(trie.contains("bar"));
        assert!(trie.contains("baz"));
    }

    #[test]
    fn test_equality_independent_of_order() {
        let left = trie(&["a", "ab", "abc", "abd", "ba", "x", "zz", "zx"]);
        let right = trie(&["zx", "abd", "x", "a", "zz", "ba", "abc", "ab"]);

        assert_eq!(left, right);
        assert_eq!(hash_of(&left), hash_of(&right));
        assert_ne!(left, trie(&["a", "ab", "abc"]));
    }

    #[test]
    fn test_equality_after_remove() {
        let mut left = trie(&["abcdef", "abcxyz"]);
        left.remove("abcxyz");

        assert_eq!(left, trie(&["abcdef"]));
    }

    #[test]
    fn test_clone_is_independent() {
        let original = trie(&["foo", "foobar"]);
        let mut copy = original.clone();

        copy.add("bar");
        copy.remove("foo");

        assert_eq!(original.len(), 2);
        assert!(original.contains("foo"));
        assert!(!original.contains("bar"));
    }

    #[test]
    fn test_debug_formats_as_set() {
        let trie = trie(&["b", "a"]);
        assert_eq!(format!("{:?}", trie), r#"{"a", "b"}"#);
    }

    #[test]
    fn test_owned_into_iter() {
        let trie = trie(&["b", "a", "c"]);
        let values: Vec<String> = trie.into_iter().collect();

        assert_eq!(values, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_from_edge() {
        let trie = CompactTrie::from_edge(Edge::leaf("abc"));

        assert_eq!(trie.len(), 1);
        assert!(trie.contains("abc"));
        assert!(trie.check_invariants().is_ok());
    }

    #[test]
    fn test_check_invariants_size_mismatch() {
        let mut trie = trie(&["a", "b"]);
        trie.size = 3;

        assert_eq!(
            trie.check_invariants(),
            Err(Error::SizeMismatch {
                cached: 3,
                counted: 2
            })
        );
    }
}
