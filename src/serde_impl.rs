//! Serialization of a trie as a sequence of strings.
//!
//! The tree shape is never written out: it is rebuilt on deserialization by
//! adding the strings one at a time, so duplicates collapse and the result
//! is always in canonical form.

use std::fmt;

use serde::de::{Deserialize, Deserializer, SeqAccess, Visitor};
use serde::ser::{Serialize, Serializer};

use crate::CompactTrie;

impl Serialize for CompactTrie {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

struct TrieVisitor;

impl<'de> Visitor<'de> for TrieVisitor {
    type Value = CompactTrie;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a sequence of strings")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut trie = CompactTrie::new();

        while let Some(value) = seq.next_element::<String>()? {
            trie.add(&value);
        }

        Ok(trie)
    }
}

impl<'de> Deserialize<'de> for CompactTrie {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(TrieVisitor)
    }
}
