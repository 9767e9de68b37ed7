//! Basic usage of the compact trie
use compact_trie::CompactTrie;

fn main() {
    // Create a new trie and add some strings
    let mut trie = CompactTrie::new();
    trie.add("car");
    trie.add("care");
    trie.add("cart");
    trie.add("cat");

    assert_eq!(trie.len(), 4);
    assert!(trie.contains("care"));
    assert!(!trie.contains("ca"));

    // Adding a string twice is a no-op
    assert!(!trie.add("car"));

    println!("Stored strings:");
    for value in &trie {
        println!("  {:?}", value);
    }

    // Strings starting with "car", prefix stripped
    let sub = trie.subtree("car");
    println!("\nSuffixes after \"car\": {:?}", sub);

    // Removing re-compresses the tree
    trie.remove("car");
    trie.remove("cat");
    println!("\nAfter removals: {:?} (depth {})", trie, trie.depth());

    // Bulk extension
    trie += vec!["dog", "door"];
    println!("After extending: {:?}", trie);
}
