//! Grouping URLs by prefix with a compact trie
use compact_trie::CompactTrie;
use url::Url;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let urls = [
        "https://example.com/",
        "https://example.com/about",
        "https://example.com/contact",
        "https://example.com/blog",
        "https://example.com/blog/first-post",
        "https://example.com/blog/second-post",
    ];

    // Normalise through url::Url before storing
    let mut trie = CompactTrie::new();
    for raw in &urls {
        trie.add(Url::parse(raw)?.as_str());
    }

    println!("Stored {} URLs, longest is {} chars", trie.len(), trie.height());

    let blog = Url::parse("https://example.com/blog")?;
    let view = trie.view_subtree(blog.as_str());

    println!("\nBlog section pages:");
    for url in view.iter() {
        println!("  {}", url);
    }

    let unknown = Url::parse("https://example.com/unknown")?;
    println!("\nURL existence check:");
    println!("  {} exists: {}", blog, trie.contains(blog.as_str()));
    println!("  {} exists: {}", unknown, trie.contains(unknown.as_str()));

    Ok(())
}
