//! Linear-time construction after McCreight.
//!
//! Suffixes are inserted longest first. If the head of suffix `i - 1` (the
//! parent of its leaf) spells `aX`, the head of suffix `i` lies below the
//! node spelling `X`. That node is reached through the suffix link of the
//! head's parent followed by a *fast scan*, which replays the head's edge
//! label by comparing edge lengths only, since the characters are known to
//! match. A *slow scan* then compares characters from there to find where the
//! new suffix leaves the tree.
//!
//! The fast scan never descends more edges in total than O(n): the string
//! depth of the current node drops by at most one per suffix link, and each
//! skipped edge raises it. The slow scan only ever reads characters past the
//! furthest text position matched so far.

use tracing::trace;

use crate::builder::{Algorithm, SuffixTreeBuilder};
use crate::error::Result;
use crate::node::{NodeID, ROOT};
use crate::text::{EdgeRange, IndexType};
use crate::tree::SuffixTree;

/// Builds the suffix tree of `text` with McCreight's algorithm in O(n) time.
///
/// # Errors
///
/// Fails if `text` contains the default sentinel `$`.
pub fn build_mccreight(text: impl AsRef<[u8]>) -> Result<SuffixTree> {
    SuffixTreeBuilder::new().algorithm(Algorithm::McCreight).build(text)
}

pub(crate) fn construct(tree: &mut SuffixTree) -> Result<()> {
    let mut leaf = tree.insert_leaf(ROOT, 0, 0);
    for i in 1..tree.len() {
        let Some(head) = tree.parent(leaf) else {
            unreachable!("leaf {leaf} has no parent");
        };
        // The previous leaf's edge starts right after its head's path label.
        let head_depth = tree.range(leaf).start - (i - 1);

        let w = suffix_search(tree, head);
        let depth = head_depth.saturating_sub(1);
        let locus = tree.locate_suffix(w, i, depth)?;
        let u = tree.split_at(locus);
        leaf = tree.insert_leaf(u, i, locus.depth);
        trace!(suffix = i, head = u, depth = locus.depth, "inserted suffix");
    }
    Ok(())
}

/// Returns the node whose path label is that of `v` minus its first
/// character, creating it by an edge split when needed, and caches it as the
/// suffix link of `v`.
pub(crate) fn suffix_search(tree: &mut SuffixTree, v: NodeID) -> NodeID {
    if let Some(w) = tree.suffix_link(v) {
        return w;
    }
    let Some(parent) = tree.parent(v) else {
        unreachable!("root is created with a suffix link");
    };
    let EdgeRange { start, end } = tree.range(v);
    let w = if parent == ROOT {
        if end - start == 1 {
            ROOT
        } else {
            fast_scan(tree, ROOT, start + 1, end)
        }
    } else {
        let Some(parent_link) = tree.suffix_link(parent) else {
            panic!("node {parent} has no suffix link while resolving the link of its child {v}");
        };
        fast_scan(tree, parent_link, start, end)
    };
    tree.set_suffix_link(v, w);
    trace!(node = v, link = w, "resolved suffix link");
    w
}

/// Descends from `node` along `text[start..end]`, which is known to be in the
/// tree, skipping whole edges by length. If the path ends inside an edge the
/// edge is split there and the new node returned.
pub(crate) fn fast_scan(tree: &mut SuffixTree, mut node: NodeID, mut start: IndexType, end: IndexType) -> NodeID {
    while start < end {
        let ch = tree.text()[start];
        let Some(child) = tree.find_child(node, ch) else {
            panic!("fast scan found no edge for {:?} below node {node} at text offset {start}", ch as char);
        };
        let remaining = end - start;
        let len = tree.edge_length(child);
        if len > remaining {
            return tree.split_edge(child, remaining);
        }
        start += len;
        node = child;
    }
    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Alphabet;
    use crate::naive::build_naive;
    use crate::text::IndexedText;

    fn empty_tree(source: &[u8]) -> SuffixTree {
        SuffixTree::with_text(IndexedText::new(source, b'$').unwrap(), Alphabet::Bytes)
    }

    #[test]
    fn test_fast_scan() {
        let mut tree = empty_tree(b"ababa");
        let w = tree.insert_leaf(ROOT, 0, 0);
        assert_eq!(fast_scan(&mut tree, ROOT, 0, 6), w);

        let u = fast_scan(&mut tree, ROOT, 0, 3);
        assert_eq!(tree.range(u), EdgeRange::new(0, 3));
        assert_eq!(tree.parent(u), Some(ROOT));
        assert_eq!(tree.find_child(u, b'b'), Some(w));
        assert_eq!(tree.find_child(ROOT, b'a'), Some(u));
        assert_eq!(tree.range(w), EdgeRange::new(3, 6));
        assert_eq!(tree.parent(w), Some(u));

        let v = fast_scan(&mut tree, ROOT, 0, 4);
        assert_eq!(tree.range(v), EdgeRange::new(3, 4));
        assert_eq!(tree.parent(v), Some(u));
    }

    #[test]
    fn test_fast_scan_lands_on_node() {
        let mut tree = empty_tree(b"ababa");
        let leaf = tree.insert_leaf(ROOT, 0, 0);
        let u = tree.split_edge(leaf, 2);
        let count = tree.node_count();
        assert_eq!(fast_scan(&mut tree, ROOT, 2, 4), u);
        assert_eq!(fast_scan(&mut tree, ROOT, 0, 0), ROOT);
        assert_eq!(tree.node_count(), count);
    }

    #[test]
    fn test_suffix_search_cases() {
        let mut tree = empty_tree(b"aabab");
        let leaf = tree.insert_leaf(ROOT, 0, 0);
        assert_eq!(suffix_search(&mut tree, ROOT), ROOT);

        // "a" below the root drops to the root.
        let a = tree.split_edge(leaf, 1);
        assert_eq!(suffix_search(&mut tree, a), ROOT);
        assert_eq!(tree.suffix_link(a), Some(ROOT));
    }

    #[test]
    fn test_suffix_search_splits_for_long_root_child() {
        // "ab" hangs off the root; its link must spell "b".
        let mut tree = empty_tree(b"abb");
        let leaf0 = tree.insert_leaf(ROOT, 0, 0);
        let leaf1 = tree.insert_leaf(ROOT, 1, 0);
        let ab = tree.split_edge(leaf0, 2);
        let b = suffix_search(&mut tree, ab);
        assert_eq!(tree.path_label(b), b"b");
        assert_eq!(tree.find_child(b, b'b'), Some(leaf1));
        assert_eq!(tree.suffix_link(ab), Some(b));
    }

    #[test]
    #[should_panic(expected = "has no suffix link")]
    fn test_suffix_search_requires_parent_link() {
        let mut tree = empty_tree(b"abcabc");
        let leaf = tree.insert_leaf(ROOT, 0, 0);
        let abc = tree.split_edge(leaf, 3);
        tree.split_edge(abc, 2);
        suffix_search(&mut tree, abc);
    }

    #[test]
    fn test_mississippi_links() {
        let tree = build_mccreight("mississippi").unwrap();
        tree.validate().unwrap();
        let issi = tree.root().child(b'i').unwrap().child(b's').unwrap();
        assert_eq!(issi.path_label(), b"issi");
        assert_eq!(issi.suffix_link().unwrap().path_label(), b"ssi");
    }

    #[test]
    fn test_matches_naive_shape() {
        for text in ["", "a", "abbaa", "ABABB", "mississippi", "aaaaaaa", "abcabxabcd"] {
            let fast = build_mccreight(text).unwrap();
            let slow = build_naive(text).unwrap();
            fast.validate().unwrap();
            assert_eq!(fast.node_count(), slow.node_count(), "{text}");
            let spelled = |tree: &SuffixTree| {
                let mut labels: Vec<Vec<u8>> = tree.nodes().map(|record| tree.path_label(record.id).to_vec()).collect();
                labels.sort();
                labels
            };
            assert_eq!(spelled(&fast), spelled(&slow), "{text}");
        }
    }
}
