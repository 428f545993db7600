//! Quadratic construction: every suffix is matched from the root.

use tracing::trace;

use crate::builder::{Algorithm, SuffixTreeBuilder};
use crate::error::Result;
use crate::node::ROOT;
use crate::tree::SuffixTree;

/// Builds the suffix tree of `text` by inserting its suffixes one at a time,
/// longest first. Takes O(n²) time in the worst case.
///
/// # Errors
///
/// Fails if `text` contains the default sentinel `$`.
pub fn build_naive(text: impl AsRef<[u8]>) -> Result<SuffixTree> {
    SuffixTreeBuilder::new().algorithm(Algorithm::Naive).build(text)
}

pub(crate) fn construct(tree: &mut SuffixTree) -> Result<()> {
    for j in 0..tree.len() {
        let locus = tree.locate_suffix(ROOT, j, 0)?;
        let head = tree.split_at(locus);
        let leaf = tree.insert_leaf(head, j, locus.depth);
        trace!(suffix = j, head, leaf, depth = locus.depth, "inserted suffix");
    }
    Ok(())
}
