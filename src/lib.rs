//! Suffix trees over byte strings, built either naively in O(n²) or with
//! McCreight's linear-time algorithm.
//!
//! The text gets a unique sentinel appended so every suffix ends at its own
//! leaf. Edges are stored as ranges into that text and nodes live in a single
//! arena, so a built tree is a plain, immutable value that can be searched
//! from many threads at once.
//!
//! # Examples
//!
//! ```
//! use suffix_tree::{build_mccreight, build_naive};
//!
//! let tree = build_mccreight("mississippi")?;
//! let mut hits: Vec<usize> = tree.find_occurrences("i").collect();
//! hits.sort_unstable();
//! assert_eq!(hits, vec![1, 4, 7, 10]);
//!
//! assert!(tree.contains("sip"));
//! assert!(tree.is_suffix("ppi"));
//! assert_eq!(build_naive("mississippi")?.node_count(), tree.node_count());
//!
//! for (repeat, (a, b)) in tree.repeats() {
//!     assert_eq!(&tree.text()[a..a + repeat.len()], repeat);
//!     assert_eq!(&tree.text()[b..b + repeat.len()], repeat);
//! }
//! # Ok::<(), suffix_tree::Error>(())
//! ```
mod builder;
mod error;
mod mccreight;
mod naive;
mod node;
mod repeats;
mod search;
mod text;
mod tree;

#[cfg(test)]
mod proptests;

pub use builder::{Algorithm, Alphabet, SuffixTreeBuilder, DEFAULT_SENTINEL};
pub use error::{Error, Result};
pub use mccreight::build_mccreight;
pub use naive::build_naive;
pub use node::{NodeID, ROOT};
pub use repeats::{enumerate_repeats, RepeatPair, Repeats};
pub use search::{find_occurrences, Locus, Occurrences, PathEnd};
pub use text::{EdgeRange, IndexType, IndexedText};
pub use tree::{NodeRecord, NodeRef, Nodes, SuffixTree};
