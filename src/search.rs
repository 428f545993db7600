//! Path matching against the tree, for both construction and queries.

use std::iter::FusedIterator;

use crate::error::{Error, Result};
use crate::node::{NodeID, ROOT};
use crate::text::{EdgeRange, IndexType};
use crate::tree::SuffixTree;

/// A position in the tree: `offset` characters down the edge into `node`,
/// or exactly at `node` when `offset` is 0. `depth` is the string depth of
/// the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locus {
    pub node: NodeID,
    pub offset: IndexType,
    pub depth: IndexType,
}

impl Locus {
    pub const fn at_node(&self) -> bool {
        self.offset == 0
    }
}

/// Where a [`SuffixTree::search_path`] stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathEnd {
    /// The next query character is not in the tree at this position.
    Diverged(Locus),
    /// The whole query matched; it ends at this position.
    Exhausted(Locus),
}

impl PathEnd {
    pub fn locus(&self) -> Locus {
        match *self {
            PathEnd::Diverged(locus) | PathEnd::Exhausted(locus) => locus,
        }
    }
}

impl SuffixTree {
    /// Matches `query[j..]` downwards from `node`, whose string depth is
    /// `depth`.
    pub fn search_path(&self, mut node: NodeID, query: &[u8], mut j: usize, mut depth: IndexType) -> PathEnd {
        loop {
            if j == query.len() {
                return PathEnd::Exhausted(Locus { node, offset: 0, depth });
            }
            let Some(child) = self.find_child(node, query[j]) else {
                return PathEnd::Diverged(Locus { node, offset: 0, depth });
            };
            let edge = self.range(child);
            let k = self.match_edge(edge, &query[j..]);
            if k < edge.len() {
                let locus = Locus {
                    node: child,
                    offset: k,
                    depth: depth + k,
                };
                return if j + k == query.len() {
                    PathEnd::Exhausted(locus)
                } else {
                    PathEnd::Diverged(locus)
                };
            }
            node = child;
            j += k;
            depth += k;
        }
    }

    /// Number of leading characters `query` shares with the edge label.
    fn match_edge(&self, edge: EdgeRange, query: &[u8]) -> IndexType {
        self.indexed_text()
            .slice(edge)
            .iter()
            .zip(query)
            .take_while(|(a, b)| a == b)
            .count()
    }

    /// Finds where suffix `suffix` of the text leaves the tree, starting from
    /// `node` whose path label is already known to match the first `depth`
    /// characters of the suffix.
    pub(crate) fn locate_suffix(&self, node: NodeID, suffix: IndexType, depth: IndexType) -> Result<Locus> {
        match self.search_path(node, self.text(), suffix + depth, depth) {
            PathEnd::Diverged(locus) => Ok(locus),
            PathEnd::Exhausted(_) => Err(Error::UnterminatedMatch { suffix }),
        }
    }

    /// All positions `i` where `pattern` occurs in the source text. Order is
    /// fixed for a given tree but otherwise unspecified.
    pub fn find_occurrences(&self, pattern: impl AsRef<[u8]>) -> Occurrences<'_> {
        find_occurrences(self, pattern.as_ref())
    }

    /// Whether `pattern` occurs anywhere in the source text.
    pub fn contains(&self, pattern: impl AsRef<[u8]>) -> bool {
        let pattern = pattern.as_ref();
        !pattern.contains(&self.sentinel()) && matches!(self.search_path(ROOT, pattern, 0, 0), PathEnd::Exhausted(_))
    }

    /// Whether `pattern` is a suffix of the source text.
    pub fn is_suffix(&self, pattern: impl AsRef<[u8]>) -> bool {
        let pattern = pattern.as_ref();
        let sentinel = self.sentinel();
        if pattern.contains(&sentinel) {
            return false;
        }
        match self.search_path(ROOT, pattern, 0, 0) {
            PathEnd::Exhausted(locus) if locus.at_node() => self.find_child(locus.node, sentinel).is_some(),
            PathEnd::Exhausted(locus) => self.text()[self.range(locus.node).start + locus.offset] == sentinel,
            PathEnd::Diverged(_) => false,
        }
    }
}

/// All positions where `pattern` occurs in the text `tree` was built from.
///
/// The empty pattern occurs at every position `0..=n`. A pattern containing
/// the sentinel occurs nowhere.
pub fn find_occurrences<'a>(tree: &'a SuffixTree, pattern: &[u8]) -> Occurrences<'a> {
    if pattern.contains(&tree.sentinel()) {
        return Occurrences::empty(tree);
    }
    match tree.search_path(ROOT, pattern, 0, 0) {
        PathEnd::Exhausted(locus) => Occurrences::below(tree, locus.node),
        PathEnd::Diverged(_) => Occurrences::empty(tree),
    }
}

/// Lazily yields the leaf labels of one subtree.
#[derive(Debug, Clone)]
pub struct Occurrences<'a> {
    tree: &'a SuffixTree,
    stack: Vec<NodeID>,
}

impl<'a> Occurrences<'a> {
    pub(crate) fn below(tree: &'a SuffixTree, node: NodeID) -> Self {
        Self { tree, stack: vec![node] }
    }

    fn empty(tree: &'a SuffixTree) -> Self {
        Self { tree, stack: Vec::new() }
    }
}

impl Iterator for Occurrences<'_> {
    type Item = IndexType;

    fn next(&mut self) -> Option<IndexType> {
        while let Some(node) = self.stack.pop() {
            match self.tree.get_node(node).label {
                Some(label) => return Some(label),
                None => self.stack.extend(self.tree.children_of(node)),
            }
        }
        None
    }
}

impl FusedIterator for Occurrences<'_> {}
