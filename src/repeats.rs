//! Right-maximal repeats.
//!
//! Every internal node other than the root spells a substring that occurs at
//! least twice and is followed by different characters at some pair of its
//! occurrences. Leaves below two different children of the node witness such
//! a pair.

use std::iter::FusedIterator;

use crate::node::{NodeID, ROOT};
use crate::search::Occurrences;
use crate::text::IndexType;
use crate::tree::SuffixTree;

/// A repeated substring with two of its occurrences whose next characters
/// differ.
pub type RepeatPair<'a> = (&'a [u8], (IndexType, IndexType));

/// Every right-maximal repeat of the text `tree` was built from, once for
/// each witnessing pair of occurrences.
pub fn enumerate_repeats(tree: &SuffixTree) -> Repeats<'_> {
    Repeats::new(tree)
}

impl SuffixTree {
    /// See [`enumerate_repeats`].
    pub fn repeats(&self) -> Repeats<'_> {
        Repeats::new(self)
    }
}

/// Lazily yields [`RepeatPair`]s, node by node.
#[derive(Debug, Clone)]
pub struct Repeats<'a> {
    tree: &'a SuffixTree,
    internal: std::vec::IntoIter<NodeID>,
    repeat: &'a [u8],
    // Leaf labels below each child of the current node.
    groups: Vec<Vec<IndexType>>,
    first: usize,
    second: usize,
    a: usize,
    b: usize,
}

impl<'a> Repeats<'a> {
    fn new(tree: &'a SuffixTree) -> Self {
        Self {
            tree,
            internal: internal_nodes(tree).into_iter(),
            repeat: &[],
            groups: Vec::new(),
            first: 0,
            second: 1,
            a: 0,
            b: 0,
        }
    }

    fn load(&mut self, node: NodeID) {
        self.repeat = self.tree.path_label(node);
        self.groups = self
            .tree
            .children_of(node)
            .map(|child| Occurrences::below(self.tree, child).collect())
            .collect();
        self.first = 0;
        self.second = 1;
        self.a = 0;
        self.b = 0;
    }

    /// Next pair of labels drawn from two different groups.
    fn next_pair(&mut self) -> Option<(IndexType, IndexType)> {
        while self.first < self.groups.len() {
            if self.second >= self.groups.len() {
                self.first += 1;
                self.second = self.first + 1;
                self.a = 0;
                self.b = 0;
                continue;
            }
            let left = &self.groups[self.first];
            let right = &self.groups[self.second];
            if self.a >= left.len() {
                self.second += 1;
                self.a = 0;
                self.b = 0;
                continue;
            }
            if self.b >= right.len() {
                self.a += 1;
                self.b = 0;
                continue;
            }
            let pair = (left[self.a], right[self.b]);
            self.b += 1;
            return Some(pair);
        }
        None
    }
}

impl<'a> Iterator for Repeats<'a> {
    type Item = RepeatPair<'a>;

    fn next(&mut self) -> Option<RepeatPair<'a>> {
        loop {
            if let Some(pair) = self.next_pair() {
                return Some((self.repeat, pair));
            }
            let node = self.internal.next()?;
            self.load(node);
        }
    }
}

impl FusedIterator for Repeats<'_> {}

/// Internal nodes in depth-first order. The root spells the empty string and
/// is left out.
fn internal_nodes(tree: &SuffixTree) -> Vec<NodeID> {
    let mut nodes = Vec::new();
    let mut stack: Vec<NodeID> = tree.children_of(ROOT).collect();
    while let Some(node) = stack.pop() {
        if tree.get_node(node).is_leaf() {
            continue;
        }
        nodes.push(node);
        stack.extend(tree.children_of(node));
    }
    nodes
}
