use std::collections::{hash_map, HashMap};

use crate::builder::Alphabet;
use crate::text::{EdgeRange, IndexType};

pub type NodeID = usize;

/// The root always lives at the front of the arena.
pub const ROOT: NodeID = 0;

const DNA_SLOTS: usize = 5;
const SENTINEL_SLOT: usize = DNA_SLOTS - 1;

/// Maps a DNA letter or the sentinel to its slot in a fixed child table.
pub(crate) fn dna_slot(ch: u8, sentinel: u8) -> Option<usize> {
    match ch {
        b'A' => Some(0),
        b'C' => Some(1),
        b'G' => Some(2),
        b'T' => Some(3),
        _ if ch == sentinel => Some(SENTINEL_SLOT),
        _ => None,
    }
}

/// Outgoing edges of a node, keyed by the first character of each edge.
#[derive(Debug, Clone)]
pub(crate) enum Children {
    Sparse(HashMap<u8, NodeID>),
    Dna([Option<NodeID>; DNA_SLOTS]),
}

impl Children {
    pub(crate) fn new(alphabet: Alphabet) -> Self {
        match alphabet {
            Alphabet::Bytes => Children::Sparse(HashMap::new()),
            Alphabet::Dna => Children::Dna([None; DNA_SLOTS]),
        }
    }

    pub(crate) fn get(&self, ch: u8, sentinel: u8) -> Option<NodeID> {
        match self {
            Children::Sparse(map) => map.get(&ch).copied(),
            Children::Dna(slots) => dna_slot(ch, sentinel).and_then(|slot| slots[slot]),
        }
    }

    /// Sets the child for `ch`, returning the child it replaced.
    pub(crate) fn insert(&mut self, ch: u8, sentinel: u8, node: NodeID) -> Option<NodeID> {
        match self {
            Children::Sparse(map) => map.insert(ch, node),
            Children::Dna(slots) => {
                let slot = dna_slot(ch, sentinel)
                    .unwrap_or_else(|| panic!("symbol {:?} has no slot in a DNA child table", ch as char));
                slots[slot].replace(node)
            }
        }
    }

    pub(crate) fn len(&self) -> usize {
        match self {
            Children::Sparse(map) => map.len(),
            Children::Dna(slots) => slots.iter().filter(|slot| slot.is_some()).count(),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn ids(&self) -> ChildIter<'_> {
        match self {
            Children::Sparse(map) => ChildIter::Sparse(map.values()),
            Children::Dna(slots) => ChildIter::Dna(slots.iter()),
        }
    }
}

pub(crate) enum ChildIter<'a> {
    Sparse(hash_map::Values<'a, u8, NodeID>),
    Dna(std::slice::Iter<'a, Option<NodeID>>),
}

impl Iterator for ChildIter<'_> {
    type Item = NodeID;

    fn next(&mut self) -> Option<NodeID> {
        match self {
            ChildIter::Sparse(it) => it.next().copied(),
            ChildIter::Dna(it) => it.find_map(|slot| *slot),
        }
    }
}

/// A node of the tree. `range` is the label of the edge from the parent, so
/// there is no separate edge type. `label` is set only on leaves and holds
/// the start of the suffix the leaf spells; `suffix_link` is only ever set on
/// internal nodes.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) children: Children,
    pub(crate) parent: Option<NodeID>,
    pub(crate) suffix_link: Option<NodeID>,
    pub(crate) range: EdgeRange,
    pub(crate) label: Option<IndexType>,
}

impl Node {
    pub(crate) fn root(alphabet: Alphabet) -> Self {
        Self {
            children: Children::new(alphabet),
            parent: None,
            suffix_link: Some(ROOT),
            range: EdgeRange::new(0, 0),
            label: None,
        }
    }

    pub(crate) fn internal(range: EdgeRange, parent: NodeID, alphabet: Alphabet) -> Self {
        Self {
            children: Children::new(alphabet),
            parent: Some(parent),
            suffix_link: None,
            range,
            label: None,
        }
    }

    pub(crate) fn leaf(range: EdgeRange, parent: NodeID, label: IndexType, alphabet: Alphabet) -> Self {
        Self {
            children: Children::new(alphabet),
            parent: Some(parent),
            suffix_link: None,
            range,
            label: Some(label),
        }
    }

    pub(crate) fn is_leaf(&self) -> bool {
        self.label.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_child() {
        let mut children = Children::new(Alphabet::Bytes);
        assert_eq!(children.insert(b'a', b'$', 7), None);
        assert_eq!(children.get(b'a', b'$'), Some(7));
        assert_eq!(children.get(b'b', b'$'), None);
        assert_eq!(children.insert(b'a', b'$', 9), Some(7));
        assert_eq!(children.len(), 1);
    }

    #[test]
    fn test_dna_slots() {
        let mut children = Children::new(Alphabet::Dna);
        assert!(children.is_empty());
        children.insert(b'G', b'$', 3);
        children.insert(b'$', b'$', 4);
        assert_eq!(children.get(b'G', b'$'), Some(3));
        assert_eq!(children.get(b'$', b'$'), Some(4));
        assert_eq!(children.get(b'N', b'$'), None);
        assert_eq!(children.get(b'A', b'$'), None);
        let mut ids: Vec<NodeID> = children.ids().collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![3, 4]);
    }

    #[test]
    #[should_panic(expected = "has no slot")]
    fn test_dna_rejects_foreign_symbol() {
        let mut children = Children::new(Alphabet::Dna);
        children.insert(b'N', b'$', 1);
    }
}
