use std::collections::HashSet;
use std::fmt;

use tracing::trace;

use crate::builder::Alphabet;
use crate::node::{ChildIter, Node, NodeID, ROOT};
use crate::search::Locus;
use crate::text::{EdgeRange, IndexType, IndexedText};

/// A suffix tree over one sentinel-terminated text.
///
/// Nodes live in an arena indexed by [`NodeID`], with the root at index 0.
/// Parent and suffix links are plain ids into the same arena. Once built the
/// tree is never mutated, so any number of threads may query it at once.
///
/// # Examples
///
/// ```
/// use suffix_tree::build_mccreight;
///
/// let tree = build_mccreight("mississippi")?;
/// let mut hits: Vec<usize> = tree.find_occurrences("ssi").collect();
/// hits.sort_unstable();
/// assert_eq!(hits, vec![2, 5]);
/// # Ok::<(), suffix_tree::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct SuffixTree {
    text: IndexedText,
    alphabet: Alphabet,
    node_storage: Vec<Node>,
}

impl SuffixTree {
    /// An empty tree holding only the self-linked root.
    pub(crate) fn with_text(text: IndexedText, alphabet: Alphabet) -> Self {
        let mut node_storage = Vec::with_capacity(2 * text.len());
        node_storage.push(Node::root(alphabet));
        Self {
            text,
            alphabet,
            node_storage,
        }
    }

    /// The indexed text, sentinel included.
    pub fn text(&self) -> &[u8] {
        self.text.as_bytes()
    }

    /// The text as supplied to the builder.
    pub fn source(&self) -> &[u8] {
        self.text.source()
    }

    pub fn sentinel(&self) -> u8 {
        self.text.sentinel()
    }

    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    /// Length of the indexed text, sentinel included.
    pub fn len(&self) -> IndexType {
        self.text.len()
    }

    /// True when the source text was empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.node_storage.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.node_storage.iter().filter(|node| node.is_leaf()).count()
    }

    pub fn root(&self) -> NodeRef<'_> {
        NodeRef { tree: self, id: ROOT }
    }

    /// A view of node `id`, or `None` if no such node exists.
    pub fn node(&self, id: NodeID) -> Option<NodeRef<'_>> {
        (id < self.node_storage.len()).then_some(NodeRef { tree: self, id })
    }

    pub(crate) fn indexed_text(&self) -> &IndexedText {
        &self.text
    }

    pub(crate) fn get_node(&self, node_id: NodeID) -> &Node {
        &self.node_storage[node_id]
    }

    fn get_node_mut(&mut self, node_id: NodeID) -> &mut Node {
        &mut self.node_storage[node_id]
    }

    fn create_node(&mut self, node: Node) -> NodeID {
        self.node_storage.push(node);
        self.node_storage.len() - 1
    }

    pub(crate) fn find_child(&self, node: NodeID, ch: u8) -> Option<NodeID> {
        self.get_node(node).children.get(ch, self.text.sentinel())
    }

    pub(crate) fn children_of(&self, node: NodeID) -> ChildIter<'_> {
        self.get_node(node).children.ids()
    }

    pub(crate) fn parent(&self, node: NodeID) -> Option<NodeID> {
        self.get_node(node).parent
    }

    pub(crate) fn edge_length(&self, node: NodeID) -> IndexType {
        self.get_node(node).range.len()
    }

    pub(crate) fn range(&self, node: NodeID) -> EdgeRange {
        self.get_node(node).range
    }

    pub(crate) fn suffix_link(&self, node: NodeID) -> Option<NodeID> {
        self.get_node(node).suffix_link
    }

    /// Records the suffix link of an internal node. A link is set at most once.
    pub(crate) fn set_suffix_link(&mut self, node: NodeID, target: NodeID) {
        let current = self.get_node(node);
        assert!(!current.is_leaf(), "suffix link set on leaf {node}");
        assert!(
            current.suffix_link.map_or(true, |existing| existing == target),
            "suffix link of node {node} already points to {:?}, refusing {target}",
            current.suffix_link
        );
        self.get_node_mut(node).suffix_link = Some(target);
    }

    fn set_child(&mut self, node: NodeID, ch: u8, child: NodeID) -> Option<NodeID> {
        let sentinel = self.text.sentinel();
        self.get_node_mut(node).children.insert(ch, sentinel, child)
    }

    /// Splits the edge into `v` after `k` characters. The new internal node
    /// takes `v`'s place under its parent and becomes `v`'s parent.
    pub(crate) fn split_edge(&mut self, v: NodeID, k: IndexType) -> NodeID {
        let len = self.edge_length(v);
        assert!(
            k > 0 && k < len,
            "split of node {v} at offset {k} is outside its edge of length {len}"
        );
        let Some(parent) = self.parent(v) else {
            unreachable!("node {v} has a non-empty edge but no parent");
        };
        let EdgeRange { start, end } = self.range(v);
        let split = start + k;

        let (upper_key, lower_key) = (self.text[start], self.text[split]);

        let u = self.create_node(Node::internal(EdgeRange::new(start, split), parent, self.alphabet));
        self.set_child(u, lower_key, v);
        let node = self.get_node_mut(v);
        node.range = EdgeRange::new(split, end);
        node.parent = Some(u);
        let replaced = self.set_child(parent, upper_key, u);
        debug_assert_eq!(replaced, Some(v));

        trace!(node = v, offset = k, new_node = u, "split edge");
        u
    }

    /// Hangs the leaf for suffix `j` below `u`, whose string depth is `depth`.
    pub(crate) fn insert_leaf(&mut self, u: NodeID, j: IndexType, depth: IndexType) -> NodeID {
        let start = j + depth;
        let end = self.text.len();
        assert!(
            start < end,
            "leaf for suffix {j} below node {u} at depth {depth} would have an empty edge"
        );
        let key = self.text[start];
        assert!(
            self.find_child(u, key).is_none(),
            "child collision on {:?} below node {u} inserting suffix {j}",
            key as char
        );
        let leaf = self.create_node(Node::leaf(EdgeRange::new(start, end), u, j, self.alphabet));
        self.set_child(u, key, leaf);
        leaf
    }

    /// Returns the node at `locus`, splitting its edge first when the locus
    /// falls inside one.
    pub(crate) fn split_at(&mut self, locus: Locus) -> NodeID {
        if locus.offset > 0 {
            self.split_edge(locus.node, locus.offset)
        } else {
            locus.node
        }
    }

    /// Total length of the edge labels from the root down to `node`.
    pub fn string_depth(&self, node: NodeID) -> IndexType {
        let mut depth = 0;
        let mut cur = Some(node);
        while let Some(id) = cur {
            let current = self.get_node(id);
            depth += current.range.len();
            cur = current.parent;
        }
        depth
    }

    /// The string spelled from the root to `node`, as a slice of the text.
    pub fn path_label(&self, node: NodeID) -> &[u8] {
        let depth = self.string_depth(node);
        // Any leaf below `node` starts with its path label.
        let mut leaf = node;
        while let Some(child) = self.children_of(leaf).next() {
            leaf = child;
        }
        match self.get_node(leaf).label {
            Some(label) => &self.text()[label..label + depth],
            None => &[],
        }
    }

    /// Depth-first enumeration of every node, parents before children and
    /// children in ascending order of their first character.
    pub fn nodes(&self) -> Nodes<'_> {
        Nodes {
            tree: self,
            stack: vec![ROOT],
        }
    }

    /// Children of `node` ordered by the first character of their edge.
    fn sorted_children(&self, node: NodeID) -> Vec<NodeID> {
        let mut children: Vec<NodeID> = self.children_of(node).collect();
        children.sort_unstable_by_key(|&child| self.text[self.range(child).start]);
        children
    }

    /// Concatenates edge labels from the root down, without the leaf shortcut
    /// `path_label` takes.
    fn spell_path(&self, node: NodeID) -> Vec<u8> {
        let mut edges = Vec::new();
        let mut cur = Some(node);
        while let Some(id) = cur {
            edges.push(self.range(id));
            cur = self.parent(id);
        }
        edges
            .iter()
            .rev()
            .flat_map(|&range| self.text.slice(range).iter().copied())
            .collect()
    }

    /// Checks the structural invariants of the tree and describes the first
    /// one that does not hold.
    pub fn validate(&self) -> Result<(), String> {
        let root = self.get_node(ROOT);
        if !root.range.is_empty() || root.parent.is_some() || root.label.is_some() {
            return Err("root must have an empty edge, no parent and no label".to_string());
        }
        if root.suffix_link != Some(ROOT) {
            return Err("root must link to itself".to_string());
        }

        let mut seen_labels = HashSet::new();
        for id in 0..self.node_storage.len() {
            let node = self.get_node(id);
            for child in node.children.ids() {
                let child_node = self.get_node(child);
                if child_node.parent != Some(id) {
                    return Err(format!("child {child} of node {id} points to parent {:?}", child_node.parent));
                }
                if self.find_child(id, self.text[child_node.range.start]) != Some(child) {
                    return Err(format!("child {child} of node {id} is stored under the wrong key"));
                }
            }
            if id == ROOT {
                continue;
            }
            if node.range.is_empty() || node.range.end > self.text.len() {
                return Err(format!("node {id} has invalid edge {:?}", node.range));
            }
            match node.label {
                Some(label) => {
                    if !node.children.is_empty() {
                        return Err(format!("leaf {id} has children"));
                    }
                    if node.suffix_link.is_some() {
                        return Err(format!("leaf {id} has a suffix link"));
                    }
                    if !seen_labels.insert(label) {
                        return Err(format!("suffix {label} has more than one leaf"));
                    }
                    if label >= self.text.len() || self.spell_path(id) != self.text()[label..] {
                        return Err(format!("leaf {id} does not spell suffix {label}"));
                    }
                }
                None => {
                    if node.children.len() < 2 {
                        return Err(format!("internal node {id} has fewer than two children"));
                    }
                }
            }
            if let Some(link) = node.suffix_link {
                let path = self.spell_path(id);
                if self.spell_path(link) != path[1..] {
                    return Err(format!("suffix link {id} -> {link} does not drop exactly one character"));
                }
            }
        }
        if seen_labels.len() != self.text.len() {
            return Err(format!(
                "tree has {} leaves for a text of length {}",
                seen_labels.len(),
                self.text.len()
            ));
        }
        Ok(())
    }
}

/// A read-only view of one node.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a SuffixTree,
    id: NodeID,
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> NodeID {
        self.id
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.tree.parent(self.id).map(|id| NodeRef { tree: self.tree, id })
    }

    pub fn range(&self) -> EdgeRange {
        self.tree.range(self.id)
    }

    /// The label of the edge from the parent.
    pub fn edge(&self) -> &'a [u8] {
        self.tree.text.slice(self.range())
    }

    /// Start of the suffix a leaf spells; `None` for internal nodes.
    pub fn label(&self) -> Option<IndexType> {
        self.tree.get_node(self.id).label
    }

    pub fn suffix_link(&self) -> Option<NodeRef<'a>> {
        self.tree.suffix_link(self.id).map(|id| NodeRef { tree: self.tree, id })
    }

    pub fn is_leaf(&self) -> bool {
        self.tree.get_node(self.id).is_leaf()
    }

    pub fn is_root(&self) -> bool {
        self.id == ROOT
    }

    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let tree = self.tree;
        tree.children_of(self.id).map(move |id| NodeRef { tree, id })
    }

    pub fn child(&self, ch: u8) -> Option<NodeRef<'a>> {
        self.tree.find_child(self.id, ch).map(|id| NodeRef { tree: self.tree, id })
    }

    pub fn path_label(&self) -> &'a [u8] {
        self.tree.path_label(self.id)
    }

    pub fn string_depth(&self) -> IndexType {
        self.tree.string_depth(self.id)
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("range", &self.range())
            .field("label", &self.label())
            .finish()
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

/// One entry of [`SuffixTree::nodes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeRecord {
    pub id: NodeID,
    pub parent: Option<NodeID>,
    pub range: EdgeRange,
    pub is_leaf: bool,
    pub label: Option<IndexType>,
}

pub struct Nodes<'a> {
    tree: &'a SuffixTree,
    stack: Vec<NodeID>,
}

impl Iterator for Nodes<'_> {
    type Item = NodeRecord;

    fn next(&mut self) -> Option<NodeRecord> {
        let id = self.stack.pop()?;
        let node = self.tree.get_node(id);
        self.stack.extend(self.tree.sorted_children(id).into_iter().rev());
        Some(NodeRecord {
            id,
            parent: node.parent,
            range: node.range,
            is_leaf: node.is_leaf(),
            label: node.label,
        })
    }
}

impl std::iter::FusedIterator for Nodes<'_> {}
