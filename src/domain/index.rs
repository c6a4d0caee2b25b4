//! Adjacency index over task records
//!
//! Built once per run from the full record set and read-only afterwards.
//! Nodes are owned by an arena in arrival order; the lookup tables hold
//! arena indices.

use std::collections::HashMap;

use super::node::{Node, ROOT_ID};

/// Lookup from task ID to node and from predecessor ID to direct children
#[derive(Debug, Default)]
pub struct AdjacencyIndex {
    nodes: Vec<Node>,

    /// Task ID -> arena index (later records win)
    by_id: HashMap<String, usize>,

    /// Predecessor ID -> arena indices, in arrival order
    children_of: HashMap<String, Vec<usize>>,
}

impl AdjacencyIndex {
    /// Builds the index from records in the order they arrive
    pub fn build(nodes: impl IntoIterator<Item = Node>) -> Self {
        let mut index = Self::default();

        for node in nodes {
            let idx = index.nodes.len();
            index.by_id.insert(node.id.clone(), idx);
            index.children_of.entry(node.pre.clone()).or_default().push(idx);
            index.nodes.push(node);
        }

        index
    }

    /// Returns the node registered under a task ID
    pub fn get(&self, id: &str) -> Option<&Node> {
        self.by_id.get(id).map(|&idx| &self.nodes[idx])
    }

    /// Returns the direct children of a predecessor, in arrival order
    pub fn children(&self, pre: &str) -> Vec<&Node> {
        self.children_of
            .get(pre)
            .map(|ids| ids.iter().map(|&idx| &self.nodes[idx]).collect())
            .unwrap_or_default()
    }

    /// Returns the predecessor record of a node, if it resolves
    pub fn resolve_predecessor(&self, node: &Node) -> Option<&Node> {
        if node.is_top_level() {
            return None;
        }
        self.get(&node.pre)
    }

    /// Returns true if the node's predecessor is neither the root nor a known task
    pub fn is_orphan(&self, node: &Node) -> bool {
        !node.is_top_level() && !self.by_id.contains_key(&node.pre)
    }

    /// Returns the records whose predecessor does not resolve, in arrival order
    pub fn orphans(&self) -> Vec<&Node> {
        self.nodes.iter().filter(|node| self.is_orphan(node)).collect()
    }

    /// Returns task IDs that occur more than once, with their counts, sorted by ID
    pub fn duplicates(&self) -> Vec<(&str, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for node in &self.nodes {
            *counts.entry(node.id.as_str()).or_default() += 1;
        }

        let mut dups: Vec<_> = counts.into_iter().filter(|(_, n)| *n > 1).collect();
        dups.sort();
        dups
    }

    /// Returns all records in arrival order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns the number of records
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if no records were indexed
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the number of records whose predecessor is literally `"0"`
    pub fn root_children(&self) -> usize {
        self.children_of.get(ROOT_ID).map_or(0, Vec::len)
    }
}
