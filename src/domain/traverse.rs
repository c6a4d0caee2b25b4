//! Depth-first walk that turns the adjacency index into diagram instructions
//!
//! The walk keeps one explicit stack of pending nodes and a parallel list of
//! remaining-sibling counters, one per open sibling group. Index 0 is the
//! top-level group; a node popped while only that group is open starts a new
//! branch container. Records with an unresolvable predecessor are walked the
//! same way in a second pass, after the last container. No recursion is
//! involved, so input depth is bounded by memory only.

use std::collections::HashSet;

use super::index::AdjacencyIndex;
use super::node::{Node, ROOT_ID};

/// One step of the rendered diagram body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// Start of a top-level branch container
    OpenBranch,

    /// End of the current branch container
    CloseBranch,

    /// Predecessor -> task edge
    Edge {
        from_id: String,
        from_title: String,
        to_id: String,
        to_title: String,
    },
}

impl Instruction {
    fn edge(from: &Node, to: &Node) -> Self {
        Instruction::Edge {
            from_id: from.id.clone(),
            from_title: from.title.clone(),
            to_id: to.id.clone(),
            to_title: to.title.clone(),
        }
    }
}

/// Result of a traversal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Traversal {
    /// Instructions in emission order
    pub instructions: Vec<Instruction>,

    /// Number of edges emitted
    pub edges: usize,

    /// Number of branch containers opened
    pub branches: usize,

    /// Records never reached from the root (predecessor cycles)
    pub unvisited: usize,
}

/// Sorts a sibling group largest ID first so the smallest is popped first
fn push_order(mut siblings: Vec<&Node>) -> Vec<&Node> {
    siblings.sort_by(|a, b| b.id.cmp(&a.id));
    siblings
}

/// Walk state shared by the contained and the dangling passes
struct Walk<'a> {
    index: &'a AdjacencyIndex,
    root: Node,

    /// Task IDs whose children were already pushed
    expanded: HashSet<&'a str>,
    out: Traversal,
}

impl<'a> Walk<'a> {
    /// Visits a sibling group and everything below it depth-first
    ///
    /// With `contained` set, every node of the group opens its own branch
    /// container that stays open until the next one starts.
    fn group(&mut self, siblings: Vec<&'a Node>, contained: bool) {
        let index = self.index;
        let mut stack = push_order(siblings);
        let mut remaining = vec![stack.len()];
        let mut open = false;

        while let Some(node) = stack.pop() {
            let depth = remaining.len() - 1;
            remaining[depth] -= 1;

            if contained && depth == 0 {
                if open {
                    self.out.instructions.push(Instruction::CloseBranch);
                }
                self.out.instructions.push(Instruction::OpenBranch);
                self.out.branches += 1;
                open = true;
            }

            let pre = index.resolve_predecessor(node).unwrap_or(&self.root);
            let edge = Instruction::edge(pre, node);
            self.out.instructions.push(edge);
            self.out.edges += 1;

            if depth > 0 && remaining[depth] == 0 {
                remaining.pop();
            }

            // A task ID's children are pushed at most once, even if the ID is duplicated
            if !self.expanded.insert(node.id.as_str()) {
                continue;
            }

            let children = index.children(&node.id);
            if children.is_empty() {
                continue;
            }

            let children = push_order(children);
            remaining.push(children.len());
            stack.extend(children);
        }

        if open {
            self.out.instructions.push(Instruction::CloseBranch);
        }
    }
}

/// Walks the index depth-first and emits one edge per visited record
///
/// Siblings are visited in ascending task ID order. Each task with
/// predecessor `"0"` and its whole subtree is wrapped in a single branch
/// container. Tasks whose predecessor does not resolve follow the last
/// container, uncontained, and are drawn against a root sentinel titled
/// `root_title`.
pub fn traverse(index: &AdjacencyIndex, root_title: &str) -> Traversal {
    let mut walk = Walk {
        index,
        root: Node::root(root_title),
        expanded: HashSet::from([ROOT_ID]),
        out: Traversal::default(),
    };

    walk.group(index.children(ROOT_ID), true);
    walk.group(index.orphans(), false);

    let mut out = walk.out;
    out.unvisited = index.len() - out.edges;
    out
}
