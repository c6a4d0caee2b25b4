//! Structural checks for task records
//!
//! Conversion itself never fails on odd input: dangling predecessors are drawn
//! against the root sentinel and duplicate IDs resolve to the later record.
//! This module finds those anomalies, plus predecessor cycles that leave
//! records unreachable, so they can be reported or rejected up front.
//! Uses petgraph for cycle detection.

use std::collections::HashMap;
use std::fmt;

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use thiserror::Error;

use super::index::AdjacencyIndex;

#[derive(Debug, Error, PartialEq)]
pub enum CheckError {
    #[error("Input rejected: {0} structural issue(s) found")]
    Rejected(usize),
}

/// A structural anomaly in the record set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Issue {
    /// The same task ID occurs on several records
    DuplicateId { id: String, count: usize },

    /// The predecessor ID is not a known task
    DanglingPredecessor { id: String, pre: String },

    /// A task names itself as predecessor
    SelfReference { id: String },

    /// Tasks whose predecessor chain loops back on itself
    Cycle { members: Vec<String> },
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::DuplicateId { id, count } => {
                write!(f, "Duplicate task ID {} ({} records)", id, count)
            }
            Issue::DanglingPredecessor { id, pre } => {
                write!(f, "Task {} has unknown predecessor {}", id, pre)
            }
            Issue::SelfReference { id } => write!(f, "Task {} is its own predecessor", id),
            Issue::Cycle { members } => {
                write!(f, "Predecessor cycle among tasks: {}", members.join(", "))
            }
        }
    }
}

/// Predecessor graph over distinct task IDs
#[derive(Debug, Default)]
pub(crate) struct PredecessorGraph {
    /// Edges point from predecessor to task
    graph: DiGraph<String, ()>,

    /// Map from task ID to node index
    node_map: HashMap<String, NodeIndex>,
}

impl PredecessorGraph {
    /// Builds the graph from an index, skipping unresolved predecessors
    pub(crate) fn from_index(index: &AdjacencyIndex) -> Self {
        let mut graph = Self::default();

        // First pass: add all task IDs
        for node in index.nodes() {
            graph.add_task(&node.id);
        }

        // Second pass: add resolvable predecessor edges
        for node in index.nodes() {
            if node.is_top_level() {
                continue;
            }
            if let (Some(&from), Some(&to)) =
                (graph.node_map.get(&node.pre), graph.node_map.get(&node.id))
            {
                graph.graph.update_edge(from, to, ());
            }
        }

        graph
    }

    fn add_task(&mut self, id: &str) {
        if !self.node_map.contains_key(id) {
            let idx = self.graph.add_node(id.to_string());
            self.node_map.insert(id.to_string(), idx);
        }
    }

    /// Returns every cycle of two or more tasks, members sorted, cycles sorted
    pub(crate) fn cycles(&self) -> Vec<Vec<String>> {
        let mut cycles: Vec<Vec<String>> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|component| component.len() > 1)
            .map(|component| {
                let mut members: Vec<String> = component
                    .into_iter()
                    .filter_map(|idx| self.graph.node_weight(idx).cloned())
                    .collect();
                members.sort();
                members
            })
            .collect();
        cycles.sort();
        cycles
    }
}

/// Collects every structural issue in the record set
///
/// Issues are ordered by kind (duplicates, self references, dangling
/// predecessors, cycles) and by task ID within a kind.
pub fn check(index: &AdjacencyIndex) -> Vec<Issue> {
    let mut issues: Vec<Issue> = index
        .duplicates()
        .into_iter()
        .map(|(id, count)| Issue::DuplicateId {
            id: id.to_string(),
            count,
        })
        .collect();

    let mut self_refs: Vec<Issue> = index
        .nodes()
        .iter()
        .filter(|node| node.pre == node.id)
        .map(|node| Issue::SelfReference {
            id: node.id.clone(),
        })
        .collect();
    self_refs.sort_by(|a, b| a.to_string().cmp(&b.to_string()));
    self_refs.dedup();
    issues.extend(self_refs);

    let mut dangling: Vec<Issue> = index
        .nodes()
        .iter()
        .filter(|node| index.is_orphan(node))
        .map(|node| Issue::DanglingPredecessor {
            id: node.id.clone(),
            pre: node.pre.clone(),
        })
        .collect();
    dangling.sort_by(|a, b| a.to_string().cmp(&b.to_string()));
    issues.extend(dangling);

    let graph = PredecessorGraph::from_index(index);
    issues.extend(
        graph
            .cycles()
            .into_iter()
            .map(|members| Issue::Cycle { members }),
    );

    issues
}

/// Fails if any structural issue is present
pub fn ensure_clean(issues: &[Issue]) -> Result<(), CheckError> {
    if issues.is_empty() {
        Ok(())
    } else {
        Err(CheckError::Rejected(issues.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Node;

    fn index(records: &[(&str, &str)]) -> AdjacencyIndex {
        AdjacencyIndex::build(records.iter().map(|(id, pre)| Node::new(*id, *id, *pre)))
    }

    #[test]
    fn clean_forest_has_no_issues() {
        let index = index(&[("A", "0"), ("B", "0"), ("C", "A"), ("D", "A"), ("E", "B")]);
        let issues = check(&index);
        assert!(issues.is_empty());
        assert!(ensure_clean(&issues).is_ok());
    }

    #[test]
    fn duplicate_ids_reported() {
        let index = index(&[("A", "0"), ("A", "0"), ("B", "0")]);
        assert_eq!(
            check(&index),
            vec![Issue::DuplicateId {
                id: "A".to_string(),
                count: 2
            }]
        );
    }

    #[test]
    fn dangling_predecessor_reported() {
        let index = index(&[("X", "Z")]);
        assert_eq!(
            check(&index),
            vec![Issue::DanglingPredecessor {
                id: "X".to_string(),
                pre: "Z".to_string()
            }]
        );
    }

    #[test]
    fn self_reference_reported() {
        let index = index(&[("A", "A")]);
        assert_eq!(
            check(&index),
            vec![Issue::SelfReference {
                id: "A".to_string()
            }]
        );
    }

    #[test]
    fn cycle_detection() {
        let index = index(&[("A", "0"), ("P", "R"), ("Q", "P"), ("R", "Q")]);
        let issues = check(&index);

        assert_eq!(
            issues,
            vec![Issue::Cycle {
                members: vec!["P".to_string(), "Q".to_string(), "R".to_string()]
            }]
        );
        assert_eq!(ensure_clean(&issues), Err(CheckError::Rejected(1)));
    }

    #[test]
    fn duplicate_ids_collapse_in_graph() {
        let index = index(&[("A", "0"), ("A", "0"), ("B", "A")]);
        let graph = PredecessorGraph::from_index(&index);
        assert_eq!(graph.node_map.len(), 2);
        assert!(graph.cycles().is_empty());
    }

    #[test]
    fn issue_display() {
        let issue = Issue::Cycle {
            members: vec!["P".to_string(), "Q".to_string()],
        };
        assert_eq!(issue.to_string(), "Predecessor cycle among tasks: P, Q");

        let issue = Issue::DanglingPredecessor {
            id: "X".to_string(),
            pre: "Z".to_string(),
        };
        assert_eq!(issue.to_string(), "Task X has unknown predecessor Z");
    }

    #[test]
    fn issue_serializes_with_kind_tag() {
        let issue = Issue::DuplicateId {
            id: "A".to_string(),
            count: 3,
        };
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["kind"], "duplicate_id");
        assert_eq!(json["count"], 3);
    }
}
