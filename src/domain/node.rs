//! Task record model
//!
//! A node is one row of the source table: a task ID, its title and the ID of
//! the task it follows. Predecessor `"0"` marks a top-level task.

use serde::{Deserialize, Serialize};

/// Predecessor ID that marks a top-level task, and the ID of the root sentinel
pub const ROOT_ID: &str = "0";

/// Title given to the root sentinel unless configured otherwise
pub const DEFAULT_ROOT_TITLE: &str = "Invalid task ID";

/// A single task record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Task identifier
    #[serde(alias = "task_id")]
    pub id: String,

    /// Human readable title
    pub title: String,

    /// Predecessor task identifier (`"0"` for top-level tasks)
    #[serde(default = "root_id", alias = "pre_task_id", alias = "predecessor")]
    pub pre: String,
}

fn root_id() -> String {
    ROOT_ID.to_string()
}

impl Node {
    /// Creates a node, coercing an empty predecessor to [`ROOT_ID`]
    pub fn new(id: impl Into<String>, title: impl Into<String>, pre: impl Into<String>) -> Self {
        let pre = pre.into();
        let pre = if pre.is_empty() { root_id() } else { pre };

        Self {
            id: id.into(),
            title: title.into(),
            pre,
        }
    }

    /// Creates the root sentinel substituted for unresolved predecessors
    pub fn root(title: impl Into<String>) -> Self {
        Self {
            id: root_id(),
            title: title.into(),
            pre: root_id(),
        }
    }

    /// Returns true if this node hangs directly off the root
    pub fn is_top_level(&self) -> bool {
        self.pre == ROOT_ID
    }
}
