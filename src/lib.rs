//! task-mermaid - Turn flat task tables into mermaid dependency diagrams
//!
//! Each task record names its predecessor. Records are indexed by
//! predecessor, walked depth-first with siblings in ascending ID order, and
//! rendered as one mermaid `subgraph` per top-level task.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{AdjacencyIndex, Diagram, Direction, Instruction, Node, Traversal};
