//! Domain models for task-mermaid
//!
//! Contains the conversion core without any I/O concerns: record model,
//! adjacency index, depth-first traversal and diagram assembly.

mod node;
mod index;
mod traverse;
mod diagram;
mod check;

pub use node::{Node, DEFAULT_ROOT_TITLE, ROOT_ID};
pub use index::AdjacencyIndex;
pub use traverse::{traverse, Instruction, Traversal};
pub use diagram::{Diagram, Direction};
pub use check::{check, ensure_clean, CheckError, Issue};
