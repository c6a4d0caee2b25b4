//! JSONL reader for task records
//!
//! One JSON object per line: `{"id": "B", "title": "Build", "pre": "A"}`.
//! `pre` may be omitted or empty for top-level tasks.

use std::io::BufRead;

use anyhow::{Context, Result};

use crate::domain::Node;

/// Reads task records from JSON lines
///
/// Blank lines are ignored. Records with an empty ID or title are skipped,
/// matching the table reader.
pub fn read_jsonl<R: BufRead>(reader: R) -> Result<Vec<Node>> {
    let mut nodes = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", line_num + 1))?;

        if line.trim().is_empty() {
            continue;
        }

        let raw: Node = serde_json::from_str(&line)
            .with_context(|| format!("Failed to parse task at line {}", line_num + 1))?;

        let id = raw.id.trim();
        let title = raw.title.trim();
        if id.is_empty() || title.is_empty() {
            continue;
        }

        nodes.push(Node::new(id, title, raw.pre.trim()));
    }

    Ok(nodes)
}
