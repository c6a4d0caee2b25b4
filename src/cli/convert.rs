//! Convert command: table in, mermaid document out

use std::path::Path;

use anyhow::Result;

use super::output::Output;
use crate::domain::{self, AdjacencyIndex, Diagram};
use crate::storage::{self, ProjectConfig, SourceFormat};

/// Everything the convert command needs after config and flags are merged
pub struct ConvertOptions<'a> {
    pub input: &'a Path,
    pub format: Option<SourceFormat>,
    pub project: &'a ProjectConfig,
    pub target: &'a Path,
    pub strict: bool,
}

/// Reads records, renders the diagram and writes the document
pub fn run(output: &Output, opts: &ConvertOptions<'_>) -> Result<()> {
    let nodes = storage::read_records(opts.input, opts.format, &opts.project.source)?;
    output.verbose_ctx("convert", &format!("Read {} records", nodes.len()));

    let index = AdjacencyIndex::build(nodes);

    let issues = domain::check(&index);
    for issue in &issues {
        output.warn(&issue.to_string());
    }
    if opts.strict {
        domain::ensure_clean(&issues)?;
    }

    let traversal = domain::traverse(&index, &opts.project.diagram.root_title);
    output.verbose_ctx(
        "convert",
        &format!(
            "Traversal emitted {} edges in {} branches",
            traversal.edges, traversal.branches
        ),
    );
    if traversal.unvisited > 0 {
        output.warn(&format!(
            "{} record(s) are not reachable from the root and were left out",
            traversal.unvisited
        ));
    }

    let diagram = Diagram::new(opts.project.diagram.direction, &traversal.instructions);
    if output.is_verbose() {
        for line in diagram.body_lines() {
            output.verbose_ctx("render", &line);
        }
    }

    storage::write_document(opts.target, &diagram.to_string())?;

    // The document itself went to stdout; keep it clean
    if storage::is_std_stream(opts.target) {
        return Ok(());
    }

    if output.is_json() {
        output.data(&serde_json::json!({
            "success": true,
            "output": opts.target.display().to_string(),
            "records": index.len(),
            "edges": traversal.edges,
            "branches": traversal.branches,
            "unvisited": traversal.unvisited,
            "issues": issues,
        }));
    } else {
        output.success(&format!(
            "Wrote {} edges in {} branches to {}",
            traversal.edges,
            traversal.branches,
            opts.target.display()
        ));
    }

    Ok(())
}
