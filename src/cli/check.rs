//! Check command: report structural issues in the task records

use std::path::Path;

use anyhow::{bail, Result};

use super::output::Output;
use crate::domain::{self, AdjacencyIndex};
use crate::storage::{self, SourceConfig, SourceFormat};

/// Lists duplicate IDs, unknown predecessors, self references and cycles
///
/// Fails when any issue is found so scripts can gate on the exit code.
pub fn run(
    output: &Output,
    input: &Path,
    format: Option<SourceFormat>,
    source: &SourceConfig,
) -> Result<()> {
    let nodes = storage::read_records(input, format, source)?;
    output.verbose_ctx("check", &format!("Read {} records", nodes.len()));

    let index = AdjacencyIndex::build(nodes);
    let issues = domain::check(&index);

    if output.is_json() {
        output.data(&serde_json::json!({
            "records": index.len(),
            "top_level": index.root_children(),
            "issues": issues,
        }));
    } else if issues.is_empty() {
        println!("No issues found in {} records.", index.len());
    } else {
        println!("Issues ({}):", issues.len());
        for issue in &issues {
            println!("  {}", issue);
        }
    }

    if !issues.is_empty() {
        bail!(domain::CheckError::Rejected(issues.len()));
    }

    Ok(())
}
