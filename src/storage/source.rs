//! Record source selection
//!
//! Picks a reader by file extension (or explicit format) and loads all task
//! records into memory. `-` reads from stdin for text formats.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::config::SourceConfig;
use super::jsonl::read_jsonl;
use super::table::read_table;
use super::workbook::read_workbook;
use crate::domain::Node;

/// Input file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SourceFormat {
    /// Comma separated table
    Csv,
    /// Tab separated table
    Tsv,
    /// One JSON record per line
    Jsonl,
    /// Spreadsheet workbook (first worksheet)
    Xlsx,
}

impl SourceFormat {
    /// Guesses the format from a file extension, defaulting to CSV
    pub fn detect(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("jsonl") | Some("ndjson") => SourceFormat::Jsonl,
            Some("tsv") | Some("tab") => SourceFormat::Tsv,
            Some("xlsx") | Some("xlsm") | Some("xls") | Some("ods") => SourceFormat::Xlsx,
            _ => SourceFormat::Csv,
        }
    }

    /// Field delimiter for table formats, honoring an explicit override
    fn delimiter(&self, config: &SourceConfig) -> u8 {
        if let Some(d) = config.delimiter {
            return d as u8;
        }
        match self {
            SourceFormat::Tsv => b'\t',
            _ => b',',
        }
    }
}

/// Returns true if the path means stdin/stdout
pub fn is_std_stream(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Opens a text input, `-` meaning stdin
fn open(input: &Path) -> Result<Box<dyn Read>> {
    if is_std_stream(input) {
        return Ok(Box::new(io::stdin().lock()));
    }

    let file =
        File::open(input).with_context(|| format!("Failed to open input: {}", input.display()))?;
    Ok(Box::new(file))
}

/// Reads all task records from `input`
pub fn read_records(
    input: &Path,
    format: Option<SourceFormat>,
    config: &SourceConfig,
) -> Result<Vec<Node>> {
    config.validate()?;

    let format = format.unwrap_or_else(|| SourceFormat::detect(input));

    let nodes = match format {
        SourceFormat::Xlsx if is_std_stream(input) => {
            anyhow::bail!("Workbook input must be a file, not stdin")
        }
        SourceFormat::Xlsx => read_workbook(input, config),
        SourceFormat::Jsonl => read_jsonl(BufReader::new(open(input)?)),
        SourceFormat::Csv | SourceFormat::Tsv => {
            read_table(open(input)?, format.delimiter(config), config)
        }
    };

    nodes.with_context(|| format!("Failed to read records from {}", input.display()))
}
