//! Table reader for task records
//!
//! Reads CSV/TSV exports of a task sheet. The header row and first data row
//! are configurable; the task ID, title and predecessor columns are found by
//! header name. Workbooks go through the same row handling, see
//! [`read_rows`].

use std::io::Read;

use anyhow::{Context, Result};
use thiserror::Error;

use super::config::SourceConfig;
use crate::domain::Node;

#[derive(Debug, Error, PartialEq)]
pub enum TableError {
    #[error("Header row {0} not found")]
    HeaderNotFound(usize),

    #[error("Header row {row} is missing required field(s): {}", .fields.join(", "))]
    MissingFields { row: usize, fields: Vec<String> },
}

/// Column positions of the three record fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Columns {
    id: usize,
    title: usize,
    pre: usize,
}

impl Columns {
    /// Finds the record columns in a header row
    fn locate(header: &[String], row: usize, config: &SourceConfig) -> Result<Self, TableError> {
        let find = |field: &str| header.iter().position(|cell| config.field_matches(cell, field));

        let id = find(&config.id_field);
        let title = find(&config.title_field);
        let pre = find(&config.pre_field);

        match (id, title, pre) {
            (Some(id), Some(title), Some(pre)) => Ok(Self { id, title, pre }),
            _ => {
                let fields = [
                    (id, &config.id_field),
                    (title, &config.title_field),
                    (pre, &config.pre_field),
                ]
                .into_iter()
                .filter(|(col, _)| col.is_none())
                .map(|(_, name)| name.clone())
                .collect();

                Err(TableError::MissingFields { row, fields })
            }
        }
    }

    /// Builds a node from a data row, or `None` if ID or title is blank
    fn node(&self, cells: &[String]) -> Option<Node> {
        let cell = |col: usize| cells.get(col).map_or("", String::as_str);

        let id = cell(self.id);
        let title = cell(self.title);
        if id.is_empty() || title.is_empty() {
            return None;
        }

        Some(Node::new(id, title, cell(self.pre)))
    }
}

/// Turns numbered rows of trimmed cells into task records
///
/// Rows are 1-based. The row numbered `header_row` names the columns, rows
/// before `data_row` are ignored, and data rows without an ID or title are
/// skipped. A blank predecessor makes the task top-level.
pub(super) fn read_rows<I>(rows: I, config: &SourceConfig) -> Result<Vec<Node>>
where
    I: IntoIterator<Item = Result<(usize, Vec<String>)>>,
{
    let mut columns: Option<Columns> = None;
    let mut nodes = Vec::new();

    for row in rows {
        let (row, cells) = row?;

        if row == config.header_row {
            columns = Some(Columns::locate(&cells, row, config)?);
            continue;
        }

        if row < config.data_row {
            continue;
        }

        let columns = columns.ok_or(TableError::HeaderNotFound(config.header_row))?;
        if let Some(node) = columns.node(&cells) {
            nodes.push(node);
        }
    }

    if columns.is_none() {
        return Err(TableError::HeaderNotFound(config.header_row).into());
    }

    Ok(nodes)
}

/// Reads task records from delimited text
///
/// Rows are numbered by the line they start on, so blank lines still count.
pub fn read_table<R: Read>(input: R, delimiter: u8, config: &SourceConfig) -> Result<Vec<Node>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .delimiter(delimiter)
        .from_reader(input);

    let rows = reader
        .records()
        .enumerate()
        .map(|(i, record)| -> Result<(usize, Vec<String>)> {
            let record =
                record.with_context(|| format!("Failed to read table record {}", i + 1))?;
            let row = record
                .position()
                .map(|pos| pos.line() as usize)
                .unwrap_or(i + 1);
            Ok((row, record.iter().map(str::to_string).collect()))
        });

    read_rows(rows, config)
}
