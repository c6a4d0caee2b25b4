//! Spreadsheet reader for task records
//!
//! Opens `.xlsx`, `.xls` and `.ods` workbooks and reads the first worksheet
//! with the same header and data row rules as delimited tables.

use std::path::Path;

use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Reader};

use super::config::SourceConfig;
use super::table::read_rows;
use crate::domain::Node;

/// Reads task records from the first worksheet of a workbook
///
/// Rows are numbered as the spreadsheet shows them, starting at 1, even when
/// the used range begins further down the sheet.
pub fn read_workbook(path: &Path, config: &SourceConfig) -> Result<Vec<Node>> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open workbook: {}", path.display()))?;

    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range.context("Failed to read the first worksheet")?,
        None => anyhow::bail!("Workbook has no worksheets: {}", path.display()),
    };

    let first_row = range.start().map_or(0, |(row, _)| row as usize);
    let rows = range
        .rows()
        .enumerate()
        .map(|(i, cells)| -> Result<(usize, Vec<String>)> {
            let cells = cells
                .iter()
                .map(|cell| cell.to_string().trim().to_string())
                .collect();
            Ok((first_row + i + 1, cells))
        });

    read_rows(rows, config)
}
