//! # Storage Layer
//!
//! Everything that touches the filesystem: reading task records, loading
//! configuration and writing the generated document.
//!
//! ## Input Formats
//!
//! | Format | Extension | Reader |
//! |--------|-----------|--------|
//! | CSV | `.csv` (default) | [`read_table`] via `csv` |
//! | TSV | `.tsv`, `.tab` | [`read_table`] via `csv` |
//! | JSONL | `.jsonl`, `.ndjson` | [`read_jsonl`] via `serde_json` |
//! | Workbook | `.xlsx`, `.xlsm`, `.xls`, `.ods` | [`read_workbook`] via `calamine` |
//!
//! ## Configuration
//!
//! | Scope | Location |
//! |-------|----------|
//! | Project | `task-mermaid.toml` (searched upward from the current directory) |
//! | Global | `~/.config/task-mermaid/config.toml` |
//!
//! ## Key Types
//!
//! - [`Config`] - Project and global configuration
//! - [`SourceConfig`] - Header names and row layout of the source table
//! - [`SourceFormat`] - Input format selection

mod config;
mod table;
mod jsonl;
mod workbook;
mod source;
mod document;

pub use config::{
    Config, ConfigError, DiagramConfig, GlobalConfig, OutputFormat, ProjectConfig, SourceConfig,
    DEFAULT_OUTPUT, PROJECT_CONFIG_FILE,
};
pub use table::{read_table, TableError};
pub use jsonl::read_jsonl;
pub use workbook::read_workbook;
pub use source::{is_std_stream, read_records, SourceFormat};
pub use document::write_document;
