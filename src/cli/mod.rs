//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `convert` | Render a task table as a mermaid diagram document |
//! | `check` | Report duplicate IDs, unknown predecessors and cycles |
//! | `init` | Write a default `task-mermaid.toml` |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output, including every diagram line
//! as it is rendered:
//! ```bash
//! task-mermaid --verbose convert tasks.csv
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod convert;
mod check;

pub use app::{Cli, Commands, SourceArgs, run};
pub use output::{Output, OutputFormat};
