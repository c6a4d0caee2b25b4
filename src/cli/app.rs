//! Main CLI application structure

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{check, convert};
use crate::domain::Direction;
use crate::storage::{Config, ProjectConfig, SourceConfig, SourceFormat};

#[derive(Parser)]
#[command(name = "task-mermaid")]
#[command(
    author,
    version,
    about = "Convert task tables into mermaid dependency diagrams"
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the global config, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Project config file to use instead of searching for task-mermaid.toml
    #[arg(long, short = 'c', global = true, value_name = "PATH", env = "TASK_MERMAID_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a task table into a mermaid diagram document
    Convert {
        #[command(flatten)]
        source: SourceArgs,

        /// Output file (`-` for stdout)
        #[arg(long, short = 'o', value_name = "PATH")]
        output: Option<PathBuf>,

        /// Diagram direction (TB, TD, BT, LR, RL)
        #[arg(long, value_name = "DIR")]
        direction: Option<Direction>,

        /// Title shown for the root node
        #[arg(long, value_name = "TITLE")]
        root_title: Option<String>,

        /// Fail instead of warning when the records have structural issues
        #[arg(long)]
        strict: bool,
    },

    /// Report duplicate IDs, unknown predecessors and cycles
    Check {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Write a default task-mermaid.toml
    Init {
        /// Directory to write into (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

/// Where to read records from and how the table is laid out
#[derive(Debug, Args)]
pub struct SourceArgs {
    /// Input file (`-` for stdin)
    pub input: PathBuf,

    /// Input format (detected from the extension by default)
    #[arg(long, value_name = "FORMAT")]
    pub input_format: Option<SourceFormat>,

    /// Header of the task ID column
    #[arg(long = "id", value_name = "NAME")]
    pub id_field: Option<String>,

    /// Header of the task title column
    #[arg(long = "title", short = 't', value_name = "NAME")]
    pub title_field: Option<String>,

    /// Header of the predecessor ID column
    #[arg(long = "pre", value_name = "NAME")]
    pub pre_field: Option<String>,

    /// Match header names case-insensitively
    #[arg(long, short = 'i')]
    pub ignore_case: bool,

    /// Row holding the column headers (1-based)
    #[arg(long, value_name = "ROW")]
    pub header_row: Option<usize>,

    /// First row holding task records (1-based)
    #[arg(long, value_name = "ROW")]
    pub data_row: Option<usize>,

    /// Field delimiter for table input
    #[arg(long, short = 'd', value_name = "CHAR")]
    pub delimiter: Option<char>,
}

impl SourceArgs {
    /// Layers command-line overrides on top of the configured source layout
    pub fn apply(&self, config: &mut SourceConfig) {
        if let Some(field) = &self.id_field {
            config.id_field = field.clone();
        }
        if let Some(field) = &self.title_field {
            config.title_field = field.clone();
        }
        if let Some(field) = &self.pre_field {
            config.pre_field = field.clone();
        }
        if self.ignore_case {
            config.ignore_case = true;
        }
        if let Some(row) = self.header_row {
            config.header_row = row;
        }
        if let Some(row) = self.data_row {
            config.data_row = row;
        }
        if self.delimiter.is_some() {
            config.delimiter = self.delimiter;
        }
    }
}

/// Resolves a configured output path against the project root
fn configured_output(config: &Config) -> PathBuf {
    let path = &config.project.output;
    match &config.project_root {
        Some(root) if path.is_relative() && !crate::storage::is_std_stream(path) => {
            root.join(path)
        }
        _ => path.clone(),
    }
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };

    let output = Output::new(
        cli.format.unwrap_or(config.global.default_format),
        cli.verbose,
    );

    output.verbose("task-mermaid starting");
    if let Some(root) = &config.project_root {
        output.verbose_ctx(
            "config",
            &format!("Using project config in {}", root.display()),
        );
    }

    match cli.command {
        Commands::Convert {
            source,
            output: output_path,
            direction,
            root_title,
            strict,
        } => {
            let target = output_path.unwrap_or_else(|| configured_output(&config));

            let mut project = config.project;
            source.apply(&mut project.source);
            if let Some(direction) = direction {
                project.diagram.direction = direction;
            }
            if let Some(title) = root_title {
                project.diagram.root_title = title;
            }

            output.verbose_ctx(
                "convert",
                &format!(
                    "Converting {} -> {}, strict={}",
                    source.input.display(),
                    target.display(),
                    strict
                ),
            );

            convert::run(
                &output,
                &convert::ConvertOptions {
                    input: &source.input,
                    format: source.input_format,
                    project: &project,
                    target: &target,
                    strict,
                },
            )?
        }

        Commands::Check { source } => {
            let mut project = config.project;
            source.apply(&mut project.source);

            output.verbose_ctx("check", &format!("Checking {}", source.input.display()));
            check::run(&output, &source.input, source.input_format, &project.source)?
        }

        Commands::Init { path } => init(&output, &path)?,
    }

    Ok(())
}

/// Writes a default project config
fn init(output: &Output, dir: &Path) -> Result<()> {
    output.verbose_ctx("init", &format!("Writing config into: {}", dir.display()));
    let path = Config::write_project(dir, &ProjectConfig::default())?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "success": true,
            "config": path.display().to_string(),
        }));
    } else {
        output.success(&format!("Created {}", path.display()));
    }

    Ok(())
}
