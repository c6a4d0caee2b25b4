//! Configuration handling for task-mermaid
//!
//! Configuration is stored in `task-mermaid.toml` (project, found by walking
//! up from the current directory) and `~/.config/task-mermaid/config.toml`
//! (global). Command-line flags override both.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Direction, DEFAULT_ROOT_TITLE};

/// File name of the project configuration
pub const PROJECT_CONFIG_FILE: &str = "task-mermaid.toml";

/// Default path of the generated document
pub const DEFAULT_OUTPUT: &str = "task-graph.md";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// How to find task records in a source table
///
/// Rows are numbered from 1, like spreadsheet rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Header of the task ID column
    pub id_field: String,

    /// Header of the task title column
    pub title_field: String,

    /// Header of the predecessor ID column
    pub pre_field: String,

    /// Match headers case-insensitively
    pub ignore_case: bool,

    /// Row holding the column headers
    pub header_row: usize,

    /// First row holding task records
    pub data_row: usize,

    /// Field delimiter (defaults by file extension)
    pub delimiter: Option<char>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            id_field: "ID".to_string(),
            title_field: "Title".to_string(),
            pre_field: "PreTask".to_string(),
            ignore_case: false,
            header_row: 1,
            data_row: 2,
            delimiter: None,
        }
    }
}

impl SourceConfig {
    /// Checks row numbers, field names and delimiter
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.header_row == 0 || self.data_row == 0 {
            return Err(ConfigError::Invalid("row numbers start at 1".to_string()));
        }

        if self.data_row <= self.header_row {
            return Err(ConfigError::Invalid(format!(
                "data row ({}) must come after header row ({})",
                self.data_row, self.header_row
            )));
        }

        let fields = [&self.id_field, &self.title_field, &self.pre_field];
        if fields.iter().any(|f| f.trim().is_empty()) {
            return Err(ConfigError::Invalid("field names must not be empty".to_string()));
        }

        for (i, a) in fields.iter().enumerate() {
            for b in &fields[i + 1..] {
                if self.field_matches(a, b) {
                    return Err(ConfigError::Invalid(format!(
                        "field name '{}' is used for more than one column",
                        a
                    )));
                }
            }
        }

        if let Some(d) = self.delimiter {
            if !d.is_ascii() || d == '"' || d == '\n' || d == '\r' {
                return Err(ConfigError::Invalid(format!("unsupported delimiter {:?}", d)));
            }
        }

        Ok(())
    }

    /// Returns true if a header cell names the given field
    pub fn field_matches(&self, header: &str, field: &str) -> bool {
        if self.ignore_case {
            header.to_lowercase() == field.to_lowercase()
        } else {
            header == field
        }
    }
}

/// How the diagram is drawn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramConfig {
    /// Flowchart direction
    pub direction: Direction,

    /// Title shown for the root sentinel
    pub root_title: String,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            direction: Direction::default(),
            root_title: DEFAULT_ROOT_TITLE.to_string(),
        }
    }
}

/// Project-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Where the generated document is written (`-` for stdout)
    pub output: PathBuf,

    /// Source table layout
    pub source: SourceConfig,

    /// Diagram settings
    pub diagram: DiagramConfig,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            source: SourceConfig::default(),
            diagram: DiagramConfig::default(),
        }
    }
}

/// Global user configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GlobalConfig {
    /// Default output format (text or json)
    pub default_format: OutputFormat,
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Combined configuration (global + project)
#[derive(Debug, Clone)]
pub struct Config {
    pub project: ProjectConfig,
    pub global: GlobalConfig,
    pub project_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from default locations
    pub fn load() -> Result<Self> {
        let global = Self::load_global()?;
        let (project, project_root) = Self::load_project()?;

        Ok(Self {
            project,
            global,
            project_root,
        })
    }

    /// Loads configuration from an explicit project config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let global = Self::load_global()?;
        let project = Self::read_project_file(path)?;

        Ok(Self {
            project,
            global,
            project_root: path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf),
        })
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "task-mermaid", "task-mermaid")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads global configuration
    fn load_global() -> Result<GlobalConfig> {
        let config_dir = match Self::global_config_dir() {
            Some(dir) => dir,
            None => return Ok(GlobalConfig::default()),
        };

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            return Ok(GlobalConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read global config: {}", config_path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse global config")
    }

    /// Finds and loads project configuration
    fn load_project() -> Result<(ProjectConfig, Option<PathBuf>)> {
        match Self::find_project_root() {
            Some(root) => {
                let config = Self::read_project_file(&root.join(PROJECT_CONFIG_FILE))?;
                Ok((config, Some(root)))
            }
            None => Ok((ProjectConfig::default(), None)),
        }
    }

    /// Reads and validates a project configuration file
    fn read_project_file(config_path: &Path) -> Result<ProjectConfig> {
        let content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read project config: {}", config_path.display()))?;

        let config: ProjectConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse project config")?;

        config
            .source
            .validate()
            .with_context(|| format!("In {}", config_path.display()))?;

        Ok(config)
    }

    /// Finds the project root by looking for a `task-mermaid.toml` file
    pub fn find_project_root() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::find_project_root_from(&current)
    }

    /// Walks up from `start` looking for a `task-mermaid.toml` file
    pub fn find_project_root_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            if current.join(PROJECT_CONFIG_FILE).is_file() {
                return Some(current);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Writes a project configuration file into `dir`
    ///
    /// Returns the path written. Fails if the file already exists.
    pub fn write_project(dir: &Path, project: &ProjectConfig) -> Result<PathBuf> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

        let config_path = dir.join(PROJECT_CONFIG_FILE);
        if config_path.exists() {
            return Err(ConfigError::Invalid(format!(
                "{} already exists",
                config_path.display()
            ))
            .into());
        }

        let content =
            toml::to_string_pretty(project).context("Failed to serialize project config")?;

        fs::write(&config_path, content).with_context(|| {
            format!("Failed to write project config: {}", config_path.display())
        })?;

        Ok(config_path)
    }
}
