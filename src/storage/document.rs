//! Output document writer
//!
//! Writes are atomic (temp file + rename); `-` writes to stdout.

use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use super::source::is_std_stream;

/// Writes the rendered document to `path`, creating parent directories
pub fn write_document(path: &Path, contents: &str) -> Result<()> {
    if is_std_stream(path) {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(contents.as_bytes())
            .context("Failed to write document to stdout")?;
        return stdout.flush().context("Failed to flush stdout");
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = Path::new(&temp_name);

    {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(temp_path)
            .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

        let mut writer = BufWriter::new(&file);
        writer
            .write_all(contents.as_bytes())
            .context("Failed to write document")?;
        writer.flush().context("Failed to flush document")?;
    }

    // Atomic rename
    fs::rename(temp_path, path).with_context(|| {
        format!(
            "Failed to rename {} to {}",
            temp_path.display(),
            path.display()
        )
    })?;

    Ok(())
}
