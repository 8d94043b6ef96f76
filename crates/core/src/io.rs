//! Shared file I/O helpers.

use std::{
    fs::{create_dir_all, write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::{Pattern, glob};

/// Create the parent directory of `path` if it doesn't exist.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    Ok(())
}

/// Write a compiled font, creating its directory first.
pub fn write_font(path: &Path, data: &[u8]) -> Result<()> {
    ensure_parent_dir(path)?;
    write(path, data).with_context(|| format!("Failed to write font: {}", path.display()))
}

/// Write a text file, creating its directory first.
pub fn write_text(path: &Path, text: &str) -> Result<()> {
    ensure_parent_dir(path)?;
    write(path, text).with_context(|| format!("Failed to write file: {}", path.display()))
}

/// Find entries matching a glob pattern in a directory, sorted.
///
/// `dir` is matched literally, so names like `icons[v2]` work.
pub fn glob_paths(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let dir_str = dir.to_str().context("Invalid directory path")?;
    let pattern = Path::new(&Pattern::escape(dir_str)).join(pattern);
    let pattern_str = pattern.to_str().context("Invalid pattern path")?;
    let mut paths: Vec<PathBuf> = glob(pattern_str)
        .with_context(|| format!("Failed to glob pattern: {pattern_str}"))?
        .filter_map(Result::ok)
        .collect();
    paths.sort();
    Ok(paths)
}
