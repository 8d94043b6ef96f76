//! Icon source discovery.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use iconforge_outline::SourceFormat;
use log::{debug, warn};

use crate::io::glob_paths;

/// An icon source file and the icon name derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSource {
    pub path: PathBuf,
    /// File stem, before reserved-name remapping.
    pub name: String,
    pub format: SourceFormat,
}

/// Every `.svg` / `.eps` file under `dir`, top-down.
///
/// Each directory contributes its own files in sorted order before any of
/// its subdirectories, which are visited in sorted order.
pub fn find_icon_sources(dir: &Path) -> Result<Vec<IconSource>> {
    if !dir.is_dir() {
        bail!("Icon source directory not found: {}", dir.display());
    }
    let mut sources = Vec::new();
    walk(dir, &mut sources)?;
    Ok(sources)
}

fn walk(dir: &Path, sources: &mut Vec<IconSource>) -> Result<()> {
    let (subdirs, files): (Vec<PathBuf>, Vec<PathBuf>) =
        glob_paths(dir, "*")?.into_iter().partition(|path| path.is_dir());

    for path in files {
        let Some(format) = SourceFormat::from_path(&path) else {
            debug!("skipping {}", path.display());
            continue;
        };
        let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
            warn!("skipping {}: file name is not valid UTF-8", path.display());
            continue;
        };
        if name.is_empty() {
            warn!("skipping {}: empty icon name", path.display());
            continue;
        }
        sources.push(IconSource { name: name.to_string(), path, format });
    }

    for subdir in subdirs {
        walk(&subdir, sources)?;
    }
    Ok(())
}
