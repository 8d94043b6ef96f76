//! TrueType hinting through an external autohinter.

use std::{
    fs::{remove_file, rename},
    path::Path,
    process::{Command, Stdio},
};

use log::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HintOutcome {
    Hinted,
    /// The font was left unhinted.
    Failed(String),
}

/// Hint `font` in place with `tool -s -f -n <font> <font>-hinted.ttf`.
///
/// Never fails the build: any problem leaves the unhinted font untouched and
/// is reported through [`HintOutcome::Failed`].
pub fn hint_in_place(tool: &str, font: &Path) -> HintOutcome {
    let stem = font.file_stem().and_then(|s| s.to_str()).unwrap_or("font");
    let hinted = font.with_file_name(format!("{stem}-hinted.ttf"));

    debug!("running {tool} on {}", font.display());
    let status = Command::new(tool)
        .args(["-s", "-f", "-n"])
        .arg(font)
        .arg(&hinted)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    let failure = match status {
        Ok(status) if status.success() => match rename(&hinted, font) {
            Ok(()) => return HintOutcome::Hinted,
            Err(e) => format!("failed to replace {}: {e}", font.display()),
        },
        Ok(status) => format!("{tool} exited with {status}"),
        Err(e) => return HintOutcome::Failed(format!("failed to run {tool}: {e}")),
    };
    let _ = remove_file(&hinted);
    HintOutcome::Failed(failure)
}
