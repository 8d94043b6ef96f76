//! Error types for outline import.

use std::{io, path::PathBuf, result};

/// Errors that can occur while importing an outline.
#[derive(Debug, thiserror::Error)]
pub enum OutlineError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("unsupported outline format: {0}")]
    UnsupportedFormat(String),

    #[error("malformed SVG: {0}")]
    Svg(#[from] resvg::usvg::Error),
}

pub type Result<T> = result::Result<T, OutlineError>;
