//! Error types for font assembly.

use std::result;

use write_fonts::BuilderError;

/// Errors that can occur while assembling an icon font.
#[derive(Debug, thiserror::Error)]
pub enum FontBuildError {
    #[error("failed to build font: {0}")]
    Build(#[from] BuilderError),

    #[error("glyph '{name}' has a malformed outline: {message}")]
    MalformedOutline { name: String, message: String },

    #[error("failed to compile glyph '{name}': {message}")]
    Glyph { name: String, message: String },

    #[error("ligature for '{ligature}' references unknown glyph '{component}'")]
    UnknownComponent { ligature: String, component: String },

    #[error("ligature for '{0}' has no components")]
    EmptyLigature(String),

    #[error("too many glyphs: {0} exceeds the 65535 glyph limit")]
    TooManyGlyphs(usize),
}

pub type Result<T> = result::Result<T, FontBuildError>;
