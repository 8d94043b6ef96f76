//! Configuration constants for icon font builds.

use std::path::PathBuf;

use iconforge_font_builder::FontMetrics;

/// Directory scanned recursively for `.svg` / `.eps` icon sources.
pub const SRC_DIR: &str = "src";

/// Manifest read at the start of a build and rewritten at the end.
pub const MANIFEST_PATH: &str = "build/manifest.json";

/// Compatibility table pinning icon names to published codepoints.
pub const LEGACY_MAP_PATH: &str = "build/legacy_codepoints.json";

/// Directory receiving the compiled font.
pub const OUTPUT_DIR: &str = "fonts";

/// Output font filename without extension.
pub const FONT_FILE_STEM: &str = "CupertinoIcons";

/// External TrueType autohinter, invoked as `<tool> -s -f -n <src> <dst>`.
pub const HINT_TOOL: &str = "ttfautohint";

pub const UNITS_PER_EM: u16 = 512;
pub const ASCENT: i16 = 448;
pub const DESCENT: i16 = 64;

/// Advance width of every icon glyph unless auto width is enabled.
pub const ICON_ADVANCE: u16 = 512;

/// Shrink each icon's advance to its outline instead of using [`ICON_ADVANCE`].
pub const AUTO_WIDTH: bool = false;

/// First codepoint handed out to icons absent from the legacy table.
///
/// Sits above the highest codepoint of the published legacy set.
pub const FIRST_CODEPOINT: u32 = 0xF4D4;

/// Characters seeded as zero-width blank glyphs so ligatures can reference them.
pub const BASE_CHARACTERS: &str = "0123456789abcdefghijklmnopqrstuvwxyz_- ";

/// Icon names that collide with keywords of generated bindings, and their replacements.
pub const RESERVED_NAMES: &[(&str, &str)] = &[("return", "return_icon")];

/// Everything a build needs, defaulting to the constants above.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub src_dir: PathBuf,
    pub manifest_path: PathBuf,
    pub legacy_map_path: PathBuf,
    pub output_dir: PathBuf,
    pub font_file_stem: String,
    /// `None` skips hinting entirely.
    pub hint_tool: Option<String>,
    pub auto_width: bool,
    /// Treat the input manifest's icons as a second legacy table.
    pub reuse_manifest: bool,
    pub first_codepoint: u32,
    pub metrics: FontMetrics,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            src_dir: PathBuf::from(SRC_DIR),
            manifest_path: PathBuf::from(MANIFEST_PATH),
            legacy_map_path: PathBuf::from(LEGACY_MAP_PATH),
            output_dir: PathBuf::from(OUTPUT_DIR),
            font_file_stem: FONT_FILE_STEM.to_string(),
            hint_tool: Some(HINT_TOOL.to_string()),
            auto_width: AUTO_WIDTH,
            reuse_manifest: false,
            first_codepoint: FIRST_CODEPOINT,
            metrics: FontMetrics::new(UNITS_PER_EM, ASCENT, DESCENT),
        }
    }
}

impl BuildConfig {
    /// Path of the compiled font.
    pub fn font_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.ttf", self.font_file_stem))
    }
}
