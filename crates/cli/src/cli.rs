//! CLI definitions and command dispatch.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::debug;

use iconforge_core::{
    BuildConfig, build,
    config::{
        AUTO_WIDTH, FONT_FILE_STEM, HINT_TOOL, LEGACY_MAP_PATH, MANIFEST_PATH, OUTPUT_DIR, SRC_DIR,
    },
    ligature_tokens, remap_reserved,
};

#[derive(Parser)]
#[command(name = "iconforge")]
#[command(about = "Build an icon font with name ligatures from SVG/EPS sources")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, clap::Args)]
pub struct BuildArgs {
    /// Directory scanned recursively for .svg and .eps icons
    #[arg(long, default_value = SRC_DIR)]
    pub src_dir: PathBuf,
    /// Manifest to read and rewrite
    #[arg(long, default_value = MANIFEST_PATH)]
    pub manifest: PathBuf,
    /// Legacy name to codepoint table (JSON)
    #[arg(long, default_value = LEGACY_MAP_PATH)]
    pub legacy_map: PathBuf,
    #[arg(long, default_value = OUTPUT_DIR)]
    pub output_dir: PathBuf,
    /// Font filename without extension
    #[arg(long, default_value = FONT_FILE_STEM)]
    pub font_file: String,
    #[arg(long, default_value = HINT_TOOL)]
    pub hint_tool: String,
    /// Skip hinting
    #[arg(long)]
    pub no_hint: bool,
    /// Fit each icon's advance width to its outline
    #[arg(long, default_value_t = AUTO_WIDTH)]
    pub auto_width: bool,
    /// Keep the codepoints of icons already in the manifest
    #[arg(long)]
    pub reuse_manifest: bool,
}

impl BuildArgs {
    pub fn into_config(self) -> BuildConfig {
        BuildConfig {
            src_dir: self.src_dir,
            manifest_path: self.manifest,
            legacy_map_path: self.legacy_map,
            output_dir: self.output_dir,
            font_file_stem: self.font_file,
            hint_tool: (!self.no_hint).then_some(self.hint_tool),
            auto_width: self.auto_width,
            reuse_manifest: self.reuse_manifest,
            ..BuildConfig::default()
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the font and rewrite the manifest
    Build {
        #[command(flatten)]
        args: BuildArgs,
    },
    /// Print the glyph names a ligature for NAME is spelled with
    Ligature { name: String },
}

impl Commands {
    pub fn run(self) -> Result<()> {
        match self {
            Commands::Build { args } => {
                let config = args.into_config();
                debug!("{config:?}");
                build(&config)?;
            }
            Commands::Ligature { name } => {
                let name = remap_reserved(&name);
                println!("{name}: {}", ligature_tokens(&name).join(" "));
            }
        }
        Ok(())
    }
}
