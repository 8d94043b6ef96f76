//! The icon font build pipeline.

use std::{collections::HashSet, path::PathBuf, time::Instant};

use anyhow::{Context, Result};
use iconforge_font_builder::{AdvanceWidth, FontDocument};
use iconforge_outline::{EmSquare, import_file};
use indexmap::IndexMap;
use log::{info, warn};

use crate::{
    allocator::CodepointAllocator,
    config::{BASE_CHARACTERS, BuildConfig, ICON_ADVANCE},
    discovery::{IconSource, find_icon_sources},
    hint::{HintOutcome, hint_in_place},
    io::write_font,
    legacy::LegacyCodepointMap,
    ligature::ligature_tokens,
    manifest::{IconManifest, IconRecord, reconcile},
    names::remap_reserved,
};

/// Summary of a finished build.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub font_path: PathBuf,
    pub manifest_path: PathBuf,
    /// Icons written to the manifest, sorted by name.
    pub icons: Vec<IconRecord>,
    /// Legacy names no icon source asked for.
    pub unconsumed: Vec<String>,
    pub hinted: bool,
}

const TOTAL_STEPS: usize = 5;

fn run_step<T>(name: &str, step_num: usize, f: impl FnOnce() -> Result<T>) -> Result<T> {
    println!("\n[{step_num}/{TOTAL_STEPS}] {name}");
    let start = Instant::now();
    let value = f()?;
    println!("  ✓ {name} ({:.2}s)", start.elapsed().as_secs_f64());
    Ok(value)
}

/// Run a full build: import every icon, compile and hint the font, rewrite the manifest.
pub fn build(config: &BuildConfig) -> Result<BuildReport> {
    let start = Instant::now();
    println!("Building icon font from {}", config.src_dir.display());

    let (manifest, legacy) = run_step("Load manifest", 1, || {
        let manifest = IconManifest::load(&config.manifest_path)?;
        let legacy = LegacyCodepointMap::load(&config.legacy_map_path)?;
        println!("  {} ({} legacy entries)", manifest.name(), legacy.len());
        Ok((manifest, legacy))
    })?;

    let sources = run_step("Find icon sources", 2, || {
        let sources = find_icon_sources(&config.src_dir)?;
        println!("  Found {} icon sources", sources.len());
        Ok(sources)
    })?;

    let previous: IndexMap<String, u32> = if config.reuse_manifest {
        manifest.codepoints().with_context(|| {
            format!("Cannot reuse assignments from {}", config.manifest_path.display())
        })?
    } else {
        IndexMap::new()
    };
    let mut allocator = CodepointAllocator::new(&legacy, config.first_codepoint);
    if config.reuse_manifest {
        allocator = allocator.with_previous(&previous);
    }

    let mut doc = FontDocument::new(config.metrics);
    doc.set_family_name(manifest.name());

    let icons = run_step("Import icons", 3, || {
        for ch in BASE_CHARACTERS.chars() {
            doc.add_placeholder(ch);
        }
        let em = EmSquare::new(f64::from(config.metrics.ascent), f64::from(config.metrics.descent));
        let width = if config.auto_width { AdvanceWidth::Auto } else { AdvanceWidth::Fixed(ICON_ADVANCE) };

        let mut seen = HashSet::new();
        let mut icons = Vec::with_capacity(sources.len());
        for source in &sources {
            let icon = emit_icon(source, &em, width, &mut allocator, &mut doc)?;
            if !seen.insert(icon.name.clone()) {
                warn!("duplicate icon name '{}' from {}", icon.name, source.path.display());
            }
            icons.push(icon);
        }
        println!("  Imported {} icons", icons.len());
        Ok(icons)
    })?;
    let unconsumed: Vec<String> = allocator.unconsumed().into_iter().map(str::to_string).collect();

    let font_path = config.font_path();
    let hinted = run_step("Write font", 4, || {
        let data = doc.build().context("Failed to compile font")?;
        write_font(&font_path, &data)?;
        println!("  Wrote {} ({} glyphs)", font_path.display(), doc.glyph_count());

        let Some(tool) = config.hint_tool.as_deref() else {
            println!("  Hinting disabled");
            return Ok(false);
        };
        match hint_in_place(tool, &font_path) {
            HintOutcome::Hinted => {
                println!("  Hinted with {tool}");
                Ok(true)
            }
            HintOutcome::Failed(reason) => {
                warn!("hinting skipped: {reason}");
                Ok(false)
            }
        }
    })?;

    let written = run_step("Write manifest", 5, || {
        let updated = reconcile(&manifest, icons)?;
        updated.save(&config.manifest_path)?;
        updated.icons()
    })?;

    println!("\nSave Manifest, Icons: {}", written.len());
    if unconsumed.is_empty() {
        println!("Unused mappings: none");
    } else {
        println!("Unused mappings: {}", unconsumed.join(", "));
    }
    println!("\nBuild complete ({:.2}s)", start.elapsed().as_secs_f64());

    Ok(BuildReport {
        font_path,
        manifest_path: config.manifest_path.clone(),
        icons: written,
        unconsumed,
        hinted,
    })
}

/// Allocate a codepoint for one icon, import its outline and register its ligature.
fn emit_icon(
    source: &IconSource,
    em: &EmSquare,
    width: AdvanceWidth,
    allocator: &mut CodepointAllocator<'_>,
    doc: &mut FontDocument,
) -> Result<IconRecord> {
    let name = remap_reserved(&source.name);
    let codepoint = allocator.allocate(&name).codepoint();

    let outline = import_file(&source.path, em)
        .with_context(|| format!("Failed to import icon: {}", source.path.display()))?;
    let glyph = doc
        .add_glyph(&name, codepoint, &outline, width)
        .with_context(|| format!("Failed to add glyph for {}", source.path.display()))?;
    doc.add_ligature(&ligature_tokens(&name), glyph)
        .with_context(|| format!("Failed to add ligature for '{name}'"))?;

    info!("{name}: U+{codepoint:04X}");
    Ok(IconRecord::new(name.into_owned(), codepoint))
}
