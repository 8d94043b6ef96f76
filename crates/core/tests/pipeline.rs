//! End-to-end builds in a temporary project directory.

use std::{
    collections::HashMap,
    fs::{create_dir_all, read_to_string, remove_file, write},
    path::Path,
};

use iconforge_core::{BuildConfig, IconManifest, IconRecord, build};
use pretty_assertions::assert_eq;
use read_fonts::{FontRef, TableProvider, types::GlyphId16};
use tempfile::{TempDir, tempdir};

const SQUARE_SVG: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 512 512">
  <switch><g><path d="M64 64h384v384H64z"/></g></switch>
</svg>"#;

const CIRCLE_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="28" height="28">
  <circle cx="14" cy="14" r="10"/>
</svg>"#;

const HEART_EPS: &str = "%!PS-Adobe-3.0 EPSF-3.0
%%BoundingBox: 0 0 400 400
%%EndProlog
newpath
0 0 moveto 400 0 lineto 400 400 lineto 0 400 lineto closepath
fill
%%EOF
";

fn project() -> (TempDir, BuildConfig) {
    let dir = tempdir().unwrap();
    let root = dir.path();
    create_dir_all(root.join("src/arrows")).unwrap();
    create_dir_all(root.join("build")).unwrap();

    write(root.join("src/add.svg"), SQUARE_SVG).unwrap();
    write(root.join("src/return.svg"), SQUARE_SVG).unwrap();
    write(root.join("src/arrows/arrow_up_1.svg"), CIRCLE_SVG).unwrap();
    write(root.join("src/heart.eps"), HEART_EPS).unwrap();
    write(root.join("src/README.txt"), "not an icon").unwrap();

    write(
        root.join("build/manifest.json"),
        r#"{"name": "Test Icons", "family": "keep me", "icons": [{"name": "old", "codepoint": 1}]}"#,
    )
    .unwrap();
    write(root.join("build/legacy.json"), r#"{"heart": 61443, "gone": [61444, 61445]}"#).unwrap();

    let config = BuildConfig {
        src_dir: root.join("src"),
        manifest_path: root.join("build/manifest.json"),
        legacy_map_path: root.join("build/legacy.json"),
        output_dir: root.join("fonts"),
        font_file_stem: "TestIcons".to_string(),
        hint_tool: None,
        ..BuildConfig::default()
    };
    (dir, config)
}

fn glyph_names_by_codepoint(path: &Path) -> HashMap<u32, String> {
    let data = std::fs::read(path).unwrap();
    let font = FontRef::new(&data).unwrap();
    let post = font.post().unwrap();
    let cmap = font.cmap().unwrap();
    let record = cmap.encoding_records().first().unwrap();
    let subtable = record.subtable(cmap.offset_data()).unwrap();
    subtable
        .iter()
        .map(|(cp, gid)| {
            let name = post.glyph_name(GlyphId16::new(gid.to_u32() as u16)).unwrap();
            (cp, name.to_string())
        })
        .collect()
}

#[test]
fn builds_font_and_manifest() {
    let (_dir, config) = project();
    let report = build(&config).unwrap();

    let expected = vec![
        IconRecord::new("add", 0xF4D4),
        IconRecord::new("arrow_up_1", 0xF4D6),
        IconRecord::new("heart", 61443),
        IconRecord::new("return_icon", 0xF4D5),
    ];
    assert_eq!(report.icons, expected);
    assert_eq!(report.unconsumed, ["gone"]);
    assert!(!report.hinted);

    let manifest = IconManifest::load(&config.manifest_path).unwrap();
    assert_eq!(manifest.name(), "Test Icons");
    assert_eq!(manifest.icons().unwrap(), expected);

    let text = read_to_string(&config.manifest_path).unwrap();
    assert!(text.starts_with("{\n  \"name\": \"Test Icons\",\n  \"family\": \"keep me\",\n"));
    assert!(text.ends_with("\n  ]\n}"));

    let names = glyph_names_by_codepoint(&report.font_path);
    assert_eq!(names[&0xF4D4], "add");
    assert_eq!(names[&0xF4D6], "arrow_up_1");
    assert_eq!(names[&61443], "heart");
    assert_eq!(names[&0xF4D5], "return_icon");
    assert_eq!(names[&('_' as u32)], "underscore");
}

#[test]
fn reuse_manifest_round_trips() {
    let (_dir, config) = project();
    let first = build(&config).unwrap();

    remove_file(&config.legacy_map_path).unwrap();
    write(config.src_dir.join("bell.svg"), SQUARE_SVG).unwrap();
    let config = BuildConfig { reuse_manifest: true, ..config };
    let second = build(&config).unwrap();

    let mut expected = first.icons.clone();
    expected.insert(2, IconRecord::new("bell", 0xF4D7));
    assert_eq!(second.icons, expected);
    assert!(second.unconsumed.is_empty());

    remove_file(config.src_dir.join("bell.svg")).unwrap();
    let third = build(&config).unwrap();
    assert_eq!(third.icons, first.icons);
}

#[test]
fn counter_assignments_shift_without_reuse() {
    let (_dir, config) = project();
    build(&config).unwrap();

    write(config.src_dir.join("aaa.svg"), SQUARE_SVG).unwrap();
    let report = build(&config).unwrap();
    let add = report.icons.iter().find(|i| i.name == "add").unwrap();
    assert_eq!(add.codepoint, 0xF4D5);
}

#[test]
fn missing_hint_tool_is_not_fatal() {
    let (_dir, config) = project();
    let config = BuildConfig {
        hint_tool: Some("iconforge-missing-hinter".to_string()),
        ..config
    };
    let report = build(&config).unwrap();
    assert!(!report.hinted);
    assert!(report.font_path.exists());
}

#[test]
fn broken_source_aborts_the_build() {
    let (_dir, config) = project();
    let broken = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10"><path d="M0 0h1"#;
    write(config.src_dir.join("broken.svg"), broken).unwrap();
    let before = read_to_string(&config.manifest_path).unwrap();

    let err = build(&config).unwrap_err();
    assert!(format!("{err:#}").contains("broken.svg"));
    assert_eq!(read_to_string(&config.manifest_path).unwrap(), before);
}

#[test]
fn malformed_manifest_is_fatal() {
    let (_dir, config) = project();
    write(&config.manifest_path, "{\"icons\": []}").unwrap();
    assert!(build(&config).is_err());
    assert!(!config.font_path().exists());
}

#[test]
fn old_icon_list_is_ignored_without_reuse() {
    let (_dir, config) = project();
    write(
        &config.manifest_path,
        r#"{"name": "Test Icons", "icons": [{"name": "add", "codepoint": "f4d4"}]}"#,
    )
    .unwrap();

    let report = build(&config).unwrap();
    assert_eq!(report.icons.len(), 4);

    let config = BuildConfig { reuse_manifest: true, ..config };
    write(
        &config.manifest_path,
        r#"{"name": "Test Icons", "icons": [{"name": "add", "codepoint": "f4d4"}]}"#,
    )
    .unwrap();
    assert!(build(&config).is_err());
}
