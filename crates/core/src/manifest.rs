//! Icon manifest: the published name → codepoint list.

use std::{
    fs::read_to_string,
    io::{self, Write},
    path::Path,
};

use anyhow::{Context, Result, bail};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{
    Map, Value,
    ser::{Formatter, PrettyFormatter, Serializer},
};

use crate::io::write_text;

/// One icon entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconRecord {
    pub name: String,
    pub codepoint: u32,
}

impl IconRecord {
    pub fn new(name: impl Into<String>, codepoint: u32) -> Self {
        Self { name: name.into(), codepoint }
    }
}

/// A manifest document. Fields other than `name` and `icons` are kept as-is.
///
/// The `icons` list is only interpreted on request, so a build that discards
/// it never rejects its contents.
#[derive(Debug, Clone, PartialEq)]
pub struct IconManifest {
    document: Map<String, Value>,
    name: String,
}

impl IconManifest {
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text).context("Invalid manifest JSON")?;
        let Value::Object(document) = value else {
            bail!("Manifest must be a JSON object");
        };
        let Some(Value::String(name)) = document.get("name") else {
            bail!("Manifest is missing a string \"name\" field");
        };
        let name = name.clone();
        Ok(Self { document, name })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("Failed to load manifest: {}", path.display()))
    }

    /// Font family name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The `icons` list; empty when absent.
    pub fn icons(&self) -> Result<Vec<IconRecord>> {
        match self.document.get("icons") {
            Some(icons) => Vec::<IconRecord>::deserialize(icons).context("Invalid \"icons\" list"),
            None => Ok(Vec::new()),
        }
    }

    /// Icon assignments keyed by name; the first entry wins for duplicate names.
    pub fn codepoints(&self) -> Result<IndexMap<String, u32>> {
        let icons = self.icons()?;
        let mut map = IndexMap::with_capacity(icons.len());
        for icon in icons {
            map.entry(icon.name).or_insert(icon.codepoint);
        }
        Ok(map)
    }

    /// Serialize with a 2-space indent and ASCII-only output, without a trailing newline.
    pub fn to_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let mut serializer = Serializer::with_formatter(&mut buf, AsciiFormatter::default());
        self.document.serialize(&mut serializer).context("Failed to serialize manifest")?;
        String::from_utf8(buf).context("Manifest serialized to invalid UTF-8")
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        write_text(path, &self.to_json()?)
    }
}

/// Replace the manifest's icons with `icons`, sorted by name.
///
/// The sort is stable, so duplicate names keep their processing order.
pub fn reconcile(manifest: &IconManifest, mut icons: Vec<IconRecord>) -> Result<IconManifest> {
    icons.sort_by(|a, b| a.name.cmp(&b.name));
    let mut updated = manifest.clone();
    let icons = serde_json::to_value(&icons).context("Failed to serialize icons")?;
    updated.document.insert("icons".to_string(), icons);
    Ok(updated)
}

/// Pretty printer that escapes every non-ASCII character as `\uXXXX`.
#[derive(Default)]
struct AsciiFormatter {
    pretty: PrettyFormatter<'static>,
}

impl Formatter for AsciiFormatter {
    fn begin_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_array(writer)
    }

    fn end_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.pretty.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_object(writer)
    }

    fn end_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.pretty.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_object_value(writer)
    }

    fn write_string_fragment<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            if ch.is_ascii() {
                continue;
            }
            writer.write_all(&fragment.as_bytes()[start..i])?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{unit:04x}")?;
            }
            start = i + ch.len_utf8();
        }
        writer.write_all(&fragment.as_bytes()[start..])
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const SAMPLE: &str = r#"{"name": "CupertinoIcons", "version": 2, "icons": [{"name": "b", "codepoint": 2}]}"#;

    #[test]
    fn reads_name_and_icons() {
        let manifest = IconManifest::from_json(SAMPLE).unwrap();
        assert_eq!(manifest.name(), "CupertinoIcons");
        assert_eq!(manifest.icons().unwrap(), [IconRecord::new("b", 2)]);
    }

    #[test]
    fn icons_are_optional() {
        let manifest = IconManifest::from_json(r#"{"name": "X"}"#).unwrap();
        assert!(manifest.icons().unwrap().is_empty());
    }

    #[test]
    fn requires_a_name() {
        assert!(IconManifest::from_json(r#"{"icons": []}"#).is_err());
        assert!(IconManifest::from_json(r#"{"name": 3}"#).is_err());
        assert!(IconManifest::from_json("[]").is_err());
        assert!(IconManifest::from_json("{").is_err());
    }

    #[test]
    fn writes_sorted_icons_with_two_space_indent() {
        let manifest = IconManifest::from_json(SAMPLE).unwrap();
        let updated = reconcile(&manifest, vec![
            IconRecord::new("zoom", 0xF4D5),
            IconRecord::new("Add", 0xF4D6),
            IconRecord::new("add", 0xF4D4),
        ])
        .unwrap();

        let expected = r#"{
  "name": "CupertinoIcons",
  "version": 2,
  "icons": [
    {
      "name": "Add",
      "codepoint": 62678
    },
    {
      "name": "add",
      "codepoint": 62676
    },
    {
      "name": "zoom",
      "codepoint": 62677
    }
  ]
}"#;
        assert_eq!(updated.to_json().unwrap(), expected);
    }

    #[test]
    fn appends_icons_when_absent() {
        let manifest = IconManifest::from_json(r#"{"name": "X", "extra": [true, null]}"#).unwrap();
        let json = reconcile(&manifest, Vec::new()).unwrap().to_json().unwrap();
        assert_eq!(json, "{\n  \"name\": \"X\",\n  \"extra\": [\n    true,\n    null\n  ],\n  \"icons\": []\n}");
    }

    #[test]
    fn escapes_non_ascii() {
        let manifest = IconManifest::from_json(r#"{"name": "Icônes"}"#).unwrap();
        let json = reconcile(&manifest, vec![IconRecord::new("😀", 1)]).unwrap().to_json().unwrap();
        assert!(json.contains(r#""name": "Ic\u00f4nes""#));
        assert!(json.contains(r#""name": "\ud83d\ude00""#));
        assert!(json.is_ascii());
    }

    #[test]
    fn duplicate_names_keep_processing_order() {
        let manifest = IconManifest::from_json(r#"{"name": "X"}"#).unwrap();
        let updated = reconcile(&manifest, vec![
            IconRecord::new("b", 1),
            IconRecord::new("a", 3),
            IconRecord::new("a", 2),
        ])
        .unwrap();
        let codepoints: Vec<u32> = updated.icons().unwrap().iter().map(|i| i.codepoint).collect();
        assert_eq!(codepoints, [3, 2, 1]);
        assert_eq!(updated.codepoints().unwrap().get("a"), Some(&3));
    }

    #[test]
    fn old_icon_list_is_only_checked_when_read() {
        let manifest = IconManifest::from_json(
            r#"{"name": "X", "icons": [{"name": "a", "codepoint": "f4d4"}]}"#,
        )
        .unwrap();
        assert!(manifest.icons().is_err());
        assert!(manifest.codepoints().is_err());

        let updated = reconcile(&manifest, vec![IconRecord::new("a", 0xF4D4)]).unwrap();
        assert_eq!(updated.icons().unwrap(), [IconRecord::new("a", 0xF4D4)]);
    }
}
