//! Legacy codepoint table: icon names pinned to previously published codepoints.

use std::{fs::read_to_string, io::ErrorKind, path::Path};

use anyhow::{Context, Result, bail};
use indexmap::IndexMap;
use log::warn;
use serde::Deserialize;

/// A pinned codepoint, either a bare integer or a list whose first element wins.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LegacyCodepoint {
    Single(u32),
    Sequence(Vec<u32>),
}

impl LegacyCodepoint {
    /// The codepoint assigned to the icon.
    pub fn primary(&self) -> Option<u32> {
        match self {
            Self::Single(codepoint) => Some(*codepoint),
            Self::Sequence(codepoints) => codepoints.first().copied(),
        }
    }
}

/// Immutable snapshot of the legacy table, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct LegacyCodepointMap {
    entries: IndexMap<String, LegacyCodepoint>,
}

impl LegacyCodepointMap {
    /// Parse a table from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let map: Self = serde_json::from_str(text).context("Invalid legacy codepoint table")?;
        for (name, entry) in &map.entries {
            if entry.primary().is_none() {
                bail!("Legacy entry '{name}' has an empty codepoint list");
            }
        }
        Ok(map)
    }

    /// Load a table from disk. A missing file yields an empty table.
    pub fn load(path: &Path) -> Result<Self> {
        match read_to_string(path) {
            Ok(text) => Self::from_json(&text)
                .with_context(|| format!("Failed to load legacy table: {}", path.display())),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("legacy codepoint table {} not found, using an empty table", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e)
                .with_context(|| format!("Failed to read legacy table: {}", path.display())),
        }
    }

    /// Codepoint pinned to `name`, if any.
    pub fn get(&self, name: &str) -> Option<u32> {
        self.entries.get(name).and_then(LegacyCodepoint::primary)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest pinned codepoint.
    pub fn highest(&self) -> Option<u32> {
        self.entries.values().filter_map(LegacyCodepoint::primary).max()
    }
}

impl FromIterator<(String, LegacyCodepoint)> for LegacyCodepointMap {
    fn from_iter<I: IntoIterator<Item = (String, LegacyCodepoint)>>(iter: I) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn accepts_integers_and_sequences() {
        let map = LegacyCodepointMap::from_json(r#"{"left": 61440, "right": [61441, 61450]}"#)
            .unwrap();
        assert_eq!(map.get("left"), Some(61440));
        assert_eq!(map.get("right"), Some(61441));
        assert_eq!(map.get("up"), None);
        assert_eq!(map.names().collect::<Vec<_>>(), ["left", "right"]);
        assert_eq!(map.highest(), Some(61441));
    }

    #[test]
    fn rejects_empty_sequences() {
        let err = LegacyCodepointMap::from_json(r#"{"left": []}"#).unwrap_err();
        assert!(err.to_string().contains("left"));
    }

    #[test]
    fn rejects_other_value_types() {
        assert!(LegacyCodepointMap::from_json(r#"{"left": "f000"}"#).is_err());
        assert!(LegacyCodepointMap::from_json("[1, 2]").is_err());
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let map = LegacyCodepointMap::load(&dir.path().join("absent.json")).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn malformed_file_names_the_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("legacy.json");
        write(&path, "{not json").unwrap();
        let err = LegacyCodepointMap::load(&path).unwrap_err();
        assert!(err.to_string().contains("legacy.json"));
    }
}
