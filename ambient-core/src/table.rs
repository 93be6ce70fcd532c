//! Authored text table: context key → line of flavor text.
//!
//! The table is built once before the selector starts ticking and is
//! read-only afterwards. Lookups of keys with no authored line return
//! `None`; sparse content is normal and never an error.
//!
//! Two source formats are understood:
//!
//! ```text
//! schema: *key,text
//! # comment
//! Crypt3, Bones crunch underfoot.
//! VillageNightRainy0, Rain drums on thatched roofs.
//! ```
//!
//! and TOML:
//!
//! ```toml
//! [texts]
//! Crypt3 = "Bones crunch underfoot."
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{AmbientError, Result};

/// Immutable mapping from case-sensitive keys to text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextTable {
    entries: HashMap<String, String>,
}

impl TextTable {
    /// Build a table from key/text pairs. Later duplicates are rejected.
    ///
    /// # Errors
    /// Returns `AmbientError::DuplicateKey` if a key appears twice.
    pub fn from_entries<K, V, I>(entries: I) -> Result<Self>
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = HashMap::new();
        for (key, text) in entries {
            let key = key.into();
            if map.contains_key(&key) {
                return Err(AmbientError::DuplicateKey(key));
            }
            map.insert(key, text.into());
        }
        Ok(Self { entries: map })
    }

    /// Text authored for `key`, if any.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Whether `key` has an authored line.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of authored lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no lines are authored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all authored keys, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Parse the `key,text` table format.
    ///
    /// # Errors
    /// Returns `AmbientError::TableParse` for a line without a comma or with
    /// an empty key, and `AmbientError::DuplicateKey` for a repeated key.
    pub fn parse_text_table(source: &str) -> Result<Self> {
        let mut entries = HashMap::new();
        for (i, raw) in source.lines().enumerate() {
            let line_no = i + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || is_schema_header(line) {
                continue;
            }
            let Some((key, text)) = line.split_once(',') else {
                return Err(AmbientError::TableParse {
                    line: line_no,
                    reason: "expected `key,text`".to_string(),
                });
            };
            let key = key.trim();
            if key.is_empty() {
                return Err(AmbientError::TableParse {
                    line: line_no,
                    reason: "empty key".to_string(),
                });
            }
            if entries
                .insert(key.to_string(), text.trim().to_string())
                .is_some()
            {
                return Err(AmbientError::DuplicateKey(key.to_string()));
            }
        }
        Ok(Self { entries })
    }

    /// Parse the TOML format (`[texts]` table of key → text).
    ///
    /// Duplicate keys are rejected by the TOML parser itself.
    ///
    /// # Errors
    /// Returns `AmbientError::Config` if the document is not valid TOML or
    /// lacks a `[texts]` table of strings, and `AmbientError::EmptyKey` for
    /// a blank key.
    pub fn parse_toml(source: &str) -> Result<Self> {
        #[derive(Deserialize)]
        struct Document {
            texts: HashMap<String, String>,
        }

        let doc: Document =
            toml::from_str(source).map_err(|e| AmbientError::Config(e.to_string()))?;
        if let Some(key) = doc.texts.keys().find(|k| k.trim().is_empty()) {
            return Err(AmbientError::EmptyKey(key.clone()));
        }
        Ok(Self { entries: doc.texts })
    }
}

fn is_schema_header(line: &str) -> bool {
    line.get(..7)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("schema:"))
}

/// Produces the text table before the selector begins ticking.
pub trait TableLoader {
    /// Load and parse the authored table.
    ///
    /// # Errors
    /// Returns an error if the source cannot be read or parsed.
    fn load(&self) -> Result<TextTable>;
}

/// Loads a table from disk, choosing the format by extension.
///
/// `.toml` files use the TOML format; anything else uses `key,text` lines.
#[derive(Debug, Clone)]
pub struct FileTableLoader {
    path: PathBuf,
}

impl FileTableLoader {
    /// Loader for the table at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path this loader reads.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TableLoader for FileTableLoader {
    fn load(&self) -> Result<TextTable> {
        let content = std::fs::read_to_string(&self.path)?;
        let is_toml = self
            .path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        let table = if is_toml {
            TextTable::parse_toml(&content)?
        } else {
            TextTable::parse_text_table(&content)?
        };
        debug!(path = %self.path.display(), lines = table.len(), "loaded text table");
        Ok(table)
    }
}

/// In-memory source, handy for hosts that embed their table.
#[derive(Debug, Clone)]
pub struct StaticTableLoader(pub &'static str);

impl TableLoader for StaticTableLoader {
    fn load(&self) -> Result<TextTable> {
        TextTable::parse_text_table(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
schema: *key,text

# dungeons
Crypt3, Bones crunch underfoot.
VillageNightRainy0 ,  Rain drums on thatched roofs, steadily.
TownCityDesert7,Heat shimmers over the rooftops.
";

    #[test]
    fn parses_text_table_format() {
        let table = TextTable::parse_text_table(SAMPLE).expect("parse");
        assert_eq!(table.len(), 3);
        assert_eq!(table.lookup("Crypt3"), Some("Bones crunch underfoot."));
        assert_eq!(
            table.lookup("VillageNightRainy0"),
            Some("Rain drums on thatched roofs, steadily.")
        );
    }

    #[test]
    fn keys_are_case_sensitive() {
        let table = TextTable::parse_text_table(SAMPLE).expect("parse");
        assert!(table.contains("Crypt3"));
        assert!(!table.contains("crypt3"));
    }

    #[test]
    fn missing_key_is_absent_every_time() {
        let table = TextTable::parse_text_table(SAMPLE).expect("parse");
        for _ in 0..3 {
            assert_eq!(table.lookup("MineNight9"), None);
        }
    }

    #[test]
    fn line_without_comma_reports_line_number() {
        let err = TextTable::parse_text_table("Crypt0,ok\nbroken line").expect_err("should fail");
        match err {
            AmbientError::TableParse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_key_is_rejected() {
        let err = TextTable::parse_text_table(" , orphan text").expect_err("should fail");
        assert!(matches!(err, AmbientError::TableParse { line: 1, .. }));
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let err = TextTable::parse_text_table("Crypt0,a\nCrypt0,b").expect_err("should fail");
        assert!(matches!(err, AmbientError::DuplicateKey(k) if k == "Crypt0"));

        let err = TextTable::from_entries([("Mine1", "a"), ("Mine1", "b")]).expect_err("should fail");
        assert!(matches!(err, AmbientError::DuplicateKey(_)));
    }

    #[test]
    fn parses_toml_format() {
        let table = TextTable::parse_toml(
            "[texts]\nCrypt3 = \"Bones crunch underfoot.\"\nNoneNight1 = \"Owls call.\"\n",
        )
        .expect("parse");
        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup("NoneNight1"), Some("Owls call."));
    }

    #[test]
    fn toml_blank_key_is_rejected() {
        let err = TextTable::parse_toml("[texts]\n\" \" = \"orphan\"\n").expect_err("should fail");
        assert!(matches!(err, AmbientError::EmptyKey(ref k) if k == " "));
    }

    #[test]
    fn toml_without_texts_table_is_rejected() {
        assert!(TextTable::parse_toml("title = \"x\"").is_err());
    }

    #[test]
    fn static_loader_parses_embedded_table() {
        let table = StaticTableLoader(SAMPLE).load().expect("load");
        assert_eq!(table.keys().count(), 3);
    }
}
