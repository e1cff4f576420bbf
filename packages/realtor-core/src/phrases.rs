//! Ordered phrase table used as the last-resort translation source.
//!
//! Entries are scanned in table order, so the order of [`BUILTIN_PHRASES`]
//! decides which entry wins when several of them match the same text.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use crate::language::Language;
use crate::{Error, Result};

/// Built-in `(key, en, zh)` triples, in lookup order.
pub const BUILTIN_PHRASES: &[(&str, &str, &str)] = &[
    // Greetings
    ("hello", "Hello", "你好"),
    ("hi", "Hi", "嗨"),
    ("thank you", "Thank you", "谢谢"),
    ("thanks", "Thanks", "谢谢"),
    // Common questions
    (
        "what documents do i need to rent an apartment",
        "What documents do I need to rent an apartment?",
        "租房需要什么文件？",
    ),
    (
        "how do i find apartments near nyu",
        "How do I find apartments near NYU?",
        "如何找到纽约大学附近的公寓？",
    ),
    (
        "what's the difference between manhattan and jersey city",
        "What's the difference between Manhattan and Jersey City?",
        "曼哈顿和泽西市有什么区别？",
    ),
    (
        "how do i set up utilities",
        "How do I set up utilities?",
        "如何设置水电煤气？",
    ),
    // Common responses
    ("i can help you with", "I can help you with", "我可以帮助您"),
    ("to rent an apartment in nyc", "To rent an apartment in NYC", "在纽约租房"),
    ("you typically need", "you typically need", "您通常需要"),
];

/// Lowercase and trim `text` into lookup-key form.
pub fn canonicalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// One phrase with its variant in each supported language.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhraseEntry {
    /// Canonical lookup key
    pub key: String,
    pub en: String,
    pub zh: String,
}

impl PhraseEntry {
    pub fn new(key: impl Into<String>, en: impl Into<String>, zh: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            en: en.into(),
            zh: zh.into(),
        }
    }

    /// The variant for `language`.
    pub fn variant(&self, language: Language) -> &str {
        match language {
            Language::En => &self.en,
            Language::Zh => &self.zh,
        }
    }

    /// Whether the canonical `text` equals the key or either contains the other.
    fn overlaps(&self, text: &str) -> bool {
        text.contains(self.key.as_str()) || self.key.contains(text)
    }
}

/// Immutable, ordered phrase table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhraseTable {
    entries: Vec<PhraseEntry>,
}

impl PhraseTable {
    /// Build a table from `entries`, canonicalizing keys.
    ///
    /// Fails if a key or variant is empty or two entries share a key.
    pub fn new(entries: impl IntoIterator<Item = PhraseEntry>) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut table = Vec::new();

        for entry in entries {
            let key = canonicalize(&entry.key);
            if key.is_empty() {
                return Err(Error::InvalidPhrase("empty key".to_string()));
            }
            if entry.en.trim().is_empty() || entry.zh.trim().is_empty() {
                return Err(Error::InvalidPhrase(format!("missing variant for '{key}'")));
            }
            if !seen.insert(key.clone()) {
                return Err(Error::DuplicatePhrase(key));
            }
            table.push(PhraseEntry { key, ..entry });
        }

        Ok(Self { entries: table })
    }

    /// The built-in table, initialized on first use.
    pub fn builtin() -> &'static PhraseTable {
        static BUILTIN: OnceLock<PhraseTable> = OnceLock::new();
        BUILTIN.get_or_init(|| PhraseTable {
            entries: BUILTIN_PHRASES
                .iter()
                .map(|(key, en, zh)| PhraseEntry::new(*key, *en, *zh))
                .collect(),
        })
    }

    /// The built-in entries followed by `extra`.
    pub fn with_extra(extra: impl IntoIterator<Item = PhraseEntry>) -> Result<Self> {
        Self::new(Self::builtin().entries.iter().cloned().chain(extra))
    }

    /// Load extra entries from a JSON array of `{key, en, zh}` objects and
    /// append them to the built-in table.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let extra: Vec<PhraseEntry> = serde_json::from_str(&content)?;
        Self::with_extra(extra)
    }

    pub fn entries(&self) -> &[PhraseEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the entry for `text`.
    ///
    /// An exact key match wins; otherwise the first entry (in table order)
    /// whose key contains the text, or is contained in it, is returned.
    /// Blank text never matches.
    pub fn lookup(&self, text: &str) -> Option<&PhraseEntry> {
        let canonical = canonicalize(text);
        if canonical.is_empty() {
            return None;
        }

        self.entries
            .iter()
            .find(|entry| entry.key == canonical)
            .or_else(|| self.entries.iter().find(|entry| entry.overlaps(&canonical)))
    }

    /// Whether any entry overlaps `text`.
    ///
    /// Unlike [`lookup`](Self::lookup) there is no blank guard: every key
    /// contains the empty string, so blank text matches a non-empty table.
    pub fn matches(&self, text: &str) -> bool {
        let canonical = canonicalize(text);
        self.entries.iter().any(|entry| entry.overlaps(&canonical))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_table_is_valid() {
        let table = PhraseTable::builtin();
        assert_eq!(table.len(), BUILTIN_PHRASES.len());
        // Rebuilding through the validating constructor must succeed.
        assert!(PhraseTable::new(table.entries().to_vec()).is_ok());
        for entry in table.entries() {
            assert_eq!(entry.key, canonicalize(&entry.key));
            assert!(!entry.en.is_empty());
            assert!(!entry.zh.is_empty());
        }
    }

    #[test]
    fn test_canonicalize() {
        assert_eq!(canonicalize("  HELLO  "), "hello");
        assert_eq!(canonicalize("\tThank You\n"), "thank you");
    }

    #[test]
    fn test_exact_match_beats_earlier_substring() {
        // "hi" comes before "thanks" but "thanks" is an exact match.
        let table = PhraseTable::builtin();
        let entry = table.lookup("Thanks").unwrap();
        assert_eq!(entry.key, "thanks");
    }

    #[test]
    fn test_substring_match_follows_table_order() {
        let table = PhraseTable::builtin();
        // Contains both "hello" and "thank you"; "hello" is listed first.
        let entry = table.lookup("Hello and thank you!").unwrap();
        assert_eq!(entry.key, "hello");
        // Short keys match inside longer words.
        let entry = table.lookup("which borough?").unwrap();
        assert_eq!(entry.key, "hi");
    }

    #[test]
    fn test_text_contained_in_key() {
        let table = PhraseTable::builtin();
        let entry = table.lookup("set up utilities").unwrap();
        assert_eq!(entry.key, "how do i set up utilities");
    }

    #[test]
    fn test_blank_text_never_matches() {
        let table = PhraseTable::builtin();
        assert!(table.lookup("").is_none());
        assert!(table.lookup("   ").is_none());
    }

    #[test]
    fn test_blank_text_overlaps_every_key() {
        assert!(PhraseTable::builtin().matches(""));
        assert!(PhraseTable::builtin().matches(" \n"));
        assert!(!PhraseTable::default().matches(""));
    }

    #[test]
    fn test_no_match() {
        let table = PhraseTable::builtin();
        assert!(table.lookup("Xyz unrecognized phrase").is_none());
        assert!(!table.matches("Xyz unrecognized phrase"));
    }

    #[test]
    fn test_new_rejects_invalid_entries() {
        let err = PhraseTable::new(vec![PhraseEntry::new("  ", "a", "b")]).unwrap_err();
        assert!(matches!(err, Error::InvalidPhrase(_)));

        let err = PhraseTable::new(vec![PhraseEntry::new("lease", "Lease", "")]).unwrap_err();
        assert!(matches!(err, Error::InvalidPhrase(_)));

        let err = PhraseTable::new(vec![
            PhraseEntry::new("Lease", "Lease", "租约"),
            PhraseEntry::new("lease ", "Lease", "租约"),
        ])
        .unwrap_err();
        assert!(matches!(err, Error::DuplicatePhrase(key) if key == "lease"));
    }

    #[test]
    fn test_with_extra_appends_after_builtin() {
        let table =
            PhraseTable::with_extra(vec![PhraseEntry::new("Broker Fee", "Broker fee", "中介费")])
                .unwrap();
        assert_eq!(table.len(), BUILTIN_PHRASES.len() + 1);
        assert_eq!(table.entries().last().unwrap().key, "broker fee");
        assert_eq!(table.lookup("broker fee").unwrap().zh, "中介费");
    }

    #[test]
    fn test_with_extra_rejects_builtin_duplicate() {
        let err =
            PhraseTable::with_extra(vec![PhraseEntry::new("Hello", "Hey", "嘿")]).unwrap_err();
        assert!(matches!(err, Error::DuplicatePhrase(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"key": "security deposit", "en": "Security deposit", "zh": "押金"}}]"#
        )
        .unwrap();

        let table = PhraseTable::load(file.path()).unwrap();
        assert_eq!(table.lookup("Security Deposit").unwrap().zh, "押金");
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(PhraseTable::load(file.path()), Err(Error::Json(_))));

        let missing = file.path().with_extension("missing");
        assert!(matches!(PhraseTable::load(&missing), Err(Error::Io(_))));
    }
}
