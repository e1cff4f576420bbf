//! Display text resolution for bilingual messages.
//!
//! [`DisplayResolver::resolve`] picks the text to render for a message in a
//! given display language. The order is fixed:
//!
//! 1. a non-empty cached variant for the display language,
//! 2. the original text when it is already in the display language,
//! 3. the phrase table entry matching the original text,
//! 4. the original text.
//!
//! Resolution never fails; a miss degrades to the original text.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::language::Language;
use crate::phrases::PhraseTable;
use crate::types::{ChatMessage, RenderedMessage};

/// Which step of the resolution order produced the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// Cached variant attached to the message
    Cached,
    /// Message already authored in the display language
    SameLanguage,
    /// Phrase table match
    Phrase,
    /// Nothing applied; original text returned
    Fallback,
}

/// Resolves display text against a phrase table.
#[derive(Debug, Clone, Copy)]
pub struct DisplayResolver<'a> {
    table: &'a PhraseTable,
}

impl Default for DisplayResolver<'static> {
    fn default() -> Self {
        Self::new(PhraseTable::builtin())
    }
}

impl<'a> DisplayResolver<'a> {
    pub fn new(table: &'a PhraseTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'a PhraseTable {
        self.table
    }

    /// Text to render for `message` in `target`.
    pub fn resolve(&self, message: &ChatMessage, target: Language) -> String {
        self.resolve_with_source(message, target).0
    }

    /// Like [`resolve`](Self::resolve), also reporting which step matched.
    pub fn resolve_with_source(
        &self,
        message: &ChatMessage,
        target: Language,
    ) -> (String, Resolution) {
        if let Some(cached) = message.cached_variant(target) {
            return (cached.to_string(), Resolution::Cached);
        }

        if message.language == target {
            return (message.message.clone(), Resolution::SameLanguage);
        }

        match self.translate_text(&message.message, target) {
            Some(text) => (text.to_string(), Resolution::Phrase),
            None => (message.message.clone(), Resolution::Fallback),
        }
    }

    /// Phrase table translation of `text` into `target`, if any entry matches.
    pub fn translate_text(&self, text: &str, target: Language) -> Option<&'a str> {
        self.table.lookup(text).map(|entry| entry.variant(target))
    }

    /// Whether `message` is shown in a language other than the one it was written in.
    ///
    /// This is a presentation hint only: it stays true when resolution fell
    /// back to the untranslated original.
    pub fn is_translated(&self, message: &ChatMessage, target: Language) -> bool {
        message.language != target
    }

    /// Whether the phrase table has any entry overlapping `text`.
    pub fn can_resolve(&self, text: &str) -> bool {
        self.table.matches(text)
    }

    /// Text plus translated flag, as handed to the presentation layer.
    pub fn render(&self, message: &ChatMessage, target: Language) -> RenderedMessage {
        RenderedMessage {
            text: self.resolve(message, target),
            translated: self.is_translated(message, target),
        }
    }
}

/// Memoized renders keyed by message id and display language.
///
/// Resolution is deterministic for a fixed phrase table, so entries never
/// go stale while the table is unchanged.
#[derive(Debug, Default)]
pub struct RenderCache {
    entries: HashMap<(Uuid, Language), RenderedMessage>,
}

impl RenderCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached render of `message` in `target`, computing it on a miss.
    pub fn get_or_render(
        &mut self,
        resolver: &DisplayResolver<'_>,
        message: &ChatMessage,
        target: Language,
    ) -> &RenderedMessage {
        self.entries
            .entry((message.id, target))
            .or_insert_with(|| resolver.render(message, target))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
