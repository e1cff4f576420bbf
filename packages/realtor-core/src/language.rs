//! Supported display languages.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// A language a message can be authored in or displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English
    #[default]
    En,
    /// Simplified Chinese
    Zh,
}

impl Language {
    /// All supported languages, in display order.
    pub const ALL: [Language; 2] = [Language::En, Language::Zh];

    /// The wire tag (`"en"` or `"zh"`).
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
        }
    }

    /// The language's own name for itself.
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Zh => "中文",
        }
    }

    /// The other supported language.
    pub fn other(&self) -> Language {
        match self {
            Language::En => Language::Zh,
            Language::Zh => Language::En,
        }
    }

    /// Guess the language of `text`.
    ///
    /// Any CJK unified ideograph makes the text Chinese; everything else is
    /// treated as English.
    pub fn detect(text: &str) -> Language {
        if text.chars().any(|c| ('\u{4e00}'..='\u{9fff}').contains(&c)) {
            Language::Zh
        } else {
            Language::En
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = Error;

    /// Accepts bare tags (`en`, `ZH`) and locale-style tags (`en-US`,
    /// `zh_CN.UTF-8`); only the primary subtag is considered.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let primary = s
            .trim()
            .split(['-', '_', '.'])
            .next()
            .unwrap_or_default()
            .to_lowercase();

        match primary.as_str() {
            "en" => Ok(Language::En),
            "zh" => Ok(Language::Zh),
            _ => Err(Error::UnknownLanguage(s.to_string())),
        }
    }
}
