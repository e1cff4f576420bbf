//! Realtor Core - bilingual message display for the Realtor chat.
//!
//! This crate decides what text the chat shows for each message:
//!
//! - **Languages**: English and Chinese display languages
//! - **Messages**: the immutable conversation entry with optional cached variants
//! - **Phrase table**: an ordered fallback lookup of common rental phrases
//! - **Display resolution**: cached variant, then original, then phrase table
//!
//! # Example
//!
//! ```rust
//! use realtor_core::{ChatMessage, DisplayResolver, Language};
//!
//! let resolver = DisplayResolver::default();
//! let message = ChatMessage::user(
//!     "What documents do I need to rent an apartment?",
//!     Language::En,
//!     None,
//! );
//!
//! let rendered = resolver.render(&message, Language::Zh);
//! assert_eq!(rendered.text, "租房需要什么文件？");
//! assert!(rendered.translated);
//! ```

pub mod display;
pub mod language;
pub mod phrases;
pub mod types;

// Re-export commonly used types
pub use display::{DisplayResolver, RenderCache, Resolution};
pub use language::Language;
pub use phrases::{canonicalize, PhraseEntry, PhraseTable, BUILTIN_PHRASES};
pub use types::{ApiResponse, ChatMessage, RenderedMessage, Role};

/// Error types for realtor-core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    #[error("Invalid phrase: {0}")]
    InvalidPhrase(String),

    #[error("Duplicate phrase: {0}")]
    DuplicatePhrase(String),
}

/// Result type for realtor-core operations.
pub type Result<T> = std::result::Result<T, Error>;
