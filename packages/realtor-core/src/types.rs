//! Core data types for the Realtor chat.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::language::Language;

/// Who produced a message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Assistant,
}

/// A single entry in a conversation.
///
/// Messages are immutable once created. The cached variants are only ever
/// filled in by the constructor; nothing translates a message after the fact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    /// Unique identifier, generated at creation
    pub id: Uuid,
    /// Original text as sent or received
    pub message: String,
    /// Cached English variant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_en: Option<String>,
    /// Cached Chinese variant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_zh: Option<String>,
    /// Language `message` is authored in
    pub language: Language,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// A message typed by the user in `language`.
    pub fn user(
        message: impl Into<String>,
        language: Language,
        session_id: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: message.into(),
            message_en: None,
            message_zh: None,
            language,
            role: Role::User,
            session_id,
            timestamp: Utc::now(),
        }
    }

    /// A reply from the assistant.
    ///
    /// The reply text is cached as the variant for its own language; the
    /// other variant stays empty.
    pub fn assistant(
        message: impl Into<String>,
        language: Language,
        session_id: Option<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let message = message.into();
        let (message_en, message_zh) = match language {
            Language::En => (Some(message.clone()), None),
            Language::Zh => (None, Some(message.clone())),
        };

        Self {
            id: Uuid::new_v4(),
            message,
            message_en,
            message_zh,
            language,
            role: Role::Assistant,
            session_id,
            timestamp,
        }
    }

    /// Attach cached variants supplied by the producer.
    pub fn with_variants(mut self, message_en: Option<String>, message_zh: Option<String>) -> Self {
        self.message_en = message_en;
        self.message_zh = message_zh;
        self
    }

    /// The cached variant for `language`, if present and non-empty.
    pub fn cached_variant(&self, language: Language) -> Option<&str> {
        let variant = match language {
            Language::En => self.message_en.as_deref(),
            Language::Zh => self.message_zh.as_deref(),
        };
        variant.filter(|text| !text.is_empty())
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

/// What the presentation layer receives for one message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenderedMessage {
    /// Text to show
    pub text: String,
    /// Whether the message was authored in a different language than the one displayed
    pub translated: bool,
}

/// JSON envelope printed by the `realtor` CLI.
///
/// Exactly one of `data` and `error` is present; the other is omitted from
/// the output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the command succeeded
    pub ok: bool,
    /// Command result, e.g. a resolved message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Why the command failed, e.g. an unreadable phrase file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Wrap a command result.
    pub fn ok(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    /// Report a failed command.
    pub fn err(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(error.into()),
        }
    }
}
