//! API types for the Realtor assistant backend

use chrono::{DateTime, NaiveDateTime, Utc};
use realtor_core::Language;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

// ============================================================================
// Chat Types
// ============================================================================

/// Kind of message sent to `/chat`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    #[default]
    Query,
    Greeting,
    Feedback,
    Clarification,
}

/// Request body for `POST /chat`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatRequest {
    pub message: String,
    pub language: Language,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_type: Option<MessageType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<HashMap<String, serde_json::Value>>,
}

/// Response body of `POST /chat`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub message: String,
    pub language: Language,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub sources: Vec<Source>,
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
    #[serde(default = "Utc::now", deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
}

/// Knowledge base document backing an answer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_zh: Option<String>,
    #[serde(default)]
    pub content_snippet: String,
    #[serde(default)]
    pub relevance_score: f64,
    #[serde(default)]
    pub document_type: String,
    #[serde(default)]
    pub topic: String,
}

impl Source {
    /// Title in `language`, falling back to the English title.
    pub fn title_for(&self, language: Language) -> &str {
        localized(&self.title, self.title_zh.as_deref(), language)
    }
}

/// Follow-up question offered by the assistant
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Suggestion {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_zh: Option<String>,
    #[serde(default)]
    pub intent: String,
    #[serde(default)]
    pub confidence: f64,
}

impl Suggestion {
    /// Text in `language`, falling back to the English text.
    pub fn text_for(&self, language: Language) -> &str {
        localized(&self.text, self.text_zh.as_deref(), language)
    }
}

fn localized<'a>(en: &'a str, zh: Option<&'a str>, language: Language) -> &'a str {
    match (language, zh) {
        (Language::Zh, Some(zh)) if !zh.is_empty() => zh,
        _ => en,
    }
}

// ============================================================================
// Health Types
// ============================================================================

/// Response body of `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub chatbot_ready: bool,
}

// ============================================================================
// Topic Types
// ============================================================================

/// Knowledge base topic from `GET /topics`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicCategory {
    pub name: String,
    #[serde(default)]
    pub name_zh: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub description_zh: Option<String>,
    #[serde(default)]
    pub entry_count: u32,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl TopicCategory {
    pub fn name_for(&self, language: Language) -> &str {
        localized(&self.name, self.name_zh.as_deref(), language)
    }

    pub fn description_for(&self, language: Language) -> &str {
        localized(&self.description, self.description_zh.as_deref(), language)
    }
}

// ============================================================================
// Feedback Types
// ============================================================================

/// Request body for `POST /feedback`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedbackRequest {
    pub session_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    /// 1 to 5
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback_text: Option<String>,
    pub feedback_type: String,
}

/// Acknowledgement from `POST /feedback`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackAck {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

// ============================================================================
// Timestamps
// ============================================================================

/// Accept RFC 3339 timestamps as well as naive ISO-8601 ones, which the
/// backend emits for UTC times.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
}

pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_chat_request_skips_empty_optionals() {
        let request = ChatRequest {
            message: "hello".to_string(),
            language: Language::Zh,
            session_id: None,
            message_type: Some(MessageType::Query),
            context: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["language"], "zh");
        assert_eq!(json["message_type"], "query");
        assert!(json.get("session_id").is_none());
        assert!(json.get("context").is_none());
    }

    #[test]
    fn test_chat_response_naive_timestamp() {
        let json = r#"{
            "message": "您好",
            "language": "zh",
            "confidence": 0.8,
            "sources": [],
            "suggestions": [{"text": "How do I find apartments near NYU?", "text_zh": "如何找到纽约大学附近的公寓？", "intent": "search", "confidence": 0.9}],
            "session_id": "abc",
            "response_time_ms": 120,
            "timestamp": "2024-09-01T14:30:05.123456"
        }"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.language, Language::Zh);
        assert_eq!(response.timestamp.year(), 2024);
        assert_eq!(response.timestamp.hour(), 14);
        assert_eq!(response.suggestions.len(), 1);
        assert_eq!(response.response_time_ms, Some(120));
    }

    #[test]
    fn test_chat_response_rfc3339_timestamp() {
        let json = r#"{"message": "Hi", "language": "en", "confidence": 1.0,
            "timestamp": "2024-09-01T10:00:00-04:00"}"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.timestamp.hour(), 14);
        assert!(response.sources.is_empty());
        assert!(response.suggestions.is_empty());
    }

    #[test]
    fn test_chat_response_rejects_bad_timestamp() {
        let json = r#"{"message": "Hi", "language": "en", "timestamp": "yesterday"}"#;
        assert!(serde_json::from_str::<ChatResponse>(json).is_err());
    }

    #[test]
    fn test_suggestion_text_for() {
        let suggestion = Suggestion {
            text: "Set up utilities".to_string(),
            text_zh: Some("设置水电煤气".to_string()),
            intent: "utilities".to_string(),
            confidence: 0.5,
        };
        assert_eq!(suggestion.text_for(Language::En), "Set up utilities");
        assert_eq!(suggestion.text_for(Language::Zh), "设置水电煤气");

        let english_only = Suggestion {
            text_zh: None,
            ..suggestion
        };
        assert_eq!(english_only.text_for(Language::Zh), "Set up utilities");
    }

    #[test]
    fn test_health_response() {
        let json = r#"{"status": "healthy", "timestamp": "2024-09-01T14:30:05", "version": "1.0.0", "chatbot_ready": true}"#;
        let health: HealthResponse = serde_json::from_str(json).unwrap();
        assert!(health.chatbot_ready);
        assert_eq!(health.version, "1.0.0");
    }

    #[test]
    fn test_topic_localization() {
        let json = r#"{"name": "Utilities", "name_zh": "水电煤气", "description": "Setting up services",
            "description_zh": "设置服务", "entry_count": 4, "keywords": ["gas"]}"#;
        let topic: TopicCategory = serde_json::from_str(json).unwrap();
        assert_eq!(topic.name_for(Language::Zh), "水电煤气");
        assert_eq!(topic.description_for(Language::En), "Setting up services");
    }
}
