//! Conversation state
//!
//! The single source of truth for the running session: the message list,
//! the current display language and the request/error status. The command
//! loop owns it and passes it to the view for rendering.

use realtor_core::{ChatMessage, Language};
use uuid::Uuid;

use crate::api::types::{ChatRequest, ChatResponse, MessageType, Suggestion};

// ============================================================================
// Conversation State
// ============================================================================

#[derive(Debug, Clone)]
pub struct ConversationState {
    // Conversation
    pub messages: Vec<ChatMessage>,
    pub session_id: String,
    pub suggestions: Vec<Suggestion>,

    // Display
    pub language: Language,
    pub show_welcome: bool,

    // Request status
    pub loading: bool,
    pub error: Option<String>,
    pub system_ready: bool,
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

impl ConversationState {
    /// Fresh conversation with a new session id
    pub fn new(language: Language) -> Self {
        Self {
            messages: Vec::new(),
            session_id: Uuid::new_v4().to_string(),
            suggestions: Vec::new(),

            language,
            show_welcome: true,

            loading: false,
            error: None,
            system_ready: false,
        }
    }

    // ========================================================================
    // Sending
    // ========================================================================

    /// Record the user's message and build the request for it.
    ///
    /// Returns `None` (and changes nothing) for blank text or while a reply
    /// is still pending.
    pub fn begin_send(&mut self, text: &str) -> Option<ChatRequest> {
        let text = text.trim();
        if text.is_empty() || self.loading {
            return None;
        }

        self.loading = true;
        self.error = None;
        self.messages.push(ChatMessage::user(
            text,
            self.language,
            Some(self.session_id.clone()),
        ));

        Some(ChatRequest {
            message: text.to_string(),
            language: self.language,
            session_id: Some(self.session_id.clone()),
            message_type: Some(MessageType::Query),
            context: None,
        })
    }

    /// Append the assistant's reply.
    pub fn complete_send(&mut self, response: ChatResponse) {
        let message = ChatMessage::assistant(
            response.message,
            response.language,
            response.session_id,
            response.timestamp,
        );
        self.messages.push(message);
        self.suggestions = response.suggestions;
        self.show_welcome = false;
        self.loading = false;
    }

    /// Record a failed send for the error banner.
    pub fn fail_send(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
        self.loading = false;
    }

    /// Retry action: dismiss the error banner.
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    // ========================================================================
    // View State
    // ========================================================================

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn set_system_ready(&mut self, ready: bool) {
        self.system_ready = ready;
    }

    /// Leave the welcome screen
    pub fn start_chat(&mut self) {
        self.show_welcome = false;
    }

    /// Return to the welcome screen, keeping the conversation
    pub fn go_back(&mut self) {
        self.show_welcome = true;
    }

    /// Drop the conversation and return to the welcome screen
    pub fn clear(&mut self) {
        self.messages.clear();
        self.suggestions.clear();
        self.show_welcome = true;
        self.error = None;
    }

    /// Suggestion `index` (1-based) in the current language
    pub fn suggestion(&self, index: usize) -> Option<&str> {
        index
            .checked_sub(1)
            .and_then(|i| self.suggestions.get(i))
            .map(|s| s.text_for(self.language))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use realtor_core::Role;

    fn response(message: &str, language: Language) -> ChatResponse {
        ChatResponse {
            message: message.to_string(),
            language,
            confidence: 0.9,
            sources: Vec::new(),
            suggestions: vec![Suggestion {
                text: "How do I set up utilities?".to_string(),
                text_zh: Some("如何设置水电煤气？".to_string()),
                intent: "utilities".to_string(),
                confidence: 0.7,
            }],
            session_id: Some("server-session".to_string()),
            response_time_ms: Some(42),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_new_state() {
        let state = ConversationState::new(Language::Zh);
        assert_eq!(state.language, Language::Zh);
        assert!(state.show_welcome);
        assert!(state.messages.is_empty());
        assert!(Uuid::parse_str(&state.session_id).is_ok());
        assert_ne!(state.session_id, ConversationState::default().session_id);
    }

    #[test]
    fn test_begin_send_records_user_message() {
        let mut state = ConversationState::new(Language::Zh);
        state.error = Some("old".to_string());

        let request = state.begin_send("  你好  ").unwrap();
        assert_eq!(request.message, "你好");
        assert_eq!(request.language, Language::Zh);
        assert_eq!(request.session_id.as_deref(), Some(state.session_id.as_str()));
        assert_eq!(request.message_type, Some(MessageType::Query));

        assert!(state.loading);
        assert!(state.error.is_none());
        assert_eq!(state.messages.len(), 1);
        assert_eq!(state.messages[0].role, Role::User);
        assert_eq!(state.messages[0].language, Language::Zh);
    }

    #[test]
    fn test_begin_send_ignores_blank_and_busy() {
        let mut state = ConversationState::default();
        assert!(state.begin_send("   ").is_none());
        assert!(state.messages.is_empty());

        assert!(state.begin_send("hello").is_some());
        assert!(state.begin_send("again").is_none());
        assert_eq!(state.messages.len(), 1);
    }

    #[test]
    fn test_complete_send_caches_reply_language() {
        let mut state = ConversationState::default();
        state.begin_send("hello").unwrap();
        state.complete_send(response("您好！", Language::Zh));

        assert!(!state.loading);
        assert!(!state.show_welcome);
        assert_eq!(state.messages.len(), 2);

        let reply = &state.messages[1];
        assert_eq!(reply.role, Role::Assistant);
        assert_eq!(reply.message_zh.as_deref(), Some("您好！"));
        assert!(reply.message_en.is_none());
        assert_eq!(reply.session_id.as_deref(), Some("server-session"));
        assert_eq!(state.suggestions.len(), 1);
    }

    #[test]
    fn test_fail_send_and_retry() {
        let mut state = ConversationState::default();
        state.begin_send("hello").unwrap();
        state.fail_send("Failed to send message. Please try again.");

        assert!(!state.loading);
        assert!(state.error.is_some());
        // The user's message stays in the conversation.
        assert_eq!(state.messages.len(), 1);

        state.dismiss_error();
        assert!(state.error.is_none());
        assert!(state.begin_send("hello again").is_some());
    }

    #[test]
    fn test_clear_resets_conversation() {
        let mut state = ConversationState::default();
        let session_id = state.session_id.clone();
        state.begin_send("hello").unwrap();
        state.complete_send(response("Hi!", Language::En));
        state.fail_send("boom");

        state.clear();
        assert!(state.messages.is_empty());
        assert!(state.suggestions.is_empty());
        assert!(state.error.is_none());
        assert!(state.show_welcome);
        assert_eq!(state.session_id, session_id);
    }

    #[test]
    fn test_navigation() {
        let mut state = ConversationState::default();
        state.start_chat();
        assert!(!state.show_welcome);
        state.go_back();
        assert!(state.show_welcome);
    }

    #[test]
    fn test_suggestion_follows_language() {
        let mut state = ConversationState::default();
        state.begin_send("hello").unwrap();
        state.complete_send(response("Hi!", Language::En));

        assert_eq!(state.suggestion(1), Some("How do I set up utilities?"));
        state.set_language(Language::Zh);
        assert_eq!(state.suggestion(1), Some("如何设置水电煤气？"));
        assert_eq!(state.suggestion(0), None);
        assert_eq!(state.suggestion(2), None);
    }
}
