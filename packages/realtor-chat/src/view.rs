//! Terminal rendering of the conversation
//!
//! Every function here is a pure function of the conversation state; the
//! display text of each message comes from the [`DisplayResolver`].

use chrono::Local;
use realtor_core::{ChatMessage, DisplayResolver, Language, RenderCache, RenderedMessage, Role};

use crate::i18n::{I18n, SAMPLE_QUESTION_COUNT};
use crate::state::ConversationState;

const WELCOME_FEATURES: usize = 4;

pub struct View<'a> {
    i18n: &'a I18n,
    resolver: DisplayResolver<'a>,
}

impl<'a> View<'a> {
    pub fn new(i18n: &'a I18n, resolver: DisplayResolver<'a>) -> Self {
        Self { i18n, resolver }
    }

    /// Title, readiness indicator and current language.
    pub fn header(&self, state: &ConversationState) -> String {
        let lang = state.language;
        let (dot, status) = if state.system_ready {
            ("●", self.i18n.t(lang, "status.online"))
        } else {
            ("○", self.i18n.t(lang, "status.offline"))
        };
        format!(
            "== {} ==  {} {}  [{}]",
            self.i18n.t(lang, "app.title"),
            dot,
            status,
            lang.native_name()
        )
    }

    pub fn welcome(&self, language: Language) -> String {
        let t = |key: &str| self.i18n.t(language, key);

        let mut lines = vec![
            t("welcome.title"),
            t("welcome.subtitle"),
            t("welcome.universities"),
            String::new(),
            t("welcome.description"),
        ];
        for i in 1..=WELCOME_FEATURES {
            lines.push(format!("  • {}", t(&format!("welcome.feature_{i}"))));
        }
        lines.push(String::new());
        lines.push(t("welcome.quick_start"));
        for i in 1..=SAMPLE_QUESTION_COUNT {
            lines.push(format!("  {i}. {}", t(&format!("welcome.sample_{i}"))));
        }
        lines.push(String::new());
        lines.push(t("welcome.start"));
        lines.join("\n")
    }

    /// One message line: `[HH:MM] speaker: text`, with a translated badge.
    pub fn message(
        &self,
        message: &ChatMessage,
        rendered: &RenderedMessage,
        language: Language,
    ) -> String {
        let speaker = match message.role {
            Role::User => self.i18n.t(language, "speaker.user"),
            Role::Assistant => self.i18n.t(language, "speaker.assistant"),
        };
        let time = message.timestamp.with_timezone(&Local).format("%H:%M");

        let mut line = format!("[{time}] {speaker}: {}", rendered.text);
        if rendered.translated {
            line.push_str(&format!("  ({})", self.i18n.t(language, "message.translated")));
        }
        line
    }

    /// All messages in the current language.
    pub fn transcript(&self, state: &ConversationState, cache: &mut RenderCache) -> String {
        if state.messages.is_empty() && !state.loading {
            return self.i18n.t(state.language, "chat.empty");
        }

        state
            .messages
            .iter()
            .map(|message| {
                let rendered = cache.get_or_render(&self.resolver, message, state.language);
                self.message(message, rendered, state.language)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn suggestions(&self, state: &ConversationState) -> Option<String> {
        if state.suggestions.is_empty() {
            return None;
        }

        let mut lines = vec![self.i18n.t(state.language, "chat.suggestions")];
        lines.extend(
            state
                .suggestions
                .iter()
                .enumerate()
                .map(|(i, s)| format!("  /s {}  {}", i + 1, s.text_for(state.language))),
        );
        Some(lines.join("\n"))
    }

    pub fn error_banner(&self, state: &ConversationState) -> Option<String> {
        state.error.as_ref().map(|error| {
            format!(
                "! {}: {}\n! {}",
                self.i18n.t(state.language, "error.title"),
                error,
                self.i18n.t(state.language, "error.retry")
            )
        })
    }

    pub fn typing(&self, language: Language) -> String {
        format!("… {}", self.i18n.t(language, "chat.typing"))
    }

    pub fn prompt(&self, language: Language) -> String {
        format!("{} > ", self.i18n.t(language, "chat.placeholder"))
    }

    /// Full redraw: header, then the welcome screen or the conversation.
    pub fn screen(&self, state: &ConversationState, cache: &mut RenderCache) -> String {
        let mut sections = vec![self.header(state)];

        if state.show_welcome {
            sections.push(self.welcome(state.language));
        } else {
            sections.push(self.transcript(state, cache));
            if state.loading {
                sections.push(self.typing(state.language));
            }
            sections.extend(self.suggestions(state));
        }
        sections.extend(self.error_banner(state));

        sections.join("\n\n")
    }
}
