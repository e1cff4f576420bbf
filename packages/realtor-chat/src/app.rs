//! Interactive chat loop
//!
//! Reads one line at a time from stdin, applies it to the conversation state
//! and prints whatever changed.

use anyhow::Result;
use realtor_core::{DisplayResolver, Language, PhraseTable, RenderCache};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::api::types::FeedbackRequest;
use crate::api::RealtorClient;
use crate::commands::{self, Command};
use crate::i18n::I18n;
use crate::state::ConversationState;
use crate::view::View;

/// What the loop should do after handling a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

pub struct App {
    client: RealtorClient,
    state: ConversationState,
    i18n: I18n,
    phrases: PhraseTable,
    cache: RenderCache,
}

impl App {
    pub fn new(client: RealtorClient, language: Language, phrases: PhraseTable) -> Self {
        Self {
            client,
            state: ConversationState::new(language),
            i18n: I18n::load(),
            phrases,
            cache: RenderCache::new(),
        }
    }

    fn view(&self) -> View<'_> {
        View::new(&self.i18n, DisplayResolver::new(&self.phrases))
    }

    fn t(&self, key: &str) -> String {
        self.i18n.t(self.state.language, key)
    }

    /// Poll health once, then run until `/quit` or end of input.
    pub async fn run(mut self) -> Result<()> {
        let ready = self.client.is_ready().await;
        self.state.set_system_ready(ready);
        tracing::info!(
            "Connected to {} (ready: {}), session {}",
            self.client.base_url(),
            ready,
            self.state.session_id
        );

        self.redraw();

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            self.show_prompt().await?;
            let Some(line) = lines.next_line().await? else {
                break;
            };

            let command = commands::parse(&line, self.state.show_welcome);
            if self.handle(command).await == Flow::Exit {
                break;
            }
        }

        tracing::info!("Chat session {} ended", self.state.session_id);
        Ok(())
    }

    async fn handle(&mut self, command: Command) -> Flow {
        match command {
            Command::Send(text) => self.send(&text).await,
            Command::SampleQuestion(index) => {
                match self.i18n.sample_question(self.state.language, index) {
                    Some(question) => self.send(&question).await,
                    None => self.send(&index.to_string()).await,
                }
            }
            Command::Suggestion(index) => match self.state.suggestion(index).map(str::to_string) {
                Some(text) => self.send(&text).await,
                None => {
                    let index = index.to_string();
                    self.notice(self.i18n.format(
                        self.state.language,
                        "suggestion.missing",
                        &[("index", &index)],
                    ));
                }
            },

            Command::SetLanguage(language) => {
                tracing::debug!("Display language: {}", language);
                self.state.set_language(language);
                self.redraw();
                self.notice(self.i18n.format(
                    language,
                    "language.set",
                    &[("language", language.native_name())],
                ));
            }
            Command::Clear => {
                self.state.clear();
                self.cache.clear();
                self.notice(self.t("chat.cleared"));
                self.redraw();
            }
            Command::Back => {
                self.state.go_back();
                self.redraw();
            }
            Command::Start => {
                self.state.start_chat();
                self.redraw();
            }
            Command::Retry => {
                self.state.dismiss_error();
                self.redraw();
            }

            Command::Topics => self.show_topics().await,
            Command::Stats => self.show_stats().await,
            Command::Feedback { rating, text } => self.send_feedback(rating, text).await,

            Command::Help => self.notice(self.t("help.text")),
            Command::Quit => return Flow::Exit,

            Command::Empty => {}
            Command::Invalid(usage_key) => self.notice(self.t(usage_key)),
            Command::Unknown(name) => self.notice(self.i18n.format(
                self.state.language,
                "error.unknown_command",
                &[("command", &name)],
            )),
        }

        Flow::Continue
    }

    async fn send(&mut self, text: &str) {
        let Some(request) = self.state.begin_send(text) else {
            return;
        };
        self.state.start_chat();
        self.redraw();

        match self.client.send_message(&request).await {
            Ok(response) => {
                tracing::debug!(
                    "Reply in {:?}ms, confidence {:.2}, {} sources",
                    response.response_time_ms,
                    response.confidence,
                    response.sources.len()
                );
                for source in &response.sources {
                    tracing::trace!(
                        "Source: {} [{}] ({:.2})",
                        source.title_for(self.state.language),
                        source.topic,
                        source.relevance_score
                    );
                }
                self.state.complete_send(response);
            }
            Err(e) => {
                tracing::error!("Failed to send message: {:#}", e);
                let message = self.t("error.send_failed");
                self.state.fail_send(message);
            }
        }

        self.redraw();
    }

    async fn show_topics(&mut self) {
        match self.client.topics().await {
            Ok(topics) if topics.is_empty() => self.notice(self.t("topics.empty")),
            Ok(topics) => {
                let language = self.state.language;
                let mut lines = vec![self.t("topics.header")];
                lines.extend(topics.iter().map(|topic| {
                    format!(
                        "  • {} ({}) - {}",
                        topic.name_for(language),
                        topic.entry_count,
                        topic.description_for(language)
                    )
                }));
                self.notice(lines.join("\n"));
            }
            Err(e) => {
                tracing::warn!("Error fetching topics: {:#}", e);
                self.notice(self.t("topics.failed"));
            }
        }
    }

    async fn show_stats(&mut self) {
        match self.client.stats().await {
            Ok(stats) => {
                let pretty =
                    serde_json::to_string_pretty(&stats).unwrap_or_else(|_| stats.to_string());
                self.notice(pretty);
            }
            Err(e) => {
                tracing::warn!("Error fetching stats: {:#}", e);
                self.notice(self.t("stats.failed"));
            }
        }
    }

    async fn send_feedback(&mut self, rating: u8, text: Option<String>) {
        let request = FeedbackRequest {
            session_id: self.state.session_id.clone(),
            message_id: self
                .state
                .messages
                .iter()
                .rev()
                .find(|m| !m.is_user())
                .map(|m| m.id.to_string()),
            rating,
            feedback_text: text,
            feedback_type: "rating".to_string(),
        };

        match self.client.submit_feedback(&request).await {
            Ok(ack) => {
                tracing::debug!("Feedback acknowledged: {} {}", ack.status, ack.message);
                self.notice(self.t("feedback.thanks"));
            }
            Err(e) => {
                tracing::warn!("Error submitting feedback: {:#}", e);
                self.notice(self.t("feedback.failed"));
            }
        }
    }

    fn redraw(&mut self) {
        let view = View::new(&self.i18n, DisplayResolver::new(&self.phrases));
        let screen = view.screen(&self.state, &mut self.cache);
        println!("\n{screen}\n");
    }

    fn notice(&self, text: String) {
        println!("{text}");
    }

    async fn show_prompt(&self) -> Result<()> {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(self.view().prompt(self.state.language).as_bytes()).await?;
        stdout.flush().await?;
        Ok(())
    }
}
