//! Input commands for the chat prompt
//!
//! Lines starting with `/` are commands; anything else is sent to the
//! assistant.

use realtor_core::Language;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Send text to the assistant
    Send(String),
    /// Send a welcome-screen quick-start question (1-based)
    SampleQuestion(usize),
    /// Send a follow-up suggestion (1-based)
    Suggestion(usize),

    // Display
    SetLanguage(Language),
    Clear,
    Back,
    Start,
    Retry,

    // Auxiliary backend calls
    Topics,
    Stats,
    Feedback { rating: u8, text: Option<String> },

    // General
    Help,
    Quit,

    /// Blank input
    Empty,
    /// A malformed command, with the key of the usage hint to show
    Invalid(&'static str),
    /// An unrecognised `/command`
    Unknown(String),
}

/// Parse one line of input.
///
/// On the welcome screen a bare number picks a quick-start question.
pub fn parse(input: &str, on_welcome: bool) -> Command {
    let input = input.trim();
    if input.is_empty() {
        return Command::Empty;
    }

    let Some(rest) = input.strip_prefix('/') else {
        if on_welcome {
            if let Ok(index) = input.parse::<usize>() {
                return Command::SampleQuestion(index);
            }
        }
        return Command::Send(input.to_string());
    };

    let mut parts = rest.splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or_default().to_lowercase();
    let args = parts.next().map(str::trim).unwrap_or_default();

    match name.as_str() {
        "lang" | "language" => match args.parse() {
            Ok(language) => Command::SetLanguage(language),
            Err(_) => Command::Invalid("help.text"),
        },
        "en" => Command::SetLanguage(Language::En),
        "zh" => Command::SetLanguage(Language::Zh),
        "clear" => Command::Clear,
        "back" => Command::Back,
        "start" => Command::Start,
        "retry" => Command::Retry,
        "s" | "suggest" => match args.parse() {
            Ok(index) => Command::Suggestion(index),
            Err(_) => Command::Invalid("help.text"),
        },
        "topics" => Command::Topics,
        "stats" => Command::Stats,
        "feedback" => parse_feedback(args),
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => Command::Unknown(format!("/{name}")),
    }
}

fn parse_feedback(args: &str) -> Command {
    let mut parts = args.splitn(2, char::is_whitespace);
    let rating = parts.next().and_then(|r| r.parse::<u8>().ok());
    let text = parts
        .next()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string);

    match rating {
        Some(rating @ 1..=5) => Command::Feedback { rating, text },
        _ => Command::Invalid("feedback.usage"),
    }
}
