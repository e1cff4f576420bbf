//! Realtor CLI - inspect display resolution from the command line.
//!
//! All output is a JSON `ApiResponse` envelope on stdout.

use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;

use realtor_core::{ApiResponse, ChatMessage, DisplayResolver, Language, PhraseTable};

#[derive(Parser)]
#[command(name = "realtor")]
#[command(about = "Realtor display resolution - bilingual message lookup")]
#[command(version)]
struct Cli {
    /// Extra phrase table (JSON array of {key, en, zh}) appended to the built-in one
    #[arg(long, global = true)]
    phrases: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the display text of a message
    Resolve {
        /// Original message text
        #[arg(short, long)]
        text: String,
        /// Language the text is written in (detected when omitted)
        #[arg(short, long)]
        from: Option<Language>,
        /// Display language
        #[arg(long)]
        to: Language,
        /// Cached English variant
        #[arg(long)]
        en: Option<String>,
        /// Cached Chinese variant
        #[arg(long)]
        zh: Option<String>,
    },
    /// Check whether the phrase table can translate some text
    Probe {
        /// Text to probe
        #[arg(short, long)]
        text: String,
    },
    /// List phrase table entries
    Phrases,
}

fn main() {
    let cli = Cli::parse();

    let table = match &cli.phrases {
        Some(path) => match PhraseTable::load(path) {
            Ok(table) => table,
            Err(e) => {
                println!("{}", to_json(&ApiResponse::<()>::err(e.to_string())));
                std::process::exit(1);
            }
        },
        None => PhraseTable::builtin().clone(),
    };
    let resolver = DisplayResolver::new(&table);

    let output = match cli.command {
        Commands::Resolve {
            text,
            from,
            to,
            en,
            zh,
        } => handle_resolve(&resolver, text, from, to, en, zh),
        Commands::Probe { text } => to_json(&ApiResponse::ok(json!({
            "text": text,
            "can_resolve": resolver.can_resolve(&text),
        }))),
        Commands::Phrases => to_json(&ApiResponse::ok(json!({
            "count": table.len(),
            "phrases": table.entries(),
        }))),
    };

    println!("{}", output);
}

fn handle_resolve(
    resolver: &DisplayResolver<'_>,
    text: String,
    from: Option<Language>,
    to: Language,
    en: Option<String>,
    zh: Option<String>,
) -> String {
    let from = from.unwrap_or_else(|| Language::detect(&text));
    let message = ChatMessage::user(text, from, None).with_variants(en, zh);
    let (resolved, resolution) = resolver.resolve_with_source(&message, to);

    to_json(&ApiResponse::ok(json!({
        "text": resolved,
        "translated": resolver.is_translated(&message, to),
        "resolution": resolution,
        "from": from,
        "to": to,
    })))
}

fn to_json<T: Serialize>(response: &T) -> String {
    serde_json::to_string_pretty(response)
        .unwrap_or_else(|e| format!(r#"{{"ok":false,"error":"{}"}}"#, e))
}
