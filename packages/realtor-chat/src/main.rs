//! Realtor Chat - terminal client for the bilingual NYC rental assistant
//!
//! Talks to the assistant backend over HTTP and renders every message in the
//! selected display language (English or Chinese).

mod api;
mod app;
mod commands;
mod config;
mod i18n;
mod state;
mod view;

use anyhow::{Context, Result};
use clap::Parser;
use realtor_core::{Language, PhraseTable};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::api::RealtorClient;
use crate::app::App;
use crate::config::Config;

#[derive(Parser)]
#[command(name = "realtor-chat")]
#[command(about = "Bilingual NYC rental assistant chat")]
#[command(version)]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Backend base URL
    #[arg(long)]
    api_url: Option<String>,

    /// Initial display language (en or zh)
    #[arg(short, long)]
    lang: Option<Language>,

    /// Extra phrase table (JSON array of {key, en, zh})
    #[arg(long)]
    phrases: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(url) = cli.api_url {
        config.api_url = url;
    }
    if let Some(lang) = cli.lang {
        config.language = Some(lang);
    }
    if let Some(path) = cli.phrases {
        config.phrases_file = Some(path);
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting Realtor Chat against {}", config.api_url);

    let phrases = match &config.phrases_file {
        Some(path) => PhraseTable::load(path)
            .with_context(|| format!("Failed to load phrase table {}", path.display()))?,
        None => PhraseTable::builtin().clone(),
    };
    tracing::debug!("Phrase table loaded with {} entries", phrases.len());

    let client = RealtorClient::new(&config.api_url, config.timeout())?;
    App::new(client, config.initial_language(), phrases).run().await
}
