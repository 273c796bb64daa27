//! Pokedex CLI
//!
//! Interactive REPL for exploring PokeAPI with a time-expiring response cache.

mod commands;
mod config;
mod input;
mod session;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pokedex_api::{ClientConfig, PokeApiClient};
use pokedex_cache::{CancellationToken, ExpiringCache};
use pokedex_core::traits::ResponseCache;

use crate::config::{AppConfig, Cli};
use crate::session::{Flow, Session};

const PROMPT: &str = "Pokedex > ";

#[tokio::main]
async fn main() -> Result<()> {
    // Loads .env before clap reads its env fallbacks.
    let client_config = ClientConfig::from_env();
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = AppConfig::from_cli(&cli, client_config);
    let shutdown = CancellationToken::new();

    let cache = config
        .cache
        .clone()
        .map(|c| Arc::new(ExpiringCache::with_cancellation(c, shutdown.clone())));
    let client = PokeApiClient::with_config(
        config.client.clone(),
        cache.clone().map(|c| c as Arc<dyn ResponseCache>),
    )
    .context("Failed to create PokeAPI client")?;

    info!(
        base_url = %config.client.base(),
        cache_ttl = ?config.cache.as_ref().map(|c| c.ttl),
        "Pokedex starting"
    );

    let mut session = Session::new(client, cache, config.seed);
    let result = run_repl(&mut session).await;

    shutdown.cancel();
    debug!("Pokedex stopped");
    result
}

/// Reads lines until `exit`, Ctrl-C or end of input.
async fn run_repl(session: &mut Session) -> Result<()> {
    let mut editor = DefaultEditor::new().context("Failed to initialise line editor")?;
    let mut stdout = std::io::stdout();

    loop {
        let line = tokio::task::block_in_place(|| editor.readline(PROMPT));
        match line {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = editor.add_history_entry(line.as_str());
                }
                if session.dispatch(&line, &mut stdout).await? == Flow::Exit {
                    return Ok(());
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("{}", "Closing the Pokedex... Goodbye!".dimmed());
                return Ok(());
            }
            Err(e) => return Err(e).context("Failed to read input"),
        }
    }
}

fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "pokedex=debug,info"
    } else {
        "pokedex=info,warn"
    }
}

fn init_logging(verbose: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(verbose).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
