//! CleanSweep - housekeeping desk console
//!
//! Runs the front desk and housekeeping views against one shared store.
//! Switch between them with `role`.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod console;
mod state;

use config::AppConfig;
use console::Outcome;

#[derive(Parser)]
#[command(name = "cleansweep")]
#[command(
    about = "Room cleaning status and housekeeper assignments for the front desk and housekeeping"
)]
struct Cli {
    /// Path to a config file (defaults to the platform config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL of the summarization service
    #[arg(long)]
    summarizer_url: Option<String>,
}

/// Initialize tracing on stderr so the console output stays clean
fn init_tracing(default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn prompt(state: &state::AppState) {
    let label = {
        let store = state.store();
        match (store.role(), store.current_housekeeper()) {
            (Some(role), Some(housekeeper)) => format!("{} ({})", role, housekeeper.name),
            (Some(role), None) => role.to_string(),
            (None, _) => "signed out".to_string(),
        }
    };
    print!("{}> ", label);
    let _ = std::io::stdout().flush();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config =
        AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(url) = cli.summarizer_url {
        config.summarizer.url = Some(url);
    }

    init_tracing(&config.log_filter);
    tracing::info!("Starting CleanSweep");

    let state = state::AppState::new(&config).context("Failed to initialize summarizer")?;

    println!("Welcome to CleanSweep. Type 'help' for commands.");
    prompt(&state);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if !line.trim().is_empty() {
            let output = match console::parse(&line) {
                Ok(command) => match console::execute(&state, command).await {
                    Outcome::Continue(text) => text,
                    Outcome::Quit => break,
                },
                Err(usage) => usage,
            };
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        prompt(&state);
    }

    tracing::info!("Shutting down");
    Ok(())
}
