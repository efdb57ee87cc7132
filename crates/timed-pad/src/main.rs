mod command;
mod repl;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use timed_pad_config::AppConfig;
use timed_pad_core::{Document, HistoryConfig, HistoryManager};

/// A line-oriented text editor with time-grouped undo and redo.
#[derive(Parser, Debug)]
#[command(name = "timed-pad", version, about)]
struct Cli {
    /// Config file to use instead of `timed-pad.json` next to the executable.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start with this text in the buffer (not undoable).
    #[arg(long)]
    text: Option<String>,

    /// Override the undo grouping window in milliseconds.
    #[arg(long = "inactivity-ms")]
    inactivity_ms: Option<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config_path = cli.config.unwrap_or_else(AppConfig::config_path);
    let mut config = AppConfig::load_or_create(&config_path);
    if let Some(ms) = cli.inactivity_ms {
        config.undo.inactivity_ms = ms;
        config.sanitize();
    }
    tracing::info!("Starting timed-pad with config {}", config_path.display());

    let history = HistoryManager::new(HistoryConfig::from(&config.undo));
    let mut doc = Document::with_text(cli.text.as_deref().unwrap_or_default(), history);

    let stdin = io::stdin();
    let stdout = io::stdout();
    repl::run(&mut doc, &config, stdin.lock(), stdout.lock())
}
