//! Solo Tic-Tac-Toe - terminal front-end.

#![warn(missing_docs)]

mod cli;
mod config;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use config::GameConfig;
use solo_tictactoe::{GameEngine, GameSession};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = GameConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?
        .with_overrides(cli.seed, cli.delay_ms, cli.log_file);

    initialize_tracing(&config)?;
    info!(?config, "Starting Solo Tic-Tac-Toe");

    let engine = match config.seed() {
        Some(seed) => GameEngine::with_seed(*seed),
        None => GameEngine::new(),
    };
    let session = GameSession::new(engine, config.thinking_delay());

    tui::run_tui(session).await
}

/// Logs go to a file so they don't interfere with the TUI.
#[instrument(skip_all)]
fn initialize_tracing(config: &GameConfig) -> Result<()> {
    let log_file = std::fs::File::create(config.log_file())
        .with_context(|| format!("Failed to create log file {}", config.log_file().display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_writes_to_configured_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.log");
        let config = GameConfig::default().with_overrides(None, None, Some(path.clone()));

        initialize_tracing(&config).unwrap();
        tracing::warn!(marker = "log-file-check", "Tracing ready");

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("log-file-check"));
    }
}
