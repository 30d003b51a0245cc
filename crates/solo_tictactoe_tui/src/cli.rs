//! Command-line interface for solo_tictactoe.

use clap::Parser;
use std::path::PathBuf;

/// Solo Tic-Tac-Toe - play against a heuristic computer in the terminal
#[derive(Parser, Debug)]
#[command(name = "solo_tictactoe")]
#[command(about = "Play tic-tac-toe against the computer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (defaults are used if it doesn't exist)
    #[arg(short, long, default_value = "solo_tictactoe.toml")]
    pub config: PathBuf,

    /// Seed for the computer's random fallback (overrides config)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Computer "thinking" delay in milliseconds (overrides config)
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Log file path (overrides config)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["solo_tictactoe"]);
        assert_eq!(cli.config, PathBuf::from("solo_tictactoe.toml"));
        assert_eq!(cli.seed, None);
        assert_eq!(cli.delay_ms, None);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from(["solo_tictactoe", "--seed", "7", "--delay-ms", "250"]);
        assert_eq!(cli.seed, Some(7));
        assert_eq!(cli.delay_ms, Some(250));
    }
}
