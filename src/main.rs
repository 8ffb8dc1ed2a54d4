//! Reversi-Engine: Reversi against a first-legal-move bot.
//!
//! ## Usage
//!
//! - `reversi-engine` - Serve the line protocol on stdin/stdout
//! - `reversi-engine serve` - Same as above
//! - `reversi-engine play --side X --seed 1 --games 100` - Random self-play

use std::io;

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use reversi_engine::board::Side;
use reversi_engine::playout::run_games;
use reversi_engine::protocol::Server;

/// Reversi-Engine: Reversi rules engine with a text protocol
#[derive(Parser)]
#[command(name = "reversi-engine")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log filter used when RUST_LOG is not set (e.g. "debug")
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Read protocol requests from stdin and answer on stdout
    Serve,
    /// Play random moves for the human seat against the bot
    Play {
        /// Side the random player takes (X moves first)
        #[arg(long, default_value = "X", value_parser = parse_side)]
        side: Side,
        /// RNG seed
        #[arg(long, default_value_t = 1)]
        seed: u64,
        /// Number of games
        #[arg(long, default_value_t = 1)]
        games: usize,
    },
}

fn parse_side(s: &str) -> Result<Side> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Side::from_symbol(c.to_ascii_uppercase()),
        _ => None,
    }
    .ok_or_else(|| anyhow!("side must be X or O, got {s:?}"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .init();

    match cli.command {
        Some(Commands::Serve) | None => {
            info!("serving on stdin/stdout");
            let server = Server::new();
            server.run(io::stdin().lock(), io::stdout().lock())
        }
        Some(Commands::Play { side, seed, games }) => {
            let tally = run_games(side, seed, games)
                .map_err(|e| anyhow!("engine refused a self-play move: {e}"))?;
            println!(
                "{} games as {side}: {} won, {} lost, {} tied",
                tally.games(),
                tally.wins,
                tally.losses,
                tally.ties
            );
            Ok(())
        }
    }
}
