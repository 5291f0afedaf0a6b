//! Runs one simulated game and writes the per-round snapshot table as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use monopoly_sim::bot::PurchasePolicy;
use monopoly_sim::{run_game, Board, BoardSource, Game, GameConfig, GameOutcome, SnapshotTable};

#[derive(Parser)]
#[command(name = "monopoly-sim")]
#[command(about = "Simulate a property-trading board game to completion", version)]
struct Cli {
    /// Number of players (2-8)
    #[arg(short, long, default_value_t = 2)]
    players: usize,

    /// Rounds before the game is declared a stalemate
    #[arg(short = 'r', long, default_value_t = 1000)]
    max_rounds: u32,

    /// Seed for dice and decisions
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// JSON board definition (defaults to the standard board)
    #[arg(short, long)]
    board: Option<PathBuf>,

    /// Where to write the snapshot table (stdout when omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Roll again after a double
    #[arg(long)]
    reroll_on_double: bool,

    /// Buy every affordable property instead of flipping a coin
    #[arg(long)]
    always_buy: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    seed: u64,
    rounds_played: u32,
    outcome: &'a GameOutcome,
    snapshots: &'a SnapshotTable,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "monopoly_sim=debug" } else { "monopoly_sim=info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with_writer(std::io::stderr)
        .init();

    let board = match &cli.board {
        Some(path) => Board::load(BoardSource::Path(path.clone()))
            .with_context(|| format!("loading board from {}", path.display()))?,
        None => Board::standard().context("loading standard board")?,
    };

    let config = GameConfig {
        n_players: cli.players,
        max_rounds: cli.max_rounds,
        seed: cli.seed,
        reroll_on_double: cli.reroll_on_double,
        purchase_policy: if cli.always_buy { PurchasePolicy::Always } else { PurchasePolicy::CoinFlip },
    };
    let mut game = Game::new(config, board).context("invalid game configuration")?;

    info!(players = cli.players, max_rounds = cli.max_rounds, seed = cli.seed, "starting game");
    let outcome = run_game(&mut game);
    match &outcome {
        GameOutcome::Winner(id) => info!(winner = id, rounds = game.round, "player won"),
        GameOutcome::Stalemate { round, remaining } => {
            info!(round, remaining = ?remaining, "stalemate")
        }
    }

    let report = Report { seed: cli.seed, rounds_played: game.round, outcome: &outcome, snapshots: &game.snapshots };
    let json = serde_json::to_string_pretty(&report)?;
    match &cli.out {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "snapshot table written");
        }
        None => println!("{json}"),
    }
    Ok(())
}
