//! Strictly Morpion - terminal front end
//!
//! Thin presentation layer over the `strictly_morpion` library.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod console;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{BoardArgs, Cli, Command};
use console::Console;
use strictly_morpion::{Coord, Game, GameConfig};
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    initialize_tracing();

    let cli = Cli::parse();

    match cli.command {
        Command::Play { board } => run_play(board),
        Command::Replay { board, moves, json } => run_replay(board, &moves, json),
    }
}

/// Logs go to stderr so the board on stdout stays readable.
fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,strictly_morpion=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Builds the game config from an optional file plus flag overrides.
#[instrument]
fn load_config(board: BoardArgs) -> Result<GameConfig> {
    let base = match &board.config {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig::default(),
    };

    let config = base.with_overrides(board.width, board.height, board.win_length, board.first);
    config.validate()?;
    info!(?config, "Game configured");
    Ok(config)
}

/// Run the interactive game
#[instrument(skip_all)]
fn run_play(board: BoardArgs) -> Result<()> {
    let config = load_config(board)?;
    let game = Game::from_config(&config)?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut console = Console::new(game, stdin.lock(), stdout.lock());
    console.run().context("Terminal I/O failed")?;
    Ok(())
}

/// Replay a scripted sequence of moves
#[instrument(skip(board))]
fn run_replay(board: BoardArgs, moves: &str, json: bool) -> Result<()> {
    let config = load_config(board)?;
    let moves = moves
        .split_whitespace()
        .map(str::parse::<Coord>)
        .collect::<Result<Vec<_>, _>>()?;

    let game = Game::replay(&config, &moves)?;

    if json {
        println!("{}", serde_json::to_string_pretty(game.history())?);
    } else {
        println!("{}", game.current_grid().display());
        println!("{}", console::render_status(&game));
    }
    Ok(())
}
