//! Command-line interface for strictly_morpion.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use strictly_morpion::Mark;

/// Strictly Morpion - N-in-a-row on a rectangular board
#[derive(Parser, Debug)]
#[command(name = "strictly_morpion")]
#[command(about = "N-in-a-row board game with branching history", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Board options shared by every subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct BoardArgs {
    /// Path to a TOML game config (width, height, win_length, first_player)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of columns
    #[arg(long)]
    pub width: Option<usize>,

    /// Number of rows
    #[arg(long)]
    pub height: Option<usize>,

    /// Marks in a row needed to win
    #[arg(long)]
    pub win_length: Option<usize>,

    /// Player who moves first (X or O)
    #[arg(long)]
    pub first: Option<Mark>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively on the terminal
    Play {
        #[command(flatten)]
        board: BoardArgs,
    },

    /// Apply a fixed sequence of moves and print the outcome
    Replay {
        #[command(flatten)]
        board: BoardArgs,

        /// Moves as space-separated "x,y" pairs, e.g. "0,0 1,1 1,0"
        #[arg(short, long)]
        moves: String,

        /// Print the whole history as JSON instead of the final board
        #[arg(long)]
        json: bool,
    },
}
