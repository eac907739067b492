//! Parsing of typed player commands.

use strictly_morpion::{Coord, ParseCoordError};
use tracing::instrument;

/// A command typed at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCommand {
    /// Place the current player's mark.
    Play(Coord),
    /// Go back to a history index.
    Rewind(usize),
    /// Start over.
    Reset,
    /// List history.
    History,
    /// Show the command summary.
    Help,
    /// Leave the game.
    Quit,
}

/// Unparseable input.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum InputError {
    /// Blank line.
    #[display("Empty input")]
    Empty,

    /// `rewind` without a valid index.
    #[display("Expected a history index after \"rewind\", got {:?}", _0)]
    BadIndex(String),

    /// Neither a keyword nor a coordinate pair.
    #[display("{}", _0)]
    Unknown(ParseCoordError),
}

impl std::error::Error for InputError {}

/// Parses one line of input.
///
/// Accepts `x y` or `x,y` to play, `rewind N` (or `r N`), `reset`,
/// `history`, `help` and `quit`.
#[instrument]
pub fn parse_command(line: &str) -> Result<PlayerCommand, InputError> {
    let line = line.trim();
    let mut words = line.split_whitespace();
    let Some(first) = words.next() else {
        return Err(InputError::Empty);
    };

    match first.to_ascii_lowercase().as_str() {
        "rewind" | "r" => {
            let rest = words.collect::<Vec<_>>().join(" ");
            rest.parse()
                .map(PlayerCommand::Rewind)
                .map_err(|_| InputError::BadIndex(rest))
        }
        "reset" => Ok(PlayerCommand::Reset),
        "history" | "h" => Ok(PlayerCommand::History),
        "help" | "?" => Ok(PlayerCommand::Help),
        "quit" | "q" | "exit" => Ok(PlayerCommand::Quit),
        _ => line
            .parse()
            .map(PlayerCommand::Play)
            .map_err(InputError::Unknown),
    }
}
