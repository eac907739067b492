//! Interactive game loop over any reader/writer pair.

use super::input::{PlayerCommand, parse_command};
use std::io::{self, BufRead, Write};
use strictly_morpion::{Game, GameStatus};
use tracing::{debug, info, instrument, warn};

const HELP: &str = "\
Commands:
  x y        place your mark at column x, row y
  rewind N   go back to history entry N (r N)
  reset      start a new game
  history    list history entries (h)
  help       show this message (?)
  quit       leave (q)";

const GAME_OVER_HINT: &str = "Type \"rewind N\" or \"reset\" to play on.";

/// One-line status: next player, or the winner.
pub fn render_status(game: &Game) -> String {
    match game.status() {
        GameStatus::InProgress => format!("Next player: {}", game.current_player()),
        GameStatus::Won(mark) => format!("{} wins!", mark),
    }
}

/// History listing with branch markers.
pub fn render_history(game: &Game) -> String {
    game.history()
        .iter()
        .enumerate()
        .map(|(index, snapshot)| {
            let label = if index == 0 {
                format!("{:>3}: game start", index)
            } else {
                format!("{:>3}: move #{}", index, index)
            };
            match snapshot.branch_source() {
                Some(source) => format!("{} (branch of #{})", label, source),
                None => label,
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Terminal session driving a [`Game`].
#[derive(Debug)]
pub struct Console<R, W> {
    game: Game,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Wraps a game with an input and an output stream.
    pub fn new(game: Game, input: R, output: W) -> Self {
        Self {
            game,
            input,
            output,
        }
    }

    /// Consumes the console, returning the game and output stream.
    #[cfg(test)]
    pub fn into_parts(self) -> (Game, W) {
        (self.game, self.output)
    }

    fn show_board(&mut self) -> io::Result<()> {
        writeln!(self.output, "{}", self.game.current_grid().display())?;
        writeln!(self.output, "{}", render_status(&self.game))
    }

    /// Reads commands until `quit` or end of input.
    #[instrument(skip(self))]
    pub fn run(&mut self) -> io::Result<()> {
        let config = *self.game.config();
        writeln!(
            self.output,
            "The board is {} by {}. Line up {} marks to win. Type \"help\" for commands.",
            config.width(),
            config.height(),
            config.win_length()
        )?;
        self.show_board()?;

        let mut line = String::new();
        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                debug!("End of input");
                break;
            }

            let command = match parse_command(&line) {
                Ok(command) => command,
                Err(e) => {
                    debug!(error = %e, "Unparseable input");
                    writeln!(self.output, "{}", e)?;
                    continue;
                }
            };

            if !self.dispatch(command)? {
                break;
            }
        }

        info!(history_len = self.game.history_len(), "Console closed");
        Ok(())
    }

    /// Applies one command. Returns false when the player quits.
    fn dispatch(&mut self, command: PlayerCommand) -> io::Result<bool> {
        match command {
            PlayerCommand::Play(coord) => match self.game.play_move(coord.x, coord.y) {
                Ok(status) => {
                    self.show_board()?;
                    if status.winner().is_some() {
                        writeln!(self.output, "{}", GAME_OVER_HINT)?;
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Move rejected");
                    writeln!(self.output, "{}", e)?;
                }
            },
            PlayerCommand::Rewind(index) => match self.game.rewind_to(index) {
                Ok(_) => self.show_board()?,
                Err(e) => writeln!(self.output, "{}", e)?,
            },
            PlayerCommand::Reset => {
                self.game.reset();
                self.show_board()?;
            }
            PlayerCommand::History => writeln!(self.output, "{}", render_history(&self.game))?,
            PlayerCommand::Help => writeln!(self.output, "{}", HELP)?,
            PlayerCommand::Quit => return Ok(false),
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_morpion::Mark;

    fn run_script(game: Game, script: &str) -> (Game, String) {
        let mut console = Console::new(game, script.as_bytes(), Vec::new());
        console.run().unwrap();
        let (game, output) = console.into_parts();
        (game, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_plays_until_win() {
        let game = Game::new(3, 3, 3).unwrap();
        let (game, output) = run_script(game, "0 0\n1 1\n1 0\n2 2\n2 0\n");
        assert_eq!(game.current_winner(), Some(Mark::X));
        assert!(output.contains("X wins!"));
        assert!(output.contains("0 X|X|X"));
        assert!(output.contains(GAME_OVER_HINT));
    }

    #[test]
    fn test_rejections_are_reported() {
        let game = Game::new(3, 3, 3).unwrap();
        let (game, output) = run_script(game, "1 1\n1 1\n5 5\nbogus\nrewind 9\n");
        assert_eq!(game.history_len(), 2);
        assert!(output.contains("Cell (1, 1) is already occupied"));
        assert!(output.contains("outside the 3x3 grid"));
        assert!(output.contains("Expected coordinates"));
        assert!(output.contains("History index 9 is out of range"));
    }

    #[test]
    fn test_quit_stops_reading() {
        let game = Game::new(3, 3, 3).unwrap();
        let (game, output) = run_script(game, "0 0\nquit\n1 1\n");
        assert_eq!(game.history_len(), 2);
        assert!(!output.contains(GAME_OVER_HINT));
    }

    #[test]
    fn test_history_shows_branches() {
        let game = Game::new(3, 3, 3).unwrap();
        let (game, output) = run_script(game, "0 0\n1 1\nrewind 1\nhistory\n");
        assert_eq!(game.history_len(), 4);
        assert!(output.contains("  0: game start"));
        assert!(output.contains("  3: move #3 (branch of #1)"));
    }

    #[test]
    fn test_reset_command() {
        let game = Game::new(3, 3, 3).unwrap();
        let (game, output) = run_script(game, "0 0\nreset\n");
        assert_eq!(game.history_len(), 1);
        assert!(output.contains("Next player: X"));
    }
}
