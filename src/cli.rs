/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::str::FromStr;

use clap::Parser;

use crate::Square;

/// A command to be sent to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    multicall = true,
    about,
    rename_all = "lower",
    override_usage("<ENGINE COMMAND>")
)]
pub enum EngineCommand {
    /// Print a visual representation of the current board.
    #[command(alias = "d")]
    Display,

    /// Print a breakdown of the static evaluation of the current chess position.
    Eval,

    /// Quit the engine.
    #[command(alias = "quit")]
    Exit,

    /// Print the current chess position as a FEN string, or the current tic-tac-toe board as text.
    Fen,

    /// Search for the best move in the current position, without playing it.
    Go {
        /// Number of plies to search.
        ///
        /// Defaults to 4 for chess and the whole game for tic-tac-toe.
        #[arg(short, long)]
        depth: Option<u8>,

        /// Milliseconds to search for.
        #[arg(short = 't', long)]
        movetime: Option<u64>,
    },

    /// Play a move: UCI notation such as `e2e4` for chess, or `<row> <col>` for tic-tac-toe.
    #[command(alias = "m")]
    Move {
        #[arg(required = true, num_args = 1..=2)]
        args: Vec<String>,
    },

    /// Show all legal moves in the current position, or the destinations of the piece on a square.
    Moves { square: Option<Square> },

    /// Performs a perft on the current chess position at the supplied depth, printing total node count.
    Perft { depth: usize },

    /// Switch to chess, from a FEN string or the standard starting position.
    #[command(alias = "pos")]
    Position {
        /// Either `startpos` or the fields of a FEN string. Defaults to `startpos`.
        #[arg(allow_hyphen_values = true)]
        fen: Vec<String>,
    },

    /// Performs a split perft on the current chess position at the supplied depth.
    #[command(alias = "sperft")]
    Splitperft { depth: usize },

    /// Print whether the game is over, and if so, how it ended.
    Status,

    /// Switch to tic-tac-toe, from text such as `XX./OO./... x` or an empty board.
    Ttt {
        #[arg(allow_hyphen_values = true)]
        board: Vec<String>,
    },
}

impl FromStr for EngineCommand {
    type Err = clap::Error;

    /// Attempt to parse an [`EngineCommand`] from a line of input.
    ///
    /// # Example
    /// ```
    /// # use arbiter::EngineCommand;
    /// let cmd: EngineCommand = "go --depth 3".parse().unwrap();
    /// assert_eq!(cmd, EngineCommand::Go { depth: Some(3), movetime: None });
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_parse_from(s.split_ascii_whitespace())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!("d".parse::<EngineCommand>().unwrap(), EngineCommand::Display);
        assert_eq!("quit".parse::<EngineCommand>().unwrap(), EngineCommand::Exit);

        let cmd: EngineCommand = "position 8/8/8/8/8/8/8/K1k5 w - - 0 1".parse().unwrap();
        let EngineCommand::Position { fen } = cmd else {
            panic!("expected a position command, got {cmd:?}");
        };
        assert_eq!(fen.join(" "), "8/8/8/8/8/8/8/K1k5 w - - 0 1");

        let cmd: EngineCommand = "move 0 2".parse().unwrap();
        assert_eq!(
            cmd,
            EngineCommand::Move {
                args: vec![String::from("0"), String::from("2")]
            }
        );

        let cmd: EngineCommand = "moves e2".parse().unwrap();
        assert_eq!(
            cmd,
            EngineCommand::Moves {
                square: Some(Square::E2)
            }
        );

        let cmd: EngineCommand = "go -t 250".parse().unwrap();
        assert_eq!(
            cmd,
            EngineCommand::Go {
                depth: None,
                movetime: Some(250)
            }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!("move".parse::<EngineCommand>().is_err());
        assert!("moves z9".parse::<EngineCommand>().is_err());
        assert!("perft".parse::<EngineCommand>().is_err());
        assert!("castle".parse::<EngineCommand>().is_err());
    }
}
