/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt, io,
    sync::mpsc::{channel, Receiver, Sender},
    thread,
    time::Duration,
};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{debug, warn};

use crate::{
    perft, splitperft, EngineCommand, Evaluator, Game, Search, SearchConfig, SearchResult, Square,
    TicTacToe, FEN_STARTPOS,
};

/// Default depth of a chess search.
const DEFAULT_CHESS_DEPTH: u8 = 4;

/// Default depth of a tic-tac-toe search; enough to play the game out.
const DEFAULT_TICTACTOE_DEPTH: u8 = 9;

/// The game currently loaded in the engine.
#[derive(Debug, Clone)]
pub enum Board {
    Chess(Game),
    TicTacToe(TicTacToe),
}

impl Default for Board {
    #[inline(always)]
    fn default() -> Self {
        Self::Chess(Game::default())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chess(game) => write!(f, "{game}"),
            Self::TicTacToe(board) => write!(f, "{board:?}"),
        }
    }
}

/// Drives the engine from commands, either typed on `stdin` or sent with [`Engine::send_command`].
#[derive(Debug)]
pub struct Engine {
    /// The game commands act on.
    board: Board,

    /// One half of a channel, responsible for sending commands to the engine to execute.
    sender: Sender<EngineCommand>,

    /// One half of a channel, responsible for receiving commands for the engine to execute.
    receiver: Receiver<EngineCommand>,
}

impl Engine {
    /// Constructs a new [`Engine`] instance to be executed with [`Engine::run`], starting with a game of chess.
    pub fn new() -> Self {
        let (sender, receiver) = channel();

        Self {
            board: Board::default(),
            sender,
            receiver,
        }
    }

    /// Returns a string of the engine's name and current version.
    pub fn name(&self) -> String {
        format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }

    #[inline(always)]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Sends an [`EngineCommand`] to the engine to be executed once it runs.
    pub fn send_command(&self, command: EngineCommand) -> Result<()> {
        self.sender
            .send(command)
            .context("Failed to queue command for the engine")
    }

    /// Execute the main event loop for the engine.
    ///
    /// This function spawns a thread to handle input from `stdin` and waits on received commands.
    /// A command that fails prints its error, and the loop carries on.
    pub fn run(&mut self) -> Result<()> {
        // Spawn a separate thread for handling user input
        let sender = self.sender.clone();
        thread::spawn(|| {
            if let Err(err) = input_handler(sender) {
                debug!("Input handler thread stopping: {err:#}");
            }
        });

        // Loop on user input
        while let Ok(cmd) = self.receiver.recv() {
            if cmd == EngineCommand::Exit {
                break;
            }

            // Keep running, even on error
            if let Err(e) = self.execute(cmd) {
                eprintln!("Error: {e:#}");
            }
        }

        Ok(())
    }

    /// Execute a single command, printing its output to `stdout`.
    pub fn execute(&mut self, cmd: EngineCommand) -> Result<()> {
        match cmd {
            EngineCommand::Display => println!("{}", self.board),

            EngineCommand::Eval => self.eval()?,

            // Handled by the event loop
            EngineCommand::Exit => {}

            EngineCommand::Fen => match &self.board {
                Board::Chess(game) => println!("{}", game.to_fen()),
                Board::TicTacToe(board) => println!("{board}"),
            },

            EngineCommand::Go { depth, movetime } => self.go(depth, movetime)?,

            EngineCommand::Move { args } => self.make_move(&args)?,

            EngineCommand::Moves { square } => println!("{}", self.moves(square)?),

            EngineCommand::Perft { depth } => {
                let game = self.chess()?;
                println!("{}", perft(game.position(), depth));
            }

            EngineCommand::Position { fen } => self.position(&fen)?,

            EngineCommand::Splitperft { depth } => {
                let game = self.chess()?;
                let nodes = splitperft(game.position(), depth);
                println!("\n{nodes}");
            }

            EngineCommand::Status => match &self.board {
                Board::Chess(game) => println!("{}", game.status()),
                Board::TicTacToe(board) => println!("{}", board.status()),
            },

            EngineCommand::Ttt { board } => {
                self.board = if board.is_empty() {
                    Board::TicTacToe(TicTacToe::new())
                } else {
                    Board::TicTacToe(board.join(" ").parse()?)
                };
            }
        }

        Ok(())
    }

    /// Returns the current chess game, or an error if a different game is loaded.
    fn chess(&self) -> Result<&Game> {
        match &self.board {
            Board::Chess(game) => Ok(game),
            Board::TicTacToe(_) => bail!("This command only works on chess positions"),
        }
    }

    /// Executes the `eval` command, printing an evaluation of the current position.
    fn eval(&self) -> Result<()> {
        let game = self.chess()?;
        println!("{}", Evaluator::new(game.position()));
        Ok(())
    }

    /// Set the chess position to the supplied FEN string, or the standard startpos if not supplied.
    fn position(&mut self, fen: &[String]) -> Result<()> {
        let fen = match fen {
            [] => FEN_STARTPOS.to_string(),
            [startpos] if startpos == "startpos" => FEN_STARTPOS.to_string(),
            fields => fields.join(" "),
        };

        let game = Game::from_fen(&fen).with_context(|| format!("Failed to set position {fen:?}"))?;
        self.board = Board::Chess(game);
        Ok(())
    }

    /// Executes the `move` command.
    ///
    /// Nothing changes if the move is rejected.
    fn make_move(&mut self, args: &[String]) -> Result<()> {
        match (&mut self.board, args) {
            (Board::Chess(game), [uci]) => {
                game.make_uci_move(uci)?;
            }

            (Board::TicTacToe(board), [row, col]) => {
                let row = row.parse().context("Row must be a number")?;
                let col = col.parse().context("Column must be a number")?;
                board.try_make_move(row, col)?;
            }

            (Board::Chess(_), _) => bail!("Chess moves are given in UCI notation, like `e2e4`"),
            (Board::TicTacToe(_), _) => bail!("Tic-tac-toe moves are given as `<row> <col>`"),
        }

        Ok(())
    }

    /// Lists legal moves, or the destinations of the piece on `square`.
    fn moves(&self, square: Option<Square>) -> Result<String> {
        let moves: Vec<String> = match (&self.board, square) {
            (Board::Chess(game), Some(square)) => game
                .destinations_from(square)
                .into_iter()
                .map(|sq| sq.to_string())
                .collect(),

            (Board::Chess(game), None) => {
                game.legal_moves().into_iter().map(|mv| mv.to_string()).collect()
            }

            (Board::TicTacToe(board), None) => board
                .moves()
                .into_iter()
                .map(|cell| format!("({cell})"))
                .collect(),

            (Board::TicTacToe(_), Some(_)) => bail!("Tic-tac-toe cells have no pieces to move"),
        };

        // If there are none, print "(none)"
        if moves.is_empty() {
            Ok(String::from("(none)"))
        } else {
            Ok(moves.join(", "))
        }
    }

    /// Executes the `go` command, searching the current position and printing the result.
    fn go(&mut self, depth: Option<u8>, movetime: Option<u64>) -> Result<()> {
        let mut config = SearchConfig::default();
        if let Some(ms) = movetime {
            config.timeout = Duration::from_millis(ms);
        }

        match &mut self.board {
            Board::Chess(game) => {
                config.max_depth = depth.unwrap_or(DEFAULT_CHESS_DEPTH);
                report(Search::new(game, config).start());
            }

            Board::TicTacToe(board) => {
                config.max_depth = depth.unwrap_or(DEFAULT_TICTACTOE_DEPTH);
                report(Search::new(board, config).start());
            }
        }

        Ok(())
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// Prints the outcome of a search.
fn report<M: fmt::Display>(res: SearchResult<M>) {
    if res.timed_out {
        warn!("Search ran out of time; the result may be weaker than requested");
    }

    match res.bestmove {
        Some(mv) => println!(
            "bestmove {mv} score {} depth {} nodes {}",
            res.score, res.depth, res.nodes
        ),
        None => println!("bestmove (none) score {}", res.score),
    }
}

/// Loops endlessly to await input via `stdin`, sending all successfully-parsed commands through the supplied `sender`.
fn input_handler(sender: Sender<EngineCommand>) -> Result<()> {
    let mut buffer = String::with_capacity(256);

    loop {
        // Clear the buffer, read input, and trim the trailing newline
        buffer.clear();
        let bytes = io::stdin()
            .read_line(&mut buffer)
            .context("Failed to read line when parsing commands")?;

        // For ctrl + d
        if 0 == bytes {
            sender
                .send(EngineCommand::Exit)
                .context("Failed to send 'exit' command after receiving empty input")?;

            bail!("Engine received input of 0 bytes and is quitting");
        }

        let buf = buffer.trim();

        // Ignore empty lines
        if buf.is_empty() {
            continue;
        }

        match EngineCommand::try_parse_from(buf.split_ascii_whitespace()) {
            Ok(cmd) => sender
                .send(cmd)
                .context("Failed to send command to engine")?,

            // If an invalid command was received, just print the error and continue running
            Err(err) => eprintln!("{err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(engine: &mut Engine, line: &str) -> Result<()> {
        engine.execute(line.parse()?)
    }

    #[test]
    fn test_commands_change_board() {
        let mut engine = Engine::new();
        run(&mut engine, "move e2e4").unwrap();
        let Board::Chess(game) = engine.board() else {
            panic!("expected chess");
        };
        assert_eq!(game.legal_moves().len(), 20);

        run(&mut engine, "ttt XX./OO./... x").unwrap();
        run(&mut engine, "move 0 2").unwrap();
        let Board::TicTacToe(board) = engine.board() else {
            panic!("expected tic-tac-toe");
        };
        assert!(board.status().is_over());

        run(&mut engine, "position startpos").unwrap();
        assert!(matches!(engine.board(), Board::Chess(_)));
    }

    #[test]
    fn test_rejected_commands_keep_board() {
        let mut engine = Engine::new();
        assert!(run(&mut engine, "move e2e5").is_err());
        assert!(run(&mut engine, "move 0 2").is_err());
        assert!(run(&mut engine, "position not/a/fen").is_err());
        assert!(run(&mut engine, "moves").is_ok());

        let Board::Chess(game) = engine.board() else {
            panic!("expected chess");
        };
        assert_eq!(game, &Game::default());

        run(&mut engine, "ttt").unwrap();
        assert!(run(&mut engine, "perft 1").is_err());
        assert!(run(&mut engine, "eval").is_err());
    }
}
