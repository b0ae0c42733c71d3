/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Move generation and minimax search with alpha-beta pruning for two games: tic-tac-toe and chess.
//!
//! Both games implement [`Searchable`], so a single [`Search`] picks moves for either.
//!
//! ```
//! # use arbiter::{best_move, TicTacToe};
//! let mut board: TicTacToe = "XX./OO./...".parse().unwrap();
//! let cell = best_move(&mut board, 9, 1_000).unwrap();
//! assert_eq!((cell.row(), cell.col()), (0, 2));
//! ```

/// Chess: board representation, move generation and game status.
mod board;

/// Parsing of the commands typed into the engine.
mod cli;

/// Code related to the engine's functionality, such as user input handling.
mod engine;

/// Errors for malformed positions and rejected moves.
mod error;

/// Evaluation of chess positions.
mod eval;

/// Lazy move ordering.
mod movepicker;

/// Piece-Square tables.
mod psqt;

/// Scores of positions, including mate scores.
mod score;

/// Main engine logic; all search related code.
mod search;

/// Tic-tac-toe.
mod tictactoe;

/// Transposition table.
mod ttable;

pub use board::*;
pub use cli::*;
pub use engine::*;
pub use error::*;
pub use eval::*;
pub use movepicker::*;
pub use psqt::*;
pub use score::*;
pub use search::*;
pub use tictactoe::*;
pub use ttable::*;
