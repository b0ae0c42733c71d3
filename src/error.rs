/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use thiserror::Error;

use crate::{Color, Square};

/// A position could not be constructed from its text form.
///
/// Construction aborts on the first problem, so a malformed position is never partially initialized.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    #[error("FEN {0:?} is missing its piece placement")]
    Empty(String),

    #[error("invalid piece placement {0:?}: {1}")]
    Placement(String, &'static str),

    #[error("invalid side to move {0:?}: expected `w` or `b`")]
    SideToMove(String),

    #[error("invalid castling rights {0:?}")]
    Castling(String),

    #[error("invalid en passant square {0:?}")]
    EnPassant(String),

    #[error("invalid {field} counter {value:?}")]
    Counter { field: &'static str, value: String },

    #[error("{} must have exactly one king, found {}", .0.name(), .1)]
    KingCount(Color, usize),

    #[error("{} is in check, but it is not {}'s turn", .0.name(), .0.name())]
    OpponentInCheck(Color),

    #[error("FEN has {0} fields, but at most 6 are allowed")]
    TooManyFields(usize),

    #[error("invalid tic-tac-toe board {0:?}: {1}")]
    TicTacToe(String, &'static str),
}

/// A move was rejected and nothing was changed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("coordinates ({0}, {1}) are off the board")]
    OutOfBounds(usize, usize),

    #[error("could not parse a move from {0:?}")]
    Unparseable(String),

    #[error("there is no piece on {0}")]
    NoPiece(Square),

    #[error("the piece on {square} belongs to {}, but it is {}'s turn", .owner.name(), .to_move.name())]
    WrongSide {
        square: Square,
        owner: Color,
        to_move: Color,
    },

    #[error("{0} is not a legal move")]
    Illegal(String),

    #[error("cell ({0}, {1}) is already occupied")]
    Occupied(usize, usize),

    #[error("the game is already over")]
    GameOver,
}
