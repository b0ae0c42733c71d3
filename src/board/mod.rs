/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// The [`Game`] type, which tracks history and game status on top of a [`Position`].
mod game;

/// Pseudo-legal and legal move generation, and attack queries.
mod movegen;

/// Moves and move lists.
mod moves;

/// Perft, for verifying move generation.
mod perft;

/// Colors, piece kinds and pieces.
mod piece;

/// The board itself, FEN handling and reversible move application.
mod position;

/// Squares, files and ranks.
mod square;

/// Zobrist hashing of positions.
mod zobrist;

pub use game::*;
pub use movegen::*;
pub use moves::*;
pub use perft::*;
pub use piece::*;
pub use position::*;
pub use square::*;
pub use zobrist::*;
