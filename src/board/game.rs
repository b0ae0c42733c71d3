/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use crate::{
    Color, Move, MoveError, MoveList, PieceKind, Position, PositionError, Square, Undo, ZobristKey,
};

/// Half-moves without a capture or pawn move after which the game is drawn.
pub const SEVENTY_FIVE_MOVE_LIMIT: u16 = 150;

/// Number of times a position must occur for the game to be drawn.
pub const FIVEFOLD: usize = 5;

/// Why a game ended in a draw, other than stalemate.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum DrawReason {
    InsufficientMaterial,
    SeventyFiveMoveRule,
    FivefoldRepetition,
}

/// Whether a chess game is still being played, and if not, how it ended.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum GameStatus {
    InProgress,

    /// The contained color has been checkmated.
    Checkmate(Color),

    Stalemate,

    Draw(DrawReason),
}

impl GameStatus {
    #[inline(always)]
    pub const fn is_over(&self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InProgress => write!(f, "in progress"),
            Self::Checkmate(color) => {
                write!(f, "checkmate: {} wins", color.opponent().name())
            }
            Self::Stalemate => write!(f, "draw by stalemate"),
            Self::Draw(DrawReason::InsufficientMaterial) => {
                write!(f, "draw by insufficient material")
            }
            Self::Draw(DrawReason::SeventyFiveMoveRule) => write!(f, "draw by the 75-move rule"),
            Self::Draw(DrawReason::FivefoldRepetition) => {
                write!(f, "draw by fivefold repetition")
            }
        }
    }
}

/// A game of chess: the current [`Position`] plus the keys of every position before it.
///
/// The history is what makes repetition detection possible. Otherwise, this is a thin layer over [`Position`]
/// whose mutating methods are the validated entry points for callers.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Game {
    position: Position,
    history: Vec<ZobristKey>,
}

impl Game {
    #[inline(always)]
    pub fn new(position: Position) -> Self {
        Self {
            position,
            history: Vec::with_capacity(256),
        }
    }

    /// Creates a new [`Game`] from the provided FEN string.
    ///
    /// # Example
    /// ```
    /// # use arbiter::{Game, FEN_STARTPOS};
    /// let game = Game::from_fen(FEN_STARTPOS).unwrap();
    /// assert_eq!(game.legal_moves().len(), 20);
    /// ```
    #[inline(always)]
    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        Ok(Self::new(Position::from_fen(fen)?))
    }

    #[inline(always)]
    pub fn to_fen(&self) -> String {
        self.position.to_fen()
    }

    #[inline(always)]
    pub const fn position(&self) -> &Position {
        &self.position
    }

    #[inline(always)]
    pub const fn side_to_move(&self) -> Color {
        self.position.side_to_move()
    }

    #[inline(always)]
    pub const fn key(&self) -> ZobristKey {
        self.position.key()
    }

    /// Returns `true` if the side to move is in check.
    #[inline(always)]
    pub fn is_in_check(&self) -> bool {
        self.position.is_in_check(self.side_to_move())
    }

    #[inline(always)]
    pub fn legal_moves(&self) -> MoveList {
        self.position.legal_moves()
    }

    /// All legal moves of the piece on `square`.
    ///
    /// Empty if the square is empty or holds a piece of the side not to move.
    pub fn legal_moves_from(&self, square: Square) -> MoveList {
        let mut moves = self.legal_moves();
        moves.retain(|mv| mv.from() == square);
        moves
    }

    /// Squares the piece on `square` may move to, each listed once.
    ///
    /// # Example
    /// ```
    /// # use arbiter::{Game, Square};
    /// let game = Game::default();
    /// assert_eq!(game.destinations_from(Square::E2), [Square::E3, Square::E4]);
    /// assert!(game.destinations_from(Square::E7).is_empty());
    /// ```
    pub fn destinations_from(&self, square: Square) -> Vec<Square> {
        let mut squares = Vec::new();
        for mv in self.legal_moves_from(square) {
            // Promotions produce one move per piece kind
            if !squares.contains(&mv.to()) {
                squares.push(mv.to());
            }
        }
        squares
    }

    /// Number of times the current position has occurred, including now.
    pub fn repetitions(&self) -> usize {
        let key = self.key();
        // Positions before the last capture or pawn move can never recur
        let window = self.position.halfmove() as usize;
        1 + self
            .history
            .iter()
            .rev()
            .take(window)
            .filter(|&&past| past == key)
            .count()
    }

    /// Determines the status of the game, given the legal moves of the side to move.
    ///
    /// Having the caller pass `moves` lets search reuse the list it already generated.
    pub fn status_with(&self, moves: &[Move]) -> GameStatus {
        if moves.is_empty() {
            return if self.is_in_check() {
                GameStatus::Checkmate(self.side_to_move())
            } else {
                GameStatus::Stalemate
            };
        }

        if self.position.is_insufficient_material() {
            GameStatus::Draw(DrawReason::InsufficientMaterial)
        } else if self.position.halfmove() >= SEVENTY_FIVE_MOVE_LIMIT {
            GameStatus::Draw(DrawReason::SeventyFiveMoveRule)
        } else if self.repetitions() >= FIVEFOLD {
            GameStatus::Draw(DrawReason::FivefoldRepetition)
        } else {
            GameStatus::InProgress
        }
    }

    /// Determines the status of the game.
    ///
    /// # Example
    /// ```
    /// # use arbiter::{DrawReason, Game, GameStatus};
    /// let bare_kings = Game::from_fen("8/4k3/8/8/3K4/8/8/8 w - - 0 1").unwrap();
    /// assert_eq!(bare_kings.status(), GameStatus::Draw(DrawReason::InsufficientMaterial));
    /// ```
    #[inline(always)]
    pub fn status(&self) -> GameStatus {
        self.status_with(&self.legal_moves())
    }

    /// Applies `mv` without checking legality, recording the previous position for repetition detection.
    #[inline(always)]
    pub fn apply(&mut self, mv: Move) -> Undo {
        self.history.push(self.position.key());
        self.position.apply(mv)
    }

    /// Takes back `mv`, which must be the last move applied with [`Game::apply`].
    #[inline(always)]
    pub fn undo(&mut self, mv: Move, undo: Undo) {
        self.position.undo(mv, undo);
        self.history.pop();
    }

    /// Plays the legal move from `from` to `to`, leaving the game untouched if there is none.
    ///
    /// A promotion without a requested piece promotes to a Queen.
    pub fn try_make_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<Move, MoveError> {
        if self.status().is_over() {
            return Err(MoveError::GameOver);
        }

        let mv = self.position.find_legal_move(from, to, promotion)?;
        self.apply(mv);
        Ok(mv)
    }

    /// Plays the legal move from `from` to `to`, returning whether it was played.
    ///
    /// # Example
    /// ```
    /// # use arbiter::{Game, Square};
    /// let mut game = Game::default();
    /// assert!(!game.make_move(Square::E2, Square::E5, None));
    /// assert!(game.make_move(Square::E2, Square::E4, None));
    /// assert!(!game.make_move(Square::D2, Square::D4, None));
    /// ```
    #[inline(always)]
    pub fn make_move(&mut self, from: Square, to: Square, promotion: Option<PieceKind>) -> bool {
        self.try_make_move(from, to, promotion).is_ok()
    }

    /// Plays a move given in UCI notation, such as `e2e4` or `e7e8n`.
    pub fn make_uci_move(&mut self, uci: &str) -> Result<Move, MoveError> {
        if self.status().is_over() {
            return Err(MoveError::GameOver);
        }

        let mv = Move::from_uci(&self.position, uci)?;
        self.apply(mv);
        Ok(mv)
    }
}

impl FromStr for Game {
    type Err = PositionError;
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.position)
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Game({})", self.position)
    }
}
