/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use arrayvec::ArrayVec;

use crate::{MoveError, PieceKind, Position, Square};

/// Maximum possible number of moves in a given chess position.
///
/// Found from <https://www.chessprogramming.org/Chess_Position#cite_note-4>
pub const MAX_NUM_MOVES: usize = 218;

/// A list of moves that never allocates.
pub type MoveList = ArrayVec<Move, MAX_NUM_MOVES>;

/// What a [`Move`] does beyond relocating a piece.
///
/// Generated moves always carry the correct kind, so applying a move never has to re-derive it from the board.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum MoveKind {
    #[default]
    Quiet,

    /// A pawn advancing two squares from its starting rank, creating an en passant target.
    DoublePush,

    /// The king moving two files towards a rook, which jumps over it.
    Castle,

    Capture,

    /// A pawn capturing a pawn that just double-pushed past it.
    EnPassant,

    Promotion(PieceKind),

    CapturePromotion(PieceKind),
}

/// A chess move: a piece travels from one square to another.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Move {
    from: Square,
    to: Square,
    kind: MoveKind,
}

impl Move {
    /// Creates a new [`Move`] from its parts.
    ///
    /// # Example
    /// ```
    /// # use arbiter::{Move, MoveKind, Square};
    /// let e2e4 = Move::new(Square::E2, Square::E4, MoveKind::DoublePush);
    /// assert_eq!(e2e4.to_string(), "e2e4");
    /// ```
    #[inline(always)]
    pub const fn new(from: Square, to: Square, kind: MoveKind) -> Self {
        Self { from, to, kind }
    }

    #[inline(always)]
    pub const fn from(&self) -> Square {
        self.from
    }

    #[inline(always)]
    pub const fn to(&self) -> Square {
        self.to
    }

    #[inline(always)]
    pub const fn kind(&self) -> MoveKind {
        self.kind
    }

    /// The piece this move promotes to, if any.
    #[inline(always)]
    pub const fn promotion(&self) -> Option<PieceKind> {
        match self.kind {
            MoveKind::Promotion(kind) | MoveKind::CapturePromotion(kind) => Some(kind),
            _ => None,
        }
    }

    /// Returns `true` if this move removes an enemy piece, including en passant.
    #[inline(always)]
    pub const fn is_capture(&self) -> bool {
        matches!(
            self.kind,
            MoveKind::Capture | MoveKind::EnPassant | MoveKind::CapturePromotion(_)
        )
    }

    #[inline(always)]
    pub const fn is_castle(&self) -> bool {
        matches!(self.kind, MoveKind::Castle)
    }

    #[inline(always)]
    pub const fn is_en_passant(&self) -> bool {
        matches!(self.kind, MoveKind::EnPassant)
    }

    /// Returns `true` if this move neither captures nor promotes.
    #[inline(always)]
    pub const fn is_quiet(&self) -> bool {
        !self.is_capture() && self.promotion().is_none()
    }

    /// Parses a move in UCI notation (`e2e4`, `e7e8q`) and resolves it against the legal moves of `position`.
    ///
    /// A promotion without a piece letter promotes to a Queen.
    ///
    /// # Example
    /// ```
    /// # use arbiter::{Move, Position, Square};
    /// let position = Position::default();
    /// let mv = Move::from_uci(&position, "g1f3").unwrap();
    /// assert_eq!(mv.from(), Square::G1);
    /// assert!(Move::from_uci(&position, "e2e5").is_err());
    /// ```
    pub fn from_uci(position: &Position, uci: &str) -> Result<Self, MoveError> {
        let unparseable = || MoveError::Unparseable(uci.to_string());

        let from = uci.get(0..2).ok_or_else(unparseable)?;
        let to = uci.get(2..4).ok_or_else(unparseable)?;
        let promotion = match uci.get(4..) {
            None | Some("") => None,
            Some(c) if c.len() == 1 => {
                let kind = c
                    .chars()
                    .next()
                    .and_then(PieceKind::from_char)
                    .ok_or_else(unparseable)?;
                Some(kind)
            }
            Some(_) => return Err(unparseable()),
        };

        position.find_legal_move(Square::from_uci(from)?, Square::from_uci(to)?, promotion)
    }
}

impl fmt::Display for Move {
    /// Formats the move in UCI notation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion() {
            write!(f, "{kind}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self} ({:?})", self.kind)
    }
}

impl PartialEq<&str> for Move {
    #[inline(always)]
    fn eq(&self, other: &&str) -> bool {
        self.to_string() == *other
    }
}
