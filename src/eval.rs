/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::{Color, File, PieceKind, Position, Psqt, Rank, Score, Square};

/// Bonus for every castling right a side still holds.
pub const CASTLING_RIGHT_BONUS: i32 = 30;

/// Bonus for every legal move a side has over its opponent.
pub const MOBILITY_WEIGHT: i32 = 2;

/// Penalty for being in check.
pub const CHECK_PENALTY: i32 = 50;

/// Encapsulates the logic of scoring a chess position.
///
/// Scores are absolute: a high score is good for White, and a low score is good for Black,
/// no matter whose turn it is.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    /// The position to evaluate.
    position: &'a Position,
}

impl<'a> Evaluator<'a> {
    #[inline(always)]
    pub const fn new(position: &'a Position) -> Self {
        Self { position }
    }

    /// Evaluate this position from White's perspective.
    ///
    /// A score of 0 is considered equal.
    ///
    /// # Example
    /// ```
    /// # use arbiter::{Evaluator, Position, Score};
    /// // The starting position is symmetrical
    /// assert_eq!(Evaluator::new(&Position::default()).eval(), Score::DRAW);
    /// ```
    #[inline(always)]
    pub fn eval(&self) -> Score {
        Score::new(self.material_and_placement() + self.castling() + self.mobility() + self.check())
    }

    /// Material plus piece-square bonuses of every piece on the board.
    fn material_and_placement(&self) -> i32 {
        self.position
            .pieces()
            .map(|(square, piece)| {
                let material = match piece.kind() {
                    // Both sides always have a King, so it would cancel out anyway
                    PieceKind::King => 0,
                    kind => value_of(kind),
                };
                (material + Psqt::eval(piece, square)) * piece.color().sign()
            })
            .sum()
    }

    fn castling(&self) -> i32 {
        let rights = self.position.castling_rights();
        (rights.count(Color::White) - rights.count(Color::Black)) * CASTLING_RIGHT_BONUS
    }

    /// Difference in the number of legal moves each side would have if it were their turn.
    fn mobility(&self) -> i32 {
        let white = self.position.legal_moves_for(Color::White).len() as i32;
        let black = self.position.legal_moves_for(Color::Black).len() as i32;
        (white - black) * MOBILITY_WEIGHT
    }

    fn check(&self) -> i32 {
        let mut score = 0;
        if self.position.is_in_check(Color::White) {
            score -= CHECK_PENALTY;
        }
        if self.position.is_in_check(Color::Black) {
            score += CHECK_PENALTY;
        }
        score
    }

    /// Fetches the value for the piece on the specified square, if one exists.
    ///
    /// Only used when printing the evaluator
    #[inline(always)]
    fn value_at(&self, square: Square) -> Option<i32> {
        self.position.piece_at(square).map(|piece| {
            let material = if piece.kind() == PieceKind::King {
                0
            } else {
                value_of(piece.kind())
            };
            (material + Psqt::eval(piece, square)) * piece.color().sign()
        })
    }
}

impl fmt::Display for Evaluator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  +")?;
        for _ in File::iter() {
            write!(f, "-----+")?;
        }
        writeln!(f)?;
        for rank in Rank::iter().rev() {
            write!(f, "{rank} |")?;

            // Step 1: Write the piece char
            for file in File::iter() {
                let piece = self.position.piece_at(Square::new(file, rank));
                let piece_char = piece.map(|p| p.char()).unwrap_or(' ');
                write!(f, "  {piece_char}  |")?;
            }
            writeln!(f)?;
            write!(f, "  |")?;

            // Step 2: Write the contribution of that piece
            for file in File::iter() {
                let score = match self.value_at(Square::new(file, rank)) {
                    Some(val) if val > 0 => format!("{:^5}", format!("+{val}")),
                    Some(val) => format!("{val:^5}"),
                    None => String::from("     "),
                };
                write!(f, "{score}|")?;
            }
            writeln!(f)?;

            write!(f, "  +")?;
            for _ in File::iter() {
                write!(f, "-----+")?;
            }
            writeln!(f)?;
        }
        for file in File::iter() {
            write!(f, "     {file}")?;
        }

        let score = self.eval();
        let winning_side = if score > Score::DRAW {
            Some(Color::White)
        } else if score < Score::DRAW {
            Some(Color::Black)
        } else {
            None
        };

        writeln!(f, "\n\nMaterial and placement: {}", self.material_and_placement())?;
        writeln!(f, "Castling rights: {}", self.castling())?;
        writeln!(f, "Mobility: {}", self.mobility())?;
        writeln!(f, "Check: {}", self.check())?;
        writeln!(
            f,
            "Winning side: {}",
            winning_side.map(|c| c.name()).unwrap_or("N/A")
        )?;
        write!(f, "Score: {score}")
    }
}

/// Returns a value of the provided `PieceKind`.
///
/// Values are obtained from here: <https://www.chessprogramming.org/Simplified_Evaluation_Function>
/// The King's value is a sentinel larger than all other material combined; it is never summed.
#[inline(always)]
pub const fn value_of(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 320,
        PieceKind::Bishop => 330,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 20_000,
    }
}
