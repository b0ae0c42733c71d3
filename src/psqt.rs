/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::{Color, File, Piece, PieceKind, Rank, Square};

/// Tables are written as seen from White's side of the board: the first row is the eighth rank.
///
/// Values are from <https://www.chessprogramming.org/Simplified_Evaluation_Function>
#[rustfmt::skip]
const PAWN: Psqt = Psqt::new([
      0,   0,   0,   0,   0,   0,   0,   0,
     50,  50,  50,  50,  50,  50,  50,  50,
     10,  10,  20,  30,  30,  20,  10,  10,
      5,   5,  10,  25,  25,  10,   5,   5,
      0,   0,   0,  20,  20,   0,   0,   0,
      5,  -5, -10,   0,   0, -10,  -5,   5,
      5,  10,  10, -20, -20,  10,  10,   5,
      0,   0,   0,   0,   0,   0,   0,   0,
]);

#[rustfmt::skip]
const KNIGHT: Psqt = Psqt::new([
    -50, -40, -30, -30, -30, -30, -40, -50,
    -40, -20,   0,   0,   0,   0, -20, -40,
    -30,   0,  10,  15,  15,  10,   0, -30,
    -30,   5,  15,  20,  20,  15,   5, -30,
    -30,   0,  15,  20,  20,  15,   0, -30,
    -30,   5,  10,  15,  15,  10,   5, -30,
    -40, -20,   0,   5,   5,   0, -20, -40,
    -50, -40, -30, -30, -30, -30, -40, -50,
]);

#[rustfmt::skip]
const BISHOP: Psqt = Psqt::new([
    -20, -10, -10, -10, -10, -10, -10, -20,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -10,   0,   5,  10,  10,   5,   0, -10,
    -10,   5,   5,  10,  10,   5,   5, -10,
    -10,   0,  10,  10,  10,  10,   0, -10,
    -10,  10,  10,  10,  10,  10,  10, -10,
    -10,   5,   0,   0,   0,   0,   5, -10,
    -20, -10, -10, -10, -10, -10, -10, -20,
]);

#[rustfmt::skip]
const ROOK: Psqt = Psqt::new([
      0,   0,   0,   0,   0,   0,   0,   0,
      5,  10,  10,  10,  10,  10,  10,   5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
      0,   0,   0,   5,   5,   0,   0,   0,
]);

#[rustfmt::skip]
const QUEEN: Psqt = Psqt::new([
    -20, -10, -10,  -5,  -5, -10, -10, -20,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -10,   0,   5,   5,   5,   5,   0, -10,
     -5,   0,   5,   5,   5,   5,   0,  -5,
      0,   0,   5,   5,   5,   5,   0,  -5,
    -10,   5,   5,   5,   5,   5,   0, -10,
    -10,   0,   5,   0,   0,   0,   0, -10,
    -20, -10, -10,  -5,  -5, -10, -10, -20,
]);

#[rustfmt::skip]
const KING: Psqt = Psqt::new([
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -20, -30, -30, -40, -40, -30, -30, -20,
    -10, -20, -20, -20, -20, -20, -20, -10,
     20,  20,   0,   0,   0,   0,  20,  20,
     20,  30,  10,   0,   0,  10,  30,  20,
]);

/// A [Piece-Square Table](https://www.chessprogramming.org/Piece-Square_Tables), indexed by [`Square`] from White's side.
#[derive(Debug)]
pub struct Psqt([i32; Square::COUNT]);

impl Psqt {
    /// Positional value of `piece` on `square`, from the point of view of the piece's owner.
    ///
    /// Black's pieces read the table mirrored top to bottom.
    ///
    /// # Example
    /// ```
    /// # use arbiter::{Color, Piece, PieceKind, Psqt, Square};
    /// let white = Piece::new(Color::White, PieceKind::Knight);
    /// let black = Piece::new(Color::Black, PieceKind::Knight);
    /// assert_eq!(Psqt::eval(white, Square::C3), Psqt::eval(black, Square::C3.flipped_rank()));
    /// ```
    #[inline(always)]
    pub fn eval(piece: Piece, square: Square) -> i32 {
        let square = match piece.color() {
            Color::White => square,
            Color::Black => square.flipped_rank(),
        };
        Self::table_for(piece.kind()).get(square)
    }

    #[inline(always)]
    pub fn table_for(kind: PieceKind) -> &'static Self {
        match kind {
            PieceKind::Pawn => &PAWN,
            PieceKind::Knight => &KNIGHT,
            PieceKind::Bishop => &BISHOP,
            PieceKind::Rook => &ROOK,
            PieceKind::Queen => &QUEEN,
            PieceKind::King => &KING,
        }
    }

    /// Creates a table from values written with the eighth rank first.
    const fn new(psqt: [i32; Square::COUNT]) -> Self {
        let mut flipped = psqt;

        let mut i = 0;
        while i < psqt.len() {
            // Row `r` of the literal holds rank `8 - r`
            flipped[i] = psqt[i ^ 56];
            i += 1;
        }

        Self(flipped)
    }

    #[inline(always)]
    pub const fn get(&self, square: Square) -> i32 {
        self.0[square.index()]
    }
}

impl fmt::Display for Psqt {
    /// Prints the table the way it is written in the code, eighth rank first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            write!(f, "{rank}|")?;
            for file in File::iter() {
                write!(f, "{:4}", self.get(Square::new(file, rank)))?;
            }
            writeln!(f)?;
        }
        write!(f, " +")?;
        for _ in File::iter() {
            write!(f, "----")?;
        }
        write!(f, "\n  ")?;
        for file in File::iter() {
            write!(f, "   {file}")?;
        }
        Ok(())
    }
}
