/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Index, IndexMut},
    str::FromStr,
};

use crate::{Color, MoveError};

/// A column of the chess board, `a` through `h`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct File(pub(crate) u8);

/// A row of the chess board, `1` through `8`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct Rank(pub(crate) u8);

macro_rules! impl_coordinate {
    ($t:ident, $first:literal, $($name:ident = $val:literal),+) => {
        impl $t {
            $(pub const $name: Self = Self($val);)+

            pub const MAX: u8 = 7;
            pub const COUNT: usize = 8;

            /// Returns an iterator over every value, lowest first.
            #[inline(always)]
            pub fn iter() -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator<Item = Self> {
                (0..=Self::MAX).map(Self)
            }

            /// Creates a new value from a number in `[0, 7]`.
            #[inline(always)]
            pub const fn new(bits: u8) -> Option<Self> {
                if bits <= Self::MAX {
                    Some(Self(bits))
                } else {
                    None
                }
            }

            /// Parses the single character used in algebraic notation.
            #[inline(always)]
            pub fn from_char(c: char) -> Option<Self> {
                let bits = (c as u32).checked_sub($first as u32)?;
                u8::try_from(bits).ok().and_then(Self::new)
            }

            /// Returns the single character used in algebraic notation.
            #[inline(always)]
            pub const fn char(&self) -> char {
                ($first as u8 + self.0) as char
            }

            #[inline(always)]
            pub const fn index(&self) -> usize {
                self.0 as usize
            }

            /// Moves by `delta`, returning [`None`] if that would leave the board.
            #[inline(always)]
            pub const fn offset(self, delta: i8) -> Option<Self> {
                match self.0.checked_add_signed(delta) {
                    Some(bits) if bits <= Self::MAX => Some(Self(bits)),
                    _ => None,
                }
            }

            #[inline(always)]
            pub const fn flipped(self) -> Self {
                Self(Self::MAX - self.0)
            }
        }

        impl fmt::Display for $t {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.char())
            }
        }

        impl fmt::Debug for $t {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.char())
            }
        }
    };
}

impl_coordinate!(File, 'a', A = 0, B = 1, C = 2, D = 3, E = 4, F = 5, G = 6, H = 7);
impl_coordinate!(
    Rank,
    '1',
    ONE = 0,
    TWO = 1,
    THREE = 2,
    FOUR = 3,
    FIVE = 4,
    SIX = 5,
    SEVEN = 6,
    EIGHT = 7
);

impl Rank {
    /// The rank `n` steps from `color`'s back rank, where `0` is the back rank itself.
    #[inline(always)]
    pub const fn relative(color: Color, n: u8) -> Self {
        match color {
            Color::White => Self(n),
            Color::Black => Self(Self::MAX - n),
        }
    }
}

/// A single square on an `8x8` chess board.
///
/// Squares are numbered with least-significant file mapping, so `square = file + rank * 8`:
/// ```text
/// 8| 56 57 58 59 60 61 62 63
/// 7| 48 49 50 51 52 53 54 55
/// 6| 40 41 42 43 44 45 46 47
/// 5| 32 33 34 35 36 37 38 39
/// 4| 24 25 26 27 28 29 30 31
/// 3| 16 17 18 19 20 21 22 23
/// 2|  8  9 10 11 12 13 14 15
/// 1|  0  1  2  3  4  5  6  7
///  +------------------------
///    a  b  c  d  e  f  g  h
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct Square(pub(crate) u8);

macro_rules! square_consts {
    ($($name:ident = $file:ident $rank:ident),+ $(,)?) => {
        impl Square {
            $(pub const $name: Self = Self::new(File::$file, Rank::$rank);)+
        }
    };
}

square_consts!(
    A1 = A ONE, B1 = B ONE, C1 = C ONE, D1 = D ONE, E1 = E ONE, F1 = F ONE, G1 = G ONE, H1 = H ONE,
    A2 = A TWO, D2 = D TWO, E2 = E TWO, H2 = H TWO,
    C3 = C THREE, E3 = E THREE, F3 = F THREE,
    D4 = D FOUR, E4 = E FOUR,
    C5 = C FIVE, D5 = D FIVE, E5 = E FIVE,
    E6 = E SIX,
    A7 = A SEVEN, E7 = E SEVEN, H7 = H SEVEN,
    A8 = A EIGHT, B8 = B EIGHT, C8 = C EIGHT, D8 = D EIGHT, E8 = E EIGHT, F8 = F EIGHT, G8 = G EIGHT, H8 = H EIGHT,
);

impl Square {
    pub const COUNT: usize = 64;

    /// Returns an iterator over all squares, from `a1` to `h8`.
    ///
    /// # Example
    /// ```
    /// # use arbiter::Square;
    /// let mut iter = Square::iter();
    /// assert_eq!(iter.len(), 64);
    /// assert_eq!(iter.next(), Some(Square::A1));
    /// assert_eq!(iter.last(), Some(Square::H8));
    /// ```
    #[inline(always)]
    pub fn iter() -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator<Item = Self> {
        (0..Self::COUNT as u8).map(Self)
    }

    /// Creates a new [`Square`] from the provided [`File`] and [`Rank`].
    #[inline(always)]
    pub const fn new(file: File, rank: Rank) -> Self {
        Self(file.0 | rank.0 << 3)
    }

    /// Creates a [`Square`] from raw coordinates, failing on anything off the board.
    ///
    /// # Example
    /// ```
    /// # use arbiter::Square;
    /// assert_eq!(Square::from_coords(4, 3), Some(Square::E4));
    /// assert_eq!(Square::from_coords(8, 0), None);
    /// ```
    #[inline(always)]
    pub const fn from_coords(file: u8, rank: u8) -> Option<Self> {
        match (File::new(file), Rank::new(rank)) {
            (Some(file), Some(rank)) => Some(Self::new(file, rank)),
            _ => None,
        }
    }

    #[inline(always)]
    pub const fn file(&self) -> File {
        File(self.0 & 0b111)
    }

    #[inline(always)]
    pub const fn rank(&self) -> Rank {
        Rank(self.0 >> 3)
    }

    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Mirrors this square vertically, so `a1` becomes `a8`.
    #[inline(always)]
    pub const fn flipped_rank(self) -> Self {
        Self(self.0 ^ 56)
    }

    /// Returns `true` if this is a light square (`h1` is light).
    #[inline(always)]
    pub const fn is_light(&self) -> bool {
        (self.0 & 0b111) % 2 != (self.0 >> 3) % 2
    }

    /// Moves this square by the provided file and rank deltas, if the result is on the board.
    ///
    /// # Example
    /// ```
    /// # use arbiter::Square;
    /// assert_eq!(Square::E2.offset(0, 2), Some(Square::E4));
    /// assert_eq!(Square::H2.offset(1, 0), None);
    /// ```
    #[inline(always)]
    pub const fn offset(&self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        match (self.file().offset(file_delta), self.rank().offset(rank_delta)) {
            (Some(file), Some(rank)) => Some(Self::new(file, rank)),
            _ => None,
        }
    }

    /// Parses a square from algebraic notation, such as `e4`.
    pub fn from_uci(square: &str) -> Result<Self, MoveError> {
        let mut chars = square.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(MoveError::Unparseable(square.to_string()));
        };

        match (File::from_char(file), Rank::from_char(rank)) {
            (Some(file), Some(rank)) => Ok(Self::new(file, rank)),
            _ => Err(MoveError::Unparseable(square.to_string())),
        }
    }
}

impl FromStr for Square {
    type Err = MoveError;
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_uci(s)
    }
}

impl<T> Index<Square> for [T; Square::COUNT] {
    type Output = T;
    #[inline(always)]
    fn index(&self, index: Square) -> &Self::Output {
        &self[index.index()]
    }
}

impl<T> IndexMut<Square> for [T; Square::COUNT] {
    #[inline(always)]
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self[index.index()]
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self} ({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_parts() {
        for square in Square::iter() {
            assert_eq!(Square::new(square.file(), square.rank()), square);
        }
        assert_eq!(Square::E4.file(), File::E);
        assert_eq!(Square::E4.rank(), Rank::FOUR);
        assert_eq!(Square::H8.index(), 63);
    }

    #[test]
    fn test_square_uci() {
        assert_eq!("e4".parse::<Square>(), Ok(Square::E4));
        assert_eq!(Square::A8.to_string(), "a8");
        assert!(Square::from_uci("i1").is_err());
        assert!(Square::from_uci("a9").is_err());
        assert!(Square::from_uci("a10").is_err());
        assert!(Square::from_uci("").is_err());
    }

    #[test]
    fn test_square_color() {
        assert!(!Square::A1.is_light());
        assert!(Square::H1.is_light());
        assert!(Square::A8.is_light());
        assert!(!Square::H8.is_light());
    }

    #[test]
    fn test_relative_rank() {
        assert_eq!(Rank::relative(Color::White, 1), Rank::TWO);
        assert_eq!(Rank::relative(Color::Black, 1), Rank::SEVEN);
        assert_eq!(Rank::relative(Color::Black, 0), Rank::EIGHT);
    }
}
