/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::MAX_DEPTH;

/// The evaluation of a position, in centipawns for chess.
///
/// Scores are absolute: positive favors the maximizing side (White, or `X`), negative favors the other.
/// A won game scores [`Score::MATE`] minus the number of plies it took to win, so quicker wins score higher.
#[derive(Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Score(pub(crate) i32);

impl Score {
    /// Larger than any score a search can produce.
    pub const INF: Self = Self(30_000);

    /// Score of a win on the current ply.
    pub const MATE: Self = Self(20_000);

    pub const DRAW: Self = Self(0);

    /// Lowest possible score for a win, found [`MAX_DEPTH`] plies away.
    pub const LOWEST_MATE: Self = Self(Self::MATE.0 - MAX_DEPTH as i32);

    #[inline(always)]
    pub const fn new(score: i32) -> Self {
        Self(score)
    }

    #[inline(always)]
    pub const fn inner(&self) -> i32 {
        self.0
    }

    /// Score of a win for the maximizing side found `ply` plies from the root.
    ///
    /// # Example
    /// ```
    /// # use arbiter::Score;
    /// assert!(Score::win_in(1) > Score::win_in(3));
    /// assert!(Score::loss_in(1) < Score::loss_in(3));
    /// assert_eq!(Score::win_in(2).plies_to_mate(), 2);
    /// ```
    #[inline(always)]
    pub const fn win_in(ply: i32) -> Self {
        Self(Self::MATE.0 - ply)
    }

    /// Score of a win for the minimizing side found `ply` plies from the root.
    #[inline(always)]
    pub const fn loss_in(ply: i32) -> Self {
        Self(-Self::MATE.0 + ply)
    }

    /// Returns `true` if this score means one side has a forced win.
    #[inline(always)]
    pub const fn is_mate(&self) -> bool {
        self.0.abs() >= Self::LOWEST_MATE.0
    }

    /// Number of plies until the game is won, for a mate score.
    #[inline(always)]
    pub const fn plies_to_mate(&self) -> i32 {
        Self::MATE.0 - self.0.abs()
    }

    /// Converts a mate score found `ply` plies from the root into one counted from the current node,
    /// so it stays correct when the same position is reached at a different ply.
    #[inline(always)]
    pub const fn to_node(self, ply: i32) -> Self {
        if !self.is_mate() {
            self
        } else if self.0 > 0 {
            Self(self.0 + ply)
        } else {
            Self(self.0 - ply)
        }
    }

    /// Inverse of [`Score::to_node`].
    #[inline(always)]
    pub const fn to_root(self, ply: i32) -> Self {
        if !self.is_mate() {
            self
        } else if self.0 > 0 {
            Self(self.0 - ply)
        } else {
            Self(self.0 + ply)
        }
    }
}

macro_rules! impl_binary_op {
    ($trait:tt, $fn:ident) => {
        impl std::ops::$trait for Score {
            type Output = Self;

            #[inline(always)]
            fn $fn(self, rhs: Self) -> Self::Output {
                Self(self.0.$fn(rhs.0))
            }
        }

        impl std::ops::$trait<i32> for Score {
            type Output = Self;

            #[inline(always)]
            fn $fn(self, rhs: i32) -> Self::Output {
                Self(self.0.$fn(rhs))
            }
        }
    };
}

impl_binary_op!(Add, add);
impl_binary_op!(Sub, sub);

impl std::ops::AddAssign<i32> for Score {
    #[inline(always)]
    fn add_assign(&mut self, rhs: i32) {
        self.0 += rhs;
    }
}

impl std::ops::Neg for Score {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl fmt::Display for Score {
    /// Mate scores print as `mate N` (negative when the minimizing side wins), everything else in centipawns.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_mate() {
            let plies = self.plies_to_mate();
            if self.0 > 0 {
                write!(f, "mate {plies}")
            } else {
                write!(f, "mate -{plies}")
            }
        } else {
            write!(f, "cp {}", self.0)
        }
    }
}

impl fmt::Debug for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({self})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_root_conversion() {
        let win = Score::win_in(5);
        let stored = win.to_node(2);
        assert_eq!(stored, Score::win_in(3));
        assert_eq!(stored.to_root(2), win);

        let loss = Score::loss_in(5);
        let stored = loss.to_node(2);
        assert_eq!(stored, Score::loss_in(3));
        assert_eq!(stored.to_root(2), loss);

        let plain = Score::new(150);
        assert_eq!(plain.to_node(4), plain);
    }

    #[test]
    fn test_display() {
        assert_eq!(Score::new(-35).to_string(), "cp -35");
        assert_eq!(Score::win_in(3).to_string(), "mate 3");
        assert_eq!(Score::loss_in(2).to_string(), "mate -2");
        assert!(!Score::new(9_000).is_mate());
    }
}
