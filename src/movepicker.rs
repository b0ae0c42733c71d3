/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use arrayvec::ArrayVec;

use crate::{value_of, Move, PieceKind, Position, MAX_NUM_MOVES};

/// Bonus for promotions, which are looked at before anything else.
pub const PROMOTION_BONUS: i32 = 2_000;

/// Bonus for captures, on top of the victim's value.
pub const CAPTURE_BONUS: i32 = 1_000;

/// Bonus for moves that give check.
pub const CHECK_BONUS: i32 = 500;

/// Lazily yields moves from highest to lowest score.
///
/// Rather than sorting the whole list up front, each call to [`Iterator::next`] selects the best of the remaining moves.
/// When a cutoff happens early, the rest of the list is never sorted.
/// Moves with equal scores are yielded in the order they were generated.
pub struct MovePicker<M> {
    moves: ArrayVec<M, MAX_NUM_MOVES>,
    scores: ArrayVec<i32, MAX_NUM_MOVES>,
    current: usize,
}

impl<M: Copy> MovePicker<M> {
    /// Scores every move with `score_fn`. Higher scores are yielded first.
    ///
    /// # Example
    /// ```
    /// # use arbiter::MovePicker;
    /// # use arrayvec::ArrayVec;
    /// let moves: ArrayVec<char, 218> = ['c', 'b', 'a', 'd'].into_iter().collect();
    /// let picker = MovePicker::new(moves, |c| *c as i32 % 4);
    /// assert_eq!(picker.collect::<String>(), "cbad");
    /// ```
    pub fn new(moves: ArrayVec<M, MAX_NUM_MOVES>, score_fn: impl Fn(&M) -> i32) -> Self {
        let scores = moves.iter().map(score_fn).collect();

        Self {
            moves,
            scores,
            current: 0,
        }
    }

    /// Yields moves in the order they were given.
    #[inline(always)]
    pub fn unordered(moves: ArrayVec<M, MAX_NUM_MOVES>) -> Self {
        Self::new(moves, |_| 0)
    }
}

impl<M: Copy> Iterator for MovePicker<M> {
    type Item = M;

    fn next(&mut self) -> Option<Self::Item> {
        // No more moves left
        if self.current >= self.moves.len() {
            return None;
        }

        // Find the index of the next highest score; ties keep generation order
        let mut best_index = self.current;
        for i in (self.current + 1)..self.moves.len() {
            if self.scores[i] > self.scores[best_index] {
                best_index = i;
            }
        }

        // Shift rather than swap, so that the remaining moves keep their relative order
        if best_index != self.current {
            self.moves[self.current..=best_index].rotate_right(1);
            self.scores[self.current..=best_index].rotate_right(1);
        }

        let mv = self.moves[self.current];
        self.current += 1;

        Some(mv)
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.moves.len() - self.current;
        (remaining, Some(remaining))
    }
}

/// Ordering score of a chess move: promotions first, then captures by victim value, then checks.
///
/// Everything else scores 0 and keeps its generation order.
///
/// # Example
/// ```
/// # use arbiter::{order_score, Move, Position};
/// let position = Position::from_fen("4k3/8/8/8/8/8/5q2/4K1R1 w - - 0 1").unwrap();
/// let capture = Move::from_uci(&position, "e1f2").unwrap();
/// let quiet = Move::from_uci(&position, "e1d1").unwrap();
/// assert!(order_score(&position, &capture) > order_score(&position, &quiet));
/// ```
pub fn order_score(position: &Position, mv: &Move) -> i32 {
    let mut score = 0;

    if let Some(promotion) = mv.promotion() {
        score += PROMOTION_BONUS + value_of(promotion);
    }

    if mv.is_capture() {
        // En passant captures land on an empty square, but always take a Pawn
        let victim = position
            .piece_at(mv.to())
            .map(|piece| value_of(piece.kind()))
            .unwrap_or(value_of(PieceKind::Pawn));
        score += CAPTURE_BONUS + victim;
    }

    if position.gives_check(*mv) {
        score += CHECK_BONUS;
    }

    score
}
