/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{
    Color, File, Move, MoveError, MoveKind, MoveList, Piece, PieceKind, Position, Rank, Square,
};

/// `(file, rank)` steps a knight can take.
pub const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// `(file, rank)` steps a king can take.
pub const KING_DELTAS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// Directions a rook slides in.
pub const ROOK_DELTAS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Directions a bishop slides in.
pub const BISHOP_DELTAS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

impl Position {
    /// Returns `true` if any piece of color `by` attacks `square`.
    ///
    /// Looks outwards from `square` with each piece's movement rule, which finds the same attackers as generating every enemy move would.
    pub fn is_attacked(&self, square: Square, by: Color) -> bool {
        let is = |target: Option<Square>, kind: PieceKind| {
            target.is_some_and(|target| self.piece_at(target) == Some(Piece::new(by, kind)))
        };

        // A pawn of `by` attacks diagonally forward, so look diagonally backwards from `square`
        let behind = -by.sign() as i8;
        if is(square.offset(-1, behind), PieceKind::Pawn)
            || is(square.offset(1, behind), PieceKind::Pawn)
        {
            return true;
        }

        if KNIGHT_DELTAS
            .iter()
            .any(|&(df, dr)| is(square.offset(df, dr), PieceKind::Knight))
        {
            return true;
        }

        if KING_DELTAS
            .iter()
            .any(|&(df, dr)| is(square.offset(df, dr), PieceKind::King))
        {
            return true;
        }

        let slides = |deltas: &[(i8, i8)], kind: PieceKind| {
            deltas.iter().any(|&(df, dr)| {
                match self.first_blocker(square, df, dr) {
                    Some(piece) => piece == Piece::new(by, kind) || piece == Piece::new(by, PieceKind::Queen),
                    None => false,
                }
            })
        };

        slides(&ROOK_DELTAS, PieceKind::Rook) || slides(&BISHOP_DELTAS, PieceKind::Bishop)
    }

    /// The first piece met when walking from `square` (exclusive) in direction `(df, dr)`.
    #[inline(always)]
    fn first_blocker(&self, square: Square, df: i8, dr: i8) -> Option<Piece> {
        let mut current = square.offset(df, dr);
        while let Some(target) = current {
            if let Some(piece) = self.piece_at(target) {
                return Some(piece);
            }
            current = target.offset(df, dr);
        }
        None
    }

    /// Returns `true` if `color`'s king is attacked.
    ///
    /// A side without a king is never in check.
    #[inline(always)]
    pub fn is_in_check(&self, color: Color) -> bool {
        self.king_square(color)
            .is_some_and(|king| self.is_attacked(king, color.opponent()))
    }

    /// Generates every move for the side to move that follows the piece rules, ignoring king safety.
    pub fn pseudo_legal_moves(&self, moves: &mut MoveList) {
        let color = self.side_to_move();
        for (square, piece) in self.pieces() {
            if piece.color() == color {
                self.pseudo_legal_moves_from(square, piece, moves);
            }
        }
    }

    /// Generates the pseudo-legal moves of `piece`, which stands on `from`.
    fn pseudo_legal_moves_from(&self, from: Square, piece: Piece, moves: &mut MoveList) {
        match piece.kind() {
            PieceKind::Pawn => self.pawn_moves(from, piece.color(), moves),
            PieceKind::Knight => self.step_moves(from, piece.color(), &KNIGHT_DELTAS, moves),
            PieceKind::Bishop => self.slide_moves(from, piece.color(), &BISHOP_DELTAS, moves),
            PieceKind::Rook => self.slide_moves(from, piece.color(), &ROOK_DELTAS, moves),
            PieceKind::Queen => {
                self.slide_moves(from, piece.color(), &ROOK_DELTAS, moves);
                self.slide_moves(from, piece.color(), &BISHOP_DELTAS, moves);
            }
            PieceKind::King => {
                self.step_moves(from, piece.color(), &KING_DELTAS, moves);
                self.castling_moves(from, piece.color(), moves);
            }
        }
    }

    fn pawn_moves(&self, from: Square, color: Color, moves: &mut MoveList) {
        let forward = color.sign() as i8;
        let promotes = |to: Square| to.rank() == Rank::relative(color, 7);

        let push_promotions = |to: Square, capture: bool, moves: &mut MoveList| {
            for kind in PieceKind::PROMOTIONS {
                let kind = if capture {
                    MoveKind::CapturePromotion(kind)
                } else {
                    MoveKind::Promotion(kind)
                };
                moves.push(Move::new(from, to, kind));
            }
        };

        if let Some(to) = from.offset(0, forward) {
            if self.piece_at(to).is_none() {
                if promotes(to) {
                    push_promotions(to, false, moves);
                } else {
                    moves.push(Move::new(from, to, MoveKind::Quiet));

                    if from.rank() == Rank::relative(color, 1) {
                        if let Some(double) = to.offset(0, forward) {
                            if self.piece_at(double).is_none() {
                                moves.push(Move::new(from, double, MoveKind::DoublePush));
                            }
                        }
                    }
                }
            }
        }

        for df in [-1, 1] {
            let Some(to) = from.offset(df, forward) else {
                continue;
            };

            match self.piece_at(to) {
                Some(target) if target.color() != color => {
                    if promotes(to) {
                        push_promotions(to, true, moves);
                    } else {
                        moves.push(Move::new(from, to, MoveKind::Capture));
                    }
                }
                None if self.ep_square() == Some(to) => {
                    moves.push(Move::new(from, to, MoveKind::EnPassant));
                }
                _ => {}
            }
        }
    }

    /// Moves for pieces that jump a fixed distance (knights and kings).
    fn step_moves(&self, from: Square, color: Color, deltas: &[(i8, i8)], moves: &mut MoveList) {
        for &(df, dr) in deltas {
            let Some(to) = from.offset(df, dr) else {
                continue;
            };

            match self.piece_at(to) {
                None => moves.push(Move::new(from, to, MoveKind::Quiet)),
                Some(target) if target.color() != color => {
                    moves.push(Move::new(from, to, MoveKind::Capture))
                }
                Some(_) => {}
            }
        }
    }

    /// Moves for pieces that slide along rays until blocked.
    fn slide_moves(&self, from: Square, color: Color, deltas: &[(i8, i8)], moves: &mut MoveList) {
        for &(df, dr) in deltas {
            let mut current = from.offset(df, dr);
            while let Some(to) = current {
                match self.piece_at(to) {
                    None => moves.push(Move::new(from, to, MoveKind::Quiet)),
                    Some(target) => {
                        if target.color() != color {
                            moves.push(Move::new(from, to, MoveKind::Capture));
                        }
                        break;
                    }
                }
                current = to.offset(df, dr);
            }
        }
    }

    /// Castling moves for a king on `from`.
    ///
    /// The king may not castle out of, through, or into check, and every square between king and rook must be empty.
    fn castling_moves(&self, from: Square, color: Color, moves: &mut MoveList) {
        let rank = Rank::relative(color, 0);
        if from != Square::new(File::E, rank) {
            return;
        }

        let rook = Some(Piece::new(color, PieceKind::Rook));
        let enemy = color.opponent();

        // (short, rook file, files that must be empty, files the king crosses, king destination)
        let sides: [(bool, File, &[File], [File; 2], File); 2] = [
            (true, File::H, &[File::F, File::G], [File::F, File::G], File::G),
            (
                false,
                File::A,
                &[File::B, File::C, File::D],
                [File::D, File::C],
                File::C,
            ),
        ];

        for (short, rook_file, between, crossed, king_to) in sides {
            if !self.castling_rights().has(color, short)
                || self.piece_at(Square::new(rook_file, rank)) != rook
                || between
                    .iter()
                    .any(|&file| self.piece_at(Square::new(file, rank)).is_some())
            {
                continue;
            }

            if self.is_attacked(from, enemy)
                || crossed
                    .iter()
                    .any(|&file| self.is_attacked(Square::new(file, rank), enemy))
            {
                continue;
            }

            moves.push(Move::new(from, Square::new(king_to, rank), MoveKind::Castle));
        }
    }

    /// Generates every legal move for the side to move.
    ///
    /// Each pseudo-legal move is applied to a scratch copy and kept only if the mover's king is safe afterwards.
    ///
    /// # Example
    /// ```
    /// # use arbiter::Position;
    /// assert_eq!(Position::default().legal_moves().len(), 20);
    /// ```
    pub fn legal_moves(&self) -> MoveList {
        let mut pseudo = MoveList::new();
        self.pseudo_legal_moves(&mut pseudo);

        let color = self.side_to_move();
        let mut scratch = *self;
        pseudo.retain(|mv| {
            let undo = scratch.apply(*mv);
            let safe = !scratch.is_in_check(color);
            scratch.undo(*mv, undo);
            safe
        });

        pseudo
    }

    /// Generates every legal move `color` would have if it were their turn.
    pub fn legal_moves_for(&self, color: Color) -> MoveList {
        if color == self.side_to_move() {
            self.legal_moves()
        } else {
            let mut flipped = *self;
            flipped.set_side_to_move(color);
            flipped.legal_moves()
        }
    }

    /// Returns `true` if playing `mv` puts the opponent in check.
    pub fn gives_check(&self, mv: Move) -> bool {
        let mut scratch = *self;
        scratch.apply(mv);
        scratch.is_in_check(scratch.side_to_move())
    }

    /// Finds the legal move from `from` to `to`.
    ///
    /// When the move is a promotion and `promotion` is [`None`], the Queen is chosen.
    pub fn find_legal_move(
        &self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<Move, MoveError> {
        let piece = self.piece_at(from).ok_or(MoveError::NoPiece(from))?;
        if piece.color() != self.side_to_move() {
            return Err(MoveError::WrongSide {
                square: from,
                owner: piece.color(),
                to_move: self.side_to_move(),
            });
        }

        let wanted = promotion.unwrap_or(PieceKind::Queen);
        self.legal_moves()
            .into_iter()
            .find(|mv| {
                mv.from() == from
                    && mv.to() == to
                    && mv.promotion().map_or(promotion.is_none(), |kind| kind == wanted)
            })
            .ok_or_else(|| {
                let text = match promotion {
                    Some(kind) => format!("{from}{to}{kind}"),
                    None => format!("{from}{to}"),
                };
                MoveError::Illegal(text)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FEN_KIWIPETE, FEN_STARTPOS};

    fn legal(fen: &str) -> Vec<String> {
        let position = Position::from_fen(fen).unwrap();
        let mut moves = position
            .legal_moves()
            .into_iter()
            .map(|mv| mv.to_string())
            .collect::<Vec<_>>();
        moves.sort();
        moves
    }

    #[test]
    fn test_startpos_moves() {
        let moves = legal(FEN_STARTPOS);
        assert_eq!(moves.len(), 20);
        assert!(moves.contains(&String::from("e2e4")));
        assert!(moves.contains(&String::from("g1f3")));
        assert!(!moves.contains(&String::from("e1e2")));
    }

    #[test]
    fn test_kiwipete_move_count() {
        assert_eq!(legal(FEN_KIWIPETE).len(), 48);
    }

    #[test]
    fn test_pinned_piece_cannot_move() {
        // The e2 knight is pinned by the e8 rook
        let moves = legal("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1");
        assert!(moves.iter().all(|mv| !mv.starts_with("e2")), "{moves:?}");
    }

    #[test]
    fn test_must_escape_check() {
        // The only legal replies to the rook check are king moves off the e-file
        let moves = legal("4r1k1/8/8/8/8/8/8/4K3 w - - 0 1");
        assert_eq!(moves, ["e1d1", "e1d2", "e1f1", "e1f2"]);
    }

    #[test]
    fn test_no_castling_through_check() {
        // The f-file is covered by the black rook, so only the long castle is possible
        let moves = legal("5rk1/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert!(moves.contains(&String::from("e1c1")));
        assert!(!moves.contains(&String::from("e1g1")));
    }

    #[test]
    fn test_no_castling_without_rook() {
        let moves = legal("4k3/8/8/8/8/8/8/4K2R w KQ - 0 1");
        assert!(moves.contains(&String::from("e1g1")));
        assert!(!moves.contains(&String::from("e1c1")));
    }

    #[test]
    fn test_promotions_generated() {
        let moves = legal("1n5k/P7/8/8/8/8/8/K7 w - - 0 1");
        for expected in ["a7a8q", "a7a8r", "a7a8b", "a7a8n", "a7b8q", "a7b8n"] {
            assert!(moves.contains(&String::from(expected)), "missing {expected}");
        }
    }

    #[test]
    fn test_find_legal_move_errors() {
        let position = Position::default();
        assert_eq!(
            position.find_legal_move(Square::E3, Square::E4, None),
            Err(MoveError::NoPiece(Square::E3))
        );
        assert!(matches!(
            position.find_legal_move(Square::E7, Square::E5, None),
            Err(MoveError::WrongSide { .. })
        ));
        assert!(matches!(
            position.find_legal_move(Square::E2, Square::E5, None),
            Err(MoveError::Illegal(_))
        ));
        assert!(position.find_legal_move(Square::E2, Square::E4, None).is_ok());
    }

    #[test]
    fn test_is_attacked() {
        let position = Position::default();
        assert!(position.is_attacked(Square::F3, Color::White));
        assert!(position.is_attacked(Square::E6, Color::Black));
        assert!(!position.is_attacked(Square::E4, Color::White));
        assert!(!position.is_in_check(Color::White));
    }

    #[test]
    fn test_gives_check() {
        let position: Position = "4k3/8/8/8/8/8/8/R3K3 w - - 0 1".parse().unwrap();
        let check = position.find_legal_move(Square::A1, Square::A8, None).unwrap();
        let quiet = position.find_legal_move(Square::A1, Square::A2, None).unwrap();
        assert!(position.gives_check(check));
        assert!(!position.gives_check(quiet));
    }
}
