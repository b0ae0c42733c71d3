/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use crate::{
    Color, File, Move, MoveKind, Piece, PieceKind, PositionError, Rank, Square, ZobristKey,
};

/// FEN string for the starting position of standard chess.
pub const FEN_STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// A well-known position for testing castling, en passant and pins.
///
/// See <https://www.chessprogramming.org/Perft_Results#Position_2>
pub const FEN_KIWIPETE: &str =
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

/// Which castling moves each side may still make.
///
/// Stored as four flags, so every combination has an index in `[0, 16)`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
pub struct CastlingRights(u8);

impl CastlingRights {
    /// Number of possible combinations of rights.
    pub const COUNT: usize = 16;

    /// Every right held, as in the starting position.
    pub const ALL: Self = Self(0b1111);

    /// Bit for `color` castling on the king side (`short`) or queen side.
    #[inline(always)]
    const fn flag(color: Color, short: bool) -> u8 {
        let bit = if short { 0 } else { 1 };
        1 << (color.index() * 2 + bit)
    }

    #[inline(always)]
    pub const fn has(&self, color: Color, short: bool) -> bool {
        self.0 & Self::flag(color, short) != 0
    }

    #[inline(always)]
    pub fn set(&mut self, color: Color, short: bool) {
        self.0 |= Self::flag(color, short);
    }

    #[inline(always)]
    pub fn remove(&mut self, color: Color, short: bool) {
        self.0 &= !Self::flag(color, short);
    }

    /// Removes every right that relies on a king or rook standing on `square`.
    #[inline(always)]
    fn remove_for_square(&mut self, square: Square) {
        for color in Color::all() {
            let rank = Rank::relative(color, 0);
            if square == Square::new(File::E, rank) {
                self.remove(color, true);
                self.remove(color, false);
            } else if square == Square::new(File::H, rank) {
                self.remove(color, true);
            } else if square == Square::new(File::A, rank) {
                self.remove(color, false);
            }
        }
    }

    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Number of rights `color` still holds, `0` to `2`.
    #[inline(always)]
    pub const fn count(&self, color: Color) -> i32 {
        self.has(color, true) as i32 + self.has(color, false) as i32
    }
}

impl fmt::Display for CastlingRights {
    /// Formats the rights as in a FEN string, such as `KQkq` or `-`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return write!(f, "-");
        }

        for (color, short, c) in [
            (Color::White, true, 'K'),
            (Color::White, false, 'Q'),
            (Color::Black, true, 'k'),
            (Color::Black, false, 'q'),
        ] {
            if self.has(color, short) {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

/// Everything [`Position::apply`] overwrites, so that [`Position::undo`] can put it back.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Undo {
    moved: Option<Piece>,
    captured: Option<Piece>,
    castling_rights: CastlingRights,
    ep_square: Option<Square>,
    halfmove: u16,
    fullmove: u16,
    key: ZobristKey,
}

impl Undo {
    /// The piece removed from the board by this move, if any.
    #[inline(always)]
    pub const fn captured(&self) -> Option<Piece> {
        self.captured
    }
}

/// A chess position: the pieces on an `8x8` board and the state needed to continue the game.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    board: [Option<Piece>; Square::COUNT],
    side_to_move: Color,
    castling_rights: CastlingRights,
    ep_square: Option<Square>,

    /// Half-moves since the last capture or pawn move.
    halfmove: u16,

    /// Starts at 1 and increments after every Black move.
    fullmove: u16,

    /// Kept up to date incrementally by [`Position::apply`].
    key: ZobristKey,
}

impl Position {
    /// Parses a position from a [FEN](https://www.chessprogramming.org/Forsyth-Edwards_Notation) string.
    ///
    /// Only the piece placement is required. Missing fields default to `w - - 0 1`.
    ///
    /// # Example
    /// ```
    /// # use arbiter::{Position, FEN_STARTPOS};
    /// let position = Position::from_fen(FEN_STARTPOS).unwrap();
    /// assert_eq!(position.to_fen(), FEN_STARTPOS);
    ///
    /// assert!(Position::from_fen("8/8/8/8/8/8/8/8 w - - 0 1").is_err());
    /// ```
    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        let fields = fen.split_ascii_whitespace().collect::<Vec<_>>();
        if fields.len() > 6 {
            return Err(PositionError::TooManyFields(fields.len()));
        }

        let placements = *fields
            .first()
            .ok_or_else(|| PositionError::Empty(fen.to_string()))?;

        let mut pos = Self {
            board: parse_placements(placements)?,
            side_to_move: Color::White,
            castling_rights: CastlingRights::default(),
            ep_square: None,
            halfmove: 0,
            fullmove: 1,
            key: ZobristKey::default(),
        };

        for color in Color::all() {
            let kings = pos
                .pieces()
                .filter(|(_, piece)| *piece == Piece::new(color, PieceKind::King))
                .count();
            if kings != 1 {
                return Err(PositionError::KingCount(color, kings));
            }
        }

        let side = fields.get(1).copied().unwrap_or("w");
        pos.side_to_move =
            Color::from_fen(side).ok_or_else(|| PositionError::SideToMove(side.to_string()))?;

        let castling = fields.get(2).copied().unwrap_or("-");
        if castling != "-" {
            for c in castling.chars() {
                let (color, short) = match c {
                    'K' => (Color::White, true),
                    'Q' => (Color::White, false),
                    'k' => (Color::Black, true),
                    'q' => (Color::Black, false),
                    _ => return Err(PositionError::Castling(castling.to_string())),
                };
                if pos.castling_rights.has(color, short) {
                    return Err(PositionError::Castling(castling.to_string()));
                }
                pos.castling_rights.set(color, short);
            }
        }

        let ep = fields.get(3).copied().unwrap_or("-");
        if ep != "-" {
            let square =
                Square::from_uci(ep).map_err(|_| PositionError::EnPassant(ep.to_string()))?;
            // The target sits behind the pawn that just moved, so it is on the mover's third rank
            if square.rank() != Rank::relative(pos.side_to_move.opponent(), 2) {
                return Err(PositionError::EnPassant(ep.to_string()));
            }
            pos.ep_square = Some(square);
        }

        pos.halfmove = parse_counter(fields.get(4).copied().unwrap_or("0"), "halfmove")?;
        pos.fullmove = parse_counter(fields.get(5).copied().unwrap_or("1"), "fullmove")?;

        pos.key = pos.compute_key();

        // The side that just moved cannot have left its king attacked
        let waiting = pos.side_to_move.opponent();
        if pos.is_in_check(waiting) {
            return Err(PositionError::OpponentInCheck(waiting));
        }

        Ok(pos)
    }

    /// Generates the FEN string of this position.
    #[inline(always)]
    pub fn to_fen(&self) -> String {
        self.to_string()
    }

    /// Computes the Zobrist key of this position from scratch.
    fn compute_key(&self) -> ZobristKey {
        let mut key = ZobristKey::default();
        for (square, piece) in self.pieces() {
            key.hash_piece(square, piece);
        }
        key.hash_castling_rights(self.castling_rights);
        key.hash_ep_square(self.ep_square);
        key.hash_side_to_move(self.side_to_move);
        key
    }

    #[inline(always)]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline(always)]
    pub const fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline(always)]
    pub const fn ep_square(&self) -> Option<Square> {
        self.ep_square
    }

    #[inline(always)]
    pub const fn halfmove(&self) -> u16 {
        self.halfmove
    }

    #[inline(always)]
    pub const fn fullmove(&self) -> u16 {
        self.fullmove
    }

    #[inline(always)]
    pub const fn key(&self) -> ZobristKey {
        self.key
    }

    #[inline(always)]
    pub const fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board[square.index()]
    }

    /// Iterates over every occupied square and the piece on it.
    #[inline(always)]
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter().filter_map(|square| self.board[square].map(|piece| (square, piece)))
    }

    /// Finds the square of `color`'s king.
    #[inline(always)]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let king = Piece::new(color, PieceKind::King);
        Square::iter().find(|&square| self.board[square] == Some(king))
    }

    /// Hands the move to the other side without moving a piece.
    ///
    /// The en passant target is dropped, since it only belongs to the side that was about to move.
    pub(crate) fn set_side_to_move(&mut self, color: Color) {
        if self.side_to_move != color {
            self.key.hash_ep_square(self.ep_square);
            self.ep_square = None;
            self.key.hash_side_to_move(self.side_to_move);
            self.key.hash_side_to_move(color);
            self.side_to_move = color;
        }
    }

    #[inline(always)]
    fn put(&mut self, square: Square, piece: Piece) {
        self.board[square] = Some(piece);
        self.key.hash_piece(square, piece);
    }

    #[inline(always)]
    fn take(&mut self, square: Square) -> Option<Piece> {
        let piece = self.board[square].take()?;
        self.key.hash_piece(square, piece);
        Some(piece)
    }

    /// Squares the rook travels between when the king castles to `king_to`.
    #[inline(always)]
    fn castling_rook_squares(king_to: Square) -> (Square, Square) {
        let rank = king_to.rank();
        if king_to.file() == File::G {
            (Square::new(File::H, rank), Square::new(File::F, rank))
        } else {
            (Square::new(File::A, rank), Square::new(File::D, rank))
        }
    }

    /// Square of the pawn removed by an en passant capture landing on `to`.
    #[inline(always)]
    fn en_passant_victim(to: Square, mover: Color) -> Square {
        Square::new(to.file(), Rank::relative(mover.opponent(), 3))
    }

    /// Applies `mv` in place, returning what is needed to take it back with [`Position::undo`].
    ///
    /// No legality checks happen here. A move whose origin square is empty changes nothing.
    pub fn apply(&mut self, mv: Move) -> Undo {
        let mut undo = Undo {
            moved: None,
            captured: None,
            castling_rights: self.castling_rights,
            ep_square: self.ep_square,
            halfmove: self.halfmove,
            fullmove: self.fullmove,
            key: self.key,
        };

        let Some(piece) = self.take(mv.from()) else {
            return undo;
        };
        undo.moved = Some(piece);
        let color = piece.color();

        self.key.hash_castling_rights(self.castling_rights);
        self.key.hash_ep_square(self.ep_square);
        self.key.hash_side_to_move(color);

        undo.captured = if mv.is_en_passant() {
            self.take(Self::en_passant_victim(mv.to(), color))
        } else {
            self.take(mv.to())
        };

        let placed = match mv.promotion() {
            Some(kind) => Piece::new(color, kind),
            None => piece,
        };
        self.put(mv.to(), placed);

        if mv.is_castle() {
            let (rook_from, rook_to) = Self::castling_rook_squares(mv.to());
            if let Some(rook) = self.take(rook_from) {
                self.put(rook_to, rook);
            }
        }

        self.castling_rights.remove_for_square(mv.from());
        self.castling_rights.remove_for_square(mv.to());

        self.ep_square = match mv.kind() {
            MoveKind::DoublePush => mv.from().offset(0, color.sign() as i8),
            _ => None,
        };

        if piece.kind() == PieceKind::Pawn || undo.captured.is_some() {
            self.halfmove = 0;
        } else {
            self.halfmove = self.halfmove.saturating_add(1);
        }
        if !color.is_white() {
            self.fullmove = self.fullmove.saturating_add(1);
        }
        self.side_to_move = color.opponent();

        self.key.hash_castling_rights(self.castling_rights);
        self.key.hash_ep_square(self.ep_square);
        self.key.hash_side_to_move(self.side_to_move);

        undo
    }

    /// Takes back `mv`, which must be the last move applied, restoring the exact prior state.
    pub fn undo(&mut self, mv: Move, undo: Undo) {
        let Some(piece) = undo.moved else {
            return;
        };

        self.board[mv.to()] = None;
        self.board[mv.from()] = Some(piece);

        if let Some(captured) = undo.captured {
            let square = if mv.is_en_passant() {
                Self::en_passant_victim(mv.to(), piece.color())
            } else {
                mv.to()
            };
            self.board[square] = Some(captured);
        }

        if mv.is_castle() {
            let (rook_from, rook_to) = Self::castling_rook_squares(mv.to());
            self.board[rook_from] = self.board[rook_to].take();
        }

        self.side_to_move = piece.color();
        self.castling_rights = undo.castling_rights;
        self.ep_square = undo.ep_square;
        self.halfmove = undo.halfmove;
        self.fullmove = undo.fullmove;
        self.key = undo.key;
    }

    /// Returns `true` if neither side has enough material left to deliver checkmate.
    ///
    /// # Example
    /// ```
    /// # use arbiter::Position;
    /// let kk: Position = "8/4k3/8/8/3K4/8/8/8 w - - 0 1".parse().unwrap();
    /// assert!(kk.is_insufficient_material());
    ///
    /// let knk: Position = "8/4k3/2n5/8/3K4/8/8/8 w - - 0 1".parse().unwrap();
    /// assert!(knk.is_insufficient_material());
    ///
    /// // Opposing Bishops on the same color square
    /// let same: Position = "8/2b1k3/8/8/3K4/8/5B2/8 w - - 0 1".parse().unwrap();
    /// assert!(same.is_insufficient_material());
    ///
    /// // Opposing Bishops on different color squares
    /// let diff: Position = "8/3bk3/8/8/3K4/8/5B2/8 w - - 0 1".parse().unwrap();
    /// assert!(!diff.is_insufficient_material());
    /// ```
    pub fn is_insufficient_material(&self) -> bool {
        // [knights, bishops] per color, plus the square of the last bishop seen
        let mut minors = [[0; 2]; Color::COUNT];
        let mut bishop_squares = [None; Color::COUNT];

        for (square, piece) in self.pieces() {
            let side = piece.color().index();
            match piece.kind() {
                PieceKind::King => {}
                PieceKind::Knight => minors[side][0] += 1,
                PieceKind::Bishop => {
                    minors[side][1] += 1;
                    bishop_squares[side] = Some(square);
                }
                PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
            }
        }

        match (minors[0], minors[1]) {
            // Lone kings, or a single minor piece on one side
            ([0, 0], [0, 0]) | ([1, 0] | [0, 1], [0, 0]) | ([0, 0], [1, 0] | [0, 1]) => true,

            // One bishop each, on the same color
            ([0, 1], [0, 1]) => match (bishop_squares[0], bishop_squares[1]) {
                (Some(w), Some(b)) => w.is_light() == b.is_light(),
                _ => false,
            },

            _ => false,
        }
    }
}

/// Parses the piece placement field of a FEN string into a board.
fn parse_placements(placements: &str) -> Result<[Option<Piece>; Square::COUNT], PositionError> {
    let err = |reason| PositionError::Placement(placements.to_string(), reason);
    let mut board = [None; Square::COUNT];

    let ranks = placements.split('/').collect::<Vec<_>>();
    if ranks.len() != Rank::COUNT {
        return Err(err("expected 8 ranks"));
    }

    // FEN lists the eighth rank first
    for (rank, row) in Rank::iter().rev().zip(ranks) {
        let mut file = 0u8;
        for c in row.chars() {
            if let Some(empty) = c.to_digit(10) {
                if !(1..=8).contains(&empty) {
                    return Err(err("empty-square counts must be between 1 and 8"));
                }
                file += empty as u8;
            } else {
                let piece = Piece::from_char(c).ok_or_else(|| err("unknown piece character"))?;
                let square = File::new(file)
                    .map(|file| Square::new(file, rank))
                    .ok_or_else(|| err("rank describes more than 8 files"))?;
                board[square] = Some(piece);
                file += 1;
            }

            if file as usize > File::COUNT {
                return Err(err("rank describes more than 8 files"));
            }
        }

        if file as usize != File::COUNT {
            return Err(err("rank describes fewer than 8 files"));
        }
    }

    Ok(board)
}

fn parse_counter(value: &str, field: &'static str) -> Result<u16, PositionError> {
    value.parse().map_err(|_| PositionError::Counter {
        field,
        value: value.to_string(),
    })
}

impl Default for Position {
    /// The standard starting position.
    fn default() -> Self {
        // The constant is known to be well-formed
        match Self::from_fen(FEN_STARTPOS) {
            Ok(position) => position,
            Err(e) => unreachable!("starting position failed to parse: {e}"),
        }
    }
}

impl FromStr for Position {
    type Err = PositionError;
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}

impl fmt::Display for Position {
    /// Formats this position as a FEN string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            let mut empty = 0;
            for file in File::iter() {
                match self.board[Square::new(file, rank)] {
                    Some(piece) => {
                        if empty > 0 {
                            write!(f, "{empty}")?;
                            empty = 0;
                        }
                        write!(f, "{piece}")?;
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                write!(f, "{empty}")?;
            }
            if rank != Rank::ONE {
                write!(f, "/")?;
            }
        }

        let ep = self
            .ep_square
            .map(|square| square.to_string())
            .unwrap_or_else(|| String::from("-"));

        write!(
            f,
            " {} {} {ep} {} {}",
            self.side_to_move, self.castling_rights, self.halfmove, self.fullmove
        )
    }
}

impl fmt::Debug for Position {
    /// Draws the board from White's side, followed by the FEN.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            write!(f, "{rank}|")?;
            for file in File::iter() {
                let c = self.board[Square::new(file, rank)].map_or('.', |piece| piece.char());
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        writeln!(f, " +----------------")?;
        write!(f, "   ")?;
        for file in File::iter() {
            write!(f, "{file} ")?;
        }
        write!(f, "\n\nFEN: {self}\nKey: {}", self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(position: &Position, uci: &str) -> Move {
        Move::from_uci(position, uci).unwrap()
    }

    #[test]
    fn test_fen_round_trip() {
        for fen in [
            FEN_STARTPOS,
            FEN_KIWIPETE,
            "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6 0 2",
            "8/8/4k3/8/8/8/8/4K2R b K - 37 112",
        ] {
            let position = Position::from_fen(fen).unwrap();
            assert_eq!(position.to_fen(), fen);
        }
    }

    #[test]
    fn test_fen_defaults_missing_fields() {
        let position = Position::from_fen("4k3/8/8/8/8/8/8/4K3").unwrap();
        assert_eq!(position.to_fen(), "4k3/8/8/8/8/8/8/4K3 w - - 0 1");
    }

    #[test]
    fn test_malformed_fens() {
        for fen in [
            "",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1",
            "rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNRR w KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/ppppxppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkx - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KKkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e4 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - x 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1 extra",
            "rnbqqbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKKNR w KQkq - 0 1",
            "4k3/8/8/8/8/8/8/4RK2 w - - 0 1",
        ] {
            assert!(Position::from_fen(fen).is_err(), "{fen:?} should not parse");
        }
    }

    #[test]
    fn test_king_of_side_not_to_move_in_check() {
        assert_eq!(
            Position::from_fen("4k3/8/8/8/8/8/8/4RK2 w - - 0 1"),
            Err(PositionError::OpponentInCheck(Color::Black))
        );
        assert_eq!(
            Position::from_fen("4k3/4r3/8/8/8/8/8/4K3 b - - 0 1"),
            Err(PositionError::OpponentInCheck(Color::White))
        );

        // Being in check on your own move is fine
        assert!(Position::from_fen("4k3/8/8/8/8/8/8/4RK2 b - - 0 1").is_ok());
    }

    #[test]
    fn test_apply_undo_restores_everything() {
        let original = Position::from_fen(FEN_KIWIPETE).unwrap();
        // castle, capture, quiet, double push, promotion-free capture by pawn
        for uci in ["e1g1", "e1c1", "e2a6", "d5e6", "a2a4", "f3f5", "e5f7"] {
            let mut position = original;
            let m = mv(&position, uci);
            let undo = position.apply(m);
            assert_ne!(position, original, "{uci} changed nothing");
            position.undo(m, undo);
            assert_eq!(position, original, "{uci} was not undone exactly");
        }
    }

    #[test]
    fn test_incremental_key_matches_full_key() {
        let mut position = Position::from_fen(FEN_KIWIPETE).unwrap();
        for uci in ["e1g1", "h3g2", "a2a4", "b4a3", "d5e6", "e8c8"] {
            let m = mv(&position, uci);
            position.apply(m);
            assert_eq!(position.key(), position.compute_key(), "after {uci}");
        }
    }

    #[test]
    fn test_en_passant_capture() {
        let mut position: Position = "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3"
            .parse()
            .unwrap();
        let before = position;
        let m = mv(&position, "e5f6");
        assert!(m.is_en_passant());

        let undo = position.apply(m);
        assert_eq!(undo.captured(), Some(Piece::new(Color::Black, PieceKind::Pawn)));
        assert_eq!(position.piece_at(Square::F3.offset(0, 2).unwrap()), None);
        assert_eq!(
            position.to_fen(),
            "rnbqkbnr/ppp1p1pp/5P2/3p4/8/8/PPPP1PPP/RNBQKBNR b KQkq - 0 3"
        );

        position.undo(m, undo);
        assert_eq!(position, before);
    }

    #[test]
    fn test_castling_rights_update() {
        let mut position = Position::from_fen(FEN_KIWIPETE).unwrap();

        // Moving a rook loses only that side
        let m = mv(&position, "h1f1");
        position.apply(m);
        assert_eq!(position.castling_rights().to_string(), "Qkq");

        // Capturing a rook on its home square removes the opponent's right
        let mut position: Position = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1".parse().unwrap();
        let m = mv(&position, "a1a8");
        position.apply(m);
        assert_eq!(position.castling_rights().to_string(), "Kk");

        // Castling removes both of the mover's rights and places the rook
        let mut position: Position = "r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1".parse().unwrap();
        let m = mv(&position, "e8c8");
        position.apply(m);
        assert_eq!(position.castling_rights().to_string(), "KQ");
        assert_eq!(
            position.piece_at(Square::D8),
            Some(Piece::new(Color::Black, PieceKind::Rook))
        );
        assert_eq!(position.fullmove(), 2);
    }

    #[test]
    fn test_promotion_places_new_piece() {
        let mut position: Position = "8/P6k/8/8/8/8/8/K7 w - - 0 1".parse().unwrap();
        let before = position;
        let m = mv(&position, "a7a8");
        assert_eq!(m.promotion(), Some(PieceKind::Queen));

        let undo = position.apply(m);
        assert_eq!(
            position.piece_at(Square::A8),
            Some(Piece::new(Color::White, PieceKind::Queen))
        );
        position.undo(m, undo);
        assert_eq!(position, before);
    }
}
