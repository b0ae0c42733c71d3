/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::{CastlingRights, Color, Piece, Square};

/// Hash keys for every component of a [`crate::Position`], generated at compile time.
const ZOBRIST_TABLE: ZobristHashTable = ZobristHashTable::new();

/// A position signature built from a [Zobrist hash](https://www.chessprogramming.org/Zobrist_Hashing).
///
/// Two positions with the same pieces, side to move, castling rights and en passant file share a key.
#[derive(Default, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub struct ZobristKey(u64);

impl ZobristKey {
    #[inline(always)]
    pub const fn inner(&self) -> u64 {
        self.0
    }

    /// Adds or removes `piece` on `square`.
    ///
    /// Hashing is an XOR, so calling this twice with the same arguments is a no-op.
    ///
    /// # Example
    /// ```
    /// # use arbiter::*;
    /// let mut key = ZobristKey::default();
    /// key.hash_piece(Square::E4, Piece::new(Color::White, PieceKind::Pawn));
    /// assert_ne!(key, ZobristKey::default());
    ///
    /// key.hash_piece(Square::E4, Piece::new(Color::White, PieceKind::Pawn));
    /// assert_eq!(key, ZobristKey::default());
    /// ```
    #[inline(always)]
    pub fn hash_piece(&mut self, square: Square, piece: Piece) {
        self.0 ^= ZOBRIST_TABLE.pieces[square][piece.index()];
    }

    /// Adds or removes the en passant target, if there is one.
    ///
    /// Only the file matters, since the rank follows from the side to move.
    #[inline(always)]
    pub fn hash_ep_square(&mut self, ep_square: Option<Square>) {
        if let Some(square) = ep_square {
            self.0 ^= ZOBRIST_TABLE.ep_files[square.file().index()];
        }
    }

    #[inline(always)]
    pub fn hash_castling_rights(&mut self, rights: CastlingRights) {
        self.0 ^= ZOBRIST_TABLE.castling[rights.index()];
    }

    /// Adds or removes the side-to-move key. White has no key.
    #[inline(always)]
    pub fn hash_side_to_move(&mut self, color: Color) {
        if !color.is_white() {
            self.0 ^= ZOBRIST_TABLE.black_to_move;
        }
    }
}

impl fmt::Display for ZobristKey {
    #[inline(always)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

struct ZobristHashTable {
    pieces: [[u64; Piece::COUNT]; Square::COUNT],
    ep_files: [u64; 8],
    castling: [u64; CastlingRights::COUNT],
    black_to_move: u64,
}

impl ZobristHashTable {
    const fn new() -> Self {
        let mut state = 0x5EED_0F_A2B1_7E25_u64;
        let mut pieces = [[0; Piece::COUNT]; Square::COUNT];
        let mut ep_files = [0; 8];
        let mut castling = [0; CastlingRights::COUNT];

        let mut i = 0;
        while i < Square::COUNT {
            let mut j = 0;
            while j < Piece::COUNT {
                let key;
                (key, state) = splitmix64(state);
                pieces[i][j] = key;
                j += 1;
            }
            i += 1;
        }

        i = 0;
        while i < ep_files.len() {
            let key;
            (key, state) = splitmix64(state);
            ep_files[i] = key;
            i += 1;
        }

        // No rights at all hashes to zero, like White to move.
        i = 1;
        while i < CastlingRights::COUNT {
            let key;
            (key, state) = splitmix64(state);
            castling[i] = key;
            i += 1;
        }

        let (black_to_move, _) = splitmix64(state);

        Self {
            pieces,
            ep_files,
            castling,
            black_to_move,
        }
    }
}

/// One step of the [SplitMix64](https://prng.di.unimi.it/splitmix64.c) generator, returning `(output, next_state)`.
const fn splitmix64(state: u64) -> (u64, u64) {
    let state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    (z ^ (z >> 31), state)
}
