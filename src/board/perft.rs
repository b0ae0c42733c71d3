/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::Position;

/// Counts the leaf nodes of the legal move tree `depth` plies deep.
///
/// Uses bulk counting at depth 1 and walks the tree with apply/undo on a single scratch position.
///
/// # Example
/// ```
/// # use arbiter::{perft, Position};
/// assert_eq!(perft(&Position::default(), 2), 400);
/// ```
pub fn perft(position: &Position, depth: usize) -> u64 {
    let mut scratch = *position;
    perft_recursive(&mut scratch, depth)
}

fn perft_recursive(position: &mut Position, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = position.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0;
    for mv in moves {
        let undo = position.apply(mv);
        nodes += perft_recursive(position, depth - 1);
        position.undo(mv, undo);
    }
    nodes
}

/// Like [`perft`], but prints the node count below each root move before returning the total.
pub fn splitperft(position: &Position, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut scratch = *position;
    let mut total = 0;
    for mv in position.legal_moves() {
        let undo = scratch.apply(mv);
        let nodes = perft_recursive(&mut scratch, depth - 1);
        scratch.undo(mv, undo);

        println!("{mv}\t{nodes}");
        total += nodes;
    }
    total
}
