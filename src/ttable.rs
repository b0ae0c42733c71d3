/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{Score, SearchBounds};

/// Type of node encountered during search.
///
/// See [CPW](https://www.chessprogramming.org/Node_Types) for more.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub enum NodeType {
    /// The score is exact.
    Pv,

    /// The score is less than or equal to alpha (upper bound).
    All,

    /// The score is greater than or equal to beta (lower bound).
    Cut,
}

impl NodeType {
    /// Classifies `score` against the bounds the node was searched with:
    ///
    /// ```text
    /// if score <= alpha:
    ///     UPPERBOUND
    /// else if score >= beta:
    ///     LOWERBOUND
    /// else:
    ///     EXACT
    /// ```
    #[inline(always)]
    pub fn new(score: Score, bounds: SearchBounds) -> Self {
        if score <= bounds.alpha {
            Self::All
        } else if score >= bounds.beta {
            Self::Cut
        } else {
            Self::Pv
        }
    }
}

/// An entry into a hash table
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct TTableEntry {
    /// Signature of the position this entry represents.
    pub key: u64,

    /// Remaining depth at which the data for this entry was found.
    pub depth: u8,

    /// Best score found for this position, counted from the node rather than the root.
    pub score: Score,

    /// Node type of this entry.
    pub node_type: NodeType,
}

impl TTableEntry {
    /// Creates a new [`TTableEntry`].
    ///
    /// The node type is derived from `bounds`, the window the node was searched with,
    /// and mate scores are rebased onto the node at `ply`.
    #[inline(always)]
    pub fn new(key: u64, score: Score, bounds: SearchBounds, depth: u8, ply: i32) -> Self {
        // Classify before rebasing the score
        let node_type = NodeType::new(score, bounds);

        Self {
            key,
            depth,
            score: score.to_node(ply),
            node_type,
        }
    }

    /// Determine whether the score in this entry can be used and, if so, return it.
    ///
    /// An entry's score can be used if and only if:
    ///     1. The entry is exact ([`NodeType::Pv`]).
    ///     2. The entry is an upper bound ([`NodeType::All`]) and its score is `<= alpha`.
    ///     3. The entry is a lower bound ([`NodeType::Cut`]) and its score is `>= beta`.
    ///
    /// Callers must check the entry's depth separately.
    #[inline(always)]
    pub fn try_score(&self, bounds: SearchBounds, ply: i32) -> Option<Score> {
        let score = self.score.to_root(ply);

        match self.node_type {
            NodeType::Pv => Some(score),
            NodeType::All if score <= bounds.alpha => Some(score),
            NodeType::Cut if score >= bounds.beta => Some(score),
            _ => None,
        }
    }
}

/// Transposition Table.
///
/// Used during a search to keep track of previous search results on positions,
/// avoiding unnecessary re-computations. Entries live in a fixed number of slots,
/// and a newer entry always replaces whatever occupied its slot.
#[derive(Debug)]
pub struct TTable {
    /// Internal cache of the TTable.
    cache: Vec<Option<TTableEntry>>,
}

impl TTable {
    /// Default number of entries.
    pub const DEFAULT_CAPACITY: usize = 1 << 16;

    /// Create a new [`TTable`] that can hold `capacity` entries.
    ///
    /// A capacity of 0 is bumped to 1.
    #[inline(always)]
    pub fn from_capacity(capacity: usize) -> Self {
        Self {
            cache: vec![None; capacity.max(1)],
        }
    }

    /// Clears the entries of this [`TTable`].
    #[inline(always)]
    pub fn clear(&mut self) {
        self.cache.iter_mut().for_each(|entry| *entry = None);
    }

    /// Returns the number of entries that can fit within this [`TTable`]
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.cache.len()
    }

    /// Returns the number of `Some` entries in this [`TTable`].
    #[inline(always)]
    pub fn num_entries(&self) -> usize {
        self.cache.iter().filter(|entry| entry.is_some()).count()
    }

    /// Map `key` to an index into this [`TTable`].
    #[inline(always)]
    fn index(&self, key: u64) -> usize {
        (key % self.capacity() as u64) as usize
    }

    /// Get the entry if and only if it matches the provided key
    #[inline(always)]
    pub fn get(&self, key: u64) -> Option<&TTableEntry> {
        self.cache[self.index(key)]
            .as_ref()
            .filter(|entry| entry.key == key)
    }

    /// Store `entry` in the table at `entry.key`, overriding and returning whatever was there.
    #[inline(always)]
    pub fn store(&mut self, entry: TTableEntry) -> Option<TTableEntry> {
        let index = self.index(entry.key);
        self.cache[index].replace(entry)
    }
}

impl Default for TTable {
    #[inline(always)]
    fn default() -> Self {
        Self::from_capacity(Self::DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(alpha: i32, beta: i32) -> SearchBounds {
        SearchBounds::new(Score::new(alpha), Score::new(beta))
    }

    #[test]
    fn test_ttable_collisions() {
        let exact = |key, score| TTableEntry {
            key,
            depth: 0,
            score: Score::new(score),
            node_type: NodeType::Pv,
        };

        // Keys 3 and 5 share a slot in a table of two
        let entry1 = exact(3, 0);
        let entry2 = exact(5, 100);

        let mut tt = TTable::from_capacity(2);
        assert_eq!(tt.num_entries(), 0, "TTable should initialize to being empty");

        tt.store(entry1);
        assert_eq!(tt.num_entries(), 1);
        assert_eq!(tt.get(3), Some(&entry1));

        assert_eq!(tt.store(entry2), Some(entry1));
        assert_eq!(tt.num_entries(), 1, "The newer entry replaces the older one");
        assert!(tt.get(3).is_none(), "Cannot get an entry that has been overridden");
        assert_eq!(tt.get(5), Some(&entry2));

        tt.clear();
        assert_eq!(tt.num_entries(), 0);
    }

    #[test]
    fn test_bound_types() {
        let window = bounds(-50, 50);
        assert_eq!(NodeType::new(Score::new(-50), window), NodeType::All);
        assert_eq!(NodeType::new(Score::new(50), window), NodeType::Cut);
        assert_eq!(NodeType::new(Score::new(0), window), NodeType::Pv);

        let upper = TTableEntry::new(1, Score::new(-80), window, 3, 0);
        assert_eq!(upper.try_score(bounds(-100, 100), 0), None);
        assert_eq!(upper.try_score(bounds(-70, 100), 0), Some(Score::new(-80)));

        let lower = TTableEntry::new(1, Score::new(80), window, 3, 0);
        assert_eq!(lower.try_score(bounds(-100, 100), 0), None);
        assert_eq!(lower.try_score(bounds(-100, 70), 0), Some(Score::new(80)));
    }

    #[test]
    fn test_mate_scores_are_rebased() {
        // A win found 5 plies from the root, at a node 2 plies deep
        let entry = TTableEntry::new(7, Score::win_in(5), bounds(-100, 100), 4, 2);
        assert_eq!(entry.score, Score::win_in(3));

        // Reaching the same node 4 plies deep makes it a win in 7
        assert_eq!(entry.try_score(bounds(-100, 100), 4), Some(Score::win_in(7)));
    }
}
