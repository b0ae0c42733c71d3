/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    time::{Duration, Instant},
};

use arrayvec::ArrayVec;
use tracing::{debug, info, trace};

use crate::{
    order_score, Color, Evaluator, Game, GameStatus, Move, MovePicker, Score, TTable, TTableEntry,
    Undo, MAX_NUM_MOVES,
};

/// Maximum depth that can be searched
pub const MAX_DEPTH: u8 = 64;

/// How a finished game ended, from the search's point of view.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Outcome {
    /// The side that maximizes the score (White, or `X`) has won.
    MaximizerWins,

    /// The side that minimizes the score (Black, or `O`) has won.
    MinimizerWins,

    Draw,
}

impl Outcome {
    /// Exact score of this outcome, reached `ply` plies from the root.
    #[inline(always)]
    pub const fn score(&self, ply: i32) -> Score {
        match self {
            Self::MaximizerWins => Score::win_in(ply),
            Self::MinimizerWins => Score::loss_in(ply),
            Self::Draw => Score::DRAW,
        }
    }
}

/// A two-player, zero-sum game that [`Search`] can play.
///
/// Positions are mutated in place with [`Searchable::make`] and restored with [`Searchable::unmake`],
/// so a search never has to copy the game.
pub trait Searchable {
    type Move: Copy + PartialEq + fmt::Debug + fmt::Display;

    /// Whatever [`Searchable::make`] must remember for [`Searchable::unmake`] to restore the game exactly.
    type Undo;

    /// Returns `true` if the side to move wants the highest score.
    fn maximizing(&self) -> bool;

    /// Signature of the current position, used to key the transposition table.
    fn signature(&self) -> u64;

    /// All legal moves for the side to move. Empty once the game is over.
    fn generate_moves(&self) -> ArrayVec<Self::Move, MAX_NUM_MOVES>;

    /// How the game ended, if it has, given the legal moves of the side to move.
    fn outcome(&self, moves: &[Self::Move]) -> Option<Outcome>;

    /// Static evaluation of a position that is not over.
    fn evaluate(&self) -> Score;

    /// Ordering score of `mv`. Higher scores are searched first.
    #[inline(always)]
    fn order(&self, _mv: &Self::Move) -> i32 {
        0
    }

    fn make(&mut self, mv: Self::Move) -> Self::Undo;

    fn unmake(&mut self, mv: Self::Move, undo: Self::Undo);
}

impl Searchable for Game {
    type Move = Move;
    type Undo = Undo;

    #[inline(always)]
    fn maximizing(&self) -> bool {
        self.side_to_move() == Color::White
    }

    #[inline(always)]
    fn signature(&self) -> u64 {
        self.key().inner()
    }

    #[inline(always)]
    fn generate_moves(&self) -> ArrayVec<Move, MAX_NUM_MOVES> {
        self.legal_moves()
    }

    fn outcome(&self, moves: &[Move]) -> Option<Outcome> {
        match self.status_with(moves) {
            GameStatus::InProgress => None,
            GameStatus::Checkmate(Color::White) => Some(Outcome::MinimizerWins),
            GameStatus::Checkmate(Color::Black) => Some(Outcome::MaximizerWins),
            GameStatus::Stalemate | GameStatus::Draw(_) => Some(Outcome::Draw),
        }
    }

    #[inline(always)]
    fn evaluate(&self) -> Score {
        Evaluator::new(self.position()).eval()
    }

    #[inline(always)]
    fn order(&self, mv: &Move) -> i32 {
        order_score(self.position(), mv)
    }

    #[inline(always)]
    fn make(&mut self, mv: Move) -> Undo {
        self.apply(mv)
    }

    #[inline(always)]
    fn unmake(&mut self, mv: Move, undo: Undo) {
        self.undo(mv, undo)
    }
}

/// The window of scores a node still cares about.
///
/// Anything at or below `alpha` is no better than what the maximizing side already has,
/// and anything at or above `beta` is no better than what the minimizing side already has.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SearchBounds {
    pub alpha: Score,
    pub beta: Score,
}

impl SearchBounds {
    #[inline(always)]
    pub const fn new(alpha: Score, beta: Score) -> Self {
        Self { alpha, beta }
    }
}

impl Default for SearchBounds {
    /// The full window; every score is of interest.
    #[inline(always)]
    fn default() -> Self {
        Self::new(-Score::INF, Score::INF)
    }
}

/// The result of a search, containing the best move found, score, and total nodes searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult<M> {
    /// Number of nodes searched.
    pub nodes: u64,

    /// Best move found during the search.
    ///
    /// Only `None` if there were no legal moves to choose from.
    pub bestmove: Option<M>,

    /// Evaluation of the position after `bestmove` is made.
    pub score: Score,

    /// Depth the search was asked to reach.
    pub depth: u8,

    /// Whether the time or node budget ran out before every root move was searched.
    pub timed_out: bool,

    /// Number of nodes answered by the transposition table.
    pub tt_hits: u64,
}

/// Configuration variables for executing a [`Search`].
#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    /// Maximum depth to execute the search, clamped to `1..=MAX_DEPTH`.
    pub max_depth: u8,

    /// Node allowance.
    ///
    /// If the search exceeds this many nodes, it will exit as quickly as possible.
    pub max_nodes: u64,

    /// Start time of the search.
    pub starttime: Instant,

    /// Limit on search time.
    ///
    /// Once exceeded, nodes return their static evaluation and the root stops trying new moves.
    pub timeout: Duration,

    /// Whether to use alpha-beta pruning. Without it, this is plain minimax.
    pub pruning: bool,

    /// Whether to search promising moves first.
    pub ordering: bool,

    /// Whether to use a transposition table.
    pub caching: bool,

    /// Number of entries in the transposition table.
    pub tt_capacity: usize,
}

impl SearchConfig {
    /// Constructs a [`SearchConfig`] that searches `depth` plies deep for at most `time_ms` milliseconds,
    /// starting now.
    ///
    /// # Example
    /// ```
    /// # use arbiter::SearchConfig;
    /// let config = SearchConfig::with_limits(3, 500);
    /// assert_eq!(config.max_depth, 3);
    /// assert!(config.pruning && config.ordering && config.caching);
    /// ```
    #[inline(always)]
    pub fn with_limits(depth: u8, time_ms: u64) -> Self {
        Self {
            max_depth: depth,
            timeout: Duration::from_millis(time_ms),
            ..Default::default()
        }
    }
}

impl Default for SearchConfig {
    /// A default [`SearchConfig`] will permit an "infinite" search, with every optimization enabled.
    ///
    /// The word "infinite" is quoted here because the actual defaults are the `::MAX` values for each field.
    #[inline(always)]
    fn default() -> Self {
        Self {
            max_depth: MAX_DEPTH,
            max_nodes: u64::MAX,
            starttime: Instant::now(),
            timeout: Duration::MAX,
            pruning: true,
            ordering: true,
            caching: true,
            tt_capacity: TTable::DEFAULT_CAPACITY,
        }
    }
}

/// Executes a search on the provided game at a specified depth.
///
/// All scratch state (the node counter, the transposition table, the stop flag) belongs to this instance,
/// so independent searches on separate games may run on separate threads.
pub struct Search<'a, G: Searchable> {
    /// The game to search on.
    ///
    /// Moves are made and unmade on it in place; it is restored by the time the search ends.
    game: &'a mut G,

    /// Configuration variables for this instance of the search.
    config: SearchConfig,

    /// Created fresh for every search, so results never leak from one search to the next.
    ttable: Option<TTable>,

    nodes: u64,

    tt_hits: u64,

    /// Set once the time or node budget has run out.
    stopped: bool,
}

impl<'a, G: Searchable> Search<'a, G> {
    /// Construct a new [`Search`] instance to execute on the provided game.
    #[inline(always)]
    pub fn new(game: &'a mut G, config: SearchConfig) -> Self {
        let ttable = config
            .caching
            .then(|| TTable::from_capacity(config.tt_capacity));

        Self {
            game,
            config,
            ttable,
            nodes: 0,
            tt_hits: 0,
            stopped: false,
        }
    }

    /// Start the search, returning the best move found for the side to move.
    ///
    /// Every root move is searched in turn, keeping the first one with the best score for the side to move.
    /// If the budget runs out, the root stops trying new moves and returns the best one fully searched so far.
    pub fn start(mut self) -> SearchResult<G::Move> {
        let depth = self.config.max_depth.clamp(1, MAX_DEPTH);
        let maximizing = self.game.maximizing();

        debug!(
            signature = format_args!("{:016x}", self.game.signature()),
            depth,
            timeout = ?self.config.timeout,
            maximizing,
            "starting search"
        );

        let mut result = SearchResult {
            nodes: 0,
            bestmove: None,
            score: Score::DRAW,
            depth,
            timed_out: false,
            tt_hits: 0,
        };

        let moves = self.game.generate_moves();

        // A finished game has nothing to choose from
        if let Some(outcome) = self.game.outcome(&moves) {
            result.score = outcome.score(0);
            debug!(?outcome, "game is already over");
            return result;
        }

        let mut bounds = SearchBounds::default();

        for mv in self.picker(moves) {
            // Keep at least one move, so there is always something to play
            if result.bestmove.is_some() && self.should_stop() {
                break;
            }

            let undo = self.game.make(mv);
            let score = self.minimax(depth - 1, 1, bounds);
            self.game.unmake(mv, undo);

            // A move whose search was cut short can't be trusted over one that was searched fully
            if self.stopped && result.bestmove.is_some() {
                break;
            }

            trace!(%mv, %score, "searched root move");

            let improves = match result.bestmove {
                None => true,
                Some(_) if maximizing => score > result.score,
                Some(_) => score < result.score,
            };

            if improves {
                result.bestmove = Some(mv);
                result.score = score;
            }

            if self.config.pruning {
                if maximizing {
                    bounds.alpha = bounds.alpha.max(score);
                } else {
                    bounds.beta = bounds.beta.min(score);
                }
            }
        }

        result.nodes = self.nodes;
        result.tt_hits = self.tt_hits;
        result.timed_out = self.stopped;

        debug!(
            bestmove = ?result.bestmove,
            score = %result.score,
            nodes = result.nodes,
            tt_hits = result.tt_hits,
            elapsed = ?self.config.starttime.elapsed(),
            timed_out = result.timed_out,
            "search finished"
        );

        result
    }

    /// Primary location of search logic.
    ///
    /// Uses the [minimax](https://www.chessprogramming.org/Minimax) algorithm, with
    /// [alpha-beta pruning](https://www.chessprogramming.org/Alpha-Beta) if enabled.
    /// Scores are fail-soft: a node that is cut off returns the bound that caused the cutoff.
    fn minimax(&mut self, depth: u8, ply: i32, mut bounds: SearchBounds) -> Score {
        self.nodes += 1;

        // Out of budget; the best we can do is a guess
        if self.should_stop() {
            return self.game.evaluate();
        }

        let moves = self.game.generate_moves();

        // Finished games have exact scores, no matter the remaining depth
        if let Some(outcome) = self.game.outcome(&moves) {
            return outcome.score(ply);
        }

        if depth == 0 {
            return self.game.evaluate();
        }

        let original_bounds = bounds;
        let key = self.game.signature();

        // Only entries searched at least as deep as this node are trustworthy
        if let Some(entry) = self.ttable.as_ref().and_then(|tt| tt.get(key)) {
            if entry.depth >= depth {
                if let Some(score) = entry.try_score(bounds, ply) {
                    self.tt_hits += 1;
                    return score;
                }
            }
        }

        let maximizing = self.game.maximizing();
        let mut best = if maximizing { -Score::INF } else { Score::INF };

        for mv in self.picker(moves) {
            let undo = self.game.make(mv);
            let score = self.minimax(depth - 1, ply + 1, bounds);
            self.game.unmake(mv, undo);

            if maximizing {
                best = best.max(score);
            } else {
                best = best.min(score);
            }

            if self.stopped {
                break;
            }

            if self.config.pruning {
                if maximizing {
                    bounds.alpha = bounds.alpha.max(score);
                } else {
                    bounds.beta = bounds.beta.min(score);
                }

                // The opponent will never allow this position, so the remaining moves don't matter
                if bounds.beta <= bounds.alpha {
                    break;
                }
            }
        }

        // A partial search must not be remembered as a full one
        if !self.stopped {
            if let Some(tt) = self.ttable.as_mut() {
                tt.store(TTableEntry::new(key, best, original_bounds, depth, ply));
            }
        }

        best
    }

    /// Returns `true` once the time or node budget has run out, and remembers that it has.
    #[inline(always)]
    fn should_stop(&mut self) -> bool {
        if !self.stopped
            && (self.nodes >= self.config.max_nodes
                || self.config.starttime.elapsed() >= self.config.timeout)
        {
            info!(
                nodes = self.nodes,
                elapsed = ?self.config.starttime.elapsed(),
                "search budget exhausted"
            );
            self.stopped = true;
        }

        self.stopped
    }

    /// Orders `moves` if configured to, otherwise keeps them in generation order.
    #[inline(always)]
    fn picker(&self, moves: ArrayVec<G::Move, MAX_NUM_MOVES>) -> MovePicker<G::Move> {
        if self.config.ordering {
            MovePicker::new(moves, |mv| self.game.order(mv))
        } else {
            MovePicker::unordered(moves)
        }
    }
}

/// Searches `game` up to `depth` plies deep for at most `time_ms` milliseconds, returning the move to play.
///
/// The side to search for is whoever is to move in `game`. A chess [`Game`] carries it in its FEN.
/// A [`TicTacToe`](crate::TicTacToe) board infers it from the marks, and when both sides have
/// the same number of marks the text form can name either one, as in `"X../.../..O o"`.
/// Returns `None` only if there are no legal moves.
///
/// # Example
/// ```
/// # use arbiter::{best_move, Game};
/// let mut game = Game::default();
/// assert!(best_move(&mut game, 1, 1_000).is_some());
/// assert_eq!(game, Game::default());
/// ```
pub fn best_move<G: Searchable>(game: &mut G, depth: u8, time_ms: u64) -> Option<G::Move> {
    Search::new(game, SearchConfig::with_limits(depth, time_ms))
        .start()
        .bestmove
}
