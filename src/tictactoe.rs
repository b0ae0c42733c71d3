/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use arrayvec::ArrayVec;

use crate::{MoveError, Outcome, PositionError, Score, Searchable, MAX_NUM_MOVES};

/// Every row, column and diagonal, as indices into the board.
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// A player's mark. `X` moves first and maximizes the score.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    #[inline(always)]
    pub const fn opponent(&self) -> Self {
        match self {
            Self::X => Self::O,
            Self::O => Self::X,
        }
    }

    #[inline(always)]
    pub const fn char(&self) -> char {
        match self {
            Self::X => 'X',
            Self::O => 'O',
        }
    }

    /// Case-insensitive.
    #[inline(always)]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'X' | 'x' => Some(Self::X),
            'O' | 'o' => Some(Self::O),
            _ => None,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

/// A cell on the board, addressed by `row` and `col`, both in `0..3`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Cell {
    row: u8,
    col: u8,
}

impl Cell {
    /// Returns `None` if either coordinate is off the board.
    #[inline(always)]
    pub const fn new(row: usize, col: usize) -> Option<Self> {
        if row < 3 && col < 3 {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    #[inline(always)]
    const fn from_index(index: usize) -> Self {
        Self {
            row: (index / 3) as u8,
            col: (index % 3) as u8,
        }
    }

    #[inline(always)]
    pub const fn row(&self) -> usize {
        self.row as usize
    }

    #[inline(always)]
    pub const fn col(&self) -> usize {
        self.col as usize
    }

    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.row() * 3 + self.col()
    }
}

impl fmt::Display for Cell {
    /// Formats as `row col`, the same way moves are typed in.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.row, self.col)
    }
}

/// Whether a tic-tac-toe game is still being played, and if not, how it ended.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum TicTacToeStatus {
    InProgress,
    Win(Mark),
    Draw,
}

impl TicTacToeStatus {
    #[inline(always)]
    pub const fn is_over(&self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

impl fmt::Display for TicTacToeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InProgress => write!(f, "in progress"),
            Self::Win(mark) => write!(f, "{mark} wins"),
            Self::Draw => write!(f, "draw"),
        }
    }
}

/// A tic-tac-toe board and the player to move.
///
/// At most one player ever has three in a row: [`TicTacToe::from_rows`] rejects boards where both do,
/// and no moves are generated once someone has won.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TicTacToe {
    cells: [Option<Mark>; 9],
    to_move: Mark,
}

impl TicTacToe {
    /// An empty board with `X` to move.
    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            cells: [None; 9],
            to_move: Mark::X,
        }
    }

    /// Builds a board from its rows, working out whose turn it is from the number of marks.
    ///
    /// `X` moves first, so `O` is to move only when `X` has one more mark.
    ///
    /// # Example
    /// ```
    /// # use arbiter::{Mark, TicTacToe};
    /// let (x, o) = (Some(Mark::X), Some(Mark::O));
    /// let board = TicTacToe::from_rows([[x, x, None], [o, o, None], [None; 3]]).unwrap();
    /// assert_eq!(board.to_move(), Mark::X);
    /// ```
    pub fn from_rows(rows: [[Option<Mark>; 3]; 3]) -> Result<Self, PositionError> {
        let mut cells = [None; 9];
        for (row, marks) in rows.iter().enumerate() {
            cells[row * 3..row * 3 + 3].copy_from_slice(marks);
        }

        let count = |mark| cells.iter().filter(|&&c| c == Some(mark)).count();
        let to_move = match (count(Mark::X), count(Mark::O)) {
            (x, o) if x == o => Mark::X,
            (x, o) if x == o + 1 => Mark::O,
            _ => {
                let text = Self { cells, to_move: Mark::X }.placement();
                return Err(PositionError::TicTacToe(
                    text,
                    "X moves first, so X must have as many marks as O or one more",
                ));
            }
        };

        Self::validated(cells, to_move)
    }

    /// Ensures at most one player has three in a row.
    fn validated(cells: [Option<Mark>; 9], to_move: Mark) -> Result<Self, PositionError> {
        let board = Self { cells, to_move };
        let has_line = |mark| {
            LINES
                .iter()
                .any(|line| line.iter().all(|&i| cells[i] == Some(mark)))
        };

        if has_line(Mark::X) && has_line(Mark::O) {
            return Err(PositionError::TicTacToe(
                board.to_string(),
                "both players have three in a row",
            ));
        }

        Ok(board)
    }

    #[inline(always)]
    pub const fn to_move(&self) -> Mark {
        self.to_move
    }

    #[inline(always)]
    pub const fn get(&self, cell: Cell) -> Option<Mark> {
        self.cells[cell.index()]
    }

    /// The player with three in a row, if any.
    pub fn winner(&self) -> Option<Mark> {
        LINES.iter().find_map(|&[a, b, c]| {
            let mark = self.cells[a]?;
            (self.cells[b] == Some(mark) && self.cells[c] == Some(mark)).then_some(mark)
        })
    }

    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Every empty cell, in row-major order, or nothing if the game is over.
    pub fn moves(&self) -> ArrayVec<Cell, MAX_NUM_MOVES> {
        if self.winner().is_some() {
            return ArrayVec::new();
        }

        (0..self.cells.len())
            .filter(|&i| self.cells[i].is_none())
            .map(Cell::from_index)
            .collect()
    }

    /// Determines the status of the game.
    ///
    /// # Example
    /// ```
    /// # use arbiter::{Mark, TicTacToe, TicTacToeStatus};
    /// let board: TicTacToe = "XXX/OO./...".parse().unwrap();
    /// assert_eq!(board.status(), TicTacToeStatus::Win(Mark::X));
    /// ```
    pub fn status(&self) -> TicTacToeStatus {
        if let Some(mark) = self.winner() {
            TicTacToeStatus::Win(mark)
        } else if self.is_full() {
            TicTacToeStatus::Draw
        } else {
            TicTacToeStatus::InProgress
        }
    }

    /// Places the side to move's mark on `cell` and passes the turn.
    ///
    /// Does nothing and returns `false` if the cell is occupied.
    /// Whether the game is already over is not checked.
    #[inline(always)]
    pub fn apply(&mut self, cell: Cell) -> bool {
        let slot = &mut self.cells[cell.index()];
        if slot.is_some() {
            return false;
        }

        *slot = Some(self.to_move);
        self.to_move = self.to_move.opponent();
        true
    }

    /// Takes back the mark on `cell`, which must be the last one placed with [`TicTacToe::apply`].
    #[inline(always)]
    pub fn undo(&mut self, cell: Cell) {
        self.cells[cell.index()] = None;
        self.to_move = self.to_move.opponent();
    }

    /// Places the side to move's mark at `row`, `col`, leaving the board untouched if that isn't allowed.
    pub fn try_make_move(&mut self, row: usize, col: usize) -> Result<Cell, MoveError> {
        let cell = Cell::new(row, col).ok_or(MoveError::OutOfBounds(row, col))?;

        if self.status().is_over() {
            return Err(MoveError::GameOver);
        }

        if !self.apply(cell) {
            return Err(MoveError::Occupied(row, col));
        }

        Ok(cell)
    }

    /// Places the side to move's mark at `row`, `col`, returning whether it was placed.
    ///
    /// # Example
    /// ```
    /// # use arbiter::{Mark, TicTacToe};
    /// let mut board = TicTacToe::new();
    /// assert!(board.make_move(1, 1));
    /// assert!(!board.make_move(1, 1));
    /// assert!(!board.make_move(3, 0));
    /// assert_eq!(board.to_move(), Mark::O);
    /// ```
    #[inline(always)]
    pub fn make_move(&mut self, row: usize, col: usize) -> bool {
        self.try_make_move(row, col).is_ok()
    }

    /// Rows separated by `/`, with `.` for empty cells.
    fn placement(&self) -> String {
        let mut text = String::with_capacity(11);
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 && i % 3 == 0 {
                text.push('/');
            }
            text.push(cell.map(|mark| mark.char()).unwrap_or('.'));
        }
        text
    }
}

impl Default for TicTacToe {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for TicTacToe {
    type Err = PositionError;

    /// Parses rows separated by `/`, using `X`, `O` and `.` (or `-`), optionally followed by the side to move.
    ///
    /// Without a side to move, it is worked out as in [`TicTacToe::from_rows`].
    /// A given side to move must be one that could actually be on move.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |reason| PositionError::TicTacToe(s.to_string(), reason);

        let mut fields = s.split_whitespace();
        let placement = fields.next().ok_or(err("board is empty"))?;
        let side = fields.next();
        if fields.next().is_some() {
            return Err(err("expected a board and an optional side to move"));
        }

        let mut rows = [[None; 3]; 3];
        let mut row_count = 0;
        for (row, text) in placement.split('/').enumerate() {
            if row >= 3 {
                return Err(err("expected 3 rows"));
            }
            if text.chars().count() != 3 {
                return Err(err("each row must have 3 cells"));
            }
            for (col, c) in text.chars().enumerate() {
                rows[row][col] = match c {
                    '.' | '-' => None,
                    c => Some(Mark::from_char(c).ok_or(err("cells must be X, O or ."))?),
                };
            }
            row_count += 1;
        }
        if row_count != 3 {
            return Err(err("expected 3 rows"));
        }

        let board = Self::from_rows(rows)?;

        match side {
            None => Ok(board),
            Some(side) => {
                let mut chars = side.chars();
                let mark = match (chars.next().and_then(Mark::from_char), chars.next()) {
                    (Some(mark), None) => mark,
                    _ => return Err(err("side to move must be X or O")),
                };

                let marks = board.cells.iter().filter(|c| c.is_some()).count();
                // With equal counts either side may start; otherwise it must be O's turn
                if mark == board.to_move || marks % 2 == 0 {
                    Self::validated(board.cells, mark)
                } else {
                    Err(err("side to move does not match the number of marks"))
                }
            }
        }
    }
}

impl fmt::Display for TicTacToe {
    /// Formats as the text accepted by [`FromStr`], such as `XX./OO./... x`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = match self.to_move {
            Mark::X => 'x',
            Mark::O => 'o',
        };
        write!(f, "{} {side}", self.placement())
    }
}

impl fmt::Debug for TicTacToe {
    /// Draws the board as a grid.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "    0   1   2")?;
        for row in 0..3 {
            write!(f, "{row} ")?;
            for col in 0..3 {
                let mark = self.cells[row * 3 + col].map(|m| m.char()).unwrap_or(' ');
                write!(f, " {mark} ")?;
                if col < 2 {
                    write!(f, "|")?;
                }
            }
            writeln!(f)?;
            if row < 2 {
                writeln!(f, "  ---+---+---")?;
            }
        }
        write!(f, "\n{} to move: {self}", self.to_move)
    }
}

impl Searchable for TicTacToe {
    type Move = Cell;

    /// Whether the mark was placed.
    type Undo = bool;

    #[inline(always)]
    fn maximizing(&self) -> bool {
        self.to_move == Mark::X
    }

    /// Base-3 encoding of the board; the side to move follows from it.
    fn signature(&self) -> u64 {
        self.cells.iter().fold(0, |sig, cell| {
            sig * 3
                + match cell {
                    None => 0,
                    Some(Mark::X) => 1,
                    Some(Mark::O) => 2,
                }
        })
    }

    #[inline(always)]
    fn generate_moves(&self) -> ArrayVec<Cell, MAX_NUM_MOVES> {
        self.moves()
    }

    fn outcome(&self, moves: &[Cell]) -> Option<Outcome> {
        match self.winner() {
            Some(Mark::X) => Some(Outcome::MaximizerWins),
            Some(Mark::O) => Some(Outcome::MinimizerWins),
            None if moves.is_empty() => Some(Outcome::Draw),
            None => None,
        }
    }

    /// Unfinished games are worth nothing to either side; only the search can tell them apart.
    #[inline(always)]
    fn evaluate(&self) -> Score {
        Score::DRAW
    }

    #[inline(always)]
    fn make(&mut self, cell: Cell) -> bool {
        self.apply(cell)
    }

    #[inline(always)]
    fn unmake(&mut self, cell: Cell, placed: bool) {
        if placed {
            self.undo(cell);
        }
    }
}
