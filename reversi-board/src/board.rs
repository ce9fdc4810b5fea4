//! Grid-based implementation of Reversi board dynamics.
//!
//! Cells are stored in row-major order: `(x, y)` lives at `y * dimension + x`,
//! with `x` the column and `y` the row, both counted from the upper-left.

use crate::{utils, Cell, InvalidMove, Move, ParseBoardError, Player, EDGE_LENGTH, MAX_EDGE_LENGTH};
use itertools::iproduct;
use std::fmt;

/// Unit steps for the eight scanning directions (cardinal and diagonal).
const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// A complete Reversi position, without the side to move.
///
/// Boards have value semantics: [`Clone`] produces an independent grid, and
/// cells change only through [`Board::apply`].
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Board {
    dimension: usize,
    cells: Vec<Cell>,
}

impl Default for Board {
    /// Gets the standard 8x8 starting board.
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// The standard 8x8 starting board.
    pub fn new() -> Self {
        Self::with_dimension(EDGE_LENGTH)
    }

    /// A starting board of the given edge length: four discs crossed in the centre.
    ///
    /// # Panics
    /// If `dimension` is not in `2..=26`.
    pub fn with_dimension(dimension: usize) -> Self {
        assert!(
            dimension >= 2,
            "a starting board needs an edge of at least 2, got {}",
            dimension
        );

        let mut board = Self::empty(dimension);
        let mid = dimension / 2;
        board.set(mid - 1, mid, Cell::Black);
        board.set(mid, mid - 1, Cell::Black);
        board.set(mid - 1, mid - 1, Cell::White);
        board.set(mid, mid, Cell::White);
        board
    }

    /// A board with no discs on it.
    ///
    /// # Panics
    /// If `dimension` is not in `1..=26`.
    pub fn empty(dimension: usize) -> Self {
        assert!(
            (1..=MAX_EDGE_LENGTH).contains(&dimension),
            "board edge must be in 1..={}, got {}",
            MAX_EDGE_LENGTH,
            dimension
        );

        Self {
            dimension,
            cells: vec![Cell::Empty; dimension * dimension],
        }
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Get the contents of a square.
    ///
    /// # Panics
    /// If `(x, y)` is off the board.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Cell {
        assert!(x < self.dimension && y < self.dimension);
        self.cells[self.index(x, y)]
    }

    /// Iterate over all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    /// Returns whether `player` may place a disc at `(x, y)`.
    /// Off-board coordinates are never legal.
    pub fn is_legal(&self, x: usize, y: usize, player: Player) -> bool {
        if x >= self.dimension || y >= self.dimension || self.get(x, y) != Cell::Empty {
            return false;
        }

        DIRECTIONS
            .iter()
            .any(|&direction| self.run_length(x, y, direction, player) > 0)
    }

    /// Get all legal moves for `player`, scanning rows top to bottom and each
    /// row left to right. The order is significant: it is the order in which a
    /// search expands children.
    pub fn legal_moves(&self, player: Player) -> Vec<Move> {
        iproduct!(0..self.dimension, 0..self.dimension)
            .filter(|&(y, x)| self.is_legal(x, y, player))
            .map(|(y, x)| Move::new(x, y, player))
            .collect()
    }

    /// Returns whether `player` has at least one legal move.
    pub fn has_legal_move(&self, player: Player) -> bool {
        iproduct!(0..self.dimension, 0..self.dimension).any(|(y, x)| self.is_legal(x, y, player))
    }

    /// Place a disc and flip every opponent run it brackets.
    /// Returns the number of flipped discs; on error the board is unchanged.
    pub fn apply(&mut self, mv: Move) -> Result<usize, InvalidMove> {
        if !self.is_legal(mv.x(), mv.y(), mv.player()) {
            return Err(mv.into());
        }
        Ok(self.put(mv))
    }

    /// Copy this board and apply `mv` to the copy.
    pub fn child(&self, mv: Move) -> Result<Self, InvalidMove> {
        let mut child = self.clone();
        child.apply(mv)?;
        Ok(child)
    }

    /// Returns whether the game is over: the board is full, one colour has no
    /// discs left, or neither player can move.
    pub fn is_terminal(&self) -> bool {
        let (black, white) = self.score();
        black == 0
            || white == 0
            || self.count_empty() == 0
            || !(self.has_legal_move(Player::Black) || self.has_legal_move(Player::White))
    }

    /// Count discs as `(black, white)`.
    pub fn score(&self) -> (usize, usize) {
        (self.count(Player::Black), self.count(Player::White))
    }

    /// Count the discs belonging to `player`.
    pub fn count(&self, player: Player) -> usize {
        let cell = Cell::from(player);
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|&&c| c == Cell::Empty).count()
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.dimension + x
    }

    #[inline]
    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        let index = self.index(x, y);
        self.cells[index] = cell;
    }

    /// Cell at signed coordinates, or `None` past the edge.
    #[inline]
    fn cell_at(&self, x: isize, y: isize) -> Option<Cell> {
        let d = self.dimension as isize;
        if x < 0 || y < 0 || x >= d || y >= d {
            None
        } else {
            Some(self.cells[self.index(x as usize, y as usize)])
        }
    }

    /// Length of the opponent run starting next to `(x, y)` in `direction`,
    /// if it is closed by one of `player`'s discs; zero otherwise.
    fn run_length(&self, x: usize, y: usize, (dx, dy): (isize, isize), player: Player) -> usize {
        let own = Cell::from(player);
        let opponent = Cell::from(!player);

        let mut length = 0;
        let (mut cx, mut cy) = (x as isize + dx, y as isize + dy);
        while let Some(cell) = self.cell_at(cx, cy) {
            if cell == opponent {
                length += 1;
                cx += dx;
                cy += dy;
            } else if cell == own {
                return length;
            } else {
                return 0;
            }
        }
        0
    }

    /// Place a disc and flip without checking legality.
    fn put(&mut self, mv: Move) -> usize {
        let (x, y, player) = (mv.x(), mv.y(), mv.player());
        let own = Cell::from(player);

        let mut flipped = 0;
        for &(dx, dy) in DIRECTIONS.iter() {
            let length = self.run_length(x, y, (dx, dy), player);
            for step in 1..=length as isize {
                let fx = (x as isize + dx * step) as usize;
                let fy = (y as isize + dy * step) as usize;
                self.set(fx, fy, own);
            }
            flipped += length;
        }

        self.set(x, y, own);
        flipped
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        utils::format_grid(self.dimension, self.cells().map(Cell::to_char), f)
    }
}

/// Build a [`Board`] from its cells in row-major order (`X` black, `O` white,
/// `.` empty). Whitespace is ignored; the edge length is inferred.
impl std::str::FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| Cell::from_char(c).ok_or(ParseBoardError::InvalidCharacter { found: c }))
            .collect::<Result<Vec<Cell>, _>>()?;

        if cells.is_empty() {
            return Err(ParseBoardError::Empty);
        }

        let dimension = (1..=cells.len())
            .find(|d| d * d >= cells.len())
            .unwrap_or(cells.len());
        if dimension * dimension != cells.len() {
            return Err(ParseBoardError::NotSquare { cells: cells.len() });
        }
        if dimension > MAX_EDGE_LENGTH {
            return Err(ParseBoardError::TooLarge { dimension });
        }

        Ok(Self { dimension, cells })
    }
}
