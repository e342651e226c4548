//! Board representation and placement legality

use crate::catalog::BlockColor;
use crate::piece::Piece;
use serde::{Deserialize, Serialize};

/// Board dimensions (the board is square)
pub const BOARD_SIZE: usize = 9;

/// Board as persisted: a grid of nullable color labels, indexed `[y][x]`
pub type Grid = [[Option<BlockColor>; BOARD_SIZE]; BOARD_SIZE];

/// A cell on the board - either empty or filled with a color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(BlockColor),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }
}

/// Rows and columns that are completely filled
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompleteLines {
    pub rows: Vec<usize>,
    pub cols: Vec<usize>,
}

impl CompleteLines {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.cols.is_empty()
    }

    /// Lines counted individually; a crossing row and column count twice
    pub fn count(&self) -> usize {
        self.rows.len() + self.cols.len()
    }
}

/// The 9x9 playing field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Grid", into = "Grid")]
pub struct Board {
    /// Grid stored as [y][x], y = 0 is the top row
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Get the cell at (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        let (x, y) = Self::index(x, y)?;
        Some(self.cells[y][x])
    }

    /// Set a cell at (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some((x, y)) => {
                self.cells[y][x] = cell;
                true
            }
            None => false,
        }
    }

    fn index(x: i32, y: i32) -> Option<(usize, usize)> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < BOARD_SIZE && y < BOARD_SIZE).then_some((x, y))
    }

    /// Check if a position is within bounds and empty
    pub fn is_free(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some_and(|cell| cell.is_empty())
    }

    /// Whether every filled cell of `piece` lands on an in-bounds empty
    /// cell when the top-left of its mask sits at `(x, y)`
    pub fn can_place(&self, piece: &Piece, x: i32, y: i32) -> bool {
        piece
            .positions(x, y)
            .all(|pos| pos.is_some_and(|(px, py)| self.is_free(px, py)))
    }

    /// Whether `piece` fits anywhere on the board
    pub fn has_room_for(&self, piece: &Piece) -> bool {
        self.legal_origins(piece).next().is_some()
    }

    /// Every origin at which `piece` can be placed, row by row
    pub fn legal_origins<'a>(&'a self, piece: &'a Piece) -> impl Iterator<Item = (i32, i32)> + 'a {
        let size = BOARD_SIZE as i32;
        (0..size)
            .flat_map(move |y| (0..size).map(move |x| (x, y)))
            .filter(move |&(x, y)| self.can_place(piece, x, y))
    }

    /// Write `piece` onto the board and return the number of cells written.
    /// The caller must have checked [`Board::can_place`].
    pub fn place(&mut self, piece: &Piece, x: i32, y: i32) -> usize {
        debug_assert!(self.can_place(piece, x, y), "illegal placement at ({x}, {y})");
        let mut written = 0;
        for (px, py) in piece.positions(x, y).flatten() {
            if self.set(px, py, Cell::Filled(piece.color)) {
                written += 1;
            }
        }
        written
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.cells[y].iter().all(|cell| cell.is_filled())
    }

    /// Check if a column is completely filled
    pub fn is_col_full(&self, x: usize) -> bool {
        self.cells.iter().all(|row| row[x].is_filled())
    }

    /// Scan for complete rows and columns
    pub fn complete_lines(&self) -> CompleteLines {
        CompleteLines {
            rows: (0..BOARD_SIZE).filter(|&y| self.is_row_full(y)).collect(),
            cols: (0..BOARD_SIZE).filter(|&x| self.is_col_full(x)).collect(),
        }
    }

    /// Empty every cell on the given lines and return how many cells
    /// changed. A cell on a crossing row and column is cleared once.
    pub fn clear_lines(&mut self, lines: &CompleteLines) -> usize {
        let mut cleared = 0;
        for y in 0..BOARD_SIZE {
            for x in 0..BOARD_SIZE {
                let on_line = lines.rows.contains(&y) || lines.cols.contains(&x);
                if on_line && self.cells[y][x].is_filled() {
                    self.cells[y][x] = Cell::Empty;
                    cleared += 1;
                }
            }
        }
        cleared
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| cell.is_filled())
            .count()
    }

    /// Check if the board is completely empty
    pub fn is_empty(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|cell| cell.is_empty()))
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell; BOARD_SIZE]> {
        self.cells.iter()
    }
}

impl From<Grid> for Board {
    fn from(grid: Grid) -> Self {
        let mut board = Board::new();
        for (y, row) in grid.iter().enumerate() {
            for (x, color) in row.iter().enumerate() {
                board.cells[y][x] = match color {
                    Some(color) => Cell::Filled(*color),
                    None => Cell::Empty,
                };
            }
        }
        board
    }
}

impl From<Board> for Grid {
    fn from(board: Board) -> Self {
        board.cells.map(|row| {
            row.map(|cell| match cell {
                Cell::Empty => None,
                Cell::Filled(color) => Some(color),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ShapeId;
    use crate::piece::PieceId;

    fn piece(shape: ShapeId) -> Piece {
        Piece::new(PieceId(0), shape, BlockColor::Blue)
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert!(board.is_empty());
        assert_eq!(board.filled_count(), 0);
    }

    #[test]
    fn test_set_and_get() {
        let mut board = Board::new();
        assert!(board.set(5, 3, Cell::Filled(BlockColor::Red)));
        assert_eq!(board.get(5, 3), Some(Cell::Filled(BlockColor::Red)));
        assert_eq!(board.get(3, 5), Some(Cell::Empty));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut board = Board::new();
        assert_eq!(board.get(-1, 0), None);
        assert_eq!(board.get(0, -1), None);
        assert_eq!(board.get(BOARD_SIZE as i32, 0), None);
        assert_eq!(board.get(0, BOARD_SIZE as i32), None);
        assert!(!board.set(9, 9, Cell::Filled(BlockColor::Gold)));
    }

    #[test]
    fn test_can_place_rejects_out_of_range() {
        let board = Board::new();
        let line = piece(ShapeId::Line3h);
        assert!(board.can_place(&line, 6, 0));
        assert!(!board.can_place(&line, 7, 0));
        assert!(!board.can_place(&line, -1, 0));
        assert!(!board.can_place(&piece(ShapeId::Line2v), 0, 8));
    }

    #[test]
    fn test_can_place_rejects_origin_near_i32_limits() {
        let board = Board::new();
        let corner = piece(ShapeId::LMediumFlipped);
        assert!(!board.can_place(&corner, i32::MAX, 0));
        assert!(!board.can_place(&corner, 0, i32::MAX));
        assert!(!board.can_place(&corner, i32::MIN, i32::MIN));
        assert!(!board.can_place(&piece(ShapeId::Line5v), 0, i32::MAX - 2));
    }

    #[test]
    fn test_can_place_rejects_occupied() {
        let mut board = Board::new();
        board.set(1, 1, Cell::Filled(BlockColor::Red));
        let square = piece(ShapeId::Square);
        assert!(!board.can_place(&square, 0, 0));
        assert!(!board.can_place(&square, 1, 1));
        assert!(board.can_place(&square, 2, 2));
    }

    #[test]
    fn test_empty_mask_cells_do_not_collide() {
        let mut board = Board::new();
        // l_small is #. / ## ; (1, 0) is the empty corner
        board.set(1, 0, Cell::Filled(BlockColor::Red));
        assert!(board.can_place(&piece(ShapeId::LSmall), 0, 0));
    }

    #[test]
    fn test_place_writes_color_and_counts_cells() {
        let mut board = Board::new();
        let plus = Piece::new(PieceId(3), ShapeId::PlusSmall, BlockColor::Purple);
        assert_eq!(board.place(&plus, 2, 2), 5);
        assert_eq!(board.get(3, 3), Some(Cell::Filled(BlockColor::Purple)));
        assert_eq!(board.get(2, 2), Some(Cell::Empty));
        assert_eq!(board.filled_count(), 5);
    }

    #[test]
    fn test_eight_of_nine_is_not_complete() {
        let mut board = Board::new();
        for x in 0..8 {
            board.set(x, 0, Cell::Filled(BlockColor::Green));
        }
        assert!(board.complete_lines().is_empty());
        board.set(8, 0, Cell::Filled(BlockColor::Green));
        assert_eq!(board.complete_lines().rows, vec![0]);
    }

    #[test]
    fn test_clear_crossing_lines_counts_shared_cell_once() {
        let mut board = Board::new();
        for i in 0..BOARD_SIZE as i32 {
            board.set(i, 4, Cell::Filled(BlockColor::Red));
            board.set(4, i, Cell::Filled(BlockColor::Red));
        }
        let lines = board.complete_lines();
        assert_eq!(lines.count(), 2);
        assert_eq!(board.clear_lines(&lines), 17);
        assert!(board.is_empty());
    }

    #[test]
    fn test_legal_origins() {
        let board = Board::new();
        let big = piece(ShapeId::Square3x3);
        assert_eq!(board.legal_origins(&big).count(), 49);
        assert!(board.has_room_for(&big));
    }

    #[test]
    fn test_grid_round_trip_keeps_colors() {
        let mut board = Board::new();
        board.set(0, 8, Cell::Filled(BlockColor::LightBlue));
        let grid: Grid = board.clone().into();
        assert_eq!(grid[8][0], Some(BlockColor::LightBlue));
        assert_eq!(Board::from(grid), board);
    }
}
