//! Game board representation and collision detection

use crate::piece::Piece;
use crate::tetromino::PieceKind;

/// Standard Tetris board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

/// A cell on the board - either empty or filled by a locked piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(PieceKind),
}

impl Cell {
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }

    /// 0 for an empty cell, the kind's color tag otherwise
    pub fn tag(&self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Filled(kind) => kind.color_tag(),
        }
    }
}

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Grid stored as [y][x], y = 0 is the top row and grows downward
    cells: [[Cell; BOARD_WIDTH]; BOARD_HEIGHT],
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
            cells: [[Cell::Empty; BOARD_WIDTH]; BOARD_HEIGHT],
        }
    }

    fn in_bounds(x: i32, y: i32) -> bool {
        (0..BOARD_WIDTH as i32).contains(&x) && (0..BOARD_HEIGHT as i32).contains(&y)
    }

    /// Get the cell at (x, y)
    /// Returns None if out of bounds
    #[allow(dead_code)]
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        if !Self::in_bounds(x, y) {
            return None;
        }
        Some(self.cells[y as usize][x as usize])
    }

    /// Set the cell at (x, y). Callers must stay inside the grid.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        debug_assert!(Self::in_bounds(x, y), "board write out of bounds at ({x}, {y})");
        if Self::in_bounds(x, y) {
            self.cells[y as usize][x as usize] = cell;
        }
    }

    /// Whether a piece cell may not occupy (x, y).
    ///
    /// The side walls and the floor block. Rows above the top edge never
    /// block, so a freshly spawned piece may hang partly off-screen.
    pub fn is_blocked(&self, x: i32, y: i32) -> bool {
        if x < 0 || x >= BOARD_WIDTH as i32 {
            return true;
        }
        if y >= BOARD_HEIGHT as i32 {
            return true;
        }
        if y < 0 {
            return false;
        }
        self.cells[y as usize][x as usize].is_filled()
    }

    /// Lock a piece onto the board. Cells above the top edge are dropped.
    pub fn lock(&mut self, piece: &Piece) {
        for (x, y) in piece.cells() {
            if y < 0 {
                continue;
            }
            self.set(x, y, Cell::Filled(piece.kind));
        }
    }

    /// Remove every full row, shifting the rows above it down, and return
    /// the number of rows removed
    pub fn clear_full_rows(&mut self) -> usize {
        let mut write_row = BOARD_HEIGHT;

        for read_row in (0..BOARD_HEIGHT).rev() {
            if !self.is_row_full(read_row) {
                write_row -= 1;
                if write_row != read_row {
                    self.cells[write_row] = self.cells[read_row];
                }
            }
        }

        // write_row now equals the number of removed rows
        for row in &mut self.cells[..write_row] {
            *row = [Cell::Empty; BOARD_WIDTH];
        }

        write_row
    }

    /// Check if a row is completely filled
    fn is_row_full(&self, y: usize) -> bool {
        self.cells[y].iter().all(|cell| cell.is_filled())
    }

    /// Check if the board is completely empty
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|cell| cell.is_empty()))
    }

    /// Rows from top to bottom
    #[allow(dead_code)]
    pub fn rows(&self) -> &[[Cell; BOARD_WIDTH]; BOARD_HEIGHT] {
        &self.cells
    }

    /// Color tags of every cell, 0 where empty
    pub fn tags(&self) -> [[u8; BOARD_WIDTH]; BOARD_HEIGHT] {
        self.cells.map(|row| row.map(|cell| cell.tag()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_row(board: &mut Board, y: i32, kind: PieceKind) {
        for x in 0..BOARD_WIDTH as i32 {
            board.set(x, y, Cell::Filled(kind));
        }
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert!(board.is_empty());
        assert_eq!(board.tags(), [[0; BOARD_WIDTH]; BOARD_HEIGHT]);
    }

    #[test]
    fn test_set_and_get() {
        let mut board = Board::new();
        board.set(5, 5, Cell::Filled(PieceKind::Z));
        assert_eq!(board.get(5, 5), Some(Cell::Filled(PieceKind::Z)));
        assert_eq!(board.tags()[5][5], PieceKind::Z.color_tag());
    }

    #[test]
    fn test_out_of_bounds() {
        let board = Board::new();
        assert_eq!(board.get(-1, 0), None);
        assert_eq!(board.get(0, -1), None);
        assert_eq!(board.get(BOARD_WIDTH as i32, 0), None);
        assert_eq!(board.get(0, BOARD_HEIGHT as i32), None);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "out of bounds")]
    fn test_out_of_bounds_write_panics() {
        let mut board = Board::new();
        board.set(BOARD_WIDTH as i32, 0, Cell::Filled(PieceKind::I));
    }

    #[test]
    fn test_is_blocked() {
        let mut board = Board::new();
        board.set(3, 10, Cell::Filled(PieceKind::T));

        assert!(board.is_blocked(-1, 5));
        assert!(board.is_blocked(BOARD_WIDTH as i32, 5));
        assert!(board.is_blocked(0, BOARD_HEIGHT as i32));
        assert!(board.is_blocked(3, 10));
        assert!(!board.is_blocked(4, 10));
        assert!(!board.is_blocked(0, BOARD_HEIGHT as i32 - 1));
        // above the top edge is open, but the walls still apply there
        assert!(!board.is_blocked(3, -3));
        assert!(board.is_blocked(-1, -3));
    }

    #[test]
    fn test_lock_skips_cells_above_top() {
        let mut board = Board::new();
        // vertical I with its top two cells above row 0
        let piece = Piece {
            kind: PieceKind::I,
            rotation: 1,
            x: 0,
            y: -2,
        };
        board.lock(&piece);

        assert_eq!(board.get(2, 0), Some(Cell::Filled(PieceKind::I)));
        assert_eq!(board.get(2, 1), Some(Cell::Filled(PieceKind::I)));
        let filled = board
            .rows()
            .iter()
            .flatten()
            .filter(|cell| cell.is_filled())
            .count();
        assert_eq!(filled, 2);
    }

    #[test]
    fn test_clear_on_empty_board() {
        let mut board = Board::new();
        assert_eq!(board.clear_full_rows(), 0);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_clear_without_full_rows_changes_nothing() {
        let mut board = Board::new();
        for x in 0..BOARD_WIDTH as i32 - 1 {
            board.set(x, 19, Cell::Filled(PieceKind::J));
        }
        let before = board.clone();
        assert_eq!(board.clear_full_rows(), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn test_clear_bottom_row() {
        let mut board = Board::new();
        fill_row(&mut board, 19, PieceKind::I);
        board.set(0, 18, Cell::Filled(PieceKind::Z));

        assert_eq!(board.clear_full_rows(), 1);
        // The block from row 18 drops onto row 19
        assert_eq!(board.get(0, 19), Some(Cell::Filled(PieceKind::Z)));
        assert!(board.get(0, 18).unwrap().is_empty());
    }

    #[test]
    fn test_clear_separated_rows_keeps_partial_rows_in_order() {
        let mut board = Board::new();
        fill_row(&mut board, 2, PieceKind::I);
        fill_row(&mut board, 5, PieceKind::I);
        // partial rows: above both, between them, below both
        board.set(0, 1, Cell::Filled(PieceKind::T));
        board.set(1, 3, Cell::Filled(PieceKind::L));
        board.set(2, 4, Cell::Filled(PieceKind::J));
        board.set(3, 6, Cell::Filled(PieceKind::S));
        board.set(9, 19, Cell::Filled(PieceKind::Z));

        let before = board.clone();
        assert_eq!(board.clear_full_rows(), 2);

        // two cleared rows above row 1 -> row 3
        assert_eq!(board.rows()[3], before.rows()[1]);
        // one cleared row above rows 3 and 4
        assert_eq!(board.rows()[4], before.rows()[3]);
        assert_eq!(board.rows()[5], before.rows()[4]);
        // rows below both cleared rows stay put
        for y in 6..BOARD_HEIGHT {
            assert_eq!(board.rows()[y], before.rows()[y]);
        }
        // fresh empty rows at the top
        assert_eq!(board.rows()[0], [Cell::Empty; BOARD_WIDTH]);
        assert_eq!(board.rows()[1], [Cell::Empty; BOARD_WIDTH]);
        assert_eq!(board.rows()[2], before.rows()[0]);
    }

    #[test]
    fn test_clear_four_rows() {
        let mut board = Board::new();
        for y in 16..20 {
            fill_row(&mut board, y, PieceKind::I);
        }
        board.set(4, 15, Cell::Filled(PieceKind::O));

        assert_eq!(board.clear_full_rows(), 4);
        assert_eq!(board.get(4, 19), Some(Cell::Filled(PieceKind::O)));
        let filled = board
            .rows()
            .iter()
            .flatten()
            .filter(|cell| cell.is_filled())
            .count();
        assert_eq!(filled, 1);
    }
}
