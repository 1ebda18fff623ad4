//! Board module - manages the game grid
//!
//! The board is a `width x height` grid where each cell is empty or holds a
//! block of some piece kind. Storage is a flat row-major vector allocated once
//! at construction; the dimensions never change afterwards.
//!
//! Coordinates: (x, y) where x is the column (0 = left) and y is the row
//! (0 = top, `height - 1` = floor).

use std::fmt;

use arrayvec::ArrayVec;

use crate::types::{
    check_board_size, Cell, ConfigError, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, MAX_BOARD_HEIGHT,
};

/// Row indices returned by full-row scans, ordered from the floor upwards.
pub type RowList = ArrayVec<usize, MAX_BOARD_HEIGHT>;

/// The game board
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    width: u8,
    height: u8,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board with the given dimensions.
    pub fn new(width: u8, height: u8) -> Result<Self, ConfigError> {
        check_board_size(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![Cell::Empty; width as usize * height as usize],
        })
    }

    /// Create an empty 10x20 board.
    pub fn standard() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            cells: vec![Cell::Empty; BOARD_WIDTH as usize * BOARD_HEIGHT as usize],
        }
    }

    /// Build a board from text rows, top row first.
    ///
    /// `.` and space are empty, piece letters are blocks of that kind and `#`
    /// is an `I` block. Every row must have the same length.
    ///
    /// ```
    /// use stacker_core::Board;
    /// use stacker_core::types::{Cell, PieceKind};
    ///
    /// let board = Board::from_rows(&["....", "#TT."]).unwrap();
    /// assert_eq!(board.height(), 2);
    /// assert_eq!(board.get(1, 1), Some(Cell::Block(PieceKind::T)));
    /// ```
    pub fn from_rows(rows: &[&str]) -> Result<Self, ConfigError> {
        let width = rows.first().map_or(0, |r| r.chars().count());
        let height = rows.len();
        let fit = |n: usize| u8::try_from(n).unwrap_or(0);
        let mut board = Self::new(fit(width), fit(height))?;

        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(ConfigError::BoardSize {
                    width: fit(row.chars().count()),
                    height: board.height,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                let cell = match ch {
                    '#' => Cell::Block(PieceKind::I),
                    other => PieceKind::from_str(other.encode_utf8(&mut [0; 4]))
                        .map_or(Cell::Empty, Cell::Block),
                };
                board.cells[y * width + x] = cell;
            }
        }
        Ok(board)
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if x < 0 || y < 0 || x as u8 >= self.width || y as u8 >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Query the cell at (x, y). `None` when out of bounds.
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is valid (within bounds and empty)
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Cell::Empty))
    }

    /// Check if position holds a committed block
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Cell::Block(_)))
    }

    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        self.index(x, y).is_none()
    }

    /// Cells of row `y`, left to right.
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.height as usize {
            return None;
        }
        let width = self.width as usize;
        Some(&self.cells[y * width..(y + 1) * width])
    }

    /// Check if a row is completely filled with blocks
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .is_some_and(|row| row.iter().all(Cell::is_block))
    }

    /// Indices of all full rows, from the floor to the top.
    pub fn scan_full_rows(&self) -> RowList {
        (0..self.height as usize)
            .rev()
            .filter(|&y| self.is_row_full(y))
            .collect()
    }

    /// Empty the listed rows and let everything above them fall.
    ///
    /// Each surviving row moves down by the number of listed rows beneath it,
    /// so non-adjacent rows are handled in a single bottom-up pass. Vacated
    /// rows at the top become empty. Indices outside the board are ignored and
    /// an empty list leaves the board untouched.
    pub fn clear_and_shift(&mut self, rows: &[usize]) {
        let height = self.height as usize;
        let mut cleared = [false; MAX_BOARD_HEIGHT];
        let mut any = false;
        for &y in rows {
            if y < height {
                cleared[y] = true;
                any = true;
            }
        }
        if !any {
            return;
        }

        let width = self.width as usize;
        let mut write_y = height;

        // Two-pointer pass: read rows bottom-up, skip cleared ones, and copy
        // survivors down to the write position.
        for read_y in (0..height).rev() {
            if cleared[read_y] {
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src_start = read_y * width;
                self.cells
                    .copy_within(src_start..src_start + width, write_y * width);
            }
        }

        self.cells[..write_y * width].fill(Cell::Empty);
    }

    /// Clear all full rows and return their indices (floor first).
    pub fn clear_full_rows(&mut self) -> RowList {
        let rows = self.scan_full_rows();
        self.clear_and_shift(&rows);
        rows
    }

    /// Return a copy of the board with `cells` stamped in.
    ///
    /// Real stamps write `Cell::Block(kind)`. Ghost stamps write
    /// `Cell::Ghost(kind)` and only into empty cells, so they never hide a
    /// block. Cells outside the board are skipped.
    pub fn merged(&self, cells: &[(i8, i8)], kind: PieceKind, as_ghost: bool) -> Board {
        let mut out = self.clone();
        for &(x, y) in cells {
            let Some(idx) = out.index(x, y) else {
                continue;
            };
            if as_ghost {
                if out.cells[idx].is_empty() {
                    out.cells[idx] = Cell::Ghost(kind);
                }
            } else {
                out.cells[idx] = Cell::Block(kind);
            }
        }
        out
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Text rows, top first: `.` empty, uppercase letter for blocks, lowercase
    /// letter for ghost cells.
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.height as usize)
            .filter_map(|y| self.row(y))
            .map(|row| row.iter().map(|c| cell_char(*c)).collect())
            .collect()
    }
}

fn cell_char(cell: Cell) -> char {
    match cell {
        Cell::Empty => '.',
        Cell::Block(kind) => kind.as_str().to_ascii_uppercase().chars().next().unwrap_or('#'),
        Cell::Ghost(kind) => kind.as_str().chars().next().unwrap_or('+'),
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.to_rows() {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}
