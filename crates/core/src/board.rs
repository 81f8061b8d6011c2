//! Board module - the grid state machine
//!
//! The board owns the settled-cell grid and at most one active piece.
//! Coordinates are `(row, col)`: row 0 is the top, col 0 the left edge.
//! Rows above the grid are negative; a piece may overhang there while it
//! spawns, but such cells are never written to the grid.
//!
//! Conceptual states:
//!
//! - **Empty**: no active piece, a spawn is required
//! - **Falling**: an active piece in a valid position
//! - **GameOver**: the active piece spawned into an invalid position
//!
//! The grid is stored as a flat row-major `Vec<u8>` holding only 0 (empty)
//! and 1 (occupied).

use std::fmt;

use tracing::{debug, trace};

use crate::error::CoreError;
use crate::piece::Piece;
use crate::types::{RotationDirection, VisualState, DEFAULT_COLS, DEFAULT_ROWS};

const EMPTY: u8 = 0;
const FILLED: u8 = 1;

/// Largest grid `with_size` will allocate
pub const MAX_BOARD_CELLS: usize = 1 << 20;

/// Playing field plus the currently falling piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board<'c> {
    rows: usize,
    cols: usize,
    /// Row-major cells (row * cols + col)
    cells: Vec<u8>,
    active: Option<Piece<'c>>,
}

impl<'c> Board<'c> {
    /// Empty 20x10 board
    pub fn new() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            cells: vec![EMPTY; DEFAULT_ROWS * DEFAULT_COLS],
            active: None,
        }
    }

    /// Empty board of the given size.
    ///
    /// Both dimensions must be positive and the grid at most
    /// [`MAX_BOARD_CELLS`] cells.
    pub fn with_size(rows: usize, cols: usize) -> Result<Self, CoreError> {
        let addressable = i32::try_from(rows).is_ok() && i32::try_from(cols).is_ok();
        let fits = rows
            .checked_mul(cols)
            .is_some_and(|cells| cells <= MAX_BOARD_CELLS);
        if rows == 0 || cols == 0 || !addressable || !fits {
            return Err(CoreError::InvalidBoardSize { rows, cols });
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![EMPTY; rows * cols],
            active: None,
        })
    }

    /// Flat index of `(row, col)`, or None outside the grid
    #[inline(always)]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || col < 0 || row as usize >= self.rows || col as usize >= self.cols {
            return None;
        }
        Some(row as usize * self.cols + col as usize)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Occupancy at `(row, col)`; None outside the grid
    pub fn get(&self, row: i32, col: i32) -> Option<bool> {
        self.index(row, col).map(|idx| self.cells[idx] != EMPTY)
    }

    /// Inside the grid and filled
    pub fn is_occupied(&self, row: i32, col: i32) -> bool {
        self.get(row, col) == Some(true)
    }

    /// Set a settled cell. Returns false if out of bounds.
    pub fn set(&mut self, row: i32, col: i32, occupied: bool) -> bool {
        match self.index(row, col) {
            Some(idx) => {
                self.cells[idx] = if occupied { FILLED } else { EMPTY };
                true
            }
            None => false,
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        self.row(row)
            .is_some_and(|cells| cells.iter().all(|&cell| cell != EMPTY))
    }

    /// Cells of one row
    pub fn row(&self, row: usize) -> Option<&[u8]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.cols;
        Some(&self.cells[start..start + self.cols])
    }

    /// All settled cells, row-major
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Settled cells as a row-per-vector matrix
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells.chunks(self.cols).map(<[u8]>::to_vec).collect()
    }

    pub fn active(&self) -> Option<&Piece<'c>> {
        self.active.as_ref()
    }

    pub fn has_active(&self) -> bool {
        self.active.is_some()
    }

    /// Empty the grid and drop the active piece
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
        self.active = None;
    }

    /// Install `piece` as the active piece, centered horizontally.
    ///
    /// The previous piece must have been locked first.
    pub fn spawn_piece(&mut self, mut piece: Piece<'c>) -> Result<(), CoreError> {
        if self.active.is_some() {
            return Err(CoreError::PieceAlreadyActive);
        }
        piece.center_horizontally(self.cols);
        debug!(kind = %piece.kind(), row = piece.row(), col = piece.col(), "piece spawned");
        self.active = Some(piece);
        Ok(())
    }

    /// Whether `piece` fits at its position, or at the overriding row / col.
    ///
    /// Cells below the floor or outside the side walls are invalid. Cells
    /// above the grid (negative row) are allowed; cells inside the grid must
    /// be empty.
    /// A position whose cells overflow `i32` is never valid.
    pub fn is_valid(&self, piece: &Piece<'_>, row: Option<i32>, col: Option<i32>) -> bool {
        let Some(cells) = piece.checked_cells(row, col) else {
            return false;
        };
        cells.iter().all(|&(r, c)| {
            if r >= self.rows as i32 || c < 0 || c >= self.cols as i32 {
                return false;
            }
            r < 0 || !self.is_occupied(r, c)
        })
    }

    /// Move the active piece if the target position is valid.
    ///
    /// Returns false when blocked or when there is no active piece.
    pub fn try_move(&mut self, delta_row: i32, delta_col: i32) -> bool {
        let Some(mut piece) = self.active else {
            return false;
        };

        let (Some(row), Some(col)) = (
            piece.row().checked_add(delta_row),
            piece.col().checked_add(delta_col),
        ) else {
            return false;
        };
        if !self.is_valid(&piece, Some(row), Some(col)) {
            return false;
        }

        piece.shift(delta_row, delta_col);
        self.active = Some(piece);
        true
    }

    /// One row of gravity. False both when blocked and when no piece exists.
    pub fn try_fall(&mut self) -> bool {
        self.try_move(1, 0)
    }

    /// Rotate the active piece in place; rejected rotations leave it untouched.
    ///
    /// No wall kicks: a rotation that collides at the current column fails.
    pub fn try_rotate(&mut self, direction: RotationDirection) -> bool {
        let Some(mut piece) = self.active else {
            return false;
        };

        let previous = piece.rotation();
        piece.rotate(direction);
        if !self.is_valid(&piece, None, None) {
            trace!(kind = %piece.kind(), from = previous, to = piece.rotation(), "rotation rejected");
            return false;
        }

        self.active = Some(piece);
        true
    }

    /// Write the active piece into the grid and release it.
    ///
    /// Cells above the grid are dropped. Returns the locked piece (marked
    /// `Placed`), or None if there was no active piece.
    pub fn lock_piece(&mut self) -> Option<Piece<'c>> {
        let mut piece = self.active.take()?;

        let mut written = 0usize;
        let mut dropped = 0usize;
        for (r, c) in piece.cells() {
            if self.set(r, c, true) {
                written += 1;
            } else {
                dropped += 1;
            }
        }
        piece.set_visual(VisualState::Placed);

        debug!(
            kind = %piece.kind(),
            row = piece.row(),
            col = piece.col(),
            written,
            dropped,
            "piece locked"
        );
        Some(piece)
    }

    /// Remove every full row and return how many were removed.
    ///
    /// Rows above a cleared row shift down, keeping their order, and the top
    /// is padded with empty rows. Two-pointer compaction, bottom to top.
    pub fn clear_lines(&mut self) -> u32 {
        let width = self.cols;
        let mut write_row = self.rows;
        let mut cleared = 0u32;

        for read_row in (0..self.rows).rev() {
            if self.is_row_full(read_row) {
                cleared += 1;
            } else {
                write_row -= 1;
                if write_row != read_row {
                    let src = read_row * width;
                    self.cells.copy_within(src..src + width, write_row * width);
                }
            }
        }

        self.cells[..write_row * width].fill(EMPTY);

        if cleared > 0 {
            debug!(lines = cleared, "lines cleared");
        }
        cleared
    }

    /// True iff an active piece exists and its current position is invalid.
    pub fn is_game_over(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|piece| !self.is_valid(piece, None, None))
    }

    /// Rows the active piece can still fall
    pub fn drop_distance(&self) -> Option<i32> {
        let piece = self.active.as_ref()?;
        let mut distance = 0;
        while self.is_valid(piece, Some(piece.row() + distance + 1), None) {
            distance += 1;
        }
        Some(distance)
    }

    /// Landing preview of the active piece
    pub fn ghost(&self) -> Option<Piece<'c>> {
        let piece = self.active?;
        let distance = self.drop_distance()?;
        let mut ghost = piece.with_position(piece.row() + distance, piece.col());
        ghost.set_visual(VisualState::Ghost);
        Some(ghost)
    }
}

impl Default for Board<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// `.` empty, `#` settled, `@` active piece; one line per row.
impl fmt::Display for Board<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let active = self.active.map(|piece| piece.cells()).unwrap_or_default();
        for r in 0..self.rows as i32 {
            for c in 0..self.cols as i32 {
                let glyph = if active.contains(&(r, c)) {
                    '@'
                } else if self.is_occupied(r, c) {
                    '#'
                } else {
                    '.'
                };
                write!(f, "{}", glyph)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
