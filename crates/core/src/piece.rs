//! Piece module - the active (falling) piece
//!
//! A [`Piece`] is plain pose data: kind, grid position, rotation index and
//! visual state. Every mutation here is unconditional; legality is decided by
//! [`crate::Board`], which tests hypothetical positions through
//! [`Piece::occupied_cells`] before committing anything.

use arrayvec::ArrayVec;

use crate::catalog::{PieceCatalog, Rotations, ShapeMatrix};
use crate::error::CoreError;
use crate::types::{PieceKind, RotationDirection, VisualState, MAX_SHAPE_DIM, ROTATION_COUNT};

/// Absolute `(row, col)` grid coordinates of a piece's filled cells
pub type PieceCells = ArrayVec<(i32, i32), { MAX_SHAPE_DIM * MAX_SHAPE_DIM }>;

/// A piece placed somewhere on (or above) the grid.
///
/// Borrows its rotation matrices from the catalog that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece<'c> {
    kind: PieceKind,
    rotations: &'c Rotations,
    row: i32,
    col: i32,
    rotation: usize,
    visual: VisualState,
}

impl<'c> Piece<'c> {
    /// New piece at (0, 0) in its spawn orientation
    pub fn new(kind: PieceKind, rotations: &'c Rotations) -> Self {
        Self {
            kind,
            rotations,
            row: 0,
            col: 0,
            rotation: 0,
            visual: VisualState::Normal,
        }
    }

    /// New piece using the rotations registered for `kind`
    pub fn from_catalog(catalog: &'c PieceCatalog, kind: PieceKind) -> Result<Self, CoreError> {
        Ok(Self::new(kind, catalog.rotations_of(kind)?))
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn row(&self) -> i32 {
        self.row
    }

    pub fn col(&self) -> i32 {
        self.col
    }

    /// Rotation index, always in `0..4`
    pub fn rotation(&self) -> usize {
        self.rotation
    }

    pub fn visual(&self) -> VisualState {
        self.visual
    }

    pub fn set_visual(&mut self, visual: VisualState) {
        self.visual = visual;
    }

    /// Same piece moved to `(row, col)`
    pub fn with_position(mut self, row: i32, col: i32) -> Self {
        self.row = row;
        self.col = col;
        self
    }

    /// Shape matrix for the current rotation
    pub fn current_matrix(&self) -> &'c ShapeMatrix {
        &self.rotations[self.rotation]
    }

    /// Shift the stored position. No bounds checking.
    pub fn shift(&mut self, delta_row: i32, delta_col: i32) {
        self.row += delta_row;
        self.col += delta_col;
    }

    /// Advance the rotation index one step, wrapping modulo 4.
    pub fn rotate(&mut self, direction: RotationDirection) {
        self.set_rotation(self.rotation as i32 + direction.delta());
    }

    /// Set the rotation index; any integer is normalized into `0..4`.
    pub fn set_rotation(&mut self, rotation: i32) {
        self.rotation = rotation.rem_euclid(ROTATION_COUNT as i32) as usize;
    }

    /// Filled cells in grid coordinates.
    ///
    /// `row` / `col` replace the stored position when given, which lets the
    /// board test a move without touching the piece. Coordinates saturate at
    /// the `i32` bounds.
    pub fn occupied_cells(&self, row: Option<i32>, col: Option<i32>) -> PieceCells {
        let base_row = row.unwrap_or(self.row);
        let base_col = col.unwrap_or(self.col);

        self.current_matrix()
            .filled()
            .map(|(r, c)| {
                (
                    base_row.saturating_add(r as i32),
                    base_col.saturating_add(c as i32),
                )
            })
            .collect()
    }

    /// Like [`Piece::occupied_cells`], but None when a cell coordinate
    /// overflows `i32`.
    pub fn checked_cells(&self, row: Option<i32>, col: Option<i32>) -> Option<PieceCells> {
        let base_row = row.unwrap_or(self.row);
        let base_col = col.unwrap_or(self.col);

        self.current_matrix()
            .filled()
            .map(|(r, c)| {
                let row = base_row.checked_add(r as i32)?;
                let col = base_col.checked_add(c as i32)?;
                Some((row, col))
            })
            .collect()
    }

    /// Filled cells at the stored position
    pub fn cells(&self) -> PieceCells {
        self.occupied_cells(None, None)
    }

    /// Center the bounding box horizontally on a board `board_cols` wide.
    pub fn center_horizontally(&mut self, board_cols: usize) {
        let width = self.current_matrix().cols() as i32;
        self.col = (board_cols as i32 - width).div_euclid(2);
    }
}
