//! Catalog module - tetromino shape matrices and their rotations
//!
//! Each piece kind is defined by a single base matrix. The remaining three
//! orientations are generated by repeated 90° clockwise rotation, so index 0 is
//! the spawn orientation and index `n` is `n` quarter turns clockwise from it.
//!
//! Shapes live in a [`PieceCatalog`]; pieces borrow their rotations from it.
//! [`PieceCatalog::standard`] holds the seven standard tetrominoes and is built
//! once per process.

use std::sync::OnceLock;

use crate::error::CoreError;
use crate::types::{PieceKind, MAX_SHAPE_DIM, PIECE_KIND_COUNT, ROTATION_COUNT};

const DIM: usize = MAX_SHAPE_DIM;

/// Binary occupancy matrix of a piece inside its own bounding box.
///
/// Row 0 is the top row. At most 4x4, stored inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeMatrix {
    rows: u8,
    cols: u8,
    cells: [[bool; DIM]; DIM],
}

impl ShapeMatrix {
    /// Build from a fixed bit table; bits outside `rows x cols` are ignored.
    pub const fn from_bits(rows: usize, cols: usize, bits: [[u8; DIM]; DIM]) -> Self {
        let mut cells = [[false; DIM]; DIM];
        let mut r = 0;
        while r < rows {
            let mut c = 0;
            while c < cols {
                cells[r][c] = bits[r][c] != 0;
                c += 1;
            }
            r += 1;
        }
        Self {
            rows: rows as u8,
            cols: cols as u8,
            cells,
        }
    }

    /// Build from rows of 0/1 values.
    ///
    /// The matrix must be rectangular, non-empty, at most 4x4, contain only 0
    /// and 1, and have at least one filled cell.
    ///
    /// ```
    /// use blockfall_core::ShapeMatrix;
    ///
    /// let bar = ShapeMatrix::from_rows(&[&[1, 1, 1]]).unwrap();
    /// assert_eq!((bar.rows(), bar.cols()), (1, 3));
    /// assert!(ShapeMatrix::from_rows(&[&[1, 1], &[1]]).is_err());
    /// ```
    pub fn from_rows(rows: &[&[u8]]) -> Result<Self, CoreError> {
        let height = rows.len();
        if height == 0 || height > DIM {
            return Err(CoreError::InvalidShape("row count must be between 1 and 4"));
        }
        let width = rows[0].len();
        if width == 0 || width > DIM {
            return Err(CoreError::InvalidShape("column count must be between 1 and 4"));
        }

        let mut bits = [[0u8; DIM]; DIM];
        for (r, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(CoreError::InvalidShape("rows must all have the same length"));
            }
            for (c, &value) in row.iter().enumerate() {
                if value > 1 {
                    return Err(CoreError::InvalidShape("cells must be 0 or 1"));
                }
                bits[r][c] = value;
            }
        }

        let matrix = Self::from_bits(height, width, bits);
        if matrix.cell_count() == 0 {
            return Err(CoreError::InvalidShape("shape has no filled cells"));
        }
        Ok(matrix)
    }

    pub fn rows(&self) -> usize {
        self.rows as usize
    }

    pub fn cols(&self) -> usize {
        self.cols as usize
    }

    /// Whether the cell at `(row, col)` is filled; false outside the box.
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.rows() && col < self.cols() && self.cells[row][col]
    }

    /// Number of filled cells
    pub fn cell_count(&self) -> usize {
        self.filled().count()
    }

    /// Filled cells as `(row, col)` offsets, row-major.
    pub fn filled(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.rows()).flat_map(move |r| {
            (0..self.cols())
                .filter(move |&c| self.cells[r][c])
                .map(move |c| (r, c))
        })
    }

    /// Quarter turn clockwise. An `r x c` matrix becomes `c x r`.
    pub fn rotated_cw(&self) -> Self {
        let (rows, cols) = (self.rows(), self.cols());
        let mut cells = [[false; DIM]; DIM];
        for (r, c) in self.filled() {
            cells[c][rows - 1 - r] = true;
        }
        Self {
            rows: cols as u8,
            cols: rows as u8,
            cells,
        }
    }

    /// Rows of 0/1 values, for snapshots and debugging.
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.rows())
            .map(|r| (0..self.cols()).map(|c| self.cells[r][c] as u8).collect())
            .collect()
    }
}

/// The four orientations of a piece, indexed by rotation state.
pub type Rotations = [ShapeMatrix; ROTATION_COUNT];

/// Generate 0°, 90°, 180° and 270° (clockwise) orientations of `base`.
pub fn generate_rotations(base: ShapeMatrix) -> Rotations {
    let mut rotations = [base; ROTATION_COUNT];
    for i in 1..ROTATION_COUNT {
        rotations[i] = rotations[i - 1].rotated_cw();
    }
    rotations
}

/// Base (spawn) orientation of a standard tetromino
pub const fn standard_shape(kind: PieceKind) -> ShapeMatrix {
    match kind {
        PieceKind::O => ShapeMatrix::from_bits(2, 2, [[1, 1, 0, 0], [1, 1, 0, 0], [0; 4], [0; 4]]),
        PieceKind::S => ShapeMatrix::from_bits(3, 3, [[0, 1, 1, 0], [1, 1, 0, 0], [0; 4], [0; 4]]),
        PieceKind::T => ShapeMatrix::from_bits(3, 3, [[1, 1, 1, 0], [0, 1, 0, 0], [0; 4], [0; 4]]),
        PieceKind::I => ShapeMatrix::from_bits(4, 4, [[1, 1, 1, 1], [0; 4], [0; 4], [0; 4]]),
        PieceKind::Z => ShapeMatrix::from_bits(3, 3, [[1, 1, 0, 0], [0, 1, 1, 0], [0; 4], [0; 4]]),
        PieceKind::L => {
            ShapeMatrix::from_bits(3, 3, [[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 1, 0], [0; 4]])
        }
        PieceKind::J => {
            ShapeMatrix::from_bits(3, 3, [[0, 0, 1, 0], [0, 0, 1, 0], [0, 1, 1, 0], [0; 4]])
        }
    }
}

/// Registry of piece kinds and their precomputed rotations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceCatalog {
    entries: [Option<Rotations>; PIECE_KIND_COUNT],
}

impl PieceCatalog {
    /// Empty catalog; kinds must be registered before use.
    pub fn new() -> Self {
        Self {
            entries: [None; PIECE_KIND_COUNT],
        }
    }

    /// Catalog holding the seven standard tetrominoes.
    pub fn with_standard_pieces() -> Self {
        let mut catalog = Self::new();
        for kind in PieceKind::ALL {
            catalog.entries[kind.index()] = Some(generate_rotations(standard_shape(kind)));
        }
        catalog
    }

    /// Process-wide standard catalog, built on first use.
    pub fn standard() -> &'static PieceCatalog {
        static STANDARD: OnceLock<PieceCatalog> = OnceLock::new();
        STANDARD.get_or_init(PieceCatalog::with_standard_pieces)
    }

    /// Register `kind` with `base` as its spawn orientation.
    pub fn register(&mut self, kind: PieceKind, base: ShapeMatrix) -> Result<&Rotations, CoreError> {
        let slot = &mut self.entries[kind.index()];
        if slot.is_some() {
            return Err(CoreError::DuplicatePieceKind(kind));
        }
        Ok(slot.insert(generate_rotations(base)))
    }

    pub fn contains(&self, kind: PieceKind) -> bool {
        self.entries[kind.index()].is_some()
    }

    /// Rotations of a registered kind.
    pub fn rotations_of(&self, kind: PieceKind) -> Result<&Rotations, CoreError> {
        self.entries[kind.index()]
            .as_ref()
            .ok_or_else(|| CoreError::UnknownPieceKind(kind.as_str().to_string()))
    }

    /// Rotations looked up by identifier ("T", "i", ...).
    pub fn rotations_of_name(&self, name: &str) -> Result<&Rotations, CoreError> {
        let kind =
            PieceKind::from_str(name).ok_or_else(|| CoreError::UnknownPieceKind(name.to_string()))?;
        self.rotations_of(kind)
    }

    /// Matrix for `rotation`, which may be negative or exceed 3.
    pub fn matrix(&self, kind: PieceKind, rotation: i32) -> Result<&ShapeMatrix, CoreError> {
        let rotations = self.rotations_of(kind)?;
        Ok(&rotations[rotation.rem_euclid(ROTATION_COUNT as i32) as usize])
    }

    /// Registered kinds in catalog order.
    pub fn kinds(&self) -> impl Iterator<Item = PieceKind> + '_ {
        PieceKind::ALL
            .into_iter()
            .filter(move |kind| self.contains(*kind))
    }
}

impl Default for PieceCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_t_rotates_clockwise() {
        let rotations = generate_rotations(standard_shape(PieceKind::T));
        assert_eq!(
            rotations[1].to_rows(),
            vec![vec![0, 0, 1], vec![0, 1, 1], vec![0, 0, 1]]
        );
        assert_eq!(
            rotations[2].to_rows(),
            vec![vec![0, 0, 0], vec![0, 1, 0], vec![1, 1, 1]]
        );
    }

    #[test]
    fn test_rectangular_rotation_swaps_dimensions() {
        let bar = ShapeMatrix::from_rows(&[&[1, 1, 1], &[1, 0, 0]]).unwrap();
        let turned = bar.rotated_cw();
        assert_eq!((turned.rows(), turned.cols()), (3, 2));
        assert_eq!(turned.to_rows(), vec![vec![1, 1], vec![0, 1], vec![0, 1]]);
    }

    #[test]
    fn test_four_turns_is_identity() {
        for kind in PieceKind::ALL {
            let base = standard_shape(kind);
            let rotations = generate_rotations(base);
            assert_eq!(rotations[3].rotated_cw(), base, "{kind}");
            for rotation in rotations {
                assert_eq!(rotation.cell_count(), 4, "{kind}");
            }
        }
    }

    #[test]
    fn test_from_rows_rejects_bad_values() {
        assert_eq!(
            ShapeMatrix::from_rows(&[&[0, 2]]),
            Err(CoreError::InvalidShape("cells must be 0 or 1"))
        );
        assert!(ShapeMatrix::from_rows(&[&[0, 0]]).is_err());
        assert!(ShapeMatrix::from_rows(&[&[1, 1, 1, 1, 1]]).is_err());
        assert!(ShapeMatrix::from_rows(&[]).is_err());
    }

    #[test]
    fn test_register_twice_fails() {
        let mut catalog = PieceCatalog::new();
        catalog
            .register(PieceKind::O, standard_shape(PieceKind::O))
            .unwrap();
        assert_eq!(
            catalog.register(PieceKind::O, standard_shape(PieceKind::O)),
            Err(CoreError::DuplicatePieceKind(PieceKind::O))
        );
        assert_eq!(catalog.kinds().collect::<Vec<_>>(), vec![PieceKind::O]);
    }

    #[test]
    fn test_matrix_normalizes_rotation() {
        let catalog = PieceCatalog::standard();
        assert_eq!(
            catalog.matrix(PieceKind::S, -1).unwrap(),
            catalog.matrix(PieceKind::S, 3).unwrap()
        );
        assert_eq!(
            catalog.matrix(PieceKind::S, 4).unwrap(),
            catalog.matrix(PieceKind::S, 0).unwrap()
        );
    }
}
