use std::fmt;

use crate::types::PieceKind;

/// Errors raised by the simulation core.
///
/// Rejected moves and rotations are not errors; those are reported as `false`
/// by the `try_*` operations on [`crate::Board`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Bag batch size is zero or not a multiple of the distinct piece count
    InvalidBagSize { batch_size: usize, distinct: usize },
    /// Board with a zero (or unaddressable) dimension
    InvalidBoardSize { rows: usize, cols: usize },
    /// Shape matrix rejected by [`crate::ShapeMatrix::from_rows`]
    InvalidShape(&'static str),
    /// Identifier not present in the catalog
    UnknownPieceKind(String),
    /// Kind registered twice in one catalog
    DuplicatePieceKind(PieceKind),
    /// `spawn_piece` called while a piece is still falling
    PieceAlreadyActive,
}

impl CoreError {
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::InvalidBagSize { .. } => "invalid_bag_size",
            CoreError::InvalidBoardSize { .. } => "invalid_board_size",
            CoreError::InvalidShape(_) => "invalid_shape",
            CoreError::UnknownPieceKind(_) => "unknown_piece_kind",
            CoreError::DuplicatePieceKind(_) => "duplicate_piece_kind",
            CoreError::PieceAlreadyActive => "piece_already_active",
        }
    }

    /// Malformed construction parameters, fatal at construction time.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            CoreError::InvalidBagSize { .. }
                | CoreError::InvalidBoardSize { .. }
                | CoreError::InvalidShape(_)
        )
    }
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::InvalidBagSize {
                batch_size,
                distinct,
            } => write!(
                f,
                "bag size {} must be a positive multiple of {}",
                batch_size, distinct
            ),
            CoreError::InvalidBoardSize { rows, cols } => {
                write!(f, "board size {}x{} is not usable", rows, cols)
            }
            CoreError::InvalidShape(reason) => write!(f, "invalid shape matrix: {}", reason),
            CoreError::UnknownPieceKind(name) => write!(f, "piece '{}' is not registered", name),
            CoreError::DuplicatePieceKind(kind) => {
                write!(f, "piece '{}' is already registered", kind)
            }
            CoreError::PieceAlreadyActive => {
                f.write_str("a piece is already active; lock it before spawning another")
            }
        }
    }
}

impl std::error::Error for CoreError {}
