use serde::Serialize;

use blockfall_core::Piece;

use crate::types::{PieceKind, VisualState};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub row: i32,
    pub col: i32,
    pub rotation: usize,
    pub visual: VisualState,
    /// Shape of the current rotation, row-major 0/1
    pub matrix: Vec<Vec<u8>>,
}

impl From<&Piece<'_>> for ActiveSnapshot {
    fn from(piece: &Piece<'_>) -> Self {
        Self {
            kind: piece.kind(),
            row: piece.row(),
            col: piece.col(),
            rotation: piece.rotation(),
            visual: piece.visual(),
            matrix: piece.current_matrix().to_rows(),
        }
    }
}

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SessionSnapshot {
    pub rows: usize,
    pub cols: usize,
    pub grid: Vec<Vec<u8>>,
    pub active: Option<ActiveSnapshot>,
    pub ghost_row: Option<i32>,
    pub next: Vec<PieceKind>,
    pub lines_cleared: u32,
    pub pieces_locked: u32,
    pub game_over: bool,
}

impl SessionSnapshot {
    pub fn playable(&self) -> bool {
        !self.game_over
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
