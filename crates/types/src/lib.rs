//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no game logic attached, so they can be used
//! by the simulation core, the session driver, the input layer and any renderer.
//!
//! # Board Dimensions
//!
//! Default playfield dimensions (both can be overridden per board):
//!
//! - **Rows**: 20 (indexed 0-19, row 0 is the top)
//! - **Cols**: 10 (indexed 0-9, col 0 is the left edge)
//!
//! Pieces may hang above row 0 while spawning; those rows are negative.
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FALL_DELAY_MS` | 300 | Gravity interval (one row per interval) |
//! | `LOCK_DELAY_MS` | 50 | Grounded time before a piece locks |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, PieceKind, RotationDirection, DEFAULT_COLS, DEFAULT_ROWS};
//!
//! let piece = PieceKind::T;
//! assert_eq!(PieceKind::from_str("t"), Some(piece));
//!
//! assert_eq!(RotationDirection::Cw.delta(), 1);
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//!
//! assert_eq!(DEFAULT_ROWS, 20);
//! assert_eq!(DEFAULT_COLS, 10);
//! ```

use serde::{Deserialize, Serialize};

/// Default board height in rows
pub const DEFAULT_ROWS: usize = 20;

/// Default board width in columns
pub const DEFAULT_COLS: usize = 10;

/// Gravity interval: one row per 300ms
pub const FALL_DELAY_MS: u32 = 300;

/// Time a piece may rest on the stack before it locks
pub const LOCK_DELAY_MS: u32 = 50;

/// Default bag batch size (three copies of each of the seven pieces)
pub const DEFAULT_BAG_SIZE: usize = 21;

/// Number of upcoming pieces shown in previews
pub const DEFAULT_PREVIEW_COUNT: usize = 3;

/// Number of distinct rotation states per piece
pub const ROTATION_COUNT: usize = 4;

/// Largest side of a piece bounding box
pub const MAX_SHAPE_DIM: usize = 4;

/// Number of distinct piece kinds
pub const PIECE_KIND_COUNT: usize = 7;

/// The seven tetromino piece kinds
///
/// The declaration order is the catalog order: O, S, T, I, Z, L, J.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PieceKind {
    O,
    S,
    T,
    I,
    Z,
    L,
    J,
}

impl PieceKind {
    /// Every kind in catalog order
    pub const ALL: [PieceKind; PIECE_KIND_COUNT] = [
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::I,
        PieceKind::Z,
        PieceKind::L,
        PieceKind::J,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "O" => Some(PieceKind::O),
            "S" => Some(PieceKind::S),
            "T" => Some(PieceKind::T),
            "I" => Some(PieceKind::I),
            "Z" => Some(PieceKind::Z),
            "L" => Some(PieceKind::L),
            "J" => Some(PieceKind::J),
            _ => None,
        }
    }

    /// Single-letter identifier ("O", "S", ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::I => "I",
            PieceKind::Z => "Z",
            PieceKind::L => "L",
            PieceKind::J => "J",
        }
    }

    /// Position in [`PieceKind::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rotation direction applied to a piece
///
/// Clockwise advances the rotation index by one, counter-clockwise steps it
/// back by one (so counter-clockwise from state 0 lands on state 3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationDirection {
    Cw,
    Ccw,
}

impl RotationDirection {
    /// Signed step applied to the rotation index
    pub fn delta(&self) -> i32 {
        match self {
            RotationDirection::Cw => 1,
            RotationDirection::Ccw => -1,
        }
    }
}

/// How a piece should be drawn
///
/// Informational only: the simulation never branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualState {
    /// Falling under player control
    #[default]
    Normal,
    /// Locked into the grid
    Placed,
    /// Landing preview of the active piece
    Ghost,
}

impl VisualState {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisualState::Normal => "normal",
            VisualState::Placed => "placed",
            VisualState::Ghost => "ghost",
        }
    }
}

/// Discrete commands forwarded from the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameAction {
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Move piece one row down
    SoftDrop,
    /// Drop piece to its landing row and lock it immediately
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Toggle the pause overlay
    Pause,
    /// Start a fresh game after game over
    Restart,
}

impl GameAction {
    /// Parse action from its camelCase name
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotateCcw"), Some(GameAction::RotateCcw));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }
}
